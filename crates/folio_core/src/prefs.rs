//! Persisted operator preferences.
//!
//! One owned value loaded at startup and passed down explicitly; every
//! mutation is written back through an atomic write-then-rename so a crash
//! never leaves a half-written preferences file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use tracing::warn;

/// Site-wide theme flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Light => write!(f, "light"),
            Self::Dark => write!(f, "dark"),
        }
    }
}

/// Operator preferences persisted between sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Preferences {
    #[serde(default)]
    pub theme: Theme,
}

impl Preferences {
    /// Load preferences from `path`, falling back to defaults.
    ///
    /// A missing file is the normal first-run case; an unreadable or
    /// unparseable file is logged and treated as absent.
    pub fn load(path: &Path) -> Self {
        let data = match fs::read(path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Self::default(),
            Err(err) => {
                warn!("failed to read preferences {}: {}", path.display(), err);
                return Self::default();
            }
        };
        match serde_json::from_slice(&data) {
            Ok(prefs) => prefs,
            Err(err) => {
                warn!("failed to parse preferences {}: {}", path.display(), err);
                Self::default()
            }
        }
    }

    /// Toggle the theme and persist the change immediately.
    ///
    /// # Returns
    /// The new theme value.
    pub fn toggle_theme(&mut self, path: &Path) -> io::Result<Theme> {
        self.theme = self.theme.toggled();
        self.persist(path)?;
        Ok(self.theme)
    }

    /// Write preferences to `path` atomically (write temp, then rename).
    pub fn persist(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let bytes = serde_json::to_vec_pretty(self)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err.to_string()))?;
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, bytes)?;
        fs::rename(&tmp_path, path)
    }
}
