//! Command-line admin shell for the folio portfolio site.
//!
//! The shell is a thin consumer of `folio_client`: every subcommand builds
//! the matching view-model or form, drives it, and formats the result. All
//! content logic lives in the client crate.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use folio_client::form::drafts::{BlogDraft, ProjectDraft};
use folio_client::{
    load_counts, upload_and_resolve, Collection, Committed, DashboardCounts, FormController,
    HttpGateway, ImageSlot, PendingUpload, ReadStore,
};
use folio_core::models::{BlogPost, Project, ReviewEntry, SlideImage};
use folio_core::prefs::Preferences;
use folio_core::Config;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "folio", about = "Portfolio content admin", version)]
struct Cli {
    /// API base URL (can also be set via FOLIO_API_URL env var)
    #[arg(short, long, env = "FOLIO_API_URL")]
    server: Option<String>,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    json: bool,

    /// Request timeout in seconds
    #[arg(short = 't', long)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Show per-collection totals
    Dashboard,
    /// Manage portfolio projects
    Projects {
        #[command(subcommand)]
        command: ProjectCmd,
    },
    /// Manage blog posts
    Blogs {
        #[command(subcommand)]
        command: BlogCmd,
    },
    /// List visitor reviews
    Reviews,
    /// Manage the landing-page slideshow
    Slideshow {
        #[command(subcommand)]
        command: SlideshowCmd,
    },
    /// Show or toggle the site theme
    Theme {
        /// Switch to the other theme and persist the choice
        #[arg(long)]
        toggle: bool,
    },
}

#[derive(Subcommand)]
enum ProjectCmd {
    List,
    Show {
        id: String,
    },
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
        /// Image file to attach (repeatable)
        #[arg(long = "image")]
        images: Vec<PathBuf>,
    },
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Additional image file to attach (repeatable)
        #[arg(long = "image")]
        images: Vec<PathBuf>,
        /// Drop every persisted image before attaching new ones
        #[arg(long)]
        clear_images: bool,
    },
    Rm {
        id: String,
    },
}

#[derive(Subcommand)]
enum BlogCmd {
    List,
    Show {
        id: String,
    },
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        excerpt: String,
        /// Cover image file
        #[arg(long)]
        cover: Option<PathBuf>,
        /// Additional image file to attach (repeatable)
        #[arg(long = "image")]
        images: Vec<PathBuf>,
    },
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        excerpt: Option<String>,
        /// Replace the cover image
        #[arg(long)]
        cover: Option<PathBuf>,
        /// Drop the persisted cover image
        #[arg(long)]
        clear_cover: bool,
        /// Additional image file to attach (repeatable)
        #[arg(long = "image")]
        images: Vec<PathBuf>,
    },
    Rm {
        id: String,
    },
}

#[derive(Subcommand)]
enum SlideshowCmd {
    List,
    /// Upload one or more images to the slideshow
    Add {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    Rm {
        id: String,
    },
}

fn format_project_rows(projects: &[Project]) -> String {
    projects
        .iter()
        .map(|project| {
            format!(
                "{:<26} {:<30} {:>2} images",
                project.id,
                project.name,
                project.images.len()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_blog_rows(blogs: &[BlogPost]) -> String {
    blogs
        .iter()
        .map(|blog| {
            let date = blog
                .created_at
                .map(|at| at.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string());
            format!("{:<26} {:<30} {}", blog.id, blog.title, date)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_review_rows(reviews: &[ReviewEntry]) -> String {
    reviews
        .iter()
        .map(|review| format!("{:<20} {}", review.author, truncate(&review.content, 60)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_slide_rows(slides: &[SlideImage]) -> String {
    slides
        .iter()
        .map(|slide| format!("{:<26} {}", slide.id, slide.url))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_counts(counts: &DashboardCounts) -> String {
    format!(
        "Projects: {}\nBlogs: {}\nReviews: {}",
        counts.projects, counts.blogs, counts.reviews
    )
}

/// Truncate to at most `max` characters, appending an ellipsis when cut.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", cut)
}

fn print_list<T: serde::Serialize>(items: &[T], json: bool, text: String) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
    } else if !text.is_empty() {
        println!("{}", text);
    }
    Ok(())
}

fn print_record<T: serde::Serialize>(record: &T, json: bool, text: String) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(record)?);
    } else {
        println!("{}", text);
    }
    Ok(())
}

/// Patch the committed record into the collection, or re-fetch when the
/// operator asked for reconciliation.
async fn apply_commit<R>(
    collection: &mut Collection<R>,
    gateway: &HttpGateway,
    config: &Config,
    committed: Committed<R>,
) where
    R: folio_client::Resource,
{
    if config.reconcile_after_commit {
        collection.reconcile(gateway).await;
    } else {
        collection.commit(committed);
    }
}

async fn run_projects(
    gateway: &HttpGateway,
    config: &Config,
    json: bool,
    command: ProjectCmd,
) -> anyhow::Result<()> {
    match command {
        ProjectCmd::List => {
            let mut collection = Collection::<Project>::new();
            collection.load(gateway).await;
            print_list(collection.items(), json, format_project_rows(collection.items()))
        }
        ProjectCmd::Show { id } => {
            let Some(project) = ReadStore::<Project>::get(gateway, &id).await else {
                anyhow::bail!("project {} not found", id);
            };
            let text = format!(
                "{}\n{}\nimages: {}",
                project.name,
                project.description,
                project.images.join(", ")
            );
            print_record(&project, json, text)
        }
        ProjectCmd::Add {
            name,
            description,
            images,
        } => {
            let mut collection = Collection::<Project>::new();
            collection.load(gateway).await;

            let mut form = FormController::<ProjectDraft>::create(config.preview_dir.clone());
            form.set_field("name", &name);
            form.set_field("description", &description);
            for path in &images {
                form.attach_file(ImageSlot::Gallery, path)?;
            }

            let committed = form.submit(gateway, gateway).await?;
            let record = match &committed {
                Committed::Created(record) | Committed::Updated(record) => record.clone(),
            };
            apply_commit(&mut collection, gateway, config, committed).await;
            print_record(
                &record,
                json,
                format!(
                    "Created project: {} ({}), {} total",
                    record.name,
                    record.id,
                    collection.len()
                ),
            )
        }
        ProjectCmd::Update {
            id,
            name,
            description,
            images,
            clear_images,
        } => {
            let Some(existing) = ReadStore::<Project>::get(gateway, &id).await else {
                anyhow::bail!("project {} not found", id);
            };
            let mut collection = Collection::<Project>::new();
            collection.load(gateway).await;

            let mut form = FormController::<ProjectDraft>::edit(&existing, config.preview_dir.clone());
            if let Some(name) = name.as_deref() {
                form.set_field("name", name);
            }
            if let Some(description) = description.as_deref() {
                form.set_field("description", description);
            }
            if clear_images {
                while form.detach_file(ImageSlot::Gallery, Some(0)) {}
            }
            for path in &images {
                form.attach_file(ImageSlot::Gallery, path)?;
            }

            let committed = form.submit(gateway, gateway).await?;
            let record = match &committed {
                Committed::Created(record) | Committed::Updated(record) => record.clone(),
            };
            apply_commit(&mut collection, gateway, config, committed).await;
            print_record(
                &record,
                json,
                format!("Updated project: {} ({})", record.name, record.id),
            )
        }
        ProjectCmd::Rm { id } => {
            let mut collection = Collection::<Project>::new();
            collection.load(gateway).await;
            collection.remove(gateway, &id).await?;
            println!("Deleted project: {}", id);
            Ok(())
        }
    }
}

async fn run_blogs(
    gateway: &HttpGateway,
    config: &Config,
    json: bool,
    command: BlogCmd,
) -> anyhow::Result<()> {
    match command {
        BlogCmd::List => {
            let mut collection = Collection::<BlogPost>::new();
            collection.load(gateway).await;
            print_list(collection.items(), json, format_blog_rows(collection.items()))
        }
        BlogCmd::Show { id } => {
            let Some(blog) = ReadStore::<BlogPost>::get(gateway, &id).await else {
                anyhow::bail!("blog {} not found", id);
            };
            let text = format!(
                "{}\n{}\ncover: {}\nimages: {}",
                blog.title,
                blog.excerpt,
                blog.cover_image.as_deref().unwrap_or("-"),
                blog.additional_images.join(", ")
            );
            print_record(&blog, json, text)
        }
        BlogCmd::Add {
            title,
            excerpt,
            cover,
            images,
        } => {
            let mut collection = Collection::<BlogPost>::new();
            collection.load(gateway).await;

            let mut form = FormController::<BlogDraft>::create(config.preview_dir.clone());
            form.set_field("title", &title);
            form.set_field("excerpt", &excerpt);
            if let Some(path) = cover.as_deref() {
                form.attach_file(ImageSlot::Cover, path)?;
            }
            for path in &images {
                form.attach_file(ImageSlot::Gallery, path)?;
            }

            let committed = form.submit(gateway, gateway).await?;
            let record = match &committed {
                Committed::Created(record) | Committed::Updated(record) => record.clone(),
            };
            apply_commit(&mut collection, gateway, config, committed).await;
            print_record(
                &record,
                json,
                format!(
                    "Created blog: {} ({}), {} total",
                    record.title,
                    record.id,
                    collection.len()
                ),
            )
        }
        BlogCmd::Update {
            id,
            title,
            excerpt,
            cover,
            clear_cover,
            images,
        } => {
            let Some(existing) = ReadStore::<BlogPost>::get(gateway, &id).await else {
                anyhow::bail!("blog {} not found", id);
            };
            let mut collection = Collection::<BlogPost>::new();
            collection.load(gateway).await;

            let mut form = FormController::<BlogDraft>::edit(&existing, config.preview_dir.clone());
            if let Some(title) = title.as_deref() {
                form.set_field("title", title);
            }
            if let Some(excerpt) = excerpt.as_deref() {
                form.set_field("excerpt", excerpt);
            }
            if clear_cover {
                form.detach_file(ImageSlot::Cover, None);
            }
            if let Some(path) = cover.as_deref() {
                form.attach_file(ImageSlot::Cover, path)?;
            }
            for path in &images {
                form.attach_file(ImageSlot::Gallery, path)?;
            }

            let committed = form.submit(gateway, gateway).await?;
            let record = match &committed {
                Committed::Created(record) | Committed::Updated(record) => record.clone(),
            };
            apply_commit(&mut collection, gateway, config, committed).await;
            print_record(
                &record,
                json,
                format!("Updated blog: {} ({})", record.title, record.id),
            )
        }
        BlogCmd::Rm { id } => {
            let mut collection = Collection::<BlogPost>::new();
            collection.load(gateway).await;
            collection.remove(gateway, &id).await?;
            println!("Deleted blog: {}", id);
            Ok(())
        }
    }
}

async fn run_slideshow(
    gateway: &HttpGateway,
    config: &Config,
    json: bool,
    command: SlideshowCmd,
) -> anyhow::Result<()> {
    match command {
        SlideshowCmd::List => {
            let mut collection = Collection::<SlideImage>::new();
            collection.load(gateway).await;
            print_list(collection.items(), json, format_slide_rows(collection.items()))
        }
        SlideshowCmd::Add { files } => {
            let mut collection = Collection::<SlideImage>::new();
            collection.load(gateway).await;

            let mut staged = Vec::with_capacity(files.len());
            for path in &files {
                staged.push(PendingUpload::stage(path, &config.preview_dir)?);
            }
            let uploaded = upload_and_resolve(gateway, staged.iter()).await?;
            for upload in &mut staged {
                upload.release_preview();
            }
            for item in &uploaded {
                collection.commit(Committed::Created(SlideImage {
                    id: item.id.clone(),
                    url: item.url.clone(),
                }));
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&uploaded)?);
            } else {
                println!(
                    "Uploaded {} images, {} in slideshow",
                    uploaded.len(),
                    collection.len()
                );
            }
            Ok(())
        }
        SlideshowCmd::Rm { id } => {
            let mut collection = Collection::<SlideImage>::new();
            collection.load(gateway).await;
            collection.remove(gateway, &id).await?;
            println!("Deleted slide: {}", id);
            Ok(())
        }
    }
}

fn run_theme(config: &Config, toggle: bool) -> anyhow::Result<()> {
    let mut prefs = Preferences::load(&config.prefs_path);
    if toggle {
        let theme = prefs.toggle_theme(&config.prefs_path)?;
        println!("Theme set to {}", theme);
    } else {
        println!("Theme: {}", prefs.theme);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let Cli {
        server,
        json,
        timeout,
        command,
    } = Cli::parse();

    if let Commands::Completions { shell } = &command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let mut config = Config::from_env();
    if let Some(server) = server {
        config.api_url = server;
    }
    if let Some(timeout) = timeout {
        config.timeout_secs = timeout;
    }
    tracing::debug!(api_url = %config.api_url, timeout_secs = config.timeout_secs, "resolved configuration");

    match command {
        Commands::Completions { .. } => unreachable!("completions handled before gateway setup"),
        Commands::Theme { toggle } => run_theme(&config, toggle),
        command => {
            let gateway = HttpGateway::new(&config)?;
            match command {
                Commands::Dashboard => {
                    let counts = load_counts(&gateway).await;
                    if json {
                        println!("{}", serde_json::to_string_pretty(&counts)?);
                    } else {
                        println!("{}", format_counts(&counts));
                    }
                    Ok(())
                }
                Commands::Projects { command } => run_projects(&gateway, &config, json, command).await,
                Commands::Blogs { command } => run_blogs(&gateway, &config, json, command).await,
                Commands::Reviews => {
                    let mut collection = Collection::<ReviewEntry>::new();
                    collection.load(&gateway).await;
                    print_list(
                        collection.items(),
                        json,
                        format_review_rows(collection.items()),
                    )
                }
                Commands::Slideshow { command } => {
                    run_slideshow(&gateway, &config, json, command).await
                }
                Commands::Completions { .. } | Commands::Theme { .. } => unreachable!(),
            }
        }
    }
}
