//! CLI entry point for postboard

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "postboard")]
#[command(version)]
#[command(about = "Render and summarize community posts written in markdown", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new board
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// File name for the new post, without extension
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Render post content to HTML
    #[command(alias = "r")]
    Render {
        /// Markdown file to render (stdin when omitted or `-`)
        file: Option<PathBuf>,

        /// Write HTML here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Re-render whenever the file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Print the single-line card snippet of post content
    Summarize {
        /// Markdown file to summarize (stdin when omitted or `-`)
        file: Option<PathBuf>,
    },

    /// List posts or categories
    List {
        /// Type of content to list (post, category)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Show one post as rendered on its page
    Show {
        /// Post id
        id: u32,

        /// Email of the viewing user, to report edit/delete permission
        #[arg(long = "as")]
        viewer: Option<String>,
    },

    /// Validate a draft with the post form rules
    Check {
        /// Draft file
        file: PathBuf,
    },

    /// Write the card index and post pages to the public folder
    #[command(alias = "g")]
    Generate,

    /// Clean the public folder
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        "postboard=debug,info"
    } else {
        "postboard=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing board in {:?}", target_dir);
            postboard::commands::init::init_board(&target_dir)?;
            println!("Initialized board in {:?}", target_dir);
        }

        Commands::New { title, path } => {
            let board = postboard::Board::new(&base_dir)?;
            tracing::info!("Creating new post with title: {}", title);
            let file = postboard::commands::new::create_post(&board, &title, path.as_deref())?;
            println!("Created: {:?}", file);
        }

        Commands::Render {
            file,
            output,
            watch,
        } => {
            let board = postboard::Board::new(&base_dir)?;
            if watch {
                let Some(file) = file else {
                    anyhow::bail!("--watch needs a file to watch");
                };
                postboard::commands::render::watch(&board, &file, output.as_deref()).await?;
            } else {
                postboard::commands::render::run(&board, file.as_deref(), output.as_deref())?;
            }
        }

        Commands::Summarize { file } => {
            let board = postboard::Board::new(&base_dir)?;
            postboard::commands::summarize::run(&board, file.as_deref())?;
        }

        Commands::List { r#type } => {
            let board = postboard::Board::new(&base_dir)?;
            postboard::commands::list::run(&board, &r#type)?;
        }

        Commands::Show { id, viewer } => {
            let board = postboard::Board::new(&base_dir)?;
            postboard::commands::show::run(&board, id, viewer.as_deref())?;
        }

        Commands::Check { file } => {
            let board = postboard::Board::new(&base_dir)?;
            postboard::commands::check::run(&board, &file)?;
        }

        Commands::Generate => {
            let board = postboard::Board::new(&base_dir)?;
            tracing::info!("Generating public files...");
            board.generate()?;
            println!("Generated successfully!");
        }

        Commands::Clean => {
            let board = postboard::Board::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            board.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("postboard version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
