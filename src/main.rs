//! CLI entry point for mwd-blocks

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mwd-blocks")]
#[command(version = "0.1.0")]
#[command(about = "Post listing and card blocks rendered from a content library", long_about = None)]
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
    /// Initialize a new block library
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// List library information
    List {
        /// Type of content to list (post, type, category, block)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Show the options an editor picker would offer
    Options {
        /// Option kind (categories, types)
        #[arg(default_value = "categories")]
        kind: String,
    },

    /// Render a block to HTML
    #[command(alias = "r")]
    Render {
        /// Block name, with or without namespace
        block: String,

        /// Block attributes as a JSON object
        #[arg(short, long, default_value = "{}")]
        attributes: String,
    },

    /// Start the REST server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// IP address to bind to
        #[arg(short, long)]
        ip: Option<String>,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "mwd_blocks=debug,info"
    } else {
        "mwd_blocks=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing block library in {:?}", target_dir);
            mwd_blocks::commands::init::init_library(&target_dir)?;
            println!("Initialized block library in {:?}", target_dir);
        }

        Commands::List { r#type } => {
            let library = mwd_blocks::BlockLibrary::new(&base_dir)?;
            mwd_blocks::commands::list::run(&library, &r#type)?;
        }

        Commands::Options { kind } => {
            let library = mwd_blocks::BlockLibrary::new(&base_dir)?;
            mwd_blocks::commands::options::run(&library, &kind).await?;
        }

        Commands::Render { block, attributes } => {
            let library = mwd_blocks::BlockLibrary::new(&base_dir)?;
            mwd_blocks::commands::render::run(&library, &block, &attributes)?;
        }

        Commands::Serve { port, ip } => {
            let library = mwd_blocks::BlockLibrary::new(&base_dir)?;
            let ip = ip.unwrap_or_else(|| library.config.server.ip.clone());
            let port = port.unwrap_or(library.config.server.port);

            tracing::info!("Starting server at http://{}:{}", ip, port);
            mwd_blocks::server::start(&library, &ip, port).await?;
        }

        Commands::Version => {
            println!("mwd-blocks version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
