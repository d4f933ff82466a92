//! # dagskra CLI
//!
//! Command-line interface for the dagskra devlogs and program bank.

mod agent;
mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use dagskra_types::SortBy;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dagskra")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "dagskra.yml", env = "DAGSKRA_CONFIG")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new dagskra project
    Init {
        /// Target directory (defaults to current directory)
        path: Option<PathBuf>,
    },

    /// Render a Markdown file to HTML ("-" reads stdin)
    Render {
        /// Markdown file; front matter is stripped
        input: PathBuf,
    },

    /// List and read devlog posts
    Devlogs {
        #[command(subcommand)]
        command: DevlogCommands,
    },

    /// Filter, sort and page through a program snapshot
    Programs {
        /// JSON snapshot (defaults to paths.programs from the config)
        file: Option<PathBuf>,

        /// Case-insensitive text query on name and description
        #[arg(long, short)]
        query: Option<String>,

        /// Keep programs with any of these tags (comma separated)
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,

        /// Sort order: newest, oldest, most-liked, alphabetical
        #[arg(long, default_value = "newest", value_parser = parse_sort)]
        sort: SortBy,

        /// Page number (1-indexed)
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Programs per page (defaults to programs.page_size from the config)
        #[arg(long)]
        page_size: Option<usize>,

        /// Return JSON for machine consumption
        #[arg(long)]
        json: bool,
    },

    /// List the unique tags in a program snapshot
    Tags {
        /// JSON snapshot (defaults to paths.programs from the config)
        file: Option<PathBuf>,

        /// Return JSON for machine consumption
        #[arg(long)]
        json: bool,
    },

    /// Serve the JSON API
    Serve {
        /// Server port (defaults to server.port from the config)
        #[arg(long)]
        port: Option<u16>,
    },
}

#[derive(Subcommand)]
pub enum DevlogCommands {
    /// List posts, newest first
    List {
        /// Number of posts to skip
        #[arg(long, default_value_t = 0)]
        offset: usize,

        /// Maximum posts to return
        #[arg(long, default_value_t = 10)]
        limit: usize,

        /// Return JSON for machine consumption
        #[arg(long)]
        json: bool,
    },

    /// Show a single post
    Show {
        /// Post slug (file name without .md)
        slug: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = DevlogFormat::Html)]
        format: DevlogFormat,
    },
}

#[derive(Copy, Clone, ValueEnum)]
pub enum DevlogFormat {
    Html,
    Json,
    Markdown,
}

fn parse_sort(s: &str) -> Result<SortBy, String> {
    SortBy::from_str(s).ok_or_else(|| {
        format!("unknown sort '{s}' (expected newest, oldest, most-liked or alphabetical)")
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::INFO.into()
            }),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Init { path } => commands::init_project(path.as_deref()),
        Commands::Render { input } => commands::render_file(&input),
        Commands::Devlogs { command } => match command {
            DevlogCommands::List {
                offset,
                limit,
                json,
            } => commands::list_devlogs(&cli.config, offset, limit, json),
            DevlogCommands::Show { slug, format } => {
                commands::show_devlog(&cli.config, &slug, format)
            }
        },
        Commands::Programs {
            file,
            query,
            tags,
            sort,
            page,
            page_size,
            json,
        } => {
            let opts = commands::ProgramOptions {
                query: query.unwrap_or_default(),
                tags,
                sort_by: sort,
                page,
                page_size,
                json,
            };
            commands::list_programs(&cli.config, file.as_deref(), opts)
        }
        Commands::Tags { file, json } => commands::list_tags(&cli.config, file.as_deref(), json),
        Commands::Serve { port } => commands::serve(&cli.config, port).await,
    }
}
