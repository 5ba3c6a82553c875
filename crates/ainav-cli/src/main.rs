use ainav_core::{Catalog, Config, Session};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "ainav")]
#[command(version, about = "Browse, bookmark and compare AI tools from the terminal", long_about = None)]
struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true, env = "AINAV_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// List catalog items
    List {
        /// Only show this category
        #[arg(long, short)]
        category: Option<String>,
        /// Only show featured tools
        #[arg(long)]
        featured: bool,
    },
    /// Fuzzy search the catalog
    Search {
        /// Search query
        query: String,
        /// Maximum number of results
        #[arg(long, short)]
        limit: Option<usize>,
    },
    /// Show one catalog item
    Show {
        /// Item id (e.g. claude)
        id: String,
    },
    /// List categories
    Categories,
    /// Manage bookmarks
    Bookmark {
        #[command(subcommand)]
        action: BookmarkCommand,
    },
    /// Compare up to four tools side by side
    Compare {
        /// Item ids to compare
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },
    /// Show the effective configuration
    Config {
        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

#[derive(clap::Subcommand)]
enum BookmarkCommand {
    /// Bookmark a tool
    Add { id: String },
    /// Remove a bookmark
    Remove { id: String },
    /// List bookmarked tools
    List,
    /// Remove every bookmark
    Clear,
    /// Export bookmarked tools (.json, .csv or .md)
    Export { path: PathBuf },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ainav=info,ainav_core=info,ainav_storage=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => Config::config_path()?,
    };
    let config = Config::load_from(&config_path)?;

    let Some(command) = cli.command else {
        println!("No command specified. Try --help");
        return Ok(());
    };

    match command {
        Commands::Config { init } => {
            commands::config(&config, &config_path, init, &mut std::io::stdout())
        }
        command => run(command, &config),
    }
}

/// Everything that needs the catalog and a live session
fn run(command: Commands, config: &Config) -> anyhow::Result<()> {
    let catalog = match &config.catalog.path {
        Some(path) => Catalog::load(path)?,
        None => Catalog::bundled()?,
    };

    let session = Session::start_with_key(
        config.storage.open_store_or_disabled(),
        &config.storage.bookmarks_key,
    );
    let out = &mut std::io::stdout();

    match command {
        Commands::List { category, featured } => {
            commands::list(&catalog, &session, category.as_deref(), featured, out)?
        }
        Commands::Search { query, limit } => {
            let limit = limit.unwrap_or(config.ui.search_limit);
            commands::search(&catalog, &session, &query, limit, out)?
        }
        Commands::Show { id } => commands::show(&catalog, &session, &id, out)?,
        Commands::Categories => commands::categories(&catalog, out)?,
        Commands::Bookmark { action } => match action {
            BookmarkCommand::Add { id } => commands::bookmark_add(&catalog, &session, &id, out)?,
            BookmarkCommand::Remove { id } => commands::bookmark_remove(&session, &id, out)?,
            BookmarkCommand::List => {
                commands::bookmark_list(&catalog, &session, config.ui.bookmark_order, out)?
            }
            BookmarkCommand::Clear => commands::bookmark_clear(&session, out)?,
            BookmarkCommand::Export { path } => commands::bookmark_export(
                &catalog,
                &session,
                config.ui.bookmark_order,
                &path,
                out,
            )?,
        },
        Commands::Compare { ids } => commands::compare(&catalog, &session, &ids, out)?,
        Commands::Config { .. } => unreachable!("config is handled before the session starts"),
    }

    session.end();
    Ok(())
}
