//! Religi CLI - Jakarta religious heritage directory

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use religi::config::{self, Backend, ReligiConfig};
use religi::seed::initial_sites;
use religi::server::{self, AppState};
use religi::storage::GraphFile;
use religi::ui::{self, Icons};
use religi::SiteStore;

#[derive(Parser)]
#[command(name = "religi")]
#[command(version)]
#[command(about = "Directory of religious and heritage sites in Jakarta")]
#[command(long_about = r#"
Religi keeps a directory of places of worship and heritage sites in Jakarta.
Sites are stored as an RDF graph in a Turtle file (or in SQLite) and served
through a small JSON API.

Example usage:
  religi init
  religi serve --port 1083
  religi show MasjidIstiqlal
  religi facets agama
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the configured storage backend
    #[arg(short, long, global = true, value_enum)]
    backend: Option<Backend>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config and seed an empty store
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },

    /// Serve the JSON API
    Serve {
        /// Port to listen on (defaults to the configured port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// List all sites
    List,

    /// Show one site as JSON
    Show {
        /// Site id
        id: String,
    },

    /// Show site totals
    Stats,

    /// List the distinct values of a field
    Facets {
        /// Field key or name, e.g. `wilayah` or `religion`
        field: String,
    },

    /// Back up the data file now
    Backup,

    /// Read the graph file strictly and report problems
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG wins when set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);
    let mut loaded = config::load_config(Some(&config_path))?;
    if let Some(backend) = cli.backend {
        loaded.backend = backend;
    }
    // Paths in the file are relative to the file itself
    let settings = match config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(base) => loaded.clone().relative_to(base),
        None => loaded.clone(),
    };

    match cli.command {
        Commands::Init { force } => {
            config::write_config(&config_path, &loaded, force)?;
            ui::success(&format!("Wrote {}", config_path.display()));

            let location = match settings.backend {
                Backend::Graph => format!("{} {}", Icons::FILE, settings.data_file.display()),
                Backend::Sqlite => format!("{} {}", Icons::DATABASE, settings.database.display()),
            };
            ui::info("Store", &location);

            let store = settings.open_store()?;
            let seeded = store.seed_if_empty(&initial_sites())?;
            if seeded > 0 {
                ui::info(&format!("{} Seeded", Icons::SEED), &format!("{} sites", seeded));
            } else {
                ui::info("Store", "already populated, nothing seeded");
            }
        }

        Commands::Serve { port } => {
            let store = settings.open_store()?;
            store.seed_if_empty(&initial_sites())?;

            let state = Arc::new(AppState::new(Arc::from(store), settings.admin_token.clone()));
            server::start_server(port.unwrap_or(settings.port), state).await?;
        }

        Commands::List => {
            let sites = settings.open_store()?.list()?;
            if sites.is_empty() {
                ui::warn("No sites stored. Run `religi init` to seed the directory.");
            } else {
                println!("{}", ui::sites_table(&sites));
            }
        }

        Commands::Show { id } => match settings.open_store()?.get(&id)? {
            Some(site) => println!("{}", serde_json::to_string_pretty(&site)?),
            None => {
                ui::error(&format!("Site not found: {}", id));
                std::process::exit(1);
            }
        },

        Commands::Stats => {
            let counts = settings.open_store()?.count()?;
            ui::header(&format!("{} Religi Statistics", Icons::STATS));
            println!(
                "{}",
                ui::stats_table(&[
                    ("Sites", counts.total.to_string().as_str()),
                    ("Heritage sites", counts.heritage.to_string().as_str()),
                ])
            );
        }

        Commands::Facets { field } => {
            for value in settings.open_store()?.distinct_values_by_name(&field)? {
                println!("{}", value);
            }
        }

        Commands::Backup => match settings.open_store()?.backup()? {
            Some(path) => ui::success(&format!("{} Backed up to {}", Icons::BACKUP, path.display())),
            None => ui::warn("Nothing to back up yet"),
        },

        Commands::Check => check(&settings)?,
    }

    Ok(())
}

/// Strict read of the graph file plus a full record read
fn check(settings: &ReligiConfig) -> anyhow::Result<()> {
    if settings.backend != Backend::Graph {
        ui::warn("check only applies to the graph backend");
        return Ok(());
    }

    let file = GraphFile::new(&settings.data_file);
    ui::header(&format!("{} Checking {}", Icons::FILE, file.path().display()));
    let graph = match file.load_strict() {
        Ok(graph) => graph,
        Err(e) => {
            ui::error(&e.to_string());
            std::process::exit(1);
        }
    };
    print!("{}", graph.stats());

    ui::section(" Records ");
    let store = settings.open_graph_store();
    match store.list() {
        Ok(sites) => {
            let heritage = sites.iter().filter(|s| s.is_heritage).count();
            ui::summary_row("Sites:", &sites.len().to_string());
            ui::summary_row(&format!("{} Heritage:", Icons::HERITAGE), &heritage.to_string());
            ui::success("Graph file is readable");
        }
        Err(e) => {
            ui::error(&format!("Site records are not readable: {}", e));
            std::process::exit(1);
        }
    }
    Ok(())
}
