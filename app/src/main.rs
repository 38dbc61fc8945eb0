//! Bench Sales CLI
//!
//! The `bench-sales` command generates sourcing queries for bench consultants,
//! runs them against the configured search backends, scores open jobs, and
//! tracks vendor reliability.

use anyhow::{Context, Result};
use bench_app::commands::{queries, records, scoring, search};
use bench_app::{init_tracing, load_config, AppState};
use bench_core::{AppConfig, BackendKind, SearchCategory, SubmissionOutcome};
use bench_store::Collection;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing::info;

#[derive(Parser)]
#[command(name = "bench-sales")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Sourcing search and matching for bench consultants", long_about = None)]
struct Cli {
    /// Configuration file (default: the platform config directory)
    #[arg(short, long, global = true, env = "BENCH_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalogue platforms
    Platforms {
        /// Only platforms serving this category
        #[arg(long)]
        category: Option<SearchCategory>,
    },

    /// Generate search queries for a consultant without running them
    Queries {
        /// Consultant record id
        #[arg(long)]
        consultant: String,

        /// Categories to generate (default: configured defaults)
        #[arg(long = "category")]
        categories: Vec<SearchCategory>,

        /// Restrict to these platform ids
        #[arg(long = "platform")]
        platforms: Vec<String>,

        /// Print native job-board links instead
        #[arg(long)]
        links: bool,
    },

    /// Generate and run search queries for a consultant
    Search {
        /// Consultant record id
        #[arg(long)]
        consultant: String,

        /// Categories to search (default: configured defaults)
        #[arg(long = "category")]
        categories: Vec<SearchCategory>,

        /// Backend trial order (default: configured order)
        #[arg(long = "backend")]
        backends: Vec<BackendKind>,
    },

    /// Rank open jobs for a consultant, or score a single job
    Match {
        /// Consultant record id
        #[arg(long)]
        consultant: String,

        /// Score only this job
        #[arg(long)]
        job: Option<String>,
    },

    /// Rank vendors by reliability
    Vendors,

    /// Record a submission outcome for a vendor
    Outcome {
        /// Vendor record id
        #[arg(long)]
        vendor: String,

        /// What happened to the submission
        #[arg(value_enum)]
        outcome: OutcomeArg,
    },

    /// Import records from a JSON file ("-" reads stdin)
    Import {
        /// Target collection
        #[arg(value_enum)]
        collection: CollectionArg,

        /// JSON file holding one record or an array of records
        file: PathBuf,
    },

    /// List records in a collection
    List {
        /// Collection to list
        #[arg(value_enum)]
        collection: CollectionArg,
    },

    /// Show one record
    Get {
        /// Collection to read
        #[arg(value_enum)]
        collection: CollectionArg,

        /// Record id
        id: String,
    },

    /// Delete one record
    Delete {
        /// Collection to delete from
        #[arg(value_enum)]
        collection: CollectionArg,

        /// Record id
        id: String,
    },

    /// Print the bench hotlist
    Hotlist {
        /// Report date (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the configuration file path
    Path,
    /// Print the effective configuration
    Show,
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum CollectionArg {
    Consultants,
    Jobs,
    Vendors,
}

impl From<CollectionArg> for Collection {
    fn from(arg: CollectionArg) -> Self {
        match arg {
            CollectionArg::Consultants => Self::Consultants,
            CollectionArg::Jobs => Self::Jobs,
            CollectionArg::Vendors => Self::Vendors,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutcomeArg {
    Placement,
    NoResponse,
    Rejection,
}

impl From<OutcomeArg> for SubmissionOutcome {
    fn from(arg: OutcomeArg) -> Self {
        match arg {
            OutcomeArg::Placement => Self::Placement,
            OutcomeArg::NoResponse => Self::NoResponse,
            OutcomeArg::Rejection => Self::Rejection,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Commands::Config { action } = &cli.command {
        return run_config(action, cli.config.as_deref());
    }

    let config = load_config(cli.config.as_deref())?;
    let state = AppState::new(config).await?;

    match cli.command {
        Commands::Platforms { category } => {
            print_json(&queries::list_platforms(&state, category))?;
        }
        Commands::Queries {
            consultant,
            categories,
            platforms,
            links,
        } => {
            if links {
                print_json(&queries::native_links(&state, &consultant).await?)?;
            } else {
                let descriptors =
                    queries::generate_queries(&state, &consultant, &categories, &platforms).await?;
                print_json(&descriptors)?;
            }
        }
        Commands::Search {
            consultant,
            categories,
            backends,
        } => {
            let cancel = CancellationToken::new();
            let on_signal = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    info!("interrupt received, cancelling search");
                    on_signal.cancel();
                }
            });

            let response =
                search::run_search(&state, &consultant, &categories, &backends, cancel).await?;
            print_json(&response)?;
        }
        Commands::Match { consultant, job } => match job {
            Some(job) => print_json(&scoring::score_job(&state, &consultant, &job).await?)?,
            None => print_json(&scoring::match_jobs(&state, &consultant).await?)?,
        },
        Commands::Vendors => {
            print_json(&scoring::rank_vendors(&state).await?)?;
        }
        Commands::Outcome { vendor, outcome } => {
            let score = scoring::record_outcome(&state, &vendor, outcome.into()).await?;
            print_json(&score)?;
        }
        Commands::Import { collection, file } => {
            let json = read_input(&file)?;
            let ids = records::import_records(&state, collection.into(), &json).await?;
            print_json(&ids)?;
        }
        Commands::List { collection } => {
            print_json(&records::list_records(&state, collection.into()).await?)?;
        }
        Commands::Get { collection, id } => {
            print_json(&records::get_record(&state, collection.into(), &id).await?)?;
        }
        Commands::Delete { collection, id } => {
            let removed = records::delete_record(&state, collection.into(), &id).await?;
            print_json(&serde_json::json!({ "id": id, "removed": removed }))?;
        }
        Commands::Hotlist { date } => {
            let today = date.unwrap_or_else(|| chrono::Local::now().date_naive());
            print_json(&records::hotlist(&state, today).await?)?;
        }
        Commands::Config { action } => run_config(&action, cli.config.as_deref())?,
    }

    Ok(())
}

fn run_config(action: &ConfigAction, explicit: Option<&Path>) -> Result<()> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => AppConfig::config_path()?,
    };

    match action {
        ConfigAction::Path => println!("{}", path.display()),
        ConfigAction::Show => print_json(&load_config(Some(path.as_path()))?)?,
        ConfigAction::Init { force } => {
            if path.exists() && !force {
                anyhow::bail!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                );
            }
            AppConfig::default().save_to(&path)?;
            info!("wrote default configuration to {}", path.display());
            println!("{}", path.display());
        }
    }
    Ok(())
}

fn read_input(file: &Path) -> Result<String> {
    if file == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(file).with_context(|| format!("failed to read {}", file.display()))
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
