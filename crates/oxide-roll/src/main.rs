//! oxide-roll CLI
//!
//! Command-line tool for rendering and applying additive schema changes.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::bail;
use clap::{Parser, Subcommand};
use oxide_ddl::prelude::*;
use sqlx::sqlite::SqlitePoolOptions;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use oxide_roll::config::{load_tables, load_translations};
use oxide_roll::roller::{RollPlan, Roller};

/// Render and apply additive schema changes.
#[derive(Parser)]
#[command(name = "oxide-roll")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Target dialect (sqlite, mysql, postgres).
    #[arg(short, long, env = "ROLL_DIALECT", default_value = "sqlite")]
    dialect: Vendor,

    /// Translation table (JSON). The builtin table is used if omitted.
    #[arg(short, long, env = "ROLL_TRANSLATIONS")]
    translations: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print drop-and-create SQL for every table in a definition file.
    Create {
        /// Table definition file (JSON object or array).
        file: PathBuf,
    },

    /// Print additive SQL for every table in a definition file.
    Alter {
        /// Table definition file (JSON object or array).
        file: PathBuf,

        /// Columns that already exist (applied to every table in the file).
        #[arg(short, long, value_delimiter = ',')]
        existing: Vec<String>,
    },

    /// Show how a keyword translates for the selected dialect.
    Translate {
        /// Abstract keyword (type, default expression or function).
        keyword: String,
    },

    /// Create or extend the tables in a SQLite database.
    Roll {
        /// Table definition file (JSON object or array).
        file: PathBuf,

        /// Database URL.
        #[arg(long, env = "DATABASE_URL", default_value = "sqlite:db.sqlite3")]
        database: String,

        /// Show SQL without executing (dry run).
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let translations = Arc::new(load_translations(cli.translations.as_deref())?);
    let translator = cli.dialect.translator(Arc::clone(&translations));

    match cli.command {
        Commands::Create { file } => {
            for table in load_tables(&file)? {
                println!("{}\n", translator.render_create(&table)?);
            }
        }

        Commands::Alter { file, existing } => {
            for mut table in load_tables(&file)? {
                table.mark_existing(&existing);
                match translator.render_alter(&table)? {
                    Some(sql) => println!("{sql}\n"),
                    None => info!(table = %table.name, "No changes"),
                }
            }
        }

        Commands::Translate { keyword } => {
            let vendor = cli.dialect;
            match translator.translate(&keyword, vendor) {
                Some(replacement) => println!("{keyword} -> {replacement} ({vendor})"),
                None => println!("{keyword} -> {keyword} ({vendor}, no translation)"),
            }
            if let Some(function) = translator.is_function(&keyword, vendor) {
                println!("{keyword} is a {vendor} function: {function}");
            }
        }

        Commands::Roll {
            file,
            database,
            dry_run,
        } => {
            if cli.dialect != Vendor::Sqlite {
                bail!("roll only supports sqlite databases, got {}", cli.dialect);
            }

            let tables = load_tables(&file)?;
            let pool = SqlitePoolOptions::new()
                .max_connections(1)
                .connect(&database)
                .await?;
            let roller = Roller::new(pool, translations).dry_run(dry_run);

            for plan in roller.roll_all(&tables).await? {
                if dry_run {
                    if let Some(sql) = plan.sql() {
                        println!("{sql}\n");
                    }
                }
                if let RollPlan::Alter { added, .. } = plan {
                    info!(added, "Columns added");
                }
            }
        }
    }

    Ok(())
}
