use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use expense_tracker::cli::{handle_expense_command, ExpenseCommands};
use expense_tracker::config::{paths::ExpensePaths, settings::Settings};
use expense_tracker::storage::{initialize_storage, ExpenseStore};

#[derive(Parser)]
#[command(
    name = "expense",
    version,
    about = "Personal expense tracker",
    long_about = "Records personal expenses in a single JSON document and serves \
                  them over HTTP, with totals by category and by date range."
)]
struct Cli {
    /// Backing document to use instead of the configured one
    #[arg(long, global = true, env = "EXPENSE_DATA_FILE")]
    data_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,
        /// Address to bind
        #[arg(long, env = "HOST")]
        host: Option<String>,
    },

    /// Create an empty expense document if none exists
    Init,

    /// Show current configuration and paths
    Config,

    #[command(flatten)]
    Expense(ExpenseCommands),
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    init_tracing();

    let paths = ExpensePaths::new()?;
    let mut settings = Settings::load_or_default(&paths)?;
    let data_file = settings.expenses_file(&paths, cli.data_file);

    match cli.command {
        Some(Commands::Serve { port, host }) => {
            if let Some(port) = port {
                settings.port = port;
            }
            if let Some(host) = host {
                settings.host = host;
            }

            initialize_storage(&data_file)?;
            let store = ExpenseStore::new(data_file);

            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(expense_tracker::api::serve(store, &settings.bind_address()))?;
        }
        Some(Commands::Init) => {
            let settings_file = paths.settings_file();
            if !settings_file.exists() {
                settings.save(&paths)?;
                println!("Created settings file at: {}", settings_file.display());
            }

            if initialize_storage(&data_file)? {
                println!("Created expense document at: {}", data_file.display());
            } else {
                println!("Expense document already exists: {}", data_file.display());
            }
        }
        Some(Commands::Config) => {
            println!("Expense Tracker Configuration");
            println!("=============================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Expense document: {}", data_file.display());
            println!();
            println!("Server:");
            println!("  Bind address: {}", settings.bind_address());
        }
        Some(Commands::Expense(cmd)) => {
            let store = ExpenseStore::new(data_file);
            handle_expense_command(&store, cmd)?;
        }
        None => {
            println!("Expense Tracker - personal expense records");
            println!();
            println!("Run 'expense --help' for usage information.");
            println!("Run 'expense serve' to start the HTTP server.");
        }
    }

    Ok(())
}
