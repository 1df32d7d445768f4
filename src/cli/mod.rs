pub mod add;
pub mod categories;
pub mod ingest;
pub mod init;
pub mod parse;
pub mod report;
pub mod status;

use clap::{Parser, Subcommand};
use rusqlite::Connection;

use kopeyka::db::get_connection;
use kopeyka::error::{KopeykaError, Result};
use kopeyka::settings::Settings;

#[derive(Parser)]
#[command(name = "kopeyka", about = "Track expenses and income from lines like `-500 такси`.")]
pub struct Cli {
    /// Log debug details to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Choose a data directory and create the database.
    Init {
        /// Path for kopeyka data (default: ~/.local/share/kopeyka)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Record one message, e.g. `kopeyka add -- -500 такси`.
    Add {
        /// Chat user id (default from settings)
        #[arg(long)]
        user: Option<i64>,
        /// Message text; options must come before it
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true, trailing_var_arg = true)]
        message: Vec<String>,
    },
    /// Record messages from stdin, one per line.
    Ingest {
        /// Chat user id (default from settings)
        #[arg(long)]
        user: Option<i64>,
    },
    /// Show how a message would be read without saving it.
    Parse {
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true, trailing_var_arg = true)]
        message: Vec<String>,
    },
    /// Show total income, expenses and balance.
    Balance {
        #[arg(long)]
        user: Option<i64>,
    },
    /// List transactions: the latest 10, or a period such as `неделя`, `3`, `вчера`, `2-5`.
    History {
        #[arg(long)]
        user: Option<i64>,
        #[arg(num_args = 0..)]
        period: Vec<String>,
    },
    /// Per-category totals for the last 30 days.
    Stats {
        #[arg(long)]
        user: Option<i64>,
    },
    /// Print the keyword table used for categorization.
    Categories,
    /// Show settings and database summary.
    Status,
}

/// Open the configured database, refusing to create one outside `init`.
pub(crate) fn open_db(settings: &Settings) -> Result<Connection> {
    let db_path = settings.db_path();
    if !db_path.exists() {
        return Err(KopeykaError::Settings(format!(
            "No database found at {}\nRun `kopeyka init` to create one.",
            db_path.display()
        )));
    }
    get_connection(&db_path)
}

pub(crate) fn resolve_user(settings: &Settings, user: Option<i64>) -> i64 {
    user.unwrap_or(settings.user_id)
}
