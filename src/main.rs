mod cli;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Init { data_dir } => cli::init::run(data_dir),
        Commands::Add { user, message } => cli::add::run(user, &message.join(" ")),
        Commands::Ingest { user } => cli::ingest::run(user),
        Commands::Parse { message } => cli::parse::run(&message.join(" ")),
        Commands::Balance { user } => cli::report::balance(user),
        Commands::History { user, period } => cli::report::history(user, &period.join(" ")),
        Commands::Stats { user } => cli::report::stats(user),
        Commands::Categories => cli::categories::run(),
        Commands::Status => cli::status::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
