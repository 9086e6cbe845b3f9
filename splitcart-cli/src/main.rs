use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod prompt;

use commands::{
    ConfigCommand, ExportCommand, ImportCommand, ItemCommand, ItemsCommand, ListCommand,
    SplitCommand, SummaryCommand, TotalCommand,
};
use config::Config;
use splitcart_core::{ListStore, PersistenceGateway};

#[derive(Parser)]
#[command(name = "splitcart")]
#[command(version)]
#[command(about = "A shared shopping-list and price-splitting CLI", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage lists
    List(ListCommand),

    /// Manage items on the current list
    Item(ItemCommand),

    /// Show the current list's total
    Total(TotalCommand),

    /// Split the total between people
    Split(SplitCommand),

    /// Show filtered, sorted items of the current list
    Items(ItemsCommand),

    /// Print a shareable text summary of the current list
    Summary(SummaryCommand),

    /// Print the current list as a share code
    Export(ExportCommand),

    /// Import a share code into the current list
    Import(ImportCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::load(cli.config)?;
    debug!(
        "config loaded: data_dir={} ({}), people={} ({})",
        config.data_dir.value.display(),
        config.data_dir.source,
        config.people.value,
        config.people.source
    );

    // Config commands don't need the store
    if let Commands::Config(cmd) = &cli.command {
        return cmd.run(&config);
    }

    let gateway = PersistenceGateway::new(config.data_dir.value.clone());
    let mut notices = Vec::new();
    let mut store = ListStore::init(gateway, &mut notices);
    debug!(
        "store initialized: {} lists, {} notices",
        store.lists().len(),
        notices.len()
    );
    for notice in &notices {
        prompt::print_notice(notice);
    }

    match &cli.command {
        Commands::List(cmd) => cmd.run(&mut store),
        Commands::Item(cmd) => cmd.run(&mut store),
        Commands::Total(cmd) => cmd.run(&store),
        Commands::Split(cmd) => cmd.run(&store, &config),
        Commands::Items(cmd) => cmd.run(&store),
        Commands::Summary(cmd) => cmd.run(&store),
        Commands::Export(cmd) => cmd.run(&store),
        Commands::Import(cmd) => cmd.run(&mut store),
        Commands::Config(_) => unreachable!("handled above"),
    }
}
