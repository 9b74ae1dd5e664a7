//! Flashcards CLI
//!
//! Command-line and terminal interface for question/answer flashcards.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use flashcards_core::{Config, Repository};

mod commands;
mod editor;
mod logging;
mod output;
mod tui;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "flashcards")]
#[command(about = "Flashcards - question and answer cards in your terminal")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Use a specific config file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI interface
    Tui,
    /// List all cards
    #[command(alias = "ls")]
    List,
    /// Show both sides of a card
    Show {
        /// Card ID (full id or trailing digits)
        id: String,
    },
    /// Show the answer side of a card
    Flip {
        /// Card ID (full id or trailing digits)
        id: String,
    },
    /// Create a new card
    #[command(alias = "new")]
    Add {
        /// Question text (opens editor if not provided)
        #[arg(short = 'Q', long)]
        question: Option<String>,
        /// Answer text
        #[arg(short, long)]
        answer: Option<String>,
    },
    /// Edit a card
    Edit {
        /// Card ID (full id or trailing digits)
        id: String,
        /// New question text
        #[arg(short = 'Q', long)]
        question: Option<String>,
        /// New answer text
        #[arg(short, long)]
        answer: Option<String>,
    },
    /// Delete a card
    #[command(alias = "rm")]
    Delete {
        /// Card ID (full id or trailing digits)
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Export all cards as JSON
    Export {
        /// Output file, or - for stdout (default: flashcards-export.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Replace all cards with the contents of a JSON file
    Import {
        /// File to import
        path: PathBuf,
    },
    /// Delete all cards (the starter cards come back)
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show storage location and card count
    Status,
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, storage_key, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));
    let config_path = cli.config.as_ref();

    // Commands that don't need the store
    if let Some(Commands::Config { command }) = &cli.command {
        logging::init_cli_logging();
        return handle_config_command(command.clone(), config_path, &output);
    }

    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    // Handle TUI (default when no command given)
    let Some(command) = cli.command else {
        return tui::run(&config);
    };
    if matches!(command, Commands::Tui) {
        return tui::run(&config);
    }

    logging::init_cli_logging();
    let repo = Repository::open_with_config(&config);

    match command {
        Commands::Tui | Commands::Config { .. } => unreachable!(), // Handled above
        Commands::List => commands::card::list(&repo, &output),
        Commands::Show { id } => commands::card::show(&repo, id, &output),
        Commands::Flip { id } => commands::card::face(&repo, id, true, &output),
        Commands::Add { question, answer } => {
            commands::card::add(&repo, question, answer, &output)
        }
        Commands::Edit {
            id,
            question,
            answer,
        } => commands::card::edit(&repo, id, question, answer, &output),
        Commands::Delete { id, yes } => commands::card::delete(&repo, id, yes, &output),
        Commands::Export { output: path } => {
            commands::transfer::export(&repo, path, &output).await
        }
        Commands::Import { path } => commands::transfer::import(&repo, path, &output).await,
        Commands::Clear { yes } => commands::card::clear(&repo, yes, &output),
        Commands::Status => commands::status::show(&repo, &config, &output),
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}
