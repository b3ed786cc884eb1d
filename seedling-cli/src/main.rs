use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

mod commands;
mod config;
mod logging;
mod metadata;
mod process;
mod tasks;
mod template_engine;
mod ui;
mod utils;

use commands::templates::TemplateCommands;
use config::Settings;

/// seedling - Scaffold Rust projects with a ready-made first commit
#[derive(Parser)]
#[command(name = "seedling")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new project and commit it to a fresh git repository
    New {
        /// Project name (kebab-case)
        #[arg(value_name = "PROJECT_NAME")]
        name: String,

        /// Create in specific directory
        #[arg(long, value_name = "DIR")]
        path: Option<PathBuf>,

        /// Skip git initialization
        #[arg(long = "skip-git")]
        skip_git: bool,

        /// Show what would be generated
        #[arg(long = "dry-run")]
        dry_run: bool,
    },

    /// Initialize git and make the initial commit in an existing directory
    Init {
        /// Project directory
        #[arg(long, value_name = "DIR", default_value = ".")]
        path: PathBuf,

        /// Skip git initialization
        #[arg(long = "skip-git")]
        skip_git: bool,
    },

    /// Manage template overrides
    Templates {
        #[command(subcommand)]
        command: TemplateCommands,
    },
}

#[tokio::main]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    };

    logging::init_tracing(&settings, cli.verbose);

    // Execute command
    let result = match cli.command {
        Commands::New {
            name,
            path,
            skip_git,
            dry_run,
        } => commands::new::execute(name, path, skip_git, dry_run, &settings).await,
        Commands::Init { path, skip_git } => {
            commands::init::execute(path, skip_git, &settings).await
        }
        Commands::Templates { command } => commands::templates::execute(command).await,
    };

    // Handle result
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);

            // Show context if available
            if let Some(source) = e.chain().nth(1) {
                eprintln!("\n{} {}", "Caused by:".yellow(), source);
            }

            std::process::exit(1);
        }
    }
}
