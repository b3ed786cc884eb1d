use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;

use crate::template_engine::TemplateEngine;
use crate::ui;

#[derive(Subcommand)]
pub enum TemplateCommands {
    /// Copy the built-in templates to the user config directory for editing
    Init,

    /// List built-in templates and show which ones are overridden
    List,
}

pub async fn execute(command: TemplateCommands) -> Result<()> {
    let engine = TemplateEngine::new();

    match command {
        TemplateCommands::Init => {
            let dir = engine
                .init_user_templates()
                .context("Failed to install user templates")?;
            ui::success(&format!("Templates available in {}", dir.display()));
            ui::info("Edit any file there to override the built-in version");
        }
        TemplateCommands::List => {
            ui::section("Templates");
            for name in engine.list_templates() {
                let overridden = engine
                    .config_dir()
                    .is_some_and(|dir| dir.join(&name).is_file());
                if overridden {
                    println!("  • {} {}", name, "(overridden)".yellow());
                } else {
                    println!("  • {}", name);
                }
            }

            if let Some(dir) = engine.config_dir() {
                println!("\n{} {}", "User templates:".dimmed(), dir.display());
            }
        }
    }

    Ok(())
}
