use anyhow::{Context, Result};
use chrono::Datelike;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::Settings;
use crate::metadata::PackageMetadata;
use crate::tasks::{self, InitOptions};
use crate::template_engine::TemplateEngine;
use crate::ui;
use crate::utils;

/// Template name and destination (relative to the project root) of every generated file
const PROJECT_FILES: &[(&str, &str)] = &[
    ("project/Cargo.toml.jinja", "Cargo.toml"),
    ("project/main.rs.jinja", "src/main.rs"),
    ("project/README.md.jinja", "README.md"),
    ("project/gitignore.jinja", ".gitignore"),
];

pub async fn execute(
    name: String,
    path: Option<PathBuf>,
    skip_git: bool,
    dry_run: bool,
    settings: &Settings,
) -> Result<()> {
    utils::validate_project_name(&name)?;

    let project_path = match path {
        Some(p) => p.join(&name),
        None => PathBuf::from(&name),
    };

    if project_path.exists() {
        anyhow::bail!(
            "Directory '{}' already exists\n\n\
            Suggestions:\n\
            • Use a different name: seedling new {}-v2\n\
            • Initialize git in it instead: seedling init --path {}",
            project_path.display(),
            name,
            project_path.display()
        );
    }

    if dry_run {
        show_dry_run(&project_path);
        return Ok(());
    }

    let templates = TemplateEngine::new();
    create_project(&templates, &name, &project_path)?;

    let options = InitOptions {
        skip_git: skip_git || settings.skip_git,
    };
    let outcome = tasks::init_git(&project_path, &templates, options).await;

    show_success(&name, &project_path, outcome.is_initialized());

    Ok(())
}

/// Render every project template into `project_path`
pub fn create_project(templates: &TemplateEngine, name: &str, project_path: &Path) -> Result<()> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .context("Invalid progress template")?
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ "),
    );
    pb.enable_steady_tick(Duration::from_millis(100));

    pb.set_message("Creating project structure...");
    utils::create_dir_all(project_path)?;

    let context = json!({
        "name": name,
        "generator": PackageMetadata::current(),
        "year": chrono::Utc::now().year(),
    });

    for (template, dest) in PROJECT_FILES {
        pb.set_message(format!("Generating {}...", dest));
        let content = templates
            .render(template, &context)
            .with_context(|| format!("Failed to render {}", template))?;
        utils::write_file(&project_path.join(dest), &content)?;
        tracing::debug!(file = dest, "generated");
    }

    pb.finish_and_clear();

    Ok(())
}

fn show_dry_run(project_path: &Path) {
    println!("\n{}", "Dry run - would generate:".bold());
    println!("\n{}", format!("Project: {}", project_path.display()).cyan());

    println!("\n{}:", "Files".bold());
    for (_, dest) in PROJECT_FILES {
        println!("  • {}", dest);
    }

    println!("\n{}:", "Then".bold());
    println!("  • git init, git add ., initial commit");
}

fn show_success(name: &str, project_path: &Path, git_initialized: bool) {
    ui::success(&format!("Created project {}", name.cyan().bold()));

    ui::section("Next steps");
    ui::info(&format!("cd {}", project_path.display()));
    if !git_initialized {
        ui::info("git init && git add . && git commit");
    }
    ui::info("cargo run");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_create_project_writes_all_files() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("my-app");
        let templates = TemplateEngine::embedded_only();

        create_project(&templates, "my-app", &project).unwrap();

        for (_, dest) in PROJECT_FILES {
            assert!(project.join(dest).is_file(), "missing {}", dest);
        }

        let cargo_toml = fs::read_to_string(project.join("Cargo.toml")).unwrap();
        assert!(cargo_toml.contains("name = \"my-app\""));

        let readme = fs::read_to_string(project.join("README.md")).unwrap();
        assert!(readme.starts_with("# my-app"));
        assert!(readme.contains("seedling-cli"));
    }

    #[tokio::test]
    async fn test_existing_directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("taken")).unwrap();

        let result = execute(
            "taken".to_string(),
            Some(dir.path().to_path_buf()),
            true,
            false,
            &Settings::default(),
        )
        .await;

        let err = result.unwrap_err().to_string();
        assert!(err.contains("already exists"));
    }

    #[tokio::test]
    async fn test_dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();

        execute(
            "ghost".to_string(),
            Some(dir.path().to_path_buf()),
            false,
            true,
            &Settings::default(),
        )
        .await
        .unwrap();

        assert!(!dir.path().join("ghost").exists());
    }
}
