use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Validate project name is kebab-case
pub fn validate_project_name(name: &str) -> Result<()> {
    if name.is_empty() {
        anyhow::bail!("Project name cannot be empty");
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        anyhow::bail!(
            "Project name must be kebab-case (lowercase letters, numbers, hyphens only)\n\n\
            Valid examples:\n\
            • my-app\n\
            • todo-cli\n\
            • parser2"
        );
    }

    if name.starts_with('-') || name.ends_with('-') {
        anyhow::bail!("Project name cannot start or end with a hyphen");
    }

    if name.len() > 64 {
        anyhow::bail!("Project name must be 64 characters or less");
    }

    Ok(())
}

/// Create directory and all parent directories
pub fn create_dir_all(path: &Path) -> Result<()> {
    fs::create_dir_all(path).with_context(|| format!("Failed to create directory: {}", path.display()))
}

/// Write file with content
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write file: {}", path.display()))
}
