use anyhow::Result;
use std::path::PathBuf;

use crate::config::Settings;
use crate::tasks::{self, InitOptions};
use crate::template_engine::TemplateEngine;

/// Initialize git in an existing project directory
pub async fn execute(path: PathBuf, skip_git: bool, settings: &Settings) -> Result<()> {
    if !path.is_dir() {
        anyhow::bail!("Not a directory: {}", path.display());
    }

    let templates = TemplateEngine::new();
    let options = InitOptions {
        skip_git: skip_git || settings.skip_git,
    };

    tasks::init_git(&path, &templates, options).await;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_directory_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = execute(dir.path().join("nope"), false, &Settings::default()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_skip_git_succeeds_without_git() {
        let dir = tempfile::tempdir().unwrap();
        execute(dir.path().to_path_buf(), true, &Settings::default())
            .await
            .unwrap();
        assert!(!dir.path().join(".git").exists());
    }
}
