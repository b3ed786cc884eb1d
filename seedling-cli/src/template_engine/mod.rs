use minijinja::Environment;
use rust_embed::Embed;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Embed all templates at compile time
#[derive(Embed)]
#[folder = "templates/"]
#[prefix = ""]
struct EmbeddedTemplates;

/// Name of the initial commit message template
pub const COMMIT_MESSAGE_TEMPLATE: &str = "commit_message.txt";

/// Errors raised while loading or rendering templates
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template not found: {0}")]
    NotFound(String),

    #[error("failed to read template {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("template {0} is not valid UTF-8")]
    Encoding(String),

    #[error("failed to render template: {0}")]
    Render(#[from] minijinja::Error),

    #[error("could not determine config directory")]
    NoConfigDir,

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Template engine with support for embedded templates and user customization
#[derive(Debug, Clone)]
pub struct TemplateEngine {
    config_dir: Option<PathBuf>,
}

impl TemplateEngine {
    /// Engine that honours overrides in the user's config directory
    pub fn new() -> Self {
        Self {
            config_dir: Self::default_config_dir(),
        }
    }

    /// Engine that only ever sees the embedded templates
    pub fn embedded_only() -> Self {
        Self { config_dir: None }
    }

    /// Engine that looks for overrides in `dir` first
    pub fn with_config_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: Some(dir.into()),
        }
    }

    /// `~/.config/seedling/templates` (platform equivalent)
    fn default_config_dir() -> Option<PathBuf> {
        crate::config::project_dirs().map(|dirs| dirs.config_dir().join("templates"))
    }

    /// Copy embedded templates into the user template directory
    ///
    /// Existing files are left untouched so user edits survive.
    pub fn init_user_templates(&self) -> Result<PathBuf, TemplateError> {
        let config_dir = self.config_dir.as_ref().ok_or(TemplateError::NoConfigDir)?;

        for file_path in EmbeddedTemplates::iter() {
            let dest_path = config_dir.join(file_path.as_ref());

            if dest_path.exists() {
                continue;
            }

            if let Some(parent) = dest_path.parent() {
                fs::create_dir_all(parent).map_err(|source| TemplateError::Write {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }

            if let Some(file) = EmbeddedTemplates::get(&file_path) {
                fs::write(&dest_path, file.data.as_ref()).map_err(|source| {
                    TemplateError::Write {
                        path: dest_path.clone(),
                        source,
                    }
                })?;
            }
        }

        Ok(config_dir.clone())
    }

    /// Render a template with the given context
    pub fn render<S: Serialize>(
        &self,
        template_name: &str,
        context: &S,
    ) -> Result<String, TemplateError> {
        let source = self.load(template_name)?;

        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        let tmpl = env.template_from_str(&source)?;

        Ok(tmpl.render(context)?)
    }

    /// Raw template text, preferring a user override
    fn load(&self, template_name: &str) -> Result<String, TemplateError> {
        if let Some(path) = self.user_template_path(template_name) {
            tracing::debug!(template = template_name, path = %path.display(), "using user template");
            return fs::read_to_string(&path).map_err(|source| TemplateError::Read { path, source });
        }

        let file = EmbeddedTemplates::get(template_name)
            .ok_or_else(|| TemplateError::NotFound(template_name.to_string()))?;

        std::str::from_utf8(file.data.as_ref())
            .map(str::to_string)
            .map_err(|_| TemplateError::Encoding(template_name.to_string()))
    }

    fn user_template_path(&self, template_name: &str) -> Option<PathBuf> {
        let path = self.config_dir.as_ref()?.join(template_name);
        path.is_file().then_some(path)
    }

    /// Get the user config directory path (if any)
    pub fn config_dir(&self) -> Option<&Path> {
        self.config_dir.as_deref()
    }

    /// List all embedded templates
    pub fn list_templates(&self) -> Vec<String> {
        let mut names: Vec<String> = EmbeddedTemplates::iter().map(|s| s.to_string()).collect();
        names.sort();
        names
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}
