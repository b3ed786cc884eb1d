//! First-commit setup for a freshly generated project
//!
//! Runs `git init`, stages everything and records an initial commit. Git is optional
//! tooling: when the executable is missing the task stays silent, and any later failure
//! becomes a single warning. The task never returns an error to its caller.

use colored::Colorize;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::metadata::PackageMetadata;
use crate::process::{CommandOptions, EnvMap, ProcessError, ProcessOutput, ProcessRunner};
use crate::template_engine::{TemplateEngine, TemplateError, COMMIT_MESSAGE_TEMPLATE};
use crate::ui::Ui;

pub const SUCCESS_MESSAGE: &str = "Successfully initialized git.";
pub const IDENTITY_WARNING: &str = "Git user email and name should be set.";

pub const AUTHOR_NAME: &str = "Tomster";
pub const AUTHOR_EMAIL: &str = "tomster@emberjs.com";

const COMMITTER_EMAIL_VAR: &str = "GIT_COMMITTER_EMAIL";
const COMMITTER_NAME_VAR: &str = "GIT_COMMITTER_NAME";

/// Caller-supplied switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InitOptions {
    pub skip_git: bool,
}

/// Steps that run once git is known to be installed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GitStep {
    CheckEmail,
    CheckName,
    Init,
    Add,
    RenderMessage,
    Commit,
}

impl fmt::Display for GitStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CheckEmail => write!(f, "check_email"),
            Self::CheckName => write!(f, "check_name"),
            Self::Init => write!(f, "init"),
            Self::Add => write!(f, "add"),
            Self::RenderMessage => write!(f, "render_message"),
            Self::Commit => write!(f, "commit"),
        }
    }
}

#[derive(Debug, Error)]
pub enum StepError {
    #[error(transparent)]
    Process(#[from] ProcessError),

    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// How a run ended
///
/// Every variant is a successful completion from the caller's point of view; they differ
/// only in what was written to the UI.
#[derive(Debug)]
pub enum GitInitOutcome {
    /// `skip_git` was set. Nothing ran.
    Skipped,
    /// `git --version` failed. Nothing was written.
    GitUnavailable(ProcessError),
    /// A later step failed. The identity warning was written.
    Failed { step: GitStep, error: StepError },
    /// The initial commit exists. The success message was written.
    Initialized,
}

impl GitInitOutcome {
    pub fn is_initialized(&self) -> bool {
        matches!(self, Self::Initialized)
    }
}

impl fmt::Display for GitInitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skipped => write!(f, "skipped"),
            Self::GitUnavailable(error) => write!(f, "git unavailable ({})", error),
            Self::Failed { step, error } => write!(f, "failed at {}: {}", step, error),
            Self::Initialized => write!(f, "initialized"),
        }
    }
}

struct StepFailure {
    step: GitStep,
    error: StepError,
}

impl StepFailure {
    fn new(step: GitStep, error: impl Into<StepError>) -> Self {
        Self {
            step,
            error: error.into(),
        }
    }
}

/// Copy `env` and pin the commit author to the fixed identity
///
/// The rest of the environment is kept so git still sees `HOME`, `PATH` and friends.
pub fn build_git_environment(env: &EnvMap) -> EnvMap {
    let mut merged = env.clone();
    merged.insert(OsString::from("GIT_AUTHOR_NAME"), OsString::from(AUTHOR_NAME));
    merged.insert(OsString::from("GIT_AUTHOR_EMAIL"), OsString::from(AUTHOR_EMAIL));
    merged
}

/// Initializes a git repository in a project directory
pub struct GitInitTask<'a> {
    runner: &'a dyn ProcessRunner,
    ui: &'a dyn Ui,
    templates: &'a TemplateEngine,
    env: EnvMap,
    project_dir: PathBuf,
    metadata: PackageMetadata,
}

impl<'a> GitInitTask<'a> {
    /// `env` is the environment snapshot the task consults and extends for the commit.
    pub fn new(
        runner: &'a dyn ProcessRunner,
        ui: &'a dyn Ui,
        templates: &'a TemplateEngine,
        env: EnvMap,
        project_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            runner,
            ui,
            templates,
            env,
            project_dir: project_dir.into(),
            metadata: PackageMetadata::current(),
        }
    }

    /// Metadata used to render the commit message
    pub fn with_metadata(mut self, metadata: PackageMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Run the task. `None` behaves like `InitOptions::default()`.
    pub async fn run(&self, options: Option<InitOptions>) -> GitInitOutcome {
        let options = options.unwrap_or_default();

        if options.skip_git {
            tracing::debug!("git initialization skipped by request");
            return GitInitOutcome::Skipped;
        }

        match self.git_version().await {
            Ok(output) => tracing::debug!(version = %output.stdout.trim(), "found git"),
            Err(error) => {
                tracing::debug!(%error, "git is not available, skipping repository setup");
                return GitInitOutcome::GitUnavailable(error);
            }
        }

        match self.initialize().await {
            Ok(()) => {
                self.ui.write_line(&SUCCESS_MESSAGE.green().to_string());
                GitInitOutcome::Initialized
            }
            Err(StepFailure { step, error }) => {
                tracing::warn!(%step, %error, "git initialization failed");
                self.ui.write_error(IDENTITY_WARNING);
                GitInitOutcome::Failed { step, error }
            }
        }
    }

    async fn initialize(&self) -> Result<(), StepFailure> {
        self.email_configured()
            .await
            .map_err(|e| StepFailure::new(GitStep::CheckEmail, e))?;
        self.name_configured()
            .await
            .map_err(|e| StepFailure::new(GitStep::CheckName, e))?;
        self.git(&["init"], None)
            .await
            .map_err(|e| StepFailure::new(GitStep::Init, e))?;
        self.git(&["add", "."], None)
            .await
            .map_err(|e| StepFailure::new(GitStep::Add, e))?;

        let message = self
            .templates
            .render(COMMIT_MESSAGE_TEMPLATE, &self.metadata)
            .map_err(|e| StepFailure::new(GitStep::RenderMessage, e))?;

        let env = build_git_environment(&self.env);
        self.git(&["commit", "-m", message.as_str()], Some(env))
            .await
            .map_err(|e| StepFailure::new(GitStep::Commit, e))?;

        Ok(())
    }

    async fn git_version(&self) -> Result<ProcessOutput, ProcessError> {
        self.git(&["--version"], None).await
    }

    async fn email_configured(&self) -> Result<(), ProcessError> {
        if self.env_is_set(COMMITTER_EMAIL_VAR) {
            return Ok(());
        }
        self.git(&["config", "--get", "user.email"], None).await?;
        Ok(())
    }

    async fn name_configured(&self) -> Result<(), ProcessError> {
        if self.env_is_set(COMMITTER_NAME_VAR) {
            return Ok(());
        }
        self.git(&["config", "--get", "user.name"], None).await?;
        Ok(())
    }

    fn env_is_set(&self, key: &str) -> bool {
        self.env
            .get(OsStr::new(key))
            .is_some_and(|value| !value.is_empty())
    }

    async fn git(&self, args: &[&str], env: Option<EnvMap>) -> Result<ProcessOutput, ProcessError> {
        let mut options = CommandOptions::in_dir(&self.project_dir);
        if let Some(env) = env {
            options = options.with_env(env);
        }

        let output = self.runner.run("git", args, options).await?;
        tracing::trace!(?args, stdout = %output.stdout.trim(), stderr = %output.stderr.trim(), "git finished");
        Ok(output)
    }
}
