//! Post-generation tasks

pub mod git_init;

use std::path::Path;

use crate::process::{current_env, DuctRunner};
use crate::template_engine::TemplateEngine;
use crate::ui::ConsoleUi;

pub use git_init::{GitInitOutcome, InitOptions};

/// Run git initialization in `project_dir` against the real terminal and `git` binary
pub async fn init_git(
    project_dir: &Path,
    templates: &TemplateEngine,
    options: InitOptions,
) -> GitInitOutcome {
    let outcome = git_init::GitInitTask::new(
        &DuctRunner,
        &ConsoleUi,
        templates,
        current_env(),
        project_dir,
    )
    .run(Some(options))
    .await;

    tracing::info!(dir = %project_dir.display(), %outcome, "git initialization finished");
    outcome
}
