use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::config::LauncherConfig;
use crate::error::LauncherError;
use crate::git::WorktreeStore;
use crate::launcher::{LaunchMode, LaunchRequest, LauncherDispatcher};
use crate::process::SystemProcessRunner;
use crate::traits::ProcessRunner;

/// Creates a worktree for `branch` beside the current repository and runs the
/// requested launcher in it
///
/// # Errors
/// Returns an error if:
/// - The launch options contradict each other (checked before anything else)
/// - The current directory is not inside a git repository
/// - The worktree cannot be created
/// - The launcher cannot be started
pub fn create_worktree(
    branch: &str,
    request: &LaunchRequest,
    user_config: Option<&Path>,
) -> Result<()> {
    let current_dir = std::env::current_dir()?;
    create_worktree_with_runner(
        &SystemProcessRunner,
        &current_dir,
        branch,
        request,
        user_config,
    )?;
    Ok(())
}

/// Test version that accepts a mock process runner
///
/// # Errors
/// See [`create_worktree`]
pub fn create_worktree_with_runner(
    runner: &dyn ProcessRunner,
    work_dir: &Path,
    branch: &str,
    request: &LaunchRequest,
    user_config: Option<&Path>,
) -> Result<PathBuf> {
    let mode = LaunchMode::resolve(request)?;

    let store = WorktreeStore::open(runner, work_dir)?;
    let config = LauncherConfig::load(user_config, store.repo_root())?;

    if mode == LaunchMode::Ide(None) && config.default_ide.is_none() {
        return Err(LauncherError::NoIdeConfigured.into());
    }

    let worktree_path = store.create(branch)?;
    println!("Worktree created at: {}", worktree_path.display());

    LauncherDispatcher::new(runner, config).dispatch(&mode, &worktree_path)?;

    Ok(worktree_path)
}
