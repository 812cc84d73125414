use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::git::WorktreeStore;
use crate::process::SystemProcessRunner;
use crate::selection::{RealSelectionProvider, SelectionProvider, select_worktree};
use crate::traits::ProcessRunner;

/// Deletes the worktree at `path`, or one picked interactively when no path
/// is given
///
/// # Errors
/// Returns an error if:
/// - The path is not a worktree of the current repository
/// - git refuses the removal (uncommitted changes without `force`)
/// - Interactive selection fails or is cancelled
pub fn delete_worktree(path: Option<&str>, force: bool) -> Result<()> {
    let current_dir = std::env::current_dir()?;
    delete_worktree_with_provider(
        &SystemProcessRunner,
        &current_dir,
        path,
        force,
        &RealSelectionProvider,
    )?;
    Ok(())
}

/// Deletes a worktree with a custom runner and selection provider (for testing)
///
/// # Errors
/// See [`delete_worktree`]
pub fn delete_worktree_with_provider(
    runner: &dyn ProcessRunner,
    work_dir: &Path,
    path: Option<&str>,
    force: bool,
    provider: &dyn SelectionProvider,
) -> Result<PathBuf> {
    let store = WorktreeStore::open(runner, work_dir)?;

    let target = match path {
        Some(path) => PathBuf::from(path),
        None => select_worktree("Select worktree to delete:", &store.list()?, provider)?,
    };

    store.delete(&target, force)?;
    println!("Worktree deleted: {}", target.display());

    Ok(target)
}
