use anyhow::Result;
use std::path::Path;

use crate::git::{WorktreeRecord, WorktreeStore};
use crate::process::SystemProcessRunner;
use crate::traits::ProcessRunner;

const PATH_WIDTH: usize = 50;
const BRANCH_WIDTH: usize = 30;
const COMMIT_WIDTH: usize = 10;

/// Prints every worktree of the current repository as a table
///
/// # Errors
/// Returns an error if the current directory is not inside a git repository
/// or the worktree listing fails
pub fn list_worktrees() -> Result<()> {
    let current_dir = std::env::current_dir()?;
    print!("{}", list_worktrees_with_runner(&SystemProcessRunner, &current_dir)?);
    Ok(())
}

/// Test version that accepts a mock process runner and returns the rendered output
///
/// # Errors
/// See [`list_worktrees`]
pub fn list_worktrees_with_runner(runner: &dyn ProcessRunner, work_dir: &Path) -> Result<String> {
    let store = WorktreeStore::open(runner, work_dir)?;
    let records = store.list()?;
    Ok(render_table(&records))
}

#[must_use]
pub fn render_table(records: &[WorktreeRecord]) -> String {
    if records.is_empty() {
        return "No worktrees found.\n".to_string();
    }

    let mut table = format_row("PATH", "BRANCH", "COMMIT");
    table.push_str(&"-".repeat(PATH_WIDTH + BRANCH_WIDTH + COMMIT_WIDTH));
    table.push('\n');

    for record in records {
        table.push_str(&format_row(
            &record.path.to_string_lossy(),
            record.branch_label(),
            record.commit_label(),
        ));
    }

    table
}

fn format_row(path: &str, branch: &str, commit: &str) -> String {
    format!(
        "{:<pw$} {:<bw$} {:<cw$}\n",
        path,
        branch,
        commit,
        pw = PATH_WIDTH,
        bw = BRANCH_WIDTH,
        cw = COMMIT_WIDTH
    )
}
