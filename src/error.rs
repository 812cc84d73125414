//! Error types for worktree and launcher operations.

use std::path::PathBuf;

use thiserror::Error;

/// Failures originating from git worktree operations.
#[derive(Debug, Error)]
pub enum WorktreeError {
    /// The branch name cannot be used to derive a worktree directory
    #[error("invalid branch name '{branch}': {reason}")]
    InvalidBranchName { branch: String, reason: &'static str },

    /// The computed worktree directory is already present on disk
    #[error("worktree path already exists: {}", .0.display())]
    TargetExists(PathBuf),

    /// The repository root has no parent directory to place siblings in
    #[error("cannot place a worktree beside repository root {}", .0.display())]
    NoSiblingDirectory(PathBuf),

    /// The requested path is not one of git's worktrees
    #[error("no worktree found at {}", .0.display())]
    NotAWorktree(PathBuf),

    /// git exited non-zero; stderr is kept verbatim
    #[error("git {command} failed: {}", .stderr.trim_end())]
    Git { command: String, stderr: String },

    /// git could not be started at all
    #[error("failed to run git")]
    Spawn(#[source] std::io::Error),

    /// `git worktree list --porcelain` produced a line we cannot place
    #[error("unparsable worktree listing at line {line_number}: '{line}'")]
    Unparsable { line_number: usize, line: String },
}

/// Failures resolving or spawning a post-create launcher.
#[derive(Debug, Error)]
pub enum LauncherError {
    /// Two launch options that cannot be combined were requested together
    #[error("{0} are mutually exclusive")]
    MutuallyExclusive(&'static str),

    #[error("no IDE specified and no default IDE configured (pass --ide <name> or set default-ide)")]
    NoIdeConfigured,

    #[error("'{program}' was not found on PATH")]
    NotFound { program: String },

    #[error("failed to launch '{program}'")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}
