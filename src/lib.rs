//! # ez-leaf
//!
//! A small CLI for working on several branches of one repository at once
//! using git worktrees.
//!
//! ## Features
//!
//! - **Predictable Placement** - A worktree for `feature-x` of `~/src/app` lives at `~/src/app_feature-x`
//! - **Branch Creation** - Branches that exist neither locally nor on a remote are created on the fly
//! - **Launchers** - Open the new worktree in your shell, your IDE, or an assistant tool
//! - **Plain Git Underneath** - Everything goes through `git worktree`; nothing else is stored
//!
//! ## Quick Start
//!
//! ```bash
//! # Create a worktree next to the current repository
//! ez-leaf create feature-x
//!
//! # Create it and open it in VS Code
//! ez-leaf create feature-x --ide code
//!
//! # List worktrees
//! ez-leaf list
//!
//! # Delete a worktree, even with uncommitted changes
//! ez-leaf delete ../app_feature-x --force
//! ```
//!
//! ## Module Structure
//!
//! - [`commands`] - Individual command implementations (create, list, delete, completions)
//! - [`git`] - `WorktreeStore`, the wrapper around `git worktree add/list/remove`
//! - [`storage`] - Worktree path derivation and branch name checks
//! - [`launcher`] - Launch mode resolution and the `LauncherDispatcher`
//! - [`config`] - Launcher settings from `config.toml` and `.ez-leaf.toml`
//! - [`selection`] - Abstracts interactive selection prompts for testability
//! - [`traits`] - Defines the `ProcessRunner` trait for testability and abstraction
//! - [`process`] - The real `ProcessRunner`
//! - [`error`] - `WorktreeError` and `LauncherError`
//! - [`logging`] - `tracing` subscriber setup

pub mod commands;
pub mod config;
pub mod error;
pub mod git;
pub mod launcher;
pub mod logging;
pub mod process;
pub mod selection;
pub mod storage;
pub mod traits;

pub use anyhow::Result;
