//! Worktree lifecycle on top of the `git worktree` subcommands.

use std::path::{Path, PathBuf};

use crate::error::WorktreeError;
use crate::storage;
use crate::traits::ProcessRunner;

const SHORT_SHA_LEN: usize = 7;
const NOT_AVAILABLE: &str = "N/A";

/// One entry from `git worktree list --porcelain`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorktreeRecord {
    pub path: PathBuf,
    /// Short branch name, `None` when detached or bare
    pub branch: Option<String>,
    /// Abbreviated HEAD commit
    pub commit: Option<String>,
    pub detached: bool,
}

impl WorktreeRecord {
    #[must_use]
    pub fn branch_label(&self) -> &str {
        self.branch.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    #[must_use]
    pub fn commit_label(&self) -> &str {
        self.commit.as_deref().unwrap_or(NOT_AVAILABLE)
    }
}

/// Parses `git worktree list --porcelain` output
///
/// # Errors
/// Returns `WorktreeError::Unparsable` if an attribute line shows up outside
/// of a `worktree <path>` record
pub fn parse_porcelain(output: &str) -> Result<Vec<WorktreeRecord>, WorktreeError> {
    let mut records = Vec::new();
    let mut current: Option<WorktreeRecord> = None;

    for (index, line) in output.lines().enumerate() {
        if line.trim().is_empty() {
            records.extend(current.take());
            continue;
        }

        if let Some(path) = line.strip_prefix("worktree ") {
            records.extend(current.take());
            current = Some(WorktreeRecord {
                path: PathBuf::from(path),
                branch: None,
                commit: None,
                detached: false,
            });
            continue;
        }

        let Some(record) = current.as_mut() else {
            return Err(WorktreeError::Unparsable {
                line_number: index + 1,
                line: line.to_string(),
            });
        };

        if let Some(sha) = line.strip_prefix("HEAD ") {
            record.commit = Some(sha.chars().take(SHORT_SHA_LEN).collect());
        } else if let Some(reference) = line.strip_prefix("branch ") {
            let short = reference.strip_prefix("refs/heads/").unwrap_or(reference);
            record.branch = Some(short.to_string());
        } else if line == "detached" {
            record.detached = true;
            record.branch = None;
        }
        // bare, locked, prunable and future attributes carry nothing we display
    }
    records.extend(current);

    Ok(records)
}

/// True if `refs` (one refname per line) holds `branch` locally or as a
/// remote-tracking branch that `git worktree add` can pick up
fn branch_is_known(refs: &str, branch: &str) -> bool {
    refs.lines().map(str::trim).any(|refname| {
        if refname.strip_prefix("refs/heads/") == Some(branch) {
            return true;
        }
        refname
            .strip_prefix("refs/remotes/")
            .and_then(|rest| rest.split_once('/'))
            .is_some_and(|(_, name)| name != "HEAD" && name == branch)
    })
}

/// Creates, lists and removes worktrees of the repository containing `work_dir`
pub struct WorktreeStore<'a> {
    runner: &'a dyn ProcessRunner,
    work_dir: PathBuf,
    repo_root: PathBuf,
}

impl<'a> WorktreeStore<'a> {
    /// Opens the repository containing `work_dir`
    ///
    /// # Errors
    /// Returns an error if `work_dir` is not inside a git work tree or git
    /// cannot be run
    pub fn open(runner: &'a dyn ProcessRunner, work_dir: &Path) -> Result<Self, WorktreeError> {
        let output = git(runner, work_dir, &["rev-parse", "--show-toplevel"])?;
        let repo_root = PathBuf::from(output.trim_end_matches(['\n', '\r']));
        tracing::debug!(repo_root = %repo_root.display(), "opened repository");

        Ok(Self {
            runner,
            work_dir: work_dir.to_path_buf(),
            repo_root,
        })
    }

    #[must_use]
    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    /// Where `create` would put the worktree for `branch_name`
    ///
    /// # Errors
    /// Returns an error if the branch name is invalid or the repository root
    /// has no parent directory
    pub fn target_path(&self, branch_name: &str) -> Result<PathBuf, WorktreeError> {
        storage::sibling_worktree_path(&self.repo_root, branch_name)
    }

    /// Creates a worktree for `branch_name` beside the repository, creating
    /// the branch first if neither a local nor a remote branch has that name
    ///
    /// # Errors
    /// Returns an error if:
    /// - The branch name is invalid
    /// - The target directory already exists
    /// - Any git command fails
    pub fn create(&self, branch_name: &str) -> Result<PathBuf, WorktreeError> {
        let target = self.target_path(branch_name)?;
        if target.exists() {
            return Err(WorktreeError::TargetExists(target));
        }

        let refs = self.git(&[
            "for-each-ref",
            "--format=%(refname)",
            "refs/heads",
            "refs/remotes",
        ])?;
        let target_arg = target.to_string_lossy().into_owned();

        if branch_is_known(&refs, branch_name) {
            tracing::debug!(branch = branch_name, "using existing branch");
            self.git(&["worktree", "add", target_arg.as_str(), branch_name])?;
        } else {
            tracing::debug!(branch = branch_name, "creating new branch");
            self.git(&["worktree", "add", "-b", branch_name, target_arg.as_str()])?;
        }

        Ok(target)
    }

    /// Lists worktrees in the order git reports them
    ///
    /// # Errors
    /// Returns an error if git fails or its output cannot be parsed
    pub fn list(&self) -> Result<Vec<WorktreeRecord>, WorktreeError> {
        let output = self.git(&["worktree", "list", "--porcelain"])?;
        parse_porcelain(&output)
    }

    /// Removes the worktree at `path`, resolved against the invoking directory
    ///
    /// Without `force`, git refuses to remove worktrees with modified or
    /// untracked files and that refusal is returned as is.
    ///
    /// # Errors
    /// Returns an error if `path` is not a known worktree or git refuses
    pub fn delete(&self, path: &Path, force: bool) -> Result<PathBuf, WorktreeError> {
        let wanted = storage::normalize_path(&self.work_dir, path);
        let known = self.list()?.into_iter().any(|record| {
            storage::normalize_path(&self.work_dir, &record.path) == wanted
        });
        if !known {
            return Err(WorktreeError::NotAWorktree(wanted));
        }

        let target_arg = wanted.to_string_lossy().into_owned();
        let mut args = vec!["worktree", "remove"];
        if force {
            args.push("--force");
        }
        args.push(target_arg.as_str());
        self.git(&args)?;

        Ok(wanted)
    }

    fn git(&self, args: &[&str]) -> Result<String, WorktreeError> {
        git(self.runner, &self.repo_root, args)
    }
}

fn git(runner: &dyn ProcessRunner, cwd: &Path, args: &[&str]) -> Result<String, WorktreeError> {
    let output = runner.run("git", args, cwd).map_err(WorktreeError::Spawn)?;
    if !output.success() {
        tracing::debug!(?args, code = ?output.code, "git failed");
        return Err(WorktreeError::Git {
            command: args.iter().take(2).copied().collect::<Vec<_>>().join(" "),
            stderr: output.stderr,
        });
    }
    Ok(output.stdout)
}
