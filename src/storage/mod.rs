//! Worktree placement rules.
//!
//! Worktrees live beside the repository they belong to: a repository at
//! `/src/myproject` gets its `feature-x` worktree at `/src/myproject_feature-x`.

use std::path::{Component, Path, PathBuf};

use crate::error::WorktreeError;

/// Checks that a branch name can safely become part of a directory name
///
/// # Errors
/// Returns `WorktreeError::InvalidBranchName` if the name is empty, contains
/// control characters or backslashes, starts with `-`, is `HEAD`, or has a
/// `.`/`..` segment
pub fn validate_branch_name(branch_name: &str) -> Result<(), WorktreeError> {
    let invalid = |reason| WorktreeError::InvalidBranchName {
        branch: branch_name.to_string(),
        reason,
    };

    if branch_name.trim().is_empty() {
        return Err(invalid("branch name is empty"));
    }
    if branch_name.chars().any(char::is_control) {
        return Err(invalid("branch name contains control characters"));
    }
    if branch_name.contains('\\') {
        return Err(invalid("branch name contains a backslash"));
    }
    if branch_name.starts_with('-') {
        return Err(invalid("branch name starts with '-'"));
    }
    if branch_name == "HEAD" {
        return Err(invalid("HEAD is not a branch"));
    }
    if branch_name.split('/').any(|segment| segment == "." || segment == "..") {
        return Err(invalid("branch name contains a '.' or '..' path segment"));
    }

    Ok(())
}

/// Makes a branch name usable as a single directory-name component
#[must_use]
pub fn sanitize_branch_name(branch_name: &str) -> String {
    branch_name.replace(['/', '\\', ':', '*', '?', '"', '<', '>', '|'], "-")
}

/// Computes `<parent of repo_root>/<repo folder name>_<branch>`
///
/// # Errors
/// Returns an error if the branch name is invalid or the repository root has
/// no parent directory or folder name
pub fn sibling_worktree_path(repo_root: &Path, branch_name: &str) -> Result<PathBuf, WorktreeError> {
    validate_branch_name(branch_name)?;

    let no_sibling = || WorktreeError::NoSiblingDirectory(repo_root.to_path_buf());
    let parent = repo_root.parent().ok_or_else(no_sibling)?;
    let root_name = repo_root.file_name().ok_or_else(no_sibling)?;

    let dir_name = format!(
        "{}_{}",
        root_name.to_string_lossy(),
        sanitize_branch_name(branch_name)
    );
    Ok(parent.join(dir_name))
}

/// Resolves a user-supplied path against `base`
///
/// Existing paths are canonicalized; anything else is normalized lexically so
/// that paths git has already forgotten about still compare sensibly.
#[must_use]
pub fn normalize_path(base: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };

    if let Ok(canonical) = joined.canonicalize() {
        return canonical;
    }

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
