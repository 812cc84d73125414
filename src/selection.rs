use anyhow::Result;
use inquire::Select;
use std::path::PathBuf;

use crate::git::WorktreeRecord;

/// Trait for providing interactive selection functionality
/// This allows us to abstract away the interactive prompts for testing
pub trait SelectionProvider {
    /// Present a selection menu and return the user's choice
    ///
    /// # Errors
    /// Returns an error if the selection process fails or user cancels
    fn select(&self, prompt: &str, options: Vec<String>) -> Result<String>;
}

/// Real implementation using inquire::Select for production use
pub struct RealSelectionProvider;

impl SelectionProvider for RealSelectionProvider {
    fn select(&self, prompt: &str, options: Vec<String>) -> Result<String> {
        let selection = Select::new(prompt, options)
            .with_page_size(10)
            .with_vim_mode(true)
            .prompt()?;
        Ok(selection)
    }
}

/// Mock implementation for testing that returns a predetermined response
pub struct MockSelectionProvider {
    pub response: String,
}

impl MockSelectionProvider {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

impl SelectionProvider for MockSelectionProvider {
    fn select(&self, _prompt: &str, options: Vec<String>) -> Result<String> {
        // Validate that the response is actually in the options
        if options.contains(&self.response) {
            Ok(self.response.clone())
        } else {
            anyhow::bail!("Mock response '{}' not found in options", self.response)
        }
    }
}

/// Formats a worktree as "branch (path)" for the picker
#[must_use]
pub fn format_worktree_choice(record: &WorktreeRecord) -> String {
    format!("{} ({})", record.branch_label(), record.path.display())
}

/// Helper function to extract the path from a selection formatted as "branch (path)"
///
/// Branch names cannot contain spaces, so the first " (" starts the path.
///
/// # Errors
/// Returns an error if the selection string is not in the expected format
pub fn extract_path_from_selection(selection: &str) -> Result<PathBuf> {
    match selection
        .find(" (")
        .and_then(|start| selection[start + 2..].strip_suffix(')'))
    {
        Some(path) => Ok(PathBuf::from(path)),
        None => anyhow::bail!("Invalid selection format: {}", selection),
    }
}

/// Lets the user pick one of the linked worktrees
///
/// The first record is git's primary worktree and is never offered.
///
/// # Errors
/// Returns an error if there is nothing to pick or the prompt fails
pub fn select_worktree(
    prompt: &str,
    records: &[WorktreeRecord],
    provider: &dyn SelectionProvider,
) -> Result<PathBuf> {
    let options: Vec<String> = records.iter().skip(1).map(format_worktree_choice).collect();

    if options.is_empty() {
        anyhow::bail!("No worktrees found");
    }

    let selection = provider.select(prompt, options)?;
    extract_path_from_selection(&selection)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(path: &str, branch: Option<&str>) -> WorktreeRecord {
        WorktreeRecord {
            path: PathBuf::from(path),
            branch: branch.map(str::to_string),
            commit: Some("abc1234".to_string()),
            detached: branch.is_none(),
        }
    }

    #[test]
    fn test_mock_selection_provider_valid_response() {
        let options = vec!["option1".to_string(), "option2".to_string()];
        let provider = MockSelectionProvider::new("option1");

        let result = provider.select("Test prompt", options);
        assert!(matches!(result, Ok(ref s) if s == "option1"));
    }

    #[test]
    fn test_mock_selection_provider_invalid_response() {
        let options = vec!["option1".to_string(), "option2".to_string()];
        let provider = MockSelectionProvider::new("invalid");

        let result = provider.select("Test prompt", options);
        assert!(result.is_err());
    }

    #[test]
    fn test_extract_path_from_selection() {
        let selection = "feature/x (/some/path (copy))";
        let result = extract_path_from_selection(selection);
        assert!(matches!(result, Ok(ref p) if p == &PathBuf::from("/some/path (copy)")));
        assert!(extract_path_from_selection("invalid format").is_err());
    }

    #[test]
    fn test_select_worktree_skips_primary() -> Result<()> {
        let records = [
            record("/src/app", Some("main")),
            record("/src/app_feature-x", Some("feature-x")),
            record("/src/app_detached", None),
        ];
        let provider = MockSelectionProvider::new("N/A (/src/app_detached)");

        let path = select_worktree("Select worktree to delete:", &records, &provider)?;
        assert_eq!(path, PathBuf::from("/src/app_detached"));

        let primary = MockSelectionProvider::new("main (/src/app)");
        assert!(select_worktree("Select worktree to delete:", &records, &primary).is_err());
        Ok(())
    }

    #[test]
    fn test_select_worktree_with_only_primary() {
        let records = [record("/src/app", Some("main"))];
        let provider = MockSelectionProvider::new("main (/src/app)");

        let result = select_worktree("Select worktree to delete:", &records, &provider);
        assert!(result.is_err());
    }
}
