//! Launcher configuration.
//!
//! Settings come from two optional TOML files, both with the same shape:
//!
//! - the user file (`--config`, `EZ_LEAF_CONFIG`, or
//!   `<config dir>/ez-leaf/config.toml`)
//! - `.ez-leaf.toml` at the repository root, whose fields win over the user file
//!
//! ```toml
//! [launcher]
//! default-ide = "code"
//! assistant = "claude"
//! assistant-args = ["--continue"]
//! shell = "/bin/zsh"
//! ```
//!
//! `EZ_LEAF_IDE` overrides `default-ide`. Without a `shell` setting, `$SHELL`
//! is used, then `/bin/sh`.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const REPO_CONFIG_FILE: &str = ".ez-leaf.toml";
pub const IDE_ENV_VAR: &str = "EZ_LEAF_IDE";

const DEFAULT_ASSISTANT: &str = "claude";
const FALLBACK_SHELL: &str = "/bin/sh";

/// On-disk layout of a configuration file
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub launcher: LauncherSection,
}

/// `[launcher]` table; every field is optional so files can be layered
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LauncherSection {
    #[serde(default)]
    pub default_ide: Option<String>,
    #[serde(default)]
    pub assistant: Option<String>,
    #[serde(default)]
    pub assistant_args: Option<Vec<String>>,
    #[serde(default)]
    pub shell: Option<String>,
}

impl LauncherSection {
    /// Fields set in `overrides` replace the ones in `self`
    #[must_use]
    pub fn merged_with(self, overrides: Self) -> Self {
        Self {
            default_ide: overrides.default_ide.or(self.default_ide),
            assistant: overrides.assistant.or(self.assistant),
            assistant_args: overrides.assistant_args.or(self.assistant_args),
            shell: overrides.shell.or(self.shell),
        }
    }
}

/// Fully resolved settings handed to the launcher dispatcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherConfig {
    /// IDE used when `--mode ide` is given without `--ide <name>`
    pub default_ide: Option<String>,
    pub assistant: String,
    pub assistant_args: Vec<String>,
    pub shell: String,
}

impl LauncherConfig {
    /// Loads and layers the user and repository configuration files
    ///
    /// # Errors
    /// Returns an error if a configuration file exists but cannot be read.
    /// Invalid TOML only produces a warning and falls back to defaults.
    pub fn load(user_config: Option<&Path>, repo_root: &Path) -> Result<Self> {
        let user_path = user_config.map(Path::to_path_buf).or_else(default_user_config_path);

        let user = match user_path {
            Some(path) => read_section(&path)?,
            None => LauncherSection::default(),
        };
        let repo = read_section(&repo_root.join(REPO_CONFIG_FILE))?;

        Ok(Self::from_section(user.merged_with(repo)))
    }

    /// Applies environment overrides and built-in defaults
    #[must_use]
    pub fn from_section(section: LauncherSection) -> Self {
        let default_ide = non_empty_env(IDE_ENV_VAR)
            .or(section.default_ide)
            .filter(|ide| !ide.trim().is_empty());
        let shell = section
            .shell
            .or_else(|| non_empty_env("SHELL"))
            .unwrap_or_else(|| FALLBACK_SHELL.to_string());

        Self {
            default_ide,
            assistant: section
                .assistant
                .unwrap_or_else(|| DEFAULT_ASSISTANT.to_string()),
            assistant_args: section.assistant_args.unwrap_or_default(),
            shell,
        }
    }
}

fn default_user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("ez-leaf").join("config.toml"))
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

fn read_section(path: &Path) -> Result<LauncherSection> {
    if !path.exists() {
        return Ok(LauncherSection::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    if content.trim().is_empty() {
        return Ok(LauncherSection::default());
    }

    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            tracing::debug!(path = %path.display(), "loaded configuration");
            Ok(file.launcher)
        }
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "invalid TOML in configuration file, using defaults"
            );
            Ok(LauncherSection::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use temp_env::with_vars;

    fn without_env<R, F: FnOnce() -> R>(f: F) -> R {
        with_vars([(IDE_ENV_VAR, None::<&str>), ("SHELL", None)], f)
    }

    #[test]
    fn test_defaults_without_files() {
        without_env(|| {
            let config = LauncherConfig::from_section(LauncherSection::default());
            assert_eq!(config.default_ide, None);
            assert_eq!(config.assistant, "claude");
            assert!(config.assistant_args.is_empty());
            assert_eq!(config.shell, "/bin/sh");
        });
    }

    #[test]
    fn test_shell_falls_back_to_environment() {
        with_vars(
            [("SHELL", Some("/usr/bin/fish")), (IDE_ENV_VAR, None)],
            || {
                let config = LauncherConfig::from_section(LauncherSection::default());
                assert_eq!(config.shell, "/usr/bin/fish");
            },
        );
    }

    #[test]
    fn test_ide_env_overrides_file() {
        with_vars([(IDE_ENV_VAR, Some("zed"))], || {
            let section = LauncherSection {
                default_ide: Some("code".to_string()),
                ..LauncherSection::default()
            };
            assert_eq!(
                LauncherConfig::from_section(section).default_ide.as_deref(),
                Some("zed")
            );
        });
    }

    #[test]
    fn test_blank_default_ide_is_unset() {
        without_env(|| {
            let section = LauncherSection {
                default_ide: Some(String::new()),
                ..LauncherSection::default()
            };
            assert_eq!(LauncherConfig::from_section(section).default_ide, None);
        });
    }

    #[test]
    fn test_repo_file_overrides_user_file_per_field() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let user = dir.path().join("user.toml");
        fs::write(
            &user,
            "[launcher]\ndefault-ide = \"code\"\nassistant = \"aider\"\n",
        )?;
        let repo = dir.path().join("repo");
        fs::create_dir(&repo)?;
        fs::write(
            repo.join(REPO_CONFIG_FILE),
            "[launcher]\ndefault-ide = \"cursor\"\nassistant-args = [\"--yes\"]\n",
        )?;

        let config = without_env(|| LauncherConfig::load(Some(user.as_path()), &repo))?;

        assert_eq!(config.default_ide.as_deref(), Some("cursor"));
        assert_eq!(config.assistant, "aider");
        assert_eq!(config.assistant_args, ["--yes"]);
        Ok(())
    }

    #[test]
    fn test_invalid_toml_falls_back_to_defaults() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("broken.toml");
        fs::write(&path, "[launcher\ndefault-ide = ")?;

        assert_eq!(read_section(&path)?, LauncherSection::default());
        Ok(())
    }

    #[test]
    fn test_blank_and_missing_files_are_defaults() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let blank = dir.path().join("blank.toml");
        fs::write(&blank, "  \n")?;

        assert_eq!(read_section(&blank)?, LauncherSection::default());
        assert_eq!(
            read_section(&dir.path().join("missing.toml"))?,
            LauncherSection::default()
        );
        Ok(())
    }

    #[test]
    fn test_merge_keeps_unset_fields() {
        let base = LauncherSection {
            shell: Some("/bin/bash".to_string()),
            assistant: Some("claude".to_string()),
            ..LauncherSection::default()
        };
        let overrides = LauncherSection {
            assistant: Some("codex".to_string()),
            ..LauncherSection::default()
        };

        let merged = base.merged_with(overrides);
        assert_eq!(merged.shell.as_deref(), Some("/bin/bash"));
        assert_eq!(merged.assistant.as_deref(), Some("codex"));
    }
}
