//! Post-create actions: open the new worktree in a shell, an IDE, or an
//! assistant tool.

use std::io;
use std::path::Path;

use clap::ValueEnum;

use crate::config::LauncherConfig;
use crate::error::LauncherError;
use crate::traits::{LaunchStyle, ProcessRunner};

/// Value of the `--mode` flag
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeArg {
    None,
    Terminal,
    Ide,
    Assistant,
}

/// Launch options exactly as the user gave them, before validation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchRequest {
    pub mode: Option<ModeArg>,
    /// Explicit IDE executable (`--ide <name>`)
    pub ide: Option<String>,
    /// `--claude`
    pub assistant: bool,
}

/// What to do once the worktree exists
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchMode {
    None,
    Terminal,
    /// Open in an IDE; `None` falls back to the configured default
    Ide(Option<String>),
    Assistant,
}

impl LaunchMode {
    /// Collapses a request into a single mode
    ///
    /// # Errors
    /// Returns `LauncherError::MutuallyExclusive` if the request asks for more
    /// than one kind of launcher
    pub fn resolve(request: &LaunchRequest) -> Result<Self, LauncherError> {
        if request.ide.is_some() && request.assistant {
            return Err(LauncherError::MutuallyExclusive("--ide and --claude"));
        }
        if request.assistant && !matches!(request.mode, None | Some(ModeArg::Assistant)) {
            return Err(LauncherError::MutuallyExclusive("--claude and --mode"));
        }
        if request.ide.is_some() && !matches!(request.mode, None | Some(ModeArg::Ide)) {
            return Err(LauncherError::MutuallyExclusive("--ide and --mode"));
        }

        if request.assistant {
            return Ok(Self::Assistant);
        }
        if let Some(name) = &request.ide {
            // A blank name falls back to the configured default
            let name = Some(name.trim()).filter(|name| !name.is_empty());
            return Ok(Self::Ide(name.map(str::to_string)));
        }

        Ok(match request.mode {
            None | Some(ModeArg::None) => Self::None,
            Some(ModeArg::Terminal) => Self::Terminal,
            Some(ModeArg::Ide) => Self::Ide(None),
            Some(ModeArg::Assistant) => Self::Assistant,
        })
    }
}

/// Starts the external program matching a `LaunchMode`
pub struct LauncherDispatcher<'a> {
    runner: &'a dyn ProcessRunner,
    config: LauncherConfig,
}

impl<'a> LauncherDispatcher<'a> {
    #[must_use]
    pub fn new(runner: &'a dyn ProcessRunner, config: LauncherConfig) -> Self {
        Self { runner, config }
    }

    /// Validates `request` and dispatches it
    ///
    /// # Errors
    /// Returns an error if the request is contradictory or the launcher cannot
    /// be started; nothing is spawned in the first case
    pub fn dispatch_request(
        &self,
        request: &LaunchRequest,
        path: &Path,
    ) -> Result<(), LauncherError> {
        let mode = LaunchMode::resolve(request)?;
        self.dispatch(&mode, path)
    }

    /// Opens `path` with the launcher selected by `mode`
    ///
    /// Only failing to start the program is an error; how the program later
    /// exits is its own business.
    ///
    /// # Errors
    /// Returns an error if no IDE can be determined or the program cannot be
    /// spawned
    pub fn dispatch(&self, mode: &LaunchMode, path: &Path) -> Result<(), LauncherError> {
        tracing::debug!(?mode, path = %path.display(), "dispatching launcher");

        match mode {
            LaunchMode::None => Ok(()),
            LaunchMode::Terminal => {
                self.spawn(&self.config.shell, &[], path, LaunchStyle::Foreground)
            }
            LaunchMode::Ide(name) => {
                let program = name
                    .as_deref()
                    .or(self.config.default_ide.as_deref())
                    .filter(|program| !program.trim().is_empty())
                    .ok_or(LauncherError::NoIdeConfigured)?;
                let path_arg = path.to_string_lossy();
                self.spawn(program, &[path_arg.as_ref()], path, LaunchStyle::Detached)
            }
            LaunchMode::Assistant => {
                let args: Vec<&str> = self
                    .config
                    .assistant_args
                    .iter()
                    .map(String::as_str)
                    .collect();
                self.spawn(&self.config.assistant, &args, path, LaunchStyle::Foreground)
            }
        }
    }

    fn spawn(
        &self,
        program: &str,
        args: &[&str],
        cwd: &Path,
        style: LaunchStyle,
    ) -> Result<(), LauncherError> {
        self.runner
            .launch(program, args, cwd, style)
            .map_err(|source| spawn_error(program, source))
    }
}

fn spawn_error(program: &str, source: io::Error) -> LauncherError {
    if source.kind() == io::ErrorKind::NotFound {
        LauncherError::NotFound {
            program: program.to_string(),
        }
    } else {
        LauncherError::Spawn {
            program: program.to_string(),
            source,
        }
    }
}
