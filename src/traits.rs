use std::io;
use std::path::Path;

/// Captured result of a blocking external command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit code, `None` when the process was terminated by a signal
    pub code: Option<i32>,
}

impl ProcessOutput {
    #[must_use]
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// How a launched program relates to the current terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchStyle {
    /// Inherit stdio and wait for the program to exit (shells, assistants)
    Foreground,
    /// Spawn with null stdio and return immediately (GUI editors)
    Detached,
}

/// Trait for external process execution to enable mocking in tests
pub trait ProcessRunner {
    /// Runs `program` to completion and captures its output
    ///
    /// # Errors
    /// Returns an error if the process cannot be spawned
    fn run(&self, program: &str, args: &[&str], cwd: &Path) -> io::Result<ProcessOutput>;

    /// Starts an interactive program; its exit status is not reported
    ///
    /// # Errors
    /// Returns an error if the process cannot be spawned
    fn launch(&self, program: &str, args: &[&str], cwd: &Path, style: LaunchStyle)
    -> io::Result<()>;
}
