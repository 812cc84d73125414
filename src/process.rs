use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::traits::{LaunchStyle, ProcessOutput, ProcessRunner};

/// `ProcessRunner` backed by `std::process::Command`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProcessRunner;

impl ProcessRunner for SystemProcessRunner {
    fn run(&self, program: &str, args: &[&str], cwd: &Path) -> io::Result<ProcessOutput> {
        tracing::debug!(program, ?args, cwd = %cwd.display(), "running");
        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .output()?;

        Ok(ProcessOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            code: output.status.code(),
        })
    }

    fn launch(
        &self,
        program: &str,
        args: &[&str],
        cwd: &Path,
        style: LaunchStyle,
    ) -> io::Result<()> {
        tracing::debug!(program, ?args, cwd = %cwd.display(), ?style, "launching");
        let mut command = Command::new(program);
        command.args(args).current_dir(cwd);

        match style {
            LaunchStyle::Foreground => {
                let status = command
                    .stdin(Stdio::inherit())
                    .stdout(Stdio::inherit())
                    .stderr(Stdio::inherit())
                    .status()?;
                // Interactive tools exit non-zero for all sorts of reasons
                if !status.success() {
                    tracing::debug!(program, %status, "launched program exited unsuccessfully");
                }
            }
            LaunchStyle::Detached => {
                // The child is not waited on; it outlives this process
                let child = command
                    .stdin(Stdio::null())
                    .stdout(Stdio::null())
                    .stderr(Stdio::null())
                    .spawn()?;
                tracing::debug!(program, pid = child.id(), "detached");
            }
        }

        Ok(())
    }
}
