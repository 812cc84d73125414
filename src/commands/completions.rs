//! Shell completion scripts.

use clap::{Command, ValueEnum};
use clap_complete::Shell as CompleteShell;
use std::io::Write;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    #[value(name = "powershell")]
    PowerShell,
}

impl From<Shell> for CompleteShell {
    fn from(shell: Shell) -> Self {
        match shell {
            Shell::Bash => CompleteShell::Bash,
            Shell::Zsh => CompleteShell::Zsh,
            Shell::Fish => CompleteShell::Fish,
            Shell::PowerShell => CompleteShell::PowerShell,
        }
    }
}

/// Writes the completion script for `shell` to `out`
pub fn generate_completions(shell: Shell, cmd: &mut Command, out: &mut dyn Write) {
    let bin_name = cmd.get_name().to_string();
    clap_complete::generate(CompleteShell::from(shell), cmd, bin_name, out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Arg;

    fn sample_command() -> Command {
        Command::new("ez-leaf")
            .subcommand(Command::new("create").arg(Arg::new("branch")))
            .subcommand(Command::new("list"))
    }

    #[test]
    fn test_every_shell_mentions_subcommands() {
        for shell in [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell] {
            let mut out = Vec::new();
            generate_completions(shell, &mut sample_command(), &mut out);

            let script = String::from_utf8_lossy(&out);
            assert!(script.contains("ez-leaf"), "{shell:?}");
            assert!(script.contains("create"), "{shell:?}");
        }
    }
}
