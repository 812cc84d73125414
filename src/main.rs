use clap::{ArgAction, CommandFactory, Parser, Subcommand, ValueHint};
use std::path::PathBuf;

use ez_leaf::Result;
use ez_leaf::commands::completions::{self, Shell};
use ez_leaf::commands::{create, delete, list};
use ez_leaf::launcher::{LaunchRequest, ModeArg};
use ez_leaf::logging;

#[derive(Parser)]
#[command(name = "ez-leaf")]
#[command(about = "ez-leaf: create, list and delete git worktrees beside your repository")]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    /// User configuration file
    #[arg(long, global = true, env = "EZ_LEAF_CONFIG", value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new git worktree for BRANCH at ../<root_folder_name>_<branch_name>
    Create {
        /// Branch to check out; created from HEAD if it does not exist
        #[arg(value_hint = ValueHint::Other)]
        branch: String,
        /// What to open once the worktree exists
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,
        /// IDE executable to open the worktree with (e.g. code, cursor, zed); implies --mode ide
        #[arg(long, value_name = "NAME")]
        ide: Option<String>,
        /// Start the assistant tool in the worktree; same as --mode assistant
        #[arg(long)]
        claude: bool,
    },
    /// List all git worktrees in the repository
    List,
    /// Delete a git worktree at PATH
    Delete {
        /// Worktree path. If not provided, opens interactive selection
        #[arg(value_hint = ValueHint::DirPath)]
        path: Option<String>,
        /// Force deletion even with uncommitted changes
        #[arg(short, long)]
        force: bool,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn run(cli: Cli) -> Result<()> {
    logging::init_logging(cli.verbose)?;

    match cli.command {
        Commands::Create {
            branch,
            mode,
            ide,
            claude,
        } => {
            let request = LaunchRequest {
                mode,
                ide,
                assistant: claude,
            };
            create::create_worktree(&branch, &request, cli.config.as_deref())?;
        }
        Commands::List => {
            list::list_worktrees()?;
        }
        Commands::Delete { path, force } => {
            delete::delete_worktree(path.as_deref(), force)?;
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            completions::generate_completions(shell, &mut cmd, &mut std::io::stdout());
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
