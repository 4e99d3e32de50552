//! CLI command-name contract for logging.

use crate::cli::parse::Commands;

/// Command name string used in log spans (e.g. "build", "diff").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Build { .. } => "build",
        Commands::Traverse { .. } => "traverse",
        Commands::Snapshot { .. } => "snapshot",
        Commands::Diff { .. } => "diff",
        Commands::Verify { .. } => "verify",
    }
}
