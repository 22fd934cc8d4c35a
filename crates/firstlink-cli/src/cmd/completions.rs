use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use clap_complete::{Shell, generate};
use tracing::info;

/// Arguments for `firstlink completions`.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell for completion script generation.
    #[arg(value_enum)]
    pub shell: Shell,

    /// Write the script to this file instead of stdout.
    #[arg(long, short, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Generate a shell completion script for `command`.
///
/// # Errors
///
/// Returns an error if the output file cannot be created or written.
pub fn run_completions(args: &CompletionsArgs, command: &mut clap::Command) -> Result<()> {
    match &args.output {
        Some(path) => {
            let mut file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_completions(args.shell, command, &mut file)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(shell = %args.shell, path = %path.display(), "completions written");
        }
        None => write_completions(args.shell, command, &mut io::stdout().lock())?,
    }
    Ok(())
}

/// Write the completion script for the command's own binary name.
fn write_completions(shell: Shell, command: &mut clap::Command, out: &mut dyn Write) -> io::Result<()> {
    let bin_name = command
        .get_bin_name()
        .unwrap_or_else(|| command.get_name())
        .to_string();
    generate(shell, command, bin_name, out);
    out.flush()
}
