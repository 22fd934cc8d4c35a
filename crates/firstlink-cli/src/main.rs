#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{CommandFactory, Parser, Subcommand};
use firstlink_core::config::resolve_config;
use output::{OutputMode, resolve_output_mode};
use std::env;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    name = "firstlink",
    author,
    version,
    about = "firstlink: termination analysis and layout for first-link networks",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (defaults to pretty on a terminal, text otherwise).
    #[arg(long, value_enum, global = true)]
    format: Option<OutputMode>,

    /// Read configuration from this file instead of the discovered one.
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Termination scores and centrality per node",
        after_help = "EXAMPLES:\n    # Ten most central nodes\n    firstlink scores network.csv --top 10\n\n    # Full table as JSON\n    firstlink scores network.csv --format json"
    )]
    Scores(cmd::scores::ScoresArgs),

    #[command(
        about = "Lay out every component and emit render-ready records",
        after_help = "EXAMPLES:\n    # Highlight seed articles\n    firstlink layout network.csv --seeds seeds.csv\n\n    # Different orbit directions\n    firstlink layout network.csv --seed 42 --format json"
    )]
    Layout(cmd::layout::LayoutArgs),

    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    firstlink completions bash\n\n    # Install zsh completions\n    firstlink completions zsh --output ~/.zfunc/_firstlink"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("FIRSTLINK_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "firstlink=debug,info"
        } else {
            "firstlink=info,warn"
        })
    });

    let format = env::var("FIRSTLINK_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let project_root = env::current_dir()?;
    let config = resolve_config(cli.config.as_deref(), &project_root)?;
    let output = resolve_output_mode(cli.format);
    debug!(?output, "resolved output mode");

    match cli.command {
        Commands::Scores(ref args) => cmd::scores::run_scores(args, output, &config),
        Commands::Layout(ref args) => cmd::layout::run_layout(args, output, &config),
        Commands::Completions(ref args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args, &mut command)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "firstlink",
            "layout",
            "net.csv",
            "--seed",
            "9",
            "--format",
            "json",
            "--config",
            "custom.toml",
        ]);
        assert_eq!(cli.format, Some(OutputMode::Json));
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        match cli.command {
            Commands::Layout(args) => {
                assert_eq!(args.seed, Some(9));
                assert!(args.seeds.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn completions_parse_shell() {
        let cli = Cli::parse_from(["firstlink", "completions", "bash"]);
        assert!(matches!(
            cli.command,
            Commands::Completions(cmd::completions::CompletionsArgs {
                shell: clap_complete::Shell::Bash,
                output: None,
            })
        ));
    }

    #[test]
    fn scores_top_flag() {
        let cli = Cli::parse_from(["firstlink", "scores", "net.csv", "--top", "5"]);
        match cli.command {
            Commands::Scores(args) => assert_eq!(args.top, Some(5)),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
