//! Main CLI parser and top-level argument handling.

use clap::Parser;

use crate::commands::Commands;

/// Inspect installed WSL distributions.
#[derive(Parser)]
#[command(name = "wsldist")]
#[command(about = "List and inspect installed WSL distributions")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_args() {
        let cli = Cli::parse_from(["wsldist", "--verbose", "list", "--async"]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Some(Commands::List { background: true })));
    }

    #[test]
    fn test_is_wsl_path_takes_positional() {
        let cli = Cli::parse_from(["wsldist", "is-wsl-path", r"\\wsl$\Ubuntu\home"]);
        match cli.command {
            Some(Commands::IsWslPath { path }) => assert_eq!(path, r"\\wsl$\Ubuntu\home"),
            _ => panic!("expected is-wsl-path"),
        }
    }
}
