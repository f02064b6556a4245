//! CLI entry point.
//!
//! Wiring happens in [`bootstrap`]; this file only sets up logging, parses
//! arguments and routes commands to handlers.

use clap::{CommandFactory, Parser};
use tokio::runtime::Handle;
use tracing_subscriber::EnvFilter;

use wsldist_cli::{Cli, CliContext, CliError, Commands, bootstrap, handlers, load_settings};

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn dispatch(ctx: &CliContext, command: Commands) -> anyhow::Result<i32> {
    match command {
        Commands::List { background } => handlers::list::execute(ctx, background).await?,
        Commands::Cached => handlers::cached::execute(ctx).await?,
        Commands::Info { name } => handlers::info::execute(ctx, &name).await?,
        Commands::IsWslPath { path } => {
            return Ok(i32::from(!handlers::is_wsl_path::execute(&path)));
        }
        Commands::Settings => handlers::settings::execute(ctx)?,
    }
    Ok(0)
}

fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<CliError>().map_or(1, CliError::exit_code)
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let Some(command) = cli.command else {
        // Printing help only fails on a closed stdout.
        let _ = Cli::command().print_help();
        return;
    };

    let settings = match load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    };

    let ctx = bootstrap(settings, Handle::current());
    let code = match dispatch(&ctx, command).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            exit_code(&e)
        }
    };
    ctx.shutdown();

    if code != 0 {
        std::process::exit(code);
    }
}
