// Entrypoint for the CLI application.
// - Keeps `main` small: parse arguments, build the dependency bundle and
//   hand it to the dispatcher.
// - Every error is fatal: print it and exit with status 1.

use anyhow::Context;
use clap::Parser;
use goshort::{
    cli::{self, Cli},
    commands::App,
    config::Config,
    error::GoshortError,
    ui::{self, TerminalPrompt},
};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ui::error(&format!("{:#}", e));
            if e
                .downcast_ref::<GoshortError>()
                .is_some_and(GoshortError::needs_login)
            {
                eprintln!("Please run `goshort login [server_url]` to sign in again.");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::for_current_user(cli.default_server.clone())?;
    let app = App::new(config, TerminalPrompt).context("Failed to set up GoShort! client")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    cli::dispatch(cli, &app, &mut out)?;
    Ok(())
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(Config::log_filter(verbose)));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .with(filter)
        .init();
}
