use crate::commands::{self, App};
use crate::config::DEFAULT_SERVER_URL;
use crate::error::{GoshortError, Result};
use crate::ui::CredentialPrompt;
use clap::{Args, Parser, Subcommand};
use std::io::Write;

/// GoShort! CLI
#[derive(Parser, Debug)]
#[command(
    name = "goshort",
    version,
    about = "GoShort! CLI",
    long_about = "GoShort! CLI client is here to help you quickly shorten URLs from your terminal!",
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// URL to shorten with the stored session
    pub url: Option<String>,

    /// Server used by `login` when no server URL is given
    #[arg(
        long,
        global = true,
        env = "GOSHORT_DEFAULT_SERVER",
        default_value = DEFAULT_SERVER_URL
    )]
    pub default_server: String,

    /// Show request-level debug logs
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Login to the given GoShort! server
    Login(LoginArgs),

    /// List all shortlinks
    List,
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Server to log in to (defaults to --default-server)
    pub server_url: Option<String>,
}

/// Route the parsed command line to its handler.
pub fn dispatch<P: CredentialPrompt>(cli: Cli, app: &App<P>, out: &mut dyn Write) -> Result<()> {
    match cli.command {
        Some(Command::Login(args)) => commands::login(app, args.server_url).map(drop),
        Some(Command::List) => commands::list(app, out).map(drop),
        None => match cli.url {
            Some(url) => commands::shorten(app, &url, out).map(drop),
            None => Err(GoshortError::Usage("No URL provided!".into())),
        },
    }
}
