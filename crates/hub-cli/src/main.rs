//! hubctl - command-line client for the Projects Hub API.
//!
//! This is a thin front-end over the `hub-client` library for driving
//! signup, sessions, organizations, and invitations from a terminal.

mod cli;
mod commands;
mod output;
mod store;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use commands::Context;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.json_logs);

    let ctx = Context::new(&cli.api_url)?;

    match cli.command {
        Commands::Signup(args) => commands::signup::run(&ctx, args).await,
        Commands::Login(args) => commands::login::run(&ctx, args).await,
        Commands::Logout => commands::logout::run(&ctx).await,
        Commands::Whoami => commands::whoami::run(&ctx).await,
        Commands::Refresh => commands::refresh::run(&ctx).await,
        Commands::Test => commands::test::run(&ctx).await,
        Commands::Org(cmd) => commands::org::handle(&ctx, cmd).await,
        Commands::Invitation(cmd) => commands::invitation::handle(&ctx, cmd).await,
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false))
            .init();
    }
}
