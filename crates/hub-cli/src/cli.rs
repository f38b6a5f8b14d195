//! CLI argument definitions.

use clap::{Parser, Subcommand};

use hub_core::api_url::{API_URL_ENV, DEFAULT_API_URL};

use crate::commands::invitation::InvitationCommand;
use crate::commands::login::LoginArgs;
use crate::commands::org::OrgCommand;
use crate::commands::signup::SignupArgs;

/// Projects Hub command-line client.
#[derive(Parser, Debug)]
#[command(name = "hubctl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Base URL of the Projects Hub API
    #[arg(long, global = true, env = API_URL_ENV, default_value = DEFAULT_API_URL)]
    pub api_url: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new account
    Signup(SignupArgs),

    /// Log in and persist the session
    Login(LoginArgs),

    /// Drop the persisted session
    Logout,

    /// Display the logged-in user
    Whoami,

    /// Exchange the refresh token for new tokens
    Refresh,

    /// Call the protected test endpoint
    Test,

    /// Organization operations
    #[command(subcommand)]
    Org(OrgCommand),

    /// Invitation operations
    #[command(subcommand)]
    Invitation(InvitationCommand),
}
