//! Signup command implementation.

use anyhow::{Context as _, Result};
use clap::Args;

use hub_client::SignupRequest;

use crate::commands::Context;
use crate::output;

#[derive(Args, Debug)]
pub struct SignupArgs {
    /// First name for the new account
    #[arg(long)]
    pub first_name: String,

    /// Last name for the new account
    #[arg(long)]
    pub last_name: String,

    /// Email address to register
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long)]
    pub password: String,
}

pub async fn run(ctx: &Context, args: SignupArgs) -> Result<()> {
    output::note("Creating account...");

    let response = ctx
        .auth
        .signup(&SignupRequest {
            first_name: args.first_name,
            last_name: args.last_name,
            email: args.email,
            password: args.password,
        })
        .await
        .context("Signup failed")?;

    output::success(
        response
            .message
            .as_deref()
            .unwrap_or("Account created successfully."),
    );
    output::note("Log in with 'hubctl login'.");

    Ok(())
}
