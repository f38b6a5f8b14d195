//! Login command implementation.

use anyhow::{Context as _, Result};
use clap::Args;

use hub_client::LoginRequest;

use crate::commands::Context;
use crate::output;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Email address to authenticate with
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long)]
    pub password: String,
}

pub async fn run(ctx: &Context, args: LoginArgs) -> Result<()> {
    if let Some(email) = ctx.auth.current_user().and_then(|user| user.email) {
        output::note(&format!("Replacing existing session for {email}"));
    }

    output::note("Logging in...");

    let session = ctx
        .auth
        .login(&LoginRequest {
            email: args.email,
            password: args.password,
        })
        .await
        .context("Failed to login")?;

    output::success("Logged in successfully");
    println!();
    if let Some(email) = session.email.as_deref() {
        output::field("Email", email);
    }
    if let Some(expires) = session.access_token_expires_at {
        output::field("Access expires", &expires.to_rfc3339());
    }

    Ok(())
}
