//! Invitation accept command implementation.

use anyhow::{Context as _, Result};
use clap::Args;

use hub_client::accept_invitation;

use crate::commands::Context;
use crate::output;

#[derive(Args, Debug)]
pub struct AcceptArgs {
    /// Invitation token from the link
    #[arg(long)]
    pub token: String,
}

pub async fn run(ctx: &Context, args: AcceptArgs) -> Result<()> {
    output::note("Accepting invitation...");

    let result = accept_invitation(&ctx.api, &args.token)
        .await
        .context("Failed to accept invitation")?;

    output::success(
        result
            .message
            .as_deref()
            .unwrap_or("Invitation accepted successfully."),
    );

    Ok(())
}
