//! Invitation preview command implementation.

use anyhow::{Context as _, Result};
use clap::Args;

use hub_client::preview_invitation;

use crate::commands::Context;
use crate::output;

#[derive(Args, Debug)]
pub struct PreviewArgs {
    /// Invitation token from the link
    #[arg(long)]
    pub token: String,
}

pub async fn run(ctx: &Context, args: PreviewArgs) -> Result<()> {
    let preview = preview_invitation(&ctx.api, &args.token)
        .await
        .context("Failed to load invitation")?;

    output::field(
        "Organization",
        preview.organization_name.as_deref().unwrap_or("Unavailable"),
    );

    Ok(())
}
