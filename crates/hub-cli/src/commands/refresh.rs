//! Refresh command implementation.

use anyhow::{Context as _, Result};

use crate::commands::Context;
use crate::output;

pub async fn run(ctx: &Context) -> Result<()> {
    output::note("Refreshing session...");

    let session = ctx
        .auth
        .refresh_tokens()
        .await
        .context("Failed to refresh session")?;

    output::success("Session refreshed successfully");
    if let Some(expires) = session.access_token_expires_at {
        output::field("Access expires", &expires.to_rfc3339());
    }

    Ok(())
}
