//! Organization list command implementation.

use anyhow::{Context as _, Result};

use hub_client::list_organizations;

use crate::commands::Context;
use crate::output;

pub async fn run(ctx: &Context) -> Result<()> {
    let user_id = ctx.require_user_id()?;

    let organizations = list_organizations(&ctx.auth, &user_id)
        .await
        .context("Failed to load organizations")?;

    if organizations.is_empty() {
        output::note("No organizations yet.");
        return Ok(());
    }

    for organization in &organizations {
        output::field(
            organization.name.as_deref().unwrap_or("(unnamed)"),
            &organization.organization_id,
        );
    }

    Ok(())
}
