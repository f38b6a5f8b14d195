//! Organization members command implementation.

use anyhow::{Context as _, Result};
use clap::Args;

use hub_client::list_members;

use crate::commands::Context;
use crate::output;

#[derive(Args, Debug)]
pub struct MembersArgs {
    /// Organization id
    #[arg(long)]
    pub organization_id: String,
}

pub async fn run(ctx: &Context, args: MembersArgs) -> Result<()> {
    let user_id = ctx.require_user_id()?;

    let members = list_members(&ctx.auth, &args.organization_id, &user_id)
        .await
        .context("Failed to load members")?;

    if members.is_empty() {
        output::note("No members yet.");
        return Ok(());
    }

    for member in &members {
        output::field(
            member.email.as_deref().unwrap_or("(no email)"),
            member.role.as_deref().unwrap_or("-"),
        );
    }

    Ok(())
}
