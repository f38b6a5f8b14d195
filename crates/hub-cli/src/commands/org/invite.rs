//! Organization invite command implementation.

use anyhow::{Context as _, Result};
use clap::Args;

use hub_client::{InviteMemberRequest, MemberRole, invite_member};

use crate::commands::Context;
use crate::output;

#[derive(Args, Debug)]
pub struct InviteArgs {
    /// Organization id
    #[arg(long)]
    pub organization_id: String,

    /// Email address to invite
    #[arg(long)]
    pub email: String,

    /// Grant the manager role instead of employee
    #[arg(long)]
    pub manager: bool,
}

pub async fn run(ctx: &Context, args: InviteArgs) -> Result<()> {
    let user_id = ctx.require_user_id()?;

    let role = if args.manager {
        MemberRole::Manager
    } else {
        MemberRole::Employee
    };

    output::note("Sending invitation...");

    let invitation = invite_member(
        &ctx.api,
        &args.organization_id,
        &InviteMemberRequest {
            invited_by_user_id: user_id,
            email: args.email,
            role,
        },
    )
    .await
    .context("Failed to send invitation")?;

    output::success(&format!(
        "Invitation sent to {} as {}",
        invitation.email, invitation.role
    ));
    if let Some(link) = invitation.invitation_link.as_deref() {
        output::field("Link", link);
    }

    Ok(())
}
