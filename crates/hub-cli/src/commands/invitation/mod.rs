//! Invitation subcommand implementations.

mod accept;
mod preview;

use anyhow::Result;
use clap::Subcommand;

use crate::commands::Context;

#[derive(Subcommand, Debug)]
pub enum InvitationCommand {
    /// Show which organization an invitation link joins
    Preview(preview::PreviewArgs),

    /// Accept an invitation
    Accept(accept::AcceptArgs),
}

pub async fn handle(ctx: &Context, cmd: InvitationCommand) -> Result<()> {
    match cmd {
        InvitationCommand::Preview(args) => preview::run(ctx, args).await,
        InvitationCommand::Accept(args) => accept::run(ctx, args).await,
    }
}
