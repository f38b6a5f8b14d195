//! Organization subcommand implementations.

mod create;
mod invite;
mod list;
mod members;

use anyhow::Result;
use clap::Subcommand;

use crate::commands::Context;

#[derive(Subcommand, Debug)]
pub enum OrgCommand {
    /// Create an organization
    Create(create::CreateArgs),

    /// List organizations you belong to
    List,

    /// List members of an organization
    Members(members::MembersArgs),

    /// Invite a member by email
    Invite(invite::InviteArgs),
}

pub async fn handle(ctx: &Context, cmd: OrgCommand) -> Result<()> {
    match cmd {
        OrgCommand::Create(args) => create::run(ctx, args).await,
        OrgCommand::List => list::run(ctx).await,
        OrgCommand::Members(args) => members::run(ctx, args).await,
        OrgCommand::Invite(args) => invite::run(ctx, args).await,
    }
}
