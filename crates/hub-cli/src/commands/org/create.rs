//! Organization create command implementation.

use anyhow::{Context as _, Result};
use clap::{Args, ValueEnum};

use hub_client::{CreateOrganizationRequest, PLAN_OPTIONS, create_organization};

use crate::commands::Context;
use crate::output;

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Organization name
    #[arg(long)]
    pub name: String,

    /// Subscription plan
    #[arg(long, value_enum, default_value_t = Plan::Free)]
    pub plan: Plan,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Plan {
    Free,
    Premium,
    Pro,
}

impl Plan {
    fn code(self) -> &'static str {
        match self {
            Plan::Free => "FREE",
            Plan::Premium => "PREMIUM",
            Plan::Pro => "PRO",
        }
    }
}

pub async fn run(ctx: &Context, args: CreateArgs) -> Result<()> {
    let user_id = ctx.require_user_id()?;

    let plan = PLAN_OPTIONS
        .iter()
        .find(|option| option.code == args.plan.code())
        .context("Unknown plan")?;

    output::note("Creating organization...");

    let payload = create_organization(
        &ctx.api,
        &CreateOrganizationRequest {
            name: args.name,
            plan_id: plan.id.to_string(),
            created_by_user_id: user_id,
        },
    )
    .await
    .context("Failed to create organization")?;

    output::success("Organization created successfully");
    output::json_pretty(&payload)?;

    Ok(())
}
