//! Whoami command implementation.

use anyhow::Result;

use crate::commands::Context;
use crate::output;

pub async fn run(ctx: &Context) -> Result<()> {
    let user = ctx.require_user()?;

    output::field("User id", user.user_id.as_deref().unwrap_or("-"));
    output::field("Email", user.email.as_deref().unwrap_or("-"));
    output::field("First name", user.first_name.as_deref().unwrap_or("-"));
    output::field("Last name", user.last_name.as_deref().unwrap_or("-"));
    output::field("Full name", user.full_name.as_deref().unwrap_or("-"));
    output::field("Role", user.role.as_deref().unwrap_or("-"));
    if let Some(expires) = user.access_token_expires_at {
        output::field("Access expires", &expires.to_rfc3339());
    }
    if let Some(expires) = user.refresh_token_expires_at {
        output::field("Refresh expires", &expires.to_rfc3339());
    }

    Ok(())
}
