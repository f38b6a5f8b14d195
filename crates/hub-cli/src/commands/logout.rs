//! Logout command implementation.

use anyhow::Result;

use crate::commands::Context;
use crate::output;

pub async fn run(ctx: &Context) -> Result<()> {
    ctx.auth.logout();
    output::success("Logged out");
    Ok(())
}
