use crate::cli::GlobalFlags;
use crate::cli::root_commands::EventsArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `lift events <id>`.
pub async fn handle(
    args: &EventsArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let events = ctx.store.sync_history(&args.id).await?;
    output(&events, flags.format)
}
