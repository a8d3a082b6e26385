use liftlog_core::enums::TimeOrder;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::HistoryArgs;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

/// Handle `lift history`.
pub async fn handle(
    args: &HistoryArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let limit = effective_limit(args.count, flags.limit, ctx.config.general.history_limit);
    let order = if args.ascending {
        TimeOrder::Ascending
    } else {
        TimeOrder::Descending
    };

    let entries = ctx
        .store
        .entries_ordered_by_time(order)
        .await?
        .collect(Some(limit))
        .await?;
    output(&entries, flags.format)
}
