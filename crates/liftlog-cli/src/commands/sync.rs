use liftlog_sync::{LogViewModel, SyncReport};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
pub struct SyncResponse {
    #[serde(flatten)]
    pub report: SyncReport,
    pub sync_needed: bool,
}

/// Handle `lift sync`: one pass over the pending entries.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let view = LogViewModel::new(ctx.coordinator()?).await?;
    let report = view.trigger_sync().await?;
    output(
        &SyncResponse {
            report,
            sync_needed: view.state().sync_needed,
        },
        flags.format,
    )
}
