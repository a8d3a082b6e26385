use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
pub struct RetryResponse {
    pub requeued: u64,
}

/// Handle `lift retry`. Works offline: it only changes local state.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let requeued = ctx.store.retry_failed().await?;
    output(&RetryResponse { requeued }, flags.format)
}
