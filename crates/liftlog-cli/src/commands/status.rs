use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub pending: u64,
    pub failed: u64,
    pub synced: u64,
    pub total: u64,
    pub sync_needed: bool,
    pub remote_configured: bool,
}

/// Handle `lift status`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&collect(ctx).await?, flags.format)
}

async fn collect(ctx: &AppContext) -> anyhow::Result<StatusResponse> {
    let counts = ctx.store.counts().await?;
    Ok(StatusResponse {
        pending: counts.pending,
        failed: counts.failed,
        synced: counts.synced,
        total: counts.total(),
        sync_needed: counts.pending > 0,
        remote_configured: ctx.config.remote.is_configured(),
    })
}
