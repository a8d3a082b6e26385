use std::sync::Arc;
use std::time::Duration;

use liftlog_sync::{BackgroundSync, LogViewModel, LogViewState};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::WatchArgs;
use crate::context::AppContext;
use crate::output::output;

/// One line of `lift watch` output, printed when it changes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WatchSnapshot {
    pub entries: usize,
    pub unsynced: usize,
    pub sync_needed: bool,
    pub last_error: Option<String>,
}

impl From<&LogViewState> for WatchSnapshot {
    fn from(state: &LogViewState) -> Self {
        Self {
            entries: state.entries.len(),
            unsynced: state.entries.iter().filter(|e| e.needs_sync()).count(),
            sync_needed: state.sync_needed,
            last_error: state.last_error.clone(),
        }
    }
}

/// Handle `lift watch`: run the background loop until Ctrl-C.
pub async fn handle(args: &WatchArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let coordinator = ctx.coordinator()?;
    let mut background = BackgroundSync::new(Arc::clone(&coordinator), &ctx.config.sync);
    if let Some(secs) = args.interval.filter(|secs| *secs > 0) {
        background = background.with_interval(Duration::from_secs(secs));
    }

    let view = LogViewModel::new(coordinator).await?;
    let mut states = view.subscribe();
    let token = CancellationToken::new();

    let runner = {
        let token = token.clone();
        tokio::spawn(async move { background.run(&token).await })
    };

    let mut last = WatchSnapshot::from(&*states.borrow_and_update());
    output(&last, flags.format)?;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("interrupt received, stopping background sync");
                token.cancel();
                break;
            }
            changed = states.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = WatchSnapshot::from(&*states.borrow_and_update());
                if snapshot != last {
                    output(&snapshot, flags.format)?;
                    last = snapshot;
                }
            }
        }
    }

    let passes = runner.await?;
    tracing::info!(passes, "watch stopped");
    Ok(())
}
