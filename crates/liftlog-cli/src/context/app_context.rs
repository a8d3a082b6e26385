use std::sync::Arc;

use anyhow::Context;
use liftlog_config::LiftConfig;
use liftlog_db::service::LogStore;
use liftlog_sync::{HttpUploader, SyncCoordinator, WorkoutLogger};

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub store: Arc<LogStore>,
    pub config: LiftConfig,
}

impl AppContext {
    /// Open the log store at the configured path.
    ///
    /// Another `lift` process may be writing at the same time; writes wait
    /// up to `store.busy_timeout_ms` for its lock.
    pub async fn init(config: LiftConfig) -> anyhow::Result<Self> {
        let path = config.store.resolved_path();
        let store = LogStore::open_path_with(&path, config.store.busy_timeout())
            .await
            .with_context(|| format!("failed to open log store at {}", path.display()))?;
        tracing::debug!(path = %path.display(), "log store opened");

        Ok(Self {
            store: Arc::new(store),
            config,
        })
    }

    /// Write path over the shared store. Works without a remote.
    #[must_use]
    pub fn logger(&self) -> WorkoutLogger {
        WorkoutLogger::new(Arc::clone(&self.store))
    }

    /// Coordinator uploading through the configured remote.
    pub fn coordinator(&self) -> anyhow::Result<Arc<SyncCoordinator<HttpUploader>>> {
        let remote = self
            .config
            .require_remote()
            .context("set remote.base_url (or LIFTLOG_REMOTE__BASE_URL) to sync")?;
        let uploader = HttpUploader::new(remote, self.config.sync.upload_timeout())?;
        Ok(Arc::new(SyncCoordinator::new(
            Arc::clone(&self.store),
            uploader,
            &self.config.sync,
        )))
    }

    #[cfg(test)]
    pub async fn in_memory(config: LiftConfig) -> Self {
        Self {
            store: Arc::new(LogStore::open_local(":memory:").await.unwrap()),
            config,
        }
    }
}

#[cfg(test)]
mod tests {
    use liftlog_config::{LiftConfig, RemoteConfig};
    use tempfile::TempDir;

    use super::AppContext;

    #[tokio::test]
    async fn init_creates_store_under_configured_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("lift.db");
        let mut config = LiftConfig::default();
        config.store.path = path.to_string_lossy().into_owned();

        let ctx = AppContext::init(config).await.unwrap();
        ctx.logger().log_workout("Squat", 4, 8, 60.0).await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn coordinator_requires_remote() {
        let ctx = AppContext::in_memory(LiftConfig::default()).await;
        let err = ctx.coordinator().err().expect("remote is not configured");
        assert!(err.to_string().contains("remote.base_url"));
    }

    #[tokio::test]
    async fn coordinator_builds_with_remote() {
        let config = LiftConfig {
            remote: RemoteConfig {
                base_url: "http://127.0.0.1:9".to_string(),
                auth_token: String::new(),
            },
            ..Default::default()
        };
        let ctx = AppContext::in_memory(config).await;
        assert!(ctx.coordinator().is_ok());
    }
}
