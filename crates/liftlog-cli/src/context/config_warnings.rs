use liftlog_config::LiftConfig;

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &LiftConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &LiftConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();
    let mut warnings = Vec::new();

    if !config.remote.is_configured() && has_single_underscore_key(&env_keys, "LIFTLOG_REMOTE") {
        warnings.push(
            "remote config appears default while LIFTLOG_REMOTE_* env vars exist. Use double underscores (example: LIFTLOG_REMOTE__BASE_URL)."
                .to_string(),
        );
    }

    if config.store.path.is_empty() && has_single_underscore_key(&env_keys, "LIFTLOG_STORE") {
        warnings.push(
            "store path appears default while LIFTLOG_STORE_* env vars exist. Use double underscores (example: LIFTLOG_STORE__PATH)."
                .to_string(),
        );
    }

    warnings
}

fn has_single_underscore_key(keys: &[String], section: &str) -> bool {
    keys.iter().any(|key| {
        key.strip_prefix(section)
            .is_some_and(|rest| rest.starts_with('_') && !rest.starts_with("__"))
    })
}

#[cfg(test)]
mod tests {
    use liftlog_config::{LiftConfig, RemoteConfig};

    use super::collect_unconfigured_warnings;

    fn env(keys: &[&str]) -> Vec<(String, String)> {
        keys.iter()
            .map(|key| ((*key).to_string(), "value".to_string()))
            .collect()
    }

    #[test]
    fn warns_for_single_underscore_keys() {
        let warnings = collect_unconfigured_warnings(
            &LiftConfig::default(),
            env(&["LIFTLOG_REMOTE_BASE_URL", "LIFTLOG_STORE_PATH"]),
        );
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn double_underscore_keys_are_fine() {
        let warnings = collect_unconfigured_warnings(
            &LiftConfig::default(),
            env(&["LIFTLOG_REMOTE__BASE_URL", "LIFTLOG_LOG"]),
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn configured_remote_is_not_reported() {
        let config = LiftConfig {
            remote: RemoteConfig {
                base_url: "https://api.example.com".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        let warnings = collect_unconfigured_warnings(&config, env(&["LIFTLOG_REMOTE_TOKEN"]));
        assert!(warnings.is_empty());
    }
}
