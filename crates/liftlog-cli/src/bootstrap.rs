use liftlog_config::LiftConfig;

use crate::cli::GlobalFlags;

/// Load layered configuration (`.env`, TOML files, `LIFTLOG_*`) and apply
/// command-line overrides.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<LiftConfig> {
    let config = LiftConfig::load_with_dotenv()?;
    Ok(apply_flag_overrides(config, flags))
}

fn apply_flag_overrides(mut config: LiftConfig, flags: &GlobalFlags) -> LiftConfig {
    if let Some(db) = &flags.db {
        config.store.path = db.to_string_lossy().into_owned();
    }
    config
}
