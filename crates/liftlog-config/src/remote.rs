//! Remote document store configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RemoteConfig {
    /// Base URL of the remote entry endpoint (e.g., `https://api.example.com/v1`).
    #[serde(default)]
    pub base_url: String,

    /// Bearer token sent with every upload. Optional.
    #[serde(default)]
    pub auth_token: String,
}

impl RemoteConfig {
    /// Check if the remote has the minimum required fields for uploads.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.base_url.is_empty()
    }

    /// Bearer token, if one is configured.
    #[must_use]
    pub fn bearer_token(&self) -> Option<&str> {
        (!self.auth_token.is_empty()).then_some(self.auth_token.as_str())
    }

    /// Base URL without a trailing slash.
    #[must_use]
    pub fn trimmed_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconfigured_by_default() {
        let config = RemoteConfig::default();
        assert!(!config.is_configured());
        assert!(config.bearer_token().is_none());
    }

    #[test]
    fn trims_trailing_slash() {
        let config = RemoteConfig {
            base_url: "https://api.example.com/v1/".into(),
            auth_token: "tok".into(),
        };
        assert_eq!(config.trimmed_base_url(), "https://api.example.com/v1");
        assert_eq!(config.bearer_token(), Some("tok"));
    }
}
