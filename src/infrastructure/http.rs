use std::time::Duration;

use crate::domain::DomainError;
use crate::infrastructure::config::HttpConfig;

/// Shared client for every outbound HTTP call. Only connecting is bounded;
/// streaming bodies may stay open as long as upstream keeps them open.
pub fn build_client(config: &HttpConfig) -> Result<reqwest::Client, DomainError> {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .user_agent(concat!("recipe-chat/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| DomainError::config(e.to_string()))
}

pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
