use crate::interface_adapters::errors::AgentError;
use std::env;
use url::Url;

// Runtime constants for the agent process.

pub const DEFAULT_SERVER_URL: &str = "ws://127.0.0.1:7777";
pub const DEFAULT_AGENT_NAME: &str = "test";
// Used when RUST_LOG is unset or unparsable.
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

impl LogFormat {
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Compact,
        }
    }
}

pub fn log_format() -> LogFormat {
    LogFormat::parse(env::var("LOG_FORMAT").ok().as_deref())
}

pub fn server_url() -> Result<String, AgentError> {
    let raw = env::var("AGENT_SERVER_URL").unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string());
    validate_server_url(&raw)
}

pub fn agent_name() -> String {
    env::var("AGENT_NAME")
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_AGENT_NAME.to_string())
}

/// Accepts plain `ws://` endpoints only; the transport is built without TLS.
pub fn validate_server_url(raw: &str) -> Result<String, AgentError> {
    let parsed = Url::parse(raw)
        .map_err(|e| AgentError::Config(format!("AGENT_SERVER_URL {raw:?} is not a url: {e}")))?;

    if parsed.scheme() != "ws" {
        return Err(AgentError::Config(format!(
            "AGENT_SERVER_URL must use ws://, got {}://",
            parsed.scheme()
        )));
    }
    if parsed.host_str().is_none() {
        return Err(AgentError::Config(format!(
            "AGENT_SERVER_URL {raw:?} has no host"
        )));
    }

    Ok(raw.to_string())
}
