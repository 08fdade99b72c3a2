use std::{net::SocketAddr, time::Duration};

use signal_market_data::provider::alpha_vantage::BASE_URL as ALPHA_VANTAGE_URL;

const DEFAULT_PORT: u16 = 8088;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

pub struct Config {
    pub listen_addr: SocketAddr,
    /// Timeout applied to every outbound vendor and lookup call.
    pub http_timeout: Duration,
    /// Timeout for a whole inbound request; covers both tiers.
    pub request_timeout: Duration,
    pub alpha_vantage_url: String,
    /// Seed for the settings store.
    pub alpha_vantage_key: Option<String>,
    /// Lookup endpoint; empty means the lookup tier always fails.
    pub llm_endpoint: String,
    pub llm_api_key: Option<String>,
    pub cors_allow: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let listen_addr = env_var("SIGNAL_LISTEN_ADDR")
            .and_then(|raw| match raw.parse::<SocketAddr>() {
                Ok(addr) => Some(addr),
                Err(e) => {
                    tracing::warn!("Invalid SIGNAL_LISTEN_ADDR '{}': {}, using default", raw, e);
                    None
                }
            })
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)));

        let timeout_secs = env_var("SIGNAL_HTTP_TIMEOUT_SECS")
            .and_then(|raw| match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Some(secs),
                _ => {
                    tracing::warn!(
                        "Invalid SIGNAL_HTTP_TIMEOUT_SECS '{}', using {}s",
                        raw,
                        DEFAULT_HTTP_TIMEOUT_SECS
                    );
                    None
                }
            })
            .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS);
        let http_timeout = Duration::from_secs(timeout_secs);

        let cors_allow = env_var("SIGNAL_CORS_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self {
            listen_addr,
            http_timeout,
            // one call per tier plus slack
            request_timeout: http_timeout * 2 + Duration::from_secs(5),
            alpha_vantage_url: env_var("SIGNAL_ALPHA_VANTAGE_URL")
                .unwrap_or_else(|| ALPHA_VANTAGE_URL.to_string()),
            alpha_vantage_key: env_var("SIGNAL_ALPHA_VANTAGE_KEY"),
            llm_endpoint: env_var("SIGNAL_LLM_ENDPOINT").unwrap_or_default(),
            llm_api_key: env_var("SIGNAL_LLM_API_KEY"),
            cors_allow,
        }
    }
}

/// Non-empty, trimmed environment variable.
fn env_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
