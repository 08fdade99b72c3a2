//! Client for a hosted "invoke LLM" endpoint.
//!
//! The endpoint takes a prompt plus a JSON schema and answers with a JSON
//! object following that schema. It may search the internet first when
//! asked to.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client as HttpClient;
use serde::Serialize;
use serde_json::{Map, Value};
use signal_core::settings::SettingsStore;
use signal_core::{AssetLookupService, LookupRequest, Result as CoreResult};

use crate::error::AiError;

pub const LOOKUP_PROVIDER_ID: &str = "LLM_LOOKUP";

/// Default HTTP request timeout
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// Header carrying the optional endpoint key.
const API_KEY_HEADER: &str = "api_key";

/// Wrapper keys some deployments put around the structured answer.
const ENVELOPE_KEYS: [&str; 3] = ["data", "response", "result"];

/// Configuration for the lookup client.
#[derive(Debug, Clone)]
pub struct LlmLookupConfig {
    pub endpoint: String,
    /// Used when no key source is attached or the source holds no key.
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for LlmLookupConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: None,
            timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }
}

#[derive(Debug, Serialize)]
struct InvokeLlmBody<'a> {
    prompt: &'a str,
    response_json_schema: &'a Value,
    add_context_from_internet: bool,
}

/// HTTP implementation of [`AssetLookupService`].
pub struct LlmLookupClient {
    client: HttpClient,
    config: LlmLookupConfig,
    key_source: Option<Arc<dyn SettingsStore>>,
}

impl LlmLookupClient {
    pub fn new(config: LlmLookupConfig) -> Self {
        let client = HttpClient::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| HttpClient::new());

        Self {
            client,
            config,
            key_source: None,
        }
    }

    /// Read the endpoint key from the user's settings on every call.
    pub fn with_key_source(mut self, settings_store: Arc<dyn SettingsStore>) -> Self {
        self.key_source = Some(settings_store);
        self
    }

    fn api_key(&self) -> Option<String> {
        let saved = self.key_source.as_ref().and_then(|store| {
            store.lookup_api_key().unwrap_or_else(|e| {
                warn!("Could not read lookup key from settings: {}", e);
                None
            })
        });
        saved.or_else(|| {
            self.config
                .api_key
                .as_deref()
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_string)
        })
    }

    /// Send one invocation and return the structured answer.
    ///
    /// An empty body yields an empty object, which callers treat as "found
    /// nothing".
    pub async fn invoke_llm(&self, request: &LookupRequest) -> Result<Value, AiError> {
        let endpoint = self.config.endpoint.trim();
        if endpoint.is_empty() {
            return Err(AiError::NotConfigured);
        }
        if request.prompt.trim().is_empty() {
            return Err(AiError::invalid_input("prompt is empty"));
        }

        let body = InvokeLlmBody {
            prompt: &request.prompt,
            response_json_schema: &request.response_schema,
            add_context_from_internet: request.allow_external_context,
        };

        debug!(
            "Invoking lookup endpoint (internet context: {})",
            request.allow_external_context
        );

        let mut builder = self.client.post(endpoint).json(&body);
        if let Some(key) = self.api_key() {
            builder = builder.header(API_KEY_HEADER, key);
        }

        let response = builder.send().await.map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Lookup endpoint answered HTTP {}", status);
            return Err(AiError::provider(format!("HTTP {}", status)));
        }

        let text = response.text().await.map_err(|e| self.transport_error(e))?;
        parse_lookup_body(&text)
    }

    fn transport_error(&self, error: reqwest::Error) -> AiError {
        if error.is_timeout() {
            AiError::Timeout(self.config.timeout.as_secs())
        } else {
            AiError::Network(error.without_url().to_string())
        }
    }
}

/// Decode the endpoint body into the structured answer.
///
/// Accepts the object itself, the object wrapped in a `data`/`response`/
/// `result` envelope, or the object serialized as a JSON string.
pub fn parse_lookup_body(text: &str) -> Result<Value, AiError> {
    if text.trim().is_empty() {
        return Ok(Value::Object(Map::new()));
    }

    let value: Value = serde_json::from_str(text)
        .map_err(|e| AiError::InvalidResponse(format!("body is not JSON: {}", e)))?;

    Ok(unwrap_answer(value))
}

fn unwrap_answer(value: Value) -> Value {
    match value {
        Value::String(inner) => match serde_json::from_str::<Value>(&inner) {
            Ok(parsed @ Value::Object(_)) => unwrap_answer(parsed),
            _ => Value::String(inner),
        },
        Value::Object(mut map) if map.len() == 1 => {
            let key = ENVELOPE_KEYS.iter().find(|k| map.contains_key(**k));
            match key.and_then(|k| map.remove(*k)) {
                Some(inner @ (Value::Object(_) | Value::String(_))) => unwrap_answer(inner),
                Some(other) => other,
                None => Value::Object(map),
            }
        }
        other => other,
    }
}

#[async_trait]
impl AssetLookupService for LlmLookupClient {
    fn id(&self) -> &'static str {
        LOOKUP_PROVIDER_ID
    }

    async fn invoke(&self, request: &LookupRequest) -> CoreResult<Value> {
        Ok(self.invoke_llm(request).await?)
    }
}
