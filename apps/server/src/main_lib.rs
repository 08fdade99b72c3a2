use std::sync::Arc;

use anyhow::Context;
use signal_ai::{LlmLookupClient, LlmLookupConfig};
use signal_core::{
    settings::{ApiKeys, InMemorySettingsStore, Settings, SettingsStore},
    AssetLookupService, AssetResolver,
};
use signal_market_data::{AlphaVantageProvider, MarketDataProvider};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

pub struct AppState {
    pub resolver: Arc<AssetResolver>,
    pub settings_store: Arc<dyn SettingsStore>,
}

pub fn init_tracing() {
    let log_format = std::env::var("SIGNAL_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    reqwest::Url::parse(&config.alpha_vantage_url)
        .with_context(|| format!("Invalid SIGNAL_ALPHA_VANTAGE_URL '{}'", config.alpha_vantage_url))?;

    if config.llm_endpoint.is_empty() {
        tracing::warn!("SIGNAL_LLM_ENDPOINT is not set; lookup fallback will find nothing");
    } else {
        reqwest::Url::parse(&config.llm_endpoint)
            .with_context(|| format!("Invalid SIGNAL_LLM_ENDPOINT '{}'", config.llm_endpoint))?;
    }

    let vendor: Arc<dyn MarketDataProvider> = Arc::new(AlphaVantageProvider::with_options(
        config.alpha_vantage_url.clone(),
        config.http_timeout,
    ));
    let settings_store = seeded_settings_store(config);
    let lookup: Arc<dyn AssetLookupService> = Arc::new(
        LlmLookupClient::new(LlmLookupConfig {
            endpoint: config.llm_endpoint.clone(),
            api_key: None,
            timeout: config.http_timeout,
        })
        .with_key_source(settings_store.clone()),
    );

    tracing::info!(
        "Resolver ready: vendor {} (timeout {}s), lookup {}",
        vendor.id(),
        config.http_timeout.as_secs(),
        lookup.id()
    );

    Ok(assemble_state(settings_store, vendor, lookup))
}

/// Assemble the state from explicit collaborators.
pub fn build_state_with(
    config: &Config,
    vendor: Arc<dyn MarketDataProvider>,
    lookup: Arc<dyn AssetLookupService>,
) -> Arc<AppState> {
    assemble_state(seeded_settings_store(config), vendor, lookup)
}

/// Settings store holding the keys given in the environment.
fn seeded_settings_store(config: &Config) -> Arc<dyn SettingsStore> {
    Arc::new(InMemorySettingsStore::new(Settings {
        api_keys: ApiKeys {
            alpha_vantage: config.alpha_vantage_key.clone(),
            huggingface: config.llm_api_key.clone(),
        },
    }))
}

fn assemble_state(
    settings_store: Arc<dyn SettingsStore>,
    vendor: Arc<dyn MarketDataProvider>,
    lookup: Arc<dyn AssetLookupService>,
) -> Arc<AppState> {
    Arc::new(AppState {
        resolver: Arc::new(AssetResolver::new(vendor, lookup)),
        settings_store,
    })
}
