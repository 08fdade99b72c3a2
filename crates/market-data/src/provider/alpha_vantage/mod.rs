//! Alpha Vantage quote vendor.
//!
//! This module provides latest quotes from the Alpha Vantage API:
//! - Stocks via the GLOBAL_QUOTE endpoint
//! - Crypto and FX rates via the CURRENCY_EXCHANGE_RATE endpoint
//!
//! Note: Alpha Vantage free tier is limited to 5 API calls per minute and
//! reports quota exhaustion inside a 200 response ("Note"/"Information").

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::errors::MarketDataError;
use crate::models::{AssetClass, AssetQuote, QuoteSource, VendorRequest};
use crate::provider::{MarketDataProvider, ProviderCapabilities};
use crate::validation::parse_price;

pub const BASE_URL: &str = "https://www.alphavantage.co/query";
pub const PROVIDER_ID: &str = "ALPHA_VANTAGE";

/// Display name for a GLOBAL_QUOTE without an opening price.
pub const UNKNOWN_STOCK_NAME: &str = "Unknown Stock";

/// Default HTTP request timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Alpha Vantage quote vendor.
///
/// Supports stocks, cryptocurrencies and FX pairs. Commodities are not
/// served by the endpoints used here.
pub struct AlphaVantageProvider {
    client: Client,
    base_url: String,
}

// ============================================================================
// Response structures for Alpha Vantage API
// ============================================================================

/// GLOBAL_QUOTE response for stocks
#[derive(Debug, Deserialize)]
struct GlobalQuoteResponse {
    #[serde(rename = "Global Quote")]
    global_quote: Option<GlobalQuote>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GlobalQuote {
    #[serde(rename = "01. symbol")]
    symbol: Option<String>,
    #[serde(rename = "02. open")]
    open: Option<String>,
    #[serde(rename = "05. price")]
    price: Option<String>,
}

/// CURRENCY_EXCHANGE_RATE response for crypto and forex
#[derive(Debug, Deserialize)]
struct ExchangeRateResponse {
    #[serde(rename = "Realtime Currency Exchange Rate")]
    rate: Option<ExchangeRate>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ExchangeRate {
    #[serde(rename = "1. From_Currency Code")]
    from_code: Option<String>,
    #[serde(rename = "2. From_Currency Name")]
    from_name: Option<String>,
    #[serde(rename = "3. To_Currency Code")]
    to_code: Option<String>,
    #[serde(rename = "5. Exchange Rate")]
    exchange_rate: Option<String>,
}

// ============================================================================
// AlphaVantageProvider implementation
// ============================================================================

impl AlphaVantageProvider {
    /// Create a provider against the public endpoint with the default timeout.
    pub fn new() -> Self {
        Self::with_options(BASE_URL, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Create a provider with a custom endpoint and per-request timeout.
    pub fn with_options(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Query URL for `params` plus the key.
    fn build_url(
        &self,
        params: &[(&'static str, String)],
        api_key: &str,
    ) -> Result<reqwest::Url, MarketDataError> {
        let mut all_params: Vec<(&str, &str)> =
            params.iter().map(|(k, v)| (*k, v.as_str())).collect();
        all_params.push(("apikey", api_key));

        reqwest::Url::parse_with_params(&self.base_url, &all_params).map_err(|e| {
            MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to build URL: {}", e),
            }
        })
    }

    /// Make a request to the Alpha Vantage API.
    async fn fetch(
        &self,
        params: &[(&'static str, String)],
        api_key: &str,
    ) -> Result<String, MarketDataError> {
        let url = self.build_url(params, api_key)?;

        // Redacted copy for logging.
        if let Ok(redacted) = self.build_url(params, "***") {
            debug!("Alpha Vantage request: {}", redacted);
        }

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                MarketDataError::Timeout {
                    provider: PROVIDER_ID.to_string(),
                }
            } else {
                MarketDataError::Network(e.without_url())
            }
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }

        if !status.is_success() {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {}", status),
            });
        }

        response.text().await.map_err(|e| {
            if e.is_timeout() {
                MarketDataError::Timeout {
                    provider: PROVIDER_ID.to_string(),
                }
            } else {
                MarketDataError::Network(e.without_url())
            }
        })
    }

    /// Decode a body into a non-empty JSON object.
    ///
    /// An empty body or `{}` is how Alpha Vantage answers some unknown
    /// symbols, so both are reported as `EmptyResponse`.
    fn decode_object(text: &str) -> Result<serde_json::Value, MarketDataError> {
        if text.trim().is_empty() {
            return Err(MarketDataError::EmptyResponse {
                provider: PROVIDER_ID.to_string(),
            });
        }

        let value: serde_json::Value =
            serde_json::from_str(text).map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to parse response: {}", e),
            })?;

        match value.as_object() {
            Some(object) if object.is_empty() => Err(MarketDataError::EmptyResponse {
                provider: PROVIDER_ID.to_string(),
            }),
            Some(_) => Ok(value),
            None => Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: "Failed to parse response: expected a JSON object".to_string(),
            }),
        }
    }

    fn deserialize<T: serde::de::DeserializeOwned>(
        value: serde_json::Value,
    ) -> Result<T, MarketDataError> {
        serde_json::from_value(value).map_err(|e| MarketDataError::ProviderError {
            provider: PROVIDER_ID.to_string(),
            message: format!("Failed to parse response: {}", e),
        })
    }

    /// Check for API-level errors in the response.
    fn check_api_error(
        error_message: &Option<String>,
        note: &Option<String>,
        information: &Option<String>,
    ) -> Result<(), MarketDataError> {
        if let Some(ref msg) = error_message {
            if msg.contains("Invalid API call") || msg.contains("not found") {
                return Err(MarketDataError::SymbolNotFound(msg.clone()));
            }
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: msg.clone(),
            });
        }

        // "Note" is only sent for quota notices; any note means no data.
        if let Some(ref msg) = note {
            warn!("Alpha Vantage note: {}", msg);
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }

        if let Some(ref msg) = information {
            if msg.contains("API call frequency")
                || msg.contains("rate limit")
                || msg.contains("requests per day")
            {
                return Err(MarketDataError::RateLimited {
                    provider: PROVIDER_ID.to_string(),
                });
            }
            warn!("Alpha Vantage info: {}", msg);
        }

        Ok(())
    }

    /// Interpret a GLOBAL_QUOTE body.
    fn parse_global_quote(text: &str, requested_symbol: &str) -> Result<AssetQuote, MarketDataError> {
        let response: GlobalQuoteResponse = Self::deserialize(Self::decode_object(text)?)?;

        Self::check_api_error(
            &response.error_message,
            &response.note,
            &response.information,
        )?;

        let quote = response.global_quote.ok_or_else(|| {
            MarketDataError::validation(format!("no Global Quote for {}", requested_symbol))
        })?;

        let price = quote
            .price
            .as_deref()
            .ok_or_else(|| MarketDataError::validation(format!("no price for {}", requested_symbol)))
            .and_then(parse_price)?;

        let symbol = quote
            .symbol
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(requested_symbol);

        // GLOBAL_QUOTE carries no company name; a quote without an open is
        // labelled as unknown.
        let display_name = match quote.open.as_deref().map(str::trim) {
            Some(open) if !open.is_empty() => symbol,
            _ => UNKNOWN_STOCK_NAME,
        };

        AssetQuote::new(
            symbol,
            display_name,
            price,
            AssetClass::Stock,
            QuoteSource::vendor(PROVIDER_ID),
        )
    }

    /// Interpret a CURRENCY_EXCHANGE_RATE body.
    fn parse_exchange_rate(
        text: &str,
        asset_class: AssetClass,
        requested: &str,
    ) -> Result<AssetQuote, MarketDataError> {
        let response: ExchangeRateResponse = Self::deserialize(Self::decode_object(text)?)?;

        Self::check_api_error(
            &response.error_message,
            &response.note,
            &response.information,
        )?;

        let rate = response.rate.ok_or_else(|| {
            MarketDataError::validation(format!("no exchange rate for {}", requested))
        })?;

        let (from, to) = match (rate.from_code.as_deref(), rate.to_code.as_deref()) {
            (Some(from), Some(to)) if !from.trim().is_empty() && !to.trim().is_empty() => {
                (from.trim(), to.trim())
            }
            _ => {
                return Err(MarketDataError::validation(format!(
                    "incomplete currency codes for {}",
                    requested
                )))
            }
        };

        let price = rate
            .exchange_rate
            .as_deref()
            .ok_or_else(|| MarketDataError::validation(format!("no exchange rate for {}", requested)))
            .and_then(parse_price)?;

        let display_name = match rate.from_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("{} to {} Rate", from, to),
        };

        AssetQuote::new(
            &format!("{}/{}", from, to),
            &display_name,
            price,
            asset_class,
            QuoteSource::vendor(PROVIDER_ID),
        )
    }
}

impl Default for AlphaVantageProvider {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// MarketDataProvider trait implementation
// ============================================================================

#[async_trait]
impl MarketDataProvider for AlphaVantageProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn name(&self) -> &'static str {
        "Alpha Vantage"
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities {
            asset_classes: &[AssetClass::Stock, AssetClass::Crypto, AssetClass::Forex],
        }
    }

    async fn get_latest_quote(
        &self,
        request: &VendorRequest,
        api_key: &str,
    ) -> Result<AssetQuote, MarketDataError> {
        if api_key.trim().is_empty() {
            return Err(MarketDataError::MissingApiKey {
                provider: PROVIDER_ID.to_string(),
            });
        }

        let text = self.fetch(&request.params(), api_key.trim()).await?;

        let quote = match request {
            VendorRequest::GlobalQuote { symbol } => Self::parse_global_quote(&text, symbol)?,
            VendorRequest::ExchangeRate { asset_class, .. } => {
                Self::parse_exchange_rate(&text, *asset_class, &request.describe())?
            }
        };

        debug!(
            "Alpha Vantage: {} resolved to {} @ {}",
            request.describe(),
            quote.symbol(),
            quote.price()
        );

        Ok(quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FailureKind;
    use rust_decimal_macros::dec;

    #[test]
    fn test_provider_id() {
        let provider = AlphaVantageProvider::new();
        assert_eq!(provider.id(), "ALPHA_VANTAGE");
        assert_eq!(provider.name(), "Alpha Vantage");
    }

    #[test]
    fn test_provider_capabilities() {
        let caps = AlphaVantageProvider::new().capabilities();
        assert!(caps.supports(AssetClass::Stock));
        assert!(caps.supports(AssetClass::Crypto));
        assert!(caps.supports(AssetClass::Forex));
        assert!(!caps.supports(AssetClass::Commodity));
    }

    #[test]
    fn test_global_quote_parsing() {
        let json = r#"{
            "Global Quote": {
                "01. symbol": "AAPL",
                "02. open": "187.1500",
                "03. high": "190.3200",
                "04. low": "186.9000",
                "05. price": "189.4000",
                "06. volume": "51234567",
                "07. latest trading day": "2024-05-17",
                "08. previous close": "188.0000",
                "09. change": "1.4000",
                "10. change percent": "0.7447%"
            }
        }"#;

        let quote = AlphaVantageProvider::parse_global_quote(json, "AAPL").unwrap();
        assert_eq!(quote.symbol(), "AAPL");
        assert_eq!(quote.display_name(), "AAPL");
        assert_eq!(quote.price(), dec!(189.40));
        assert_eq!(quote.asset_class(), AssetClass::Stock);
        assert_eq!(quote.source(), &QuoteSource::vendor("ALPHA_VANTAGE"));
    }

    #[test]
    fn test_global_quote_missing_symbol_uses_request() {
        let json = r#"{ "Global Quote": { "05. price": "12.50" } }"#;
        let quote = AlphaVantageProvider::parse_global_quote(json, "IBM").unwrap();
        assert_eq!(quote.symbol(), "IBM");
        assert_eq!(quote.display_name(), UNKNOWN_STOCK_NAME);
    }

    #[test]
    fn test_global_quote_blank_open_is_unknown_stock() {
        let json = r#"{ "Global Quote": { "01. symbol": "MSFT", "02. open": "", "05. price": "410.10" } }"#;
        let quote = AlphaVantageProvider::parse_global_quote(json, "MSFT").unwrap();
        assert_eq!(quote.symbol(), "MSFT");
        assert_eq!(quote.display_name(), "Unknown Stock");
    }

    #[test]
    fn test_global_quote_empty_object_is_invalid_data() {
        let json = r#"{ "Global Quote": {} }"#;
        let err = AlphaVantageProvider::parse_global_quote(json, "ZZZZ").unwrap_err();
        assert!(err.is_invalid_data());
        assert_eq!(err.failure_kind(), FailureKind::SoftVendor);
    }

    #[test]
    fn test_global_quote_zero_price_rejected() {
        let json = r#"{ "Global Quote": { "01. symbol": "AAPL", "05. price": "0.0000" } }"#;
        let err = AlphaVantageProvider::parse_global_quote(json, "AAPL").unwrap_err();
        assert!(matches!(err, MarketDataError::ValidationFailed { .. }));
    }

    #[test]
    fn test_error_message_payload() {
        let json = r#"{ "Error Message": "Invalid API call. Please retry or visit the documentation." }"#;
        let err = AlphaVantageProvider::parse_global_quote(json, "ZZZZ").unwrap_err();
        assert!(matches!(err, MarketDataError::SymbolNotFound(_)));
        assert!(!err.is_invalid_data());
    }

    #[test]
    fn test_note_payload_is_rate_limit() {
        let json = r#"{ "Note": "Thank you for using Alpha Vantage! Our standard API call frequency is 5 calls per minute." }"#;
        let err = AlphaVantageProvider::parse_global_quote(json, "AAPL").unwrap_err();
        assert!(matches!(err, MarketDataError::RateLimited { .. }));
    }

    #[test]
    fn test_information_rate_limit() {
        let json = r#"{ "Information": "We have detected your API key and our standard API rate limit is 25 requests per day." }"#;
        let err = AlphaVantageProvider::parse_exchange_rate(json, AssetClass::Crypto, "BTC/USD")
            .unwrap_err();
        assert!(matches!(err, MarketDataError::RateLimited { .. }));
    }

    #[test]
    fn test_empty_body_and_empty_object() {
        for body in ["", "   ", "{}"] {
            let err = AlphaVantageProvider::parse_global_quote(body, "AAPL").unwrap_err();
            assert!(
                matches!(err, MarketDataError::EmptyResponse { .. }),
                "body {:?} gave {:?}",
                body,
                err
            );
        }
    }

    #[test]
    fn test_malformed_body() {
        let err = AlphaVantageProvider::parse_global_quote("<html>", "AAPL").unwrap_err();
        assert!(err.is_invalid_data());
    }

    #[test]
    fn test_exchange_rate_crypto() {
        let json = r#"{
            "Realtime Currency Exchange Rate": {
                "1. From_Currency Code": "BTC",
                "2. From_Currency Name": "Bitcoin",
                "3. To_Currency Code": "USD",
                "4. To_Currency Name": "United States Dollar",
                "5. Exchange Rate": "67012.34000000",
                "6. Last Refreshed": "2024-05-17 12:00:01",
                "7. Time Zone": "UTC",
                "8. Bid Price": "67012.33000000",
                "9. Ask Price": "67012.34000000"
            }
        }"#;

        let quote =
            AlphaVantageProvider::parse_exchange_rate(json, AssetClass::Crypto, "BTC/USD").unwrap();
        assert_eq!(quote.symbol(), "BTC/USD");
        assert_eq!(quote.display_name(), "Bitcoin");
        assert_eq!(quote.price(), dec!(67012.34));
        assert_eq!(quote.asset_class(), AssetClass::Crypto);
    }

    #[test]
    fn test_exchange_rate_forex_without_name() {
        let json = r#"{
            "Realtime Currency Exchange Rate": {
                "1. From_Currency Code": "EUR",
                "3. To_Currency Code": "USD",
                "5. Exchange Rate": "1.08420000"
            }
        }"#;

        let quote =
            AlphaVantageProvider::parse_exchange_rate(json, AssetClass::Forex, "EUR/USD").unwrap();
        assert_eq!(quote.symbol(), "EUR/USD");
        assert_eq!(quote.display_name(), "EUR to USD Rate");
        assert_eq!(quote.asset_class(), AssetClass::Forex);
    }

    #[test]
    fn test_exchange_rate_negative_rejected() {
        let json = r#"{
            "Realtime Currency Exchange Rate": {
                "1. From_Currency Code": "EUR",
                "3. To_Currency Code": "USD",
                "5. Exchange Rate": "-1.0"
            }
        }"#;

        let err = AlphaVantageProvider::parse_exchange_rate(json, AssetClass::Forex, "EUR/USD")
            .unwrap_err();
        assert!(err.is_invalid_data());
    }

    #[tokio::test]
    async fn test_blank_api_key_is_rejected_without_request() {
        let provider = AlphaVantageProvider::with_options("http://127.0.0.1:9", DEFAULT_REQUEST_TIMEOUT);
        let request = VendorRequest::GlobalQuote {
            symbol: "AAPL".to_string(),
        };
        let err = provider.get_latest_quote(&request, "  ").await.unwrap_err();
        assert!(matches!(err, MarketDataError::MissingApiKey { .. }));
    }

    #[test]
    fn test_logged_url_never_contains_key() {
        let provider = AlphaVantageProvider::new();
        let params = VendorRequest::GlobalQuote {
            symbol: "AAPL".to_string(),
        }
        .params();

        let real = provider.build_url(&params, "a+b/c d").unwrap().to_string();
        assert!(real.contains("apikey=a%2Bb%2Fc+d"));

        let redacted = provider.build_url(&params, "***").unwrap().to_string();
        assert!(redacted.ends_with("apikey=***"));
        assert!(!redacted.contains("a%2Bb"));
        assert!(redacted.contains("symbol=AAPL"));
    }

    // ------------------------------------------------------------------------
    // HTTP behavior against a local stub
    // ------------------------------------------------------------------------

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response, optionally after a delay.
    async fn serve_once(response: &'static str, delay: Option<Duration>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });
        format!("http://{}/query", addr)
    }

    fn stock_request() -> VendorRequest {
        VendorRequest::GlobalQuote {
            symbol: "AAPL".to_string(),
        }
    }

    #[tokio::test]
    async fn test_http_429_is_rate_limited() {
        let url = serve_once(
            "HTTP/1.1 429 Too Many Requests\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            None,
        )
        .await;
        let provider = AlphaVantageProvider::with_options(url, Duration::from_secs(5));

        let err = provider.get_latest_quote(&stock_request(), "demo").await.unwrap_err();
        assert!(matches!(err, MarketDataError::RateLimited { .. }));
        assert_eq!(err.failure_kind(), FailureKind::SoftVendor);
    }

    #[tokio::test]
    async fn test_http_500_is_provider_error() {
        let url = serve_once(
            "HTTP/1.1 500 Internal Server Error\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            None,
        )
        .await;
        let provider = AlphaVantageProvider::with_options(url, Duration::from_secs(5));

        let err = provider.get_latest_quote(&stock_request(), "demo").await.unwrap_err();
        match err {
            MarketDataError::ProviderError { ref message, .. } => {
                assert!(message.starts_with("HTTP 500"))
            }
            ref other => panic!("unexpected: {:?}", other),
        }
        assert_eq!(err.failure_kind(), FailureKind::SoftVendor);
    }

    #[tokio::test]
    async fn test_stalled_response_times_out() {
        let url = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Length: 2\r\nConnection: close\r\n\r\n{}",
            Some(Duration::from_secs(3)),
        )
        .await;
        let provider = AlphaVantageProvider::with_options(url, Duration::from_millis(200));

        let err = provider.get_latest_quote(&stock_request(), "demo").await.unwrap_err();
        assert!(matches!(err, MarketDataError::Timeout { .. }));
        assert_eq!(err.failure_kind(), FailureKind::Transport);
    }

    #[tokio::test]
    async fn test_refused_connection_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let provider =
            AlphaVantageProvider::with_options(format!("http://{}/query", addr), Duration::from_secs(5));

        let err = provider.get_latest_quote(&stock_request(), "demo").await.unwrap_err();
        assert!(matches!(err, MarketDataError::Network(_)));
        assert_eq!(err.failure_kind(), FailureKind::Transport);
    }

    #[tokio::test]
    async fn test_ok_response_is_parsed() {
        let url = serve_once(
            concat!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 61\r\nConnection: close\r\n\r\n",
                r#"{"Global Quote":{"01. symbol":"AAPL","05. price":"189.4000"}}"#
            ),
            None,
        )
        .await;
        let provider = AlphaVantageProvider::with_options(url, Duration::from_secs(5));

        let quote = provider.get_latest_quote(&stock_request(), "demo").await.unwrap();
        assert_eq!(quote.symbol(), "AAPL");
        assert_eq!(quote.price(), dec!(189.4000));
    }
}
