//! HTTP client for the inventory API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, COOKIE, HeaderMap, HeaderValue, InvalidHeaderValue, USER_AGENT};
use thiserror::Error;
use tracing::debug;

use crate::types::{FetchOutcome, InventorySnapshot, SkuEnvelope};

/// Business status code the upstream uses for success.
pub const SUCCESS_CODE: i64 = 200;

/// Per-request timeout.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// The upstream only answers to its own mini-program client, so the
/// request has to look like one.
const WEAPP_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/132.0.0.0 Safari/537.36 MicroMessenger/7.0.20.1781(0x6700143B) \
    NetType/WIFI MiniProgramEnv/Windows WindowsWechat/WMPF WindowsWechat(0x63090a13) XWEB/17071";

/// Errors constructing the client. Fetch-time failures never surface
/// here; they become [`FetchOutcome`] variants.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("invalid header value: {0}")]
    Header(#[from] InvalidHeaderValue),
}

/// Where and what to poll.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Scheme + host, e.g. `https://shopapi.haomaitong.com`.
    pub api_base: String,
    pub store_id: String,
    pub product_id: String,
    /// Session cookie passed through verbatim when present.
    pub cookie: Option<String>,
}

impl UpstreamConfig {
    fn endpoint(&self) -> String {
        format!(
            "{}/v2/product/{}/sku?storeId={}",
            self.api_base.trim_end_matches('/'),
            self.product_id,
            self.store_id
        )
    }
}

/// A source of inventory snapshots. The monitor only sees this trait,
/// so tests can script outcomes.
#[async_trait]
pub trait InventorySource: Send + Sync {
    async fn fetch(&self) -> FetchOutcome;
}

/// Production source backed by reqwest.
#[derive(Debug, Clone)]
pub struct InventoryClient {
    http: reqwest::Client,
    url: String,
}

impl InventoryClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(WEAPP_USER_AGENT));
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/json;charset=utf-8"),
        );
        headers.insert("X-StoreId", HeaderValue::from_str(&config.store_id)?);
        headers.insert("X-ClientType", HeaderValue::from_static("weapp"));
        if let Some(cookie) = &config.cookie {
            headers.insert(COOKIE, HeaderValue::from_str(cookie)?);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(FETCH_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            url: config.endpoint(),
        })
    }

    /// The fully built endpoint URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl InventorySource for InventoryClient {
    async fn fetch(&self) -> FetchOutcome {
        debug!(url = %self.url, "fetching inventory");

        let response = match self.http.get(&self.url).send().await {
            Ok(r) => r,
            Err(e) => return FetchOutcome::FetchFailed(format!("request failed: {e}")),
        };

        if response.status() != StatusCode::OK {
            return FetchOutcome::FetchFailed(format!("HTTP {}", response.status()));
        }

        let envelope: SkuEnvelope = match response.json().await {
            Ok(v) => v,
            Err(e) => return FetchOutcome::FetchFailed(format!("bad payload: {e}")),
        };

        if envelope.code != SUCCESS_CODE {
            return FetchOutcome::BusinessRejected(
                envelope.message.unwrap_or_else(|| "unknown error".to_string()),
            );
        }

        FetchOutcome::Snapshot(InventorySnapshot {
            skus: envelope.data.unwrap_or_default().sku_list,
        })
    }
}
