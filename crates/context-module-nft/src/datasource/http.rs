use std::time::Duration;

use async_trait::async_trait;
use context_module_common::cache::ExpirableCache;
use context_module_common::log_if_error;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client as HTTPClient, StatusCode, Url};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::datasource::NftDataSource;
use crate::model::{LoaderOptions, Transaction};
use crate::selector::Selector;
use crate::Error;

pub const DEFAULT_NFT_ENDPOINT: &str = "https://nft.api.live.ledger.com/v1";

const CLIENT_VERSION_HEADER: &str = "x-ledger-client-version";
const CLIENT_VERSION: &str = concat!("context-module/", env!("CARGO_PKG_VERSION"));

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HttpDataSourceConfiguration {
    #[serde(default = "HttpDataSourceConfiguration::default_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds.
    #[serde(default = "HttpDataSourceConfiguration::default_timeout")]
    pub timeout: u64,

    /// Seconds a payload is served from cache. Past twice this value it is dropped.
    #[serde(default = "HttpDataSourceConfiguration::default_cache_validity")]
    pub cache_validity: u64,
}

impl HttpDataSourceConfiguration {
    fn default_endpoint() -> String {
        DEFAULT_NFT_ENDPOINT.to_string()
    }

    fn default_timeout() -> u64 {
        3
    }

    fn default_cache_validity() -> u64 {
        60
    }
}

impl Default for HttpDataSourceConfiguration {
    fn default() -> Self {
        Self {
            endpoint: Self::default_endpoint(),
            timeout: Self::default_timeout(),
            cache_validity: Self::default_cache_validity(),
        }
    }
}

#[derive(Deserialize, Debug)]
struct PayloadResponse {
    #[serde(default)]
    payload: Option<String>,
}

/// [`NftDataSource`] backed by the NFT metadata HTTP service.
#[derive(Clone)]
pub struct HttpNftDataSource {
    endpoint: Url,
    client: HTTPClient,
    cache: ExpirableCache<Url, String>,
    cache_validity: Duration,
}

impl HttpNftDataSource {
    pub fn new(configuration: &HttpDataSourceConfiguration) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CLIENT_VERSION_HEADER, HeaderValue::from_static(CLIENT_VERSION));

        let client = HTTPClient::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(configuration.timeout))
            .build()?;

        let endpoint = Url::parse(&configuration.endpoint).map_err(|e| Error::URL(e.to_string()))?;

        Ok(Self {
            endpoint,
            client,
            cache: ExpirableCache::new(1024),
            cache_validity: Duration::from_secs(configuration.cache_validity),
        })
    }

    fn plugin_url(&self, chain_id: u64, address: &str, selector: &Selector) -> Result<Url, Error> {
        let address = checked_address(address)?;

        self.url(["ethereum", &chain_id.to_string(), "contracts", address, "plugin-selector", &selector.to_string()])
    }

    fn contract_url(&self, chain_id: u64, address: &str) -> Result<Url, Error> {
        let address = checked_address(address)?;

        self.url(["ethereum", &chain_id.to_string(), "contracts", address])
    }

    /// Append `segments` to the endpoint path, each one percent-encoded.
    fn url<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Result<Url, Error> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| Error::URL(self.endpoint.to_string()))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    /// Serve `url` from cache or from the service. When the service fails, a
    /// stale but unexpired cached payload is returned instead.
    async fn fetch_payload(&self, url: Result<Url, Error>) -> Option<String> {
        let url = log_if_error!(url).ok()?;

        if let Some(payload) = self.cache.get_if_not_stale(&url) {
            return Some(payload);
        }

        match log_if_error!(self.fetch_payload_from_service(&url).await) {
            Ok(payload) => payload,
            Err(_) => self.cache.get_if_not_expired(&url),
        }
    }

    async fn fetch_payload_from_service(&self, url: &Url) -> Result<Option<String>, Error> {
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!(%url, "no payload available");
            return Ok(None);
        }

        let text = response.text().await?;
        if !status.is_success() {
            return Err(Error::Internal(format!("request error url={} status={}, body={}", url, status, text)));
        }

        let payload = serde_json::from_str::<PayloadResponse>(&text)
            .map_err(|e| Error::Format(e.to_string()))?
            .payload
            .filter(|x| !x.is_empty());

        if let Some(payload) = &payload {
            self.cache.insert(url.clone(), payload.clone(), self.cache_validity);
        }

        Ok(payload)
    }
}

/// Contract addresses are `0x` followed by 40 hex digits.
fn checked_address(address: &str) -> Result<&str, Error> {
    match address.strip_prefix("0x") {
        Some(digits) if digits.len() == 40 && digits.bytes().all(|x| x.is_ascii_hexdigit()) => Ok(address),
        _ => Err(Error::InvalidAddress(address.to_string())),
    }
}

#[async_trait]
impl NftDataSource for HttpNftDataSource {
    async fn get_set_plugin_payload(&self, transaction: &Transaction, options: &LoaderOptions) -> Option<String> {
        let address = transaction.to.as_deref()?;
        let selector = transaction.data.as_deref().and_then(Selector::from_calldata)?;

        self.fetch_payload(self.plugin_url(options.chain_id, address, &selector)).await
    }

    async fn get_nft_infos_payload(&self, transaction: &Transaction, options: &LoaderOptions) -> Option<String> {
        let address = transaction.to.as_deref()?;

        self.fetch_payload(self.contract_url(options.chain_id, address)).await
    }
}
