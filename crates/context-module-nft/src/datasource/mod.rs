use async_trait::async_trait;
use context_module_common::{measure_duration, metric};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::model::{LoaderOptions, Transaction};
use crate::Error;

mod http;
pub use http::{HttpDataSourceConfiguration, HttpNftDataSource, DEFAULT_NFT_ENDPOINT};

#[cfg(feature = "testing")]
pub mod mock;

/// Provider of the signed payloads needed to describe an NFT transaction.
///
/// `None` means the provider has nothing for this transaction, which is an
/// expected outcome. Implementations absorb their own transport faults.
#[async_trait]
pub trait NftDataSource: 'static + Send + Sync {
    async fn get_set_plugin_payload(&self, transaction: &Transaction, options: &LoaderOptions) -> Option<String>;

    async fn get_nft_infos_payload(&self, transaction: &Transaction, options: &LoaderOptions) -> Option<String>;
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "provider", rename_all = "snake_case")]
pub enum Configuration {
    #[cfg(feature = "testing")]
    #[serde(skip)]
    Mock(std::sync::Arc<dyn mock::MockNftDataSource>),

    Http(HttpDataSourceConfiguration),
}

impl Default for Configuration {
    fn default() -> Self {
        Self::Http(HttpDataSourceConfiguration::default())
    }
}

#[cfg(feature = "testing")]
impl Configuration {
    pub fn mock<T: mock::MockNftDataSource>() -> Self {
        Self::Mock(std::sync::Arc::new(T::new()))
    }
}

/// Data source selected by a [`Configuration`].
#[derive(Clone)]
pub enum Client {
    #[cfg(feature = "testing")]
    Mock(std::sync::Arc<dyn mock::MockNftDataSource>),

    Http(HttpNftDataSource),
}

impl Client {
    pub fn new(configuration: &Configuration) -> Result<Self, Error> {
        Ok(match configuration {
            #[cfg(feature = "testing")]
            Configuration::Mock(x) => Self::Mock(x.clone()),

            Configuration::Http(x) => Self::Http(HttpNftDataSource::new(x)?),
        })
    }

    #[cfg(feature = "testing")]
    pub fn mock<I: mock::MockNftDataSource>() -> Self {
        Self::Mock(std::sync::Arc::new(I::new()))
    }
}

#[async_trait]
impl NftDataSource for Client {
    #[instrument(name = "get_set_plugin_payload", skip_all)]
    async fn get_set_plugin_payload(&self, transaction: &Transaction, options: &LoaderOptions) -> Option<String> {
        let (result, duration) = measure_duration!(match self {
            #[cfg(feature = "testing")]
            Self::Mock(source) => source.get_set_plugin_payload(transaction, options).await,

            Self::Http(source) => source.get_set_plugin_payload(transaction, options).await,
        });

        metric!(counter[nft_payload_request] = 1, method = "get_set_plugin_payload");
        metric!(histogram[nft_payload_request_duration_milliseconds] = duration.as_millis(), method = "get_set_plugin_payload");
        metric!(on none result => counter[nft_payload_missing] = 1, method = "get_set_plugin_payload");

        result
    }

    #[instrument(name = "get_nft_infos_payload", skip_all)]
    async fn get_nft_infos_payload(&self, transaction: &Transaction, options: &LoaderOptions) -> Option<String> {
        let (result, duration) = measure_duration!(match self {
            #[cfg(feature = "testing")]
            Self::Mock(source) => source.get_nft_infos_payload(transaction, options).await,

            Self::Http(source) => source.get_nft_infos_payload(transaction, options).await,
        });

        metric!(counter[nft_payload_request] = 1, method = "get_nft_infos_payload");
        metric!(histogram[nft_payload_request_duration_milliseconds] = duration.as_millis(), method = "get_nft_infos_payload");
        metric!(on none result => counter[nft_payload_missing] = 1, method = "get_nft_infos_payload");

        result
    }
}
