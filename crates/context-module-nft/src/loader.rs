use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::datasource::NftDataSource;
use crate::model::{ContextResponse, LoaderError, LoaderOptions, Transaction};
use crate::registry::{ContextKind, SelectorRegistry};
use crate::selector::Selector;

/// Produces the context a signing device needs for a transaction.
///
/// An empty list means the transaction needs no context. A failure to obtain
/// needed context is reported in the list as a [`ContextResponse::Error`].
#[async_trait]
pub trait ContextLoader: Send + Sync {
    async fn load(&self, transaction: &Transaction, options: &LoaderOptions) -> Vec<ContextResponse>;
}

/// Loads the plugin and collection metadata for NFT contract calls.
#[derive(Clone)]
pub struct NftContextLoader<D> {
    data_source: D,
}

impl<D: NftDataSource> NftContextLoader<D> {
    pub fn new(data_source: D) -> Self {
        Self { data_source }
    }

    // The metadata is only fetched once the plugin payload is known.
    #[instrument(name = "load_nft_context", skip_all, fields(selector = %selector))]
    async fn load_nft_context(&self, transaction: &Transaction, options: &LoaderOptions, selector: Selector) -> Vec<ContextResponse> {
        let Some(plugin) = self.data_source.get_set_plugin_payload(transaction, options).await.filter(|x| !x.is_empty()) else {
            debug!("no plugin payload");
            return vec![LoaderError::EmptyPluginPayload.into()];
        };

        let Some(nft) = self.data_source.get_nft_infos_payload(transaction, options).await.filter(|x| !x.is_empty()) else {
            debug!("no nft metadata payload");
            return vec![LoaderError::MissingNftMetadata.into()];
        };

        vec![
            ContextResponse::SetPlugin { payload: plugin },
            ContextResponse::ProvideNftInformation { payload: nft },
        ]
    }
}

#[async_trait]
impl<D: NftDataSource> ContextLoader for NftContextLoader<D> {
    async fn load(&self, transaction: &Transaction, options: &LoaderOptions) -> Vec<ContextResponse> {
        if transaction.to.is_none() {
            return vec![];
        }

        let Some(selector) = transaction.data.as_deref().and_then(Selector::from_calldata) else {
            return vec![];
        };

        match SelectorRegistry::lookup(&selector) {
            Some(ContextKind::Nft) => self.load_nft_context(transaction, options, selector).await,
            None => {
                debug!(%selector, "selector needs no nft context");
                vec![]
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use crate::datasource::mock::MockNftDataSource;
    use crate::datasource::Client;
    use crate::model::{ContextResponse, LoaderError, LoaderOptions, Transaction};
    use crate::{ContextLoader, NftContextLoader};

    const ADDRESS: &str = "0xdAC17F958D2ee523a2206206994597C13D831ec7";
    const SUPPORTED_CALLDATA: &str = "0x095ea7b30000000000000";

    /// Any fetch panics.
    #[derive(Debug)]
    struct NoFetch;

    #[async_trait]
    impl MockNftDataSource for NoFetch {
        fn new() -> Self {
            Self
        }
    }

    /// Plugin payload missing, metadata fetch panics.
    #[derive(Debug)]
    struct NoPluginPayload;

    #[async_trait]
    impl MockNftDataSource for NoPluginPayload {
        fn new() -> Self {
            Self
        }

        async fn get_set_plugin_payload(&self, _: &Transaction, _: &LoaderOptions) -> Option<String> {
            None
        }
    }

    #[derive(Debug)]
    struct EmptyPluginPayload;

    #[async_trait]
    impl MockNftDataSource for EmptyPluginPayload {
        fn new() -> Self {
            Self
        }

        async fn get_set_plugin_payload(&self, _: &Transaction, _: &LoaderOptions) -> Option<String> {
            Some(String::new())
        }
    }

    #[derive(Debug)]
    struct NoNftPayload;

    #[async_trait]
    impl MockNftDataSource for NoNftPayload {
        fn new() -> Self {
            Self
        }

        async fn get_set_plugin_payload(&self, _: &Transaction, _: &LoaderOptions) -> Option<String> {
            Some("payload1".to_string())
        }

        async fn get_nft_infos_payload(&self, _: &Transaction, _: &LoaderOptions) -> Option<String> {
            None
        }
    }

    #[derive(Debug)]
    struct BothPayloads;

    #[async_trait]
    impl MockNftDataSource for BothPayloads {
        fn new() -> Self {
            Self
        }

        async fn get_set_plugin_payload(&self, _: &Transaction, _: &LoaderOptions) -> Option<String> {
            Some("payload1".to_string())
        }

        async fn get_nft_infos_payload(&self, _: &Transaction, _: &LoaderOptions) -> Option<String> {
            Some("payload2".to_string())
        }
    }

    /// Echoes the transaction and options it receives.
    #[derive(Debug)]
    struct EchoPayloads;

    #[async_trait]
    impl MockNftDataSource for EchoPayloads {
        fn new() -> Self {
            Self
        }

        async fn get_set_plugin_payload(&self, transaction: &Transaction, options: &LoaderOptions) -> Option<String> {
            Some(format!("plugin:{}:{}:{}", transaction.to.as_deref()?, transaction.data.as_deref()?, options.chain_id))
        }

        async fn get_nft_infos_payload(&self, transaction: &Transaction, options: &LoaderOptions) -> Option<String> {
            Some(format!("nft:{}:{}", transaction.to.as_deref()?, options.chain_id))
        }
    }

    fn nft_loader<T: MockNftDataSource>() -> NftContextLoader<Client> {
        NftContextLoader::new(Client::mock::<T>())
    }

    fn transaction(to: Option<&str>, data: Option<&str>) -> Transaction {
        Transaction {
            to: to.map(str::to_string),
            data: data.map(str::to_string),
        }
    }

    mod not_applicable {
        use super::*;

        #[tokio::test]
        async fn should_return_empty_list_without_destination() {
            let result = nft_loader::<NoFetch>().load(&transaction(None, Some("0x01")), &LoaderOptions::default()).await;

            assert_eq!(result, vec![]);
        }

        #[tokio::test]
        async fn should_return_empty_list_without_destination_even_for_supported_selector() {
            let result = nft_loader::<NoFetch>().load(&transaction(None, Some(SUPPORTED_CALLDATA)), &LoaderOptions::default()).await;

            assert_eq!(result, vec![]);
        }

        #[tokio::test]
        async fn should_return_empty_list_without_calldata() {
            let result = nft_loader::<NoFetch>().load(&transaction(Some(ADDRESS), None), &LoaderOptions::default()).await;

            assert_eq!(result, vec![]);
        }

        #[tokio::test]
        async fn should_return_empty_list_for_empty_calldata() {
            let result = nft_loader::<NoFetch>().load(&transaction(Some(ADDRESS), Some("0x")), &LoaderOptions::default()).await;

            assert_eq!(result, vec![]);
        }

        #[tokio::test]
        async fn should_return_empty_list_for_unsupported_selector() {
            let result = nft_loader::<NoFetch>()
                .load(&transaction(Some(ADDRESS), Some("0x095ea7b20000000000000")), &LoaderOptions::default())
                .await;

            assert_eq!(result, vec![]);
        }

        #[tokio::test]
        async fn should_not_fetch_for_calldata_shorter_than_a_selector() {
            let loader = nft_loader::<NoFetch>();

            // Every truncation of a supported selector, from 0 to 7 hex digits.
            for length in 0..8 {
                let data = format!("0x{}", &"095ea7b3"[..length]);
                let result = loader.load(&transaction(Some(ADDRESS), Some(&data)), &LoaderOptions::default()).await;

                assert_eq!(result, vec![], "call data {}", data);
            }
        }
    }

    mod fetch_failure {
        use super::*;

        #[tokio::test]
        async fn should_return_error_when_no_plugin_payload() {
            // Given
            let loader = nft_loader::<NoPluginPayload>();

            // When
            let result = loader.load(&transaction(Some(ADDRESS), Some(SUPPORTED_CALLDATA)), &LoaderOptions::default()).await;

            // Then
            assert_eq!(result, vec![ContextResponse::Error { error: LoaderError::EmptyPluginPayload }]);
        }

        #[tokio::test]
        async fn should_treat_empty_plugin_payload_as_missing() {
            let result = nft_loader::<EmptyPluginPayload>()
                .load(&transaction(Some(ADDRESS), Some(SUPPORTED_CALLDATA)), &LoaderOptions::default())
                .await;

            assert_eq!(result, vec![ContextResponse::Error { error: LoaderError::EmptyPluginPayload }]);
        }

        #[tokio::test]
        async fn should_return_error_when_no_nft_payload() {
            // Given
            let loader = nft_loader::<NoNftPayload>();

            // When
            let result = loader.load(&transaction(Some(ADDRESS), Some(SUPPORTED_CALLDATA)), &LoaderOptions::default()).await;

            // Then
            assert_eq!(result, vec![ContextResponse::Error { error: LoaderError::MissingNftMetadata }]);
        }
    }

    mod success {
        use super::*;

        #[tokio::test]
        async fn should_return_plugin_then_nft_information() {
            // Given
            let loader = nft_loader::<BothPayloads>();

            // When
            let result = loader.load(&transaction(Some(ADDRESS), Some(SUPPORTED_CALLDATA)), &LoaderOptions::default()).await;

            // Then
            assert_eq!(
                result,
                vec![
                    ContextResponse::SetPlugin { payload: "payload1".to_string() },
                    ContextResponse::ProvideNftInformation { payload: "payload2".to_string() },
                ]
            );
        }

        #[tokio::test]
        async fn should_forward_transaction_and_options_to_data_source() {
            let result = nft_loader::<EchoPayloads>()
                .load(&transaction(Some(ADDRESS), Some("0xA22CB465")), &LoaderOptions::new(137))
                .await;

            assert_eq!(
                result,
                vec![
                    ContextResponse::SetPlugin {
                        payload: format!("plugin:{}:0xA22CB465:137", ADDRESS)
                    },
                    ContextResponse::ProvideNftInformation {
                        payload: format!("nft:{}:137", ADDRESS)
                    },
                ]
            );
        }

        #[tokio::test]
        async fn should_load_independent_transactions_concurrently() {
            let loader = std::sync::Arc::new(nft_loader::<BothPayloads>());

            let supported = {
                let loader = loader.clone();
                tokio::spawn(async move { loader.load(&transaction(Some(ADDRESS), Some(SUPPORTED_CALLDATA)), &LoaderOptions::default()).await })
            };
            let unsupported = {
                let loader = loader.clone();
                tokio::spawn(async move { loader.load(&transaction(Some(ADDRESS), Some("0xa9059cbb")), &LoaderOptions::default()).await })
            };

            assert_eq!(supported.await.unwrap().len(), 2);
            assert_eq!(unsupported.await.unwrap(), vec![]);
        }
    }
}
