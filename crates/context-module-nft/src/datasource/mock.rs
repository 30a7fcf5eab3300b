use std::fmt::Debug;

use async_trait::async_trait;

use crate::model::{LoaderOptions, Transaction};

/// Test double for [`crate::datasource::NftDataSource`]. Operations a test does
/// not override panic, which makes an unexpected fetch fail the test.
#[async_trait]
pub trait MockNftDataSource: 'static + Send + Sync + Debug {
    fn new() -> Self
    where
        Self: Sized;

    async fn get_set_plugin_payload(&self, _transaction: &Transaction, _options: &LoaderOptions) -> Option<String> {
        unimplemented!()
    }

    async fn get_nft_infos_payload(&self, _transaction: &Transaction, _options: &LoaderOptions) -> Option<String> {
        unimplemented!()
    }
}
