use thiserror::Error;

pub mod datasource;
pub mod model;
pub mod registry;
pub mod selector;

mod loader;
pub use loader::{ContextLoader, NftContextLoader};

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid url {0}")]
    URL(String),

    #[error(transparent)]
    HTTP(#[from] reqwest::Error),

    #[error("wrong format error {0}")]
    Format(String),

    #[error("invalid address {0}")]
    InvalidAddress(String),

    #[error("internal error {0}")]
    Internal(String),
}
