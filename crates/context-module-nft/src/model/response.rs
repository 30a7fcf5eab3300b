use serde::{Serialize, Serializer};
use thiserror::Error;

/// Failure reported in-band by a loader, as a [`ContextResponse::Error`] entry.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderError {
    #[error("[ContextModule] NftLoader: unexpected empty response")]
    EmptyPluginPayload,

    #[error("[ContextModule] NftLoader: no nft metadata")]
    MissingNftMetadata,
}

impl Serialize for LoaderError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One piece of context to forward to the signing device.
///
/// Entries must be forwarded in the order the loader returned them.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum ContextResponse {
    #[serde(rename = "setPlugin")]
    SetPlugin { payload: String },

    #[serde(rename = "provideNFTInformation")]
    ProvideNftInformation { payload: String },

    #[serde(rename = "error")]
    Error { error: LoaderError },
}

impl From<LoaderError> for ContextResponse {
    fn from(error: LoaderError) -> Self {
        Self::Error { error }
    }
}
