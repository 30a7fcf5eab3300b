use serde::{Deserialize, Serialize};

/// The subset of an outgoing transaction the context loaders look at.
#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    /// Destination address, if any.
    #[serde(default)]
    pub to: Option<String>,

    /// Hex encoded call data (`0x` prefixed).
    #[serde(default)]
    pub data: Option<String>,
}

impl Transaction {
    pub fn new(to: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            to: Some(to.into()),
            data: Some(data.into()),
        }
    }
}
