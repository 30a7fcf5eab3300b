use serde::{Deserialize, Serialize};

/// Options forwarded untouched to the data source.
#[derive(Serialize, Deserialize, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoaderOptions {
    pub chain_id: u64,
}

impl LoaderOptions {
    pub fn new(chain_id: u64) -> Self {
        Self { chain_id }
    }
}
