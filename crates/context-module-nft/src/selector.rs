//! Function selector extraction.
//!
//! The selector is the first 4 bytes of the call data, right after the `0x`
//! prefix. Call data too short to hold 4 bytes has no selector; it is not an
//! error, the transaction simply needs no context.

use std::fmt::{Display, Formatter};

const PREFIXES: [&[u8]; 2] = [b"0x", b"0X"];

/// Number of hex digits encoding a selector.
const SELECTOR_HEX_LENGTH: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Selector([u8; 4]);

impl Selector {
    pub const fn new(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    /// Extract the selector from `0x` prefixed call data.
    ///
    /// Returns `None` when the prefix is missing, when fewer than 8 hex digits
    /// follow it, or when one of those 8 digits is not hexadecimal. Digits past
    /// the selector are never inspected.
    pub fn from_calldata(data: &str) -> Option<Self> {
        let digits = strip_prefix(data.as_bytes())?;
        let digits = digits.get(..SELECTOR_HEX_LENGTH)?;

        let mut bytes = [0u8; 4];
        hex::decode_to_slice(digits, &mut bytes).ok()?;

        Some(Self(bytes))
    }
}

fn strip_prefix(data: &[u8]) -> Option<&[u8]> {
    PREFIXES.iter().find_map(|prefix| data.strip_prefix(*prefix))
}

impl Display for Selector {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}
