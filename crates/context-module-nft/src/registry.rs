//! Selectors for which a transaction needs context before it can be signed.
//!
//! | Standard     | Function                                                       | Selector     |
//! |--------------|----------------------------------------------------------------|--------------|
//! | ERC-721      | `approve(address,uint256)`                                     | `0x095ea7b3` |
//! | ERC-721/1155 | `setApprovalForAll(address,bool)`                              | `0xa22cb465` |
//! | ERC-721      | `transferFrom(address,address,uint256)`                        | `0x23b872dd` |
//! | ERC-721      | `safeTransferFrom(address,address,uint256)`                    | `0x42842e0e` |
//! | ERC-721      | `safeTransferFrom(address,address,uint256,bytes)`              | `0xb88d4fde` |
//! | ERC-1155     | `safeTransferFrom(address,address,uint256,uint256,bytes)`      | `0xf242432a` |
//! | ERC-1155     | `safeBatchTransferFrom(address,address,uint256[],uint256[],bytes)` | `0x2eb2c2d6` |

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::selector::Selector;

pub const ERC721_APPROVE: Selector = Selector::new([0x09, 0x5e, 0xa7, 0xb3]);
pub const SET_APPROVAL_FOR_ALL: Selector = Selector::new([0xa2, 0x2c, 0xb4, 0x65]);
pub const ERC721_TRANSFER_FROM: Selector = Selector::new([0x23, 0xb8, 0x72, 0xdd]);
pub const ERC721_SAFE_TRANSFER_FROM: Selector = Selector::new([0x42, 0x84, 0x2e, 0x0e]);
pub const ERC721_SAFE_TRANSFER_FROM_WITH_DATA: Selector = Selector::new([0xb8, 0x8d, 0x4f, 0xde]);
pub const ERC1155_SAFE_TRANSFER_FROM: Selector = Selector::new([0xf2, 0x42, 0x43, 0x2a]);
pub const ERC1155_SAFE_BATCH_TRANSFER_FROM: Selector = Selector::new([0x2e, 0xb2, 0xc2, 0xd6]);

/// Kind of context a selector requires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContextKind {
    /// Plugin descriptor followed by the NFT collection metadata.
    Nft,
}

lazy_static! {
    static ref SUPPORTED_SELECTORS: HashMap<Selector, ContextKind> = HashMap::from([
        (ERC721_APPROVE, ContextKind::Nft),
        (SET_APPROVAL_FOR_ALL, ContextKind::Nft),
        (ERC721_TRANSFER_FROM, ContextKind::Nft),
        (ERC721_SAFE_TRANSFER_FROM, ContextKind::Nft),
        (ERC721_SAFE_TRANSFER_FROM_WITH_DATA, ContextKind::Nft),
        (ERC1155_SAFE_TRANSFER_FROM, ContextKind::Nft),
        (ERC1155_SAFE_BATCH_TRANSFER_FROM, ContextKind::Nft),
    ]);
}

pub struct SelectorRegistry;

impl SelectorRegistry {
    /// Context kind required by `selector`, `None` when the selector needs no context.
    pub fn lookup(selector: &Selector) -> Option<ContextKind> {
        SUPPORTED_SELECTORS.get(selector).copied()
    }
}
