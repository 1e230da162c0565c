//! Routing metadata carried on a swap record for off-chain relayers.
//!
//! These values describe where the counterpart leg of the swap lives. The
//! state machine stores and emits them verbatim; it never validates them.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingInfo {
    pub dst_chain: String,
    pub dst_asset: String,
    pub dst_address: String,
    /// Ordered intermediate hops for multi-leg routes, outermost first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hops: Vec<Hop>,
}

impl RoutingInfo {
    pub fn new<S: Into<String>>(dst_chain: S, dst_asset: S, dst_address: S) -> Self {
        RoutingInfo {
            dst_chain: dst_chain.into(),
            dst_asset: dst_asset.into(),
            dst_address: dst_address.into(),
            hops: Vec::new(),
        }
    }

    pub fn with_hops(mut self, hops: Vec<Hop>) -> Self {
        self.hops = hops;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hop {
    pub chain: String,
    pub asset: String,
    pub address: String,
}
