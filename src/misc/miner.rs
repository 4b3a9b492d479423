use alloy::{primitives::Address, rpc::types::Header};

use crate::models::evm_chain::EVMChain;

/// Resolves the beneficiary of a block or uncle header.
///
/// Every supported chain commits the reward recipient to the header's
/// beneficiary field. Consensus schemes that hide the author elsewhere
/// (clique recovers it from the seal signature) would plug in here, keyed on
/// the chain ID.
pub struct MinerResolver {
    pub chain_id: u64,
}

impl MinerResolver {
    pub fn new(chain: &EVMChain) -> Self {
        Self {
            chain_id: chain.chain_id(),
        }
    }

    pub fn resolve(&self, header: &Header) -> Address {
        header.beneficiary
    }
}
