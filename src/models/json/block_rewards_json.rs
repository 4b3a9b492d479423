use serde::Serialize;

use crate::{
    misc::utils::wei_to_eth,
    models::{block_rewards::BlockRewards, evm_chain::EVMChain},
};

#[derive(Serialize)]
pub struct MinerRewardJson {
    pub address: String,
    pub reward_wei: String,
    pub reward_eth: f64,
}

#[derive(Serialize)]
pub struct UncleRewardJson {
    pub uncle_hash: String,
    pub reward_wei: String,
    pub reward_eth: f64,
}

#[derive(Serialize)]
pub struct BlockRewardsJson {
    pub block_number: u64,
    pub chain_id: u64,
    pub chain_name: String,
    pub currency: String,
    pub rewards_by_miner: Vec<MinerRewardJson>,
    pub rewards_by_uncle: Vec<UncleRewardJson>,
}

impl BlockRewardsJson {
    pub fn new(rewards: &BlockRewards, block_number: u64, chain: &EVMChain) -> Self {
        let mut rewards_by_miner: Vec<MinerRewardJson> = rewards
            .by_miner
            .iter()
            .map(|(address, reward)| MinerRewardJson {
                address: address.to_string(),
                reward_wei: reward.to_string(),
                reward_eth: wei_to_eth(*reward),
            })
            .collect();
        rewards_by_miner.sort_by(|a, b| b.reward_eth.total_cmp(&a.reward_eth));

        let mut rewards_by_uncle: Vec<UncleRewardJson> = rewards
            .by_uncle
            .iter()
            .map(|(uncle_hash, reward)| UncleRewardJson {
                uncle_hash: uncle_hash.to_string(),
                reward_wei: reward.to_string(),
                reward_eth: wei_to_eth(*reward),
            })
            .collect();
        rewards_by_uncle.sort_by(|a, b| b.reward_eth.total_cmp(&a.reward_eth));

        Self {
            block_number,
            chain_id: chain.chain_id(),
            chain_name: chain.name().to_string(),
            currency: chain.currency().to_string(),
            rewards_by_miner,
            rewards_by_uncle,
        }
    }
}
