use std::collections::HashMap;

use alloy::{
    primitives::{Address, B256, U256},
    rpc::types::Header,
};
use colored::Colorize;
use serde_json::Value;

use crate::{
    misc::utils::{SEPARATOR, SEPARATORER, wei_to_eth},
    models::{
        evm_chain::EVMChain,
        reward_action::{RewardAction, RewardKind},
    },
};

/// Mining rewards reconstructed from `trace_block` output: the total paid to
/// each miner address, and the reward attributed to each matched uncle.
#[derive(Debug, Default)]
pub struct BlockRewards {
    pub by_miner: HashMap<Address, U256>,
    pub by_uncle: HashMap<B256, U256>,
}

impl BlockRewards {
    /// Aggregates raw trace entries into per-miner and per-uncle totals.
    ///
    /// An empty entry list (no rewards, or tracing unavailable) yields empty
    /// maps. `resolve_miner` is the beneficiary-resolution seam, injected so
    /// the aggregation is testable without a node connection.
    pub fn aggregate<R>(
        trace_entries: &[Value],
        block_header: &Header,
        uncle_headers: &[Header],
        resolve_miner: R,
    ) -> Self
    where
        R: Fn(&Header) -> Address,
    {
        let mut rewards = Self::default();

        if trace_entries.is_empty() {
            return rewards;
        }

        // Candidates are scanned in declared uncle order. The trace data does
        // not fix a match order, so which candidate wins when several share an
        // author is implementation-defined.
        let mut uncle_candidates: Vec<&Header> = uncle_headers.iter().collect();

        for entry in trace_entries {
            let Some(action) = RewardAction::from_trace_entry(entry) else {
                continue;
            };

            match action.kind {
                RewardKind::Block => {
                    let miner = resolve_miner(block_header);
                    assert!(
                        miner == action.author,
                        "block reward author {} does not match block miner {}",
                        action.author,
                        miner
                    );
                    *rewards.by_miner.entry(miner).or_default() += action.value;
                }
                RewardKind::Uncle => {
                    let matched = uncle_candidates
                        .iter()
                        .position(|uncle| resolve_miner(uncle) == action.author);

                    // An uncle reward with no matching declared uncle is
                    // dropped. Once matched, a candidate leaves the pool, so
                    // duplicate entries cannot attribute the same uncle twice.
                    if let Some(idx) = matched {
                        let uncle = uncle_candidates.remove(idx);
                        rewards.by_uncle.insert(uncle.hash, action.value);
                        *rewards.by_miner.entry(action.author).or_default() += action.value;
                    }
                }
            }
        }

        rewards
    }

    pub fn is_empty(&self) -> bool {
        self.by_miner.is_empty()
    }

    pub fn total(&self) -> U256 {
        self.by_miner.values().copied().sum()
    }

    pub fn print(&self, block_number: u64, chain: &EVMChain) {
        println!("{SEPARATORER}");
        println!("{} {}", "Block".bold(), block_number.to_string().yellow());

        if self.is_empty() {
            println!("No reward traces for this block");
            return;
        }

        println!("{}", "Rewards by miner:".bold());
        for (address, reward) in sorted_by_reward(&self.by_miner) {
            println!(
                "  {} {} {} ({} wei)",
                address,
                format!("{:.6}", wei_to_eth(*reward)).green(),
                chain.currency(),
                reward
            );
        }

        if !self.by_uncle.is_empty() {
            println!("{SEPARATOR}");
            println!("{}", "Rewards by uncle:".bold());
            for (uncle_hash, reward) in sorted_by_reward(&self.by_uncle) {
                println!(
                    "  {} {} {}",
                    uncle_hash,
                    format!("{:.6}", wei_to_eth(*reward)).green(),
                    chain.currency()
                );
            }
        }
    }
}

fn sorted_by_reward<K>(rewards: &HashMap<K, U256>) -> Vec<(&K, &U256)> {
    let mut entries: Vec<_> = rewards.iter().collect();
    entries.sort_by(|a, b| b.1.cmp(a.1));
    entries
}
