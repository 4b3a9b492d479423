pub mod block_rewards;
pub mod evm_chain;
pub mod json;
pub mod reward_action;
