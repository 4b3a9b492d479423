pub mod block_rewards_json;
