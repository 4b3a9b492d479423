use alloy::primitives::{Address, U256};
use serde_json::Value;

/// Reward classification emitted by the tracing API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewardKind {
    Block,
    Uncle,
}

/// One reward-distribution action, converted from a loosely-typed
/// `trace_block` entry at the RPC trust boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardAction {
    pub kind: RewardKind,
    pub author: Address,
    pub value: U256,
}

impl RewardAction {
    /// Converts a raw `trace_block` entry into a typed reward action.
    ///
    /// Returns `None` for non-reward trace entries (calls, creates,
    /// suicides), which are expected and ignored. Reward entries must be
    /// well-formed: a malformed author or value, or an unrecognized reward
    /// type, means the node violated the trace API contract, and we abort
    /// rather than report wrong totals.
    pub fn from_trace_entry(entry: &Value) -> Option<Self> {
        let action = entry
            .get("action")
            .and_then(Value::as_object)
            .unwrap_or_else(|| panic!("trace entry without action object: {entry}"));

        let reward_type = action.get("rewardType")?;
        let reward_type = reward_type
            .as_str()
            .unwrap_or_else(|| panic!("non-string rewardType in trace entry: {entry}"));

        let kind = match reward_type {
            "block" => RewardKind::Block,
            "uncle" => RewardKind::Uncle,
            other => panic!("unknown reward type '{other}' in trace entry"),
        };

        let author = action
            .get("author")
            .and_then(Value::as_str)
            .unwrap_or_else(|| panic!("reward action without author: {entry}"));
        let author: Address = author
            .parse()
            .unwrap_or_else(|_| panic!("malformed reward author '{author}'"));

        let value = action
            .get("value")
            .and_then(Value::as_str)
            .unwrap_or_else(|| panic!("reward action without value: {entry}"));
        let value = parse_reward_value(value);

        Some(Self {
            kind,
            author,
            value,
        })
    }
}

// Base is auto-detected from the prefix: "0x" hex, plain decimal otherwise.
fn parse_reward_value(raw: &str) -> U256 {
    raw.parse::<U256>()
        .unwrap_or_else(|_| panic!("malformed reward value '{raw}'"))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn reward_entry(reward_type: &str, author: &str, value: &str) -> Value {
        json!({
            "action": {
                "rewardType": reward_type,
                "author": author,
                "value": value,
            },
            "type": "reward",
        })
    }

    const AUTHOR: &str = "0x52bc44d5378309ee2abf1539bf71de1b7d7be3b5";

    #[test]
    fn converts_block_reward_entry() {
        let entry = reward_entry("block", AUTHOR, "0x4563918244f40000");
        let action = RewardAction::from_trace_entry(&entry).unwrap();

        assert_eq!(action.kind, RewardKind::Block);
        assert_eq!(action.author, AUTHOR.parse::<Address>().unwrap());
        assert_eq!(action.value, U256::from(5_000_000_000_000_000_000u64));
    }

    #[test]
    fn converts_uncle_reward_entry() {
        let entry = reward_entry("uncle", AUTHOR, "3750000000000000000");
        let action = RewardAction::from_trace_entry(&entry).unwrap();

        assert_eq!(action.kind, RewardKind::Uncle);
        assert_eq!(action.value, U256::from(3_750_000_000_000_000_000u64));
    }

    #[test]
    fn hex_and_decimal_values_are_equal() {
        let hex = reward_entry("block", AUTHOR, "0x4563918244f40000");
        let decimal = reward_entry("block", AUTHOR, "5000000000000000000");

        let hex = RewardAction::from_trace_entry(&hex).unwrap();
        let decimal = RewardAction::from_trace_entry(&decimal).unwrap();

        assert_eq!(hex.value, decimal.value);
    }

    #[test]
    fn skips_non_reward_entries() {
        let entry = json!({
            "action": {
                "callType": "call",
                "from": AUTHOR,
                "to": AUTHOR,
                "value": "0x0",
            },
            "type": "call",
        });

        assert_eq!(RewardAction::from_trace_entry(&entry), None);
    }

    #[test]
    #[should_panic(expected = "unknown reward type 'external'")]
    fn unknown_reward_type_aborts() {
        let entry = reward_entry("external", AUTHOR, "0x0");
        RewardAction::from_trace_entry(&entry);
    }

    #[test]
    #[should_panic(expected = "malformed reward value")]
    fn malformed_value_aborts() {
        let entry = reward_entry("block", AUTHOR, "not-a-number");
        RewardAction::from_trace_entry(&entry);
    }

    #[test]
    #[should_panic(expected = "malformed reward author")]
    fn malformed_author_aborts() {
        let entry = reward_entry("block", "0x123", "0x0");
        RewardAction::from_trace_entry(&entry);
    }

    #[test]
    #[should_panic(expected = "trace entry without action object")]
    fn entry_without_action_aborts() {
        let entry = json!({ "type": "reward" });
        RewardAction::from_trace_entry(&entry);
    }
}
