use std::str::FromStr;

use alloy::providers::Provider;
use eyre::{Result, eyre};

/// Parsed form of the `<blocks>` CLI argument, before validation against the
/// chain head.
#[derive(Debug, PartialEq)]
pub enum BlocksSpec {
    Single(u64),
    Range { from: u64, to: u64 },
    Latest,
    LastN(u64),
}

impl FromStr for BlocksSpec {
    type Err = eyre::Error;

    fn from_str(input: &str) -> Result<Self> {
        let parts: Vec<&str> = input.split(':').collect();

        match parts.as_slice() {
            ["latest"] => Ok(Self::Latest),
            [single] => {
                let block = single
                    .parse::<u64>()
                    .map_err(|_| eyre!("Invalid block number: '{}'", single))?;
                Ok(Self::Single(block))
            }
            [from, to]
                if from.chars().all(|c| c.is_numeric())
                    && to.chars().all(|c| c.is_numeric())
                    && !to.is_empty() =>
            {
                let from = from
                    .parse::<u64>()
                    .map_err(|_| eyre!("Invalid start block: '{}'", from))?;
                let to = to
                    .parse::<u64>()
                    .map_err(|_| eyre!("Invalid end block: '{}'", to))?;

                if from > to {
                    eyre::bail!(
                        "Start block '{}' must be less than or equal to end block '{}'",
                        from,
                        to
                    )
                }

                Ok(Self::Range { from, to })
            }
            [count, to] if *to == "latest" || to.is_empty() => {
                let count = count
                    .parse::<u64>()
                    .map_err(|_| eyre!("Invalid trailing block count: '{}'", count))?;
                if count == 0 {
                    eyre::bail!("Trailing block count must be positive")
                }
                Ok(Self::LastN(count))
            }
            _ => eyre::bail!("Invalid block range format: '{}'", input),
        }
    }
}

impl BlocksSpec {
    /// Resolves the spec against the chain head into a concrete inclusive
    /// range, rejecting blocks past the head.
    pub async fn resolve(&self, provider: &impl Provider) -> Result<BlocksRange> {
        let latest_block = provider
            .get_block_number()
            .await
            .map_err(eyre::Report::from)?;

        let range = match self {
            Self::Latest => BlocksRange {
                from: latest_block,
                to: latest_block,
            },
            Self::Single(block) => {
                if *block > latest_block {
                    eyre::bail!(
                        "Block number '{}' exceeds latest block '{}'",
                        block,
                        latest_block
                    )
                }
                BlocksRange {
                    from: *block,
                    to: *block,
                }
            }
            Self::Range { from, to } => {
                if *to > latest_block {
                    eyre::bail!("End block '{}' exceeds latest block '{}'", to, latest_block)
                }
                BlocksRange {
                    from: *from,
                    to: *to,
                }
            }
            Self::LastN(count) => BlocksRange {
                from: latest_block.saturating_sub(count - 1),
                to: latest_block,
            },
        };

        Ok(range)
    }
}

#[derive(Debug, PartialEq)]
pub struct BlocksRange {
    pub from: u64,
    pub to: u64,
}

impl BlocksRange {
    pub fn size(&self) -> u64 {
        if self.from > self.to {
            panic!("Invalid block range")
        }

        self.to - self.from + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_block() {
        let spec = BlocksSpec::from_str("12965000").unwrap();
        assert_eq!(spec, BlocksSpec::Single(12965000));
    }

    #[test]
    fn test_numeric_block_range() {
        let spec = BlocksSpec::from_str("12965000:12965010").unwrap();
        assert_eq!(
            spec,
            BlocksSpec::Range {
                from: 12965000,
                to: 12965010
            }
        );
    }

    #[test]
    fn test_latest() {
        let spec = BlocksSpec::from_str("latest").unwrap();
        assert_eq!(spec, BlocksSpec::Latest);
    }

    #[test]
    fn test_trailing_count() {
        assert_eq!(BlocksSpec::from_str("5:").unwrap(), BlocksSpec::LastN(5));
        assert_eq!(
            BlocksSpec::from_str("5:latest").unwrap(),
            BlocksSpec::LastN(5)
        );
    }

    #[test]
    fn test_reversed_range_rejected() {
        let result = BlocksSpec::from_str("100:50");
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_input_rejected() {
        assert!(BlocksSpec::from_str("abc").is_err());
        assert!(BlocksSpec::from_str("1:2:3").is_err());
        assert!(BlocksSpec::from_str("0:").is_err());
    }

    #[test]
    fn test_range_size() {
        let range = BlocksRange { from: 10, to: 12 };
        assert_eq!(range.size(), 3);
    }
}
