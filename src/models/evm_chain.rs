#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub enum EVMChainType {
    Mainnet,
    Classic,
    Sepolia,
    Holesky,
    Gnosis,
    Unknown(u64),
}

#[derive(Debug, Clone)]
pub struct EVMChain {
    pub chain_type: EVMChainType,
    pub rpc_url: String,
}

impl EVMChainType {
    pub fn from_chain_id(chain_id: u64) -> Self {
        match chain_id {
            1 => EVMChainType::Mainnet,
            61 => EVMChainType::Classic,
            11155111 => EVMChainType::Sepolia,
            17000 => EVMChainType::Holesky,
            100 => EVMChainType::Gnosis,
            other => EVMChainType::Unknown(other),
        }
    }

    pub fn chain_id(&self) -> u64 {
        match self {
            EVMChainType::Mainnet => 1,
            EVMChainType::Classic => 61,
            EVMChainType::Sepolia => 11155111,
            EVMChainType::Holesky => 17000,
            EVMChainType::Gnosis => 100,
            EVMChainType::Unknown(chain_id) => *chain_id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            EVMChainType::Mainnet => "mainnet",
            EVMChainType::Classic => "classic",
            EVMChainType::Sepolia => "sepolia",
            EVMChainType::Holesky => "holesky",
            EVMChainType::Gnosis => "gnosis",
            EVMChainType::Unknown(_) => "unknown",
        }
    }

    pub fn currency(&self) -> &str {
        match self {
            EVMChainType::Classic => "ETC",
            EVMChainType::Gnosis => "xDAI",
            _ => "ETH",
        }
    }

    /// First proof-of-stake block. Mining reward traces only exist below this
    /// point; `None` means the chain never transitioned.
    pub fn merge_block(&self) -> Option<u64> {
        match self {
            EVMChainType::Mainnet => Some(15_537_394),
            EVMChainType::Gnosis => Some(25_349_536),
            EVMChainType::Sepolia => Some(1_450_409),
            EVMChainType::Holesky => Some(0),
            EVMChainType::Classic | EVMChainType::Unknown(_) => None,
        }
    }

    pub fn supported() -> Vec<Self> {
        vec![
            EVMChainType::Mainnet,
            EVMChainType::Classic,
            EVMChainType::Sepolia,
            EVMChainType::Holesky,
            EVMChainType::Gnosis,
        ]
    }

    pub fn supported_chains_text() -> String {
        let mut text = String::from("Known chains:\n");
        for chain in Self::supported() {
            text.push_str(&format!(
                "  {} (chain ID {}, {})\n",
                chain.name(),
                chain.chain_id(),
                chain.currency()
            ));
        }
        text.push_str("Other chain IDs are accepted and reported as 'unknown'");
        text
    }
}

impl EVMChain {
    pub fn new(chain_id: u64, rpc_url: String) -> Self {
        Self {
            chain_type: EVMChainType::from_chain_id(chain_id),
            rpc_url,
        }
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_type.chain_id()
    }

    pub fn name(&self) -> &str {
        self.chain_type.name()
    }

    pub fn currency(&self) -> &str {
        self.chain_type.currency()
    }

    pub fn is_post_merge(&self, block_number: u64) -> bool {
        self.chain_type
            .merge_block()
            .is_some_and(|merge_block| block_number >= merge_block)
    }
}
