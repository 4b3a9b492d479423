#[cfg(test)]
pub mod tests {
    use std::process::Command;

    use eyre::Result;

    // Live tests run only when ETH_RPC_URL points at an archive node that
    // supports trace_block (e.g. an Erigon or Reth endpoint).
    fn rpc_url() -> Option<String> {
        std::env::var("ETH_RPC_URL").ok()
    }

    #[test]
    fn test_cli_block_rewards() -> Result<()> {
        let Some(rpc_url) = rpc_url() else {
            return Ok(());
        };

        // Block 12965000 (London activation) paid a 2 ETH base reward plus
        // fees to the miner and included one uncle.
        let cmd = Command::new("cargo")
            .arg("run")
            .arg("--bin")
            .arg("rewardlog")
            .arg("block")
            .arg("12965000")
            .arg("--rpc-url")
            .arg(rpc_url)
            .output()
            .expect("failed to execute CLI");

        let output = String::from_utf8(cmd.stdout).unwrap();
        let expected_content = ["Rewards by miner:", "Rewards by uncle:"];
        for expected in expected_content {
            assert!(
                output.contains(expected),
                "Expected:\n{expected}\n\nGot:\n{output}"
            );
        }

        Ok(())
    }

    #[test]
    fn test_cli_block_rewards_json() -> Result<()> {
        let Some(rpc_url) = rpc_url() else {
            return Ok(());
        };

        let cmd = Command::new("cargo")
            .arg("run")
            .arg("--bin")
            .arg("rewardlog")
            .arg("block")
            .arg("12965000")
            .arg("--format")
            .arg("json")
            .arg("--rpc-url")
            .arg(rpc_url)
            .output()
            .expect("failed to execute CLI");

        let output = String::from_utf8(cmd.stdout).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(output.trim())?;

        assert_eq!(parsed["block_number"], 12965000);
        assert!(parsed["rewards_by_miner"].is_array());

        Ok(())
    }

    #[test]
    fn test_cli_chains() -> Result<()> {
        let cmd = Command::new("cargo")
            .arg("run")
            .arg("--bin")
            .arg("rewardlog")
            .arg("chains")
            .output()
            .expect("failed to execute CLI");

        let output = String::from_utf8(cmd.stdout).unwrap();
        assert!(
            output.contains("mainnet"),
            "Expected chain listing, got:\n{output}"
        );

        Ok(())
    }
}
