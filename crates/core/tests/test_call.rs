//! Integration tests for the commands that talk to a node. Tests needing a live endpoint read
//! it from `RPC_URL` and are skipped when it is unset.

#[cfg(test)]
mod integration_tests {
    use jeth_core::{
        block_number, call, chain_id, params, tx_count, AccountArgsBuilder, BlockTag,
        CallArgsBuilder, ChainArgsBuilder, Error, ParamsArgsBuilder, Unit,
    };

    const DAI: &str = "0x6b175474e89094c44da98b954eedeac495271d0f";

    #[tokio::test]
    async fn test_call_rejects_bad_arguments_before_connecting() {
        let args = CallArgsBuilder::new()
            .method("balanceOf:address".to_string())
            .values(vec![DAI.to_string()])
            .to("0x1234".to_string())
            .build()
            .expect("failed to build args");
        assert!(matches!(call(args).await, Err(Error::ParseError(msg)) if msg.contains("--to")));

        let args = CallArgsBuilder::new()
            .method("balanceOf:address".to_string())
            .values(vec![DAI.to_string()])
            .to(DAI.to_string())
            .value("1".to_string())
            .unit(Unit::Eth)
            .output_types("uint7".to_string())
            .build()
            .expect("failed to build args");
        assert!(matches!(call(args).await, Err(Error::AbiError(_))));
    }

    #[tokio::test]
    async fn test_call_without_endpoint() {
        let args = CallArgsBuilder::new()
            .method("totalSupply:".to_string())
            .to(DAI.to_string())
            .build()
            .expect("failed to build args");
        assert!(matches!(call(args).await, Err(Error::RpcError(_))));
    }

    #[tokio::test]
    async fn test_call_total_supply() {
        let Ok(rpc_url) = std::env::var("RPC_URL") else {
            println!("RPC_URL not set, skipping test");
            return;
        };

        let args = CallArgsBuilder::new()
            .method("totalSupply:".to_string())
            .to(DAI.to_string())
            .output_types("uint256".to_string())
            .rpc_url(rpc_url)
            .build()
            .expect("failed to build args");

        let result = call(args).await.expect("failed to call");
        assert_eq!(result.result.len(), 2 + 64);
        let unpacked = result.unpacked.expect("result should unpack");
        assert_eq!(unpacked[0].ty, "uint256");
    }

    #[tokio::test]
    async fn test_call_keeps_result_that_does_not_unpack() {
        let Ok(rpc_url) = std::env::var("RPC_URL") else {
            println!("RPC_URL not set, skipping test");
            return;
        };

        // a single word can't hold a (uint256,uint256) pair
        let args = CallArgsBuilder::new()
            .method("totalSupply:".to_string())
            .to(DAI.to_string())
            .output_types("uint256,uint256".to_string())
            .rpc_url(rpc_url)
            .build()
            .expect("failed to build args");

        let result = call(args).await.expect("failed to call");
        assert_eq!(result.result.len(), 2 + 64);
        assert!(result.unpacked.is_none());
    }

    #[tokio::test]
    async fn test_params_rejects_bad_sender() {
        let args = ParamsArgsBuilder::new()
            .from("not an address".to_string())
            .build()
            .expect("failed to build args");
        assert!(matches!(params(args).await, Err(Error::ParseError(_))));
    }

    #[tokio::test]
    async fn test_params() {
        let Ok(rpc_url) = std::env::var("RPC_URL") else {
            println!("RPC_URL not set, skipping test");
            return;
        };

        let args = ParamsArgsBuilder::new()
            .from(DAI.to_string())
            .rpc_url(rpc_url)
            .timeout(30)
            .build()
            .expect("failed to build args");

        let result = params(args).await.expect("failed to fetch params");
        assert!(result.params.chain_id > 0);
        assert!(result.params.tx_count_pending >= result.params.tx_count);
    }

    #[tokio::test]
    async fn test_call_at_pending_block() {
        let Ok(rpc_url) = std::env::var("RPC_URL") else {
            println!("RPC_URL not set, skipping test");
            return;
        };

        let args = CallArgsBuilder::new()
            .method("decimals:".to_string())
            .to(DAI.to_string())
            .tag(BlockTag::Pending)
            .output_types("uint8".to_string())
            .rpc_url(rpc_url)
            .build()
            .expect("failed to build args");

        let result = call(args).await.expect("failed to call");
        let unpacked = result.unpacked.expect("result should unpack");
        assert_eq!(unpacked[0].to_string(), "uint8 18");
    }

    #[tokio::test]
    async fn test_node_lookups() {
        let Ok(rpc_url) = std::env::var("RPC_URL") else {
            println!("RPC_URL not set, skipping test");
            return;
        };

        let args = ChainArgsBuilder::new()
            .rpc_url(rpc_url.clone())
            .build()
            .expect("failed to build args");
        assert!(!chain_id(args.clone()).await.expect("failed to fetch chain id").value.is_zero());
        assert!(!block_number(args).await.expect("failed to fetch block number").value.is_zero());

        let latest = AccountArgsBuilder::new()
            .address(DAI.to_string())
            .rpc_url(rpc_url.clone())
            .build()
            .expect("failed to build args");
        let pending = AccountArgsBuilder::new()
            .address(DAI.to_string())
            .tag(BlockTag::Pending)
            .rpc_url(rpc_url)
            .build()
            .expect("failed to build args");

        let latest = tx_count(latest).await.expect("failed to fetch tx count");
        let pending = tx_count(pending).await.expect("failed to fetch tx count");
        assert!(pending.value >= latest.value);
    }
}
