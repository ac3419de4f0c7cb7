use clap::Parser;
use derive_builder::Builder;
use jeth_common::ether::provider::BlockTag;
use jeth_config::parse_url_arg;

/// Arguments for lookups that only need a node: `chain-id` and `block-number`.
#[derive(Debug, Clone, Parser, Builder)]
#[clap(about = "Look up a value of the chain", override_usage = "jeth <COMMAND> [OPTIONS]")]
pub struct ChainArgs {
    /// The RPC provider to use. This can be an explicit URL or a reference to a MESC endpoint.
    #[clap(long, short, value_parser = parse_url_arg, default_value = "", hide_default_value = true)]
    pub rpc_url: String,

    /// Print plain text instead of JSON.
    #[clap(long)]
    pub plain: bool,
}

impl ChainArgsBuilder {
    pub fn new() -> Self {
        Self { rpc_url: Some(String::new()), plain: Some(false) }
    }
}

/// Arguments for the fee lookups: `gas-price` and `tip`.
#[derive(Debug, Clone, Parser, Builder)]
#[clap(
    about = "Look up a suggested fee per gas",
    after_help = "Fees are printed in wei unless --gwei is set.",
    override_usage = "jeth <COMMAND> [--gwei] [OPTIONS]"
)]
pub struct FeeArgs {
    /// Print the fee in gwei, rounded down.
    #[clap(long)]
    pub gwei: bool,

    /// The RPC provider to use. This can be an explicit URL or a reference to a MESC endpoint.
    #[clap(long, short, value_parser = parse_url_arg, default_value = "", hide_default_value = true)]
    pub rpc_url: String,

    /// Print plain text instead of JSON.
    #[clap(long)]
    pub plain: bool,
}

impl FeeArgsBuilder {
    pub fn new() -> Self {
        Self { gwei: Some(false), rpc_url: Some(String::new()), plain: Some(false) }
    }
}

/// Arguments for the account lookups: `balance` and `tx-count`.
#[derive(Debug, Clone, Parser, Builder)]
#[clap(
    about = "Look up the state of an account",
    override_usage = "jeth <COMMAND> <ADDRESS> [--tag <TAG>] [OPTIONS]"
)]
pub struct AccountArgs {
    /// The account to look up.
    #[clap(required = true)]
    pub address: String,

    /// The block to read the account at: `latest` or `pending`.
    #[clap(long, default_value = "latest")]
    pub tag: BlockTag,

    /// The RPC provider to use. This can be an explicit URL or a reference to a MESC endpoint.
    #[clap(long, short, value_parser = parse_url_arg, default_value = "", hide_default_value = true)]
    pub rpc_url: String,

    /// Print plain text instead of JSON.
    #[clap(long)]
    pub plain: bool,
}

impl AccountArgsBuilder {
    pub fn new() -> Self {
        Self {
            address: Some(String::new()),
            tag: Some(BlockTag::Latest),
            rpc_url: Some(String::new()),
            plain: Some(false),
        }
    }
}
