use std::fmt::{self, Display};

use clap::{Parser, ValueEnum};
use derive_builder::Builder;
use jeth_common::ether::provider::BlockTag;
use jeth_config::parse_url_arg;

#[derive(Debug, Clone, Parser, Builder)]
#[clap(
    about = "Call a contract method with eth_call and unpack its result",
    after_help = "Example: jeth call --to 0x6b175474e89094c44da98b954eedeac495271d0f --output-types uint256 balanceOf:address 0x...",
    override_usage = "jeth call --to <ADDRESS> <METHOD> [VALUES]... [OPTIONS]"
)]
pub struct CallArgs {
    /// The method name and its comma separated parameter types, e.g. `balanceOf:address`.
    #[clap(required = true)]
    pub method: String,

    /// One value per parameter. Array, slice and tuple values are comma separated.
    #[clap(required = false, allow_hyphen_values = true)]
    pub values: Vec<String>,

    /// The contract to call.
    #[clap(long, required = true)]
    pub to: String,

    /// The sender of the call.
    #[clap(long, default_value = "", hide_default_value = true)]
    pub from: String,

    /// Amount of ether sent with the call, as a decimal or `0x` prefixed integer in `--unit`.
    #[clap(long, default_value = "", hide_default_value = true)]
    pub value: String,

    /// The unit of `--value`.
    #[clap(long, value_enum, default_value_t = Unit::Wei)]
    pub unit: Unit,

    /// The block to call against: `latest` or `pending`.
    #[clap(long, default_value = "latest")]
    pub tag: BlockTag,

    /// Comma separated return types. The raw result is printed either way.
    #[clap(long = "output-types", default_value = "", hide_default_value = true)]
    pub output_types: String,

    /// The RPC provider to use. This can be an explicit URL or a reference to a MESC endpoint.
    #[clap(long, short, value_parser = parse_url_arg, default_value = "", hide_default_value = true)]
    pub rpc_url: String,

    /// Print plain text instead of JSON.
    #[clap(long)]
    pub plain: bool,
}

impl CallArgsBuilder {
    pub fn new() -> Self {
        Self {
            method: Some(String::new()),
            values: Some(Vec::new()),
            to: Some(String::new()),
            from: Some(String::new()),
            value: Some(String::new()),
            unit: Some(Unit::Wei),
            tag: Some(BlockTag::Latest),
            output_types: Some(String::new()),
            rpc_url: Some(String::new()),
            plain: Some(false),
        }
    }
}

/// Denomination of an ether amount.
#[derive(Debug, Copy, Clone, ValueEnum, Eq, PartialEq)]
pub enum Unit {
    /// The base unit.
    Wei,
    /// 10^9 wei.
    Gwei,
    /// 10^18 wei.
    Eth,
}

impl Unit {
    /// Number of wei in one unit.
    pub fn wei(&self) -> u64 {
        match self {
            Unit::Wei => 1,
            Unit::Gwei => 1_000_000_000,
            Unit::Eth => 1_000_000_000_000_000_000,
        }
    }
}

impl Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Wei => write!(f, "wei"),
            Unit::Gwei => write!(f, "gwei"),
            Unit::Eth => write!(f, "eth"),
        }
    }
}
