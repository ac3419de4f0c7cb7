use clap::Parser;
use derive_builder::Builder;
use jeth_config::parse_url_arg;

#[derive(Debug, Clone, Parser, Builder)]
#[clap(
    about = "Fetch a transaction receipt and optionally decode its logs",
    after_help = "Example: jeth receipt 0x... --event Transfer:address,address --data-types uint256",
    override_usage = "jeth receipt <HASH> [--event <EVENT> [--data-types <TYPES>]] [OPTIONS]"
)]
pub struct ReceiptArgs {
    /// The `0x` prefixed transaction hash.
    #[clap(required = true)]
    pub hash: String,

    /// Decode the logs of this event, given as its name and comma separated indexed parameter
    /// types, e.g. `Transfer:address,address`.
    #[clap(long, default_value = "", hide_default_value = true)]
    pub event: String,

    /// Comma separated types of the event's non-indexed parameters.
    #[clap(long = "data-types", default_value = "", hide_default_value = true)]
    pub data_types: String,

    /// The RPC provider to use. This can be an explicit URL or a reference to a MESC endpoint.
    #[clap(long, short, value_parser = parse_url_arg, default_value = "", hide_default_value = true)]
    pub rpc_url: String,

    /// Print plain text instead of JSON.
    #[clap(long)]
    pub plain: bool,
}

impl ReceiptArgsBuilder {
    pub fn new() -> Self {
        Self {
            hash: Some(String::new()),
            event: Some(String::new()),
            data_types: Some(String::new()),
            rpc_url: Some(String::new()),
            plain: Some(false),
        }
    }
}
