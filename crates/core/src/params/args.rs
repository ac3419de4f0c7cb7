use clap::Parser;
use derive_builder::Builder;
use jeth_config::parse_url_arg;

#[derive(Debug, Clone, Parser, Builder)]
#[clap(
    about = "Fetch the chain id, gas prices, nonces and balance needed to send a transaction",
    override_usage = "jeth params --from <ADDRESS> [OPTIONS]"
)]
pub struct ParamsArgs {
    /// The sending account.
    #[clap(long, required = true)]
    pub from: String,

    /// Seconds to wait for all lookups. Defaults to `rpc_timeout_secs` from the configuration.
    #[clap(long, default_value = "0", hide_default_value = true)]
    pub timeout: u64,

    /// The RPC provider to use. This can be an explicit URL or a reference to a MESC endpoint.
    #[clap(long, short, value_parser = parse_url_arg, default_value = "", hide_default_value = true)]
    pub rpc_url: String,

    /// Print plain text instead of JSON.
    #[clap(long)]
    pub plain: bool,
}

impl ParamsArgsBuilder {
    pub fn new() -> Self {
        Self {
            from: Some(String::new()),
            timeout: Some(0),
            rpc_url: Some(String::new()),
            plain: Some(false),
        }
    }
}
