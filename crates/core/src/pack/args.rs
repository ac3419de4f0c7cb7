use clap::Parser;
use derive_builder::Builder;

#[derive(Debug, Clone, Parser, Builder)]
#[clap(
    about = "Pack method arguments into ABI encoded call data",
    after_help = "Example: jeth pack transfer:address,uint256 0x6b175474e89094c44da98b954eedeac495271d0f 1000",
    override_usage = "jeth pack <METHOD> [VALUES]... [OPTIONS]"
)]
pub struct PackArgs {
    /// The method name and its comma separated parameter types, e.g. `transfer:address,uint256`.
    #[clap(required = true)]
    pub method: String,

    /// One value per parameter. Array, slice and tuple values are comma separated.
    #[clap(required = false, allow_hyphen_values = true)]
    pub values: Vec<String>,

    /// Print plain text instead of JSON.
    #[clap(long)]
    pub plain: bool,
}

impl PackArgsBuilder {
    pub fn new() -> Self {
        Self { method: Some(String::new()), values: Some(Vec::new()), plain: Some(false) }
    }
}
