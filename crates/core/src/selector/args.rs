use clap::Parser;
use derive_builder::Builder;

#[derive(Debug, Clone, Parser, Builder)]
#[clap(
    about = "Hash a method or event signature",
    override_usage = "jeth selector <SIGNATURE> [OPTIONS]"
)]
pub struct SelectorArgs {
    /// The signature, e.g. `transfer(address,uint256)`. Type aliases such as `uint` are
    /// normalized before hashing.
    #[clap(required = true)]
    pub signature: String,

    /// Print plain text instead of JSON.
    #[clap(long)]
    pub plain: bool,
}

impl SelectorArgsBuilder {
    pub fn new() -> Self {
        Self { signature: Some(String::new()), plain: Some(false) }
    }
}
