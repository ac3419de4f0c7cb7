use clap::Parser;
use derive_builder::Builder;

#[derive(Debug, Clone, Parser, Builder)]
#[clap(
    about = "Unpack ABI encoded data into typed values",
    after_help = "Example: jeth unpack uint256,string 0x...",
    override_usage = "jeth unpack <TYPES> <DATA> [OPTIONS]"
)]
pub struct UnpackArgs {
    /// Comma separated types of the encoded values, e.g. `address,uint256[]`.
    #[clap(required = true)]
    pub types: String,

    /// The encoded data as hex. A leading `0x` is optional.
    #[clap(required = true)]
    pub data: String,

    /// Print plain text instead of JSON.
    #[clap(long)]
    pub plain: bool,
}

impl UnpackArgsBuilder {
    pub fn new() -> Self {
        Self { types: Some(String::new()), data: Some(String::new()), plain: Some(false) }
    }
}
