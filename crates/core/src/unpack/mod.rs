mod args;

use std::time::Instant;

use jeth_abi::{parse_type_list, TypedValue};
use serde::Serialize;
use tracing::debug;

pub use args::{UnpackArgs, UnpackArgsBuilder};

use crate::{
    error::Error,
    output::CommandOutput,
    utils::parse_hex,
};

/// The decoded values, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct UnpackResult {
    pub values: Vec<TypedValue>,
}

impl CommandOutput for UnpackResult {
    fn plain(&self) -> String {
        self.values.iter().map(|value| value.to_string()).collect::<Vec<_>>().join("\n")
    }
}

/// Decodes `args.data` as a tuple of `args.types`.
pub fn unpack(args: UnpackArgs) -> Result<UnpackResult, Error> {
    let start_time = Instant::now();

    let types = parse_type_list(&args.types)?;
    let data = parse_hex(&args.data, "data")?;
    let values = jeth_abi::unpack(&types, &data)?;

    debug!("unpacking {} bytes took {:?}", data.len(), start_time.elapsed());
    Ok(UnpackResult { values })
}
