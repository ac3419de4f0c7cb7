mod args;

use std::time::Instant;

use jeth_abi::{pack_values, Method};
use jeth_common::utils::strings::encode_hex;
use serde::Serialize;
use tracing::debug;

pub use args::{PackArgs, PackArgsBuilder};

use crate::{error::Error, output::CommandOutput, utils::split_method};

/// The method signature, its 4 byte id and the packed arguments, hex encoded without a prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackResult {
    pub method_sig: String,
    pub method_hashed: String,
    pub packed_values: String,
}

impl CommandOutput for PackResult {
    fn plain(&self) -> String {
        format!(
            "method signature: {}\nhashed method: {}\npacked values: {}",
            self.method_sig, self.method_hashed, self.packed_values
        )
    }
}

/// Coerces `args.values` into the method's parameter types and packs them.
///
/// The call data of the method is `method_hashed ++ packed_values`.
pub fn pack(args: PackArgs) -> Result<PackResult, Error> {
    let start_time = Instant::now();

    let (name, types) = split_method(&args.method)?;
    let method = Method::new(name, &[types], &[])?;
    let packed = pack_values(&method.inputs, &args.values)?;

    debug!("packing {} took {:?}", method.selector.signature, start_time.elapsed());
    Ok(PackResult {
        method_hashed: encode_hex(method.id().as_slice()),
        packed_values: encode_hex(&packed),
        method_sig: method.selector.signature,
    })
}
