mod args;

use std::time::Instant;

use alloy::primitives::B256;
use jeth_abi::{Event, TypedValue};
use serde::Serialize;
use tracing::debug;

pub use args::{EventArgs, EventArgsBuilder};

use crate::{
    error::Error,
    output::CommandOutput,
    utils::{parse_hex, split_method},
};

/// The event signature and its decoded parameters, indexed ones first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventResult {
    pub event: String,
    pub values: Vec<TypedValue>,
}

impl CommandOutput for EventResult {
    fn plain(&self) -> String {
        let mut lines = vec![format!("event: {}", self.event)];
        lines.extend(self.values.iter().map(|value| value.to_string()));
        lines.join("\n")
    }
}

/// Decodes a single log of the event described by `args.event` and `args.data_types`.
///
/// Indexed strings, byte strings and arrays are only present in the log as their hash, so they
/// are returned as the raw `bytes32` topic.
pub fn event(args: EventArgs) -> Result<EventResult, Error> {
    let start_time = Instant::now();

    let (name, indexed) = split_method(&args.event)?;
    let event = Event::new(name, &[indexed], &[args.data_types.as_str()])?;

    let topics = args
        .topics
        .iter()
        .map(|topic| {
            topic
                .trim()
                .parse::<B256>()
                .map_err(|e| Error::ParseError(format!("invalid topic '{topic}': {e}")))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let data = parse_hex(&args.data, "log data")?;

    let values = event.decode_log(&topics, &data)?.ok_or_else(|| {
        Error::ParseError(format!(
            "topic 0 of the log is not the id of {} ({})",
            event.hash.signature,
            event.id()
        ))
    })?;

    debug!("decoding log of {} took {:?}", event.hash.signature, start_time.elapsed());
    Ok(EventResult { event: event.hash.signature, values })
}
