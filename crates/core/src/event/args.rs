use clap::Parser;
use derive_builder::Builder;

#[derive(Debug, Clone, Parser, Builder)]
#[clap(
    about = "Decode an event log from its topics and data",
    after_help = "Topics are given in log order, the event id first.",
    override_usage = "jeth event <EVENT> --topic <TOPIC>... [--data-types <TYPES> --data <DATA>] [OPTIONS]"
)]
pub struct EventArgs {
    /// The event name and its comma separated indexed parameter types, e.g.
    /// `Transfer:address,address`.
    #[clap(required = true)]
    pub event: String,

    /// Comma separated types of the non-indexed parameters.
    #[clap(long = "data-types", default_value = "", hide_default_value = true)]
    pub data_types: String,

    /// A log topic as 32 byte hex. Repeat for every topic.
    #[clap(long = "topic", required = true)]
    pub topics: Vec<String>,

    /// The log data as hex.
    #[clap(long, default_value = "", hide_default_value = true)]
    pub data: String,

    /// Print plain text instead of JSON.
    #[clap(long)]
    pub plain: bool,
}

impl EventArgsBuilder {
    pub fn new() -> Self {
        Self {
            event: Some(String::new()),
            data_types: Some(String::new()),
            topics: Some(Vec::new()),
            data: Some(String::new()),
            plain: Some(false),
        }
    }
}
