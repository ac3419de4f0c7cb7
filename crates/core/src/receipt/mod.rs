mod args;

use std::time::Instant;

use alloy::{primitives::B256, rpc::types::TransactionReceipt};
use jeth_abi::{Event, LogEntry, TypedValue};
use jeth_common::{ether::rpc::transaction_receipt, utils::hex::ToLowerHex};
use serde::Serialize;
use tracing::{debug, info};

pub use args::{ReceiptArgs, ReceiptArgsBuilder};

use crate::{error::Error, output::CommandOutput, utils::split_method};

/// A log emitted by the transaction, with hex encoded topics and data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceiptLog {
    pub address: String,
    pub topics: Vec<String>,
    pub data: String,
}

/// The parts of a transaction receipt jeth prints, plus the decoded logs when an event was
/// given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptResult {
    pub transaction_hash: String,
    pub block_number: Option<u64>,
    pub status: bool,
    pub from: String,
    pub to: Option<String>,
    pub contract_address: Option<String>,
    pub gas_used: u64,
    pub logs: Vec<ReceiptLog>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decoded: Option<Vec<Vec<TypedValue>>>,
}

impl CommandOutput for ReceiptResult {
    fn plain(&self) -> String {
        let or_none = |value: &Option<String>| value.clone().unwrap_or_else(|| "none".to_string());

        let mut lines = vec![
            format!("transaction hash: {}", self.transaction_hash),
            format!(
                "block number: {}",
                self.block_number.map(|n| n.to_string()).unwrap_or_else(|| "pending".to_string())
            ),
            format!("status: {}", if self.status { "success" } else { "reverted" }),
            format!("from: {}", self.from),
            format!("to: {}", or_none(&self.to)),
            format!("contract address: {}", or_none(&self.contract_address)),
            format!("gas used: {}", self.gas_used),
            format!("logs: {}", self.logs.len()),
        ];

        for (i, log) in self.logs.iter().enumerate() {
            lines.push(format!("log {i}: {}", log.address));
            lines.extend(log.topics.iter().map(|topic| format!("  topic: {topic}")));
            lines.push(format!("  data: {}", log.data));
        }

        if let Some(decoded) = &self.decoded {
            for (i, values) in decoded.iter().enumerate() {
                let values = values.iter().map(|value| value.to_string()).collect::<Vec<_>>();
                lines.push(format!("decoded {i}: [{}]", values.join(", ")));
            }
        }

        lines.join("\n")
    }
}

/// Fetches the receipt of `args.hash`. If `args.event` is set, every log emitted as that event is
/// decoded, and a receipt without any such log is an error.
pub async fn receipt(args: ReceiptArgs) -> Result<ReceiptResult, Error> {
    let start_time = Instant::now();

    let hash = parse_hash(&args.hash)?;
    let event = match args.event.trim() {
        "" => None,
        event => {
            let (name, indexed) = split_method(event)?;
            Some(Event::new(name, &[indexed], &[args.data_types.as_str()])?)
        }
    };

    info!("fetching receipt of {}", hash);
    let receipt = transaction_receipt(&args.rpc_url, hash).await?;
    let mut result = receipt_result(&receipt);

    if let Some(event) = event {
        let decoded = event.decode_logs(&log_entries(&receipt))?;
        result.decoded = Some(decoded);
    }

    debug!("fetching receipt took {:?}", start_time.elapsed());
    Ok(result)
}

fn parse_hash(hash: &str) -> Result<B256, Error> {
    let hash = hash.trim();
    if !(hash.starts_with("0x") || hash.starts_with("0X")) {
        return Err(Error::ParseError(format!("transaction hash '{hash}' needs to start with 0x")));
    }

    hash.parse::<B256>()
        .map_err(|e| Error::ParseError(format!("invalid transaction hash '{hash}': {e}")))
}

fn log_entries(receipt: &TransactionReceipt) -> Vec<LogEntry> {
    receipt
        .inner
        .logs()
        .iter()
        .map(|log| LogEntry {
            topics: log.inner.data.topics().to_vec(),
            data: log.inner.data.data.to_vec(),
        })
        .collect()
}

fn receipt_result(receipt: &TransactionReceipt) -> ReceiptResult {
    let logs = receipt
        .inner
        .logs()
        .iter()
        .map(|log| ReceiptLog {
            address: log.inner.address.to_string(),
            topics: log.inner.data.topics().iter().map(|topic| topic.to_lower_hex()).collect(),
            data: log.inner.data.data.to_vec().to_lower_hex(),
        })
        .collect();

    ReceiptResult {
        transaction_hash: receipt.transaction_hash.to_lower_hex(),
        block_number: receipt.block_number,
        status: receipt.inner.status(),
        from: receipt.from.to_string(),
        to: receipt.to.map(|to| to.to_string()),
        contract_address: receipt.contract_address.map(|address| address.to_string()),
        gas_used: receipt.gas_used,
        logs,
        decoded: None,
    }
}
