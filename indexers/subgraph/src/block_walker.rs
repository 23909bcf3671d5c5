//! Shared block-walking utilities.
//!
//! The indexing host delivers one block at a time with its contract logs
//! already ABI-decoded into an event name plus named parameters. This is the
//! single place that walks a block's logs; callers only provide mapping logic.

use serde::Deserialize;
use serde_json::{Map, Value};

/// A block as delivered by the indexing host.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub number: u64,
    pub timestamp: u64,
    #[serde(default)]
    pub hash: String,
    #[serde(default)]
    pub logs: Vec<Log>,
}

/// A decoded contract log.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Log {
    #[serde(default)]
    pub address: String,
    pub transaction_hash: String,
    pub log_index: u32,
    pub event: String,
    #[serde(default)]
    pub params: Map<String, Value>,
}

/// Parsed block header metadata shared across all handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockContext {
    pub block_number: u64,
    pub block_timestamp: u64,
    pub block_hash: String,
}

/// A single event log with its transaction context.
pub struct EventLog<'a> {
    pub transaction_hash: &'a str,
    pub log_index: u32,
    pub event: &'a str,
    pub params: &'a Map<String, Value>,
}

/// Extract the contract address filter from a params string.
///
/// Accepts `contract=0xAbC...` or a bare address. Addresses compare
/// case-insensitively; an empty value means no filter.
pub fn parse_contract_filter(params: &str) -> Option<String> {
    let address = match params.split_once('=') {
        Some((_, value)) => value,
        None => params,
    };
    Some(address.trim().to_ascii_lowercase()).filter(|s| !s.is_empty())
}

pub fn block_context(block: &Block) -> BlockContext {
    BlockContext {
        block_number: block.number,
        block_timestamp: block.timestamp,
        block_hash: block.hash.clone(),
    }
}

/// Iterate all logs of a block in log-index order, filtered by contract address.
///
/// ```ignore
/// for_each_event_log(&block, filter.as_deref(), |log| {
///     // map log.event / log.params into an entity
/// });
/// ```
pub fn for_each_event_log<F>(block: &Block, contract_filter: Option<&str>, mut callback: F)
where
    F: FnMut(EventLog<'_>),
{
    let mut logs: Vec<&Log> = block
        .logs
        .iter()
        .filter(|log| match contract_filter {
            Some(filter) => log.address.eq_ignore_ascii_case(filter),
            None => true,
        })
        .collect();
    logs.sort_by_key(|log| log.log_index);

    for log in logs {
        callback(EventLog {
            transaction_hash: &log.transaction_hash,
            log_index: log.log_index,
            event: &log.event,
            params: &log.params,
        });
    }
}
