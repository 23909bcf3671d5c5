mod mapper_tests;

use crate::block_walker::Block;
use serde_json::{json, Value};

/// A block of DAOCreated / FundsDeposited logs for a single contract.
pub(crate) fn block(number: u64, logs: Value) -> Block {
    serde_json::from_value(json!({
        "number": number,
        "timestamp": 1_700_000_000u64 + number,
        "hash": format!("0xb{number}"),
        "logs": logs,
    }))
    .unwrap()
}

pub(crate) fn dao_created_log(
    tx: &str,
    log_index: u32,
    dao_id: u64,
    name: &str,
    owner: &str,
) -> Value {
    json!({
        "address": "0xtreasury",
        "transactionHash": tx,
        "logIndex": log_index,
        "event": "DAOCreated",
        "params": {"daoId": dao_id.to_string(), "name": name, "owner": owner},
    })
}

pub(crate) fn deposit_log(
    tx: &str,
    log_index: u32,
    dao_id: u64,
    member: &str,
    amount: &str,
) -> Value {
    json!({
        "address": "0xtreasury",
        "transactionHash": tx,
        "logIndex": log_index,
        "event": "FundsDeposited",
        "params": {"daoId": dao_id.to_string(), "member": member, "amount": amount},
    })
}
