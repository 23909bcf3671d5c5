//! Event → entity mapping.
//!
//! A single table-driven handler replaces one hand-written handler per event:
//! the event name selects a row of the field-mapping table, every listed
//! parameter is copied into the same-named entity field, and the provenance
//! fields are attached uniformly.

use daocean_types::{entity_id, Entity, EventKind, Provenance};
use serde_json::{Map, Value as Json};
use tracing::debug;

use crate::block_walker::{block_context, for_each_event_log, Block};
use crate::decoder::{decode_params, DecodeError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    #[error("log {transaction_hash}:{log_index}: {source}")]
    Decode {
        transaction_hash: String,
        log_index: u32,
        #[source]
        source: DecodeError,
    },
}

/// Host-provided context of a single log.
#[derive(Debug, Clone, Copy)]
pub struct LogContext<'a> {
    pub transaction_hash: &'a str,
    pub log_index: u32,
    pub block_number: u64,
    pub block_timestamp: u64,
}

/// Map one event into its entity.
///
/// Returns `Ok(None)` for events outside the MultiDAOTreasury table.
pub fn map_event(
    event: &str,
    params: &Map<String, Json>,
    ctx: LogContext<'_>,
) -> Result<Option<Entity>, MapError> {
    let Some(kind) = EventKind::from_name(event) else {
        debug!(
            event,
            tx = ctx.transaction_hash,
            log_index = ctx.log_index,
            "Skipping unknown event"
        );
        return Ok(None);
    };

    let fields = decode_params(kind, params).map_err(|source| MapError::Decode {
        transaction_hash: ctx.transaction_hash.to_string(),
        log_index: ctx.log_index,
        source,
    })?;

    Ok(Some(Entity::new(
        entity_id(ctx.transaction_hash, ctx.log_index),
        kind,
        fields,
        Provenance {
            block_number: ctx.block_number,
            block_timestamp: ctx.block_timestamp,
            transaction_hash: ctx.transaction_hash.to_string(),
        },
    )))
}

/// Map every matching log of a block, in log-index order.
///
/// The first mapping failure aborts the whole block.
pub fn map_block(block: &Block, contract_filter: Option<&str>) -> Result<Vec<Entity>, MapError> {
    let ctx = block_context(block);
    let mut entities = Vec::new();
    let mut failure = None;

    for_each_event_log(block, contract_filter, |log| {
        if failure.is_some() {
            return;
        }
        let log_ctx = LogContext {
            transaction_hash: log.transaction_hash,
            log_index: log.log_index,
            block_number: ctx.block_number,
            block_timestamp: ctx.block_timestamp,
        };
        match map_event(log.event, log.params, log_ctx) {
            Ok(Some(entity)) => entities.push(entity),
            Ok(None) => {}
            Err(e) => failure = Some(e),
        }
    });

    match failure {
        Some(e) => Err(e),
        None => Ok(entities),
    }
}
