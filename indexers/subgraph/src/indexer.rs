//! Sequential block processing.
//!
//! Blocks are handled one at a time in strictly increasing height. A block
//! is mapped in full before anything is written, and the write is atomic,
//! so a failing block leaves the store exactly as it was.

use tracing::{info, warn};

use crate::block_walker::{block_context, Block};
use crate::mapper::{map_block, MapError};
use crate::store::{EntityStore, StoreError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IndexerError {
    #[error("block {block} is not after last indexed block {last}")]
    OutOfOrder { block: u64, last: u64 },
    #[error(transparent)]
    Map(#[from] MapError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSummary {
    pub block_number: u64,
    pub block_hash: String,
    pub entities: usize,
}

pub struct Indexer<S> {
    store: S,
    contract_filter: Option<String>,
    last_block: Option<u64>,
}

impl<S: EntityStore> Indexer<S> {
    pub fn new(store: S, contract_filter: Option<String>) -> Self {
        Self {
            store,
            contract_filter: contract_filter.map(|c| c.to_ascii_lowercase()),
            last_block: None,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn last_block(&self) -> Option<u64> {
        self.last_block
    }

    pub fn process_block(&mut self, block: &Block) -> Result<BlockSummary, IndexerError> {
        if let Some(last) = self.last_block {
            if block.number <= last {
                warn!(block = block.number, last, "Rejecting out-of-order block");
                return Err(IndexerError::OutOfOrder {
                    block: block.number,
                    last,
                });
            }
        }

        let entities = map_block(block, self.contract_filter.as_deref()).inspect_err(|e| {
            warn!(block = block.number, error = %e, "Block mapping failed");
        })?;
        let count = entities.len();

        self.store.insert_all(entities).inspect_err(|e| {
            warn!(block = block.number, error = %e, "Block rejected by store");
        })?;
        self.last_block = Some(block.number);

        let ctx = block_context(block);
        info!(block = ctx.block_number, hash = %ctx.block_hash, entities = count, "Indexed block");
        Ok(BlockSummary {
            block_number: ctx.block_number,
            block_hash: ctx.block_hash,
            entities: count,
        })
    }
}
