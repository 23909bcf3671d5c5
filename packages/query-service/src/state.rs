//! Application state shared across handlers.

use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{RwLock, RwLockReadGuard};
use std::time::Instant;

use daocean_subgraph::{parse_contract_filter, Block, BlockSummary, Indexer, MemoryStore};
use tracing::info;

use crate::config::Config;
use crate::Error;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    indexer: RwLock<Indexer<MemoryStore>>,
    pub start_time: Instant,
    pub request_count: AtomicU64,
    pub blocks_indexed: AtomicU64,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let filter = config.contract_address.as_deref().and_then(parse_contract_filter);
        let indexer = Indexer::new(MemoryStore::new(), filter);
        Self {
            config,
            indexer: RwLock::new(indexer),
            start_time: Instant::now(),
            request_count: AtomicU64::new(0),
            blocks_indexed: AtomicU64::new(0),
        }
    }

    /// Index one block. Blocks are applied one at a time.
    pub fn ingest(&self, block: &Block) -> Result<BlockSummary, Error> {
        let mut indexer = self.indexer.write().map_err(|_| Error::Poisoned)?;
        let summary = indexer.process_block(block)?;
        self.blocks_indexed.fetch_add(1, Ordering::Relaxed);
        Ok(summary)
    }

    pub fn indexer(&self) -> Result<RwLockReadGuard<'_, Indexer<MemoryStore>>, Error> {
        self.indexer.read().map_err(|_| Error::Poisoned)
    }

    /// Index every block of a JSON-lines file, in file order.
    ///
    /// Blank lines are skipped. Stops at the first unreadable or rejected block.
    pub fn replay(&self, path: &Path) -> Result<usize, Error> {
        let file = std::fs::File::open(path)
            .map_err(|e| Error::Config(format!("Failed to open {}: {e}", path.display())))?;

        let mut blocks = 0;
        for (i, line) in BufReader::new(file).lines().enumerate() {
            let line_no = i + 1;
            let line = line.map_err(|e| Error::Replay {
                line: line_no,
                message: e.to_string(),
            })?;
            if line.trim().is_empty() {
                continue;
            }
            let block: Block = serde_json::from_str(&line).map_err(|e| Error::Replay {
                line: line_no,
                message: e.to_string(),
            })?;
            self.ingest(&block).map_err(|e| Error::Replay {
                line: line_no,
                message: e.to_string(),
            })?;
            blocks += 1;
        }

        info!(path = %path.display(), blocks, "Replay complete");
        Ok(blocks)
    }
}
