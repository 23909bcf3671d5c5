//! Daocean Subgraph Module
//!
//! Indexes MultiDAOTreasury contract events. Every event becomes exactly one
//! write-once entity keyed by transaction hash + log index, driven by the
//! field-mapping table in `daocean-types`.
//!
//! Pipeline:
//!   1. block_walker: iterate a host-delivered block's decoded logs
//!   2. decoder: typed parameter decoding per mapping-table row
//!   3. mapper: one entity per event, provenance attached
//!   4. indexer: sequential, atomic per-block writes into a store
//!   5. graph_out: EntityChanges for a graph-node sink
//!   6. query: read-only collection queries over the store

pub mod block_walker;
pub mod decoder;
pub mod graph_out;
pub mod indexer;
pub mod mapper;
pub mod query;
pub mod store;

#[cfg(test)]
mod tests;

pub use block_walker::{parse_contract_filter, Block, Log};
pub use decoder::DecodeError;
pub use graph_out::graph_out;
pub use indexer::{BlockSummary, Indexer, IndexerError};
pub use mapper::{map_block, map_event, LogContext, MapError};
pub use query::{execute, EntityQuery, FilterOp, OrderDirection, QueryError};
pub use store::{EntityStore, MemoryStore, StoreError};
