//! Response types for the query API.

use daocean_subgraph::BlockSummary;
use serde::Serialize;
use serde_json::Value;

/// Response from the ingest endpoint.
#[derive(Serialize)]
pub struct IngestResponse {
    pub success: bool,
    pub block_number: u64,
    pub block_hash: String,
    pub entities: usize,
}

impl From<BlockSummary> for IngestResponse {
    fn from(summary: BlockSummary) -> Self {
        Self {
            success: true,
            block_number: summary.block_number,
            block_hash: summary.block_hash,
            entities: summary.entities,
        }
    }
}

/// Rows of one collection, already serialized.
#[derive(Serialize)]
pub struct CollectionResponse {
    pub success: bool,
    pub collection: &'static str,
    pub count: usize,
    pub data: Vec<Value>,
}

#[derive(Serialize)]
pub struct EntityResponse {
    pub success: bool,
    pub data: Value,
}

/// Response from the health endpoint.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub uptime_secs: u64,
    pub requests: u64,
    pub blocks_indexed: u64,
    pub last_block: Option<u64>,
    pub entities: usize,
}
