//! # Daocean query service
//!
//! Hosts the MultiDAOTreasury indexer: the indexing host posts blocks, the
//! frontend reads entity collections.
//!
//! ## Endpoints
//! - `GET /health` - Health check with indexing progress
//! - `POST /blocks` - Index one block of decoded logs
//! - `GET /entities/{collection}` - Filtered, ordered, paginated collection
//! - `GET /entities/{collection}/{id}` - Single entity
//! - `GET /daos` - DAOs of `?owner=`, or the most recent DAOs
//! - `GET /daos/{dao_id}/{collection}` - DAO-scoped collection

pub mod config;
mod error;
mod handlers;
mod response;
mod router;
mod state;

pub use config::Config;
pub use error::Error;
pub use router::create as create_router;
pub use state::AppState;
