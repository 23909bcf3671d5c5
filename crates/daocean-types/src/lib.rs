//! Shared data model for the Daocean MultiDAOTreasury indexer.
//! No host or storage dependency: usable by the mapper, the query service
//! and the client-side selection context alike.

mod entity;
mod error;
mod event;
mod selection;
mod value;

pub use entity::{entity_id, Entity, Provenance, PROVENANCE_FIELDS};
pub use error::TypesError;
pub use event::{EventKind, FieldKind, FieldSpec};
pub use selection::DaoSelection;
pub use value::{parse_bytes, parse_u256, u256_dec, Value};

pub use primitive_types::U256;
