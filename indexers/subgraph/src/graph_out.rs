//! Entity Changes output for a Substreams-powered Subgraph
//!
//! Converts mapped entities to the EntityChanges format graph-node consumes
//! directly, so graph-node can act as the backing store. Table and field names
//! match `schema.graphql`.
//!
//! Library-only: the query service keeps its own store and never emits
//! EntityChanges. A graph-node sink calls `graph_out` on each block's
//! `map_block` output.

use daocean_types::{Entity, Value};
use substreams_entity_change::pb::entity::EntityChanges;
use substreams_entity_change::tables::Tables;

/// One `create` per entity; entities are never updated or deleted.
pub fn graph_out(entities: &[Entity]) -> EntityChanges {
    let mut tables = Tables::new();

    for entity in entities {
        write_entity(&mut tables, entity);
    }

    tables.to_entity_changes()
}

pub(crate) fn write_entity(tables: &mut Tables, entity: &Entity) {
    let row = tables.create_row(entity.kind().name(), entity.id());

    for (name, value) in entity.fields() {
        match value {
            Value::BigInt(v) => {
                row.set_bigint(*name, &v.to_string());
            }
            Value::Int(v) => {
                row.set(*name, *v);
            }
            Value::String(s) => {
                row.set(*name, s);
            }
            Value::Bytes(_) => {
                row.set(*name, value.to_string());
            }
        }
    }

    let provenance = entity.provenance();
    row.set_bigint("blockNumber", &provenance.block_number.to_string());
    row.set_bigint("blockTimestamp", &provenance.block_timestamp.to_string());
    row.set("transactionHash", &provenance.transaction_hash);
}
