//! Indexed entities: one per emitted contract event.

use primitive_types::U256;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::event::{EventKind, FieldKind};
use crate::value::Value;

/// Provenance field names, appended to every entity after its domain fields.
pub const PROVENANCE_FIELDS: [(&str, FieldKind); 3] = [
    ("blockNumber", FieldKind::BigInt),
    ("blockTimestamp", FieldKind::BigInt),
    ("transactionHash", FieldKind::String),
];

/// Where an entity came from on chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provenance {
    pub block_number: u64,
    pub block_timestamp: u64,
    pub transaction_hash: String,
}

/// Entity id: transaction hash followed by the decimal log index.
///
/// Transaction hashes are fixed-width on chain, so the concatenation is
/// unique per emitted log even within one transaction.
pub fn entity_id(transaction_hash: &str, log_index: u32) -> String {
    format!("{transaction_hash}{log_index}")
}

/// An immutable, write-once record derived from one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    id: String,
    kind: EventKind,
    fields: Vec<(&'static str, Value)>,
    provenance: Provenance,
}

impl Entity {
    /// `fields` must follow `kind.fields()` order; the mapper guarantees it.
    pub fn new(
        id: String,
        kind: EventKind,
        fields: Vec<(&'static str, Value)>,
        provenance: Provenance,
    ) -> Self {
        Self {
            id,
            kind,
            fields,
            provenance,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Domain fields in mapping-table order.
    pub fn fields(&self) -> &[(&'static str, Value)] {
        &self.fields
    }

    pub fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    /// Resolve any queryable attribute: `id`, a domain field, or a provenance field.
    pub fn get(&self, name: &str) -> Option<Value> {
        match name {
            "id" => Some(Value::String(self.id.clone())),
            "blockNumber" => Some(Value::BigInt(U256::from(self.provenance.block_number))),
            "blockTimestamp" => Some(Value::BigInt(U256::from(self.provenance.block_timestamp))),
            "transactionHash" => Some(Value::String(self.provenance.transaction_hash.clone())),
            other => self.field(other).cloned(),
        }
    }

    /// Kind of a queryable attribute of `kind`, if it exists.
    pub fn attribute_kind(kind: EventKind, name: &str) -> Option<FieldKind> {
        if name == "id" {
            return Some(FieldKind::String);
        }
        PROVENANCE_FIELDS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, k)| *k)
            .or_else(|| kind.field(name).map(|f| f.kind))
    }
}

/// Flat, GraphQL-response shaped object.
impl Serialize for Entity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 4))?;
        map.serialize_entry("id", &self.id)?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.serialize_entry("blockNumber", &self.provenance.block_number.to_string())?;
        map.serialize_entry("blockTimestamp", &self.provenance.block_timestamp.to_string())?;
        map.serialize_entry("transactionHash", &self.provenance.transaction_hash)?;
        map.end()
    }
}
