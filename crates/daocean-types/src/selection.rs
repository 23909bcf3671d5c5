//! The DAO a user is currently working in.

use primitive_types::U256;
use serde::{Deserialize, Serialize};

use crate::value::u256_dec;

/// Persisted as `{"id": ..., "name": ..., "daoId": "<decimal>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaoSelection {
    /// Entity id of the DAOCreated record the DAO was picked from.
    pub id: String,
    pub name: String,
    #[serde(with = "u256_dec")]
    pub dao_id: U256,
}

impl DaoSelection {
    pub fn new(id: impl Into<String>, name: impl Into<String>, dao_id: impl Into<U256>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            dao_id: dao_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape() {
        let dao = DaoSelection::new("0x1112", "My First DAO", 1u64);
        let json = serde_json::to_value(&dao).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "0x1112", "name": "My First DAO", "daoId": "1"})
        );
    }

    #[test]
    fn test_accepts_numeric_dao_id() {
        let dao: DaoSelection =
            serde_json::from_str(r#"{"id":"x","name":"n","daoId":5}"#).unwrap();
        assert_eq!(dao.dao_id, U256::from(5));
    }

    #[test]
    fn test_accepts_numeric_dao_id_past_u64() {
        let dao: DaoSelection =
            serde_json::from_str(r#"{"id":"x","name":"n","daoId":18446744073709551616}"#).unwrap();
        assert_eq!(dao.dao_id, U256::from(u64::MAX) + U256::one());
        assert_eq!(serde_json::to_value(&dao).unwrap()["daoId"], "18446744073709551616");
    }

    #[test]
    fn test_rejects_malformed_dao_id() {
        let raw = r#"{"id":"x","name":"n","daoId":"five"}"#;
        let parsed = serde_json::from_str::<DaoSelection>(raw);
        assert!(parsed.is_err());
    }
}
