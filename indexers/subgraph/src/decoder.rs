//! Parameter decoder for MultiDAOTreasury events.
//!
//! The host hands over ABI-decoded parameters as JSON:
//! `{"daoId": "1", "name": "My First DAO", "owner": "0xab..."}`.
//! Each mapped field is converted to its typed value; extra keys are ignored.

use daocean_types::{parse_bytes, parse_u256, EventKind, FieldKind, FieldSpec, Value};
use serde_json::{Map, Value as Json};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("{event}: missing parameter `{param}`")]
    MissingParam { event: &'static str, param: &'static str },
    #[error("{event}: parameter `{param}` is not a valid {expected}: {found}")]
    InvalidParam {
        event: &'static str,
        param: &'static str,
        expected: &'static str,
        found: String,
    },
}

/// Decode every field of `kind` from the host's parameter map, in table order.
pub fn decode_params(
    kind: EventKind,
    params: &Map<String, Json>,
) -> Result<Vec<(&'static str, Value)>, DecodeError> {
    kind.fields()
        .iter()
        .map(|spec| {
            let raw = params.get(spec.name).filter(|v| !v.is_null()).ok_or(
                DecodeError::MissingParam {
                    event: kind.name(),
                    param: spec.name,
                },
            )?;
            let value = decode_value(spec, raw).ok_or_else(|| DecodeError::InvalidParam {
                event: kind.name(),
                param: spec.name,
                expected: kind_label(spec.kind),
                found: raw.to_string(),
            })?;
            Ok((spec.name, value))
        })
        .collect()
}

fn decode_value(spec: &FieldSpec, raw: &Json) -> Option<Value> {
    match spec.kind {
        FieldKind::BigInt => match raw {
            Json::String(s) => parse_u256(s).ok(),
            Json::Number(n) => parse_u256(&n.to_string()).ok(),
            _ => None,
        }
        .map(Value::BigInt),
        FieldKind::Int => match raw {
            Json::Number(n) => n.as_i64().and_then(|v| i32::try_from(v).ok()),
            Json::String(s) => s.trim().parse::<i32>().ok(),
            _ => None,
        }
        .map(Value::Int),
        FieldKind::String => raw.as_str().map(|s| Value::String(s.to_string())),
        FieldKind::Bytes => raw
            .as_str()
            .and_then(|s| parse_bytes(s).ok())
            .map(Value::Bytes),
    }
}

fn kind_label(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::BigInt => "BigInt",
        FieldKind::Int => "Int",
        FieldKind::String => "String",
        FieldKind::Bytes => "Bytes",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use daocean_types::U256;
    use serde_json::json;

    fn params(v: Json) -> Map<String, Json> {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn test_decode_dao_created() {
        let p = params(json!({"daoId": "1", "name": "My First DAO", "owner": "0xabcdef"}));
        let fields = decode_params(EventKind::DaoCreated, &p).unwrap();
        assert_eq!(
            fields,
            vec![
                ("daoId", Value::BigInt(U256::from(1))),
                ("name", Value::String("My First DAO".into())),
                ("owner", Value::Bytes(vec![0xab, 0xcd, 0xef])),
            ]
        );
    }

    #[test]
    fn test_numeric_json_accepted_for_integers() {
        let p = params(json!({
            "daoId": 3, "proposer": "0x01", "amount": 500,
            "description": "buy servers", "proposalType": 1
        }));
        let fields = decode_params(EventKind::ProposalCreated, &p).unwrap();
        assert_eq!(fields[0].1, Value::BigInt(U256::from(3)));
        assert_eq!(fields[4].1, Value::Int(1));
    }

    #[test]
    fn test_json_integers_past_u64_keep_every_digit() {
        let p: Map<String, Json> = serde_json::from_str(
            r#"{"daoId": 1, "member": "0x01", "amount": 100000000000000000000}"#,
        )
        .unwrap();
        let fields = decode_params(EventKind::FundsDeposited, &p).unwrap();
        assert_eq!(
            fields[2].1,
            Value::BigInt(U256::from_dec_str("100000000000000000000").unwrap())
        );
    }

    #[test]
    fn test_negative_or_fractional_integers_rejected() {
        for amount in ["-5", "2.5"] {
            let raw = format!(r#"{{"daoId": 1, "member": "0x01", "amount": {amount}}}"#);
            let p: Map<String, Json> = serde_json::from_str(&raw).unwrap();
            assert!(matches!(
                decode_params(EventKind::FundsDeposited, &p),
                Err(DecodeError::InvalidParam { param: "amount", .. })
            ));
        }
    }

    #[test]
    fn test_extra_params_ignored() {
        let p = params(json!({"daoId": "1", "member": "0x01", "extra": true}));
        let fields = decode_params(EventKind::MemberJoinedDao, &p).unwrap();
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn test_missing_param() {
        let p = params(json!({"daoId": "1"}));
        let err = decode_params(EventKind::MemberJoinedDao, &p).unwrap_err();
        assert_eq!(
            err,
            DecodeError::MissingParam { event: "MemberJoinedDAO", param: "member" }
        );
    }

    #[test]
    fn test_null_is_missing() {
        let p = params(json!({"daoId": null, "member": "0x01"}));
        assert!(matches!(
            decode_params(EventKind::MemberJoinedDao, &p),
            Err(DecodeError::MissingParam { param: "daoId", .. })
        ));
    }

    #[test]
    fn test_invalid_param() {
        let p = params(json!({"daoId": "-4", "member": "0x01"}));
        let err = decode_params(EventKind::MemberJoinedDao, &p).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::InvalidParam { param: "daoId", expected: "BigInt", .. }
        ));

        let p = params(json!({"daoId": "1", "member": "not-hex"}));
        assert!(decode_params(EventKind::MemberJoinedDao, &p).is_err());
    }
}
