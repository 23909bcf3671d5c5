use daocean_types::{EventKind, FieldKind, U256, Value};
use serde_json::{json, Map, Value as Json};

use crate::mapper::{map_block, map_event, LogContext, MapError};
use crate::tests::{block, dao_created_log};

const OWNER: &str = "0xabc0000000000000000000000000000000000abc";

fn ctx(tx: &str, log_index: u32) -> LogContext<'_> {
    LogContext {
        transaction_hash: tx,
        log_index,
        block_number: 42,
        block_timestamp: 1_700_000_042,
    }
}

/// Synthetic parameters for every field of `kind`, plus the values they decode to.
fn synthetic(kind: EventKind) -> (Map<String, Json>, Vec<(&'static str, Value)>) {
    let mut params = Map::new();
    let mut expected = Vec::new();
    for (i, spec) in kind.fields().iter().enumerate() {
        let (raw, value) = match spec.kind {
            FieldKind::BigInt => {
                let n = (1000 + i) as u64;
                (json!(n.to_string()), Value::BigInt(U256::from(n)))
            }
            FieldKind::Int => (json!(i), Value::Int(i as i32)),
            FieldKind::String => (json!(format!("text-{i}")), Value::String(format!("text-{i}"))),
            FieldKind::Bytes => (
                json!(format!("0x{:02x}ff", i)),
                Value::Bytes(vec![i as u8, 0xff]),
            ),
        };
        params.insert(spec.name.to_string(), raw);
        expected.push((spec.name, value));
    }
    (params, expected)
}

#[test]
fn test_every_event_kind_maps_to_one_entity() {
    for kind in EventKind::ALL {
        let (params, expected) = synthetic(kind);
        let entity = map_event(kind.name(), &params, ctx("0xfeed", 7))
            .unwrap()
            .unwrap_or_else(|| panic!("{kind} was not mapped"));

        assert_eq!(entity.kind(), kind);
        assert_eq!(entity.id(), "0xfeed7");
        assert_eq!(entity.fields(), expected.as_slice(), "fields of {kind}");
        assert_eq!(entity.provenance().block_number, 42);
        assert_eq!(entity.provenance().block_timestamp, 1_700_000_042);
        assert_eq!(entity.provenance().transaction_hash, "0xfeed");
    }
}

#[test]
fn test_dao_created_example() {
    let params = json!({"daoId": "1", "name": "My First DAO", "owner": OWNER});
    let entity = map_event("DAOCreated", params.as_object().unwrap(), ctx("0x111", 2))
        .unwrap()
        .unwrap();

    assert_eq!(entity.id(), "0x1112");
    assert_eq!(entity.field("daoId"), Some(&Value::BigInt(U256::from(1))));
    assert_eq!(entity.field("name"), Some(&Value::String("My First DAO".into())));
    assert_eq!(entity.field("owner").map(|v| v.to_string()), Some(OWNER.to_string()));
}

#[test]
fn test_same_tx_different_log_index_distinct_ids() {
    let (params, _) = synthetic(EventKind::LoanApproved);
    let a = map_event("LoanApproved", &params, ctx("0xaaaa", 1)).unwrap().unwrap();
    let b = map_event("LoanApproved", &params, ctx("0xaaaa", 2)).unwrap().unwrap();
    assert_ne!(a.id(), b.id());
    assert_eq!(a.fields(), b.fields());
}

#[test]
fn test_unknown_event_is_skipped() {
    let mapped = map_event("Transfer", &Map::new(), ctx("0x1", 0)).unwrap();
    assert!(mapped.is_none());
}

#[test]
fn test_bad_params_report_log_position() {
    let params = json!({"daoId": "1"});
    let err = map_event("MemberJoinedDAO", params.as_object().unwrap(), ctx("0xdead", 4))
        .unwrap_err();
    let MapError::Decode { transaction_hash, log_index, .. } = err;
    assert_eq!(transaction_hash, "0xdead");
    assert_eq!(log_index, 4);
}

#[test]
fn test_map_block_keeps_log_order_and_skips_foreign_events() {
    let b = block(
        5,
        json!([
            dao_created_log("0x01", 2, 2, "Second", OWNER),
            {"address": "0xtreasury", "transactionHash": "0x01", "logIndex": 1,
             "event": "Approval", "params": {}},
            dao_created_log("0x01", 0, 1, "First", OWNER),
        ]),
    );
    let entities = map_block(&b, None).unwrap();
    let ids: Vec<&str> = entities.iter().map(|e| e.id()).collect();
    assert_eq!(ids, vec!["0x010", "0x012"]);
    assert!(entities.iter().all(|e| e.provenance().block_number == 5));
}

#[test]
fn test_map_block_applies_contract_filter() {
    let mut other = dao_created_log("0x02", 0, 9, "Elsewhere", OWNER);
    other["address"] = json!("0xother");
    let b = block(6, json!([other, dao_created_log("0x02", 1, 1, "Here", OWNER)]));

    let entities = map_block(&b, Some("0xtreasury")).unwrap();
    assert_eq!(entities.len(), 1);
    assert_eq!(entities[0].id(), "0x021");
}

#[test]
fn test_map_block_fails_on_first_bad_log() {
    let b = block(
        7,
        json!([
            dao_created_log("0x03", 0, 1, "Fine", OWNER),
            {"address": "0xtreasury", "transactionHash": "0x03", "logIndex": 1,
             "event": "FundsDeposited", "params": {"daoId": "1"}},
        ]),
    );
    assert!(map_block(&b, None).is_err());
}
