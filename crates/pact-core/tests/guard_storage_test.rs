//! Integration tests for stored guard and error shapes
//!
//! Guards and error reports are persisted and exchanged as JSON; these tests
//! fix the shapes through the public API only.

use pact_core::*;
use serde_json::{json, Value};

type G = Guard<Value>;

fn coin() -> ModuleName {
    ModuleName::simple("coin").unwrap()
}

#[test]
fn test_stored_keyset_guard() {
    let stored = json!({"keys": ["a1b2", "c3d4"], "pred": "keys-any"});
    let guard = G::from_value(stored.clone()).unwrap();

    assert_eq!(guard.kind(), GuardKind::KeySet);
    assert_eq!(guard, Guard::keyset(KeySet::keys_any(["c3d4", "a1b2"])));
    assert_eq!(guard.to_value().unwrap(), stored);
}

#[test]
fn test_stored_capability_guard_without_pact() {
    let stored = json!({"cgArgs": ["alice", 10], "cgName": "coin.TRANSFER", "cgPactId": null});
    let guard = G::from_value(stored.clone()).unwrap();

    assert_eq!(
        guard,
        Guard::capability(
            QualifiedName::new(coin(), "TRANSFER").unwrap(),
            [json!("alice"), json!(10)],
            None,
        )
    );
    assert_eq!(guard.args(), &[json!("alice"), json!(10)]);
    assert_eq!(guard.to_value().unwrap(), stored);
}

#[test]
fn test_guards_nested_in_other_values() {
    // A guard list stored inside a row, e.g. an accounts table column.
    let row = json!({
        "guards": [
            {"keysetref": "coin-admin"},
            {"moduleName": {"name": "coin", "namespace": null}, "name": "bank"},
            {"name": "escrow", "pactId": "pact-1"},
            {"args": [], "fun": "util.always-true"}
        ]
    });
    let guards: Vec<G> = serde_json::from_value(row["guards"].clone()).unwrap();
    let kinds: Vec<GuardKind> = guards.iter().map(Guard::kind).collect();
    assert_eq!(
        kinds,
        [GuardKind::KeySetRef, GuardKind::Module, GuardKind::Pact, GuardKind::User]
    );
    assert_eq!(serde_json::to_value(&guards).unwrap(), row["guards"]);
}

#[test]
fn test_extra_field_rejected_with_sorted_list() {
    let err = G::from_value(json!({"pred": "keys-all", "keys": [], "owner": "bob"})).unwrap_err();
    assert_eq!(err.to_string(), r#"unexpected guard fields: ["keys", "owner", "pred"]"#);

    let via_serde = serde_json::from_value::<G>(json!({"cgName": "coin.TRANSFER"})).unwrap_err();
    assert!(via_serde.to_string().contains("unexpected guard fields"));
}

#[test]
fn test_guard_args_mapped_for_display() {
    let guard = Guard::user(QualifiedName::new(coin(), "enforce-owner").unwrap(), [json!("alice")]);
    let rendered: Guard<String> = guard.map_args(Value::to_string);
    assert_eq!(rendered.args(), ["\"alice\"".to_string()]);
    assert_eq!(rendered.kind(), GuardKind::User);
}

#[test]
fn test_error_report_round_trip() {
    let err = PactError::db_error(Info::at(SpanInfo::point(7, 3)), "row not found: alice")
        .with_call_stack(vec![
            StackFrame::new("coin.details", Info::at(SpanInfo::point(7, 3))),
            StackFrame::new("coin.transfer", Info::default()),
        ]);
    let value = serde_json::to_value(&err).unwrap();
    assert_eq!(
        value,
        json!({
            "callStack": ["<interactive>:7:3: coin.details", ": coin.transfer"],
            "info": "<interactive>:7:3",
            "message": "row not found: alice",
            "type": "DbError"
        })
    );
    let back: PactError = serde_json::from_value(value).unwrap();
    assert_eq!(back, err);
    assert_eq!(
        back.to_string(),
        "<interactive>:7:3: Failure: Database exception: row not found: alice"
    );
}

#[test]
fn test_legacy_error_report_ingested() {
    let legacy = json!({
        "callStack": ["garbled frame"],
        "info": "somewhere odd",
        "message": "tx failed",
        "type": "NoSuchKind"
    });
    let err: PactError = serde_json::from_value(legacy).unwrap();
    assert_eq!(err.kind, PactErrorType::EvalError);
    assert!(err.info().is_default());
    assert_eq!(err.call_stack.len(), 1);
    assert_eq!(err.call_stack[0].name.as_str(), "garbled frame");
}

#[test]
fn test_plain_diagnostic_mentions_stack() {
    let err = PactError::gas_error(Info::at(SpanInfo::point(1, 0)), "gas limit exceeded")
        .with_call_stack(vec![StackFrame::new("coin.transfer", Info::default())]);
    let report = render_diagnostic(&err, None, &DiagnosticConfig::plain());
    assert!(report.starts_with("GasError: "));
    assert!(report.contains("gas limit exceeded"));
    assert!(report.contains("coin.transfer"));
}
