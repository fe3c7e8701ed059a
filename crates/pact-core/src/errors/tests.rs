use super::diagnostic::{render_diagnostic, render_diagnostics, DiagnosticConfig, SourceInfo};
use super::*;
use crate::shared::SpanInfo;
use serde_json::json;

fn at(line: usize, column: usize) -> Info {
    Info::at(SpanInfo::point(line, column))
}

#[test]
fn test_display_prefixes() {
    let cases = [
        (PactErrorType::EvalError, "<interactive>:1:0: Failure: boom"),
        (PactErrorType::ArgsError, "<interactive>:1:0: Failure: boom"),
        (PactErrorType::DbError, "<interactive>:1:0: Failure: Database exception: boom"),
        (PactErrorType::TxFailure, "<interactive>:1:0: Failure: Tx Failed: boom"),
        (PactErrorType::SyntaxError, "<interactive>:1:0: Failure: Syntax error: boom"),
        (PactErrorType::GasError, "<interactive>:1:0: Failure: Gas Error: boom"),
        (PactErrorType::ContinuationError, "<interactive>:1:0: Failure: Continuation Error: boom"),
    ];
    for (kind, expected) in cases {
        assert_eq!(PactError::new(kind, at(1, 0), "boom").to_string(), expected);
    }
}

#[test]
fn test_display_without_location() {
    let err = PactError::eval_error(Info::default(), "no location");
    assert_eq!(err.to_string(), ": Failure: no location");
}

#[test]
fn test_error_type_tags() {
    for kind in PactErrorType::ALL {
        assert_eq!(kind.as_str().parse::<PactErrorType>(), Ok(kind));
    }
    assert_eq!(
        "Oops".parse::<PactErrorType>(),
        Err(UnknownErrorType("Oops".to_string()))
    );
}

#[test]
fn test_stack_frame_render() {
    let plain = StackFrame::new("coin.transfer", at(4, 2));
    assert_eq!(plain.render(), "<interactive>:4:2: coin.transfer");

    let applied = StackFrame::applied(
        "coin.transfer",
        at(4, 2),
        StackFunctionType::SFDefun,
        vec!["\"alice\"".into(), "\"bob\"".into(), "1.0".into()],
    );
    assert_eq!(applied.render(), "<interactive>:4:2: (coin.transfer \"alice\" \"bob\" 1.0)");
}

#[test]
fn test_stack_frame_parse_round_trip() {
    let plain = StackFrame::new("coin.transfer", at(4, 2));
    assert_eq!(StackFrame::parse(&plain.render()), Some(plain));

    let args = vec!["1".into(), "2".into()];
    let applied = StackFrame::applied("m.f", at(1, 1), StackFunctionType::SFDefun, args);
    assert_eq!(StackFrame::parse(&applied.render()), Some(applied));

    let unlocated = StackFrame::new("m.g", Info::default());
    assert_eq!(unlocated.render(), ": m.g");
    assert_eq!(StackFrame::parse(": m.g"), Some(unlocated));
}

#[test]
fn test_stack_frame_parse_is_strict() {
    assert_eq!(StackFrame::parse("no separator"), None);
    assert_eq!(StackFrame::parse("bogus: name"), None);
    assert_eq!(StackFrame::parse("<interactive>:1:1: two words"), None);
    assert_eq!(StackFrame::parse("<interactive>:1:1: ()"), None);
}

#[test]
fn test_stack_frame_parse_lenient_keeps_text() {
    let frame = StackFrame::parse_lenient("something went sideways");
    assert_eq!(frame.name, "something went sideways");
    assert!(frame.loc.is_default());
    assert!(frame.app.is_none());

    let good = StackFrame::parse_lenient("<interactive>:2:3: m.f");
    assert_eq!(good, StackFrame::new("m.f", at(2, 3)));
}

#[test]
fn test_error_json_shape() {
    let err = PactError::db_error(at(7, 1), "row not found")
        .with_call_stack(vec![StackFrame::new("m.read-row", at(7, 1))]);
    let value = serde_json::to_value(&err).unwrap();
    assert_eq!(
        value,
        json!({
            "callStack": ["<interactive>:7:1: m.read-row"],
            "info": "<interactive>:7:1",
            "message": "row not found",
            "type": "DbError"
        })
    );
    let back: PactError = serde_json::from_value(value).unwrap();
    assert_eq!(back, err);
}

#[test]
fn test_error_decode_is_lenient() {
    let legacy = json!({
        "callStack": ["garbled frame text", "<interactive>:1:0: m.f"],
        "info": "somewhere strange",
        "message": "old failure",
        "type": "SomeRetiredKind"
    });
    let err: PactError = serde_json::from_value(legacy).unwrap();
    assert_eq!(err.kind, PactErrorType::EvalError);
    assert!(err.info.is_default());
    assert_eq!(err.message, "old failure");
    assert_eq!(err.call_stack[0].name, "garbled frame text");
    assert_eq!(err.call_stack[1], StackFrame::new("m.f", at(1, 0)));
}

#[test]
fn test_error_decode_defaults_missing_fields() {
    let err: PactError =
        serde_json::from_value(json!({"message": "m", "type": "TxFailure"})).unwrap();
    assert_eq!(err.kind, PactErrorType::TxFailure);
    assert!(err.call_stack.is_empty());
    assert!(err.info.is_default());
}

#[test]
fn test_error_decode_requires_message() {
    assert!(serde_json::from_value::<PactError>(json!({"type": "EvalError"})).is_err());
}

#[test]
fn test_render_diagnostic_plain() {
    let source = "(module m g\n  (defun f () (+ 1 \"a\")))\n";
    let src = SourceInfo {
        filename: "m.pact",
        source,
    };
    let err = PactError::eval_error(Info::at(SpanInfo::new(2, 14, 2, 21)), "type mismatch")
        .with_call_stack(vec![StackFrame::applied(
            "m.f",
            at(2, 2),
            StackFunctionType::SFDefun,
            vec![],
        )]);

    let out = render_diagnostic(&err, Some(&src), &DiagnosticConfig::plain());
    assert!(out.starts_with("EvalError: <interactive>:2:14: Failure: type mismatch\n"));
    assert!(out.contains("--> m.pact:2:14"));
    assert!(out.contains("(defun f () (+ 1 \"a\")))"));
    assert!(out.contains(&format!("{}{}", " ".repeat(14), "^".repeat(7))));
    assert!(out.contains("Call stack:"));
    assert!(out.contains("<- defun m.f() at <interactive>:2:2"));
}

#[test]
fn test_render_diagnostic_respects_config() {
    let err = PactError::gas_error(at(1, 0), "out of gas")
        .with_call_stack(vec![StackFrame::new("m.f", Info::default())]);
    let src = SourceInfo {
        filename: "x.pact",
        source: "(m.f)",
    };
    let config = DiagnosticConfig {
        show_source: false,
        show_stack: false,
        ..DiagnosticConfig::plain()
    };
    let out = render_diagnostic(&err, Some(&src), &config);
    assert_eq!(out, "GasError: <interactive>:1:0: Failure: Gas Error: out of gas\n");
}

#[test]
fn test_render_diagnostics_joins_errors() {
    let errs = vec![
        PactError::eval_error(Info::default(), "one"),
        PactError::eval_error(Info::default(), "two"),
    ];
    let out = render_diagnostics(&errs, None, &DiagnosticConfig::plain());
    assert_eq!(out.matches("Failure:").count(), 2);
    assert!(out.contains(&"-".repeat(60)));
}

#[test]
fn test_render_decoded_error_with_out_of_range_location() {
    let src = SourceInfo {
        filename: "coin.pact",
        source: "(coin.transfer)",
    };
    let far_column = json!({
        "info": format!("coin.pact:1:{}", usize::MAX),
        "message": "boom",
        "type": "EvalError"
    });
    let err: PactError = serde_json::from_value(far_column).unwrap();
    let out = render_diagnostic(&err, Some(&src), &DiagnosticConfig::plain());
    assert!(out.contains("(coin.transfer)"));
    assert!(out.contains(&format!(" {}^\n", " ".repeat(15))));

    let far_line = json!({
        "info": format!("coin.pact:{}:3", usize::MAX),
        "message": "boom",
        "type": "EvalError"
    });
    let err: PactError = serde_json::from_value(far_line).unwrap();
    let out = render_diagnostic(&err, Some(&src), &DiagnosticConfig::plain());
    assert!(!out.contains('^'));
}
