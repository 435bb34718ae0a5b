use super::*;

#[test]
fn parses_bare_names_and_calls() {
    let calls = parse_calls("fade translate(0, 150) scale(0.8)").unwrap();
    let names: Vec<_> = calls.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["fade", "translate", "scale"]);
    assert!(calls[0].args.is_empty());
    assert_eq!(calls[1].args.len(), 2);
    assert!(matches!(calls[1].args[1], Arg::Number(v, _) if v == 150.0));
}

#[test]
fn parses_nested_calls_and_negatives() {
    let calls = parse_calls("beginWith(shadowOpacity(0.5), translate(-3 4))").unwrap();
    assert_eq!(calls.len(), 1);
    let Arg::Call(inner) = &calls[0].args[1] else {
        panic!("expected nested call");
    };
    assert_eq!(inner.name, "translate");
    assert!(matches!(inner.args[0], Arg::Number(v, _) if v == -3.0));
    assert!(matches!(inner.args[1], Arg::Number(v, _) if v == 4.0));
}

#[test]
fn top_level_commas_are_optional() {
    assert_eq!(parse_calls("fade, forceAnimate").unwrap().len(), 2);
    assert!(parse_calls("").unwrap().is_empty());
}

#[test]
fn unbalanced_parens_report_offset() {
    let err = parse_calls("scale(2").unwrap_err();
    assert_eq!(err.offset, 7);
    let err = parse_calls("(2)").unwrap_err();
    assert_eq!(err.offset, 0);
}

#[test]
fn call_span_covers_arguments() {
    let calls = parse_calls("  arc(1)").unwrap();
    assert_eq!(calls[0].span, Span { start: 2, end: 8 });
}
