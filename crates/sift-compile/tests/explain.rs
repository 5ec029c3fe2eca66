//! Integration tests for English explanations.
//!
//! Runs whole queries through parse -> compile -> English backend.

// Integration tests live outside cfg(test) by design
#![allow(clippy::tests_outside_test_module)]

use sift_compile::compile_to_explanation;

/// Asserts every `(query, explanation)` pair.
fn check(cases: &[(&str, &str)]) {
    for (query, expected) in cases {
        assert_eq!(
            compile_to_explanation(query),
            *expected,
            "explaining {query:?}"
        );
    }
}

#[test]
fn test_implicit_field_terms() {
    check(&[
        ("bar", "event has whole word bar"),
        ("(bar)", "(event has whole word bar)"),
        (
            "foo bar baz",
            "event has whole word foo AND event has whole word bar AND event has whole word baz",
        ),
        (
            "(abc def)",
            "(event has whole word abc AND event has whole word def)",
        ),
        ("\"foo bar baz\"", "event has whole word foo bar baz"),
        ("(\"abc def\")", "(event has whole word abc def)"),
    ]);
}

#[test]
fn test_implicit_wildcards() {
    check(&[
        ("*err*", "event contains err"),
        ("err*", "event starts with err"),
        ("*err", "event ends with err"),
        ("err", "event has whole word err"),
        ("-*err*", "event does not contain err"),
        ("-err", "event does not have whole word err"),
    ]);
}

#[test]
fn test_named_fields() {
    check(&[
        ("foo:bar", "'foo' contains bar"),
        ("(foo:bar)", "('foo' contains bar)"),
        ("foo:*bar", "'foo' contains bar"),
        ("foo:*bar*", "'foo' contains bar"),
        ("-foo:bar", "'foo' does not contain bar"),
        (
            "ServiceName:foo bar baz",
            "'ServiceName' contains foo AND event has whole word bar AND event has whole word baz",
        ),
        ("ServiceName:\"foo bar baz\"", "'ServiceName' is foo bar baz"),
        (
            "LogAttributes.error.message:\"Failed to fetch\"",
            "'LogAttributes.error.message' is Failed to fetch",
        ),
        (
            "-LogAttributes.error.message:\"Failed to fetch\"",
            "'LogAttributes.error.message' is not Failed to fetch",
        ),
        (
            "LogAttributes.error.message:Failed",
            "'LogAttributes.error.message' contains Failed",
        ),
        (
            "-LogAttributes.error.message:Failed",
            "'LogAttributes.error.message' does not contain Failed",
        ),
    ]);
}

#[test]
fn test_existence() {
    check(&[
        ("service:*", "'service' is not null"),
        ("-service:*", "'service' is null"),
        (
            "LogAttributes.error.message:*",
            "'LogAttributes.error.message' is not null",
        ),
        (
            "-LogAttributes.error.message:*",
            "'LogAttributes.error.message' is null",
        ),
    ]);
}

#[test]
fn test_comparisons() {
    check(&[
        ("SeverityNumber:>10", "'SeverityNumber' is greater than 10"),
        ("duration:>=100", "'duration' is greater than or equal to 100"),
        ("duration:<=100", "'duration' is less than or equal to 100"),
        ("duration:<100", "'duration' is less than 100"),
        ("-duration:<=100", "'duration' is greater than 100"),
        ("-duration:>=100", "'duration' is less than 100"),
        ("-duration:>100", "'duration' is less than or equal to 100"),
        ("-duration:<100", "'duration' is greater than or equal to 100"),
    ]);
}

#[test]
fn test_ranges() {
    check(&[
        ("foo:[1 TO 5]", "foo is between 1 and 5"),
        ("ts:[10 TO 20]", "ts is between 10 and 20"),
        (
            "-LogAttributes.example.number:[1 TO 5]",
            "LogAttributes.example.number is not between 1 and 5",
        ),
        ("ts:{1 TO 5}", "ts is between 1 and 5 (exclusive)"),
    ]);
}

#[test]
fn test_negation_duality() {
    check(&[
        ("level:-5", "'level' contains -5"),
        ("level:\"-5\"", "'level' is -5"),
        ("-level:5", "'level' does not contain 5"),
        ("-level:\"5\"", "'level' is not 5"),
        ("NOT level:\"5\"", "NOT 'level' is 5"),
    ]);
}

#[test]
fn test_boolean_structure() {
    check(&[
        ("a AND b", "event has whole word a AND event has whole word b"),
        ("a && b || c", "event has whole word a AND event has whole word b OR event has whole word c"),
        (
            "NOT (foo:bar foo:baz)",
            "NOT ('foo' contains bar AND 'foo' contains baz)",
        ),
        (
            "-(foo:bar foo:baz)",
            "NOT ('foo' contains bar AND 'foo' contains baz)",
        ),
        (
            "(a OR b) c",
            "(event has whole word a OR event has whole word b) AND event has whole word c",
        ),
    ]);
    assert_ne!(
        compile_to_explanation("(a OR b) AND c"),
        compile_to_explanation("a OR b AND c")
    );
    assert_eq!(
        compile_to_explanation("a b"),
        compile_to_explanation("a AND b")
    );
}

#[test]
fn test_field_groups() {
    check(&[
        ("foo:(bar)", "('foo' contains bar)"),
        ("foo:(bar) baz", "('foo' contains bar) AND event has whole word baz"),
        ("foo:(bar baz)", "('foo' contains bar AND 'foo' contains baz)"),
        ("NOT foo:(bar baz)", "NOT ('foo' contains bar AND 'foo' contains baz)"),
        ("-foo:(bar baz)", "NOT ('foo' contains bar AND 'foo' contains baz)"),
        ("-foo:(bar)", "NOT ('foo' contains bar)"),
        ("-foo:(-bar)", "NOT ('foo' does not contain bar)"),
        ("foo:(*bar)", "('foo' contains bar)"),
        ("foo:(bar*)", "('foo' contains bar)"),
        ("foo:(*bar*)", "('foo' contains bar)"),
        ("foo:(bar:(baz) qux)", "(('bar' contains baz) AND 'foo' contains qux)"),
        (
            "ServiceName:(abc def)",
            "('ServiceName' contains abc AND 'ServiceName' contains def)",
        ),
        (
            "LogAttributes.error.message:(\"Failed to fetch\")",
            "('LogAttributes.error.message' is Failed to fetch)",
        ),
        (
            "-LogAttributes.error.message:(\"A B\")",
            "NOT ('LogAttributes.error.message' is A B)",
        ),
    ]);
}

#[test]
fn test_deep_nesting_falls_back() {
    let parens = format!("{}a{}", "(".repeat(100_000), ")".repeat(100_000));
    assert_eq!(
        compile_to_explanation(&parens),
        format!("Message containing {parens}")
    );

    let nots = format!("{}a", "NOT ".repeat(20_000));
    assert_eq!(
        compile_to_explanation(&nots),
        format!("Message containing {nots}")
    );
}

#[test]
fn test_escaped_values() {
    check(&[
        ("url:https://example.com", "'url' contains https://example.com"),
        ("host:localhost:8080", "'host' contains localhost:8080"),
        (r"a\:b", "event has whole word a:b"),
    ]);
}

#[test]
fn test_fallback() {
    check(&[
        ("foo:\"bar", "Message containing foo:\"bar"),
        ("a OR", "Message containing a OR"),
        ("(a", "Message containing (a"),
        ("ts:[1 TO", "Message containing ts:[1 TO"),
        ("", ""),
    ]);
}
