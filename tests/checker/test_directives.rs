// Directive handling across a whole run: malformed flags, exclusion modes,
// multi-line directives.

use switchcheck_core::store::MemoryFactStore;
use switchcheck_core::types::DiagnosticKind;
use switchcheck_enforce::coverage::{CheckOptions, ExcludeMatch};
use switchcheck_enforce::engine::CheckEngine;
use switchcheck_parsers::workspace::LoadOptions;

use crate::common;

const KINDS: &str = r#"package k

type Kind int

const (
	KindHoge Kind = iota
	KindHogeExtra
	KindFuga
)
"#;

fn check(source: &str, options: CheckOptions) -> Vec<(DiagnosticKind, String)> {
    let (_dir, root) = common::create_project(&[("k/kinds.go", KINDS), ("k/use.go", source)]);
    let mut engine = CheckEngine::with_options(Box::new(MemoryFactStore::new()), options);
    let report = engine.check_path(&root, &LoadOptions::default()).unwrap();
    report
        .diagnostics
        .into_iter()
        .map(|d| (d.kind, d.message))
        .collect()
}

#[test]
fn test_malformed_directive_is_reported_and_skipped() {
    let got = check(
        r#"package k

func f(v Kind) {
	// switchchecker -exclude
	switch v {
	}

	// switchchecker
	switch v {
	case KindHoge, KindHogeExtra:
	}
}
"#,
        CheckOptions::default(),
    );
    assert_eq!(
        got,
        [
            (
                DiagnosticKind::MalformedDirective,
                "malformed directive: -exclude needs a comma-separated list of names".to_string()
            ),
            (DiagnosticKind::MissingCases, "no case of k.KindFuga".to_string()),
        ]
    );
}

#[test]
fn test_substring_exclusion_over_excludes() {
    let source = r#"package k

func f(v Kind) {
	// switchchecker -e KindHoge
	switch v {
	}
}
"#;
    let got = check(source, CheckOptions::default());
    assert_eq!(
        got,
        [(DiagnosticKind::MissingCases, "no case of k.KindFuga".to_string())]
    );

    let exact = CheckOptions {
        exclude_match: ExcludeMatch::Exact,
        ..Default::default()
    };
    let got = check(source, exact);
    assert_eq!(
        got,
        [(
            DiagnosticKind::MissingCases,
            "no case of k.KindHogeExtra, and k.KindFuga".to_string()
        )]
    );
}

#[test]
fn test_multi_line_directive() {
    let got = check(
        r#"package k

func f(v Kind) {
	// switchchecker
	// -exclude KindFuga
	switch v {
	case KindHoge:
	}
}
"#,
        CheckOptions {
            exclude_match: ExcludeMatch::Exact,
            ..Default::default()
        },
    );
    assert_eq!(
        got,
        [(DiagnosticKind::MissingCases, "no case of k.KindHogeExtra".to_string())]
    );
}

#[test]
fn test_directive_must_touch_the_switch() {
    let got = check(
        r#"package k

func f(v Kind) {
	// switchchecker

	switch v {
	}
}
"#,
        CheckOptions::default(),
    );
    assert!(got.is_empty());
}

#[test]
fn test_unexpected_types() {
    let got = check(
        r#"package k

func f(v Kind, items []Kind) {
	// switchchecker
	switch {
	}

	for _, item := range items {
		// switchchecker
		switch item {
		}
	}
}
"#,
        CheckOptions::default(),
    );
    assert_eq!(got.len(), 2);
    assert_eq!(
        got[0],
        (DiagnosticKind::UnexpectedType, "unexpected type:<none>".to_string())
    );
    assert_eq!(got[1].0, DiagnosticKind::UnexpectedType);
    assert!(got[1].1.starts_with("unexpected type:"));
}

#[test]
fn test_fill_changes_nothing() {
    let source = r#"package k

func f(v Kind) {
	// switchchecker
	switch v {
	case KindHoge:
	}
}
"#;
    let plain = check(source, CheckOptions::default());
    let fill = check(
        source,
        CheckOptions {
            fill: true,
            ..Default::default()
        },
    );
    assert_eq!(plain, fill);
    assert_eq!(plain.len(), 1);
}
