//! Property tests over generated, well-nested C sources.

use nswrap_blocks::{
    DirectiveKind, IgnoreSet, MarkerStyle, Rewriter, SourceFile, SymbolQualifier, classify_lines,
    compute_spans,
};
use proptest::prelude::*;

fn leaf() -> impl Strategy<Value = Vec<String>> {
    prop_oneof![
        Just("int counter;"),
        Just(""),
        Just("// note"),
        Just("/* block */"),
        Just("#include <stdio.h>"),
        Just("#define LIMIT 16"),
        Just("value = ::sym(1);"),
        Just("static int helper(void);"),
        Just("    return ::other;"),
    ]
    .prop_map(|line| vec![line.to_string()])
}

fn body() -> impl Strategy<Value = Vec<String>> {
    leaf().prop_recursive(3, 64, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(|parts| parts.concat()),
            (
                prop::collection::vec(inner.clone(), 0..4),
                prop::option::of(prop::collection::vec(inner, 0..4)),
            )
                .prop_map(|(then, otherwise)| {
                    let mut lines = vec!["#ifdef FEATURE".to_string()];
                    lines.extend(then.concat());
                    if let Some(otherwise) = otherwise {
                        lines.push("#else".to_string());
                        lines.extend(otherwise.concat());
                    }
                    lines.push("#endif".to_string());
                    lines
                }),
        ]
    })
}

fn source_text() -> impl Strategy<Value = String> {
    (prop::collection::vec(body(), 0..8), any::<bool>()).prop_map(|(parts, trailing)| {
        let lines = parts.concat();
        let mut text = lines.join("\n");
        if trailing && !lines.is_empty() {
            text.push('\n');
        }
        text
    })
}

fn style() -> impl Strategy<Value = MarkerStyle> {
    prop_oneof![Just(MarkerStyle::Plain), Just(MarkerStyle::CppGuarded)]
}

fn rewriter() -> Rewriter {
    Rewriter::new("ns", ["sym"], IgnoreSet::new()).unwrap()
}

fn conditional_balance(text: &str) -> (usize, usize) {
    let source = SourceFile::from_text(text);
    let classes = classify_lines(source.lines());
    let opens = classes
        .iter()
        .filter(|c| c.directive == DirectiveKind::If)
        .count();
    let closes = classes
        .iter()
        .filter(|c| c.directive == DirectiveKind::EndIf)
        .count();
    (opens, closes)
}

proptest! {
    #[test]
    fn prop_add_then_remove_is_identity(text in source_text(), style in style()) {
        let rewriter = rewriter();
        let mut source = SourceFile::from_text(&text);
        rewriter.add(&mut source, style).unwrap();
        rewriter.remove(&mut source, style).unwrap();
        prop_assert_eq!(source.to_text(), text);
    }

    #[test]
    fn prop_spans_sorted_disjoint_and_start_at_code(text in source_text()) {
        let source = SourceFile::from_text(&text);
        let spans = compute_spans(source.lines(), &IgnoreSet::new()).unwrap();
        let classes = classify_lines(source.lines());

        for span in &spans {
            prop_assert!(span.start < span.end);
            prop_assert!(span.end <= source.len());
            prop_assert!(classes[span.start].has_code);
        }
        for pair in spans.windows(2) {
            prop_assert!(pair[0].end <= pair[1].start);
        }
    }

    #[test]
    fn prop_add_keeps_conditionals_balanced(text in source_text(), style in style()) {
        let mut source = SourceFile::from_text(&text);
        rewriter().add(&mut source, style).unwrap();

        let (opens, closes) = conditional_balance(&source.to_text());
        prop_assert_eq!(opens, closes);
    }

    #[test]
    fn prop_qualify_then_unqualify_is_identity(
        prefix in "[ (=,!]{0,3}",
        symbol in prop_oneof![Just("sym"), Just("other")],
        suffix in "[();]{0,3}",
    ) {
        let qualifier = SymbolQualifier::new("ns", ["sym"]).unwrap();
        let line = format!("{prefix}::{symbol}{suffix}");
        let qualified = qualifier.qualify(&line);

        prop_assert_eq!(qualified.contains("ns::sym"), symbol == "sym");
        prop_assert_eq!(&*qualifier.unqualify(&qualified), line.as_str());
    }
}
