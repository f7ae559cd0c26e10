use rowan::TextRange;
use sable_core::{CardinalityInterval, Type};

use super::{Diagnostic, DiagnosticKind, Diagnostics};
use crate::ast::build::range;
use crate::error::SemanticError;
use crate::{Config, Error, GrammarAst, render_error};

fn assignment() -> SemanticError {
    SemanticError::ElementAssignment {
        found: Type::single("num", CardinalityInterval::ONE_ONE),
        expected: Type::single("exp", CardinalityInterval::ONE_ONE),
        span: range(0, 3),
        target_span: range(7, 10),
    }
}

#[test]
fn plain_rendering_without_source() {
    let diagnostics = Diagnostics::from(&assignment());

    insta::assert_snapshot!(diagnostics.printer().render(), @"error at 0..3: cannot assign `num` to `exp` (related: expected because of this at 7..10)");
}

#[test]
fn snippet_with_related_span() {
    let diagnostics = Diagnostics::from(&assignment());

    insta::assert_snapshot!(diagnostics.render("num -> exp"), @r"
    error: cannot assign `num` to `exp`
      |
    1 | num -> exp
      | ^^^    --- expected because of this
    ");
}

#[test]
fn snippet_with_path() {
    let diagnostics = Diagnostics::from(&assignment());

    let result = diagnostics
        .printer()
        .source("num -> exp")
        .path("grammar.sablecc")
        .render();

    insta::assert_snapshot!(result, @r"
    error: cannot assign `num` to `exp`
     --> grammar.sablecc:1:1
      |
    1 | num -> exp
      | ^^^    --- expected because of this
    ");
}

#[test]
fn colored_snippet() {
    let diagnostics = Diagnostics::from(&assignment());

    let result = diagnostics
        .printer()
        .source("num -> exp")
        .colored(true)
        .render();

    assert!(result.contains("cannot assign"));
    assert!(result.contains('\x1b'));
}

#[test]
fn zero_width_span() {
    let diagnostics: Diagnostics = [Diagnostic::new(
        DiagnosticKind::Root,
        TextRange::empty(0.into()),
        "missing root",
    )]
    .into_iter()
    .collect();

    insta::assert_snapshot!(diagnostics.render("hello"), @r"
    error: missing root
      |
    1 | hello
      | ^
    ");
}

#[test]
fn unspanned_related_location_becomes_a_note() {
    let diagnostics: Diagnostics = [Diagnostic::new(
        DiagnosticKind::Declaration,
        range(4, 7),
        "`exp` is already declared",
    )
    .with_related("previously declared here", TextRange::default())]
    .into_iter()
    .collect();

    let result = diagnostics.render("num exp exp");

    assert!(result.contains("note: previously declared here"), "{result}");
    assert_eq!(result.matches("previously declared here").count(), 1);
    assert!(!result.contains("---"), "{result}");
}

#[test]
fn empty_diagnostics() {
    let diagnostics = Diagnostics::new();

    assert!(diagnostics.render("source").is_empty());
    assert!(diagnostics.printer().render().is_empty());
}

#[test]
fn order_errors_carry_a_hint() {
    let error = SemanticError::ElementReordered {
        element: "l".into(),
        previous: "r".into(),
        span: range(4, 5),
        previous_span: range(0, 1),
    };
    let diagnostic = Diagnostic::from(&error);

    assert_eq!(diagnostic.kind(), DiagnosticKind::Order);
    assert!(
        diagnostic
            .to_string()
            .ends_with("(hint: reference elements in the order they are declared)")
    );
}

#[test]
fn kinds_follow_the_rejecting_stage() {
    let undefined = SemanticError::UndefinedReference {
        name: "x".into(),
        span: range(0, 1),
    };
    let root = SemanticError::BadRootElementTransformation {
        production: "prog".into(),
        span: range(0, 4),
    };

    assert_eq!(DiagnosticKind::of(&undefined), DiagnosticKind::Reference);
    assert_eq!(DiagnosticKind::of(&assignment()), DiagnosticKind::Assignability);
    assert_eq!(DiagnosticKind::of(&root), DiagnosticKind::Root);
    assert_eq!(DiagnosticKind::Synthesis.to_string(), "synthesis");
    assert_eq!(DiagnosticKind::Root.default_hint(), None);
}

#[test]
fn render_error_follows_config_colors() {
    let error = Error::Semantic(assignment());

    let plain = render_error(&error, "num -> exp", &Config::default());
    let colored = render_error(&error, "num -> exp", &Config::default().with_colors(true));

    assert!(plain.starts_with("error: cannot assign `num` to `exp`"));
    assert!(!plain.contains('\x1b'));
    assert!(colored.contains('\x1b'));
}

#[test]
fn render_input_error() {
    let error = Error::Input(GrammarAst::from_json("42").unwrap_err());

    let rendered = render_error(&error, "", &Config::default());

    assert!(rendered.starts_with("invalid grammar AST: "), "{rendered}");
}
