use rowan::TextRange;

use super::{
    Declaration, DeclarationKind, ExpectedKinds, Grammar, LocalEntry, LocalNamespace, Namespace,
    ResolutionContext, TokenId,
};
use crate::ast::build::{ident, range};
use crate::ast::{GrammarAst, Identifier, TreeProductionAst};
use crate::error::SemanticError;
use crate::test_utils::{talt, tel};

fn duplicate(name: &Identifier, previous: TextRange) -> SemanticError {
    SemanticError::DuplicateElementName {
        alternative: "p#1".into(),
        name: name.text.clone(),
        span: name.span,
        previous,
    }
}

fn entry<'a>(
    id: usize,
    explicit: Option<&'a Identifier>,
    implicit: Option<&'a Identifier>,
) -> LocalEntry<'a, usize> {
    LocalEntry {
        id,
        explicit,
        implicit,
    }
}

#[test]
fn declare_rejects_redeclaration() {
    let mut namespace = Namespace::default();
    let first = Declaration::Token(TokenId::from_index(0));
    namespace
        .declare(&Identifier::new("a", range(0, 1)), first)
        .unwrap();

    let error = namespace
        .declare(
            &Identifier::new("a", range(5, 6)),
            Declaration::Token(TokenId::from_index(1)),
        )
        .unwrap_err();

    assert_eq!(
        error,
        SemanticError::DuplicateDeclaration {
            name: "a".into(),
            span: range(5, 6),
            previous: range(0, 1),
        }
    );
    assert_eq!(namespace.get("a"), Some(first));
    assert_eq!(namespace.span_of("a"), Some(range(0, 1)));
}

#[test]
fn unique_implicit_names_are_registered() {
    let a = Identifier::new("a", range(0, 1));
    let b1 = Identifier::new("b", range(2, 3));
    let b2 = Identifier::new("b", range(4, 5));
    let entries = [
        entry(0, None, Some(&a)),
        entry(1, None, Some(&b1)),
        entry(2, None, Some(&b2)),
    ];

    let namespace = LocalNamespace::implicit_explicit(&entries, duplicate).unwrap();

    assert_eq!(namespace.get("a"), Some(0));
    assert_eq!(namespace.get("b"), None);
    assert_eq!(namespace.len(), 1);
}

#[test]
fn explicit_name_hides_implicit_name_of_its_entry() {
    let l = Identifier::new("l", range(0, 1));
    let exp1 = Identifier::new("exp", range(2, 5));
    let exp2 = Identifier::new("exp", range(6, 9));
    let entries = [entry(0, Some(&l), Some(&exp1)), entry(1, None, Some(&exp2))];

    let namespace = LocalNamespace::implicit_explicit(&entries, duplicate).unwrap();

    assert_eq!(namespace.get("l"), Some(0));
    assert_eq!(namespace.get("exp"), Some(1));
}

#[test]
fn implicit_name_equal_to_explicit_name() {
    let x = Identifier::new("x", range(0, 1));
    let implicit_x = Identifier::new("x", range(3, 4));
    let entries = [entry(0, Some(&x), None), entry(1, None, Some(&implicit_x))];

    let error = LocalNamespace::implicit_explicit(&entries, duplicate).unwrap_err();

    assert_eq!(error, duplicate(&implicit_x, range(0, 1)));
}

#[test]
fn duplicate_explicit_names() {
    let first = Identifier::new("x", range(0, 1));
    let second = Identifier::new("x", range(3, 4));

    let error = LocalNamespace::explicit([(0usize, &first), (1, &second)], duplicate).unwrap_err();

    assert_eq!(error, duplicate(&second, range(0, 1)));
}

#[test]
fn expected_kinds_list() {
    insta::assert_snapshot!(ExpectedKinds(DeclarationKind::TOKENS), @"token or lexer selection");
    insta::assert_snapshot!(ExpectedKinds(DeclarationKind::TOKENS_OR_PARSER_PRODUCTIONS), @"token, lexer selection, normal production, token production or parser selection");
}

#[test]
fn global_and_tree_lookups_fall_back_on_each_other() {
    let ast = GrammarAst::new()
        .token("num")
        .tree_production(TreeProductionAst::new("node").alternative(talt([tel("num")])));
    let grammar = Grammar::build(&ast).unwrap();
    let context = ResolutionContext::new(&grammar);

    assert!(matches!(
        context.resolve_global("node"),
        Some(Declaration::TreeProduction(_))
    ));
    assert!(matches!(
        context.resolve_tree("num"),
        Some(Declaration::Token(_))
    ));
    assert_eq!(context.resolve_tree("missing"), None);

    let error = context
        .expect_global(&ident("node"), DeclarationKind::TOKENS)
        .unwrap_err();
    insta::assert_snapshot!(error, @"expected token or lexer selection, found tree production `node`");
}
