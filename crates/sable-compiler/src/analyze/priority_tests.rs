use crate::ast::build::{name, range, string};
use crate::ast::{AlternativeAst, ElementAst, GrammarAst, Operator, PriorityKind, ProductionAst};
use crate::error::SemanticError;
use crate::test_utils::{alt, el, expect_invalid, expect_invalid_message, expect_valid, lit};

/// `production` next to a `num` token and an `op` production, without a tree.
fn grammar(production: ProductionAst) -> GrammarAst {
    GrammarAst::new()
        .token("num")
        .production(production)
        .production(ProductionAst::new("op").alternative(alt([lit("+")])))
}

fn num() -> AlternativeAst {
    alt([el("num")]).named("num")
}

#[test]
fn binary_and_unary_blocks() {
    let production = ProductionAst::new("exp")
        .alternative(alt([el("exp"), lit("+"), el("exp")]).named("add"))
        .alternative(alt([el("exp"), el("num"), el("exp")]).named("juxt"))
        .alternative(alt([lit("-"), el("exp")]).named("neg"))
        .alternative(alt([lit("("), lit("-"), el("exp")]).named("paren_neg"))
        .alternative(num())
        .priority(PriorityKind::Unary, &["neg", "paren_neg"])
        .priority(PriorityKind::Left, &["add"])
        .priority(PriorityKind::Right, &["juxt"]);

    expect_valid(&grammar(production));
}

#[test]
fn binary_alternative_too_short() {
    let production = ProductionAst::new("exp")
        .alternative(alt([el("exp"), lit("+")]).named("add"))
        .alternative(num())
        .priority(PriorityKind::Left, &["add"]);

    insta::assert_snapshot!(expect_invalid_message(&grammar(production)), @"left priority alternative `exp.add` needs at least 3 elements");
}

#[test]
fn binary_alternative_not_recursive_on_the_right() {
    let production = ProductionAst::new("exp")
        .alternative(alt([el("exp"), lit("+"), el("num").at(7, 10)]).named("add"))
        .alternative(num())
        .priority(PriorityKind::Right, &["add"]);

    let error = expect_invalid(&grammar(production));

    assert_eq!(
        error,
        SemanticError::PriorityBadRecursion {
            priority: PriorityKind::Right,
            alternative: "exp.add".into(),
            production: "exp".into(),
            expected: "as its last element",
            span: range(7, 10),
        }
    );
    insta::assert_snapshot!(error, @"right priority alternative `exp.add` must recurse on `exp` as its last element");
}

#[test]
fn missing_recursion_reported_before_optional_end() {
    let production = ProductionAst::new("exp")
        .alternative(
            alt([el("exp").op(Operator::ZeroOrOne), lit("+"), el("num").at(9, 12)]).named("add"),
        )
        .alternative(num())
        .priority(PriorityKind::Left, &["add"]);

    let error = expect_invalid(&grammar(production));

    assert_eq!(
        error,
        SemanticError::PriorityBadRecursion {
            priority: PriorityKind::Left,
            alternative: "exp.add".into(),
            production: "exp".into(),
            expected: "as its last element",
            span: range(9, 12),
        }
    );
}

#[test]
fn optional_recursion() {
    let production = ProductionAst::new("exp")
        .alternative(
            alt([el("exp"), lit("+"), el("exp").op(Operator::ZeroOrOne)]).named("add"),
        )
        .alternative(num())
        .priority(PriorityKind::Left, &["add"]);

    insta::assert_snapshot!(expect_invalid_message(&grammar(production)), @"recursive element of left priority alternative `exp.add` must occur exactly once");
}

#[test]
fn production_as_operator() {
    let production = ProductionAst::new("exp")
        .alternative(alt([el("exp"), el("op"), el("exp")]).named("add"))
        .alternative(num())
        .priority(PriorityKind::Left, &["add"]);

    insta::assert_snapshot!(expect_invalid_message(&grammar(production)), @"second element of left priority alternative `exp.add` must be a single token or literal");
}

#[test]
fn repeated_operator() {
    let production = ProductionAst::new("exp")
        .alternative(
            alt([el("exp"), el("num").op(Operator::OneOrMore), el("exp")]).named("add"),
        )
        .alternative(num())
        .priority(PriorityKind::Left, &["add"]);

    insta::assert_snapshot!(expect_invalid_message(&grammar(production)), @"second element of left priority alternative `exp.add` must be a single token or literal");
}

#[test]
fn separated_operator() {
    let production = ProductionAst::new("exp")
        .alternative(
            alt([
                el("exp"),
                ElementAst::separated(name("num"), string(",")),
                el("exp"),
            ])
            .named("add"),
        )
        .alternative(num())
        .priority(PriorityKind::Left, &["add"]);

    insta::assert_snapshot!(expect_invalid_message(&grammar(production)), @"second element of left priority alternative `exp.add` must be a normal element");
}

#[test]
fn unresolved_operator_is_left_to_references() {
    let production = ProductionAst::new("exp")
        .alternative(alt([el("exp"), el("plus"), el("exp")]).named("add"))
        .alternative(num())
        .priority(PriorityKind::Left, &["add"]);

    insta::assert_snapshot!(expect_invalid_message(&grammar(production)), @"`plus` is not defined");
}

#[test]
fn unary_block_mixes_sides() {
    let production = ProductionAst::new("exp")
        .alternative(alt([el("exp"), lit("+"), el("exp")]).named("add"))
        .alternative(alt([lit("-"), el("exp")]).named("neg").at(10, 20))
        .alternative(alt([el("exp"), lit("!")]).named("fact").at(30, 40))
        .alternative(num())
        .priority(PriorityKind::Unary, &["neg", "fact"])
        .priority(PriorityKind::Left, &["add"]);

    let error = expect_invalid(&grammar(production));

    assert_eq!(
        error,
        SemanticError::MixedUnaryPriorities {
            production: "exp".into(),
            span: range(30, 40),
            previous: range(10, 20),
        }
    );
}

#[test]
fn single_unary_block() {
    let production = ProductionAst::new("exp")
        .alternative(alt([lit("-"), el("exp")]).named("neg"))
        .alternative(num())
        .priority(PriorityKind::Unary, &["neg"]);

    insta::assert_snapshot!(expect_invalid_message(&grammar(production)), @"`exp` cannot have a unary priority on its own");
}

#[test]
fn unary_alternative_recursive_on_both_ends() {
    let production = ProductionAst::new("exp")
        .alternative(alt([el("exp"), lit("+"), el("exp")]).named("add"))
        .alternative(num())
        .priority(PriorityKind::Unary, &["add"])
        .priority(PriorityKind::Left, &["add"]);

    insta::assert_snapshot!(expect_invalid_message(&grammar(production)), @"unary priority alternative `exp.add` must recurse on `exp` at exactly one end");
}

#[test]
fn unary_alternative_too_short() {
    let production = ProductionAst::new("exp")
        .alternative(alt([el("exp")]).named("same"))
        .alternative(num())
        .priority(PriorityKind::Unary, &["same"])
        .priority(PriorityKind::Left, &[]);

    insta::assert_snapshot!(expect_invalid_message(&grammar(production)), @"unary priority alternative `exp.same` needs at least 2 elements");
}

#[test]
fn unary_operator_next_to_recursion() {
    let production = ProductionAst::new("exp")
        .alternative(alt([el("exp"), lit("+"), el("exp")]).named("add"))
        .alternative(alt([lit("("), el("op"), el("exp")]).named("cast"))
        .alternative(num())
        .priority(PriorityKind::Unary, &["cast"])
        .priority(PriorityKind::Left, &["add"]);

    insta::assert_snapshot!(expect_invalid_message(&grammar(production)), @"second to last element of unary priority alternative `exp.cast` must be a single token or literal");
}
