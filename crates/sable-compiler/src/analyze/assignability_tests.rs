use crate::ast::{
    AlternativeTransformationAst, GrammarAst, ListItemAst, Operator, ProductionAst,
    ReferenceAst, TransformationElementAst, TreeProductionAst,
};
use crate::test_utils::{
    alt, el, expect_invalid_message, expect_valid, expect_valid_dump, lit, new_node, refer, talt,
    tel,
};

/// `exp = {num} num | {neg} '-' exp` with its tree, plus `transformation` for `exp.num`.
fn unary(
    tree_num: Operator,
    transformation: impl IntoIterator<Item = TransformationElementAst>,
) -> GrammarAst {
    GrammarAst::new()
        .token("num")
        .production(
            ProductionAst::new("exp")
                .alternative(alt([el("num")]).named("num"))
                .alternative(alt([lit("-"), el("exp")]).named("neg")),
        )
        .tree_production(
            TreeProductionAst::new("exp")
                .alternative(talt([tel("num").op(tree_num)]).named("num"))
                .alternative(talt([tel("exp")]).named("neg")),
        )
        .alternative_transformation(AlternativeTransformationAst::new(
            "exp",
            Some("num"),
            transformation,
        ))
}

fn required(transformation: impl IntoIterator<Item = TransformationElementAst>) -> GrammarAst {
    unary(Operator::Exactly(1), transformation)
}

#[test]
fn explicit_new_matches_tree() {
    let ast = required([new_node("exp", Some("num"), [refer("num")])]);

    insta::assert_snapshot!(expect_valid_dump(&ast), @r"
    exp -> exp
      exp.num -> New exp.num(num)
      exp.neg -> New exp.neg(exp)
    ");
}

#[test]
fn wrong_element_count() {
    let ast = required([refer("num"), refer("num")]);

    insta::assert_snapshot!(expect_invalid_message(&ast), @"transformation of `exp.num` has 2 elements, expected 1");
}

#[test]
fn wrong_argument_count() {
    let ast = required([new_node("exp", Some("num"), [])]);

    insta::assert_snapshot!(expect_invalid_message(&ast), @"`New exp.num` takes 1 arguments, found 0");
}

#[test]
fn argument_of_wrong_type() {
    let ast = required([new_node("exp", Some("neg"), [refer("num")])]);

    insta::assert_snapshot!(expect_invalid_message(&ast), @"cannot assign `num` to `exp`");
}

#[test]
fn element_of_wrong_type() {
    let ast = required([refer("num")]);

    insta::assert_snapshot!(expect_invalid_message(&ast), @"cannot assign `num` to `exp`");
}

#[test]
fn null_for_optional_tree_element() {
    let ast = unary(
        Operator::ZeroOrOne,
        [new_node("exp", Some("num"), [TransformationElementAst::null()])],
    );

    insta::assert_snapshot!(expect_valid_dump(&ast), @r"
    exp -> exp
      exp.num -> New exp.num(Null)
      exp.neg -> New exp.neg(exp)
    ");
}

#[test]
fn null_for_required_tree_element() {
    let ast = required([new_node("exp", Some("num"), [TransformationElementAst::null()])]);

    insta::assert_snapshot!(expect_invalid_message(&ast), @"cannot assign `Null` to `num`");
}

/// `call = id [first]:arg [rest]:arg*` with a tree expecting `id arg*`.
fn call(arguments: impl IntoIterator<Item = ListItemAst>) -> GrammarAst {
    GrammarAst::new()
        .tokens(["id", "arg"])
        .production(ProductionAst::new("call").alternative(alt([
            el("id"),
            el("arg").named("first"),
            el("arg").op(Operator::ZeroOrMore).named("rest"),
        ])))
        .tree_production(
            TreeProductionAst::new("call")
                .alternative(talt([tel("id"), tel("arg").op(Operator::ZeroOrMore)])),
        )
        .alternative_transformation(AlternativeTransformationAst::new(
            "call",
            None,
            [new_node(
                "call",
                None,
                [refer("id"), TransformationElementAst::list(arguments)],
            )],
        ))
}

fn item(element: &str) -> ListItemAst {
    ListItemAst::Reference(ReferenceAst::natural(element))
}

#[test]
fn list_concatenation() {
    let ast = call([item("first"), ListItemAst::expand(ReferenceAst::natural("rest"))]);

    insta::assert_snapshot!(expect_valid_dump(&ast), @r"
    call -> call
      call#1 -> New call#1(id, [first, rest...])
    ");
}

#[test]
fn empty_list_for_optional_list() {
    expect_valid(&call([]));
}

#[test]
fn list_of_different_elements() {
    let ast = call([item("id"), ListItemAst::expand(ReferenceAst::natural("rest"))]);

    insta::assert_snapshot!(expect_invalid_message(&ast), @"cannot append `arg*` to a list of `id`");
}

#[test]
fn alternated_pair_into_homogeneous_list() {
    let ast = call([item("id"), item("first")]);

    insta::assert_snapshot!(expect_invalid_message(&ast), @"cannot assign `(id arg)` to `arg*`");
}
