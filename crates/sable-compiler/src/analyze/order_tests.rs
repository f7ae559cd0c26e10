use crate::ast::build::range;
use crate::ast::{
    AlternativeTransformationAst, GrammarAst, ProductionAst, ProductionTransformationAst,
    TransformationElementAst, TreeProductionAst,
};
use crate::error::SemanticError;
use crate::test_utils::{
    alt, el, expect_invalid, expect_invalid_message, expect_valid_dump, lit, new_node, refer,
    refer_part, talt, tel,
};

/// `exp = pair`, where `pair` is explicitly transformed into two parts.
fn pair_grammar(params: [TransformationElementAst; 2]) -> GrammarAst {
    GrammarAst::new()
        .token("x")
        .production(ProductionAst::new("exp").alternative(alt([el("pair")])))
        .production(
            ProductionAst::new("pair")
                .alternative(alt([el("x").named("a"), el("x").named("b")])),
        )
        .tree_production(TreeProductionAst::new("exp").alternative(talt([tel("x"), tel("x")])))
        .production_transformation(ProductionTransformationAst::new(
            "pair",
            [tel("x").named("first"), tel("x").named("second")],
        ))
        .alternative_transformation(AlternativeTransformationAst::new(
            "pair",
            None,
            [refer("a"), refer("b")],
        ))
        .alternative_transformation(AlternativeTransformationAst::new(
            "exp",
            None,
            [new_node("exp", None, params)],
        ))
}

#[test]
fn parts_in_declaration_order() {
    let ast = pair_grammar([refer_part("pair", "first"), refer_part("pair", "second")]);

    insta::assert_snapshot!(expect_valid_dump(&ast), @r"
    exp -> exp
      exp#1 -> New exp#1(pair.first, pair.second)
    pair -> first:x second:x
      pair#1 -> a b
    ");
}

#[test]
fn same_part_twice() {
    let ast = pair_grammar([refer_part("pair", "first"), refer_part("pair", "first")]);

    insta::assert_snapshot!(expect_valid_dump(&ast), @r"
    exp -> exp
      exp#1 -> New exp#1(pair.first, pair.first)
    pair -> first:x second:x
      pair#1 -> a b
    ");
}

#[test]
fn parts_reordered() {
    let ast = pair_grammar([refer_part("pair", "second"), refer_part("pair", "first")]);

    insta::assert_snapshot!(expect_invalid_message(&ast), @"`pair.first` is referenced after `pair.second` but declared before it");
}

#[test]
fn part_order_is_tracked_per_element() {
    let ast = GrammarAst::new()
        .token("x")
        .production(
            ProductionAst::new("exp")
                .alternative(alt([el("pair").named("p1"), el("pair").named("p2")])),
        )
        .production(
            ProductionAst::new("pair")
                .alternative(alt([el("x").named("a"), el("x").named("b")])),
        )
        .tree_production(TreeProductionAst::new("exp").alternative(talt([tel("x"), tel("x")])))
        .production_transformation(ProductionTransformationAst::new(
            "pair",
            [tel("x").named("first"), tel("x").named("second")],
        ))
        .alternative_transformation(AlternativeTransformationAst::new(
            "pair",
            None,
            [refer("a"), refer("b")],
        ))
        .alternative_transformation(AlternativeTransformationAst::new(
            "exp",
            None,
            [new_node("exp", None, [refer_part("p1", "second"), refer_part("p2", "first")])],
        ));

    insta::assert_snapshot!(expect_valid_dump(&ast), @r"
    exp -> exp
      exp#1 -> New exp#1(p1.second, p2.first)
    pair -> first:x second:x
      pair#1 -> a b
    ");
}

#[test]
fn synthesized_named_elements_reordered() {
    let ast = GrammarAst::new()
        .token("num")
        .production(ProductionAst::new("assign").alternative(alt([
            el("num").named("r").at(0, 1),
            lit("=").at(2, 3),
            el("num").named("l").at(4, 5),
        ])))
        .tree_production(
            TreeProductionAst::new("assign")
                .alternative(talt([tel("num").named("l"), tel("num").named("r")])),
        );

    let error = expect_invalid(&ast);

    assert_eq!(
        error,
        SemanticError::ElementReordered {
            element: "r".into(),
            previous: "l".into(),
            span: range(0, 1),
            previous_span: range(4, 5),
        }
    );
}

#[test]
fn explicit_elements_reordered() {
    let ast = GrammarAst::new()
        .token("num")
        .production(
            ProductionAst::new("exp")
                .alternative(
                    alt([el("exp").named("l"), lit("+"), el("exp").named("r")]).named("add"),
                )
                .alternative(alt([el("num")]).named("num")),
        )
        .tree_production(
            TreeProductionAst::new("exp")
                .alternative(talt([tel("exp").named("l"), tel("exp").named("r")]).named("add"))
                .alternative(talt([tel("num")]).named("num")),
        )
        .alternative_transformation(AlternativeTransformationAst::new(
            "exp",
            Some("add"),
            [new_node("exp", Some("add"), [refer("r"), refer("l")])],
        ));

    insta::assert_snapshot!(expect_invalid_message(&ast), @"`l` is referenced after `r` but declared before it");
}
