use rowan::TextRange;
use sable_core::Type;

use super::{
    ListElement, ListItem, Origin, ProductionTransformation, ReferenceElement, ReferenceSource,
    Transformations, TypeContext,
};
use crate::ast::build::name;
use crate::ast::{ElementAst, GrammarAst, ListExpansion, Operator, ProductionAst};
use crate::error::SemanticError;
use crate::grammar::{ElementId, Grammar, ResolutionContext};
use crate::test_utils::{alt, el, lit};

/// `p = (arg Separator comma)+ (a b)* arg`
fn lists() -> Grammar {
    let ast = GrammarAst::new()
        .tokens(["arg", "comma", "a", "b"])
        .production(ProductionAst::new("p").alternative(alt([
            ElementAst::separated(name("arg"), name("comma")).op(Operator::OneOrMore),
            ElementAst::alternated(name("a"), name("b")).op(Operator::ZeroOrMore),
            el("arg"),
        ])));
    Grammar::build(&ast).unwrap()
}

fn elements(grammar: &Grammar) -> Vec<ElementId> {
    grammar
        .alternatives()
        .flat_map(|(_, alternative)| alternative.elements.clone())
        .collect()
}

fn natural(element: ElementId) -> ReferenceSource {
    ReferenceSource::Natural { element }
}

fn expand(expansion: ListExpansion, element: ElementId) -> ListItem {
    ListItem::Expand {
        expansion,
        source: natural(element),
        span: TextRange::default(),
    }
}

fn reference(element: ElementId) -> ListItem {
    ListItem::Reference(ReferenceElement {
        source: natural(element),
        span: TextRange::default(),
    })
}

fn item_type(types: &TypeContext<'_>, item: ListItem) -> Result<Type, SemanticError> {
    types.list_item_type(&item)
}

#[test]
fn separated_list_sides() {
    let grammar = lists();
    let transformations = Transformations::default();
    let types = TypeContext::new(&grammar, &transformations);
    let ids = elements(&grammar);

    let whole = item_type(&types, expand(ListExpansion::Normal, ids[0])).unwrap();
    let left = item_type(&types, expand(ListExpansion::Left, ids[0])).unwrap();
    let right = item_type(&types, expand(ListExpansion::Right, ids[0])).unwrap();

    insta::assert_snapshot!(format!("{whole} | {left} | {right}"), @"(arg Separator comma)+ | arg+ | comma*");
}

#[test]
fn alternated_list_sides() {
    let grammar = lists();
    let transformations = Transformations::default();
    let types = TypeContext::new(&grammar, &transformations);
    let ids = elements(&grammar);

    let left = item_type(&types, expand(ListExpansion::Left, ids[1])).unwrap();
    let right = item_type(&types, expand(ListExpansion::Right, ids[1])).unwrap();

    insta::assert_snapshot!(format!("{left} | {right}"), @"a* | b*");
}

#[test]
fn side_of_plain_element() {
    let grammar = lists();
    let transformations = Transformations::default();
    let types = TypeContext::new(&grammar, &transformations);
    let ids = elements(&grammar);

    let error = item_type(&types, expand(ListExpansion::Right, ids[2])).unwrap_err();

    insta::assert_snapshot!(error, @"`arg` is not a separated or alternated list and has no Right part");
}

#[test]
fn list_concatenation() {
    let grammar = lists();
    let transformations = Transformations::default();
    let types = TypeContext::new(&grammar, &transformations);
    let ids = elements(&grammar);
    let list = ListElement {
        items: vec![reference(ids[2]), expand(ListExpansion::Left, ids[0])],
        span: TextRange::default(),
    };

    insta::assert_snapshot!(types.list_type(&list).unwrap(), @"arg^2..");
}

#[test]
fn incompatible_list_items() {
    let grammar = lists();
    let transformations = Transformations::default();
    let types = TypeContext::new(&grammar, &transformations);
    let ids = elements(&grammar);
    let list = ListElement {
        items: vec![expand(ListExpansion::Normal, ids[1]), reference(ids[2])],
        span: TextRange::default(),
    };

    let error = types.list_type(&list).unwrap_err();

    insta::assert_snapshot!(error, @"cannot append `arg` to a list of `(a b)*`");
}

#[test]
fn vanishing_production_types() {
    let ast = GrammarAst::new()
        .production(ProductionAst::new("p").alternative(alt([
            el("op").op(Operator::ZeroOrMore),
            el("op").op(Operator::ZeroOrOne),
        ])))
        .production(ProductionAst::new("op").alternative(alt([lit("+")])));
    let grammar = Grammar::build(&ast).unwrap();
    let ids = elements(&grammar);
    let op = ResolutionContext::new(&grammar)
        .production_named("op")
        .unwrap();

    let transformations = Transformations::default();
    let types = TypeContext::new(&grammar, &transformations);
    assert_eq!(types.natural_type(ids[0]).to_string(), "op*");

    let mut transformations = Transformations::default();
    transformations.assign_production(ProductionTransformation::empty(
        op,
        Origin::Implicit,
        TextRange::default(),
    ));
    let types = TypeContext::new(&grammar, &transformations);
    assert_eq!(types.natural_type(ids[0]), Type::EmptyList);
    assert_eq!(types.natural_type(ids[1]), Type::Null);
}
