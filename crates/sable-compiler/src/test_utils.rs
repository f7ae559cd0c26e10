//! Test utilities: element shorthands, a reference grammar and assertions.

use crate::analyze::{self, Analysis};
use crate::ast::build::{name, string};
use crate::ast::{
    AlternativeAst, ElementAst, GrammarAst, NewAst, PriorityKind, ProductionAst, ReferenceAst,
    TransformationElementAst, TreeAlternativeAst, TreeElementAst, TreeProductionAst,
};
use crate::config::Config;
use crate::diagnostics::Diagnostics;
use crate::error::SemanticError;

/// Normal parser element referencing `text`.
pub fn el(text: &str) -> ElementAst {
    ElementAst::normal(name(text))
}

/// Inline string parser element.
pub fn lit(text: &str) -> ElementAst {
    ElementAst::normal(string(text))
}

pub fn alt(elements: impl IntoIterator<Item = ElementAst>) -> AlternativeAst {
    AlternativeAst::new(elements)
}

/// Normal tree element referencing `text`.
pub fn tel(text: &str) -> TreeElementAst {
    TreeElementAst::normal(name(text))
}

pub fn tlit(text: &str) -> TreeElementAst {
    TreeElementAst::normal(string(text))
}

pub fn talt(elements: impl IntoIterator<Item = TreeElementAst>) -> TreeAlternativeAst {
    TreeAlternativeAst::new(elements)
}

/// Natural reference `element`.
pub fn refer(element: &str) -> TransformationElementAst {
    ReferenceAst::natural(element).into()
}

/// Transformed reference `element.part`.
pub fn refer_part(element: &str, part: &str) -> TransformationElementAst {
    ReferenceAst::transformed(element, part).into()
}

pub fn new_node(
    production: &str,
    alternative: Option<&str>,
    params: impl IntoIterator<Item = TransformationElementAst>,
) -> TransformationElementAst {
    NewAst::new(production, alternative, params).into()
}

/// Binary expression grammar with a mirrored tree:
///
/// ```text
/// Parser
///   exp = {add} exp '+' exp | {mul} exp '*' exp | {num} num
///     Priority Left: mul; Left: add;
/// Tree
///   exp = {add} exp '+' exp | {mul} exp '*' exp | {num} num
/// ```
pub fn expression_grammar() -> GrammarAst {
    GrammarAst::new()
        .token("num")
        .production(
            ProductionAst::new("exp")
                .alternative(alt([el("exp"), lit("+"), el("exp")]).named("add"))
                .alternative(alt([el("exp"), lit("*"), el("exp")]).named("mul"))
                .alternative(alt([el("num")]).named("num"))
                .priority(PriorityKind::Left, &["mul"])
                .priority(PriorityKind::Left, &["add"]),
        )
        .tree_production(
            TreeProductionAst::new("exp")
                .alternative(talt([tel("exp"), tlit("+"), tel("exp")]).named("add"))
                .alternative(talt([tel("exp"), tlit("*"), tel("exp")]).named("mul"))
                .alternative(talt([tel("num")]).named("num")),
        )
}

pub fn run(ast: &GrammarAst) -> Result<Analysis, SemanticError> {
    analyze::run(ast, &Config::default())
}

#[track_caller]
pub fn expect_valid(ast: &GrammarAst) -> Analysis {
    match run(ast) {
        Ok(analysis) => analysis,
        Err(error) => panic!(
            "Expected valid grammar, got error:\n{}",
            Diagnostics::from(&error).printer().render()
        ),
    }
}

/// Transformations of a valid grammar, as rendered by [`Analysis::dump`].
#[track_caller]
pub fn expect_valid_dump(ast: &GrammarAst) -> String {
    expect_valid(ast).dump()
}

#[track_caller]
pub fn expect_invalid(ast: &GrammarAst) -> SemanticError {
    match run(ast) {
        Ok(analysis) => panic!("Expected invalid grammar, got valid:\n{}", analysis.dump()),
        Err(error) => error,
    }
}

/// Error message of an invalid grammar.
#[track_caller]
pub fn expect_invalid_message(ast: &GrammarAst) -> String {
    expect_invalid(ast).to_string()
}
