//! Text rendering of computed transformations.
//!
//! One line per production, followed by one indented line per alternative:
//!
//! ```text
//! exp -> exp
//!   exp.add -> New exp.add(exp, '+', exp)
//!   exp.num -> New exp.num(num)
//! ```

use std::fmt::Write;

use super::Analysis;
use crate::ast::ListExpansion;
use crate::transformation::{
    AlternativeTransformationElement, ListItem, NewElement, ProductionTransformationElement,
    TypeContext,
};

impl Analysis {
    pub fn dump(&self) -> String {
        let grammar = &self.grammar;
        let types = TypeContext::new(grammar, &self.transformations);
        let mut out = String::new();

        for (id, production) in grammar.productions() {
            out.push_str(&production.name.text);
            out.push_str(" ->");
            match self.transformations.production(id) {
                Some(transformation) => {
                    for element in &transformation.elements {
                        out.push(' ');
                        out.push_str(&production_element(element));
                    }
                }
                None => out.push_str(" ?"),
            }
            out.push('\n');

            for &alternative in &production.alternatives {
                write!(out, "  {} ->", grammar.describe_alternative(alternative))
                    .expect("String write never fails");
                match self.transformations.alternative(alternative) {
                    Some(transformation) => {
                        for element in &transformation.elements {
                            out.push(' ');
                            out.push_str(&alternative_element(&types, element));
                        }
                    }
                    None => out.push_str(" ?"),
                }
                out.push('\n');
            }
        }
        out
    }
}

fn production_element(element: &ProductionTransformationElement) -> String {
    let implicit = element.shape.implicit_name().map(|name| name.text.as_str());
    match &element.name {
        Some(name) if implicit != Some(name.as_str()) => format!("{name}:{}", element.shape),
        _ => element.shape.to_string(),
    }
}

fn alternative_element(
    types: &TypeContext<'_>,
    element: &AlternativeTransformationElement,
) -> String {
    match element {
        AlternativeTransformationElement::Null { .. } => "Null".to_string(),
        AlternativeTransformationElement::Reference(reference) => {
            types.describe_source(reference.source)
        }
        AlternativeTransformationElement::New(new) => new_element(types, new),
        AlternativeTransformationElement::List(list) => {
            let items: Vec<String> = list
                .items
                .iter()
                .map(|item| list_item(types, item))
                .collect();
            format!("[{}]", items.join(", "))
        }
    }
}

fn new_element(types: &TypeContext<'_>, new: &NewElement) -> String {
    let params: Vec<String> = new
        .params
        .iter()
        .map(|param| alternative_element(types, param))
        .collect();
    format!(
        "New {}({})",
        types.grammar().describe_tree_alternative(new.target),
        params.join(", ")
    )
}

fn list_item(types: &TypeContext<'_>, item: &ListItem) -> String {
    match item {
        ListItem::Reference(reference) => types.describe_source(reference.source),
        ListItem::New(new) => new_element(types, new),
        ListItem::Expand {
            expansion, source, ..
        } => {
            let source = types.describe_source(*source);
            match expansion {
                ListExpansion::Normal => format!("{source}..."),
                ListExpansion::Left => format!("{source}.Left..."),
                ListExpansion::Right => format!("{source}.Right..."),
            }
        }
    }
}
