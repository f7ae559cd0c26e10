//! Element matching between a parser alternative and its tree alternative.
//!
//! Named parser elements go to the tree element of the same name. The
//! remaining anonymous elements form runs (maximal sequences between named
//! elements) that consume the unmatched tree elements left to right, with one
//! cursor shared by all runs. Parser elements that match nothing are dropped;
//! tree elements that receive nothing are errors.

use sable_core::CardinalityInterval;

use super::Analyzer;
use crate::ast::{ListExpansion, Unit};
use crate::error::SemanticError;
use crate::grammar::{AlternativeId, ElementId, ElementShape, TreeAlternativeId, TreeElementId};
use crate::transformation::{
    AlternativeTransformationElement, ListElement, ListItem, ReferenceElement, ReferenceSource,
};

impl Analyzer<'_> {
    /// Parameters of the implicit `New target(...)` for `alternative`, in tree order.
    pub(super) fn match_alternative(
        &self,
        alternative: AlternativeId,
        target: TreeAlternativeId,
    ) -> Result<Vec<AlternativeTransformationElement>, SemanticError> {
        let grammar = self.grammar;
        let parser_alternative = grammar.alternative(alternative);
        let tree_alternative = grammar.tree_alternative(target);
        let mut slots: Vec<Option<ElementId>> = vec![None; tree_alternative.elements.len()];

        let mut runs: Vec<Vec<ElementId>> = Vec::new();
        let mut run = Vec::new();
        for &element in &parser_alternative.elements {
            let Some(name) = &grammar.element(element).name else {
                run.push(element);
                continue;
            };
            if !run.is_empty() {
                runs.push(std::mem::take(&mut run));
            }
            if let Some(tree_element) = tree_alternative.local.get(name) {
                slots[grammar.tree_element(tree_element).index] = Some(element);
            }
        }
        if !run.is_empty() {
            runs.push(run);
        }

        let remaining: Vec<TreeElementId> = tree_alternative
            .elements
            .iter()
            .copied()
            .filter(|&tree_element| slots[grammar.tree_element(tree_element).index].is_none())
            .collect();

        let mut cursor = 0;
        for run in &runs {
            if cursor == remaining.len() {
                break;
            }
            // Parser element and tree element of the last match in this run.
            let mut previous: Option<(ElementId, TreeElementId)> = None;
            for &element in run {
                if let Some(&tree_element) = remaining.get(cursor)
                    && self.element_matches(element, tree_element)
                {
                    slots[grammar.tree_element(tree_element).index] = Some(element);
                    previous = Some((element, tree_element));
                    cursor += 1;
                } else if let Some((first, matched)) = previous
                    && self.element_matches(element, matched)
                {
                    // Reported at the tree element still waiting for input.
                    let disputed = remaining.get(cursor).copied().unwrap_or(matched);
                    return Err(SemanticError::AmbiguousAlternativeTransformation {
                        alternative: grammar.describe_alternative(alternative),
                        first: grammar.describe_element(first),
                        first_span: grammar.element(first).span,
                        second: grammar.describe_element(element),
                        second_span: grammar.element(element).span,
                        tree_element: grammar.describe_tree_element(disputed),
                        tree_span: grammar.tree_element(disputed).span,
                    });
                }
            }
        }

        if let Some(&unmatched) = remaining.get(cursor) {
            return Err(SemanticError::UnmatchedElement {
                alternative: grammar.describe_alternative(alternative),
                tree_alternative: grammar.describe_tree_alternative(target),
                tree_element: grammar.describe_tree_element(unmatched),
                span: parser_alternative.span,
                tree_span: grammar.tree_element(unmatched).span,
            });
        }

        // No tree element is left unmatched, so every slot is filled.
        Ok(slots
            .into_iter()
            .flatten()
            .map(|element| self.slot_element(element))
            .collect())
    }

    fn slot_element(&self, element: ElementId) -> AlternativeTransformationElement {
        let parser_element = self.grammar.element(element);
        let source = ReferenceSource::Natural { element };
        let span = parser_element.span;
        if parser_element.shape.cardinality().is_at_most_one() {
            return AlternativeTransformationElement::Reference(ReferenceElement { source, span });
        }
        AlternativeTransformationElement::List(ListElement {
            items: vec![ListItem::Expand {
                expansion: ListExpansion::Normal,
                source,
                span,
            }],
            span,
        })
    }

    pub(super) fn element_matches(&self, element: ElementId, tree_element: TreeElementId) -> bool {
        let parser = &self.grammar.element(element).shape;
        let tree = &self.grammar.tree_element(tree_element).shape;
        match (parser, tree) {
            (
                ElementShape::Normal { unit, cardinality },
                ElementShape::Normal {
                    unit: tree_unit,
                    cardinality: tree_cardinality,
                },
            ) => cardinality == tree_cardinality && self.units_match(unit, tree_unit),
            (
                ElementShape::Dangling { unit },
                ElementShape::Normal {
                    unit: tree_unit,
                    cardinality,
                },
            ) => {
                *cardinality == CardinalityInterval::ZERO_ONE
                    && matches!(
                        (unit, tree_unit),
                        (Unit::Name(name), Unit::Name(tree_name)) if name.text == tree_name.text
                    )
            }
            (
                ElementShape::Separated {
                    left,
                    right,
                    cardinality,
                },
                ElementShape::Separated {
                    left: tree_left,
                    right: tree_right,
                    cardinality: tree_cardinality,
                },
            )
            | (
                ElementShape::Alternated {
                    left,
                    right,
                    cardinality,
                },
                ElementShape::Alternated {
                    left: tree_left,
                    right: tree_right,
                    cardinality: tree_cardinality,
                },
            ) => {
                cardinality == tree_cardinality
                    && self.units_match(left, tree_left)
                    && self.units_match(right, tree_right)
            }
            _ => false,
        }
    }

    fn units_match(&self, unit: &Unit, tree_unit: &Unit) -> bool {
        match (unit, tree_unit) {
            (Unit::Name(name), Unit::Name(tree_name)) => {
                let target = self
                    .context()
                    .production_named(&name.text)
                    .and_then(|production| self.transformations.production(production))
                    .and_then(|transformation| transformation.trivial_target())
                    .map(|target| self.grammar.tree_production(target).name.text.as_str());
                target.unwrap_or(&name.text) == tree_name.text
            }
            (Unit::String { text, .. }, Unit::String { text: tree_text, .. }) => text == tree_text,
            (
                Unit::Char { kind, text, .. },
                Unit::Char {
                    kind: tree_kind,
                    text: tree_text,
                    ..
                },
            ) => kind == tree_kind && text == tree_text,
            (Unit::Start(_), Unit::Start(_)) | (Unit::End(_), Unit::End(_)) => true,
            _ => false,
        }
    }
}
