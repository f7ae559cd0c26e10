//! Reference order of alternative transformations.
//!
//! Within one alternative transformation, parser elements must be read in
//! declaration order. Parts read through the same element (`e.a`, `e.b`) must
//! follow the order of the production transformation they come from.

use indexmap::IndexMap;
use rowan::TextRange;

use super::Analyzer;
use crate::error::SemanticError;
use crate::grammar::ElementId;
use crate::transformation::{
    AlternativeTransformationElement, ListItem, NewElement, ReferenceSource, TypeContext,
};

impl Analyzer<'_> {
    pub(super) fn verify_order(&self) -> Result<(), SemanticError> {
        let types = self.types();
        let mut alternatives = 0usize;
        for (id, _) in self.grammar.alternatives() {
            let transformation = self.transformations.ensure_alternative(id);
            let mut walker = OrderWalker {
                types,
                previous: None,
                parts: IndexMap::new(),
            };
            for element in &transformation.elements {
                walker.element(element)?;
            }
            alternatives += 1;
        }
        tracing::debug!(alternatives, "reference order verified");
        Ok(())
    }
}

/// Depth-first walk over one alternative transformation.
struct OrderWalker<'a> {
    types: TypeContext<'a>,
    /// Last parser element read, with the reference that read it.
    previous: Option<(ElementId, TextRange)>,
    /// Highest part read through each element so far.
    parts: IndexMap<ElementId, (usize, TextRange)>,
}

impl OrderWalker<'_> {
    fn element(&mut self, element: &AlternativeTransformationElement) -> Result<(), SemanticError> {
        match element {
            AlternativeTransformationElement::Null { .. } => Ok(()),
            AlternativeTransformationElement::Reference(reference) => {
                self.source(reference.source, reference.span)
            }
            AlternativeTransformationElement::New(new) => self.new_element(new),
            AlternativeTransformationElement::List(list) => {
                for item in &list.items {
                    match item {
                        ListItem::Reference(reference) => {
                            self.source(reference.source, reference.span)?
                        }
                        ListItem::New(new) => self.new_element(new)?,
                        ListItem::Expand { source, span, .. } => self.source(*source, *span)?,
                    }
                }
                Ok(())
            }
        }
    }

    fn new_element(&mut self, new: &NewElement) -> Result<(), SemanticError> {
        for param in &new.params {
            self.element(param)?;
        }
        Ok(())
    }

    fn source(&mut self, source: ReferenceSource, span: TextRange) -> Result<(), SemanticError> {
        let grammar = self.types.grammar();
        let element = source.element();
        if let Some((previous, previous_span)) = self.previous
            && grammar.element(element).index < grammar.element(previous).index
        {
            return Err(SemanticError::ElementReordered {
                element: grammar.describe_element(element),
                previous: grammar.describe_element(previous),
                span,
                previous_span,
            });
        }
        self.previous = Some((element, span));

        let ReferenceSource::Transformed { part, .. } = source else {
            return Ok(());
        };
        match self.parts.get(&element) {
            Some(&(previous, previous_span)) if part < previous => {
                Err(SemanticError::TransformationElementReordered {
                    element: grammar.describe_element(element),
                    part: self.types.describe_part(element, part),
                    previous: self.types.describe_part(element, previous),
                    span,
                    previous_span,
                })
            }
            Some(&(previous, _)) if part == previous => Ok(()),
            _ => {
                self.parts.insert(element, (part, span));
                Ok(())
            }
        }
    }
}
