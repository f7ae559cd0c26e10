//! Types of transformation elements.

use rowan::TextRange;
use sable_core::{CardinalityInterval, Type};

use super::{
    AlternativeTransformationElement, ListElement, ListItem, NewElement, ReferenceSource,
    Transformations,
};
use crate::ast::{ListExpansion, Unit};
use crate::error::SemanticError;
use crate::grammar::{
    ElementId, ElementShape, Grammar, ProductionId, ResolutionContext, TreeElementId,
};

/// Computes element types against a grammar and the transformations known so far.
#[derive(Debug, Clone, Copy)]
pub struct TypeContext<'a> {
    grammar: &'a Grammar,
    transformations: &'a Transformations,
}

impl<'a> TypeContext<'a> {
    pub fn new(grammar: &'a Grammar, transformations: &'a Transformations) -> Self {
        Self {
            grammar,
            transformations,
        }
    }

    pub fn grammar(&self) -> &'a Grammar {
        self.grammar
    }

    pub fn tree_element_type(&self, id: TreeElementId) -> Type {
        self.grammar.tree_element(id).shape.element_type()
    }

    /// Production referenced by the name unit of a Normal or Dangling element.
    pub fn referenced_production(&self, element: ElementId) -> Option<ProductionId> {
        let Some(Unit::Name(identifier)) = self.grammar.element(element).shape.single_unit() else {
            return None;
        };
        ResolutionContext::new(self.grammar).production_named(&identifier.text)
    }

    /// Type of the value of a parser element.
    ///
    /// An element whose production transforms into nothing yields `Null` or,
    /// when repeated, the empty list.
    pub fn natural_type(&self, element: ElementId) -> Type {
        let shape = &self.grammar.element(element).shape;
        let vanishes = self
            .referenced_production(element)
            .and_then(|production| self.transformations.production(production))
            .is_some_and(|transformation| transformation.elements.is_empty());
        if !vanishes {
            return shape.element_type();
        }
        if shape.cardinality().is_at_most_one() {
            Type::Null
        } else {
            Type::EmptyList
        }
    }

    pub fn reference_type(
        &self,
        source: ReferenceSource,
        span: TextRange,
    ) -> Result<Type, SemanticError> {
        match source {
            ReferenceSource::Natural { element } => Ok(self.natural_type(element)),
            ReferenceSource::Transformed { element, part } => {
                let (shape, times) = self.part_shape(element, part);
                let part_type = shape.element_type();
                part_type
                    .repeated(times)
                    .ok_or_else(|| SemanticError::IncompatibleListElement {
                        element: part_type.clone(),
                        list: part_type,
                        span,
                    })
            }
        }
    }

    pub fn new_type(&self, new: &NewElement) -> Type {
        let alternative = self.grammar.tree_alternative(new.target);
        let production = self.grammar.tree_production(alternative.production);
        Type::single(production.name.text.as_str(), CardinalityInterval::ONE_ONE)
    }

    pub fn element_type(
        &self,
        element: &AlternativeTransformationElement,
    ) -> Result<Type, SemanticError> {
        match element {
            AlternativeTransformationElement::Null { .. } => Ok(Type::Null),
            AlternativeTransformationElement::Reference(reference) => {
                self.reference_type(reference.source, reference.span)
            }
            AlternativeTransformationElement::New(new) => Ok(self.new_type(new)),
            AlternativeTransformationElement::List(list) => self.list_type(list),
        }
    }

    /// Concatenation of the item types, left to right.
    pub fn list_type(&self, list: &ListElement) -> Result<Type, SemanticError> {
        let mut accumulated = Type::EmptyList;
        for item in &list.items {
            let item_type = self.list_item_type(item)?;
            accumulated = accumulated.add(&item_type).ok_or_else(|| {
                SemanticError::IncompatibleListElement {
                    element: item_type,
                    list: accumulated.clone(),
                    span: item.span(),
                }
            })?;
        }
        Ok(accumulated)
    }

    pub fn list_item_type(&self, item: &ListItem) -> Result<Type, SemanticError> {
        match item {
            ListItem::Reference(reference) => self.reference_type(reference.source, reference.span),
            ListItem::New(new) => Ok(self.new_type(new)),
            ListItem::Expand {
                expansion: ListExpansion::Normal,
                source,
                span,
            } => self.reference_type(*source, *span),
            ListItem::Expand {
                expansion,
                source,
                span,
            } => self.side_type(*expansion, *source, *span),
        }
    }

    /// One side of a separated or alternated source.
    fn side_type(
        &self,
        expansion: ListExpansion,
        source: ReferenceSource,
        span: TextRange,
    ) -> Result<Type, SemanticError> {
        let (shape, times) = self.source_shape(source);

        let (left, right, cardinality, separated) = match shape {
            ElementShape::Separated {
                left,
                right,
                cardinality,
            } => (left, right, *cardinality, true),
            ElementShape::Alternated {
                left,
                right,
                cardinality,
            } => (left, right, *cardinality, false),
            ElementShape::Normal { .. } | ElementShape::Dangling { .. } => {
                return Err(SemanticError::BadListExpansion {
                    element: self.describe_source(source),
                    expansion,
                    span,
                });
            }
        };

        let cardinality = if times.is_exactly_one() {
            cardinality
        } else if !separated {
            cardinality.compose(&times)
        } else if times.is_at_most_one() {
            cardinality.union(&CardinalityInterval::ZERO_ZERO)
        } else {
            let source_type = shape.element_type();
            return Err(SemanticError::IncompatibleListElement {
                element: source_type.clone(),
                list: source_type,
                span,
            });
        };

        Ok(match (expansion, separated) {
            (ListExpansion::Right, true) => {
                Type::single(right.type_name(), cardinality.predecessor())
            }
            (ListExpansion::Right, false) => Type::single(right.type_name(), cardinality),
            _ => Type::single(left.type_name(), cardinality),
        })
    }

    /// Shape read by a reference and how many times it repeats.
    pub fn source_shape(&self, source: ReferenceSource) -> (&'a ElementShape, CardinalityInterval) {
        match source {
            ReferenceSource::Natural { element } => {
                (&self.grammar.element(element).shape, CardinalityInterval::ONE_ONE)
            }
            ReferenceSource::Transformed { element, part } => self.part_shape(element, part),
        }
    }

    fn part_shape(&self, element: ElementId, part: usize) -> (&'a ElementShape, CardinalityInterval) {
        let times = self.grammar.element(element).shape.cardinality();
        let production = self.transformed_production(element);
        let shape = &self
            .transformations
            .ensure_part(production, part)
            .shape;
        (shape, times)
    }

    fn transformed_production(&self, element: ElementId) -> ProductionId {
        self.referenced_production(element)
            .unwrap_or_else(|| crate::invariants::unresolved_transformed_reference(element))
    }

    /// `e` or `e.part`, as written in diagnostics.
    pub fn describe_source(&self, source: ReferenceSource) -> String {
        let element = self.grammar.describe_element(source.element());
        match source {
            ReferenceSource::Natural { .. } => element,
            ReferenceSource::Transformed { element: id, part } => {
                format!("{element}.{}", self.describe_part(id, part))
            }
        }
    }

    /// Name of element `part` of the transformation read through `element`.
    pub fn describe_part(&self, element: ElementId, part: usize) -> String {
        let production = self.transformed_production(element);
        let part = self.transformations.ensure_part(production, part);
        part.name.clone().unwrap_or_else(|| part.shape.to_string())
    }
}
