//! Type checks of explicit alternative transformations.
//!
//! Each explicit alternative transformation must produce the values its
//! production transformation promises, and each explicit `New` must fill every
//! element of its tree alternative. Synthesized transformations are correct by
//! construction and are not checked.

use sable_core::Type;

use super::Analyzer;
use crate::error::SemanticError;
use crate::transformation::{
    AlternativeTransformation, AlternativeTransformationElement, ListItem, NewElement, Origin,
    TypeContext,
};

impl Analyzer<'_> {
    pub(super) fn verify_assignability(&self) -> Result<(), SemanticError> {
        let types = self.types();
        let mut checked = 0usize;
        for transformation in self.transformations.alternatives() {
            if transformation.origin != Origin::Explicit {
                continue;
            }
            self.verify_alternative_transformation(&types, transformation)?;
            checked += 1;
        }
        tracing::debug!(checked, "explicit transformations type-checked");
        Ok(())
    }

    fn verify_alternative_transformation(
        &self,
        types: &TypeContext<'_>,
        transformation: &AlternativeTransformation,
    ) -> Result<(), SemanticError> {
        let production = self.grammar.alternative(transformation.alternative).production;
        let signature = self.transformations.ensure_production(production);
        if signature.elements.len() != transformation.elements.len() {
            return Err(SemanticError::BadAlternativeTransformationSignature {
                alternative: self.grammar.describe_alternative(transformation.alternative),
                expected: signature.elements.len(),
                found: transformation.elements.len(),
                span: transformation.span,
            });
        }

        for (element, target) in transformation.elements.iter().zip(&signature.elements) {
            let expected = target.shape.element_type();
            expect_assignable(types, element, &expected, target.span)?;
            self.verify_new_elements(types, element)?;
        }
        Ok(())
    }

    /// Checks every explicit `New` nested in `element`.
    fn verify_new_elements(
        &self,
        types: &TypeContext<'_>,
        element: &AlternativeTransformationElement,
    ) -> Result<(), SemanticError> {
        match element {
            AlternativeTransformationElement::Null { .. }
            | AlternativeTransformationElement::Reference(_) => Ok(()),
            AlternativeTransformationElement::New(new) => self.verify_new(types, new),
            AlternativeTransformationElement::List(list) => {
                for item in &list.items {
                    if let ListItem::New(new) = item {
                        self.verify_new(types, new)?;
                    }
                }
                Ok(())
            }
        }
    }

    fn verify_new(&self, types: &TypeContext<'_>, new: &NewElement) -> Result<(), SemanticError> {
        if new.origin == Origin::Explicit {
            let tree_alternative = self.grammar.tree_alternative(new.target);
            if tree_alternative.elements.len() != new.params.len() {
                return Err(SemanticError::BadNewSignature {
                    tree_alternative: self.grammar.describe_tree_alternative(new.target),
                    expected: tree_alternative.elements.len(),
                    found: new.params.len(),
                    span: new.span,
                });
            }
            for (param, &target) in new.params.iter().zip(&tree_alternative.elements) {
                let expected = types.tree_element_type(target);
                let target_span = self.grammar.tree_element(target).span;
                expect_assignable(types, param, &expected, target_span)?;
            }
        }

        for param in &new.params {
            self.verify_new_elements(types, param)?;
        }
        Ok(())
    }
}

fn expect_assignable(
    types: &TypeContext<'_>,
    element: &AlternativeTransformationElement,
    expected: &Type,
    target_span: rowan::TextRange,
) -> Result<(), SemanticError> {
    let found = types.element_type(element)?;
    if found.is_assignable_to(expected) {
        return Ok(());
    }
    Err(SemanticError::ElementAssignment {
        found,
        expected: expected.clone(),
        span: element.span(),
        target_span,
    })
}
