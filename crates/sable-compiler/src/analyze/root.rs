//! Transformations of root and token productions.
//!
//! Only meaningful when the grammar declares a tree: a root must become exactly
//! one tree node, and a token production exactly one value.

use super::Analyzer;
use crate::ast::ProductionKind;
use crate::error::SemanticError;
use crate::grammar::{Declaration, ProductionId};
use crate::transformation::ProductionTransformation;

impl Analyzer<'_> {
    pub(super) fn verify_roots(&self) -> Result<(), SemanticError> {
        let roots = self.context().root_productions();
        for &root in &roots {
            let transformation = self.transformations.ensure_production(root);
            let is_single_node = is_single_value(transformation)
                && matches!(
                    transformation.elements[0].target,
                    Some(Declaration::TreeProduction(_))
                );
            if !is_single_node {
                return Err(SemanticError::BadRootElementTransformation {
                    production: self.production_name(root),
                    span: self.grammar.production(root).name.span,
                });
            }
        }

        for (id, production) in self.grammar.productions() {
            if production.kind != ProductionKind::Token {
                continue;
            }
            if !is_single_value(self.transformations.ensure_production(id)) {
                return Err(SemanticError::BadSyntacticTokenTransformation {
                    production: self.production_name(id),
                    span: production.name.span,
                });
            }
        }

        tracing::debug!(roots = roots.len(), "root transformations verified");
        Ok(())
    }

    fn production_name(&self, id: ProductionId) -> String {
        self.grammar.production(id).name.text.clone()
    }
}

fn is_single_value(transformation: &ProductionTransformation) -> bool {
    matches!(
        transformation.elements.as_slice(),
        [element] if element.shape.cardinality().is_exactly_one()
    )
}
