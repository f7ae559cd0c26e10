//! Name references of the parser and tree sections.

use super::Analyzer;
use crate::ast::Unit;
use crate::error::SemanticError;
use crate::grammar::{DeclarationKind, ElementShape};

impl Analyzer<'_> {
    pub(super) fn verify_references(&self) -> Result<(), SemanticError> {
        let context = self.context();
        for root in self.grammar.declared_roots() {
            context.expect_global(root, DeclarationKind::NORMAL_PRODUCTIONS)?;
        }

        let mut resolved = 0usize;
        for (_, alternative) in self.grammar.alternatives() {
            for &element in &alternative.elements {
                let shape = &self.grammar.element(element).shape;
                let expected = match shape {
                    ElementShape::Dangling { .. } => DeclarationKind::DANGLING_PRODUCTIONS,
                    _ => DeclarationKind::TOKENS_OR_PARSER_PRODUCTIONS,
                };
                for unit in shape.units() {
                    if let Unit::Name(identifier) = unit {
                        context.expect_global(identifier, expected)?;
                        resolved += 1;
                    }
                }
            }
        }

        for (_, element) in self.grammar.tree_elements() {
            for unit in element.shape.units() {
                if let Unit::Name(identifier) = unit {
                    context.expect_tree(identifier, DeclarationKind::TOKENS_OR_TREE_PRODUCTIONS)?;
                    resolved += 1;
                }
            }
        }

        tracing::debug!(resolved, "references verified");
        Ok(())
    }
}
