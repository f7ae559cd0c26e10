//! Implicit transformation synthesis.
//!
//! Every production without an explicit transformation either passes through
//! to the tree production of the same name or vanishes. Every alternative
//! without an explicit transformation is then matched element by element
//! against a tree alternative (see [`super::matcher`]).
//!
//! Existing transformations are never replaced, so synthesizing twice is a no-op.

use sable_core::CardinalityInterval;

use super::Analyzer;
use crate::ast::Unit;
use crate::error::SemanticError;
use crate::grammar::{AlternativeId, ElementShape, TreeAlternativeId, TreeProductionId};
use crate::transformation::{
    AlternativeTransformation, AlternativeTransformationElement, NewElement, Origin,
    ProductionTransformation,
};

impl Analyzer<'_> {
    pub(super) fn synthesize_productions(&mut self) {
        let context = self.context();
        let mut synthesized = 0usize;
        for (id, production) in self.grammar.productions() {
            if self.transformations.production(id).is_some() {
                continue;
            }
            let transformation = match context.tree_production_named(&production.name.text) {
                Some(tree_production) => ProductionTransformation::pass_through(
                    id,
                    tree_production,
                    ElementShape::Normal {
                        unit: Unit::Name(production.name.clone()),
                        cardinality: CardinalityInterval::ONE_ONE,
                    },
                    production.name.span,
                ),
                None => ProductionTransformation::empty(id, Origin::Implicit, production.name.span),
            };
            tracing::trace!(
                production = %production.name.text,
                elements = transformation.elements.len(),
                "implicit production transformation"
            );
            self.transformations.assign_production(transformation);
            synthesized += 1;
        }
        tracing::debug!(synthesized, "production transformations synthesized");
    }

    pub(super) fn synthesize_alternatives(&mut self) -> Result<(), SemanticError> {
        let mut synthesized = 0usize;
        for (id, alternative) in self.grammar.alternatives() {
            if self.transformations.alternative(id).is_some() {
                continue;
            }
            let production = self.transformations.ensure_production(alternative.production);

            if production.elements.is_empty() {
                let transformation = AlternativeTransformation {
                    alternative: id,
                    origin: Origin::Implicit,
                    elements: Vec::new(),
                    span: alternative.span,
                };
                self.transformations.assign_alternative(transformation);
                synthesized += 1;
                continue;
            }

            let trivial_target = production
                .trivial_target()
                .filter(|_| self.config.synthesize);
            let Some(tree_production) = trivial_target else {
                return Err(SemanticError::NonTrivialProductionTransformation {
                    production: self.grammar.production(alternative.production).name.text.clone(),
                    alternative: self.grammar.describe_alternative(id),
                    span: alternative.span,
                });
            };

            let transformation = self.synthesize_alternative(id, tree_production)?;
            self.transformations.assign_alternative(transformation);
            synthesized += 1;
        }
        tracing::debug!(synthesized, "alternative transformations synthesized");
        Ok(())
    }

    fn synthesize_alternative(
        &self,
        id: AlternativeId,
        tree_production: TreeProductionId,
    ) -> Result<AlternativeTransformation, SemanticError> {
        let alternative = self.grammar.alternative(id);
        let Some(target) = self.target_tree_alternative(id, tree_production) else {
            return Err(SemanticError::UnmatchedAlternative {
                alternative: self.grammar.describe_alternative(id),
                span: alternative.span,
            });
        };

        let params = self.match_alternative(id, target)?;
        tracing::trace!(
            alternative = %self.grammar.describe_alternative(id),
            target = %self.grammar.describe_tree_alternative(target),
            "implicit alternative transformation"
        );

        Ok(AlternativeTransformation {
            alternative: id,
            origin: Origin::Implicit,
            elements: vec![AlternativeTransformationElement::New(NewElement {
                target,
                origin: Origin::Implicit,
                params,
                span: alternative.span,
            })],
            span: alternative.span,
        })
    }

    /// Tree alternative of the same name, or at the same position when unnamed.
    fn target_tree_alternative(
        &self,
        id: AlternativeId,
        tree_production: TreeProductionId,
    ) -> Option<TreeAlternativeId> {
        let alternative = self.grammar.alternative(id);
        match &alternative.name {
            Some(name) => self
                .context()
                .tree_alternative_named(tree_production, &name.text),
            None => self
                .grammar
                .tree_production(tree_production)
                .alternatives
                .get(alternative.index)
                .copied(),
        }
    }
}
