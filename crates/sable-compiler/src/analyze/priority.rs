//! Priority block patterns.
//!
//! `Left` and `Right` blocks list binary operator alternatives shaped
//! `P op P`. `Unary` blocks list prefix (`op P`) or postfix (`P op`)
//! alternatives, all on the same side.

use rowan::TextRange;

use super::Analyzer;
use crate::ast::{PriorityKind, Unit};
use crate::error::{OperandPosition, SemanticError};
use crate::grammar::{AlternativeId, ElementId, ElementShape, Priority, ProductionId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecursionSide {
    Left,
    Right,
}

impl Analyzer<'_> {
    pub(super) fn verify_priorities(&self) -> Result<(), SemanticError> {
        let mut blocks = 0usize;
        for (id, production) in self.grammar.productions() {
            for priority in &production.priorities {
                match priority.kind {
                    PriorityKind::Left | PriorityKind::Right => {
                        for &alternative in &priority.alternatives {
                            self.verify_binary(id, priority.kind, alternative)?;
                        }
                    }
                    PriorityKind::Unary => self.verify_unary_block(id, priority)?,
                }
                blocks += 1;
            }

            if let [priority] = production.priorities.as_slice()
                && priority.kind == PriorityKind::Unary
            {
                return Err(SemanticError::SingleUnaryPriority {
                    production: production.name.text.clone(),
                    span: priority.span,
                });
            }
        }
        tracing::debug!(blocks, "priorities verified");
        Ok(())
    }

    fn verify_binary(
        &self,
        production: ProductionId,
        kind: PriorityKind,
        id: AlternativeId,
    ) -> Result<(), SemanticError> {
        let alternative = self.grammar.alternative(id);
        let describe = || self.grammar.describe_alternative(id);
        let elements = &alternative.elements;
        if elements.len() < 3 {
            return Err(SemanticError::PriorityBadPattern {
                priority: kind,
                alternative: describe(),
                minimum: 3,
                span: alternative.span,
            });
        }

        let ends = [
            (elements[0], "as its first element"),
            (elements[elements.len() - 1], "as its last element"),
        ];
        // Both ends must recurse before either end's cardinality is looked at.
        for (element, expected) in ends {
            if !self.is_self_reference(production, element) {
                return Err(SemanticError::PriorityBadRecursion {
                    priority: kind,
                    alternative: describe(),
                    production: self.grammar.production(production).name.text.clone(),
                    expected,
                    span: self.grammar.element(element).span,
                });
            }
        }
        for (element, _) in ends {
            self.expect_exactly_once(kind, id, element)?;
        }

        self.verify_operand(kind, id, elements[1], OperandPosition::Second)
    }

    fn verify_unary_block(
        &self,
        production: ProductionId,
        priority: &Priority,
    ) -> Result<(), SemanticError> {
        let mut side: Option<(RecursionSide, TextRange)> = None;
        for &id in &priority.alternatives {
            let alternative = self.grammar.alternative(id);
            let current = self.verify_unary(production, id)?;
            match side {
                None => side = Some((current, alternative.span)),
                Some((expected, previous)) if expected != current => {
                    return Err(SemanticError::MixedUnaryPriorities {
                        production: self.grammar.production(production).name.text.clone(),
                        span: alternative.span,
                        previous,
                    });
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    fn verify_unary(
        &self,
        production: ProductionId,
        id: AlternativeId,
    ) -> Result<RecursionSide, SemanticError> {
        let kind = PriorityKind::Unary;
        let alternative = self.grammar.alternative(id);
        let elements = &alternative.elements;
        if elements.len() < 2 {
            return Err(SemanticError::PriorityBadPattern {
                priority: kind,
                alternative: self.grammar.describe_alternative(id),
                minimum: 2,
                span: alternative.span,
            });
        }

        let first = elements[0];
        let last = elements[elements.len() - 1];
        let side = match (
            self.is_self_reference(production, first),
            self.is_self_reference(production, last),
        ) {
            (true, false) => RecursionSide::Left,
            (false, true) => RecursionSide::Right,
            _ => {
                return Err(SemanticError::PriorityBadRecursion {
                    priority: kind,
                    alternative: self.grammar.describe_alternative(id),
                    production: self.grammar.production(production).name.text.clone(),
                    expected: "at exactly one end",
                    span: alternative.span,
                });
            }
        };

        let (recursive, operand, position) = match side {
            RecursionSide::Left => (first, last, OperandPosition::Last),
            RecursionSide::Right => (last, first, OperandPosition::First),
        };
        self.expect_exactly_once(kind, id, recursive)?;
        self.verify_operand(kind, id, operand, position)?;

        if elements.len() > 2 {
            let (neighbour, position) = match side {
                RecursionSide::Left => (elements[1], OperandPosition::Second),
                RecursionSide::Right => (elements[elements.len() - 2], OperandPosition::SecondToLast),
            };
            self.verify_operand(kind, id, neighbour, position)?;
        }

        Ok(side)
    }

    /// A Normal element naming the production itself, whatever its cardinality.
    fn is_self_reference(&self, production: ProductionId, element: ElementId) -> bool {
        let name = &self.grammar.production(production).name.text;
        matches!(
            &self.grammar.element(element).shape,
            ElementShape::Normal { unit: Unit::Name(identifier), .. } if identifier.text == *name
        )
    }

    fn expect_exactly_once(
        &self,
        kind: PriorityKind,
        alternative: AlternativeId,
        element: ElementId,
    ) -> Result<(), SemanticError> {
        let element = self.grammar.element(element);
        if element.shape.cardinality().is_exactly_one() {
            return Ok(());
        }
        Err(SemanticError::OverQualifiedRecursiveElement {
            priority: kind,
            alternative: self.grammar.describe_alternative(alternative),
            span: element.span,
        })
    }

    /// Operators must be a single Normal occurrence of a literal or token.
    /// Unresolved names are left to the reference pass.
    fn verify_operand(
        &self,
        kind: PriorityKind,
        alternative: AlternativeId,
        element: ElementId,
        position: OperandPosition,
    ) -> Result<(), SemanticError> {
        let element = self.grammar.element(element);
        let ElementShape::Normal { unit, cardinality } = &element.shape else {
            return Err(SemanticError::PriorityNonNormalOperand {
                priority: kind,
                position,
                alternative: self.grammar.describe_alternative(alternative),
                span: element.span,
            });
        };

        let token_like = match unit {
            Unit::Name(identifier) => self
                .context()
                .resolve_global(&identifier.text)
                .is_none_or(|declaration| self.context().kind(declaration).is_token_like()),
            Unit::String { .. } | Unit::Char { .. } | Unit::Start(_) | Unit::End(_) => true,
        };
        if cardinality.is_exactly_one() && token_like {
            return Ok(());
        }
        Err(SemanticError::PriorityBadOperand {
            priority: kind,
            position,
            alternative: self.grammar.describe_alternative(alternative),
            span: element.span,
        })
    }
}
