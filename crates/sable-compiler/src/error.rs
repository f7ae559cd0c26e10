//! Semantic errors raised by grammar analysis.
//!
//! Every variant carries structured data: names, spans and, where it helps
//! the reader, the competing candidate. The pipeline stops at the first error.
//! Rendering with source snippets lives in [`crate::diagnostics`].

use rowan::TextRange;
use sable_core::Type;

use crate::ast::{ListExpansion, Operator, PriorityKind};
use crate::grammar::{DeclarationKind, ExpectedKinds};

/// Position of the operand a priority pattern rejects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandPosition {
    First,
    Second,
    SecondToLast,
    Last,
}

impl std::fmt::Display for OperandPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::First => write!(f, "first"),
            Self::Second => write!(f, "second"),
            Self::SecondToLast => write!(f, "second to last"),
            Self::Last => write!(f, "last"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SemanticError {
    // Declarations
    #[error("`{name}` is already declared")]
    DuplicateDeclaration {
        name: String,
        span: TextRange,
        previous: TextRange,
    },

    #[error("`{production}` already has an alternative named `{name}`")]
    DuplicateAlternativeName {
        production: String,
        name: String,
        span: TextRange,
        previous: TextRange,
    },

    #[error("`{alternative}` already has an element named `{name}`")]
    DuplicateElementName {
        alternative: String,
        name: String,
        span: TextRange,
        previous: TextRange,
    },

    #[error("the transformation of `{production}` already has an element named `{name}`")]
    DuplicateProductionTransformationElementName {
        production: String,
        name: String,
        span: TextRange,
        previous: TextRange,
    },

    #[error("`{production}` already has a transformation")]
    DuplicateProductionTransformation {
        production: String,
        span: TextRange,
        previous: TextRange,
    },

    #[error("`{alternative}` already has a transformation")]
    DuplicateAlternativeTransformation {
        alternative: String,
        span: TextRange,
        previous: TextRange,
    },

    #[error("invalid interval `{operator}`")]
    InvalidInterval { operator: Operator, span: TextRange },

    // References
    #[error("`{name}` is not defined")]
    UndefinedReference { name: String, span: TextRange },

    #[error("expected {expected}, found {found} `{name}`")]
    BadReference {
        name: String,
        found: DeclarationKind,
        expected: ExpectedKinds,
        span: TextRange,
    },

    #[error("`{production}` has no alternative named `{name}`")]
    UndefinedAlternativeReference {
        production: String,
        name: String,
        span: TextRange,
    },

    #[error("tree production `{production}` has no alternative named `{name}`")]
    UndefinedTreeAlternativeReference {
        production: String,
        name: String,
        span: TextRange,
    },

    #[error("`{alternative}` has no element named `{name}`")]
    UndefinedElementReference {
        alternative: String,
        name: String,
        span: TextRange,
    },

    #[error("the transformation of `{production}` has no element named `{part}`")]
    UndefinedAlternativeTransformationReference {
        production: String,
        part: String,
        span: TextRange,
    },

    #[error("`{production}` must have exactly one unnamed alternative to be referenced without a name")]
    BadAlternativeReference { production: String, span: TextRange },

    #[error("tree production `{production}` must have exactly one unnamed alternative to be referenced without a name")]
    BadTreeAlternativeReference { production: String, span: TextRange },

    #[error("`{element}` cannot be referenced directly because `{production}` has an explicit transformation")]
    ImpossibleNaturalReference {
        element: String,
        production: String,
        span: TextRange,
    },

    #[error("`{element}` can hold several values and must be expanded into a list")]
    ListExpansionMissing { element: String, span: TextRange },

    #[error("`{element}` is expanded more than once")]
    MultipleListExpansion {
        element: String,
        span: TextRange,
        previous: TextRange,
    },

    #[error("`{element}` is not a separated or alternated list and has no {expansion:?} part")]
    BadListExpansion {
        element: String,
        expansion: ListExpansion,
        span: TextRange,
    },

    // Synthesis
    #[error("the transformation of `{production}` is not trivial, so `{alternative}` needs an explicit transformation")]
    NonTrivialProductionTransformation {
        production: String,
        alternative: String,
        span: TextRange,
    },

    #[error("no tree alternative matches `{alternative}`")]
    UnmatchedAlternative { alternative: String, span: TextRange },

    #[error("tree element `{tree_element}` of `{tree_alternative}` has no counterpart in `{alternative}`")]
    UnmatchedElement {
        alternative: String,
        tree_alternative: String,
        tree_element: String,
        span: TextRange,
        tree_span: TextRange,
    },

    #[error("ambiguous transformation of `{alternative}`: `{first}` and `{second}` both match tree element `{tree_element}`")]
    AmbiguousAlternativeTransformation {
        alternative: String,
        first: String,
        first_span: TextRange,
        second: String,
        second_span: TextRange,
        tree_element: String,
        tree_span: TextRange,
    },

    // Assignability
    #[error("transformation of `{alternative}` has {found} elements, expected {expected}")]
    BadAlternativeTransformationSignature {
        alternative: String,
        expected: usize,
        found: usize,
        span: TextRange,
    },

    #[error("`New {tree_alternative}` takes {expected} arguments, found {found}")]
    BadNewSignature {
        tree_alternative: String,
        expected: usize,
        found: usize,
        span: TextRange,
    },

    #[error("cannot assign `{found}` to `{expected}`")]
    ElementAssignment {
        found: Type,
        expected: Type,
        span: TextRange,
        target_span: TextRange,
    },

    #[error("cannot append `{element}` to a list of `{list}`")]
    IncompatibleListElement {
        element: Type,
        list: Type,
        span: TextRange,
    },

    // Priorities
    #[error("{priority} priority alternative `{alternative}` needs at least {minimum} elements")]
    PriorityBadPattern {
        priority: PriorityKind,
        alternative: String,
        minimum: usize,
        span: TextRange,
    },

    #[error("{priority} priority alternative `{alternative}` must recurse on `{production}` {expected}")]
    PriorityBadRecursion {
        priority: PriorityKind,
        alternative: String,
        production: String,
        expected: &'static str,
        span: TextRange,
    },

    #[error("{position} element of {priority} priority alternative `{alternative}` must be a normal element")]
    PriorityNonNormalOperand {
        priority: PriorityKind,
        position: OperandPosition,
        alternative: String,
        span: TextRange,
    },

    #[error("{position} element of {priority} priority alternative `{alternative}` must be a single token or literal")]
    PriorityBadOperand {
        priority: PriorityKind,
        position: OperandPosition,
        alternative: String,
        span: TextRange,
    },

    #[error("recursive element of {priority} priority alternative `{alternative}` must occur exactly once")]
    OverQualifiedRecursiveElement {
        priority: PriorityKind,
        alternative: String,
        span: TextRange,
    },

    #[error("unary priority of `{production}` mixes left and right recursive alternatives")]
    MixedUnaryPriorities {
        production: String,
        span: TextRange,
        previous: TextRange,
    },

    #[error("`{production}` cannot have a unary priority on its own")]
    SingleUnaryPriority { production: String, span: TextRange },

    // Ordering
    #[error("`{element}` is referenced after `{previous}` but declared before it")]
    ElementReordered {
        element: String,
        previous: String,
        span: TextRange,
        previous_span: TextRange,
    },

    #[error("`{element}.{part}` is referenced after `{element}.{previous}` but declared before it")]
    TransformationElementReordered {
        element: String,
        part: String,
        previous: String,
        span: TextRange,
        previous_span: TextRange,
    },

    // Root
    #[error("root production `{production}` must be transformed into exactly one tree node")]
    BadRootElementTransformation { production: String, span: TextRange },

    #[error("token production `{production}` must be transformed into exactly one element")]
    BadSyntacticTokenTransformation { production: String, span: TextRange },
}

impl SemanticError {
    /// Primary location of the error.
    pub fn span(&self) -> TextRange {
        match self {
            Self::DuplicateDeclaration { span, .. }
            | Self::DuplicateAlternativeName { span, .. }
            | Self::DuplicateElementName { span, .. }
            | Self::DuplicateProductionTransformationElementName { span, .. }
            | Self::DuplicateProductionTransformation { span, .. }
            | Self::DuplicateAlternativeTransformation { span, .. }
            | Self::InvalidInterval { span, .. }
            | Self::UndefinedReference { span, .. }
            | Self::BadReference { span, .. }
            | Self::UndefinedAlternativeReference { span, .. }
            | Self::UndefinedTreeAlternativeReference { span, .. }
            | Self::UndefinedElementReference { span, .. }
            | Self::UndefinedAlternativeTransformationReference { span, .. }
            | Self::BadAlternativeReference { span, .. }
            | Self::BadTreeAlternativeReference { span, .. }
            | Self::ImpossibleNaturalReference { span, .. }
            | Self::ListExpansionMissing { span, .. }
            | Self::MultipleListExpansion { span, .. }
            | Self::BadListExpansion { span, .. }
            | Self::NonTrivialProductionTransformation { span, .. }
            | Self::UnmatchedAlternative { span, .. }
            | Self::UnmatchedElement { span, .. }
            | Self::BadAlternativeTransformationSignature { span, .. }
            | Self::BadNewSignature { span, .. }
            | Self::ElementAssignment { span, .. }
            | Self::IncompatibleListElement { span, .. }
            | Self::PriorityBadPattern { span, .. }
            | Self::PriorityBadRecursion { span, .. }
            | Self::PriorityNonNormalOperand { span, .. }
            | Self::PriorityBadOperand { span, .. }
            | Self::OverQualifiedRecursiveElement { span, .. }
            | Self::MixedUnaryPriorities { span, .. }
            | Self::SingleUnaryPriority { span, .. }
            | Self::ElementReordered { span, .. }
            | Self::TransformationElementReordered { span, .. }
            | Self::BadRootElementTransformation { span, .. }
            | Self::BadSyntacticTokenTransformation { span, .. } => *span,
            Self::AmbiguousAlternativeTransformation { second_span, .. } => *second_span,
        }
    }

    /// Secondary locations, each with a short label.
    pub fn related(&self) -> Vec<(&'static str, TextRange)> {
        match self {
            Self::DuplicateDeclaration { previous, .. }
            | Self::DuplicateAlternativeName { previous, .. }
            | Self::DuplicateElementName { previous, .. }
            | Self::DuplicateProductionTransformationElementName { previous, .. }
            | Self::DuplicateProductionTransformation { previous, .. }
            | Self::DuplicateAlternativeTransformation { previous, .. } => {
                vec![("first declared here", *previous)]
            }
            Self::MultipleListExpansion { previous, .. } => {
                vec![("first expanded here", *previous)]
            }
            Self::MixedUnaryPriorities { previous, .. } => {
                vec![("recursion side set here", *previous)]
            }
            Self::UnmatchedElement { tree_span, .. } => vec![("tree element", *tree_span)],
            Self::AmbiguousAlternativeTransformation {
                first_span,
                tree_span,
                ..
            } => vec![
                ("also matches", *first_span),
                ("disputed tree element", *tree_span),
            ],
            Self::ElementAssignment { target_span, .. } => {
                vec![("expected because of this", *target_span)]
            }
            Self::ElementReordered { previous_span, .. }
            | Self::TransformationElementReordered { previous_span, .. } => {
                vec![("previously referenced here", *previous_span)]
            }
            _ => Vec::new(),
        }
    }
}
