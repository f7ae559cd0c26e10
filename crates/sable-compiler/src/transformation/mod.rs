//! Transformation model: how parser constructs become tree nodes.
//!
//! A production transformation states which tree values a parser production
//! yields. An alternative transformation states how one parser alternative
//! builds those values from its elements. Both are either written by the
//! grammar author ([`Origin::Explicit`]) or synthesized ([`Origin::Implicit`]).

mod store;
mod typing;

#[cfg(test)]
mod typing_tests;

use rowan::TextRange;
use serde::Serialize;

pub use store::Transformations;
pub use typing::TypeContext;

use crate::ast::ListExpansion;
use crate::grammar::{
    AlternativeId, Declaration, ElementId, ElementShape, LocalNamespace, ProductionId,
    TreeAlternativeId, TreeProductionId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    Explicit,
    Implicit,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductionTransformation {
    pub production: ProductionId,
    pub origin: Origin,
    pub elements: Vec<ProductionTransformationElement>,
    /// Elements by explicit or unique implicit name, as indices into `elements`.
    #[serde(skip)]
    pub local: LocalNamespace<usize>,
    #[serde(skip)]
    pub span: TextRange,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductionTransformationElement {
    pub shape: ElementShape,
    /// Declaration of a Normal element's name unit.
    pub target: Option<Declaration>,
    pub name: Option<String>,
    #[serde(skip)]
    pub span: TextRange,
}

impl ProductionTransformation {
    /// Transformation with no elements: the production disappears from the tree.
    pub fn empty(production: ProductionId, origin: Origin, span: TextRange) -> Self {
        Self {
            production,
            origin,
            elements: Vec::new(),
            local: LocalNamespace::default(),
            span,
        }
    }

    /// Implicit pass-through to the tree production of the same name.
    pub fn pass_through(
        production: ProductionId,
        tree_production: TreeProductionId,
        shape: ElementShape,
        span: TextRange,
    ) -> Self {
        Self {
            production,
            origin: Origin::Implicit,
            elements: vec![ProductionTransformationElement {
                shape,
                target: Some(Declaration::TreeProduction(tree_production)),
                name: None,
                span,
            }],
            local: LocalNamespace::default(),
            span,
        }
    }

    /// Tree production targeted by a transformation with a single, at most
    /// once occurring, Normal element.
    pub fn trivial_target(&self) -> Option<TreeProductionId> {
        let [element] = self.elements.as_slice() else {
            return None;
        };
        let ElementShape::Normal { cardinality, .. } = &element.shape else {
            return None;
        };
        if !cardinality.is_at_most_one() || cardinality.upper().finite() == Some(0) {
            return None;
        }
        match element.target {
            Some(Declaration::TreeProduction(id)) => Some(id),
            _ => None,
        }
    }

    pub fn is_trivially_implicit(&self) -> bool {
        self.trivial_target().is_some()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AlternativeTransformation {
    pub alternative: AlternativeId,
    pub origin: Origin,
    pub elements: Vec<AlternativeTransformationElement>,
    #[serde(skip)]
    pub span: TextRange,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AlternativeTransformationElement {
    Null {
        #[serde(skip)]
        span: TextRange,
    },
    Reference(ReferenceElement),
    New(NewElement),
    List(ListElement),
}

impl AlternativeTransformationElement {
    pub fn span(&self) -> TextRange {
        match self {
            Self::Null { span } => *span,
            Self::Reference(reference) => reference.span,
            Self::New(new) => new.span,
            Self::List(list) => list.span,
        }
    }
}

/// What a reference reads: a parser element, or one element of the
/// transformation of the production that parser element references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReferenceSource {
    Natural { element: ElementId },
    Transformed { element: ElementId, part: usize },
}

impl ReferenceSource {
    pub fn element(self) -> ElementId {
        match self {
            ReferenceSource::Natural { element } | ReferenceSource::Transformed { element, .. } => {
                element
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReferenceElement {
    pub source: ReferenceSource,
    #[serde(skip)]
    pub span: TextRange,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewElement {
    pub target: TreeAlternativeId,
    pub origin: Origin,
    pub params: Vec<AlternativeTransformationElement>,
    #[serde(skip)]
    pub span: TextRange,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListElement {
    pub items: Vec<ListItem>,
    #[serde(skip)]
    pub span: TextRange,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ListItem {
    Reference(ReferenceElement),
    New(NewElement),
    Expand {
        expansion: ListExpansion,
        source: ReferenceSource,
        #[serde(skip)]
        span: TextRange,
    },
}

impl ListItem {
    pub fn span(&self) -> TextRange {
        match self {
            ListItem::Reference(reference) => reference.span,
            ListItem::New(new) => new.span,
            ListItem::Expand { span, .. } => *span,
        }
    }
}
