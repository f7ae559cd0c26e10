//! Shape of parser, tree and production-transformation elements.

use std::fmt;

use sable_core::{CardinalityInterval, Type};
use serde::{Serialize, Serializer};

use crate::ast::{ElementBody, Identifier, Operator, TreeElementBody, Unit};
use crate::error::SemanticError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Normal,
    Dangling,
    Separated,
    Alternated,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ElementShape {
    Normal {
        unit: Unit,
        cardinality: CardinalityInterval,
    },
    /// Parser-side only; always zero-or-one.
    Dangling { unit: Unit },
    Separated {
        left: Unit,
        right: Unit,
        cardinality: CardinalityInterval,
    },
    Alternated {
        left: Unit,
        right: Unit,
        cardinality: CardinalityInterval,
    },
}

impl ElementShape {
    pub(crate) fn from_parser(body: &ElementBody) -> Result<Self, SemanticError> {
        Ok(match body {
            ElementBody::Normal { unit, operator } => ElementShape::Normal {
                unit: unit.clone(),
                cardinality: cardinality(*operator, unit)?,
            },
            ElementBody::Dangling { unit } => ElementShape::Dangling { unit: unit.clone() },
            ElementBody::Separated {
                left,
                right,
                operator,
            } => ElementShape::Separated {
                left: left.clone(),
                right: right.clone(),
                cardinality: cardinality(*operator, left)?,
            },
            ElementBody::Alternated {
                left,
                right,
                operator,
            } => ElementShape::Alternated {
                left: left.clone(),
                right: right.clone(),
                cardinality: cardinality(*operator, left)?,
            },
        })
    }

    pub(crate) fn from_tree(body: &TreeElementBody) -> Result<Self, SemanticError> {
        Ok(match body {
            TreeElementBody::Normal { unit, operator } => ElementShape::Normal {
                unit: unit.clone(),
                cardinality: cardinality(*operator, unit)?,
            },
            TreeElementBody::Separated {
                left,
                right,
                operator,
            } => ElementShape::Separated {
                left: left.clone(),
                right: right.clone(),
                cardinality: cardinality(*operator, left)?,
            },
            TreeElementBody::Alternated {
                left,
                right,
                operator,
            } => ElementShape::Alternated {
                left: left.clone(),
                right: right.clone(),
                cardinality: cardinality(*operator, left)?,
            },
        })
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            ElementShape::Normal { .. } => ShapeKind::Normal,
            ElementShape::Dangling { .. } => ShapeKind::Dangling,
            ElementShape::Separated { .. } => ShapeKind::Separated,
            ElementShape::Alternated { .. } => ShapeKind::Alternated,
        }
    }

    pub fn cardinality(&self) -> CardinalityInterval {
        match self {
            ElementShape::Normal { cardinality, .. }
            | ElementShape::Separated { cardinality, .. }
            | ElementShape::Alternated { cardinality, .. } => *cardinality,
            ElementShape::Dangling { .. } => CardinalityInterval::ZERO_ONE,
        }
    }

    /// The unit of a Normal or Dangling element.
    pub fn single_unit(&self) -> Option<&Unit> {
        match self {
            ElementShape::Normal { unit, .. } | ElementShape::Dangling { unit } => Some(unit),
            ElementShape::Separated { .. } | ElementShape::Alternated { .. } => None,
        }
    }

    /// All units, left to right.
    pub fn units(&self) -> Vec<&Unit> {
        match self {
            ElementShape::Normal { unit, .. } | ElementShape::Dangling { unit } => vec![unit],
            ElementShape::Separated { left, right, .. }
            | ElementShape::Alternated { left, right, .. } => vec![left, right],
        }
    }

    /// Identifier of a Normal element's name unit when it occurs at most once.
    pub fn implicit_name(&self) -> Option<&Identifier> {
        match self {
            ElementShape::Normal {
                unit: Unit::Name(identifier),
                cardinality,
            } if cardinality.is_at_most_one() => Some(identifier),
            _ => None,
        }
    }

    pub fn element_type(&self) -> Type {
        match self {
            ElementShape::Normal { unit, cardinality } => Type::single(unit.type_name(), *cardinality),
            ElementShape::Dangling { unit } => Type::Homogeneous {
                name: unit.type_name(),
                cardinality: CardinalityInterval::ZERO_ONE,
            },
            ElementShape::Separated {
                left,
                right,
                cardinality,
            } => Type::separated(left.type_name(), right.type_name(), *cardinality),
            ElementShape::Alternated {
                left,
                right,
                cardinality,
            } => Type::alternated(left.type_name(), right.type_name(), *cardinality),
        }
    }
}

fn cardinality(operator: Option<Operator>, unit: &Unit) -> Result<CardinalityInterval, SemanticError> {
    let Some(operator) = operator else {
        return Ok(CardinalityInterval::ONE_ONE);
    };
    operator
        .cardinality()
        .ok_or_else(|| SemanticError::InvalidInterval {
            operator,
            span: unit.span(),
        })
}

impl fmt::Display for ElementShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementShape::Normal { unit, cardinality } => write!(f, "{unit}{cardinality}"),
            ElementShape::Dangling { unit } => write!(f, "{unit}?"),
            ElementShape::Separated {
                left,
                right,
                cardinality,
            } => write!(f, "({left} Separator {right}){cardinality}"),
            ElementShape::Alternated {
                left,
                right,
                cardinality,
            } => write!(f, "({left} {right}){cardinality}"),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.type_name())
    }
}

impl Serialize for Unit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.type_name())
    }
}
