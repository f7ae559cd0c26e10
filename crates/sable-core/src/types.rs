//! Element type algebra.
//!
//! A type describes the shape of the values an element produces: a repeated
//! single name, a separated or alternated pair of names, the empty list, or
//! the absent value. Single-name types with an exact count are kept in a
//! canonical pair form, so `x x` and `x^2` compare equal.

use std::fmt;

use serde::Serialize;

use crate::cardinality::CardinalityInterval;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Type {
    /// `name` repeated `cardinality` times.
    Homogeneous {
        name: String,
        cardinality: CardinalityInterval,
    },
    /// `left (right left)*`, with `cardinality` counting the `left` occurrences.
    Separated {
        left: String,
        right: String,
        cardinality: CardinalityInterval,
    },
    /// `(left right)` repeated `cardinality` times.
    Alternated {
        left: String,
        right: String,
        cardinality: CardinalityInterval,
    },
    EmptyList,
    Null,
}

impl Type {
    /// Canonical type of `name` occurring `cardinality` times.
    pub fn single(name: impl Into<String>, cardinality: CardinalityInterval) -> Type {
        let name = name.into();
        let Some(count) = cardinality.upper().finite().filter(|_| cardinality.is_a_number())
        else {
            return Type::Homogeneous { name, cardinality };
        };

        if count % 2 == 0 {
            Type::Alternated {
                left: name.clone(),
                right: name,
                cardinality: CardinalityInterval::exactly(count / 2),
            }
        } else {
            Type::Separated {
                left: name.clone(),
                right: name,
                cardinality: CardinalityInterval::exactly(count / 2 + 1),
            }
        }
    }

    pub fn separated(
        left: impl Into<String>,
        right: impl Into<String>,
        cardinality: CardinalityInterval,
    ) -> Type {
        Type::Separated {
            left: left.into(),
            right: right.into(),
            cardinality,
        }
    }

    pub fn alternated(
        left: impl Into<String>,
        right: impl Into<String>,
        cardinality: CardinalityInterval,
    ) -> Type {
        Type::Alternated {
            left: left.into(),
            right: right.into(),
            cardinality,
        }
    }

    pub fn cardinality(&self) -> CardinalityInterval {
        match self {
            Type::Homogeneous { cardinality, .. }
            | Type::Separated { cardinality, .. }
            | Type::Alternated { cardinality, .. } => *cardinality,
            Type::EmptyList | Type::Null => CardinalityInterval::ZERO_ZERO,
        }
    }

    /// Whether the type can denote no value at all.
    pub fn is_empty(&self) -> bool {
        self.cardinality().upper().finite() == Some(0)
    }

    /// The single name this type repeats and how many times, if it repeats one name.
    pub fn single_view(&self) -> Option<(&str, CardinalityInterval)> {
        match self {
            Type::Homogeneous { name, cardinality } => Some((name, *cardinality)),
            Type::Separated {
                left,
                right,
                cardinality,
            } => {
                if left == right {
                    Some((left, cardinality.separated_count()))
                } else if cardinality.is_at_most_one() {
                    Some((left, *cardinality))
                } else {
                    None
                }
            }
            Type::Alternated {
                left,
                right,
                cardinality,
            } if left == right => Some((left, cardinality.scale(2))),
            Type::Alternated { .. } | Type::EmptyList | Type::Null => None,
        }
    }

    /// Whether a value of this type can be stored where `target` is expected.
    pub fn is_assignable_to(&self, target: &Type) -> bool {
        match (self, target) {
            (Type::Null | Type::EmptyList, target) => target.cardinality().is_optional(),
            (source, Type::Null | Type::EmptyList) => source.is_empty(),
            _ => {
                if let (Some((name, count)), Some((target_name, target_count))) =
                    (self.single_view(), target.single_view())
                {
                    return name == target_name && count.is_included_in(&target_count);
                }
                self.is_structurally_assignable_to(target)
            }
        }
    }

    fn is_structurally_assignable_to(&self, target: &Type) -> bool {
        match (self, target) {
            (
                Type::Separated {
                    left,
                    right,
                    cardinality,
                },
                Type::Separated {
                    left: target_left,
                    right: target_right,
                    cardinality: target_cardinality,
                },
            ) => {
                left == target_left
                    && (target_cardinality.is_at_most_one() || right == target_right)
                    && cardinality.is_included_in(target_cardinality)
            }
            (
                Type::Alternated {
                    left,
                    right,
                    cardinality,
                },
                Type::Alternated {
                    left: target_left,
                    right: target_right,
                    cardinality: target_cardinality,
                },
            ) => {
                left == target_left
                    && right == target_right
                    && cardinality.is_included_in(target_cardinality)
            }
            _ => false,
        }
    }

    /// Type of the list obtained by appending a value of `other` after a value of `self`.
    ///
    /// Returns `None` when the concatenation has no representable type.
    pub fn add(&self, other: &Type) -> Option<Type> {
        if matches!(self, Type::Null) || matches!(other, Type::Null) {
            return None;
        }
        if self.is_empty() {
            return Some(other.clone());
        }
        if other.is_empty() {
            return Some(self.clone());
        }

        if let (Some((name, count)), Some((other_name, other_count))) =
            (self.single_view(), other.single_view())
            && name == other_name
        {
            return Some(Type::single(name, count.add(&other_count)));
        }

        match (self, other) {
            (
                Type::Alternated {
                    left,
                    right,
                    cardinality,
                },
                Type::Alternated {
                    left: other_left,
                    right: other_right,
                    cardinality: other_cardinality,
                },
            ) => {
                if left == other_left && right == other_right {
                    return Some(Type::alternated(
                        left.as_str(),
                        right.as_str(),
                        cardinality.add(other_cardinality),
                    ));
                }
            }
            (
                Type::Separated {
                    left,
                    right,
                    cardinality,
                },
                Type::Alternated {
                    left: other_left,
                    right: other_right,
                    cardinality: other_cardinality,
                },
            ) => {
                if !cardinality.is_optional() && right == other_left && left == other_right {
                    return Some(Type::separated(
                        left.as_str(),
                        right.as_str(),
                        cardinality.add(other_cardinality),
                    ));
                }
            }
            _ => {}
        }

        if let Type::Alternated {
            left,
            right,
            cardinality,
        } = self
            && other.is_exactly_one(left)
        {
            return Some(Type::separated(
                left.as_str(),
                right.as_str(),
                cardinality.add(&CardinalityInterval::ONE_ONE),
            ));
        }

        if let Type::Alternated {
            left,
            right,
            cardinality,
        } = other
            && self.is_exactly_one(right)
        {
            return Some(Type::separated(
                right.as_str(),
                left.as_str(),
                cardinality.add(&CardinalityInterval::ONE_ONE),
            ));
        }

        if let (Some((name, count)), Some((other_name, other_count))) =
            (self.single_view(), other.single_view())
            && count.is_exactly_one()
            && other_count.is_exactly_one()
        {
            return Some(Type::alternated(name, other_name, CardinalityInterval::ONE_ONE));
        }

        None
    }

    /// Whether a value of this type may hold more than one node.
    pub fn is_list(&self) -> bool {
        match self.single_view() {
            Some((_, count)) => !count.is_at_most_one(),
            None => matches!(self, Type::Separated { .. } | Type::Alternated { .. }),
        }
    }

    /// Type of `times` consecutive values of this type.
    ///
    /// Repeating a separated list of two distinct names more than once is not
    /// representable and yields `None`.
    pub fn repeated(&self, times: CardinalityInterval) -> Option<Type> {
        if times.is_exactly_one() {
            return Some(self.clone());
        }
        if let Some((name, count)) = self.single_view() {
            return Some(Type::single(name, count.compose(&times)));
        }
        match self {
            Type::Null | Type::EmptyList if times.is_at_most_one() => Some(self.clone()),
            Type::EmptyList => Some(Type::EmptyList),
            Type::Alternated {
                left,
                right,
                cardinality,
            } => Some(Type::alternated(
                left.as_str(),
                right.as_str(),
                cardinality.compose(&times),
            )),
            Type::Separated {
                left,
                right,
                cardinality,
            } if times.is_at_most_one() => Some(Type::separated(
                left.as_str(),
                right.as_str(),
                cardinality.union(&CardinalityInterval::ZERO_ZERO),
            )),
            _ => None,
        }
    }

    fn is_exactly_one(&self, expected: &str) -> bool {
        self.single_view()
            .is_some_and(|(name, count)| name == expected && count.is_exactly_one())
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some((name, count)) = self.single_view()
            && !matches!(self, Type::Separated { left, right, .. } if left != right)
        {
            return write!(f, "{name}{count}");
        }
        match self {
            Type::Homogeneous { name, cardinality } => write!(f, "{name}{cardinality}"),
            Type::Separated {
                left,
                right,
                cardinality,
            } => write!(f, "({left} Separator {right}){cardinality}"),
            Type::Alternated {
                left,
                right,
                cardinality,
            } => write!(f, "({left} {right}){cardinality}"),
            Type::EmptyList => write!(f, "()"),
            Type::Null => write!(f, "Null"),
        }
    }
}
