use indexmap::IndexMap;
use serde::Serialize;

use super::{AlternativeTransformation, ProductionTransformation};
use crate::grammar::{AlternativeId, ProductionId};

/// Transformations assigned so far, keyed by the ids they annotate.
///
/// Each production and each alternative receives at most one transformation.
/// Assigning twice is a bug in the pass that did it, not a user error.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Transformations {
    productions: IndexMap<ProductionId, ProductionTransformation>,
    alternatives: IndexMap<AlternativeId, AlternativeTransformation>,
}

impl Transformations {
    pub fn production(&self, id: ProductionId) -> Option<&ProductionTransformation> {
        self.productions.get(&id)
    }

    pub fn alternative(&self, id: AlternativeId) -> Option<&AlternativeTransformation> {
        self.alternatives.get(&id)
    }

    pub fn productions(&self) -> impl Iterator<Item = &ProductionTransformation> {
        self.productions.values()
    }

    pub fn alternatives(&self) -> impl Iterator<Item = &AlternativeTransformation> {
        self.alternatives.values()
    }

    pub fn production_count(&self) -> usize {
        self.productions.len()
    }

    pub fn alternative_count(&self) -> usize {
        self.alternatives.len()
    }

    pub(crate) fn assign_production(&mut self, transformation: ProductionTransformation) {
        let id = transformation.production;
        self.ensure_production_unassigned(id);
        self.productions.insert(id, transformation);
    }

    pub(crate) fn assign_alternative(&mut self, transformation: AlternativeTransformation) {
        let id = transformation.alternative;
        self.ensure_alternative_unassigned(id);
        self.alternatives.insert(id, transformation);
    }
}
