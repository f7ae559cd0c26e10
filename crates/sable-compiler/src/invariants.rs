//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::grammar::{AlternativeId, ElementId, ProductionId};
use crate::transformation::{
    AlternativeTransformation, ProductionTransformation, ProductionTransformationElement,
    Transformations,
};

impl Transformations {
    pub(crate) fn ensure_production_unassigned(&self, id: ProductionId) {
        if self.production(id).is_some() {
            panic!("Transformations: production {id:?} assigned twice");
        }
    }

    pub(crate) fn ensure_alternative_unassigned(&self, id: AlternativeId) {
        if self.alternative(id).is_some() {
            panic!("Transformations: alternative {id:?} assigned twice");
        }
    }

    /// Production transformation after synthesis, where every production has one.
    pub(crate) fn ensure_production(&self, id: ProductionId) -> &ProductionTransformation {
        self.production(id).unwrap_or_else(|| {
            panic!("Transformations: production {id:?} has no transformation after synthesis")
        })
    }

    /// Alternative transformation after synthesis, where every alternative has one.
    pub(crate) fn ensure_alternative(&self, id: AlternativeId) -> &AlternativeTransformation {
        self.alternative(id).unwrap_or_else(|| {
            panic!("Transformations: alternative {id:?} has no transformation after synthesis")
        })
    }

    /// Element `part` of an explicit production transformation, resolved during collection.
    pub(crate) fn ensure_part(
        &self,
        production: ProductionId,
        part: usize,
    ) -> &ProductionTransformationElement {
        self.production(production)
            .and_then(|transformation| transformation.elements.get(part))
            .unwrap_or_else(|| {
                panic!("Transformations: production {production:?} has no element {part}")
            })
    }
}

pub(crate) fn unresolved_transformed_reference(element: ElementId) -> ! {
    panic!("transformed reference through {element:?}, which references no production")
}
