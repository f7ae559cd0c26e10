//! Rendering of semantic errors.
//!
//! Analysis stops at the first [`SemanticError`]; this module turns it into a
//! [`Diagnostic`] with the related locations the error carries, and renders
//! diagnostics either as source snippets or as one plain line each.

mod message;
mod printer;

#[cfg(test)]
mod printer_tests;

pub use message::{Diagnostic, DiagnosticKind, RelatedInfo};
pub use printer::DiagnosticsPrinter;

use crate::error::SemanticError;

/// Collection of diagnostics, in the order they were raised.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.0
    }

    pub fn printer(&self) -> DiagnosticsPrinter<'_, '_> {
        DiagnosticsPrinter::new(self)
    }

    /// Snippet rendering against `source`.
    pub fn render(&self, source: &str) -> String {
        self.printer().source(source).render()
    }
}

impl From<&SemanticError> for Diagnostics {
    fn from(error: &SemanticError) -> Self {
        Self(vec![Diagnostic::from(error)])
    }
}

impl FromIterator<Diagnostic> for Diagnostics {
    fn from_iter<T: IntoIterator<Item = Diagnostic>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
