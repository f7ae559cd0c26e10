//! Name resolution over a built grammar.

use super::{
    AlternativeId, Declaration, DeclarationKind, ExpectedKinds, Grammar, ProductionId,
    TreeAlternativeId, TreeProductionId,
};
use crate::ast::Identifier;
use crate::error::SemanticError;

/// Read-only view handed to every analysis pass.
#[derive(Debug, Clone, Copy)]
pub struct ResolutionContext<'g> {
    grammar: &'g Grammar,
}

impl<'g> ResolutionContext<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        Self { grammar }
    }

    pub fn grammar(&self) -> &'g Grammar {
        self.grammar
    }

    /// Global lookup, falling back to the tree namespace.
    pub fn resolve_global(&self, name: &str) -> Option<Declaration> {
        self.grammar
            .global
            .get(name)
            .or_else(|| self.grammar.tree.get(name))
    }

    /// Tree lookup, falling back to the global namespace.
    pub fn resolve_tree(&self, name: &str) -> Option<Declaration> {
        self.grammar
            .tree
            .get(name)
            .or_else(|| self.grammar.global.get(name))
    }

    pub fn kind(&self, declaration: Declaration) -> DeclarationKind {
        self.grammar.declaration_kind(declaration)
    }

    /// Resolve in the global namespace and require one of `expected`.
    pub fn expect_global(
        &self,
        name: &Identifier,
        expected: &'static [DeclarationKind],
    ) -> Result<Declaration, SemanticError> {
        let declaration = self.resolve_global(&name.text);
        self.expect(name, declaration, expected)
    }

    /// Resolve in the tree namespace and require one of `expected`.
    pub fn expect_tree(
        &self,
        name: &Identifier,
        expected: &'static [DeclarationKind],
    ) -> Result<Declaration, SemanticError> {
        let declaration = self.resolve_tree(&name.text);
        self.expect(name, declaration, expected)
    }

    fn expect(
        &self,
        name: &Identifier,
        declaration: Option<Declaration>,
        expected: &'static [DeclarationKind],
    ) -> Result<Declaration, SemanticError> {
        let Some(declaration) = declaration else {
            return Err(SemanticError::UndefinedReference {
                name: name.text.clone(),
                span: name.span,
            });
        };
        let found = self.kind(declaration);
        if !expected.contains(&found) {
            return Err(SemanticError::BadReference {
                name: name.text.clone(),
                found,
                expected: ExpectedKinds(expected),
                span: name.span,
            });
        }
        Ok(declaration)
    }

    /// Parser production declared under `name`.
    pub fn production_named(&self, name: &str) -> Option<ProductionId> {
        match self.grammar.global.get(name) {
            Some(Declaration::Production(id)) => Some(id),
            _ => None,
        }
    }

    /// Tree production declared under `name`, ignoring global names.
    pub fn tree_production_named(&self, name: &str) -> Option<TreeProductionId> {
        match self.grammar.tree.get(name) {
            Some(Declaration::TreeProduction(id)) => Some(id),
            _ => None,
        }
    }

    /// Alternative-local lookup by declared name.
    pub fn alternative_named(&self, production: ProductionId, name: &str) -> Option<AlternativeId> {
        self.grammar.production(production).local.get(name)
    }

    pub fn tree_alternative_named(
        &self,
        production: TreeProductionId,
        name: &str,
    ) -> Option<TreeAlternativeId> {
        self.grammar.tree_production(production).local.get(name)
    }

    /// Root productions: the declared ones that resolve to productions, or the
    /// first production when none is declared.
    pub fn root_productions(&self) -> Vec<ProductionId> {
        if self.grammar.roots.is_empty() {
            return self.grammar.productions().map(|(id, _)| id).take(1).collect();
        }
        self.grammar
            .roots
            .iter()
            .filter_map(|root| self.production_named(&root.text))
            .collect()
    }
}
