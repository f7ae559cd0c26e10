//! Grammar model: arenas of parser and tree nodes plus their namespaces.
//!
//! The model is built once from the AST and never mutated afterwards. Analysis
//! passes refer to nodes through the ids in [`ids`] and record their results
//! outside the model.

mod build;
mod context;
pub mod ids;
mod namespace;
mod shape;

#[cfg(test)]
mod namespace_tests;

use rowan::TextRange;

pub use context::ResolutionContext;
pub use ids::{
    AlternativeId, ElementId, ProductionId, SelectionId, TokenId, TreeAlternativeId,
    TreeElementId, TreeProductionId,
};
pub use namespace::{Declaration, DeclarationKind, ExpectedKinds, LocalNamespace, Namespace};
pub use shape::{ElementShape, ShapeKind};

pub(crate) use namespace::LocalEntry;

use crate::ast::{Identifier, PriorityKind, ProductionKind};

#[derive(Debug, Clone)]
pub struct Grammar {
    pub(crate) tokens: Vec<Identifier>,
    pub(crate) selections: Vec<Selection>,
    pub(crate) productions: Vec<ParserProduction>,
    pub(crate) alternatives: Vec<ParserAlternative>,
    pub(crate) elements: Vec<ParserElement>,
    pub(crate) tree_productions: Vec<TreeProduction>,
    pub(crate) tree_alternatives: Vec<TreeAlternative>,
    pub(crate) tree_elements: Vec<TreeElement>,
    pub(crate) roots: Vec<Identifier>,
    pub(crate) has_tree: bool,
    pub(crate) global: Namespace,
    pub(crate) tree: Namespace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorLevel {
    Lexer,
    Parser,
}

#[derive(Debug, Clone)]
pub struct Selection {
    pub name: Identifier,
    pub selector: Identifier,
    pub level: SelectorLevel,
}

#[derive(Debug, Clone)]
pub struct ParserProduction {
    pub name: Identifier,
    pub kind: ProductionKind,
    pub alternatives: Vec<AlternativeId>,
    pub priorities: Vec<Priority>,
    /// Alternatives by declared name.
    pub local: LocalNamespace<AlternativeId>,
}

#[derive(Debug, Clone)]
pub struct Priority {
    pub kind: PriorityKind,
    pub alternatives: Vec<AlternativeId>,
    pub span: TextRange,
}

#[derive(Debug, Clone)]
pub struct ParserAlternative {
    pub production: ProductionId,
    pub index: usize,
    pub name: Option<Identifier>,
    pub elements: Vec<ElementId>,
    /// Elements by explicit or unique implicit name.
    pub local: LocalNamespace<ElementId>,
    pub span: TextRange,
}

#[derive(Debug, Clone)]
pub struct ParserElement {
    pub alternative: AlternativeId,
    pub index: usize,
    pub shape: ElementShape,
    /// Name under which the element is registered in its alternative, if any.
    pub name: Option<String>,
    pub span: TextRange,
}

#[derive(Debug, Clone)]
pub struct TreeProduction {
    pub name: Identifier,
    pub alternatives: Vec<TreeAlternativeId>,
    pub local: LocalNamespace<TreeAlternativeId>,
}

#[derive(Debug, Clone)]
pub struct TreeAlternative {
    pub production: TreeProductionId,
    pub index: usize,
    pub name: Option<Identifier>,
    pub elements: Vec<TreeElementId>,
    pub local: LocalNamespace<TreeElementId>,
    pub span: TextRange,
}

#[derive(Debug, Clone)]
pub struct TreeElement {
    pub alternative: TreeAlternativeId,
    pub index: usize,
    pub shape: ElementShape,
    pub name: Option<String>,
    pub span: TextRange,
}

impl Grammar {
    pub fn token(&self, id: TokenId) -> &Identifier {
        &self.tokens[id.index()]
    }

    pub fn selection(&self, id: SelectionId) -> &Selection {
        &self.selections[id.index()]
    }

    pub fn production(&self, id: ProductionId) -> &ParserProduction {
        &self.productions[id.index()]
    }

    pub fn alternative(&self, id: AlternativeId) -> &ParserAlternative {
        &self.alternatives[id.index()]
    }

    pub fn element(&self, id: ElementId) -> &ParserElement {
        &self.elements[id.index()]
    }

    pub fn tree_production(&self, id: TreeProductionId) -> &TreeProduction {
        &self.tree_productions[id.index()]
    }

    pub fn tree_alternative(&self, id: TreeAlternativeId) -> &TreeAlternative {
        &self.tree_alternatives[id.index()]
    }

    pub fn tree_element(&self, id: TreeElementId) -> &TreeElement {
        &self.tree_elements[id.index()]
    }

    pub fn productions(&self) -> impl Iterator<Item = (ProductionId, &ParserProduction)> {
        self.productions
            .iter()
            .enumerate()
            .map(|(i, p)| (ProductionId::from_index(i), p))
    }

    pub fn alternatives(&self) -> impl Iterator<Item = (AlternativeId, &ParserAlternative)> {
        self.alternatives
            .iter()
            .enumerate()
            .map(|(i, a)| (AlternativeId::from_index(i), a))
    }

    pub fn tree_productions(
        &self,
    ) -> impl Iterator<Item = (TreeProductionId, &TreeProduction)> {
        self.tree_productions
            .iter()
            .enumerate()
            .map(|(i, p)| (TreeProductionId::from_index(i), p))
    }

    pub fn tree_alternatives(
        &self,
    ) -> impl Iterator<Item = (TreeAlternativeId, &TreeAlternative)> {
        self.tree_alternatives
            .iter()
            .enumerate()
            .map(|(i, a)| (TreeAlternativeId::from_index(i), a))
    }

    pub fn tree_elements(&self) -> impl Iterator<Item = (TreeElementId, &TreeElement)> {
        self.tree_elements
            .iter()
            .enumerate()
            .map(|(i, e)| (TreeElementId::from_index(i), e))
    }

    /// Whether the grammar declares a Tree section, even an empty one.
    pub fn has_tree(&self) -> bool {
        self.has_tree
    }

    pub fn declared_roots(&self) -> &[Identifier] {
        &self.roots
    }

    pub fn global_namespace(&self) -> &Namespace {
        &self.global
    }

    pub fn tree_namespace(&self) -> &Namespace {
        &self.tree
    }

    pub fn declaration_kind(&self, declaration: Declaration) -> DeclarationKind {
        match declaration {
            Declaration::Token(_) => DeclarationKind::Token,
            Declaration::Selection(id) => match self.selection(id).level {
                SelectorLevel::Lexer => DeclarationKind::LexerSelection,
                SelectorLevel::Parser => DeclarationKind::ParserSelection,
            },
            Declaration::Production(id) => match self.production(id).kind {
                ProductionKind::Normal => DeclarationKind::NormalProduction,
                ProductionKind::Token => DeclarationKind::TokenProduction,
                ProductionKind::Dangling => DeclarationKind::DanglingProduction,
            },
            Declaration::TreeProduction(_) => DeclarationKind::TreeProduction,
        }
    }

    /// `exp.add` for named alternatives, `exp#2` (1-based) otherwise.
    pub fn describe_alternative(&self, id: AlternativeId) -> String {
        let alternative = self.alternative(id);
        let production = &self.production(alternative.production).name.text;
        describe(production, alternative.name.as_ref(), alternative.index)
    }

    pub fn describe_tree_alternative(&self, id: TreeAlternativeId) -> String {
        let alternative = self.tree_alternative(id);
        let production = &self.tree_production(alternative.production).name.text;
        describe(production, alternative.name.as_ref(), alternative.index)
    }

    /// Element name as written in diagnostics: its local name, or its shape.
    pub fn describe_element(&self, id: ElementId) -> String {
        let element = self.element(id);
        element
            .name
            .clone()
            .unwrap_or_else(|| element.shape.to_string())
    }

    pub fn describe_tree_element(&self, id: TreeElementId) -> String {
        let element = self.tree_element(id);
        element
            .name
            .clone()
            .unwrap_or_else(|| element.shape.to_string())
    }
}

fn describe(production: &str, name: Option<&Identifier>, index: usize) -> String {
    match name {
        Some(name) => format!("{production}.{}", name.text),
        None => format!("{production}#{}", index + 1),
    }
}
