//! Name-resolution tables.
//!
//! Two grammar-wide namespaces (global lexer/parser names and tree names) and
//! one local namespace per production, alternative and production
//! transformation.

use std::fmt;

use indexmap::IndexMap;
use indexmap::map::Entry;
use rowan::TextRange;
use serde::Serialize;

use super::ids::{ProductionId, SelectionId, TokenId, TreeProductionId};
use crate::ast::Identifier;
use crate::error::SemanticError;

/// What a global or tree name refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Declaration {
    Token(TokenId),
    Selection(SelectionId),
    Production(ProductionId),
    TreeProduction(TreeProductionId),
}

/// Kind tag of a declaration, used for "expected ..., found ..." diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    Token,
    LexerSelection,
    NormalProduction,
    TokenProduction,
    DanglingProduction,
    ParserSelection,
    TreeProduction,
}

impl DeclarationKind {
    pub const TOKENS: &[DeclarationKind] = &[DeclarationKind::Token, DeclarationKind::LexerSelection];

    pub const PARSER_PRODUCTIONS: &[DeclarationKind] = &[
        DeclarationKind::NormalProduction,
        DeclarationKind::TokenProduction,
        DeclarationKind::DanglingProduction,
    ];

    pub const TOKENS_OR_PARSER_PRODUCTIONS: &[DeclarationKind] = &[
        DeclarationKind::Token,
        DeclarationKind::LexerSelection,
        DeclarationKind::NormalProduction,
        DeclarationKind::TokenProduction,
        DeclarationKind::ParserSelection,
    ];

    pub const NORMAL_PRODUCTIONS: &[DeclarationKind] = &[DeclarationKind::NormalProduction];

    pub const DANGLING_PRODUCTIONS: &[DeclarationKind] = &[DeclarationKind::DanglingProduction];

    pub const TREE_PRODUCTIONS: &[DeclarationKind] = &[DeclarationKind::TreeProduction];

    pub const TOKENS_OR_TREE_PRODUCTIONS: &[DeclarationKind] = &[
        DeclarationKind::Token,
        DeclarationKind::LexerSelection,
        DeclarationKind::TreeProduction,
    ];

    pub fn is_token_like(self) -> bool {
        matches!(self, DeclarationKind::Token | DeclarationKind::LexerSelection)
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DeclarationKind::Token => "token",
            DeclarationKind::LexerSelection => "lexer selection",
            DeclarationKind::NormalProduction => "normal production",
            DeclarationKind::TokenProduction => "token production",
            DeclarationKind::DanglingProduction => "dangling production",
            DeclarationKind::ParserSelection => "parser selection",
            DeclarationKind::TreeProduction => "tree production",
        };
        f.write_str(text)
    }
}

/// Renders an expected-kind set as `a, b or c`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpectedKinds(pub &'static [DeclarationKind]);

impl fmt::Display for ExpectedKinds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kinds = self.0;
        for (i, kind) in kinds.iter().enumerate() {
            if i > 0 {
                let separator = if i + 1 == kinds.len() { " or " } else { ", " };
                f.write_str(separator)?;
            }
            write!(f, "{kind}")?;
        }
        Ok(())
    }
}

/// Grammar-wide table from names to declarations.
#[derive(Debug, Clone, Default)]
pub struct Namespace {
    declarations: IndexMap<String, (Declaration, TextRange)>,
}

impl Namespace {
    pub fn get(&self, name: &str) -> Option<Declaration> {
        self.declarations.get(name).map(|(declaration, _)| *declaration)
    }

    pub fn span_of(&self, name: &str) -> Option<TextRange> {
        self.declarations.get(name).map(|(_, span)| *span)
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Declaration)> {
        self.declarations
            .iter()
            .map(|(name, (declaration, _))| (name.as_str(), *declaration))
    }

    pub(crate) fn declare(
        &mut self,
        name: &Identifier,
        declaration: Declaration,
    ) -> Result<(), SemanticError> {
        match self.declarations.entry(name.text.clone()) {
            Entry::Occupied(entry) => Err(SemanticError::DuplicateDeclaration {
                name: name.text.clone(),
                span: name.span,
                previous: entry.get().1,
            }),
            Entry::Vacant(entry) => {
                entry.insert((declaration, name.span));
                Ok(())
            }
        }
    }
}

/// Names visible inside one production, alternative or production transformation.
#[derive(Debug, Clone)]
pub struct LocalNamespace<Id> {
    names: IndexMap<String, Id>,
}

impl<Id> Default for LocalNamespace<Id> {
    fn default() -> Self {
        Self {
            names: IndexMap::new(),
        }
    }
}

/// One candidate for a local namespace.
pub(crate) struct LocalEntry<'a, Id> {
    pub id: Id,
    pub explicit: Option<&'a Identifier>,
    pub implicit: Option<&'a Identifier>,
}

impl<Id: Copy> LocalNamespace<Id> {
    pub fn get(&self, name: &str) -> Option<Id> {
        self.names.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Id)> {
        self.names.iter().map(|(name, id)| (name.as_str(), *id))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Namespace of explicitly named entries only.
    pub(crate) fn explicit<'a>(
        entries: impl IntoIterator<Item = (Id, &'a Identifier)>,
        duplicate: impl Fn(&Identifier, TextRange) -> SemanticError,
    ) -> Result<Self, SemanticError> {
        let mut spans: IndexMap<&str, TextRange> = IndexMap::new();
        let mut names = IndexMap::new();
        for (id, name) in entries {
            if let Some(previous) = spans.insert(&name.text, name.span) {
                return Err(duplicate(name, previous));
            }
            names.insert(name.text.clone(), id);
        }
        Ok(Self { names })
    }

    /// Namespace mixing explicit names with implicit ones.
    ///
    /// Explicit names must be unique. An implicit name is registered only when
    /// exactly one entry carries it; an implicit name shared by several entries
    /// leaves them all anonymous. An implicit name equal to an explicit one is a
    /// duplicate.
    pub(crate) fn implicit_explicit(
        entries: &[LocalEntry<'_, Id>],
        duplicate: impl Fn(&Identifier, TextRange) -> SemanticError,
    ) -> Result<Self, SemanticError> {
        let mut namespace = Self::explicit(
            entries
                .iter()
                .filter_map(|entry| entry.explicit.map(|name| (entry.id, name))),
            &duplicate,
        )?;

        let mut implicit: IndexMap<&str, Vec<(Id, &Identifier)>> = IndexMap::new();
        for entry in entries.iter().filter(|entry| entry.explicit.is_none()) {
            if let Some(name) = entry.implicit {
                implicit.entry(&name.text).or_default().push((entry.id, name));
            }
        }

        let explicit_spans: IndexMap<&str, TextRange> = entries
            .iter()
            .filter_map(|entry| entry.explicit)
            .map(|name| (name.text.as_str(), name.span))
            .collect();

        for (text, occurrences) in implicit {
            if let Some(previous) = explicit_spans.get(text) {
                return Err(duplicate(occurrences[0].1, *previous));
            }
            if let [(id, _)] = occurrences.as_slice() {
                namespace.names.insert(text.to_string(), *id);
            }
        }

        Ok(namespace)
    }
}
