//! Grammar AST as produced by the front-end parser.
//!
//! The analysis never reads grammar source text. It receives this tree, either
//! deserialized from JSON (see [`GrammarAst::from_json`]) or assembled with the
//! constructors in [`build`].
//!
//! Spans are byte ranges into the original grammar file and are only used for
//! diagnostics.

pub mod build;
mod json;

#[cfg(test)]
mod json_tests;

use rowan::TextRange;
use sable_core::CardinalityInterval;
use serde::Serialize;

pub use json::InputError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrammarAst {
    pub lexer: LexerAst,
    pub parser: ParserAst,
    pub tree: Option<TreeAst>,
    pub transformation: TransformationAst,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LexerAst {
    pub tokens: Vec<Identifier>,
    pub selectors: Vec<SelectorAst>,
}

/// `Selector: name = {a, b, c}`. Each selection is a declared name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorAst {
    pub name: Identifier,
    pub selections: Vec<Identifier>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParserAst {
    /// Declared root productions. Empty means the first production is the root.
    pub roots: Vec<Identifier>,
    pub productions: Vec<ProductionAst>,
    pub selectors: Vec<SelectorAst>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductionKind {
    #[default]
    Normal,
    Token,
    Dangling,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductionAst {
    pub name: Identifier,
    pub kind: ProductionKind,
    pub alternatives: Vec<AlternativeAst>,
    pub priorities: Vec<PriorityAst>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlternativeAst {
    pub name: Option<Identifier>,
    pub elements: Vec<ElementAst>,
    pub span: TextRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementAst {
    pub name: Option<Identifier>,
    pub body: ElementBody,
    pub span: TextRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementBody {
    Normal {
        unit: Unit,
        operator: Option<Operator>,
    },
    /// Reference to a dangling production; always optional.
    Dangling { unit: Unit },
    Separated {
        left: Unit,
        right: Unit,
        operator: Option<Operator>,
    },
    Alternated {
        left: Unit,
        right: Unit,
        operator: Option<Operator>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityKind {
    Left,
    Right,
    Unary,
}

impl std::fmt::Display for PriorityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
            Self::Unary => write!(f, "unary"),
        }
    }
}

/// `Left: add, sub;` inside a production's priority section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityAst {
    pub kind: PriorityKind,
    pub alternatives: Vec<Identifier>,
    pub span: TextRange,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeAst {
    pub productions: Vec<TreeProductionAst>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeProductionAst {
    pub name: Identifier,
    pub alternatives: Vec<TreeAlternativeAst>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeAlternativeAst {
    pub name: Option<Identifier>,
    pub elements: Vec<TreeElementAst>,
    pub span: TextRange,
}

/// Element of a tree alternative or of a production transformation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeElementAst {
    pub name: Option<Identifier>,
    pub body: TreeElementBody,
    pub span: TextRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeElementBody {
    Normal {
        unit: Unit,
        operator: Option<Operator>,
    },
    Separated {
        left: Unit,
        right: Unit,
        operator: Option<Operator>,
    },
    Alternated {
        left: Unit,
        right: Unit,
        operator: Option<Operator>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformationAst {
    pub productions: Vec<ProductionTransformationAst>,
    pub alternatives: Vec<AlternativeTransformationAst>,
}

/// `exp -> exp ops*;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductionTransformationAst {
    pub production: Identifier,
    pub elements: Vec<TreeElementAst>,
    pub span: TextRange,
}

/// `exp.add -> New exp.add(l, r);` or `exp -> ...;` for the unnamed alternative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlternativeTransformationAst {
    pub production: Identifier,
    pub alternative: Option<Identifier>,
    pub elements: Vec<TransformationElementAst>,
    pub span: TextRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformationElementAst {
    Null { span: TextRange },
    Reference(ReferenceAst),
    New(NewAst),
    List { items: Vec<ListItemAst>, span: TextRange },
}

impl TransformationElementAst {
    pub fn span(&self) -> TextRange {
        match self {
            Self::Null { span } | Self::List { span, .. } => *span,
            Self::Reference(reference) => reference.span,
            Self::New(new) => new.span,
        }
    }
}

/// `element` or `element.part`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceAst {
    pub element: Identifier,
    pub part: Option<Identifier>,
    pub span: TextRange,
}

/// `New production.alternative(params)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAst {
    pub production: Identifier,
    pub alternative: Option<Identifier>,
    pub params: Vec<TransformationElementAst>,
    pub span: TextRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListItemAst {
    Reference(ReferenceAst),
    New(NewAst),
    Expand {
        expansion: ListExpansion,
        reference: ReferenceAst,
    },
}

/// Which part of a list-valued source a list item splices in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListExpansion {
    /// `e...`
    Normal,
    /// `e.Left...`
    Left,
    /// `e.Right...`
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    pub text: String,
    pub span: TextRange,
}

impl Identifier {
    pub fn new(text: impl Into<String>, span: TextRange) -> Self {
        Self {
            text: text.into(),
            span,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CharKind {
    Char,
    Decimal,
    Hexadecimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Unit {
    Name(Identifier),
    /// Inline string token; `text` excludes the quotes.
    String { text: String, span: TextRange },
    /// Inline character token; `text` is the literal as written (`'a'`, `#65`, `#x41`).
    Char {
        kind: CharKind,
        text: String,
        span: TextRange,
    },
    Start(TextRange),
    End(TextRange),
}

impl Unit {
    pub fn span(&self) -> TextRange {
        match self {
            Unit::Name(identifier) => identifier.span,
            Unit::String { span, .. } | Unit::Char { span, .. } => *span,
            Unit::Start(span) | Unit::End(span) => *span,
        }
    }

    pub fn identifier(&self) -> Option<&Identifier> {
        match self {
            Unit::Name(identifier) => Some(identifier),
            _ => None,
        }
    }

    /// Name used for this unit in element types.
    pub fn type_name(&self) -> String {
        match self {
            Unit::Name(identifier) => identifier.text.clone(),
            Unit::String { text, .. } => format!("'{text}'"),
            Unit::Char { text, .. } => text.clone(),
            Unit::Start(_) => "Start".to_string(),
            Unit::End(_) => "End".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    ZeroOrOne,
    ZeroOrMore,
    OneOrMore,
    Exactly(u32),
    AtLeast(u32),
    Between(u32, u32),
}

impl Operator {
    /// `None` for an inverted `^(n..m)` interval.
    pub fn cardinality(self) -> Option<CardinalityInterval> {
        match self {
            Operator::ZeroOrOne => Some(CardinalityInterval::ZERO_ONE),
            Operator::ZeroOrMore => Some(CardinalityInterval::ZERO_OR_MORE),
            Operator::OneOrMore => Some(CardinalityInterval::ONE_OR_MORE),
            Operator::Exactly(n) => Some(CardinalityInterval::exactly(n)),
            Operator::AtLeast(n) => Some(CardinalityInterval::at_least(n)),
            Operator::Between(lower, upper) => CardinalityInterval::between(lower, upper),
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operator::ZeroOrOne => write!(f, "?"),
            Operator::ZeroOrMore => write!(f, "*"),
            Operator::OneOrMore => write!(f, "+"),
            Operator::Exactly(n) => write!(f, "^{n}"),
            Operator::AtLeast(n) => write!(f, "^{n}.."),
            Operator::Between(lower, upper) => write!(f, "^({lower}..{upper})"),
        }
    }
}
