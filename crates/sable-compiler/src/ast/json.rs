//! JSON deserialization for grammar ASTs handed over by the front-end.
//!
//! Identifiers may be plain strings or `{"text": .., "span": [start, end]}`
//! objects. Missing spans default to an empty range at offset zero.

use rowan::{TextRange, TextSize};
use serde::Deserialize;

use super::{
    AlternativeAst, AlternativeTransformationAst, CharKind, ElementAst, ElementBody, GrammarAst,
    Identifier, LexerAst, ListExpansion, ListItemAst, NewAst, Operator, ParserAst, PriorityAst,
    PriorityKind, ProductionAst, ProductionKind, ProductionTransformationAst, ReferenceAst,
    SelectorAst, TransformationAst, TransformationElementAst, TreeAlternativeAst, TreeAst,
    TreeElementAst, TreeElementBody, TreeProductionAst, Unit,
};

/// Error while reading a grammar AST.
#[derive(Debug, thiserror::Error)]
#[error("invalid grammar AST: {0}")]
pub struct InputError(#[from] serde_json::Error);

impl GrammarAst {
    /// Parse a grammar AST from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, InputError> {
        let raw: RawGrammar = serde_json::from_str(json)?;
        Ok(raw.into())
    }
}

type RawSpan = Option<[u32; 2]>;

fn span(raw: RawSpan) -> TextRange {
    let [start, end] = raw.unwrap_or_default();
    TextRange::new(TextSize::from(start.min(end)), TextSize::from(start.max(end)))
}

#[derive(Debug, Deserialize)]
struct RawGrammar {
    #[serde(default)]
    lexer: RawLexer,
    #[serde(default)]
    parser: RawParser,
    #[serde(default)]
    tree: Option<RawTree>,
    #[serde(default)]
    transformation: RawTransformation,
}

impl From<RawGrammar> for GrammarAst {
    fn from(raw: RawGrammar) -> Self {
        Self {
            lexer: raw.lexer.into(),
            parser: raw.parser.into(),
            tree: raw.tree.map(Into::into),
            transformation: raw.transformation.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawIdentifier {
    Plain(String),
    Spanned {
        text: String,
        #[serde(default)]
        span: RawSpan,
    },
}

impl From<RawIdentifier> for Identifier {
    fn from(raw: RawIdentifier) -> Self {
        match raw {
            RawIdentifier::Plain(text) => Identifier::new(text, TextRange::default()),
            RawIdentifier::Spanned { text, span: s } => Identifier::new(text, span(s)),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawLexer {
    #[serde(default)]
    tokens: Vec<RawIdentifier>,
    #[serde(default)]
    selectors: Vec<RawSelector>,
}

impl From<RawLexer> for LexerAst {
    fn from(raw: RawLexer) -> Self {
        Self {
            tokens: raw.tokens.into_iter().map(Into::into).collect(),
            selectors: raw.selectors.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawSelector {
    name: RawIdentifier,
    selections: Vec<RawIdentifier>,
}

impl From<RawSelector> for SelectorAst {
    fn from(raw: RawSelector) -> Self {
        Self {
            name: raw.name.into(),
            selections: raw.selections.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawParser {
    #[serde(default)]
    roots: Vec<RawIdentifier>,
    #[serde(default)]
    productions: Vec<RawProduction>,
    #[serde(default)]
    selectors: Vec<RawSelector>,
}

impl From<RawParser> for ParserAst {
    fn from(raw: RawParser) -> Self {
        Self {
            roots: raw.roots.into_iter().map(Into::into).collect(),
            productions: raw.productions.into_iter().map(Into::into).collect(),
            selectors: raw.selectors.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum RawProductionKind {
    Normal,
    Token,
    Dangling,
}

#[derive(Debug, Deserialize)]
struct RawProduction {
    name: RawIdentifier,
    #[serde(default)]
    kind: Option<RawProductionKind>,
    alternatives: Vec<RawAlternative>,
    #[serde(default)]
    priorities: Vec<RawPriority>,
}

impl From<RawProduction> for ProductionAst {
    fn from(raw: RawProduction) -> Self {
        let kind = match raw.kind {
            None | Some(RawProductionKind::Normal) => ProductionKind::Normal,
            Some(RawProductionKind::Token) => ProductionKind::Token,
            Some(RawProductionKind::Dangling) => ProductionKind::Dangling,
        };
        Self {
            name: raw.name.into(),
            kind,
            alternatives: raw.alternatives.into_iter().map(Into::into).collect(),
            priorities: raw.priorities.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawAlternative {
    #[serde(default)]
    name: Option<RawIdentifier>,
    #[serde(default)]
    elements: Vec<RawElement>,
    #[serde(default)]
    span: RawSpan,
}

impl From<RawAlternative> for AlternativeAst {
    fn from(raw: RawAlternative) -> Self {
        Self {
            name: raw.name.map(Into::into),
            elements: raw.elements.into_iter().map(Into::into).collect(),
            span: span(raw.span),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum RawPriorityKind {
    Left,
    Right,
    Unary,
}

#[derive(Debug, Deserialize)]
struct RawPriority {
    kind: RawPriorityKind,
    alternatives: Vec<RawIdentifier>,
    #[serde(default)]
    span: RawSpan,
}

impl From<RawPriority> for PriorityAst {
    fn from(raw: RawPriority) -> Self {
        Self {
            kind: match raw.kind {
                RawPriorityKind::Left => PriorityKind::Left,
                RawPriorityKind::Right => PriorityKind::Right,
                RawPriorityKind::Unary => PriorityKind::Unary,
            },
            alternatives: raw.alternatives.into_iter().map(Into::into).collect(),
            span: span(raw.span),
        }
    }
}

/// `{"name": "exp"}`, `{"string": "+"}`, `{"char": "'a'"}`, `"start"`, ...
#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum RawUnit {
    Name(RawIdentifier),
    String(String),
    Char(String),
    Dec(String),
    Hex(String),
    Start,
    End,
}

impl RawUnit {
    /// Non-name units have no span of their own and borrow the element's.
    fn into_unit(self, element_span: TextRange) -> Unit {
        match self {
            RawUnit::Name(identifier) => {
                let mut identifier = Identifier::from(identifier);
                if identifier.span.is_empty() {
                    identifier.span = element_span;
                }
                Unit::Name(identifier)
            }
            RawUnit::String(text) => Unit::String {
                text,
                span: element_span,
            },
            RawUnit::Char(text) => char_unit(CharKind::Char, text, element_span),
            RawUnit::Dec(text) => char_unit(CharKind::Decimal, text, element_span),
            RawUnit::Hex(text) => char_unit(CharKind::Hexadecimal, text, element_span),
            RawUnit::Start => Unit::Start(element_span),
            RawUnit::End => Unit::End(element_span),
        }
    }
}

fn char_unit(kind: CharKind, text: String, span: TextRange) -> Unit {
    Unit::Char { kind, text, span }
}

#[derive(Debug, Clone, Copy, Deserialize)]
enum RawOperator {
    #[serde(rename = "?")]
    ZeroOrOne,
    #[serde(rename = "*")]
    ZeroOrMore,
    #[serde(rename = "+")]
    OneOrMore,
    #[serde(rename = "exactly")]
    Exactly(u32),
    #[serde(rename = "at_least")]
    AtLeast(u32),
    #[serde(rename = "between")]
    Between([u32; 2]),
}

impl From<RawOperator> for Operator {
    fn from(raw: RawOperator) -> Self {
        match raw {
            RawOperator::ZeroOrOne => Operator::ZeroOrOne,
            RawOperator::ZeroOrMore => Operator::ZeroOrMore,
            RawOperator::OneOrMore => Operator::OneOrMore,
            RawOperator::Exactly(n) => Operator::Exactly(n),
            RawOperator::AtLeast(n) => Operator::AtLeast(n),
            RawOperator::Between([lower, upper]) => Operator::Between(lower, upper),
        }
    }
}

/// Element shape, keyed by its kind: `{"normal": unit}`, `{"separated": [l, r]}`, ...
#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum RawShape {
    Normal(RawUnit),
    Dangling(RawUnit),
    Separated([RawUnit; 2]),
    Alternated([RawUnit; 2]),
}

#[derive(Debug, Deserialize)]
struct RawElement {
    #[serde(default)]
    name: Option<RawIdentifier>,
    #[serde(flatten)]
    shape: RawShape,
    #[serde(default)]
    op: Option<RawOperator>,
    #[serde(default)]
    span: RawSpan,
}

impl From<RawElement> for ElementAst {
    fn from(raw: RawElement) -> Self {
        let span = span(raw.span);
        let operator = raw.op.map(Operator::from);
        let body = match raw.shape {
            RawShape::Normal(unit) => ElementBody::Normal {
                unit: unit.into_unit(span),
                operator,
            },
            RawShape::Dangling(unit) => ElementBody::Dangling {
                unit: unit.into_unit(span),
            },
            RawShape::Separated([left, right]) => ElementBody::Separated {
                left: left.into_unit(span),
                right: right.into_unit(span),
                operator,
            },
            RawShape::Alternated([left, right]) => ElementBody::Alternated {
                left: left.into_unit(span),
                right: right.into_unit(span),
                operator,
            },
        };
        Self {
            name: raw.name.map(Into::into),
            body,
            span,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum RawTreeShape {
    Normal(RawUnit),
    Separated([RawUnit; 2]),
    Alternated([RawUnit; 2]),
}

#[derive(Debug, Deserialize)]
struct RawTreeElement {
    #[serde(default)]
    name: Option<RawIdentifier>,
    #[serde(flatten)]
    shape: RawTreeShape,
    #[serde(default)]
    op: Option<RawOperator>,
    #[serde(default)]
    span: RawSpan,
}

impl From<RawTreeElement> for TreeElementAst {
    fn from(raw: RawTreeElement) -> Self {
        let span = span(raw.span);
        let operator = raw.op.map(Operator::from);
        let body = match raw.shape {
            RawTreeShape::Normal(unit) => TreeElementBody::Normal {
                unit: unit.into_unit(span),
                operator,
            },
            RawTreeShape::Separated([left, right]) => TreeElementBody::Separated {
                left: left.into_unit(span),
                right: right.into_unit(span),
                operator,
            },
            RawTreeShape::Alternated([left, right]) => TreeElementBody::Alternated {
                left: left.into_unit(span),
                right: right.into_unit(span),
                operator,
            },
        };
        Self {
            name: raw.name.map(Into::into),
            body,
            span,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawTree {
    #[serde(default)]
    productions: Vec<RawTreeProduction>,
}

impl From<RawTree> for TreeAst {
    fn from(raw: RawTree) -> Self {
        Self {
            productions: raw.productions.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawTreeProduction {
    name: RawIdentifier,
    alternatives: Vec<RawTreeAlternative>,
}

impl From<RawTreeProduction> for TreeProductionAst {
    fn from(raw: RawTreeProduction) -> Self {
        Self {
            name: raw.name.into(),
            alternatives: raw.alternatives.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawTreeAlternative {
    #[serde(default)]
    name: Option<RawIdentifier>,
    #[serde(default)]
    elements: Vec<RawTreeElement>,
    #[serde(default)]
    span: RawSpan,
}

impl From<RawTreeAlternative> for TreeAlternativeAst {
    fn from(raw: RawTreeAlternative) -> Self {
        Self {
            name: raw.name.map(Into::into),
            elements: raw.elements.into_iter().map(Into::into).collect(),
            span: span(raw.span),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawTransformation {
    #[serde(default)]
    productions: Vec<RawProductionTransformation>,
    #[serde(default)]
    alternatives: Vec<RawAlternativeTransformation>,
}

impl From<RawTransformation> for TransformationAst {
    fn from(raw: RawTransformation) -> Self {
        Self {
            productions: raw.productions.into_iter().map(Into::into).collect(),
            alternatives: raw.alternatives.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawProductionTransformation {
    production: RawIdentifier,
    #[serde(default)]
    elements: Vec<RawTreeElement>,
    #[serde(default)]
    span: RawSpan,
}

impl From<RawProductionTransformation> for ProductionTransformationAst {
    fn from(raw: RawProductionTransformation) -> Self {
        Self {
            production: raw.production.into(),
            elements: raw.elements.into_iter().map(Into::into).collect(),
            span: span(raw.span),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawAlternativeTransformation {
    production: RawIdentifier,
    #[serde(default)]
    alternative: Option<RawIdentifier>,
    #[serde(default)]
    elements: Vec<RawTransformationElement>,
    #[serde(default)]
    span: RawSpan,
}

impl From<RawAlternativeTransformation> for AlternativeTransformationAst {
    fn from(raw: RawAlternativeTransformation) -> Self {
        Self {
            production: raw.production.into(),
            alternative: raw.alternative.map(Into::into),
            elements: raw.elements.into_iter().map(Into::into).collect(),
            span: span(raw.span),
        }
    }
}

/// `{"element": "e", "part": "x"}` or just `"e"`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawReference {
    Plain(String),
    Full {
        element: RawIdentifier,
        #[serde(default)]
        part: Option<RawIdentifier>,
        #[serde(default)]
        span: RawSpan,
    },
}

impl From<RawReference> for ReferenceAst {
    fn from(raw: RawReference) -> Self {
        match raw {
            RawReference::Plain(text) => ReferenceAst {
                element: Identifier::new(text, TextRange::default()),
                part: None,
                span: TextRange::default(),
            },
            RawReference::Full {
                element,
                part,
                span: s,
            } => {
                let span = span(s);
                let mut element = Identifier::from(element);
                if element.span.is_empty() {
                    element.span = span;
                }
                ReferenceAst {
                    element,
                    part: part.map(Into::into),
                    span,
                }
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawNew {
    production: RawIdentifier,
    #[serde(default)]
    alternative: Option<RawIdentifier>,
    #[serde(default)]
    params: Vec<RawTransformationElement>,
    #[serde(default)]
    span: RawSpan,
}

impl From<RawNew> for NewAst {
    fn from(raw: RawNew) -> Self {
        Self {
            production: raw.production.into(),
            alternative: raw.alternative.map(Into::into),
            params: raw.params.into_iter().map(Into::into).collect(),
            span: span(raw.span),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum RawTransformationElement {
    Null,
    Ref(RawReference),
    New(RawNew),
    List(Vec<RawListItem>),
}

impl From<RawTransformationElement> for TransformationElementAst {
    fn from(raw: RawTransformationElement) -> Self {
        match raw {
            RawTransformationElement::Null => Self::Null {
                span: TextRange::default(),
            },
            RawTransformationElement::Ref(reference) => Self::Reference(reference.into()),
            RawTransformationElement::New(new) => Self::New(new.into()),
            RawTransformationElement::List(items) => Self::List {
                items: items.into_iter().map(Into::into).collect(),
                span: TextRange::default(),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum RawListItem {
    Ref(RawReference),
    New(RawNew),
    Expand(RawReference),
    ExpandLeft(RawReference),
    ExpandRight(RawReference),
}

impl From<RawListItem> for ListItemAst {
    fn from(raw: RawListItem) -> Self {
        let expand = |expansion, reference: RawReference| ListItemAst::Expand {
            expansion,
            reference: reference.into(),
        };
        match raw {
            RawListItem::Ref(reference) => ListItemAst::Reference(reference.into()),
            RawListItem::New(new) => ListItemAst::New(new.into()),
            RawListItem::Expand(reference) => expand(ListExpansion::Normal, reference),
            RawListItem::ExpandLeft(reference) => expand(ListExpansion::Left, reference),
            RawListItem::ExpandRight(reference) => expand(ListExpansion::Right, reference),
        }
    }
}
