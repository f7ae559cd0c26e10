use rowan::TextRange;

use crate::error::SemanticError;

/// Diagnostic categories, one per stage that can reject a grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    Declaration,
    Reference,
    Synthesis,
    Assignability,
    Priority,
    Order,
    Root,
}

impl DiagnosticKind {
    pub fn of(error: &SemanticError) -> Self {
        use SemanticError as E;
        match error {
            E::DuplicateDeclaration { .. }
            | E::DuplicateAlternativeName { .. }
            | E::DuplicateElementName { .. }
            | E::DuplicateProductionTransformationElementName { .. }
            | E::DuplicateProductionTransformation { .. }
            | E::DuplicateAlternativeTransformation { .. }
            | E::InvalidInterval { .. } => Self::Declaration,

            E::UndefinedReference { .. }
            | E::BadReference { .. }
            | E::UndefinedAlternativeReference { .. }
            | E::UndefinedTreeAlternativeReference { .. }
            | E::UndefinedElementReference { .. }
            | E::UndefinedAlternativeTransformationReference { .. }
            | E::BadAlternativeReference { .. }
            | E::BadTreeAlternativeReference { .. }
            | E::ImpossibleNaturalReference { .. }
            | E::ListExpansionMissing { .. }
            | E::MultipleListExpansion { .. }
            | E::BadListExpansion { .. } => Self::Reference,

            E::NonTrivialProductionTransformation { .. }
            | E::UnmatchedAlternative { .. }
            | E::UnmatchedElement { .. }
            | E::AmbiguousAlternativeTransformation { .. } => Self::Synthesis,

            E::BadAlternativeTransformationSignature { .. }
            | E::BadNewSignature { .. }
            | E::ElementAssignment { .. }
            | E::IncompatibleListElement { .. } => Self::Assignability,

            E::PriorityBadPattern { .. }
            | E::PriorityBadRecursion { .. }
            | E::PriorityNonNormalOperand { .. }
            | E::PriorityBadOperand { .. }
            | E::OverQualifiedRecursiveElement { .. }
            | E::MixedUnaryPriorities { .. }
            | E::SingleUnaryPriority { .. } => Self::Priority,

            E::ElementReordered { .. } | E::TransformationElementReordered { .. } => Self::Order,

            E::BadRootElementTransformation { .. } | E::BadSyntacticTokenTransformation { .. } => {
                Self::Root
            }
        }
    }

    /// Hint shown under the snippet, when the fix is usually the same.
    pub fn default_hint(&self) -> Option<&'static str> {
        match self {
            Self::Synthesis => Some("write an explicit transformation for this alternative"),
            Self::Order => Some("reference elements in the order they are declared"),
            _ => None,
        }
    }
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Declaration => "declaration",
            Self::Reference => "reference",
            Self::Synthesis => "synthesis",
            Self::Assignability => "assignability",
            Self::Priority => "priority",
            Self::Order => "order",
            Self::Root => "root",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub(crate) range: TextRange,
    pub(crate) message: String,
}

impl RelatedInfo {
    pub fn new(range: TextRange, message: impl Into<String>) -> Self {
        Self {
            range,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub(crate) kind: DiagnosticKind,
    /// The range shown to the user (underlined in output).
    pub(crate) range: TextRange,
    pub(crate) message: String,
    pub(crate) related: Vec<RelatedInfo>,
    pub(crate) hints: Vec<String>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, range: TextRange, message: impl Into<String>) -> Self {
        Self {
            kind,
            range,
            message: message.into(),
            related: Vec::new(),
            hints: kind.default_hint().map(String::from).into_iter().collect(),
        }
    }

    pub fn with_related(mut self, message: impl Into<String>, range: TextRange) -> Self {
        self.related.push(RelatedInfo::new(range, message));
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<&SemanticError> for Diagnostic {
    fn from(error: &SemanticError) -> Self {
        error.related().into_iter().fold(
            Diagnostic::new(DiagnosticKind::of(error), error.span(), error.to_string()),
            |diagnostic, (label, range)| diagnostic.with_related(label, range),
        )
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "error at {}..{}: {}",
            u32::from(self.range.start()),
            u32::from(self.range.end()),
            self.message
        )?;
        for related in &self.related {
            write!(
                f,
                " (related: {} at {}..{})",
                related.message,
                u32::from(related.range.start()),
                u32::from(related.range.end())
            )?;
        }
        for hint in &self.hints {
            write!(f, " (hint: {})", hint)?;
        }
        Ok(())
    }
}
