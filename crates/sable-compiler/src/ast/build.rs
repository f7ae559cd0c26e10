//! Constructors for assembling grammar ASTs in code.
//!
//! Front-ends written in Rust and tests build grammars with these instead of
//! going through JSON. Every node starts with an empty span; use `at` to attach
//! a source range.

use rowan::{TextRange, TextSize};

use super::{
    AlternativeAst, AlternativeTransformationAst, CharKind, ElementAst, ElementBody, GrammarAst,
    Identifier, ListExpansion, ListItemAst, NewAst, Operator, PriorityAst, PriorityKind,
    ProductionAst, ProductionKind, ProductionTransformationAst, ReferenceAst, SelectorAst,
    TransformationElementAst, TreeAlternativeAst, TreeAst, TreeElementAst, TreeElementBody,
    TreeProductionAst, Unit,
};

pub fn range(start: u32, end: u32) -> TextRange {
    TextRange::new(TextSize::from(start), TextSize::from(end))
}

pub fn ident(text: &str) -> Identifier {
    Identifier::new(text, TextRange::default())
}

pub fn name(text: &str) -> Unit {
    Unit::Name(ident(text))
}

pub fn string(text: &str) -> Unit {
    Unit::String {
        text: text.to_string(),
        span: TextRange::default(),
    }
}

pub fn character(kind: CharKind, text: &str) -> Unit {
    Unit::Char {
        kind,
        text: text.to_string(),
        span: TextRange::default(),
    }
}

impl GrammarAst {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token(mut self, name: &str) -> Self {
        self.lexer.tokens.push(ident(name));
        self
    }

    pub fn tokens<'a>(self, names: impl IntoIterator<Item = &'a str>) -> Self {
        names.into_iter().fold(self, Self::token)
    }

    pub fn lexer_selector(mut self, name: &str, selections: &[&str]) -> Self {
        self.lexer.selectors.push(selector(name, selections));
        self
    }

    pub fn parser_selector(mut self, name: &str, selections: &[&str]) -> Self {
        self.parser.selectors.push(selector(name, selections));
        self
    }

    pub fn root(mut self, name: &str) -> Self {
        self.parser.roots.push(ident(name));
        self
    }

    pub fn production(mut self, production: ProductionAst) -> Self {
        self.parser.productions.push(production);
        self
    }

    /// Adds a tree production, creating the tree section on first use.
    pub fn tree_production(mut self, production: TreeProductionAst) -> Self {
        self.tree
            .get_or_insert_with(TreeAst::default)
            .productions
            .push(production);
        self
    }

    pub fn empty_tree(mut self) -> Self {
        self.tree.get_or_insert_with(TreeAst::default);
        self
    }

    pub fn production_transformation(mut self, transformation: ProductionTransformationAst) -> Self {
        self.transformation.productions.push(transformation);
        self
    }

    pub fn alternative_transformation(
        mut self,
        transformation: AlternativeTransformationAst,
    ) -> Self {
        self.transformation.alternatives.push(transformation);
        self
    }
}

fn selector(name: &str, selections: &[&str]) -> SelectorAst {
    SelectorAst {
        name: ident(name),
        selections: selections.iter().map(|s| ident(s)).collect(),
    }
}

impl ProductionAst {
    pub fn new(name: &str) -> Self {
        Self {
            name: ident(name),
            kind: ProductionKind::Normal,
            alternatives: Vec::new(),
            priorities: Vec::new(),
        }
    }

    pub fn kind(mut self, kind: ProductionKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn alternative(mut self, alternative: AlternativeAst) -> Self {
        self.alternatives.push(alternative);
        self
    }

    pub fn priority(mut self, kind: PriorityKind, alternatives: &[&str]) -> Self {
        self.priorities.push(PriorityAst {
            kind,
            alternatives: alternatives.iter().map(|a| ident(a)).collect(),
            span: TextRange::default(),
        });
        self
    }

    pub fn at(mut self, start: u32, end: u32) -> Self {
        self.name.span = range(start, end);
        self
    }
}

impl AlternativeAst {
    pub fn new(elements: impl IntoIterator<Item = ElementAst>) -> Self {
        Self {
            name: None,
            elements: elements.into_iter().collect(),
            span: TextRange::default(),
        }
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(Identifier::new(name, self.span));
        self
    }

    pub fn at(mut self, start: u32, end: u32) -> Self {
        self.span = range(start, end);
        if let Some(name) = &mut self.name {
            name.span = self.span;
        }
        self
    }
}

impl ElementAst {
    pub fn normal(unit: Unit) -> Self {
        Self::from_body(ElementBody::Normal {
            unit,
            operator: None,
        })
    }

    pub fn dangling(unit: Unit) -> Self {
        Self::from_body(ElementBody::Dangling { unit })
    }

    pub fn separated(left: Unit, right: Unit) -> Self {
        Self::from_body(ElementBody::Separated {
            left,
            right,
            operator: None,
        })
    }

    pub fn alternated(left: Unit, right: Unit) -> Self {
        Self::from_body(ElementBody::Alternated {
            left,
            right,
            operator: None,
        })
    }

    fn from_body(body: ElementBody) -> Self {
        Self {
            name: None,
            body,
            span: TextRange::default(),
        }
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(Identifier::new(name, self.span));
        self
    }

    /// Sets the operator; ignored for dangling elements.
    pub fn op(mut self, op: Operator) -> Self {
        match &mut self.body {
            ElementBody::Normal { operator, .. }
            | ElementBody::Separated { operator, .. }
            | ElementBody::Alternated { operator, .. } => *operator = Some(op),
            ElementBody::Dangling { .. } => {}
        }
        self
    }

    pub fn at(mut self, start: u32, end: u32) -> Self {
        let span = range(start, end);
        self.span = span;
        if let Some(name) = &mut self.name {
            name.span = span;
        }
        match &mut self.body {
            ElementBody::Normal { unit, .. } | ElementBody::Dangling { unit } => {
                set_unit_span(unit, span)
            }
            ElementBody::Separated { left, right, .. }
            | ElementBody::Alternated { left, right, .. } => {
                set_unit_span(left, span);
                set_unit_span(right, span);
            }
        }
        self
    }
}

fn set_unit_span(unit: &mut Unit, span: TextRange) {
    match unit {
        Unit::Name(identifier) => identifier.span = span,
        Unit::String { span: s, .. } | Unit::Char { span: s, .. } => *s = span,
        Unit::Start(s) | Unit::End(s) => *s = span,
    }
}

impl TreeProductionAst {
    pub fn new(name: &str) -> Self {
        Self {
            name: ident(name),
            alternatives: Vec::new(),
        }
    }

    pub fn alternative(mut self, alternative: TreeAlternativeAst) -> Self {
        self.alternatives.push(alternative);
        self
    }

    pub fn at(mut self, start: u32, end: u32) -> Self {
        self.name.span = range(start, end);
        self
    }
}

impl TreeAlternativeAst {
    pub fn new(elements: impl IntoIterator<Item = TreeElementAst>) -> Self {
        Self {
            name: None,
            elements: elements.into_iter().collect(),
            span: TextRange::default(),
        }
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(Identifier::new(name, self.span));
        self
    }

    pub fn at(mut self, start: u32, end: u32) -> Self {
        self.span = range(start, end);
        if let Some(name) = &mut self.name {
            name.span = self.span;
        }
        self
    }
}

impl TreeElementAst {
    pub fn normal(unit: Unit) -> Self {
        Self::from_body(TreeElementBody::Normal {
            unit,
            operator: None,
        })
    }

    pub fn separated(left: Unit, right: Unit) -> Self {
        Self::from_body(TreeElementBody::Separated {
            left,
            right,
            operator: None,
        })
    }

    pub fn alternated(left: Unit, right: Unit) -> Self {
        Self::from_body(TreeElementBody::Alternated {
            left,
            right,
            operator: None,
        })
    }

    fn from_body(body: TreeElementBody) -> Self {
        Self {
            name: None,
            body,
            span: TextRange::default(),
        }
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(Identifier::new(name, self.span));
        self
    }

    pub fn op(mut self, op: Operator) -> Self {
        match &mut self.body {
            TreeElementBody::Normal { operator, .. }
            | TreeElementBody::Separated { operator, .. }
            | TreeElementBody::Alternated { operator, .. } => *operator = Some(op),
        }
        self
    }

    pub fn at(mut self, start: u32, end: u32) -> Self {
        let span = range(start, end);
        self.span = span;
        if let Some(name) = &mut self.name {
            name.span = span;
        }
        match &mut self.body {
            TreeElementBody::Normal { unit, .. } => set_unit_span(unit, span),
            TreeElementBody::Separated { left, right, .. }
            | TreeElementBody::Alternated { left, right, .. } => {
                set_unit_span(left, span);
                set_unit_span(right, span);
            }
        }
        self
    }
}

impl ProductionTransformationAst {
    pub fn new(production: &str, elements: impl IntoIterator<Item = TreeElementAst>) -> Self {
        Self {
            production: ident(production),
            elements: elements.into_iter().collect(),
            span: TextRange::default(),
        }
    }

    pub fn at(mut self, start: u32, end: u32) -> Self {
        self.span = range(start, end);
        self.production.span = self.span;
        self
    }
}

impl AlternativeTransformationAst {
    pub fn new(
        production: &str,
        alternative: Option<&str>,
        elements: impl IntoIterator<Item = TransformationElementAst>,
    ) -> Self {
        Self {
            production: ident(production),
            alternative: alternative.map(ident),
            elements: elements.into_iter().collect(),
            span: TextRange::default(),
        }
    }

    pub fn at(mut self, start: u32, end: u32) -> Self {
        self.span = range(start, end);
        self.production.span = self.span;
        if let Some(alternative) = &mut self.alternative {
            alternative.span = self.span;
        }
        self
    }
}

impl ReferenceAst {
    pub fn natural(element: &str) -> Self {
        Self {
            element: ident(element),
            part: None,
            span: TextRange::default(),
        }
    }

    pub fn transformed(element: &str, part: &str) -> Self {
        Self {
            element: ident(element),
            part: Some(ident(part)),
            span: TextRange::default(),
        }
    }

    pub fn at(mut self, start: u32, end: u32) -> Self {
        self.span = range(start, end);
        self.element.span = self.span;
        if let Some(part) = &mut self.part {
            part.span = self.span;
        }
        self
    }
}

impl NewAst {
    pub fn new(
        production: &str,
        alternative: Option<&str>,
        params: impl IntoIterator<Item = TransformationElementAst>,
    ) -> Self {
        Self {
            production: ident(production),
            alternative: alternative.map(ident),
            params: params.into_iter().collect(),
            span: TextRange::default(),
        }
    }

    pub fn at(mut self, start: u32, end: u32) -> Self {
        self.span = range(start, end);
        self
    }
}

impl TransformationElementAst {
    pub fn null() -> Self {
        Self::Null {
            span: TextRange::default(),
        }
    }

    pub fn list(items: impl IntoIterator<Item = ListItemAst>) -> Self {
        Self::List {
            items: items.into_iter().collect(),
            span: TextRange::default(),
        }
    }
}

impl From<ReferenceAst> for TransformationElementAst {
    fn from(reference: ReferenceAst) -> Self {
        Self::Reference(reference)
    }
}

impl From<NewAst> for TransformationElementAst {
    fn from(new: NewAst) -> Self {
        Self::New(new)
    }
}

impl ListItemAst {
    pub fn expand(reference: ReferenceAst) -> Self {
        Self::Expand {
            expansion: ListExpansion::Normal,
            reference,
        }
    }

    pub fn expand_left(reference: ReferenceAst) -> Self {
        Self::Expand {
            expansion: ListExpansion::Left,
            reference,
        }
    }

    pub fn expand_right(reference: ReferenceAst) -> Self {
        Self::Expand {
            expansion: ListExpansion::Right,
            reference,
        }
    }
}
