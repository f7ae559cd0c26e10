//! Grammar model construction from the AST.

use super::{
    AlternativeId, Declaration, ElementId, ElementShape, Grammar, LocalEntry, LocalNamespace,
    Namespace, ParserAlternative, ParserElement, ParserProduction, Priority, ProductionId,
    Selection, SelectionId, SelectorLevel, TokenId, TreeAlternative, TreeAlternativeId,
    TreeElement, TreeElementId, TreeProduction, TreeProductionId, describe,
};
use crate::ast::{
    AlternativeAst, GrammarAst, ProductionAst, SelectorAst, TreeAlternativeAst, TreeProductionAst,
};
use crate::error::SemanticError;

impl Grammar {
    /// Build the model, declaring every name and resolving priority operands.
    pub fn build(ast: &GrammarAst) -> Result<Grammar, SemanticError> {
        let mut grammar = Grammar {
            tokens: Vec::new(),
            selections: Vec::new(),
            productions: Vec::new(),
            alternatives: Vec::new(),
            elements: Vec::new(),
            tree_productions: Vec::new(),
            tree_alternatives: Vec::new(),
            tree_elements: Vec::new(),
            roots: ast.parser.roots.clone(),
            has_tree: ast.tree.is_some(),
            global: Namespace::default(),
            tree: Namespace::default(),
        };

        for token in &ast.lexer.tokens {
            let id = TokenId::from_index(grammar.tokens.len());
            grammar.global.declare(token, Declaration::Token(id))?;
            grammar.tokens.push(token.clone());
        }
        grammar.declare_selectors(&ast.lexer.selectors, SelectorLevel::Lexer)?;

        for production in &ast.parser.productions {
            let id = ProductionId::from_index(grammar.productions.len());
            grammar
                .global
                .declare(&production.name, Declaration::Production(id))?;
            grammar.productions.push(ParserProduction {
                name: production.name.clone(),
                kind: production.kind,
                alternatives: Vec::new(),
                priorities: Vec::new(),
                local: LocalNamespace::default(),
            });
        }
        grammar.declare_selectors(&ast.parser.selectors, SelectorLevel::Parser)?;

        if let Some(tree) = &ast.tree {
            for production in &tree.productions {
                if let Some(previous) = grammar
                    .global
                    .get(&production.name.text)
                    .filter(|d| matches!(d, Declaration::Token(_) | Declaration::Selection(_)))
                    .and_then(|_| grammar.global.span_of(&production.name.text))
                {
                    return Err(SemanticError::DuplicateDeclaration {
                        name: production.name.text.clone(),
                        span: production.name.span,
                        previous,
                    });
                }
                let id = TreeProductionId::from_index(grammar.tree_productions.len());
                grammar
                    .tree
                    .declare(&production.name, Declaration::TreeProduction(id))?;
                grammar.tree_productions.push(TreeProduction {
                    name: production.name.clone(),
                    alternatives: Vec::new(),
                    local: LocalNamespace::default(),
                });
            }
        }

        for (index, production) in ast.parser.productions.iter().enumerate() {
            grammar.build_production(ProductionId::from_index(index), production)?;
        }

        if let Some(tree) = &ast.tree {
            for (index, production) in tree.productions.iter().enumerate() {
                grammar.build_tree_production(TreeProductionId::from_index(index), production)?;
            }
        }

        tracing::debug!(
            productions = grammar.productions.len(),
            alternatives = grammar.alternatives.len(),
            tree_productions = grammar.tree_productions.len(),
            "grammar model built"
        );

        Ok(grammar)
    }

    fn declare_selectors(
        &mut self,
        selectors: &[SelectorAst],
        level: SelectorLevel,
    ) -> Result<(), SemanticError> {
        for selector in selectors {
            for selection in &selector.selections {
                let id = SelectionId::from_index(self.selections.len());
                self.global.declare(selection, Declaration::Selection(id))?;
                self.selections.push(Selection {
                    name: selection.clone(),
                    selector: selector.name.clone(),
                    level,
                });
            }
        }
        Ok(())
    }

    fn build_production(
        &mut self,
        id: ProductionId,
        production: &ProductionAst,
    ) -> Result<(), SemanticError> {
        let mut alternatives = Vec::with_capacity(production.alternatives.len());
        for (index, alternative) in production.alternatives.iter().enumerate() {
            alternatives.push(self.build_alternative(id, index, alternative)?);
        }

        let local = LocalNamespace::explicit(
            alternatives.iter().filter_map(|&alternative| {
                let name = self.alternative(alternative).name.as_ref()?;
                Some((alternative, name))
            }),
            |name, previous| SemanticError::DuplicateAlternativeName {
                production: production.name.text.clone(),
                name: name.text.clone(),
                span: name.span,
                previous,
            },
        )?;

        let mut priorities = Vec::with_capacity(production.priorities.len());
        for priority in &production.priorities {
            let mut members = Vec::with_capacity(priority.alternatives.len());
            for name in &priority.alternatives {
                let Some(alternative) = local.get(&name.text) else {
                    return Err(SemanticError::UndefinedAlternativeReference {
                        production: production.name.text.clone(),
                        name: name.text.clone(),
                        span: name.span,
                    });
                };
                members.push(alternative);
            }
            priorities.push(Priority {
                kind: priority.kind,
                alternatives: members,
                span: priority.span,
            });
        }

        let slot = &mut self.productions[id.index()];
        slot.alternatives = alternatives;
        slot.local = local;
        slot.priorities = priorities;
        Ok(())
    }

    fn build_alternative(
        &mut self,
        production: ProductionId,
        index: usize,
        alternative: &AlternativeAst,
    ) -> Result<AlternativeId, SemanticError> {
        let id = AlternativeId::from_index(self.alternatives.len());
        let first = self.elements.len();

        for (position, element) in alternative.elements.iter().enumerate() {
            self.elements.push(ParserElement {
                alternative: id,
                index: position,
                shape: ElementShape::from_parser(&element.body)?,
                name: None,
                span: element.span,
            });
        }
        let elements: Vec<ElementId> = (first..self.elements.len())
            .map(ElementId::from_index)
            .collect();

        let entries: Vec<LocalEntry<'_, ElementId>> = alternative
            .elements
            .iter()
            .zip(&elements)
            .zip(&self.elements[first..])
            .map(|((ast, &element), built)| LocalEntry {
                id: element,
                explicit: ast.name.as_ref(),
                implicit: built.shape.implicit_name(),
            })
            .collect();
        let local = LocalNamespace::implicit_explicit(&entries, |name, previous| {
            SemanticError::DuplicateElementName {
                alternative: describe(
                    &self.productions[production.index()].name.text,
                    alternative.name.as_ref(),
                    index,
                ),
                name: name.text.clone(),
                span: name.span,
                previous,
            }
        })?;

        for (name, element) in local.iter() {
            self.elements[element.index()].name = Some(name.to_string());
        }

        self.alternatives.push(ParserAlternative {
            production,
            index,
            name: alternative.name.clone(),
            elements,
            local,
            span: alternative.span,
        });
        Ok(id)
    }

    fn build_tree_production(
        &mut self,
        id: TreeProductionId,
        production: &TreeProductionAst,
    ) -> Result<(), SemanticError> {
        let mut alternatives = Vec::with_capacity(production.alternatives.len());
        for (index, alternative) in production.alternatives.iter().enumerate() {
            alternatives.push(self.build_tree_alternative(id, index, alternative)?);
        }

        let local = LocalNamespace::explicit(
            alternatives.iter().filter_map(|&alternative| {
                let name = self.tree_alternative(alternative).name.as_ref()?;
                Some((alternative, name))
            }),
            |name, previous| SemanticError::DuplicateAlternativeName {
                production: production.name.text.clone(),
                name: name.text.clone(),
                span: name.span,
                previous,
            },
        )?;

        let slot = &mut self.tree_productions[id.index()];
        slot.alternatives = alternatives;
        slot.local = local;
        Ok(())
    }

    fn build_tree_alternative(
        &mut self,
        production: TreeProductionId,
        index: usize,
        alternative: &TreeAlternativeAst,
    ) -> Result<TreeAlternativeId, SemanticError> {
        let id = TreeAlternativeId::from_index(self.tree_alternatives.len());
        let first = self.tree_elements.len();

        for (position, element) in alternative.elements.iter().enumerate() {
            self.tree_elements.push(TreeElement {
                alternative: id,
                index: position,
                shape: ElementShape::from_tree(&element.body)?,
                name: None,
                span: element.span,
            });
        }
        let elements: Vec<TreeElementId> = (first..self.tree_elements.len())
            .map(TreeElementId::from_index)
            .collect();

        let entries: Vec<LocalEntry<'_, TreeElementId>> = alternative
            .elements
            .iter()
            .zip(&elements)
            .zip(&self.tree_elements[first..])
            .map(|((ast, &element), built)| LocalEntry {
                id: element,
                explicit: ast.name.as_ref(),
                implicit: built.shape.implicit_name(),
            })
            .collect();
        let local = LocalNamespace::implicit_explicit(&entries, |name, previous| {
            SemanticError::DuplicateElementName {
                alternative: describe(
                    &self.tree_productions[production.index()].name.text,
                    alternative.name.as_ref(),
                    index,
                ),
                name: name.text.clone(),
                span: name.span,
                previous,
            }
        })?;

        for (name, element) in local.iter() {
            self.tree_elements[element.index()].name = Some(name.to_string());
        }

        self.tree_alternatives.push(TreeAlternative {
            production,
            index,
            name: alternative.name.clone(),
            elements,
            local,
            span: alternative.span,
        });
        Ok(id)
    }
}
