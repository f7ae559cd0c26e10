//! Collection of the transformations written in the grammar.
//!
//! Resolves every name the transformation section mentions and records the
//! result as explicit transformations. Production transformations are all
//! collected before alternative transformations, since `e.part` reads them.

use indexmap::IndexMap;
use rowan::TextRange;

use super::Analyzer;
use crate::ast::{
    AlternativeTransformationAst, Identifier, ListExpansion, ListItemAst, NewAst,
    ProductionTransformationAst, ReferenceAst, TransformationAst, TransformationElementAst, Unit,
};
use crate::error::SemanticError;
use crate::grammar::{
    AlternativeId, Declaration, DeclarationKind, ElementShape, LocalEntry,
    LocalNamespace, ProductionId, ShapeKind, TreeAlternativeId,
};
use crate::transformation::{
    AlternativeTransformation, AlternativeTransformationElement, ListElement, ListItem,
    NewElement, Origin, ProductionTransformation, ProductionTransformationElement,
    ReferenceElement, ReferenceSource,
};

impl Analyzer<'_> {
    pub(super) fn collect_explicit(
        &mut self,
        ast: &TransformationAst,
    ) -> Result<(), SemanticError> {
        for transformation in &ast.productions {
            let collected = self.collect_production_transformation(transformation)?;
            self.transformations.assign_production(collected);
        }
        for transformation in &ast.alternatives {
            let collected = self.collect_alternative_transformation(transformation)?;
            self.transformations.assign_alternative(collected);
        }

        tracing::debug!(
            productions = ast.productions.len(),
            alternatives = ast.alternatives.len(),
            "explicit transformations collected"
        );
        Ok(())
    }

    fn collect_production_transformation(
        &self,
        ast: &ProductionTransformationAst,
    ) -> Result<ProductionTransformation, SemanticError> {
        let production = self.expect_production(&ast.production)?;
        if let Some(previous) = self.transformations.production(production) {
            return Err(SemanticError::DuplicateProductionTransformation {
                production: ast.production.text.clone(),
                span: ast.span,
                previous: previous.span,
            });
        }

        let context = self.context();
        let mut elements = Vec::with_capacity(ast.elements.len());
        for element in &ast.elements {
            let shape = ElementShape::from_tree(&element.body)?;
            let mut target = None;
            for unit in shape.units() {
                let Unit::Name(identifier) = unit else {
                    continue;
                };
                let declaration =
                    context.expect_tree(identifier, DeclarationKind::TOKENS_OR_TREE_PRODUCTIONS)?;
                if matches!(shape, ElementShape::Normal { .. }) {
                    target = Some(declaration);
                }
            }
            elements.push(ProductionTransformationElement {
                shape,
                target,
                name: None,
                span: element.span,
            });
        }

        let entries: Vec<LocalEntry<'_, usize>> = ast
            .elements
            .iter()
            .zip(&elements)
            .enumerate()
            .map(|(index, (element, built))| LocalEntry {
                id: index,
                explicit: element.name.as_ref(),
                implicit: built.shape.implicit_name(),
            })
            .collect();
        let local = LocalNamespace::implicit_explicit(&entries, |name, previous| {
            SemanticError::DuplicateProductionTransformationElementName {
                production: ast.production.text.clone(),
                name: name.text.clone(),
                span: name.span,
                previous,
            }
        })?;
        for (name, index) in local.iter() {
            elements[index].name = Some(name.to_string());
        }

        Ok(ProductionTransformation {
            production,
            origin: Origin::Explicit,
            elements,
            local,
            span: ast.span,
        })
    }

    fn collect_alternative_transformation(
        &self,
        ast: &AlternativeTransformationAst,
    ) -> Result<AlternativeTransformation, SemanticError> {
        let production = self.expect_production(&ast.production)?;
        let alternative = self.resolve_alternative(production, ast)?;
        if let Some(previous) = self.transformations.alternative(alternative) {
            return Err(SemanticError::DuplicateAlternativeTransformation {
                alternative: self.grammar.describe_alternative(alternative),
                span: ast.span,
                previous: previous.span,
            });
        }

        let mut collector = ElementCollector {
            analyzer: self,
            alternative,
            expansions: IndexMap::new(),
        };
        let elements = ast
            .elements
            .iter()
            .map(|element| collector.element(element))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(AlternativeTransformation {
            alternative,
            origin: Origin::Explicit,
            elements,
            span: ast.span,
        })
    }

    fn expect_production(&self, name: &Identifier) -> Result<ProductionId, SemanticError> {
        match self
            .context()
            .expect_global(name, DeclarationKind::PARSER_PRODUCTIONS)?
        {
            Declaration::Production(id) => Ok(id),
            other => unreachable!("parser production kinds resolved to {other:?}"),
        }
    }

    fn resolve_alternative(
        &self,
        production: ProductionId,
        ast: &AlternativeTransformationAst,
    ) -> Result<AlternativeId, SemanticError> {
        let context = self.context();
        if let Some(name) = &ast.alternative {
            return context.alternative_named(production, &name.text).ok_or_else(|| {
                SemanticError::UndefinedAlternativeReference {
                    production: ast.production.text.clone(),
                    name: name.text.clone(),
                    span: name.span,
                }
            });
        }

        let mut unnamed = self
            .grammar
            .production(production)
            .alternatives
            .iter()
            .copied()
            .filter(|&id| self.grammar.alternative(id).name.is_none());
        match (unnamed.next(), unnamed.next()) {
            (Some(id), None) => Ok(id),
            _ => Err(SemanticError::BadAlternativeReference {
                production: ast.production.text.clone(),
                span: ast.span,
            }),
        }
    }
}

/// Resolves the elements of one alternative transformation.
struct ElementCollector<'a, 'g> {
    analyzer: &'a Analyzer<'g>,
    alternative: AlternativeId,
    /// Sources already spliced by a list expansion, with the first site.
    /// `e.a` and `e.b` are distinct sources.
    expansions: IndexMap<ReferenceSource, TextRange>,
}

impl ElementCollector<'_, '_> {
    fn element(
        &mut self,
        ast: &TransformationElementAst,
    ) -> Result<AlternativeTransformationElement, SemanticError> {
        Ok(match ast {
            TransformationElementAst::Null { span } => {
                AlternativeTransformationElement::Null { span: *span }
            }
            TransformationElementAst::Reference(reference) => {
                AlternativeTransformationElement::Reference(self.single_reference(reference)?)
            }
            TransformationElementAst::New(new) => {
                AlternativeTransformationElement::New(self.new_element(new)?)
            }
            TransformationElementAst::List { items, span } => {
                let items = items
                    .iter()
                    .map(|item| self.list_item(item))
                    .collect::<Result<Vec<_>, _>>()?;
                AlternativeTransformationElement::List(ListElement { items, span: *span })
            }
        })
    }

    fn list_item(&mut self, ast: &ListItemAst) -> Result<ListItem, SemanticError> {
        Ok(match ast {
            ListItemAst::Reference(reference) => {
                ListItem::Reference(self.single_reference(reference)?)
            }
            ListItemAst::New(new) => ListItem::New(self.new_element(new)?),
            ListItemAst::Expand {
                expansion,
                reference,
            } => {
                let source = self.reference(reference)?;
                let types = self.analyzer.types();
                if *expansion != ListExpansion::Normal
                    && !matches!(
                        types.source_shape(source).0.kind(),
                        ShapeKind::Separated | ShapeKind::Alternated
                    )
                {
                    return Err(SemanticError::BadListExpansion {
                        element: types.describe_source(source),
                        expansion: *expansion,
                        span: reference.span,
                    });
                }
                if let Some(&previous) = self.expansions.get(&source) {
                    return Err(SemanticError::MultipleListExpansion {
                        element: types.describe_source(source),
                        span: reference.span,
                        previous,
                    });
                }
                self.expansions.insert(source, reference.span);
                ListItem::Expand {
                    expansion: *expansion,
                    source,
                    span: reference.span,
                }
            }
        })
    }

    /// A reference used as one value; list-valued sources must be expanded.
    fn single_reference(&self, ast: &ReferenceAst) -> Result<ReferenceElement, SemanticError> {
        let source = self.reference(ast)?;
        let types = self.analyzer.types();
        if types.reference_type(source, ast.span)?.is_list() {
            return Err(SemanticError::ListExpansionMissing {
                element: types.describe_source(source),
                span: ast.span,
            });
        }
        Ok(ReferenceElement {
            source,
            span: ast.span,
        })
    }

    fn reference(&self, ast: &ReferenceAst) -> Result<ReferenceSource, SemanticError> {
        let grammar = self.analyzer.grammar;
        let alternative = grammar.alternative(self.alternative);
        let Some(element) = alternative.local.get(&ast.element.text) else {
            return Err(SemanticError::UndefinedElementReference {
                alternative: grammar.describe_alternative(self.alternative),
                name: ast.element.text.clone(),
                span: ast.element.span,
            });
        };

        let types = self.analyzer.types();
        let referenced = types.referenced_production(element);
        let explicit = referenced
            .and_then(|production| self.analyzer.transformations.production(production))
            .filter(|transformation| transformation.origin == Origin::Explicit);

        let Some(part) = &ast.part else {
            if let (Some(production), Some(_)) = (referenced, explicit) {
                return Err(SemanticError::ImpossibleNaturalReference {
                    element: ast.element.text.clone(),
                    production: grammar.production(production).name.text.clone(),
                    span: ast.span,
                });
            }
            return Ok(ReferenceSource::Natural { element });
        };

        let undefined_part = || SemanticError::UndefinedAlternativeTransformationReference {
            production: unit_text(&grammar.element(element).shape),
            part: part.text.clone(),
            span: part.span,
        };
        let transformation = explicit.ok_or_else(undefined_part)?;
        let index = transformation
            .local
            .get(&part.text)
            .ok_or_else(undefined_part)?;
        Ok(ReferenceSource::Transformed {
            element,
            part: index,
        })
    }

    fn new_element(&mut self, ast: &NewAst) -> Result<NewElement, SemanticError> {
        let target = self.tree_alternative(ast)?;
        let params = ast
            .params
            .iter()
            .map(|param| self.element(param))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(NewElement {
            target,
            origin: Origin::Explicit,
            params,
            span: ast.span,
        })
    }

    fn tree_alternative(&self, ast: &NewAst) -> Result<TreeAlternativeId, SemanticError> {
        let context = self.analyzer.context();
        let Declaration::TreeProduction(production) =
            context.expect_tree(&ast.production, DeclarationKind::TREE_PRODUCTIONS)?
        else {
            unreachable!("tree production kinds resolved to a non-tree declaration");
        };

        if let Some(name) = &ast.alternative {
            return context
                .tree_alternative_named(production, &name.text)
                .ok_or_else(|| SemanticError::UndefinedTreeAlternativeReference {
                    production: ast.production.text.clone(),
                    name: name.text.clone(),
                    span: name.span,
                });
        }

        let grammar = self.analyzer.grammar;
        let mut unnamed = grammar
            .tree_production(production)
            .alternatives
            .iter()
            .copied()
            .filter(|&id| grammar.tree_alternative(id).name.is_none());
        match (unnamed.next(), unnamed.next()) {
            (Some(id), None) => Ok(id),
            _ => Err(SemanticError::BadTreeAlternativeReference {
                production: ast.production.text.clone(),
                span: ast.span,
            }),
        }
    }
}

fn unit_text(shape: &ElementShape) -> String {
    shape
        .single_unit()
        .map(|unit| unit.type_name())
        .unwrap_or_else(|| shape.to_string())
}
