//! Semantic analysis pipeline.
//!
//! Builds the grammar model, then runs the passes in [`Pass::ALL`] order:
//!
//! 1. `collect`: explicit transformations from the transformation section
//! 2. `synthesize`: implicit production, then alternative transformations
//! 3. `priorities`: priority block patterns
//! 4. `references`: parser and tree name references
//! 5. `assignability`: explicit transformations against their signatures
//! 6. `root`: root and token production transformations (tree grammars only)
//! 7. `order`: references appear in declaration order
//!
//! The first error aborts the pipeline.

mod assignability;
mod dump;
mod explicit;
mod implicit;
mod matcher;
mod order;
mod priority;
mod references;
mod root;

#[cfg(test)]
mod assignability_tests;
#[cfg(test)]
mod order_tests;
#[cfg(test)]
mod priority_tests;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ast::GrammarAst;
use crate::config::Config;
use crate::error::SemanticError;
use crate::grammar::{AlternativeId, Grammar, ProductionId, ResolutionContext};
use crate::transformation::{
    AlternativeTransformation, ProductionTransformation, Transformations, TypeContext,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pass {
    Collect,
    Synthesize,
    Priorities,
    References,
    Assignability,
    Root,
    Order,
}

impl Pass {
    pub const ALL: [Pass; 7] = [
        Pass::Collect,
        Pass::Synthesize,
        Pass::Priorities,
        Pass::References,
        Pass::Assignability,
        Pass::Root,
        Pass::Order,
    ];
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Pass::Collect => "collect",
            Pass::Synthesize => "synthesize",
            Pass::Priorities => "priorities",
            Pass::References => "references",
            Pass::Assignability => "assignability",
            Pass::Root => "root",
            Pass::Order => "order",
        };
        f.write_str(name)
    }
}

/// A verified grammar together with the transformation of every production
/// and alternative.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    #[serde(skip)]
    grammar: Grammar,
    transformations: Transformations,
    last_pass: Option<Pass>,
}

impl Analysis {
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn transformations(&self) -> &Transformations {
        &self.transformations
    }

    pub fn production_transformation(&self, id: ProductionId) -> Option<&ProductionTransformation> {
        self.transformations.production(id)
    }

    pub fn alternative_transformation(&self, id: AlternativeId) -> Option<&AlternativeTransformation> {
        self.transformations.alternative(id)
    }

    /// Last pass that ran; `None` when the configuration stopped before any.
    pub fn last_pass(&self) -> Option<Pass> {
        self.last_pass
    }

    /// Whether every pass ran.
    pub fn is_complete(&self) -> bool {
        self.last_pass == Pass::ALL.last().copied()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).expect("transformations always serialize")
    }
}

pub(crate) fn run(ast: &GrammarAst, config: &Config) -> Result<Analysis, SemanticError> {
    let grammar = {
        let _span = tracing::info_span!("build").entered();
        Grammar::build(ast)?
    };

    let mut analyzer = Analyzer {
        grammar: &grammar,
        transformations: Transformations::default(),
        config,
    };
    let last_pass = analyzer.run(ast)?;
    let transformations = analyzer.transformations;

    Ok(Analysis {
        grammar,
        transformations,
        last_pass,
    })
}

/// State threaded through the passes: the immutable grammar and the
/// transformations assigned so far.
struct Analyzer<'g> {
    grammar: &'g Grammar,
    transformations: Transformations,
    config: &'g Config,
}

impl<'g> Analyzer<'g> {
    fn run(&mut self, ast: &GrammarAst) -> Result<Option<Pass>, SemanticError> {
        let mut last_pass = None;
        for pass in Pass::ALL {
            let _span = tracing::info_span!("pass", %pass).entered();
            self.run_pass(pass, ast)?;
            last_pass = Some(pass);
            if self.config.stop_after == Some(pass) {
                tracing::debug!(%pass, "stopping early");
                break;
            }
        }
        Ok(last_pass)
    }

    fn run_pass(&mut self, pass: Pass, ast: &GrammarAst) -> Result<(), SemanticError> {
        match pass {
            Pass::Collect => self.collect_explicit(&ast.transformation),
            Pass::Synthesize => {
                self.synthesize_productions();
                self.synthesize_alternatives()
            }
            Pass::Priorities => self.verify_priorities(),
            Pass::References => self.verify_references(),
            Pass::Assignability => self.verify_assignability(),
            Pass::Root if self.grammar.has_tree() => self.verify_roots(),
            Pass::Root => Ok(()),
            Pass::Order => self.verify_order(),
        }
    }

    fn context(&self) -> ResolutionContext<'g> {
        ResolutionContext::new(self.grammar)
    }

    fn types(&self) -> TypeContext<'_> {
        TypeContext::new(self.grammar, &self.transformations)
    }
}
