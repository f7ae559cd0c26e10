//! Sable compiler: semantic analysis of SableCC grammars.
//!
//! This crate checks a parsed grammar and computes its transformations:
//! - `ast` - grammar AST as handed over by the front-end
//! - `grammar` - grammar model, namespaces and name resolution
//! - `transformation` - transformation model and element typing
//! - `analyze` - the analysis pipeline (synthesis and verification passes)
//! - `diagnostics` - error rendering
//!
//! # Example
//!
//! ```
//! use sable_compiler::ast::build::name;
//! use sable_compiler::ast::{ElementAst, GrammarAst, ProductionAst, AlternativeAst};
//! use sable_compiler::{Config, analyze};
//!
//! let grammar = GrammarAst::new()
//!     .token("num")
//!     .production(ProductionAst::new("exp").alternative(AlternativeAst::new([
//!         ElementAst::normal(name("num")),
//!     ])));
//!
//! let analysis = analyze(&grammar, &Config::default()).expect("valid grammar");
//! assert!(analysis.is_complete());
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod analyze;
pub mod ast;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod grammar;
pub mod transformation;

mod invariants;

#[cfg(test)]
mod test_utils;

pub use analyze::{Analysis, Pass};
pub use ast::{GrammarAst, InputError};
pub use config::Config;
pub use diagnostics::{Diagnostics, DiagnosticsPrinter};
pub use error::SemanticError;

/// Errors that can occur while analyzing a grammar.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("grammar analysis failed: {0}")]
    Semantic(#[from] SemanticError),
}

/// Result type for grammar analysis.
pub type Result<T> = std::result::Result<T, Error>;

/// Analyze a grammar, stopping at the first semantic error.
pub fn analyze(ast: &GrammarAst, config: &Config) -> Result<Analysis> {
    let _span = tracing::info_span!("analyze").entered();
    Ok(analyze::run(ast, config)?)
}

/// Analyze a grammar given in its JSON form.
pub fn analyze_json(json: &str, config: &Config) -> Result<Analysis> {
    let ast = GrammarAst::from_json(json)?;
    analyze(&ast, config)
}

/// Render an analysis failure against the grammar source.
///
/// Input errors have no location and render as their message.
pub fn render_error(error: &Error, source: &str, config: &Config) -> String {
    match error {
        Error::Input(error) => error.to_string(),
        Error::Semantic(error) => Diagnostics::from(error)
            .printer()
            .source(source)
            .colored(config.colored)
            .render(),
    }
}
