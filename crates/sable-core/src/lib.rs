#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core value types for the SableCC semantic core.
//!
//! Two layers:
//! - **Cardinality**: occurrence intervals attached to every grammar element
//! - **Types**: the element type algebra used to decide assignability of
//!   transformation elements to their tree counterparts

pub mod cardinality;
pub mod types;

#[cfg(test)]
mod cardinality_tests;

pub use cardinality::{Bound, CardinalityInterval};
pub use types::Type;
