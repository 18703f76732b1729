//! Comparative search pipeline
//!
//! Runs several strategies on one position and reports how much work each
//! saved against plain minimax.

pub mod comparison;

pub use comparison::{
    ComparisonConfig, ComparisonFramework, ComparisonReport, Contender, RunReport, reduction,
};
