//! Analysis modules.
//!
//! Post-processing that combines the output of several report functions.

pub mod aggregator;

pub use aggregator::*;
