//! Test infrastructure for the OpenDDL parser
//!
//! Provides fixture loading, stochastic test generation, and tree dumps.

#![allow(dead_code)]

mod loader;
mod harness;
mod generators;

pub use loader::{TestCase, load_fixtures_by_name};
pub use harness::{dump_tree, error_name, run_test, run_with_variations};
pub use generators::Gen;
