//! Subcommand implementations

mod lint;
mod tree;

pub use lint::run_lint;
pub use tree::run_tree;
