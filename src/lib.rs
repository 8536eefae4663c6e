pub mod error;
pub mod graph;
pub mod traversal;

pub mod residual;
pub mod edmonds_karp;
pub mod push_relabel;
pub mod max_flow;

pub mod hungarian;
pub mod matching;

pub mod ordering;
pub mod shortest_path;

pub mod parser;

pub use error::{GraphError, Result};
