//! # Depflow Core
//!
//! Variable dependency analysis for a small structured language made of
//! assignments, sequences, non-deterministic selection and repetition.
//!
//! ## Modules
//!
//! - **[`ast`]** - Statement tree consumed by the analysis
//! - **[`dataflow`]** - Dependency sets, flow graph construction and the fixpoint solver
//! - **[`config`]** - Propagation strategy and iteration budget
//! - **[`error`]** - Error type for configurable propagation runs
//!
//! ## Quick Start
//!
//! ```rust
//! use depflow_core::ast::Statement;
//! use depflow_core::dataflow::{DependSet, Dependencies, FlowGraph};
//!
//! let program = Statement::compound(vec![
//!     Statement::assign("x", ["a"]),
//!     Statement::assign("y", ["x"]),
//! ]);
//!
//! let mut entry = Dependencies::new();
//! entry.put("a", DependSet::singleton("p"));
//!
//! let mut graph = FlowGraph::build(&program);
//! let exit = graph.propagate(&entry);
//! assert_eq!(exit.to_string(), "{ (a,[p]), (x,[p]), (y,[p]) }");
//! ```

pub mod ast;
pub mod config;
pub mod dataflow;
pub mod error;

pub use config::{AnalysisConfig, Strategy};
pub use error::{AnalysisError, Result};
