//! Variable dependency analysis
//!
//! This module implements the dataflow side of the crate:
//! - Dependency sets and per-program-point dependency states
//! - Control Flow Graph construction from statement trees
//! - Transfer function for primitive statements
//! - Worklist-based fixpoint propagation

mod cfg;
mod depend_set;
mod dependencies;
mod solver;
mod transfer;

pub use cfg::{ControlFlowNode, FlowGraph, FlowGraphBuilder, NodeId};
pub use depend_set::DependSet;
pub use dependencies::Dependencies;
pub use solver::FixpointResult;
