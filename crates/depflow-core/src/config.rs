//! Propagation settings

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Order in which the solver relaxes flow graph edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// FIFO worklist of vertices whose snapshot changed; joins at every target
    #[default]
    Worklist,
    /// Revisit-on-change depth-first traversal started from every vertex.
    ///
    /// Only the second and later outgoing edges of a vertex merge into the
    /// target's existing snapshot, so results can depend on edge order.
    /// At a `Repeat` the edge into the loop body is the second edge of the
    /// loop entry, so the body never sees the pre-loop state and the
    /// loop's exit is overwritten with what the body produces from an empty
    /// state. Loop results therefore do not reflect zero-or-more iterations
    /// from the pre-loop state; use [`Strategy::Worklist`] for those.
    DepthFirst,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub strategy: Strategy,
    /// Maximum number of edge relaxations before giving up
    pub max_iterations: usize,
}

impl AnalysisConfig {
    pub const DEFAULT_MAX_ITERATIONS: usize = 100_000;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Parse a configuration from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Worklist,
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
        }
    }
}
