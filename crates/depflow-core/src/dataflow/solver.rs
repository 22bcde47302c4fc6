//! Fixpoint propagation of dependency states over a flow graph

use super::cfg::{FlowGraph, NodeId};
use super::dependencies::Dependencies;
use crate::config::{AnalysisConfig, Strategy};
use crate::error::{AnalysisError, Result};
use petgraph::graph::EdgeIndex;
use std::collections::{HashSet, VecDeque};
use tracing::{debug, trace, warn};

/// Result of a propagation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixpointResult {
    /// Dependency state at the exit vertex
    pub exit: Dependencies,
    /// Number of edge relaxations performed
    pub iterations: usize,
}

impl FlowGraph {
    /// Propagate `entry` through the graph and return the state at exit.
    ///
    /// Uses the worklist solver, which always converges, so no iteration
    /// budget applies. Node snapshots from earlier runs are discarded.
    pub fn propagate(&mut self, entry: &Dependencies) -> Dependencies {
        match FixpointSolver::new(self, None).solve_worklist(entry) {
            Ok(iterations) => debug!("Dependency propagation converged after {} iterations", iterations),
            Err(_) => unreachable!("worklist propagation without a budget cannot exceed it"),
        }
        self.exit_snapshot()
    }

    /// Propagate `entry` using the strategy and budget from `config`
    pub fn propagate_with(&mut self, entry: &Dependencies, config: &AnalysisConfig) -> Result<FixpointResult> {
        let mut solver = FixpointSolver::new(self, Some(config.max_iterations));
        let iterations = match config.strategy {
            Strategy::Worklist => solver.solve_worklist(entry)?,
            Strategy::DepthFirst => solver.solve_depth_first(entry)?,
        };
        debug!(
            "Dependency propagation ({:?}) converged after {} iterations",
            config.strategy, iterations
        );

        Ok(FixpointResult {
            exit: self.exit_snapshot(),
            iterations,
        })
    }

    fn exit_snapshot(&self) -> Dependencies {
        self.snapshot(self.exit).cloned().unwrap_or_default()
    }
}

/// Drives one propagation run over a graph it borrows mutably
struct FixpointSolver<'g> {
    graph: &'g mut FlowGraph,
    limit: Option<usize>,
    iterations: usize,
}

impl<'g> FixpointSolver<'g> {
    fn new(graph: &'g mut FlowGraph, limit: Option<usize>) -> Self {
        Self {
            graph,
            limit,
            iterations: 0,
        }
    }

    fn seed(&mut self, entry: &Dependencies) {
        self.graph.reset_snapshots();
        let entry_node = self.graph.entry();
        self.graph.set_snapshot(entry_node, entry.copy());
    }

    /// Count one edge relaxation against the budget
    fn step(&mut self) -> Result<()> {
        self.iterations += 1;
        match self.limit {
            Some(limit) if self.iterations > limit => {
                warn!("Dependency propagation exceeded {} iterations", limit);
                Err(AnalysisError::IterationLimit { limit })
            }
            _ => Ok(()),
        }
    }

    /// FIFO worklist; each target joins the contribution of every incoming edge
    fn solve_worklist(&mut self, entry: &Dependencies) -> Result<usize> {
        self.seed(entry);

        let mut worklist: VecDeque<NodeId> = VecDeque::from([self.graph.entry()]);
        let mut in_worklist: HashSet<NodeId> = worklist.iter().copied().collect();

        while let Some(u) = worklist.pop_front() {
            in_worklist.remove(&u);
            let state = self.graph.snapshot(u).cloned().unwrap_or_default();

            for (v, edge) in self.graph.out_edges(u) {
                self.step()?;
                let contribution = self.graph.graph[edge].calculate_dependencies(&state);
                let new_state = match self.graph.snapshot(v) {
                    Some(prev) => {
                        let joined = prev.merge(&contribution);
                        if joined == *prev {
                            continue;
                        }
                        joined
                    }
                    None => contribution,
                };
                trace!("{} -> {}: {}", u, v, new_state);

                self.graph.set_snapshot(v, new_state);
                if in_worklist.insert(v) {
                    worklist.push_back(v);
                }
            }
        }

        Ok(self.iterations)
    }

    /// Revisit-on-change depth-first traversal started from every vertex.
    ///
    /// The first outgoing edge of a vertex overwrites the target with the
    /// transfer of the source state; later outgoing edges apply the
    /// statement to the target's own state and join it with what was there.
    /// Convergence is not guaranteed, so the budget always applies.
    fn solve_depth_first(&mut self, entry: &Dependencies) -> Result<usize> {
        self.seed(entry);

        let nodes: Vec<NodeId> = self.graph.nodes().collect();
        for u in nodes {
            self.visit(u)?;
        }

        Ok(self.iterations)
    }

    /// Visit `start` and, depth first, every vertex whose snapshot changes.
    ///
    /// Each frame holds a vertex, its outgoing edges and the next edge to
    /// relax, so a changed target is finished before the source moves on.
    fn visit(&mut self, start: NodeId) -> Result<()> {
        let mut stack: Vec<(NodeId, Vec<(NodeId, EdgeIndex)>, usize)> =
            vec![(start, self.graph.out_edges(start), 0)];

        while let Some((u, edges, cursor)) = stack.last_mut() {
            let Some(&(v, edge)) = edges.get(*cursor) else {
                stack.pop();
                continue;
            };
            let links = *cursor;
            *cursor += 1;
            let u = *u;

            self.step()?;
            let prev = self.graph.snapshot(v).cloned().unwrap_or_default();
            let stmt = &self.graph.graph[edge];

            let new_state = if links == 0 {
                let state = self.graph.snapshot(u).cloned().unwrap_or_default();
                stmt.calculate_dependencies(&state)
            } else {
                prev.merge(&stmt.calculate_dependencies(&prev))
            };
            trace!("{} -> {}: {}", u, v, new_state);

            let changed = new_state != prev;
            self.graph.set_snapshot(v, new_state);
            if changed {
                stack.push((v, self.graph.out_edges(v), 0));
            }
        }
        Ok(())
    }
}
