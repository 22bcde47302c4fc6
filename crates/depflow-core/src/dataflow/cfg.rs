//! Control flow graph construction from statement trees

use super::dependencies::Dependencies;
use crate::ast::{Primitive, Statement};
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use std::fmt;
use tracing::debug;

/// Identifier of a vertex in a [`FlowGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) NodeIndex);

impl NodeId {
    pub fn index(self) -> usize {
        self.0.index()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0.index())
    }
}

/// A program point. Holds the current estimate of the dependency state when
/// control reaches it; `None` until propagation first reaches the node.
#[derive(Debug, Clone, Default)]
pub struct ControlFlowNode {
    pub(crate) snapshot: Option<Dependencies>,
}

impl ControlFlowNode {
    pub fn snapshot(&self) -> Option<&Dependencies> {
        self.snapshot.as_ref()
    }
}

/// Control flow graph for a statement tree.
///
/// Edges carry the primitive statement executed when control moves along
/// them. There is one entry and one exit vertex.
#[derive(Debug)]
pub struct FlowGraph {
    pub(crate) graph: DiGraph<ControlFlowNode, Primitive>,
    pub(crate) entry: NodeId,
    pub(crate) exit: NodeId,
}

impl FlowGraph {
    /// Lower `body` into a fresh graph
    pub fn build(body: &Statement) -> FlowGraph {
        FlowGraphBuilder::new().build(body)
    }

    pub fn entry(&self) -> NodeId {
        self.entry
    }

    pub fn exit(&self) -> NodeId {
        self.exit
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// All vertices in creation order
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.graph.node_indices().map(NodeId)
    }

    /// Outgoing edges of `node` in insertion order.
    ///
    /// petgraph lists adjacent edges newest first; edge indices grow with
    /// insertion, so sorting by index restores the construction order.
    pub fn successors(&self, node: NodeId) -> Vec<(NodeId, &Primitive)> {
        self.out_edges(node)
            .into_iter()
            .map(|(target, edge)| (target, &self.graph[edge]))
            .collect()
    }

    pub(crate) fn out_edges(&self, node: NodeId) -> Vec<(NodeId, EdgeIndex)> {
        let mut edges: Vec<_> = self
            .graph
            .edges(node.0)
            .map(|e| (NodeId(e.target()), e.id()))
            .collect();
        edges.sort_by_key(|&(_, id)| id);
        edges
    }

    /// Current dependency estimate at `node`
    pub fn snapshot(&self, node: NodeId) -> Option<&Dependencies> {
        self.graph[node.0].snapshot()
    }

    pub(crate) fn set_snapshot(&mut self, node: NodeId, deps: Dependencies) {
        self.graph[node.0].snapshot = Some(deps);
    }

    pub(crate) fn reset_snapshots(&mut self) {
        for node in self.graph.node_weights_mut() {
            node.snapshot = None;
        }
    }
}

/// Lists the entry/exit pair followed by every edge, one per line
impl fmt::Display for FlowGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Entry = {} Exit = {}", self.entry, self.exit)?;
        for node in self.nodes() {
            for (target, stmt) in self.successors(node) {
                writeln!(f, "  {node} -> {target} {stmt} ")?;
            }
        }
        Ok(())
    }
}

/// Builder lowering a [`Statement`] into a [`FlowGraph`]
pub struct FlowGraphBuilder {
    graph: DiGraph<ControlFlowNode, Primitive>,
}

impl FlowGraphBuilder {
    pub fn new() -> Self {
        Self { graph: DiGraph::new() }
    }

    pub fn build(mut self, body: &Statement) -> FlowGraph {
        let entry = self.new_vertex();
        let exit = self.new_vertex();
        self.build_statement(entry, exit, body);

        debug!(
            "Built flow graph with {} vertices and {} edges",
            self.graph.node_count(),
            self.graph.edge_count()
        );

        FlowGraph {
            graph: self.graph,
            entry,
            exit,
        }
    }

    fn new_vertex(&mut self) -> NodeId {
        NodeId(self.graph.add_node(ControlFlowNode::default()))
    }

    fn build_statement(&mut self, entry: NodeId, exit: NodeId, stmt: &Statement) {
        match stmt {
            Statement::Primitive(primitive) => self.build_primitive(entry, exit, primitive.clone()),
            Statement::Compound(stmts) => self.build_compound(entry, exit, stmts),
            Statement::Select(alternatives) => self.build_select(entry, exit, alternatives),
            Statement::Repeat(body) => self.build_repeat(entry, exit, body),
        }
    }

    fn build_primitive(&mut self, entry: NodeId, exit: NodeId, stmt: Primitive) {
        self.graph.add_edge(entry.0, exit.0, stmt);
    }

    fn build_compound(&mut self, entry: NodeId, exit: NodeId, stmts: &[Statement]) {
        let Some((last_stmt, init)) = stmts.split_last() else {
            // Empty sequence does nothing
            self.build_primitive(entry, exit, Primitive::Null);
            return;
        };

        let mut last = entry;
        for stmt in init {
            let next = self.new_vertex();
            self.build_statement(last, next, stmt);
            last = next;
        }
        self.build_statement(last, exit, last_stmt);
    }

    fn build_select(&mut self, entry: NodeId, exit: NodeId, alternatives: &[Statement]) {
        if alternatives.is_empty() {
            // Keep exit reachable
            self.build_primitive(entry, exit, Primitive::Null);
            return;
        }
        for alternative in alternatives {
            self.build_statement(entry, exit, alternative);
        }
    }

    /// Zero or more iterations of `body`
    fn build_repeat(&mut self, entry: NodeId, exit: NodeId, body: &Statement) {
        self.build_primitive(entry, exit, Primitive::Null);

        let enter_body = self.new_vertex();
        self.build_primitive(entry, enter_body, Primitive::Null);

        let exit_body = self.new_vertex();
        self.build_primitive(exit_body, exit, Primitive::Null);
        self.build_primitive(exit_body, enter_body, Primitive::Null);

        self.build_statement(enter_body, exit_body, body);
    }
}

impl Default for FlowGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
