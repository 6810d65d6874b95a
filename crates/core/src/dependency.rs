use crate::error::{Result, ScorecardError};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::Serialize;

/// Result of [`DependencyGraph::add_edge`]; both are successful outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeOutcome {
    Created,
    AlreadyExisted,
}

/// Directed "may affect" relation over an insertion-ordered name table.
///
/// Node weights are the names; a node's petgraph index is its position in
/// the table. Nodes are never removed, so indices stay stable.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    graph: DiGraph<String, ()>,
    capacity: usize,
}

impl DependencyGraph {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            graph: DiGraph::with_capacity(capacity, 0),
            capacity,
        }
    }

    /// Case-insensitive linear scan of the name table
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.graph
            .node_indices()
            .find(|&idx| self.graph[idx].eq_ignore_ascii_case(name))
            .map(NodeIndex::index)
    }

    /// Append `name` to the table unless a case-insensitive match exists.
    ///
    /// Returns the stable index and whether it was newly appended. A full
    /// table yields [`ScorecardError::CapacityExceeded`] and nothing changes.
    pub fn ensure_name(&mut self, name: &str) -> Result<(usize, bool)> {
        if let Some(idx) = self.index_of(name) {
            return Ok((idx, false));
        }
        if self.graph.node_count() >= self.capacity {
            return Err(ScorecardError::CapacityExceeded {
                limit: self.capacity,
            });
        }
        let idx = self.graph.add_node(name.to_string());
        Ok((idx.index(), true))
    }

    /// Set edge `from -> to`; idempotent
    pub fn add_edge(&mut self, from: usize, to: usize) -> Result<EdgeOutcome> {
        let (a, b) = (self.node(from)?, self.node(to)?);
        if self.graph.find_edge(a, b).is_some() {
            return Ok(EdgeOutcome::AlreadyExisted);
        }
        self.graph.add_edge(a, b, ());
        Ok(EdgeOutcome::Created)
    }

    /// Targets of edges leaving `index`, ascending
    pub fn neighbors(&self, index: usize) -> Vec<usize> {
        let Ok(node) = self.node(index) else {
            return Vec::new();
        };
        let mut out: Vec<usize> = self
            .graph
            .edges(node)
            .map(|e| e.target().index())
            .collect();
        out.sort_unstable();
        out
    }

    /// Every edge as `(from, to)`, ordered by `from` then `to`
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let mut out: Vec<(usize, usize)> = self
            .graph
            .edge_references()
            .map(|e| (e.source().index(), e.target().index()))
            .collect();
        out.sort_unstable();
        out
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.graph
            .node_weight(NodeIndex::new(index))
            .map(String::as_str)
    }

    /// Name table in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.graph
            .node_indices()
            .map(move |idx| self.graph[idx].as_str())
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn clear(&mut self) {
        self.graph.clear();
    }

    fn node(&self, index: usize) -> Result<NodeIndex> {
        if index < self.graph.node_count() {
            Ok(NodeIndex::new(index))
        } else {
            Err(ScorecardError::NotFound(format!("index {index}")))
        }
    }
}
