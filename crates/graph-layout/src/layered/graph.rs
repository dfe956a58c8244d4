use indexmap::IndexSet;
use petgraph::visit::{GraphBase, IntoNeighborsDirected, IntoNodeIdentifiers};
use petgraph::Direction;
use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;
use tracing::{debug, trace};

/// Adjacency view of a directed graph, in the order nodes were given
///
/// Nodes are interned to dense indices so that every stage of the layout can
/// work on plain vectors. Every node has an entry in the successor, the
/// predecessor and the in-degree tables, even when it has no edge at all.
#[derive(Debug, Clone)]
pub struct LayoutGraph<N>
where
    N: Copy + Eq + Hash + Debug,
{
    nodes: IndexSet<N>,

    /// Forward targets in edge order, not deduplicated
    successors: Vec<Vec<usize>>,

    /// Distinct sources, in the order their first edge was added
    predecessors: Vec<Vec<usize>>,

    /// Distinct `(source, target)` pairs already counted
    pairs: HashSet<(usize, usize)>,
}

impl<N> Default for LayoutGraph<N>
where
    N: Copy + Eq + Hash + Debug,
{
    fn default() -> Self {
        Self {
            nodes: IndexSet::new(),
            successors: Vec::new(),
            predecessors: Vec::new(),
            pairs: HashSet::new(),
        }
    }
}

impl<N> LayoutGraph<N>
where
    N: Copy + Eq + Hash + Debug,
{
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from a node list and an edge list
    ///
    /// Edges referencing a node that is not in `nodes` are ignored.
    pub fn from_edges<I, E>(nodes: I, edges: E) -> Self
    where
        I: IntoIterator<Item = N>,
        E: IntoIterator<Item = (N, N)>,
    {
        let mut graph = Self::new();
        for node in nodes {
            graph.add_node(node);
        }
        for (source, target) in edges {
            graph.add_edge(source, target);
        }
        graph
    }

    /// Build a graph from anything implementing petgraph's visitor traits
    ///
    /// Successors are recorded in the order the graph yields its neighbors.
    pub fn from_graph<G>(graph: G) -> Self
    where
        G: IntoNodeIdentifiers + IntoNeighborsDirected + GraphBase<NodeId = N>,
    {
        let mut layout_graph = Self::new();
        for node in graph.node_identifiers() {
            layout_graph.add_node(node);
        }
        for node in graph.node_identifiers() {
            for succ in graph.neighbors_directed(node, Direction::Outgoing) {
                layout_graph.add_edge(node, succ);
            }
        }
        layout_graph
    }

    /// Add a node, returning its index
    ///
    /// Ids are expected to be unique. A repeated id is collapsed into its
    /// first occurrence, so both copies end up sharing one position.
    pub fn add_node(&mut self, node: N) -> usize {
        let (index, inserted) = self.nodes.insert_full(node);
        if inserted {
            self.successors.push(Vec::new());
            self.predecessors.push(Vec::new());
        } else {
            debug!("Duplicate node {node:?}, merged with its first occurrence");
        }
        index
    }

    /// Add an edge between two known nodes
    ///
    /// Returns `false` and leaves the graph untouched when either endpoint is
    /// unknown.
    pub fn add_edge(&mut self, source: N, target: N) -> bool {
        let (Some(from), Some(to)) = (self.index_of(source), self.index_of(target)) else {
            trace!("Ignoring edge {source:?} -> {target:?} with an unknown endpoint");
            return false;
        };

        self.successors[from].push(to);
        if self.pairs.insert((from, to)) {
            self.predecessors[to].push(from);
        }
        true
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = N> + '_ {
        self.nodes.iter().copied()
    }

    pub fn contains(&self, node: N) -> bool {
        self.nodes.contains(&node)
    }

    /// Forward neighbors of a node, one entry per edge
    pub fn successors(&self, node: N) -> impl Iterator<Item = N> + '_ {
        self.index_of(node)
            .into_iter()
            .flat_map(|index| self.successors[index].iter())
            .map(|&index| self.node(index))
    }

    /// Distinct parents of a node
    pub fn predecessors(&self, node: N) -> impl Iterator<Item = N> + '_ {
        self.index_of(node)
            .into_iter()
            .flat_map(|index| self.predecessors[index].iter())
            .map(|&index| self.node(index))
    }

    /// Number of distinct parents of a node, zero for unknown nodes
    pub fn in_degree(&self, node: N) -> usize {
        self.index_of(node).map_or(0, |index| self.predecessors[index].len())
    }

    /// Nodes without any incoming edge, in insertion order
    pub fn roots(&self) -> impl Iterator<Item = N> + '_ {
        self.root_indices().map(|index| self.node(index))
    }

    /// Nodes without any outgoing edge, in insertion order
    pub fn leaves(&self) -> impl Iterator<Item = N> + '_ {
        (0..self.len())
            .filter(|&index| self.successors[index].is_empty())
            .map(|index| self.node(index))
    }

    pub(crate) fn index_of(&self, node: N) -> Option<usize> {
        self.nodes.get_index_of(&node)
    }

    pub(crate) fn node(&self, index: usize) -> N {
        self.nodes[index]
    }

    pub(crate) fn successor_indices(&self, index: usize) -> &[usize] {
        &self.successors[index]
    }

    pub(crate) fn predecessor_indices(&self, index: usize) -> &[usize] {
        &self.predecessors[index]
    }

    pub(crate) fn root_indices(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len()).filter(|&index| self.predecessors[index].is_empty())
    }
}
