mod crossings;
mod graph;
mod layers;
mod positions;

use crate::{LayoutConfig, LayoutEngine, NodeSizes, Point};
use petgraph::visit::{GraphBase, IntoNeighborsDirected, IntoNodeIdentifiers};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use tracing::debug;

use crossings::minimize_crossings;
use layers::{assign_layers, seed_roots};
use positions::assign_coordinates;

pub use graph::LayoutGraph;
pub use layers::RootOrder;

/// Layered left-to-right layout
///
/// Nodes are layered by breadth-first propagation from the roots, each layer
/// is ordered with a single barycenter sweep, and layers become columns in
/// which nodes are packed vertically around their parents.
#[derive(Debug, Clone, Default)]
pub struct LayeredLayout {
    pub config: LayoutConfig,
}

impl LayeredLayout {
    /// Create a new layered layout with the given spacing
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }
}

/// Layer structure that can be cached and reused
#[derive(Debug, Clone)]
pub struct Layers<N>
where
    N: Copy + Eq + Hash + Debug,
{
    graph: LayoutGraph<N>,

    /// Node indices organized into ordered layers
    indices: Vec<Vec<usize>>,

    /// Number of edge crossings between adjacent layers (quality metric)
    pub crossings: usize,
}

impl<N> Layers<N>
where
    N: Copy + Eq + Hash + Debug,
{
    /// Number of layers
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Nodes of every layer, in their final order
    pub fn nodes(&self) -> Vec<Vec<N>> {
        self.indices
            .iter()
            .map(|layer| layer.iter().map(|&index| self.graph.node(index)).collect())
            .collect()
    }

    /// Layer index of a node
    pub fn layer_of(&self, node: N) -> Option<usize> {
        let index = self.graph.index_of(node)?;
        self.indices.iter().position(|layer| layer.contains(&index))
    }
}

impl LayeredLayout {
    /// Compute layer structure
    ///
    /// This phase assigns nodes to layers and orders every layer. It only
    /// depends on the graph structure, not on node sizes, so the result can
    /// be kept while sizes change.
    pub fn compute_layers<N>(&self, graph: LayoutGraph<N>, order: &RootOrder<N>) -> Layers<N>
    where
        N: Copy + Eq + Hash + Debug,
    {
        let seeds = seed_roots(&graph, order);
        let layers = assign_layers(&graph, &seeds, self.config.max_depth);
        let (indices, crossings) = minimize_crossings(&graph, layers);

        debug!(
            "Placed {} nodes in {} layers with {crossings} crossings",
            graph.len(),
            indices.len()
        );

        Layers {
            graph,
            indices,
            crossings,
        }
    }

    /// Compute positions from cached layers (cheap, rerun when sizes change)
    pub fn compute_positions<N, S>(&self, layers: &Layers<N>, sizes: &S) -> HashMap<N, Point>
    where
        N: Copy + Eq + Hash + Debug,
        S: NodeSizes<N>,
    {
        assign_coordinates(&layers.graph, &layers.indices, sizes, &self.config)
    }
}

// Implement LayoutEngine for any graph with the required capabilities
impl<G> LayoutEngine<G> for LayeredLayout
where
    G: IntoNodeIdentifiers + IntoNeighborsDirected,
    G::NodeId: Copy + Eq + Hash + Debug,
{
    type NodeId = <G as GraphBase>::NodeId;

    fn layout<S>(&self, graph: G, sizes: &S) -> HashMap<Self::NodeId, Point>
    where
        S: NodeSizes<Self::NodeId>,
    {
        let layers = self.compute_layers(LayoutGraph::from_graph(graph), &RootOrder::new());
        self.compute_positions(&layers, sizes)
    }
}
