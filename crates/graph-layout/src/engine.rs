use crate::{NodeSizes, Point};
use std::collections::HashMap;
use std::hash::Hash;

/// A layout engine that can compute positions for graph nodes
///
/// This trait is generic over the graph type `G` so that an engine can state
/// its own graph requirements. Layouts never fail: malformed input (cycles,
/// dangling edges, disconnected nodes) is absorbed by the engine's own
/// fallback policies.
pub trait LayoutEngine<G> {
    /// The type used to identify nodes in the graph
    type NodeId: Copy + Eq + Hash;

    /// Compute the top-left position of every node in the graph
    fn layout<S>(&self, graph: G, sizes: &S) -> HashMap<Self::NodeId, Point>
    where
        S: NodeSizes<Self::NodeId>;
}
