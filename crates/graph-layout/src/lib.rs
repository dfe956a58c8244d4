//! Layered graph layout for script and outline boards
//!
//! This crate arranges a directed graph of sized nodes into left-to-right
//! columns. It is a pure computation: it reads nodes, edges and a size
//! lookup, and returns a fresh position for every node without touching the
//! caller's data.
//!
//! The layout runs in four forward stages:
//!
//! 1. [`LayoutGraph`] collects adjacency, parents and in-degrees.
//! 2. Layers are assigned breadth-first from the roots. Cycles, headless
//!    graphs and disconnected nodes are absorbed, never reported.
//! 3. Each layer after the first is sorted once by the barycenter of its
//!    parents.
//! 4. Layers become columns; nodes are packed top to bottom and pulled
//!    towards the center of their parents.
//!
//! # Example
//!
//! ```
//! use storyloom_layout::{LayeredLayout, LayoutConfig, LayoutEngine, Vec2};
//! use petgraph::graphmap::DiGraphMap;
//!
//! // Create a graph
//! let mut graph = DiGraphMap::new();
//! graph.add_edge(1, 2, ());
//! graph.add_edge(2, 3, ());
//!
//! // Create a layout engine
//! let engine = LayeredLayout::new(LayoutConfig::default());
//!
//! // Provide node sizes
//! let sizes = |_node: i32| Vec2::new(100.0, 50.0);
//!
//! // Use the LayoutEngine trait (simple, single-phase):
//! let positions = engine.layout(&graph, &sizes);
//! assert_eq!(positions.len(), 3);
//!
//! // Or call each step for better control
//! use storyloom_layout::{LayoutGraph, RootOrder};
//! let layers = engine.compute_layers(LayoutGraph::from_graph(&graph), &RootOrder::new());
//! let positions = engine.compute_positions(&layers, &sizes);
//! assert!(positions[&1].x < positions[&2].x);
//! ```

mod config;
mod engine;
mod geometry;
mod sizes;

pub mod layered;

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

// Re-export core types and traits
pub use config::{check_length, read_ron, ConfigError, LayoutConfig, DEFAULT_MAX_DEPTH};
pub use engine::LayoutEngine;
pub use geometry::{Point, Vec2};
pub use sizes::NodeSizes;

// Re-export petgraph visitor traits for graph abstraction
pub use petgraph::visit::{GraphBase, IntoNeighborsDirected, IntoNodeIdentifiers};

// Re-export layered layout types
pub use layered::{LayeredLayout, Layers, LayoutGraph, RootOrder};

/// Lay out a node list and an edge list in one call
///
/// Roots keep their node order. Edges whose endpoints are not in `nodes` are
/// ignored, and an empty node list yields an empty map.
pub fn compute_layout<N, S>(
    nodes: impl IntoIterator<Item = N>,
    edges: impl IntoIterator<Item = (N, N)>,
    sizes: &S,
    config: &LayoutConfig,
) -> HashMap<N, Point>
where
    N: Copy + Eq + Hash + Debug,
    S: NodeSizes<N>,
{
    let graph = LayoutGraph::from_edges(nodes, edges);
    if graph.is_empty() {
        return HashMap::new();
    }

    let engine = LayeredLayout::new(*config);
    let layers = engine.compute_layers(graph, &RootOrder::new());
    engine.compute_positions(&layers, sizes)
}
