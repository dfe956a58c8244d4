use super::LayoutGraph;
use std::collections::{HashMap, VecDeque};
use std::fmt::Debug;
use std::hash::Hash;
use tracing::trace;

/// How the nodes of the first layer are ordered
///
/// An optional pinned node is always seeded first, even when it has parents.
/// The remaining roots follow, sorted by their rank (usually their current
/// vertical position); unranked roots come last and ties keep node order.
#[derive(Debug, Clone)]
pub struct RootOrder<N>
where
    N: Copy + Eq + Hash,
{
    pinned: Option<N>,
    ranks: HashMap<N, f32>,
}

impl<N> Default for RootOrder<N>
where
    N: Copy + Eq + Hash,
{
    fn default() -> Self {
        Self {
            pinned: None,
            ranks: HashMap::new(),
        }
    }
}

impl<N> RootOrder<N>
where
    N: Copy + Eq + Hash,
{
    /// Roots in node order
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed `node` before every other root
    pub fn pinned(mut self, node: N) -> Self {
        self.pinned = Some(node);
        self
    }

    /// Rank roots by the given keys
    pub fn with_ranks(mut self, ranks: impl IntoIterator<Item = (N, f32)>) -> Self {
        self.ranks.extend(ranks);
        self
    }

    fn rank(&self, node: N) -> f32 {
        self.ranks.get(&node).copied().unwrap_or(f32::INFINITY)
    }
}

/// Pick the BFS seeds, in the order they enter the first layer
pub(crate) fn seed_roots<N>(graph: &LayoutGraph<N>, order: &RootOrder<N>) -> Vec<usize>
where
    N: Copy + Eq + Hash + Debug,
{
    let pinned = order.pinned.and_then(|node| graph.index_of(node));

    let mut roots: Vec<usize> = graph
        .root_indices()
        .filter(|&index| Some(index) != pinned)
        .collect();
    roots.sort_by(|&a, &b| {
        order
            .rank(graph.node(a))
            .total_cmp(&order.rank(graph.node(b)))
    });

    let mut seeds: Vec<usize> = pinned.into_iter().chain(roots).collect();

    // Headless graph, every node has a parent
    if seeds.is_empty() && !graph.is_empty() {
        trace!("No root found, seeding {:?}", graph.node(0));
        seeds.push(0);
    }

    seeds
}

/// Assign layers by breadth-first propagation from the seeds
///
/// The first layer a node receives is final: later visits, coming from a
/// cycle or from a longer path, are discarded. Propagation stops before
/// `max_depth`. Each layer lists its nodes in assignment order.
///
/// Nodes that were never reached land in the first layer after the seeds,
/// in node order. The root ranks do not apply to them: they sit on cycles
/// without an entry point or past the depth ceiling, and have no roots of
/// their own to be ranked against.
pub(crate) fn assign_layers<N>(
    graph: &LayoutGraph<N>,
    seeds: &[usize],
    max_depth: usize,
) -> Vec<Vec<usize>>
where
    N: Copy + Eq + Hash + Debug,
{
    let mut layer_of: Vec<Option<usize>> = vec![None; graph.len()];
    let mut assigned = Vec::with_capacity(graph.len());
    let mut queue: VecDeque<(usize, usize)> = seeds.iter().map(|&seed| (seed, 0)).collect();

    while let Some((node, layer)) = queue.pop_front() {
        if layer_of[node].is_some() {
            continue;
        }
        layer_of[node] = Some(layer);
        assigned.push(node);

        let next = layer + 1;
        if next >= max_depth {
            trace!("Depth ceiling reached at {:?}", graph.node(node));
            continue;
        }
        queue.extend(
            graph
                .successor_indices(node)
                .iter()
                .filter(|&&succ| layer_of[succ].is_none())
                .map(|&succ| (succ, next)),
        );
    }

    // Disconnected from every seed
    for node in 0..graph.len() {
        if layer_of[node].is_none() {
            trace!("{:?} is unreachable, placing it in the first layer", graph.node(node));
            layer_of[node] = Some(0);
            assigned.push(node);
        }
    }

    let depth = layer_of.iter().flatten().copied().max().map_or(0, |max| max + 1);
    let mut layers = vec![Vec::new(); depth];
    for node in assigned {
        if let Some(layer) = layer_of[node] {
            layers[layer].push(node);
        }
    }

    layers
}
