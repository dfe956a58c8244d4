use super::LayoutGraph;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Reorder every layer after the first by the barycenter of its parents
///
/// This is a single forward sweep: layer `l` is sorted once, against the
/// final order of layer `l - 1`, and is never revisited. The first layer
/// keeps its seeding order. A node's score is the mean index of its parents
/// lying in the previous layer; nodes without such a parent are pushed to
/// the end. The sort is stable so ties keep their relative order.
///
/// Returns the reordered layers along with the number of edge crossings
/// between adjacent layers.
pub(crate) fn minimize_crossings<N>(
    graph: &LayoutGraph<N>,
    mut layers: Vec<Vec<usize>>,
) -> (Vec<Vec<usize>>, usize)
where
    N: Copy + Eq + Hash + Debug,
{
    for layer_index in 1..layers.len() {
        let (done, rest) = layers.split_at_mut(layer_index);
        let previous = slots(&done[layer_index - 1]);
        let layer = &mut rest[0];

        let scores: HashMap<usize, f32> = layer
            .iter()
            .map(|&node| (node, barycenter(graph, node, &previous)))
            .collect();
        layer.sort_by(|a, b| scores[a].total_cmp(&scores[b]));
    }

    let crossings = count_crossings(graph, &layers);
    (layers, crossings)
}

/// Index of each node within its layer
fn slots(layer: &[usize]) -> HashMap<usize, usize> {
    layer
        .iter()
        .enumerate()
        .map(|(slot, &node)| (node, slot))
        .collect()
}

/// Mean slot of the parents found in `previous`, or infinity if none
fn barycenter<N>(graph: &LayoutGraph<N>, node: usize, previous: &HashMap<usize, usize>) -> f32
where
    N: Copy + Eq + Hash + Debug,
{
    let (sum, count) = graph
        .predecessor_indices(node)
        .iter()
        .filter_map(|parent| previous.get(parent))
        .fold((0.0, 0usize), |(sum, count), &slot| (sum + slot as f32, count + 1));

    if count > 0 {
        sum / count as f32
    } else {
        f32::INFINITY
    }
}

/// Count the number of edge crossings between adjacent layers
///
/// Two edges `(u1, v1)` and `(u2, v2)` between the same pair of layers cross
/// when their endpoints are in opposite order. Each distinct edge is counted
/// once.
pub(crate) fn count_crossings<N>(graph: &LayoutGraph<N>, layers: &[Vec<usize>]) -> usize
where
    N: Copy + Eq + Hash + Debug,
{
    let mut crossings = 0;

    for pair in layers.windows(2) {
        let upper = slots(&pair[0]);

        let segments: Vec<(usize, usize)> = pair[1]
            .iter()
            .enumerate()
            .flat_map(|(lower_slot, &node)| {
                graph
                    .predecessor_indices(node)
                    .iter()
                    .filter_map(|parent| upper.get(parent))
                    .map(move |&upper_slot| (upper_slot, lower_slot))
            })
            .collect();

        for (i, &(u1, v1)) in segments.iter().enumerate() {
            for &(u2, v2) in &segments[i + 1..] {
                if (u1 < u2 && v1 > v2) || (u1 > u2 && v1 < v2) {
                    crossings += 1;
                }
            }
        }
    }

    crossings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layered::layers::{assign_layers, seed_roots};
    use crate::RootOrder;
    use test_log::test;

    fn ordered<N>(graph: &LayoutGraph<N>, order: &RootOrder<N>) -> (Vec<Vec<N>>, usize)
    where
        N: Copy + Eq + Hash + Debug,
    {
        let seeds = seed_roots(graph, order);
        let layers = assign_layers(graph, &seeds, 50);
        let (layers, crossings) = minimize_crossings(graph, layers);
        let layers = layers
            .into_iter()
            .map(|layer| layer.into_iter().map(|index| graph.node(index)).collect())
            .collect();
        (layers, crossings)
    }

    #[test]
    fn untangles_crossed_children() {
        // x is discovered first through a, but its parents average to 0.5
        // while y only hangs below a
        let graph = LayoutGraph::from_edges(
            ["a", "b", "x", "y"],
            [("a", "x"), ("a", "y"), ("b", "x")],
        );
        let discovered = vec![vec![0, 1], vec![2, 3]];
        assert_eq!(count_crossings(&graph, &discovered), 1);

        let (layers, crossings) = ordered(&graph, &RootOrder::new());
        assert_eq!(layers, vec![vec!["a", "b"], vec!["y", "x"]]);
        assert_eq!(crossings, 0);
    }

    #[test]
    fn averages_parent_slots() {
        // m has parents in slots 1 and 2, n only in slot 1
        let graph = LayoutGraph::from_edges(
            ["p0", "p1", "p2", "m", "n"],
            [("p1", "m"), ("p1", "n"), ("p2", "m")],
        );
        let (layers, _) = ordered(&graph, &RootOrder::new());
        assert_eq!(layers[1], ["n", "m"]);
    }

    #[test]
    fn ties_keep_discovery_order() {
        let graph = LayoutGraph::from_edges(
            ["r", "c", "b", "d"],
            [("r", "c"), ("r", "b"), ("b", "c"), ("r", "d")],
        );
        let (layers, _) = ordered(&graph, &RootOrder::new());
        assert_eq!(layers[1], ["c", "b", "d"]);
    }

    #[test]
    fn parentless_nodes_are_pushed_to_the_end() {
        let graph = LayoutGraph::from_edges(
            ["r", "a", "stray", "b"],
            [("r", "a"), ("r", "b")],
        );
        // stray was placed in the second layer by hand, it has no parent there
        let layers = vec![vec![0], vec![1, 2, 3]];
        let (layers, _) = minimize_crossings(&graph, layers);
        assert_eq!(layers[1], [1, 3, 2]);
    }

    #[test]
    fn first_layer_is_never_reordered() {
        // The second layer follows the roots, not the other way around
        let graph = LayoutGraph::from_edges(["a", "b", "x", "y"], [("b", "x"), ("a", "y")]);
        let (layers, _) = ordered(&graph, &RootOrder::new());
        assert_eq!(layers, vec![vec!["a", "b"], vec!["y", "x"]]);
    }

    #[test]
    fn counts_crossings_per_distinct_edge() {
        let graph = LayoutGraph::from_edges(
            [0, 1, 2, 3],
            [(0, 3), (0, 3), (1, 2)],
        );
        assert_eq!(count_crossings(&graph, &[vec![0, 1], vec![2, 3]]), 1);
    }
}
