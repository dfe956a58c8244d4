use super::LayoutGraph;
use crate::{LayoutConfig, NodeSizes, Point, Vec2};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Assign coordinates to nodes based on their layer structure and sizes
///
/// Every layer is a column at `origin.x + index * layer_spacing`. Within a
/// column nodes are placed top to bottom in layer order: each one is
/// centered on the vertical span of its parents in the previous column when
/// it has some, but never above the bottom of the node placed before it
/// plus `node_gap`.
pub(crate) fn assign_coordinates<N, S>(
    graph: &LayoutGraph<N>,
    layers: &[Vec<usize>],
    sizes: &S,
    config: &LayoutConfig,
) -> HashMap<N, Point>
where
    N: Copy + Eq + Hash + Debug,
    S: NodeSizes<N>,
{
    let node_sizes: Vec<Vec2> = (0..graph.len())
        .map(|index| sizes.size(graph.node(index)))
        .collect();

    let mut layer_of = vec![0; graph.len()];
    for (layer_index, layer) in layers.iter().enumerate() {
        for &node in layer {
            layer_of[node] = layer_index;
        }
    }

    let mut tops = vec![0.0; graph.len()];
    let mut positions = HashMap::with_capacity(graph.len());

    for (layer_index, layer) in layers.iter().enumerate() {
        let x = config.origin.x + layer_index as f32 * config.layer_spacing;
        let mut cursor = config.origin.y;

        for &node in layer {
            let height = node_sizes[node].y;

            let candidate = layer_index
                .checked_sub(1)
                .and_then(|previous| {
                    parent_span(graph, node, previous, &layer_of, &tops, &node_sizes)
                })
                .map_or(cursor, |(top, bottom)| (top + bottom) / 2.0 - height / 2.0);

            let y = cursor.max(candidate);
            tops[node] = y;
            positions.insert(graph.node(node), Point::new(x, y));

            cursor = y + height + config.node_gap;
        }
    }

    positions
}

/// Vertical extent covered by the parents of `node` lying in `previous`
fn parent_span<N>(
    graph: &LayoutGraph<N>,
    node: usize,
    previous: usize,
    layer_of: &[usize],
    tops: &[f32],
    sizes: &[Vec2],
) -> Option<(f32, f32)>
where
    N: Copy + Eq + Hash + Debug,
{
    graph
        .predecessor_indices(node)
        .iter()
        .filter(|&&parent| layer_of[parent] == previous)
        .map(|&parent| (tops[parent], tops[parent] + sizes[parent].y))
        .reduce(|(top, bottom), (parent_top, parent_bottom)| {
            (top.min(parent_top), bottom.max(parent_bottom))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn config() -> LayoutConfig {
        LayoutConfig {
            origin: Point::new(10.0, 20.0),
            layer_spacing: 100.0,
            node_gap: 5.0,
            ..Default::default()
        }
    }

    #[test]
    fn columns_follow_layers() {
        let graph = LayoutGraph::from_edges([0, 1, 2], [(0, 1), (1, 2)]);
        let sizes = |_: i32| Vec2::new(50.0, 10.0);

        let positions = assign_coordinates(&graph, &[vec![0], vec![1], vec![2]], &sizes, &config());

        assert_eq!(positions[&0].x, 10.0);
        assert_eq!(positions[&1].x, 110.0);
        assert_eq!(positions[&2].x, 210.0);
    }

    #[test]
    fn stacks_nodes_without_parents() {
        let graph = LayoutGraph::from_edges([0, 1, 2], Vec::<(i32, i32)>::new());
        let sizes = HashMap::from([(0, Vec2::new(10.0, 30.0)), (1, Vec2::new(10.0, 10.0))]);

        let positions = assign_coordinates(&graph, &[vec![0, 1, 2]], &sizes, &config());

        assert_eq!(positions[&0], Point::new(10.0, 20.0));
        assert_eq!(positions[&1], Point::new(10.0, 55.0));
        // Unknown sizes count as zero
        assert_eq!(positions[&2], Point::new(10.0, 70.0));
    }

    #[test]
    fn centers_on_parent_span() {
        // Two parents stacked from 20 to 75, the child is 15 tall
        let graph = LayoutGraph::from_edges([0, 1, 2], [(0, 2), (1, 2)]);
        let sizes = HashMap::from([
            (0, Vec2::new(10.0, 30.0)),
            (1, Vec2::new(10.0, 20.0)),
            (2, Vec2::new(10.0, 15.0)),
        ]);

        let positions = assign_coordinates(&graph, &[vec![0, 1], vec![2]], &sizes, &config());

        assert_eq!(positions[&1].y, 55.0);
        assert_eq!(positions[&2].y, (20.0 + 75.0) / 2.0 - 7.5);
    }

    #[test]
    fn centering_never_overlaps_previous_node() {
        // Both children want to be centered on the same small parent
        let graph = LayoutGraph::from_edges([0, 1, 2], [(0, 1), (0, 2)]);
        let sizes = |_: i32| Vec2::new(10.0, 40.0);

        let positions = assign_coordinates(&graph, &[vec![0], vec![1, 2]], &sizes, &config());

        assert_eq!(positions[&1].y, 20.0);
        assert_eq!(positions[&2].y, 20.0 + 40.0 + 5.0);
    }

    #[test]
    fn ignores_parents_outside_previous_layer() {
        // 0 -> 2 skips a layer, only 1 counts for centering
        let graph = LayoutGraph::from_edges([0, 1, 2, 3], [(0, 1), (0, 2), (1, 2), (3, 1)]);
        let sizes = |node: i32| match node {
            3 => Vec2::new(10.0, 200.0),
            _ => Vec2::new(10.0, 10.0),
        };

        let layers = [vec![0, 3], vec![1], vec![2]];
        let positions = assign_coordinates(&graph, &layers, &sizes, &config());

        // 1 is centered on 0 (20..30) and 3 (35..235)
        assert_eq!(positions[&1].y, (20.0 + 235.0) / 2.0 - 5.0);
        assert_eq!(positions[&2].y, positions[&1].y);
    }
}
