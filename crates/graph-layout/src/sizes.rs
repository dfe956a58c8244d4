use crate::Vec2;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use tracing::trace;

/// Size lookup used while packing layers
pub trait NodeSizes<N> {
    /// Width and height of a node
    fn size(&self, node: N) -> Vec2;
}

impl<N, F> NodeSizes<N> for F
where
    F: Fn(N) -> Vec2,
{
    fn size(&self, node: N) -> Vec2 {
        self(node)
    }
}

/// Nodes without an entry take no room and may share a slot with the next
/// node of their layer
impl<N> NodeSizes<N> for HashMap<N, Vec2>
where
    N: Copy + Eq + Hash + Debug,
{
    fn size(&self, node: N) -> Vec2 {
        match self.get(&node) {
            Some(&size) => size,
            None => {
                trace!("No size for {node:?}, treating it as empty");
                Vec2::zero()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn closures_are_size_lookups() {
        let sizes = |id: u32| Vec2::new(id as f32, 2.0 * id as f32);
        assert_eq!(sizes.size(3), Vec2::new(3.0, 6.0));
    }

    #[test]
    fn missing_map_entries_are_empty() {
        let sizes = HashMap::from([("card", Vec2::new(240.0, 140.0))]);
        assert_eq!(sizes.size("card"), Vec2::new(240.0, 140.0));
        assert_eq!(sizes.size("ghost"), Vec2::zero());
    }
}
