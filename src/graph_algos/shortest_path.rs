use crate::collections::Sequence;
use crate::graph::NodeId;

/// Construct the shortest path from the goal node back to the start node
/// Returns the ordered path as a sequence of nodes from start to goal
/// predecessor: parent of each node on its best known path, None for the start and for unreached nodes
/// goal: node the walk begins from
pub(crate) fn shortest_path(predecessor: &[Option<NodeId>], goal: NodeId) -> Sequence<NodeId> {

    let mut path = Vec::new();
    let mut current = Some(goal);

    // Trace back from goal to start
    while let Some(node) = current {
        path.push(node);
        current = predecessor.get(node).copied().flatten();
    }

    // The path is in reverse order
    path.into_iter().rev().collect()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_reconstruction() {
        // 0 -> 2 -> 3, 1 hangs off 0
        let predecessor = vec![None, Some(0), Some(0), Some(2)];

        let to_three: Vec<_> = shortest_path(&predecessor, 3).into_iter().collect();
        assert_eq!(to_three, vec![0, 2, 3]);

        let to_one: Vec<_> = shortest_path(&predecessor, 1).into_iter().collect();
        assert_eq!(to_one, vec![0, 1]);

        let to_start: Vec<_> = shortest_path(&predecessor, 0).into_iter().collect();
        assert_eq!(to_start, vec![0]);
    }
}
