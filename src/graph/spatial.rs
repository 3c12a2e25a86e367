use crate::errors::PathPlannerError;
use crate::geometry::Positioned;
use super::{Graph, NodeId};

use kdtree::KdTree;
use kdtree::distance::squared_euclidean as kt_squared_euclidean;
use tracing::debug;


/// Snapshot of node positions in a kd-tree
/// Answers the same query as `Graph::nearest_node` without the linear scan.
/// Node payloads moved after the snapshot are not seen until it is rebuilt.
pub struct SpatialIndex {
    tree: KdTree<f64, NodeId, [f64; 2]>, // stores point -> node index
    len: usize,
}

impl SpatialIndex {

    /// Index every node currently in the graph
    pub fn build<N: Positioned, E>(graph: &Graph<N, E>) -> Result<Self, PathPlannerError> {
        let mut tree = KdTree::new(2);
        for node in 0..graph.count() {
            if let Some(payload) = graph.node_payload(node) {
                let p = payload.position();
                tree.add([p.x, p.y], node)?;
            }
        }
        debug!(nodes = graph.count(), "built spatial index");

        Ok(Self { tree, len: graph.count() })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Closest indexed node to (x, y); ties resolve to the lowest index
    pub fn nearest(&self, x: f64, y: f64) -> Result<Option<NodeId>, PathPlannerError> {
        if self.len == 0 {
            return Ok(None);
        }

        let point = [x, y];
        let closest: Vec<(f64, &NodeId)> = self.tree.nearest(&point, 1, &kt_squared_euclidean)?;
        let Some(&(min_dist, &first)) = closest.first() else {
            return Ok(None);
        };

        // the tree returns an arbitrary node among equidistant ones,
        // gather everything at that distance and keep the lowest index
        let tied = self.tree.within(&point, min_dist, &kt_squared_euclidean)?;
        let best = tied
            .into_iter()
            .filter(|(d, _)| *d <= min_dist)
            .map(|(_, &idx)| idx)
            .min()
            .unwrap_or(first);

        Ok(Some(best))
    }
}
