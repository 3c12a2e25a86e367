pub mod spatial;

use crate::collections::Sequence;
use crate::errors::GraphError;
use crate::geometry::{Positioned, squared_euclidean};

use tracing::trace;


/// Dense node index, assigned in creation order (0..count)
pub type NodeId = usize;

/// Stable handle to an edge in the graph's edge arena
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(usize);

impl EdgeId {
    pub fn index(&self) -> usize {
        self.0
    }
}


/// Directed edge, owned by its source node
#[derive(Clone, Debug)]
pub struct Edge<E> {
    from: NodeId,
    to: NodeId,
    payload: E,
}

impl<E> Edge<E> {
    pub fn from(&self) -> NodeId {
        self.from
    }

    pub fn to(&self) -> NodeId {
        self.to
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }
}


#[derive(Clone, Debug)]
struct Node<N> {
    name: String,
    payload: N,
    edges: Sequence<EdgeId>, // outgoing, in insertion order
}


/// Fixed-capacity, append-only directed graph
/// N: node payload (position, identity), E: edge payload interpreted by a cost function
/// Nodes and edges live in flat arenas and are addressed by index
#[derive(Clone, Debug)]
pub struct Graph<N, E> {
    nodes: Vec<Node<N>>,
    edges: Vec<Edge<E>>,
    max: usize,
}

impl<N, E> Graph<N, E> {

    /// Create an empty graph able to hold exactly `capacity` nodes
    pub fn new(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            edges: Vec::new(),
            max: capacity,
        }
    }

    /// Node capacity fixed at creation
    pub fn max(&self) -> usize {
        self.max
    }

    /// Number of live nodes
    pub fn count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Add a node, returning its index
    /// The name is copied so the caller keeps ownership of its string
    pub fn add_node(&mut self, name: &str, payload: N) -> Result<NodeId, GraphError> {
        if self.nodes.len() >= self.max {
            return Err(GraphError::CapacityExceeded { max: self.max });
        }

        let id = self.nodes.len();
        self.nodes.push(Node {
            name: name.to_owned(),
            payload,
            edges: Sequence::new(),
        });
        trace!(node = id, name, "added node");
        Ok(id)
    }

    /// Add a directed edge `from -> to`
    /// Both endpoints must already exist
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, payload: E) -> Result<EdgeId, GraphError> {
        self.check_node(from)?;
        self.check_node(to)?;

        let id = EdgeId(self.edges.len());
        self.edges.push(Edge { from, to, payload });
        self.nodes[from].edges.push_back(id);
        Ok(id)
    }

    /// Linear scan for a node by name
    pub fn find_node_by_name(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().position(|node| node.name == name)
    }

    pub fn node_name(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node).map(|n| n.name.as_str())
    }

    pub fn node_payload(&self, node: NodeId) -> Option<&N> {
        self.nodes.get(node).map(|n| &n.payload)
    }

    pub fn node_payload_mut(&mut self, node: NodeId) -> Option<&mut N> {
        self.nodes.get_mut(node).map(|n| &mut n.payload)
    }

    pub fn edge(&self, edge: EdgeId) -> Option<&Edge<E>> {
        self.edges.get(edge.0)
    }

    /// Mutable access to an edge payload, used to apply dynamic conditions between searches
    pub fn edge_payload_mut(&mut self, edge: EdgeId) -> Result<&mut E, GraphError> {
        self.edges
            .get_mut(edge.0)
            .map(|e| &mut e.payload)
            .ok_or(GraphError::UnknownEdge { edge })
    }

    /// Append every outgoing edge of `node` to `out`, in insertion order
    pub fn adjacent_edges(&self, node: NodeId, out: &mut Sequence<EdgeId>) -> Result<(), GraphError> {
        self.check_node(node)?;
        out.extend(self.nodes[node].edges.iter().copied());
        Ok(())
    }

    /// Append the destination of every outgoing edge of `node` to `out`, in insertion order
    pub fn adjacent_nodes(&self, node: NodeId, out: &mut Sequence<NodeId>) -> Result<(), GraphError> {
        self.check_node(node)?;
        out.extend(self.nodes[node].edges.iter().map(|id| self.edges[id.0].to));
        Ok(())
    }

    /// Iterate over the outgoing edges of `node`
    /// Unknown nodes yield nothing
    pub fn outgoing(&self, node: NodeId) -> impl Iterator<Item = (EdgeId, &Edge<E>)> + '_ {
        self.nodes
            .get(node)
            .into_iter()
            .flat_map(move |n| n.edges.iter().map(move |&id| (id, &self.edges[id.0])))
    }

    /// Locate the edge `from -> to` by scanning `from`'s adjacency
    /// With parallel edges the most recently added one is returned
    pub fn find_edge(&self, from: NodeId, to: NodeId) -> Option<EdgeId> {
        self.outgoing(from)
            .filter(|(_, edge)| edge.to == to)
            .map(|(id, _)| id)
            .last()
    }

    pub(crate) fn check_node(&self, node: NodeId) -> Result<(), GraphError> {
        if node < self.nodes.len() {
            Ok(())
        } else {
            Err(GraphError::UnknownNode { node, count: self.nodes.len() })
        }
    }
}

impl<N: Positioned, E> Graph<N, E> {

    /// Node closest to (x, y) by squared Euclidean distance
    /// Ties resolve to the lowest index; nodes at a non-finite distance never qualify
    /// None when no node qualifies, including an empty graph
    pub fn nearest_node(&self, x: f64, y: f64) -> Option<NodeId> {
        let mut best: Option<NodeId> = None;
        let mut min_dist = f64::INFINITY;

        for (idx, node) in self.nodes.iter().enumerate() {
            let p = node.payload.position();
            let d = squared_euclidean(p.x, p.y, x, y);
            // strict comparison keeps the first node found on ties
            if d < min_dist {
                min_dist = d;
                best = Some(idx);
            }
        }

        best
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    fn line_graph() -> Graph<Point, u32> {
        let mut g = Graph::new(3);
        let a = g.add_node("A", Point::new(0.0, 0.0)).unwrap();
        let b = g.add_node("B", Point::new(1.0, 0.0)).unwrap();
        let c = g.add_node("C", Point::new(2.0, 0.0)).unwrap();
        g.add_edge(a, b, 1).unwrap();
        g.add_edge(b, c, 1).unwrap();
        g
    }

    #[test]
    fn test_add_node_assigns_dense_indices() {
        let g = line_graph();
        assert_eq!(g.count(), 3);
        assert_eq!(g.max(), 3);
        assert_eq!(g.node_name(1), Some("B"));
        assert_eq!(g.node_payload(2), Some(&Point::new(2.0, 0.0)));
    }

    #[test]
    fn test_add_node_beyond_capacity() {
        let mut g = line_graph();
        let result = g.add_node("D", Point::new(3.0, 0.0));
        assert_eq!(result, Err(GraphError::CapacityExceeded { max: 3 }));
        assert_eq!(g.count(), 3);
    }

    #[test]
    fn test_add_edge_rejects_unknown_nodes() {
        let mut g = line_graph();
        assert_eq!(
            g.add_edge(0, 7, 1),
            Err(GraphError::UnknownNode { node: 7, count: 3 })
        );
        assert_eq!(
            g.add_edge(9, 0, 1),
            Err(GraphError::UnknownNode { node: 9, count: 3 })
        );
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn test_name_is_copied() {
        let mut g: Graph<Point, u32> = Graph::new(1);
        let mut name = String::from("Centro");
        let id = g.add_node(&name, Point::new(0.0, 0.0)).unwrap();
        name.push_str("-changed");

        assert_eq!(g.node_name(id), Some("Centro"));
        assert_eq!(g.find_node_by_name("Centro"), Some(0));
        assert_eq!(g.find_node_by_name("Centro-changed"), None);
    }

    #[test]
    fn test_adjacency_preserves_insertion_order() {
        let mut g: Graph<Point, u32> = Graph::new(4);
        for name in ["A", "B", "C", "D"] {
            g.add_node(name, Point::new(0.0, 0.0)).unwrap();
        }
        let e1 = g.add_edge(0, 3, 10).unwrap();
        let e2 = g.add_edge(0, 1, 20).unwrap();
        let e3 = g.add_edge(0, 2, 30).unwrap();

        let mut edges = Sequence::new();
        g.adjacent_edges(0, &mut edges).unwrap();
        assert_eq!(edges.into_iter().collect::<Vec<_>>(), vec![e1, e2, e3]);

        // appends to whatever the caller already holds
        let mut nodes = Sequence::new();
        nodes.push_back(99);
        g.adjacent_nodes(0, &mut nodes).unwrap();
        assert_eq!(nodes.into_iter().collect::<Vec<_>>(), vec![99, 3, 1, 2]);

        let mut none = Sequence::new();
        g.adjacent_nodes(3, &mut none).unwrap();
        assert!(none.is_empty());
        assert!(g.adjacent_nodes(4, &mut none).is_err());
    }

    #[test]
    fn test_edge_payload_mutation_and_lookup() {
        let mut g = line_graph();
        let ab = g.find_edge(0, 1).unwrap();
        assert_eq!(g.find_edge(1, 0), None);

        *g.edge_payload_mut(ab).unwrap() = 100;
        let edge = g.edge(ab).unwrap();
        assert_eq!(edge.payload(), &100);
        assert_eq!((edge.from(), edge.to()), (0, 1));
    }

    #[test]
    fn test_find_edge_prefers_latest_parallel_edge() {
        let mut g = line_graph();
        let newer = g.add_edge(0, 1, 5).unwrap();
        assert_eq!(g.find_edge(0, 1), Some(newer));
    }

    #[test]
    fn test_nearest_node_exact_and_ties() {
        let mut g: Graph<Point, u32> = Graph::new(4);
        g.add_node("W", Point::new(-1.0, 0.0)).unwrap();
        g.add_node("E", Point::new(1.0, 0.0)).unwrap();
        g.add_node("N", Point::new(0.0, 5.0)).unwrap();

        // exact hit
        assert_eq!(g.nearest_node(0.0, 5.0), Some(2));
        // equidistant from W and E: lowest index wins
        assert_eq!(g.nearest_node(0.0, 0.0), Some(0));
        assert_eq!(g.nearest_node(0.9, 0.1), Some(1));
    }

    #[test]
    fn test_nearest_node_skips_non_finite_positions() {
        let mut g: Graph<Point, u32> = Graph::new(3);
        g.add_node("bad", Point::new(f64::NAN, 0.0)).unwrap();
        g.add_node("hit", Point::new(3.0, 4.0)).unwrap();
        g.add_node("far", Point::new(f64::INFINITY, 4.0)).unwrap();

        assert_eq!(g.nearest_node(3.0, 4.0), Some(1));
        assert_eq!(g.nearest_node(-50.0, 0.0), Some(1));
    }

    #[test]
    fn test_nearest_node_without_finite_positions() {
        let mut g: Graph<Point, u32> = Graph::new(1);
        g.add_node("bad", Point::new(f64::NAN, f64::NAN)).unwrap();
        assert_eq!(g.nearest_node(0.0, 0.0), None);
    }

    #[test]
    fn test_nearest_node_empty_graph() {
        let g: Graph<Point, u32> = Graph::new(2);
        assert_eq!(g.nearest_node(0.0, 0.0), None);
    }
}
