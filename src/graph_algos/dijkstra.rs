use crate::collections::Sequence;
use crate::errors::PathPlannerError;
use crate::graph::{Graph, NodeId};
use super::priority_queue::MinHeap;
use super::{CostEvaluable, shortest_path};

use std::fmt::Debug;
use num_traits::Float;
use tracing::{debug, trace};


/// Path found by a search along with its total cost
/// An unreachable goal gives an empty path and an infinite cost
#[derive(Clone, Debug, PartialEq)]
pub struct Route<C> {
    pub nodes: Sequence<NodeId>,
    pub cost: C,
}

impl<C> Route<C> {
    /// True when the goal was unreachable
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}


/// Best known distances and predecessors left behind by a search
#[derive(Clone, Debug)]
pub struct SearchTree<C> {
    distance: Vec<C>,
    predecessor: Vec<Option<NodeId>>,
    finalized: Vec<bool>,
}

impl<C: Float> SearchTree<C> {

    /// Distance from the start, None if the node was never reached
    pub fn distance(&self, node: NodeId) -> Option<C> {
        self.distance
            .get(node)
            .copied()
            .filter(|d| *d != C::infinity())
    }

    pub fn predecessor(&self, node: NodeId) -> Option<NodeId> {
        self.predecessor.get(node).copied().flatten()
    }

    /// True once the node's distance is proven optimal
    pub fn is_finalized(&self, node: NodeId) -> bool {
        self.finalized.get(node).copied().unwrap_or(false)
    }

    /// Path from the start to `node`, empty if `node` was never reached
    pub fn path_to(&self, node: NodeId) -> Sequence<NodeId> {
        match self.distance(node) {
            Some(_) => shortest_path(&self.predecessor, node),
            None => Sequence::new(),
        }
    }
}


/// Identify the least-cost path from `start` to `end` using Dijkstra's Algorithm
/// https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm
/// Edge costs come from `cost_fn(payload, criterion)`, read fresh on every search.
/// Returns the nodes from start to end inclusive, or an empty sequence when end is unreachable.
pub fn find_path<N, E, K, C, F>(
    graph: &Graph<N, E>,
    start: NodeId,
    end: NodeId,
    criterion: K,
    cost_fn: F,
) -> Result<Sequence<NodeId>, PathPlannerError>
where
    K: Copy,
    C: Float + Debug,
    F: Fn(&E, K) -> C,
    {
    find_route(graph, start, end, criterion, cost_fn).map(|route| route.nodes)
}


/// Same search as `find_path`, also reporting the total cost of the path
pub fn find_route<N, E, K, C, F>(
    graph: &Graph<N, E>,
    start: NodeId,
    end: NodeId,
    criterion: K,
    cost_fn: F,
) -> Result<Route<C>, PathPlannerError>
where
    K: Copy,
    C: Float + Debug,
    F: Fn(&E, K) -> C,
    {

    graph.check_node(end)?;

    // Build the tree - terminates when the end node is finalized
    let tree = build_search_tree(graph, start, Some(end), criterion, cost_fn)?;

    let route = match tree.distance(end) {
        Some(cost) => Route { nodes: shortest_path(&tree.predecessor, end), cost },
        None => Route { nodes: Sequence::new(), cost: C::infinity() },
    };

    debug!(start, end, hops = route.nodes.len(), cost = ?route.cost, "path search finished");
    Ok(route)
}


/// Search using the edge payload's own `CostEvaluable` implementation
pub fn find_path_evaluated<N, E, K>(
    graph: &Graph<N, E>,
    start: NodeId,
    end: NodeId,
    criterion: K,
) -> Result<Sequence<NodeId>, PathPlannerError>
where
    K: Copy,
    E: CostEvaluable<K>,
    E::Cost: Debug,
    {
    find_path(graph, start, end, criterion, |payload: &E, k| payload.cost(k))
}


/// Full single-source search, includes all (reachable) nodes and costs
pub fn search_tree<N, E, K, C, F>(
    graph: &Graph<N, E>,
    start: NodeId,
    criterion: K,
    cost_fn: F,
) -> Result<SearchTree<C>, PathPlannerError>
where
    K: Copy,
    C: Float + Debug,
    F: Fn(&E, K) -> C,
    {
    build_search_tree(graph, start, None, criterion, cost_fn)
}


/// Traverses the graph using Dijkstra's algorithm
/// Stops as soon as `goal` is finalized, or when the queue runs dry
fn build_search_tree<N, E, K, C, F>(
    graph: &Graph<N, E>,
    start: NodeId,
    goal: Option<NodeId>,
    criterion: K,
    cost_fn: F,
) -> Result<SearchTree<C>, PathPlannerError>
where
    K: Copy,
    C: Float + Debug,
    F: Fn(&E, K) -> C,
    {

    graph.check_node(start)?;

    let n = graph.count();
    let mut distance: Vec<C> = vec![C::infinity(); n];
    let mut predecessor: Vec<Option<NodeId>> = vec![None; n];
    // finalized nodes - cost is known, stale queue entries for them are skipped
    let mut finalized: Vec<bool> = vec![false; n];

    // Nodes to visit, smallest known distance first
    let mut queue: MinHeap<C> = MinHeap::with_capacity(n);
    distance[start] = C::zero();
    queue.insert(start, C::zero());

    let mut settled = 0usize;
    while let Some(entry) = queue.extract_min() {
        let u = entry.id;

        // a better entry for this node was already processed
        if finalized[u] {
            trace!(node = u, "skipping stale queue entry");
            continue;
        }
        finalized[u] = true;
        settled += 1;

        // Check if we've reached the goal
        if goal == Some(u) {
            break;
        }

        let base = distance[u];
        for (_, edge) in graph.outgoing(u) {
            let v = edge.to();
            let cost = cost_fn(edge.payload(), criterion);

            if cost.is_nan() || cost < C::zero() {
                return Err(PathPlannerError::InvalidCost {
                    from: u,
                    to: v,
                    cost: num_traits::cast::<C, f64>(cost).unwrap_or(f64::NAN),
                });
            }

            // Only requeue on a strictly better path
            let new_cost = base + cost;
            if new_cost < distance[v] {
                distance[v] = new_cost;
                predecessor[v] = Some(u);
                queue.insert(v, new_cost);
            }
        }
    }

    trace!(start, settled, "search tree built");
    Ok(SearchTree { distance, predecessor, finalized })
}
