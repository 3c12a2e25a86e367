pub mod dijkstra;
pub mod priority_queue;
mod shortest_path;

use shortest_path::shortest_path;

use num_traits::Float;


/// Capability of an edge payload to price itself under a criterion
/// K: criterion selecting which attribute drives the cost (distance, time, ...)
/// Implementations must be pure and return a non-negative cost
pub trait CostEvaluable<K> {
    type Cost: Float;

    fn cost(&self, criterion: K) -> Self::Cost;
}
