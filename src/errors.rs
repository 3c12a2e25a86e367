use thiserror::Error;

use crate::graph::{EdgeId, NodeId};


/// Failures raised while building or addressing a graph
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    /// Graph already holds `max` nodes
    #[error("graph is full: capacity of {max} nodes reached")]
    CapacityExceeded { max: usize },

    /// Node index outside 0..count
    #[error("unknown node {node} (graph has {count} nodes)")]
    UnknownNode { node: NodeId, count: usize },

    #[error("unknown edge {edge:?}")]
    UnknownEdge { edge: EdgeId },
}


#[derive(Debug, Error)]
pub enum PathPlannerError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// Cost function returned a negative or NaN cost for an edge
    #[error("invalid cost {cost} on edge {from} -> {to}")]
    InvalidCost { from: NodeId, to: NodeId, cost: f64 },

    /// No road in either direction between two junctions
    #[error("no road between {from} and {to}")]
    NoRoad { from: NodeId, to: NodeId },

    /// Incident table is full
    #[error("incident table is full ({max} records)")]
    IncidentLimit { max: usize },

    #[error("kd-tree error: {0}")]
    KdTreeError(String),
}


impl From<kdtree::ErrorKind> for PathPlannerError {
    fn from(error: kdtree::ErrorKind) -> Self {
        PathPlannerError::KdTreeError(error.to_string())
    }
}
