//! Least-cost routing over city road networks whose edge costs change at runtime.
//!
//! The graph stores caller-typed node and edge payloads; searches price edges
//! through a cost function chosen per call, so the same network can be routed by
//! distance or by travel time, and re-routed after incidents mutate its roads.

pub mod collections;
pub mod errors;
pub mod geometry;
pub mod graph;
pub mod graph_algos;
pub mod road;

pub use collections::Sequence;
pub use errors::{GraphError, PathPlannerError};
pub use geometry::{Point, Positioned};
pub use graph::spatial::SpatialIndex;
pub use graph::{Edge, EdgeId, Graph, NodeId};
pub use graph_algos::CostEvaluable;
pub use graph_algos::dijkstra::{Route, SearchTree, find_path, find_path_evaluated, find_route, search_tree};
pub use graph_algos::priority_queue::{HeapEntry, MinHeap};
pub use road::city::{CityConfig, HighwayExits, generate_city};
pub use road::incidents::{IncidentKind, Incidents};
pub use road::network::{RoadGraph, RoadNetwork};
pub use road::{Criterion, RoadInfo, road_cost};
