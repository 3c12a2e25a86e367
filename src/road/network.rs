use crate::collections::Sequence;
use crate::errors::{GraphError, PathPlannerError};
use crate::geometry::Point;
use crate::graph::{EdgeId, Graph, NodeId};
use crate::graph_algos::dijkstra::{Route, find_route};
use super::incidents::{BLOCKED_SPEED, IncidentKind, Incidents};
use super::{Criterion, RoadInfo, UNITS_PER_KM, road_cost};

use tracing::{debug, info, warn};


/// Junctions positioned on the map, joined by directed roads
pub type RoadGraph = Graph<Point, RoadInfo>;


/// Road graph together with the incidents reported on it
#[derive(Clone, Debug)]
pub struct RoadNetwork {
    graph: RoadGraph,
    incidents: Incidents,
}

impl RoadNetwork {

    /// Empty network able to hold `capacity` junctions
    pub fn new(capacity: usize) -> Self {
        Self::from_graph(Graph::new(capacity))
    }

    pub fn from_graph(graph: RoadGraph) -> Self {
        Self { graph, incidents: Incidents::new() }
    }

    pub fn graph(&self) -> &RoadGraph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut RoadGraph {
        &mut self.graph
    }

    pub fn incidents(&self) -> &Incidents {
        &self.incidents
    }

    pub fn add_junction(&mut self, name: &str, position: Point) -> Result<NodeId, GraphError> {
        self.graph.add_node(name, position)
    }

    pub fn add_road(&mut self, from: NodeId, to: NodeId, info: RoadInfo) -> Result<EdgeId, GraphError> {
        self.graph.add_edge(from, to, info)
    }

    /// Add a road in each direction with the same attributes
    /// The two directions are independent afterwards
    pub fn add_two_way_road(&mut self, a: NodeId, b: NodeId, info: RoadInfo) -> Result<(EdgeId, EdgeId), GraphError> {
        // validate both ends first so a failure leaves no half-built road
        self.graph.check_node(a)?;
        self.graph.check_node(b)?;
        let forward = self.graph.add_edge(a, b, info.clone())?;
        let backward = self.graph.add_edge(b, a, info)?;
        Ok((forward, backward))
    }

    /// Attributes of the directed road `u -> v`
    pub fn road_between(&self, u: NodeId, v: NodeId) -> Option<&RoadInfo> {
        self.graph
            .find_edge(u, v)
            .and_then(|id| self.graph.edge(id))
            .map(|edge| edge.payload())
    }

    /// Least-cost route between two junctions under `criterion`
    pub fn route(&self, start: NodeId, end: NodeId, criterion: Criterion) -> Result<Route<f64>, PathPlannerError> {
        find_route(&self.graph, start, end, criterion, road_cost)
    }

    pub fn nearest_junction(&self, x: f64, y: f64) -> Option<NodeId> {
        self.graph.nearest_node(x, y)
    }

    /// Total length of a route in kilometres
    /// Hops without a road between them contribute nothing
    pub fn route_length_km(&self, route: &Sequence<NodeId>) -> f64 {
        let total: f64 = route
            .iter()
            .zip(route.iter().skip(1))
            .filter_map(|(&u, &v)| self.road_between(u, v))
            .map(|road| road.length)
            .sum();

        total / UNITS_PER_KM
    }

    /// Halve the speed of every road along `route` still faster than 1.0
    /// Pushes the next search toward alternatives; returns how many roads changed
    pub fn penalize_route(&mut self, route: &Sequence<NodeId>) -> usize {
        let roads: Vec<EdgeId> = route
            .iter()
            .zip(route.iter().skip(1))
            .filter_map(|(&u, &v)| self.graph.find_edge(u, v))
            .collect();

        let mut changed = 0;
        for id in roads {
            if let Ok(road) = self.graph.edge_payload_mut(id) {
                if road.speed > 1.0 {
                    road.speed *= 0.5;
                    changed += 1;
                }
            }
        }

        debug!(hops = route.len(), changed, "penalized route");
        changed
    }

    /// Report an incident on the road between `u` and `v`, in both directions
    /// Blocking incidents drop the speed of each existing direction to a crawl
    pub fn report_incident(&mut self, u: NodeId, v: NodeId, kind: IncidentKind) -> Result<(), PathPlannerError> {
        let forward = self.graph.find_edge(u, v);
        let backward = self.graph.find_edge(v, u);

        if forward.is_none() && backward.is_none() {
            return Err(PathPlannerError::NoRoad { from: u, to: v });
        }
        if forward.is_none() || backward.is_none() {
            warn!(from = u, to = v, ?kind, "incident reported on a one-way road");
        }

        self.incidents.record(u, v, kind)?;

        if kind.blocks_traffic() {
            for id in [forward, backward].into_iter().flatten() {
                self.graph.edge_payload_mut(id)?.speed = BLOCKED_SPEED;
            }
        }

        info!(from = u, to = v, ?kind, "incident reported");
        Ok(())
    }

    /// Incident on the directed road `u -> v`, if any
    pub fn incident_between(&self, u: NodeId, v: NodeId) -> Option<IncidentKind> {
        self.incidents.between(u, v)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    // A - B - C in a line, plus a slow detour A - D - C
    fn small_town() -> RoadNetwork {
        let mut net = RoadNetwork::new(4);
        let a = net.add_junction("A", Point::new(0.0, 0.0)).unwrap();
        let b = net.add_junction("B", Point::new(100.0, 0.0)).unwrap();
        let c = net.add_junction("C", Point::new(200.0, 0.0)).unwrap();
        let d = net.add_junction("D", Point::new(100.0, 100.0)).unwrap();

        net.add_two_way_road(a, b, RoadInfo::new("Main", 100.0, 50.0)).unwrap();
        net.add_two_way_road(b, c, RoadInfo::new("Main", 100.0, 50.0)).unwrap();
        net.add_two_way_road(a, d, RoadInfo::new("Loop", 150.0, 30.0)).unwrap();
        net.add_two_way_road(d, c, RoadInfo::new("Loop", 150.0, 30.0)).unwrap();
        net
    }

    fn nodes(route: &Route<f64>) -> Vec<NodeId> {
        route.nodes.iter().copied().collect()
    }

    #[test]
    fn test_route_by_distance_and_time() {
        let net = small_town();

        let by_distance = net.route(0, 2, Criterion::Distance).unwrap();
        assert_eq!(nodes(&by_distance), vec![0, 1, 2]);
        assert_eq!(by_distance.cost, 200.0);

        let by_time = net.route(0, 2, Criterion::Time).unwrap();
        assert_eq!(nodes(&by_time), vec![0, 1, 2]);
        assert_eq!(by_time.cost, 4.0);
    }

    #[test]
    fn test_blocking_incident_reroutes() {
        let mut net = small_town();
        net.report_incident(0, 1, IncidentKind::Accident).unwrap();

        assert_eq!(net.road_between(0, 1).unwrap().speed, BLOCKED_SPEED);
        assert_eq!(net.road_between(1, 0).unwrap().speed, BLOCKED_SPEED);
        assert_eq!(net.incident_between(1, 0), Some(IncidentKind::Accident));

        let by_time = net.route(0, 2, Criterion::Time).unwrap();
        assert_eq!(nodes(&by_time), vec![0, 3, 2]);
        assert_eq!(by_time.cost, 10.0);

        // distance ignores speed
        let by_distance = net.route(0, 2, Criterion::Distance).unwrap();
        assert_eq!(nodes(&by_distance), vec![0, 1, 2]);
    }

    #[test]
    fn test_camera_incident_keeps_speed() {
        let mut net = small_town();
        net.report_incident(1, 2, IncidentKind::SpeedCamera).unwrap();

        assert_eq!(net.road_between(1, 2).unwrap().speed, 50.0);
        assert_eq!(net.incident_between(2, 1), Some(IncidentKind::SpeedCamera));
        assert_eq!(net.incident_between(0, 1), None);
    }

    #[test]
    fn test_incident_without_road() {
        let mut net = small_town();
        let result = net.report_incident(1, 3, IncidentKind::Closure);
        assert!(matches!(result, Err(PathPlannerError::NoRoad { from: 1, to: 3 })));
        assert!(net.incidents().is_empty());
    }

    #[test]
    fn test_incident_on_one_way_road() {
        let mut net = RoadNetwork::new(2);
        net.add_junction("X", Point::new(0.0, 0.0)).unwrap();
        net.add_junction("Y", Point::new(1.0, 0.0)).unwrap();
        net.add_road(0, 1, RoadInfo::new("One way", 10.0, 10.0)).unwrap();

        net.report_incident(1, 0, IncidentKind::Traffic).unwrap();
        assert_eq!(net.road_between(0, 1).unwrap().speed, BLOCKED_SPEED);
        assert_eq!(net.incident_between(0, 1), Some(IncidentKind::Traffic));
    }

    #[test]
    fn test_route_length_km() {
        let net = small_town();
        let route = net.route(0, 2, Criterion::Distance).unwrap();
        assert_eq!(net.route_length_km(&route.nodes), 2.0);

        let single: Sequence<NodeId> = [0].into_iter().collect();
        assert_eq!(net.route_length_km(&single), 0.0);
        assert_eq!(net.route_length_km(&Sequence::new()), 0.0);
    }

    #[test]
    fn test_penalize_route_halves_fast_roads() {
        let mut net = small_town();
        let route = net.route(0, 2, Criterion::Time).unwrap();

        assert_eq!(net.penalize_route(&route.nodes), 2);
        assert_eq!(net.road_between(0, 1).unwrap().speed, 25.0);
        assert_eq!(net.road_between(1, 2).unwrap().speed, 25.0);
        // reverse direction untouched
        assert_eq!(net.road_between(1, 0).unwrap().speed, 50.0);

        // Main now takes 8, Loop still 10
        let again = net.route(0, 2, Criterion::Time).unwrap();
        assert_eq!(nodes(&again), vec![0, 1, 2]);

        net.penalize_route(&again.nodes);
        let rerouted = net.route(0, 2, Criterion::Time).unwrap();
        assert_eq!(nodes(&rerouted), vec![0, 3, 2]);
    }

    #[test]
    fn test_penalize_skips_crawling_roads() {
        let mut net = small_town();
        net.report_incident(0, 1, IncidentKind::Closure).unwrap();
        let path: Sequence<NodeId> = [0, 1, 2].into_iter().collect();

        assert_eq!(net.penalize_route(&path), 1);
        assert_eq!(net.road_between(0, 1).unwrap().speed, BLOCKED_SPEED);
    }

    #[test]
    fn test_add_two_way_road_validates_first() {
        let mut net = small_town();
        let before = net.graph().edge_count();
        assert!(net.add_two_way_road(0, 9, RoadInfo::new("Nowhere", 1.0, 1.0)).is_err());
        assert_eq!(net.graph().edge_count(), before);
    }

    #[test]
    fn test_nearest_junction() {
        let net = small_town();
        assert_eq!(net.nearest_junction(95.0, 90.0), Some(3));
        assert_eq!(net.nearest_junction(210.0, -5.0), Some(2));
    }
}
