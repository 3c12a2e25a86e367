use crate::errors::PathPlannerError;
use crate::geometry::Point;
use crate::graph::NodeId;
use super::incidents::IncidentKind;
use super::network::RoadNetwork;
use super::RoadInfo;

use rand::Rng;
use tracing::{debug, info};


/// Layout parameters for a procedurally generated city
#[derive(Clone, Debug, PartialEq)]
pub struct CityConfig {
    pub columns: usize,
    pub rows: usize,
    pub spacing: f64,   // distance between neighbouring grid junctions
    pub origin: Point,  // position of the first junction
    pub jitter: i32,    // max random offset applied to each junction, per axis
    pub street_speed: f64,
    pub highway_length: f64,
    pub highway_speed: f64,
    pub exits: HighwayExits,
    /// Incidents applied once the roads exist, as (from, to, kind)
    pub incidents: Vec<(NodeId, NodeId, IncidentKind)>,
}

impl Default for CityConfig {
    fn default() -> Self {
        Self {
            columns: 10,
            rows: 8,
            spacing: 100.0,
            origin: Point::new(200.0, 150.0),
            jitter: 5,
            street_speed: 60.0,
            highway_length: 400.0,
            highway_speed: 110.0,
            exits: HighwayExits::default(),
            incidents: vec![
                (12, 13, IncidentKind::Accident),
                (66, 67, IncidentKind::Roadwork),
                (18, 28, IncidentKind::Closure),
                (44, 45, IncidentKind::SpeedCamera),
                (70, 71, IncidentKind::SpeedCamera),
                (30, 31, IncidentKind::SpeedCamera),
                (4, 14, IncidentKind::SpeedCameraOff),
            ],
        }
    }
}

/// Positions of the four highway exit junctions
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HighwayExits {
    pub north: Point,
    pub south: Point,
    pub west: Point,
    pub east: Point,
}

impl Default for HighwayExits {
    fn default() -> Self {
        Self {
            north: Point::new(650.0, -100.0),
            south: Point::new(650.0, 1000.0),
            west: Point::new(-150.0, 400.0),
            east: Point::new(1450.0, 400.0),
        }
    }
}


impl CityConfig {

    /// Grid junctions plus the four highway exits
    pub fn junction_count(&self) -> usize {
        self.columns * self.rows + 4
    }

    /// Grid junction at (column, row)
    pub fn grid_node(&self, column: usize, row: usize) -> NodeId {
        row * self.columns + column
    }
}


/// Build a city: a jittered grid of two-way streets ringed by four highway exits
/// Grid junctions are named `N<index>` in row-major order, exits are North, South, West and East
pub fn generate_city<R: Rng>(config: &CityConfig, rng: &mut R) -> Result<RoadNetwork, PathPlannerError> {
    let mut net = RoadNetwork::new(config.junction_count());

    // 1. grid junctions
    for row in 0..config.rows {
        for column in 0..config.columns {
            let x = config.origin.x + column as f64 * config.spacing + jitter(config.jitter, rng);
            let y = config.origin.y + row as f64 * config.spacing + jitter(config.jitter, rng);
            let id = config.grid_node(column, row);
            net.add_junction(&format!("N{id}"), Point::new(x, y))?;
        }
    }

    // 2. streets between horizontal and vertical neighbours
    for row in 0..config.rows {
        for column in 0..config.columns {
            let u = config.grid_node(column, row);
            if column + 1 < config.columns {
                let street = RoadInfo::new("Street", config.spacing, config.street_speed);
                net.add_two_way_road(u, config.grid_node(column + 1, row), street)?;
            }
            if row + 1 < config.rows {
                let avenue = RoadInfo::new("Avenue", config.spacing, config.street_speed);
                net.add_two_way_road(u, config.grid_node(column, row + 1), avenue)?;
            }
        }
    }

    // 3. highway exits, each joined to the middle of one side of the grid
    if config.columns > 0 && config.rows > 0 {
        add_highways(config, &mut net)?;
    }

    // 4. incidents
    for &(u, v, kind) in &config.incidents {
        net.report_incident(u, v, kind)?;
    }

    info!(
        junctions = net.graph().count(),
        roads = net.graph().edge_count(),
        incidents = net.incidents().len(),
        "generated city"
    );
    Ok(net)
}


fn add_highways(config: &CityConfig, net: &mut RoadNetwork) -> Result<(), PathPlannerError> {
    let mid_column = (config.columns - 1) / 2;
    let mid_row = (config.rows - 1) / 2;
    let last_column = config.columns - 1;
    let last_row = config.rows - 1;
    let positions = &config.exits;

    let exits = [
        ("North", positions.north, config.grid_node(mid_column, 0)),
        ("South", positions.south, config.grid_node(mid_column, last_row)),
        ("West", positions.west, config.grid_node(0, mid_row)),
        ("East", positions.east, config.grid_node(last_column, mid_row)),
    ];

    for (name, position, gate) in exits {
        let exit = net.add_junction(name, position)?;
        let highway = RoadInfo::new("Highway", config.highway_length, config.highway_speed);
        net.add_two_way_road(exit, gate, highway)?;
        debug!(exit, gate, name, "connected highway exit");
    }

    Ok(())
}


fn jitter<R: Rng>(amount: i32, rng: &mut R) -> f64 {
    if amount <= 0 {
        return 0.0;
    }
    rng.random_range(-amount..=amount) as f64
}
