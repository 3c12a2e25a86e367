pub mod city;
pub mod incidents;
pub mod network;

use crate::graph_algos::CostEvaluable;


/// Travel time charged for a road whose speed is zero or negative
pub const STALLED_TIME_COST: f64 = 999_999.0;

/// Map units per kilometre when reporting route lengths
pub const UNITS_PER_KM: f64 = 100.0;


/// Objective a route is optimised for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Criterion {
    Distance,
    Time,
}


/// Edge payload of the road network
#[derive(Clone, Debug, PartialEq)]
pub struct RoadInfo {
    pub name: String,
    pub length: f64, // map units
    pub speed: f64,  // map units per unit of time
}

impl RoadInfo {
    pub fn new(name: &str, length: f64, speed: f64) -> Self {
        Self { name: name.to_owned(), length, speed }
    }
}

impl CostEvaluable<Criterion> for RoadInfo {
    type Cost = f64;

    fn cost(&self, criterion: Criterion) -> f64 {
        road_cost(self, criterion)
    }
}


/// Cost of travelling a road under a criterion
/// Distance uses the length, Time divides it by the current speed
pub fn road_cost(info: &RoadInfo, criterion: Criterion) -> f64 {
    match criterion {
        Criterion::Distance => info.length,
        Criterion::Time if info.speed > 0.0 => info.length / info.speed,
        Criterion::Time => STALLED_TIME_COST,
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_road_cost_by_criterion() {
        let road = RoadInfo::new("Av. Higienopolis", 300.0, 60.0);
        assert_eq!(road_cost(&road, Criterion::Distance), 300.0);
        assert_eq!(road_cost(&road, Criterion::Time), 5.0);
        assert_eq!(road.cost(Criterion::Time), 5.0);
    }

    #[test]
    fn test_stalled_road() {
        let road = RoadInfo::new("Rua Sergipe", 100.0, 0.0);
        assert_eq!(road_cost(&road, Criterion::Time), STALLED_TIME_COST);
        // length is unaffected by speed
        assert_eq!(road_cost(&road, Criterion::Distance), 100.0);
    }
}
