use crate::collections::FxIndexMap;
use crate::errors::PathPlannerError;
use crate::graph::NodeId;


/// Maximum number of directed incident records, 149 two-way roads
pub const MAX_INCIDENTS: usize = 298;

/// Speed forced onto a road blocked by an incident
pub const BLOCKED_SPEED: f64 = 0.1;


/// Condition reported on a road
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IncidentKind {
    Accident,
    Roadwork,
    Closure,
    Traffic,
    SpeedCamera,
    SpeedCameraOff,
}

impl IncidentKind {
    /// Whether the incident slows the road down to a crawl
    /// Speed cameras are informational only
    pub fn blocks_traffic(&self) -> bool {
        matches!(
            self,
            IncidentKind::Accident | IncidentKind::Roadwork | IncidentKind::Closure | IncidentKind::Traffic
        )
    }
}


/// Incident records keyed by directed road (from, to)
/// Owned by the road network and consulted by both the router and its consumers
#[derive(Clone, Debug)]
pub struct Incidents {
    records: FxIndexMap<(NodeId, NodeId), IncidentKind>,
    max: usize,
}

impl Incidents {

    pub fn new() -> Self {
        Self::with_limit(MAX_INCIDENTS)
    }

    pub fn with_limit(max: usize) -> Self {
        Self { records: FxIndexMap::default(), max }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record `kind` on both directions between `u` and `v`
    /// A newer report on the same road replaces the older one
    pub fn record(&mut self, u: NodeId, v: NodeId, kind: IncidentKind) -> Result<(), PathPlannerError> {
        let mut new_records = usize::from(!self.records.contains_key(&(u, v)));
        if u != v && !self.records.contains_key(&(v, u)) {
            new_records += 1;
        }

        if self.records.len() + new_records > self.max {
            return Err(PathPlannerError::IncidentLimit { max: self.max });
        }

        self.records.insert((u, v), kind);
        self.records.insert((v, u), kind);
        Ok(())
    }

    /// Incident on the directed road `u -> v`, if any
    pub fn between(&self, u: NodeId, v: NodeId) -> Option<IncidentKind> {
        self.records.get(&(u, v)).copied()
    }

    /// Iterate over records in reporting order
    pub fn iter(&self) -> impl Iterator<Item = ((NodeId, NodeId), IncidentKind)> + '_ {
        self.records.iter().map(|(&key, &kind)| (key, kind))
    }
}

impl Default for Incidents {
    fn default() -> Self {
        Self::new()
    }
}
