use fnv::FnvHashMap;
use thiserror::Error;

use crate::geo;

/// Errors surfaced by graph construction and route queries.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RouteError {
    #[error("unknown location: {name:?}")]
    UnknownLocation { name: String },

    #[error("no route from {from:?} to {to:?}")]
    NoRoute { from: String, to: String },

    #[error("duplicate location name: {name:?}")]
    DuplicateName { name: String },
}

/// A named location with planar coordinates. Created at load time and owned
/// by the graph; never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    name: String,
    lat: f64,
    lon: f64,
}

impl Waypoint {
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            name: name.into(),
            lat,
            lon,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Straight-line distance to another waypoint.
    pub fn distance_to(&self, other: &Waypoint) -> f64 {
        geo::euclidean_degrees(self.lat, self.lon, other.lat, other.lon)
    }
}

/// A complete weighted graph over a set of named waypoints.
///
/// Every pair of distinct waypoints is connected by two directed edges of
/// equal weight (the planar distance between them); there are no self-loops.
/// The graph is built once and read-only afterwards, so independent route
/// queries can share it freely.
#[derive(Debug)]
pub struct Graph {
    waypoints: Vec<Waypoint>,
    name_to_idx: FnvHashMap<String, usize>,
    adj: Vec<Vec<(usize, f64)>>,
}

impl Graph {
    /// Builds the complete graph over `waypoints`, in the order given.
    ///
    /// An empty input yields a valid empty graph. Duplicate names are
    /// rejected up front so a later lookup can never silently resolve to
    /// the wrong location.
    pub fn build(waypoints: Vec<Waypoint>) -> Result<Self, RouteError> {
        let mut name_to_idx =
            FnvHashMap::with_capacity_and_hasher(waypoints.len(), Default::default());
        for (idx, wp) in waypoints.iter().enumerate() {
            if name_to_idx.insert(wp.name.clone(), idx).is_some() {
                return Err(RouteError::DuplicateName {
                    name: wp.name.clone(),
                });
            }
        }

        let n = waypoints.len();
        let mut adj: Vec<Vec<(usize, f64)>> = vec![Vec::new(); n];
        for u in 0..n {
            for v in (u + 1)..n {
                let weight = waypoints[u].distance_to(&waypoints[v]);
                adj[u].push((v, weight));
                adj[v].push((u, weight));
            }
        }

        Ok(Self {
            waypoints,
            name_to_idx,
            adj,
        })
    }

    /// Resolves a location name to its dense index.
    pub fn index_of(&self, name: &str) -> Result<usize, RouteError> {
        self.name_to_idx
            .get(name)
            .copied()
            .ok_or_else(|| RouteError::UnknownLocation {
                name: name.to_string(),
            })
    }

    pub fn waypoint(&self, idx: usize) -> &Waypoint {
        &self.waypoints[idx]
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Outgoing edges of `idx` as `(neighbor index, weight)` pairs.
    pub fn neighbors(&self, idx: usize) -> &[(usize, f64)] {
        &self.adj[idx]
    }

    pub fn edge_count(&self) -> usize {
        self.adj.iter().map(|edges| edges.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_waypoints() -> Vec<Waypoint> {
        vec![
            Waypoint::new("Library", 0.0, 0.0),
            Waypoint::new("Gym", 3.0, 0.0),
            Waypoint::new("Pool", 3.0, 4.0),
            Waypoint::new("Theater", 0.0, 4.0),
        ]
    }

    #[test]
    fn complete_edge_count() {
        let g = Graph::build(sample_waypoints()).expect("unique names");
        assert_eq!(g.len(), 4);
        // n * (n - 1) directed edges, none to self
        assert_eq!(g.edge_count(), 12);
        for idx in 0..g.len() {
            assert_eq!(g.neighbors(idx).len(), 3);
            assert!(g.neighbors(idx).iter().all(|&(v, _)| v != idx));
        }
    }

    #[test]
    fn weights_are_symmetric() {
        let g = Graph::build(sample_waypoints()).expect("unique names");
        for u in 0..g.len() {
            for &(v, w_uv) in g.neighbors(u) {
                let &(_, w_vu) = g
                    .neighbors(v)
                    .iter()
                    .find(|&&(back, _)| back == u)
                    .expect("reverse edge exists");
                assert_eq!(w_uv, w_vu);
            }
        }
    }

    #[test]
    fn weight_is_planar_distance() {
        let g = Graph::build(sample_waypoints()).expect("unique names");
        let lib = g.index_of("Library").expect("known");
        let pool = g.index_of("Pool").expect("known");
        let &(_, w) = g
            .neighbors(lib)
            .iter()
            .find(|&&(v, _)| v == pool)
            .expect("edge exists");
        assert!((w - 5.0).abs() < 1e-12);
    }

    #[test]
    fn index_of_roundtrip() {
        let g = Graph::build(sample_waypoints()).expect("unique names");
        for (idx, wp) in g.waypoints().iter().enumerate() {
            assert_eq!(g.index_of(wp.name()).expect("known"), idx);
        }
    }

    #[test]
    fn unknown_name_is_an_error() {
        let g = Graph::build(sample_waypoints()).expect("unique names");
        assert_eq!(
            g.index_of("Cafeteria"),
            Err(RouteError::UnknownLocation {
                name: "Cafeteria".to_string()
            })
        );
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let points = vec![
            Waypoint::new("Library", 0.0, 0.0),
            Waypoint::new("Library", 1.0, 1.0),
        ];
        assert_eq!(
            Graph::build(points).unwrap_err(),
            RouteError::DuplicateName {
                name: "Library".to_string()
            }
        );
    }

    #[test]
    fn empty_graph_is_valid() {
        let g = Graph::build(Vec::new()).expect("empty input is fine");
        assert!(g.is_empty());
        assert_eq!(g.edge_count(), 0);
        assert!(g.index_of("Anywhere").is_err());
    }
}
