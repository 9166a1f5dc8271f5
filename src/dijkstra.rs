use std::cmp::Ordering;
use std::collections::BinaryHeap;

use hashbrown::HashSet;

use crate::graph::{Graph, RouteError};

#[derive(Copy, Clone, PartialEq)]
struct State {
    cost: f64,
    node: usize,
}

// Min-heap by cost
impl Eq for State {}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // reverse ordering for min-heap; equal costs settle the lower index
        // first so repeated queries visit vertices in the same order
        other
            .cost
            .partial_cmp(&self.cost)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Result of a route query: waypoint indices in source→sink order plus the
/// summed edge cost. Owned by the caller; the graph keeps nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub stops: Vec<usize>,
    pub cost: f64,
}

impl Route {
    /// Waypoint names along the route, source first.
    pub fn names<'a>(&self, graph: &'a Graph) -> Vec<&'a str> {
        self.stops.iter().map(|&i| graph.waypoint(i).name()).collect()
    }
}

impl Graph {
    /// Minimum-cost route between two named locations.
    ///
    /// Either name failing to resolve yields [`RouteError::UnknownLocation`].
    /// Querying a location against itself yields the single-stop route with
    /// cost zero.
    pub fn shortest_path(&self, source: &str, sink: &str) -> Result<Route, RouteError> {
        let src = self.index_of(source)?;
        let dst = self.index_of(sink)?;
        route(self, src, dst)
    }

    /// Distance from `source` to every waypoint, indexed like `waypoints()`.
    pub fn distances_from(&self, source: &str) -> Result<Vec<f64>, RouteError> {
        let src = self.index_of(source)?;
        let (dist, _) = run_dijkstra(self, src);
        Ok(dist)
    }
}

/// Dijkstra from `src`, then a predecessor walk back from `sink`.
fn route(graph: &Graph, src: usize, sink: usize) -> Result<Route, RouteError> {
    if src == sink {
        return Ok(Route {
            stops: vec![src],
            cost: 0.0,
        });
    }

    let (dist, predecessor) = run_dijkstra(graph, src);
    let stops = walk_predecessors(src, sink, &predecessor).ok_or_else(|| RouteError::NoRoute {
        from: graph.waypoint(src).name().to_string(),
        to: graph.waypoint(sink).name().to_string(),
    })?;

    Ok(Route {
        stops,
        cost: dist[sink],
    })
}

/// Dijkstra from `src` to all waypoints. Returns per-index distances
/// (`f64::INFINITY` when unreached) and the predecessor of each waypoint on
/// its cheapest known path, recorded at relaxation time.
fn run_dijkstra(graph: &Graph, src: usize) -> (Vec<f64>, Vec<Option<usize>>) {
    let n = graph.len();
    let mut dist = vec![f64::INFINITY; n];
    let mut predecessor: Vec<Option<usize>> = vec![None; n];
    let mut settled: HashSet<usize> = HashSet::with_capacity(n);
    let mut heap = BinaryHeap::new();

    dist[src] = 0.0;
    heap.push(State {
        cost: 0.0,
        node: src,
    });

    while let Some(State { cost, node }) = heap.pop() {
        if !settled.insert(node) {
            continue;
        }
        for &(next, w) in graph.neighbors(node) {
            let next_cost = cost + w;
            if next_cost < dist[next] {
                dist[next] = next_cost;
                predecessor[next] = Some(node);
                heap.push(State {
                    cost: next_cost,
                    node: next,
                });
            }
        }
    }

    (dist, predecessor)
}

/// Follows predecessor links from `sink` back to `src` and reverses the
/// collected indices. `None` when the chain breaks before reaching `src`,
/// which a caller must report rather than loop on.
fn walk_predecessors(src: usize, sink: usize, predecessor: &[Option<usize>]) -> Option<Vec<usize>> {
    let mut stops = vec![sink];
    let mut cur = sink;
    while cur != src {
        cur = predecessor[cur]?;
        stops.push(cur);
    }
    stops.reverse();
    Some(stops)
}
