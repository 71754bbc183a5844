//! Shortest-path solver over the road network.
//!
//! Classic Dijkstra with linear-scan extraction; the graphs in play are a
//! few dozen nodes, so no priority queue is needed. Edge weights are the
//! Euclidean distance between the endpoint nodes' positions.

use bevy_ecs::prelude::Resource;
use lru::LruCache;
use std::num::NonZeroUsize;

use crate::map::{NodeId, RoadGraph};

/// Compute the shortest path from `source` to `target` as an ordered node
/// sequence.
///
/// Returns `[source]` when `source == target`, and an empty sequence when
/// `target` is unreachable. Callers treat any result shorter than 2 nodes
/// as "route unavailable".
pub fn shortest_path(graph: &RoadGraph, source: NodeId, target: NodeId) -> Vec<NodeId> {
    let n = graph.len();
    if source.index() >= n || target.index() >= n {
        return Vec::new();
    }

    let mut dist = vec![f64::INFINITY; n];
    let mut prev: Vec<Option<NodeId>> = vec![None; n];
    let mut unvisited = vec![true; n];
    dist[source.index()] = 0.0;

    loop {
        // Extract the unvisited node with the minimum tentative distance.
        let mut current: Option<NodeId> = None;
        let mut best = f64::INFINITY;
        for (i, pending) in unvisited.iter().enumerate() {
            if *pending && dist[i] < best {
                best = dist[i];
                current = Some(NodeId(i as u32));
            }
        }
        let Some(current) = current else { break };
        if current == target {
            break;
        }
        unvisited[current.index()] = false;

        let Some(node) = graph.node(current) else {
            continue;
        };
        for &neighbor in &node.neighbors {
            if !unvisited[neighbor.index()] {
                continue;
            }
            let Some(neighbor_node) = graph.node(neighbor) else {
                continue;
            };
            let alt = dist[current.index()] + node.position.distance_to(neighbor_node.position);
            if alt < dist[neighbor.index()] {
                dist[neighbor.index()] = alt;
                prev[neighbor.index()] = Some(current);
            }
        }
    }

    // Walk predecessor pointers from the target back to the source.
    let mut path = vec![target];
    let mut cursor = target;
    while let Some(step) = prev[cursor.index()] {
        path.push(step);
        cursor = step;
    }
    path.reverse();

    // An unreachable target leaves a single-element path that does not start
    // at the source; normalize it to "no path".
    if path.len() == 1 && path[0] != source {
        return Vec::new();
    }
    path
}

/// Total Euclidean length of a path. Segments touching an unknown node
/// contribute nothing.
pub fn path_length(graph: &RoadGraph, path: &[NodeId]) -> f64 {
    path.windows(2)
        .filter_map(|pair| {
            let a = graph.node(pair[0])?;
            let b = graph.node(pair[1])?;
            Some(a.position.distance_to(b.position))
        })
        .sum()
}

/// LRU cache over solved paths, stored as a world resource.
///
/// The key is directional `(source, target)`. Only traversable results
/// (length >= 2) are cached; degenerate and unreachable queries are
/// recomputed on each call.
#[derive(Resource)]
pub struct PathCache {
    cache: LruCache<(NodeId, NodeId), Vec<NodeId>>,
}

impl PathCache {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: LruCache::new(capacity),
        }
    }

    pub fn get_or_compute(
        &mut self,
        graph: &RoadGraph,
        source: NodeId,
        target: NodeId,
    ) -> Vec<NodeId> {
        if let Some(hit) = self.cache.get(&(source, target)) {
            return hit.clone();
        }
        let path = shortest_path(graph, source, target);
        if path.len() >= 2 {
            self.cache.put((source, target), path.clone());
        }
        path
    }
}

impl Default for PathCache {
    fn default() -> Self {
        Self::with_capacity(256)
    }
}
