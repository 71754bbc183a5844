//! Static road network: intersection nodes with adjacency derived from
//! configuration.
//!
//! The graph is built once from [`NodeSpec`] rows, validated, and never
//! mutated afterwards. Edge weights are not stored; they are derived from
//! node geometry by the path solver.

use std::collections::HashMap;

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A point on the 2D map plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(self, other: Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Linear interpolation toward `other`. `t` is clamped to [0, 1].
    pub fn lerp(self, other: Point, t: f64) -> Point {
        let t = t.clamp(0.0, 1.0);
        Point {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }
}

/// Index of a node in the graph's node table. External string labels appear
/// only in configuration and snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Cast to `usize` for direct use as a table index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One configured intersection: label, position, zone tag, and the labels of
/// connected intersections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub zone: String,
    #[serde(default)]
    pub connections: Vec<String>,
}

/// A resolved intersection node. Immutable after graph construction.
#[derive(Debug, Clone)]
pub struct RoadNode {
    pub label: String,
    pub position: Point,
    pub zone: String,
    pub neighbors: Vec<NodeId>,
}

/// Errors raised while building a [`RoadGraph`] from configuration.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("road network has no nodes")]
    EmptyNetwork,

    #[error("duplicate node label '{0}'")]
    DuplicateNode(String),

    #[error("node '{node}' lists unknown neighbor '{neighbor}'")]
    UnknownNeighbor { node: String, neighbor: String },
}

/// The fixed, undirected road network. Shared read-only substrate for all
/// routing; stored as a world resource.
#[derive(Debug, Resource)]
pub struct RoadGraph {
    nodes: Vec<RoadNode>,
    by_label: HashMap<String, NodeId>,
}

impl RoadGraph {
    /// Build and validate a graph from configuration rows.
    ///
    /// Adjacency is symmetrized: if `a` lists `b`, then `b` gains `a` even
    /// when the configuration omits the reverse entry. An empty node list,
    /// duplicate labels, or a neighbor label that resolves to no node are
    /// fatal configuration errors.
    pub fn from_specs(specs: &[NodeSpec]) -> Result<Self, MapError> {
        if specs.is_empty() {
            return Err(MapError::EmptyNetwork);
        }

        let mut by_label = HashMap::with_capacity(specs.len());
        for (i, spec) in specs.iter().enumerate() {
            if by_label.insert(spec.id.clone(), NodeId(i as u32)).is_some() {
                return Err(MapError::DuplicateNode(spec.id.clone()));
            }
        }

        let mut nodes = Vec::with_capacity(specs.len());
        for spec in specs {
            let neighbors = spec
                .connections
                .iter()
                .map(|label| {
                    by_label
                        .get(label)
                        .copied()
                        .ok_or_else(|| MapError::UnknownNeighbor {
                            node: spec.id.clone(),
                            neighbor: label.clone(),
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;
            nodes.push(RoadNode {
                label: spec.id.clone(),
                position: Point::new(spec.x, spec.y),
                zone: spec.zone.clone(),
                neighbors,
            });
        }

        let mut graph = Self { nodes, by_label };
        graph.symmetrize();
        Ok(graph)
    }

    /// Ensure every listed edge exists in both directions.
    fn symmetrize(&mut self) {
        let mut missing: Vec<(NodeId, NodeId)> = Vec::new();
        for (i, node) in self.nodes.iter().enumerate() {
            let this = NodeId(i as u32);
            for &neighbor in &node.neighbors {
                if !self.nodes[neighbor.index()].neighbors.contains(&this) {
                    missing.push((neighbor, this));
                }
            }
        }
        for (node, neighbor) in missing {
            let list = &mut self.nodes[node.index()].neighbors;
            if !list.contains(&neighbor) {
                list.push(neighbor);
            }
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&RoadNode> {
        self.nodes.get(id.index())
    }

    pub fn node_by_label(&self, label: &str) -> Option<NodeId> {
        self.by_label.get(label).copied()
    }

    /// Nearest node to a map position by Euclidean distance. Ties are broken
    /// by insertion order (first wins). The graph is never empty after
    /// construction, so a node always exists.
    pub fn nearest_node(&self, x: f64, y: f64) -> NodeId {
        let target = Point::new(x, y);
        let mut nearest = NodeId(0);
        let mut best = f64::INFINITY;
        for (i, node) in self.nodes.iter().enumerate() {
            let dist = node.position.distance_to(target);
            if dist < best {
                best = dist;
                nearest = NodeId(i as u32);
            }
        }
        nearest
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &RoadNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId(i as u32), node))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(id: &str, x: f64, y: f64, connections: &[&str]) -> NodeSpec {
        NodeSpec {
            id: id.to_string(),
            x,
            y,
            zone: "test".to_string(),
            connections: connections.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn empty_network_is_rejected() {
        let err = RoadGraph::from_specs(&[]).expect_err("empty network");
        assert!(matches!(err, MapError::EmptyNetwork));
    }

    #[test]
    fn duplicate_labels_are_rejected() {
        let specs = [spec("a", 0.0, 0.0, &[]), spec("a", 1.0, 0.0, &[])];
        let err = RoadGraph::from_specs(&specs).expect_err("duplicate label");
        assert!(matches!(err, MapError::DuplicateNode(label) if label == "a"));
    }

    #[test]
    fn unknown_neighbor_is_rejected() {
        let specs = [spec("a", 0.0, 0.0, &["ghost"])];
        let err = RoadGraph::from_specs(&specs).expect_err("unknown neighbor");
        assert!(
            matches!(err, MapError::UnknownNeighbor { node, neighbor } if node == "a" && neighbor == "ghost")
        );
    }

    #[test]
    fn one_sided_adjacency_is_symmetrized() {
        let specs = [spec("a", 0.0, 0.0, &["b"]), spec("b", 1.0, 0.0, &[])];
        let graph = RoadGraph::from_specs(&specs).expect("graph");
        let a = graph.node_by_label("a").expect("a");
        let b = graph.node_by_label("b").expect("b");
        assert!(graph.node(b).expect("node b").neighbors.contains(&a));
        assert!(graph.node(a).expect("node a").neighbors.contains(&b));
    }

    #[test]
    fn nearest_node_uses_euclidean_distance() {
        let specs = [
            spec("a", 0.0, 0.0, &[]),
            spec("b", 10.0, 0.0, &[]),
            spec("c", 4.0, 3.0, &[]),
        ];
        let graph = RoadGraph::from_specs(&specs).expect("graph");
        let nearest = graph.nearest_node(5.0, 2.0);
        assert_eq!(nearest, graph.node_by_label("c").expect("c"));
    }

    #[test]
    fn nearest_node_ties_break_by_insertion_order() {
        let specs = [
            spec("first", -1.0, 0.0, &[]),
            spec("second", 1.0, 0.0, &[]),
        ];
        let graph = RoadGraph::from_specs(&specs).expect("graph");
        assert_eq!(
            graph.nearest_node(0.0, 0.0),
            graph.node_by_label("first").expect("first")
        );
    }

    #[test]
    fn lerp_clamps_t() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert_eq!(a.lerp(b, 0.5).x, 5.0);
        assert_eq!(a.lerp(b, 1.5).x, 10.0);
        assert_eq!(a.lerp(b, -0.5).x, 0.0);
    }
}
