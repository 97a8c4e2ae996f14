//! Seed data structures for input to the mind-map component.

use serde::Deserialize;

/// A node record in the seed data.
#[derive(Clone, Debug, Deserialize)]
pub struct NodeSeed {
	/// Unique identifier for this node. Used to reference nodes in edges
	/// and as the parent of child nodes.
	pub id: String,
	/// Display label shown inside the node box.
	pub label: String,
	/// Horizontal position. Relative to the parent's center when `parent`
	/// is set, otherwise relative to the diagram origin.
	#[serde(default)]
	pub x: f64,
	/// Vertical position, same frame as `x`.
	#[serde(default)]
	pub y: f64,
	/// Optional parent node ID.
	#[serde(default)]
	pub parent: Option<String>,
}

/// An edge between two nodes in the seed data.
#[derive(Clone, Debug, Deserialize)]
pub struct EdgeSeed {
	/// Source node ID.
	pub source: String,
	/// Target node ID.
	pub target: String,
}

/// Complete seed data: nodes and edges.
#[derive(Clone, Debug, Deserialize)]
pub struct MindMapData {
	pub nodes: Vec<NodeSeed>,
	#[serde(default)]
	pub edges: Vec<EdgeSeed>,
}

impl Default for MindMapData {
	/// A single root node at the diagram origin.
	fn default() -> Self {
		Self {
			nodes: vec![NodeSeed {
				id: "root".to_string(),
				label: "Mind Map".to_string(),
				x: 0.0,
				y: 0.0,
				parent: None,
			}],
			edges: Vec::new(),
		}
	}
}
