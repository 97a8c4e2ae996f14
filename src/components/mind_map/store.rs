//! Graph state store: the canonical node and edge collections.
//!
//! The store is the sole owner of the mind map's nodes and edges. All writes
//! go through its mutation methods; the renderer and placement logic only
//! read. Geometry (absolute position and measured size) is written back by
//! the render pass once a node's label has been measured, so freshly created
//! nodes have no geometry until the next frame.

use std::collections::HashSet;

use super::types::MindMapData;

/// Node identifier. Seed data supplies arbitrary strings; nodes created at
/// runtime get sequential ids from the store.
pub type NodeId = String;

/// A point in the diagram's logical coordinate space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
	pub x: f64,
	pub y: f64,
}

/// Measured on-screen geometry of a node, in logical coordinates.
///
/// `(x, y)` is the absolute top-left corner of the box. Only present after
/// the render pass has measured the node's label.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeGeometry {
	pub x: f64,
	pub y: f64,
	pub width: f64,
	pub height: f64,
}

impl NodeGeometry {
	/// Whether a logical-space point falls inside the box.
	pub fn contains(&self, x: f64, y: f64) -> bool {
		x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
	}

	/// Midpoint of the bottom border, where the connection handle sits and
	/// outgoing edges attach.
	pub fn bottom_center(&self) -> (f64, f64) {
		(self.x + self.width / 2.0, self.y + self.height)
	}

	/// Midpoint of the top border, where incoming edges attach.
	pub fn top_center(&self) -> (f64, f64) {
		(self.x + self.width / 2.0, self.y)
	}
}

/// A node in the mind map.
///
/// Nodes are center-anchored: `position` names the node's center, measured
/// relative to the parent's center (or the diagram origin for roots).
#[derive(Clone, Debug)]
pub struct Node {
	pub id: NodeId,
	/// Display label, editable in place.
	pub label: String,
	/// Position relative to the parent's center.
	pub position: Position,
	/// Parent node, if this node was spawned as (or seeded as) a child.
	pub parent: Option<NodeId>,
	/// Whether the node is currently selected.
	pub selected: bool,
	/// Measured geometry, absent until the first layout pass.
	pub geometry: Option<NodeGeometry>,
}

/// A directed edge between two nodes. Both endpoints reference existing
/// nodes; the store maintains this invariant.
#[derive(Clone, Debug)]
pub struct Edge {
	pub id: String,
	pub source: NodeId,
	pub target: NodeId,
}

/// An incremental node change, applied to the store unmodified.
#[derive(Clone, Debug)]
pub enum NodeChange {
	/// Move a node to a new (parent-relative) position.
	Position { id: NodeId, position: Position },
	/// Select or deselect a node.
	Select { id: NodeId, selected: bool },
}

/// Which part of a node a pointer position landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitRegion {
	/// The connection handle dot below the box.
	Handle,
	/// The node box itself.
	Body,
}

/// Owns the node/edge collections and every mutation applied to them.
#[derive(Debug, Default)]
pub struct MindMapStore {
	nodes: Vec<Node>,
	edges: Vec<Edge>,
	next_id: u64,
}

impl MindMapStore {
	/// Build a store from seed data.
	///
	/// Parent references and edges naming unknown nodes are dropped, so the
	/// endpoint invariant holds from the start.
	pub fn from_data(data: &MindMapData) -> Self {
		let mut store = Self::default();
		let ids: HashSet<&str> = data.nodes.iter().map(|n| n.id.as_str()).collect();

		for seed in &data.nodes {
			let parent = seed
				.parent
				.clone()
				.filter(|p| p != &seed.id && ids.contains(p.as_str()));
			store.nodes.push(Node {
				id: seed.id.clone(),
				label: seed.label.clone(),
				position: Position {
					x: seed.x,
					y: seed.y,
				},
				parent,
				selected: false,
				geometry: None,
			});
		}

		for seed in &data.edges {
			if ids.contains(seed.source.as_str()) && ids.contains(seed.target.as_str()) {
				let id = store.fresh_id("edge");
				store.edges.push(Edge {
					id,
					source: seed.source.clone(),
					target: seed.target.clone(),
				});
			}
		}

		store
	}

	/// Next unused sequential id with the given prefix. Seed data may already
	/// occupy ids of the same shape, so taken ids are skipped.
	fn fresh_id(&mut self, prefix: &str) -> String {
		loop {
			self.next_id += 1;
			let id = format!("{prefix}-{}", self.next_id);
			let taken =
				self.nodes.iter().any(|n| n.id == id) || self.edges.iter().any(|e| e.id == id);
			if !taken {
				return id;
			}
		}
	}

	/// All nodes, in insertion order. Later nodes paint on top.
	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	/// All edges, in insertion order.
	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	/// Look up a node by id.
	pub fn node(&self, id: &str) -> Option<&Node> {
		self.nodes.iter().find(|n| n.id == id)
	}

	fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
		self.nodes.iter_mut().find(|n| n.id == id)
	}

	/// Append a child node under `parent_id` at the given parent-relative
	/// position, together with the parent→child edge.
	///
	/// Returns the new node's id, or `None` if the parent no longer resolves
	/// (the gesture is then silently dropped).
	pub fn add_child_node(&mut self, parent_id: &str, position: Position) -> Option<NodeId> {
		self.node(parent_id)?;
		let id = self.fresh_id("node");
		let edge_id = self.fresh_id("edge");

		self.nodes.push(Node {
			id: id.clone(),
			label: "New Node".to_string(),
			position,
			parent: Some(parent_id.to_string()),
			selected: false,
			geometry: None,
		});
		self.edges.push(Edge {
			id: edge_id,
			source: parent_id.to_string(),
			target: id.clone(),
		});

		Some(id)
	}

	/// Apply incremental position/selection changes unmodified. Changes for
	/// unknown nodes are ignored.
	pub fn apply_node_changes(&mut self, changes: Vec<NodeChange>) {
		for change in changes {
			match change {
				NodeChange::Position { id, position } => {
					if let Some(node) = self.node_mut(&id) {
						node.position = position;
					}
				}
				NodeChange::Select { id, selected } => {
					if let Some(node) = self.node_mut(&id) {
						node.selected = selected;
					}
				}
			}
		}
	}

	/// Replace a node's display label.
	pub fn update_node_label(&mut self, id: &str, label: &str) {
		if let Some(node) = self.node_mut(id) {
			node.label = label.to_string();
		}
	}

	/// Write back measured geometry for a node. Called by the render pass.
	pub fn set_geometry(&mut self, id: &str, geometry: NodeGeometry) {
		if let Some(node) = self.node_mut(id) {
			node.geometry = Some(geometry);
		}
	}

	/// Absolute center of a node in logical coordinates, resolved by walking
	/// the parent chain. Hop count is bounded in case seed data smuggled in a
	/// parent cycle.
	pub fn absolute_center(&self, id: &str) -> Option<Position> {
		let mut node = self.node(id)?;
		let mut pos = node.position;
		let mut hops = 0;
		while let Some(parent_id) = &node.parent {
			let Some(parent) = self.node(parent_id) else {
				break;
			};
			pos.x += parent.position.x;
			pos.y += parent.position.y;
			node = parent;
			hops += 1;
			if hops > self.nodes.len() {
				break;
			}
		}
		Some(pos)
	}

	/// Topmost node at a logical-space position, with the region that was
	/// hit. The handle dot is checked before the box so it stays grabbable
	/// where it overlaps the border. Unmeasured nodes cannot be hit.
	pub fn hit_test(&self, x: f64, y: f64, handle_radius: f64) -> Option<(NodeId, HitRegion)> {
		// Walk back-to-front: last painted is topmost.
		for node in self.nodes.iter().rev() {
			let Some(g) = &node.geometry else {
				continue;
			};
			let (hx, hy) = g.bottom_center();
			let (dx, dy) = (x - hx, y - hy);
			if (dx * dx + dy * dy).sqrt() <= handle_radius {
				return Some((node.id.clone(), HitRegion::Handle));
			}
			if g.contains(x, y) {
				return Some((node.id.clone(), HitRegion::Body));
			}
		}
		None
	}

	/// Topmost node whose box contains a logical-space position.
	pub fn node_at_position(&self, x: f64, y: f64) -> Option<&Node> {
		self.nodes
			.iter()
			.rev()
			.find(|n| n.geometry.is_some_and(|g| g.contains(x, y)))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::mind_map::types::{EdgeSeed, NodeSeed};

	fn seed(id: &str, label: &str, x: f64, y: f64, parent: Option<&str>) -> NodeSeed {
		NodeSeed {
			id: id.to_string(),
			label: label.to_string(),
			x,
			y,
			parent: parent.map(str::to_string),
		}
	}

	fn geometry(x: f64, y: f64, width: f64, height: f64) -> NodeGeometry {
		NodeGeometry {
			x,
			y,
			width,
			height,
		}
	}

	#[test]
	fn from_data_drops_dangling_edges() {
		let data = MindMapData {
			nodes: vec![seed("a", "A", 0.0, 0.0, None), seed("b", "B", 10.0, 0.0, None)],
			edges: vec![
				EdgeSeed {
					source: "a".to_string(),
					target: "b".to_string(),
				},
				EdgeSeed {
					source: "a".to_string(),
					target: "ghost".to_string(),
				},
			],
		};
		let store = MindMapStore::from_data(&data);
		assert_eq!(store.edges().len(), 1);
		assert_eq!(store.edges()[0].source, "a");
		assert_eq!(store.edges()[0].target, "b");
	}

	#[test]
	fn from_data_drops_unknown_and_self_parents() {
		let data = MindMapData {
			nodes: vec![
				seed("a", "A", 0.0, 0.0, Some("missing")),
				seed("b", "B", 0.0, 0.0, Some("b")),
			],
			edges: Vec::new(),
		};
		let store = MindMapStore::from_data(&data);
		assert_eq!(store.node("a").unwrap().parent, None);
		assert_eq!(store.node("b").unwrap().parent, None);
	}

	#[test]
	fn add_child_node_appends_node_and_edge() {
		let mut store = MindMapStore::from_data(&MindMapData::default());
		let child = store
			.add_child_node("root", Position { x: 125.0, y: 45.0 })
			.unwrap();

		let node = store.node(&child).unwrap();
		assert_eq!(node.label, "New Node");
		assert_eq!(node.parent.as_deref(), Some("root"));
		assert_eq!(node.position, Position { x: 125.0, y: 45.0 });
		assert!(node.geometry.is_none());
		assert!(!node.selected);

		assert_eq!(store.edges().len(), 1);
		assert_eq!(store.edges()[0].source, "root");
		assert_eq!(store.edges()[0].target, child);
	}

	#[test]
	fn add_child_node_with_unresolved_parent_is_a_noop() {
		let mut store = MindMapStore::from_data(&MindMapData::default());
		assert!(
			store
				.add_child_node("gone", Position { x: 0.0, y: 0.0 })
				.is_none()
		);
		assert_eq!(store.nodes().len(), 1);
		assert!(store.edges().is_empty());
	}

	#[test]
	fn generated_ids_skip_ids_taken_by_seed_data() {
		let data = MindMapData {
			nodes: vec![seed("node-1", "Taken", 0.0, 0.0, None)],
			edges: Vec::new(),
		};
		let mut store = MindMapStore::from_data(&data);
		let child = store
			.add_child_node("node-1", Position { x: 0.0, y: 0.0 })
			.unwrap();
		assert_ne!(child, "node-1");
		assert!(store.node(&child).is_some());
	}

	#[test]
	fn node_changes_apply_unmodified() {
		let mut store = MindMapStore::from_data(&MindMapData::default());
		store.apply_node_changes(vec![
			NodeChange::Position {
				id: "root".to_string(),
				position: Position { x: -3.0, y: 8.5 },
			},
			NodeChange::Select {
				id: "root".to_string(),
				selected: true,
			},
		]);
		let node = store.node("root").unwrap();
		assert_eq!(node.position, Position { x: -3.0, y: 8.5 });
		assert!(node.selected);
	}

	#[test]
	fn label_update_targets_one_node() {
		let mut store = MindMapStore::from_data(&MindMapData::default());
		let child = store
			.add_child_node("root", Position { x: 10.0, y: 10.0 })
			.unwrap();
		store.update_node_label(&child, "Groceries");
		assert_eq!(store.node(&child).unwrap().label, "Groceries");
		assert_eq!(store.node("root").unwrap().label, "Mind Map");
	}

	#[test]
	fn absolute_center_accumulates_the_parent_chain() {
		let data = MindMapData {
			nodes: vec![
				seed("root", "Root", 100.0, 50.0, None),
				seed("child", "Child", 30.0, 20.0, Some("root")),
				seed("grandchild", "Grandchild", -10.0, 5.0, Some("child")),
			],
			edges: Vec::new(),
		};
		let store = MindMapStore::from_data(&data);
		assert_eq!(
			store.absolute_center("grandchild"),
			Some(Position { x: 120.0, y: 75.0 })
		);
	}

	#[test]
	fn hit_test_distinguishes_handle_and_body() {
		let mut store = MindMapStore::from_data(&MindMapData::default());
		store.set_geometry("root", geometry(100.0, 100.0, 80.0, 30.0));

		// Box interior.
		assert_eq!(
			store.hit_test(110.0, 110.0, 6.0),
			Some(("root".to_string(), HitRegion::Body))
		);
		// Just below the bottom border, within the handle circle.
		assert_eq!(
			store.hit_test(140.0, 134.0, 6.0),
			Some(("root".to_string(), HitRegion::Handle))
		);
		// Far away.
		assert_eq!(store.hit_test(0.0, 0.0, 6.0), None);
	}

	#[test]
	fn hit_test_prefers_the_topmost_node() {
		let data = MindMapData {
			nodes: vec![
				seed("below", "Below", 0.0, 0.0, None),
				seed("above", "Above", 0.0, 0.0, None),
			],
			edges: Vec::new(),
		};
		let mut store = MindMapStore::from_data(&data);
		store.set_geometry("below", geometry(0.0, 0.0, 50.0, 30.0));
		store.set_geometry("above", geometry(20.0, 10.0, 50.0, 30.0));

		assert_eq!(
			store.hit_test(30.0, 20.0, 0.1),
			Some(("above".to_string(), HitRegion::Body))
		);
	}

	#[test]
	fn unmeasured_nodes_cannot_be_hit() {
		let store = MindMapStore::from_data(&MindMapData::default());
		assert!(store.node_at_position(0.0, 0.0).is_none());
		assert_eq!(store.hit_test(0.0, 0.0, 12.0), None);
	}
}
