//! Canvas interaction state: viewport transform, gesture tracking, and the
//! connection-drag session.
//!
//! Everything here is plain data mutated synchronously from event handlers.
//! The connect-end decision lives in [`CanvasState::finish_connection`] so the
//! whole gesture contract is testable without a DOM.

use super::placement;
use super::store::{MindMapStore, NodeId, Position};

/// Pan and zoom transform applied to the entire diagram view.
#[derive(Clone, Debug)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor (1.0 = 100%, clamped to 0.1..10.0).
	pub k: f64,
}

impl ViewTransform {
	/// Project canvas-local screen coordinates into logical space.
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		((sx - self.x) / self.k, (sy - self.y) / self.k)
	}

	/// Project logical coordinates onto the canvas.
	pub fn graph_to_screen(&self, gx: f64, gy: f64) -> (f64, f64) {
		(gx * self.k + self.x, gy * self.k + self.y)
	}

	/// Scale by `factor` while keeping the canvas-local point `(x, y)` fixed.
	/// Zoom is clamped to 0.1..10.0.
	pub fn zoom_at(&mut self, x: f64, y: f64, factor: f64) {
		let new_k = (self.k * factor).clamp(0.1, 10.0);
		let ratio = new_k / self.k;
		self.x = x - (x - self.x) * ratio;
		self.y = y - (y - self.y) * ratio;
		self.k = new_k;
	}
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Tracks an in-progress node drag operation.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node: Option<NodeId>,
	pub start_x: f64,
	pub start_y: f64,
	/// The node's (parent-relative) position when the drag began.
	pub node_start: Position,
}

/// The connection-drag session: alive between a mousedown on a node's handle
/// and the following mouseup, and cleared unconditionally after every
/// attempt so no origin survives into the next gesture.
#[derive(Clone, Debug, Default)]
pub struct ConnectState {
	origin: Option<NodeId>,
	/// Live pointer position in canvas-local screen coordinates, for the
	/// preview line.
	pub pointer_x: f64,
	pub pointer_y: f64,
}

impl ConnectState {
	/// Record the origin node and the pointer's starting position.
	pub fn start(&mut self, origin: NodeId, pointer_x: f64, pointer_y: f64) {
		self.origin = Some(origin);
		self.pointer_x = pointer_x;
		self.pointer_y = pointer_y;
	}

	/// The origin node id, while a session is active.
	pub fn origin(&self) -> Option<&NodeId> {
		self.origin.as_ref()
	}

	/// Whether a session is active.
	pub fn active(&self) -> bool {
		self.origin.is_some()
	}

	/// Drop the session.
	pub fn clear(&mut self) {
		self.origin = None;
	}
}

/// What completing a connection drag resolved to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConnectOutcome {
	/// Released over an existing node: its label editor should take focus.
	/// No graph mutation.
	FocusLabel(NodeId),
	/// A child node was spawned under the session's origin.
	Spawned(NodeId),
	/// Nothing recognizable under the pointer, or the session/geometry did
	/// not resolve. Silently dropped.
	Ignored,
}

/// All interaction state owned by the canvas component.
#[derive(Clone, Debug)]
pub struct CanvasState {
	pub transform: ViewTransform,
	pub pan: PanState,
	pub drag: DragState,
	pub connect: ConnectState,
	pub width: f64,
	pub height: f64,
}

impl CanvasState {
	/// Fresh state with the logical origin centered in the viewport.
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			pan: PanState::default(),
			drag: DragState::default(),
			connect: ConnectState::default(),
			width,
			height,
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	/// Complete a connection drag at the given pointer position.
	///
	/// Released over a node: that node's label takes focus and nothing is
	/// created (the box is the label's interactive region). Released over
	/// empty canvas with an active session: the origin is resolved, a spawn
	/// position computed, and the child added; if any step fails to resolve,
	/// the gesture is a silent no-op. Either way the session ends here.
	///
	/// At most one store mutation happens per call.
	pub fn finish_connection(
		&mut self,
		store: &mut MindMapStore,
		canvas_left: f64,
		canvas_top: f64,
		client_x: f64,
		client_y: f64,
	) -> ConnectOutcome {
		let origin = self.connect.origin.take();

		let (gx, gy) = self
			.transform
			.screen_to_graph(client_x - canvas_left, client_y - canvas_top);
		if let Some(node) = store.node_at_position(gx, gy) {
			return ConnectOutcome::FocusLabel(node.id.clone());
		}

		let Some(origin) = origin else {
			return ConnectOutcome::Ignored;
		};
		let Some(parent) = store.node(&origin) else {
			return ConnectOutcome::Ignored;
		};
		let Some(position) = placement::child_spawn_position(
			&self.transform,
			canvas_left,
			canvas_top,
			client_x,
			client_y,
			parent.geometry.as_ref(),
		) else {
			return ConnectOutcome::Ignored;
		};

		match store.add_child_node(&origin, position) {
			Some(id) => ConnectOutcome::Spawned(id),
			None => ConnectOutcome::Ignored,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::mind_map::store::NodeGeometry;
	use crate::components::mind_map::types::MindMapData;

	fn store_with_measured_root() -> MindMapStore {
		let mut store = MindMapStore::from_data(&MindMapData::default());
		store.set_geometry(
			"root",
			NodeGeometry {
				x: 100.0,
				y: 100.0,
				width: 50.0,
				height: 50.0,
			},
		);
		store
	}

	fn identity_state() -> CanvasState {
		let mut state = CanvasState::new(800.0, 600.0);
		state.transform = ViewTransform {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		};
		state
	}

	#[test]
	fn release_without_a_session_mutates_nothing() {
		let mut store = store_with_measured_root();
		let mut state = identity_state();

		let outcome = state.finish_connection(&mut store, 0.0, 0.0, 400.0, 400.0);
		assert_eq!(outcome, ConnectOutcome::Ignored);
		assert_eq!(store.nodes().len(), 1);
		assert!(store.edges().is_empty());
	}

	#[test]
	fn release_over_empty_canvas_spawns_one_child_at_the_projected_offset() {
		let mut store = store_with_measured_root();
		let mut state = identity_state();
		state.connect.start("root".to_string(), 125.0, 150.0);

		let child = match state.finish_connection(&mut store, 0.0, 0.0, 200.0, 120.0) {
			ConnectOutcome::Spawned(child) => child,
			other => panic!("expected a spawned child, got {other:?}"),
		};

		assert_eq!(store.nodes().len(), 2);
		assert_eq!(store.edges().len(), 1);
		assert_eq!(
			store.node(&child).unwrap().position,
			Position { x: 125.0, y: 45.0 }
		);
		assert!(!state.connect.active());
	}

	#[test]
	fn release_over_a_node_focuses_its_label_and_creates_nothing() {
		let mut store = store_with_measured_root();
		let mut state = identity_state();
		state.connect.start("root".to_string(), 125.0, 150.0);

		let outcome = state.finish_connection(&mut store, 0.0, 0.0, 120.0, 110.0);
		assert_eq!(outcome, ConnectOutcome::FocusLabel("root".to_string()));
		assert_eq!(store.nodes().len(), 1);
		assert!(store.edges().is_empty());
		assert!(!state.connect.active());
	}

	#[test]
	fn unmeasured_origin_drops_the_gesture() {
		let mut store = MindMapStore::from_data(&MindMapData::default());
		let mut state = identity_state();
		state.connect.start("root".to_string(), 0.0, 0.0);

		let outcome = state.finish_connection(&mut store, 0.0, 0.0, 200.0, 120.0);
		assert_eq!(outcome, ConnectOutcome::Ignored);
		assert_eq!(store.nodes().len(), 1);
		assert!(!state.connect.active());
	}

	#[test]
	fn unresolvable_origin_drops_the_gesture() {
		let mut store = store_with_measured_root();
		let mut state = identity_state();
		state.connect.start("vanished".to_string(), 0.0, 0.0);

		let outcome = state.finish_connection(&mut store, 0.0, 0.0, 200.0, 120.0);
		assert_eq!(outcome, ConnectOutcome::Ignored);
		assert_eq!(store.nodes().len(), 1);
	}

	#[test]
	fn repeated_identical_gestures_spawn_independent_children() {
		let mut store = store_with_measured_root();
		let mut state = identity_state();

		for _ in 0..2 {
			state.connect.start("root".to_string(), 125.0, 150.0);
			let outcome = state.finish_connection(&mut store, 0.0, 0.0, 200.0, 120.0);
			assert!(matches!(outcome, ConnectOutcome::Spawned(_)));
		}

		assert_eq!(store.nodes().len(), 3);
		assert_eq!(store.edges().len(), 2);
		let children: Vec<_> = store
			.nodes()
			.iter()
			.filter(|n| n.parent.is_some())
			.collect();
		assert_eq!(children.len(), 2);
		assert_ne!(children[0].id, children[1].id);
		assert_eq!(children[0].position, children[1].position);
	}

	#[test]
	fn zoom_clamps_and_anchors_the_cursor_point() {
		let mut transform = ViewTransform {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		};
		// The logical point under the cursor must survive the zoom.
		let before = transform.screen_to_graph(200.0, 150.0);
		transform.zoom_at(200.0, 150.0, 1.1);
		let after = transform.screen_to_graph(200.0, 150.0);
		assert!((before.0 - after.0).abs() < 1e-9);
		assert!((before.1 - after.1).abs() < 1e-9);

		for _ in 0..100 {
			transform.zoom_at(200.0, 150.0, 1.1);
		}
		assert_eq!(transform.k, 10.0);
		for _ in 0..200 {
			transform.zoom_at(200.0, 150.0, 0.9);
		}
		assert_eq!(transform.k, 0.1);
	}

	#[test]
	fn projections_round_trip() {
		let transform = ViewTransform {
			x: 37.0,
			y: -12.0,
			k: 1.75,
		};
		let (gx, gy) = transform.screen_to_graph(640.0, 480.0);
		let (sx, sy) = transform.graph_to_screen(gx, gy);
		assert!((sx - 640.0).abs() < 1e-9);
		assert!((sy - 480.0).abs() < 1e-9);
	}
}
