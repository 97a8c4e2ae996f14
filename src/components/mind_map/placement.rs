//! Spawn-position math for connection drags released over empty canvas.

use super::state::ViewTransform;
use super::store::{NodeGeometry, Position};

/// Compute the position for a child node spawned by releasing a connection
/// drag at the given pointer location.
///
/// `parent` is the origin node's measured geometry; `None` means the node has
/// not completed a layout pass yet (normal right after creation), and the
/// spawn is skipped rather than retried.
///
/// The pointer arrives in screen coordinates. It is shifted into canvas-local
/// coordinates with the canvas bounding rect, projected into logical space
/// through the inverse viewport transform, then expressed relative to the
/// parent's center: child positions are stored parent-relative, and nodes are
/// anchored at their center, so the offset is measured from the parent's
/// center rather than its top-left corner.
pub fn child_spawn_position(
	transform: &ViewTransform,
	canvas_left: f64,
	canvas_top: f64,
	client_x: f64,
	client_y: f64,
	parent: Option<&NodeGeometry>,
) -> Option<Position> {
	let parent = parent?;
	let (gx, gy) = transform.screen_to_graph(client_x - canvas_left, client_y - canvas_top);
	Some(Position {
		x: gx - parent.x + parent.width / 2.0,
		y: gy - parent.y + parent.height / 2.0,
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn identity_projection_offsets_from_the_parent_center() {
		// Parent at absolute (100, 100), 50x50; untransformed viewport;
		// canvas at the screen origin; release at (200, 120).
		let transform = ViewTransform {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		};
		let parent = NodeGeometry {
			x: 100.0,
			y: 100.0,
			width: 50.0,
			height: 50.0,
		};
		let position =
			child_spawn_position(&transform, 0.0, 0.0, 200.0, 120.0, Some(&parent)).unwrap();
		assert_eq!(position, Position { x: 125.0, y: 45.0 });
	}

	#[test]
	fn pan_zoom_and_canvas_offset_are_all_removed() {
		let transform = ViewTransform {
			x: 50.0,
			y: 30.0,
			k: 2.0,
		};
		let parent = NodeGeometry {
			x: 10.0,
			y: 20.0,
			width: 30.0,
			height: 40.0,
		};
		// Canvas sits at screen (10, 10); pointer at (210, 130) is canvas-local
		// (200, 120), which projects to logical (75, 45).
		let position =
			child_spawn_position(&transform, 10.0, 10.0, 210.0, 130.0, Some(&parent)).unwrap();
		assert_eq!(position, Position { x: 80.0, y: 45.0 });
	}

	#[test]
	fn unmeasured_parent_yields_no_position() {
		let transform = ViewTransform {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		};
		assert!(child_spawn_position(&transform, 0.0, 0.0, 200.0, 120.0, None).is_none());
	}
}
