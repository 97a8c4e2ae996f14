//! Canvas rendering for the mind map.
//!
//! Each frame runs in passes:
//! 1. Geometry sync: measure labels and write absolute positions and sizes
//!    back into the store (this is the layout pass that makes nodes hittable
//!    and spawnable).
//! 2. Background fill (screen space), then grid, edges, connection preview,
//!    and nodes (world space, under the pan/zoom transform).

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::scale::{ScaleConfig, ScaledValues};
use super::state::CanvasState;
use super::store::{MindMapStore, NodeGeometry};
use super::theme::Theme;

/// Curvature of edge beziers, matching the feel of the usual top-to-bottom
/// flow-diagram connector.
const CURVATURE: f64 = 0.25;

/// Renders the complete mind map to the canvas.
pub fn render(
	store: &mut MindMapStore,
	state: &CanvasState,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	theme: &Theme,
) {
	let scale = ScaledValues::new(config, state.transform.k);

	sync_geometry(store, ctx, theme);

	ctx.set_fill_style_str(&theme.background.color.to_css());
	ctx.fill_rect(0.0, 0.0, state.width, state.height);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	draw_grid(state, ctx, theme);
	draw_edges(store, ctx, &scale, theme);
	draw_connection_preview(store, state, ctx, &scale, theme);
	draw_nodes(store, ctx, &scale, theme);

	ctx.restore();
}

/// Measure every node's label and write back its geometry.
///
/// Width comes from the rendered label plus padding, height from the font
/// metrics; the absolute top-left is derived from the center-anchored
/// position resolved through the parent chain. Runs every frame so dragged
/// parents carry their subtree's geometry along.
fn sync_geometry(store: &mut MindMapStore, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	ctx.set_font(&theme.node.label_font());

	let mut measured = Vec::with_capacity(store.nodes().len());
	for node in store.nodes() {
		let text_width = ctx
			.measure_text(&node.label)
			.map(|m| m.width())
			.unwrap_or(0.0);
		let width = (text_width + theme.node.padding_x * 2.0).max(theme.node.min_width);
		let height = theme.node.label_size + theme.node.padding_y * 2.0;
		let Some(center) = store.absolute_center(&node.id) else {
			continue;
		};
		measured.push((
			node.id.clone(),
			NodeGeometry {
				x: center.x - width / 2.0,
				y: center.y - height / 2.0,
				width,
				height,
			},
		));
	}
	for (id, geometry) in measured {
		store.set_geometry(&id, geometry);
	}
}

/// Line grid over the visible logical-space region.
fn draw_grid(state: &CanvasState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let gap = theme.background.grid_gap;
	let (left, top) = state.transform.screen_to_graph(0.0, 0.0);
	let (right, bottom) = state.transform.screen_to_graph(state.width, state.height);

	ctx.set_stroke_style_str(&theme.background.grid_color.to_css());
	ctx.set_line_width(1.0 / state.transform.k);

	ctx.begin_path();
	let mut x = (left / gap).floor() * gap;
	while x <= right {
		ctx.move_to(x, top);
		ctx.line_to(x, bottom);
		x += gap;
	}
	let mut y = (top / gap).floor() * gap;
	while y <= bottom {
		ctx.move_to(left, y);
		ctx.line_to(right, y);
		y += gap;
	}
	ctx.stroke();
}

fn draw_edges(
	store: &MindMapStore,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) {
	ctx.set_stroke_style_str(&theme.edge.color.to_css());
	ctx.set_line_width(scale.edge_width);

	for edge in store.edges() {
		let (Some(source), Some(target)) = (
			store.node(&edge.source).and_then(|n| n.geometry),
			store.node(&edge.target).and_then(|n| n.geometry),
		) else {
			continue;
		};
		draw_bezier(ctx, source.bottom_center(), target.top_center());
	}
}

/// Dashed bezier from the session origin's handle to the live pointer.
fn draw_connection_preview(
	store: &MindMapStore,
	state: &CanvasState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let Some(origin) = state.connect.origin() else {
		return;
	};
	let Some(geometry) = store.node(origin).and_then(|n| n.geometry) else {
		return;
	};

	let pointer = state
		.transform
		.screen_to_graph(state.connect.pointer_x, state.connect.pointer_y);

	ctx.set_stroke_style_str(&theme.edge.color.to_css());
	ctx.set_line_width(scale.edge_width);
	let _ = ctx.set_line_dash(&js_sys::Array::of2(
		&JsValue::from_f64(scale.preview_dash.0),
		&JsValue::from_f64(scale.preview_dash.1),
	));

	draw_bezier(ctx, geometry.bottom_center(), pointer);

	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_nodes(
	store: &MindMapStore,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) {
	ctx.set_font(&theme.node.label_font());
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");

	for node in store.nodes() {
		let Some(g) = node.geometry else {
			continue;
		};

		ctx.set_fill_style_str(&theme.node.fill.to_css());
		ctx.fill_rect(g.x, g.y, g.width, g.height);

		if node.selected {
			ctx.set_stroke_style_str(&theme.node.selected_color.to_css());
			ctx.set_line_width(scale.border_width * 2.0);
		} else {
			ctx.set_stroke_style_str(&theme.node.border_color.to_css());
			ctx.set_line_width(scale.border_width);
		}
		ctx.stroke_rect(g.x, g.y, g.width, g.height);

		ctx.set_fill_style_str(&theme.node.label_color.to_css());
		let _ = ctx.fill_text(&node.label, g.x + g.width / 2.0, g.y + g.height / 2.0);

		let (hx, hy) = g.bottom_center();
		ctx.begin_path();
		let _ = ctx.arc(hx, hy, scale.handle_radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&theme.node.handle_color.to_css());
		ctx.fill();
	}
}

fn draw_bezier(ctx: &CanvasRenderingContext2d, from: (f64, f64), to: (f64, f64)) {
	let ((c1x, c1y), (c2x, c2y)) = bezier_controls(from, to);
	ctx.begin_path();
	ctx.move_to(from.0, from.1);
	let _ = ctx.bezier_curve_to(c1x, c1y, c2x, c2y, to.0, to.1);
	ctx.stroke();
}

/// Control points for a cubic bezier leaving the source downward and entering
/// the target from above.
fn bezier_controls(from: (f64, f64), to: (f64, f64)) -> ((f64, f64), (f64, f64)) {
	let offset = control_offset(to.1 - from.1);
	((from.0, from.1 + offset), (to.0, to.1 - offset))
}

/// Vertical control-point offset. Half the distance when the curve flows
/// forward; when the target sits above the source, the offset grows with the
/// square root of the backtrack so the curve bows out instead of collapsing.
fn control_offset(distance: f64) -> f64 {
	if distance >= 0.0 {
		0.5 * distance
	} else {
		CURVATURE * 25.0 * (-distance).sqrt()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn forward_offset_is_half_the_distance() {
		assert_eq!(control_offset(100.0), 50.0);
		assert_eq!(control_offset(0.0), 0.0);
	}

	#[test]
	fn backward_offset_grows_with_the_square_root() {
		assert_eq!(control_offset(-100.0), 62.5);
	}

	#[test]
	fn controls_stay_on_their_endpoint_verticals() {
		let ((c1x, c1y), (c2x, c2y)) = bezier_controls((10.0, 0.0), (90.0, 80.0));
		assert_eq!(c1x, 10.0);
		assert_eq!(c2x, 90.0);
		assert_eq!(c1y, 40.0);
		assert_eq!(c2y, 40.0);
	}
}
