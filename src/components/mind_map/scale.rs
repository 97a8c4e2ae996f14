//! Zoom-dependent scaling for mind-map visuals.
//!
//! Node boxes and labels are world-space geometry and scale freely with zoom,
//! but interaction affordances (connection handles, stroke widths, dash
//! patterns) should hold a readable screen size. This module centralizes how
//! each of those values responds to the current zoom level.
//!
//! # Coordinate Spaces
//!
//! - **World-space**: the diagram's coordinate system. Values scale with zoom.
//! - **Screen-space**: canvas pixels. Values stay constant regardless of zoom.

/// Defines how a visual property scales with zoom level.
#[derive(Clone, Debug)]
#[allow(
	dead_code,
	reason = "World variant completes the API for users customizing ScaleConfig"
)]
pub enum ScaleBehavior {
	/// Constant world-space size. Appears larger when zoomed in.
	World,
	/// Constant screen-space size (pixels). Unaffected by zoom.
	Screen,
	/// World-space scaling, clamped to min/max screen-space bounds.
	/// Use `f64::NEG_INFINITY` or `f64::INFINITY` for unbounded.
	Clamped { min_screen: f64, max_screen: f64 },
}

impl ScaleBehavior {
	/// Compute the world-space value for a given base value and zoom level.
	///
	/// The returned value is used directly in world-space drawing commands
	/// (after the canvas transform has been applied).
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::World => base,
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => {
				// screen_size = world_size * k, so the clamp bounds divide by k
				let min_world = min_screen / k;
				let max_world = max_screen / k;
				base.clamp(min_world, max_world)
			}
		}
	}
}

/// Scale configuration for the mind-map surface.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	/// Visible handle dot radius in world units.
	pub handle_radius: f64,
	/// How the handle dot scales with zoom.
	pub handle_behavior: ScaleBehavior,
	/// Handle hit-test radius in screen pixels.
	pub handle_hit_radius: f64,
	/// Edge stroke width in screen pixels.
	pub edge_width: f64,
	/// Node border width in screen pixels.
	pub border_width: f64,
	/// Connection preview dash pattern (dash, gap) in screen pixels.
	pub preview_dash: (f64, f64),
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			handle_radius: 4.0,
			handle_behavior: ScaleBehavior::Clamped {
				min_screen: 3.0,
				max_screen: 8.0,
			},
			handle_hit_radius: 12.0,
			edge_width: 1.0,
			border_width: 1.0,
			preview_dash: (6.0, 4.0),
		}
	}
}

/// Pre-computed scale values for a specific zoom level.
///
/// Create this once per frame and pass it to rendering functions.
/// All sizes are in world-space, ready to use after the canvas transform.
#[derive(Clone, Debug)]
pub struct ScaledValues {
	/// Current zoom level.
	pub k: f64,
	/// Handle dot radius in world-space.
	pub handle_radius: f64,
	/// Handle hit radius in world-space.
	pub handle_hit_radius: f64,
	/// Edge stroke width in world-space.
	pub edge_width: f64,
	/// Node border width in world-space.
	pub border_width: f64,
	/// Preview dash pattern in world-space.
	pub preview_dash: (f64, f64),
}

impl ScaledValues {
	/// Compute scaled values from configuration and current zoom level.
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		Self {
			k,
			handle_radius: config.handle_behavior.apply(config.handle_radius, k),
			handle_hit_radius: ScaleBehavior::Screen.apply(config.handle_hit_radius, k),
			edge_width: config.edge_width / k,
			border_width: config.border_width / k,
			preview_dash: (config.preview_dash.0 / k, config.preview_dash.1 / k),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn screen_behavior_counteracts_zoom() {
		assert_eq!(ScaleBehavior::Screen.apply(12.0, 2.0), 6.0);
		assert_eq!(ScaleBehavior::Screen.apply(12.0, 0.5), 24.0);
	}

	#[test]
	fn clamped_behavior_bounds_screen_size() {
		let b = ScaleBehavior::Clamped {
			min_screen: 3.0,
			max_screen: 8.0,
		};
		// 4 world units at k=4 would be 16 screen px; clamp to 8 px = 2 world.
		assert_eq!(b.apply(4.0, 4.0), 2.0);
		// At k=0.5 it would be 2 screen px; clamp to 3 px = 6 world.
		assert_eq!(b.apply(4.0, 0.5), 6.0);
		// Unconstrained in between.
		assert_eq!(b.apply(4.0, 1.0), 4.0);
	}

	#[test]
	fn scaled_values_hold_screen_constant_widths() {
		let scale = ScaledValues::new(&ScaleConfig::default(), 2.0);
		assert_eq!(scale.edge_width, 0.5);
		assert_eq!(scale.handle_hit_radius, 6.0);
		assert_eq!(scale.preview_dash, (3.0, 2.0));
	}
}
