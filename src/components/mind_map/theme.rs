//! Visual styling for the mind map.
//!
//! Colors and per-element style configuration. The single built-in theme is a
//! light editor look: white canvas, line grid, green accent for connections.

/// RGBA color representation.
#[derive(Clone, Copy, Debug)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Background style configuration.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	/// Canvas fill color.
	pub color: Color,
	/// Grid line color.
	pub grid_color: Color,
	/// Grid spacing in world units.
	pub grid_gap: f64,
}

/// Edge visual style, shared by settled edges and the connection preview.
/// Stroke widths are zoom-dependent and live in the scale configuration.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	/// Stroke color.
	pub color: Color,
}

/// Node box visual style and label metrics.
///
/// Label size and padding are world units: node boxes live in the diagram's
/// coordinate space and scale with zoom like any other world geometry.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Box fill color.
	pub fill: Color,
	/// Box border color.
	pub border_color: Color,
	/// Border color while the node is selected.
	pub selected_color: Color,
	/// Label text color.
	pub label_color: Color,
	/// Connection handle fill color.
	pub handle_color: Color,
	/// Label font size in world units.
	pub label_size: f64,
	/// Horizontal padding between label and box edge, world units.
	pub padding_x: f64,
	/// Vertical padding between label and box edge, world units.
	pub padding_y: f64,
	/// Minimum box width, world units.
	pub min_width: f64,
}

impl NodeStyle {
	/// Canvas font string for label measurement and drawing.
	pub fn label_font(&self) -> String {
		format!("{}px sans-serif", self.label_size)
	}
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub background: BackgroundStyle,
	pub edge: EdgeStyle,
	pub node: NodeStyle,
}

impl Theme {
	/// Light editor theme (default).
	pub fn light() -> Self {
		Self {
			background: BackgroundStyle {
				color: Color::rgb(250, 250, 250),
				grid_color: Color::rgba(204, 204, 204, 0.8),
				grid_gap: 20.0,
			},
			edge: EdgeStyle {
				color: Color::rgb(46, 204, 113),
			},
			node: NodeStyle {
				fill: Color::rgb(255, 255, 255),
				border_color: Color::rgb(189, 195, 199),
				selected_color: Color::rgb(46, 204, 113),
				label_color: Color::rgb(44, 62, 80),
				handle_color: Color::rgb(46, 204, 113),
				label_size: 13.0,
				padding_x: 10.0,
				padding_y: 7.0,
				min_width: 60.0,
			},
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::light()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn opaque_colors_serialize_as_hex() {
		assert_eq!(Color::rgb(46, 204, 113).to_css(), "#2ecc71");
	}

	#[test]
	fn translucent_colors_serialize_as_rgba() {
		assert_eq!(
			Color::rgba(204, 204, 204, 0.8).to_css(),
			"rgba(204, 204, 204, 0.8)"
		);
	}
}
