//! mindmap-canvas: an interactive mind-map editor on an HTML canvas.
//!
//! This crate provides a WASM-based mind-map component: nodes and edges on a
//! pannable/zoomable canvas, with child nodes spawned by dragging a
//! connection from a node's handle into empty space.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::mind_map::{EdgeSeed, MindMapCanvas, MindMapData, MindMapStore, NodeSeed};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("mindmap-canvas: logging initialized");
}

/// Load seed data from a script element with id="mind-map-data".
/// Expected format: JSON with { nodes: [...], edges: [...] }
fn load_mind_map_data() -> Option<MindMapData> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("mind-map-data")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<MindMapData>(&json_text) {
		Ok(data) => {
			info!(
				"mindmap-canvas: loaded {} nodes, {} edges",
				data.nodes.len(),
				data.edges.len()
			);
			Some(data)
		}
		Err(e) => {
			warn!("mindmap-canvas: failed to parse seed data: {}", e);
			None
		}
	}
}

/// Main application component.
/// Loads seed data from the DOM and renders the mind-map editor. Without a
/// seed element the map starts from a single root node.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let data = load_mind_map_data().unwrap_or_default();
	let data_signal = Signal::derive(move || data.clone());

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Mind Map" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-canvas">
			<MindMapCanvas data=data_signal fullscreen=true />
			<div class="canvas-overlay">
				<h1>"Mind Map"</h1>
				<p class="subtitle">
					"Drag from a node's handle into empty space to add an idea. "
					"Double-click a node to rename it. Scroll to zoom. Drag the background to pan."
				</p>
			</div>
		</div>
	}
}
