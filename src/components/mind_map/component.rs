//! Leptos component wrapping the mind-map canvas.
//!
//! The component creates an HTML canvas element and wires up mouse/wheel
//! event handlers for node dragging, panning, zooming, and connection drags.
//! An animation loop runs via `requestAnimationFrame`, measuring node labels
//! and redrawing each frame. Label editing happens in an absolutely
//! positioned input overlay sized to the node under edit.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, FocusEvent, HtmlCanvasElement, HtmlInputElement, KeyboardEvent,
	MouseEvent, WheelEvent, Window,
};

use super::render;
use super::scale::{ScaleConfig, ScaledValues};
use super::state::{CanvasState, ConnectOutcome, DragState};
use super::store::{HitRegion, MindMapStore, NodeChange, NodeId, Position};
use super::theme::Theme;
use super::types::MindMapData;

/// Bundles the graph store with interaction state and visual configuration.
struct MindMapContext {
	store: MindMapStore,
	state: CanvasState,
	scale: ScaleConfig,
	theme: Theme,
}

/// A label edit in progress: which node, where its box sits on screen, and
/// the text the input starts from.
#[derive(Clone, Debug)]
struct LabelEdit {
	id: NodeId,
	left: f64,
	top: f64,
	width: f64,
	height: f64,
	font_size: f64,
	value: String,
}

/// Screen-space editing overlay for a node's label. `None` while the node
/// has no measured geometry yet.
fn open_label_editor(c: &MindMapContext, id: &str) -> Option<LabelEdit> {
	let node = c.store.node(id)?;
	let g = node.geometry?;
	let (left, top) = c.state.transform.graph_to_screen(g.x, g.y);
	let k = c.state.transform.k;
	Some(LabelEdit {
		id: node.id.clone(),
		left,
		top,
		width: g.width * k,
		height: g.height * k,
		font_size: c.theme.node.label_size * k,
		value: node.label.clone(),
	})
}

/// Renders an interactive mind map on a canvas element.
///
/// Pass seed data via the reactive `data` signal. The component sizes itself
/// to its parent container by default; set `fullscreen = true` to fill the
/// viewport and resize automatically with the window. Explicit
/// `width`/`height` override automatic sizing.
///
/// Drag a node's handle into empty canvas to spawn a child there; drag a
/// node body to move it (children follow); drag the background to pan and
/// scroll to zoom. Double-click a node to edit its label.
#[component]
pub fn MindMapCanvas(
	#[prop(into)] data: Signal<MindMapData>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<MindMapContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let editing = RwSignal::new(None::<LabelEdit>);
	let (context_init, animate_init, resize_cb_init) =
		(context.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();

		let (w, h) = if fullscreen {
			(
				window.inner_width().unwrap().as_f64().unwrap(),
				window.inner_height().unwrap().as_f64().unwrap(),
			)
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();

		*context_init.borrow_mut() = Some(MindMapContext {
			store: MindMapStore::from_data(&data.get()),
			state: CanvasState::new(w, h),
			scale: ScaleConfig::default(),
			theme: Theme::default(),
		});

		if fullscreen {
			let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let win: Window = web_sys::window().unwrap();
				let (nw, nh) = (
					win.inner_width().unwrap().as_f64().unwrap(),
					win.inner_height().unwrap().as_f64().unwrap(),
				);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut c) = *context_resize.borrow_mut() {
					c.state.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				render::render(&mut c.store, &c.state, &ctx, &c.scale, &c.theme);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let _ = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		if editing.get_untracked().is_some() {
			// The input's blur handler commits the edit; don't start a
			// gesture underneath it.
			return;
		}
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut c) = *context_md.borrow_mut() {
			let (gx, gy) = c.state.transform.screen_to_graph(x, y);
			let hit_radius = ScaledValues::new(&c.scale, c.state.transform.k).handle_hit_radius;

			match c.store.hit_test(gx, gy, hit_radius) {
				Some((id, HitRegion::Handle)) => {
					c.state.connect.start(id, x, y);
				}
				Some((id, HitRegion::Body)) => {
					let mut changes: Vec<NodeChange> = c
						.store
						.nodes()
						.iter()
						.filter(|n| n.selected && n.id != id)
						.map(|n| NodeChange::Select {
							id: n.id.clone(),
							selected: false,
						})
						.collect();
					if !c.store.node(&id).is_some_and(|n| n.selected) {
						changes.push(NodeChange::Select {
							id: id.clone(),
							selected: true,
						});
					}
					if !changes.is_empty() {
						c.store.apply_node_changes(changes);
					}

					let node_start = c.store.node(&id).map(|n| n.position).unwrap_or_default();
					c.state.drag = DragState {
						active: true,
						node: Some(id),
						start_x: x,
						start_y: y,
						node_start,
					};
				}
				None => {
					let changes: Vec<NodeChange> = c
						.store
						.nodes()
						.iter()
						.filter(|n| n.selected)
						.map(|n| NodeChange::Select {
							id: n.id.clone(),
							selected: false,
						})
						.collect();
					if !changes.is_empty() {
						c.store.apply_node_changes(changes);
					}

					c.state.pan.active = true;
					c.state.pan.start_x = x;
					c.state.pan.start_y = y;
					c.state.pan.transform_start_x = c.state.transform.x;
					c.state.pan.transform_start_y = c.state.transform.y;
				}
			}
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut c) = *context_mm.borrow_mut() {
			if c.state.connect.active() {
				c.state.connect.pointer_x = x;
				c.state.connect.pointer_y = y;
			} else if c.state.drag.active {
				if let Some(id) = c.state.drag.node.clone() {
					let k = c.state.transform.k;
					let (dx, dy) = (
						(x - c.state.drag.start_x) / k,
						(y - c.state.drag.start_y) / k,
					);
					let position = Position {
						x: c.state.drag.node_start.x + dx,
						y: c.state.drag.node_start.y + dy,
					};
					c.store
						.apply_node_changes(vec![NodeChange::Position { id, position }]);
				}
			} else if c.state.pan.active {
				c.state.transform.x = c.state.pan.transform_start_x + (x - c.state.pan.start_x);
				c.state.transform.y = c.state.pan.transform_start_y + (y - c.state.pan.start_y);
			}
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let mut focus_target: Option<NodeId> = None;

		if let Some(ref mut c) = *context_mu.borrow_mut() {
			if c.state.connect.active() {
				let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
				let rect = canvas.get_bounding_client_rect();
				let outcome = c.state.finish_connection(
					&mut c.store,
					rect.left(),
					rect.top(),
					ev.client_x() as f64,
					ev.client_y() as f64,
				);
				if let ConnectOutcome::FocusLabel(id) = outcome {
					focus_target = Some(id);
				}
			}
			c.state.drag = DragState::default();
			c.state.pan.active = false;
		}

		if let Some(id) = focus_target {
			if let Some(ref c) = *context_mu.borrow() {
				editing.set(open_label_editor(c, &id));
			}
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.state.drag = DragState::default();
			c.state.pan.active = false;
			c.state.connect.clear();
		}
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut c) = *context_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			c.state.transform.zoom_at(x, y, factor);
		}
	};

	let context_dc = context.clone();
	let on_dblclick = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		let mut edit = None;
		if let Some(ref c) = *context_dc.borrow() {
			let (gx, gy) = c.state.transform.screen_to_graph(x, y);
			if let Some(node) = c.store.node_at_position(gx, gy) {
				edit = open_label_editor(c, &node.id.clone());
			}
		}
		if edit.is_some() {
			editing.set(edit);
		}
	};

	let context_edit = context.clone();
	let editor_overlay = move || {
		editing.get().map(|edit| {
			let style = format!(
				"position: absolute; left: {}px; top: {}px; width: {}px; height: {}px; \
				 font-size: {}px; text-align: center; background: white; \
				 border: 1px solid #2ecc71; border-radius: 2px; outline: none; \
				 box-sizing: border-box;",
				edit.left, edit.top, edit.width, edit.height, edit.font_size
			);

			let commit_ctx = context_edit.clone();
			let commit_id = edit.id.clone();
			let commit = move |value: String| {
				// Enter commits and unmounts the input, which can still fire
				// a trailing blur; only the first commit counts.
				if editing.get_untracked().is_none() {
					return;
				}
				if let Some(ref mut c) = *commit_ctx.borrow_mut() {
					c.store.update_node_label(&commit_id, &value);
				}
				editing.set(None);
			};
			let commit_blur = commit.clone();

			let on_keydown = move |ev: KeyboardEvent| match ev.key().as_str() {
				"Enter" => {
					if let Some(input) = ev
						.target()
						.and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
					{
						commit(input.value());
					}
				}
				"Escape" => editing.set(None),
				_ => {}
			};
			let on_blur = move |ev: FocusEvent| {
				if let Some(input) = ev
					.target()
					.and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
				{
					commit_blur(input.value());
				}
			};

			view! {
				<input
					type="text"
					class="mind-map-label-input"
					value=edit.value.clone()
					autofocus=true
					style=style
					on:keydown=on_keydown
					on:blur=on_blur
				/>
			}
		})
	};

	view! {
		<div style="position: relative; width: 100%; height: 100%;">
			<canvas
				node_ref=canvas_ref
				class="mind-map-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				on:dblclick=on_dblclick
				style="display: block; cursor: grab;"
			/>
			{editor_overlay}
		</div>
	}
}
