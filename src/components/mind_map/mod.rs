//! Interactive mind-map canvas component.
//!
//! Renders an editable mind map on an HTML canvas with:
//! - Child-node creation by dragging a connection handle into empty space
//! - Node dragging (subtrees follow their parent), pan, and zoom
//! - In-place label editing
//! - Cubic-bezier connectors and a line grid background
//!
//! # Example
//!
//! ```ignore
//! use mindmap_canvas::{MindMapCanvas, MindMapData};
//!
//! let data = MindMapData::default(); // a single root node
//!
//! view! { <MindMapCanvas data=data.into() fullscreen=true /> }
//! ```

mod component;
mod placement;
mod render;
pub mod scale;
mod state;
pub mod store;
pub mod theme;
mod types;

pub use component::MindMapCanvas;
pub use store::MindMapStore;
pub use theme::Theme;
pub use types::{EdgeSeed, MindMapData, NodeSeed};
