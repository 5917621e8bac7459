//! Force-directed author network component.
//!
//! Renders the collaboration network on an HTML canvas with:
//! - Degree-based node sizes and top-country colors
//! - Physics-based node positioning with adjustable link, charge and collision forces
//! - Pan, zoom, and multi-pointer node dragging
//! - Hover highlighting by country or affiliation, click-to-inspect tooltips
//!
//! # Example
//!
//! ```ignore
//! use author_network::{ForceControls, ForceGraphCanvas, ForceSettings, HighlightMode};
//!
//! let forces = RwSignal::new(ForceSettings::default());
//! let mode = RwSignal::new(HighlightMode::Country);
//!
//! view! {
//!     <ForceControls forces=forces mode=mode />
//!     <ForceGraphCanvas data=data forces=forces highlight=mode fullscreen=true />
//! }
//! ```

mod component;
pub mod config;
mod controls;
pub mod enrich;
pub mod interaction;
mod render;
pub mod scale;
pub mod simulation;
pub mod state;
pub mod sync;
pub mod theme;
mod types;

pub use component::ForceGraphCanvas;
pub use config::ChartConfig;
pub use controls::{ForceControls, ForceField, parse_control_value};
pub use interaction::{HighlightMode, PointerId, Tooltip};
pub use simulation::{ForceChange, ForceSettings};
pub use state::ForceGraphState;
pub use theme::Theme;
pub use types::{GraphData, GraphLink, GraphNode, NodeInfo};
