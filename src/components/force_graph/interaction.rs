//! Interaction state: drags, pan, hover highlighting and the tooltip.
//!
//! Pointer input is translated into [`InteractionEvent`]s, which the graph
//! state applies as transitions of a small per-node state machine:
//!
//! ```text
//! Idle --DragStart--> Dragging --DragMove--> Dragging --DragEnd--> Idle
//! ```
//!
//! Hover and click events only touch display state (opacity, tooltip).

use std::collections::HashMap;
use std::str::FromStr;

use super::types::NodeInfo;

/// Identifies the mouse or one touch point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerId {
	Mouse,
	Touch(i32),
}

/// Attribute compared when highlighting on hover.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HighlightMode {
	#[default]
	Country,
	Affiliation,
}

impl HighlightMode {
	pub fn as_str(self) -> &'static str {
		match self {
			HighlightMode::Country => "country",
			HighlightMode::Affiliation => "affiliation",
		}
	}

	/// The attribute of `node` this mode compares.
	pub fn key(self, node: &NodeInfo) -> &str {
		match self {
			HighlightMode::Country => &node.country,
			HighlightMode::Affiliation => &node.affiliation,
		}
	}
}

impl FromStr for HighlightMode {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"country" => Ok(HighlightMode::Country),
			"affiliation" => Ok(HighlightMode::Affiliation),
			other => Err(format!("unknown highlight mode `{other}`")),
		}
	}
}

/// Discrete interaction events, in screen coordinates where positional.
#[derive(Clone, Debug, PartialEq)]
pub enum InteractionEvent {
	DragStart { pointer: PointerId, node: usize, x: f64, y: f64 },
	DragMove { pointer: PointerId, x: f64, y: f64 },
	DragEnd { pointer: PointerId },
	HoverEnter { node: usize },
	HoverLeave,
	/// `page_x`/`page_y` are document coordinates for the tooltip.
	NodeClick { node: usize, page_x: f64, page_y: f64 },
	BackgroundClick,
}

/// One node held by one pointer.
#[derive(Clone, Debug, PartialEq)]
pub struct ActiveDrag {
	pub node: usize,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f64,
	pub node_start_y: f64,
	pub moved: bool,
}

/// In-progress drags keyed by pointer.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: HashMap<PointerId, ActiveDrag>,
}

impl DragState {
	pub fn is_dragging(&self) -> bool {
		!self.active.is_empty()
	}

	pub fn node_for(&self, pointer: PointerId) -> Option<usize> {
		self.active.get(&pointer).map(|d| d.node)
	}

	pub fn is_node_dragged(&self, node: usize) -> bool {
		self.active.values().any(|d| d.node == node)
	}
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	/// Pointer holding the pan, if one is in progress.
	pub pointer: Option<PointerId>,
	pub moved: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Hovered node and the resulting per-node opacity.
#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<usize>,
	pub opacity: Vec<f64>,
}

impl HoverState {
	pub fn new(node_count: usize) -> Self {
		Self {
			node: None,
			opacity: vec![1.0; node_count],
		}
	}

	/// Full opacity for nodes sharing the hovered node's attribute,
	/// `dim` for the rest.
	pub fn enter(&mut self, hovered: usize, nodes: &[NodeInfo], mode: HighlightMode, dim: f64) {
		let Some(target) = nodes.get(hovered) else {
			return;
		};
		let key = mode.key(target);
		self.node = Some(hovered);
		self.opacity = nodes
			.iter()
			.map(|n| if mode.key(n) == key { 1.0 } else { dim })
			.collect();
	}

	pub fn leave(&mut self) {
		self.node = None;
		self.opacity.iter_mut().for_each(|o| *o = 1.0);
	}
}

/// Tooltip contents and page position.
#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
	pub name: String,
	pub country: String,
	pub left: f64,
	pub top: f64,
}

/// What a click on the canvas landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickTarget {
	Node(usize),
	Background,
	/// The click ended a drag or pan that moved, and is swallowed.
	Suppressed,
}

impl ClickTarget {
	/// Whether the event should be kept from reaching page-level listeners.
	pub fn stops_propagation(self) -> bool {
		!matches!(self, ClickTarget::Background)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn author(country: &str, affiliation: &str) -> NodeInfo {
		NodeInfo {
			country: country.into(),
			affiliation: affiliation.into(),
			..Default::default()
		}
	}

	#[test]
	fn mode_round_trips_through_control_values() {
		assert_eq!("country".parse(), Ok(HighlightMode::Country));
		assert_eq!("affiliation".parse(), Ok(HighlightMode::Affiliation));
		assert!("region".parse::<HighlightMode>().is_err());
		assert_eq!(HighlightMode::Affiliation.as_str(), "affiliation");
	}

	#[test]
	fn hover_by_affiliation() {
		let nodes = vec![
			author("US", "MIT"),
			author("US", "CMU"),
			author("FR", "MIT"),
		];
		let mut hover = HoverState::new(nodes.len());
		hover.enter(0, &nodes, HighlightMode::Affiliation, 0.2);
		assert_eq!(hover.opacity, vec![1.0, 0.2, 1.0]);

		hover.leave();
		assert_eq!(hover.node, None);
		assert_eq!(hover.opacity, vec![1.0, 1.0, 1.0]);
	}

	#[test]
	fn hover_on_unknown_node_is_ignored() {
		let nodes = vec![author("US", "MIT")];
		let mut hover = HoverState::new(1);
		hover.enter(5, &nodes, HighlightMode::Country, 0.2);
		assert_eq!(hover.node, None);
		assert_eq!(hover.opacity, vec![1.0]);
	}

	#[test]
	fn only_background_clicks_propagate() {
		assert!(ClickTarget::Node(0).stops_propagation());
		assert!(ClickTarget::Suppressed.stops_propagation());
		assert!(!ClickTarget::Background.stops_propagation());
	}
}
