//! Graph state and interaction handling.
//!
//! [`ForceGraphState`] is the single context object the canvas component
//! drives: it owns the layout simulation, the drawable scene, the view
//! transform and all interaction state. DOM handlers translate events into
//! method calls on it; nothing else mutates the graph.

use std::collections::HashMap;

use log::{info, warn};

use super::config::ChartConfig;
use super::enrich::{degree_extent, enrich_degrees, top_countries};
use super::interaction::{
	ActiveDrag, ClickTarget, DragState, HighlightMode, HoverState, InteractionEvent, PanState,
	PointerId, Tooltip,
};
use super::scale::SqrtScale;
use super::simulation::{ForceChange, ForceSettings, Simulation};
use super::sync::Scene;
use super::theme::{CountryColors, Theme};
use super::types::{GraphData, NodeInfo};

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Debug)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor (1.0 = 100%), kept inside the configured zoom extent.
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

/// Core graph state combining the layout simulation with interaction state.
///
/// Created once the data has loaded, then mutated by the animation loop
/// ([`tick`](Self::tick)) and by pointer handlers.
pub struct ForceGraphState {
	pub simulation: Simulation,
	pub nodes: Vec<NodeInfo>,
	pub scene: Scene,
	pub config: ChartConfig,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub tooltip: Option<Tooltip>,
	pub highlight_mode: HighlightMode,
	pub width: f64,
	pub height: f64,
	suppress_click: bool,
}

impl ForceGraphState {
	/// Enrich and encode `data`, then start a simulation centered in a
	/// `width` × `height` viewport.
	pub fn new(
		data: &GraphData,
		width: f64,
		height: f64,
		theme: &Theme,
		config: ChartConfig,
		forces: ForceSettings,
	) -> Self {
		let mut data = data.clone();
		enrich_degrees(&mut data);

		let radius = SqrtScale::for_degrees(degree_extent(&data.nodes), config.radius_range)
			.clamped(config.clamp_radius);
		let colors = CountryColors::new(
			&top_countries(&data.nodes, config.top_countries),
			&theme.palette,
			theme.neutral,
		);

		let nodes: Vec<NodeInfo> = data
			.nodes
			.iter()
			.map(|n| NodeInfo {
				id: n.id.clone(),
				name: n.name.clone(),
				country: n.country.clone(),
				affiliation: n.affiliation.clone(),
				degree: n.degree,
				radius: radius.apply(n.degree as f64),
				color: colors.color(&n.country).to_css_rgb(),
			})
			.collect();

		let id_to_idx: HashMap<&str, usize> = nodes
			.iter()
			.enumerate()
			.map(|(i, n)| (n.id.as_str(), i))
			.collect();
		let mut links = Vec::with_capacity(data.links.len());
		for link in &data.links {
			match (
				id_to_idx.get(link.source.as_str()),
				id_to_idx.get(link.target.as_str()),
			) {
				(Some(&s), Some(&t)) => links.push((s, t)),
				_ => warn!(
					"author-network: link {} -> {} references a missing node",
					link.source, link.target
				),
			}
		}

		let radii = nodes.iter().map(|n| n.radius).collect();
		let simulation = Simulation::new(radii, links, forces, (width / 2.0, height / 2.0));
		let mut scene = Scene::new(&nodes, simulation.links());
		scene.sync(&simulation.positions());
		info!(
			"author-network: laid out {} authors, {} collaborations",
			nodes.len(),
			simulation.links().len()
		);

		Self {
			simulation,
			hover: HoverState::new(nodes.len()),
			nodes,
			scene,
			config,
			transform: ViewTransform::default(),
			drag: DragState::default(),
			pan: PanState::default(),
			tooltip: None,
			highlight_mode: HighlightMode::default(),
			width,
			height,
			suppress_click: false,
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		self.scene
			.node_at(gx, gy, self.config.min_hit_px / self.transform.k)
	}

	/// Apply one interaction transition. Repeating an event is a no-op.
	pub fn handle(&mut self, event: InteractionEvent) {
		match event {
			InteractionEvent::DragStart {
				pointer,
				node,
				x,
				y,
			} => {
				if self.drag.active.contains_key(&pointer) {
					return;
				}
				let Some((nx, ny)) = self.simulation.position(node) else {
					return;
				};
				if !self.drag.is_dragging() {
					self.simulation
						.set_alpha_target(self.config.drag_alpha_target);
					self.simulation.restart();
				}
				self.simulation.fix(node, nx, ny);
				self.drag.active.insert(
					pointer,
					ActiveDrag {
						node,
						start_x: x,
						start_y: y,
						node_start_x: nx,
						node_start_y: ny,
						moved: false,
					},
				);
			}
			InteractionEvent::DragMove { pointer, x, y } => {
				let (k, threshold) = (self.transform.k, self.config.click_distance);
				let Some(drag) = self.drag.active.get_mut(&pointer) else {
					return;
				};
				let (dx, dy) = (x - drag.start_x, y - drag.start_y);
				if dx * dx + dy * dy > threshold * threshold {
					drag.moved = true;
				}
				let (node, fx, fy) = (
					drag.node,
					drag.node_start_x + dx / k,
					drag.node_start_y + dy / k,
				);
				self.simulation.fix(node, fx, fy);
				// follow the pointer even while the layout is cooled
				self.scene.sync(&self.simulation.positions());
			}
			InteractionEvent::DragEnd { pointer } => {
				let Some(drag) = self.drag.active.remove(&pointer) else {
					return;
				};
				if drag.moved {
					self.suppress_click = true;
				}
				if !self.drag.is_node_dragged(drag.node) {
					self.simulation.release(drag.node);
				}
				if !self.drag.is_dragging() {
					self.simulation.set_alpha_target(0.0);
				}
			}
			InteractionEvent::HoverEnter { node } => {
				if self.hover.node == Some(node) {
					return;
				}
				self.hover.enter(
					node,
					&self.nodes,
					self.highlight_mode,
					self.config.dim_opacity,
				);
				self.scene.set_opacity(&self.hover.opacity);
			}
			InteractionEvent::HoverLeave => {
				if self.hover.node.is_none() {
					return;
				}
				self.hover.leave();
				self.scene.set_opacity(&self.hover.opacity);
			}
			InteractionEvent::NodeClick {
				node,
				page_x,
				page_y,
			} => {
				let Some(info) = self.nodes.get(node) else {
					return;
				};
				let (ox, oy) = self.config.tooltip_offset;
				self.tooltip = Some(Tooltip {
					name: info.name.clone(),
					country: info.country.clone(),
					left: page_x + ox,
					top: page_y + oy,
				});
			}
			InteractionEvent::BackgroundClick => self.tooltip = None,
		}
	}

	/// Takes effect from the next hover.
	pub fn set_highlight_mode(&mut self, mode: HighlightMode) {
		self.highlight_mode = mode;
	}

	pub fn apply_force(&mut self, change: ForceChange) {
		self.simulation.apply(change);
	}

	/// Bring the simulation's forces to `wanted`, one change per differing
	/// force. Returns whether anything changed.
	pub fn apply_settings(&mut self, wanted: ForceSettings) -> bool {
		let changes = wanted.changes_from(&self.simulation.settings());
		for change in &changes {
			self.apply_force(*change);
		}
		!changes.is_empty()
	}

	/// Press: grab the node under the pointer, or start panning.
	pub fn pointer_down(&mut self, pointer: PointerId, sx: f64, sy: f64) {
		self.suppress_click = false;
		if let Some(node) = self.node_at_position(sx, sy) {
			self.handle(InteractionEvent::DragStart {
				pointer,
				node,
				x: sx,
				y: sy,
			});
		} else if self.pan.pointer.is_none() {
			self.pan = PanState {
				pointer: Some(pointer),
				moved: false,
				start_x: sx,
				start_y: sy,
				transform_start_x: self.transform.x,
				transform_start_y: self.transform.y,
			};
		}
	}

	pub fn pointer_move(&mut self, pointer: PointerId, sx: f64, sy: f64) {
		if self.drag.active.contains_key(&pointer) {
			self.handle(InteractionEvent::DragMove {
				pointer,
				x: sx,
				y: sy,
			});
			return;
		}

		if self.pan.pointer == Some(pointer) {
			let (dx, dy) = (sx - self.pan.start_x, sy - self.pan.start_y);
			if dx * dx + dy * dy > self.config.click_distance * self.config.click_distance {
				self.pan.moved = true;
			}
			self.transform.x = self.pan.transform_start_x + dx;
			self.transform.y = self.pan.transform_start_y + dy;
			return;
		}

		// Hover is a mouse concept and is frozen while anything is dragged
		if pointer == PointerId::Mouse && !self.drag.is_dragging() {
			let hit = self.node_at_position(sx, sy);
			if hit != self.hover.node {
				self.handle(InteractionEvent::HoverLeave);
				if let Some(node) = hit {
					self.handle(InteractionEvent::HoverEnter { node });
				}
			}
		}
	}

	pub fn pointer_up(&mut self, pointer: PointerId) {
		if self.drag.active.contains_key(&pointer) {
			self.handle(InteractionEvent::DragEnd { pointer });
		} else if self.pan.pointer == Some(pointer) {
			if self.pan.moved {
				self.suppress_click = true;
			}
			self.pan.pointer = None;
		}
	}

	/// The mouse left the canvas.
	pub fn pointer_leave(&mut self) {
		self.handle(InteractionEvent::DragEnd {
			pointer: PointerId::Mouse,
		});
		if self.pan.pointer == Some(PointerId::Mouse) {
			self.pan.pointer = None;
		}
		self.handle(InteractionEvent::HoverLeave);
	}

	/// Resolve a click at screen `(sx, sy)`; page coordinates position the
	/// tooltip.
	pub fn click(&mut self, sx: f64, sy: f64, page_x: f64, page_y: f64) -> ClickTarget {
		if std::mem::take(&mut self.suppress_click) {
			return ClickTarget::Suppressed;
		}
		match self.node_at_position(sx, sy) {
			Some(node) => {
				self.handle(InteractionEvent::NodeClick {
					node,
					page_x,
					page_y,
				});
				ClickTarget::Node(node)
			}
			None => {
				self.handle(InteractionEvent::BackgroundClick);
				ClickTarget::Background
			}
		}
	}

	/// Zoom around the screen point by one wheel notch.
	pub fn zoom(&mut self, sx: f64, sy: f64, delta_y: f64) {
		let (zoom_out, zoom_in) = self.config.zoom_factors;
		let factor = if delta_y > 0.0 { zoom_out } else { zoom_in };
		let (min_k, max_k) = self.config.zoom_extent;
		let new_k = (self.transform.k * factor).clamp(min_k, max_k);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	/// Step the layout; on a step, copy positions into the scene.
	pub fn tick(&mut self, dt: f64) -> bool {
		if !self.simulation.tick(dt) {
			return false;
		}
		self.scene.sync(&self.simulation.positions());
		true
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::controls::ForceField;
	use crate::components::force_graph::types::{GraphLink, GraphNode};

	fn author(id: &str, name: &str, country: &str, affiliation: &str) -> GraphNode {
		GraphNode {
			id: id.into(),
			name: name.into(),
			country: country.into(),
			affiliation: affiliation.into(),
			degree: 0,
		}
	}

	fn sample() -> GraphData {
		GraphData {
			nodes: vec![
				author("a", "Ada", "US", "MIT"),
				author("b", "Bo", "US", "ETH"),
				author("c", "Cy", "FR", "MIT"),
			],
			links: vec![GraphLink {
				source: "a".into(),
				target: "b".into(),
			}],
		}
	}

	fn state() -> ForceGraphState {
		ForceGraphState::new(
			&sample(),
			800.0,
			600.0,
			&Theme::default(),
			ChartConfig::default(),
			ForceSettings::default(),
		)
	}

	/// Park the three nodes far apart so hit tests are unambiguous.
	fn spread(state: &mut ForceGraphState) {
		state
			.scene
			.sync(&[(100.0, 100.0), (300.0, 100.0), (100.0, 300.0)]);
	}

	#[test]
	fn enriches_degrees_on_load() {
		let s = state();
		let degrees: Vec<_> = s.nodes.iter().map(|n| n.degree).collect();
		assert_eq!(degrees, vec![1, 1, 0]);
		assert!(s.nodes[0].radius > s.nodes[2].radius);
	}

	#[test]
	fn countries_outside_top_ten_are_gray() {
		let theme = Theme::default();
		let nodes = (0..11)
			.map(|i| author(&i.to_string(), "", &format!("C{i}"), ""))
			.collect();
		let data = GraphData {
			nodes,
			links: vec![],
		};
		let s = ForceGraphState::new(
			&data,
			800.0,
			600.0,
			&theme,
			ChartConfig::default(),
			ForceSettings::default(),
		);

		let gray = theme.neutral.to_css_rgb();
		assert_eq!(s.nodes[10].color, gray);
		assert!(s.nodes[..10].iter().all(|n| n.color != gray));
	}

	#[test]
	fn unresolved_links_are_skipped() {
		let mut data = sample();
		data.links.push(GraphLink {
			source: "a".into(),
			target: "zz".into(),
		});
		let s = ForceGraphState::new(
			&data,
			800.0,
			600.0,
			&Theme::default(),
			ChartConfig::default(),
			ForceSettings::default(),
		);
		assert_eq!(s.simulation.links(), &[(0, 1)]);
		// still counted towards a's degree
		assert_eq!(s.nodes[0].degree, 2);
	}

	#[test]
	fn drag_fixes_then_release_clears() {
		let mut s = state();
		let pointer = PointerId::Mouse;
		let start = s.simulation.position(0).unwrap();

		s.handle(InteractionEvent::DragStart {
			pointer,
			node: 0,
			x: 10.0,
			y: 10.0,
		});
		assert_eq!(s.simulation.fixed_position(0), Some(start));
		assert_eq!(s.simulation.alpha_target(), 0.3);

		s.handle(InteractionEvent::DragMove {
			pointer,
			x: 30.0,
			y: 15.0,
		});
		assert_eq!(
			s.simulation.fixed_position(0),
			Some((start.0 + 20.0, start.1 + 5.0))
		);

		s.handle(InteractionEvent::DragEnd { pointer });
		assert_eq!(s.simulation.fixed_position(0), None);
		assert_eq!(s.simulation.alpha_target(), 0.0);
		assert!(!s.drag.is_dragging());
	}

	#[test]
	fn drag_move_scales_with_zoom() {
		let mut s = state();
		s.transform.k = 2.0;
		let start = s.simulation.position(1).unwrap();
		let pointer = PointerId::Touch(3);

		s.handle(InteractionEvent::DragStart {
			pointer,
			node: 1,
			x: 0.0,
			y: 0.0,
		});
		s.handle(InteractionEvent::DragMove {
			pointer,
			x: 40.0,
			y: -20.0,
		});
		assert_eq!(
			s.simulation.fixed_position(1),
			Some((start.0 + 20.0, start.1 - 10.0))
		);
	}

	#[test]
	fn drag_move_updates_scene_without_a_tick() {
		let mut s = state();
		let pointer = PointerId::Mouse;
		s.handle(InteractionEvent::DragStart {
			pointer,
			node: 2,
			x: 0.0,
			y: 0.0,
		});
		s.handle(InteractionEvent::DragMove {
			pointer,
			x: 25.0,
			y: -10.0,
		});

		let (x, y) = s.simulation.position(2).unwrap();
		assert_eq!((s.scene.nodes[2].x, s.scene.nodes[2].y), (x, y));
		assert_eq!(s.scene.edges[0].x1, s.simulation.position(0).unwrap().0);
	}

	#[test]
	fn alpha_target_held_until_last_drag_ends() {
		let mut s = state();
		let (first, second) = (PointerId::Touch(1), PointerId::Touch(2));
		s.handle(InteractionEvent::DragStart {
			pointer: first,
			node: 0,
			x: 0.0,
			y: 0.0,
		});
		s.handle(InteractionEvent::DragStart {
			pointer: second,
			node: 2,
			x: 0.0,
			y: 0.0,
		});

		s.handle(InteractionEvent::DragEnd { pointer: first });
		assert_eq!(s.simulation.alpha_target(), 0.3);
		assert_eq!(s.simulation.fixed_position(0), None);
		assert!(s.simulation.fixed_position(2).is_some());

		s.handle(InteractionEvent::DragEnd { pointer: second });
		assert_eq!(s.simulation.alpha_target(), 0.0);
	}

	#[test]
	fn repeated_events_are_idempotent() {
		let mut s = state();
		let start = InteractionEvent::DragStart {
			pointer: PointerId::Mouse,
			node: 0,
			x: 0.0,
			y: 0.0,
		};
		s.handle(start.clone());
		s.handle(start);
		assert_eq!(s.drag.active.len(), 1);

		s.handle(InteractionEvent::DragEnd {
			pointer: PointerId::Mouse,
		});
		s.handle(InteractionEvent::DragEnd {
			pointer: PointerId::Mouse,
		});
		assert_eq!(s.simulation.fixed_position(0), None);

		s.handle(InteractionEvent::HoverEnter { node: 2 });
		s.handle(InteractionEvent::HoverEnter { node: 2 });
		assert_eq!(s.hover.opacity, vec![0.2, 0.2, 1.0]);
	}

	#[test]
	fn hover_highlights_same_country() {
		let mut s = state();
		s.handle(InteractionEvent::HoverEnter { node: 0 });
		let opacity: Vec<_> = s.scene.nodes.iter().map(|g| g.opacity).collect();
		assert_eq!(opacity, vec![1.0, 1.0, 0.2]);

		s.handle(InteractionEvent::HoverLeave);
		assert!(s.scene.nodes.iter().all(|g| g.opacity == 1.0));
	}

	#[test]
	fn hover_mode_switches_to_affiliation() {
		let mut s = state();
		s.set_highlight_mode(HighlightMode::Affiliation);
		s.handle(InteractionEvent::HoverEnter { node: 0 });
		assert_eq!(s.hover.opacity, vec![1.0, 0.2, 1.0]);
	}

	#[test]
	fn node_click_opens_tooltip_background_closes() {
		let mut s = state();
		s.handle(InteractionEvent::NodeClick {
			node: 2,
			page_x: 200.0,
			page_y: 100.0,
		});
		assert_eq!(
			s.tooltip,
			Some(Tooltip {
				name: "Cy".into(),
				country: "FR".into(),
				left: 210.0,
				top: 72.0,
			})
		);

		s.handle(InteractionEvent::BackgroundClick);
		assert_eq!(s.tooltip, None);
	}

	#[test]
	fn pointer_hover_follows_the_mouse() {
		let mut s = state();
		spread(&mut s);

		s.pointer_move(PointerId::Mouse, 300.0, 102.0);
		assert_eq!(s.hover.node, Some(1));
		s.pointer_move(PointerId::Mouse, 100.0, 298.0);
		assert_eq!(s.hover.node, Some(2));
		assert_eq!(s.hover.opacity, vec![0.2, 0.2, 1.0]);
		s.pointer_move(PointerId::Mouse, 500.0, 500.0);
		assert_eq!(s.hover.node, None);
	}

	#[test]
	fn click_after_drag_is_suppressed() {
		let mut s = state();
		spread(&mut s);
		s.tooltip = Some(Tooltip {
			name: "Ada".into(),
			country: "US".into(),
			left: 0.0,
			top: 0.0,
		});

		s.pointer_down(PointerId::Mouse, 100.0, 100.0);
		assert_eq!(s.drag.node_for(PointerId::Mouse), Some(0));
		s.pointer_move(PointerId::Mouse, 140.0, 100.0);
		s.pointer_up(PointerId::Mouse);
		assert_eq!(s.click(140.0, 100.0, 0.0, 0.0), ClickTarget::Suppressed);
		assert!(s.tooltip.is_some());

		// a still click afterwards behaves normally
		s.pointer_down(PointerId::Mouse, 600.0, 500.0);
		s.pointer_up(PointerId::Mouse);
		assert_eq!(s.click(600.0, 500.0, 0.0, 0.0), ClickTarget::Background);
		assert_eq!(s.tooltip, None);
	}

	#[test]
	fn click_on_node_opens_tooltip() {
		let mut s = state();
		spread(&mut s);
		assert_eq!(s.click(300.0, 100.0, 320.0, 140.0), ClickTarget::Node(1));
		let tip = s.tooltip.clone().unwrap();
		assert_eq!(tip.name, "Bo");
		assert_eq!(tip.country, "US");
	}

	#[test]
	fn background_drag_pans() {
		let mut s = state();
		spread(&mut s);
		s.pointer_down(PointerId::Mouse, 600.0, 500.0);
		s.pointer_move(PointerId::Mouse, 650.0, 480.0);
		s.pointer_up(PointerId::Mouse);

		assert_eq!((s.transform.x, s.transform.y), (50.0, -20.0));
		assert_eq!(s.click(650.0, 480.0, 0.0, 0.0), ClickTarget::Suppressed);
	}

	#[test]
	fn control_settings_reach_the_simulation() {
		let mut s = state();
		while s.tick(0.016) {}
		assert!(!s.apply_settings(ForceSettings::default()));
		assert!(!s.simulation.is_running());

		let mut wanted = ForceSettings::default();
		assert!(ForceField::Collision.apply_input(&mut wanted, "7"));
		assert!(ForceField::Charge.apply_input(&mut wanted, "-90"));
		assert!(s.apply_settings(wanted));
		assert_eq!(s.simulation.settings(), wanted);
		assert_eq!(s.simulation.alpha(), 1.0);
		assert!(s.simulation.is_running());
	}

	#[test]
	fn zoom_is_clamped() {
		let mut s = state();
		for _ in 0..200 {
			s.zoom(400.0, 300.0, -1.0);
		}
		assert!((s.transform.k - 10.0).abs() < 1e-9);
		for _ in 0..400 {
			s.zoom(400.0, 300.0, 1.0);
		}
		assert!((s.transform.k - 0.1).abs() < 1e-9);
	}

	#[test]
	fn zoom_keeps_point_under_cursor() {
		let mut s = state();
		let before = s.screen_to_graph(250.0, 125.0);
		s.zoom(250.0, 125.0, -1.0);
		let after = s.screen_to_graph(250.0, 125.0);
		assert!((before.0 - after.0).abs() < 1e-9);
		assert!((before.1 - after.1).abs() < 1e-9);
	}

	#[test]
	fn force_change_reheats_and_tick_syncs_scene() {
		let mut s = state();
		while s.tick(0.016) {}
		assert!(!s.tick(0.016));

		s.apply_force(ForceChange::Collision(5.0));
		assert_eq!(s.simulation.alpha(), 1.0);
		assert!(s.tick(0.016));

		let positions = s.simulation.positions();
		for (glyph, (x, y)) in s.scene.nodes.iter().zip(positions) {
			assert_eq!((glyph.x, glyph.y), (x, y));
		}
	}
}
