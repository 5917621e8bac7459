// Test target reuses lib deps, silence noisy lint.
#![allow(unused_crate_dependencies)]

use std::collections::HashSet;

use author_network::components::force_graph::interaction::{InteractionEvent, PointerId};
use author_network::components::force_graph::{ChartConfig, ForceGraphState, ForceSettings, Theme};
use author_network::parse_network;

const BUNDLED: &str = include_str!("../data/author_network.json");

fn bundled_state() -> ForceGraphState {
	let data = parse_network(BUNDLED).unwrap();
	ForceGraphState::new(
		&data,
		1024.0,
		768.0,
		&Theme::default(),
		ChartConfig::default(),
		ForceSettings::default(),
	)
}

#[test]
fn degrees_match_link_endpoints() {
	let data = parse_network(BUNDLED).unwrap();
	let state = bundled_state();

	for node in &state.nodes {
		let expected = data
			.links
			.iter()
			.filter(|l| l.source == node.id || l.target == node.id)
			.count();
		assert_eq!(node.degree, expected, "degree of {}", node.id);
	}
}

#[test]
fn at_most_ten_palette_colors() {
	let theme = Theme::default();
	let state = bundled_state();
	let gray = theme.neutral.to_css_rgb();

	let colors: HashSet<_> = state
		.nodes
		.iter()
		.map(|n| n.color.clone())
		.filter(|c| *c != gray)
		.collect();
	assert!(colors.len() <= 10);
	assert!(!colors.is_empty());
}

#[test]
fn radius_grows_with_degree() {
	let state = bundled_state();
	let mut nodes = state.nodes.clone();
	nodes.sort_by_key(|n| n.degree);
	for pair in nodes.windows(2) {
		assert!(pair[0].radius <= pair[1].radius);
	}
	assert!(nodes.iter().all(|n| (3.0..=12.0).contains(&n.radius)));
}

#[test]
fn layout_settles_and_drag_release_clears_fix() {
	let mut state = bundled_state();
	let mut steps = 0;
	while state.tick(0.016) {
		steps += 1;
	}
	assert!(steps > 0);
	assert!(!state.simulation.is_running());

	let pointer = PointerId::Mouse;
	state.handle(InteractionEvent::DragStart {
		pointer,
		node: 3,
		x: 0.0,
		y: 0.0,
	});
	assert!(state.simulation.is_running());
	state.handle(InteractionEvent::DragMove {
		pointer,
		x: 25.0,
		y: 0.0,
	});
	let (x, y) = state.simulation.position(3).unwrap();
	assert_eq!((state.scene.nodes[3].x, state.scene.nodes[3].y), (x, y));

	state.handle(InteractionEvent::DragEnd { pointer });
	assert_eq!(state.simulation.fixed_position(3), None);

	assert!(state.tick(0.016));
	for (glyph, (x, y)) in state.scene.nodes.iter().zip(state.simulation.positions()) {
		assert!(x.is_finite() && y.is_finite());
		assert_eq!((glyph.x, glyph.y), (x, y));
	}
}

#[test]
fn hover_then_click_flow() {
	let mut state = bundled_state();
	let hovered = 0;
	let country = state.nodes[hovered].country.clone();

	state.handle(InteractionEvent::HoverEnter { node: hovered });
	for (node, glyph) in state.nodes.iter().zip(&state.scene.nodes) {
		let expected = if node.country == country { 1.0 } else { 0.2 };
		assert_eq!(glyph.opacity, expected);
	}
	state.handle(InteractionEvent::HoverLeave);
	assert!(state.scene.nodes.iter().all(|g| g.opacity == 1.0));

	state.handle(InteractionEvent::NodeClick {
		node: hovered,
		page_x: 50.0,
		page_y: 60.0,
	});
	let tooltip = state.tooltip.clone().unwrap();
	assert_eq!(tooltip.name, state.nodes[hovered].name);
	assert_eq!(tooltip.country, country);
	state.handle(InteractionEvent::BackgroundClick);
	assert!(state.tooltip.is_none());
}
