//! Drawable geometry kept in step with the simulation.

use super::types::NodeInfo;

/// A node as drawn: position, size, fill and opacity.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeGlyph {
	pub x: f64,
	pub y: f64,
	pub radius: f64,
	pub color: String,
	pub opacity: f64,
}

/// A link as drawn, endpoint to endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EdgeSegment {
	pub x1: f64,
	pub y1: f64,
	pub x2: f64,
	pub y2: f64,
}

/// Everything the renderer draws, in world coordinates.
#[derive(Clone, Debug, Default)]
pub struct Scene {
	pub nodes: Vec<NodeGlyph>,
	pub edges: Vec<EdgeSegment>,
	links: Vec<(usize, usize)>,
}

impl Scene {
	pub fn new(nodes: &[NodeInfo], links: &[(usize, usize)]) -> Self {
		Self {
			nodes: nodes
				.iter()
				.map(|n| NodeGlyph {
					x: 0.0,
					y: 0.0,
					radius: n.radius,
					color: n.color.clone(),
					opacity: 1.0,
				})
				.collect(),
			edges: vec![EdgeSegment::default(); links.len()],
			links: links.to_vec(),
		}
	}

	/// Overwrite every node and edge position from one simulation step.
	pub fn sync(&mut self, positions: &[(f64, f64)]) {
		for (glyph, &(x, y)) in self.nodes.iter_mut().zip(positions) {
			glyph.x = x;
			glyph.y = y;
		}
		for (segment, &(s, t)) in self.edges.iter_mut().zip(&self.links) {
			let (Some(&(x1, y1)), Some(&(x2, y2))) = (positions.get(s), positions.get(t)) else {
				continue;
			};
			*segment = EdgeSegment { x1, y1, x2, y2 };
		}
	}

	pub fn set_opacity(&mut self, opacity: &[f64]) {
		for (glyph, &o) in self.nodes.iter_mut().zip(opacity) {
			glyph.opacity = o;
		}
	}

	/// Topmost node whose disc, grown to at least `min_radius`, contains
	/// the world point.
	pub fn node_at(&self, x: f64, y: f64, min_radius: f64) -> Option<usize> {
		self.nodes.iter().enumerate().rev().find_map(|(i, g)| {
			let (dx, dy) = (g.x - x, g.y - y);
			let r = g.radius.max(min_radius);
			(dx * dx + dy * dy <= r * r).then_some(i)
		})
	}
}
