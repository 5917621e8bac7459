//! Canvas rendering for the author network.
//!
//! Two passes in world space, so nodes always sit on top of links:
//! 1. All links as a single stroked path
//! 2. Nodes in input order, each at its own opacity

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::ViewTransform;
use super::sync::Scene;
use super::theme::Theme;

/// Draws the complete scene onto a `width` × `height` canvas.
pub fn render(
	scene: &Scene,
	transform: &ViewTransform,
	width: f64,
	height: f64,
	ctx: &CanvasRenderingContext2d,
	theme: &Theme,
) {
	ctx.set_fill_style_str(&theme.background.to_css());
	ctx.fill_rect(0.0, 0.0, width, height);

	ctx.save();
	let _ = ctx.translate(transform.x, transform.y);
	let _ = ctx.scale(transform.k, transform.k);

	draw_edges(scene, ctx, theme);
	draw_nodes(scene, ctx);

	ctx.restore();
}

fn draw_edges(scene: &Scene, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	if scene.edges.is_empty() {
		return;
	}
	ctx.set_stroke_style_str(&theme.edge.color.to_css());
	ctx.set_line_width(theme.edge.width);
	ctx.begin_path();
	for edge in &scene.edges {
		ctx.move_to(edge.x1, edge.y1);
		ctx.line_to(edge.x2, edge.y2);
	}
	ctx.stroke();
}

fn draw_nodes(scene: &Scene, ctx: &CanvasRenderingContext2d) {
	for node in &scene.nodes {
		ctx.set_global_alpha(node.opacity);
		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, node.radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&node.color);
		ctx.fill();
	}
	ctx.set_global_alpha(1.0);
}
