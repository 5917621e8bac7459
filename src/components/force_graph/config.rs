//! Tunable constants for the chart, gathered in one place.

/// Chart-wide configuration. All distances are world units unless noted.
#[derive(Clone, Debug)]
pub struct ChartConfig {
	/// Output range of the degree → radius scale.
	pub radius_range: (f64, f64),
	/// Whether out-of-domain degrees are pinned to `radius_range`.
	pub clamp_radius: bool,
	/// Number of countries that receive a palette color.
	pub top_countries: usize,
	/// Opacity of nodes that do not match the hovered node.
	pub dim_opacity: f64,
	/// Minimum and maximum zoom factor.
	pub zoom_extent: (f64, f64),
	/// Wheel zoom factors per notch, `(out, in)`.
	pub zoom_factors: (f64, f64),
	/// Tooltip position relative to the pointer, in page pixels.
	pub tooltip_offset: (f64, f64),
	/// Alpha target held while at least one node is being dragged.
	pub drag_alpha_target: f64,
	/// Smallest hit radius in screen pixels, so tiny nodes stay clickable.
	pub min_hit_px: f64,
	/// Pointer travel in screen pixels before a press counts as a drag.
	pub click_distance: f64,
}

impl Default for ChartConfig {
	fn default() -> Self {
		Self {
			radius_range: (3.0, 12.0),
			clamp_radius: false,
			top_countries: 10,
			dim_opacity: 0.2,
			zoom_extent: (0.1, 10.0),
			zoom_factors: (0.9, 1.1),
			tooltip_offset: (10.0, -28.0),
			drag_alpha_target: 0.3,
			min_hit_px: 4.0,
			click_distance: 0.0,
		}
	}
}
