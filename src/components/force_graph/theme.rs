//! Visual theming for the force graph.
//!
//! Provides the country color encoder and the background/edge styles.

use std::collections::HashMap;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			self.to_css_rgb()
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}

	pub fn to_css_rgb(self) -> String {
		format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
	}
}

/// Ordered list of categorical colors.
#[derive(Clone, Debug)]
pub struct NodePalette {
	pub colors: Vec<Color>,
}

impl NodePalette {
	/// Tableau 10 categorical palette.
	pub fn tableau10() -> Self {
		Self {
			colors: vec![
				Color::rgb(78, 121, 167),  // Blue
				Color::rgb(242, 142, 44),  // Orange
				Color::rgb(225, 87, 89),   // Red
				Color::rgb(118, 183, 178), // Teal
				Color::rgb(89, 161, 79),   // Green
				Color::rgb(237, 201, 73),  // Yellow
				Color::rgb(175, 122, 161), // Purple
				Color::rgb(255, 157, 167), // Pink
				Color::rgb(156, 117, 95),  // Brown
				Color::rgb(186, 176, 171), // Gray
			],
		}
	}

	pub fn get(&self, index: usize) -> Color {
		self.colors[index % self.colors.len()]
	}

	pub fn len(&self) -> usize {
		self.colors.len()
	}
}

/// Country → color encoder.
///
/// Each of the given countries gets the palette color at its position; every
/// other country falls back to the neutral color.
#[derive(Clone, Debug)]
pub struct CountryColors {
	assigned: HashMap<String, Color>,
	neutral: Color,
}

impl CountryColors {
	/// `countries` must already be ordered most frequent first. Only as many
	/// countries as the palette has colors are assigned one.
	pub fn new(countries: &[String], palette: &NodePalette, neutral: Color) -> Self {
		let assigned = countries
			.iter()
			.take(palette.len())
			.enumerate()
			.map(|(i, c)| (c.clone(), palette.get(i)))
			.collect();
		Self { assigned, neutral }
	}

	pub fn color(&self, country: &str) -> Color {
		self.assigned.get(country).copied().unwrap_or(self.neutral)
	}
}

/// Edge visual style.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	pub color: Color,
	/// Line width in world units; scales with zoom.
	pub width: f64,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub background: Color,
	pub edge: EdgeStyle,
	pub palette: NodePalette,
	/// Color for countries outside the palette.
	pub neutral: Color,
}

impl Theme {
	/// Light page background with gray links.
	pub fn default_theme() -> Self {
		Self {
			background: Color::rgb(255, 255, 255),
			edge: EdgeStyle {
				color: Color::rgba(153, 153, 153, 0.6),
				width: 1.5,
			},
			palette: NodePalette::tableau10(),
			neutral: Color::rgb(169, 169, 169),
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::default_theme()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn countries(names: &[&str]) -> Vec<String> {
		names.iter().map(|s| s.to_string()).collect()
	}

	#[test]
	fn assigns_palette_in_rank_order() {
		let theme = Theme::default();
		let colors = CountryColors::new(&countries(&["US", "FR"]), &theme.palette, theme.neutral);

		assert_eq!(colors.color("US"), theme.palette.get(0));
		assert_eq!(colors.color("FR"), theme.palette.get(1));
		assert_eq!(colors.color("JP"), theme.neutral);
	}

	#[test]
	fn at_most_ten_distinct_non_gray_colors() {
		let theme = Theme::default();
		let ranked: Vec<String> = (0..14).map(|i| format!("C{i}")).collect();
		let colors = CountryColors::new(&ranked, &theme.palette, theme.neutral);

		let mut seen: Vec<String> = ranked
			.iter()
			.map(|c| colors.color(c))
			.filter(|c| *c != theme.neutral)
			.map(|c| c.to_css())
			.collect();
		seen.sort();
		seen.dedup();

		assert_eq!(seen.len(), 10);
		assert_eq!(colors.color("C10"), theme.neutral);
		assert_eq!(colors.color("C13"), theme.neutral);
	}

	#[test]
	fn css_output() {
		assert_eq!(Color::rgb(169, 169, 169).to_css(), "#a9a9a9");
		assert_eq!(
			Color::rgba(153, 153, 153, 0.6).to_css(),
			"rgba(153, 153, 153, 0.6)"
		);
	}
}
