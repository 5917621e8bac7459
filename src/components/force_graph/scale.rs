//! Square-root scale used to encode node degree as radius.
//!
//! The scale maps a numeric domain onto an output range through `sqrt`, so
//! area rather than radius grows linearly with the input.
//!
//! # Clamping
//!
//! By default the scale does not clamp: inputs outside the domain continue
//! along the same curve past the ends of the range. Call
//! [`SqrtScale::clamped`] to pin outputs to the range instead.

/// Signed square root: `sign(x) * sqrt(|x|)`.
fn signed_sqrt(x: f64) -> f64 {
	if x < 0.0 { -(-x).sqrt() } else { x.sqrt() }
}

/// A continuous `sqrt` scale from `domain` onto `range`.
#[derive(Clone, Debug, PartialEq)]
pub struct SqrtScale {
	domain: (f64, f64),
	range: (f64, f64),
	clamp: bool,
}

impl SqrtScale {
	pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
		Self {
			domain,
			range,
			clamp: false,
		}
	}

	/// Radius scale over the observed degree extent.
	pub fn for_degrees((min, max): (usize, usize), range: (f64, f64)) -> Self {
		Self::new((min as f64, max as f64), range)
	}

	pub fn clamped(mut self, clamp: bool) -> Self {
		self.clamp = clamp;
		self
	}

	/// Map `value` through the scale.
	///
	/// A degenerate domain (both ends equal) maps everything to the middle
	/// of the range.
	pub fn apply(&self, value: f64) -> f64 {
		let (d0, d1) = (signed_sqrt(self.domain.0), signed_sqrt(self.domain.1));
		let span = d1 - d0;
		let mut t = if span != 0.0 {
			(signed_sqrt(value) - d0) / span
		} else {
			0.5
		};
		if self.clamp {
			t = t.clamp(0.0, 1.0);
		}
		self.range.0 + (self.range.1 - self.range.0) * t
	}
}
