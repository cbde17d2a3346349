//! Surface-space primitives shared by every effect.

use std::ops::Range;

use fastrand::Rng;

/// A point in surface space (CSS pixels, origin top-left, y grows downward).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	/// Horizontal offset from the left edge.
	pub x: f64,
	/// Vertical offset from the top edge.
	pub y: f64,
}

impl Point {
	/// Point at `(x, y)`.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Euclidean distance to `other`.
	pub fn distance(self, other: Point) -> f64 {
		(other.x - self.x).hypot(other.y - self.y)
	}

	/// Linear interpolation towards `other`; `t = 0` is `self`, `t = 1` is `other`.
	pub fn lerp(self, other: Point, t: f64) -> Point {
		Point {
			x: self.x + (other.x - self.x) * t,
			y: self.y + (other.y - self.y) * t,
		}
	}
}

/// Dimensions of the drawing surface, mirrored from the browser viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
	/// Width in CSS pixels.
	pub width: f64,
	/// Height in CSS pixels.
	pub height: f64,
}

impl Viewport {
	/// Negative or NaN dimensions collapse to zero.
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			width: width.max(0.0),
			height: height.max(0.0),
		}
	}
}

/// Uniform sample from `range`. An empty or inverted range yields its start.
pub fn uniform(rng: &mut Rng, range: &Range<f64>) -> f64 {
	if range.end <= range.start {
		return range.start;
	}
	range.start + rng.f64() * (range.end - range.start)
}

/// Uniform sample from `[-span / 2, span / 2)`.
pub fn jitter(rng: &mut Rng, span: f64) -> f64 {
	(rng.f64() - 0.5) * span
}

/// Returns `true` with probability `p`.
pub fn chance(rng: &mut Rng, p: f64) -> bool {
	rng.f64() < p
}
