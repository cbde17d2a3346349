//! Visual styling and tunables for the ambient effects.
//!
//! Every constant the effects use lives here so a page can override it through
//! JSON (see [`AmbientConfig`]). Defaults reproduce the stock look.

use std::ops::Range;

use serde::Deserialize;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(from = "String")]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Alpha in `[0, 1]`.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with explicit alpha.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same color with alpha replaced.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Scale the existing alpha by `factor`.
	pub fn fade(self, factor: f64) -> Self {
		self.with_alpha(self.a * factor)
	}

	/// CSS form: `#rrggbb` when opaque, `rgba(..)` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}

	/// Parses a CSS color string.
	/// Supports hex (`#RRGGBB`) and `rgb()`/`rgba()` functional notation;
	/// anything else falls back to mid gray.
	pub fn parse(color_str: &str) -> Color {
		let color_str = color_str.trim();
		if color_str.starts_with('#') && color_str.len() == 7 {
			let channel = |range: Range<usize>| {
				color_str
					.get(range)
					.and_then(|hex| u8::from_str_radix(hex, 16).ok())
					.unwrap_or(128)
			};
			Color::rgb(channel(1..3), channel(3..5), channel(5..7))
		} else if color_str.starts_with("rgb") {
			let nums: Vec<&str> = color_str
				.trim_start_matches("rgba(")
				.trim_start_matches("rgb(")
				.trim_end_matches(')')
				.split(',')
				.collect();
			let channel = |i: usize| {
				nums.get(i)
					.and_then(|s| s.trim().parse().ok())
					.unwrap_or(128)
			};
			let a = nums
				.get(3)
				.and_then(|s| s.trim().parse().ok())
				.unwrap_or(1.0);
			Color::rgba(channel(0), channel(1), channel(2), a)
		} else {
			Color::rgb(128, 128, 128)
		}
	}
}

impl From<String> for Color {
	fn from(value: String) -> Self {
		Color::parse(&value)
	}
}

/// Falling "liquidity packet" particles.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FlowStyle {
	/// Horizontal pixels per particle; pool size is `floor(width / density)`.
	pub density: f64,
	/// Downward speed in pixels per frame.
	pub speed: Range<f64>,
	/// Trail length in pixels.
	pub length: Range<f64>,
	/// Stroke width in pixels.
	pub width: Range<f64>,
	/// Head opacity of the trail.
	pub opacity: Range<f64>,
	/// Probability that a particle uses `rare_color`.
	pub rare_chance: f64,
	/// Height of the band above the surface where reset particles reappear.
	pub spawn_band: f64,
	/// Trail color.
	pub color: Color,
	/// Trail color for rare particles.
	pub rare_color: Color,
	/// CSS opacity of the whole canvas, blending it with the page background.
	pub canvas_opacity: f64,
}

impl Default for FlowStyle {
	fn default() -> Self {
		Self {
			density: 15.0,
			speed: 1.0..3.0,
			length: 10.0..30.0,
			width: 0.5..2.5,
			opacity: 0.1..0.6,
			rare_chance: 0.05,
			spawn_band: 200.0,
			color: Color::rgb(100, 200, 255),
			rare_color: Color::rgb(255, 215, 0),
			canvas_opacity: 0.6,
		}
	}
}

impl FlowStyle {
	/// Number of particles for a surface of the given width.
	pub fn particle_count(&self, width: f64) -> usize {
		if self.density.is_nan() || self.density <= 0.0 || width <= 0.0 {
			return 0;
		}
		(width / self.density).floor() as usize
	}
}

/// Short-lived jagged arcs between network nodes.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LightningStyle {
	/// Probability per frame that a spawn is attempted.
	pub spawn_chance: f64,
	/// Endpoints must be strictly farther apart than this.
	pub min_distance: f64,
	/// Endpoints must be strictly closer than this.
	pub max_distance: f64,
	/// Probability that a closer candidate replaces the current best.
	pub accept_chance: f64,
	/// Distance covered by each path step.
	pub segment_length: f64,
	/// Total horizontal jitter span per intermediate point.
	pub jitter_x: f64,
	/// Total vertical jitter span per intermediate point.
	pub jitter_y: f64,
	/// Life lost per frame.
	pub decay: Range<f64>,
	/// Stroke width of the arc.
	pub line_width: f64,
	/// Shadow blur of the arc glow.
	pub glow_blur: f64,
	/// Arc stroke color; alpha follows remaining life.
	pub color: Color,
	/// Shadow color of the arc glow.
	pub glow_color: Color,
}

impl Default for LightningStyle {
	fn default() -> Self {
		Self {
			spawn_chance: 0.05,
			min_distance: 50.0,
			max_distance: 300.0,
			accept_chance: 0.7,
			segment_length: 10.0,
			jitter_x: 10.0,
			jitter_y: 20.0,
			decay: 0.1..0.2,
			line_width: 1.5,
			glow_blur: 10.0,
			color: Color::rgb(165, 180, 252),
			glow_color: Color::rgb(165, 180, 252),
		}
	}
}

/// Blinking node lights scattered across the top of the surface.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct NetworkStyle {
	/// Nodes in the pool after every rebuild.
	pub node_count: usize,
	/// Nodes live in `[0, height * top_area_ratio]`.
	pub top_area_ratio: f64,
	/// Probability that a node is a visible, blinking light.
	pub light_chance: f64,
	/// Opacity change per frame.
	pub blink_speed: Range<f64>,
	/// Lower blink bound.
	pub min_opacity: f64,
	/// Upper blink bound.
	pub max_opacity: f64,
	/// Dominant light color.
	pub color: Color,
	/// Occasional light color.
	pub rare_color: Color,
	/// Probability that a node uses `rare_color`.
	pub rare_chance: f64,
	/// Radius of the solid dot.
	pub radius: f64,
	/// Radius of the dim halo.
	pub glow_radius: f64,
	/// Glow alpha relative to the node's own opacity.
	pub glow_alpha: f64,
	/// Arc spawning and styling.
	pub lightning: LightningStyle,
}

impl Default for NetworkStyle {
	fn default() -> Self {
		Self {
			node_count: 30,
			top_area_ratio: 0.4,
			light_chance: 0.3,
			blink_speed: 0.02..0.07,
			min_opacity: 0.2,
			max_opacity: 1.0,
			color: Color::rgb(165, 180, 252),
			rare_color: Color::rgb(255, 255, 255),
			rare_chance: 0.2,
			radius: 2.0,
			glow_radius: 6.0,
			glow_alpha: 0.3,
			lightning: LightningStyle::default(),
		}
	}
}

impl NetworkStyle {
	/// Opacity bounds ordered low to high.
	pub fn opacity_bounds(&self) -> (f64, f64) {
		let (lo, hi) = (self.min_opacity, self.max_opacity);
		if lo <= hi { (lo, hi) } else { (hi, lo) }
	}
}

/// Page-level configuration for both effects.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AmbientConfig {
	/// Falling particle effect.
	pub flow: FlowStyle,
	/// Node network effect.
	pub network: NetworkStyle,
}
