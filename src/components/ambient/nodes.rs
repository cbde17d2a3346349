//! Network nodes: anchor points for lightning, some of which blink.

use fastrand::Rng;

use super::geometry::{Point, Viewport, chance, uniform};
use super::theme::{Color, NetworkStyle};

/// A point in the upper band of the surface.
///
/// Only nodes flagged as lights are visible and animate; the rest are still
/// valid lightning endpoints.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	/// Surface-space position.
	pub position: Point,
	/// Visible and blinking.
	pub light: bool,
	/// Opacity change per frame.
	pub blink_speed: f64,
	/// `1.0` while brightening, `-1.0` while dimming.
	pub direction: f64,
	/// Current opacity, kept within the style's bounds.
	pub opacity: f64,
	/// Fill color for the dot and its glow.
	pub color: Color,
}

impl Node {
	/// Random node inside `[0, width) x [0, height * top_area_ratio]`.
	pub fn spawn(style: &NetworkStyle, surface: Viewport, rng: &mut Rng) -> Self {
		let band = surface.height * style.top_area_ratio.clamp(0.0, 1.0);
		let (lo, hi) = style.opacity_bounds();
		Self {
			position: Point::new(
				uniform(rng, &(0.0..surface.width)),
				uniform(rng, &(0.0..band)),
			),
			light: chance(rng, style.light_chance),
			blink_speed: uniform(rng, &style.blink_speed),
			direction: 1.0,
			opacity: uniform(rng, &(lo..hi)),
			color: if chance(rng, style.rare_chance) {
				style.rare_color
			} else {
				style.color
			},
		}
	}

	/// Advance the blink by one frame, bouncing between the opacity bounds.
	pub fn update(&mut self, style: &NetworkStyle) {
		if !self.light {
			return;
		}
		let (lo, hi) = style.opacity_bounds();
		self.opacity += self.blink_speed * self.direction;
		if self.opacity >= hi {
			self.opacity = hi;
			self.direction = -1.0;
		} else if self.opacity <= lo {
			self.opacity = lo;
			self.direction = 1.0;
		}
	}
}

/// Build a fresh pool of exactly `style.node_count` nodes.
pub fn populate(style: &NetworkStyle, surface: Viewport, rng: &mut Rng) -> Vec<Node> {
	(0..style.node_count)
		.map(|_| Node::spawn(style, surface, rng))
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn nodes_stay_in_top_band() {
		let style = NetworkStyle::default();
		let surface = Viewport::new(1024.0, 768.0);
		let mut rng = Rng::with_seed(21);
		let nodes = populate(&style, surface, &mut rng);
		assert_eq!(nodes.len(), style.node_count);
		for node in &nodes {
			assert!((0.0..=surface.height * style.top_area_ratio).contains(&node.position.y));
			assert!((0.0..surface.width).contains(&node.position.x));
		}
	}

	#[test]
	fn light_opacity_ping_pongs_within_bounds() {
		let style = NetworkStyle::default();
		let mut rng = Rng::with_seed(22);
		let mut lights = populate(&style, Viewport::new(500.0, 500.0), &mut rng);
		for node in &mut lights {
			node.light = true;
		}
		let mut flips = 0;
		for _ in 0..5_000 {
			for node in &mut lights {
				let before = node.direction;
				node.update(&style);
				assert!(
					(0.2..=1.0).contains(&node.opacity),
					"opacity {} escaped",
					node.opacity
				);
				if node.direction != before {
					flips += 1;
				}
			}
		}
		assert!(flips > lights.len(), "blink never changed direction");
	}

	#[test]
	fn dark_nodes_do_not_animate() {
		let style = NetworkStyle::default();
		let mut rng = Rng::with_seed(23);
		let mut node = Node::spawn(&style, Viewport::new(100.0, 100.0), &mut rng);
		node.light = false;
		let snapshot = node.clone();
		for _ in 0..100 {
			node.update(&style);
		}
		assert_eq!(node, snapshot);
	}

	#[test]
	fn palette_is_biased_toward_dominant_color() {
		let style = NetworkStyle::default();
		let mut rng = Rng::with_seed(24);
		let nodes: Vec<Node> = (0..2_000)
			.map(|_| Node::spawn(&style, Viewport::new(100.0, 100.0), &mut rng))
			.collect();
		let dominant = nodes.iter().filter(|n| n.color == style.color).count();
		assert!(nodes.iter().all(|n| n.color == style.color || n.color == style.rare_color));
		assert!(dominant > nodes.len() / 2);
	}
}
