//! Transient lightning arcs between network nodes.
//!
//! Arcs refer to their endpoints by index into the node pool and never
//! outlive it: the pool owner clears the set whenever nodes are rebuilt.

use fastrand::Rng;

use super::geometry::{Point, chance, jitter, uniform};
use super::nodes::Node;
use super::theme::LightningStyle;

/// Smallest per-frame decay, so every arc eventually dies.
pub const MIN_DECAY: f64 = 0.01;

/// Shortest path step in pixels, bounding the number of path points.
pub const MIN_SEGMENT_LENGTH: f64 = 1.0;

/// A single fading arc with a precomputed jagged path.
#[derive(Clone, Debug, PartialEq)]
pub struct Lightning {
	/// Index of the start node in the pool.
	pub start: usize,
	/// Index of the end node in the pool.
	pub end: usize,
	/// Polyline from the start node to the end node, endpoints exact.
	pub segments: Vec<Point>,
	/// Starts at 1.0, drawn with this opacity, dead at or below zero.
	pub life: f64,
	/// Life lost per frame.
	pub decay: f64,
}

impl Lightning {
	/// Arc between two indexed node positions with a fresh jagged path and decay.
	pub fn new(
		(start, from): (usize, Point),
		(end, to): (usize, Point),
		style: &LightningStyle,
		rng: &mut Rng,
	) -> Self {
		Self {
			start,
			end,
			segments: jagged_path(from, to, style, rng),
			life: 1.0,
			decay: uniform(rng, &style.decay).max(MIN_DECAY),
		}
	}

	/// Age by one frame.
	pub fn update(&mut self) {
		self.life -= self.decay;
	}

	/// Still visible.
	pub fn is_alive(&self) -> bool {
		self.life > 0.0
	}
}

/// Build the arc polyline from `from` to `to`.
///
/// The step count is `floor(distance / segment_length)`, with the segment
/// length floored at [`MIN_SEGMENT_LENGTH`]; each of the
/// `steps - 1` interior points sits on the straight line at its step's
/// progress, displaced by independent jitter on both axes.
pub fn jagged_path(from: Point, to: Point, style: &LightningStyle, rng: &mut Rng) -> Vec<Point> {
	let step = style.segment_length.max(MIN_SEGMENT_LENGTH);
	let steps = (from.distance(to) / step).floor() as usize;

	let mut points = Vec::with_capacity(steps.max(1) + 1);
	points.push(from);
	for i in 1..steps {
		let base = from.lerp(to, i as f64 / steps as f64);
		points.push(Point::new(
			base.x + jitter(rng, style.jitter_x),
			base.y + jitter(rng, style.jitter_y),
		));
	}
	points.push(to);
	points
}

/// Choose an end node for an arc starting at `start`.
///
/// Candidates must lie strictly inside the distance band. A candidate only
/// replaces the current best when it is closer *and* wins an independent
/// acceptance roll, so the pick leans toward near nodes without always
/// taking the nearest one.
pub fn pick_partner(
	nodes: &[Node],
	start: usize,
	style: &LightningStyle,
	rng: &mut Rng,
) -> Option<usize> {
	let origin = nodes.get(start)?.position;
	let mut best: Option<(usize, f64)> = None;

	for (idx, other) in nodes.iter().enumerate() {
		if idx == start {
			continue;
		}
		let d = origin.distance(other.position);
		if d <= style.min_distance || d >= style.max_distance {
			continue;
		}
		let closer = best.is_none_or(|(_, best_d)| d < best_d);
		if closer && chance(rng, style.accept_chance) {
			best = Some((idx, d));
		}
	}

	best.map(|(idx, _)| idx)
}

/// The live set of arcs.
#[derive(Clone, Debug, Default)]
pub struct LightningSet {
	arcs: Vec<Lightning>,
}

impl LightningSet {
	/// Per-frame spawn check: with `spawn_chance`, try to open an arc from a
	/// uniformly random node. Returns `true` if an arc was added.
	pub fn try_spawn(&mut self, nodes: &[Node], style: &LightningStyle, rng: &mut Rng) -> bool {
		if nodes.is_empty() || !chance(rng, style.spawn_chance) {
			return false;
		}
		let start = rng.usize(..nodes.len());
		self.spawn_from(nodes, start, style, rng)
	}

	/// Try to open an arc from `start`. "No partner" is a silent no-op.
	pub fn spawn_from(
		&mut self,
		nodes: &[Node],
		start: usize,
		style: &LightningStyle,
		rng: &mut Rng,
	) -> bool {
		let Some(end) = pick_partner(nodes, start, style, rng) else {
			return false;
		};
		self.arcs.push(Lightning::new(
			(start, nodes[start].position),
			(end, nodes[end].position),
			style,
			rng,
		));
		true
	}

	/// Live arcs, mutably.
	pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Lightning> {
		self.arcs.iter_mut()
	}

	/// Live arcs.
	pub fn iter(&self) -> impl Iterator<Item = &Lightning> {
		self.arcs.iter()
	}

	/// Drop every arc whose life has run out.
	pub fn purge(&mut self) {
		self.arcs.retain(Lightning::is_alive);
	}

	/// Drop every arc regardless of life.
	pub fn clear(&mut self) {
		self.arcs.clear();
	}

	/// Number of live arcs.
	pub fn len(&self) -> usize {
		self.arcs.len()
	}

	/// No live arcs.
	pub fn is_empty(&self) -> bool {
		self.arcs.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::ambient::geometry::Viewport;
	use crate::components::ambient::nodes::populate;
	use crate::components::ambient::theme::{Color, NetworkStyle};

	fn node_at(x: f64, y: f64) -> Node {
		Node {
			position: Point::new(x, y),
			light: true,
			blink_speed: 0.03,
			direction: 1.0,
			opacity: 0.5,
			color: Color::rgb(165, 180, 252),
		}
	}

	#[test]
	fn path_has_one_point_per_step() {
		let style = LightningStyle::default();
		let mut rng = Rng::with_seed(31);
		let from = Point::new(0.0, 0.0);
		let to = Point::new(100.0, 0.0);
		let path = jagged_path(from, to, &style, &mut rng);

		assert_eq!(path.len(), 11);
		assert_eq!(path[0], from);
		assert_eq!(path[10], to);
		for (i, p) in path.iter().enumerate().take(10).skip(1) {
			let base_x = i as f64 * 10.0;
			assert!((p.x - base_x).abs() <= style.jitter_x / 2.0);
			assert!(p.y.abs() <= style.jitter_y / 2.0);
		}
	}

	#[test]
	fn short_path_is_a_straight_segment() {
		let style = LightningStyle::default();
		let mut rng = Rng::with_seed(32);
		let from = Point::new(5.0, 5.0);
		let to = Point::new(5.0, 20.0);
		assert_eq!(jagged_path(from, to, &style, &mut rng), vec![from, to]);
	}

	#[test]
	fn degenerate_segment_length_is_floored() {
		let mut rng = Rng::with_seed(33);
		for segment_length in [0.0, -4.0, 1e-9, f64::NAN] {
			let style = LightningStyle {
				segment_length,
				..LightningStyle::default()
			};
			let path = jagged_path(Point::new(0.0, 0.0), Point::new(80.0, 0.0), &style, &mut rng);
			assert_eq!(path.len(), 81, "segment length {segment_length}");
		}
	}

	#[test]
	fn zero_decay_arcs_still_expire() {
		let nodes = vec![node_at(0.0, 0.0), node_at(100.0, 0.0), node_at(0.0, 120.0)];
		let mut rng = Rng::with_seed(38);
		for decay in [0.0..0.0, -0.5..-0.1, f64::NAN..f64::NAN] {
			let style = LightningStyle {
				accept_chance: 1.0,
				decay,
				..LightningStyle::default()
			};
			let mut set = LightningSet::default();
			assert!(set.spawn_from(&nodes, 0, &style, &mut rng));
			assert!(set.spawn_from(&nodes, 1, &style, &mut rng));
			assert_eq!(set.len(), 2);
			assert!(set.iter().all(|arc| arc.decay >= MIN_DECAY));

			let limit = (1.0 / MIN_DECAY).ceil() as usize + 1;
			for _ in 0..limit {
				for arc in set.iter_mut() {
					arc.update();
				}
				set.purge();
			}
			assert!(set.is_empty(), "arcs survived {limit} frames");
		}
	}

	#[test]
	fn spawned_arcs_respect_distance_band() {
		let network = NetworkStyle::default();
		let style = LightningStyle {
			spawn_chance: 1.0,
			..network.lightning.clone()
		};
		let mut rng = Rng::with_seed(34);
		let mut spawned = 0;
		for _ in 0..200 {
			let nodes = populate(&network, Viewport::new(900.0, 700.0), &mut rng);
			let mut set = LightningSet::default();
			if set.try_spawn(&nodes, &style, &mut rng) {
				spawned += 1;
			}
			for arc in set.iter() {
				assert_ne!(arc.start, arc.end);
				let d = nodes[arc.start].position.distance(nodes[arc.end].position);
				assert!(d > style.min_distance && d < style.max_distance, "distance {d}");
				assert_eq!(arc.segments.first(), Some(&nodes[arc.start].position));
				assert_eq!(arc.segments.last(), Some(&nodes[arc.end].position));
			}
		}
		assert!(spawned > 0);
	}

	#[test]
	fn band_edges_are_exclusive() {
		let style = LightningStyle {
			accept_chance: 1.0,
			..LightningStyle::default()
		};
		let mut rng = Rng::with_seed(35);
		let nodes = vec![node_at(0.0, 0.0), node_at(50.0, 0.0), node_at(300.0, 0.0)];
		assert_eq!(pick_partner(&nodes, 0, &style, &mut rng), None);

		let nodes = vec![node_at(0.0, 0.0), node_at(200.0, 0.0), node_at(120.0, 0.0)];
		assert_eq!(pick_partner(&nodes, 0, &style, &mut rng), Some(2));
	}

	#[test]
	fn no_eligible_partner_spawns_nothing() {
		let style = LightningStyle {
			spawn_chance: 1.0,
			..LightningStyle::default()
		};
		let mut rng = Rng::with_seed(36);
		let nodes = vec![node_at(0.0, 0.0), node_at(5.0, 5.0), node_at(10.0, 0.0)];
		let mut set = LightningSet::default();
		for _ in 0..50 {
			assert!(!set.try_spawn(&nodes, &style, &mut rng));
		}
		assert!(set.is_empty());
		assert!(!set.try_spawn(&[], &style, &mut rng));
		assert!(!set.spawn_from(&nodes, 99, &style, &mut rng));
	}

	#[test]
	fn life_decays_and_dead_arcs_are_purged() {
		let style = LightningStyle {
			accept_chance: 1.0,
			..LightningStyle::default()
		};
		let mut rng = Rng::with_seed(37);
		let nodes = vec![node_at(0.0, 0.0), node_at(100.0, 0.0)];
		let mut set = LightningSet::default();
		assert!(set.spawn_from(&nodes, 0, &style, &mut rng));

		let decay = set.iter().next().map(|arc| arc.decay).unwrap_or_default();
		assert!(style.decay.contains(&decay));

		let mut frames = 0;
		while !set.is_empty() {
			let before = set.iter().next().map(|arc| arc.life).unwrap_or_default();
			for arc in set.iter_mut() {
				arc.update();
				assert!((before - arc.life - decay).abs() < 1e-12);
			}
			let alive = set.iter().all(Lightning::is_alive);
			set.purge();
			assert_eq!(set.is_empty(), !alive);
			frames += 1;
			assert!(frames <= 11, "arc outlived its decay");
		}
		set.purge();
		assert!(set.is_empty());
	}
}
