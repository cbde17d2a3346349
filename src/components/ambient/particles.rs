//! Falling "liquidity" particles for the flow effect.
//!
//! Each particle drops at a constant speed and is re-randomized in place
//! above the surface once it falls past the bottom edge, giving an endless
//! stream without ever reallocating the pool.

use fastrand::Rng;

use super::geometry::{Point, Viewport, chance, uniform};
use super::render::{self, Painter};
use super::state::Effect;
use super::theme::{Color, FlowStyle};

/// Slowest fall in pixels per frame, so every particle eventually resets.
pub const MIN_SPEED: f64 = 0.1;

/// A single falling trail.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	/// Horizontal position of the trail.
	pub x: f64,
	/// Vertical position of the trail head.
	pub y: f64,
	/// Pixels per frame, constant until the next reset.
	pub speed: f64,
	/// Trail length behind the head.
	pub length: f64,
	/// Stroke width.
	pub width: f64,
	/// Head opacity, constant until the next reset.
	pub opacity: f64,
	/// Uses the rare palette color.
	pub rare: bool,
}

impl Particle {
	/// Fresh particle positioned above the visible area.
	pub fn spawn(style: &FlowStyle, surface: Viewport, rng: &mut Rng) -> Self {
		Self {
			x: uniform(rng, &(0.0..surface.width)),
			y: -uniform(rng, &(0.0..style.spawn_band)),
			speed: uniform(rng, &style.speed).max(MIN_SPEED),
			length: uniform(rng, &style.length),
			width: uniform(rng, &style.width),
			opacity: uniform(rng, &style.opacity),
			rare: chance(rng, style.rare_chance),
		}
	}

	/// Fresh particle somewhere on the visible area, used to pre-fill the
	/// surface when the pool is built.
	pub fn scattered(style: &FlowStyle, surface: Viewport, rng: &mut Rng) -> Self {
		let mut particle = Self::spawn(style, surface, rng);
		particle.y = uniform(rng, &(0.0..surface.height));
		particle
	}

	/// Re-randomize every field in place.
	pub fn reset(&mut self, style: &FlowStyle, surface: Viewport, rng: &mut Rng) {
		*self = Self::spawn(style, surface, rng);
	}

	/// Advance one frame. Returns `true` when the particle left the surface and was reset.
	pub fn update(&mut self, style: &FlowStyle, surface: Viewport, rng: &mut Rng) -> bool {
		self.y += self.speed;
		if self.y > surface.height {
			self.reset(style, surface, rng);
			return true;
		}
		false
	}

	/// Leading end of the trail.
	pub fn head(&self) -> Point {
		Point::new(self.x, self.y)
	}

	/// End of the trail, straight above the head.
	pub fn tail(&self) -> Point {
		Point::new(self.x, self.y - self.length)
	}

	/// Head color including the particle's opacity.
	pub fn color(&self, style: &FlowStyle) -> Color {
		let base = if self.rare {
			style.rare_color
		} else {
			style.color
		};
		base.with_alpha(self.opacity)
	}
}

/// Pool of falling particles sized from the surface width.
pub struct ParticleField {
	/// Pooled particles, reset in place.
	pub particles: Vec<Particle>,
	style: FlowStyle,
	surface: Viewport,
}

impl ParticleField {
	/// Empty field; the pool is populated by [`Effect::rebuild`].
	pub fn new(style: FlowStyle) -> Self {
		Self {
			particles: Vec::new(),
			style,
			surface: Viewport::default(),
		}
	}
}

impl Effect for ParticleField {
	fn rebuild(&mut self, surface: Viewport, rng: &mut Rng) {
		self.surface = surface;
		let count = self.style.particle_count(surface.width);
		self.particles.clear();
		self.particles
			.extend((0..count).map(|_| Particle::scattered(&self.style, surface, rng)));
	}

	fn frame<P: Painter>(&mut self, painter: &mut P, rng: &mut Rng) {
		let Self {
			particles,
			style,
			surface,
		} = self;
		for particle in particles.iter_mut() {
			particle.update(style, *surface, rng);
			render::draw_particle(painter, particle, style);
		}
	}

	fn population(&self) -> usize {
		self.particles.len()
	}
}
