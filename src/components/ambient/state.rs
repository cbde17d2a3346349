//! Surface lifecycle and the per-frame state machine.
//!
//! [`Animator`] owns one effect plus the randomness that drives it, and
//! tracks whether it is bound to a live surface. The host (see the canvas
//! component) forwards mount, resize, frame and unmount signals; `tick`
//! reports whether another frame should be scheduled, which is how teardown
//! stops the loop.

use fastrand::Rng;
use log::{debug, info};

use super::geometry::Viewport;
use super::render::Painter;

/// A pooled animation that can be rebuilt for a surface and stepped per frame.
pub trait Effect {
	/// Discard all pooled state and rebuild it for a surface of this size.
	fn rebuild(&mut self, surface: Viewport, rng: &mut Rng);

	/// Update and draw every entity for one frame. The surface is already cleared.
	fn frame<P: Painter>(&mut self, painter: &mut P, rng: &mut Rng);

	/// Number of pooled entities.
	fn population(&self) -> usize;
}

/// Lifecycle phase of an [`Animator`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
	/// Not bound to a surface; frames and resizes are ignored.
	#[default]
	Idle,
	/// Bound and animating.
	Running,
}

/// Drives one [`Effect`] against a surface of a known size.
pub struct Animator<E> {
	effect: E,
	rng: Rng,
	surface: Viewport,
	phase: Phase,
	frames: u64,
}

impl<E: Effect> Animator<E> {
	/// Idle animator; nothing is built until [`Animator::mount`].
	pub fn new(effect: E, rng: Rng) -> Self {
		Self {
			effect,
			rng,
			surface: Viewport::default(),
			phase: Phase::Idle,
			frames: 0,
		}
	}

	/// Bind to a surface and build the pool. Repeated calls while running are ignored.
	pub fn mount(&mut self, surface: Viewport) {
		if self.phase == Phase::Running {
			return;
		}
		self.phase = Phase::Running;
		self.frames = 0;
		self.rebuild(surface);
		info!(
			"ambient: mounted {}x{} surface with {} entities",
			surface.width,
			surface.height,
			self.effect.population()
		);
	}

	/// Track a new surface size and rebuild the pool from scratch.
	pub fn resize(&mut self, surface: Viewport) {
		if self.phase != Phase::Running {
			return;
		}
		self.rebuild(surface);
		debug!(
			"ambient: resized to {}x{}, {} entities",
			surface.width,
			surface.height,
			self.effect.population()
		);
	}

	/// Run one frame: clear, then update and draw the effect.
	///
	/// Returns `true` if the host should schedule another frame.
	pub fn tick<P: Painter>(&mut self, painter: &mut P) -> bool {
		if self.phase != Phase::Running {
			return false;
		}
		painter.clear(self.surface);
		self.effect.frame(painter, &mut self.rng);
		self.frames += 1;
		true
	}

	/// Stop animating. Safe to call any number of times, including before `mount`.
	pub fn unmount(&mut self) {
		if self.phase == Phase::Idle {
			return;
		}
		self.phase = Phase::Idle;
		info!("ambient: unmounted after {} frames", self.frames);
	}

	fn rebuild(&mut self, surface: Viewport) {
		self.surface = surface;
		self.effect.rebuild(surface, &mut self.rng);
	}

	/// Current lifecycle phase.
	pub fn phase(&self) -> Phase {
		self.phase
	}

	/// Bound to a surface and animating.
	pub fn is_running(&self) -> bool {
		self.phase == Phase::Running
	}

	/// Size of the bound surface.
	pub fn surface(&self) -> Viewport {
		self.surface
	}

	/// Frames drawn since the last mount.
	pub fn frames(&self) -> u64 {
		self.frames
	}

	/// The driven effect.
	pub fn effect(&self) -> &E {
		&self.effect
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::ambient::network::Network;
	use crate::components::ambient::particles::ParticleField;
	use crate::components::ambient::render::testing::{Op, Recorder};
	use crate::components::ambient::theme::{FlowStyle, NetworkStyle};

	fn flow() -> Animator<ParticleField> {
		Animator::new(ParticleField::new(FlowStyle::default()), Rng::with_seed(61))
	}

	#[test]
	fn idle_until_mounted() {
		let mut animator = flow();
		let mut recorder = Recorder::default();
		assert_eq!(animator.phase(), Phase::Idle);
		assert!(!animator.tick(&mut recorder));
		animator.resize(Viewport::new(800.0, 600.0));
		assert_eq!(animator.effect().population(), 0);
		assert!(recorder.ops.is_empty());
	}

	#[test]
	fn mount_builds_pool_from_width() {
		let mut animator = flow();
		animator.mount(Viewport::new(800.0, 600.0));
		assert!(animator.is_running());
		assert_eq!(animator.effect().population(), 53);
	}

	#[test]
	fn tick_clears_before_drawing() {
		let mut animator = flow();
		animator.mount(Viewport::new(300.0, 200.0));
		let mut recorder = Recorder::default();
		assert!(animator.tick(&mut recorder));
		assert_eq!(recorder.ops[0], Op::Clear(Viewport::new(300.0, 200.0)));
		assert_eq!(recorder.ops.len(), 1 + 20);
		assert_eq!(animator.frames(), 1);
	}

	#[test]
	fn resize_rebuilds_pool() {
		let mut animator = flow();
		animator.mount(Viewport::new(800.0, 600.0));
		animator.resize(Viewport::new(1500.0, 900.0));
		assert_eq!(animator.effect().population(), 100);
		assert_eq!(animator.surface(), Viewport::new(1500.0, 900.0));
	}

	#[test]
	fn unmount_right_after_mount_stops_everything() {
		let mut animator = Animator::new(
			Network::new(NetworkStyle::default()),
			Rng::with_seed(62),
		);
		animator.mount(Viewport::new(800.0, 600.0));
		animator.unmount();
		animator.unmount();

		let mut recorder = Recorder::default();
		assert!(!animator.tick(&mut recorder));
		assert!(recorder.ops.is_empty());
		assert_eq!(animator.frames(), 0);

		let before = animator.effect().nodes.clone();
		animator.resize(Viewport::new(200.0, 100.0));
		assert_eq!(animator.effect().nodes, before);
		assert_eq!(animator.surface(), Viewport::new(800.0, 600.0));
	}

	#[test]
	fn unmount_before_mount_is_harmless() {
		let mut animator = flow();
		animator.unmount();
		assert_eq!(animator.phase(), Phase::Idle);
	}

	#[test]
	fn remount_after_unmount_starts_fresh() {
		let mut animator = flow();
		animator.mount(Viewport::new(300.0, 200.0));
		let mut recorder = Recorder::default();
		animator.tick(&mut recorder);
		animator.unmount();
		animator.mount(Viewport::new(600.0, 200.0));
		assert_eq!(animator.frames(), 0);
		assert_eq!(animator.effect().population(), 40);
	}
}
