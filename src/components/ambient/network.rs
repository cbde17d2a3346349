//! Node network effect: blinking lights with occasional lightning arcs.

use fastrand::Rng;

use super::geometry::Viewport;
use super::lightning::LightningSet;
use super::nodes::{self, Node};
use super::render::{self, Painter};
use super::state::Effect;
use super::theme::NetworkStyle;

/// Node pool and the lightning arcs running between its nodes.
pub struct Network {
	/// Pool rebuilt on every resize.
	pub nodes: Vec<Node>,
	/// Live arcs; cleared whenever `nodes` is rebuilt.
	pub arcs: LightningSet,
	style: NetworkStyle,
}

impl Network {
	/// Empty network; nodes are placed by [`Effect::rebuild`].
	pub fn new(style: NetworkStyle) -> Self {
		Self {
			nodes: Vec::new(),
			arcs: LightningSet::default(),
			style,
		}
	}
}

impl Effect for Network {
	fn rebuild(&mut self, surface: Viewport, rng: &mut Rng) {
		// Arcs hold node indices, which a rebuild invalidates.
		self.arcs.clear();
		self.nodes = nodes::populate(&self.style, surface, rng);
	}

	fn frame<P: Painter>(&mut self, painter: &mut P, rng: &mut Rng) {
		for node in &mut self.nodes {
			node.update(&self.style);
			render::draw_node(painter, node, &self.style);
		}

		let lightning = &self.style.lightning;
		self.arcs.try_spawn(&self.nodes, lightning, rng);
		for arc in self.arcs.iter_mut() {
			arc.update();
			render::draw_lightning(painter, arc, lightning);
		}
		self.arcs.purge();
	}

	fn population(&self) -> usize {
		self.nodes.len()
	}
}
