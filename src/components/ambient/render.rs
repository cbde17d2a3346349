//! Canvas rendering for the ambient effects.
//!
//! Drawing goes through the [`Painter`] trait so effects never touch the DOM
//! directly. The browser implementation wraps `CanvasRenderingContext2d`.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::geometry::{Point, Viewport};
use super::lightning::Lightning;
use super::nodes::Node;
use super::particles::Particle;
use super::theme::{Color, FlowStyle, LightningStyle, NetworkStyle};

/// Blurred halo around a stroke.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glow {
	/// Blur radius in pixels.
	pub blur: f64,
	/// Halo color.
	pub color: Color,
}

/// The drawing operations the effects need from a 2D surface.
pub trait Painter {
	/// Wipe the whole surface to transparent.
	fn clear(&mut self, surface: Viewport);
	/// Round-capped line from `head` in `color` fading to transparent at `tail`.
	fn fading_stroke(&mut self, head: Point, tail: Point, color: Color, width: f64);
	/// Filled circle; the color's alpha applies to the whole shape.
	fn fill_circle(&mut self, center: Point, radius: f64, color: Color);
	/// Open polyline through `points` with a glow that does not leak into later draws.
	fn polyline(&mut self, points: &[Point], color: Color, width: f64, glow: Glow);
}

impl Painter for CanvasRenderingContext2d {
	fn clear(&mut self, surface: Viewport) {
		self.clear_rect(0.0, 0.0, surface.width, surface.height);
	}

	fn fading_stroke(&mut self, head: Point, tail: Point, color: Color, width: f64) {
		let gradient = self.create_linear_gradient(head.x, head.y, tail.x, tail.y);
		let _ = gradient.add_color_stop(0.0, &color.to_css());
		let _ = gradient.add_color_stop(1.0, &color.with_alpha(0.0).to_css());

		self.begin_path();
		#[allow(deprecated)]
		self.set_stroke_style(&gradient);
		self.set_line_width(width);
		self.set_line_cap("round");
		self.move_to(head.x, head.y);
		self.line_to(tail.x, tail.y);
		self.stroke();
	}

	fn fill_circle(&mut self, center: Point, radius: f64, color: Color) {
		self.begin_path();
		let _ = self.arc(center.x, center.y, radius, 0.0, PI * 2.0);
		self.set_fill_style_str(&color.with_alpha(1.0).to_css());
		self.set_global_alpha(color.a);
		self.fill();
		self.set_global_alpha(1.0);
	}

	fn polyline(&mut self, points: &[Point], color: Color, width: f64, glow: Glow) {
		let Some((first, rest)) = points.split_first() else {
			return;
		};

		self.begin_path();
		self.set_stroke_style_str(&color.to_css());
		self.set_line_width(width);
		self.set_shadow_blur(glow.blur);
		self.set_shadow_color(&glow.color.to_css());

		self.move_to(first.x, first.y);
		for p in rest {
			self.line_to(p.x, p.y);
		}
		self.stroke();
		self.set_shadow_blur(0.0);
	}
}

/// Gradient trail from the particle head up its tail.
pub fn draw_particle<P: Painter>(painter: &mut P, particle: &Particle, style: &FlowStyle) {
	painter.fading_stroke(
		particle.head(),
		particle.tail(),
		particle.color(style),
		particle.width,
	);
}

/// Solid dot plus a wider, dimmer glow. Non-light nodes draw nothing.
pub fn draw_node<P: Painter>(painter: &mut P, node: &Node, style: &NetworkStyle) {
	if !node.light {
		return;
	}
	let color = node.color.with_alpha(node.opacity);
	painter.fill_circle(node.position, style.radius, color);
	painter.fill_circle(
		node.position,
		style.glow_radius,
		color.fade(style.glow_alpha),
	);
}

/// Jagged arc at opacity equal to its remaining life. Dead arcs draw nothing.
pub fn draw_lightning<P: Painter>(painter: &mut P, arc: &Lightning, style: &LightningStyle) {
	if !arc.is_alive() {
		return;
	}
	painter.polyline(
		&arc.segments,
		style.color.with_alpha(arc.life.min(1.0)),
		style.line_width,
		Glow {
			blur: style.glow_blur,
			color: style.glow_color,
		},
	);
}

#[cfg(test)]
pub(crate) mod testing {
	use super::*;

	/// A single recorded drawing call.
	#[derive(Clone, Debug, PartialEq)]
	pub enum Op {
		Clear(Viewport),
		Trail {
			head: Point,
			tail: Point,
			color: Color,
			width: f64,
		},
		Circle {
			center: Point,
			radius: f64,
			color: Color,
		},
		Polyline {
			points: Vec<Point>,
			color: Color,
			width: f64,
			glow: Glow,
		},
	}

	/// Painter double that records every call.
	#[derive(Debug, Default)]
	pub struct Recorder {
		pub ops: Vec<Op>,
	}

	impl Painter for Recorder {
		fn clear(&mut self, surface: Viewport) {
			self.ops.push(Op::Clear(surface));
		}

		fn fading_stroke(&mut self, head: Point, tail: Point, color: Color, width: f64) {
			self.ops.push(Op::Trail {
				head,
				tail,
				color,
				width,
			});
		}

		fn fill_circle(&mut self, center: Point, radius: f64, color: Color) {
			self.ops.push(Op::Circle {
				center,
				radius,
				color,
			});
		}

		fn polyline(&mut self, points: &[Point], color: Color, width: f64, glow: Glow) {
			self.ops.push(Op::Polyline {
				points: points.to_vec(),
				color,
				width,
				glow,
			});
		}
	}
}
