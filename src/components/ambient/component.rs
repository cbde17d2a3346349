//! Leptos components binding the ambient effects to a full-viewport canvas.
//!
//! Each component owns an [`Animator`] behind `Rc<RefCell<..>>`, shared with
//! a window `resize` listener and a `requestAnimationFrame` loop. The loop
//! reschedules itself only while the animator reports it is running, and
//! component cleanup cancels the pending frame and detaches the listener.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use super::geometry::Viewport;
use super::network::Network;
use super::particles::ParticleField;
use super::state::{self, Animator};
use super::theme::{FlowStyle, NetworkStyle};

/// Positioning shared by both canvases: fixed, full viewport, behind content,
/// transparent to input.
const CANVAS_STYLE: &str =
	"position: fixed; top: 0; left: 0; width: 100%; height: 100%; z-index: 0; pointer-events: none;";

/// Animator plus the context it paints into.
struct Stage<E> {
	animator: Animator<E>,
	ctx: CanvasRenderingContext2d,
}

/// Browser-side handles for one running effect.
struct CanvasLoop<E> {
	stage: Rc<RefCell<Option<Stage<E>>>>,
	animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
	resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
	frame_id: Rc<Cell<Option<i32>>>,
}

impl<E> Clone for CanvasLoop<E> {
	fn clone(&self) -> Self {
		Self {
			stage: self.stage.clone(),
			animate: self.animate.clone(),
			resize_cb: self.resize_cb.clone(),
			frame_id: self.frame_id.clone(),
		}
	}
}

impl<E: state::Effect + 'static> CanvasLoop<E> {
	fn new() -> Self {
		Self {
			stage: Rc::new(RefCell::new(None)),
			animate: Rc::new(RefCell::new(None)),
			resize_cb: Rc::new(RefCell::new(None)),
			frame_id: Rc::new(Cell::new(None)),
		}
	}

	/// Bind to `canvas` and start the frame loop. No-op if already mounted.
	fn mount(&self, canvas: HtmlCanvasElement, effect: E) {
		if self.stage.borrow().is_some() {
			return;
		}
		let Some(window) = web_sys::window() else {
			warn!("ambient: no window, animation disabled");
			return;
		};
		let Some(ctx) = context_2d(&canvas) else {
			warn!("ambient: canvas has no 2d context, animation disabled");
			return;
		};
		let Some(size) = viewport(&window) else {
			warn!("ambient: viewport size unavailable, animation disabled");
			return;
		};

		size_canvas(&canvas, size);
		let mut animator = Animator::new(effect, fastrand::Rng::new());
		animator.mount(size);
		*self.stage.borrow_mut() = Some(Stage { animator, ctx });

		let stage_resize = self.stage.clone();
		*self.resize_cb.borrow_mut() = Some(Closure::new(move || {
			let Some(size) = web_sys::window().as_ref().and_then(viewport) else {
				return;
			};
			if let Some(stage) = stage_resize.borrow_mut().as_mut() {
				if !stage.animator.is_running() {
					return;
				}
				size_canvas(&canvas, size);
				stage.animator.resize(size);
			}
		}));
		if let Some(ref cb) = *self.resize_cb.borrow() {
			if window
				.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref())
				.is_err()
			{
				warn!("ambient: failed to listen for resize");
			}
		}

		let (stage_anim, animate_inner, frame_inner) = (
			self.stage.clone(),
			self.animate.clone(),
			self.frame_id.clone(),
		);
		*self.animate.borrow_mut() = Some(Closure::new(move || {
			frame_inner.set(None);
			let keep_going = match stage_anim.borrow_mut().as_mut() {
				Some(Stage { animator, ctx }) => animator.tick(ctx),
				None => false,
			};
			if keep_going {
				if let Some(ref cb) = *animate_inner.borrow() {
					frame_inner.set(request_frame(cb));
				}
			}
		}));
		if let Some(ref cb) = *self.animate.borrow() {
			self.frame_id.set(request_frame(cb));
		}
	}

	/// Stop the loop, detach the resize listener and drop the pool.
	/// Idempotent, and safe if `mount` never completed.
	fn unmount(&self) {
		if let Some(stage) = self.stage.borrow_mut().as_mut() {
			stage.animator.unmount();
		}
		if let Some(window) = web_sys::window() {
			if let Some(id) = self.frame_id.take() {
				let _ = window.cancel_animation_frame(id);
			}
			if let Some(cb) = self.resize_cb.borrow_mut().take() {
				let _ = window
					.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}
		self.animate.borrow_mut().take();
		self.stage.borrow_mut().take();
	}
}

fn request_frame(cb: &Closure<dyn FnMut()>) -> Option<i32> {
	web_sys::window()?
		.request_animation_frame(cb.as_ref().unchecked_ref())
		.ok()
}

fn viewport(window: &Window) -> Option<Viewport> {
	Some(Viewport::new(
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok()??.dyn_into().ok()
}

fn size_canvas(canvas: &HtmlCanvasElement, size: Viewport) {
	canvas.set_width(size.width as u32);
	canvas.set_height(size.height as u32);
}

/// Mount `build()`'s effect once the canvas exists; tear down on cleanup.
fn bind_canvas<E, F>(canvas_ref: NodeRef<leptos::html::Canvas>, build: F)
where
	E: state::Effect + 'static,
	F: Fn() -> E + 'static,
{
	let canvas_loop = CanvasLoop::<E>::new();

	let mount_loop = canvas_loop.clone();
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		mount_loop.mount(canvas.into(), build());
	});

	let cleanup = SendWrapper::new(canvas_loop);
	on_cleanup(move || cleanup.unmount());
}

/// Falling "liquidity" particle trails behind the page content.
///
/// The canvas fills the viewport, ignores pointer input and rebuilds its
/// particle pool whenever the window is resized.
#[component]
pub fn LiquidityFlow(#[prop(optional)] style: Option<FlowStyle>) -> impl IntoView {
	let style = style.unwrap_or_default();
	let canvas_style = format!("{CANVAS_STYLE} opacity: {};", style.canvas_opacity);
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	bind_canvas(canvas_ref, move || ParticleField::new(style.clone()));

	view! {
		<canvas
			node_ref=canvas_ref
			class="ambient-liquidity-flow"
			aria-hidden="true"
			style=canvas_style
		/>
	}
}

/// Blinking node lights with random lightning arcs across the top of the page.
#[component]
pub fn NetworkAnimation(#[prop(optional)] style: Option<NetworkStyle>) -> impl IntoView {
	let style = style.unwrap_or_default();
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	bind_canvas(canvas_ref, move || Network::new(style.clone()));

	view! {
		<canvas
			node_ref=canvas_ref
			class="ambient-network"
			aria-hidden="true"
			style=CANVAS_STYLE
		/>
	}
}
