//! ambient-fx: decorative canvas backgrounds for the landing page.
//!
//! This crate provides WASM components that animate falling "liquidity"
//! particles and a blinking node network with lightning arcs behind the
//! page content.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::ambient::{
	AmbientConfig, FlowStyle, LightningStyle, LiquidityFlow, NetworkAnimation, NetworkStyle,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("ambient-fx: logging initialized");
}

/// Parse an [`AmbientConfig`], logging and falling back to defaults on error.
pub fn parse_config(json_text: &str) -> AmbientConfig {
	match serde_json::from_str::<AmbientConfig>(json_text) {
		Ok(config) => {
			info!(
				"ambient-fx: loaded config (density {}, {} nodes)",
				config.flow.density, config.network.node_count
			);
			config
		}
		Err(e) => {
			warn!("ambient-fx: failed to parse config: {}", e);
			AmbientConfig::default()
		}
	}
}

/// Load effect overrides from a script element with id="ambient-config".
/// Expected format: JSON with optional `flow` and `network` sections.
fn load_config() -> Option<AmbientConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("ambient-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;
	Some(parse_config(&json_text))
}

/// Main application component.
/// Mounts both background effects under the page content.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let AmbientConfig { flow, network } = load_config().unwrap_or_default();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Lightning Liquidity" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<LiquidityFlow style=flow />
		<NetworkAnimation style=network />
		<main class="page-content" style="position: relative; z-index: 1;">
			<h1>"Lightning Liquidity"</h1>
			<p class="subtitle">"Open a channel and let the sats flow."</p>
		</main>
	}
}
