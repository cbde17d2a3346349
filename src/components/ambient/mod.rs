//! Decorative, continuously animated canvas backgrounds.
//!
//! Two effects share one engine:
//! - **Liquidity flow**: a width-scaled pool of falling gradient trails that
//!   re-randomize above the viewport once they drop off the bottom.
//! - **Network**: a fixed pool of nodes in the top band of the viewport, some
//!   of which blink, plus short-lived jagged lightning arcs between nearby
//!   nodes.
//!
//! Both run on a `<canvas>` sized to the viewport, rebuild their pools on
//! window resize, and never intercept pointer input.
//!
//! # Example
//!
//! ```ignore
//! use ambient_fx::{LiquidityFlow, NetworkAnimation, NetworkStyle};
//!
//! view! {
//!     <LiquidityFlow />
//!     <NetworkAnimation style=NetworkStyle { node_count: 40, ..Default::default() } />
//! }
//! ```

mod component;
pub mod geometry;
pub mod lightning;
pub mod network;
pub mod nodes;
pub mod particles;
pub mod render;
pub mod state;
pub mod theme;

pub use component::{LiquidityFlow, NetworkAnimation};
pub use theme::{AmbientConfig, FlowStyle, LightningStyle, NetworkStyle};
