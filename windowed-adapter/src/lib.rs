//! Adapter utilities for the `windowed` crate.
//!
//! The `windowed` crate is UI-agnostic and focuses on the core math and state. This crate
//! provides the pieces an adapter needs to connect it to a real viewport:
//!
//! - `ScrollSource` / `SizeSource` capabilities, implementable over any toolkit's events
//! - RAII `Subscription`s, released on drop
//! - scroll and size trackers that pull the current value on attach
//! - a `Controller` that owns an engine and applies queued signals in delivery order
//! - `ManualViewport`, a headless source for tests and simulations
//!
//! This crate is intentionally framework-agnostic (no ratatui/egui bindings).
//!
//! ```
//! use windowed::EngineOptions;
//! use windowed_adapter::{Controller, ManualViewport};
//!
//! let viewport = ManualViewport::new(600);
//! let mut controller =
//!     Controller::new(EngineOptions::fixed(1000, 40)).unwrap();
//! controller.attach(&viewport, &viewport);
//! assert_eq!(controller.window().end_index(), Some(17));
//!
//! viewport.scroll_to(4000);
//! controller.tick(0);
//! assert_eq!(controller.window().start_index(), Some(97));
//! assert!(controller.is_scrolling());
//!
//! controller.tick(100);
//! assert!(!controller.is_scrolling());
//! ```
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod controller;
mod manual;
mod source;
mod tracker;

#[cfg(test)]
mod tests;

pub use controller::Controller;
pub use manual::ManualViewport;
pub use source::{ScrollSink, ScrollSource, SizeSink, SizeSource, Subscription, ViewportSignal};
pub use tracker::{ScrollTracker, SizeTracker};
