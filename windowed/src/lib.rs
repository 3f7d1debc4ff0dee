//! A headless windowing engine for large vertical lists.
//!
//! For viewport sources, subscriptions, and a signal-driven controller, see the
//! `windowed-adapter` crate.
//!
//! Given a scroll offset, a viewport height, and per-item height information, the engine
//! computes which items must be materialized, at which vertical offsets, plus the total
//! content height. Heights are resolved with one of three strategies:
//! - a fixed constant or per-index function (authoritative),
//! - a height measured after the item was rendered, cached by stable key,
//! - a caller-supplied estimate.
//!
//! It also derives an "is scrolling" signal from scroll events and a quiet period, which
//! hosts can use to degrade rendering cost during fast scroll.
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - viewport height
//! - scroll offset
//! - a monotonic millisecond clock (`now_ms`)
//! - measured heights for rendered items (dynamic mode)
//!
//! ```
//! use windowed::{Engine, EngineOptions};
//!
//! let mut engine = Engine::new(
//!     EngineOptions::fixed(1000, 40).with_initial_viewport_height(600),
//! )
//! .unwrap();
//! let range = engine.window().range().unwrap();
//! assert_eq!((range.start_index, range.end_index), (0, 17));
//!
//! engine.on_scroll(4000, 0);
//! assert!(engine.is_scrolling());
//! assert_eq!(engine.window().start_index(), Some(97));
//!
//! engine.tick(100);
//! assert!(!engine.is_scrolling());
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod cache;
mod calculator;
mod debounce;
mod engine;
mod error;
mod height;
mod key;
mod options;
mod state;
mod types;


pub use cache::MeasurementCache;
pub use calculator::{WindowParams, compute_window};
pub use debounce::{QuietTimer, ScrollingDebouncer};
pub use engine::Engine;
pub use error::{ConfigError, ReportError};
pub use height::HeightResolver;
pub use key::CacheKey;
pub use options::{
    DEFAULT_END_SLACK, DEFAULT_OVERSCAN, DEFAULT_SCROLLING_DELAY_MS, EngineOptions, HeightFn,
    ItemHeight, KeyFn, OnChangeCallback,
};
pub use state::{EngineState, ScrollingState};
pub use types::{HeightMode, ItemKey, MeasureOutcome, VirtualizedItem, Window, WindowRange};
