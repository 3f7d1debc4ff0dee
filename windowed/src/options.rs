use alloc::sync::Arc;

use crate::engine::Engine;
use crate::{ConfigError, ItemKey};

/// A callback fired after each recompute pass or scrolling-state transition.
///
/// The second argument is `is_scrolling`.
pub type OnChangeCallback<K> = Arc<dyn Fn(&Engine<K>, bool) + Send + Sync>;

/// Index → height function (per-index fixed heights or estimates).
pub type HeightFn = Arc<dyn Fn(usize) -> u32 + Send + Sync>;

/// Index → stable key function.
pub type KeyFn<K> = Arc<dyn Fn(usize) -> K + Send + Sync>;

/// Authoritative item height for fixed mode.
#[derive(Clone)]
pub enum ItemHeight {
    /// Every item has the same height; windows are computed in closed form.
    Constant(u32),
    /// Heights vary by index but are known up front.
    PerIndex(HeightFn),
}

impl ItemHeight {
    pub fn height(&self, index: usize) -> u32 {
        match self {
            Self::Constant(h) => *h,
            Self::PerIndex(f) => f(index),
        }
    }
}

impl core::fmt::Debug for ItemHeight {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Constant(h) => f.debug_tuple("Constant").field(h).finish(),
            Self::PerIndex(_) => f.write_str("PerIndex(..)"),
        }
    }
}

pub const DEFAULT_OVERSCAN: usize = 3;
pub const DEFAULT_SCROLLING_DELAY_MS: u64 = 100;
pub const DEFAULT_END_SLACK: u32 = 20;

/// Configuration for [`crate::Engine`].
///
/// Closures are stored in `Arc`s so options stay cheap to clone and hosts can tweak a few
/// fields before calling `Engine::set_options`.
pub struct EngineOptions<K = ItemKey> {
    pub count: usize,

    /// Fixed heights. When set, measurements are never consulted.
    pub item_height: Option<ItemHeight>,
    /// Provisional heights for items that have not been measured yet.
    pub estimate_item_height: Option<HeightFn>,
    /// Must return a true identity for the item at an index, not the index itself, whenever
    /// the data set can be reordered. Keying by position silently attributes measurements to
    /// the wrong items after a reorder.
    pub get_item_key: Option<KeyFn<K>>,

    pub overscan: usize,
    /// Quiet period before the scrolling state returns to idle.
    pub scrolling_delay_ms: u64,
    /// Forward tolerance past the visible end: an item whose bottom edge lies within this
    /// distance of the viewport bottom still ends the window.
    pub end_slack: u32,

    /// Viewport height used before any size signal arrives.
    pub initial_viewport_height: u32,
    pub initial_scroll_offset: u64,

    pub on_change: Option<OnChangeCallback<K>>,
}

impl<K> Clone for EngineOptions<K> {
    fn clone(&self) -> Self {
        Self {
            count: self.count,
            item_height: self.item_height.clone(),
            estimate_item_height: self.estimate_item_height.clone(),
            get_item_key: self.get_item_key.clone(),
            overscan: self.overscan,
            scrolling_delay_ms: self.scrolling_delay_ms,
            end_slack: self.end_slack,
            initial_viewport_height: self.initial_viewport_height,
            initial_scroll_offset: self.initial_scroll_offset,
            on_change: self.on_change.clone(),
        }
    }
}

fn index_key(index: usize) -> ItemKey {
    index as u64
}

impl EngineOptions<ItemKey> {
    /// Fixed mode with one constant height, keyed by index.
    pub fn fixed(count: usize, item_height: u32) -> Self {
        Self::new(count)
            .with_item_height(ItemHeight::Constant(item_height))
            .with_get_item_key(index_key)
    }

    /// Fixed mode with a per-index height function, keyed by index.
    pub fn fixed_with(
        count: usize,
        item_height: impl Fn(usize) -> u32 + Send + Sync + 'static,
    ) -> Self {
        Self::new(count)
            .with_item_height(ItemHeight::PerIndex(Arc::new(item_height)))
            .with_get_item_key(index_key)
    }

    /// Dynamic mode keyed by index.
    ///
    /// Measurements will not follow items across reorders; use
    /// [`EngineOptions::dynamic_keyed`] when the data can move.
    pub fn dynamic(
        count: usize,
        estimate_item_height: impl Fn(usize) -> u32 + Send + Sync + 'static,
    ) -> Self {
        Self::dynamic_keyed(count, estimate_item_height, index_key)
    }
}

impl<K> EngineOptions<K> {
    /// Creates options with no height source and no key resolver.
    ///
    /// `Engine::new` rejects these until a height source (and key resolver) is configured.
    pub fn new(count: usize) -> Self {
        Self {
            count,
            item_height: None,
            estimate_item_height: None,
            get_item_key: None,
            overscan: DEFAULT_OVERSCAN,
            scrolling_delay_ms: DEFAULT_SCROLLING_DELAY_MS,
            end_slack: DEFAULT_END_SLACK,
            initial_viewport_height: 0,
            initial_scroll_offset: 0,
            on_change: None,
        }
    }

    /// Dynamic mode with a caller-supplied stable key.
    pub fn dynamic_keyed(
        count: usize,
        estimate_item_height: impl Fn(usize) -> u32 + Send + Sync + 'static,
        get_item_key: impl Fn(usize) -> K + Send + Sync + 'static,
    ) -> Self {
        Self::new(count)
            .with_estimate_item_height(estimate_item_height)
            .with_get_item_key(get_item_key)
    }

    pub fn with_item_height(mut self, item_height: ItemHeight) -> Self {
        self.item_height = Some(item_height);
        self
    }

    pub fn with_estimate_item_height(
        mut self,
        estimate_item_height: impl Fn(usize) -> u32 + Send + Sync + 'static,
    ) -> Self {
        self.estimate_item_height = Some(Arc::new(estimate_item_height));
        self
    }

    pub fn with_get_item_key(
        mut self,
        get_item_key: impl Fn(usize) -> K + Send + Sync + 'static,
    ) -> Self {
        self.get_item_key = Some(Arc::new(get_item_key));
        self
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_scrolling_delay_ms(mut self, delay_ms: u64) -> Self {
        self.scrolling_delay_ms = delay_ms;
        self
    }

    pub fn with_end_slack(mut self, end_slack: u32) -> Self {
        self.end_slack = end_slack;
        self
    }

    pub fn with_initial_viewport_height(mut self, height: u32) -> Self {
        self.initial_viewport_height = height;
        self
    }

    pub fn with_initial_scroll_offset(mut self, offset: u64) -> Self {
        self.initial_scroll_offset = offset;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&Engine<K>, bool) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }

    /// Checks that a height source and a key resolver are configured.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.item_height.is_none() && self.estimate_item_height.is_none() {
            return Err(ConfigError::MissingEstimator);
        }
        if self.get_item_key.is_none() {
            return Err(ConfigError::MissingKeyResolver);
        }
        Ok(())
    }
}

impl<K> core::fmt::Debug for EngineOptions<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EngineOptions")
            .field("count", &self.count)
            .field("item_height", &self.item_height)
            .field("has_estimate", &self.estimate_item_height.is_some())
            .field("has_item_key", &self.get_item_key.is_some())
            .field("overscan", &self.overscan)
            .field("scrolling_delay_ms", &self.scrolling_delay_ms)
            .field("end_slack", &self.end_slack)
            .field("initial_viewport_height", &self.initial_viewport_height)
            .field("initial_scroll_offset", &self.initial_scroll_offset)
            .finish_non_exhaustive()
    }
}
