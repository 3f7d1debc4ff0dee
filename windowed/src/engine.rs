use alloc::sync::Arc;
use core::mem;

use crate::calculator::{WindowParams, compute_window};
use crate::height::{HeightResolver, HeightStrategy};
use crate::key::CacheKey;
use crate::options::KeyFn;
use crate::{
    ConfigError, EngineOptions, EngineState, HeightMode, ItemKey, MeasureOutcome,
    MeasurementCache, ReportError, ScrollingDebouncer, ScrollingState, VirtualizedItem, Window,
};

/// A headless windowing engine.
///
/// This type is UI-agnostic:
/// - It does not hold any UI objects.
/// - The host drives it with scroll offsets, viewport heights, measurements, and time.
/// - Every input change runs one recompute pass; the result is cached in [`Engine::window`].
///
/// The engine owns its measurement cache and scrolling state for its whole lifetime. Signals
/// are applied in the order they are delivered; use [`Engine::batch_update`] to fold several
/// changes into one pass.
///
/// For source subscriptions and a signal queue, see the `windowed-adapter` crate.
pub struct Engine<K = ItemKey> {
    options: EngineOptions<K>,
    strategy: HeightStrategy,
    get_item_key: KeyFn<K>,
    cache: MeasurementCache<K>,

    scroll_offset: u64,
    viewport_height: u32,
    debouncer: ScrollingDebouncer,

    window: Window<K>,
    passes: u64,

    batch_depth: usize,
    recompute_pending: bool,
    notify_pending: bool,
}

impl<K: CacheKey> Engine<K> {
    /// Creates an engine and runs the initial pass.
    ///
    /// Configuration problems are reported here rather than on the first pass.
    pub fn new(options: EngineOptions<K>) -> Result<Self, ConfigError> {
        let strategy = HeightStrategy::from_options(&options)?;
        let get_item_key = options
            .get_item_key
            .clone()
            .ok_or(ConfigError::MissingKeyResolver)?;
        vdebug!(
            count = options.count,
            overscan = options.overscan,
            fixed = strategy.mode() == HeightMode::Fixed,
            "Engine::new"
        );
        let mut engine = Self {
            strategy,
            get_item_key,
            cache: MeasurementCache::new(),
            scroll_offset: options.initial_scroll_offset,
            viewport_height: options.initial_viewport_height,
            debouncer: ScrollingDebouncer::new(options.scrolling_delay_ms),
            window: Window::empty(),
            passes: 0,
            batch_depth: 0,
            recompute_pending: false,
            notify_pending: false,
            options,
        };
        engine.run_pass();
        Ok(engine)
    }

    pub fn options(&self) -> &EngineOptions<K> {
        &self.options
    }

    /// Replaces the options. The measurement cache, scroll offset, viewport height, and
    /// scrolling state are kept.
    ///
    /// On error the previous options stay in effect.
    pub fn set_options(&mut self, options: EngineOptions<K>) -> Result<(), ConfigError> {
        let strategy = HeightStrategy::from_options(&options)?;
        let get_item_key = options
            .get_item_key
            .clone()
            .ok_or(ConfigError::MissingKeyResolver)?;
        self.strategy = strategy;
        self.get_item_key = get_item_key;
        self.debouncer.set_delay_ms(options.scrolling_delay_ms);
        self.options = options;
        vtrace!(
            count = self.options.count,
            overscan = self.options.overscan,
            "Engine::set_options"
        );
        self.invalidate();
        Ok(())
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(
        &mut self,
        f: impl FnOnce(&mut EngineOptions<K>),
    ) -> Result<(), ConfigError> {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next)
    }

    fn run_pass(&mut self) {
        self.window = self.compute();
        self.passes = self.passes.saturating_add(1);
    }

    fn notify_now(&self) {
        if let Some(cb) = &self.options.on_change {
            cb(self, self.is_scrolling());
        }
    }

    fn notify(&mut self) {
        if self.batch_depth > 0 {
            self.notify_pending = true;
            return;
        }
        self.notify_now();
    }

    fn invalidate(&mut self) {
        if self.batch_depth > 0 {
            self.recompute_pending = true;
            return;
        }
        self.run_pass();
        self.notify_now();
    }

    /// Batches several updates into a single recompute pass and `on_change` notification.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        self.batch_depth = self.batch_depth.saturating_add(1);

        f(self);

        debug_assert!(self.batch_depth > 0, "batch_depth underflow");
        self.batch_depth = self.batch_depth.saturating_sub(1);
        if self.batch_depth > 0 {
            return;
        }

        let recompute = mem::take(&mut self.recompute_pending);
        let notify = mem::take(&mut self.notify_pending);
        if recompute {
            self.run_pass();
        }
        if recompute || notify {
            self.notify_now();
        }
    }

    /// Runs the windowing calculation against the current inputs without caching it.
    pub fn compute(&self) -> Window<K> {
        compute_window(&self.resolver(), self.params())
    }

    /// Forces a recompute pass even though no input changed.
    pub fn recompute(&mut self) -> &Window<K> {
        self.invalidate();
        &self.window
    }

    /// The window produced by the most recent pass.
    pub fn window(&self) -> &Window<K> {
        &self.window
    }

    pub fn virtualized_items(&self) -> &[VirtualizedItem<K>] {
        &self.window.items
    }

    pub fn total_height(&self) -> u64 {
        self.window.total_height
    }

    /// Number of recompute passes run so far, including the initial one.
    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// The height resolver over the current options and cache.
    ///
    /// Unlike [`Engine::resolve`], it does not bounds-check indices against [`Engine::count`].
    pub fn resolver(&self) -> HeightResolver<'_, K> {
        HeightResolver::new(&self.strategy, &self.get_item_key, &self.cache)
    }

    fn params(&self) -> WindowParams {
        WindowParams {
            count: self.options.count,
            scroll_offset: self.scroll_offset,
            viewport_height: self.viewport_height,
            overscan: self.options.overscan,
            end_slack: self.options.end_slack,
        }
    }

    pub fn height_mode(&self) -> HeightMode {
        self.strategy.mode()
    }

    pub fn count(&self) -> usize {
        self.options.count
    }

    pub fn set_count(&mut self, count: usize) {
        if self.options.count == count {
            return;
        }
        self.options.count = count;
        self.invalidate();
    }

    pub fn overscan(&self) -> usize {
        self.options.overscan
    }

    pub fn set_overscan(&mut self, overscan: usize) {
        if self.options.overscan == overscan {
            return;
        }
        self.options.overscan = overscan;
        self.invalidate();
    }

    pub fn end_slack(&self) -> u32 {
        self.options.end_slack
    }

    pub fn set_end_slack(&mut self, end_slack: u32) {
        if self.options.end_slack == end_slack {
            return;
        }
        self.options.end_slack = end_slack;
        self.invalidate();
    }

    pub fn set_scrolling_delay_ms(&mut self, delay_ms: u64) {
        self.options.scrolling_delay_ms = delay_ms;
        self.debouncer.set_delay_ms(delay_ms);
    }

    pub fn set_on_change(
        &mut self,
        on_change: Option<impl Fn(&Engine<K>, bool) + Send + Sync + 'static>,
    ) {
        self.options.on_change = on_change.map(|f| Arc::new(f) as _);
    }

    pub fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    pub fn set_scroll_offset(&mut self, offset: u64) {
        if self.scroll_offset == offset {
            return;
        }
        self.scroll_offset = offset;
        self.invalidate();
    }

    pub fn viewport_height(&self) -> u32 {
        self.viewport_height
    }

    pub fn set_viewport_height(&mut self, height: u32) {
        if self.viewport_height == height {
            return;
        }
        self.viewport_height = height;
        self.invalidate();
    }

    pub fn set_viewport_and_scroll(&mut self, viewport_height: u32, scroll_offset: u64) {
        self.batch_update(|e| {
            e.set_viewport_height(viewport_height);
            e.set_scroll_offset(scroll_offset);
        });
    }

    /// Applies a scroll signal from the viewport and marks the engine as scrolling.
    ///
    /// The scrolling timer restarts even when the offset is unchanged.
    pub fn on_scroll(&mut self, offset: u64, now_ms: u64) {
        vtrace!(offset, now_ms, "on_scroll");
        self.batch_update(|e| {
            e.set_scroll_offset(offset);
            if e.debouncer.on_scroll(now_ms) {
                e.notify();
            }
        });
    }

    /// Applies a resize signal from the viewport.
    pub fn on_resize(&mut self, viewport_height: u32) {
        vtrace!(viewport_height, "on_resize");
        self.set_viewport_height(viewport_height);
    }

    /// Advances the scrolling-state timer. Returns `true` if the engine became idle.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if self.debouncer.poll(now_ms) {
            self.notify();
            return true;
        }
        false
    }

    pub fn is_scrolling(&self) -> bool {
        self.debouncer.is_scrolling()
    }

    pub fn scrolling_state(&self) -> ScrollingState {
        self.debouncer.state()
    }

    pub fn debouncer(&self) -> &ScrollingDebouncer {
        &self.debouncer
    }

    /// Cancels the pending scrolling timer so no stale transition fires later.
    pub fn cancel_scrolling_timer(&mut self) {
        self.debouncer.cancel();
    }

    pub fn state(&self) -> EngineState {
        EngineState {
            count: self.options.count,
            scroll_offset: self.scroll_offset,
            viewport_height: self.viewport_height,
            scrolling: self.debouncer.state(),
        }
    }

    /// `index` must be below [`Engine::count`]; it is passed straight to `get_item_key`.
    pub fn key_for(&self, index: usize) -> K {
        (self.get_item_key)(index)
    }

    /// Returns the current height of `index`, or `None` if it is out of range.
    pub fn resolve(&self, index: usize) -> Option<u32> {
        (index < self.options.count).then(|| self.resolver().resolve(index))
    }

    pub fn is_measured(&self, index: usize) -> bool {
        index < self.options.count && self.resolver().is_measured(index)
    }

    /// Returns a single item with its offset. This walks all preceding items.
    pub fn item(&self, index: usize) -> Option<VirtualizedItem<K>> {
        if index >= self.options.count {
            return None;
        }
        let resolver = self.resolver();
        let offset_top = (0..index).fold(0u64, |acc, i| {
            acc.saturating_add(resolver.resolve(i) as u64)
        });
        Some(VirtualizedItem {
            index,
            key: resolver.key(index),
            height: resolver.resolve(index),
            offset_top,
        })
    }

    /// Returns the index of the item whose span contains `offset`, clamped to the last item.
    pub fn index_at_offset(&self, offset: u64) -> Option<usize> {
        let count = self.options.count;
        if count == 0 {
            return None;
        }
        let resolver = self.resolver();
        let mut bottom = 0u64;
        for i in 0..count {
            bottom = bottom.saturating_add(resolver.resolve(i) as u64);
            if bottom > offset {
                return Some(i);
            }
        }
        Some(count - 1)
    }

    pub fn max_scroll_offset(&self) -> u64 {
        self.window
            .total_height
            .saturating_sub(self.viewport_height as u64)
    }

    pub fn clamp_scroll_offset(&self, offset: u64) -> u64 {
        offset.min(self.max_scroll_offset())
    }

    pub fn measurement_cache(&self) -> &MeasurementCache<K> {
        &self.cache
    }

    /// Records the observed height of a rendered item.
    ///
    /// Out-of-range reports are rejected and leave the cache untouched. Reporting the height
    /// already cached for the item's key is accepted without running a pass.
    pub fn on_item_rendered(
        &mut self,
        index: usize,
        height: u32,
    ) -> Result<MeasureOutcome, ReportError> {
        let count = self.options.count;
        if index >= count {
            vwarn!(index, count, "on_item_rendered: index out of range");
            return Err(ReportError::IndexOutOfRange { index, count });
        }
        if self.strategy.mode() == HeightMode::Fixed {
            vtrace!(index, height, "on_item_rendered: ignored in fixed mode");
            return Ok(MeasureOutcome::Ignored);
        }

        let key = self.key_for(index);
        if !self.cache.record(key, height) {
            return Ok(MeasureOutcome::Unchanged);
        }
        vtrace!(index, height, "on_item_rendered: recorded");
        self.invalidate();
        Ok(MeasureOutcome::Recorded)
    }

    /// Same as [`Engine::on_item_rendered`], for hosts that read the index back from a
    /// string attribute on the rendered element.
    pub fn on_item_rendered_attr(
        &mut self,
        raw_index: &str,
        height: u32,
    ) -> Result<MeasureOutcome, ReportError> {
        let Ok(index) = raw_index.trim().parse::<usize>() else {
            vwarn!(raw_index, "on_item_rendered: items must carry a valid index");
            return Err(ReportError::InvalidIndex {
                raw: raw_index.into(),
            });
        };
        self.on_item_rendered(index, height)
    }

    /// Records several measurements with at most one pass.
    ///
    /// Invalid reports are skipped. Returns the number of measurements that changed the cache.
    pub fn measure_many(
        &mut self,
        measurements: impl IntoIterator<Item = (usize, u32)>,
    ) -> usize {
        let mut changed = 0usize;
        self.batch_update(|e| {
            for (index, height) in measurements {
                if let Ok(MeasureOutcome::Recorded) = e.on_item_rendered(index, height) {
                    changed += 1;
                }
            }
        });
        changed
    }

    /// Drops every recorded measurement; items fall back to their estimates.
    pub fn reset_measurements(&mut self) {
        if self.cache.is_empty() {
            return;
        }
        vdebug!(entries = self.cache.len(), "reset_measurements");
        self.cache.clear();
        self.invalidate();
    }

    /// Tears the engine down: cancels the pending scrolling timer and drops the cache.
    pub fn dispose(mut self) {
        vdebug!(passes = self.passes, "Engine::dispose");
        self.debouncer.cancel();
        self.cache.clear();
    }
}

impl<K> core::fmt::Debug for Engine<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Engine")
            .field("options", &self.options)
            .field("strategy", &self.strategy)
            .field("cache", &self.cache)
            .field("scroll_offset", &self.scroll_offset)
            .field("viewport_height", &self.viewport_height)
            .field("debouncer", &self.debouncer)
            .field("passes", &self.passes)
            .finish_non_exhaustive()
    }
}
