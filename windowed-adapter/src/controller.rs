use std::fmt;
use std::sync::mpsc::{self, Receiver, Sender};

use windowed::{
    CacheKey, ConfigError, Engine, EngineOptions, ItemKey, MeasureOutcome, ReportError, Window,
};

use crate::{
    ScrollSink, ScrollSource, ScrollTracker, SizeSink, SizeSource, SizeTracker, ViewportSignal,
};

/// A framework-neutral controller that wraps a `windowed::Engine`, its two trackers, and the
/// queue their sources deliver into.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `attach` once a viewport exists (and again if the viewport is replaced)
/// - `tick(now_ms)` each frame/timer tick, which applies queued signals in delivery order and
///   runs `is_scrolling` debouncing
/// - `on_item_rendered` after laying out an item (dynamic mode)
///
/// Dropping the controller releases both subscriptions.
pub struct Controller<K = ItemKey> {
    engine: Engine<K>,
    scroll: ScrollTracker,
    size: SizeTracker,
    tx: Sender<ViewportSignal>,
    rx: Receiver<ViewportSignal>,
}

impl<K: CacheKey> Controller<K> {
    pub fn new(options: EngineOptions<K>) -> Result<Self, ConfigError> {
        Engine::new(options).map(Self::from_engine)
    }

    pub fn from_engine(engine: Engine<K>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            engine,
            scroll: ScrollTracker::new(),
            size: SizeTracker::new(),
            tx,
            rx,
        }
    }

    pub fn engine(&self) -> &Engine<K> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine<K> {
        &mut self.engine
    }

    /// Attaches to a viewport, releasing any previous subscriptions first.
    ///
    /// Both current values are read synchronously and applied in one pass. The initial read
    /// is not a scroll signal, so the engine stays idle.
    pub fn attach(&mut self, scroll: &dyn ScrollSource, size: &dyn SizeSource) {
        self.detach();
        let offset = self
            .scroll
            .attach(scroll, ScrollSink::new(self.tx.clone()));
        let height = self.size.attach(size, SizeSink::new(self.tx.clone()));
        vdebug!(offset, height, "Controller::attach");
        self.engine.set_viewport_and_scroll(height, offset);
    }

    /// Releases both subscriptions.
    ///
    /// Signals still queued from the released sources are discarded. A pending scrolling timer
    /// stays armed, so `tick` still settles the engine to idle. Returns `false` if nothing was
    /// attached.
    pub fn detach(&mut self) -> bool {
        let scroll = self.scroll.detach();
        let size = self.size.detach();
        self.rx.try_iter().for_each(drop);
        let was_attached = scroll || size;
        if was_attached {
            vdebug!("Controller::detach");
        }
        was_attached
    }

    pub fn is_attached(&self) -> bool {
        self.scroll.is_attached() || self.size.is_attached()
    }

    /// Applies every queued signal, in delivery order, one pass per signal.
    ///
    /// Returns the number of signals applied.
    pub fn pump(&mut self, now_ms: u64) -> usize {
        let mut applied = 0usize;
        while let Ok(signal) = self.rx.try_recv() {
            match signal {
                ViewportSignal::Scroll(offset) => {
                    self.scroll.observe(offset);
                    self.engine.on_scroll(offset, now_ms);
                }
                ViewportSignal::Resize(height) => {
                    self.size.observe(height);
                    self.engine.on_resize(height);
                }
            }
            applied += 1;
        }
        if applied > 0 {
            vtrace!(applied, now_ms, "Controller::pump");
        }
        applied
    }

    /// Pumps queued signals, then advances the scrolling timer. Returns `true` if the engine
    /// became idle.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        self.pump(now_ms);
        self.engine.tick(now_ms)
    }

    pub fn on_item_rendered(
        &mut self,
        index: usize,
        height: u32,
    ) -> Result<MeasureOutcome, ReportError> {
        self.engine.on_item_rendered(index, height)
    }

    pub fn on_item_rendered_attr(
        &mut self,
        raw_index: &str,
        height: u32,
    ) -> Result<MeasureOutcome, ReportError> {
        self.engine.on_item_rendered_attr(raw_index, height)
    }

    pub fn window(&self) -> &Window<K> {
        self.engine.window()
    }

    pub fn total_height(&self) -> u64 {
        self.engine.total_height()
    }

    pub fn is_scrolling(&self) -> bool {
        self.engine.is_scrolling()
    }

    /// The offset as of the last applied signal.
    pub fn scroll_offset(&self) -> u64 {
        self.scroll.scroll_offset()
    }

    /// The viewport height as of the last applied signal.
    pub fn viewport_height(&self) -> u32 {
        self.size.viewport_height()
    }
}

impl<K> fmt::Debug for Controller<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("engine", &self.engine)
            .field("scroll", &self.scroll)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}
