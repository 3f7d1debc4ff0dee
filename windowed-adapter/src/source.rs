use std::fmt;
use std::sync::mpsc::Sender;

/// A change notification from a viewport, as queued for the owning controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewportSignal {
    Scroll(u64),
    Resize(u32),
}

/// Delivers scroll offsets from a [`ScrollSource`] into a controller's queue.
///
/// Sinks are `Send`, so a source may emit from any thread; the controller applies the queued
/// signals on its own thread, in delivery order.
#[derive(Clone, Debug)]
pub struct ScrollSink {
    tx: Sender<ViewportSignal>,
}

impl ScrollSink {
    pub(crate) fn new(tx: Sender<ViewportSignal>) -> Self {
        Self { tx }
    }

    /// Queues a scroll offset. Returns `false` once the receiving controller is gone.
    pub fn emit(&self, offset: u64) -> bool {
        self.tx.send(ViewportSignal::Scroll(offset)).is_ok()
    }
}

/// Delivers viewport heights from a [`SizeSource`] into a controller's queue.
#[derive(Clone, Debug)]
pub struct SizeSink {
    tx: Sender<ViewportSignal>,
}

impl SizeSink {
    pub(crate) fn new(tx: Sender<ViewportSignal>) -> Self {
        Self { tx }
    }

    /// Queues a viewport height. Returns `false` once the receiving controller is gone.
    pub fn emit(&self, viewport_height: u32) -> bool {
        self.tx.send(ViewportSignal::Resize(viewport_height)).is_ok()
    }
}

/// Something that scrolls: reports its current offset and notifies on change.
pub trait ScrollSource {
    fn scroll_offset(&self) -> u64;

    /// Starts delivering offset changes to `sink` until the returned subscription is released.
    fn subscribe_scroll(&self, sink: ScrollSink) -> Subscription;
}

/// Something with a height: reports its current size and notifies on change.
pub trait SizeSource {
    fn viewport_height(&self) -> u32;

    /// Starts delivering height changes to `sink` until the returned subscription is released.
    fn subscribe_resize(&self, sink: SizeSink) -> Subscription;
}

/// A live subscription to a source. Released exactly once, on [`Subscription::release`] or on
/// drop, whichever comes first.
pub struct Subscription {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A subscription with nothing to release, for sources that never change.
    pub fn noop() -> Self {
        Self { release: None }
    }

    pub fn release(mut self) {
        self.run_release();
    }

    fn run_release(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run_release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}
