use crate::{ScrollSink, ScrollSource, SizeSink, SizeSource, Subscription};

/// The scroll offset as of the last delivered signal.
///
/// Attaching pulls the current offset synchronously, so the first window is correct before
/// any scroll event arrives. At most one subscription is held; attaching again releases it.
#[derive(Debug, Default)]
pub struct ScrollTracker {
    offset: u64,
    subscription: Option<Subscription>,
}

impl ScrollTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the source's offset, then subscribes `sink` to it. Returns the offset read.
    pub fn attach(&mut self, source: &dyn ScrollSource, sink: ScrollSink) -> u64 {
        self.detach();
        self.offset = source.scroll_offset();
        self.subscription = Some(source.subscribe_scroll(sink));
        self.offset
    }

    /// Releases the subscription. Returns `false` if nothing was attached.
    pub fn detach(&mut self) -> bool {
        match self.subscription.take() {
            Some(subscription) => {
                subscription.release();
                true
            }
            None => false,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn observe(&mut self, offset: u64) {
        self.offset = offset;
    }

    pub fn scroll_offset(&self) -> u64 {
        self.offset
    }
}

/// The viewport height as of the last delivered signal.
///
/// Same attach contract as [`ScrollTracker`].
#[derive(Debug, Default)]
pub struct SizeTracker {
    height: u32,
    subscription: Option<Subscription>,
}

impl SizeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the source's height, then subscribes `sink` to it. Returns the height read.
    pub fn attach(&mut self, source: &dyn SizeSource, sink: SizeSink) -> u32 {
        self.detach();
        self.height = source.viewport_height();
        self.subscription = Some(source.subscribe_resize(sink));
        self.height
    }

    pub fn detach(&mut self) -> bool {
        match self.subscription.take() {
            Some(subscription) => {
                subscription.release();
                true
            }
            None => false,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn observe(&mut self, height: u32) {
        self.height = height;
    }

    pub fn viewport_height(&self) -> u32 {
        self.height
    }
}
