use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use crate::{ScrollSink, ScrollSource, SizeSink, SizeSource, Subscription};

/// A headless viewport implementing both [`ScrollSource`] and [`SizeSource`].
///
/// Useful for tests, simulations, and hosts that already own their scroll state. Clones share
/// the same viewport and may be moved to other threads.
#[derive(Clone, Default)]
pub struct ManualViewport {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    scroll_offset: u64,
    viewport_height: u32,
    next_id: u64,
    scroll_sinks: Vec<(u64, ScrollSink)>,
    size_sinks: Vec<(u64, SizeSink)>,
}

impl Inner {
    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    inner.lock().unwrap_or_else(|e| e.into_inner())
}

impl ManualViewport {
    pub fn new(viewport_height: u32) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                viewport_height,
                ..Inner::default()
            })),
        }
    }

    /// Moves the viewport and notifies every scroll subscriber, even if the offset is
    /// unchanged.
    pub fn scroll_to(&self, offset: u64) {
        let mut inner = lock(&self.inner);
        inner.scroll_offset = offset;
        inner.scroll_sinks.retain(|(_, sink)| sink.emit(offset));
    }

    /// Resizes the viewport and notifies every resize subscriber.
    pub fn resize(&self, viewport_height: u32) {
        let mut inner = lock(&self.inner);
        inner.viewport_height = viewport_height;
        inner
            .size_sinks
            .retain(|(_, sink)| sink.emit(viewport_height));
    }

    pub fn scroll_listener_count(&self) -> usize {
        lock(&self.inner).scroll_sinks.len()
    }

    pub fn resize_listener_count(&self) -> usize {
        lock(&self.inner).size_sinks.len()
    }
}

impl ScrollSource for ManualViewport {
    fn scroll_offset(&self) -> u64 {
        lock(&self.inner).scroll_offset
    }

    fn subscribe_scroll(&self, sink: ScrollSink) -> Subscription {
        let id = {
            let mut inner = lock(&self.inner);
            let id = inner.next_id();
            inner.scroll_sinks.push((id, sink));
            id
        };
        let weak: Weak<Mutex<Inner>> = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                lock(&inner).scroll_sinks.retain(|(sid, _)| *sid != id);
                vtrace!(id, "ManualViewport: scroll listener released");
            }
        })
    }
}

impl SizeSource for ManualViewport {
    fn viewport_height(&self) -> u32 {
        lock(&self.inner).viewport_height
    }

    fn subscribe_resize(&self, sink: SizeSink) -> Subscription {
        let id = {
            let mut inner = lock(&self.inner);
            let id = inner.next_id();
            inner.size_sinks.push((id, sink));
            id
        };
        let weak: Weak<Mutex<Inner>> = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                lock(&inner).size_sinks.retain(|(sid, _)| *sid != id);
                vtrace!(id, "ManualViewport: resize listener released");
            }
        })
    }
}

impl fmt::Debug for ManualViewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = lock(&self.inner);
        f.debug_struct("ManualViewport")
            .field("scroll_offset", &inner.scroll_offset)
            .field("viewport_height", &inner.viewport_height)
            .field("scroll_listeners", &inner.scroll_sinks.len())
            .field("resize_listeners", &inner.size_sinks.len())
            .finish()
    }
}
