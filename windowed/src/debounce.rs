use crate::ScrollingState;

/// The pending quiet-period timer of a [`ScrollingDebouncer`].
///
/// Time is supplied by the caller as a monotonic millisecond counter, so the "timer" is just
/// a deadline. Replacing or dropping the handle cancels it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuietTimer {
    deadline_ms: u64,
}

impl QuietTimer {
    pub fn start(now_ms: u64, delay_ms: u64) -> Self {
        Self {
            deadline_ms: now_ms.saturating_add(delay_ms),
        }
    }

    pub fn deadline_ms(&self) -> u64 {
        self.deadline_ms
    }

    pub fn has_elapsed(&self, now_ms: u64) -> bool {
        now_ms >= self.deadline_ms
    }
}

/// Derives [`ScrollingState`] from a stream of scroll signals plus a quiet period.
///
/// - `Idle -> Scrolling` on any scroll signal.
/// - `Scrolling -> Scrolling` on further signals; each one restarts the timer.
/// - `Scrolling -> Idle` once the timer elapses with no intervening signal.
///
/// At most one timer is pending at a time.
#[derive(Clone, Debug)]
pub struct ScrollingDebouncer {
    state: ScrollingState,
    delay_ms: u64,
    timer: Option<QuietTimer>,
}

impl ScrollingDebouncer {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            state: ScrollingState::Idle,
            delay_ms,
            timer: None,
        }
    }

    pub fn state(&self) -> ScrollingState {
        self.state
    }

    pub fn is_scrolling(&self) -> bool {
        self.state.is_scrolling()
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Changes the quiet period. A pending timer keeps its original deadline.
    pub fn set_delay_ms(&mut self, delay_ms: u64) {
        self.delay_ms = delay_ms;
    }

    pub fn pending_deadline_ms(&self) -> Option<u64> {
        self.timer.map(|t| t.deadline_ms())
    }

    /// Records a scroll signal at `now_ms`. Returns `true` if the state changed.
    pub fn on_scroll(&mut self, now_ms: u64) -> bool {
        self.timer = Some(QuietTimer::start(now_ms, self.delay_ms));
        let changed = self.state != ScrollingState::Scrolling;
        self.state = ScrollingState::Scrolling;
        if changed {
            vtrace!(now_ms, delay_ms = self.delay_ms, "scrolling: idle -> scrolling");
        }
        changed
    }

    /// Fires the pending timer if it has elapsed by `now_ms`. Returns `true` if the state
    /// changed.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        let Some(timer) = self.timer else {
            return false;
        };
        if !timer.has_elapsed(now_ms) {
            return false;
        }
        self.timer = None;
        let changed = self.state != ScrollingState::Idle;
        self.state = ScrollingState::Idle;
        if changed {
            vtrace!(now_ms, "scrolling: scrolling -> idle");
        }
        changed
    }

    /// Cancels the pending timer without changing the state.
    pub fn cancel(&mut self) {
        if self.timer.take().is_some() {
            vtrace!("scrolling: timer cancelled");
        }
    }

    /// Cancels the pending timer and returns to `Idle`. Returns `true` if the state changed.
    pub fn reset(&mut self) -> bool {
        self.cancel();
        let changed = self.state != ScrollingState::Idle;
        self.state = ScrollingState::Idle;
        changed
    }
}

impl Default for ScrollingDebouncer {
    fn default() -> Self {
        Self::new(crate::options::DEFAULT_SCROLLING_DELAY_MS)
    }
}
