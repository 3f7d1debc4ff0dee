use crate::*;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use windowed::{EngineOptions, MeasureOutcome, ReportError};

fn fixed_controller() -> Controller {
    Controller::new(EngineOptions::fixed(1000, 40)).unwrap()
}

fn range(c: &Controller) -> Option<(usize, usize)> {
    c.window().range().map(|r| (r.start_index, r.end_index))
}

#[test]
fn attach_pulls_current_values() {
    let vp = ManualViewport::new(600);
    vp.scroll_to(4000);

    let mut c = fixed_controller();
    assert_eq!(c.engine().viewport_height(), 0);
    c.attach(&vp, &vp);

    assert!(c.is_attached());
    assert_eq!(c.scroll_offset(), 4000);
    assert_eq!(c.viewport_height(), 600);
    assert_eq!(range(&c), Some((97, 117)));
    // The initial read is not a scroll signal.
    assert!(!c.is_scrolling());
    assert_eq!(vp.scroll_listener_count(), 1);
    assert_eq!(vp.resize_listener_count(), 1);
}

#[test]
fn signals_apply_in_delivery_order() {
    let seen: Arc<Mutex<Vec<(u64, u32)>>> = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&seen);
    let opts = EngineOptions::fixed(1000, 40).with_on_change(Some(
        move |e: &windowed::Engine, _scrolling: bool| {
            log.lock().unwrap().push((e.scroll_offset(), e.viewport_height()));
        },
    ));
    let mut c = Controller::new(opts).unwrap();
    let vp = ManualViewport::new(600);
    c.attach(&vp, &vp);
    seen.lock().unwrap().clear();
    let passes = c.engine().passes();

    vp.scroll_to(400);
    vp.resize(200);
    vp.scroll_to(800);
    // Nothing is applied until the controller pumps.
    assert_eq!(c.engine().scroll_offset(), 0);

    assert_eq!(c.pump(0), 3);
    assert_eq!(c.engine().passes(), passes + 3);
    assert_eq!(
        *seen.lock().unwrap(),
        [(400, 600), (400, 200), (800, 200)]
    );
    assert_eq!(c.scroll_offset(), 800);
    assert_eq!(c.viewport_height(), 200);
    assert!(c.is_scrolling());
}

#[test]
fn scrolling_settles_after_quiet_period() {
    let vp = ManualViewport::new(600);
    let mut c = fixed_controller();
    c.attach(&vp, &vp);

    vp.scroll_to(100);
    assert!(!c.tick(0));
    assert!(c.is_scrolling());

    vp.scroll_to(200);
    assert!(!c.tick(60));
    // The second signal restarted the timer.
    assert!(!c.tick(100));
    assert!(c.is_scrolling());
    assert!(c.tick(160));
    assert!(!c.is_scrolling());
}

#[test]
fn reattach_releases_previous_subscriptions() {
    let a = ManualViewport::new(100);
    let b = ManualViewport::new(300);
    let mut c = fixed_controller();

    c.attach(&a, &a);
    assert_eq!(a.scroll_listener_count(), 1);

    c.attach(&b, &b);
    assert_eq!(a.scroll_listener_count(), 0);
    assert_eq!(a.resize_listener_count(), 0);
    assert_eq!(b.scroll_listener_count(), 1);
    assert_eq!(b.resize_listener_count(), 1);
    assert_eq!(c.viewport_height(), 300);

    a.scroll_to(50);
    assert_eq!(c.pump(0), 0);
    assert_eq!(c.scroll_offset(), 0);
}

#[test]
fn detach_unsubscribes_and_drops_queued_signals() {
    let vp = ManualViewport::new(600);
    let mut c = fixed_controller();
    c.attach(&vp, &vp);

    vp.scroll_to(10);
    c.pump(0);
    assert_eq!(c.engine().debouncer().pending_deadline_ms(), Some(100));

    // Queued but never applied.
    vp.scroll_to(30);

    assert!(c.detach());
    assert!(!c.is_attached());
    assert_eq!(vp.scroll_listener_count(), 0);
    assert_eq!(vp.resize_listener_count(), 0);
    // The quiet period still ends the scroll after detaching.
    assert_eq!(c.engine().debouncer().pending_deadline_ms(), Some(100));
    assert!(c.tick(1_000));
    assert!(!c.is_scrolling());

    vp.scroll_to(20);
    assert_eq!(c.pump(0), 0);
    assert_eq!(c.engine().scroll_offset(), 10);
    assert!(!c.detach());
}

#[test]
fn reattach_mid_scroll_still_settles_to_idle() {
    let a = ManualViewport::new(600);
    let b = ManualViewport::new(400);
    let mut c = fixed_controller();
    c.attach(&a, &a);

    a.scroll_to(800);
    assert!(!c.tick(0));
    assert!(c.is_scrolling());

    c.attach(&b, &b);
    assert!(c.is_scrolling());
    assert!(!c.tick(99));
    assert!(c.tick(100));
    assert!(!c.is_scrolling());
    assert_eq!(c.engine().debouncer().pending_deadline_ms(), None);
}

#[test]
fn dropping_controller_unsubscribes() {
    let vp = ManualViewport::new(600);
    {
        let mut c = fixed_controller();
        c.attach(&vp, &vp);
        assert_eq!(vp.scroll_listener_count(), 1);
    }
    assert_eq!(vp.scroll_listener_count(), 0);
    assert_eq!(vp.resize_listener_count(), 0);
}

#[test]
fn sources_may_emit_from_other_threads() {
    let vp = ManualViewport::new(600);
    let mut c = fixed_controller();
    c.attach(&vp, &vp);

    let remote = vp.clone();
    std::thread::spawn(move || {
        for offset in 1..=5u64 {
            remote.scroll_to(offset * 40);
        }
    })
    .join()
    .unwrap();

    assert_eq!(c.pump(0), 5);
    assert_eq!(c.engine().scroll_offset(), 200);
    assert_eq!(c.window().start_index(), Some(2));
}

#[test]
fn measurement_feedback_through_controller() {
    let vp = ManualViewport::new(100);
    let mut c = Controller::new(EngineOptions::dynamic(100, |_| 20)).unwrap();
    c.attach(&vp, &vp);
    assert_eq!(c.total_height(), 2000);

    assert_eq!(c.on_item_rendered(0, 50), Ok(MeasureOutcome::Recorded));
    assert_eq!(c.total_height(), 2030);
    assert_eq!(
        c.on_item_rendered_attr("x", 1),
        Err(ReportError::InvalidIndex { raw: "x".into() })
    );
    assert_eq!(c.total_height(), 2030);
}

#[test]
fn subscription_releases_exactly_once() {
    let released = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&released);
    let sub = Subscription::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    sub.release();
    assert_eq!(released.load(Ordering::SeqCst), 1);

    let counter = Arc::clone(&released);
    drop(Subscription::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    }));
    assert_eq!(released.load(Ordering::SeqCst), 2);

    drop(Subscription::noop());
    assert_eq!(released.load(Ordering::SeqCst), 2);
}

#[test]
fn trackers_follow_observed_values() {
    let vp = ManualViewport::new(480);
    vp.scroll_to(75);
    let (tx, rx) = mpsc::channel();

    let mut scroll = ScrollTracker::new();
    let mut size = SizeTracker::new();
    assert_eq!(scroll.attach(&vp, ScrollSink::new(tx.clone())), 75);
    assert_eq!(size.attach(&vp, SizeSink::new(tx)), 480);

    vp.scroll_to(90);
    assert_eq!(rx.try_recv(), Ok(ViewportSignal::Scroll(90)));
    // Trackers only change when a delivered signal is observed.
    assert_eq!(scroll.scroll_offset(), 75);
    scroll.observe(90);
    assert_eq!(scroll.scroll_offset(), 90);

    assert!(scroll.detach());
    assert!(!scroll.detach());
    assert_eq!(vp.scroll_listener_count(), 0);
    assert_eq!(vp.resize_listener_count(), 1);
    size.detach();
    assert_eq!(vp.resize_listener_count(), 0);
}
