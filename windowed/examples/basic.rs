// Example: fixed-height window and the scrolling signal.
use windowed::{Engine, EngineOptions};

fn main() {
    let mut e = Engine::new(
        EngineOptions::fixed(1_000_000, 24)
            .with_initial_viewport_height(480)
            .with_on_change(Some(|e: &Engine, scrolling: bool| {
                println!(
                    "  on_change: range={:?} scrolling={scrolling}",
                    e.window().range()
                );
            })),
    )
    .expect("fixed options are always valid");

    println!("total_height={}", e.total_height());
    println!("initial range={:?}", e.window().range());

    e.on_scroll(123_456, 0);
    let first = e.window().items.first();
    println!("after on_scroll: first={first:?}");

    // Nothing happens until the quiet period has elapsed.
    e.tick(50);
    e.tick(100);
    println!("is_scrolling={}", e.is_scrolling());

    let last = e.clamp_scroll_offset(u64::MAX);
    e.set_scroll_offset(last);
    println!("bottom: offset={last} range={:?}", e.window().range());
}
