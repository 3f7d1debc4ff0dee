use windowed::EngineOptions;
use windowed_adapter::{Controller, ManualViewport};

fn main() {
    // Example: a controller fed by a headless viewport, no UI objects involved.
    //
    // An adapter would:
    // - implement ScrollSource/SizeSource over its toolkit's scroll container
    // - attach once the container exists
    // - call tick(now_ms) in a frame loop / timer
    // - render `window()` inside a spacer of `total_height()`
    let viewport = ManualViewport::new(320);
    let mut c = Controller::new(EngineOptions::dynamic(10_000, |_| 32))
        .expect("dynamic options with an estimate are valid");
    c.attach(&viewport, &viewport);
    println!("attached: range={:?}", c.window().range());

    let mut now_ms = 0u64;
    for step in 1..=10u64 {
        now_ms += 16;
        viewport.scroll_to(step * 500);
        c.tick(now_ms);
        let rendered: Vec<usize> = c.window().iter().map(|it| it.index).collect();
        for index in rendered {
            let _ = c.on_item_rendered(index, 32 + (index % 3) as u32 * 8);
        }
    }
    println!(
        "scrolled: off={} range={:?} scrolling={}",
        c.scroll_offset(),
        c.window().range(),
        c.is_scrolling()
    );

    viewport.resize(640);
    while c.is_scrolling() {
        now_ms += 16;
        c.tick(now_ms);
    }
    println!(
        "settled at t={now_ms}: height={} range={:?} total={}",
        c.viewport_height(),
        c.window().range(),
        c.total_height()
    );

    c.detach();
    println!("listeners after detach: {}", viewport.scroll_listener_count());
}
