// Example: estimated heights replaced by measurements.
use windowed::{Engine, EngineOptions};

fn main() {
    let mut e = Engine::new(EngineOptions::dynamic(100, |_| 40).with_initial_viewport_height(300))
        .expect("dynamic options with an estimate are valid");

    println!(
        "before: total={} range={:?}",
        e.total_height(),
        e.window().range()
    );

    // A rendering layer reports what it actually laid out.
    let rendered: Vec<(usize, u32)> = e
        .window()
        .iter()
        .map(|it| (it.index, if it.index % 2 == 0 { 64 } else { 40 }))
        .collect();
    let changed = e.measure_many(rendered);
    println!(
        "measure_many: changed={changed} total={} range={:?}",
        e.total_height(),
        e.window().range()
    );

    // Reports that cannot be attributed to an item are rejected.
    if let Err(err) = e.on_item_rendered_attr("header", 32) {
        println!("rejected: {err}");
    }

    e.reset_measurements();
    println!("after reset: total={}", e.total_height());
}
