// Example: measurements follow keys after reorder.
use std::sync::{Arc, RwLock};

use windowed::{Engine, EngineOptions};

fn main() {
    let rows: Arc<RwLock<Vec<&'static str>>> =
        Arc::new(RwLock::new(vec!["alpha", "beta", "gamma", "delta"]));

    let keys = Arc::clone(&rows);
    let mut e = Engine::new(EngineOptions::dynamic_keyed(
        4,
        |_| 20,
        move |i| keys.read().map(|rows| rows[i]).unwrap_or_default(),
    ))
    .expect("keyed dynamic options are valid");

    e.on_item_rendered(0, 80).expect("index 0 is in range");
    println!(
        "before reorder: key0={} h0={:?} h3={:?}",
        e.key_for(0),
        e.resolve(0),
        e.resolve(3)
    );

    // Same keys, new positions.
    if let Ok(mut rows) = rows.write() {
        rows.reverse();
    }
    e.recompute();
    println!(
        "after reorder: key3={} h0={:?} h3={:?}",
        e.key_for(3),
        e.resolve(0),
        e.resolve(3)
    );
}
