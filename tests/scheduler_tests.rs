use rota_ads::{
    Ad, AdPools, MemoryKv, PageConfig, RotationEngine, RotationScheduler, SlotKey,
};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

const TOP_RIGHT: SlotKey = SlotKey("topRight");
const BOTTOM_RIGHT: SlotKey = SlotKey("bottomRight");
const LARGE_ONE: SlotKey = SlotKey("largeOne");
const LARGE_TWO: SlotKey = SlotKey("largeTwo");

fn engine_with_large(n: u64) -> Arc<Mutex<RotationEngine<MemoryKv>>> {
    let mut engine = RotationEngine::new(
        MemoryKv::new(),
        PageConfig {
            namespace: "events",
            small_slots: [TOP_RIGHT, BOTTOM_RIGHT],
            large_slots: [LARGE_ONE, LARGE_TWO],
        },
    );
    engine.initialize(AdPools {
        small: vec![],
        large: (0..n)
            .map(|id| Ad {
                id,
                banner_url: format!("https://cdn.example/{}.png", id),
                title: format!("ad {}", id),
                description: None,
                destination_url: None,
            })
            .collect(),
    });
    Arc::new(Mutex::new(engine))
}

#[test]
fn test_no_timer_below_two_ads() {
    let scheduler = RotationScheduler::new(Duration::from_millis(5));
    assert!(scheduler.start(engine_with_large(0)).is_none());
    assert!(scheduler.start(engine_with_large(1)).is_none());
}

#[test]
fn test_timer_rotates_the_pair() {
    // Pool large enough that the pair cannot wrap back to (0, 1) within
    // the test window, whatever the tick count.
    let engine = engine_with_large(1000);
    let scheduler = RotationScheduler::new(Duration::from_millis(20));
    let handle = scheduler.start(engine.clone()).unwrap();

    thread::sleep(Duration::from_millis(120));
    handle.stop();

    let guard = engine.lock().unwrap();
    let assignment = guard.assignment();
    let a = assignment[&LARGE_ONE];
    let b = assignment[&LARGE_TWO];
    assert_ne!((a, b), (0, 1), "timer never fired");
    assert_eq!(b, a + 1);
    assert!(a < 1000 && b < 1000);
}

#[test]
fn test_stop_prevents_further_ticks() {
    let engine = engine_with_large(4);
    let scheduler = RotationScheduler::new(Duration::from_millis(10));
    let handle = scheduler.start(engine.clone()).unwrap();

    thread::sleep(Duration::from_millis(55));
    handle.stop();

    let settled = engine.lock().unwrap().assignment();
    thread::sleep(Duration::from_millis(60));
    assert_eq!(engine.lock().unwrap().assignment(), settled);
}

#[test]
fn test_drop_cancels_like_stop() {
    let engine = engine_with_large(2);
    let scheduler = RotationScheduler::new(Duration::from_millis(10));
    {
        let _handle = scheduler.start(engine.clone()).unwrap();
        thread::sleep(Duration::from_millis(35));
    }

    let settled = engine.lock().unwrap().assignment();
    thread::sleep(Duration::from_millis(50));
    assert_eq!(engine.lock().unwrap().assignment(), settled);
}
