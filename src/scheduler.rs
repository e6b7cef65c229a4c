use crate::engine::RotationEngine;
use crate::kv::KeyValueStore;
use spdlog::info;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

/// Default rotation period for the large-ad pair.
pub const DEFAULT_ROTATION_INTERVAL: Duration = Duration::from_secs(10);

// Granularity of the cancellation check inside the wait loop.
const POLL_STEP: Duration = Duration::from_millis(10);

/// Timer-driven advancement of the large-ad pair.
///
/// The hosting page arms it once pool data is available and must call
/// [`RotationHandle::stop`] (or drop the handle) on teardown; a stopped
/// timer never fires again, so no write can land after unmount.
pub struct RotationScheduler {
    interval: Duration,
}

impl RotationScheduler {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Arms the timer. Returns `None` when the large pool has fewer than
    /// two ads, in which case there is nothing to rotate and no thread is
    /// spawned.
    pub fn start<K>(&self, engine: Arc<Mutex<RotationEngine<K>>>) -> Option<RotationHandle>
    where
        K: KeyValueStore + Send + 'static,
    {
        if engine.lock().unwrap().large_pool_len() < 2 {
            return None;
        }

        let interval = self.interval;
        let running = Arc::new(AtomicBool::new(true));
        let running_worker = running.clone();

        let handle = thread::spawn(move || {
            loop {
                let deadline = Instant::now() + interval;
                while Instant::now() < deadline {
                    if !running_worker.load(Ordering::Relaxed) {
                        return;
                    }
                    let remaining = deadline.saturating_duration_since(Instant::now());
                    thread::sleep(POLL_STEP.min(remaining));
                }
                if !running_worker.load(Ordering::Relaxed) {
                    return;
                }
                engine.lock().unwrap().tick();
            }
        });

        info!("rotation timer armed, interval {:?}", interval);
        Some(RotationHandle {
            running,
            handle: Some(handle),
        })
    }
}

impl Default for RotationScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_ROTATION_INTERVAL)
    }
}

/// Cancellation handle for an armed timer. Dropping it stops the timer and
/// joins the worker, so the next tick can never outlive the host.
pub struct RotationHandle {
    running: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl RotationHandle {
    pub fn stop(mut self) {
        self.halt();
    }

    fn halt(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            handle.join().unwrap();
        }
    }
}

impl Drop for RotationHandle {
    fn drop(&mut self) {
        self.halt();
    }
}
