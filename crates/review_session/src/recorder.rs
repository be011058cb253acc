use std::sync::{Arc, Mutex, MutexGuard};

use review_api::{FrameRouter, ListenerId, TurnAccumulator};

/// Frame subscriber that accumulates one assistant turn.
///
/// Attach it to the router driving a stream, then read the snapshot once the
/// stream reaches a terminal state. The shared accumulator is behind a mutex
/// because the listener runs inside the transport's dispatch cycle.
#[derive(Debug, Clone, Default)]
pub struct TurnRecorder {
    shared: Arc<Mutex<TurnAccumulator>>,
}

impl TurnRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to every frame on the router.
    pub fn attach(&self, router: &mut FrameRouter) -> ListenerId {
        let shared = Arc::clone(&self.shared);
        router.on_any(move |frame| {
            lock_unpoisoned(&shared).observe(frame);
        })
    }

    /// Current accumulated turn.
    #[must_use]
    pub fn snapshot(&self) -> TurnAccumulator {
        lock_unpoisoned(&self.shared).clone()
    }
}

fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
