//! Sliding-window rate limiter for outbound market data requests.
//!
//! Tracks the timestamps of recent requests and admits a new one only when
//! fewer than `max_requests` fall inside the trailing window. `acquire`
//! blocks (asynchronously) until a slot frees up, then records itself.
//!
//! The limiter is passed around as an explicit dependency; any component
//! issuing outbound quote calls must go through the same instance.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use log::{debug, warn};

/// Window length used by [`RateLimiter::per_minute`].
const MINUTE_WINDOW: Duration = Duration::from_secs(60);

/// Extra sleep after the oldest entry expires, so a retry lands past it.
const RETRY_SLACK: Duration = Duration::from_millis(100);

pub struct RateLimiter {
    max_requests: usize,
    window: Duration,
    timestamps: Mutex<VecDeque<Instant>>,
}

impl RateLimiter {
    /// Create a limiter admitting `max_requests` per sliding minute.
    pub fn per_minute(max_requests: usize) -> Self {
        Self::new(max_requests, MINUTE_WINDOW)
    }

    /// Create a limiter with an explicit window length.
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            // A zero budget would block every caller forever.
            max_requests: max_requests.max(1),
            window,
            timestamps: Mutex::new(VecDeque::new()),
        }
    }

    /// Lock the timestamp queue, recovering from poison if necessary.
    ///
    /// The worst case after recovery is slightly inaccurate limiting,
    /// which beats panicking in a caller.
    fn lock_timestamps(&self) -> MutexGuard<'_, VecDeque<Instant>> {
        self.timestamps.lock().unwrap_or_else(|poisoned| {
            warn!("Rate limiter mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Drop timestamps that have left the trailing window.
    fn prune(timestamps: &mut VecDeque<Instant>, now: Instant, window: Duration) {
        while let Some(front) = timestamps.front() {
            if now.duration_since(*front) > window {
                timestamps.pop_front();
            } else {
                break;
            }
        }
    }

    /// Acquire a request slot, waiting until one is available.
    pub async fn acquire(&self) {
        loop {
            let wait = {
                let mut timestamps = self.lock_timestamps();
                let now = Instant::now();
                Self::prune(&mut timestamps, now, self.window);

                if timestamps.len() < self.max_requests {
                    timestamps.push_back(now);
                    return;
                }

                // The queue is at capacity; the oldest entry bounds how
                // long the window stays full.
                match timestamps.front() {
                    Some(oldest) => {
                        self.window.saturating_sub(now.duration_since(*oldest)) + RETRY_SLACK
                    }
                    None => {
                        timestamps.push_back(now);
                        return;
                    }
                }
            };

            debug!("Rate limiter at capacity, waiting {:?}", wait);
            tokio::time::sleep(wait).await;
        }
    }

    /// Acquire a slot without waiting. Returns false when at capacity.
    pub fn try_acquire(&self) -> bool {
        let mut timestamps = self.lock_timestamps();
        let now = Instant::now();
        Self::prune(&mut timestamps, now, self.window);

        if timestamps.len() < self.max_requests {
            timestamps.push_back(now);
            true
        } else {
            false
        }
    }

    /// Number of request slots still free in the current window.
    pub fn remaining(&self) -> usize {
        let mut timestamps = self.lock_timestamps();
        Self::prune(&mut timestamps, Instant::now(), self.window);
        self.max_requests - timestamps.len()
    }
}
