use parking_lot::Mutex;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

// Sliding window limiter - remembers when each admitted request happened
pub struct RateLimiter {
    max_requests: usize,
    time_window: Duration,
    recent_requests: Mutex<VecDeque<Instant>>, // oldest first
}

impl RateLimiter {
    pub fn new(max_requests: usize, time_window: Duration) -> Self {
        Self {
            max_requests,
            time_window,
            recent_requests: Mutex::new(VecDeque::with_capacity(max_requests)),
        }
    }

    pub fn max_requests(&self) -> usize {
        self.max_requests
    }

    pub fn time_window(&self) -> Duration {
        self.time_window
    }

    // Admission check against the current clock
    pub fn can_make_request(&self) -> bool {
        self.check_at(Instant::now())
    }

    pub fn check_at(&self, now: Instant) -> bool {
        self.admit_at(now).is_ok()
    }

    // Like `can_make_request`, but a rejection says how long to wait
    pub fn admit(&self) -> Result<(), Duration> {
        self.admit_at(Instant::now())
    }

    /// Purge expired timestamps, then admit and record `now` if there is room.
    ///
    /// The whole purge-check-append sequence runs under one lock, so two
    /// callers can never both take the last free slot. On rejection the
    /// wait is computed under that same lock and is never below one second.
    pub fn admit_at(&self, now: Instant) -> Result<(), Duration> {
        let mut recent = self.recent_requests.lock();
        self.purge(&mut recent, now);

        // under limit..? admit
        if recent.len() < self.max_requests {
            recent.push_back(now);
            return Ok(());
        }

        // over limit, leave the window untouched
        let wait = match recent.front() {
            Some(oldest) => (*oldest + self.time_window).saturating_duration_since(now),
            None => self.time_window,
        };
        Err(wait.max(Duration::from_secs(1)))
    }

    // How long until the oldest admitted request leaves the window
    pub fn retry_after(&self) -> Duration {
        self.retry_after_at(Instant::now())
    }

    pub fn retry_after_at(&self, now: Instant) -> Duration {
        let mut recent = self.recent_requests.lock();
        self.purge(&mut recent, now);

        if recent.len() < self.max_requests {
            return Duration::ZERO;
        }
        match recent.front() {
            Some(oldest) => (*oldest + self.time_window).saturating_duration_since(now),
            None => Duration::ZERO,
        }
    }

    pub fn len(&self) -> usize {
        self.recent_requests.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Timestamps are pushed in order, so stop at the first one still inside the window
    fn purge(&self, recent: &mut VecDeque<Instant>, now: Instant) {
        let Some(cutoff) = now.checked_sub(self.time_window) else {
            return;
        };
        while let Some(front) = recent.front().copied() {
            if front < cutoff {
                recent.pop_front();
            } else {
                break;
            }
        }
    }
}

impl Default for RateLimiter {
    // one request per minute
    fn default() -> Self {
        Self::new(1, Duration::from_secs(60))
    }
}
