use jiff::{SignedDuration, Timestamp};
use std::sync::{Arc, Mutex};

/// Source of the current UTC instant.
pub trait Clock: Send + Sync + 'static {
    /// Returns the current time of the clock
    fn now(&self) -> Timestamp;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same underlying instant, so a test can hand one clone to
/// the registry and keep another to advance time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    inner: Arc<Mutex<Timestamp>>,
}

impl ManualClock {
    pub fn new(now: Timestamp) -> Self {
        Self {
            inner: Arc::new(Mutex::new(now)),
        }
    }

    /// Moves the clock to `target`, even if that is in the past.
    pub fn set(&self, target: Timestamp) {
        *self.inner.lock().unwrap_or_else(|e| e.into_inner()) = target;
    }

    /// Moves the clock forward (or backward, for a negative duration).
    pub fn advance(&self, by: SignedDuration) {
        let mut now = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if let Ok(next) = now.checked_add(by) {
            *now = next;
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_works() {
        // test that the clock starts at the given time
        let base = Timestamp::from_second(0).unwrap();
        let clock = ManualClock::new(base);
        assert_eq!(clock.now(), base);

        // clones observe advances made through any handle
        let handle = clock.clone();
        handle.advance(SignedDuration::from_mins(2));
        assert_eq!(clock.now(), Timestamp::from_second(120).unwrap());

        let target = Timestamp::from_second(1000).unwrap();
        handle.set(target);
        assert_eq!(clock.now(), target);
    }
}
