/*
[INPUT]:  Wall-clock time
[OUTPUT]: Request timestamps and unique, monotonically increasing nonces
[POS]:    Auth layer - freshness values for signed requests
[UPDATE]: When the exchange changes its timestamp format or nonce rules
*/

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, SecondsFormat, Utc};

/// Source of the current time, replaceable in tests
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Real wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a single instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Render a timestamp the way the exchange expects (`2020-01-23T12:26:11.564Z`)
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Issues nonces that never repeat for the lifetime of the generator.
///
/// Each nonce is `max(previous + 1, now_ms)`, so values track wall-clock
/// milliseconds while staying strictly increasing across threads.
pub struct NonceGenerator {
    last: AtomicU64,
}

impl NonceGenerator {
    pub fn new() -> Self {
        Self {
            last: AtomicU64::new(0),
        }
    }

    /// Reserve the next nonce given the current time in milliseconds
    pub fn next(&self, now_ms: u64) -> u64 {
        loop {
            let current = self.last.load(Ordering::Acquire);
            let next = current.saturating_add(1).max(now_ms);

            match self
                .last
                .compare_exchange_weak(current, next, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => return next,
                Err(_) => continue,
            }
        }
    }

    /// Last nonce handed out, zero if none
    pub fn last(&self) -> u64 {
        self.last.load(Ordering::Acquire)
    }
}

impl Default for NonceGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for NonceGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NonceGenerator")
            .field("last", &self.last())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    use super::*;

    const BASE_TIME: u64 = 1_700_000_000_000;

    #[test]
    fn test_first_nonce_tracks_clock() {
        let nonces = NonceGenerator::new();
        assert_eq!(nonces.next(BASE_TIME), BASE_TIME);
    }

    #[test]
    fn test_monotonic_when_clock_stalls() {
        let nonces = NonceGenerator::new();
        let mut prev = 0;
        for _ in 0..1000 {
            let nonce = nonces.next(BASE_TIME);
            assert!(nonce > prev, "nonce must be strictly increasing");
            prev = nonce;
        }
        assert_eq!(prev, BASE_TIME + 999);
    }

    #[test]
    fn test_monotonic_when_clock_goes_backwards() {
        let nonces = NonceGenerator::new();
        let first = nonces.next(BASE_TIME + 5_000);
        let second = nonces.next(BASE_TIME);
        assert_eq!(second, first + 1);
    }

    #[test]
    fn test_jumps_forward_with_clock() {
        let nonces = NonceGenerator::new();
        nonces.next(BASE_TIME);
        assert_eq!(nonces.next(BASE_TIME + 60_000), BASE_TIME + 60_000);
    }

    #[test]
    fn test_concurrent_no_duplicates() {
        let nonces = Arc::new(NonceGenerator::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let nonces = Arc::clone(&nonces);
                thread::spawn(move || (0..1000).map(|_| nonces.next(BASE_TIME)).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for nonce in handle.join().unwrap() {
                assert!(seen.insert(nonce), "duplicate nonce {nonce}");
            }
        }
        assert_eq!(seen.len(), 8000);
    }

    #[test]
    fn test_format_timestamp_millis_utc() {
        let at = DateTime::from_timestamp_millis(1_579_782_371_564).unwrap();
        assert_eq!(format_timestamp(at), "2020-01-23T12:26:11.564Z");
    }
}
