//! Time Provider Abstraction
//!
//! Provides a trait-based abstraction for time operations so the visibility
//! evaluator and playback loop can be tested at fixed instants without
//! thread sleeps, plus the lenient timestamp parsing used for stored
//! collections.
//!
//! # Examples
//!
//! ```rust
//! use vitrine_core::models::time::{SystemTimeProvider, TimeProvider};
//! use chrono::Utc;
//!
//! let provider = SystemTimeProvider;
//! let now = provider.now();
//! assert!(now <= Utc::now());
//! ```

use chrono::{DateTime, NaiveDateTime, Utc};

/// Trait for providing current time
///
/// This abstraction enables:
/// - Deterministic testing (use `MockTimeProvider`)
/// - Time-based testing without thread sleeps
/// - Easier testing of time-dependent logic
pub trait TimeProvider: Send + Sync {
    /// Get the current UTC time
    fn now(&self) -> DateTime<Utc>;
}

/// System time provider using the actual system clock
///
/// This is the default implementation for production use.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Parse a stored window timestamp, accepting every format the collection
/// has historically contained.
///
/// Tried in order:
/// 1. RFC 3339 (`2024-01-01T00:00:00Z`, with or without offset)
/// 2. Naive with seconds (`2024-01-01T00:00:00`), read as UTC
/// 3. Naive `datetime-local` form (`2024-01-01T00:00`), read as UTC
///
/// Returns `None` for anything else; callers treat that as "never visible"
/// rather than an error.
pub fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M") {
        return Some(naive.and_utc());
    }

    None
}

/// Mock time provider for testing
///
/// Allows setting a specific time for deterministic tests.
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct MockTimeProvider {
    current_time: DateTime<Utc>,
}

#[cfg(test)]
impl MockTimeProvider {
    /// Create a new mock time provider starting at the current time
    pub fn new() -> Self {
        Self {
            current_time: Utc::now(),
        }
    }

    /// Create a mock time provider with a specific starting time
    pub fn with_time(time: DateTime<Utc>) -> Self {
        Self { current_time: time }
    }

    /// Set the current time to a specific value
    pub fn set_time(&mut self, time: DateTime<Utc>) {
        self.current_time = time;
    }

    /// Advance time by the given duration
    pub fn advance(&mut self, duration: chrono::Duration) {
        self.current_time += duration;
    }
}

#[cfg(test)]
impl TimeProvider for MockTimeProvider {
    fn now(&self) -> DateTime<Utc> {
        self.current_time
    }
}

#[cfg(test)]
impl Default for MockTimeProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_system_time_provider() {
        let provider = SystemTimeProvider;
        let now1 = provider.now();
        let now2 = Utc::now();

        // Should be very close (within 1 second)
        assert!((now2 - now1).num_milliseconds().abs() < 1000);
    }

    #[test]
    fn test_mock_time_provider_set_and_advance() {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut provider = MockTimeProvider::with_time(base);
        assert_eq!(provider.now(), base);

        provider.advance(Duration::minutes(30));
        assert_eq!(provider.now(), base + Duration::minutes(30));

        provider.set_time(base);
        assert_eq!(provider.now(), base);
    }

    #[test]
    fn test_parse_instant_rfc3339() {
        let parsed = parse_instant("2024-01-01T12:30:00Z").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 1, 1, 12, 30, 0).unwrap());

        // Offset forms normalize to UTC
        let offset = parse_instant("2024-01-01T13:30:00+01:00").unwrap();
        assert_eq!(offset, parsed);
    }

    #[test]
    fn test_parse_instant_naive_forms() {
        let with_seconds = parse_instant("2024-01-01T12:30:45").unwrap();
        assert_eq!(
            with_seconds,
            Utc.with_ymd_and_hms(2024, 1, 1, 12, 30, 45).unwrap()
        );

        let datetime_local = parse_instant("2024-01-01T12:30").unwrap();
        assert_eq!(
            datetime_local,
            Utc.with_ymd_and_hms(2024, 1, 1, 12, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_instant_fails_closed() {
        assert!(parse_instant("").is_none());
        assert!(parse_instant("yesterday").is_none());
        assert!(parse_instant("2024-13-45T99:99").is_none());
        assert!(parse_instant("2024-01-01").is_none());
    }
}
