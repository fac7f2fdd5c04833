//! Time-gated policy checks for cancellation and check-in
//!
//! Both checks are pure functions over `(visit_time, now)` millisecond
//! timestamps so they can be evaluated inside a write transaction without
//! touching the clock twice.

/// Minimum notice before the visit for a guest-initiated cancellation.
pub const CANCEL_NOTICE_HOURS: i64 = 8;

/// Check-in closes this many minutes before the visit time.
pub const CHECK_IN_LEAD_MINUTES: i64 = 10;

const MILLIS_PER_HOUR: i64 = 60 * 60 * 1000;
const MILLIS_PER_MINUTE: i64 = 60 * 1000;

/// A reservation may be cancelled only while more than `CANCEL_NOTICE_HOURS`
/// remain before the visit. At exactly the notice boundary the window is
/// closed.
pub fn cancellation_window_open(visit_time: i64, now: i64) -> bool {
    visit_time > now + CANCEL_NOTICE_HOURS * MILLIS_PER_HOUR
}

/// Check-in is accepted up to `CHECK_IN_LEAD_MINUTES` before the visit.
/// At exactly the lead boundary check-in is rejected.
pub fn check_in_window_open(visit_time: i64, now: i64) -> bool {
    now < visit_time - CHECK_IN_LEAD_MINUTES * MILLIS_PER_MINUTE
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000_000;

    #[test]
    fn test_cancellation_open_with_nine_hours_notice() {
        let visit = NOW + 9 * MILLIS_PER_HOUR;
        assert!(cancellation_window_open(visit, NOW));
    }

    #[test]
    fn test_cancellation_closed_with_seven_hours_notice() {
        let visit = NOW + 7 * MILLIS_PER_HOUR;
        assert!(!cancellation_window_open(visit, NOW));
    }

    #[test]
    fn test_cancellation_closed_at_exact_boundary() {
        let visit = NOW + CANCEL_NOTICE_HOURS * MILLIS_PER_HOUR;
        assert!(!cancellation_window_open(visit, NOW));
    }

    #[test]
    fn test_cancellation_open_one_millisecond_past_boundary() {
        let visit = NOW + CANCEL_NOTICE_HOURS * MILLIS_PER_HOUR + 1;
        assert!(cancellation_window_open(visit, NOW));
    }

    #[test]
    fn test_cancellation_closed_for_past_visit() {
        let visit = NOW - MILLIS_PER_HOUR;
        assert!(!cancellation_window_open(visit, NOW));
    }

    #[test]
    fn test_check_in_open_eleven_minutes_before() {
        let visit = NOW + 11 * MILLIS_PER_MINUTE;
        assert!(check_in_window_open(visit, NOW));
    }

    #[test]
    fn test_check_in_closed_nine_minutes_before() {
        let visit = NOW + 9 * MILLIS_PER_MINUTE;
        assert!(!check_in_window_open(visit, NOW));
    }

    #[test]
    fn test_check_in_closed_at_exact_boundary() {
        let visit = NOW + CHECK_IN_LEAD_MINUTES * MILLIS_PER_MINUTE;
        assert!(!check_in_window_open(visit, NOW));
    }

    #[test]
    fn test_check_in_closed_after_visit_time() {
        let visit = NOW - MILLIS_PER_MINUTE;
        assert!(!check_in_window_open(visit, NOW));
    }
}
