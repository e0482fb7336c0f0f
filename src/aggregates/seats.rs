use crate::models::SeatAvailability;

/// Reported as "available" when a ceremony or course has no capacity limit.
pub const UNLIMITED_SEATS: i64 = 999;

/// `available = max(0, capacity - enrolled)`; unlimited capacity is never full.
pub fn seat_availability(capacity: Option<i32>, enrolled: u64) -> SeatAvailability {
    let enrolled = i64::try_from(enrolled).unwrap_or(i64::MAX);
    match capacity {
        Some(capacity) => {
            let available = (i64::from(capacity) - enrolled).max(0);
            SeatAvailability {
                capacity: Some(capacity),
                enrolled,
                available,
                is_full: available <= 0,
            }
        }
        None => SeatAvailability {
            capacity: None,
            enrolled,
            available: UNLIMITED_SEATS,
            is_full: false,
        },
    }
}

/// Only enrollments that are not cancelled hold a seat.
pub fn occupied_seats<I>(cancelled_flags: I) -> u64
where
    I: IntoIterator<Item = bool>,
{
    cancelled_flags.into_iter().filter(|cancelled| !cancelled).count() as u64
}

/// Next waitlist position: one past the highest stored position.
///
/// Positions are never re-sequenced, so removed entries leave gaps.
pub fn next_waitlist_position(current_max: Option<i32>) -> i32 {
    current_max.map_or(1, |max| max.saturating_add(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_limited_capacity() {
        let seats = seat_availability(Some(10), 7);
        assert_eq!(seats.available, 3);
        assert!(!seats.is_full);

        let full = seat_availability(Some(10), 10);
        assert_eq!(full.available, 0);
        assert!(full.is_full);
    }

    #[test]
    fn test_overbooked_is_clamped() {
        let seats = seat_availability(Some(5), 8);
        assert_eq!(seats.available, 0);
        assert!(seats.is_full);
    }

    #[test]
    fn test_unlimited_capacity() {
        let seats = seat_availability(None, 5_000);
        assert_eq!(seats.available, UNLIMITED_SEATS);
        assert!(!seats.is_full);
    }

    #[test]
    fn test_zero_capacity_is_full() {
        assert!(seat_availability(Some(0), 0).is_full);
    }

    #[test]
    fn test_cancelled_enrollments_free_seats() {
        assert_eq!(occupied_seats([false, true, false, true]), 2);
        assert_eq!(occupied_seats(Vec::<bool>::new()), 0);
    }

    #[test]
    fn test_waitlist_positions_keep_gaps() {
        assert_eq!(next_waitlist_position(None), 1);
        assert_eq!(next_waitlist_position(Some(1)), 2);
        // entry 2 of [1, 2, 3] removed: the next one still lands at 4
        assert_eq!(next_waitlist_position([1, 3].into_iter().max()), 4);
    }

    proptest! {
        #[test]
        fn prop_seat_clamping(capacity in 0i32..10_000, enrolled in 0u64..20_000) {
            let seats = seat_availability(Some(capacity), enrolled);
            prop_assert_eq!(seats.available, (i64::from(capacity) - enrolled as i64).max(0));
            prop_assert_eq!(seats.is_full, seats.available == 0);
        }

        #[test]
        fn prop_unlimited_never_full(enrolled in any::<u64>()) {
            prop_assert!(!seat_availability(None, enrolled).is_full);
        }
    }
}
