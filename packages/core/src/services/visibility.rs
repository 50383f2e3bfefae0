//! Visibility Evaluation
//!
//! Pure functions that decide which content items are visible at a given
//! instant. An item is active iff its scheduling window contains the
//! reference instant, inclusive on both ends.
//!
//! Evaluation never performs I/O and never mutates its inputs, so the
//! playback loop and the HTTP layer can both call it freely against the
//! same snapshot. Items with unparsable timestamps never reach this
//! function: the store drops them at load time, which keeps the "never
//! visible" rule for malformed windows.

use chrono::{DateTime, Utc};

use crate::models::ContentItem;

/// Compute the subset of items whose scheduling window contains `now`.
///
/// The result preserves the relative order of the input, so collection
/// order decided by the admin carries through to playback order.
///
/// # Examples
///
/// ```
/// # use chrono::{TimeZone, Utc};
/// # use vitrine_core::models::{Content, ContentItem};
/// # use vitrine_core::services::visibility::active_items;
/// let item = ContentItem::new(
///     "Welcome",
///     Content::Text("Hello".to_string()),
///     Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
///     Utc.with_ymd_and_hms(2024, 1, 1, 1, 0, 0).unwrap(),
/// );
///
/// let during = Utc.with_ymd_and_hms(2024, 1, 1, 0, 30, 0).unwrap();
/// let after = Utc.with_ymd_and_hms(2024, 1, 1, 2, 0, 0).unwrap();
///
/// assert_eq!(active_items(&[item.clone()], during), vec![item]);
/// assert!(active_items(&[], after).is_empty());
/// ```
pub fn active_items(items: &[ContentItem], now: DateTime<Utc>) -> Vec<ContentItem> {
    items
        .iter()
        .filter(|item| item.is_active_at(now))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Content;
    use chrono::{Duration, TimeZone, Utc};

    fn item_with_window(title: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> ContentItem {
        ContentItem::new(title, Content::Text(title.to_string()), start, end)
    }

    #[test]
    fn test_window_boundaries_are_inclusive() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 1, 1, 0, 0).unwrap();
        let items = vec![item_with_window("A", start, end)];

        assert_eq!(active_items(&items, start).len(), 1);
        assert_eq!(active_items(&items, end).len(), 1);

        // One nanosecond outside either boundary excludes the item
        assert!(active_items(&items, start - Duration::nanoseconds(1)).is_empty());
        assert!(active_items(&items, end + Duration::nanoseconds(1)).is_empty());
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        assert!(active_items(&[], now).is_empty());
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap();
        let items = vec![
            item_with_window("A", start, end),
            item_with_window("B", start + Duration::days(5), end + Duration::days(5)),
        ];
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();

        let first = active_items(&items, now);
        let second = active_items(&items, now);

        assert_eq!(first, second);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].title, "A");
    }

    #[test]
    fn test_result_preserves_input_order() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        let items = vec![
            item_with_window("third", start, end),
            item_with_window("first", start, end),
            item_with_window("second", start, end),
        ];
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();

        let active = active_items(&items, now);
        let titles: Vec<&str> = active.iter().map(|i| i.title.as_str()).collect();

        // Input order survives, no sorting by title or window
        assert_eq!(titles, vec!["third", "first", "second"]);
    }

    #[test]
    fn test_mixed_windows_filtered_against_reference_instant() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        let items = vec![
            item_with_window("past", now - Duration::days(2), now - Duration::days(1)),
            item_with_window("current", now - Duration::hours(1), now + Duration::hours(1)),
            item_with_window("future", now + Duration::days(1), now + Duration::days(2)),
            item_with_window("inverted", now + Duration::hours(1), now - Duration::hours(1)),
        ];

        let active = active_items(&items, now);

        assert_eq!(active.len(), 1);
        assert_eq!(active[0].title, "current");
    }

    #[test]
    fn test_one_hour_window_scenario() {
        let items = vec![item_with_window(
            "A",
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 1, 1, 0, 0).unwrap(),
        )];

        let half_past = Utc.with_ymd_and_hms(2024, 1, 1, 0, 30, 0).unwrap();
        let active = active_items(&items, half_past);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].title, "A");

        let two_oclock = Utc.with_ymd_and_hms(2024, 1, 1, 2, 0, 0).unwrap();
        assert!(active_items(&items, two_oclock).is_empty());
    }
}
