//! Catalog Queries
//!
//! Filtering and sorting over a collection snapshot for the manager list
//! views. A [`ContentQuery`] combines a free-text search, an optional
//! kind filter, optional scheduling-range bounds, and a conjunctive tag
//! filter; results can then be ordered by a chosen field.
//!
//! # Matching Rules
//!
//! - **Search** is a case-insensitive substring match over title, kind
//!   name, and tags.
//! - **Tags** match exactly and case-sensitively, and every requested tag
//!   must be present.
//! - **Range bounds** are independent: `scheduledFrom` keeps items whose
//!   window starts at or after it, `scheduledTo` keeps items whose window
//!   ends at or before it. Together they select items fully contained in
//!   the range.
//!
//! Sorting is stable: items with equal keys keep their collection order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::deserialize_opt_instant;
use crate::models::{ContentItem, ContentKind};

/// Field a query result can be ordered by
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SortKey {
    #[serde(rename = "title")]
    Title,
    #[serde(rename = "type")]
    Kind,
    #[serde(rename = "startDateTime")]
    Start,
    #[serde(rename = "endDateTime")]
    End,
}

/// Sort direction
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

/// Declarative filter and sort over the content collection
///
/// All fields are optional; an empty query returns the collection
/// unchanged, in collection order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentQuery {
    /// Case-insensitive substring matched against title, kind, and tags
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,

    /// Keep only items of this kind
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ContentKind>,

    /// Keep items whose window starts at or after this instant
    #[serde(
        deserialize_with = "deserialize_opt_instant",
        skip_serializing_if = "Option::is_none"
    )]
    pub scheduled_from: Option<DateTime<Utc>>,

    /// Keep items whose window ends at or before this instant
    #[serde(
        deserialize_with = "deserialize_opt_instant",
        skip_serializing_if = "Option::is_none"
    )]
    pub scheduled_to: Option<DateTime<Utc>>,

    /// Tags the item must all carry (exact, case-sensitive)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Field to order by; absent means collection order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortKey>,

    /// Direction applied to `sort`
    pub direction: SortDirection,
}

impl ContentQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the free-text search term (builder style)
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Restrict to a single content kind (builder style)
    pub fn with_kind(mut self, kind: ContentKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Restrict to windows contained in the given range (builder style)
    pub fn with_range(mut self, from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        self.scheduled_from = Some(from);
        self.scheduled_to = Some(to);
        self
    }

    /// Require all of the given tags (builder style)
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Order results by the given key and direction (builder style)
    pub fn with_sort(mut self, key: SortKey, direction: SortDirection) -> Self {
        self.sort = Some(key);
        self.direction = direction;
        self
    }

    /// Check a single item against every filter in the query
    pub fn matches(&self, item: &ContentItem) -> bool {
        if let Some(needle) = self.search.as_deref().filter(|s| !s.is_empty()) {
            let needle = needle.to_lowercase();
            let in_title = item.title.to_lowercase().contains(&needle);
            let in_kind = item.kind().as_str().contains(&needle);
            let in_tags = item
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&needle));
            if !(in_title || in_kind || in_tags) {
                return false;
            }
        }

        if let Some(kind) = self.kind {
            if item.kind() != kind {
                return false;
            }
        }

        if let Some(from) = self.scheduled_from {
            if item.start < from {
                return false;
            }
        }

        if let Some(to) = self.scheduled_to {
            if item.end > to {
                return false;
            }
        }

        // Conjunctive exact match, deliberately case-sensitive unlike search
        self.tags.iter().all(|tag| item.tags.contains(tag))
    }

    /// Filter and sort a collection snapshot.
    ///
    /// Filtering preserves collection order; sorting (when requested) is
    /// stable, so items with equal keys also keep their collection order.
    /// Date keys compare as instants, the rest lexicographically.
    pub fn apply(&self, items: &[ContentItem]) -> Vec<ContentItem> {
        let mut matched: Vec<ContentItem> = items
            .iter()
            .filter(|item| self.matches(item))
            .cloned()
            .collect();

        if let Some(key) = self.sort {
            matched.sort_by(|a, b| {
                let ordering = match key {
                    SortKey::Title => a.title.cmp(&b.title),
                    SortKey::Kind => a.kind().as_str().cmp(b.kind().as_str()),
                    SortKey::Start => a.start.cmp(&b.start),
                    SortKey::End => a.end.cmp(&b.end),
                };
                match self.direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            });
        }

        matched
    }

    /// True when no filter or sort is set and `apply` would be a no-op
    pub fn is_empty(&self) -> bool {
        self.search.is_none()
            && self.kind.is_none()
            && self.scheduled_from.is_none()
            && self.scheduled_to.is_none()
            && self.tags.is_empty()
            && self.sort.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Content;
    use chrono::{TimeZone, Utc};

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap()
    }

    fn collection() -> Vec<ContentItem> {
        vec![
            ContentItem::new("Winter poster", Content::Image("poster.png".into()), day(1), day(10))
                .with_tags(vec!["lobby".to_string(), "seasonal".to_string()]),
            ContentItem::new(
                "Cafeteria menu",
                Content::Webpage("https://example.com/menu".to_string()),
                day(5),
                day(15),
            )
            .with_tags(vec!["cafeteria".to_string()]),
            ContentItem::new(
                "Fire drill notice",
                Content::Text("Drill at noon".to_string()),
                day(2),
                day(3),
            )
            .with_tags(vec!["lobby".to_string(), "Safety".to_string()]),
            ContentItem::new(
                "Intro clip",
                Content::Video("https://youtu.be/dQw4w9WgXcQ".into()),
                day(1),
                day(20),
            ),
        ]
    }

    #[test]
    fn test_empty_query_returns_collection_order() {
        let items = collection();
        let result = ContentQuery::new().apply(&items);
        assert_eq!(result, items);
    }

    #[test]
    fn test_search_is_case_insensitive_over_title_kind_and_tags() {
        let items = collection();

        let by_title = ContentQuery::new().with_search("WINTER").apply(&items);
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].title, "Winter poster");

        let by_kind = ContentQuery::new().with_search("video").apply(&items);
        assert_eq!(by_kind.len(), 1);
        assert_eq!(by_kind[0].title, "Intro clip");

        let by_tag = ContentQuery::new().with_search("safety").apply(&items);
        assert_eq!(by_tag.len(), 1);
        assert_eq!(by_tag[0].title, "Fire drill notice");
    }

    #[test]
    fn test_empty_search_matches_everything() {
        let items = collection();
        let result = ContentQuery::new().with_search("").apply(&items);
        assert_eq!(result.len(), items.len());
    }

    #[test]
    fn test_kind_filter_is_exact() {
        let items = collection();
        let result = ContentQuery::new().with_kind(ContentKind::Image).apply(&items);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "Winter poster");
    }

    #[test]
    fn test_range_keeps_contained_windows_only() {
        let items = collection();
        let result = ContentQuery::new().with_range(day(1), day(12)).apply(&items);

        let titles: Vec<&str> = result.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Winter poster", "Fire drill notice"]);
    }

    #[test]
    fn test_range_bounds_apply_independently() {
        let items = collection();

        let from_only = ContentQuery {
            scheduled_from: Some(day(2)),
            ..Default::default()
        }
        .apply(&items);
        let titles: Vec<&str> = from_only.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Cafeteria menu", "Fire drill notice"]);
    }

    #[test]
    fn test_tag_filter_is_conjunctive_and_case_sensitive() {
        let items = collection();

        let both = ContentQuery::new()
            .with_tags(vec!["lobby".to_string(), "seasonal".to_string()])
            .apply(&items);
        assert_eq!(both.len(), 1);
        assert_eq!(both[0].title, "Winter poster");

        // "safety" does not match the stored "Safety" tag
        let wrong_case = ContentQuery::new()
            .with_tags(vec!["safety".to_string()])
            .apply(&items);
        assert!(wrong_case.is_empty());
    }

    #[test]
    fn test_sort_by_start_date_compares_instants() {
        let items = collection();
        let result = ContentQuery::new()
            .with_sort(SortKey::Start, SortDirection::Ascending)
            .apply(&items);

        let starts: Vec<DateTime<Utc>> = result.iter().map(|i| i.start).collect();
        let mut expected = starts.clone();
        expected.sort();
        assert_eq!(starts, expected);
    }

    #[test]
    fn test_sort_descending_reverses_order() {
        let items = collection();
        let result = ContentQuery::new()
            .with_sort(SortKey::Title, SortDirection::Descending)
            .apply(&items);

        let titles: Vec<&str> = result.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Winter poster", "Intro clip", "Fire drill notice", "Cafeteria menu"]
        );
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let items = vec![
            ContentItem::new("b-first", Content::Text("1".to_string()), day(1), day(2)),
            ContentItem::new("a", Content::Text("2".to_string()), day(1), day(2)),
            ContentItem::new("b-second", Content::Text("3".to_string()), day(1), day(2)),
        ];

        // Equal start instants keep their collection order
        let result = ContentQuery::new()
            .with_sort(SortKey::Start, SortDirection::Ascending)
            .apply(&items);
        let titles: Vec<&str> = result.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["b-first", "a", "b-second"]);
    }

    #[test]
    fn test_filters_combine_conjunctively() {
        let items = collection();
        let result = ContentQuery::new()
            .with_search("lobby")
            .with_kind(ContentKind::Text)
            .apply(&items);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "Fire drill notice");
    }

    #[test]
    fn test_query_wire_format() {
        let json = r#"{
            "search": "menu",
            "type": "webpage",
            "scheduledFrom": "2024-01-01T00:00",
            "scheduledTo": "2024-01-31T00:00:00Z",
            "tags": ["cafeteria"],
            "sort": "startDateTime",
            "direction": "desc"
        }"#;

        let query: ContentQuery = serde_json::from_str(json).unwrap();
        assert_eq!(query.search.as_deref(), Some("menu"));
        assert_eq!(query.kind, Some(ContentKind::Webpage));
        assert_eq!(query.scheduled_from, Some(day(1)));
        assert_eq!(query.scheduled_to, Some(day(31)));
        assert_eq!(query.sort, Some(SortKey::Start));
        assert_eq!(query.direction, SortDirection::Descending);
        assert!(!query.is_empty());

        let empty: ContentQuery = serde_json::from_str("{}").unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.direction, SortDirection::Ascending);
    }
}
