//! Content Item Data Structures
//!
//! This module defines the core `ContentItem` struct and related types for
//! Vitrine's scheduled signage content.
//!
//! # Architecture
//!
//! - **Tagged payload**: The `Content` enum carries the variant-specific
//!   payload, so consumers pattern-match exhaustively instead of branching
//!   on a type string.
//! - **Wire compatibility**: Items serialize with flat `type` and `content`
//!   keys and camelCase window fields, the layout the persisted collection
//!   has always used.
//!
//! # Examples
//!
//! ```rust
//! use vitrine_core::models::{Content, ContentItem};
//! use chrono::{TimeZone, Utc};
//!
//! let item = ContentItem::new(
//!     "Lobby welcome",
//!     Content::Text("Welcome to the office".to_string()),
//!     Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap(),
//!     Utc.with_ymd_and_hms(2024, 1, 1, 18, 0, 0).unwrap(),
//! )
//! .with_tags(vec!["lobby".to_string()]);
//!
//! assert!(item.is_active_at(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()));
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::media;

/// Validation errors for content item operations
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Scheduling window is inverted: start {start} is after end {end}")]
    InvalidWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

/// The closed set of content variants an item can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Image,
    Webpage,
    Text,
    Video,
}

impl ContentKind {
    /// Wire name of the variant ("image", "webpage", "text", "video")
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Image => "image",
            ContentKind::Webpage => "webpage",
            ContentKind::Text => "text",
            ContentKind::Video => "video",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to image or video media: either an inline `data:` URI from an
/// upload or a plain remote URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaSource(String);

impl MediaSource {
    pub fn new(source: impl Into<String>) -> Self {
        Self(source.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the source is inline-encoded (`data:` scheme)
    pub fn is_data_uri(&self) -> bool {
        media::is_data_uri(&self.0)
    }

    /// Approximate decoded byte size of the media payload.
    ///
    /// For base64 data URIs this estimates the decoded length; for plain
    /// URLs it is just the string length.
    pub fn payload_len(&self) -> usize {
        media::data_uri_payload_len(&self.0)
    }
}

impl From<String> for MediaSource {
    fn from(source: String) -> Self {
        Self(source)
    }
}

impl From<&str> for MediaSource {
    fn from(source: &str) -> Self {
        Self(source.to_string())
    }
}

impl fmt::Display for MediaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Variant-specific payload of a content item.
///
/// Serializes adjacently tagged (`type` + `content` keys) so that, flattened
/// into [`ContentItem`], the JSON matches the persisted collection layout:
/// `{"type": "image", "content": "data:image/png;base64,..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "lowercase")]
pub enum Content {
    /// Uploaded image (data URI) or hosted image URL
    Image(MediaSource),
    /// URL of a page to embed
    Webpage(String),
    /// Raw text to render
    Text(String),
    /// Uploaded video (data URI), hosted video URL, or YouTube link
    Video(MediaSource),
}

impl Content {
    /// The variant tag without the payload
    pub fn kind(&self) -> ContentKind {
        match self {
            Content::Image(_) => ContentKind::Image,
            Content::Webpage(_) => ContentKind::Webpage,
            Content::Text(_) => ContentKind::Text,
            Content::Video(_) => ContentKind::Video,
        }
    }

    /// Uniform view of the payload string, whichever variant carries it
    pub fn payload(&self) -> &str {
        match self {
            Content::Image(source) => source.as_str(),
            Content::Webpage(url) => url,
            Content::Text(body) => body,
            Content::Video(source) => source.as_str(),
        }
    }

    /// Assemble a variant from its tag and payload string
    pub fn from_parts(kind: ContentKind, payload: String) -> Self {
        match kind {
            ContentKind::Image => Content::Image(MediaSource::new(payload)),
            ContentKind::Webpage => Content::Webpage(payload),
            ContentKind::Text => Content::Text(payload),
            ContentKind::Video => Content::Video(MediaSource::new(payload)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.payload().is_empty()
    }
}

/// A scheduled piece of signage content.
///
/// # Fields
///
/// - `id`: Unique identifier (UUID), assigned at creation, immutable
/// - `title`: Display label, non-empty for a valid item
/// - `content`: Tagged variant payload (image/webpage/text/video)
/// - `start`, `end`: Absolute visibility window, inclusive on both ends
/// - `tags`: Free-text labels; insertion order preserved for display
///
/// Collection order is display order for list views; it carries no meaning
/// for visibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    /// Unique identifier (UUID)
    pub id: String,

    /// Display label
    pub title: String,

    /// Variant payload, flattened to `type` + `content` keys on the wire
    #[serde(flatten)]
    pub content: Content,

    /// Start of the visibility window (inclusive)
    #[serde(rename = "startDateTime", with = "window_instant")]
    pub start: DateTime<Utc>,

    /// End of the visibility window (inclusive)
    #[serde(rename = "endDateTime", with = "window_instant")]
    pub end: DateTime<Utc>,

    /// Free-text labels, matched exactly by the tag filter
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ContentItem {
    /// Create a new ContentItem with an auto-generated UUID
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use vitrine_core::models::{Content, ContentItem};
    /// # use chrono::{TimeZone, Utc};
    /// let item = ContentItem::new(
    ///     "Cafeteria menu",
    ///     Content::Webpage("https://example.com/menu".to_string()),
    ///     Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    ///     Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 59).unwrap(),
    /// );
    /// assert!(!item.id.is_empty());
    /// ```
    pub fn new(
        title: impl Into<String>,
        content: Content,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            content,
            start,
            end,
            tags: Vec::new(),
        }
    }

    /// Replace the auto-generated id (builder style)
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Attach tags (builder style)
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// The variant tag of this item's content
    pub fn kind(&self) -> ContentKind {
        self.content.kind()
    }

    /// True when `now` falls inside the visibility window, both ends
    /// inclusive.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.start <= now && now <= self.end
    }

    /// Check the item invariants: non-empty title, non-empty payload, and
    /// an ordered window (`start <= end`).
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.is_empty() {
            return Err(ValidationError::MissingField("title".to_string()));
        }
        if self.content.is_empty() {
            return Err(ValidationError::MissingField("content".to_string()));
        }
        if self.start > self.end {
            return Err(ValidationError::InvalidWindow {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }
}

/// Create-side input: every field optional at the wire level, checked by
/// [`ContentDraft::into_item`] on submit.
///
/// Field names mirror the stored item (`type`, `content`, `startDateTime`,
/// `endDateTime`) so a manager form can round-trip its state unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentDraft {
    pub title: Option<String>,

    #[serde(rename = "type")]
    pub kind: Option<ContentKind>,

    pub content: Option<String>,

    #[serde(
        rename = "startDateTime",
        deserialize_with = "deserialize_opt_instant",
        skip_serializing_if = "Option::is_none"
    )]
    pub start: Option<DateTime<Utc>>,

    #[serde(
        rename = "endDateTime",
        deserialize_with = "deserialize_opt_instant",
        skip_serializing_if = "Option::is_none"
    )]
    pub end: Option<DateTime<Utc>>,

    pub tags: Vec<String>,
}

impl ContentDraft {
    /// Validate the draft and build the item, assigning a fresh UUID.
    ///
    /// Required fields are checked in wire order (title, type, content,
    /// startDateTime, endDateTime); an empty title or payload counts as
    /// missing. The window must satisfy `start <= end`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] naming the first absent
    /// field, or [`ValidationError::InvalidWindow`] for an inverted window.
    pub fn into_item(self) -> Result<ContentItem, ValidationError> {
        let title = self
            .title
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ValidationError::MissingField("title".to_string()))?;
        let kind = self
            .kind
            .ok_or_else(|| ValidationError::MissingField("type".to_string()))?;
        let payload = self
            .content
            .filter(|c| !c.is_empty())
            .ok_or_else(|| ValidationError::MissingField("content".to_string()))?;
        let start = self
            .start
            .ok_or_else(|| ValidationError::MissingField("startDateTime".to_string()))?;
        let end = self
            .end
            .ok_or_else(|| ValidationError::MissingField("endDateTime".to_string()))?;
        if start > end {
            return Err(ValidationError::InvalidWindow { start, end });
        }

        Ok(ContentItem::new(title, Content::from_parts(kind, payload), start, end)
            .with_tags(self.tags))
    }
}

/// Update-side input: absent fields leave the stored value untouched.
///
/// `kind` and `content` may be patched independently; patching only the
/// kind reinterprets the existing payload under the new variant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ContentKind>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(
        rename = "startDateTime",
        deserialize_with = "deserialize_opt_instant",
        skip_serializing_if = "Option::is_none"
    )]
    pub start: Option<DateTime<Utc>>,

    #[serde(
        rename = "endDateTime",
        deserialize_with = "deserialize_opt_instant",
        skip_serializing_if = "Option::is_none"
    )]
    pub end: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl ContentPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a new title (builder style)
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replace the content variant and payload (builder style)
    pub fn with_content(mut self, kind: ContentKind, payload: impl Into<String>) -> Self {
        self.kind = Some(kind);
        self.content = Some(payload.into());
        self
    }

    /// Replace the visibility window (builder style)
    pub fn with_window(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    /// Replace the tag list (builder style)
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    /// Apply the patch in place and re-check the item invariants.
    ///
    /// The item is only observed mutated when the patched result is valid;
    /// callers pass a clone and commit it on success.
    ///
    /// # Errors
    ///
    /// Returns the same [`ValidationError`] taxonomy as item creation: a
    /// patch may not empty the title or payload, nor invert the window.
    pub fn apply_to(&self, item: &mut ContentItem) -> Result<(), ValidationError> {
        if let Some(title) = &self.title {
            item.title = title.clone();
        }
        match (self.kind, &self.content) {
            (Some(kind), Some(payload)) => {
                item.content = Content::from_parts(kind, payload.clone());
            }
            (Some(kind), None) => {
                item.content = Content::from_parts(kind, item.content.payload().to_string());
            }
            (None, Some(payload)) => {
                item.content = Content::from_parts(item.kind(), payload.clone());
            }
            (None, None) => {}
        }
        if let Some(start) = self.start {
            item.start = start;
        }
        if let Some(end) = self.end {
            item.end = end;
        }
        if let Some(tags) = &self.tags {
            item.tags = tags.clone();
        }
        item.validate()
    }
}

/// Serde adapter for window instants.
///
/// Serializes as RFC 3339 with a `Z` suffix and second precision (the
/// precision the manager form produces); deserializes leniently via
/// [`crate::models::time::parse_instant`] so collections written with naive
/// `datetime-local` strings keep loading.
mod window_instant {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    use crate::models::time::parse_instant;

    pub fn serialize<S>(instant: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&instant.to_rfc3339_opts(SecondsFormat::Secs, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_instant(&raw)
            .ok_or_else(|| de::Error::custom(format!("unrecognized timestamp format: {raw}")))
    }
}

pub(crate) fn deserialize_opt_instant<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(s) => crate::models::time::parse_instant(&s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("unrecognized timestamp format: {s}"))),
    }
}
