//! Media Source Helpers
//!
//! Inspection helpers for the strings a [`crate::models::MediaSource`] can
//! carry: inline base64 data URIs produced by uploads, and YouTube watch
//! links that viewers render as embeds.

use std::sync::OnceLock;

use regex::Regex;

// Matches both YouTube URL shapes and captures the video id:
// - youtube.com/watch?v=<id> (v= may follow other query parameters)
// - youtu.be/<id>
const YOUTUBE_ID_PATTERN: &str =
    r"(?:youtube\.com/watch\?(?:[^#\s&]+&)*v=|youtu\.be/)([A-Za-z0-9_-]+)";

/// True when the string is an inline-encoded payload (`data:` scheme)
pub fn is_data_uri(source: &str) -> bool {
    source.starts_with("data:")
}

/// Approximate decoded byte length of a media source.
///
/// For `data:*;base64,` URIs this derives the decoded size from the encoded
/// length and padding without allocating; for anything else (plain URLs,
/// non-base64 data URIs) it falls back to the string length.
pub fn data_uri_payload_len(source: &str) -> usize {
    match source.find(";base64,") {
        Some(idx) if is_data_uri(source) => {
            let encoded = &source[idx + ";base64,".len()..];
            let padding = encoded.bytes().rev().take_while(|&b| b == b'=').count();
            base64::decoded_len_estimate(encoded.len()).saturating_sub(padding)
        }
        _ => source.len(),
    }
}

/// True when the URL points at YouTube (either host form)
pub fn is_youtube_url(url: &str) -> bool {
    url.contains("youtube.com") || url.contains("youtu.be")
}

/// Extract the video id from a YouTube watch or short link.
///
/// # Examples
///
/// ```rust
/// use vitrine_core::media::youtube_video_id;
///
/// assert_eq!(
///     youtube_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42"),
///     Some("dQw4w9WgXcQ")
/// );
/// assert_eq!(youtube_video_id("https://vimeo.com/12345"), None);
/// ```
pub fn youtube_video_id(url: &str) -> Option<&str> {
    static YOUTUBE_ID_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = YOUTUBE_ID_REGEX.get_or_init(|| Regex::new(YOUTUBE_ID_PATTERN).unwrap());

    regex
        .captures(url)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str())
}

/// Preview thumbnail URL for a YouTube video id
pub fn youtube_thumbnail_url(video_id: &str) -> String {
    format!("https://img.youtube.com/vi/{video_id}/hqdefault.jpg")
}

/// Autoplaying muted embed URL for a YouTube video id, the form signage
/// displays load in an iframe
pub fn youtube_embed_url(video_id: &str) -> String {
    format!("https://www.youtube.com/embed/{video_id}?autoplay=1&mute=1")
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::STANDARD, Engine as _};

    #[test]
    fn test_is_data_uri() {
        assert!(is_data_uri("data:image/png;base64,AAAA"));
        assert!(is_data_uri("data:text/plain,hello"));
        assert!(!is_data_uri("https://example.com/a.png"));
    }

    #[test]
    fn test_payload_len_matches_decoded_size() {
        let payloads: [&[u8]; 5] = [b"h", b"he", b"hel", b"hell", b"hello"];
        for payload in payloads {
            let encoded = STANDARD.encode(payload);
            let uri = format!("data:application/octet-stream;base64,{encoded}");
            assert_eq!(data_uri_payload_len(&uri), payload.len(), "payload {payload:?}");
        }
    }

    #[test]
    fn test_payload_len_falls_back_to_string_length() {
        assert_eq!(data_uri_payload_len("https://example.com/a.png"), 25);
        assert_eq!(data_uri_payload_len("data:text/plain,hi"), 18);
    }

    #[test]
    fn test_youtube_detection() {
        assert!(is_youtube_url("https://www.youtube.com/watch?v=abc"));
        assert!(is_youtube_url("https://youtu.be/abc"));
        assert!(!is_youtube_url("https://example.com/video.mp4"));
    }

    #[test]
    fn test_youtube_video_id_watch_link() {
        assert_eq!(
            youtube_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ")
        );
        // v= after other parameters, trailing parameters ignored
        assert_eq!(
            youtube_video_id("https://www.youtube.com/watch?list=PL1&v=dQw4w9WgXcQ&t=42"),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn test_youtube_video_id_short_link() {
        assert_eq!(
            youtube_video_id("https://youtu.be/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn test_youtube_video_id_rejects_other_hosts() {
        assert_eq!(youtube_video_id("https://vimeo.com/12345"), None);
        assert_eq!(youtube_video_id("not a url"), None);
    }

    #[test]
    fn test_youtube_urls() {
        assert_eq!(
            youtube_thumbnail_url("dQw4w9WgXcQ"),
            "https://img.youtube.com/vi/dQw4w9WgXcQ/hqdefault.jpg"
        );
        assert_eq!(
            youtube_embed_url("dQw4w9WgXcQ"),
            "https://www.youtube.com/embed/dQw4w9WgXcQ?autoplay=1&mute=1"
        );
    }
}
