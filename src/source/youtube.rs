//! YouTube URL recognition.

use regex::Regex;
use std::sync::LazyLock;

// Matches watch?v=, youtu.be/, /embed/, /v/, /e/ and nested-path URL shapes.
static VIDEO_ID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        (?:
            youtube\.com/
            (?:
                [^/\n\s]+/\S+/        # /user/name/<id> and similar
                | (?:v|e(?:mbed)?)/   # /v/<id>, /e/<id>, /embed/<id>
                | \S*?[?&]v=          # watch?v=<id>, any query carrying v=
            )
            | youtu\.be/
        )
        ([a-zA-Z0-9_-]{11})
    ",
    )
    .expect("Invalid regex")
});

/// Whether the URL belongs to YouTube at all.
pub fn is_video_url(url: &str) -> bool {
    url.contains("youtube.com") || url.contains("youtu.be")
}

/// Extract the 11-character video ID from a YouTube URL.
pub fn extract_video_id(url: &str) -> Option<String> {
    VIDEO_ID_REGEX
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Thumbnail image for a video.
pub fn thumbnail_url(video_id: &str) -> String {
    format!("https://img.youtube.com/vi/{}/maxresdefault.jpg", video_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_video_id() {
        let expected = Some("dQw4w9WgXcQ".to_string());

        assert_eq!(extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"), expected);
        assert_eq!(extract_video_id("https://youtu.be/dQw4w9WgXcQ"), expected);
        assert_eq!(extract_video_id("https://youtube.com/embed/dQw4w9WgXcQ"), expected);
        assert_eq!(extract_video_id("https://www.youtube.com/v/dQw4w9WgXcQ"), expected);
        assert_eq!(extract_video_id("https://www.youtube.com/e/dQw4w9WgXcQ"), expected);
        assert_eq!(extract_video_id("https://m.youtube.com/watch?v=dQw4w9WgXcQ&t=42s"), expected);
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?feature=share&v=dQw4w9WgXcQ"),
            expected
        );
        assert_eq!(extract_video_id("https://youtu.be/dQw4w9WgXcQ?si=abc123"), expected);
    }

    #[test]
    fn test_extract_video_id_rejects() {
        assert_eq!(extract_video_id("https://www.youtube.com/@somechannel"), None);
        assert_eq!(extract_video_id("https://www.youtube.com/watch?v=short"), None);
        assert_eq!(extract_video_id("https://www.youtube.com/"), None);
        assert_eq!(extract_video_id("dQw4w9WgXcQ"), None);
        assert_eq!(extract_video_id(""), None);
    }

    #[test]
    fn test_is_video_url() {
        assert!(is_video_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ"));
        assert!(is_video_url("https://youtu.be/dQw4w9WgXcQ"));
        assert!(is_video_url("https://www.youtube.com/playlist?list=PLtest"));
        assert!(!is_video_url("https://example.com/article"));
    }

    #[test]
    fn test_urls() {
        assert_eq!(
            thumbnail_url("dQw4w9WgXcQ"),
            "https://img.youtube.com/vi/dQw4w9WgXcQ/maxresdefault.jpg"
        );
    }
}
