//! yt-dlp backed transcript and metadata providers.

use super::providers::{Transcript, TranscriptProvider, VideoDetails, VideoMetadataProvider};
use crate::error::{GistError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, instrument};

/// Runs the yt-dlp executable.
#[derive(Debug, Clone)]
pub struct YtDlp {
    program: String,
    timeout: Duration,
}

impl YtDlp {
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    async fn run(&self, args: &[&str]) -> Result<Output> {
        let child = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    GistError::ToolNotFound(self.program.clone())
                } else {
                    GistError::ToolFailed(format!("Failed to run {}: {}", self.program, e))
                }
            })?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| {
                GistError::ToolFailed(format!(
                    "{} timed out after {}s",
                    self.program,
                    self.timeout.as_secs()
                ))
            })??;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GistError::ToolFailed(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        Ok(output)
    }
}

#[async_trait]
impl VideoMetadataProvider for YtDlp {
    #[instrument(skip(self))]
    async fn fetch_details(&self, url: &str) -> Result<VideoDetails> {
        let output = self
            .run(&["--dump-json", "--no-download", "--no-warnings", "--no-playlist", url])
            .await?;

        let json: serde_json::Value = serde_json::from_slice(&output.stdout).map_err(|e| {
            GistError::VideoSource(format!("Failed to parse yt-dlp output: {}", e))
        })?;

        parse_details(&json)
    }
}

#[async_trait]
impl TranscriptProvider for YtDlp {
    #[instrument(skip(self))]
    async fn fetch_transcript(&self, url: &str, language: &str) -> Result<Transcript> {
        let tmpdir = tempfile::tempdir()?;
        let template = tmpdir.path().join("%(id)s.%(ext)s");
        let template = template.to_string_lossy().into_owned();

        // Manual subtitles win over automatic ones when both exist.
        let output = self
            .run(&[
                "--skip-download",
                "--write-subs",
                "--write-auto-subs",
                "--sub-langs",
                language,
                "--sub-format",
                "vtt",
                "--dump-json",
                "--no-simulate",
                "--no-warnings",
                "--no-playlist",
                "--output",
                template.as_str(),
                url,
            ])
            .await?;

        let vtt_path = find_subtitle_file(tmpdir.path()).ok_or_else(|| {
            GistError::VideoSource(format!("No '{}' captions available", language))
        })?;
        debug!("Reading captions from {:?}", vtt_path);

        let vtt = std::fs::read_to_string(&vtt_path)?;
        let text = vtt_to_text(&vtt);
        if text.is_empty() {
            return Err(GistError::VideoSource("Caption track is empty".to_string()));
        }

        // Title and author are optional here.
        let (title, author) = serde_json::from_slice::<serde_json::Value>(&output.stdout)
            .ok()
            .and_then(|json| parse_details(&json).ok())
            .map(|d| (Some(d.title), Some(d.author)))
            .unwrap_or((None, None));

        Ok(Transcript {
            text,
            title,
            author,
        })
    }
}

/// Pull title, channel and description out of yt-dlp's info JSON.
fn parse_details(json: &serde_json::Value) -> Result<VideoDetails> {
    let title = json["title"]
        .as_str()
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| GistError::VideoSource("yt-dlp returned no title".to_string()))?
        .to_string();

    let author = json["channel"]
        .as_str()
        .or_else(|| json["uploader"].as_str())
        .unwrap_or("Unknown")
        .to_string();

    let description = json["description"]
        .as_str()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string);

    Ok(VideoDetails {
        title,
        author,
        description,
    })
}

fn find_subtitle_file(dir: &Path) -> Option<PathBuf> {
    let mut candidates: Vec<PathBuf> = std::fs::read_dir(dir)
        .ok()?
        .flatten()
        .map(|entry| entry.path())
        .filter(|p| p.extension().and_then(|s| s.to_str()) == Some("vtt"))
        .collect();
    candidates.sort();
    candidates.into_iter().next()
}

/// Reduce a WebVTT caption file to plain text.
///
/// Drops the header, cue identifiers, timing lines and inline tags, and
/// collapses the repeated lines that rolling auto-captions produce.
pub fn vtt_to_text(vtt: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut in_note = false;
    let mut source = vtt.lines().map(str::trim).peekable();

    while let Some(line) = source.next() {
        if line.is_empty() {
            in_note = false;
            continue;
        }
        if in_note {
            continue;
        }
        if line.starts_with("WEBVTT") || line.starts_with("Kind:") || line.starts_with("Language:") {
            continue;
        }
        if line.starts_with("NOTE") || line.starts_with("STYLE") || line.starts_with("REGION") {
            in_note = true;
            continue;
        }
        if line.contains("-->") {
            continue;
        }
        // A numeric cue identifier sits directly above its timing line.
        let is_cue_id = line.chars().all(|c| c.is_ascii_digit())
            && source.peek().is_some_and(|next| next.contains("-->"));
        if is_cue_id {
            continue;
        }

        let cleaned = strip_tags(line);
        let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
        if cleaned.is_empty() {
            continue;
        }
        if lines.last() != Some(&cleaned) {
            lines.push(cleaned);
        }
    }

    lines.join(" ")
}

fn strip_tags(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut in_tag = false;
    for c in line.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vtt_to_text_drops_timings() {
        let vtt = "WEBVTT\nKind: captions\nLanguage: en\n\n1\n00:00:00.000 --> 00:00:01.000\nHello   world\n\n2\n00:00:01.000 --> 00:00:02.000\nSecond line\n";
        assert_eq!(vtt_to_text(vtt), "Hello world Second line");
    }

    #[test]
    fn test_vtt_to_text_collapses_rolling_captions() {
        let vtt = r#"WEBVTT

NOTE generated by the platform
spanning two lines

00:00:00.000 --> 00:00:02.000 align:start position:0%
never<00:00:00.500><c> gonna</c><00:00:01.000><c> give</c>

00:00:02.000 --> 00:00:02.010
never gonna give

00:00:02.010 --> 00:00:04.000
you up &amp; down
"#;
        assert_eq!(vtt_to_text(vtt), "never gonna give you up & down");
    }

    #[test]
    fn test_vtt_to_text_keeps_spoken_numbers() {
        let vtt = "WEBVTT\n\n7\n00:00:00.000 --> 00:00:01.000\nThe year was\n2024\n\n8\n00:00:01.000 --> 00:00:02.000\n42\n";
        assert_eq!(vtt_to_text(vtt), "The year was 2024 42");
    }

    #[test]
    fn test_vtt_to_text_decodes_escaped_entities_once() {
        let vtt = "WEBVTT\n\n00:00:00.000 --> 00:00:01.000\nuse &amp;lt;T&amp;gt; &lt;here&gt; R&amp;D\n";
        assert_eq!(vtt_to_text(vtt), "use &lt;T&gt; <here> R&D");
    }

    #[test]
    fn test_parse_details() {
        let json = serde_json::json!({
            "title": "Never Gonna Give You Up",
            "uploader": "Rick Astley",
            "description": "  The official video.  "
        });
        let details = parse_details(&json).unwrap();
        assert_eq!(details.title, "Never Gonna Give You Up");
        assert_eq!(details.author, "Rick Astley");
        assert_eq!(details.description.as_deref(), Some("The official video."));
    }

    #[test]
    fn test_parse_details_prefers_channel_and_drops_blank_description() {
        let json = serde_json::json!({
            "title": "T",
            "channel": "Channel",
            "uploader": "Uploader",
            "description": "   "
        });
        let details = parse_details(&json).unwrap();
        assert_eq!(details.author, "Channel");
        assert_eq!(details.description, None);

        assert!(parse_details(&serde_json::json!({})).is_err());
    }

    #[test]
    fn test_find_subtitle_file() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(find_subtitle_file(dir.path()), None);

        std::fs::write(dir.path().join("abc.info.json"), "{}").unwrap();
        std::fs::write(dir.path().join("abc.en.vtt"), "WEBVTT").unwrap();
        assert_eq!(find_subtitle_file(dir.path()), Some(dir.path().join("abc.en.vtt")));
    }

    #[tokio::test]
    async fn test_missing_tool_is_reported() {
        let ytdlp = YtDlp::new("gist-test-no-such-ytdlp", Duration::from_secs(5));
        let err = ytdlp
            .fetch_details("https://youtu.be/dQw4w9WgXcQ")
            .await
            .unwrap_err();
        assert!(matches!(err, GistError::ToolNotFound(_)));
    }
}
