//! Doctor command: report what a summarize run will have to work with.

use crate::cli::Output;
use crate::config::Settings;
use console::style;
use std::path::{Path, PathBuf};
use std::process::Command;

/// How much a finding matters for `gist summarize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    /// Ready.
    Pass,
    /// Summaries still work, with less content.
    Degraded,
    /// Summaries cannot run.
    Blocking,
}

/// One line of the doctor report.
#[derive(Debug)]
struct Finding {
    area: &'static str,
    level: Level,
    detail: String,
    fix: Option<&'static str>,
}

impl Finding {
    fn new(area: &'static str, level: Level, detail: impl Into<String>) -> Self {
        Self {
            area,
            level,
            detail: detail.into(),
            fix: None,
        }
    }

    fn with_fix(mut self, fix: &'static str) -> Self {
        self.fix = Some(fix);
        self
    }

    fn render(&self) -> String {
        let marker = match self.level {
            Level::Pass => style("ok  ").green(),
            Level::Degraded => style("warn").yellow(),
            Level::Blocking => style("fail").red(),
        };
        let mut line = format!("  [{}] {:<14} {}", marker, self.area, self.detail);
        if let Some(fix) = self.fix {
            line.push_str(&format!("\n         {}", style(fix).dim()));
        }
        line
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(settings: &Settings, config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config_path = config_path.unwrap_or_else(Settings::default_config_path);

    let findings = vec![
        check_ytdlp(&settings.youtube.ytdlp_path),
        check_api_key(settings.api_key()),
        Finding::new(
            "model",
            Level::Pass,
            format!("{} at {}", settings.llm.model, settings.llm.api_base),
        ),
        Finding::new(
            "video chain",
            Level::Pass,
            format!(
                "captions ({}) -> details -> oEmbed -> video id, {}s per step",
                settings.youtube.caption_language, settings.youtube.strategy_timeout_secs
            ),
        ),
        check_config_file(&config_path),
    ];

    Output::header("Gist Doctor");
    for finding in &findings {
        println!("{}", finding.render());
    }
    println!();

    match verdict(&findings) {
        Level::Blocking => {
            Output::error("gist summarize cannot run until the failures above are fixed.");
            std::process::exit(1);
        }
        Level::Degraded => Output::warning("gist summarize will run, but some videos may only get a minimal summary."),
        Level::Pass => Output::success("gist summarize is ready."),
    }

    Ok(())
}

/// The worst level among the findings.
fn verdict(findings: &[Finding]) -> Level {
    if findings.iter().any(|f| f.level == Level::Blocking) {
        Level::Blocking
    } else if findings.iter().any(|f| f.level == Level::Degraded) {
        Level::Degraded
    } else {
        Level::Pass
    }
}

/// yt-dlp feeds the first two video strategies; without it the chain starts at oEmbed.
fn check_ytdlp(program: &str) -> Finding {
    let fix = if cfg!(target_os = "macos") {
        "brew install yt-dlp"
    } else {
        "pip install yt-dlp, or see https://github.com/yt-dlp/yt-dlp"
    };

    match Command::new(program).arg("--version").output() {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout);
            Finding::new("yt-dlp", Level::Pass, version.lines().next().unwrap_or("installed").trim())
        }
        Ok(output) => Finding::new(
            "yt-dlp",
            Level::Degraded,
            format!("{} exited with {}", program, output.status),
        )
        .with_fix(fix),
        Err(_) => Finding::new(
            "yt-dlp",
            Level::Degraded,
            format!("{} not runnable; captions and video details are skipped", program),
        )
        .with_fix(fix),
    }
}

/// A Groq API key from --api-key, the config file, or GROQ_API_KEY.
fn check_api_key(key: Option<String>) -> Finding {
    match key {
        Some(key) if key.starts_with("gsk_") => {
            Finding::new("api key", Level::Pass, format!("found ({})", mask(&key)))
        }
        Some(key) => Finding::new(
            "api key",
            Level::Degraded,
            format!("found ({}) but Groq keys start with gsk_", mask(&key)),
        ),
        None => Finding::new("api key", Level::Blocking, "missing")
            .with_fix("export GROQ_API_KEY=gsk_... or pass --api-key"),
    }
}

/// Keep the first and last four characters.
fn mask(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

fn check_config_file(path: &Path) -> Finding {
    if path.exists() {
        Finding::new("config", Level::Pass, path.display().to_string())
    } else {
        Finding::new(
            "config",
            Level::Pass,
            format!("{} not present, built-in defaults apply", path.display()),
        )
        .with_fix("gist config init")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_levels() {
        assert_eq!(check_api_key(None).level, Level::Blocking);
        assert_eq!(check_api_key(Some("gsk_abcdefghijklmnop".to_string())).level, Level::Pass);
        assert_eq!(check_api_key(Some("sk-abcdefghijklmnop".to_string())).level, Level::Degraded);
    }

    #[test]
    fn test_mask_hides_middle() {
        assert_eq!(mask("gsk_abcdefghijklmnop"), "gsk_...mnop");
        assert_eq!(mask("short"), "*****");
    }

    #[test]
    fn test_missing_ytdlp_only_degrades() {
        let finding = check_ytdlp("gist-test-no-such-tool");
        assert_eq!(finding.level, Level::Degraded);
        assert!(finding.fix.is_some());
    }

    #[test]
    fn test_verdict_takes_worst_level() {
        let pass = || Finding::new("a", Level::Pass, "");
        assert_eq!(verdict(&[pass(), pass()]), Level::Pass);
        assert_eq!(
            verdict(&[pass(), Finding::new("b", Level::Degraded, ""), pass()]),
            Level::Degraded
        );
        assert_eq!(
            verdict(&[Finding::new("c", Level::Blocking, ""), Finding::new("b", Level::Degraded, "")]),
            Level::Blocking
        );
    }

    #[test]
    fn test_missing_config_is_not_a_problem() {
        let dir = tempfile::tempdir().unwrap();
        let finding = check_config_file(&dir.path().join("config.toml"));
        assert_eq!(finding.level, Level::Pass);
        assert_eq!(finding.fix, Some("gist config init"));
        assert!(finding.render().contains("defaults"));
    }
}
