//! Generic web page fetcher.
//!
//! Uses reqwest for the request and scraper to pull readable text out of the
//! HTML. No JavaScript rendering, so heavily client-side pages come back thin.

use super::providers::PageFetcher;
use super::ContentDocument;
use crate::config::WebSettings;
use crate::error::{GistError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::{debug, instrument};

/// Containers tried, in order, before falling back to `<body>`.
const MAIN_SELECTORS: [&str; 6] = [
    "main",
    "article",
    "[role='main']",
    "#content",
    ".post-content",
    ".entry-content",
];

/// Elements whose text is never readable content.
const SKIPPED_ELEMENTS: [&str; 10] = [
    "script", "style", "noscript", "template", "iframe", "svg", "nav", "header", "footer", "aside",
];

/// Fetches pages with browser-like headers.
pub struct WebPageFetcher {
    client: reqwest::Client,
    max_chars: usize,
}

impl WebPageFetcher {
    pub fn new(settings: &WebSettings) -> Result<Self> {
        let client = client_builder(settings).build()?;
        Ok(Self::with_client(client, settings.max_chars))
    }

    pub fn with_client(client: reqwest::Client, max_chars: usize) -> Self {
        Self { client, max_chars }
    }
}

#[async_trait]
impl PageFetcher for WebPageFetcher {
    #[instrument(skip(self))]
    async fn fetch_page(&self, url: &str) -> Result<Vec<ContentDocument>> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GistError::WebPage(format!("HTTP {} for {}", status, url)));
        }

        let html = response.text().await?;
        debug!("Fetched {} bytes", html.len());

        Ok(vec![parse_html(url, &html, self.max_chars)?])
    }
}

/// Client with browser-like headers, the configured timeout and a redirect limit.
fn client_builder(settings: &WebSettings) -> reqwest::ClientBuilder {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));

    reqwest::Client::builder()
        .timeout(Duration::from_secs(settings.timeout_secs))
        .user_agent(settings.user_agent.as_str())
        .default_headers(headers)
        .redirect(reqwest::redirect::Policy::limited(5))
}

/// Turn an HTML document into a content document.
pub fn parse_html(url: &str, html: &str, max_chars: usize) -> Result<ContentDocument> {
    let document = Html::parse_document(html);

    let root = main_content(&document)
        .ok_or_else(|| GistError::WebPage(format!("No readable content at {}", url)))?;

    let mut text = readable_text(root);
    if text.chars().count() > max_chars {
        text = text.chars().take(max_chars).collect();
    }
    if text.trim().is_empty() {
        return Err(GistError::WebPage(format!("No readable text found at {}", url)));
    }

    let mut doc = ContentDocument::new(text).with_metadata("source", url);
    if let Some(title) = select_text(&document, "title") {
        doc = doc.with_metadata("title", title);
    }
    if let Some(description) = select_attr(&document, "meta[name='description']", "content") {
        doc = doc.with_metadata("description", description);
    }
    if let Some(language) = select_attr(&document, "html", "lang") {
        doc = doc.with_metadata("language", language);
    }
    Ok(doc)
}

fn main_content(document: &Html) -> Option<ElementRef<'_>> {
    MAIN_SELECTORS
        .iter()
        .chain(std::iter::once(&"body"))
        .filter_map(|s| Selector::parse(s).ok())
        .find_map(|selector| document.select(&selector).next())
}

fn readable_text(root: ElementRef<'_>) -> String {
    let mut lines = Vec::new();

    for node in root.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let skipped = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| SKIPPED_ELEMENTS.contains(&el.name()))
        });
        if skipped {
            continue;
        }

        let line = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if !line.is_empty() {
            lines.push(line);
        }
    }

    lines.join("\n")
}

fn select_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
}

fn select_attr(document: &Html, selector: &str, attr: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acquisition::testing::direct_client;
    use mockito::Server;

    const PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <title> Rust Ownership Explained </title>
  <meta name="description" content="A short guide.">
  <style>body { color: red; }</style>
  <script>var tracking = "do not read";</script>
</head>
<body>
  <nav>Home | About | Contact</nav>
  <article>
    <h1>Ownership</h1>
    <p>Each value has   a single owner.</p>
    <script>console.log("skip me")</script>
    <p>Borrowing lends access without moving.</p>
  </article>
  <footer>Copyright</footer>
</body>
</html>"#;

    #[test]
    fn test_parse_html_extracts_article() {
        let doc = parse_html("https://example.com/article", PAGE, 10_000).unwrap();

        assert_eq!(
            doc.page_content(),
            "Ownership\nEach value has a single owner.\nBorrowing lends access without moving."
        );
        assert_eq!(doc.meta("title"), Some("Rust Ownership Explained"));
        assert_eq!(doc.meta("description"), Some("A short guide."));
        assert_eq!(doc.meta("language"), Some("en"));
        assert_eq!(doc.meta("source"), Some("https://example.com/article"));
    }

    #[test]
    fn test_parse_html_falls_back_to_body() {
        let html = "<html><body><nav>menu</nav><div>Plain body text</div><footer>x</footer></body></html>";
        let doc = parse_html("https://example.com", html, 10_000).unwrap();
        assert_eq!(doc.page_content(), "Plain body text");
        assert_eq!(doc.meta("title"), None);
    }

    #[test]
    fn test_parse_html_truncates() {
        let html = "<html><body><p>abcdefghij</p></body></html>";
        let doc = parse_html("https://example.com", html, 4).unwrap();
        assert_eq!(doc.page_content(), "abcd");
    }

    #[test]
    fn test_parse_html_without_text_fails() {
        let html = "<html><body><script>only()</script></body></html>";
        assert!(parse_html("https://example.com", html, 10_000).is_err());
    }

    #[tokio::test]
    async fn test_fetch_page_over_http() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/article")
            .with_status(200)
            .with_header("content-type", "text/html; charset=utf-8")
            .with_body(PAGE)
            .create_async()
            .await;

        let fetcher = WebPageFetcher::with_client(direct_client(), 10_000);
        let docs = fetcher
            .fetch_page(&format!("{}/article", server.url()))
            .await
            .unwrap();

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].word_count(), 12);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_page_sends_browser_headers() {
        let mut server = Server::new_async().await;
        let settings = WebSettings::default();
        let mock = server
            .mock("GET", "/")
            .match_header("user-agent", settings.user_agent.as_str())
            .match_header("accept-language", "en-US,en;q=0.5")
            .with_status(200)
            .with_body("<p>hello there</p>")
            .create_async()
            .await;

        let client = client_builder(&settings).no_proxy().build().unwrap();
        let fetcher = WebPageFetcher::with_client(client, settings.max_chars);
        let docs = fetcher.fetch_page(&format!("{}/", server.url())).await.unwrap();

        assert_eq!(docs[0].page_content(), "hello there");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_page_error_status() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/missing")
            .with_status(404)
            .with_body("<p>missing</p>")
            .create_async()
            .await;

        let fetcher = WebPageFetcher::with_client(direct_client(), 10_000);
        let err = fetcher
            .fetch_page(&format!("{}/missing", server.url()))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("404"));
        mock.assert_async().await;
    }
}
