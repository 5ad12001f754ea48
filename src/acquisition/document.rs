//! Extracted content handed to the summarizer.

use crate::error::{GistError, Result};
use serde::Serialize;
use std::collections::BTreeMap;

/// A body of text plus metadata about where it came from.
///
/// Built once by a single strategy or fetcher and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentDocument {
    page_content: String,
    metadata: BTreeMap<String, String>,
}

impl ContentDocument {
    pub fn new(page_content: impl Into<String>) -> Self {
        Self {
            page_content: page_content.into(),
            metadata: BTreeMap::new(),
        }
    }

    /// Attach a metadata entry while building the document.
    pub fn with_metadata(mut self, key: &str, value: impl Into<String>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }

    pub fn page_content(&self) -> &str {
        &self.page_content
    }

    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }

    /// Look up a single metadata value.
    pub fn meta(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    /// Whitespace-separated word count of the body.
    pub fn word_count(&self) -> usize {
        self.page_content.split_whitespace().count()
    }
}

/// A non-empty, ordered set of documents.
///
/// "No content" is always an error, never an empty success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Documents(Vec<ContentDocument>);

impl Documents {
    pub fn new(documents: Vec<ContentDocument>) -> Result<Self> {
        if documents.is_empty() {
            return Err(GistError::Acquisition(
                "No content could be loaded from the provided URL.".to_string(),
            ));
        }
        Ok(Self(documents))
    }

    pub fn single(document: ContentDocument) -> Self {
        Self(vec![document])
    }

    pub fn first(&self) -> &ContentDocument {
        &self.0[0]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ContentDocument> {
        self.0.iter()
    }

    /// Combined word count across all documents.
    pub fn word_count(&self) -> usize {
        self.0.iter().map(ContentDocument::word_count).sum()
    }

    /// All bodies joined into one text, separated by blank lines.
    pub fn combined_text(&self) -> String {
        self.0
            .iter()
            .map(ContentDocument::page_content)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl<'a> IntoIterator for &'a Documents {
    type Item = &'a ContentDocument;
    type IntoIter = std::slice::Iter<'a, ContentDocument>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
