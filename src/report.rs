//! Data model for the report document: an ordered sequence of content blocks.
//!
//! The document is plain data. Blocks carry positional identity only; there
//! are no stable per-block IDs, so renderers address them by index. Multiple
//! blocks may claim edit mode at the same time.

use serde::{Deserialize, Serialize};

/// Title given to a report that has not been named yet.
pub const UNTITLED: &str = "Untitled Report";

/// The full user-authored document, rendered in block order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub title: String,
    pub blocks: Vec<Block>,
}

impl Default for Report {
    fn default() -> Self {
        Self {
            title: UNTITLED.to_string(),
            blocks: Vec::new(),
        }
    }
}

impl Report {
    /// Returns a copy of this report with `block` appended.
    pub fn with_block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    /// Returns a copy of this report with a new title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

/// One unit of report content, either prose or a saved query.
///
/// Wire shape is adjacently tagged: `{ "category": "markdown" | "query",
/// "params": { ... } }`, with camelCase field names inside `params`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", content = "params", rename_all = "lowercase")]
pub enum Block {
    Markdown(MarkdownBlock),
    Query(QueryBlock),
}

/// A prose block holding markdown source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkdownBlock {
    pub title: String,
    pub content: String,
    pub is_editing: bool,
}

/// A saved query block; `query` is the free-form expression sent to the
/// export endpoint when the block is evaluated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryBlock {
    pub title: String,
    pub query: String,
    pub is_editing: bool,
}

impl Block {
    /// New markdown block, not in edit mode.
    pub fn markdown(title: impl Into<String>, content: impl Into<String>) -> Self {
        Block::Markdown(MarkdownBlock {
            title: title.into(),
            content: content.into(),
            is_editing: false,
        })
    }

    /// New query block, not in edit mode.
    pub fn query(title: impl Into<String>, query: impl Into<String>) -> Self {
        Block::Query(QueryBlock {
            title: title.into(),
            query: query.into(),
            is_editing: false,
        })
    }

    pub fn is_editing(&self) -> bool {
        match self {
            Block::Markdown(b) => b.is_editing,
            Block::Query(b) => b.is_editing,
        }
    }

    pub fn set_editing(&mut self, editing: bool) {
        match self {
            Block::Markdown(b) => b.is_editing = editing,
            Block::Query(b) => b.is_editing = editing,
        }
    }
}
