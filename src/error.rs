//! Error types for document loading and rendering

use std::path::PathBuf;

/// Errors surfaced by the page cache
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    /// The engine could not parse or read the document
    #[error("the rendering engine could not read '{}'", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: mupdf::error::Error,
    },

    #[error("PDF engine: {0}")]
    Pdf(#[from] mupdf::error::Error),

    #[error("no document is open")]
    NotOpen,

    #[error("page {page} out of range for a document with {page_count} pages")]
    PageOutOfRange { page: usize, page_count: usize },

    #[error("{detail}")]
    Generic { detail: String },
}

impl ViewError {
    pub fn generic(msg: impl Into<String>) -> Self {
        Self::Generic { detail: msg.into() }
    }
}
