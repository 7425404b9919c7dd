// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Document ingestion: raw uploaded files in, normalized [`Document`]s out.
//!
//! Formats are a closed set, each with its own [`DocumentSource`]
//! implementation. Ingestion never mutates existing state — a failed parse
//! surfaces a descriptive error and leaves the workspace untouched.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::model::Document;

pub mod docx;
pub mod markdown;
pub mod text;

pub use docx::DocxSource;
pub use markdown::MarkdownSource;
pub use text::TextSource;

/// The closed set of ingestible formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Text,
    Markdown,
    Docx,
}

impl FileFormat {
    pub fn name(self) -> &'static str {
        match self {
            Self::Text => "plain text",
            Self::Markdown => "Markdown",
            Self::Docx => "DOCX",
        }
    }
}

/// One parser per format.
pub trait DocumentSource {
    fn parse(&self, bytes: &[u8], title: &str) -> Result<Document, IngestError>;
}

#[derive(Debug)]
pub enum IngestError {
    UnsupportedFormat { extension: String },
    /// PDF is recognized but this crate ships no PDF text extraction.
    UnsupportedPdf,
    Io(std::io::Error),
    Archive(String),
    EmptyDocument,
}

impl fmt::Display for IngestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedFormat { extension } => {
                write!(f, "unsupported file type '.{extension}' (supported: txt, md, docx)")
            }
            Self::UnsupportedPdf => {
                f.write_str("PDF text extraction is not supported; convert to txt, md or docx")
            }
            Self::Io(err) => write!(f, "could not read file: {err}"),
            Self::Archive(detail) => write!(f, "could not unpack document: {detail}"),
            Self::EmptyDocument => f.write_str("document contained no readable text"),
        }
    }
}

impl std::error::Error for IngestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for IngestError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

/// Maps a file extension (case-insensitive) onto a format.
pub fn detect_format(path: &Path) -> Result<FileFormat, IngestError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match extension.as_str() {
        "txt" => Ok(FileFormat::Text),
        "md" | "markdown" => Ok(FileFormat::Markdown),
        "docx" => Ok(FileFormat::Docx),
        "pdf" => Err(IngestError::UnsupportedPdf),
        _ => Err(IngestError::UnsupportedFormat { extension }),
    }
}

fn source_for(format: FileFormat) -> &'static dyn DocumentSource {
    match format {
        FileFormat::Text => &TextSource,
        FileFormat::Markdown => &MarkdownSource,
        FileFormat::Docx => &DocxSource,
    }
}

/// Parses already-loaded bytes as `format`.
pub fn parse_bytes(format: FileFormat, bytes: &[u8], title: &str) -> Result<Document, IngestError> {
    source_for(format).parse(bytes, title)
}

/// Reads and parses a file; the document title is the file stem.
pub fn parse_path(path: &Path) -> Result<Document, IngestError> {
    let format = detect_format(path)?;
    let bytes = fs::read(path)?;
    let title = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("Untitled");
    parse_bytes(format, &bytes, title)
}
