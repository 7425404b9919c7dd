// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::OnceLock;

use memchr::memchr_iter;
use regex::Regex;

use crate::model::{Document, Section, SectionId};

use super::{DocumentSource, IngestError};

/// Heading heuristic bound: candidate headings stay under this many chars.
const HEADING_MAX_CHARS: usize = 80;

pub struct TextSource;

impl DocumentSource for TextSource {
    fn parse(&self, bytes: &[u8], title: &str) -> Result<Document, IngestError> {
        let raw = String::from_utf8_lossy(bytes);
        let lines: Vec<String> =
            trimmed_lines(&raw).into_iter().map(str::to_owned).collect();
        let sections = sections_from_lines(lines, "Content");
        if sections.is_empty() {
            return Err(IngestError::EmptyDocument);
        }
        Ok(Document::new(title, sections))
    }
}

/// Splits on newlines, trims each line and drops blanks. `\r` is trimmed
/// with the rest of the whitespace, so CRLF input needs no special case.
pub(crate) fn trimmed_lines(raw: &str) -> Vec<&str> {
    let bytes = raw.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0usize;
    for newline in memchr_iter(b'\n', bytes) {
        push_trimmed(&mut lines, &raw[start..newline]);
        start = newline + 1;
    }
    push_trimmed(&mut lines, &raw[start..]);
    lines
}

fn push_trimmed<'a>(lines: &mut Vec<&'a str>, line: &'a str) {
    let trimmed = line.trim();
    if !trimmed.is_empty() {
        lines.push(trimmed);
    }
}

/// Builds sections from content lines with the heading heuristic: a short
/// line without trailing sentence punctuation, after the first line and with
/// content already accumulated, starts a new section. This is deliberately
/// format-dependent and replaceable; it is not a core contract.
pub(crate) fn sections_from_lines(lines: Vec<String>, fallback_heading: &str) -> Vec<Section> {
    let mut builder = SectionBuilder::new(fallback_heading);
    for line in lines {
        builder.push_line(line);
    }
    builder.finish()
}

pub(crate) struct SectionBuilder {
    fallback_heading: String,
    sections: Vec<Section>,
    current: Option<(String, Vec<String>)>,
    seen_any_line: bool,
}

impl SectionBuilder {
    pub(crate) fn new(fallback_heading: &str) -> Self {
        Self {
            fallback_heading: fallback_heading.to_owned(),
            sections: Vec::new(),
            current: None,
            seen_any_line: false,
        }
    }

    pub(crate) fn push_line(&mut self, line: String) {
        let looks_like_heading = self.seen_any_line
            && self.current.as_ref().is_some_and(|(_, paragraphs)| !paragraphs.is_empty())
            && line.chars().count() < HEADING_MAX_CHARS
            && !ends_with_sentence_punctuation(&line);
        self.seen_any_line = true;

        if looks_like_heading {
            self.start_section(line);
        } else if let Some((_, paragraphs)) = self.current.as_mut() {
            paragraphs.push(line);
        } else {
            self.current = Some((self.fallback_heading.clone(), vec![line]));
        }
    }

    /// Starts a section explicitly, bypassing the heuristic (used by formats
    /// with real headings).
    pub(crate) fn start_section(&mut self, heading: String) {
        self.flush_current();
        self.current = Some((heading, Vec::new()));
        self.seen_any_line = true;
    }

    pub(crate) fn push_paragraph(&mut self, paragraph: String) {
        if paragraph.is_empty() {
            return;
        }
        match self.current.as_mut() {
            Some((_, paragraphs)) => paragraphs.push(paragraph),
            None => self.current = Some((self.fallback_heading.clone(), vec![paragraph])),
        }
        self.seen_any_line = true;
    }

    pub(crate) fn finish(mut self) -> Vec<Section> {
        self.flush_current();
        self.sections
    }

    fn flush_current(&mut self) {
        let Some((heading, paragraphs)) = self.current.take() else {
            return;
        };
        // Heading-only runs produce no section.
        if paragraphs.is_empty() {
            return;
        }
        let section_id = SectionId::new(format!("s{}", self.sections.len() + 1))
            .expect("section index is a valid id segment");
        self.sections.push(Section::new(section_id, heading, paragraphs));
    }
}

fn ends_with_sentence_punctuation(line: &str) -> bool {
    static SENTENCE_END: OnceLock<Regex> = OnceLock::new();
    SENTENCE_END
        .get_or_init(|| Regex::new(r"[.!?]$").expect("sentence-end pattern compiles"))
        .is_match(line)
}
