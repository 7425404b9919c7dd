// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::io::{Cursor, Read};
use std::sync::OnceLock;

use regex::Regex;
use zip::ZipArchive;

use crate::model::Document;

use super::text::sections_from_lines;
use super::{DocumentSource, IngestError};

/// DOCX ingestion. The container is a zip archive; paragraph text lives in
/// `word/document.xml` as `<w:t>` runs inside `<w:p>` elements. Extraction
/// is regex-based and deliberately tolerant — styling, tables and everything
/// else are ignored. Sectioning reuses the plain-text heading heuristic.
pub struct DocxSource;

impl DocumentSource for DocxSource {
    fn parse(&self, bytes: &[u8], title: &str) -> Result<Document, IngestError> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))
            .map_err(|err| IngestError::Archive(err.to_string()))?;
        let mut xml = String::new();
        archive
            .by_name("word/document.xml")
            .map_err(|err| IngestError::Archive(format!("word/document.xml: {err}")))?
            .read_to_string(&mut xml)?;

        let sections = sections_from_lines(paragraph_texts(&xml), "Introduction");
        if sections.is_empty() {
            return Err(IngestError::EmptyDocument);
        }
        Ok(Document::new(title, sections))
    }
}

fn paragraph_texts(xml: &str) -> Vec<String> {
    static PARAGRAPH: OnceLock<Regex> = OnceLock::new();
    static RUN: OnceLock<Regex> = OnceLock::new();
    let paragraph = PARAGRAPH.get_or_init(|| {
        Regex::new(r"(?s)<w:p(?:\s[^>]*)?>(.*?)</w:p>").expect("paragraph pattern compiles")
    });
    let run = RUN.get_or_init(|| {
        Regex::new(r"<w:t(?:\s[^>]*)?>([^<]*)</w:t>").expect("run pattern compiles")
    });

    let mut texts = Vec::new();
    for para in paragraph.captures_iter(xml) {
        let body = &para[1];
        let mut text = String::new();
        for captures in run.captures_iter(body) {
            text.push_str(&captures[1]);
        }
        let text = decode_entities(text.trim());
        if !text.is_empty() {
            texts.push(text);
        }
    }
    texts
}

fn decode_entities(text: &str) -> String {
    // `&amp;` last, so double-escaped entities stay escaped once.
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
