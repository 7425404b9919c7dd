// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use pulldown_cmark::{Event, Parser, Tag, TagEnd};

use crate::model::Document;

use super::text::SectionBuilder;
use super::{DocumentSource, IngestError};

/// Markdown ingestion. Real headings exist here, so the plain-text heading
/// heuristic is not used at all: ATX/setext headings start sections,
/// paragraph and list-item text becomes paragraphs.
pub struct MarkdownSource;

impl DocumentSource for MarkdownSource {
    fn parse(&self, bytes: &[u8], title: &str) -> Result<Document, IngestError> {
        let raw = String::from_utf8_lossy(bytes);
        let mut builder = SectionBuilder::new("Content");
        let mut heading: Option<String> = None;
        let mut paragraph: Option<String> = None;

        for event in Parser::new(&raw) {
            match event {
                Event::Start(Tag::Heading { .. }) => {
                    heading = Some(String::new());
                }
                Event::End(TagEnd::Heading(_)) => {
                    if let Some(text) = heading.take() {
                        let text = text.trim();
                        if !text.is_empty() {
                            builder.start_section(text.to_owned());
                        }
                    }
                }
                Event::Start(Tag::Paragraph | Tag::Item) => {
                    paragraph = Some(String::new());
                }
                Event::End(TagEnd::Paragraph | TagEnd::Item) => {
                    if let Some(text) = paragraph.take() {
                        builder.push_paragraph(text.trim().to_owned());
                    }
                }
                Event::Text(text) | Event::Code(text) => {
                    if let Some(buffer) = heading.as_mut() {
                        buffer.push_str(&text);
                    } else if let Some(buffer) = paragraph.as_mut() {
                        buffer.push_str(&text);
                    }
                }
                Event::SoftBreak | Event::HardBreak => {
                    if let Some(buffer) = heading.as_mut() {
                        buffer.push(' ');
                    } else if let Some(buffer) = paragraph.as_mut() {
                        buffer.push(' ');
                    }
                }
                _ => {}
            }
        }

        let sections = builder.finish();
        if sections.is_empty() {
            return Err(IngestError::EmptyDocument);
        }
        Ok(Document::new(title, sections))
    }
}

#[cfg(test)]
mod tests {
    use super::{DocumentSource, MarkdownSource};
    use crate::ingest::IngestError;

    #[test]
    fn headings_start_sections() {
        let input = b"# One\n\nFirst paragraph.\n\n# Two\n\nSecond paragraph.\n";
        let document = MarkdownSource.parse(input, "Doc").expect("parse");
        assert_eq!(document.sections().len(), 2);
        assert_eq!(document.sections()[0].heading(), "One");
        assert_eq!(document.sections()[1].heading(), "Two");
        assert_eq!(
            document.sections()[1].paragraphs(),
            &["Second paragraph.".to_owned()]
        );
    }

    #[test]
    fn leading_prose_lands_in_a_content_section() {
        let input = b"Intro before any heading.\n\n# Later\n\nBody.\n";
        let document = MarkdownSource.parse(input, "Doc").expect("parse");
        assert_eq!(document.sections()[0].heading(), "Content");
        assert_eq!(
            document.sections()[0].paragraphs(),
            &["Intro before any heading.".to_owned()]
        );
    }

    #[test]
    fn soft_breaks_join_with_spaces_and_inline_code_is_kept() {
        let input = b"# S\n\nline one\nline two with `code` inside.\n";
        let document = MarkdownSource.parse(input, "Doc").expect("parse");
        assert_eq!(
            document.sections()[0].paragraphs(),
            &["line one line two with code inside.".to_owned()]
        );
    }

    #[test]
    fn list_items_become_paragraphs() {
        let input = b"# S\n\n- first item\n- second item\n";
        let document = MarkdownSource.parse(input, "Doc").expect("parse");
        assert_eq!(document.sections()[0].paragraphs().len(), 2);
    }

    #[test]
    fn heading_only_input_is_empty() {
        let err = MarkdownSource.parse(b"# Lonely\n", "Doc").unwrap_err();
        assert!(matches!(err, IngestError::EmptyDocument));
    }
}
