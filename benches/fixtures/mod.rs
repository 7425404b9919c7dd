// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use larissa::model::{
    Document, Highlight, HighlightColor, HighlightId, Section, SectionId, Workspace,
};

pub fn paragraph_of_words(words: usize) -> String {
    let mut text = String::with_capacity(words * 7);
    for index in 0..words {
        if index > 0 {
            text.push(' ');
        }
        text.push_str("word");
        text.push_str(&index.to_string());
    }
    text
}

/// `count` intervals over `len` bytes, staggered so neighbors overlap.
pub fn overlapping_highlights(len: usize, count: usize) -> Vec<Highlight> {
    let count = count.max(1);
    let step = (len / count).max(1);
    let span = (step * 2).min(len);
    (0..count)
        .map(|index| {
            let start = (index * step).min(len.saturating_sub(1));
            let end = (start + span).min(len);
            Highlight::new(
                HighlightId::new(format!("bench_hl_{index:04}")).expect("highlight id"),
                start,
                end.max(start + 1),
                HighlightColor::ALL[index % HighlightColor::ALL.len()],
                "bench",
            )
        })
        .collect()
}

pub fn document_with_paragraphs(sections: usize, paragraphs_per_section: usize) -> Document {
    let sections = (0..sections)
        .map(|section_index| {
            let section_id = SectionId::new(format!("s{}", section_index + 1))
                .expect("section id");
            let paragraphs = (0..paragraphs_per_section)
                .map(|para_index| {
                    format!(
                        "Section {section_index} paragraph {para_index}: {}",
                        paragraph_of_words(40)
                    )
                })
                .collect();
            Section::new(section_id, format!("Heading {section_index}"), paragraphs)
        })
        .collect();
    Document::new("Bench Document", sections)
}

pub fn loaded_workspace(sections: usize, paragraphs_per_section: usize) -> Workspace {
    let mut workspace = Workspace::new();
    workspace.load_document(document_with_paragraphs(sections, paragraphs_per_section));
    workspace
}
