// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::anchor::ParaAnchor;
use super::ids::SectionId;

/// One section of a loaded document. Produced once at load; immutable after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    section_id: SectionId,
    heading: String,
    paragraphs: Vec<String>,
}

impl Section {
    pub fn new(
        section_id: SectionId,
        heading: impl Into<String>,
        paragraphs: Vec<String>,
    ) -> Self {
        Self { section_id, heading: heading.into(), paragraphs }
    }

    pub fn section_id(&self) -> &SectionId {
        &self.section_id
    }

    pub fn heading(&self) -> &str {
        &self.heading
    }

    pub fn paragraphs(&self) -> &[String] {
        &self.paragraphs
    }

    pub fn anchor(&self, para_index: usize) -> Option<ParaAnchor> {
        if para_index >= self.paragraphs.len() {
            return None;
        }
        Some(ParaAnchor::new(self.section_id.clone(), para_index))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    title: String,
    sections: Vec<Section>,
}

impl Document {
    pub fn new(title: impl Into<String>, sections: Vec<Section>) -> Self {
        Self { title: title.into(), sections }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, section_id: &SectionId) -> Option<&Section> {
        self.sections.iter().find(|section| section.section_id() == section_id)
    }

    /// Resolves an anchor to its paragraph text, if the anchor still points
    /// into this document.
    pub fn paragraph(&self, anchor: &ParaAnchor) -> Option<&str> {
        self.section(anchor.section_id())?
            .paragraphs()
            .get(anchor.para_index())
            .map(String::as_str)
    }

    pub fn contains_anchor(&self, anchor: &ParaAnchor) -> bool {
        self.paragraph(anchor).is_some()
    }

    /// All anchors in document order.
    pub fn anchors(&self) -> impl Iterator<Item = ParaAnchor> + '_ {
        self.sections.iter().flat_map(|section| {
            (0..section.paragraphs().len())
                .map(|index| ParaAnchor::new(section.section_id().clone(), index))
        })
    }

    pub fn paragraph_count(&self) -> usize {
        self.sections.iter().map(|section| section.paragraphs().len()).sum()
    }
}
