// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::ops::Range;

use super::ids::HighlightId;

/// The closed set of reader highlight colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HighlightColor {
    Yellow,
    Green,
    Blue,
    Pink,
    Orange,
    Purple,
}

impl HighlightColor {
    pub const ALL: [HighlightColor; 6] = [
        HighlightColor::Yellow,
        HighlightColor::Green,
        HighlightColor::Blue,
        HighlightColor::Pink,
        HighlightColor::Orange,
        HighlightColor::Purple,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Pink => "pink",
            Self::Orange => "orange",
            Self::Purple => "purple",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|color| color.name() == name)
    }
}

/// One highlight interval over a paragraph's text.
///
/// The range is half-open byte indices into the paragraph. Intervals on the
/// same paragraph may overlap, nest, or duplicate each other freely; the
/// model places no restriction on this and the segmentation engine handles
/// every case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    highlight_id: HighlightId,
    start: usize,
    end: usize,
    color: HighlightColor,
    source_text: String,
}

impl Highlight {
    pub fn new(
        highlight_id: HighlightId,
        start: usize,
        end: usize,
        color: HighlightColor,
        source_text: impl Into<String>,
    ) -> Self {
        Self { highlight_id, start, end, color, source_text: source_text.into() }
    }

    pub fn highlight_id(&self) -> &HighlightId {
        &self.highlight_id
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn color(&self) -> HighlightColor {
        self.color
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }
}
