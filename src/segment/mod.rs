// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Interval segmentation: paragraph text plus highlight intervals in,
//! ordered render segments out.
//!
//! The output is a contiguous, non-overlapping cover of the whole text, each
//! segment either plain or tagged with the topmost active highlight at that
//! position. Recomputed fresh on every call; holds no incremental state.

use std::ops::Range;

use smallvec::SmallVec;

use crate::model::{Highlight, HighlightId};

/// A maximal run of paragraph text sharing one highlight state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    range: Range<usize>,
    source: Option<HighlightId>,
}

impl Segment {
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// The topmost active highlight over this run, or `None` for plain text.
    pub fn source(&self) -> Option<&HighlightId> {
        self.source.as_ref()
    }

    pub fn is_highlighted(&self) -> bool {
        self.source.is_some()
    }

    pub fn text<'a>(&self, paragraph: &'a str) -> &'a str {
        &paragraph[self.range.clone()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum EventKind {
    Close,
    Open,
}

#[derive(Debug, Clone, Copy)]
struct Event {
    pos: usize,
    kind: EventKind,
    interval: usize,
}

/// Segments one paragraph. Intervals may overlap, nest, duplicate, or be
/// empty; out-of-range or inverted intervals are ignored rather than
/// rejected (the ops layer already guards insertion).
pub fn segment_paragraph(text: &str, highlights: &[Highlight]) -> Vec<Segment> {
    if text.is_empty() {
        return Vec::new();
    }
    if highlights.is_empty() {
        return vec![Segment { range: 0..text.len(), source: None }];
    }

    let mut events: SmallVec<[Event; 16]> = SmallVec::new();
    for (interval, highlight) in highlights.iter().enumerate() {
        let start = floor_char_boundary(text, highlight.start().min(text.len()));
        let end = floor_char_boundary(text, highlight.end().min(text.len()));
        if start >= end {
            continue;
        }
        events.push(Event { pos: start, kind: EventKind::Open, interval });
        events.push(Event { pos: end, kind: EventKind::Close, interval });
    }

    // Closes sort before opens at the same position so a highlight ending
    // exactly where another begins never double-stacks. The sort is stable,
    // which preserves insertion order among equal-position opens; the
    // last-pushed open is the top of the active stack and wins ties.
    events.sort_by_key(|event| (event.pos, event.kind));

    let mut segments = Vec::new();
    let mut active: SmallVec<[usize; 8]> = SmallVec::new();
    let mut cursor = 0usize;

    let flush = |to: usize, active: &[usize], segments: &mut Vec<Segment>, cursor: &mut usize| {
        if to <= *cursor {
            return;
        }
        let source = active
            .last()
            .map(|&interval| highlights[interval].highlight_id().clone());
        segments.push(Segment { range: *cursor..to, source });
        *cursor = to;
    };

    for event in &events {
        flush(event.pos, &active, &mut segments, &mut cursor);
        match event.kind {
            EventKind::Open => active.push(event.interval),
            EventKind::Close => {
                if let Some(index) = active.iter().rposition(|&open| open == event.interval) {
                    active.remove(index);
                }
            }
        }
    }
    flush(text.len(), &active, &mut segments, &mut cursor);

    segments
}

fn floor_char_boundary(text: &str, mut pos: usize) -> usize {
    while pos > 0 && !text.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}
