// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::document::{Document, Section};
use super::ids::SectionId;

fn sid(value: &str) -> SectionId {
    SectionId::new(value).expect("section id")
}

pub(crate) fn short_document() -> Document {
    Document::new(
        "Reading Notes",
        vec![
            Section::new(
                sid("s1"),
                "Origins",
                vec![
                    "Readers have annotated margins for as long as there have been margins."
                        .to_owned(),
                    "The commonplace book collected excerpts long before index cards did."
                        .to_owned(),
                ],
            ),
            Section::new(
                sid("s2"),
                "Method",
                vec!["An excerpt detached from its source is only half a note.".to_owned()],
            ),
        ],
    )
}
