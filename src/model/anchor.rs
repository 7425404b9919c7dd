// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use smol_str::SmolStr;

use super::ids::SectionId;

/// A stable paragraph anchor derived from `(section id, paragraph index)`.
///
/// Anchors are the join key between highlight storage, excerpt provenance and
/// source-sync. They are only meaningful for the document they were derived
/// from; loading a new document recomputes every anchor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParaAnchor {
    section_id: SectionId,
    para_index: usize,
    key: SmolStr,
}

impl ParaAnchor {
    pub fn new(section_id: SectionId, para_index: usize) -> Self {
        let key = join_key(section_id.as_str(), para_index);
        Self { section_id, para_index, key }
    }

    pub fn section_id(&self) -> &SectionId {
        &self.section_id
    }

    pub fn para_index(&self) -> usize {
        self.para_index
    }

    /// The joined `<section>_p<index>` form used by view surfaces.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for ParaAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

fn join_key(section_id: &str, para_index: usize) -> SmolStr {
    let mut buffer = itoa::Buffer::new();
    let index = buffer.format(para_index);
    let mut key = String::with_capacity(section_id.len() + 2 + index.len());
    key.push_str(section_id);
    key.push_str("_p");
    key.push_str(index);
    SmolStr::from(key)
}

#[cfg(test)]
mod tests {
    use super::ParaAnchor;
    use crate::model::SectionId;

    fn sid(value: &str) -> SectionId {
        SectionId::new(value).expect("section id")
    }

    #[test]
    fn anchor_key_joins_section_and_index() {
        let anchor = ParaAnchor::new(sid("s3"), 12);
        assert_eq!(anchor.key(), "s3_p12");
        assert_eq!(anchor.to_string(), "s3_p12");
        assert_eq!(anchor.section_id().as_str(), "s3");
        assert_eq!(anchor.para_index(), 12);
    }

    #[test]
    fn anchor_equality_is_derivation_equality() {
        let a = ParaAnchor::new(sid("s1"), 0);
        let b = ParaAnchor::new(sid("s1"), 0);
        let c = ParaAnchor::new(sid("s1"), 1);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn anchors_order_by_section_then_index() {
        let mut anchors = vec![
            ParaAnchor::new(sid("s2"), 0),
            ParaAnchor::new(sid("s1"), 1),
            ParaAnchor::new(sid("s1"), 0),
        ];
        anchors.sort();
        let keys: Vec<&str> = anchors.iter().map(ParaAnchor::key).collect();
        assert_eq!(keys, vec!["s1_p0", "s1_p1", "s2_p0"]);
    }
}
