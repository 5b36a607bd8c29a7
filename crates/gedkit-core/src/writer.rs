// Dweve GEDKIT - GEDCOM Document Toolkit
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Line-oriented document writer.
//!
//! Output follows `<level> [<xref>] <tag>[ <payload>]`, one structure per
//! line. Multi-line text continues on `<level+1> CONT` lines, and a text
//! segment starting with `@` has that character doubled.

use crate::error::{GedError, GedResult};
use crate::payload::Payload;
use crate::structure::Structure;
use crate::xref::{Xref, XrefCategory};
use std::collections::{BTreeSet, HashMap};

/// Trailer line closing every document.
pub const TRAILER: &str = "0 TRLR";

/// State shared by the records rendered in one pass.
///
/// Each finished record publishes the identifiers it references, so a later
/// record can tell whether a shared note and a source point at each other.
#[derive(Debug, Default)]
pub struct RenderSession {
    /// record identifier -> identifiers referenced from that record
    references: HashMap<String, BTreeSet<String>>,
}

impl RenderSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// A session that already knows the references published by records
    /// rendered elsewhere.
    pub(crate) fn with_references(references: HashMap<String, BTreeSet<String>>) -> Self {
        Self { references }
    }

    /// Identifiers referenced from `record`, once it has been rendered.
    pub(crate) fn references_of(&self, record: &str) -> Option<&BTreeSet<String>> {
        self.references.get(record)
    }

    /// Validate and render one structure.
    pub fn render(&mut self, node: &Structure, level: usize) -> GedResult<String> {
        node.validate()?;

        let mut writer = GedWriter {
            output: String::with_capacity(256),
            references: &self.references,
            record: None,
            traversal: BTreeSet::new(),
        };
        writer.write_structure(node, level)?;

        let GedWriter {
            output,
            record,
            traversal,
            ..
        } = writer;
        if let Some(record) = record {
            self.references
                .entry(record.name().to_string())
                .or_default()
                .extend(traversal);
        }
        Ok(output)
    }
}

struct GedWriter<'s> {
    output: String,
    references: &'s HashMap<String, BTreeSet<String>>,
    /// Record being written, unless it is void.
    record: Option<Xref>,
    /// Identifiers referenced from the current record.
    traversal: BTreeSet<String>,
}

impl GedWriter<'_> {
    fn write_structure(&mut self, node: &Structure, level: usize) -> GedResult<()> {
        let level = if node.is_record() || node.is_header() {
            0
        } else {
            level
        };

        if let Some(xref) = node.record_xref() {
            let head = if xref.is_void() {
                format!("{} {}", level, node.tag())
            } else {
                self.record = Some(xref.clone());
                format!("{} {} {}", level, xref.name(), node.tag())
            };
            self.write_text(level, &head, xref.text().unwrap_or(""));
        } else {
            let head = format!("{} {}", level, node.tag());
            match node.payload() {
                Payload::None => self.write_text(level, &head, ""),
                Payload::Int(n) => self.write_raw(&head, &n.to_string()),
                Payload::Xref(target) => {
                    if level > 0 {
                        self.note_reference(target)?;
                    }
                    self.write_raw(&head, target.name());
                }
                Payload::Text(text) if node.binding().payload.is_enum() => {
                    self.write_text(level, &head, &text.to_uppercase())
                }
                Payload::Text(text) => self.write_text(level, &head, text),
            }
        }

        for child in node.children() {
            self.write_structure(child, level + 1)?;
        }
        Ok(())
    }

    /// Record `target` as referenced from the current record, failing when a
    /// source and a shared note would reference each other.
    fn note_reference(&mut self, target: &Xref) -> GedResult<()> {
        let Some(record) = &self.record else {
            return Ok(());
        };
        if target.is_void() {
            return Ok(());
        }
        let pair = (record.category(), target.category());
        let guarded = matches!(
            pair,
            (XrefCategory::Source, XrefCategory::SharedNote)
                | (XrefCategory::SharedNote, XrefCategory::Source)
        );
        if guarded
            && self
                .references
                .get(target.name())
                .map_or(false, |refs| refs.contains(record.name()))
        {
            return Err(GedError::CircularReference {
                target: target.name().to_string(),
                record: record.name().to_string(),
            });
        }
        self.traversal.insert(target.name().to_string());
        Ok(())
    }

    /// A line whose payload is written verbatim.
    fn write_raw(&mut self, head: &str, payload: &str) {
        self.output.push_str(head);
        self.output.push(' ');
        self.output.push_str(payload);
        self.output.push('\n');
    }

    /// A text payload, split into continuation lines and escaped per segment.
    fn write_text(&mut self, level: usize, head: &str, text: &str) {
        let mut segments = text.split('\n');
        self.output.push_str(head);
        if let Some(first) = segments.next() {
            self.push_segment(first);
        }
        self.output.push('\n');
        for segment in segments {
            self.output.push_str(&(level + 1).to_string());
            self.output.push_str(" CONT");
            self.push_segment(segment);
            self.output.push('\n');
        }
    }

    fn push_segment(&mut self, segment: &str) {
        let cleaned: String = segment.chars().filter(|c| !is_banned(*c)).collect();
        if cleaned.is_empty() {
            return;
        }
        self.output.push(' ');
        if cleaned.starts_with('@') {
            self.output.push('@');
        }
        self.output.push_str(&cleaned);
    }
}

/// Characters that may not appear in a payload.
fn is_banned(c: char) -> bool {
    matches!(c, '\u{0}'..='\u{1F}' | '\u{7F}' | '\u{FFFE}' | '\u{FFFF}')
}
