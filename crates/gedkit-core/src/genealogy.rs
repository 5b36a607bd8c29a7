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

//! The document builder.
//!
//! A [`Genealogy`] owns everything one document needs: the identifier
//! registry, the staged header and records, and the rendered fragments of
//! collected record groups. Independent builders share nothing but the
//! immutable schema table.
//!
//! ```
//! use gedkit_core::{Genealogy, SchemaTable, Structure};
//! use std::sync::Arc;
//!
//! # fn main() -> gedkit_core::GedResult<()> {
//! let schema = Arc::new(SchemaTable::gedcom7()?);
//! let mut ged = Genealogy::new(schema.clone());
//! let indi = ged.individual_xref(None)?;
//! ged.stage(Structure::header(&schema, "7.0")?)?;
//! ged.stage(Structure::record(&schema, &indi)?)?;
//! assert_eq!(
//!     ged.render_document()?,
//!     "0 HEAD\n1 GEDC\n2 VERS 7.0\n0 @1@ INDI\n0 TRLR"
//! );
//! # Ok(())
//! # }
//! ```

use crate::error::{GedError, GedResult};
use crate::limits::ParseOptions;
use crate::load::reconstruct_record;
use crate::parser::{split_records, RecordLines};
use crate::registry::XrefRegistry;
use crate::schema::SchemaTable;
use crate::structure::Structure;
use crate::visit::{walk, ReferenceCollector};
use crate::writer::{RenderSession, TRAILER};
use crate::xref::{Xref, XrefCategory};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, warn};

/// A record read from document text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedRecord {
    /// `HEAD` for the header; the identifier without `@` for records that
    /// have one; otherwise the tag numbered by occurrence (`FAM1`).
    pub name: String,
    /// Record category; `None` for the header.
    pub category: Option<XrefCategory>,
    pub lines: RecordLines,
}

impl NamedRecord {
    pub fn tag(&self) -> &str {
        self.lines.tag()
    }

    pub fn xref(&self) -> Option<&str> {
        self.lines.xref()
    }

    /// Record text with continuations folded in.
    pub fn text(&self) -> String {
        self.lines.text()
    }
}

/// Builder and container for one genealogy document.
#[derive(Debug, Clone)]
pub struct Genealogy {
    schema: Arc<SchemaTable>,
    registry: XrefRegistry,
    header: Option<Structure>,
    records: Vec<Structure>,
    fragments: BTreeMap<XrefCategory, String>,
    /// Per collected category: record identifier -> identifiers it references.
    fragment_refs: BTreeMap<XrefCategory, HashMap<String, BTreeSet<String>>>,
    loaded: Vec<NamedRecord>,
}

impl Genealogy {
    pub fn new(schema: Arc<SchemaTable>) -> Self {
        Self {
            schema,
            registry: XrefRegistry::new(),
            header: None,
            records: Vec::new(),
            fragments: BTreeMap::new(),
            fragment_refs: BTreeMap::new(),
            loaded: Vec::new(),
        }
    }

    /// Load existing document text.
    ///
    /// Records are kept as parsed lines and their identifiers are registered,
    /// so new allocations cannot collide with them. Nothing is staged; see
    /// [`Genealogy::stage_loaded`].
    pub fn from_ged(raw: &str, schema: Arc<SchemaTable>, options: &ParseOptions) -> GedResult<Self> {
        let mut ged = Self::new(schema);
        let mut occurrences: BTreeMap<String, usize> = BTreeMap::new();

        for lines in split_records(raw, options)? {
            let tag = lines.tag().to_string();
            let category = if tag == "HEAD" {
                None
            } else {
                let key = ged
                    .schema
                    .record_key(&tag)
                    .ok_or_else(|| GedError::NotARecord { key: tag.clone() })?;
                ged.schema.binding(key)?.record
            };

            let name = match (category, lines.xref()) {
                (None, _) => "HEAD".to_string(),
                (Some(category), Some(xref)) => {
                    ged.registry.register_existing(category, xref)?;
                    xref.trim_matches('@').to_string()
                }
                (Some(_), None) => {
                    let count = occurrences.entry(tag.clone()).or_insert(0);
                    *count += 1;
                    format!("{}{}", tag, count)
                }
            };
            ged.loaded.push(NamedRecord {
                name,
                category,
                lines,
            });
        }

        debug!(records = ged.loaded.len(), "loaded document");
        Ok(ged)
    }

    pub fn schema(&self) -> &Arc<SchemaTable> {
        &self.schema
    }

    pub fn registry(&self) -> &XrefRegistry {
        &self.registry
    }

    // ==================== Identifiers ====================

    /// Allocate an identifier of `category`; see [`XrefRegistry::allocate`].
    pub fn allocate(
        &mut self,
        category: XrefCategory,
        name: Option<&str>,
        use_as_prefix: bool,
        text: Option<&str>,
    ) -> GedResult<Xref> {
        self.registry.allocate(category, name, use_as_prefix, text)
    }

    pub fn family_xref(&mut self, name: Option<&str>) -> GedResult<Xref> {
        self.allocate(XrefCategory::Family, name, false, None)
    }

    pub fn individual_xref(&mut self, name: Option<&str>) -> GedResult<Xref> {
        self.allocate(XrefCategory::Individual, name, false, None)
    }

    pub fn multimedia_xref(&mut self, name: Option<&str>) -> GedResult<Xref> {
        self.allocate(XrefCategory::Multimedia, name, false, None)
    }

    pub fn repository_xref(&mut self, name: Option<&str>) -> GedResult<Xref> {
        self.allocate(XrefCategory::Repository, name, false, None)
    }

    pub fn shared_note_xref(&mut self, name: Option<&str>, text: &str) -> GedResult<Xref> {
        self.allocate(XrefCategory::SharedNote, name, false, Some(text))
    }

    pub fn source_xref(&mut self, name: Option<&str>) -> GedResult<Xref> {
        self.allocate(XrefCategory::Source, name, false, None)
    }

    pub fn submitter_xref(&mut self, name: Option<&str>) -> GedResult<Xref> {
        self.allocate(XrefCategory::Submitter, name, false, None)
    }

    /// Identifier for a record documented by a schema extension.
    pub fn extension_xref(&mut self, tag: &str, name: Option<&str>) -> GedResult<Xref> {
        if self.schema.record_key(tag).is_none() {
            return Err(GedError::NotARecord {
                key: tag.to_string(),
            });
        }
        Ok(self
            .allocate(XrefCategory::Extension, name, false, None)?
            .with_tag(tag))
    }

    // ==================== Staging and rendering ====================

    /// Stage the header or a record for [`Genealogy::render_document`].
    pub fn stage(&mut self, record: Structure) -> GedResult<()> {
        if record.is_header() {
            if self.header.is_some() {
                warn!("replacing the staged header");
            }
            self.header = Some(record);
        } else if record.is_record() {
            debug!(key = record.key(), "staged record");
            self.records.push(record);
        } else {
            return Err(GedError::NotARecord {
                key: record.key().to_string(),
            });
        }
        Ok(())
    }

    pub fn header(&self) -> Option<&Structure> {
        self.header.as_ref()
    }

    pub fn records(&self) -> &[Structure] {
        &self.records
    }

    /// The header, every staged record in staging order, then the trailer.
    pub fn render_document(&self) -> GedResult<String> {
        let header = self.header.as_ref().ok_or(GedError::MissingHeader)?;
        let mut session = RenderSession::new();
        let mut output = session.render(header, 0)?;
        for record in &self.records {
            output.push_str(&session.render(record, 0)?);
        }
        output.push_str(TRAILER);
        debug!(records = self.records.len(), bytes = output.len(), "rendered document");
        Ok(output)
    }

    /// Render a group of records of one category into that category's
    /// fragment.
    ///
    /// Fails when a record appears twice, when a record is of another
    /// category, or when an identifier allocated for the category has no
    /// record. References published by the other collected categories take
    /// part in the source/shared-note cycle check; collecting a category
    /// again replaces its fragment and its references.
    pub fn collect(&mut self, category: XrefCategory, records: &[Structure]) -> GedResult<()> {
        let mut seen: HashSet<&str> = HashSet::new();
        for record in records {
            let xref = record.record_xref().ok_or_else(|| GedError::NotARecord {
                key: record.key().to_string(),
            })?;
            if xref.category() != category {
                return Err(GedError::WrongXrefType {
                    expected: category,
                    key: record.key().to_string(),
                });
            }
            if !xref.is_void() && !seen.insert(xref.name()) {
                return Err(GedError::DuplicateRecord {
                    xref: xref.name().to_string(),
                });
            }
        }

        let missing: Vec<String> = self
            .registry
            .defined(category)
            .iter()
            .filter(|name| !seen.contains(name.as_str()))
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(GedError::MissingRecord { missing });
        }

        let published = self
            .fragment_refs
            .iter()
            .filter(|(other, _)| **other != category)
            .flat_map(|(_, refs)| refs.iter())
            .map(|(record, targets)| (record.clone(), targets.clone()))
            .collect();
        let mut session = RenderSession::with_references(published);
        let mut fragment = String::new();
        for record in records {
            fragment.push_str(&session.render(record, 0)?);
        }

        let own = seen
            .iter()
            .filter_map(|name| {
                let targets = session.references_of(name)?;
                Some((name.to_string(), targets.clone()))
            })
            .collect();
        debug!(%category, records = records.len(), "collected records");
        self.fragments.insert(category, fragment);
        self.fragment_refs.insert(category, own);
        Ok(())
    }

    /// Rendered fragment of a collected category.
    pub fn fragment(&self, category: XrefCategory) -> Option<&str> {
        self.fragments.get(&category).map(String::as_str)
    }

    /// Check that every identifier referenced from the staged header and
    /// records is defined in this document.
    pub fn check_references(&self) -> GedResult<()> {
        let mut collector = ReferenceCollector::default();
        for node in self.header.iter().chain(&self.records) {
            walk(node, &mut collector).unwrap_or_else(|never| match never {});
        }
        match collector
            .references
            .keys()
            .find(|name| !self.registry.contains(name))
        {
            Some(name) => Err(GedError::UnresolvedReference { xref: name.clone() }),
            None => Ok(()),
        }
    }

    // ==================== Loaded documents ====================

    pub fn loaded_records(&self) -> &[NamedRecord] {
        &self.loaded
    }

    /// Loaded records per category, the header excluded.
    pub fn record_counts(&self) -> BTreeMap<XrefCategory, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.loaded {
            if let Some(category) = record.category {
                *counts.entry(category).or_insert(0) += 1;
            }
        }
        counts
    }

    /// The `HEAD.GEDC.VERS` value of the loaded document.
    pub fn version(&self) -> Option<&str> {
        self.header_lines()?
            .iter()
            .skip_while(|l| !(l.level == 1 && l.tag == "GEDC"))
            .skip(1)
            .take_while(|l| l.level > 1)
            .find(|l| l.level == 2 && l.tag == "VERS")
            .and_then(|l| l.payload.as_deref())
    }

    /// `(tag, uri)` pairs declared under `HEAD.SCHMA` of the loaded document.
    pub fn extension_tags(&self) -> Vec<(String, String)> {
        let Some(lines) = self.header_lines() else {
            return Vec::new();
        };
        lines
            .iter()
            .skip_while(|l| !(l.level == 1 && l.tag == "SCHMA"))
            .skip(1)
            .take_while(|l| l.level > 1)
            .filter(|l| l.level == 2 && l.tag == "TAG")
            .filter_map(|l| {
                let (tag, uri) = l.payload.as_deref()?.split_once(' ')?;
                Some((tag.to_string(), uri.trim().to_string()))
            })
            .collect()
    }

    fn header_lines(&self) -> Option<&[crate::parser::GedLine]> {
        self.loaded
            .iter()
            .find(|r| r.category.is_none())
            .map(|r| r.lines.lines())
    }

    /// Rebuild every loaded record as a structure tree, header first.
    pub fn reconstruct(&self) -> GedResult<Vec<Structure>> {
        self.loaded
            .iter()
            .map(|record| reconstruct_record(&record.lines, &self.schema))
            .collect()
    }

    /// Rebuild and stage every loaded record.
    pub fn stage_loaded(&mut self) -> GedResult<()> {
        for structure in self.reconstruct()? {
            self.stage(structure)?;
        }
        Ok(())
    }
}
