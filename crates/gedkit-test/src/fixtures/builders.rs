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

//! Builders for documents assembled through the API rather than parsed.

use gedkit_core::{GedResult, Genealogy, SchemaTable, Structure, Xref, XrefCategory};
use std::sync::Arc;

/// One person added by [`FamilyBuilder`].
#[derive(Debug, Clone)]
struct Person {
    xref: Xref,
    name: String,
    sex: &'static str,
    birth: Option<String>,
}

/// Builder for a two-generation family document.
///
/// # Examples
///
/// ```
/// use gedkit_test::fixtures::builders::FamilyBuilder;
///
/// let ged = FamilyBuilder::new()
///     .father("John /Smith/")
///     .mother("Mary /Jones/")
///     .child("Peter /Smith/", Some("6 APR 1980"))
///     .build()
///     .unwrap();
///
/// let text = ged.render_document().unwrap();
/// assert!(text.starts_with("0 HEAD\n"));
/// assert!(text.ends_with("0 TRLR"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct FamilyBuilder {
    version: Option<String>,
    father: Option<String>,
    mother: Option<String>,
    children: Vec<(String, Option<String>)>,
    note: Option<String>,
}

impl FamilyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the `HEAD.GEDC.VERS` value (default `7.0`).
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn father(mut self, name: impl Into<String>) -> Self {
        self.father = Some(name.into());
        self
    }

    pub fn mother(mut self, name: impl Into<String>) -> Self {
        self.mother = Some(name.into());
        self
    }

    /// Adds a child with an optional birth date.
    pub fn child(mut self, name: impl Into<String>, birth: Option<&str>) -> Self {
        self.children.push((name.into(), birth.map(str::to_string)));
        self
    }

    /// Attaches a shared note to the family.
    pub fn note(mut self, text: impl Into<String>) -> Self {
        self.note = Some(text.into());
        self
    }

    /// Allocates identifiers and stages the header and every record.
    pub fn build(self) -> GedResult<Genealogy> {
        let schema = Arc::new(SchemaTable::gedcom7()?);
        let mut ged = Genealogy::new(schema.clone());
        let family = ged.family_xref(Some("FAMILY"))?;

        let mut people = Vec::new();
        let mut family_record = Structure::record(&schema, &family)?;
        for (role, name, sex) in [("HUSB", &self.father, "M"), ("WIFE", &self.mother, "F")] {
            if let Some(name) = name {
                let xref = ged.allocate(XrefCategory::Individual, Some("I"), true, None)?;
                family_record.push(Structure::new(&schema, role, &xref)?);
                people.push((
                    Person {
                        xref,
                        name: name.clone(),
                        sex,
                        birth: None,
                    },
                    "FAMS",
                ));
            }
        }
        for (name, birth) in &self.children {
            let xref = ged.allocate(XrefCategory::Individual, Some("I"), true, None)?;
            family_record.push(Structure::new(&schema, "CHIL", &xref)?);
            people.push((
                Person {
                    xref,
                    name: name.clone(),
                    sex: "U",
                    birth: birth.clone(),
                },
                "FAMC",
            ));
        }
        if !self.children.is_empty() {
            family_record.push(Structure::new(&schema, "NCHI", self.children.len() as i64)?);
        }

        let note = match &self.note {
            Some(text) => {
                let xref = ged.shared_note_xref(None, text)?;
                family_record.push(Structure::new(&schema, "SNOTE", &xref)?);
                Some(Structure::record(&schema, &xref)?)
            }
            None => None,
        };

        ged.stage(Structure::header(
            &schema,
            self.version.as_deref().unwrap_or("7.0"),
        )?)?;
        for (person, link) in people {
            let mut record = Structure::record(&schema, &person.xref)?
                .with_child(Structure::new(&schema, "INDI-NAME", person.name.as_str())?)
                .with_child(Structure::new(&schema, "SEX", person.sex)?);
            if let Some(date) = person.birth {
                record.push(
                    Structure::empty(&schema, "BIRT")?
                        .with_child(Structure::new(&schema, "DATE", date)?),
                );
            }
            record.push(Structure::new(&schema, link, &family)?);
            ged.stage(record)?;
        }
        ged.stage(family_record)?;
        if let Some(note) = note {
            ged.stage(note)?;
        }
        Ok(ged)
    }
}
