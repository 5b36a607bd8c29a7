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

//! The schema table: which structures exist, which substructures they
//! permit, and what payload they carry.
//!
//! Tables are deserialized from YAML. [`SchemaTable::gedcom7`] loads the
//! table embedded in this crate; [`SchemaTable::register_extension`] adds
//! structures from GEDCOM extension definitions.

use crate::error::{GedError, GedResult};
use crate::payload::PayloadType;
use crate::xref::XrefCategory;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;
use tracing::debug;

const GEDCOM7_TABLE: &str = include_str!("../schema/gedcom7.yaml");

/// Cardinality of a substructure, written `{min:max}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cardinality {
    /// At least one occurrence (`{1:..}`).
    pub required: bool,
    /// At most one occurrence (`{..:1}`).
    pub singular: bool,
}

impl FromStr for Cardinality {
    type Err = GedError;

    fn from_str(s: &str) -> GedResult<Self> {
        let inner = s
            .strip_prefix('{')
            .and_then(|s| s.strip_suffix('}'))
            .and_then(|s| s.split_once(':'))
            .ok_or_else(|| GedError::schema(format!("malformed cardinality {}", s)))?;
        match inner {
            ("0", "1") => Ok(Self { required: false, singular: true }),
            ("1", "1") => Ok(Self { required: true, singular: true }),
            ("0", "M") => Ok(Self { required: false, singular: false }),
            ("1", "M") => Ok(Self { required: true, singular: false }),
            _ => Err(GedError::schema(format!("unsupported cardinality {}", s))),
        }
    }
}

/// One structure entry of the schema table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StructureDef {
    /// Tag written in documents.
    pub tag: String,
    /// Payload descriptor URI.
    #[serde(default)]
    pub payload: Option<String>,
    /// Substructure key -> cardinality token.
    #[serde(default)]
    pub substructures: BTreeMap<String, String>,
    /// Enumeration set key for enumerated payloads.
    #[serde(default)]
    pub enumset: Option<String>,
    /// Top-level extension record.
    #[serde(default)]
    pub record: bool,
}

/// An enumeration entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EnumerationDef {
    pub tag: String,
}

#[derive(Debug, Deserialize)]
struct SchemaFile {
    structures: BTreeMap<String, StructureDef>,
    #[serde(default)]
    enumeration_sets: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    enumerations: BTreeMap<String, EnumerationDef>,
}

/// A GEDCOM extension definition as published in extension YAML files.
#[derive(Debug, Deserialize)]
struct ExtensionDef {
    #[serde(rename = "type")]
    kind: String,
    uri: String,
    #[serde(default)]
    payload: Option<String>,
    #[serde(default)]
    substructures: BTreeMap<String, String>,
    #[serde(default)]
    superstructures: BTreeMap<String, String>,
    #[serde(default, rename = "enumeration set")]
    enumeration_set: Option<String>,
}

/// Everything validation needs to know about one structure.
///
/// Built once per structure construction and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub key: String,
    pub tag: String,
    pub permitted: Vec<String>,
    pub required: Vec<String>,
    pub singular: Vec<String>,
    pub payload: PayloadType,
    /// Allowed tokens for enumerated payloads.
    pub enum_tags: Vec<String>,
    /// Record category, for record structures.
    pub record: Option<XrefCategory>,
}

impl Binding {
    pub fn is_header(&self) -> bool {
        self.key == "HEAD"
    }

    pub fn is_record(&self) -> bool {
        self.record.is_some()
    }
}

/// Structure definitions keyed by structure identifier.
#[derive(Debug, Clone, Default)]
pub struct SchemaTable {
    structures: BTreeMap<String, StructureDef>,
    enumeration_sets: BTreeMap<String, Vec<String>>,
    enumerations: BTreeMap<String, EnumerationDef>,
    extension_uris: BTreeSet<String>,
}

impl SchemaTable {
    /// The GEDCOM 7 table embedded in this crate.
    pub fn gedcom7() -> GedResult<Self> {
        Self::from_yaml(GEDCOM7_TABLE)
    }

    /// Load a table from YAML and check that it is self-consistent.
    pub fn from_yaml(text: &str) -> GedResult<Self> {
        let file: SchemaFile = serde_yaml::from_str(text)
            .map_err(|e| GedError::schema(format!("YAML error: {}", e)))?;
        let table = Self {
            structures: file.structures,
            enumeration_sets: file.enumeration_sets,
            enumerations: file.enumerations,
            extension_uris: BTreeSet::new(),
        };
        table.check()?;
        debug!(structures = table.structures.len(), "loaded schema table");
        Ok(table)
    }

    fn check(&self) -> GedResult<()> {
        for key in self.structures.keys() {
            self.binding(key)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.structures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.structures.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.structures.contains_key(key)
    }

    pub fn structure(&self, key: &str) -> GedResult<&StructureDef> {
        self.structures
            .get(key)
            .ok_or_else(|| GedError::UnknownStructure {
                key: key.to_string(),
            })
    }

    /// Enumeration tokens of a structure, through its enumeration set.
    pub fn enum_tags(&self, key: &str) -> GedResult<Vec<String>> {
        let Some(set) = &self.structure(key)?.enumset else {
            return Ok(Vec::new());
        };
        let entries = self
            .enumeration_sets
            .get(set)
            .ok_or_else(|| GedError::schema(format!("{} uses unknown enumeration set {}", key, set)))?;
        entries
            .iter()
            .map(|entry| {
                self.enumerations
                    .get(entry)
                    .map(|e| e.tag.clone())
                    .ok_or_else(|| GedError::schema(format!("{} lists unknown enumeration {}", set, entry)))
            })
            .collect()
    }

    /// Resolve the binding of a structure.
    pub fn binding(&self, key: &str) -> GedResult<Binding> {
        let def = self.structure(key)?;
        let mut permitted = Vec::with_capacity(def.substructures.len());
        let mut required = Vec::new();
        let mut singular = Vec::new();
        for (child, token) in &def.substructures {
            if !self.structures.contains_key(child) {
                return Err(GedError::schema(format!("{} lists unknown substructure {}", key, child)));
            }
            let cardinality: Cardinality = token.parse()?;
            permitted.push(child.clone());
            if cardinality.required {
                required.push(child.clone());
            }
            if cardinality.singular {
                singular.push(child.clone());
            }
        }

        let record = match key.strip_prefix("record-") {
            Some(tag) => Some(XrefCategory::from_tag(tag).ok_or_else(|| {
                GedError::schema(format!("{} is not a known record type", key))
            })?),
            None if def.record => Some(XrefCategory::Extension),
            None => None,
        };

        let payload = PayloadType::from_descriptor(def.payload.as_deref(), key)?;
        let enum_tags = if payload.is_enum() {
            self.enum_tags(key)?
        } else {
            Vec::new()
        };

        Ok(Binding {
            key: key.to_string(),
            tag: def.tag.clone(),
            permitted,
            required,
            singular,
            payload,
            enum_tags,
            record,
        })
    }

    /// Key of the substructure of `parent` written with `tag`.
    pub fn child_key(&self, parent: &str, tag: &str) -> Option<&str> {
        let def = self.structures.get(parent)?;
        def.substructures
            .keys()
            .find(|child| {
                self.structures
                    .get(child.as_str())
                    .map_or(false, |c| c.tag == tag)
            })
            .map(String::as_str)
    }

    /// Key of the header or record structure written with `tag`.
    pub fn record_key(&self, tag: &str) -> Option<&str> {
        if tag == "HEAD" {
            return self.structures.get_key_value("HEAD").map(|(k, _)| k.as_str());
        }
        if let Some(category) = XrefCategory::from_tag(tag) {
            return self
                .structures
                .get_key_value(&category.record_key())
                .map(|(k, _)| k.as_str());
        }
        self.structures
            .iter()
            .find(|(_, def)| def.record && def.tag == tag)
            .map(|(k, _)| k.as_str())
    }

    /// Document an extension tag from a GEDCOM extension definition.
    ///
    /// The new structure is added as a substructure of every superstructure
    /// the definition names; without superstructures it becomes an
    /// extension record. Returns the structure key.
    pub fn register_extension(&mut self, tag: &str, yaml: &str) -> GedResult<String> {
        let def: ExtensionDef = serde_yaml::from_str(yaml)
            .map_err(|e| GedError::schema(format!("YAML error: {}", e)))?;
        if def.kind != "structure" {
            return Err(GedError::schema(format!(
                "extension {} has type {}, only structures are supported",
                def.uri, def.kind
            )));
        }
        if self.extension_uris.contains(&def.uri) {
            return Err(GedError::DuplicateExtension { uri: def.uri });
        }

        let tag = if tag.starts_with('_') {
            tag.to_string()
        } else {
            format!("_{}", tag)
        };
        let key = uri_stem(&def.uri).to_string();
        if key.is_empty() || self.structures.contains_key(&key) {
            return Err(GedError::schema(format!("extension uri {} collides with an existing key", def.uri)));
        }

        let substructures = def
            .substructures
            .iter()
            .map(|(uri, card)| (uri_stem(uri).to_string(), card.clone()))
            .collect();
        let superstructures: Vec<(String, String)> = def
            .superstructures
            .iter()
            .map(|(uri, card)| (uri_stem(uri).to_string(), card.clone()))
            .collect();
        for (parent, card) in &superstructures {
            card.parse::<Cardinality>()?;
            if !self.structures.contains_key(parent) {
                return Err(GedError::UnknownStructure { key: parent.clone() });
            }
        }

        let structure = StructureDef {
            tag: tag.clone(),
            payload: def.payload,
            substructures,
            enumset: def.enumeration_set.as_deref().map(|s| uri_stem(s).to_string()),
            record: superstructures.is_empty(),
        };
        self.structures.insert(key.clone(), structure);
        if let Err(e) = self.binding(&key) {
            self.structures.remove(&key);
            return Err(e);
        }

        for (parent, card) in superstructures {
            if let Some(parent_def) = self.structures.get_mut(&parent) {
                parent_def.substructures.insert(key.clone(), card);
            }
        }
        self.extension_uris.insert(def.uri);
        debug!(%tag, %key, "documented extension");
        Ok(key)
    }
}

fn uri_stem(uri: &str) -> &str {
    uri.rsplit('/').next().unwrap_or(uri)
}
