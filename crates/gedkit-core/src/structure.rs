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

//! The structure node: a tag, a payload and ordered substructures, bound to
//! its schema entry at construction.

use crate::error::{GedError, GedResult};
use crate::payload::Payload;
use crate::schema::{Binding, SchemaTable};
use crate::writer::RenderSession;
use crate::xref::{Xref, XrefCategory};
use std::collections::HashMap;
use std::sync::Arc;

/// A node of a document tree.
///
/// Records and the header are structures too; their binding marks them as
/// such. Children are owned; cross-references are identifiers only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Structure {
    binding: Arc<Binding>,
    payload: Payload,
    children: Vec<Structure>,
}

impl Structure {
    /// Create a structure of schema entry `key`.
    pub fn new(schema: &SchemaTable, key: &str, payload: impl Into<Payload>) -> GedResult<Self> {
        Ok(Self::from_parts(
            Arc::new(schema.binding(key)?),
            payload.into(),
            Vec::new(),
        ))
    }

    /// Create a structure without payload.
    pub fn empty(schema: &SchemaTable, key: &str) -> GedResult<Self> {
        Self::new(schema, key, Payload::None)
    }

    /// The record structure identified by `xref`.
    pub fn record(schema: &SchemaTable, xref: &Xref) -> GedResult<Self> {
        let key = match xref.category() {
            XrefCategory::Extension => schema
                .record_key(xref.tag())
                .ok_or_else(|| GedError::NotARecord {
                    key: xref.tag().to_string(),
                })?
                .to_string(),
            category => category.record_key(),
        };
        Self::new(schema, &key, xref)
    }

    /// A header holding only the version marker.
    pub fn header(schema: &SchemaTable, version: &str) -> GedResult<Self> {
        let gedc = Self::empty(schema, "GEDC")?.with_child(Self::new(schema, "GEDC-VERS", version)?);
        Ok(Self::empty(schema, "HEAD")?.with_child(gedc))
    }

    pub(crate) fn from_parts(binding: Arc<Binding>, payload: Payload, children: Vec<Structure>) -> Self {
        Self {
            binding,
            payload,
            children,
        }
    }

    pub fn with_child(mut self, child: Structure) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Structure>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn push(&mut self, child: Structure) {
        self.children.push(child);
    }

    pub fn key(&self) -> &str {
        &self.binding.key
    }

    pub fn tag(&self) -> &str {
        &self.binding.tag
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn children(&self) -> &[Structure] {
        &self.children
    }

    pub fn binding(&self) -> &Binding {
        &self.binding
    }

    pub fn is_header(&self) -> bool {
        self.binding.is_header()
    }

    pub fn is_record(&self) -> bool {
        self.binding.is_record()
    }

    /// Identifier of a record structure.
    pub fn record_xref(&self) -> Option<&Xref> {
        if self.is_record() {
            self.payload.as_xref()
        } else {
            None
        }
    }

    /// Check this structure and all substructures against their bindings.
    ///
    /// Checks run in a fixed order and the first failure is returned:
    /// permitted children, required children, singular children, payload
    /// type, record identifier category, then each child in order.
    pub fn validate(&self) -> GedResult<()> {
        let binding = &*self.binding;

        if let Some(child) = self
            .children
            .iter()
            .find(|c| !binding.permitted.iter().any(|p| p == c.key()))
        {
            return Err(GedError::NotPermitted {
                child: child.key().to_string(),
                permitted: binding.permitted.clone(),
                parent: binding.key.clone(),
            });
        }

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for child in &self.children {
            *counts.entry(child.key()).or_insert(0) += 1;
        }

        if let Some(missing) = binding
            .required
            .iter()
            .find(|r| !counts.contains_key(r.as_str()))
        {
            return Err(GedError::MissingRequired {
                missing: missing.clone(),
                required: binding.required.clone(),
                parent: binding.key.clone(),
            });
        }

        if let Some(child) = self.children.iter().find(|c| {
            counts.get(c.key()).copied().unwrap_or(0) > 1
                && binding.singular.iter().any(|s| s == c.key())
        }) {
            return Err(GedError::OnlyOnePermitted {
                child: child.key().to_string(),
                parent: binding.key.clone(),
            });
        }

        match binding.record {
            // The record payload is its own identifier.
            Some(category) => match &self.payload {
                Payload::Xref(xref) if xref.category() == category => {}
                _ => {
                    return Err(GedError::WrongXrefType {
                        expected: category,
                        key: binding.key.clone(),
                    })
                }
            },
            None => binding
                .payload
                .check(&binding.key, &self.payload, &binding.enum_tags)?,
        }

        self.children.iter().try_for_each(Structure::validate)
    }

    /// Validate, then render at `level`. Records and the header always
    /// render at level 0.
    pub fn render(&self, level: usize) -> GedResult<String> {
        RenderSession::new().render(self, level)
    }
}
