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

//! Identifier allocation scoped to one document builder.

use crate::error::{GedError, GedResult};
use crate::xref::{normalize_name, Xref, XrefCategory, VOID};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Defined identifiers with a forward index per category and an inverted
/// index by external name.
///
/// Names are unique across the whole document, whatever their category.
/// The void identifier is never recorded.
#[derive(Debug, Clone)]
pub struct XrefRegistry {
    /// Next number handed out for unnamed or prefixed identifiers.
    counter: u64,
    /// Forward index: category -> names in allocation order
    by_category: BTreeMap<XrefCategory, Vec<String>>,
    /// Inverted index: name -> category
    by_name: HashMap<String, XrefCategory>,
}

impl XrefRegistry {
    pub fn new() -> Self {
        Self {
            counter: 1,
            by_category: BTreeMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Allocate a fresh identifier.
    ///
    /// - no name: the counter alone forms the name (`@1@`)
    /// - name: the normalized name (`@SMITH@`)
    /// - name with `use_as_prefix`: the normalized name and the counter (`@FAM2@`)
    ///
    /// `text` is kept only for shared notes.
    pub fn allocate(
        &mut self,
        category: XrefCategory,
        name: Option<&str>,
        use_as_prefix: bool,
        text: Option<&str>,
    ) -> GedResult<Xref> {
        let external = match name {
            None => self.next_free(""),
            Some(raw) => {
                let normalized = normalize_name(raw);
                if normalized.is_empty()
                    || !normalized
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '_')
                {
                    return Err(GedError::InvalidIdentifier {
                        name: raw.to_string(),
                    });
                }
                if use_as_prefix {
                    self.next_free(&normalized)
                } else {
                    format!("@{}@", normalized)
                }
            }
        };

        if external == VOID {
            return Ok(Xref::void(category));
        }

        self.define(category, &external)?;
        debug!(xref = %external, %category, "allocated identifier");

        let text = match category {
            XrefCategory::SharedNote => text.map(str::to_string),
            _ => None,
        };
        Ok(Xref::new(category, external, text))
    }

    /// Record an identifier that already exists, e.g. in a loaded document.
    pub fn register_existing(&mut self, category: XrefCategory, external: &str) -> GedResult<()> {
        if external == VOID {
            return Ok(());
        }
        self.define(category, external)
    }

    /// Names defined for a category, in allocation order.
    pub fn defined(&self, category: XrefCategory) -> &[String] {
        self.by_category
            .get(&category)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Category of a defined name.
    pub fn category_of(&self, external: &str) -> Option<XrefCategory> {
        self.by_name.get(external).copied()
    }

    pub fn contains(&self, external: &str) -> bool {
        self.by_name.contains_key(external)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    fn define(&mut self, category: XrefCategory, external: &str) -> GedResult<()> {
        if self.by_name.contains_key(external) {
            return Err(GedError::DuplicateIdentifier {
                xref: external.to_string(),
            });
        }
        self.by_name.insert(external.to_string(), category);
        self.by_category
            .entry(category)
            .or_default()
            .push(external.to_string());
        Ok(())
    }

    /// Counter-based names skip any name already taken.
    fn next_free(&mut self, prefix: &str) -> String {
        loop {
            let candidate = format!("@{}{}@", prefix, self.counter);
            self.counter += 1;
            if !self.by_name.contains_key(&candidate) {
                return candidate;
            }
        }
    }
}

impl Default for XrefRegistry {
    fn default() -> Self {
        Self::new()
    }
}
