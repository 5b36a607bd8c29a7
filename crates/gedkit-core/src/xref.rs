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

//! Typed cross-reference identifiers.
//!
//! Every record category has its own identifier type, expressed here as an
//! [`XrefCategory`] carried by each [`Xref`]. Identifiers render as
//! `@NAME@`; the void identifier `@VOID@` stands for "no record".

use std::fmt;

/// External form of the void identifier.
pub const VOID: &str = "@VOID@";

/// Record category an identifier belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum XrefCategory {
    Family,
    Individual,
    Multimedia,
    Repository,
    SharedNote,
    Source,
    Submitter,
    /// Records documented by a schema extension.
    Extension,
}

impl XrefCategory {
    /// All categories, in record-tag order.
    pub const ALL: [XrefCategory; 8] = [
        Self::Family,
        Self::Individual,
        Self::Multimedia,
        Self::Repository,
        Self::SharedNote,
        Self::Source,
        Self::Submitter,
        Self::Extension,
    ];

    /// Standard record tag. Extension records take their tag from the schema.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Family => "FAM",
            Self::Individual => "INDI",
            Self::Multimedia => "OBJE",
            Self::Repository => "REPO",
            Self::SharedNote => "SNOTE",
            Self::Source => "SOUR",
            Self::Submitter => "SUBM",
            Self::Extension => "EXT",
        }
    }

    /// Category for a standard record tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| *c != Self::Extension && c.tag() == tag)
    }

    /// Schema key of the record structure for this category.
    pub fn record_key(self) -> String {
        format!("record-{}", self.tag())
    }
}

impl fmt::Display for XrefCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A cross-reference identifier.
///
/// Shared-note identifiers also carry the note text, which is written as the
/// payload of the shared-note record line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Xref {
    category: XrefCategory,
    name: String,
    tag: String,
    text: Option<String>,
}

impl Xref {
    pub(crate) fn new(category: XrefCategory, name: String, text: Option<String>) -> Self {
        Self {
            category,
            name,
            tag: category.tag().to_string(),
            text,
        }
    }

    /// The void identifier for a category.
    pub fn void(category: XrefCategory) -> Self {
        Self::new(category, VOID.to_string(), None)
    }

    /// Rebuild an identifier read from document text.
    ///
    /// `@VOID@` yields the void identifier.
    pub fn from_external(category: XrefCategory, name: &str) -> Self {
        Self::new(category, name.to_string(), None)
    }

    /// Set the record tag used for extension records.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Attach shared-note text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn category(&self) -> XrefCategory {
        self.category
    }

    /// External form, e.g. `@I1@`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tag written on the record line.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn is_void(&self) -> bool {
        self.name == VOID
    }
}

impl fmt::Display for Xref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Upper-case a name and replace spaces with underscores.
pub(crate) fn normalize_name(name: &str) -> String {
    name.trim().to_uppercase().replace(' ', "_")
}

/// Whether `token` has pointer syntax, `@` + tag characters + `@`.
pub fn is_pointer(token: &str) -> bool {
    token.len() >= 3
        && token.starts_with('@')
        && token.ends_with('@')
        && token[1..token.len() - 1]
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}
