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

//! Shared test fixtures and utilities for gedkit.
//!
//! # Quick Start
//!
//! ```rust
//! use gedkit_test::fixtures;
//!
//! // Canonical document texts
//! let text = fixtures::family();
//!
//! // Documents assembled through the builder API
//! use gedkit_test::fixtures::builders::FamilyBuilder;
//! let ged = FamilyBuilder::new().father("John /Smith/").build().unwrap();
//!
//! // Error cases
//! for (_name, _text, _kind) in fixtures::errors::invalid_ged_samples() {
//!     // feed `text` to the loader, expect an error of `kind`
//! }
//! ```

use gedkit_core::{GedResult, Genealogy, ParseOptions, SchemaTable};
use std::sync::Arc;

/// Type alias for a list of fixture functions (name, document text).
pub type FixtureList = Vec<(&'static str, fn() -> &'static str)>;

/// Canonical test fixtures.
pub mod fixtures;

/// Structure counting utilities.
pub mod counts;

pub use counts::{count_references, count_structures};
pub use fixtures::*;

/// The built-in schema, shared.
pub fn gedcom7() -> Arc<SchemaTable> {
    match SchemaTable::gedcom7() {
        Ok(schema) => Arc::new(schema),
        Err(e) => panic!("built-in schema does not load: {}", e),
    }
}

/// Load a document with default options and stage every record.
pub fn load(text: &str) -> GedResult<Genealogy> {
    let mut ged = Genealogy::from_ged(text, gedcom7(), &ParseOptions::default())?;
    ged.stage_loaded()?;
    Ok(ged)
}
