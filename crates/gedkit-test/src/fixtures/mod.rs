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

//! Canonical test fixtures.
//!
//! - **documents**: document texts in canonical form
//! - **builders**: documents assembled through the builder API
//! - **errors**: invalid documents and the error each one raises

pub mod builders;
mod documents;
pub mod errors;

pub use documents::*;

use crate::FixtureList;

/// Every document fixture, for running one test across all of them.
pub fn all() -> FixtureList {
    vec![
        ("minimal", minimal),
        ("rich_header", rich_header),
        ("family", family),
        ("sources_and_notes", sources_and_notes),
        ("void_records", void_records),
    ]
}
