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

//! Property-based tests for gedkit core.
//!
//! # Test Modules
//!
//! - `identifiers`: uniqueness of allocated identifiers
//! - `validation`: enumeration, coordinate and cardinality boundaries
//! - `rendering`: idempotence and continuation round-trip
//! - `parsing`: split of rendered documents

pub mod identifiers;
pub mod parsing;
pub mod rendering;
pub mod validation;

use gedkit_core::SchemaTable;
use std::sync::Arc;

pub fn schema() -> Arc<SchemaTable> {
    Arc::new(SchemaTable::gedcom7().unwrap())
}
