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

//! Core data model, writer and reader for GEDCOM 7 genealogy documents.
//!
//! Documents are built from [`Structure`] trees whose shape is governed by a
//! [`SchemaTable`]. Records are identified by [`Xref`]s handed out by an
//! [`XrefRegistry`], and a [`Genealogy`] ties the pieces together into one
//! document that can be rendered to text or loaded back from it.
//!
//! # Reading
//!
//! [`split`] and [`split_records`] break document text into records, with
//! `CONT` continuation lines kept inside the record they belong to.
//! [`Genealogy::from_ged`] names the records and registers their identifiers,
//! and [`reconstruct_record`] rebuilds a structure tree from one record.
//!
//! # Writing
//!
//! [`Structure::render`] and [`RenderSession`] validate a tree before
//! writing it, so rendered output always satisfies the schema.

pub mod date;
mod error;
mod genealogy;
mod limits;
mod load;
mod parser;
mod payload;
mod preprocess;
mod registry;
mod schema;
mod structure;
pub mod visit;
mod writer;
mod xref;

pub use error::{GedError, GedErrorKind, GedResult};
pub use genealogy::{Genealogy, NamedRecord};
pub use limits::{Limits, ParseOptions, ParseOptionsBuilder};
pub use load::reconstruct_record;
pub use parser::{split, split_records, GedLine, RecordLines, HEADER};
pub use payload::{Payload, PayloadType};
pub use registry::XrefRegistry;
pub use schema::{Binding, Cardinality, EnumerationDef, SchemaTable, StructureDef};
pub use structure::Structure;
pub use visit::{walk, ReferenceCollector, StructureVisitor, VisitContext};
pub use writer::{RenderSession, TRAILER};
pub use xref::{is_pointer, Xref, XrefCategory, VOID};
