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

//! Structure counting utilities.

use gedkit_core::{walk, Genealogy, ReferenceCollector, Structure, StructureVisitor, VisitContext};
use std::convert::Infallible;

struct Counter(usize);

impl StructureVisitor for Counter {
    type Error = Infallible;

    fn enter(&mut self, _node: &Structure, _ctx: &VisitContext) -> Result<(), Infallible> {
        self.0 += 1;
        Ok(())
    }
}

/// Count structures in a tree, the root included.
pub fn count_structures(root: &Structure) -> usize {
    let mut counter = Counter(0);
    walk(root, &mut counter).unwrap_or_else(|never| match never {});
    counter.0
}

/// Count the distinct identifiers referenced from the staged header and
/// records of a document.
pub fn count_references(ged: &Genealogy) -> usize {
    let mut collector = ReferenceCollector::default();
    for node in ged.header().into_iter().chain(ged.records()) {
        walk(node, &mut collector).unwrap_or_else(|never| match never {});
    }
    collector.references.len()
}
