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

//! Depth-first traversal of structure trees.
//!
//! Implement [`StructureVisitor`] and hand it to [`walk`]; the walker deals
//! with recursion and tracks the path from the root.

use crate::payload::Payload;
use crate::structure::Structure;
use crate::xref::Xref;
use std::collections::BTreeMap;

/// Position of a structure during traversal.
#[derive(Debug, Clone)]
pub struct VisitContext<'a> {
    /// Depth below the walked root (0 = root).
    pub depth: usize,
    /// Keys from the root down to the current structure.
    pub path: Vec<&'a str>,
}

impl<'a> VisitContext<'a> {
    fn root(key: &'a str) -> Self {
        Self {
            depth: 0,
            path: vec![key],
        }
    }

    fn child(&self, key: &'a str) -> Self {
        let mut path = self.path.clone();
        path.push(key);
        Self {
            depth: self.depth + 1,
            path,
        }
    }

    /// Dotted path, for messages.
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }
}

/// Visitor over structures. Both hooks default to doing nothing.
pub trait StructureVisitor {
    type Error;

    fn enter(&mut self, _node: &Structure, _ctx: &VisitContext) -> Result<(), Self::Error> {
        Ok(())
    }

    fn leave(&mut self, _node: &Structure, _ctx: &VisitContext) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Walk `root` and its substructures depth-first, in document order.
pub fn walk<V: StructureVisitor>(root: &Structure, visitor: &mut V) -> Result<(), V::Error> {
    walk_node(root, visitor, &VisitContext::root(root.key()))
}

fn walk_node<'a, V: StructureVisitor>(
    node: &'a Structure,
    visitor: &mut V,
    ctx: &VisitContext<'a>,
) -> Result<(), V::Error> {
    visitor.enter(node, ctx)?;
    for child in node.children() {
        walk_node(child, visitor, &ctx.child(child.key()))?;
    }
    visitor.leave(node, ctx)
}

/// Collects identifier payloads referenced below record level.
#[derive(Debug, Default)]
pub struct ReferenceCollector {
    /// Referenced identifiers with the path of their first use.
    pub references: BTreeMap<String, (Xref, String)>,
}

impl StructureVisitor for ReferenceCollector {
    type Error = std::convert::Infallible;

    fn enter(&mut self, node: &Structure, ctx: &VisitContext) -> Result<(), Self::Error> {
        if node.is_record() {
            return Ok(());
        }
        if let Payload::Xref(xref) = node.payload() {
            if !xref.is_void() {
                self.references
                    .entry(xref.name().to_string())
                    .or_insert_with(|| (xref.clone(), ctx.path_string()));
            }
        }
        Ok(())
    }
}
