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

//! Rebuild structure trees from parsed records.

use crate::error::{GedError, GedResult};
use crate::parser::{GedLine, RecordLines};
use crate::payload::{Payload, PayloadType};
use crate::schema::{Binding, SchemaTable};
use crate::structure::Structure;
use crate::xref::{is_pointer, Xref, XrefCategory, VOID};
use std::sync::Arc;

/// Rebuild the structure tree of one record (or the header).
///
/// Each tag is resolved against the substructures its parent permits, and
/// each payload is typed from the resolved binding. The result is not
/// validated.
pub fn reconstruct_record(record: &RecordLines, schema: &SchemaTable) -> GedResult<Structure> {
    let root = record.root();
    let key = schema
        .record_key(&root.tag)
        .ok_or_else(|| GedError::NotARecord {
            key: root.tag.clone(),
        })?;
    let binding = Arc::new(schema.binding(key)?);

    let payload = match binding.record {
        Some(category) => {
            let mut xref = Xref::from_external(category, root.xref.as_deref().unwrap_or(VOID))
                .with_tag(root.tag.as_str());
            if category == XrefCategory::SharedNote {
                if let Some(text) = root.text() {
                    xref = xref.with_text(text);
                }
            }
            Payload::Xref(xref)
        }
        None => typed_payload(&binding, root)?,
    };

    let lines = record.lines();
    let mut pos = 1;
    let children = build_children(schema, key, 0, lines, &mut pos)?;
    Ok(Structure::from_parts(binding, payload, children))
}

fn build_children(
    schema: &SchemaTable,
    parent_key: &str,
    parent_level: usize,
    lines: &[GedLine],
    pos: &mut usize,
) -> GedResult<Vec<Structure>> {
    let mut children = Vec::new();
    while let Some(line) = lines.get(*pos) {
        if line.level <= parent_level {
            break;
        }
        if line.level != parent_level + 1 {
            return Err(GedError::LevelJump {
                line: line.number,
                previous: parent_level,
                found: line.level,
            });
        }
        *pos += 1;

        let key = schema
            .child_key(parent_key, &line.tag)
            .ok_or_else(|| GedError::UnknownTag {
                tag: line.tag.clone(),
                parent: parent_key.to_string(),
                line: line.number,
            })?;
        let binding = Arc::new(schema.binding(key)?);
        let payload = typed_payload(&binding, line)?;
        let grandchildren = build_children(schema, key, line.level, lines, pos)?;
        children.push(Structure::from_parts(binding, payload, grandchildren));
    }
    Ok(children)
}

fn typed_payload(binding: &Binding, line: &GedLine) -> GedResult<Payload> {
    match binding.payload {
        PayloadType::Xref(category) => match line.payload.as_deref() {
            Some(token) if is_pointer(token) => Ok(Payload::Xref(Xref::from_external(category, token))),
            _ => Err(GedError::WrongXrefType {
                expected: category,
                key: binding.key.clone(),
            }),
        },
        PayloadType::NonNegativeInteger => {
            let raw = line.payload.as_deref().unwrap_or("");
            raw.parse::<i64>()
                .map(Payload::Int)
                .map_err(|_| GedError::WrongPayloadType {
                    key: binding.key.clone(),
                    expected: "an integer".to_string(),
                    found: format!("text {:?}", raw),
                })
        }
        _ => Ok(line.text().map(Payload::Text).unwrap_or(Payload::None)),
    }
}
