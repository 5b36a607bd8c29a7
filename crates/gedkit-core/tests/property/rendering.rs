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

//! Property-based tests for rendering.

use super::schema;
use gedkit_core::{split_records, ParseOptions, Structure, Xref, XrefCategory};
use proptest::prelude::*;

/// Printable text without the characters the writer strips.
fn segment() -> impl Strategy<Value = String> {
    "[ -~]{0,30}".prop_map(|s| s.trim().to_string())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Property: rendering the same tree twice gives identical text.
    #[test]
    fn prop_render_idempotent(notes in prop::collection::vec(segment(), 0..5), nchi in 0_i64..20) {
        let schema = schema();
        let mut fam = Structure::record(&schema, &Xref::from_external(XrefCategory::Family, "@F1@"))
            .unwrap()
            .with_child(Structure::new(&schema, "NCHI", nchi).unwrap());
        for note in &notes {
            fam.push(Structure::new(&schema, "NOTE", note.as_str()).unwrap());
        }
        prop_assert_eq!(fam.render(0).unwrap(), fam.render(0).unwrap());
    }

    /// Property: a multi-line note renders one CONT line per extra segment and
    /// parses back to the exact text.
    #[test]
    fn prop_continuation_roundtrip(segments in prop::collection::vec(segment(), 1..6)) {
        let schema = schema();
        let text = segments.join("\n");
        let indi = Structure::record(&schema, &Xref::from_external(XrefCategory::Individual, "@I1@"))
            .unwrap()
            .with_child(Structure::new(&schema, "NOTE", text.as_str()).unwrap());
        let rendered = indi.render(0).unwrap();
        prop_assert_eq!(
            rendered.lines().filter(|l| l.starts_with("2 CONT")).count(),
            segments.len() - 1
        );

        let document = format!("0 HEAD\n{}0 TRLR", rendered);
        let records = split_records(&document, &ParseOptions::default()).unwrap();
        let note = &records[1].lines()[1];
        prop_assert_eq!(note.text().unwrap_or_default(), text);
    }

    /// Property: text starting with '@' is always written with it doubled.
    #[test]
    fn prop_at_sign_escaped(rest in "[A-Za-z0-9 ]{0,20}") {
        let text = format!("@{}", rest.trim_end());
        let rendered = Structure::new(&schema(), "NOTE", text.as_str()).unwrap().render(1).unwrap();
        prop_assert_eq!(rendered, format!("1 NOTE @{}\n", text));
    }
}
