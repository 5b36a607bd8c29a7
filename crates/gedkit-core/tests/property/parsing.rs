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

//! Property-based tests for splitting rendered documents.

use super::schema;
use gedkit_core::{split, Genealogy, ParseOptions, Structure};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: a rendered document splits into exactly the rendered
    /// records, header first.
    #[test]
    fn prop_split_rendered_document(
        people in prop::collection::vec(("[A-Z][a-z]{1,8}", prop::option::of("[a-z ]{1,20}")), 0..8),
    ) {
        let schema = schema();
        let mut ged = Genealogy::new(schema.clone());
        let header = Structure::header(&schema, "7.0").unwrap();
        let mut expected = vec![header.render(0).unwrap()];
        ged.stage(header).unwrap();

        for (name, note) in &people {
            let xref = ged.individual_xref(None).unwrap();
            let mut record = Structure::record(&schema, &xref)
                .unwrap()
                .with_child(Structure::new(&schema, "INDI-NAME", name.as_str()).unwrap());
            if let Some(note) = note {
                let text = format!("{}\nmore", note.trim());
                record.push(Structure::new(&schema, "NOTE", text.as_str()).unwrap());
            }
            expected.push(record.render(0).unwrap());
            ged.stage(record).unwrap();
        }

        let document = ged.render_document().unwrap();
        let records = split(&document).unwrap();
        prop_assert_eq!(records.len(), people.len() + 1);

        // Split records are the rendered records with continuations folded.
        for (got, rendered) in records.iter().zip(&expected) {
            let folded = rendered.trim_end_matches('\n').replace("\n2 CONT ", "\n").replace("\n2 CONT", "\n");
            prop_assert_eq!(got, &folded);
        }
    }

    /// Property: loading a rendered document and rendering it again is stable.
    #[test]
    fn prop_load_render_fixpoint(count in 0_usize..6, sexes in prop::collection::vec("[MFXU]", 6)) {
        let schema = schema();
        let mut ged = Genealogy::new(schema.clone());
        ged.stage(Structure::header(&schema, "7.0").unwrap()).unwrap();
        for sex in sexes.iter().take(count) {
            let xref = ged.individual_xref(None).unwrap();
            ged.stage(
                Structure::record(&schema, &xref)
                    .unwrap()
                    .with_child(Structure::new(&schema, "SEX", sex.as_str()).unwrap()),
            )
            .unwrap();
        }
        let first = ged.render_document().unwrap();

        let mut loaded = Genealogy::from_ged(&first, schema, &ParseOptions::default()).unwrap();
        loaded.stage_loaded().unwrap();
        prop_assert_eq!(loaded.render_document().unwrap(), first);
    }
}
