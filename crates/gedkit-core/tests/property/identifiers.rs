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

//! Property-based tests for identifier allocation.

use super::schema;
use gedkit_core::{GedError, Genealogy, XrefCategory};
use proptest::prelude::*;
use std::collections::HashSet;

fn category() -> impl Strategy<Value = XrefCategory> {
    prop::sample::select(XrefCategory::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Property: allocating the same name twice fails the second time.
    #[test]
    fn prop_second_allocation_fails(name in "[A-Za-z][A-Za-z0-9_]{0,20}", category in category()) {
        prop_assume!(!name.eq_ignore_ascii_case("void"));
        let mut ged = Genealogy::new(schema());
        let first = ged.allocate(category, Some(&name), false, None).unwrap();
        let second = ged.allocate(category, Some(&name), false, None);
        prop_assert_eq!(
            second.unwrap_err(),
            GedError::DuplicateIdentifier { xref: first.name().to_string() }
        );
    }

    /// Property: unnamed and prefixed allocations never collide, even with
    /// explicit names that look like counter output.
    #[test]
    fn prop_generated_names_unique(
        explicit in prop::collection::vec(1_u64..40, 0..10),
        generated in 1_usize..40,
    ) {
        let mut ged = Genealogy::new(schema());
        let mut seen = HashSet::new();
        for n in explicit {
            if let Ok(xref) = ged.individual_xref(Some(&n.to_string())) {
                prop_assert!(seen.insert(xref.name().to_string()));
            }
        }
        for i in 0..generated {
            let xref = if i % 2 == 0 {
                ged.family_xref(None).unwrap()
            } else {
                ged.allocate(XrefCategory::Source, Some("S"), true, None).unwrap()
            };
            prop_assert!(seen.insert(xref.name().to_string()), "{} repeated", xref.name());
        }
        prop_assert_eq!(ged.registry().len(), seen.len());
    }

    /// Property: the void name is always accepted and never recorded.
    #[test]
    fn prop_void_reusable(count in 1_usize..10, category in category()) {
        let mut ged = Genealogy::new(schema());
        for _ in 0..count {
            let xref = ged.allocate(category, Some("void"), false, None).unwrap();
            prop_assert!(xref.is_void());
        }
        prop_assert!(ged.registry().defined(category).is_empty());
    }
}
