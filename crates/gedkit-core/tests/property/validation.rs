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

//! Property-based tests for payload and cardinality validation.

use super::schema;
use gedkit_core::{GedError, Structure};
use proptest::prelude::*;

const RESN: [&str; 3] = ["CONFIDENTIAL", "LOCKED", "PRIVACY"];

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Property: any list of allowed tokens validates, in any case and spacing.
    #[test]
    fn prop_enum_list_allowed(
        picks in prop::collection::vec(0_usize..3, 1..4),
        lower in any::<bool>(),
        spaced in any::<bool>(),
    ) {
        let separator = if spaced { ", " } else { "," };
        let value = picks
            .iter()
            .map(|&i| if lower { RESN[i].to_lowercase() } else { RESN[i].to_string() })
            .collect::<Vec<_>>()
            .join(separator);
        let node = Structure::new(&schema(), "RESN", value.as_str()).unwrap();
        prop_assert!(node.validate().is_ok(), "{:?} rejected", value);
    }

    /// Property: one unknown token fails the list and is named.
    #[test]
    fn prop_enum_list_violator(pick in 0_usize..3, bad in "[A-Z]{1,8}") {
        prop_assume!(!RESN.contains(&bad.as_str()));
        let value = format!("{}, {}", RESN[pick], bad);
        let err = Structure::new(&schema(), "RESN", value.as_str())
            .unwrap()
            .validate()
            .unwrap_err();
        let is_violator = matches!(err, GedError::NotValidEnum { ref token, .. } if *token == bad);
        prop_assert!(is_violator);
    }

    /// Property: latitudes validate exactly within +-90 degrees.
    #[test]
    fn prop_latitude_range(degrees in -200.0_f64..200.0, north in any::<bool>()) {
        let value = format!("{}{}", if north { 'N' } else { 'S' }, degrees);
        let result = Structure::new(&schema(), "LATI", value.as_str()).unwrap().validate();
        if degrees.abs() <= 90.0 {
            prop_assert!(result.is_ok(), "{} rejected", value);
        } else {
            let out_of_range = matches!(result, Err(GedError::CoordinateRange { .. }));
            prop_assert!(out_of_range);
        }
    }

    /// Property: longitudes need E or W.
    #[test]
    fn prop_longitude_hemisphere(letter in "[A-Z]", degrees in 0.0_f64..180.0) {
        let value = format!("{}{}", letter, degrees);
        let result = Structure::new(&schema(), "LONG", value.as_str()).unwrap().validate();
        if letter == "E" || letter == "W" {
            prop_assert!(result.is_ok());
        } else {
            let wrong_letter = matches!(result, Err(GedError::Hemisphere { .. }));
            prop_assert!(wrong_letter);
        }
    }

    /// Property: a required child must appear; one occurrence suffices, two
    /// break singularity.
    #[test]
    fn prop_required_cardinality(count in 0_usize..3) {
        let schema = schema();
        let mut map = Structure::empty(&schema, "MAP")
            .unwrap()
            .with_child(Structure::new(&schema, "LONG", "E1").unwrap());
        for _ in 0..count {
            map.push(Structure::new(&schema, "LATI", "N1").unwrap());
        }
        match count {
            0 => {
                let missing = matches!(map.validate(), Err(GedError::MissingRequired { .. }));
                prop_assert!(missing);
            }
            1 => prop_assert!(map.validate().is_ok()),
            _ => {
                let repeated = matches!(map.validate(), Err(GedError::OnlyOnePermitted { .. }));
                prop_assert!(repeated);
            }
        }
    }

    /// Property: exact dates validate for every day within the month.
    #[test]
    fn prop_exact_date_days(day in 1_u32..=31, month in 0_usize..12, year in 1_u32..3000) {
        const MONTHS: [&str; 12] = ["JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC"];
        let leap = (year % 4 == 0 && year % 100 != 0) || year % 400 == 0;
        let max = match month {
            1 if leap => 29,
            1 => 28,
            3 | 5 | 8 | 10 => 30,
            _ => 31,
        };
        let value = format!("{} {} {}", day, MONTHS[month], year);
        let result = Structure::new(&schema(), "DATE-exact", value.as_str()).unwrap().validate();
        prop_assert_eq!(result.is_ok(), day <= max, "{}", value);
    }
}
