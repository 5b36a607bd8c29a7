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

//! Invalid documents for error-path testing.

use gedkit_core::GedErrorKind;

/// Documents that fail to split or load, as `(name, text, kind)`.
pub fn invalid_ged_samples() -> Vec<(&'static str, &'static str, GedErrorKind)> {
    vec![
        ("empty", "", GedErrorKind::Document),
        ("no_trailer", "0 HEAD\n1 GEDC\n2 VERS 7.0\n", GedErrorKind::Document),
        ("no_header", "0 @I1@ INDI\n0 TRLR", GedErrorKind::Document),
        ("header_after_trailer", "0 TRLR\n0 HEAD", GedErrorKind::Document),
        (
            "missing_level",
            "0 HEAD\nGEDC\n0 TRLR",
            GedErrorKind::Document,
        ),
        (
            "double_space",
            "0 HEAD\n1  GEDC\n0 TRLR",
            GedErrorKind::Document,
        ),
        (
            "level_jump",
            "0 HEAD\n2 GEDC\n0 TRLR",
            GedErrorKind::Document,
        ),
        (
            "orphan_continuation",
            "0 HEAD\n1 GEDC\n3 CONT lost\n0 TRLR",
            GedErrorKind::Document,
        ),
        (
            "bare_carriage_return",
            "0 HEAD\r1 GEDC\n0 TRLR",
            GedErrorKind::Document,
        ),
        (
            "unknown_record",
            "0 HEAD\n1 GEDC\n2 VERS 7.0\n0 @X1@ WHAT\n0 TRLR",
            GedErrorKind::Document,
        ),
        (
            "duplicate_identifier",
            "0 HEAD\n1 GEDC\n2 VERS 7.0\n0 @X@ INDI\n0 @X@ SOUR\n0 TRLR",
            GedErrorKind::Identifier,
        ),
    ]
}

/// Documents that load but cannot be reconstructed or re-rendered, as
/// `(name, text, kind)`.
pub fn invalid_content_samples() -> Vec<(&'static str, &'static str, GedErrorKind)> {
    vec![
        (
            "unknown_substructure",
            "0 HEAD\n1 GEDC\n2 VERS 7.0\n0 @I1@ INDI\n1 CHIL @I2@\n0 TRLR",
            GedErrorKind::Schema,
        ),
        (
            "missing_version",
            "0 HEAD\n1 GEDC\n0 TRLR",
            GedErrorKind::Schema,
        ),
        (
            "two_sexes",
            "0 HEAD\n1 GEDC\n2 VERS 7.0\n0 @I1@ INDI\n1 SEX M\n1 SEX F\n0 TRLR",
            GedErrorKind::Schema,
        ),
        (
            "bad_enum",
            "0 HEAD\n1 GEDC\n2 VERS 7.0\n0 @I1@ INDI\n1 SEX Q\n0 TRLR",
            GedErrorKind::Payload,
        ),
        (
            "bad_date",
            "0 HEAD\n1 GEDC\n2 VERS 7.0\n0 @I1@ INDI\n1 BIRT\n2 DATE 31 FEB 1900\n0 TRLR",
            GedErrorKind::Payload,
        ),
        (
            "bad_flag",
            "0 HEAD\n1 GEDC\n2 VERS 7.0\n0 @I1@ INDI\n1 DEAT N\n0 TRLR",
            GedErrorKind::Payload,
        ),
        (
            "bad_latitude",
            "0 HEAD\n1 GEDC\n2 VERS 7.0\n0 @I1@ INDI\n1 BIRT\n2 PLAC Nowhere\n3 MAP\n4 LATI X91\n4 LONG E0\n0 TRLR",
            GedErrorKind::Payload,
        ),
        (
            "text_for_pointer",
            "0 HEAD\n1 GEDC\n2 VERS 7.0\n0 @F1@ FAM\n1 HUSB John\n0 TRLR",
            GedErrorKind::Identifier,
        ),
        (
            "source_note_cycle",
            "0 HEAD\n1 GEDC\n2 VERS 7.0\n0 @S1@ SOUR\n1 SNOTE @N1@\n0 @N1@ SNOTE text\n1 SOUR @S1@\n0 TRLR",
            GedErrorKind::Identifier,
        ),
    ]
}
