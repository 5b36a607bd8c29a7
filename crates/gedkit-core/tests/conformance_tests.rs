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

//! GEDCOM document conformance tests.
//!
//! Scenario-level checks of the identifier system, validation, rendering,
//! splitting and the document builder, through the public API only.

use gedkit_core::{
    split, split_records, GedError, GedErrorKind, Genealogy, Limits, ParseOptions, SchemaTable,
    Structure, Xref, XrefCategory,
};
use gedkit_test::fixtures;
use std::collections::BTreeMap;
use std::sync::Arc;

fn schema() -> Arc<SchemaTable> {
    Arc::new(SchemaTable::gedcom7().unwrap())
}

fn header(schema: &SchemaTable) -> Structure {
    Structure::header(schema, "7.0").unwrap()
}

// =============================================================================
// Document scenarios
// =============================================================================

/// A header holding only the version renders with GEDC/VERS nested, then the trailer.
#[test]
fn test_minimal_document() {
    let schema = schema();
    let mut ged = Genealogy::new(schema.clone());
    ged.stage(header(&schema)).unwrap();
    let text = ged.render_document().unwrap();
    assert_eq!(text, "0 HEAD\n1 GEDC\n2 VERS 7.0\n0 TRLR");
    assert_eq!(text.lines().count(), 4);
}

/// Giving the same family record to `collect` twice fails with DuplicateRecord.
#[test]
fn test_duplicate_record_rejected() {
    let schema = schema();
    let mut ged = Genealogy::new(schema.clone());
    let fam = ged.family_xref(None).unwrap();
    let record = Structure::record(&schema, &fam).unwrap();
    let err = ged
        .collect(XrefCategory::Family, &[record.clone(), record])
        .unwrap_err();
    assert_eq!(
        err,
        GedError::DuplicateRecord {
            xref: fam.name().to_string()
        }
    );
    assert_eq!(err.kind(), GedErrorKind::Identifier);
}

/// A source and a shared note that reference each other fail to render.
#[test]
fn test_circular_shared_note_source() {
    let schema = schema();
    let mut ged = Genealogy::new(schema.clone());
    let source = ged.source_xref(None).unwrap();
    let note = ged.shared_note_xref(None, "see the source").unwrap();

    ged.stage(header(&schema)).unwrap();
    ged.stage(
        Structure::record(&schema, &source)
            .unwrap()
            .with_child(Structure::new(&schema, "SNOTE", &note).unwrap()),
    )
    .unwrap();
    ged.stage(
        Structure::record(&schema, &note)
            .unwrap()
            .with_child(Structure::new(&schema, "SOUR", &source).unwrap()),
    )
    .unwrap();

    assert!(matches!(
        ged.render_document(),
        Err(GedError::CircularReference { .. })
    ));
}

/// The cycle is found whichever of the two records is staged first.
#[test]
fn test_circular_reference_note_first() {
    let schema = schema();
    let mut ged = Genealogy::new(schema.clone());
    let source = ged.source_xref(Some("S1")).unwrap();
    let note = ged.shared_note_xref(Some("N1"), "text").unwrap();

    let note_record = Structure::record(&schema, &note)
        .unwrap()
        .with_child(Structure::new(&schema, "SOUR", &source).unwrap());
    let source_record = Structure::record(&schema, &source)
        .unwrap()
        .with_child(Structure::new(&schema, "SNOTE", &note).unwrap());

    ged.stage(header(&schema)).unwrap();
    ged.stage(note_record).unwrap();
    ged.stage(source_record).unwrap();
    assert_eq!(
        ged.render_document().unwrap_err(),
        GedError::CircularReference {
            target: "@N1@".to_string(),
            record: "@S1@".to_string()
        }
    );
}

/// Every allocated family must be handed to `collect`.
#[test]
fn test_collect_reports_all_missing() {
    let schema = schema();
    let mut ged = Genealogy::new(schema.clone());
    ged.family_xref(Some("A")).unwrap();
    ged.family_xref(Some("B")).unwrap();
    let err = ged.collect(XrefCategory::Family, &[]).unwrap_err();
    assert_eq!(
        err,
        GedError::MissingRecord {
            missing: vec!["@A@".to_string(), "@B@".to_string()]
        }
    );
}

/// A later `collect` replaces the earlier fragment.
#[test]
fn test_collect_replaces_fragment() {
    let schema = schema();
    let mut ged = Genealogy::new(schema.clone());
    let indi = ged.individual_xref(Some("I1")).unwrap();
    let plain = Structure::record(&schema, &indi).unwrap();
    let with_sex = plain
        .clone()
        .with_child(Structure::new(&schema, "SEX", "f").unwrap());

    ged.collect(XrefCategory::Individual, &[plain]).unwrap();
    assert_eq!(ged.fragment(XrefCategory::Individual), Some("0 @I1@ INDI\n"));
    ged.collect(XrefCategory::Individual, &[with_sex]).unwrap();
    assert_eq!(
        ged.fragment(XrefCategory::Individual),
        Some("0 @I1@ INDI\n1 SEX F\n")
    );
}

/// A source and shared note collected into separate fragments still form a
/// cycle.
#[test]
fn test_collect_cycle_between_fragments() {
    let schema = schema();
    let mut ged = Genealogy::new(schema.clone());
    let source = ged.source_xref(None).unwrap();
    let note = ged.shared_note_xref(None, "see the source").unwrap();
    let source_record = Structure::record(&schema, &source)
        .unwrap()
        .with_child(Structure::new(&schema, "SNOTE", &note).unwrap());
    let note_record = Structure::record(&schema, &note)
        .unwrap()
        .with_child(Structure::new(&schema, "SOUR", &source).unwrap());

    ged.collect(XrefCategory::Source, &[source_record]).unwrap();
    let err = ged
        .collect(XrefCategory::SharedNote, &[note_record])
        .unwrap_err();
    assert_eq!(
        err,
        GedError::CircularReference {
            target: "@1@".to_string(),
            record: "@2@".to_string()
        }
    );
    assert_eq!(err.kind(), GedErrorKind::Identifier);
}

/// Rendering is repeatable and reflects later mutation.
#[test]
fn test_render_revalidates_after_mutation() {
    let schema = schema();
    let mut ged = Genealogy::new(schema.clone());
    let mut head = header(&schema);
    ged.stage(head.clone()).unwrap();
    let first = ged.render_document().unwrap();
    assert_eq!(first, ged.render_document().unwrap());

    head.push(Structure::new(&schema, "GEDC", "").unwrap());
    ged.stage(head).unwrap();
    assert!(matches!(
        ged.render_document(),
        Err(GedError::OnlyOnePermitted { .. })
    ));
}

// =============================================================================
// Identifiers
// =============================================================================

/// Allocating a name twice fails, for any category pair.
#[test]
fn test_duplicate_identifier() {
    let mut ged = Genealogy::new(schema());
    ged.individual_xref(Some("smith")).unwrap();
    assert_eq!(
        ged.individual_xref(Some("SMITH")).unwrap_err(),
        GedError::DuplicateIdentifier {
            xref: "@SMITH@".to_string()
        }
    );
    assert!(ged.family_xref(Some("smith")).is_err());
}

/// The void name can be allocated any number of times and is never recorded.
#[test]
fn test_void_allocation() {
    let mut ged = Genealogy::new(schema());
    let a = ged.individual_xref(Some("void")).unwrap();
    let b = ged.individual_xref(Some("VOID")).unwrap();
    assert!(a.is_void() && b.is_void());
    assert!(ged.registry().is_empty());
}

/// Names are normalized and prefixed names carry the counter.
#[test]
fn test_name_forms() {
    let mut ged = Genealogy::new(schema());
    assert_eq!(ged.family_xref(None).unwrap().name(), "@1@");
    assert_eq!(ged.family_xref(Some(" the smiths ")).unwrap().name(), "@THE_SMITHS@");
    let prefixed = ged
        .allocate(XrefCategory::Family, Some("fam"), true, None)
        .unwrap();
    assert_eq!(prefixed.name(), "@FAM2@");
    assert_eq!(
        ged.individual_xref(Some("a-b")).unwrap_err().kind(),
        GedErrorKind::Identifier
    );
}

/// Only shared notes keep allocation text.
#[test]
fn test_shared_note_text() {
    let mut ged = Genealogy::new(schema());
    let note = ged.shared_note_xref(None, "hello").unwrap();
    assert_eq!(note.text(), Some("hello"));
    let source = ged
        .allocate(XrefCategory::Source, None, false, Some("ignored"))
        .unwrap();
    assert_eq!(source.text(), None);
}

/// Independent builders do not share counters.
#[test]
fn test_builders_are_independent() {
    let schema = schema();
    let mut first = Genealogy::new(schema.clone());
    let mut second = Genealogy::new(schema);
    assert_eq!(first.individual_xref(None).unwrap().name(), "@1@");
    assert_eq!(second.individual_xref(None).unwrap().name(), "@1@");
}

// =============================================================================
// Validation
// =============================================================================

/// A child of the wrong kind is reported before a missing required child.
#[test]
fn test_not_permitted() {
    let schema = schema();
    let head = Structure::empty(&schema, "HEAD")
        .unwrap()
        .with_child(Structure::new(&schema, "NCHI", 1i64).unwrap());
    let err = head.validate().unwrap_err();
    assert!(matches!(err, GedError::NotPermitted { ref child, .. } if child == "NCHI"));
    assert_eq!(err.kind(), GedErrorKind::Schema);
}

/// A required child must be present, exactly once is enough.
#[test]
fn test_required_child() {
    let schema = schema();
    let gedc = Structure::empty(&schema, "GEDC").unwrap();
    assert!(matches!(
        gedc.validate(),
        Err(GedError::MissingRequired { .. })
    ));
    let gedc = gedc.with_child(Structure::new(&schema, "GEDC-VERS", "7.0").unwrap());
    assert!(gedc.validate().is_ok());
}

/// Integer payloads must not be negative.
#[test]
fn test_negative_integer() {
    let node = Structure::new(&schema(), "NCHI", -1i64).unwrap();
    assert!(matches!(
        node.validate(),
        Err(GedError::NegativeInteger { value: -1, .. })
    ));
}

/// Text where an integer is expected is a payload type error.
#[test]
fn test_text_for_integer() {
    let node = Structure::new(&schema(), "NCHI", "two").unwrap();
    assert_eq!(node.validate().unwrap_err().kind(), GedErrorKind::Payload);
}

/// "Y" and nothing are the only flag values.
#[test]
fn test_y_or_empty() {
    let schema = schema();
    assert!(Structure::new(&schema, "DEAT", "Y").unwrap().validate().is_ok());
    assert!(Structure::empty(&schema, "DEAT").unwrap().validate().is_ok());
    assert!(matches!(
        Structure::new(&schema, "DEAT", "yes").unwrap().validate(),
        Err(GedError::NotYOrEmpty { .. })
    ));
}

/// List enumerations name the first token outside the set.
#[test]
fn test_enum_list() {
    let schema = schema();
    assert!(Structure::new(&schema, "RESN", "CONFIDENTIAL, LOCKED")
        .unwrap()
        .validate()
        .is_ok());
    let err = Structure::new(&schema, "RESN", "LOCKED, SECRET")
        .unwrap()
        .validate()
        .unwrap_err();
    assert!(matches!(err, GedError::NotValidEnum { ref token, .. } if token == "SECRET"));
}

/// Pointers must be of the category the structure expects.
#[test]
fn test_wrong_xref_type() {
    let schema = schema();
    let fam = Xref::from_external(XrefCategory::Family, "@F1@");
    let err = Structure::new(&schema, "HUSB", &fam)
        .unwrap()
        .validate()
        .unwrap_err();
    assert_eq!(
        err,
        GedError::WrongXrefType {
            expected: XrefCategory::Individual,
            key: "HUSB".to_string()
        }
    );
}

/// Exact dates are leap-year aware and Gregorian only.
#[test]
fn test_exact_dates() {
    let schema = schema();
    let exact = |value: &str| Structure::new(&schema, "DATE-exact", value).unwrap().validate();
    assert!(exact("29 FEB 2000").is_ok());
    assert!(exact("29 FEB 1900").is_err());
    assert!(exact("1 JAN 0").is_err());
    assert!(exact("JAN 2000").is_err());
    assert!(exact("1 VEND 2000").is_err());
}

/// General dates accept calendars, epochs, ranges and approximations.
#[test]
fn test_general_dates() {
    let schema = schema();
    let date = |value: &str| Structure::new(&schema, "DATE", value).unwrap().validate();
    for ok in [
        "2000",
        "MAR 2000",
        "12 MAR 2000",
        "JULIAN 5 OCT 1582",
        "HEBREW 1 TSH 5784",
        "FRENCH_R COMP 11",
        "44 BCE",
        "BET 1900 AND 1910",
        "FROM JAN 1900 TO 1910",
        "ABT 1850",
        "_MAYAN 13 BAKTUN 0",
    ] {
        assert!(date(ok).is_ok(), "{} should validate", ok);
    }
    assert!(matches!(date("MARS 2000"), Err(GedError::UnknownMonth { .. })));
    assert!(matches!(date("GREGORIAN 1 JAN 10 AD"), Err(GedError::UnknownEpoch { .. })));
    assert!(matches!(date("BET 1900"), Err(GedError::InvalidDate { .. })));
}

/// Coordinates check the hemisphere letter, then the range.
#[test]
fn test_coordinates() {
    let schema = schema();
    let lati = |value: &str| Structure::new(&schema, "LATI", value).unwrap().validate();
    let long = |value: &str| Structure::new(&schema, "LONG", value).unwrap().validate();
    assert!(lati("N90.0").is_ok());
    assert!(matches!(lati("N90.1"), Err(GedError::CoordinateRange { .. })));
    assert!(matches!(lati("A10.0"), Err(GedError::Hemisphere { .. })));
    assert!(matches!(lati("N"), Err(GedError::CoordinateRange { .. })));
    assert!(long("W180").is_ok());
    assert!(matches!(long("N10"), Err(GedError::Hemisphere { .. })));
}

/// Media types need a slash.
#[test]
fn test_media_type() {
    let schema = schema();
    assert!(Structure::new(&schema, "MIME", "text/html").unwrap().validate().is_ok());
    assert!(matches!(
        Structure::new(&schema, "MIME", "html").unwrap().validate(),
        Err(GedError::InvalidMediaType { .. })
    ));
}

// =============================================================================
// Rendering
// =============================================================================

/// Records render at level 0 whatever level they are given.
#[test]
fn test_record_level_forced() {
    let schema = schema();
    let xref = Xref::from_external(XrefCategory::Repository, "@R1@");
    let repo = Structure::record(&schema, &xref)
        .unwrap()
        .with_child(Structure::new(&schema, "NAME", "Archive").unwrap());
    assert_eq!(repo.render(4).unwrap(), "0 @R1@ REPO\n1 NAME Archive\n");
}

/// Each continuation segment is escaped on its own.
#[test]
fn test_escape_per_segment() {
    let node = Structure::new(&schema(), "NOTE", "@a\n@b\nc@").unwrap();
    assert_eq!(
        node.render(0).unwrap(),
        "0 NOTE @@a\n1 CONT @@b\n1 CONT c@\n"
    );
}

/// Invalid trees never render.
#[test]
fn test_render_validates() {
    let node = Structure::new(&schema(), "SEX", "Q").unwrap();
    assert!(matches!(node.render(1), Err(GedError::NotValidEnum { .. })));
}

// =============================================================================
// Splitting
// =============================================================================

/// Text around the header and trailer is discarded.
#[test]
fn test_split_discards_outside_text() {
    let text = "garbage\n0 HEAD\n1 GEDC\n2 VERS 7.0\n0 @I1@ INDI\n1 NOTE a\n2 CONT b\n0 TRLR\nmore garbage";
    let records = split(text).unwrap();
    assert_eq!(
        records,
        vec![
            "0 HEAD\n1 GEDC\n2 VERS 7.0".to_string(),
            "0 @I1@ INDI\n1 NOTE a\nb".to_string(),
        ]
    );
}

/// Missing markers are reported trailer first.
#[test]
fn test_split_markers() {
    assert_eq!(split("0 HEAD\n").unwrap_err(), GedError::MissingTrailerMarker);
    assert_eq!(split("0 TRLR\n").unwrap_err(), GedError::MissingHeaderMarker);
    assert!(matches!(
        split("0 HEAD\nx\n0 TRLR"),
        Err(GedError::MalformedLine { line: 2, .. })
    ));
}

/// Continuation text that looks like a record line stays in its record.
#[test]
fn test_continuation_never_splits() {
    let text = "0 HEAD\n1 NOTE first\n2 CONT 0 @X@ INDI\n0 TRLR";
    let records = split(text).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0], "0 HEAD\n1 NOTE first\n0 @X@ INDI");
}

/// CRLF input and a byte order mark are accepted.
#[test]
fn test_split_crlf_and_bom() {
    let text = "\u{FEFF}0 HEAD\r\n1 GEDC\r\n2 VERS 7.0\r\n0 TRLR\r\n";
    assert_eq!(split(text).unwrap(), vec!["0 HEAD\n1 GEDC\n2 VERS 7.0".to_string()]);
}

/// Level jumps are rejected unless strict levels are off.
#[test]
fn test_level_jump_option() {
    let text = "0 HEAD\n2 GEDC\n0 TRLR";
    assert!(matches!(
        split_records(text, &ParseOptions::default()),
        Err(GedError::LevelJump { line: 2, previous: 0, found: 2 })
    ));
    let lenient = ParseOptions::builder().strict_levels(false).build();
    assert_eq!(split_records(text, &lenient).unwrap().len(), 1);
}

/// Limits bound record count and nesting depth.
#[test]
fn test_limits() {
    let text = "0 HEAD\n0 @I1@ INDI\n0 @I2@ INDI\n0 TRLR";
    let options = ParseOptions::builder().max_records(2).build();
    assert!(matches!(
        split_records(text, &options),
        Err(GedError::LimitExceeded { limit: "record count", .. })
    ));
    let deep = ParseOptions::builder().max_level(1).build();
    assert!(split_records("0 HEAD\n1 GEDC\n2 VERS 7.0\n0 TRLR", &deep).is_err());
    let unlimited = ParseOptions::builder().limits(Limits::unlimited()).build();
    assert_eq!(split_records(text, &unlimited).unwrap().len(), 3);
}

// =============================================================================
// Extensions
// =============================================================================

const TASK_EXTENSION: &str = "\
type: structure
uri: https://example.com/terms/_TASK
substructures:
  \"https://gedcom.io/terms/v7/NOTE\": \"{0:M}\"
";

/// An extension without superstructures is a record type of its own.
#[test]
fn test_extension_record_document() {
    let mut table = SchemaTable::gedcom7().unwrap();
    table.register_extension("TASK", TASK_EXTENSION).unwrap();
    let schema = Arc::new(table);

    let mut ged = Genealogy::new(schema.clone());
    let task = ged.extension_xref("_TASK", Some("T1")).unwrap();
    ged.stage(header(&schema)).unwrap();
    ged.stage(
        Structure::record(&schema, &task)
            .unwrap()
            .with_child(Structure::new(&schema, "NOTE", "call the archive").unwrap()),
    )
    .unwrap();
    let text = ged.render_document().unwrap();
    assert_eq!(
        text,
        "0 HEAD\n1 GEDC\n2 VERS 7.0\n0 @T1@ _TASK\n1 NOTE call the archive\n0 TRLR"
    );

    let loaded = Genealogy::from_ged(&text, schema, &ParseOptions::default()).unwrap();
    assert_eq!(loaded.record_counts()[&XrefCategory::Extension], 1);
}

// =============================================================================
// Fixture documents
// =============================================================================

/// Every fixture splits into the records the loader names, header first.
#[test]
fn test_fixture_split_matches_loader() {
    for (name, fixture) in fixtures::all() {
        let text = fixture();
        let records = split(text).unwrap();
        let ged = Genealogy::from_ged(text, schema(), &ParseOptions::default()).unwrap();
        assert_eq!(records.len(), ged.loaded_records().len(), "fixture {}", name);
        assert!(records[0].starts_with("0 HEAD"), "fixture {}", name);
    }
}

/// Collecting a fixture's records category by category yields the same text
/// as rendering the whole document.
#[test]
fn test_fixture_collect_by_category() {
    for (name, fixture) in fixtures::all() {
        let mut ged = gedkit_test::load(fixture()).unwrap();
        let mut groups: BTreeMap<XrefCategory, Vec<Structure>> = BTreeMap::new();
        for record in ged.records() {
            let category = record.record_xref().unwrap().category();
            groups.entry(category).or_default().push(record.clone());
        }
        for (category, records) in &groups {
            ged.collect(*category, records).unwrap();
        }

        let header = ged.header().unwrap().render(0).unwrap();
        let collected: usize = groups
            .keys()
            .map(|category| ged.fragment(*category).unwrap().len())
            .sum();
        assert_eq!(
            header.len() + collected + "0 TRLR".len(),
            ged.render_document().unwrap().len(),
            "fixture {}",
            name
        );
    }
}
