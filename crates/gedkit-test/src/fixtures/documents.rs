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

//! Document text fixtures.
//!
//! Every document here is in canonical form: loading and re-rendering it
//! reproduces the text exactly.

/// Header and trailer only.
pub fn minimal() -> &'static str {
    "0 HEAD\n1 GEDC\n2 VERS 7.0\n0 TRLR"
}

/// A header exercising most header substructures.
pub fn rich_header() -> &'static str {
    "0 HEAD\n\
     1 GEDC\n\
     2 VERS 7.0\n\
     1 SCHMA\n\
     2 TAG _LOC https://example.com/gedcom/_LOC\n\
     2 TAG _SKYPEID http://xmlns.com/foaf/0.1/skypeID\n\
     1 SOUR GEDKIT\n\
     2 VERS 1.0\n\
     2 NAME gedkit\n\
     2 CORP Dweve\n\
     3 WWW https://dweve.com\n\
     1 DEST ANSTFILE\n\
     1 DATE 19 OCT 2025\n\
     2 TIME 12:30:00Z\n\
     1 LANG en-US\n\
     1 PLAC\n\
     2 FORM City, County, State, Country\n\
     0 TRLR"
}

/// Three individuals and the family joining them.
pub fn family() -> &'static str {
    "0 HEAD\n\
     1 GEDC\n\
     2 VERS 7.0\n\
     0 @I1@ INDI\n\
     1 NAME John /Smith/\n\
     2 GIVN John\n\
     2 SURN Smith\n\
     1 SEX M\n\
     1 BIRT\n\
     2 DATE 6 APR 1952\n\
     2 PLAC Amsterdam, Noord-Holland, Netherlands\n\
     3 MAP\n\
     4 LATI N52.3676\n\
     4 LONG E4.9041\n\
     1 NO DIV\n\
     2 DATE FROM 1976 TO 2001\n\
     1 FAMS @F1@\n\
     0 @I2@ INDI\n\
     1 NAME Mary /Jones/\n\
     1 SEX F\n\
     1 DEAT Y\n\
     2 DATE BEF 2010\n\
     2 AGE > 50y 3m\n\
     1 FAMS @F1@\n\
     0 @I3@ INDI\n\
     1 NAME Peter /Smith/\n\
     1 SEX M\n\
     1 BIRT Y\n\
     2 DATE ABT 1980\n\
     1 FAMC @F1@\n\
     0 @F1@ FAM\n\
     1 HUSB @I1@\n\
     1 WIFE @I2@\n\
     1 CHIL @I3@\n\
     2 PHRASE eldest son\n\
     1 NCHI 1\n\
     1 MARR\n\
     2 DATE BET 1975 AND 1976\n\
     0 TRLR"
}

/// Sources, shared notes and the other record kinds, with multi-line and
/// escaped text.
pub fn sources_and_notes() -> &'static str {
    "0 HEAD\n\
     1 GEDC\n\
     2 VERS 7.0\n\
     1 SUBM @U1@\n\
     0 @U1@ SUBM\n\
     1 NAME Jane Researcher\n\
     1 EMAIL jane@example.com\n\
     0 @R1@ REPO\n\
     1 NAME City archive\n\
     1 WWW https://archive.example.com\n\
     0 @S1@ SOUR\n\
     1 TITL Parish register\n\
     1 TEXT Baptisms, 1840-1860\n\
     2 CONT continued on the next page\n\
     1 REPO @R1@\n\
     1 SNOTE @N1@\n\
     0 @N1@ SNOTE Transcribed by hand.\n\
     1 CONT @@ signs are doubled.\n\
     1 CONT\n\
     1 LANG en\n\
     0 @O1@ OBJE\n\
     1 RESN LOCKED, PRIVACY\n\
     1 FILE photos/family.jpg\n\
     2 FORM image/jpeg\n\
     2 TITL Family portrait\n\
     0 @I1@ INDI\n\
     1 NOTE @@home is where the heart is\n\
     2 SOUR @S1@\n\
     3 PAGE folio 12\n\
     1 OBJE @O1@\n\
     1 CHAN\n\
     2 DATE 1 JAN 2024\n\
     0 TRLR"
}

/// Records without identifiers and pointers to nothing.
pub fn void_records() -> &'static str {
    "0 HEAD\n\
     1 GEDC\n\
     2 VERS 7.0\n\
     0 FAM\n\
     1 HUSB @VOID@\n\
     0 FAM\n\
     1 WIFE @VOID@\n\
     2 PHRASE unknown mother\n\
     0 TRLR"
}
