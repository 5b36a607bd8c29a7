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

//! Payload values and the payload-type contract.

use crate::date;
use crate::error::{GedError, GedResult};
use crate::xref::{Xref, XrefCategory};

const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
const XSD_NON_NEGATIVE: &str = "http://www.w3.org/2001/XMLSchema#nonNegativeInteger";
const XSD_LANGUAGE: &str = "http://www.w3.org/2001/XMLSchema#Language";
const DCAT_MEDIA_TYPE: &str = "http://www.w3.org/ns/dcat#mediaType";
const Y_OR_NULL: &str = "Y|<NULL>";
const G7: &str = "https://gedcom.io/terms/v7/";

/// The value carried on a structure line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Payload {
    #[default]
    None,
    Text(String),
    Int(i64),
    Xref(Xref),
}

impl Payload {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_xref(&self) -> Option<&Xref> {
        match self {
            Self::Xref(x) => Some(x),
            _ => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    fn describe(&self) -> String {
        match self {
            Self::None => "nothing".to_string(),
            Self::Text(s) => format!("text {:?}", s),
            Self::Int(n) => format!("the integer {}", n),
            Self::Xref(x) => format!("the {} identifier {}", x.category(), x.name()),
        }
    }
}

impl From<&str> for Payload {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Payload {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for Payload {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<Xref> for Payload {
    fn from(x: Xref) -> Self {
        Self::Xref(x)
    }
}

impl From<&Xref> for Payload {
    fn from(x: &Xref) -> Self {
        Self::Xref(x.clone())
    }
}

/// Declared payload type of a structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadType {
    /// No payload is declared.
    None,
    Text,
    ListText,
    YOrNull,
    NonNegativeInteger,
    Enum,
    ListEnum,
    Xref(XrefCategory),
    DateExact,
    /// A date value: a date, a period, a range or an approximation.
    Date,
    DatePeriod,
    Time,
    Age,
    Language,
    MediaType,
    FilePath,
    Name,
    Latitude,
    Longitude,
}

impl PayloadType {
    /// Resolve a schema payload descriptor.
    ///
    /// Geographic coordinates are plain strings in the schema; the `LATI` and
    /// `LONG` keys select the coordinate types.
    pub fn from_descriptor(descriptor: Option<&str>, key: &str) -> GedResult<Self> {
        let descriptor = match descriptor {
            None | Some("") => return Ok(Self::None),
            Some(d) => d,
        };

        if let Some(record) = descriptor
            .strip_prefix("@<")
            .and_then(|d| d.strip_suffix(">@"))
        {
            let tag = record
                .strip_prefix(G7)
                .and_then(|r| r.strip_prefix("record-"))
                .ok_or_else(|| GedError::schema(format!("unknown pointer payload {}", descriptor)))?;
            let category = XrefCategory::from_tag(tag)
                .ok_or_else(|| GedError::schema(format!("unknown record type {}", tag)))?;
            return Ok(Self::Xref(category));
        }

        let payload = match descriptor {
            XSD_STRING => match key {
                "LATI" => Self::Latitude,
                "LONG" => Self::Longitude,
                _ => Self::Text,
            },
            Y_OR_NULL => Self::YOrNull,
            XSD_NON_NEGATIVE => Self::NonNegativeInteger,
            XSD_LANGUAGE => Self::Language,
            DCAT_MEDIA_TYPE => Self::MediaType,
            other => match other.strip_prefix(G7) {
                Some("type-Enum") => Self::Enum,
                Some("type-List#Enum") => Self::ListEnum,
                Some("type-List#Text") => Self::ListText,
                Some("type-Date") => Self::Date,
                Some("type-Date#exact") => Self::DateExact,
                Some("type-Date#period") => Self::DatePeriod,
                Some("type-Time") => Self::Time,
                Some("type-Age") => Self::Age,
                Some("type-FilePath") => Self::FilePath,
                Some("type-Name") => Self::Name,
                _ => {
                    return Err(GedError::schema(format!(
                        "unknown payload descriptor {} for {}",
                        descriptor, key
                    )))
                }
            },
        };
        Ok(payload)
    }

    pub fn is_enum(self) -> bool {
        matches!(self, Self::Enum | Self::ListEnum)
    }

    /// Check `payload` against this type. `allowed` holds the enumeration
    /// tokens for enumerated types.
    pub fn check(self, key: &str, payload: &Payload, allowed: &[String]) -> GedResult<()> {
        match self {
            Self::None => Ok(()),
            Self::Text | Self::ListText | Self::FilePath | Self::Name => match payload {
                Payload::None | Payload::Text(_) => Ok(()),
                other => Err(wrong(key, "text", other)),
            },
            Self::Language => match payload {
                Payload::None => Ok(()),
                Payload::Text(s) if s.is_empty() => Ok(()),
                Payload::Text(s) => date::validate_language(s),
                other => Err(wrong(key, "a language tag", other)),
            },
            Self::YOrNull => match payload {
                Payload::None => Ok(()),
                Payload::Text(s) if s.is_empty() || s == "Y" => Ok(()),
                Payload::Text(s) => Err(GedError::NotYOrEmpty {
                    key: key.to_string(),
                    value: s.clone(),
                }),
                other => Err(wrong(key, "\"Y\" or nothing", other)),
            },
            Self::NonNegativeInteger => match payload {
                Payload::Int(n) if *n >= 0 => Ok(()),
                Payload::Int(n) => Err(GedError::NegativeInteger {
                    key: key.to_string(),
                    value: *n,
                }),
                other => Err(wrong(key, "an integer", other)),
            },
            Self::Enum => {
                let value = require_text(key, payload, "an enumeration value")?;
                check_token(key, value, allowed)
            }
            Self::ListEnum => {
                let value = require_text(key, payload, "a list of enumeration values")?;
                value
                    .split(',')
                    .try_for_each(|token| check_token(key, token, allowed))
            }
            Self::Xref(category) => match payload {
                Payload::Xref(x) if x.category() == category => Ok(()),
                _ => Err(GedError::WrongXrefType {
                    expected: category,
                    key: key.to_string(),
                }),
            },
            Self::DateExact => date::validate_exact(require_text(key, payload, "an exact date")?),
            Self::Date => match payload {
                Payload::None => Ok(()),
                Payload::Text(s) => date::validate_date_value(s),
                other => Err(wrong(key, "a date", other)),
            },
            Self::DatePeriod => match payload {
                Payload::None => Ok(()),
                Payload::Text(s) => date::validate_period(s),
                other => Err(wrong(key, "a date period", other)),
            },
            Self::Time => date::validate_time(require_text(key, payload, "a time")?),
            Self::Age => date::validate_age(require_text(key, payload, "an age")?),
            Self::MediaType => {
                let value = require_text(key, payload, "a media type")?;
                match value.split_once('/') {
                    Some((kind, sub)) if !kind.trim().is_empty() && !sub.trim().is_empty() => {
                        Ok(())
                    }
                    _ => Err(GedError::InvalidMediaType {
                        value: value.to_string(),
                    }),
                }
            }
            Self::Latitude => {
                check_coordinate(require_text(key, payload, "a latitude")?, ['N', 'S'], 90)
            }
            Self::Longitude => {
                check_coordinate(require_text(key, payload, "a longitude")?, ['E', 'W'], 180)
            }
        }
    }
}

fn wrong(key: &str, expected: &str, found: &Payload) -> GedError {
    GedError::WrongPayloadType {
        key: key.to_string(),
        expected: expected.to_string(),
        found: found.describe(),
    }
}

fn require_text<'a>(key: &str, payload: &'a Payload, expected: &str) -> GedResult<&'a str> {
    payload
        .as_text()
        .ok_or_else(|| wrong(key, expected, payload))
}

fn check_token(key: &str, token: &str, allowed: &[String]) -> GedResult<()> {
    let token = token.trim().to_uppercase();
    if allowed.iter().any(|a| *a == token) {
        Ok(())
    } else {
        Err(GedError::NotValidEnum {
            token,
            allowed: allowed.to_vec(),
            key: key.to_string(),
        })
    }
}

/// Hemisphere letter followed by a number within `limit` degrees.
fn check_coordinate(value: &str, hemispheres: [char; 2], limit: i32) -> GedResult<()> {
    let mut chars = value.chars();
    match chars.next() {
        Some(c) if hemispheres.contains(&c) => {}
        _ => {
            return Err(GedError::Hemisphere {
                value: value.to_string(),
                expected: format!("{} or {}", hemispheres[0], hemispheres[1]),
            })
        }
    }
    // An unreadable number is out of range like any other.
    let in_range = chars
        .as_str()
        .parse::<f64>()
        .map_or(false, |degrees| degrees.abs() <= f64::from(limit));
    if !in_range {
        return Err(GedError::CoordinateRange {
            value: value.to_string(),
            low: -limit,
            high: limit,
        });
    }
    Ok(())
}
