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

//! Error types for building, validating, parsing and writing documents.

use crate::xref::XrefCategory;
use std::fmt;
use thiserror::Error;

/// The broad class an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GedErrorKind {
    /// The document text or the document assembly is malformed.
    Document,
    /// A structure breaks the schema (legality, cardinality, unknown keys).
    Schema,
    /// A payload does not match its declared payload type.
    Payload,
    /// Identifier allocation, record collection or cross-reference failure.
    Identifier,
}

impl fmt::Display for GedErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Document => write!(f, "DocumentError"),
            Self::Schema => write!(f, "SchemaError"),
            Self::Payload => write!(f, "PayloadError"),
            Self::Identifier => write!(f, "IdentifierError"),
        }
    }
}

/// An error raised anywhere in the toolkit.
///
/// Every variant carries the offending data so callers can report it
/// without re-deriving context.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GedError {
    // ==================== Document ====================
    #[error("the document has no header line \"0 HEAD\"")]
    MissingHeaderMarker,

    #[error("the document has no trailer line \"0 TRLR\"")]
    MissingTrailerMarker,

    #[error("line {line}: {reason}: {text:?}")]
    MalformedLine {
        line: usize,
        text: String,
        reason: String,
    },

    #[error("line {line}: level {found} follows level {previous}")]
    LevelJump {
        line: usize,
        previous: usize,
        found: usize,
    },

    #[error("line {line}: bare carriage return, use LF or CRLF")]
    BareCarriageReturn { line: usize },

    #[error("line {line}: {limit} exceeded (maximum {maximum})")]
    LimitExceeded {
        limit: &'static str,
        maximum: usize,
        line: usize,
    },

    #[error("no header has been staged")]
    MissingHeader,

    #[error("\"{key}\" is neither a record nor the header")]
    NotARecord { key: String },

    // ==================== Schema ====================
    #[error("\"{child}\" is not permitted under \"{parent}\" (permitted: {})", permitted.join(", "))]
    NotPermitted {
        child: String,
        permitted: Vec<String>,
        parent: String,
    },

    #[error("\"{parent}\" requires a \"{missing}\" substructure (required: {})", required.join(", "))]
    MissingRequired {
        missing: String,
        required: Vec<String>,
        parent: String,
    },

    #[error("only one \"{child}\" is permitted under \"{parent}\"")]
    OnlyOnePermitted { child: String, parent: String },

    #[error("the schema has no structure \"{key}\"")]
    UnknownStructure { key: String },

    #[error("line {line}: tag \"{tag}\" is not a substructure of \"{parent}\"")]
    UnknownTag {
        tag: String,
        parent: String,
        line: usize,
    },

    #[error("invalid schema: {message}")]
    InvalidSchema { message: String },

    #[error("the extension uri \"{uri}\" is already documented")]
    DuplicateExtension { uri: String },

    // ==================== Payload ====================
    #[error("\"{key}\" expects {expected} but holds {found}")]
    WrongPayloadType {
        key: String,
        expected: String,
        found: String,
    },

    #[error("\"{key}\" expects a non-negative integer but holds {value}")]
    NegativeInteger { key: String, value: i64 },

    #[error("\"{key}\" expects \"Y\" or nothing but holds {value:?}")]
    NotYOrEmpty { key: String, value: String },

    #[error("\"{token}\" is not a valid value for \"{key}\" (allowed: {})", allowed.join(", "))]
    NotValidEnum {
        token: String,
        allowed: Vec<String>,
        key: String,
    },

    #[error("{value:?} is not a valid date: {reason}")]
    InvalidDate { value: String, reason: String },

    #[error("unknown calendar \"{calendar}\" (allowed: {})", allowed.join(", "))]
    UnknownCalendar {
        calendar: String,
        allowed: Vec<String>,
    },

    #[error("unknown month \"{month}\" for calendar {calendar} (allowed: {})", allowed.join(", "))]
    UnknownMonth {
        month: String,
        calendar: String,
        allowed: Vec<String>,
    },

    #[error("unknown epoch \"{epoch}\" for calendar {calendar} (allowed: {})", allowed.join(", "))]
    UnknownEpoch {
        epoch: String,
        calendar: String,
        allowed: Vec<String>,
    },

    #[error("{value:?} must start with {expected}")]
    Hemisphere { value: String, expected: String },

    #[error("{value:?} is outside the range {low} to {high}")]
    CoordinateRange { value: String, low: i32, high: i32 },

    #[error("{value:?} is not a media type")]
    InvalidMediaType { value: String },

    #[error("{value:?} is not a valid time")]
    InvalidTime { value: String },

    #[error("{value:?} is not a valid age")]
    InvalidAge { value: String },

    #[error("{value:?} is not a valid language tag")]
    InvalidLanguage { value: String },

    // ==================== Identifier ====================
    #[error("the identifier \"{xref}\" already exists")]
    DuplicateIdentifier { xref: String },

    #[error("\"{name}\" cannot form an identifier")]
    InvalidIdentifier { name: String },

    #[error("\"{key}\" expects a {expected} identifier")]
    WrongXrefType { expected: XrefCategory, key: String },

    #[error("records missing for identifiers: {}", missing.join(", "))]
    MissingRecord { missing: Vec<String> },

    #[error("the record \"{xref}\" was collected more than once")]
    DuplicateRecord { xref: String },

    #[error("\"{target}\" already references \"{record}\"")]
    CircularReference { target: String, record: String },

    #[error("the identifier \"{xref}\" is referenced but never defined")]
    UnresolvedReference { xref: String },
}

impl GedError {
    /// The class of this error.
    pub fn kind(&self) -> GedErrorKind {
        match self {
            Self::MissingHeaderMarker
            | Self::MissingTrailerMarker
            | Self::MalformedLine { .. }
            | Self::LevelJump { .. }
            | Self::BareCarriageReturn { .. }
            | Self::LimitExceeded { .. }
            | Self::MissingHeader
            | Self::NotARecord { .. } => GedErrorKind::Document,

            Self::NotPermitted { .. }
            | Self::MissingRequired { .. }
            | Self::OnlyOnePermitted { .. }
            | Self::UnknownStructure { .. }
            | Self::UnknownTag { .. }
            | Self::InvalidSchema { .. }
            | Self::DuplicateExtension { .. } => GedErrorKind::Schema,

            Self::WrongPayloadType { .. }
            | Self::NegativeInteger { .. }
            | Self::NotYOrEmpty { .. }
            | Self::NotValidEnum { .. }
            | Self::InvalidDate { .. }
            | Self::UnknownCalendar { .. }
            | Self::UnknownMonth { .. }
            | Self::UnknownEpoch { .. }
            | Self::Hemisphere { .. }
            | Self::CoordinateRange { .. }
            | Self::InvalidMediaType { .. }
            | Self::InvalidTime { .. }
            | Self::InvalidAge { .. }
            | Self::InvalidLanguage { .. } => GedErrorKind::Payload,

            Self::DuplicateIdentifier { .. }
            | Self::InvalidIdentifier { .. }
            | Self::WrongXrefType { .. }
            | Self::MissingRecord { .. }
            | Self::DuplicateRecord { .. }
            | Self::CircularReference { .. }
            | Self::UnresolvedReference { .. } => GedErrorKind::Identifier,
        }
    }

    pub(crate) fn malformed(line: usize, text: &str, reason: impl Into<String>) -> Self {
        Self::MalformedLine {
            line,
            text: text.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_date(value: &str, reason: impl Into<String>) -> Self {
        Self::InvalidDate {
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn schema(message: impl Into<String>) -> Self {
        Self::InvalidSchema {
            message: message.into(),
        }
    }
}

/// Result type for gedkit operations.
pub type GedResult<T> = Result<T, GedError>;
