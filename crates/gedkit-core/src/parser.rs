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

//! Document text parsing.
//!
//! Splitting works line by line:
//!
//! 1. Normalize the input (BOM, line endings, limits)
//! 2. Locate the trailer, then the header before it
//! 3. Tokenize every line in between into a [`GedLine`]
//! 4. Fold `CONT` lines into the payload of the line they continue
//! 5. Start a new record at every level-0 line
//!
//! Folding happens on tokenized lines, so continuation text that happens to
//! look like a level-0 line never starts a record.

use crate::error::{GedError, GedResult};
use crate::limits::ParseOptions;
use crate::preprocess::preprocess;
use crate::writer::TRAILER;
use crate::xref::is_pointer;
use tracing::{debug, trace};

/// Header line opening every document.
pub const HEADER: &str = "0 HEAD";

const CONTINUATION: &str = "CONT";

/// One tokenized line with its continuation payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GedLine {
    /// Line number in the input, 1-based.
    pub number: usize,
    pub level: usize,
    pub xref: Option<String>,
    pub tag: String,
    /// Payload as written, escapes included.
    pub payload: Option<String>,
    /// Payloads of the `CONT` lines that follow, as written.
    pub continuations: Vec<String>,
}

impl GedLine {
    /// Tokenize `<level> [<xref>] <tag>[ <payload>]`.
    pub fn parse(number: usize, line: &str) -> GedResult<Self> {
        let digits = line.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return Err(GedError::malformed(number, line, "the line does not start with a level"));
        }
        let level: usize = line[..digits]
            .parse()
            .map_err(|_| GedError::malformed(number, line, "the level is too large"))?;
        let rest = line[digits..]
            .strip_prefix(' ')
            .ok_or_else(|| GedError::malformed(number, line, "a single space must follow the level"))?;

        let (xref, rest) = if rest.starts_with('@') {
            let (token, rest) = rest.split_once(' ').unwrap_or((rest, ""));
            if !is_pointer(token) {
                return Err(GedError::malformed(number, line, "malformed identifier"));
            }
            (Some(token.to_string()), rest)
        } else {
            (None, rest)
        };

        let (tag, payload) = match rest.split_once(' ') {
            Some((tag, payload)) => (tag, Some(payload.to_string())),
            None => (rest, None),
        };
        if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(GedError::malformed(number, line, "missing or malformed tag"));
        }

        Ok(Self {
            number,
            level,
            xref,
            tag: tag.to_string(),
            payload,
            continuations: Vec::new(),
        })
    }

    /// The payload as text: escapes removed and continuations joined by
    /// newlines. `None` when the line and its continuations carry nothing.
    pub fn text(&self) -> Option<String> {
        if self.payload.is_none() && self.continuations.is_empty() {
            return None;
        }
        let mut text = unescape(self.payload.as_deref().unwrap_or("")).to_string();
        for segment in &self.continuations {
            text.push('\n');
            text.push_str(unescape(segment));
        }
        Some(text)
    }

    /// The line as written with its continuations folded in.
    fn folded(&self) -> String {
        let mut out = self.level.to_string();
        if let Some(xref) = &self.xref {
            out.push(' ');
            out.push_str(xref);
        }
        out.push(' ');
        out.push_str(&self.tag);
        if let Some(payload) = &self.payload {
            out.push(' ');
            out.push_str(payload);
        }
        for segment in &self.continuations {
            out.push('\n');
            out.push_str(unescape(segment));
        }
        out
    }
}

/// Undo the doubling of a leading `@`.
fn unescape(segment: &str) -> &str {
    if segment.starts_with("@@") {
        &segment[1..]
    } else {
        segment
    }
}

/// The lines of one record, its level-0 line first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordLines {
    lines: Vec<GedLine>,
}

impl RecordLines {
    pub fn lines(&self) -> &[GedLine] {
        &self.lines
    }

    /// The level-0 line.
    pub fn root(&self) -> &GedLine {
        &self.lines[0]
    }

    pub fn tag(&self) -> &str {
        &self.root().tag
    }

    pub fn xref(&self) -> Option<&str> {
        self.root().xref.as_deref()
    }

    /// Record text with continuations folded in, without a trailing newline.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(GedLine::folded)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Split document text into one substring per record, header first.
///
/// Text before the header and from the trailer on is discarded.
pub fn split(raw: &str) -> GedResult<Vec<String>> {
    Ok(split_records(raw, &ParseOptions::default())?
        .iter()
        .map(RecordLines::text)
        .collect())
}

/// Split document text into tokenized records.
pub fn split_records(raw: &str, options: &ParseOptions) -> GedResult<Vec<RecordLines>> {
    let input = preprocess(raw, &options.limits)?;
    let lines: Vec<(usize, &str)> = input.lines().collect();

    let trailer = lines
        .iter()
        .position(|(_, l)| l.trim_end() == TRAILER)
        .ok_or(GedError::MissingTrailerMarker)?;
    let header = lines[..trailer]
        .iter()
        .position(|(_, l)| l.trim_end() == HEADER)
        .ok_or(GedError::MissingHeaderMarker)?;

    let limits = &options.limits;
    let mut records: Vec<RecordLines> = Vec::new();
    let mut previous_level = 0;

    for &(number, text) in &lines[header..trailer] {
        let line = GedLine::parse(number, text)?;
        trace!(number, level = line.level, tag = %line.tag, "line");

        if line.level > limits.max_level {
            return Err(GedError::LimitExceeded {
                limit: "structure level",
                maximum: limits.max_level,
                line: number,
            });
        }

        if line.tag == CONTINUATION {
            let parent = records
                .last_mut()
                .and_then(|r| r.lines.last_mut())
                .filter(|parent| line.level == parent.level + 1)
                .ok_or_else(|| GedError::malformed(number, text, "continuation without a parent line"))?;
            parent.continuations.push(line.payload.unwrap_or_default());
            continue;
        }

        if options.strict_levels && line.level > previous_level + 1 {
            return Err(GedError::LevelJump {
                line: number,
                previous: previous_level,
                found: line.level,
            });
        }
        previous_level = line.level;

        if line.level == 0 {
            if records.len() >= limits.max_records {
                return Err(GedError::LimitExceeded {
                    limit: "record count",
                    maximum: limits.max_records,
                    line: number,
                });
            }
            records.push(RecordLines { lines: vec![line] });
        } else if let Some(record) = records.last_mut() {
            record.lines.push(line);
        }
    }

    debug!(records = records.len(), "split document");
    Ok(records)
}
