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

//! Input normalization ahead of line splitting.

use crate::error::{GedError, GedResult};
use crate::limits::Limits;
use std::borrow::Cow;

/// Normalized document text with line boundaries.
#[derive(Debug)]
pub(crate) struct PreprocessedInput<'a> {
    text: Cow<'a, str>,
    /// (line_number, start_offset, end_offset)
    line_offsets: Vec<(usize, usize, usize)>,
}

impl PreprocessedInput<'_> {
    /// Lines as (line_number, &str), 1-based.
    #[inline]
    pub fn lines(&self) -> impl Iterator<Item = (usize, &str)> {
        self.line_offsets
            .iter()
            .map(move |&(num, start, end)| (num, &self.text[start..end]))
    }
}

/// Strip a BOM, normalize CRLF, reject bare CR and enforce size limits.
pub(crate) fn preprocess<'a>(input: &'a str, limits: &Limits) -> GedResult<PreprocessedInput<'a>> {
    if input.len() > limits.max_input_size {
        return Err(GedError::LimitExceeded {
            limit: "input size",
            maximum: limits.max_input_size,
            line: 0,
        });
    }

    let input = input.strip_prefix('\u{FEFF}').unwrap_or(input);

    let text: Cow<'a, str> = if input.contains('\r') {
        let normalized = input.replace("\r\n", "\n");
        if let Some(pos) = normalized.find('\r') {
            let line = normalized[..pos].matches('\n').count() + 1;
            return Err(GedError::BareCarriageReturn { line });
        }
        Cow::Owned(normalized)
    } else {
        Cow::Borrowed(input)
    };

    let bytes = text.as_bytes();
    let mut line_offsets = Vec::with_capacity(bytes.iter().filter(|&&b| b == b'\n').count() + 1);
    let mut start = 0;
    let mut line = 1;
    for (i, &b) in bytes.iter().enumerate() {
        if b == b'\n' {
            check_line_length(i - start, line, limits)?;
            line_offsets.push((line, start, i));
            start = i + 1;
            line += 1;
        }
    }
    // A trailing newline leaves no final line.
    if start < bytes.len() {
        check_line_length(bytes.len() - start, line, limits)?;
        line_offsets.push((line, start, bytes.len()));
    }

    Ok(PreprocessedInput { text, line_offsets })
}

fn check_line_length(length: usize, line: usize, limits: &Limits) -> GedResult<()> {
    if length > limits.max_line_length {
        return Err(GedError::LimitExceeded {
            limit: "line length",
            maximum: limits.max_line_length,
            line,
        });
    }
    Ok(())
}
