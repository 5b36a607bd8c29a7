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

//! Resource limits and parse options.

/// Configurable limits applied while splitting document text.
///
/// These bound the resources consumed by hostile or corrupt input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum input size in bytes (default: 512MB).
    pub max_input_size: usize,
    /// Maximum line length in bytes (default: 64KB).
    pub max_line_length: usize,
    /// Maximum structure level (default: 99).
    pub max_level: usize,
    /// Maximum number of records, header included (default: 10M).
    pub max_records: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_input_size: 512 * 1024 * 1024, // 512MB
            max_line_length: 64 * 1024,        // 64KB
            max_level: 99,
            max_records: 10_000_000,
        }
    }
}

impl Limits {
    /// Create limits with no restrictions (for testing).
    pub fn unlimited() -> Self {
        Self {
            max_input_size: usize::MAX,
            max_line_length: usize::MAX,
            max_level: usize::MAX,
            max_records: usize::MAX,
        }
    }
}

/// Options controlling how document text is split and loaded.
///
/// ```
/// use gedkit_core::ParseOptions;
///
/// let opts = ParseOptions::builder()
///     .max_line_length(255)
///     .strict_levels(true)
///     .build();
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Resource limits.
    pub limits: Limits,
    /// Reject lines whose level rises by more than one.
    pub strict_levels: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            limits: Limits::default(),
            strict_levels: true,
        }
    }
}

impl ParseOptions {
    /// Create a new builder for ParseOptions.
    pub fn builder() -> ParseOptionsBuilder {
        ParseOptionsBuilder::new()
    }
}

/// Builder for ParseOptions.
#[derive(Debug, Clone)]
pub struct ParseOptionsBuilder {
    limits: Limits,
    strict_levels: bool,
}

impl ParseOptionsBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self {
            limits: Limits::default(),
            strict_levels: true,
        }
    }

    pub fn max_input_size(mut self, size: usize) -> Self {
        self.limits.max_input_size = size;
        self
    }

    pub fn max_line_length(mut self, length: usize) -> Self {
        self.limits.max_line_length = length;
        self
    }

    pub fn max_level(mut self, level: usize) -> Self {
        self.limits.max_level = level;
        self
    }

    pub fn max_records(mut self, records: usize) -> Self {
        self.limits.max_records = records;
        self
    }

    /// Replace all limits at once.
    pub fn limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn strict_levels(mut self, strict: bool) -> Self {
        self.strict_levels = strict;
        self
    }

    pub fn build(self) -> ParseOptions {
        ParseOptions {
            limits: self.limits,
            strict_levels: self.strict_levels,
        }
    }
}

impl Default for ParseOptionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
