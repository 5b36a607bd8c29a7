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

//! Validators for date, time, age and language payloads.
//!
//! A general date is `[calendar] [[day] month] year [epoch]`. Tokens are
//! read from the end: an alphabetic last token is an epoch, then comes the
//! year, and whatever precedes the year is interpreted by its shape.

use crate::error::{GedError, GedResult};

/// A calendar known to the date validators.
#[derive(Debug)]
pub struct Calendar {
    pub name: &'static str,
    pub months: &'static [&'static str],
    /// Maximum day of each month, parallel to `months`.
    pub max_days: &'static [u32],
    pub epochs: &'static [&'static str],
    /// Whether year zero is rejected.
    pub no_zero_year: bool,
}

const GREGORIAN_MONTHS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];
const GREGORIAN_DAYS: [u32; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

pub const GREGORIAN: Calendar = Calendar {
    name: "GREGORIAN",
    months: &GREGORIAN_MONTHS,
    max_days: &GREGORIAN_DAYS,
    epochs: &["BCE"],
    no_zero_year: true,
};

pub const JULIAN: Calendar = Calendar {
    name: "JULIAN",
    months: &GREGORIAN_MONTHS,
    max_days: &GREGORIAN_DAYS,
    epochs: &["BCE"],
    no_zero_year: true,
};

pub const HEBREW: Calendar = Calendar {
    name: "HEBREW",
    months: &[
        "TSH", "CSH", "KSL", "TVT", "SHV", "ADR", "ADS", "NSN", "IYR", "SVN", "TMZ", "AAV", "ELL",
    ],
    max_days: &[30; 13],
    epochs: &[],
    no_zero_year: false,
};

pub const FRENCH_R: Calendar = Calendar {
    name: "FRENCH_R",
    months: &[
        "VEND", "BRUM", "FRIM", "NIVO", "PLUV", "VENT", "GERM", "FLOR", "PRAI", "MESS", "THER",
        "FRUC", "COMP",
    ],
    max_days: &[30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 6],
    epochs: &[],
    no_zero_year: false,
};

pub const CALENDARS: [&Calendar; 4] = [&GREGORIAN, &JULIAN, &FRENCH_R, &HEBREW];

fn calendar(name: &str) -> Option<&'static Calendar> {
    CALENDARS.iter().copied().find(|c| c.name == name)
}

fn calendar_names() -> Vec<String> {
    CALENDARS.iter().map(|c| c.name.to_string()).collect()
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn is_leap(calendar: &Calendar, year: u64) -> bool {
    match calendar.name {
        "GREGORIAN" => (year % 4 == 0 && year % 100 != 0) || year % 400 == 0,
        "JULIAN" => year % 4 == 0,
        _ => true,
    }
}

/// An exact date: `DAY MON YEAR` in the Gregorian calendar.
pub fn validate_exact(value: &str) -> GedResult<()> {
    let parts: Vec<&str> = value.split(' ').collect();
    if parts.len() != 3 {
        return Err(GedError::invalid_date(
            value,
            "an exact date is DAY MONTH YEAR separated by single spaces",
        ));
    }
    check_day_month_year(value, &GREGORIAN, Some(parts[0]), Some(parts[1]), parts[2], false)
}

/// A single date in any known calendar.
pub fn validate_date(value: &str) -> GedResult<()> {
    let tokens: Vec<&str> = value.split(' ').collect();
    if tokens.iter().any(|t| t.is_empty()) {
        return Err(GedError::invalid_date(value, "tokens are separated by single spaces"));
    }

    let (mut rest, epoch) = match tokens.split_last() {
        Some((last, rest)) if !is_digits(last) => (rest, Some(*last)),
        Some((_, _)) => (&tokens[..], None),
        None => return Err(GedError::invalid_date(value, "missing year")),
    };
    let year = match rest.split_last() {
        Some((year, before)) if is_digits(year) => {
            rest = before;
            *year
        }
        _ => return Err(GedError::invalid_date(value, "missing year")),
    };

    let (calendar_name, day, month) = match rest {
        [] => (None, None, None),
        [only] if is_digits(only) => {
            return Err(GedError::invalid_date(value, "a day needs a month"));
        }
        [only] if calendar(only).is_some() || only.starts_with('_') => (Some(*only), None, None),
        [month] => (None, None, Some(*month)),
        [day, month] if is_digits(day) => (None, Some(*day), Some(*month)),
        [cal, month] => (Some(*cal), None, Some(*month)),
        [cal, day, month] => (Some(*cal), Some(*day), Some(*month)),
        _ => return Err(GedError::invalid_date(value, "too many tokens")),
    };

    let cal = match calendar_name {
        None => &GREGORIAN,
        // Extension calendars define their own months and epochs.
        Some(name) if name.starts_with('_') => return Ok(()),
        Some(name) => calendar(name).ok_or_else(|| GedError::UnknownCalendar {
            calendar: name.to_string(),
            allowed: calendar_names(),
        })?,
    };

    if let Some(epoch) = epoch {
        if !cal.epochs.contains(&epoch) {
            return Err(GedError::UnknownEpoch {
                epoch: epoch.to_string(),
                calendar: cal.name.to_string(),
                allowed: to_strings(cal.epochs),
            });
        }
    }

    check_day_month_year(value, cal, day, month, year, epoch.is_some())
}

fn check_day_month_year(
    value: &str,
    cal: &Calendar,
    day: Option<&str>,
    month: Option<&str>,
    year: &str,
    has_epoch: bool,
) -> GedResult<()> {
    if !is_digits(year) {
        return Err(GedError::invalid_date(value, "the year must be a number"));
    }
    let year_number: u64 = year
        .parse()
        .map_err(|_| GedError::invalid_date(value, "the year is too large"))?;
    if cal.no_zero_year && year_number == 0 {
        return Err(GedError::invalid_date(value, "there is no year zero"));
    }

    let month_index = match month {
        None => return Ok(()),
        Some(m) => cal
            .months
            .iter()
            .position(|known| *known == m)
            .ok_or_else(|| GedError::UnknownMonth {
                month: m.to_string(),
                calendar: cal.name.to_string(),
                allowed: to_strings(cal.months),
            })?,
    };

    let day = match day {
        None => return Ok(()),
        Some(d) if is_digits(d) => d
            .parse::<u32>()
            .map_err(|_| GedError::invalid_date(value, "the day is too large"))?,
        Some(_) => return Err(GedError::invalid_date(value, "the day must be a number")),
    };

    let mut max = cal.max_days[month_index];
    // February outside leap years; BCE years are not checked.
    if max == 29 && !has_epoch && !is_leap(cal, year_number) {
        max = 28;
    }
    if day == 0 || day > max {
        return Err(GedError::invalid_date(
            value,
            format!("{} has at most {} days", cal.months[month_index], max),
        ));
    }
    Ok(())
}

/// A date period: `FROM x`, `TO y`, `FROM x TO y` or empty.
pub fn validate_period(value: &str) -> GedResult<()> {
    if value.is_empty() {
        return Ok(());
    }
    if let Some(rest) = value.strip_prefix("FROM ") {
        return match rest.split_once(" TO ") {
            Some((from, to)) => {
                validate_date(from)?;
                validate_date(to)
            }
            None => validate_date(rest),
        };
    }
    if let Some(rest) = value.strip_prefix("TO ") {
        return validate_date(rest);
    }
    Err(GedError::invalid_date(value, "a period starts with FROM or TO"))
}

/// Any date value: a date, a period, a range or an approximate date.
pub fn validate_date_value(value: &str) -> GedResult<()> {
    if value.is_empty() {
        return Ok(());
    }
    if value.starts_with("FROM ") || value.starts_with("TO ") {
        return validate_period(value);
    }
    if let Some(rest) = value.strip_prefix("BET ") {
        return match rest.split_once(" AND ") {
            Some((low, high)) => {
                validate_date(low)?;
                validate_date(high)
            }
            None => Err(GedError::invalid_date(value, "BET requires AND")),
        };
    }
    for affix in ["AFT ", "BEF ", "ABT ", "CAL ", "EST "] {
        if let Some(rest) = value.strip_prefix(affix) {
            return validate_date(rest);
        }
    }
    validate_date(value)
}

/// A time: `hh:mm[:ss[.fraction]][Z]`.
pub fn validate_time(value: &str) -> GedResult<()> {
    let invalid = || GedError::InvalidTime {
        value: value.to_string(),
    };
    let body = value.strip_suffix('Z').unwrap_or(value);
    let mut parts = body.split(':');
    let hours = parts.next().ok_or_else(invalid)?;
    let minutes = parts.next().ok_or_else(invalid)?;
    let seconds = parts.next();
    if parts.next().is_some() {
        return Err(invalid());
    }

    let in_range = |s: &str, len: std::ops::RangeInclusive<usize>, max: u32| {
        len.contains(&s.len()) && is_digits(s) && s.parse::<u32>().map_or(false, |n| n <= max)
    };
    if !in_range(hours, 1..=2, 23) || !in_range(minutes, 2..=2, 59) {
        return Err(invalid());
    }
    if let Some(seconds) = seconds {
        let (whole, fraction) = match seconds.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (seconds, None),
        };
        if !in_range(whole, 2..=2, 59) || fraction.map_or(false, |f| !is_digits(f)) {
            return Err(invalid());
        }
    }
    Ok(())
}

/// An age: optional `<` or `>`, then years, months, weeks and days in that order.
pub fn validate_age(value: &str) -> GedResult<()> {
    let invalid = || GedError::InvalidAge {
        value: value.to_string(),
    };
    let mut tokens = value.split(' ').peekable();
    if matches!(tokens.peek(), Some(&"<") | Some(&">")) {
        tokens.next();
    }

    let units = ['y', 'm', 'w', 'd'];
    let mut next_unit = 0;
    let mut seen = 0;
    for token in tokens {
        let unit = token.chars().last().ok_or_else(invalid)?;
        let number = &token[..token.len() - unit.len_utf8()];
        let position = units.iter().position(|u| *u == unit).ok_or_else(invalid)?;
        if position < next_unit || !is_digits(number) {
            return Err(invalid());
        }
        next_unit = position + 1;
        seen += 1;
    }
    if seen == 0 {
        return Err(invalid());
    }
    Ok(())
}

/// A language tag: letters, digits and single hyphens, starting with a letter.
pub fn validate_language(value: &str) -> GedResult<()> {
    let valid = value.starts_with(|c: char| c.is_ascii_alphabetic())
        && value
            .split('-')
            .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric()));
    if valid {
        Ok(())
    } else {
        Err(GedError::InvalidLanguage {
            value: value.to_string(),
        })
    }
}
