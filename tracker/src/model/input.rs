// Exercise tracker
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Loosely-typed values as sent by clients and their lenient interpretation.

use crate::model::parse_date;
use serde::{Deserialize, Serialize};
use time::Date;

/// Parses the integer at the beginning of `s`, ignoring anything that follows it.
///
/// Leading whitespace is skipped and an optional sign is accepted.  Returns `None` if there are
/// no digits to parse or if the value does not fit in an `i64`.
pub(crate) fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: Option<i64> = None;
    for ch in digits.bytes().take_while(u8::is_ascii_digit) {
        let digit = i64::from(ch - b'0');
        let current = value.unwrap_or(0);
        value = Some(current.checked_mul(10)?.checked_add(digit)?);
    }
    value.map(|v| if negative { -v } else { v })
}

/// A duration as given by a client, which can be a JSON number or a string.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(untagged)]
pub(crate) enum DurationInput {
    /// A numeric duration, which may carry a fractional part.
    Number(f64),

    /// A textual duration, such as those coming from forms.
    Text(String),
}

impl DurationInput {
    /// Interprets the duration as an integer, truncating any fractional part.
    ///
    /// Returns `None` if the duration is zero or cannot be interpreted, as these are treated as
    /// not having been provided at all.
    pub(crate) fn value(&self) -> Option<i64> {
        let value = match self {
            DurationInput::Number(n) if n.is_finite() => Some(n.trunc() as i64),
            DurationInput::Number(_) => None,
            DurationInput::Text(s) => parse_leading_int(s),
        };
        value.filter(|v| *v != 0)
    }
}

/// Details of an exercise to add, as given by a client.
#[derive(Default, Deserialize, Serialize)]
pub(crate) struct ExerciseInput {
    /// Description of the exercise.
    pub(crate) description: Option<String>,

    /// Duration of the exercise.
    pub(crate) duration: Option<DurationInput>,

    /// Date of the exercise, defaulting to today when not provided.
    pub(crate) date: Option<String>,
}

/// Criteria to select the exercises of a user.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct ExerciseFilter {
    /// Earliest date to return, inclusive.
    pub(crate) from: Option<Date>,

    /// Latest date to return, inclusive.
    pub(crate) to: Option<Date>,

    /// Maximum number of exercises to return.
    pub(crate) limit: Option<i64>,
}

impl ExerciseFilter {
    /// Builds a filter from the raw query parameters given by a client.
    ///
    /// Empty bounds are ignored.  Returns `None` if any bound is not a valid date, in which case
    /// no exercise can match.  A `limit` that is not a positive integer means no limit.
    pub(crate) fn parse(from: Option<&str>, to: Option<&str>, limit: Option<&str>) -> Option<Self> {
        /// Parses an optional date bound, returning `Err` if it is present but invalid.
        fn bound(raw: Option<&str>) -> Result<Option<Date>, ()> {
            match raw.map(str::trim) {
                None | Some("") => Ok(None),
                Some(raw) => parse_date(raw).map(Some).map_err(|_| ()),
            }
        }

        let from = bound(from).ok()?;
        let to = bound(to).ok()?;
        let limit = limit.and_then(parse_leading_int).filter(|l| *l > 0);
        Some(Self { from, to, limit })
    }
}
