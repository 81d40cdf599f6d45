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

//! Calendar date parsing and formatting.

use exercise_tracker_core::model::{ModelError, ModelResult};
#[cfg(test)]
use serde::de::Error as _;
#[cfg(test)]
use serde::{Deserialize, Deserializer};
use serde::{Serialize, Serializer};
use std::fmt;
#[cfg(test)]
use std::str::FromStr;
use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, UtcOffset};

/// Format of dates as returned to clients, such as `Sun Jan 15 2023`.
const SHORT_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[weekday repr:short] [month repr:short] [day] [year]");

/// Format of dates given by clients without a time component.
const ISO_DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Parses a date given by a client.
///
/// Accepts plain `YYYY-MM-DD` dates and RFC 3339 timestamps.  Timestamps are converted to UTC
/// before extracting their calendar date.
pub(crate) fn parse_date(s: &str) -> ModelResult<Date> {
    let s = s.trim();
    if let Ok(date) = Date::parse(s, ISO_DATE_FORMAT) {
        return Ok(date);
    }
    match OffsetDateTime::parse(s, &Rfc3339) {
        Ok(timestamp) => Ok(timestamp.to_offset(UtcOffset::UTC).date()),
        Err(_) => Err(ModelError(format!("Invalid date '{}'", s))),
    }
}

/// A date that is displayed and serialized in its short human-readable form.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ShortDate(pub(crate) Date);

impl fmt::Display for ShortDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formatted = self.0.format(SHORT_FORMAT).map_err(|_| fmt::Error)?;
        f.write_str(&formatted)
    }
}

#[cfg(test)]
impl FromStr for ShortDate {
    type Err = ModelError;

    fn from_str(s: &str) -> ModelResult<Self> {
        match Date::parse(s, SHORT_FORMAT) {
            Ok(date) => Ok(ShortDate(date)),
            Err(e) => Err(ModelError(format!("Invalid short date '{}': {}", s, e))),
        }
    }
}

impl Serialize for ShortDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
impl<'de> Deserialize<'de> for ShortDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(D::Error::custom)
    }
}
