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

//! API to query the exercise log of a user.

use crate::driver::Driver;
use crate::model::{Description, Exercise, ExerciseFilter, ShortDate, Username};
use axum::Json;
use axum::extract::{Path, Query, State};
use exercise_tracker_core::rest::{EmptyBody, RestResult};
use serde::{Deserialize, Serialize};

/// Criteria to select the exercises to return, as given in the query string.
#[derive(Default, Deserialize, Serialize)]
pub(crate) struct LogsQuery {
    /// Earliest date to return, inclusive.
    pub(crate) from: Option<String>,

    /// Latest date to return, inclusive.
    pub(crate) to: Option<String>,

    /// Maximum number of exercises to return.
    pub(crate) limit: Option<String>,
}

/// A single exercise in the log.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub(crate) struct LogEntry {
    /// Description of the exercise.
    pub(crate) description: Description,

    /// Duration of the exercise.
    pub(crate) duration: i64,

    /// Date of the exercise.
    pub(crate) date: ShortDate,
}

impl From<Exercise> for LogEntry {
    fn from(exercise: Exercise) -> Self {
        Self {
            description: exercise.description().clone(),
            duration: *exercise.duration(),
            date: ShortDate(*exercise.date()),
        }
    }
}

/// The exercise log of a user.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub(crate) struct LogsResponse {
    /// Name of the user, omitted if the user does not exist.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) username: Option<Username>,

    /// Number of entries in `log`.
    pub(crate) count: usize,

    /// Identifier of the user as given in the request.
    #[serde(rename = "_id")]
    pub(crate) id: String,

    /// Exercises that matched the query, in the order in which they were recorded.
    pub(crate) log: Vec<LogEntry>,
}

/// GET handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(user_id): Path<String>,
    Query(query): Query<LogsQuery>,
    _: EmptyBody,
) -> RestResult<Json<LogsResponse>> {
    let filter = ExerciseFilter::parse(
        query.from.as_deref(),
        query.to.as_deref(),
        query.limit.as_deref(),
    );

    let (user, exercises) = driver.get_logs(&user_id, filter).await?;

    let log: Vec<LogEntry> = exercises.into_iter().map(LogEntry::from).collect();
    Ok(Json(LogsResponse {
        username: user.map(|user| user.username().clone()),
        count: log.len(),
        id: user_id,
        log,
    }))
}
