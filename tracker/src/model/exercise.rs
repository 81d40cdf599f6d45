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

//! The `Exercise` data type.

use crate::model::UserId;
use derive_getters::Getters;
use exercise_tracker_core::model::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};
use time::Date;

/// Free-form description of an exercise, which must not be empty.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(into = "String", try_from = "String")]
pub(crate) struct Description(String);

impl Description {
    /// Creates a new description after validating it.
    pub(crate) fn new<S: Into<String>>(s: S) -> ModelResult<Self> {
        let s = s.into();
        if s.is_empty() {
            return Err(ModelError("Description cannot be empty".to_owned()));
        }
        Ok(Self(s))
    }

    /// Returns a string view of the description.
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<Description> for String {
    fn from(value: Description) -> Self {
        value.0
    }
}

impl TryFrom<String> for Description {
    type Error = ModelError;

    fn try_from(value: String) -> ModelResult<Self> {
        Description::new(value)
    }
}

/// A single exercise logged by a user.
#[derive(Clone, Debug, Getters, PartialEq)]
pub(crate) struct Exercise {
    /// Identifier of the user that owns this exercise.
    user_id: UserId,

    /// What the exercise was about.
    description: Description,

    /// Length of the exercise, in whatever units the client chooses.
    duration: i64,

    /// Day on which the exercise happened.
    date: Date,
}

impl Exercise {
    /// Creates a new exercise from its parts.
    pub(crate) fn new(user_id: UserId, description: Description, duration: i64, date: Date) -> Self {
        Self { user_id, description, duration, date }
    }
}
