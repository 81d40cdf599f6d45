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

//! The `User` data type and its identifiers.

use derive_getters::Getters;
use exercise_tracker_core::model::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque identifier of a user, assigned at creation time.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub(crate) struct UserId(Uuid);

impl UserId {
    /// Generates a new random identifier.
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses an identifier given by a client.
    pub(crate) fn parse(s: &str) -> ModelResult<Self> {
        match Uuid::try_parse(s) {
            Ok(uuid) => Ok(Self(uuid)),
            Err(e) => Err(ModelError(format!("Invalid user id '{}': {}", s, e))),
        }
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Name of a user, which must not be empty.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(into = "String", try_from = "String")]
pub(crate) struct Username(String);

impl Username {
    /// Creates a new username after validating it.
    pub(crate) fn new<S: Into<String>>(s: S) -> ModelResult<Self> {
        let s = s.into();
        if s.is_empty() {
            return Err(ModelError("Username cannot be empty".to_owned()));
        }
        Ok(Self(s))
    }

    /// Returns a string view of the username.
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = ModelError;

    fn try_from(value: String) -> ModelResult<Self> {
        Username::new(value)
    }
}

/// Representation of a user as returned to clients.
#[derive(Clone, Debug, Deserialize, Getters, PartialEq, Serialize)]
pub(crate) struct User {
    /// Name of the user, unique across all users.
    username: Username,

    /// Identifier of the user.
    #[serde(rename = "_id")]
    id: UserId,
}

impl User {
    /// Creates a new user from its parts.
    pub(crate) fn new(id: UserId, username: Username) -> Self {
        Self { username, id }
    }
}
