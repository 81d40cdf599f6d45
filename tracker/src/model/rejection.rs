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

//! Business rule violations reported back to clients.

/// Reasons why an otherwise well-formed request cannot be fulfilled.
///
/// These are not errors from the point of view of the service: they are expected outcomes that
/// clients learn about via a message in a successful response.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub(crate) enum Rejection {
    /// The requested username is already taken.
    #[error("User already exists")]
    UserExists,

    /// The request did not carry a username.
    #[error("Username must be provided")]
    MissingUsername,

    /// The user id in the request does not identify a user.
    #[error("Invalid user id")]
    InvalidUser,

    /// The request did not carry a description.
    #[error("Description must be provided")]
    MissingDescription,

    /// The request did not carry a usable duration.
    #[error("Duration must be provided")]
    MissingDuration,

    /// The request carried a date that cannot be parsed.
    #[error("Date must be a valid date")]
    InvalidDate,
}

/// Result of a business operation that may be rejected.
pub(crate) type Outcome<T> = Result<T, Rejection>;
