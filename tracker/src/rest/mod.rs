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

//! REST interface for the exercise tracker.

use crate::driver::Driver;
use crate::model::Outcome;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
#[cfg(test)]
use serde::Deserialize;
use serde::Serialize;
use std::path::Path;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};

#[cfg(test)]
mod testutils;
mod user_exercises_post;
mod user_logs_get;
mod users_get;
mod users_post;

/// Body of a successful response that reports a business rule violation.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub(crate) struct MessageResponse {
    /// Human-readable description of why the request was not fulfilled.
    pub(crate) message: String,
}

/// Renders the `outcome` of a business operation.
///
/// Rejections are reported as a `MessageResponse` with a successful status code.
fn reply<T: Serialize>(outcome: Outcome<T>) -> Response {
    match outcome {
        Ok(value) => Json(value).into_response(),
        Err(rejection) => Json(MessageResponse { message: rejection.to_string() }).into_response(),
    }
}

/// Creates the router for the application.
///
/// The `driver` handles the API calls.  The `static_dir` holds the `views/index.html` landing page
/// and the `public` directory with its assets, which are served for any path not claimed by the
/// API.
pub(crate) fn app(driver: Driver, static_dir: &Path) -> Router {
    use axum::routing::{get, post};

    let api = Router::new()
        .route("/api/users", get(users_get::handler).post(users_post::handler))
        .route("/api/users/:user_id/exercises", post(user_exercises_post::handler))
        .route("/api/users/:user_id/logs", get(user_logs_get::handler))
        .layer(CorsLayer::permissive())
        .with_state(driver);

    api.route_service("/", ServeFile::new(static_dir.join("views").join("index.html")))
        .fallback_service(ServeDir::new(static_dir.join("public")))
}
