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

//! Test utilities for the REST API.

use crate::driver::testutils::TestContext as DriverTestContext;
use crate::model::User;
use crate::rest::app;
use axum::Router;
use exercise_tracker_core::clocks::testutils::SettableClock;
use exercise_tracker_core::db::Executor;
use std::path::Path;

/// State of a running test.
pub(crate) struct TestContext {
    /// Context of the driver backing the app.
    driver_context: DriverTestContext,
}

impl TestContext {
    /// Initializes the REST app using an in-memory database and a settable clock.
    pub(crate) async fn setup() -> Self {
        Self { driver_context: DriverTestContext::setup().await }
    }

    /// Instantiates a new router for the app, serving static files from this crate's sources.
    pub(crate) fn app(&self) -> Router {
        app(self.driver_context.driver(), Path::new(env!("CARGO_MANIFEST_DIR")))
    }

    /// Gets access to the clock used by the app.
    pub(crate) fn clock(&self) -> &SettableClock {
        self.driver_context.clock()
    }

    /// Gets a direct executor against the database.
    pub(crate) async fn ex(&self) -> Executor {
        self.driver_context.ex().await
    }

    /// Syntactic sugar to create a user directly in the database.
    pub(crate) async fn create_user(&self, username: &'static str) -> User {
        self.driver_context.create_user(username).await
    }
}
