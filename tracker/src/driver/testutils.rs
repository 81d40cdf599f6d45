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

//! Test utilities for the business logic.

use crate::db;
use crate::driver::Driver;
use crate::model::{User, UserId, Username};
use exercise_tracker_core::clocks::testutils::SettableClock;
use exercise_tracker_core::db::{Db, Executor};
use std::sync::Arc;
use time::OffsetDateTime;
use time::macros::datetime;

/// Instant that the clock of a fresh test context returns.
pub(crate) const TEST_NOW: OffsetDateTime = datetime!(2023-01-15 12:00:00 UTC);

/// State of a running test.
pub(crate) struct TestContext {
    /// The clock used by the driver, which tests can adjust at will.
    clock: Arc<SettableClock>,

    /// The driver to exercise.
    driver: Driver,
}

impl TestContext {
    /// Initializes the driver using an in-memory database and a settable clock that starts at
    /// `TEST_NOW`.
    pub(crate) async fn setup() -> Self {
        let db = Arc::from(exercise_tracker_core::db::sqlite::testutils::setup().await);
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let clock = Arc::from(SettableClock::new(TEST_NOW));
        let driver = Driver::new(db, clock.clone());
        Self { clock, driver }
    }

    /// Gets access to the clock used by the driver.
    pub(crate) fn clock(&self) -> &SettableClock {
        &self.clock
    }

    /// Gets a direct executor against the database.
    pub(crate) async fn ex(&self) -> Executor {
        self.driver.db.ex().await.unwrap()
    }

    /// Gets a copy of the driver in this test context.
    pub(crate) fn driver(&self) -> Driver {
        self.driver.clone()
    }

    /// Syntactic sugar to create a user directly in the database.
    pub(crate) async fn create_user(&self, username: &'static str) -> User {
        let user = User::new(UserId::generate(), Username::new(username).unwrap());
        db::create_user(&mut self.ex().await, &user).await.unwrap();
        user
    }
}
