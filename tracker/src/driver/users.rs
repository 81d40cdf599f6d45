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

//! Extends the driver with the user management operations.

use crate::db;
use crate::driver::Driver;
use crate::model::{Outcome, Rejection, User, UserId, Username};
use exercise_tracker_core::db::DbError;
use exercise_tracker_core::driver::{DriverError, DriverResult};

impl Driver {
    /// Creates a new user named `username` with a freshly-assigned identifier.
    pub(crate) async fn create_user(self, username: Option<String>) -> DriverResult<Outcome<User>> {
        let username = match username.map(Username::new) {
            Some(Ok(username)) => username,
            _ => return Ok(Err(Rejection::MissingUsername)),
        };

        let mut tx = self.db.begin().await?;

        let user = User::new(UserId::generate(), username);
        match db::create_user(tx.ex(), &user).await {
            Ok(()) => (),
            Err(DbError::AlreadyExists) => {
                if db::get_user_by_username(tx.ex(), user.username()).await?.is_some() {
                    return Ok(Err(Rejection::UserExists));
                }
                return Err(DriverError::BackendError(format!(
                    "Generated user id {} collides with an existing user",
                    user.id()
                )));
            }
            Err(e) => return Err(e.into()),
        }

        tx.commit().await?;
        Ok(Ok(user))
    }

    /// Gets all users in the order in which they were created.
    pub(crate) async fn get_users(self) -> DriverResult<Vec<User>> {
        let mut tx = self.db.begin().await?;
        let users = db::list_users(tx.ex()).await?;
        tx.commit().await?;
        Ok(users)
    }
}
