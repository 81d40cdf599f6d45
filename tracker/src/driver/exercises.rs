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

//! Extends the driver with the exercise logging operations.

use crate::db;
use crate::driver::Driver;
use crate::model::{
    Description, DurationInput, Exercise, ExerciseFilter, ExerciseInput, Outcome, Rejection, User,
    UserId, parse_date,
};
use exercise_tracker_core::driver::DriverResult;

impl Driver {
    /// Records a new exercise for the user identified by the raw `user_id`.
    ///
    /// Returns the owner of the exercise alongside the stored exercise.
    pub(crate) async fn add_exercise(
        self,
        user_id: &str,
        input: ExerciseInput,
    ) -> DriverResult<Outcome<(User, Exercise)>> {
        let mut tx = self.db.begin().await?;

        let user = match UserId::parse(user_id) {
            Ok(id) => db::get_user_by_id(tx.ex(), &id).await?,
            Err(_) => None,
        };
        let Some(user) = user else {
            return Ok(Err(Rejection::InvalidUser));
        };

        let description = match input.description.map(Description::new) {
            Some(Ok(description)) => description,
            _ => return Ok(Err(Rejection::MissingDescription)),
        };

        let Some(duration) = input.duration.as_ref().and_then(DurationInput::value) else {
            return Ok(Err(Rejection::MissingDuration));
        };

        let date = match input.date.as_deref().map(str::trim) {
            None | Some("") => self.clock.now_utc().date(),
            Some(raw) => match parse_date(raw) {
                Ok(date) => date,
                Err(_) => return Ok(Err(Rejection::InvalidDate)),
            },
        };

        let exercise = Exercise::new(*user.id(), description, duration, date);
        db::create_exercise(tx.ex(), &exercise).await?;

        tx.commit().await?;
        Ok(Ok((user, exercise)))
    }

    /// Gets the exercise log of the user identified by the raw `user_id`.
    ///
    /// The user is returned if it exists, but its absence does not prevent looking up exercises.
    /// A missing `filter` represents criteria that cannot match any exercise.
    pub(crate) async fn get_logs(
        self,
        user_id: &str,
        filter: Option<ExerciseFilter>,
    ) -> DriverResult<(Option<User>, Vec<Exercise>)> {
        let Ok(id) = UserId::parse(user_id) else {
            return Ok((None, vec![]));
        };

        let mut tx = self.db.begin().await?;

        let user = db::get_user_by_id(tx.ex(), &id).await?;
        let exercises = match filter {
            Some(filter) => db::get_exercises(tx.ex(), &id, &filter).await?,
            None => vec![],
        };

        tx.commit().await?;
        Ok((user, exercises))
    }
}
