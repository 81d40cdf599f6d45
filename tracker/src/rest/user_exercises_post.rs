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

//! API to record an exercise for a user.

use crate::driver::Driver;
use crate::model::{Description, Exercise, ExerciseInput, ShortDate, User, UserId, Username};
use crate::rest::reply;
use axum::extract::{Path, State};
use axum::response::Response;
use exercise_tracker_core::rest::{FormOrJson, RestResult};
#[cfg(test)]
use serde::Deserialize;
use serde::Serialize;

/// Details of a recorded exercise, merged with the details of its owner.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub(crate) struct ExerciseResponse {
    /// Name of the owner of the exercise.
    pub(crate) username: Username,

    /// Description of the exercise.
    pub(crate) description: Description,

    /// Duration of the exercise.
    pub(crate) duration: i64,

    /// Date of the exercise.
    pub(crate) date: ShortDate,

    /// Identifier of the owner of the exercise.
    #[serde(rename = "_id")]
    pub(crate) id: UserId,
}

impl ExerciseResponse {
    /// Builds the response for an `exercise` owned by `user`.
    fn new(user: User, exercise: Exercise) -> Self {
        Self {
            username: user.username().clone(),
            description: exercise.description().clone(),
            duration: *exercise.duration(),
            date: ShortDate(*exercise.date()),
            id: *user.id(),
        }
    }
}

/// POST handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(user_id): Path<String>,
    FormOrJson(input): FormOrJson<ExerciseInput>,
) -> RestResult<Response> {
    let outcome = driver.add_exercise(&user_id, input).await?;
    Ok(reply(outcome.map(|(user, exercise)| ExerciseResponse::new(user, exercise))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::model::ExerciseFilter;
    use crate::rest::MessageResponse;
    use crate::rest::testutils::*;
    use axum::http;
    use exercise_tracker_core::db::Executor;
    use exercise_tracker_core::rest::testutils::OneShotBuilder;
    use exercise_tracker_core::test_payload_must_be_form_or_json;
    use serde_json::json;
    use std::collections::HashMap;
    use time::macros::{date, datetime};

    fn route(user_id: &UserId) -> (http::Method, String) {
        (http::Method::POST, format!("/api/users/{}/exercises", user_id))
    }

    #[tokio::test]
    async fn test_ok_form() {
        let context = TestContext::setup().await;
        let user = context.create_user("alice").await;

        let form =
            HashMap::from([("description", "run"), ("duration", "30"), ("date", "2023-01-15")]);
        OneShotBuilder::new(context.app(), route(user.id()))
            .send_form(form)
            .await
            .expect_text(&format!(
                r#"^\{{"username":"alice","description":"run","duration":30,"date":"Sun Jan 15 2023","_id":"{}"\}}$"#,
                user.id()
            ))
            .await;

        let exercises =
            db::get_exercises(&mut context.ex().await, user.id(), &ExerciseFilter::default())
                .await
                .unwrap();
        assert_eq!(1, exercises.len());
        assert_eq!("run", exercises[0].description().as_str());
        assert_eq!(30, *exercises[0].duration());
        assert_eq!(&date!(2023 - 01 - 15), exercises[0].date());
    }

    #[tokio::test]
    async fn test_ok_json() {
        let context = TestContext::setup().await;
        let user = context.create_user("alice").await;

        let response = OneShotBuilder::new(context.app(), route(user.id()))
            .send_json(json!({"description": "swim", "duration": 45, "date": "2023-03-02"}))
            .await
            .expect_json::<ExerciseResponse>()
            .await;
        assert_eq!("alice", response.username.as_str());
        assert_eq!("swim", response.description.as_str());
        assert_eq!(45, response.duration);
        assert_eq!("Thu Mar 02 2023", response.date.to_string());
        assert_eq!(user.id(), &response.id);
    }

    #[tokio::test]
    async fn test_default_date_is_today() {
        let context = TestContext::setup().await;
        let user = context.create_user("alice").await;
        context.clock().set(datetime!(2023-07-04 08:00:00 UTC));

        let response = OneShotBuilder::new(context.app(), route(user.id()))
            .send_json(json!({"description": "run", "duration": "30"}))
            .await
            .expect_json::<ExerciseResponse>()
            .await;
        assert_eq!("Tue Jul 04 2023", response.date.to_string());
    }

    /// Sends `body` to add an exercise to the user identified by `raw_id` and expects the request
    /// to be rejected with `exp_message`.
    async fn do_rejected_test(
        context: &TestContext,
        raw_id: &str,
        body: serde_json::Value,
        exp_message: &str,
    ) {
        let response = OneShotBuilder::new(
            context.app(),
            (http::Method::POST, format!("/api/users/{}/exercises", raw_id)),
        )
        .send_json(body)
        .await
        .expect_json::<MessageResponse>()
        .await;
        assert_eq!(exp_message, response.message);
    }

    #[tokio::test]
    async fn test_invalid_user() {
        let context = TestContext::setup().await;
        let body = json!({"description": "run", "duration": 30});

        do_rejected_test(&context, "bad-id", body.clone(), "Invalid user id").await;
        do_rejected_test(&context, &UserId::generate().to_string(), body, "Invalid user id").await;
    }

    #[tokio::test]
    async fn test_missing_description() {
        let context = TestContext::setup().await;
        let user = context.create_user("alice").await;
        let raw_id = user.id().to_string();

        do_rejected_test(&context, &raw_id, json!({"duration": 30}), "Description must be provided")
            .await;
        do_rejected_test(
            &context,
            &raw_id,
            json!({"description": "", "duration": 30}),
            "Description must be provided",
        )
        .await;

        assert!(
            db::get_exercises(&mut context.ex().await, user.id(), &ExerciseFilter::default())
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_missing_duration() {
        let context = TestContext::setup().await;
        let user = context.create_user("alice").await;
        let raw_id = user.id().to_string();

        for duration in [json!(null), json!(0), json!(""), json!("abc")] {
            do_rejected_test(
                &context,
                &raw_id,
                json!({"description": "run", "duration": duration}),
                "Duration must be provided",
            )
            .await;
        }
    }

    #[tokio::test]
    async fn test_invalid_date() {
        let context = TestContext::setup().await;
        let user = context.create_user("alice").await;

        do_rejected_test(
            &context,
            &user.id().to_string(),
            json!({"description": "run", "duration": 30, "date": "not a date"}),
            "Date must be a valid date",
        )
        .await;
    }

    #[tokio::test]
    async fn test_database_failure_hides_details() {
        let context = TestContext::setup().await;
        let user = context.create_user("alice").await;

        match context.ex().await {
            Executor::Postgres(mut ex) => {
                sqlx::query("DROP TABLE exercises").execute(ex.conn()).await.unwrap();
            }
            Executor::Sqlite(mut ex) => {
                sqlx::query("DROP TABLE exercises").execute(ex.conn()).await.unwrap();
            }
        }

        OneShotBuilder::new(context.app(), route(user.id()))
            .send_json(json!({"description": "run", "duration": 30}))
            .await
            .expect_status(http::StatusCode::INTERNAL_SERVER_ERROR)
            .expect_text(r#"^\{"error":"Internal Server Error"\}$"#)
            .await;
    }

    test_payload_must_be_form_or_json!(
        TestContext::setup().await.app(),
        route(&UserId::generate())
    );
}
