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

//! API to create a new user.

use crate::driver::Driver;
use crate::rest::reply;
use axum::extract::State;
use axum::response::Response;
use exercise_tracker_core::rest::{FormOrJson, RestResult};
use serde::{Deserialize, Serialize};

/// Message sent to the server to create a user.
#[derive(Default, Deserialize, Serialize)]
pub(crate) struct CreateUserRequest {
    /// Desired username.
    pub(crate) username: Option<String>,
}

/// POST handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    FormOrJson(request): FormOrJson<CreateUserRequest>,
) -> RestResult<Response> {
    Ok(reply(driver.create_user(request.username).await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::model::{User, Username};
    use crate::rest::MessageResponse;
    use crate::rest::testutils::*;
    use axum::http;
    use exercise_tracker_core::rest::testutils::OneShotBuilder;
    use exercise_tracker_core::test_payload_must_be_form_or_json;
    use serde_json::json;

    fn route() -> (http::Method, String) {
        (http::Method::POST, "/api/users".to_owned())
    }

    #[tokio::test]
    async fn test_ok_form() {
        let context = TestContext::setup().await;

        let request = CreateUserRequest { username: Some("fcc_test".to_owned()) };
        let response = OneShotBuilder::new(context.app(), route())
            .send_form(request)
            .await
            .expect_json::<User>()
            .await;
        assert_eq!("fcc_test", response.username().as_str());

        let username = Username::new("fcc_test").unwrap();
        assert_eq!(
            Some(response),
            db::get_user_by_username(&mut context.ex().await, &username).await.unwrap()
        );
    }

    #[tokio::test]
    async fn test_ok_json() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route())
            .send_json(json!({"username": "alice"}))
            .await
            .expect_text(r#"^\{"username":"alice","_id":"[0-9a-f-]{36}"\}$"#)
            .await;
    }

    #[tokio::test]
    async fn test_already_exists() {
        let context = TestContext::setup().await;

        let user = context.create_user("alice").await;

        let request = CreateUserRequest { username: Some("alice".to_owned()) };
        let response = OneShotBuilder::new(context.app(), route())
            .send_form(request)
            .await
            .expect_json::<MessageResponse>()
            .await;
        assert_eq!("User already exists", response.message);

        assert_eq!(vec![user], db::list_users(&mut context.ex().await).await.unwrap());
    }

    #[tokio::test]
    async fn test_missing_username() {
        let context = TestContext::setup().await;

        let requests =
            [CreateUserRequest::default(), CreateUserRequest { username: Some(String::new()) }];
        for request in requests {
            let response = OneShotBuilder::new(context.app(), route())
                .send_form(request)
                .await
                .expect_json::<MessageResponse>()
                .await;
            assert_eq!("Username must be provided", response.message);
        }

        let response = OneShotBuilder::new(context.app(), route())
            .send_empty()
            .await
            .expect_json::<MessageResponse>()
            .await;
        assert_eq!("Username must be provided", response.message);

        assert!(db::list_users(&mut context.ex().await).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_bad_json() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route())
            .send_json(json!({"username": 5}))
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("invalid type")
            .await;
    }

    test_payload_must_be_form_or_json!(TestContext::setup().await.app(), route());
}
