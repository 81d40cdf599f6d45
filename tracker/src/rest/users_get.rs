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

//! API to list all users.

use crate::driver::Driver;
use crate::model::User;
use axum::Json;
use axum::extract::State;
use exercise_tracker_core::rest::{EmptyBody, RestResult};

/// GET handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    _: EmptyBody,
) -> RestResult<Json<Vec<User>>> {
    Ok(Json(driver.get_users().await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::testutils::*;
    use axum::http;
    use exercise_tracker_core::rest::testutils::OneShotBuilder;
    use exercise_tracker_core::test_payload_must_be_empty;

    fn route() -> (http::Method, String) {
        (http::Method::GET, "/api/users".to_owned())
    }

    #[tokio::test]
    async fn test_empty() {
        let context = TestContext::setup().await;

        let response = OneShotBuilder::new(context.app(), route())
            .send_empty()
            .await
            .expect_json::<Vec<User>>()
            .await;
        assert!(response.is_empty());
    }

    #[tokio::test]
    async fn test_in_creation_order() {
        let context = TestContext::setup().await;

        let user1 = context.create_user("mike").await;
        let user2 = context.create_user("alice").await;
        let user3 = context.create_user("zed").await;

        let response = OneShotBuilder::new(context.app(), route())
            .send_empty()
            .await
            .expect_json::<Vec<User>>()
            .await;
        assert_eq!(vec![user1, user2, user3], response);
    }

    #[tokio::test]
    async fn test_shape() {
        let context = TestContext::setup().await;

        let user = context.create_user("alice").await;

        OneShotBuilder::new(context.app(), route())
            .send_empty()
            .await
            .expect_text(&format!(r#"^\[\{{"username":"alice","_id":"{}"\}}\]$"#, user.id()))
            .await;
    }

    test_payload_must_be_empty!(TestContext::setup().await.app(), route());
}
