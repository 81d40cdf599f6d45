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

//! Database abstraction in terms of the operations needed by the service.

use crate::model::{Description, Exercise, ExerciseFilter, User, UserId, Username};
use exercise_tracker_core::db::postgres;
use exercise_tracker_core::db::sqlite::{self, build_date, unpack_date};
use exercise_tracker_core::db::{DbError, DbResult, Executor};
use sqlx::Row;
use sqlx::postgres::PgRow;
use sqlx::sqlite::SqliteRow;
use time::Date;


/// Initializes the database schema.
pub(crate) async fn init_schema(ex: &mut Executor) -> DbResult<()> {
    match ex {
        Executor::Postgres(ex) => postgres::run_schema(ex, include_str!("postgres.sql")).await,
        Executor::Sqlite(ex) => sqlite::run_schema(ex, include_str!("sqlite.sql")).await,
    }
}

impl TryFrom<PgRow> for User {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: String = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let username: String = row.try_get("username").map_err(postgres::map_sqlx_error)?;

        Ok(User::new(UserId::parse(&id)?, Username::new(username)?))
    }
}

impl TryFrom<SqliteRow> for User {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: String = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let username: String = row.try_get("username").map_err(sqlite::map_sqlx_error)?;

        Ok(User::new(UserId::parse(&id)?, Username::new(username)?))
    }
}

impl TryFrom<PgRow> for Exercise {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let user_id: String = row.try_get("user_id").map_err(postgres::map_sqlx_error)?;
        let description: String = row.try_get("description").map_err(postgres::map_sqlx_error)?;
        let duration: i64 = row.try_get("duration").map_err(postgres::map_sqlx_error)?;
        let date: Date = row.try_get("date").map_err(postgres::map_sqlx_error)?;

        Ok(Exercise::new(UserId::parse(&user_id)?, Description::new(description)?, duration, date))
    }
}

impl TryFrom<SqliteRow> for Exercise {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let user_id: String = row.try_get("user_id").map_err(sqlite::map_sqlx_error)?;
        let description: String = row.try_get("description").map_err(sqlite::map_sqlx_error)?;
        let duration: i64 = row.try_get("duration").map_err(sqlite::map_sqlx_error)?;
        let date_jd: i64 = row.try_get("date_jd").map_err(sqlite::map_sqlx_error)?;

        Ok(Exercise::new(
            UserId::parse(&user_id)?,
            Description::new(description)?,
            duration,
            build_date(date_jd)?,
        ))
    }
}

/// Creates a new `user`.
///
/// Fails with `AlreadyExists` if the username or the identifier are already taken, in which case
/// nothing is written.
pub(crate) async fn create_user(ex: &mut Executor, user: &User) -> DbResult<()> {
    let id = user.id().to_string();
    let rows_affected = match ex {
        Executor::Postgres(ex) => {
            let query_str =
                "INSERT INTO users (id, username) VALUES ($1, $2) ON CONFLICT DO NOTHING";
            let done = sqlx::query(query_str)
                .bind(id.as_str())
                .bind(user.username().as_str())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        Executor::Sqlite(ex) => {
            let query_str = "INSERT INTO users (id, username) VALUES (?, ?) ON CONFLICT DO NOTHING";
            let done = sqlx::query(query_str)
                .bind(id.as_str())
                .bind(user.username().as_str())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }
    };

    match rows_affected {
        0 => Err(DbError::AlreadyExists),
        1 => Ok(()),
        _ => Err(DbError::BackendError("Insertion affected more than one row".to_owned())),
    }
}

/// Gets the user identified by `id`, if any.
pub(crate) async fn get_user_by_id(ex: &mut Executor, id: &UserId) -> DbResult<Option<User>> {
    match ex {
        Executor::Postgres(ex) => {
            let query_str = "SELECT id, username FROM users WHERE id = $1";
            let maybe_row = sqlx::query(query_str)
                .bind(id.to_string())
                .fetch_optional(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            maybe_row.map(User::try_from).transpose()
        }

        Executor::Sqlite(ex) => {
            let query_str = "SELECT id, username FROM users WHERE id = ?";
            let maybe_row = sqlx::query(query_str)
                .bind(id.to_string())
                .fetch_optional(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            maybe_row.map(User::try_from).transpose()
        }
    }
}

/// Gets the user named `username`, if any.
pub(crate) async fn get_user_by_username(
    ex: &mut Executor,
    username: &Username,
) -> DbResult<Option<User>> {
    match ex {
        Executor::Postgres(ex) => {
            let query_str = "SELECT id, username FROM users WHERE username = $1";
            let maybe_row = sqlx::query(query_str)
                .bind(username.as_str())
                .fetch_optional(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            maybe_row.map(User::try_from).transpose()
        }

        Executor::Sqlite(ex) => {
            let query_str = "SELECT id, username FROM users WHERE username = ?";
            let maybe_row = sqlx::query(query_str)
                .bind(username.as_str())
                .fetch_optional(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            maybe_row.map(User::try_from).transpose()
        }
    }
}

/// Gets all users in the order in which they were created.
pub(crate) async fn list_users(ex: &mut Executor) -> DbResult<Vec<User>> {
    let query_str = "SELECT id, username FROM users ORDER BY seq";
    match ex {
        Executor::Postgres(ex) => {
            let rows = sqlx::query(query_str)
                .fetch_all(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            rows.into_iter().map(User::try_from).collect()
        }

        Executor::Sqlite(ex) => {
            let rows =
                sqlx::query(query_str).fetch_all(ex.conn()).await.map_err(sqlite::map_sqlx_error)?;
            rows.into_iter().map(User::try_from).collect()
        }
    }
}

/// Records a new `exercise`.
///
/// The owner of the exercise is not validated against the existing users.
pub(crate) async fn create_exercise(ex: &mut Executor, exercise: &Exercise) -> DbResult<()> {
    let user_id = exercise.user_id().to_string();
    let rows_affected = match ex {
        Executor::Postgres(ex) => {
            let query_str = "
                INSERT INTO exercises (user_id, description, duration, date)
                VALUES ($1, $2, $3, $4)";
            let done = sqlx::query(query_str)
                .bind(user_id.as_str())
                .bind(exercise.description().as_str())
                .bind(*exercise.duration())
                .bind(*exercise.date())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        Executor::Sqlite(ex) => {
            let query_str = "
                INSERT INTO exercises (user_id, description, duration, date_jd)
                VALUES (?, ?, ?, ?)";
            let done = sqlx::query(query_str)
                .bind(user_id.as_str())
                .bind(exercise.description().as_str())
                .bind(*exercise.duration())
                .bind(unpack_date(*exercise.date()))
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }
    };

    if rows_affected != 1 {
        return Err(DbError::BackendError("Insertion affected more than one row".to_owned()));
    }
    Ok(())
}

/// Gets the exercises of the user identified by `user_id` that match `filter`, in the order in
/// which they were recorded.
pub(crate) async fn get_exercises(
    ex: &mut Executor,
    user_id: &UserId,
    filter: &ExerciseFilter,
) -> DbResult<Vec<Exercise>> {
    let user_id = user_id.to_string();
    match ex {
        Executor::Postgres(ex) => {
            let query_str = "
                SELECT user_id, description, duration, date
                FROM exercises
                WHERE
                    user_id = $1
                    AND ($2::DATE IS NULL OR date >= $2)
                    AND ($3::DATE IS NULL OR date <= $3)
                ORDER BY id
                LIMIT $4";
            let rows = sqlx::query(query_str)
                .bind(user_id.as_str())
                .bind(filter.from)
                .bind(filter.to)
                .bind(filter.limit)
                .fetch_all(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            rows.into_iter().map(Exercise::try_from).collect()
        }

        Executor::Sqlite(ex) => {
            let from_jd = filter.from.map(unpack_date);
            let to_jd = filter.to.map(unpack_date);

            // A negative limit means "no limit" in SQLite.
            let limit = filter.limit.unwrap_or(-1);

            let query_str = "
                SELECT user_id, description, duration, date_jd
                FROM exercises
                WHERE
                    user_id = ?
                    AND (? IS NULL OR date_jd >= ?)
                    AND (? IS NULL OR date_jd <= ?)
                ORDER BY id
                LIMIT ?";
            let rows = sqlx::query(query_str)
                .bind(user_id.as_str())
                .bind(from_jd)
                .bind(from_jd)
                .bind(to_jd)
                .bind(to_jd)
                .bind(limit)
                .fetch_all(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            rows.into_iter().map(Exercise::try_from).collect()
        }
    }
}
