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

//! High-level data types.

mod date;
pub(crate) use date::{ShortDate, parse_date};
mod exercise;
pub(crate) use exercise::{Description, Exercise};
mod input;
pub(crate) use input::{DurationInput, ExerciseFilter, ExerciseInput};
mod rejection;
pub(crate) use rejection::{Outcome, Rejection};
mod user;
pub(crate) use user::{User, UserId, Username};
