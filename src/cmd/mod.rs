// Copyright 2026 The Synapze Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

pub mod check;
pub mod due;
pub mod export;
pub mod manage;
pub mod orphans;
pub mod review;
pub mod stats;

use crate::error::Fallible;
use crate::types::date::Date;

/// The date to schedule against: the `--today` argument if given, otherwise
/// the local date.
pub fn resolve_today(today: Option<String>) -> Fallible<Date> {
    match today {
        Some(s) => Date::parse(&s),
        None => Ok(Date::today()),
    }
}
