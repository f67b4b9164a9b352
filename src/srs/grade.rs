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

use rusqlite::ToSql;
use rusqlite::types::FromSql;
use rusqlite::types::FromSqlError;
use rusqlite::types::FromSqlResult;
use rusqlite::types::ToSqlOutput;
use rusqlite::types::ValueRef;
use serde::Serialize;

use crate::srs::error::ScheduleError;

/// A normalized review grade in [0, 5]: 0 is a total blackout, 3 a marginal
/// pass, 5 perfect recall.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize)]
pub struct Grade(u8);

impl Grade {
    pub const MAX: u8 = 5;

    /// The lowest passing grade.
    pub const PASS: u8 = 3;

    pub fn new(value: i64) -> Result<Self, ScheduleError> {
        if (0..=i64::from(Self::MAX)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(ScheduleError::InvalidGrade(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_pass(self) -> bool {
        self.0 >= Self::PASS
    }
}

/// What the learner said in the binary study mode.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Outcome {
    KnewIt,
    Forgot,
}

impl Outcome {
    /// The grade the scheduler sees for this outcome. `Forgot` must stay below
    /// the passing grade and `KnewIt` above it: a forgotten card lapses, a
    /// known card advances.
    pub fn grade(self) -> Grade {
        match self {
            Outcome::Forgot => Grade(2),
            Outcome::KnewIt => Grade(4),
        }
    }
}

/// A raw signal from the study interface.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Signal {
    Binary(Outcome),
    Quality(i64),
}

/// Translate a study signal into a grade.
pub fn classify(signal: Signal) -> Result<Grade, ScheduleError> {
    match signal {
        Signal::Binary(outcome) => Ok(outcome.grade()),
        Signal::Quality(quality) => Grade::new(quality),
    }
}

impl ToSql for Grade {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.0))
    }
}

impl FromSql for Grade {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let n: i64 = FromSql::column_result(value)?;
        Grade::new(n).map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}
