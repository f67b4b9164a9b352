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

use std::fmt::Display;
use std::fmt::Formatter;

use rusqlite::ToSql;
use rusqlite::types::FromSql;
use rusqlite::types::FromSqlError;
use rusqlite::types::FromSqlResult;
use rusqlite::types::ToSqlOutput;
use rusqlite::types::ValueRef;
use serde::Serialize;

use crate::srs::error::ScheduleError;

/// Where a card is in its scheduling lifecycle.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Never reviewed.
    New,
    /// Reviewed, but not yet graduated, or relearning after a lapse.
    Learning,
    /// Graduated.
    Review,
    /// Manually taken out of rotation.
    Suspended,
    /// Long interval, few lapses.
    Mastered,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::New => "new",
            Status::Learning => "learning",
            Status::Review => "review",
            Status::Suspended => "suspended",
            Status::Mastered => "mastered",
        }
    }

    /// Whether cards in this status have a due date and can be due.
    pub fn is_scheduled(&self) -> bool {
        matches!(self, Status::Learning | Status::Review | Status::Mastered)
    }

    /// Study priority. Lower comes first. Suspended cards have none.
    pub fn urgency_rank(&self) -> Option<u8> {
        match self {
            Status::Learning => Some(0),
            Status::Review => Some(1),
            Status::New => Some(2),
            Status::Mastered => Some(3),
            Status::Suspended => None,
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for Status {
    type Error = ScheduleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "new" => Ok(Status::New),
            "learning" => Ok(Status::Learning),
            "review" => Ok(Status::Review),
            "suspended" => Ok(Status::Suspended),
            "mastered" => Ok(Status::Mastered),
            _ => Err(ScheduleError::InvalidState(format!(
                "unknown status: {value}"
            ))),
        }
    }
}

impl ToSql for Status {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Status {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let string: String = FromSql::column_result(value)?;
        Status::try_from(string.as_str()).map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_names() {
        for status in [
            Status::New,
            Status::Learning,
            Status::Review,
            Status::Suspended,
            Status::Mastered,
        ] {
            assert_eq!(Status::try_from(status.as_str()), Ok(status));
        }
    }

    #[test]
    fn test_unknown_status() {
        assert!(matches!(
            Status::try_from("graduated"),
            Err(ScheduleError::InvalidState(_))
        ));
    }

    #[test]
    fn test_urgency_rank() {
        assert!(Status::Learning.urgency_rank() < Status::Review.urgency_rank());
        assert!(Status::Review.urgency_rank() < Status::New.urgency_rank());
        assert!(Status::New.urgency_rank() < Status::Mastered.urgency_rank());
        assert_eq!(Status::Suspended.urgency_rank(), None);
    }
}
