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

use chrono::Days;
use chrono::Local;
use chrono::NaiveDate;
use rusqlite::ToSql;
use rusqlite::types::FromSql;
use rusqlite::types::FromSqlError;
use rusqlite::types::FromSqlResult;
use rusqlite::types::ToSqlOutput;
use rusqlite::types::ValueRef;
use serde::Serialize;

use crate::error::Fallible;

const FORMAT: &str = "%Y-%m-%d";

/// A calendar date with no time component.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Date(NaiveDate);

impl Date {
    /// Today's date in the local timezone. This is the only place the system
    /// clock is read; everything downstream takes the date as a parameter.
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    pub fn parse(s: &str) -> Fallible<Self> {
        let date = NaiveDate::parse_from_str(s.trim(), FORMAT)?;
        Ok(Self(date))
    }

    /// The date `days` days after this one, or `None` on calendar overflow.
    pub fn add_days(self, days: u32) -> Option<Self> {
        let days = Days::new(u64::from(days));
        self.0.checked_add_days(days).map(Self)
    }
}

impl Display for Date {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(FORMAT))
    }
}

impl ToSql for Date {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.to_string()))
    }
}

impl FromSql for Date {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let string: String = FromSql::column_result(value)?;
        let date = NaiveDate::parse_from_str(&string, FORMAT)
            .map_err(|e| FromSqlError::Other(Box::new(e)))?;
        Ok(Date(date))
    }
}

impl Serialize for Date {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() -> Fallible<()> {
        let date = Date::parse("2026-02-21")?;
        assert_eq!(date.to_string(), "2026-02-21");
        Ok(())
    }

    #[test]
    fn test_parse_invalid() {
        assert!(Date::parse("21/02/2026").is_err());
        assert!(Date::parse("2026-02-30").is_err());
    }

    #[test]
    fn test_add_days() -> Fallible<()> {
        let date = Date::parse("2026-02-21")?;
        assert_eq!(date.add_days(0), Some(date));
        assert_eq!(date.add_days(8), Some(Date::parse("2026-03-01")?));
        assert_eq!(date.add_days(u32::MAX), None);
        Ok(())
    }

    #[test]
    fn test_serialize() -> Fallible<()> {
        let date = Date::parse("2026-02-21")?;
        assert_eq!(serde_json::to_string(&date)?, "\"2026-02-21\"");
        Ok(())
    }
}
