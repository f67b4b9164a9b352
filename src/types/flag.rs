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

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;

/// A user-assigned colour marker. Has no effect on scheduling.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Flag {
    #[default]
    None,
    Red,
    Orange,
    Green,
    Blue,
}

impl Flag {
    pub fn as_u8(self) -> u8 {
        match self {
            Flag::None => 0,
            Flag::Red => 1,
            Flag::Orange => 2,
            Flag::Green => 3,
            Flag::Blue => 4,
        }
    }
}

impl TryFrom<u8> for Flag {
    type Error = ErrorReport;

    fn try_from(value: u8) -> Fallible<Self> {
        match value {
            0 => Ok(Flag::None),
            1 => Ok(Flag::Red),
            2 => Ok(Flag::Orange),
            3 => Ok(Flag::Green),
            4 => Ok(Flag::Blue),
            _ => fail(format!("invalid flag {value}: must be between 0 and 4")),
        }
    }
}

impl ToSql for Flag {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_u8()))
    }
}

impl FromSql for Flag {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let n: u8 = FromSql::column_result(value)?;
        Flag::try_from(n).map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}
