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

use thiserror::Error;

/// Errors raised by the scheduling core.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScheduleError {
    /// The grade is outside [0, 5].
    #[error("invalid grade {0}: must be between 0 and 5")]
    InvalidGrade(i64),

    /// The card's state does not admit the requested operation, or the
    /// stored state is corrupt.
    #[error("invalid card state: {0}")]
    InvalidState(String),

    /// The scheduler produced a record that breaks a card invariant. This is
    /// a bug in the scheduler and must not be ignored.
    #[error("scheduler invariant violated: {0}")]
    InvariantViolation(String),
}
