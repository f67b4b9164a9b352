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

use serde::Deserialize;
use serde::Serialize;

use crate::error::Fallible;
use crate::error::fail;

/// The lowest ease a card can have.
pub const MIN_EASE: f64 = 1.3;

/// The highest ease a card can have.
pub const MAX_EASE: f64 = 4.0;

/// The ease of a card that has never been reviewed.
pub const INITIAL_EASE: f64 = 2.5;

/// Scheduling thresholds. Every field can be overridden from the
/// `[scheduler]` table of the collection's configuration file.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Policy {
    /// A learning card whose interval reaches this many days moves to
    /// `review`.
    pub graduating_interval: u32,
    /// A reviewed card whose interval reaches this many days, with fewer than
    /// `lapse_ceiling` lapses, is `mastered`.
    pub mastered_interval: u32,
    pub lapse_ceiling: u32,
    /// Interval after a failed review.
    pub relearning_interval: u32,
    /// Ease lost on a lapse.
    pub lapse_ease_penalty: f64,
    /// Computed intervals are capped at this many days.
    pub maximum_interval: u32,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            graduating_interval: 10,
            mastered_interval: 21,
            lapse_ceiling: 3,
            relearning_interval: 1,
            lapse_ease_penalty: 0.2,
            maximum_interval: 36_500,
        }
    }
}

impl Policy {
    pub fn validate(&self) -> Fallible<()> {
        if self.relearning_interval == 0 {
            return fail("relearning_interval must be at least one day.");
        }
        if self.graduating_interval == 0 {
            return fail("graduating_interval must be at least one day.");
        }
        if self.graduating_interval > self.mastered_interval {
            return fail("graduating_interval must not exceed mastered_interval.");
        }
        if self.mastered_interval > self.maximum_interval {
            return fail("mastered_interval must not exceed maximum_interval.");
        }
        if self.relearning_interval > self.maximum_interval {
            return fail("relearning_interval must not exceed maximum_interval.");
        }
        if self.lapse_ceiling == 0 {
            return fail("lapse_ceiling must be at least one.");
        }
        let penalty = self.lapse_ease_penalty;
        if !penalty.is_finite() || !(0.0..=MAX_EASE - MIN_EASE).contains(&penalty) {
            return fail(format!(
                "lapse_ease_penalty must be between 0 and {:.1}.",
                MAX_EASE - MIN_EASE
            ));
        }
        Ok(())
    }
}
