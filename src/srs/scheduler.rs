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

use crate::srs::error::ScheduleError;
use crate::srs::grade::Grade;
use crate::srs::policy::MAX_EASE;
use crate::srs::policy::MIN_EASE;
use crate::srs::policy::Policy;
use crate::types::card::Card;
use crate::types::card::SchedulingState;
use crate::types::date::Date;
use crate::types::status::Status;

/// Computes a card's next state from a review. All operations are pure: they
/// take the current date as a parameter and return a new card.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    policy: Policy,
}

impl Scheduler {
    pub fn new(policy: Policy) -> Self {
        Self { policy }
    }

    /// Apply a review with the given grade on `today`.
    pub fn review(&self, card: &Card, grade: Grade, today: Date) -> Result<Card, ScheduleError> {
        let before = *card.state();
        before
            .validate()
            .map_err(|e| ScheduleError::InvalidState(format!("card {}: {e}", card.id().short())))?;
        let after = match before.status {
            Status::Suspended => {
                return Err(ScheduleError::InvalidState(format!(
                    "card {} is suspended; unsuspend it before reviewing",
                    card.id().short()
                )));
            }
            Status::Review | Status::Mastered if !grade.is_pass() => self.lapse(&before, today)?,
            Status::Learning if !grade.is_pass() => self.relearn(&before, grade, today)?,
            Status::New | Status::Learning | Status::Review | Status::Mastered => {
                self.advance(&before, grade, today)?
            }
        };
        self.check_review(&before, &after, grade, today)?;
        Ok(card.with_state(after))
    }

    /// Classify a raw 0–5 quality signal, then review.
    #[cfg(test)]
    pub fn review_quality(
        &self,
        card: &Card,
        quality: i64,
        today: Date,
    ) -> Result<Card, ScheduleError> {
        let grade = Grade::new(quality)?;
        self.review(card, grade, today)
    }

    /// Take a card out of rotation.
    pub fn suspend(&self, card: &Card) -> Result<Card, ScheduleError> {
        let before = *card.state();
        if before.status == Status::Suspended {
            return Err(ScheduleError::InvalidState(format!(
                "card {} is already suspended",
                card.id().short()
            )));
        }
        let after = SchedulingState {
            status: Status::Suspended,
            due_date: None,
            ..before
        };
        after.validate().map_err(ScheduleError::InvariantViolation)?;
        Ok(card.with_state(after))
    }

    /// Put a suspended card back into rotation. Its status is recovered from
    /// its review history, and a card that was ever reviewed is due `today`.
    pub fn unsuspend(&self, card: &Card, today: Date) -> Result<Card, ScheduleError> {
        let before = *card.state();
        if before.status != Status::Suspended {
            return Err(ScheduleError::InvalidState(format!(
                "card {} is not suspended",
                card.id().short()
            )));
        }
        let after = if before.reps == 0 {
            SchedulingState {
                status: Status::New,
                interval: 0,
                due_date: None,
                ..before
            }
        } else {
            let status = if self.qualifies_as_mastered(before.interval, before.lapses) {
                Status::Mastered
            } else if before.interval >= self.policy.graduating_interval {
                Status::Review
            } else {
                Status::Learning
            };
            SchedulingState {
                status,
                due_date: Some(today),
                ..before
            }
        };
        after.validate().map_err(ScheduleError::InvariantViolation)?;
        Ok(card.with_state(after))
    }

    /// A successful review, or any first review: SM-2 ease and interval
    /// update.
    fn advance(
        &self,
        before: &SchedulingState,
        grade: Grade,
        today: Date,
    ) -> Result<SchedulingState, ScheduleError> {
        let ease = clamp_ease(before.ease + ease_delta(grade));
        let interval = match before.reps {
            0 => 1,
            1 => 6,
            _ => {
                let grown = (f64::from(before.interval) * ease).round();
                if !grown.is_finite() {
                    return Err(ScheduleError::InvariantViolation(format!(
                        "interval {} times ease {ease} is not finite",
                        before.interval
                    )));
                }
                grown.min(f64::from(u32::MAX)) as u32
            }
        };
        let interval = interval
            .min(self.policy.maximum_interval)
            .max(before.interval);
        let lapses = before.lapses;
        let status = match before.status {
            Status::New => Status::Learning,
            Status::Learning => {
                if interval >= self.policy.graduating_interval {
                    Status::Review
                } else {
                    Status::Learning
                }
            }
            _ => {
                if self.qualifies_as_mastered(interval, lapses) {
                    Status::Mastered
                } else {
                    Status::Review
                }
            }
        };
        Ok(SchedulingState {
            status,
            ease,
            interval,
            lapses,
            reps: before.reps + 1,
            due_date: Some(due_after(today, interval)?),
        })
    }

    /// A failed review of a card that is still learning: ease follows SM-2,
    /// the interval goes back to the relearning step.
    fn relearn(
        &self,
        before: &SchedulingState,
        grade: Grade,
        today: Date,
    ) -> Result<SchedulingState, ScheduleError> {
        let interval = self.policy.relearning_interval;
        Ok(SchedulingState {
            status: Status::Learning,
            ease: clamp_ease(before.ease + ease_delta(grade)),
            interval,
            lapses: before.lapses,
            reps: before.reps + 1,
            due_date: Some(due_after(today, interval)?),
        })
    }

    /// A failed review of a graduated card.
    fn lapse(
        &self,
        before: &SchedulingState,
        today: Date,
    ) -> Result<SchedulingState, ScheduleError> {
        let interval = self.policy.relearning_interval;
        Ok(SchedulingState {
            status: Status::Learning,
            ease: clamp_ease(before.ease - self.policy.lapse_ease_penalty),
            interval,
            lapses: before.lapses + 1,
            reps: before.reps + 1,
            due_date: Some(due_after(today, interval)?),
        })
    }

    fn qualifies_as_mastered(&self, interval: u32, lapses: u32) -> bool {
        interval >= self.policy.mastered_interval && lapses < self.policy.lapse_ceiling
    }

    fn check_review(
        &self,
        before: &SchedulingState,
        after: &SchedulingState,
        grade: Grade,
        today: Date,
    ) -> Result<(), ScheduleError> {
        after.validate().map_err(ScheduleError::InvariantViolation)?;
        if after.reps != before.reps + 1 {
            return Err(ScheduleError::InvariantViolation(format!(
                "review count went from {} to {}",
                before.reps, after.reps
            )));
        }
        if grade.is_pass() && after.interval < before.interval {
            return Err(ScheduleError::InvariantViolation(format!(
                "interval shrank from {} to {} on a passing review",
                before.interval, after.interval
            )));
        }
        if after.due_date != today.add_days(after.interval) {
            return Err(ScheduleError::InvariantViolation(
                "due date is not today plus the interval".to_string(),
            ));
        }
        let qualifies = self.qualifies_as_mastered(after.interval, after.lapses);
        if after.status == Status::Mastered && !qualifies {
            return Err(ScheduleError::InvariantViolation(format!(
                "mastered card with interval {} and {} lapses",
                after.interval, after.lapses
            )));
        }
        Ok(())
    }
}

/// The SM-2 ease adjustment: +0.1 for a perfect grade, 0 for 4, and
/// increasingly negative below.
fn ease_delta(grade: Grade) -> f64 {
    let miss = f64::from(Grade::MAX - grade.value());
    0.1 - miss * (0.08 + miss * 0.02)
}

fn clamp_ease(ease: f64) -> f64 {
    ease.clamp(MIN_EASE, MAX_EASE)
}

fn due_after(today: Date, interval: u32) -> Result<Date, ScheduleError> {
    today.add_days(interval).ok_or_else(|| {
        ScheduleError::InvariantViolation(format!("{today} plus {interval} days overflows"))
    })
}
