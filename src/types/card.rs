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

use serde::Serialize;

use crate::srs::error::ScheduleError;
use crate::srs::policy::INITIAL_EASE;
use crate::srs::policy::MAX_EASE;
use crate::srs::policy::MIN_EASE;
use crate::types::card_id::CardId;
use crate::types::date::Date;
use crate::types::flag::Flag;
use crate::types::status::Status;

/// The review statistics of a card.
#[derive(Clone, Copy, PartialEq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingState {
    pub status: Status,
    /// Multiplier for interval growth, in [`MIN_EASE`, `MAX_EASE`].
    pub ease: f64,
    /// Days until the next review. Zero means the card was never scheduled.
    pub interval: u32,
    /// Times the card was forgotten after graduating.
    pub lapses: u32,
    /// Completed reviews.
    pub reps: u32,
    pub due_date: Option<Date>,
}

impl SchedulingState {
    /// The state of a card that has never been reviewed.
    pub fn new_card() -> Self {
        Self {
            status: Status::New,
            ease: INITIAL_EASE,
            interval: 0,
            lapses: 0,
            reps: 0,
            due_date: None,
        }
    }

    /// Check the invariants that hold for every card regardless of policy.
    pub fn validate(&self) -> Result<(), String> {
        if !self.ease.is_finite() || self.ease < MIN_EASE || self.ease > MAX_EASE {
            return Err(format!(
                "ease {} is outside [{MIN_EASE}, {MAX_EASE}]",
                self.ease
            ));
        }
        if self.lapses > self.reps {
            return Err(format!(
                "{} lapses exceed {} reviews",
                self.lapses, self.reps
            ));
        }
        match self.status {
            Status::New => {
                if self.reps != 0 || self.interval != 0 || self.due_date.is_some() {
                    return Err("a new card has review history".to_string());
                }
            }
            Status::Suspended => {
                if self.due_date.is_some() {
                    return Err("a suspended card has a due date".to_string());
                }
                if self.reps > 0 && self.interval == 0 {
                    return Err("a reviewed suspended card has no interval".to_string());
                }
            }
            Status::Learning | Status::Review | Status::Mastered => {
                if self.reps == 0 {
                    return Err(format!("a {} card has no reviews", self.status));
                }
                if self.interval == 0 {
                    return Err(format!("a {} card has no interval", self.status));
                }
                if self.due_date.is_none() {
                    return Err(format!("a {} card has no due date", self.status));
                }
            }
        }
        Ok(())
    }
}

/// A flashcard and its review statistics.
///
/// The scheduling fields can only be changed by the scheduler, which returns
/// a new card rather than mutating this one.
#[derive(Clone, PartialEq, Debug)]
pub struct Card {
    id: CardId,
    deck_name: String,
    front: String,
    back: String,
    flag: Flag,
    state: SchedulingState,
}

impl Card {
    /// Create a card in `new` status.
    pub fn new(
        deck_name: impl Into<String>,
        front: impl Into<String>,
        back: impl Into<String>,
    ) -> Self {
        let deck_name = deck_name.into();
        let front = front.into().trim().to_string();
        let back = back.into().trim().to_string();
        Self {
            id: CardId::for_card(&deck_name, &front, &back),
            deck_name,
            front,
            back,
            flag: Flag::None,
            state: SchedulingState::new_card(),
        }
    }

    /// Rebuild a card from previously persisted state. Fails if the state is
    /// corrupt.
    pub(crate) fn restore(
        id: CardId,
        deck_name: String,
        front: String,
        back: String,
        flag: Flag,
        state: SchedulingState,
    ) -> Result<Self, ScheduleError> {
        state
            .validate()
            .map_err(|e| ScheduleError::InvalidState(format!("card {}: {e}", id.short())))?;
        Ok(Self {
            id,
            deck_name,
            front,
            back,
            flag,
            state,
        })
    }

    /// A copy of this card with different scheduling state.
    pub(crate) fn with_state(&self, state: SchedulingState) -> Self {
        Self {
            state,
            ..self.clone()
        }
    }

    pub fn with_flag(&self, flag: Flag) -> Self {
        Self {
            flag,
            ..self.clone()
        }
    }

    pub fn id(&self) -> CardId {
        self.id
    }

    pub fn deck_name(&self) -> &str {
        &self.deck_name
    }

    pub fn front(&self) -> &str {
        &self.front
    }

    pub fn back(&self) -> &str {
        &self.back
    }

    pub fn flag(&self) -> Flag {
        self.flag
    }

    pub fn state(&self) -> &SchedulingState {
        &self.state
    }

    pub fn status(&self) -> Status {
        self.state.status
    }

    pub fn ease(&self) -> f64 {
        self.state.ease
    }

    pub fn interval(&self) -> u32 {
        self.state.interval
    }

    pub fn lapses(&self) -> u32 {
        self.state.lapses
    }

    pub fn reps(&self) -> u32 {
        self.state.reps
    }

    pub fn due_date(&self) -> Option<Date> {
        self.state.due_date
    }

    /// Whether the card is scheduled for review on or before `today`. New
    /// and suspended cards are never due.
    pub fn is_due(&self, today: Date) -> bool {
        self.state.status.is_scheduled() && self.state.due_date.is_some_and(|d| d <= today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;

    fn scheduled(status: Status, due: Date) -> SchedulingState {
        SchedulingState {
            status,
            ease: 2.5,
            interval: 3,
            lapses: 0,
            reps: 2,
            due_date: Some(due),
        }
    }

    #[test]
    fn test_new_card() {
        let card = Card::new("Geography", "  Capital of France? ", "Paris\n");
        assert_eq!(card.front(), "Capital of France?");
        assert_eq!(card.back(), "Paris");
        assert_eq!(card.status(), Status::New);
        assert_eq!(card.ease(), INITIAL_EASE);
        assert_eq!(card.interval(), 0);
        assert_eq!(card.reps(), 0);
        assert_eq!(card.due_date(), None);
        assert_eq!(card.flag(), Flag::None);
        assert_eq!(
            card.id(),
            CardId::for_card("Geography", "Capital of France?", "Paris")
        );
        assert!(card.state().validate().is_ok());
    }

    #[test]
    fn test_validate_ease_bounds() {
        let mut state = SchedulingState::new_card();
        state.ease = 1.2;
        assert!(state.validate().is_err());
        state.ease = 4.01;
        assert!(state.validate().is_err());
        state.ease = f64::NAN;
        assert!(state.validate().is_err());
        state.ease = 4.0;
        assert!(state.validate().is_ok());
    }

    #[test]
    fn test_validate_new_has_no_history() {
        let mut state = SchedulingState::new_card();
        state.reps = 1;
        assert!(state.validate().is_err());
    }

    #[test]
    fn test_validate_suspended_has_no_due_date() -> Fallible<()> {
        let mut state = scheduled(Status::Suspended, Date::parse("2026-02-21")?);
        assert!(state.validate().is_err());
        state.due_date = None;
        assert!(state.validate().is_ok());
        Ok(())
    }

    #[test]
    fn test_validate_suspended_keeps_interval() -> Fallible<()> {
        let mut state = scheduled(Status::Suspended, Date::parse("2026-02-21")?);
        state.due_date = None;
        state.interval = 0;
        assert!(state.validate().is_err());
        // A card suspended before its first review has no interval.
        state.reps = 0;
        assert!(state.validate().is_ok());
        Ok(())
    }

    #[test]
    fn test_validate_scheduled_needs_due_date() -> Fallible<()> {
        let mut state = scheduled(Status::Review, Date::parse("2026-02-21")?);
        assert!(state.validate().is_ok());
        state.due_date = None;
        assert!(state.validate().is_err());
        Ok(())
    }

    #[test]
    fn test_restore_rejects_corrupt_state() {
        let mut state = SchedulingState::new_card();
        state.interval = 4;
        let card = Card::new("d", "f", "b");
        let result = Card::restore(
            card.id(),
            "d".to_string(),
            "f".to_string(),
            "b".to_string(),
            Flag::None,
            state,
        );
        assert!(matches!(result, Err(ScheduleError::InvalidState(_))));
    }

    #[test]
    fn test_is_due() -> Fallible<()> {
        let today = Date::parse("2026-02-21")?;
        let card = Card::new("d", "f", "b");
        assert!(!card.is_due(today));
        let due = card.with_state(scheduled(Status::Review, today));
        assert!(due.is_due(today));
        let later = card.with_state(scheduled(Status::Learning, Date::parse("2026-02-22")?));
        assert!(!later.is_due(today));
        Ok(())
    }

    #[test]
    fn test_with_flag_keeps_state() -> Fallible<()> {
        let today = Date::parse("2026-02-21")?;
        let card = Card::new("d", "f", "b").with_state(scheduled(Status::Review, today));
        let flagged = card.with_flag(Flag::Green);
        assert_eq!(flagged.flag(), Flag::Green);
        assert_eq!(flagged.state(), card.state());
        Ok(())
    }
}
