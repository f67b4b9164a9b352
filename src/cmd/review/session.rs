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

use crate::db::Database;
use crate::db::ReviewRecord;
use crate::error::Fallible;
use crate::error::fail;
use crate::srs::grade::Grade;
use crate::srs::scheduler::Scheduler;
use crate::types::card::Card;
use crate::types::date::Date;
use crate::types::timestamp::Timestamp;

/// A study session. Reviews are held in memory until the session ends, so
/// undo is just restoring the previous card, and nothing is written until
/// `finish`.
pub struct Session {
    scheduler: Scheduler,
    today: Date,
    started_at: Timestamp,
    /// Cards left to review. The first one is the current card.
    queue: Vec<Card>,
    /// Reviews made so far, most recent last.
    done: Vec<Done>,
}

struct Done {
    before: Card,
    after: Card,
    record: ReviewRecord,
}

impl Session {
    pub fn new(scheduler: Scheduler, cards: Vec<Card>, today: Date) -> Self {
        Self {
            scheduler,
            today,
            started_at: Timestamp::now(),
            queue: cards,
            done: Vec::new(),
        }
    }

    pub fn current(&self) -> Option<&Card> {
        self.queue.first()
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    pub fn reviewed(&self) -> usize {
        self.done.len()
    }

    pub fn total(&self) -> usize {
        self.queue.len() + self.done.len()
    }

    /// Grade the current card and move on to the next one. Returns the card
    /// as rescheduled.
    pub fn grade(&mut self, grade: Grade) -> Fallible<&Card> {
        let Some(before) = self.queue.first() else {
            return fail("no card to review.");
        };
        let after = self.scheduler.review(before, grade, self.today)?;
        let before = self.queue.remove(0);
        let Some(due_date) = after.due_date() else {
            return fail(format!("card {} has no due date after review.", after.id()));
        };
        log::debug!(
            "{} grade={} {} -> {} ease={:.2} interval={}d due={}",
            after.id().short(),
            grade.value(),
            before.status(),
            after.status(),
            after.ease(),
            after.interval(),
            due_date
        );
        let record = ReviewRecord {
            card_id: after.id(),
            reviewed_at: Timestamp::now(),
            reviewed_on: self.today,
            grade,
            status: after.status(),
            ease: after.ease(),
            interval: after.interval(),
            due_date,
        };
        self.done.push(Done {
            before,
            after,
            record,
        });
        Ok(&self.done[self.done.len() - 1].after)
    }

    /// Take back the most recent review. The card goes back to the front of
    /// the queue in its previous state. Returns `None` if there is nothing to
    /// undo.
    pub fn undo(&mut self) -> Option<&Card> {
        let done = self.done.pop()?;
        log::debug!("Undoing review of {}", done.before.id().short());
        self.queue.insert(0, done.before);
        self.queue.first()
    }

    /// End the session, saving every review and the new card states in one
    /// transaction. Returns the number of reviews saved.
    pub fn finish(self, db: &mut Database) -> Fallible<usize> {
        if self.done.is_empty() {
            log::debug!("Session ended with no reviews.");
            return Ok(0);
        }
        let ended_at = Timestamp::now();
        let mut records = Vec::with_capacity(self.done.len());
        let mut cards = Vec::with_capacity(self.done.len());
        for done in self.done {
            records.push(done.record);
            cards.push(done.after);
        }
        db.save_session(self.started_at, ended_at, &records, &cards)?;
        log::debug!("Session saved with {} reviews.", records.len());
        Ok(records.len())
    }
}
