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

use std::collections::HashMap;
use std::collections::HashSet;

use rusqlite::Connection;
use rusqlite::Row;
use rusqlite::Transaction;
use rusqlite::config::DbConfig;

use crate::error::Fallible;
use crate::error::fail;
use crate::srs::grade::Grade;
use crate::types::card::Card;
use crate::types::card::SchedulingState;
use crate::types::card_id::CardId;
use crate::types::date::Date;
use crate::types::status::Status;
use crate::types::timestamp::Timestamp;

pub struct Database {
    conn: Connection,
}

/// One review as stored in the log: the grade and the state it produced.
#[derive(Clone, Debug, PartialEq)]
pub struct ReviewRecord {
    pub card_id: CardId,
    pub reviewed_at: Timestamp,
    /// The date the scheduler was given for this review.
    pub reviewed_on: Date,
    pub grade: Grade,
    pub status: Status,
    pub ease: f64,
    pub interval: u32,
    pub due_date: Date,
}

pub struct SessionRecord {
    pub started_at: Timestamp,
    pub ended_at: Timestamp,
    pub reviews: Vec<ReviewRecord>,
}

const CARD_COLUMNS: &str =
    "card_id, deck_name, front, back, flag, status, ease, interval, lapses, reps, due_date";

impl Database {
    pub fn new(database_path: &str) -> Fallible<Self> {
        let mut conn = Connection::open(database_path)?;
        conn.set_db_config(DbConfig::SQLITE_DBCONFIG_ENABLE_FKEY, true)?;
        {
            let tx = conn.transaction()?;
            if !probe_schema_exists(&tx)? {
                log::debug!("Creating database schema.");
                tx.execute_batch(include_str!("schema.sql"))?;
                tx.commit()?;
            }
        }
        Ok(Self { conn })
    }

    /// Return the set of all card IDs in the database.
    pub fn card_ids(&self) -> Fallible<HashSet<CardId>> {
        let mut ids = HashSet::new();
        let mut stmt = self.conn.prepare("select card_id from cards;")?;
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let id: CardId = row.get(0)?;
            ids.insert(id);
        }
        Ok(ids)
    }

    /// Insert a new card.
    ///
    /// If a card with the same ID exists, returns an error.
    pub fn insert_card(&self, card: &Card, added_at: Timestamp) -> Fallible<()> {
        log::debug!("Adding new card: {}", card.id());
        let state = card.state();
        let sql = "insert into cards (card_id, deck_name, front, back, status, ease, interval, lapses, reps, due_date, flag, added_at) values (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?);";
        self.conn.execute(
            sql,
            (
                card.id(),
                card.deck_name(),
                card.front(),
                card.back(),
                state.status,
                state.ease,
                state.interval,
                state.lapses,
                state.reps,
                state.due_date,
                card.flag(),
                added_at,
            ),
        )?;
        Ok(())
    }

    /// Load a card.
    ///
    /// If no card with the given ID exists, returns an error.
    #[cfg(test)]
    pub fn get_card(&self, card_id: CardId) -> Fallible<Card> {
        let sql = format!("select {CARD_COLUMNS} from cards where card_id = ?;");
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([card_id])?;
        match rows.next()? {
            Some(row) => read_card(row),
            None => fail(format!("no card with ID {card_id}.")),
        }
    }

    /// Load every card, keyed by ID.
    pub fn all_cards(&self) -> Fallible<HashMap<CardId, Card>> {
        let sql = format!("select {CARD_COLUMNS} from cards;");
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([])?;
        let mut cards = HashMap::new();
        while let Some(row) = rows.next()? {
            let card = read_card(row)?;
            cards.insert(card.id(), card);
        }
        Ok(cards)
    }

    /// Overwrite a card's scheduling state and flag. The last write wins.
    ///
    /// If no card with the given ID exists, returns an error.
    pub fn update_card(&self, card: &Card) -> Fallible<()> {
        update_card(&self.conn, card)
    }

    /// Delete a card. Its review history is kept.
    pub fn delete_card(&self, card_id: CardId) -> Fallible<()> {
        let count = self
            .conn
            .execute("delete from cards where card_id = ?;", [card_id])?;
        if count == 0 {
            return fail(format!("no card with ID {card_id}."));
        }
        Ok(())
    }

    /// Save a study session: the session, its reviews, and the resulting
    /// card states, in a single transaction.
    pub fn save_session(
        &mut self,
        started_at: Timestamp,
        ended_at: Timestamp,
        reviews: &[ReviewRecord],
        cards: &[Card],
    ) -> Fallible<()> {
        let tx = self.conn.transaction()?;
        let sql = "insert into sessions (started_at, ended_at) values (?, ?) returning session_id;";
        let session_id: i64 = tx.query_row(sql, (started_at, ended_at), |row| row.get(0))?;
        for review in reviews {
            insert_review(&tx, session_id, review)?;
        }
        for card in cards {
            update_card(&tx, card)?;
        }
        tx.commit()?;
        Ok(())
    }

    /// The number of reviews made on the given date.
    pub fn review_count_on(&self, date: Date) -> Fallible<usize> {
        let sql = "select count(*) from reviews where reviewed_on = ?;";
        let count: i64 = self.conn.query_row(sql, [date], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Every session, oldest first, with its reviews.
    pub fn sessions(&self) -> Fallible<Vec<SessionRecord>> {
        let mut sessions: Vec<(i64, SessionRecord)> = Vec::new();
        {
            let sql = "select session_id, started_at, ended_at from sessions order by started_at;";
            let mut stmt = self.conn.prepare(sql)?;
            let mut rows = stmt.query([])?;
            while let Some(row) = rows.next()? {
                sessions.push((
                    row.get(0)?,
                    SessionRecord {
                        started_at: row.get(1)?,
                        ended_at: row.get(2)?,
                        reviews: Vec::new(),
                    },
                ));
            }
        }
        let sql = "select card_id, reviewed_at, reviewed_on, grade, status, ease, interval, due_date from reviews where session_id = ? order by review_id;";
        let mut stmt = self.conn.prepare(sql)?;
        for (session_id, session) in sessions.iter_mut() {
            let mut rows = stmt.query([*session_id])?;
            while let Some(row) = rows.next()? {
                session.reviews.push(ReviewRecord {
                    card_id: row.get(0)?,
                    reviewed_at: row.get(1)?,
                    reviewed_on: row.get(2)?,
                    grade: row.get(3)?,
                    status: row.get(4)?,
                    ease: row.get(5)?,
                    interval: row.get(6)?,
                    due_date: row.get(7)?,
                });
            }
        }
        Ok(sessions.into_iter().map(|(_, session)| session).collect())
    }
}

fn read_card(row: &Row) -> Fallible<Card> {
    let state = SchedulingState {
        status: row.get(5)?,
        ease: row.get(6)?,
        interval: row.get(7)?,
        lapses: row.get(8)?,
        reps: row.get(9)?,
        due_date: row.get(10)?,
    };
    let card = Card::restore(
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        state,
    )?;
    Ok(card)
}

fn update_card(conn: &Connection, card: &Card) -> Fallible<()> {
    let state = card.state();
    let sql = "update cards set status = ?, ease = ?, interval = ?, lapses = ?, reps = ?, due_date = ?, flag = ? where card_id = ?;";
    let count = conn.execute(
        sql,
        (
            state.status,
            state.ease,
            state.interval,
            state.lapses,
            state.reps,
            state.due_date,
            card.flag(),
            card.id(),
        ),
    )?;
    if count == 0 {
        return fail(format!("no card with ID {}.", card.id()));
    }
    Ok(())
}

fn insert_review(tx: &Transaction, session_id: i64, review: &ReviewRecord) -> Fallible<()> {
    let sql = "insert into reviews (session_id, card_id, reviewed_at, reviewed_on, grade, status, ease, interval, due_date) values (?, ?, ?, ?, ?, ?, ?, ?, ?);";
    tx.execute(
        sql,
        (
            session_id,
            review.card_id,
            review.reviewed_at,
            review.reviewed_on,
            review.grade,
            review.status,
            review.ease,
            review.interval,
            review.due_date,
        ),
    )?;
    Ok(())
}

fn probe_schema_exists(tx: &Transaction) -> Fallible<bool> {
    let sql = "select count(*) from sqlite_master where type='table' AND name=?;";
    let count: i64 = tx.query_row(sql, ["cards"], |row| row.get(0))?;
    Ok(count > 0)
}
