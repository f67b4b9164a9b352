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

use crate::collection::Collection;
use crate::db::ReviewRecord;
use crate::db::SessionRecord;
use crate::error::Fallible;
use crate::srs::grade::Grade;
use crate::types::card::Card;
use crate::types::card::SchedulingState;
use crate::types::card_id::CardId;
use crate::types::date::Date;
use crate::types::flag::Flag;
use crate::types::status::Status;
use crate::types::timestamp::Timestamp;

pub fn export_collection(directory: Option<String>) -> Fallible<()> {
    let coll: Collection = Collection::new(directory)?;
    let export: Export = get_export(&coll)?;
    let json: String = serde_json::to_string_pretty(&export)?;
    println!("{json}");
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Export {
    cards: Vec<CardExport>,
    sessions: Vec<SessionExport>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CardExport {
    id: CardId,
    deck_name: String,
    front: String,
    back: String,
    flag: Flag,
    state: SchedulingState,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionExport {
    started_at: Timestamp,
    ended_at: Timestamp,
    reviews: Vec<ReviewExport>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReviewExport {
    id: CardId,
    reviewed_at: Timestamp,
    reviewed_on: Date,
    grade: Grade,
    status: Status,
    ease: f64,
    interval: u32,
    due_date: Date,
}

fn get_export(coll: &Collection) -> Fallible<Export> {
    let cards: Vec<CardExport> = coll.cards().iter().map(card_export).collect();
    let sessions: Vec<SessionExport> = coll
        .db
        .sessions()?
        .into_iter()
        .map(session_export)
        .collect();
    Ok(Export { cards, sessions })
}

fn card_export(card: &Card) -> CardExport {
    CardExport {
        id: card.id(),
        deck_name: card.deck_name().to_owned(),
        front: card.front().to_owned(),
        back: card.back().to_owned(),
        flag: card.flag(),
        state: *card.state(),
    }
}

fn session_export(session: SessionRecord) -> SessionExport {
    SessionExport {
        started_at: session.started_at,
        ended_at: session.ended_at,
        reviews: session.reviews.into_iter().map(review_export).collect(),
    }
}

fn review_export(review: ReviewRecord) -> ReviewExport {
    ReviewExport {
        id: review.card_id,
        reviewed_at: review.reviewed_at,
        reviewed_on: review.reviewed_on,
        grade: review.grade,
        status: review.status,
        ease: review.ease,
        interval: review.interval,
        due_date: review.due_date,
    }
}
