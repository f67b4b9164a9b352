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

use crate::cmd::resolve_today;
use crate::collection::Collection;
use crate::deck::Deck;
use crate::deck::study_queue;
use crate::error::Fallible;
use crate::types::card::Card;
use crate::types::date::Date;

pub fn list_due(directory: Option<String>, today: Option<String>) -> Fallible<()> {
    let coll = Collection::new(directory)?;
    let today = resolve_today(today)?;
    let lines = format_queue(&coll.cards(), today);
    if lines.is_empty() {
        println!("No cards due today.");
        return Ok(());
    }
    for line in lines {
        println!("{line}");
    }
    println!();
    for line in format_summary(&coll.decks, today) {
        println!("{line}");
    }
    Ok(())
}

/// Scheduled cards due per deck. New cards are not counted.
fn format_summary(decks: &[Deck], today: Date) -> Vec<String> {
    decks
        .iter()
        .map(|deck| format!("{}: {} due", deck.name(), deck.due_count(today)))
        .collect()
}

fn format_queue(cards: &[Card], today: Date) -> Vec<String> {
    study_queue(cards, today)
        .into_iter()
        .map(|card| {
            let due = match card.due_date() {
                Some(date) => date.to_string(),
                None => "-".to_string(),
            };
            let front = card.front().lines().next().unwrap_or_default();
            format!(
                "{}  {:<8}  {:<10}  {}: {}",
                card.id().short(),
                card.status().as_str(),
                due,
                card.deck_name(),
                front
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::srs::scheduler::Scheduler;

    #[test]
    fn test_format_queue() -> Fallible<()> {
        let today = Date::parse("2026-02-21")?;
        let scheduler = Scheduler::default();
        let learning = Card::new("Geography", "Capital of\nFrance?", "Paris");
        let learning = scheduler.review_quality(&learning, 4, Date::parse("2026-02-20")?)?;
        let japan = Card::new("Geography", "Japan", "Tokyo");
        let later = scheduler.review_quality(&japan, 4, today)?;
        let fresh = Card::new("Chemistry", "Gold", "Au");
        let lines = format_queue(&[fresh.clone(), later, learning.clone()], today);
        assert_eq!(
            lines,
            vec![
                format!(
                    "{}  learning  2026-02-21  Geography: Capital of",
                    learning.id().short()
                ),
                format!(
                    "{}  new       -           Chemistry: Gold",
                    fresh.id().short()
                ),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_format_summary() -> Fallible<()> {
        let today = Date::parse("2026-02-21")?;
        let scheduler = Scheduler::default();
        let due = scheduler.review_quality(
            &Card::new("Geography", "France", "Paris"),
            4,
            Date::parse("2026-02-20")?,
        )?;
        let japan = Card::new("Geography", "Japan", "Tokyo");
        let decks = vec![
            Deck::new("Chemistry", vec![Card::new("Chemistry", "Gold", "Au")]),
            Deck::new("Geography", vec![due, japan]),
        ];
        assert_eq!(
            format_summary(&decks, today),
            vec!["Chemistry: 0 due", "Geography: 1 due"]
        );
        Ok(())
    }
}
