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

//! Decks and the read-only statistics computed over them. Nothing here is
//! cached: every projection is recomputed from the cards on each call.

use std::cmp::Ordering;

use serde::Serialize;

use crate::types::card::Card;
use crate::types::date::Date;
use crate::types::status::Status;

/// A named, ordered collection of cards.
#[derive(Clone, Debug)]
pub struct Deck {
    name: String,
    cards: Vec<Card>,
}

impl Deck {
    pub fn new(name: impl Into<String>, cards: Vec<Card>) -> Self {
        Self {
            name: name.into(),
            cards,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn due_count(&self, today: Date) -> usize {
        due_count(&self.cards, today)
    }

    pub fn stats(&self, today: Date) -> DeckStats {
        DeckStats::compute(&self.name, &self.cards, today)
    }
}

/// Cards that are scheduled and due on or before `today`. New and suspended
/// cards are not counted.
pub fn due_count(cards: &[Card], today: Date) -> usize {
    cards.iter().filter(|card| card.is_due(today)).count()
}

pub fn mastered_count(cards: &[Card]) -> usize {
    count_status(cards, Status::Mastered)
}

/// Percentage of cards that are mastered, in [0, 100]. Zero for no cards.
pub fn mastery_percentage(cards: &[Card]) -> f64 {
    if cards.is_empty() {
        return 0.0;
    }
    (mastered_count(cards) as f64 / cards.len() as f64) * 100.0
}

/// Cards in study order: learning, then review, then new, then mastered;
/// within a status, earliest due date first, cards without one last.
/// Suspended cards are left out. The sort is stable.
pub fn sort_by_urgency(cards: &[Card]) -> Vec<&Card> {
    let mut sorted: Vec<&Card> = cards
        .iter()
        .filter(|card| card.status() != Status::Suspended)
        .collect();
    sorted.sort_by(|a, b| compare_urgency(a, b));
    sorted
}

/// The cards to study on `today`, in urgency order: everything due, plus
/// every new card.
pub fn study_queue(cards: &[Card], today: Date) -> Vec<&Card> {
    sort_by_urgency(cards)
        .into_iter()
        .filter(|card| card.status() == Status::New || card.is_due(today))
        .collect()
}

fn compare_urgency(a: &Card, b: &Card) -> Ordering {
    a.status()
        .urgency_rank()
        .cmp(&b.status().urgency_rank())
        .then_with(|| match (a.due_date(), b.due_date()) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
}

fn count_status(cards: &[Card], status: Status) -> usize {
    cards.iter().filter(|card| card.status() == status).count()
}

#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeckStats {
    pub name: String,
    pub total: usize,
    pub new: usize,
    pub learning: usize,
    pub review: usize,
    pub mastered: usize,
    pub suspended: usize,
    pub due: usize,
    pub mastery_percentage: f64,
}

impl DeckStats {
    pub fn compute(name: &str, cards: &[Card], today: Date) -> Self {
        Self {
            name: name.to_string(),
            total: cards.len(),
            new: count_status(cards, Status::New),
            learning: count_status(cards, Status::Learning),
            review: count_status(cards, Status::Review),
            mastered: mastered_count(cards),
            suspended: count_status(cards, Status::Suspended),
            due: due_count(cards, today),
            mastery_percentage: mastery_percentage(cards),
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::types::card::SchedulingState;

    fn date(s: &str) -> Date {
        Date::parse(s).unwrap()
    }

    fn card(front: &str, status: Status, due: Option<&str>) -> Card {
        let base = Card::new("Deck", front, "back");
        let state = match status {
            Status::New => SchedulingState::new_card(),
            _ => SchedulingState {
                status,
                ease: 2.5,
                interval: if status == Status::Mastered { 30 } else { 3 },
                lapses: 0,
                reps: 3,
                due_date: due.map(date),
            },
        };
        base.with_state(state)
    }

    fn fronts(cards: &[&Card]) -> Vec<String> {
        cards.iter().map(|c| c.front().to_string()).collect()
    }

    #[test]
    fn test_due_count_excludes_suspended_and_new() {
        let today = "2026-02-21";
        let cards = vec![
            card("a", Status::Review, Some(today)),
            card("b", Status::Review, Some(today)),
            card("c", Status::Review, Some("2026-02-20")),
            card("d", Status::Suspended, None),
            card("e", Status::Suspended, None),
            card("f", Status::New, None),
        ];
        assert_eq!(due_count(&cards, date(today)), 3);
    }

    #[test]
    fn test_due_count_excludes_future() {
        let cards = vec![
            card("a", Status::Learning, Some("2026-02-22")),
            card("b", Status::Mastered, Some("2026-02-21")),
        ];
        assert_eq!(due_count(&cards, date("2026-02-21")), 1);
    }

    #[test]
    fn test_mastery_percentage() {
        assert_eq!(mastery_percentage(&[]), 0.0);
        let cards = vec![
            card("a", Status::Mastered, Some("2026-03-01")),
            card("b", Status::Review, Some("2026-03-01")),
            card("c", Status::New, None),
            card("d", Status::Suspended, None),
        ];
        assert_eq!(mastered_count(&cards), 1);
        assert!((mastery_percentage(&cards) - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_sort_by_urgency() {
        let cards = vec![
            card("mastered", Status::Mastered, Some("2026-01-01")),
            card("new", Status::New, None),
            card("review-late", Status::Review, Some("2026-02-25")),
            card("suspended", Status::Suspended, None),
            card("learning", Status::Learning, Some("2026-02-28")),
            card("review-early", Status::Review, Some("2026-02-20")),
        ];
        let sorted = sort_by_urgency(&cards);
        assert_eq!(
            fronts(&sorted),
            vec!["learning", "review-early", "review-late", "new", "mastered"]
        );
    }

    #[test]
    fn test_sort_by_urgency_is_stable() {
        let cards = vec![
            card("first", Status::New, None),
            card("second", Status::New, None),
            card("third", Status::New, None),
        ];
        assert_eq!(
            fronts(&sort_by_urgency(&cards)),
            vec!["first", "second", "third"]
        );
    }

    #[test]
    fn test_study_queue() {
        let cards = vec![
            card("new", Status::New, None),
            card("later", Status::Review, Some("2026-03-01")),
            card("due", Status::Review, Some("2026-02-21")),
            card("suspended", Status::Suspended, None),
        ];
        let queue = study_queue(&cards, date("2026-02-21"));
        assert_eq!(fronts(&queue), vec!["due", "new"]);
    }

    #[test]
    fn test_deck_stats() {
        let deck = Deck::new(
            "Geography",
            vec![
                card("a", Status::New, None),
                card("b", Status::Learning, Some("2026-02-21")),
                card("c", Status::Mastered, Some("2026-04-01")),
                card("d", Status::Suspended, None),
            ],
        );
        let stats = deck.stats(date("2026-02-21"));
        assert_eq!(
            stats,
            DeckStats {
                name: "Geography".to_string(),
                total: 4,
                new: 1,
                learning: 1,
                review: 0,
                mastered: 1,
                suspended: 1,
                due: 1,
                mastery_percentage: 25.0,
            }
        );
        assert_eq!(deck.due_count(date("2026-02-21")), 1);
        assert_eq!(deck.cards().len(), 4);
    }

    fn arb_card() -> impl Strategy<Value = Card> {
        (
            0usize..1000,
            prop_oneof![
                Just(Status::New),
                Just(Status::Learning),
                Just(Status::Review),
                Just(Status::Mastered),
                Just(Status::Suspended),
            ],
            0u32..60,
        )
            .prop_map(|(n, status, offset)| {
                let due = date("2026-02-01").add_days(offset).map(|d| d.to_string());
                let due = if status.is_scheduled() { due } else { None };
                card(&format!("card {n}"), status, due.as_deref())
            })
    }

    proptest! {
        #[test]
        fn aggregation_is_pure(cards in prop::collection::vec(arb_card(), 0..50), offset in 0u32..60) {
            let today = date("2026-02-01").add_days(offset).unwrap();
            let copy = cards.clone();
            let due = due_count(&cards, today);
            let mastery = mastery_percentage(&cards);
            prop_assert_eq!(due_count(&cards, today), due);
            prop_assert_eq!(mastery_percentage(&cards), mastery);
            prop_assert_eq!(&cards, &copy);
            prop_assert!((0.0..=100.0).contains(&mastery));
        }

        #[test]
        fn urgency_order_drops_only_suspended(cards in prop::collection::vec(arb_card(), 0..50)) {
            let sorted = sort_by_urgency(&cards);
            let active = cards.iter().filter(|c| c.status() != Status::Suspended).count();
            prop_assert_eq!(sorted.len(), active);
            for pair in sorted.windows(2) {
                prop_assert_ne!(compare_urgency(pair[0], pair[1]), Ordering::Greater);
            }
        }
    }
}
