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

use std::collections::HashSet;
use std::env::current_dir;
use std::path::PathBuf;
use std::time::Instant;

use crate::config::Config;
use crate::db::Database;
use crate::deck::Deck;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::parser::parse_deck;
use crate::srs::scheduler::Scheduler;
use crate::types::card::Card;
use crate::types::card_id::CardId;
use crate::types::timestamp::Timestamp;

pub const DATABASE_FILE_NAME: &str = "synapze.db";

/// A collection directory, loaded: its configuration, its database, and
/// its decks with their current review state.
pub struct Collection {
    pub config: Config,
    pub db: Database,
    pub decks: Vec<Deck>,
}

impl Collection {
    pub fn new(directory: Option<String>) -> Fallible<Self> {
        let directory: PathBuf = match directory {
            Some(dir) => PathBuf::from(dir),
            None => current_dir()?,
        };
        let directory = if directory.exists() {
            directory.canonicalize()?
        } else {
            return fail("directory does not exist.");
        };

        let config = Config::load(&directory)?;

        let db_path: PathBuf = directory.join(DATABASE_FILE_NAME);
        let db_path: &str = db_path
            .to_str()
            .ok_or_else(|| ErrorReport::new("invalid path"))?;
        let db: Database = Database::new(db_path)?;

        let cards = {
            log::debug!("Loading decks...");
            let start = Instant::now();
            let cards = parse_deck(&directory)?;
            let duration = start.elapsed().as_millis();
            log::debug!("Loaded {} cards in {duration}ms.", cards.len());
            cards
        };

        // Cards in the deck files but not in the database are new.
        let known: HashSet<CardId> = db.card_ids()?;
        let added_at = Timestamp::now();
        for card in cards.iter().filter(|card| !known.contains(&card.id())) {
            db.insert_card(card, added_at)?;
        }

        // Text comes from the files, review state from the database.
        let mut stored = db.all_cards()?;
        let mut decks: Vec<(String, Vec<Card>)> = Vec::new();
        for card in cards {
            let card = match stored.remove(&card.id()) {
                Some(saved) => card.with_state(*saved.state()).with_flag(saved.flag()),
                None => return fail(format!("card {} missing from database.", card.id())),
            };
            match decks.iter_mut().find(|(name, _)| name == card.deck_name()) {
                Some((_, deck)) => deck.push(card),
                None => decks.push((card.deck_name().to_string(), vec![card])),
            }
        }
        let decks = decks
            .into_iter()
            .map(|(name, cards)| Deck::new(name, cards))
            .collect();

        log::debug!("Opened collection at {}.", directory.display());
        Ok(Self {
            config,
            db,
            decks,
        })
    }

    pub fn scheduler(&self) -> Scheduler {
        Scheduler::new(self.config.scheduler.clone())
    }

    /// Every card in every deck.
    pub fn cards(&self) -> Vec<Card> {
        self.decks
            .iter()
            .flat_map(|deck| deck.cards().iter().cloned())
            .collect()
    }

    /// Find a card by its ID or any unambiguous prefix of it.
    pub fn find_card(&self, prefix: &str) -> Fallible<Card> {
        let prefix = prefix.trim().to_lowercase();
        if prefix.is_empty() {
            return fail("empty card ID.");
        }
        let mut matches = self
            .decks
            .iter()
            .flat_map(|deck| deck.cards())
            .filter(|card| card.id().to_hex().starts_with(&prefix));
        match (matches.next(), matches.next()) {
            (Some(card), None) => Ok(card.clone()),
            (None, _) => fail(format!("no card matches '{prefix}'.")),
            (Some(_), Some(_)) => fail(format!("'{prefix}' matches more than one card.")),
        }
    }

    /// IDs of cards in the database that no longer appear in any deck file,
    /// sorted.
    pub fn orphans(&self) -> Fallible<Vec<CardId>> {
        let in_decks: HashSet<CardId> = self
            .decks
            .iter()
            .flat_map(|deck| deck.cards())
            .map(|card| card.id())
            .collect();
        let mut orphans: Vec<CardId> = self
            .db
            .card_ids()?
            .difference(&in_decks)
            .copied()
            .collect();
        orphans.sort();
        Ok(orphans)
    }
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use super::*;
    use crate::helper::create_tmp_copy_of_test_directory;
    use crate::types::date::Date;
    use crate::types::status::Status;

    #[test]
    fn test_non_existent_directory() {
        let result = Collection::new(Some("./derpherp".to_string()));
        assert_eq!(
            result.err().map(|e| e.to_string()),
            Some("error: directory does not exist.".to_string())
        );
    }

    #[test]
    fn test_load() -> Fallible<()> {
        let directory = create_tmp_copy_of_test_directory()?;
        let coll = Collection::new(Some(directory))?;
        let names: Vec<&str> = coll.decks.iter().map(|d| d.name()).collect();
        assert_eq!(names, vec!["Chemistry", "Geography"]);
        assert_eq!(coll.cards().len(), 6);
        assert!(coll.cards().iter().all(|c| c.status() == Status::New));
        assert!(coll.orphans()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_state_survives_reload() -> Fallible<()> {
        let directory = create_tmp_copy_of_test_directory()?;
        let today = Date::parse("2026-02-21")?;
        let id = {
            let coll = Collection::new(Some(directory.clone()))?;
            let card = coll.find_card(&coll.cards()[0].id().to_hex())?;
            let reviewed = coll.scheduler().review_quality(&card, 4, today)?;
            coll.db.update_card(&reviewed)?;
            card.id()
        };
        let coll = Collection::new(Some(directory))?;
        let card = coll.find_card(&id.to_hex())?;
        assert_eq!(card.status(), Status::Learning);
        assert_eq!(card.reps(), 1);
        Ok(())
    }

    #[test]
    fn test_orphans() -> Fallible<()> {
        let directory = create_tmp_copy_of_test_directory()?;
        drop(Collection::new(Some(directory.clone()))?);
        write(
            PathBuf::from(&directory).join("Chemistry.md"),
            "Chemical symbol of gold? / Au\n",
        )?;
        let coll = Collection::new(Some(directory))?;
        assert_eq!(coll.orphans()?.len(), 1);
        assert_eq!(
            coll.orphans()?[0],
            CardId::for_card("Chemistry", "Atomic number of carbon?", "6")
        );
        Ok(())
    }

    #[test]
    fn test_same_card_in_two_decks() -> Fallible<()> {
        let directory = create_tmp_copy_of_test_directory()?;
        write(
            PathBuf::from(&directory).join("Alchemy.md"),
            "Chemical symbol of gold? / Au\n",
        )?;
        let coll = Collection::new(Some(directory.clone()))?;
        let names: Vec<&str> = coll.decks.iter().map(|d| d.name()).collect();
        assert_eq!(names, vec!["Alchemy", "Chemistry", "Geography"]);
        assert_eq!(coll.cards().len(), 7);
        assert_eq!(coll.db.card_ids()?.len(), 7);

        // Reviewing one copy leaves the other alone.
        let today = Date::parse("2026-02-21")?;
        let alchemy = coll.decks[0].cards()[0].clone();
        let reviewed = coll.scheduler().review_quality(&alchemy, 5, today)?;
        coll.db.update_card(&reviewed)?;
        let coll = Collection::new(Some(directory))?;
        assert_eq!(coll.decks[0].cards()[0].status(), Status::Learning);
        assert_eq!(coll.decks[1].cards()[0].status(), Status::New);
        Ok(())
    }

    #[test]
    fn test_find_card() -> Fallible<()> {
        let directory = create_tmp_copy_of_test_directory()?;
        let coll = Collection::new(Some(directory))?;
        let card = coll.cards()[0].clone();
        let found = coll.find_card(&card.id().short().to_uppercase())?;
        assert_eq!(found.id(), card.id());
        assert!(coll.find_card("").is_err());
        assert!(coll.find_card("zzzz").is_err());
        Ok(())
    }
}
