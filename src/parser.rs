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

//! Bulk import of cards from deck files.
//!
//! A deck file is a Markdown file whose name is the deck name. Cards are
//! separated by blank lines and have the form `front / back`. Lines starting
//! with `#` are ignored.

use std::collections::HashSet;
use std::fs::read_to_string;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::Fallible;
use crate::error::fail;
use crate::types::card::Card;
use crate::types::card_id::CardId;

const SEPARATOR: &str = " / ";

/// Parse every deck file under `directory`, in file name order. A card that
/// appears more than once in the same deck is kept only at its first
/// occurrence. Card IDs include the deck name, so the same card in two decks
/// is kept in both.
pub fn parse_deck(directory: &Path) -> Fallible<Vec<Card>> {
    let mut cards = Vec::new();
    let mut seen: HashSet<CardId> = HashSet::new();
    for entry in WalkDir::new(directory).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();
        if !(path.is_file() && path.extension().is_some_and(|ext| ext == "md")) {
            continue;
        }
        let deck_name = match path.file_stem().and_then(|s| s.to_str()) {
            Some(stem) => stem.to_string(),
            None => return fail(format!("invalid deck file name: {}", path.display())),
        };
        let content = read_to_string(path)?;
        for card in parse_deck_content(&deck_name, &content, path)? {
            if seen.insert(card.id()) {
                cards.push(card);
            } else {
                log::warn!(
                    "Skipping duplicate card {} in {}.",
                    card.id().short(),
                    path.display()
                );
            }
        }
    }
    Ok(cards)
}

/// Parse the contents of a single deck file. `path` is only used in error
/// messages.
pub fn parse_deck_content(deck_name: &str, content: &str, path: &Path) -> Fallible<Vec<Card>> {
    let mut cards = Vec::new();
    let mut block: Vec<&str> = Vec::new();
    let mut block_start = 0;
    // The trailing empty line flushes the last block.
    let lines = content.lines().chain(std::iter::once(""));
    for (index, line) in lines.enumerate() {
        let line_number = index + 1;
        if line.trim_start().starts_with('#') {
            continue;
        }
        if line.trim().is_empty() {
            if !block.is_empty() {
                let text = block.join("\n");
                cards.push(parse_card(deck_name, &text, path, block_start)?);
                block.clear();
            }
            continue;
        }
        if block.is_empty() {
            block_start = line_number;
        }
        block.push(line);
    }
    Ok(cards)
}

fn parse_card(deck_name: &str, text: &str, path: &Path, line: usize) -> Fallible<Card> {
    let Some((front, back)) = text.split_once(SEPARATOR) else {
        return fail(format!(
            "{}:{line}: card has no '{}' separator.",
            path.display(),
            SEPARATOR.trim()
        ));
    };
    if front.trim().is_empty() || back.trim().is_empty() {
        return fail(format!("{}:{line}: card has an empty side.", path.display()));
    }
    Ok(Card::new(deck_name, front, back))
}
