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

use std::fmt::Display;
use std::fmt::Formatter;

use clap::ValueEnum;
use serde::Serialize;

use crate::cmd::resolve_today;
use crate::collection::Collection;
use crate::deck::DeckStats;
use crate::error::Fallible;
use crate::types::date::Date;

#[derive(ValueEnum, Clone)]
pub enum StatsFormat {
    /// Human-readable table.
    Text,
    /// JSON output.
    Json,
}

impl Display for StatsFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsFormat::Text => write!(f, "text"),
            StatsFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    today: Date,
    reviewed_today: usize,
    decks: Vec<DeckStats>,
    total: DeckStats,
}

pub fn print_stats(
    directory: Option<String>,
    today: Option<String>,
    format: StatsFormat,
) -> Fallible<()> {
    let coll = Collection::new(directory)?;
    let today = resolve_today(today)?;
    let stats = Stats {
        today,
        reviewed_today: coll.db.review_count_on(today)?,
        decks: coll.decks.iter().map(|deck| deck.stats(today)).collect(),
        total: DeckStats::compute("Total", &coll.cards(), today),
    };
    match format {
        StatsFormat::Text => print!("{}", render_text(&stats)),
        StatsFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
    }
    Ok(())
}

fn render_text(stats: &Stats) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<20} {:>6} {:>6} {:>8} {:>6} {:>8} {:>9} {:>5} {:>8}\n",
        "Deck", "Cards", "New", "Learning", "Review", "Mastered", "Suspended", "Due", "Mastery"
    ));
    for row in stats.decks.iter().chain(std::iter::once(&stats.total)) {
        out.push_str(&format!(
            "{:<20} {:>6} {:>6} {:>8} {:>6} {:>8} {:>9} {:>5} {:>7.1}%\n",
            row.name,
            row.total,
            row.new,
            row.learning,
            row.review,
            row.mastered,
            row.suspended,
            row.due,
            row.mastery_percentage
        ));
    }
    out.push_str(&format!("Reviewed today: {}\n", stats.reviewed_today));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::create_tmp_copy_of_test_directory;

    fn stats() -> Fallible<Stats> {
        let directory = create_tmp_copy_of_test_directory()?;
        let coll = Collection::new(Some(directory))?;
        let today = Date::parse("2026-02-21")?;
        Ok(Stats {
            today,
            reviewed_today: coll.db.review_count_on(today)?,
            decks: coll.decks.iter().map(|deck| deck.stats(today)).collect(),
            total: DeckStats::compute("Total", &coll.cards(), today),
        })
    }

    #[test]
    fn test_json() -> Fallible<()> {
        let json = serde_json::to_value(stats()?)?;
        assert_eq!(json["today"], "2026-02-21");
        assert_eq!(json["reviewedToday"], 0);
        assert_eq!(json["total"]["total"], 6);
        assert_eq!(json["total"]["new"], 6);
        assert_eq!(json["decks"][0]["name"], "Chemistry");
        assert_eq!(json["decks"][1]["masteryPercentage"], 0.0);
        Ok(())
    }

    #[test]
    fn test_text() -> Fallible<()> {
        let text = render_text(&stats()?);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("Deck"));
        assert!(lines[1].starts_with("Chemistry"));
        assert!(lines[3].starts_with("Total"));
        assert!(lines[3].ends_with("0.0%"));
        assert_eq!(lines[4], "Reviewed today: 0");
        Ok(())
    }

    #[test]
    fn test_print_stats() -> Fallible<()> {
        let directory = create_tmp_copy_of_test_directory()?;
        print_stats(
            Some(directory),
            Some("2026-02-21".to_string()),
            StatsFormat::Json,
        )
    }
}
