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

use clap::Parser;
use clap::Subcommand;

use crate::cmd::check::check_collection;
use crate::cmd::due::list_due;
use crate::cmd::export::export_collection;
use crate::cmd::manage::flag_card;
use crate::cmd::manage::suspend_card;
use crate::cmd::manage::unsuspend_card;
use crate::cmd::orphans::delete_orphans;
use crate::cmd::orphans::list_orphans;
use crate::cmd::review::review_collection;
use crate::cmd::stats::StatsFormat;
use crate::cmd::stats::print_stats;
use crate::error::Fallible;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Check the deck files and configuration for errors.
    Check {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
    },
    /// List the cards to study, most urgent first.
    Due {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Schedule against this date (YYYY-MM-DD) instead of today.
        #[arg(long)]
        today: Option<String>,
    },
    /// Study the cards that are due.
    Review {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Schedule against this date (YYYY-MM-DD) instead of today.
        #[arg(long)]
        today: Option<String>,
        /// Maximum number of cards to study.
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Print collection statistics.
    Stats {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Output format.
        #[arg(long, default_value_t = StatsFormat::Text)]
        format: StatsFormat,
        /// Compute due counts against this date (YYYY-MM-DD) instead of today.
        #[arg(long)]
        today: Option<String>,
    },
    /// Take a card out of rotation.
    Suspend {
        /// The card ID, or any unambiguous prefix of it.
        id: String,
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
    },
    /// Put a suspended card back into rotation, due today.
    Unsuspend {
        /// The card ID, or any unambiguous prefix of it.
        id: String,
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Schedule against this date (YYYY-MM-DD) instead of today.
        #[arg(long)]
        today: Option<String>,
    },
    /// Set a card's flag: 0 (none), 1 (red), 2 (orange), 3 (green), 4 (blue).
    Flag {
        /// The card ID, or any unambiguous prefix of it.
        id: String,
        flag: u8,
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
    },
    /// Export the collection and its review history as JSON.
    Export {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
    },
    /// Commands relating to orphaned cards.
    #[command(subcommand)]
    Orphans(OrphanCommand),
}

#[derive(Subcommand)]
enum OrphanCommand {
    /// List the IDs of cards in the database that no longer appear in any deck file.
    List {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
    },
    /// Delete orphaned cards from the database. Their review history is kept.
    Delete {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
    },
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Check { directory } => check_collection(directory),
        Command::Due { directory, today } => list_due(directory, today),
        Command::Review {
            directory,
            today,
            limit,
        } => review_collection(directory, today, limit),
        Command::Stats {
            directory,
            format,
            today,
        } => print_stats(directory, today, format),
        Command::Suspend { id, directory } => suspend_card(directory, id),
        Command::Unsuspend {
            id,
            directory,
            today,
        } => unsuspend_card(directory, id, today),
        Command::Flag {
            id,
            flag,
            directory,
        } => flag_card(directory, id, flag),
        Command::Export { directory } => export_collection(directory),
        Command::Orphans(command) => match command {
            OrphanCommand::List { directory } => list_orphans(directory),
            OrphanCommand::Delete { directory } => delete_orphans(directory),
        },
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_command_definition() {
        Command::command().debug_assert();
    }

    #[test]
    fn test_parse_review() {
        let cli = Command::try_parse_from(["synapze", "review", "decks", "--limit", "10"]);
        match cli {
            Ok(Command::Review {
                directory, limit, ..
            }) => {
                assert_eq!(directory, Some("decks".to_string()));
                assert_eq!(limit, Some(10));
            }
            _ => panic!("expected review command"),
        }
    }

    #[test]
    fn test_parse_orphans() {
        let cli = Command::try_parse_from(["synapze", "orphans", "delete"]);
        assert!(matches!(
            cli,
            Ok(Command::Orphans(OrphanCommand::Delete { directory: None }))
        ));
    }

    #[test]
    fn test_parse_bad_format() {
        assert!(Command::try_parse_from(["synapze", "stats", "--format", "xml"]).is_err());
    }
}
