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

mod session;

use std::io::BufRead;
use std::io::Write;
use std::io::stdin;
use std::io::stdout;

use crate::cmd::resolve_today;
use crate::collection::Collection;
use crate::deck::study_queue;
use crate::error::Fallible;
use crate::error::fail;
use crate::srs::grade::Grade;
use crate::srs::grade::Outcome;
use crate::srs::grade::Signal;
use crate::srs::grade::classify;
use crate::types::card::Card;
use crate::types::date::Date;

pub use session::Session;

pub fn review_collection(
    directory: Option<String>,
    today: Option<String>,
    limit: Option<usize>,
) -> Fallible<()> {
    let mut coll = Collection::new(directory)?;
    let today = resolve_today(today)?;
    study(&mut coll, today, limit, stdin().lock(), stdout().lock())
}

/// Study the collection's queue for `today`, at most `limit` cards. Whatever
/// was graded is saved, even if the session ends in an error.
fn study<R: BufRead, W: Write>(
    coll: &mut Collection,
    today: Date,
    limit: Option<usize>,
    input: R,
    mut output: W,
) -> Fallible<()> {
    let all = coll.cards();
    let cards: Vec<Card> = study_queue(&all, today)
        .into_iter()
        .take(limit.unwrap_or(usize::MAX))
        .cloned()
        .collect();
    if cards.is_empty() {
        writeln!(output, "No cards due today.")?;
        return Ok(());
    }
    let mut session = Session::new(coll.scheduler(), cards, today);
    let result = drill(&mut session, input, &mut output);
    let count = session.finish(&mut coll.db)?;
    result?;
    writeln!(output, "Reviewed {count} cards.")?;
    Ok(())
}

#[derive(Debug, PartialEq)]
enum Response {
    Grade(Grade),
    Undo,
    Quit,
}

fn parse_response(input: &str) -> Fallible<Response> {
    let input = input.trim().to_lowercase();
    let signal = match input.as_str() {
        "u" | "undo" => return Ok(Response::Undo),
        "q" | "quit" => return Ok(Response::Quit),
        "y" | "yes" => Signal::Binary(Outcome::KnewIt),
        "n" | "no" => Signal::Binary(Outcome::Forgot),
        other => match other.parse::<i64>() {
            Ok(quality) => Signal::Quality(quality),
            Err(_) => return fail(format!("unrecognized input: '{other}'")),
        },
    };
    Ok(Response::Grade(classify(signal)?))
}

/// Run the question/answer loop over `input` and `output` until the queue
/// is empty, the user quits, or the input ends.
fn drill<R: BufRead, W: Write>(
    session: &mut Session,
    mut input: R,
    mut output: W,
) -> Fallible<()> {
    'cards: while let Some(card) = session.current() {
        let position = session.reviewed() + 1;
        writeln!(
            output,
            "[{position}/{}] {} ({})",
            session.total(),
            card.deck_name(),
            card.status()
        )?;
        writeln!(output, "Q: {}", card.front())?;
        writeln!(output, "[press enter to reveal]")?;
        if read_line(&mut input)?.is_none() {
            break;
        }
        writeln!(output, "A: {}", card.back())?;
        loop {
            writeln!(
                output,
                "Grade: 0-5, y = knew it, n = forgot, u = undo, q = quit"
            )?;
            let Some(line) = read_line(&mut input)? else {
                break 'cards;
            };
            match parse_response(&line) {
                Ok(Response::Grade(grade)) => {
                    let after = session.grade(grade)?;
                    match after.due_date() {
                        Some(due) => writeln!(output, "Next review: {due}.")?,
                        None => writeln!(output, "Not scheduled.")?,
                    }
                    break;
                }
                Ok(Response::Undo) => {
                    if session.undo().is_none() {
                        writeln!(output, "Nothing to undo.")?;
                        continue;
                    }
                    break;
                }
                Ok(Response::Quit) => {
                    writeln!(output, "Stopped with {} cards left.", session.remaining())?;
                    break 'cards;
                }
                Err(e) => writeln!(output, "{e}")?,
            }
        }
    }
    if session.current().is_none() {
        writeln!(output, "Session complete.")?;
    }
    Ok(())
}

/// Read a line, or `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> Fallible<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}
