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

//! Manual overrides on single cards.

use crate::cmd::resolve_today;
use crate::collection::Collection;
use crate::error::Fallible;
use crate::types::card::Card;
use crate::types::flag::Flag;

pub fn suspend_card(directory: Option<String>, id: String) -> Fallible<()> {
    let coll = Collection::new(directory)?;
    let card = coll.find_card(&id)?;
    let card = coll.scheduler().suspend(&card)?;
    coll.db.update_card(&card)?;
    report(&card);
    Ok(())
}

pub fn unsuspend_card(
    directory: Option<String>,
    id: String,
    today: Option<String>,
) -> Fallible<()> {
    let coll = Collection::new(directory)?;
    let today = resolve_today(today)?;
    let card = coll.find_card(&id)?;
    let card = coll.scheduler().unsuspend(&card, today)?;
    coll.db.update_card(&card)?;
    report(&card);
    Ok(())
}

pub fn flag_card(directory: Option<String>, id: String, flag: u8) -> Fallible<()> {
    let flag = Flag::try_from(flag)?;
    let coll = Collection::new(directory)?;
    let card = coll.find_card(&id)?.with_flag(flag);
    coll.db.update_card(&card)?;
    report(&card);
    Ok(())
}

fn report(card: &Card) {
    println!("{} is now {}.", card.id().short(), card.status());
}
