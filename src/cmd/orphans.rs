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

//! Orphans are cards in the database that no longer appear in any deck file,
//! usually because their text was edited.

use crate::collection::Collection;
use crate::error::Fallible;

pub fn list_orphans(directory: Option<String>) -> Fallible<()> {
    let coll = Collection::new(directory)?;
    for id in coll.orphans()? {
        println!("{id}");
    }
    Ok(())
}

pub fn delete_orphans(directory: Option<String>) -> Fallible<()> {
    let coll = Collection::new(directory)?;
    let orphans = coll.orphans()?;
    for id in orphans.iter() {
        coll.db.delete_card(*id)?;
        log::debug!("Deleted orphan {id}.");
    }
    println!("Deleted {} orphans.", orphans.len());
    Ok(())
}
