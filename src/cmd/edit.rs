// Copyright 2025 Fernando Borretti
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

use crate::collection::Collection;
use crate::error::Fallible;
use crate::error::fail;
use crate::types::card::CardEdit;
use crate::types::card::CardFields;
use crate::types::card_id::CardId;

pub fn add_card(directory: Option<String>, fields: CardFields) -> Fallible<()> {
    let mut coll = Collection::new(directory)?;
    let id = coll.store.add(fields)?;
    log::debug!("Added card {id}.");
    println!("{id}");
    Ok(())
}

pub fn edit_card(directory: Option<String>, id: String, edit: CardEdit) -> Fallible<()> {
    let mut coll = Collection::new(directory)?;
    let id = CardId::new(id);
    if coll.store.edit(&id, edit)? {
        println!("ok");
        Ok(())
    } else {
        fail(format!("no card with id {id}."))
    }
}

pub fn delete_card(directory: Option<String>, id: String) -> Fallible<()> {
    let mut coll = Collection::new(directory)?;
    let id = CardId::new(id);
    if coll.store.delete(&id) {
        println!("ok");
    } else {
        println!("No card with id {id}, nothing to delete.");
    }
    Ok(())
}
