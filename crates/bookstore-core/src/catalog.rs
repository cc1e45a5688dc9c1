//! # Catalog
//!
//! An in-memory, id-keyed collection of e-books.
//!
//! The catalog is where item ids are guaranteed unique: inserting a second
//! book under an existing id is refused. Books are handed out by `&mut` so
//! a cart can take stock from them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::item::EBook;
use crate::types::ItemId;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    books: BTreeMap<ItemId, EBook>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a book, refusing duplicate ids.
    pub fn insert(&mut self, book: EBook) -> CoreResult<()> {
        let id = book.id();
        if self.books.contains_key(&id) {
            return Err(ValidationError::Duplicate {
                field: "item id".to_string(),
                value: id.to_string(),
            }
            .into());
        }
        debug!(item_id = %id, title = %book.title, "Book added to catalog");
        self.books.insert(id, book);
        Ok(())
    }

    pub fn get(&self, id: ItemId) -> Option<&EBook> {
        self.books.get(&id)
    }

    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut EBook> {
        self.books.get_mut(&id)
    }

    /// Like [`Catalog::get_mut`], but unknown ids become an error.
    pub fn require_mut(&mut self, id: ItemId) -> CoreResult<&mut EBook> {
        self.books.get_mut(&id).ok_or(CoreError::UnknownItem(id))
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Books in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &EBook> {
        self.books.values()
    }
}

impl FromIterator<EBook> for Catalog {
    /// Collects books; a later book with a repeated id replaces the earlier.
    fn from_iter<I: IntoIterator<Item = EBook>>(iter: I) -> Self {
        Catalog {
            books: iter.into_iter().map(|book| (book.id(), book)).collect(),
        }
    }
}
