#![allow(missing_docs)]

use chrono::{DateTime, Utc};

use crate::{error::Error, models::Identified};

/// Lifecycle of a held collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Never fetched.
    #[default]
    Idle,
    /// A fetch-all is in flight.
    Loading,
    /// Holds the result of the last successful fetch-all.
    Ready,
    /// The last fetch-all failed; items are the last known-good view.
    Failed,
}

/// Point-in-time summary of a collection, for status lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionStatus {
    pub state: LoadState,
    pub len: usize,
    pub error: Option<Error>,
    pub fetched_at: Option<DateTime<Utc>>,
}

/// An ordered, locally held mirror of a server-side list.
///
/// Items are only ever replaced wholesale by a completed fetch or adjusted
/// one at a time after the server acknowledged a mutation.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    items: Vec<T>,
    state: LoadState,
    error: Option<Error>,
    fetched_at: Option<DateTime<Utc>>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            state: LoadState::Idle,
            error: None,
            fetched_at: None,
        }
    }
}

impl<T: Identified + Clone> Collection<T> {
    pub fn begin_load(&mut self) {
        self.state = LoadState::Loading;
    }

    /// Replace everything with a fresh server listing.
    pub fn load_succeeded(&mut self, items: Vec<T>) {
        self.items = items;
        self.state = LoadState::Ready;
        self.error = None;
        self.fetched_at = Some(Utc::now());
    }

    /// Record a failed fetch, keeping whatever was held before.
    pub fn load_failed(&mut self, error: Error) {
        self.state = LoadState::Failed;
        self.error = Some(error);
    }

    pub fn append(&mut self, item: T) {
        self.items.push(item);
    }

    /// Replace the item with the same id in place. Returns `false` (and drops
    /// `item`) when no such id is held.
    pub fn replace(&mut self, item: T) -> bool {
        match self.position(item.id()) {
            Some(index) => {
                self.items[index] = item;
                true
            }
            None => false,
        }
    }

    /// Remove the item with `id`, preserving the order of the rest.
    pub fn remove(&mut self, id: T::Id) -> Option<T> {
        self.position(id).map(|index| self.items.remove(index))
    }

    pub fn get(&self, id: T::Id) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    fn position(&self, id: T::Id) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    pub fn status(&self) -> CollectionStatus {
        CollectionStatus {
            state: self.state,
            len: self.items.len(),
            error: self.error.clone(),
            fetched_at: self.fetched_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row(u32, &'static str);

    impl Identified for Row {
        type Id = u32;

        fn id(&self) -> u32 {
            self.0
        }
    }

    fn loaded() -> Collection<Row> {
        let mut rows = Collection::default();
        rows.begin_load();
        rows.load_succeeded(vec![Row(1, "a"), Row(2, "b"), Row(3, "c")]);
        rows
    }

    #[test]
    fn follows_idle_loading_ready() {
        let mut rows: Collection<Row> = Collection::default();
        assert_eq!(rows.state(), LoadState::Idle);
        rows.begin_load();
        assert!(rows.is_loading());
        rows.load_succeeded(vec![Row(1, "a")]);
        assert_eq!(rows.state(), LoadState::Ready);
        assert!(rows.status().fetched_at.is_some());
    }

    #[test]
    fn failed_load_keeps_previous_items() {
        let mut rows = loaded();
        rows.begin_load();
        rows.load_failed(Error::request_failed(None, "offline"));
        assert_eq!(rows.state(), LoadState::Failed);
        assert_eq!(rows.len(), 3);
        assert!(rows.status().error.is_some());

        rows.begin_load();
        rows.load_succeeded(vec![Row(9, "z")]);
        assert_eq!(rows.items(), &[Row(9, "z")]);
        assert_eq!(rows.status().error, None);
    }

    #[test]
    fn replace_preserves_position_and_ignores_unknown_ids() {
        let mut rows = loaded();
        assert!(rows.replace(Row(2, "B")));
        assert_eq!(rows.items(), &[Row(1, "a"), Row(2, "B"), Row(3, "c")]);

        assert!(!rows.replace(Row(7, "x")));
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn remove_takes_exactly_one() {
        let mut rows = loaded();
        assert_eq!(rows.remove(2), Some(Row(2, "b")));
        assert_eq!(rows.items(), &[Row(1, "a"), Row(3, "c")]);
        assert_eq!(rows.remove(2), None);
        assert_eq!(rows.get(3), Some(&Row(3, "c")));
    }
}
