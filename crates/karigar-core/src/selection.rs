//! # Selection Set
//!
//! Which cart lines take part in the current checkout calculation.
//!
//! The set itself knows nothing about the cart; [`crate::cart::Cart`] owns
//! one and keeps it free of ids that are no longer in the cart.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::types::ItemId;

/// A set of selected cart line ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionSet {
    ids: BTreeSet<ItemId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership of `id`. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, id: &ItemId) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.clone());
            true
        }
    }

    /// Adds `id` to the selection.
    pub fn select(&mut self, id: &ItemId) {
        self.ids.insert(id.clone());
    }

    /// Removes `id` from the selection. Unknown ids are ignored.
    pub fn deselect(&mut self, id: &ItemId) -> bool {
        self.ids.remove(id)
    }

    /// Replaces the selection with exactly `ids`.
    pub fn select_all<'a>(&mut self, ids: impl IntoIterator<Item = &'a ItemId>) {
        self.ids = ids.into_iter().cloned().collect();
    }

    /// Empties the selection.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn is_selected(&self, id: &ItemId) -> bool {
        self.ids.contains(id)
    }

    /// Drops every id for which `exists` is false.
    pub fn retain_existing(&mut self, mut exists: impl FnMut(&ItemId) -> bool) {
        self.ids.retain(|id| exists(id));
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected ids in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &ItemId> {
        self.ids.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_toggle_restores_state() {
        let a = ItemId::new("a");
        let mut set = SelectionSet::new();
        set.select(&ItemId::new("b"));
        let before = set.clone();

        assert!(set.toggle(&a));
        assert!(!set.toggle(&a));
        assert_eq!(set, before);
    }

    #[test]
    fn test_select_all_replaces() {
        let ids = [ItemId::new("a"), ItemId::new("b")];
        let mut set = SelectionSet::new();
        set.select(&ItemId::new("stale"));

        set.select_all(&ids);
        assert_eq!(set.len(), 2);
        assert!(!set.is_selected(&ItemId::new("stale")));

        set.clear();
        assert!(set.is_empty());
    }

    #[test]
    fn test_retain_existing() {
        let mut set = SelectionSet::new();
        set.select(&ItemId::new("keep"));
        set.select(&ItemId::new("gone"));

        set.retain_existing(|id| id.as_str() == "keep");
        assert_eq!(set.iter().map(ItemId::as_str).collect::<Vec<_>>(), vec!["keep"]);
    }
}
