//! Id-keyed record collections.
//!
//! Every record list in the app follows the same sync rules after a
//! successful backend call: append on create, replace-by-id on update,
//! remove-by-id on delete. [`Collection`] centralises those rules so the
//! per-entity state containers stay trivial.

/// A record that may carry a backend-assigned id.
///
/// Drafts have no id; the backend assigns one on create and it is immutable
/// thereafter.
pub trait Keyed {
    fn key(&self) -> Option<u64>;
}

/// An in-memory record list kept in sync with the backend by id.
#[derive(Clone, Debug, PartialEq)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Keyed + Clone> Collection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole collection with a freshly fetched list.
    pub fn set(&mut self, items: Vec<T>) {
        self.items = items;
    }

    /// Append a newly created record.
    pub fn insert(&mut self, item: T) {
        self.items.push(item);
    }

    /// Replace the record with the given id. No-op when the id is absent.
    pub fn replace(&mut self, id: u64, item: T) {
        if let Some(slot) = self.items.iter_mut().find(|i| i.key() == Some(id)) {
            *slot = item;
        }
    }

    /// Remove the record with the given id. No-op when the id is absent.
    pub fn remove(&mut self, id: u64) {
        self.items.retain(|i| i.key() != Some(id));
    }

    pub fn get(&self, id: u64) -> Option<&T> {
        self.items.iter().find(|i| i.key() == Some(id))
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Rec {
        id: Option<u64>,
        label: String,
    }

    impl Keyed for Rec {
        fn key(&self) -> Option<u64> {
            self.id
        }
    }

    fn rec(id: u64, label: &str) -> Rec {
        Rec {
            id: Some(id),
            label: label.to_string(),
        }
    }

    #[test]
    fn test_create_update_delete_leaves_no_trace() {
        let mut records = Collection::new();

        records.insert(rec(7, "created"));
        assert_eq!(records.len(), 1);

        records.replace(7, rec(7, "updated"));
        assert_eq!(records.get(7).map(|r| r.label.as_str()), Some("updated"));

        records.remove(7);
        assert!(records.is_empty());
        assert!(records.get(7).is_none());
    }

    #[test]
    fn test_replace_unknown_id_is_noop() {
        let mut records = Collection::new();
        records.insert(rec(1, "one"));

        records.replace(2, rec(2, "two"));

        assert_eq!(records.len(), 1);
        assert_eq!(records.get(1).map(|r| r.label.as_str()), Some("one"));
        assert!(records.get(2).is_none());
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut records = Collection::new();
        records.insert(rec(1, "one"));

        records.remove(9);

        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_set_replaces_contents() {
        let mut records = Collection::new();
        records.insert(rec(1, "stale"));

        records.set(vec![rec(2, "a"), rec(3, "b")]);

        assert_eq!(records.len(), 2);
        assert!(records.get(1).is_none());
        assert!(records.get(3).is_some());
    }

    #[test]
    fn test_collections_are_independent() {
        let mut medical = Collection::new();
        let mut medication = Collection::new();

        medical.insert(rec(1, "visit"));
        medication.insert(rec(1, "pill"));
        medical.remove(1);

        assert!(medical.is_empty());
        assert_eq!(medication.len(), 1);
    }
}
