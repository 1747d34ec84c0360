//! Record Store Module
//! Insertion-ordered, in-memory list of observations. Sole source of truth for
//! both the table and the chart.

use super::observation::{NewObservation, Observation, ObservationId};

/// Owns every observation recorded in this session.
#[derive(Debug, Default)]
pub struct RecordStore {
    entries: Vec<Observation>,
    next_id: u64,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a validated entry to the end and return its id.
    pub fn append(&mut self, entry: NewObservation) -> ObservationId {
        let id = ObservationId(self.next_id);
        self.next_id += 1;
        self.entries.push(Observation {
            id,
            date: entry.date,
            consumption: entry.consumption,
        });
        id
    }

    /// Remove the entry at `index`, shifting later entries down by one.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`. Callers resolve the index from the live
    /// sequence, so an out-of-range index is a bug in the caller.
    pub fn remove_at(&mut self, index: usize) -> Observation {
        assert!(
            index < self.entries.len(),
            "remove_at index {} out of range for store of length {}",
            index,
            self.entries.len()
        );
        self.entries.remove(index)
    }

    /// Remove the entry with `id`, looking up its position at call time.
    pub fn remove(&mut self, id: ObservationId) -> Option<Observation> {
        let index = self.position(id)?;
        Some(self.remove_at(index))
    }

    /// Current position of `id` in the sequence.
    pub fn position(&self, id: ObservationId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    /// The full ordered sequence.
    pub fn all(&self) -> &[Observation] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Date labels in store order.
    pub fn dates(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.date.clone()).collect()
    }

    /// Quantities in store order.
    pub fn consumptions(&self) -> Vec<f64> {
        self.entries.iter().map(|entry| entry.consumption).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn entry(date: &str, consumption: f64) -> NewObservation {
        NewObservation::new(date, consumption).unwrap()
    }

    fn filled(values: &[f64]) -> RecordStore {
        let mut store = RecordStore::new();
        for (i, v) in values.iter().enumerate() {
            store.append(entry(&format!("day-{}", i), *v));
        }
        store
    }

    #[test]
    fn append_preserves_insertion_order() {
        let store = filled(&[1.0, 2.0, 3.0]);
        assert_eq!(store.consumptions(), vec![1.0, 2.0, 3.0]);
        assert_eq!(store.dates(), vec!["day-0", "day-1", "day-2"]);
    }

    #[test]
    fn ids_are_unique_and_increasing() {
        let mut store = filled(&[1.0, 2.0]);
        let removed = store.remove_at(1);
        let next = store.append(entry("later", 5.0));
        assert!(next > removed.id);
        assert_ne!(next, store.all()[0].id);
    }

    #[test]
    fn remove_at_shifts_following_entries() {
        let mut store = filled(&[1.0, 2.0, 3.0, 4.0]);
        let removed = store.remove_at(1);
        assert_eq!(removed.consumption, 2.0);
        assert_eq!(store.consumptions(), vec![1.0, 3.0, 4.0]);
    }

    #[test]
    fn remove_by_id_uses_live_position() {
        let mut store = filled(&[1.0, 2.0, 3.0]);
        let third = store.all()[2].id;
        store.remove_at(0);
        let removed = store.remove(third).unwrap();
        assert_eq!(removed.consumption, 3.0);
        assert_eq!(store.consumptions(), vec![2.0]);
        assert!(store.remove(third).is_none());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn remove_at_out_of_range_panics() {
        let mut store = filled(&[1.0]);
        store.remove_at(1);
    }

    proptest! {
        #[test]
        fn remove_at_matches_vec_semantics(
            values in prop::collection::vec(-1.0e6f64..1.0e6, 1..32),
            pick in any::<prop::sample::Index>(),
        ) {
            let mut store = filled(&values);
            let i = pick.index(values.len());
            store.remove_at(i);

            let mut expected = values.clone();
            expected.remove(i);
            prop_assert_eq!(store.consumptions(), expected);
        }

        #[test]
        fn deleting_front_n_times_empties_store(
            values in prop::collection::vec(0.0f64..100.0, 0..32),
        ) {
            let mut store = filled(&values);
            for _ in 0..values.len() {
                store.remove_at(0);
            }
            prop_assert!(store.is_empty());
        }
    }
}
