//! Roster state shared by the store implementations.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{NewWorker, RotaError, Worker, WorkerId};
use crate::ports::Mutation;

/// In-memory roster (single source of truth inside a store).
///
/// Mutating methods work on `&mut self`; stores call them on a clone and
/// swap it in only after everything (including persistence) succeeded.
#[derive(Debug, Clone)]
pub struct RosterState {
    workers: BTreeMap<WorkerId, Worker>,

    /// Next id to assign. Ids are never reused.
    next_id: i64,
}

/// On-disk shape of a roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterSnapshot {
    pub next_id: i64,
    pub workers: Vec<Worker>,
}

impl RosterState {
    pub fn new() -> Self {
        Self {
            workers: BTreeMap::new(),
            next_id: 1,
        }
    }

    pub fn from_snapshot(snapshot: RosterSnapshot) -> Result<Self, RotaError> {
        let mut workers = BTreeMap::new();
        for worker in snapshot.workers {
            if workers.insert(worker.id, worker).is_some() {
                return Err(RotaError::commit("snapshot contains duplicate worker ids"));
            }
        }
        let floor = workers.keys().next_back().map(|id| id.get() + 1).unwrap_or(1);
        Ok(Self {
            workers,
            next_id: snapshot.next_id.max(floor),
        })
    }

    pub fn to_snapshot(&self) -> RosterSnapshot {
        RosterSnapshot {
            next_id: self.next_id,
            workers: self.ordered(),
        }
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    pub fn ordered(&self) -> Vec<Worker> {
        let mut workers: Vec<Worker> = self.workers.values().cloned().collect();
        workers.sort_by_key(|w| w.rank());
        workers
    }

    pub fn eligible_ordered(&self) -> Vec<Worker> {
        self.ordered().into_iter().filter(|w| w.is_eligible()).collect()
    }

    pub fn get(&self, id: WorkerId) -> Result<Worker, RotaError> {
        self.workers.get(&id).cloned().ok_or(RotaError::NotFound(id))
    }

    /// Assigns the next id and `order_index = max + 1` (0 when empty).
    pub fn insert(&mut self, new: NewWorker) -> Result<WorkerId, RotaError> {
        let name = new.name.trim();
        if name.is_empty() {
            return Err(RotaError::invalid("worker name is empty"));
        }
        if self.workers.values().any(|w| w.name == name) {
            return Err(RotaError::invalid(format!("worker name '{name}' already exists")));
        }

        let order_index = match self.workers.values().map(|w| w.order_index).max() {
            Some(max) => max
                .checked_add(1)
                .ok_or_else(|| RotaError::invalid("order_index is at its maximum"))?,
            None => 0,
        };
        let id = WorkerId::new(self.next_id);
        self.next_id += 1;

        let mut worker = Worker::new(id, name, order_index);
        worker.set_off(new.is_off);
        self.workers.insert(id, worker);
        Ok(id)
    }

    /// Insert in order; on error `self` may be half-updated, like `apply`.
    pub fn insert_many(&mut self, workers: Vec<NewWorker>) -> Result<Vec<WorkerId>, RotaError> {
        workers.into_iter().map(|w| self.insert(w)).collect()
    }

    pub fn delete(&mut self, id: WorkerId) -> Result<Worker, RotaError> {
        self.workers.remove(&id).ok_or(RotaError::NotFound(id))
    }

    /// Apply every mutation, or fail on the first unknown id.
    ///
    /// On error `self` may be half-updated; callers must discard it.
    pub fn apply(&mut self, mutations: &[Mutation]) -> Result<(), RotaError> {
        for mutation in mutations {
            let id = mutation.target();
            let worker = self.workers.get_mut(&id).ok_or(RotaError::NotFound(id))?;
            mutation.apply(worker);
        }
        Ok(())
    }
}

impl Default for RosterState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_assigns_ids_and_appends() {
        let mut state = RosterState::new();
        let a = state.insert(NewWorker::new("A")).unwrap();
        let b = state.insert(NewWorker::new("B")).unwrap();

        assert_eq!(a, WorkerId::new(1));
        assert_eq!(b, WorkerId::new(2));
        assert_eq!(state.get(a).unwrap().order_index, 0);
        assert_eq!(state.get(b).unwrap().order_index, 1);
    }

    #[test]
    fn insert_uses_max_plus_one_after_gaps() {
        let mut state = RosterState::new();
        let a = state.insert(NewWorker::new("A")).unwrap();
        state
            .apply(&[Mutation::SetOrder { id: a, order_index: 7 }])
            .unwrap();
        let b = state.insert(NewWorker::new("B")).unwrap();
        assert_eq!(state.get(b).unwrap().order_index, 8);
    }

    #[test]
    fn insert_rejects_blank_and_duplicate_names() {
        let mut state = RosterState::new();
        state.insert(NewWorker::new("Kim")).unwrap();

        assert!(matches!(
            state.insert(NewWorker::new("   ")),
            Err(RotaError::InvalidInput(_))
        ));
        assert!(matches!(
            state.insert(NewWorker::new(" Kim ")),
            Err(RotaError::InvalidInput(_))
        ));
        assert_eq!(state.worker_count(), 1);
    }

    #[test]
    fn insert_at_max_order_index_is_rejected() {
        let snapshot = RosterSnapshot {
            next_id: 2,
            workers: vec![Worker::new(WorkerId::new(1), "A", i64::MAX)],
        };
        let mut state = RosterState::from_snapshot(snapshot).unwrap();

        let err = state.insert(NewWorker::new("B")).unwrap_err();
        assert!(matches!(err, RotaError::InvalidInput(_)));
        assert_eq!(state.worker_count(), 1);
    }

    #[test]
    fn insert_many_appends_in_order() {
        let mut state = RosterState::new();
        let ids = state
            .insert_many(vec![NewWorker::new("A"), NewWorker::new("B")])
            .unwrap();

        let order: Vec<(WorkerId, i64)> = state.ordered().iter().map(|w| (w.id, w.order_index)).collect();
        assert_eq!(order, vec![(ids[0], 0), (ids[1], 1)]);
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut state = RosterState::new();
        let a = state.insert(NewWorker::new("A")).unwrap();
        state.delete(a).unwrap();
        let b = state.insert(NewWorker::new("B")).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn apply_fails_on_unknown_id() {
        let mut state = RosterState::new();
        let a = state.insert(NewWorker::new("A")).unwrap();
        let err = state
            .apply(&[
                Mutation::SetOff { id: a, is_off: true },
                Mutation::SetOff { id: WorkerId::new(42), is_off: true },
            ])
            .unwrap_err();
        assert!(matches!(err, RotaError::NotFound(id) if id == WorkerId::new(42)));
    }

    #[test]
    fn snapshot_round_trip_keeps_next_id() {
        let mut state = RosterState::new();
        let a = state.insert(NewWorker::new("A")).unwrap();
        state.insert(NewWorker::new("B")).unwrap();
        state.delete(a).unwrap();

        let restored = RosterState::from_snapshot(state.to_snapshot()).unwrap();
        assert_eq!(restored.ordered(), state.ordered());

        let mut restored = restored;
        assert_eq!(restored.insert(NewWorker::new("C")).unwrap(), WorkerId::new(3));
    }

    #[test]
    fn snapshot_with_duplicate_ids_is_rejected() {
        let snapshot = RosterSnapshot {
            next_id: 3,
            workers: vec![
                Worker::new(WorkerId::new(1), "A", 0),
                Worker::new(WorkerId::new(1), "B", 1),
            ],
        };
        assert!(RosterState::from_snapshot(snapshot).is_err());
    }
}
