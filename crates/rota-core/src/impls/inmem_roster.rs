//! In-memory roster store.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::RosterState;
use crate::domain::{NewWorker, RotaError, Worker, WorkerId};
use crate::ports::{Mutation, RosterStore};

/// Roster kept in process memory.
///
/// Every mutating call works on a copy of the state and swaps it in on
/// success, so a failed batch leaves nothing behind.
#[derive(Clone, Default)]
pub struct InMemoryRosterStore {
    state: Arc<Mutex<RosterState>>,
}

impl InMemoryRosterStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RosterStore for InMemoryRosterStore {
    async fn list_ordered(&self) -> Result<Vec<Worker>, RotaError> {
        let state = self.state.lock().await;
        Ok(state.ordered())
    }

    async fn list_eligible_ordered(&self) -> Result<Vec<Worker>, RotaError> {
        let state = self.state.lock().await;
        Ok(state.eligible_ordered())
    }

    async fn get(&self, id: WorkerId) -> Result<Worker, RotaError> {
        let state = self.state.lock().await;
        state.get(id)
    }

    async fn insert(&self, worker: NewWorker) -> Result<WorkerId, RotaError> {
        let mut state = self.state.lock().await;
        let mut next = state.clone();
        let id = next.insert(worker)?;
        *state = next;
        Ok(id)
    }

    async fn insert_many(&self, workers: Vec<NewWorker>) -> Result<Vec<WorkerId>, RotaError> {
        let mut state = self.state.lock().await;
        let mut next = state.clone();
        let ids = next.insert_many(workers)?;
        *state = next;
        Ok(ids)
    }

    async fn delete(&self, id: WorkerId) -> Result<(), RotaError> {
        let mut state = self.state.lock().await;
        let mut next = state.clone();
        next.delete(id)?;
        *state = next;
        Ok(())
    }

    async fn batch_update(&self, mutations: Vec<Mutation>) -> Result<(), RotaError> {
        let mut state = self.state.lock().await;
        let mut next = state.clone();
        next.apply(&mutations)?;
        *state = next;
        Ok(())
    }
}
