//! JSON file roster store.
//!
//! 名簿全体を一つの JSON スナップショットとして保存します。
//! 書き込みは一時ファイル → rename で行うため、途中で失敗しても
//! 既存のファイルは壊れません。

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::debug;

use super::{RosterSnapshot, RosterState};
use crate::domain::{NewWorker, RotaError, Worker, WorkerId};
use crate::ports::{Mutation, RosterStore};

/// Roster persisted to a JSON file on every commit.
///
/// The in-memory copy is replaced only after the file write succeeded.
pub struct JsonFileRosterStore {
    path: PathBuf,
    state: Mutex<RosterState>,
}

impl JsonFileRosterStore {
    /// Load the roster at `path`. A missing file is an empty roster.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, RotaError> {
        let path = path.into();
        let state = match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let snapshot: RosterSnapshot = serde_json::from_slice(&bytes)?;
                RosterState::from_snapshot(snapshot)?
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => RosterState::new(),
            Err(err) => return Err(err.into()),
        };
        debug!(path = %path.display(), workers = state.worker_count(), "roster loaded");
        Ok(Self {
            path,
            state: Mutex::new(state),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, state: &RosterState) -> Result<(), RotaError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let bytes = serde_json::to_vec_pretty(&state.to_snapshot())?;
        let tmp = self.path.with_extension("json.tmp");
        if let Err(err) = write_and_replace(&tmp, &self.path, &bytes).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(err.into());
        }
        debug!(path = %self.path.display(), workers = state.worker_count(), "roster saved");
        Ok(())
    }
}

/// Write `bytes` to `tmp`, flush to disk, then rename over `target`.
async fn write_and_replace(tmp: &Path, target: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::File::create(tmp).await?;
    file.write_all(bytes).await?;
    file.sync_all().await?;
    drop(file);
    tokio::fs::rename(tmp, target).await
}

#[async_trait]
impl RosterStore for JsonFileRosterStore {
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
        self.persist(&next).await?;
        *state = next;
        Ok(id)
    }

    async fn insert_many(&self, workers: Vec<NewWorker>) -> Result<Vec<WorkerId>, RotaError> {
        let mut state = self.state.lock().await;
        let mut next = state.clone();
        let ids = next.insert_many(workers)?;
        self.persist(&next).await?;
        *state = next;
        Ok(ids)
    }

    async fn delete(&self, id: WorkerId) -> Result<(), RotaError> {
        let mut state = self.state.lock().await;
        let mut next = state.clone();
        next.delete(id)?;
        self.persist(&next).await?;
        *state = next;
        Ok(())
    }

    async fn batch_update(&self, mutations: Vec<Mutation>) -> Result<(), RotaError> {
        let mut state = self.state.lock().await;
        let mut next = state.clone();
        next.apply(&mutations)?;
        self.persist(&next).await?;
        *state = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorKind;

    #[tokio::test]
    async fn missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileRosterStore::open(dir.path().join("rota.json"))
            .await
            .unwrap();
        assert!(store.list_ordered().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn reopen_returns_same_roster() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rota.json");

        let store = JsonFileRosterStore::open(&path).await.unwrap();
        let a = store.insert(NewWorker::new("A")).await.unwrap();
        store.insert(NewWorker::new("B")).await.unwrap();
        store
            .batch_update(vec![
                Mutation::SetOff { id: a, is_off: true },
                Mutation::SetOrder { id: a, order_index: 9 },
            ])
            .await
            .unwrap();
        let before = store.list_ordered().await.unwrap();
        drop(store);

        let reopened = JsonFileRosterStore::open(&path).await.unwrap();
        assert_eq!(reopened.list_ordered().await.unwrap(), before);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn write_failure_is_a_commit_failure_and_keeps_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rota.json");
        let store = JsonFileRosterStore::open(&path).await.unwrap();

        // A directory where the temp file should go makes every write fail.
        std::fs::create_dir(path.with_extension("json.tmp")).unwrap();
        let err = store.insert(NewWorker::new("A")).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Commit);
        assert!(store.list_ordered().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_rename_removes_temp_file_and_keeps_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rota.json");
        let store = JsonFileRosterStore::open(&path).await.unwrap();

        // A non-empty directory at the target path cannot be replaced by a file.
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), b"x").unwrap();
        let err = store.insert(NewWorker::new("A")).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Commit);
        assert!(!path.with_extension("json.tmp").exists());
        assert!(store.list_ordered().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn insert_many_is_one_commit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rota.json");
        let store = JsonFileRosterStore::open(&path).await.unwrap();
        store
            .insert_many(vec![NewWorker::new("A"), NewWorker::new("B")])
            .await
            .unwrap();

        let reopened = JsonFileRosterStore::open(&path).await.unwrap();
        let names: Vec<String> = reopened
            .list_ordered()
            .await
            .unwrap()
            .into_iter()
            .map(|w| w.name)
            .collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn corrupt_file_fails_to_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rota.json");
        std::fs::write(&path, b"{ not json").unwrap();

        assert!(JsonFileRosterStore::open(&path).await.is_err());
    }
}
