//! RosterStore port - Worker 名簿の正本（source of truth）
//!
//! ローテーションの状態はすべて Worker レコードに含まれます。
//! ストアは単純な CRUD と、原子的な一括更新だけを提供します。
//!
//! # 実装
//! - `impls::InMemoryRosterStore`: テスト・開発用
//! - `impls::JsonFileRosterStore`: JSON スナップショットに永続化

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{NewWorker, RotaError, Worker, WorkerId};

/// One change inside a `batch_update`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    SetOrder { id: WorkerId, order_index: i64 },
    SetOff { id: WorkerId, is_off: bool },
    RecordDuty { id: WorkerId, at: DateTime<Utc> },
}

impl Mutation {
    pub fn target(&self) -> WorkerId {
        match self {
            Mutation::SetOrder { id, .. }
            | Mutation::SetOff { id, .. }
            | Mutation::RecordDuty { id, .. } => *id,
        }
    }

    /// Apply to the matching record.
    pub fn apply(&self, worker: &mut Worker) {
        match *self {
            Mutation::SetOrder { order_index, .. } => worker.move_to(order_index),
            Mutation::SetOff { is_off, .. } => worker.set_off(is_off),
            Mutation::RecordDuty { at, .. } => worker.record_duty(at),
        }
    }
}

/// RosterStore は Worker 名簿の永続化ポート
///
/// # 設計原則
/// - 一覧は常に `(order_index, id)` の昇順
/// - `insert` は `order_index = max + 1`（空なら 0）を割り当てる
/// - `batch_update` は all-or-nothing：未知の id が一つでもあれば何も適用しない
/// - 楽観ロックは持たない（同時更新は後勝ち）
#[async_trait]
pub trait RosterStore: Send + Sync {
    /// Every worker, rotation order.
    async fn list_ordered(&self) -> Result<Vec<Worker>, RotaError>;

    /// Workers with `is_off == false`, rotation order.
    async fn list_eligible_ordered(&self) -> Result<Vec<Worker>, RotaError>;

    async fn get(&self, id: WorkerId) -> Result<Worker, RotaError>;

    async fn insert(&self, worker: NewWorker) -> Result<WorkerId, RotaError>;

    /// Insert several workers in one commit, in order. All or none.
    async fn insert_many(&self, workers: Vec<NewWorker>) -> Result<Vec<WorkerId>, RotaError>;

    async fn delete(&self, id: WorkerId) -> Result<(), RotaError>;

    /// Commit all mutations atomically or none of them.
    async fn batch_update(&self, mutations: Vec<Mutation>) -> Result<(), RotaError>;
}
