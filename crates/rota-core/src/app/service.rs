//! RosterService - 勤務ローテーションの操作
//!
//! 各操作は独立した状態遷移で、ストアへの書き込みは一回の `batch_update`
//! （または insert / delete）にまとめます。失敗時に部分的な変更は残りません。
//!
//! サービス自体はロックを持ちません。同時に RecordDuty と Reorder が
//! 走った場合は後勝ちになります（10 人程度の名簿では許容範囲）。

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::{DutyReceipt, RosterSummary};
use crate::domain::rotation;
use crate::domain::{NewWorker, RotaError, RotationPolicy, Worker, WorkerId};
use crate::ports::{Clock, Mutation, RosterStore};

pub struct RosterService {
    store: Arc<dyn RosterStore>,
    clock: Arc<dyn Clock>,
    policy: RotationPolicy,
}

impl RosterService {
    pub fn new(store: Arc<dyn RosterStore>, clock: Arc<dyn Clock>, policy: RotationPolicy) -> Self {
        Self {
            store,
            clock,
            policy,
        }
    }

    pub fn policy(&self) -> RotationPolicy {
        self.policy
    }

    /// Every worker in rotation order.
    pub async fn roster(&self) -> Result<Vec<Worker>, RotaError> {
        self.store.list_ordered().await
    }

    pub async fn summary(&self) -> Result<RosterSummary, RotaError> {
        let roster = self.store.list_ordered().await?;
        Ok(RosterSummary::from_workers(&roster))
    }

    /// The crew due next. Read-only.
    pub async fn next_duty(&self) -> Result<Vec<Worker>, RotaError> {
        let eligible = self.store.list_eligible_ordered().await?;
        let crew = self.policy.select_next(&eligible);
        debug!(eligible = eligible.len(), crew = crew.len(), "selected next crew");
        Ok(crew)
    }

    /// Credit `ids` with a duty and move them to the back of the rotation.
    ///
    /// Unknown ids are skipped and reported in the receipt; repeated ids
    /// count once. Nothing to record is a successful no-op.
    pub async fn record_duty(&self, ids: &[WorkerId]) -> Result<DutyReceipt, RotaError> {
        let roster = self.store.list_ordered().await?;
        let known: HashSet<WorkerId> = roster.iter().map(|w| w.id).collect();

        let (recorded, skipped): (Vec<WorkerId>, Vec<WorkerId>) = rotation::dedup_ids(ids)
            .into_iter()
            .partition(|id| known.contains(id));
        for id in &skipped {
            warn!(worker = %id, "unknown worker in duty record, skipped");
        }

        if recorded.is_empty() {
            debug!("no duty to record");
            return Ok(DutyReceipt {
                recorded,
                skipped,
                at: None,
            });
        }

        let at = self.clock.now();
        let order = rotation::rerank_after_duty(&roster, &recorded);
        let mutations: Vec<Mutation> = recorded
            .iter()
            .map(|&id| Mutation::RecordDuty { id, at })
            .chain(
                rotation::positions(&order)
                    .into_iter()
                    .map(|(id, order_index)| Mutation::SetOrder { id, order_index }),
            )
            .collect();

        self.store.batch_update(mutations).await?;
        info!(crew = ?recorded, skipped = skipped.len(), %at, "duty recorded");

        Ok(DutyReceipt {
            recorded,
            skipped,
            at: Some(at),
        })
    }

    /// Select the next crew and record their duty in one step.
    pub async fn advance(&self) -> Result<DutyReceipt, RotaError> {
        let crew = self.next_duty().await?;
        if crew.is_empty() {
            info!("no eligible workers, rotation not advanced");
            return Ok(DutyReceipt::default());
        }
        let ids: Vec<WorkerId> = crew.iter().map(|w| w.id).collect();
        self.record_duty(&ids).await
    }

    /// Replace the rotation order with `ids` (0-based positions).
    ///
    /// Strict: the list must name every worker exactly once. Any unknown id
    /// fails the whole call and nothing is committed.
    pub async fn reorder(&self, ids: &[WorkerId]) -> Result<(), RotaError> {
        if ids.is_empty() {
            return Err(RotaError::invalid("order list is empty"));
        }
        if rotation::dedup_ids(ids).len() != ids.len() {
            return Err(RotaError::invalid("order list names a worker more than once"));
        }

        let roster = self.store.list_ordered().await?;
        let known: HashSet<WorkerId> = roster.iter().map(|w| w.id).collect();
        if let Some(missing) = ids.iter().find(|id| !known.contains(*id)) {
            return Err(RotaError::NotFound(*missing));
        }
        if ids.len() != roster.len() {
            return Err(RotaError::invalid(format!(
                "order list names {} of {} workers",
                ids.len(),
                roster.len()
            )));
        }

        let mutations = rotation::positions(ids)
            .into_iter()
            .map(|(id, order_index)| Mutation::SetOrder { id, order_index })
            .collect();
        self.store.batch_update(mutations).await?;
        info!(order = ?ids, "roster reordered");
        Ok(())
    }

    /// Toggle a worker in or out of the rotation. Position is untouched.
    pub async fn set_eligibility(&self, id: WorkerId, is_off: bool) -> Result<Worker, RotaError> {
        self.store
            .batch_update(vec![Mutation::SetOff { id, is_off }])
            .await?;
        info!(worker = %id, is_off, "eligibility changed");
        self.store.get(id).await
    }

    /// Append a worker at the back of the rotation.
    pub async fn add_worker(&self, name: &str) -> Result<Worker, RotaError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RotaError::invalid("worker name is empty"));
        }
        let id = self.store.insert(NewWorker::new(name)).await?;
        info!(worker = %id, name, "worker added");
        self.store.get(id).await
    }

    /// Remaining workers keep their `order_index` values.
    pub async fn remove_worker(&self, id: WorkerId) -> Result<(), RotaError> {
        self.store.delete(id).await?;
        info!(worker = %id, "worker removed");
        Ok(())
    }

    /// Fill an empty roster with `names`, in order, as one commit.
    /// Returns whether it did.
    pub async fn seed<S: AsRef<str>>(&self, names: &[S]) -> Result<bool, RotaError> {
        if names.is_empty() {
            return Ok(false);
        }
        if !self.store.list_ordered().await?.is_empty() {
            debug!("roster not empty, seed skipped");
            return Ok(false);
        }

        let mut seen = HashSet::new();
        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() {
                return Err(RotaError::invalid("seed contains an empty name"));
            }
            if !seen.insert(name) {
                return Err(RotaError::invalid(format!("seed repeats '{name}'")));
            }
        }

        let workers = names
            .iter()
            .map(|name| NewWorker::new(name.as_ref().trim()))
            .collect();
        self.store.insert_many(workers).await?;
        info!(workers = names.len(), "roster seeded");
        Ok(true)
    }
}
