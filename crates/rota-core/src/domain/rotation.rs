//! Rotation policy: decides who is on duty next and how the order moves.
//!
//! カーソルは持ちません。順番は `order_index` だけで表現し、
//! 勤務を記録した Worker を末尾へ移すことでラウンドロビンを実現します。
//! プロセスを再起動しても、ストアの内容だけで同じ結果になります。

use std::collections::HashSet;

use super::{Worker, WorkerId};

/// How many workers one duty takes.
///
/// Rotation itself is stateless; this is the only knob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    pub crew_size: usize,
}

impl RotationPolicy {
    pub const DEFAULT_CREW_SIZE: usize = 2;

    pub fn new(crew_size: usize) -> Self {
        Self { crew_size }
    }

    /// The crew due next, given the eligible workers.
    pub fn select_next(&self, eligible: &[Worker]) -> Vec<Worker> {
        select_next(eligible, self.crew_size)
    }
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CREW_SIZE)
    }
}

/// Pick the first `count` eligible workers by `(order_index, id)`.
///
/// Each worker appears at most once, so a roster smaller than `count`
/// yields everyone exactly once. Off workers are ignored even if passed in.
pub fn select_next(eligible: &[Worker], count: usize) -> Vec<Worker> {
    let mut ordered: Vec<&Worker> = eligible.iter().filter(|w| w.is_eligible()).collect();
    ordered.sort_by_key(|w| w.rank());

    let mut seen = HashSet::new();
    ordered
        .into_iter()
        .filter(|w| seen.insert(w.id))
        .take(count)
        .cloned()
        .collect()
}

/// Drop repeated ids, keeping the first occurrence.
pub fn dedup_ids(ids: &[WorkerId]) -> Vec<WorkerId> {
    let mut seen = HashSet::new();
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

/// New rotation order after `on_duty` served.
///
/// Workers not on duty keep their relative order and go first; the duty
/// crew follows in the order given. Ids not in `roster` are ignored.
/// Covers the whole roster, eligible or not.
pub fn rerank_after_duty(roster: &[Worker], on_duty: &[WorkerId]) -> Vec<WorkerId> {
    let mut ordered: Vec<&Worker> = roster.iter().collect();
    ordered.sort_by_key(|w| w.rank());

    let known: HashSet<WorkerId> = ordered.iter().map(|w| w.id).collect();
    let crew: Vec<WorkerId> = dedup_ids(on_duty)
        .into_iter()
        .filter(|id| known.contains(id))
        .collect();
    let crew_set: HashSet<WorkerId> = crew.iter().copied().collect();

    ordered
        .into_iter()
        .map(|w| w.id)
        .filter(|id| !crew_set.contains(id))
        .chain(crew)
        .collect()
}

/// 0-based positions for an explicit order.
pub fn positions(order: &[WorkerId]) -> Vec<(WorkerId, i64)> {
    order
        .iter()
        .enumerate()
        .map(|(index, id)| (*id, index as i64))
        .collect()
}
