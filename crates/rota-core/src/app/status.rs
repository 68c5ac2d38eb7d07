use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Worker, WorkerId};

/// Roster counts for status display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterSummary {
    pub total: usize,
    pub eligible: usize,
    pub off: usize,
    pub total_duties: u64,
}

impl RosterSummary {
    pub fn from_workers(workers: &[Worker]) -> Self {
        let mut summary = Self::default();
        for worker in workers {
            summary.total += 1;
            if worker.is_eligible() {
                summary.eligible += 1;
            } else {
                summary.off += 1;
            }
            summary.total_duties += u64::from(worker.duty_count);
        }
        summary
    }
}

/// Outcome of recording a duty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DutyReceipt {
    /// Workers credited and moved to the back, in the order given.
    pub recorded: Vec<WorkerId>,

    /// Ids that did not resolve to a worker.
    pub skipped: Vec<WorkerId>,

    /// Timestamp written to `last_duty_date`; `None` when nothing was recorded.
    pub at: Option<DateTime<Utc>>,
}

impl DutyReceipt {
    pub fn is_noop(&self) -> bool {
        self.recorded.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_counts_eligibility_and_duties() {
        let mut a = Worker::new(WorkerId::new(1), "A", 0);
        a.duty_count = 3;
        let mut b = Worker::new(WorkerId::new(2), "B", 1);
        b.set_off(true);
        b.duty_count = 1;

        let summary = RosterSummary::from_workers(&[a, b]);
        assert_eq!(
            summary,
            RosterSummary {
                total: 2,
                eligible: 1,
                off: 1,
                total_duties: 4,
            }
        );
    }

    #[test]
    fn empty_receipt_is_noop() {
        assert!(DutyReceipt::default().is_noop());
    }
}
