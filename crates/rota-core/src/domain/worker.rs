//! Worker record: one rotation participant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::WorkerId;

/// A rotation participant as persisted by the roster store.
///
/// Design:
/// - `order_index` is the only rotation state. Lower = sooner.
/// - `(order_index, id)` is the total order; gaps in `order_index` are fine.
/// - State transitions happen through methods, not direct field writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    pub id: WorkerId,
    pub name: String,

    /// Excluded from selection while true.
    #[serde(default)]
    pub is_off: bool,

    pub order_index: i64,

    /// When this worker last completed duty (if ever).
    #[serde(default)]
    pub last_duty_date: Option<DateTime<Utc>>,

    /// Total recorded duties. Only grows, only via `record_duty`.
    #[serde(default)]
    pub duty_count: u32,
}

impl Worker {
    pub fn new(id: WorkerId, name: impl Into<String>, order_index: i64) -> Self {
        Self {
            id,
            name: name.into(),
            is_off: false,
            order_index,
            last_duty_date: None,
            duty_count: 0,
        }
    }

    /// Participates in selection?
    pub fn is_eligible(&self) -> bool {
        !self.is_off
    }

    /// Sort key used everywhere a roster is listed.
    pub fn rank(&self) -> (i64, WorkerId) {
        (self.order_index, self.id)
    }

    pub fn set_off(&mut self, is_off: bool) {
        self.is_off = is_off;
    }

    pub fn move_to(&mut self, order_index: i64) {
        self.order_index = order_index;
    }

    /// Confirm one served duty.
    pub fn record_duty(&mut self, at: DateTime<Utc>) {
        self.last_duty_date = Some(at);
        self.duty_count = self.duty_count.saturating_add(1);
    }
}

/// Insert payload. The store assigns `id` and `order_index`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewWorker {
    pub name: String,
    #[serde(default)]
    pub is_off: bool,
}

impl NewWorker {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_off: false,
        }
    }
}
