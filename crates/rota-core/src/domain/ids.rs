//! Domain identifiers.
//!
//! Worker の ID はストアが採番する整数です（`id:int`）。
//! newtype にしておくことで、order_index や duty_count など他の整数と混同できません。

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a Worker (assigned by the roster store).
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkerId(i64);

impl WorkerId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for WorkerId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "worker-{}", self.0)
    }
}
