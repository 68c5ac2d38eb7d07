//! ServiceBuilder - RosterService の構築とワイヤリング
//!
//! 起動時に設定を検証します（Fail-fast）。

use std::sync::Arc;

use super::RosterService;
use crate::domain::RotationPolicy;
use crate::ports::{Clock, RosterStore, SystemClock};

/// ServiceBuilder は RosterService を構築
///
/// # 使用例
/// ```ignore
/// let service = ServiceBuilder::new(InMemoryRosterStore::new())
///     .crew_size(2)
///     .build()?;
/// ```
pub struct ServiceBuilder {
    store: Arc<dyn RosterStore>,
    clock: Arc<dyn Clock>,
    crew_size: usize,
}

/// BuildError はサービス構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("crew size must be at least 1 (got {0})")]
    InvalidCrewSize(usize),
}

impl ServiceBuilder {
    pub fn new(store: impl RosterStore + 'static) -> Self {
        Self::from_arc(Arc::new(store))
    }

    /// Share an existing store handle.
    pub fn from_arc(store: Arc<dyn RosterStore>) -> Self {
        Self {
            store,
            clock: Arc::new(SystemClock),
            crew_size: RotationPolicy::DEFAULT_CREW_SIZE,
        }
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn crew_size(mut self, crew_size: usize) -> Self {
        self.crew_size = crew_size;
        self
    }

    /// # 検証
    /// - crew_size が 0 なら BuildError::InvalidCrewSize
    pub fn build(self) -> Result<RosterService, BuildError> {
        if self.crew_size == 0 {
            return Err(BuildError::InvalidCrewSize(self.crew_size));
        }
        Ok(RosterService::new(
            self.store,
            self.clock,
            RotationPolicy::new(self.crew_size),
        ))
    }
}
