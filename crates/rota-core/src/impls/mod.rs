//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **InMemoryRosterStore**: テスト・開発用の名簿
//! - **JsonFileRosterStore**: JSON スナップショットに永続化する名簿（CLI が使用）

pub mod inmem_roster;
pub mod json_roster;
mod roster_state;

pub use self::inmem_roster::InMemoryRosterStore;
pub use self::json_roster::JsonFileRosterStore;
pub use self::roster_state::{RosterSnapshot, RosterState};
