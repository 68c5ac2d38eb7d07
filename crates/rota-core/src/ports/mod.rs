//! Ports - 抽象化レイヤー
//!
//! Hexagonal Architecture の「ポート」を定義します。
//! ローテーションのロジックはこれらの trait だけに依存し、
//! 名簿の保存先や時刻の取得方法を知りません。

pub mod clock;
pub mod roster_store;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::roster_store::{Mutation, RosterStore};
