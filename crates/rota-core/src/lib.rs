//! rota-core
//!
//! Duty rotation for a small roster of workers.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（WorkerId, Worker, RotationPolicy, errors）
//! - **ports**: 抽象化レイヤー（RosterStore, Clock）
//! - **app**: アプリケーションロジック（ServiceBuilder, RosterService, status）
//! - **impls**: 実装（InMemoryRosterStore, JsonFileRosterStore）
//!
//! 順番は `order_index` だけで決まり、勤務を記録した Worker は末尾へ移動します。

pub mod app;
pub mod domain;
pub mod impls;
pub mod ports;

pub use app::{BuildError, DutyReceipt, RosterService, RosterSummary, ServiceBuilder};
pub use domain::{ErrorKind, NewWorker, RotaError, RotationPolicy, Worker, WorkerId};
