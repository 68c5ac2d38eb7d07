//! App - アプリケーション層
//!
//! ports とローテーション方針を組み合わせて、名前の付いた操作を提供します。
//!
//! # 主要コンポーネント
//! - **ServiceBuilder**: 構築と起動時検証
//! - **RosterService**: 選出・勤務記録・並べ替え・OFF 切り替え・名簿管理
//! - **status**: RosterSummary / DutyReceipt

pub mod builder;
pub mod service;
pub mod status;

pub use self::builder::{BuildError, ServiceBuilder};
pub use self::service::RosterService;
pub use self::status::{DutyReceipt, RosterSummary};
