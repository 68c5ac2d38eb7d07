//! Errors - エラー型と分類
//!
//! すべての操作は `Result<_, RotaError>` を返し、呼び出し側へ伝播します。
//! ローカルな回復はロールバックのみです（部分的な変更は見えません）。

use thiserror::Error;

use super::WorkerId;

/// ErrorKind はエラーの運用分類
///
/// - NotFound: 参照された Worker が存在しない
/// - InvalidInput: 空・不正な入力（順序リストや名前など）
/// - Commit: ストアのトランザクション失敗（I/O, シリアライズ）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidInput,
    Commit,
}

/// RotaError はドメインエラー
#[derive(Debug, Error)]
pub enum RotaError {
    #[error("worker not found: {0}")]
    NotFound(WorkerId),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("commit failed: {0}")]
    CommitFailure(String),
}

impl RotaError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn commit(message: impl Into<String>) -> Self {
        Self::CommitFailure(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            RotaError::NotFound(_) => ErrorKind::NotFound,
            RotaError::InvalidInput(_) => ErrorKind::InvalidInput,
            RotaError::CommitFailure(_) => ErrorKind::Commit,
        }
    }
}

impl From<std::io::Error> for RotaError {
    fn from(err: std::io::Error) -> Self {
        Self::CommitFailure(err.to_string())
    }
}

impl From<serde_json::Error> for RotaError {
    fn from(err: serde_json::Error) -> Self {
        Self::CommitFailure(err.to_string())
    }
}
