//! Domain model (ids, worker records, rotation policy, errors).
//!
//! - **ids**: WorkerId
//! - **worker**: Worker / NewWorker
//! - **rotation**: 純粋関数による選出と並べ替え（ストアに依存しない）
//! - **errors**: RotaError と ErrorKind

pub mod errors;
pub mod ids;
pub mod rotation;
pub mod worker;

pub use self::errors::{ErrorKind, RotaError};
pub use self::ids::WorkerId;
pub use self::rotation::RotationPolicy;
pub use self::worker::{NewWorker, Worker};
