use thiserror::Error;

use hermes_core::Quantity;

/// Domain-level errors for matching operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("minimum execution quantity not met: required {required}, available {available}")]
    InsufficientExecution {
        required: Quantity,
        available: Quantity,
    },
}
