//! Engine error types

use crate::config::ConfigError;
use thiserror::Error;

/// Errors raised by roll, allocation, stat and map operations
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid roll range: lower bound {lower} is not below upper bound {upper}")]
    InvalidRange { lower: i32, upper: i32 },
    #[error("Attribute seeding gave up after {attempts} attempts")]
    Seeding { attempts: u32 },
    #[error("Allocation error: {0}")]
    Allocation(#[from] AllocationError),
    #[error("Unknown stat: {0}")]
    UnknownStat(String),
    #[error("Level {requested} not found (next level to create is {next})")]
    LevelNotFound { requested: usize, next: usize },
    #[error("Attack target goal must be positive, got {0}")]
    InvalidGoal(i32),
    #[error("Unknown class: {0}")]
    UnknownClass(String),
    #[error("A class has already been selected")]
    ClassAlreadySelected,
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),
    #[error("Snapshot serialization failed: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// Point-budget violations during attribute allocation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AllocationError {
    #[error("{0} attribute points must be assigned before finalizing")]
    PointsRemaining(i32),
    #[error("No remaining attribute points")]
    NoFreePoints,
    #[error("Attributes are locked once initialization is complete")]
    Locked,
}

pub type Result<T> = std::result::Result<T, EngineError>;
