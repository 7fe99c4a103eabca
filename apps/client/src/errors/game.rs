//! Game-level error type used across services and the sync loop.
//!
//! This error type is transport-agnostic. The store boundary has its own
//! `StoreError` (see `crate::store`); it converts into `GameError` via the
//! provided `From` implementation, and services intercept the store
//! conflicts they can recover from before converting.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::store::StoreError;

/// Store failure kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreKind {
    Unavailable,
    Other(String),
}

/// Missing resources in game terms (minimal set; extend as needed)
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Room,
    Turn,
    Other(String),
}

/// Semantic conflict kinds (extend as needed)
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    /// The partner claimed the same turn number first.
    TurnNumberTaken,
    RoomFull,
    RoomAlreadyStarted,
    Other(String),
}

/// Input/user validation or game rule violation kinds
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    OutOfTurn,
    EmptyAnswer,
    EmptyName,
    MissingPartner,
    Config,
    Other(String),
}

/// Central game error type
#[derive(Debug, Clone, PartialEq)]
pub enum GameError {
    /// Input validation or game rule violation
    Validation(ValidationKind, String),
    /// Semantic conflict
    Conflict(ConflictKind, String),
    /// Missing resource in game terms
    NotFound(NotFoundKind, String),
    /// Transport-level store failure
    Store(StoreKind, String),
}

impl Display for GameError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            GameError::Validation(kind, d) => write!(f, "validation error {kind:?}: {d}"),
            GameError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            GameError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            GameError::Store(kind, d) => write!(f, "store {kind:?}: {d}"),
        }
    }
}

impl Error for GameError {}

impl GameError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn store(kind: StoreKind, detail: impl Into<String>) -> Self {
        Self::Store(kind, detail.into())
    }
}

impl From<StoreError> for GameError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(detail) => GameError::Store(StoreKind::Unavailable, detail),
            StoreError::Conflict(detail) => {
                GameError::Conflict(ConflictKind::Other("store conflict".into()), detail)
            }
            StoreError::NotFound(detail) => {
                GameError::NotFound(NotFoundKind::Other("store record".into()), detail)
            }
        }
    }
}
