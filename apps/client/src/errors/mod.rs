//! Error types for the client core.

pub mod game;

pub use game::{ConflictKind, GameError, NotFoundKind, StoreKind, ValidationKind};
