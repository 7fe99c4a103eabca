#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod domain;
pub mod errors;
pub mod services;
pub mod store;
pub mod sync;
pub mod utils;

// Re-exports for public API
pub use config::GameConfig;
pub use domain::{project, Phase, Room, RoomStatus, Turn, ViewState};
pub use errors::GameError;
pub use store::{GameStore, MemoryGameStore, StoreError};
pub use sync::SyncSession;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    client_test_support::logging::init();
}
