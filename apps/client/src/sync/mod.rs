//! Synchronization loop keeping a local [`crate::domain::ViewState`]
//! consistent with the shared store.

pub mod session;

pub use session::SyncSession;
