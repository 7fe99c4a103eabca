//! Domain layer: pure game model and projection logic.

pub mod model;
pub mod projection;
pub mod view;

#[cfg(test)]
mod test_fixtures;
#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod tests_normalize;
#[cfg(test)]
mod tests_projection;
#[cfg(test)]
mod tests_props_projection;

// Re-exports for ergonomics
pub use model::{NewTurn, Room, RoomStatus, Turn};
pub use projection::{normalize_turns, progress_percent, project};
pub use prompt_pool::{GameMode, PromptKind};
pub use view::{Phase, ViewState};
