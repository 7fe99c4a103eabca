//! Service layer: the mutations a client may issue against the shared
//! store. Services are trust boundaries: they re-derive the state they
//! validate against instead of trusting caller-provided views.

pub mod rooms;
pub mod turns;

pub use rooms::RoomService;
pub use turns::{AnswerOutcome, TurnActions};
