//! Per-player pipeline ownership and the registry of live sessions.

mod flight_session;
mod frame_output;
mod session_registry;

pub use flight_session::FlightSession;
pub use frame_output::FrameOutput;
pub use session_registry::{SessionError, SessionId, SessionRegistry};
