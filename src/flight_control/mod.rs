mod bird_state;
pub(crate) mod common;
mod flight_physics;
mod frame_clock;
mod state_vote;

pub use bird_state::{BirdState, FlightSummary, Momentum, Rotation};
pub use flight_physics::FlightPhysics;
pub use frame_clock::FrameClock;
pub use state_vote::{StateVote, VOTE_WINDOW};
