use super::common::Vec3D;
use crate::pose::MotionState;
use serde::Serialize;

/// Low-pass filtered velocity-like accumulators, decayed every tick.
#[derive(Debug, PartialEq, Clone, Copy, Default, Serialize)]
pub struct Momentum {
    pub vertical: f32,
    pub forward: f32,
    /// Turn rate accumulator, signed (positive turns right).
    pub rotation: f32,
}

/// Orientation in degrees.
#[derive(Debug, PartialEq, Clone, Copy, Default, Serialize)]
pub struct Rotation {
    pub pitch: f32,
    /// Heading, always in `[0, 360)`.
    pub yaw: f32,
    pub roll: f32,
}

/// Full simulation state of one bird.
#[derive(Debug, PartialEq, Clone, Copy, Serialize)]
pub struct BirdState {
    /// `x` lateral, `y` height (never negative), `z` forward depth.
    pub position: Vec3D<f32>,
    pub speed: f32,
    pub momentum: Momentum,
    pub rotation: Rotation,
    pub energy: f32,
    pub on_ground: bool,
    /// State after majority-vote resolution.
    pub state: MotionState,
    /// Ticks spent in `state` since it last changed.
    pub transition_ticks: u32,
}

impl BirdState {
    pub fn height(&self) -> f32 { self.position.y() }

    /// The reduced `(speed, height, turn)` view.
    pub fn summary(&self) -> FlightSummary {
        FlightSummary { speed: self.speed, height: self.height(), turn: self.momentum.rotation }
    }
}

/// Speed, height and turn rate only; what a simple 2D client renders.
#[derive(Debug, PartialEq, Clone, Copy, Serialize)]
pub struct FlightSummary {
    pub speed: f32,
    pub height: f32,
    pub turn: f32,
}
