use crate::flight_control::{BirdState, FlightSummary};
use crate::pose::{Keypoint, Landmark, MotionCommand};
use crate::world::{CollectibleEffect, WorldView};
use serde::Serialize;

/// Everything the render boundary receives for one processed frame.
#[derive(Debug, Clone, Serialize)]
pub struct FrameOutput {
    /// Sequence number of the processed frame within its session, starting at 1.
    pub frame: u64,
    /// Smoothed command fed into the physics step.
    pub command: MotionCommand,
    pub bird: BirdState,
    pub summary: FlightSummary,
    pub world: WorldView,
    pub keypoints: Vec<(Landmark, Keypoint)>,
    /// Collectible picked up during this frame.
    pub pickup: Option<CollectibleEffect>,
}
