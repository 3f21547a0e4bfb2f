//! Gesture classification: turns one frame of body landmarks into a symbolic
//! [`MotionCommand`].

mod classifier;
mod geometry;
mod landmark;
mod motion_command;
mod wrist_tracker;

pub use classifier::{Classification, ClassificationRule, GestureClassifier, PoseMetrics};
pub use geometry::{arm_angle, forward_lean_angle, torso_angle};
pub use landmark::{Keypoint, Landmark, PoseFrame};
pub use motion_command::{MotionCommand, MotionState, NumericField, TurnDirection};
pub use wrist_tracker::{WRIST_HISTORY, WristTracker};
