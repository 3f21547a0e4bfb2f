use super::{
    geometry::{arm_angle, forward_lean_angle, torso_angle},
    landmark::{Keypoint, Landmark, PoseFrame},
    motion_command::{MotionCommand, MotionState, TurnDirection},
    wrist_tracker::WristTracker,
};
use strum_macros::{Display, EnumIter};

/// Geometry extracted once per frame and shared by all rules.
#[derive(Debug, Clone, Copy)]
pub struct PoseMetrics {
    pub left_shoulder: Keypoint,
    pub right_shoulder: Keypoint,
    pub left_elbow: Keypoint,
    pub right_elbow: Keypoint,
    pub left_wrist: Keypoint,
    pub right_wrist: Keypoint,
    pub left_arm_angle: f32,
    pub right_arm_angle: f32,
    /// `None` without both hips.
    pub torso_angle: Option<f32>,
    /// `None` without the nose and both hips.
    pub forward_lean: Option<f32>,
    /// Wrist vertical velocities normalized by shoulder width.
    pub wrist_velocity: (f32, f32),
}

/// The classification rules in evaluation order.
///
/// Rules run in [`ClassificationRule::ORDER`]; a later rule may overwrite the
/// `state` written by an earlier one, so the last matching rule decides the
/// final state.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Display, EnumIter)]
pub enum ClassificationRule {
    Glide,
    Turn,
    Dive,
    Flap,
    GainHeight,
}

impl ClassificationRule {
    pub const ORDER: [ClassificationRule; 5] = [
        ClassificationRule::Glide,
        ClassificationRule::Turn,
        ClassificationRule::Dive,
        ClassificationRule::Flap,
        ClassificationRule::GainHeight,
    ];

    /// Maximum deviation from a straight (180°) arm still counted as straight.
    const STRAIGHT_ARM_TOL: f32 = 25.0;
    /// Maximum shoulder-elbow height difference for a horizontal upper arm.
    const HORIZONTAL_ARM_TOL: f32 = 0.1;
    const TURN_THRESHOLD: f32 = 15.0;
    const MAX_TURN_ANGLE: f32 = 60.0;
    const DIVE_LEAN_THRESHOLD: f32 = 30.0;
    const DIVE_LEAN_FULL: f32 = 60.0;
    const FLAP_VELOCITY_THRESHOLD: f32 = 0.02;
    const FLAP_HEIGHT_GAIN: f32 = 3.0;
    const FLAP_VELOCITY_GAIN: f32 = 10.0;
    const CLIMB_LEAN_THRESHOLD: f32 = -20.0;
    const CLIMB_LEAN_FULL: f32 = 40.0;

    /// Applies this rule to `cmd`. Rules depending on missing landmarks do nothing.
    pub fn apply(self, m: &PoseMetrics, cmd: &mut MotionCommand) {
        match self {
            ClassificationRule::Glide => {
                let arms_straight = (m.left_arm_angle - 180.0).abs() < Self::STRAIGHT_ARM_TOL
                    && (m.right_arm_angle - 180.0).abs() < Self::STRAIGHT_ARM_TOL;
                let arms_horizontal = (m.left_shoulder.y - m.left_elbow.y).abs()
                    < Self::HORIZONTAL_ARM_TOL
                    && (m.right_shoulder.y - m.right_elbow.y).abs() < Self::HORIZONTAL_ARM_TOL;
                if arms_straight && arms_horizontal {
                    cmd.state = MotionState::Glide;
                }
            }
            ClassificationRule::Turn => {
                let Some(torso) = m.torso_angle else { return };
                let direction = if torso > Self::TURN_THRESHOLD {
                    TurnDirection::Right
                } else if torso < -Self::TURN_THRESHOLD {
                    TurnDirection::Left
                } else {
                    return;
                };
                cmd.turn = Some(direction);
                cmd.turn_angle = Some(torso.abs().min(Self::MAX_TURN_ANGLE));
            }
            ClassificationRule::Dive => {
                let Some(lean) = m.forward_lean else { return };
                let arms_down = m.left_wrist.y > m.left_elbow.y
                    && m.left_elbow.y > m.left_shoulder.y
                    && m.right_wrist.y > m.right_elbow.y
                    && m.right_elbow.y > m.right_shoulder.y;
                if lean > Self::DIVE_LEAN_THRESHOLD && arms_down {
                    cmd.state = MotionState::Dive;
                    cmd.dive_intensity = Some((lean / Self::DIVE_LEAN_FULL).min(1.0));
                }
            }
            ClassificationRule::Flap => {
                let (lv, rv) = m.wrist_velocity;
                let arms_above_shoulders =
                    m.left_wrist.y < m.left_shoulder.y && m.right_wrist.y < m.right_shoulder.y;
                let moving = lv.abs() > Self::FLAP_VELOCITY_THRESHOLD
                    && rv.abs() > Self::FLAP_VELOCITY_THRESHOLD;
                if moving || arms_above_shoulders {
                    let arm_height = ((m.left_shoulder.y - m.left_wrist.y)
                        + (m.right_shoulder.y - m.right_wrist.y))
                        / 2.0;
                    let avg_velocity = (lv.abs() + rv.abs()) / 2.0;
                    let intensity = arm_height * Self::FLAP_HEIGHT_GAIN
                        + avg_velocity * Self::FLAP_VELOCITY_GAIN;
                    if !intensity.is_finite() {
                        return;
                    }
                    cmd.flap = Some(true);
                    cmd.flap_intensity = Some(intensity.clamp(0.0, 1.0));
                }
            }
            ClassificationRule::GainHeight => {
                let Some(lean) = m.forward_lean else { return };
                if cmd.is_flapping() && lean < Self::CLIMB_LEAN_THRESHOLD {
                    cmd.state = MotionState::GainHeight;
                    cmd.height_gain = Some((lean.abs() / Self::CLIMB_LEAN_FULL).min(1.0));
                }
            }
        }
    }
}

/// Result of classifying one frame.
#[derive(Debug, Clone, Default)]
pub struct Classification {
    pub command: MotionCommand,
    /// Tracked keypoints for skeleton visualisation, empty without a usable pose.
    pub keypoints: Vec<(Landmark, Keypoint)>,
}

/// Stateful gesture classifier, one per session. The only carried state is
/// the wrist history used for flap velocity.
#[derive(Debug, Clone, Default)]
pub struct GestureClassifier {
    wrists: WristTracker,
}

impl GestureClassifier {
    pub fn new() -> Self { Self::default() }

    /// Classifies a frame. `None` (no person detected) or a frame lacking any
    /// shoulder, elbow or wrist yields the neutral command and leaves the
    /// wrist history untouched. Present keypoints are passed through either way.
    pub fn classify(&mut self, frame: Option<&PoseFrame>) -> Classification {
        let Some(frame) = frame else { return Classification::default() };
        let keypoints: Vec<_> = frame.present().collect();
        let Some(metrics) = self.measure(frame) else {
            return Classification { command: MotionCommand::neutral(), keypoints };
        };

        let mut command = MotionCommand::neutral();
        for rule in ClassificationRule::ORDER {
            rule.apply(&metrics, &mut command);
        }
        Classification { command, keypoints }
    }

    /// Extracts metrics and records the wrist positions. Fails before touching
    /// the history if any arm landmark is missing.
    fn measure(&mut self, frame: &PoseFrame) -> Option<PoseMetrics> {
        let ls = frame.get(Landmark::LeftShoulder)?;
        let rs = frame.get(Landmark::RightShoulder)?;
        let le = frame.get(Landmark::LeftElbow)?;
        let re = frame.get(Landmark::RightElbow)?;
        let lw = frame.get(Landmark::LeftWrist)?;
        let rw = frame.get(Landmark::RightWrist)?;
        let hips = frame.get(Landmark::LeftHip).zip(frame.get(Landmark::RightHip));
        let nose = frame.get(Landmark::Nose);

        self.wrists.push(lw, rw);
        let shoulder_width = ls.distance(rs);

        let shoulder_mid_y = (ls.y + rs.y) / 2.0;
        Some(PoseMetrics {
            left_shoulder: ls,
            right_shoulder: rs,
            left_elbow: le,
            right_elbow: re,
            left_wrist: lw,
            right_wrist: rw,
            left_arm_angle: arm_angle(ls, le, lw),
            right_arm_angle: arm_angle(rs, re, rw),
            torso_angle: hips.map(|(lh, rh)| torso_angle(ls, rs, lh, rh)),
            forward_lean: hips
                .zip(nose)
                .map(|((lh, rh), n)| forward_lean_angle(n, shoulder_mid_y, (lh.y + rh.y) / 2.0)),
            wrist_velocity: self.wrists.vertical_velocity(shoulder_width),
        })
    }

    pub fn wrist_samples(&self) -> usize { self.wrists.samples() }

    pub fn reset(&mut self) { self.wrists.clear(); }
}
