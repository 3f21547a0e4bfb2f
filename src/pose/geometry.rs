//! Joint and torso angles derived from normalized keypoints.
//!
//! All angles are in degrees. Image coordinates grow downward in `y`.

use super::landmark::Keypoint;

/// Scale turning a normalized nose offset into an approximate lean angle.
const FORWARD_LEAN_SCALE: f32 = 60.0;

/// Angle at the elbow joint via the law of cosines.
///
/// Side lengths: `a = |shoulder - elbow|`, `b = |elbow - wrist|`,
/// `c = |shoulder - wrist|`.
///
/// Returns:
/// - `180°` for a straight arm
/// - `90°` for a right-angle bend
/// - `0°` if either arm segment has zero length
#[allow(clippy::float_cmp)]
pub fn arm_angle(shoulder: Keypoint, elbow: Keypoint, wrist: Keypoint) -> f32 {
    let a = shoulder.distance(elbow);
    let b = elbow.distance(wrist);
    let c = shoulder.distance(wrist);

    if a * b == 0.0 {
        return 0.0;
    }

    // float overshoot on collinear points would leave acos' domain
    let cos_angle = ((a.powi(2) + b.powi(2) - c.powi(2)) / (2.0 * a * b)).clamp(-1.0, 1.0);
    cos_angle.acos().to_degrees()
}

/// Signed tilt of the hip-to-shoulder axis away from the upward vertical;
/// positive means the body is angled to the right, an upright torso is `0°`.
///
/// Image `y` grows downward, so the vertical component is measured as
/// `hip.y - shoulder.y` to keep an upright body at zero instead of `±180°`.
pub fn torso_angle(
    left_shoulder: Keypoint,
    right_shoulder: Keypoint,
    left_hip: Keypoint,
    right_hip: Keypoint,
) -> f32 {
    let shoulder_mid = left_shoulder.midpoint(right_shoulder);
    let hip_mid = left_hip.midpoint(right_hip);
    (shoulder_mid.x - hip_mid.x).atan2(hip_mid.y - shoulder_mid.y).to_degrees()
}

/// Approximate forward lean from how far the nose sits below the shoulder line,
/// relative to torso length. Positive leans forward, negative leans back.
///
/// Returns `0.0` for a zero-length torso.
#[allow(clippy::float_cmp)]
pub fn forward_lean_angle(nose: Keypoint, shoulder_mid_y: f32, hip_mid_y: f32) -> f32 {
    let torso_length = hip_mid_y - shoulder_mid_y;
    if torso_length == 0.0 {
        return 0.0;
    }
    FORWARD_LEAN_SCALE * (nose.y - shoulder_mid_y) / torso_length
}
