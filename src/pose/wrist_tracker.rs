use super::landmark::Keypoint;
use crate::smoothing::RollingWindow;

/// Number of wrist samples kept per side.
pub const WRIST_HISTORY: usize = 5;

/// Per-session history of both wrists for vertical velocity estimation.
#[derive(Debug, Clone, Default)]
pub struct WristTracker {
    left: RollingWindow<Keypoint, WRIST_HISTORY>,
    right: RollingWindow<Keypoint, WRIST_HISTORY>,
}

impl WristTracker {
    pub fn new() -> Self { Self::default() }

    pub fn push(&mut self, left: Keypoint, right: Keypoint) {
        self.left.push(left);
        self.right.push(right);
    }

    /// Vertical velocity of each wrist between the last two samples,
    /// normalized by `scale` (shoulder width). Positive means moving down.
    ///
    /// Both are zero until two samples exist; normalization is skipped for a
    /// non-positive scale.
    pub fn vertical_velocity(&self, scale: f32) -> (f32, f32) {
        let raw = |w: &RollingWindow<Keypoint, WRIST_HISTORY>| match (w.nth_latest(0), w.nth_latest(1)) {
            (Some(now), Some(prev)) => now.y - prev.y,
            _ => 0.0,
        };
        let (l, r) = (raw(&self.left), raw(&self.right));
        if scale > 0.0 { (l / scale, r / scale) } else { (l, r) }
    }

    pub fn samples(&self) -> usize { self.left.len() }

    pub fn clear(&mut self) {
        self.left.clear();
        self.right.clear();
    }
}
