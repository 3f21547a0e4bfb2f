use serde::Serialize;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

/// Body landmarks tracked by the gesture classifier.
///
/// The discriminant doubles as the slot index inside a [`PoseFrame`].
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Display, EnumIter, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Landmark {
    LeftShoulder = 0,
    RightShoulder = 1,
    LeftElbow = 2,
    RightElbow = 3,
    LeftWrist = 4,
    RightWrist = 5,
    LeftHip = 6,
    RightHip = 7,
    Nose = 8,
}

impl Landmark {
    pub const COUNT: usize = 9;

    pub const fn index(self) -> usize { self as usize }

    /// Maps a `MediaPipe` pose landmark index (0..33) to a tracked landmark.
    pub fn from_mediapipe_index(index: u32) -> Option<Self> {
        Self::iter().find(|l| l.mediapipe_index() == index)
    }

    pub const fn mediapipe_index(self) -> u32 {
        match self {
            Landmark::Nose => 0,
            Landmark::LeftShoulder => 11,
            Landmark::RightShoulder => 12,
            Landmark::LeftElbow => 13,
            Landmark::RightElbow => 14,
            Landmark::LeftWrist => 15,
            Landmark::RightWrist => 16,
            Landmark::LeftHip => 23,
            Landmark::RightHip => 24,
        }
    }
}

/// A normalized image-space coordinate in `[0, 1] x [0, 1]`; `y` grows downward.
#[derive(Debug, PartialEq, Clone, Copy, Default, Serialize)]
pub struct Keypoint {
    pub x: f32,
    pub y: f32,
}

impl Keypoint {
    pub const fn new(x: f32, y: f32) -> Self { Self { x, y } }

    pub fn distance(self, other: Keypoint) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    pub fn midpoint(self, other: Keypoint) -> Keypoint {
        Keypoint::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    pub fn is_finite(self) -> bool { self.x.is_finite() && self.y.is_finite() }

    /// Whether both coordinates lie inside the unit square.
    pub fn is_normalized(self) -> bool { (0.0..=1.0).contains(&self.x) && (0.0..=1.0).contains(&self.y) }
}

/// One frame of landmarks as delivered by the pose collaborator.
/// Undetected landmarks are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PoseFrame {
    points: [Option<Keypoint>; Landmark::COUNT],
}

impl PoseFrame {
    pub fn new() -> Self { Self::default() }

    pub fn with(mut self, landmark: Landmark, point: Keypoint) -> Self {
        self.set(landmark, point);
        self
    }

    /// Records `point` for `landmark`; a non-finite point marks it undetected.
    pub fn set(&mut self, landmark: Landmark, point: Keypoint) {
        self.points[landmark.index()] = point.is_finite().then_some(point);
    }

    pub fn get(&self, landmark: Landmark) -> Option<Keypoint> { self.points[landmark.index()] }

    pub fn is_empty(&self) -> bool { self.points.iter().all(Option::is_none) }

    /// All present landmarks in declaration order.
    pub fn present(&self) -> impl Iterator<Item = (Landmark, Keypoint)> + '_ {
        Landmark::iter().filter_map(|l| self.get(l).map(|p| (l, p)))
    }
}
