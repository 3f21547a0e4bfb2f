use crate::pose::{Keypoint, Landmark, MotionCommand, MotionState, PoseFrame, TurnDirection};
use crate::session::FrameOutput;
use crate::world::{CollectibleEffect, CollectibleKind, ObstacleKind, TerrainKind, WorldView};

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Upstream {
    #[prost(oneof = "UpstreamContent", tags = "1, 2")]
    pub content: Option<UpstreamContent>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Ping {
    #[prost(string, optional, tag = "1")]
    pub echo: Option<String>,
}

/// Output of the pose collaborator for one camera frame.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PoseSample {
    /// `false` when no person was found in the frame.
    #[prost(bool, tag = "1")]
    pub detected: bool,
    #[prost(message, repeated, tag = "2")]
    pub landmarks: Vec<WireLandmark>,
    /// Set when the collaborator failed on this frame.
    #[prost(string, optional, tag = "3")]
    pub error: Option<String>,
}

/// A landmark addressed by its `MediaPipe` pose index.
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct WireLandmark {
    #[prost(uint32, tag = "1")]
    pub index: u32,
    #[prost(float, tag = "2")]
    pub x: f32,
    #[prost(float, tag = "3")]
    pub y: f32,
    #[prost(float, optional, tag = "4")]
    pub visibility: Option<f32>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Downstream {
    #[prost(oneof = "DownstreamContent", tags = "1, 2, 3")]
    pub content: Option<DownstreamContent>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Pong {
    #[prost(string, optional, tag = "1")]
    pub echo: Option<String>,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct FrameSkipped {
    #[prost(enumeration = "SkipReason", tag = "1")]
    pub reason: i32,
}

impl FrameSkipped {
    pub fn because(reason: SkipReason) -> Self { Self { reason: reason as i32 } }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FrameResult {
    #[prost(uint64, tag = "1")]
    pub frame: u64,
    #[prost(message, optional, tag = "2")]
    pub command: Option<Command>,
    #[prost(message, optional, tag = "3")]
    pub bird: Option<Bird>,
    #[prost(message, repeated, tag = "4")]
    pub entities: Vec<Entity>,
    #[prost(message, repeated, tag = "5")]
    pub keypoints: Vec<WireLandmark>,
    #[prost(message, optional, tag = "6")]
    pub pickup: Option<Pickup>,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct Command {
    #[prost(enumeration = "FlightMode", tag = "1")]
    pub state: i32,
    #[prost(enumeration = "Turn", optional, tag = "2")]
    pub turn: Option<i32>,
    #[prost(float, optional, tag = "3")]
    pub turn_angle: Option<f32>,
    #[prost(bool, optional, tag = "4")]
    pub flap: Option<bool>,
    #[prost(float, optional, tag = "5")]
    pub flap_intensity: Option<f32>,
    #[prost(float, optional, tag = "6")]
    pub dive_intensity: Option<f32>,
    #[prost(float, optional, tag = "7")]
    pub height_gain: Option<f32>,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct Bird {
    #[prost(float, tag = "1")]
    pub x: f32,
    #[prost(float, tag = "2")]
    pub y: f32,
    #[prost(float, tag = "3")]
    pub z: f32,
    #[prost(float, tag = "4")]
    pub pitch: f32,
    #[prost(float, tag = "5")]
    pub yaw: f32,
    #[prost(float, tag = "6")]
    pub roll: f32,
    #[prost(float, tag = "7")]
    pub speed: f32,
    #[prost(float, tag = "8")]
    pub energy: f32,
    #[prost(bool, tag = "9")]
    pub on_ground: bool,
    #[prost(enumeration = "FlightMode", tag = "10")]
    pub state: i32,
    #[prost(float, tag = "11")]
    pub turn: f32,
    #[prost(uint32, tag = "12")]
    pub transition_ticks: u32,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct Entity {
    #[prost(uint64, tag = "1")]
    pub id: u64,
    #[prost(enumeration = "EntityKind", tag = "2")]
    pub kind: i32,
    #[prost(float, tag = "3")]
    pub x: f32,
    #[prost(float, tag = "4")]
    pub y: f32,
    #[prost(float, tag = "5")]
    pub z: f32,
    #[prost(float, tag = "6")]
    pub size: f32,
    #[prost(float, optional, tag = "7")]
    pub height: Option<f32>,
    #[prost(uint32, optional, tag = "8")]
    pub color: Option<u32>,
    #[prost(float, optional, tag = "9")]
    pub speed: Option<f32>,
    #[prost(float, optional, tag = "10")]
    pub value: Option<f32>,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct Pickup {
    #[prost(enumeration = "EntityKind", tag = "1")]
    pub kind: i32,
    #[prost(float, tag = "2")]
    pub value: f32,
}

#[derive(Clone, PartialEq, prost::Oneof)]
pub enum UpstreamContent {
    #[prost(message, tag = "1")]
    Ping(Ping),
    #[prost(message, tag = "2")]
    PoseSample(PoseSample),
}

#[derive(Clone, PartialEq, prost::Oneof)]
pub enum DownstreamContent {
    #[prost(message, tag = "1")]
    Pong(Pong),
    #[prost(message, tag = "2")]
    FrameResult(FrameResult),
    #[prost(message, tag = "3")]
    FrameSkipped(FrameSkipped),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum FlightMode {
    None = 0,
    Glide = 1,
    Dive = 2,
    GainHeight = 3,
}

impl From<MotionState> for FlightMode {
    fn from(state: MotionState) -> Self {
        match state {
            MotionState::None => FlightMode::None,
            MotionState::Glide => FlightMode::Glide,
            MotionState::Dive => FlightMode::Dive,
            MotionState::GainHeight => FlightMode::GainHeight,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum Turn {
    Left = 0,
    Right = 1,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum SkipReason {
    /// Arrived within the minimum frame interval.
    Throttled = 0,
    /// Upstream message could not be decoded.
    Undecodable = 1,
    /// The pose collaborator reported a failure for this frame.
    PoseUnavailable = 2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum EntityKind {
    Mountain = 0,
    Lake = 1,
    Forest = 2,
    Cloud = 3,
    Bird = 4,
    Storm = 5,
    Thermal = 6,
    Food = 7,
}

impl From<TerrainKind> for EntityKind {
    fn from(kind: TerrainKind) -> Self {
        match kind {
            TerrainKind::Mountain => EntityKind::Mountain,
            TerrainKind::Lake => EntityKind::Lake,
            TerrainKind::Forest => EntityKind::Forest,
        }
    }
}

impl From<ObstacleKind> for EntityKind {
    fn from(kind: ObstacleKind) -> Self {
        match kind {
            ObstacleKind::Bird => EntityKind::Bird,
            ObstacleKind::Storm => EntityKind::Storm,
        }
    }
}

impl From<CollectibleKind> for EntityKind {
    fn from(kind: CollectibleKind) -> Self {
        match kind {
            CollectibleKind::Thermal => EntityKind::Thermal,
            CollectibleKind::Food => EntityKind::Food,
        }
    }
}

impl PoseSample {
    /// Landmarks with a reported visibility below this count as undetected.
    pub const MIN_VISIBILITY: f32 = 0.5;

    /// Converts the sample into a frame; `None` means nobody was detected.
    /// Unknown landmark indices are ignored, and so are coordinates outside
    /// the unit square.
    pub fn to_pose_frame(&self) -> Option<PoseFrame> {
        if !self.detected {
            return None;
        }
        let mut frame = PoseFrame::new();
        for wire in &self.landmarks {
            if wire.visibility.is_some_and(|v| v < Self::MIN_VISIBILITY) {
                continue;
            }
            let point = Keypoint::new(wire.x, wire.y);
            if !point.is_normalized() {
                continue;
            }
            if let Some(landmark) = Landmark::from_mediapipe_index(wire.index) {
                frame.set(landmark, point);
            }
        }
        Some(frame)
    }
}

impl WireLandmark {
    pub fn from_keypoint(landmark: Landmark, point: Keypoint) -> Self {
        Self { index: landmark.mediapipe_index(), x: point.x, y: point.y, visibility: None }
    }
}

impl From<&MotionCommand> for Command {
    fn from(cmd: &MotionCommand) -> Self {
        Self {
            state: FlightMode::from(cmd.state) as i32,
            turn: cmd.turn.map(|t| match t {
                TurnDirection::Left => Turn::Left as i32,
                TurnDirection::Right => Turn::Right as i32,
            }),
            turn_angle: cmd.turn_angle,
            flap: cmd.flap,
            flap_intensity: cmd.flap_intensity,
            dive_intensity: cmd.dive_intensity,
            height_gain: cmd.height_gain,
        }
    }
}

impl FrameResult {
    fn entities(view: &WorldView) -> Vec<Entity> {
        let terrain = view.terrain.iter().map(|t| Entity {
            id: t.id,
            kind: EntityKind::from(t.kind) as i32,
            x: t.position.x(),
            y: 0.0,
            z: t.position.z(),
            size: t.size,
            height: Some(t.height),
            color: Some(t.color),
            speed: None,
            value: None,
        });
        let clouds = view.clouds.iter().map(|c| Entity {
            id: c.id,
            kind: EntityKind::Cloud as i32,
            x: c.position.x(),
            y: c.position.y(),
            z: c.position.z(),
            size: c.size,
            height: None,
            color: None,
            speed: Some(c.speed),
            value: None,
        });
        let obstacles = view.obstacles.iter().map(|o| Entity {
            id: o.id,
            kind: EntityKind::from(o.kind) as i32,
            x: o.position.x(),
            y: o.position.y(),
            z: o.position.z(),
            size: o.size,
            height: None,
            color: None,
            speed: Some(o.speed),
            value: None,
        });
        let collectibles = view.collectibles.iter().map(|c| Entity {
            id: c.id,
            kind: EntityKind::from(c.kind) as i32,
            x: c.position.x(),
            y: c.position.y(),
            z: c.position.z(),
            size: c.size,
            height: None,
            color: None,
            speed: None,
            value: Some(c.value),
        });
        terrain.chain(clouds).chain(obstacles).chain(collectibles).collect()
    }
}

impl From<&FrameOutput> for FrameResult {
    fn from(out: &FrameOutput) -> Self {
        let b = &out.bird;
        let pickup = out.pickup.map(|effect| match effect {
            CollectibleEffect::Thermal { impulse } => Pickup { kind: EntityKind::Thermal as i32, value: impulse },
            CollectibleEffect::Food { energy } => Pickup { kind: EntityKind::Food as i32, value: energy },
        });
        Self {
            frame: out.frame,
            command: Some(Command::from(&out.command)),
            bird: Some(Bird {
                x: b.position.x(),
                y: b.position.y(),
                z: b.position.z(),
                pitch: b.rotation.pitch,
                yaw: b.rotation.yaw,
                roll: b.rotation.roll,
                speed: b.speed,
                energy: b.energy,
                on_ground: b.on_ground,
                state: FlightMode::from(b.state) as i32,
                turn: out.summary.turn,
                transition_ticks: b.transition_ticks,
            }),
            entities: Self::entities(&out.world),
            keypoints: out.keypoints.iter().map(|(l, p)| WireLandmark::from_keypoint(*l, *p)).collect(),
            pickup,
        }
    }
}
