use super::frame_output::FrameOutput;
use crate::event;
use crate::flight_control::{FlightPhysics, FrameClock};
use crate::pose::{Classification, GestureClassifier, PoseFrame};
use crate::smoothing::CommandSmoother;
use crate::world::{CollectibleEffect, WorldSimulation};
use chrono::{DateTime, TimeDelta, Utc};

/// One player's pipeline: classifier, smoother, physics and world, owned
/// together and driven strictly one frame at a time.
#[derive(Debug)]
pub struct FlightSession {
    classifier: GestureClassifier,
    smoother: CommandSmoother,
    physics: FlightPhysics,
    world: WorldSimulation,
    clock: FrameClock,
    min_frame_interval: TimeDelta,
    last_accepted: Option<DateTime<Utc>>,
    processed: u64,
    dropped: u64,
}

impl FlightSession {
    pub const TARGET_FPS: u32 = 30;
    pub const DEFAULT_MIN_FRAME_INTERVAL: TimeDelta = TimeDelta::milliseconds(33);

    pub fn new(min_frame_interval: TimeDelta) -> Self {
        let physics = FlightPhysics::new();
        let world = WorldSimulation::new(physics.state().position);
        Self::with_parts(physics, world, min_frame_interval)
    }

    /// Builds a session around an existing physics state and world.
    pub fn with_parts(physics: FlightPhysics, world: WorldSimulation, min_frame_interval: TimeDelta) -> Self {
        Self {
            classifier: GestureClassifier::new(),
            smoother: CommandSmoother::new(),
            physics,
            world,
            clock: FrameClock::new(Self::TARGET_FPS),
            min_frame_interval: min_frame_interval.max(TimeDelta::zero()),
            last_accepted: None,
            processed: 0,
            dropped: 0,
        }
    }

    pub fn physics(&self) -> &FlightPhysics { &self.physics }

    pub fn world(&self) -> &WorldSimulation { &self.world }

    pub fn world_mut(&mut self) -> &mut WorldSimulation { &mut self.world }

    pub fn processed_frames(&self) -> u64 { self.processed }

    pub fn dropped_frames(&self) -> u64 { self.dropped }

    pub fn process_frame(&mut self, pose: Option<&PoseFrame>) -> Option<FrameOutput> {
        self.process_frame_at(pose, Utc::now())
    }

    /// Runs classify, smooth, physics and world for a frame arriving at `now`.
    ///
    /// # Returns
    /// `None` if the frame arrived within the minimum interval of the last
    /// accepted one; such frames are dropped and leave all state untouched.
    pub fn process_frame_at(&mut self, pose: Option<&PoseFrame>, now: DateTime<Utc>) -> Option<FrameOutput> {
        if self.throttled(now) {
            self.dropped += 1;
            return None;
        }
        self.last_accepted = Some(now);
        let elapsed = self.clock.tick(now);

        let Classification { command, keypoints } = self.classifier.classify(pose);
        let command = self.smoother.smooth(&command);
        self.physics.update(&command, elapsed);
        self.physics.wrap_position(WorldSimulation::HALF_EXTENT);

        let tick = self.world.update(self.physics.state().position, elapsed);
        match tick.effect {
            Some(CollectibleEffect::Thermal { impulse }) => self.physics.apply_thermal(impulse),
            Some(CollectibleEffect::Food { energy }) => self.physics.restore_energy(energy),
            None => {}
        }

        self.processed += 1;
        let bird = *self.physics.state();
        event!(
            "Frame {}: {} at {} speed {:.3} energy {:.1}",
            self.processed,
            bird.state,
            bird.position,
            bird.speed,
            bird.energy
        );
        Some(FrameOutput {
            frame: self.processed,
            command,
            bird,
            summary: bird.summary(),
            world: tick.view,
            keypoints,
            pickup: tick.effect,
        })
    }

    /// Backwards clock jumps are never throttled.
    fn throttled(&self, now: DateTime<Utc>) -> bool {
        self.last_accepted
            .is_some_and(|last| (TimeDelta::zero()..self.min_frame_interval).contains(&(now - last)))
    }
}

impl Default for FlightSession {
    fn default() -> Self { Self::new(Self::DEFAULT_MIN_FRAME_INTERVAL) }
}
