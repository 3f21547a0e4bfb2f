use super::{
    bird_state::{BirdState, Momentum, Rotation},
    common::{Vec3D, approach, wrap_degrees},
    state_vote::StateVote,
};
use crate::pose::{MotionCommand, MotionState};

/// Stateful flight integrator for a single bird.
///
/// Tuning constants describe one nominal tick. Momentum, drag and speed
/// changes are applied per tick; positional integration (height and
/// horizontal travel) and energy recovery scale with elapsed time.
/// Not meant to be driven concurrently: every call depends on the previous one.
#[derive(Debug, Clone)]
pub struct FlightPhysics {
    bird: BirdState,
    vote: StateVote,
}

impl FlightPhysics {
    /// Nominal tick length in seconds (30 fps).
    pub const NOMINAL_DT: f32 = 1.0 / 30.0;
    /// Upper bound for a single step, in nominal ticks.
    pub const MAX_STEP_TICKS: f32 = 3.0;

    pub const GRAVITY: f32 = 0.02;
    pub const MIN_SPEED: f32 = 0.05;
    pub const MAX_SPEED: f32 = 0.8;
    pub const START_SPEED: f32 = 0.3;
    pub const START_HEIGHT: f32 = 10.0;
    const DRAG: f32 = 0.985;
    /// World units travelled per tick at speed `1.0`.
    const UNITS_PER_SPEED: f32 = 10.0;

    const LIFT_FACTOR: f32 = 0.05;
    const GLIDE_GRAVITY_MULTIPLIER: f32 = 0.3;
    const GLIDE_SPEED_LOSS: f32 = 0.003;
    const CRUISE_ALTITUDE: f32 = 10.0;
    const DENSITY_BAND: f32 = 15.0;
    const COMFORT_BAND: (f32, f32) = (5.0, 15.0);
    const FORWARD_CREEP: f32 = 0.001;
    const FORWARD_CREEP_CAP: f32 = 0.05;

    const DIVE_ACCELERATION: f32 = 0.035;
    const DIVE_GRAVITY_MULTIPLIER: f32 = 1.8;
    const DIVE_PITCH: f32 = -45.0;

    const HEIGHT_GAIN_FACTOR: f32 = 0.05;
    const HEIGHT_GAIN_SPEED_COST: f32 = 0.02;
    const CLIMB_MOMENTUM_CAP: f32 = 0.1;
    const CLIMB_PITCH: f32 = 30.0;
    /// Speed at which climbing and turning reach full effect.
    const EFFECTIVE_SPEED: f32 = 0.3;

    const FLAP_LIFT: f32 = 0.03;
    const FLAP_THRUST: f32 = 0.04;
    const UNSUPPORTED_GRAVITY_MULTIPLIER: f32 = 1.2;
    const DEFAULT_INTENSITY: f32 = 0.5;

    pub const MAX_TURN_RATE: f32 = 0.05;
    const TURN_RESPONSIVENESS: f32 = 0.02;
    const MAX_TURN_SPEED_FACTOR: f32 = 1.5;
    const BANK_DRAG: f32 = 0.3;
    const BANK_HEIGHT_LOSS: f32 = 0.015;
    const MAX_BANK_ROLL: f32 = 45.0;
    /// Rotational momentum below this snaps to level.
    pub const LEVEL_EPSILON: f32 = 1e-4;

    pub const ENERGY_MAX: f32 = 100.0;
    const ENERGY_RECOVERY_PER_SEC: f32 = 12.0;
    const ENERGY_CONSUMPTION: f32 = 3.0;
    const CLIMB_ENERGY_FLOOR: f32 = 10.0;
    const FLAP_ENERGY_FLOOR: f32 = 5.0;

    const VERTICAL_DECAY: f32 = 0.93;
    const FORWARD_DECAY: f32 = 0.95;
    const ROTATION_DECAY: f32 = 0.9;
    const THERMAL_MOMENTUM_CAP: f32 = 0.3;

    pub const GROUND_FRICTION: f32 = 0.92;
    const BOUNCE_FACTOR: f32 = 0.2;
    pub const BOUNCE_THRESHOLD: f32 = 0.02;
    pub const BOUNCE_SPEED_FLOOR: f32 = 0.2;

    pub fn new() -> Self {
        Self::with_state(BirdState {
            position: Vec3D::new(0.0, Self::START_HEIGHT, 0.0),
            speed: Self::START_SPEED,
            momentum: Momentum::default(),
            rotation: Rotation::default(),
            energy: Self::ENERGY_MAX,
            on_ground: false,
            state: MotionState::None,
            transition_ticks: 0,
        })
    }

    pub fn with_state(bird: BirdState) -> Self { Self { bird, vote: StateVote::new() } }

    pub fn state(&self) -> &BirdState { &self.bird }

    /// Wraps the ground-plane position into a world of `[-half_extent, half_extent)`.
    pub fn wrap_position(&mut self, half_extent: f32) {
        self.bird.position = self.bird.position.wrap_planar(half_extent);
    }

    /// Advances the simulation by one processed frame.
    ///
    /// # Arguments
    /// * `cmd` - The smoothed command for this frame.
    /// * `elapsed` - Seconds since the previous update, clamped to
    ///   `[0, MAX_STEP_TICKS * NOMINAL_DT]`.
    ///
    /// # Returns
    /// A copy of the updated state.
    pub fn update(&mut self, cmd: &MotionCommand, elapsed: f32) -> BirdState {
        let elapsed = elapsed.clamp(0.0, Self::MAX_STEP_TICKS * Self::NOMINAL_DT);
        let step = elapsed / Self::NOMINAL_DT;
        let state = self.vote.resolve(cmd.state);
        let b = &mut self.bird;

        let flapping = cmd.is_flapping() && b.energy > Self::FLAP_ENERGY_FLOOR;
        if !flapping {
            b.energy = (b.energy + Self::ENERGY_RECOVERY_PER_SEC * elapsed).min(Self::ENERGY_MAX);
        }
        b.speed *= Self::DRAG;

        let mut climb = 0.0;
        let mut target_pitch = 0.0;
        let mut gravity_multiplier = match state {
            MotionState::Glide => {
                climb += Self::glide(b);
                Self::GLIDE_GRAVITY_MULTIPLIER
            }
            MotionState::Dive => {
                let intensity = cmd.dive_intensity.unwrap_or(Self::DEFAULT_INTENSITY);
                Self::dive(b, intensity);
                target_pitch = Self::DIVE_PITCH * intensity;
                Self::DIVE_GRAVITY_MULTIPLIER * intensity
            }
            MotionState::GainHeight => {
                let gain = cmd.height_gain.unwrap_or(Self::DEFAULT_INTENSITY);
                let effective = Self::gain_height(b, gain);
                climb += Self::HEIGHT_GAIN_FACTOR * effective;
                target_pitch = Self::CLIMB_PITCH * effective;
                1.0
            }
            MotionState::None => 1.0,
        };

        if flapping {
            climb += Self::flap(b, cmd.flap_intensity.unwrap_or(Self::DEFAULT_INTENSITY));
        } else if state != MotionState::Glide {
            gravity_multiplier *= Self::UNSUPPORTED_GRAVITY_MULTIPLIER;
        }

        climb -= Self::turn(b, cmd, step);
        b.rotation.pitch = approach(b.rotation.pitch, target_pitch, 0.15);

        let momentum_lift = b.momentum.vertical - gravity_multiplier * Self::GRAVITY;
        climb += momentum_lift;
        b.speed += b.momentum.forward;
        b.momentum.vertical *= Self::VERTICAL_DECAY;
        b.momentum.forward *= Self::FORWARD_DECAY;
        b.speed = b.speed.clamp(Self::MIN_SPEED, Self::MAX_SPEED);

        let travel = b.speed * Self::UNITS_PER_SPEED * step;
        let heading = b.rotation.yaw.to_radians();
        b.position += Vec3D::new(heading.sin() * travel, climb * step, heading.cos() * travel);

        Self::ground_contact(b, momentum_lift);
        b.speed = b.speed.clamp(Self::MIN_SPEED, Self::MAX_SPEED);
        b.energy = b.energy.clamp(0.0, Self::ENERGY_MAX);

        if state == b.state {
            b.transition_ticks = b.transition_ticks.saturating_add(1);
        } else {
            b.transition_ticks = 0;
        }
        b.state = state;
        *b
    }

    /// Glide lift; returns the direct height gain.
    fn glide(b: &mut BirdState) -> f32 {
        let lift = Self::LIFT_FACTOR * b.speed;
        let height = b.height();
        let density = (1.0 - (height - Self::CRUISE_ALTITUDE).abs() / Self::DENSITY_BAND).max(0.0);
        b.speed = (b.speed - Self::GLIDE_SPEED_LOSS * (1.0 + density)).max(Self::MIN_SPEED);
        b.momentum.vertical = b.momentum.vertical * 0.95 + 0.05 * lift;
        if height > Self::COMFORT_BAND.0 && height < Self::COMFORT_BAND.1 {
            b.momentum.forward = (b.momentum.forward + Self::FORWARD_CREEP).min(Self::FORWARD_CREEP_CAP);
        }
        lift
    }

    fn dive(b: &mut BirdState, intensity: f32) {
        let height_factor = (b.height() / 10.0).min(1.0);
        b.speed += Self::DIVE_ACCELERATION * intensity * (1.0 + height_factor);
        b.momentum.forward = b.momentum.forward * 0.9 + 0.1 * intensity;
    }

    /// Energy-limited climb; returns the effective gain (zero when exhausted).
    fn gain_height(b: &mut BirdState, gain: f32) -> f32 {
        if b.energy <= Self::CLIMB_ENERGY_FLOOR {
            return 0.0;
        }
        let speed_factor = (b.speed / Self::EFFECTIVE_SPEED).min(1.0);
        let effective = gain * (b.energy / Self::ENERGY_MAX) * speed_factor;
        b.speed = (b.speed - Self::HEIGHT_GAIN_SPEED_COST * effective).max(Self::MIN_SPEED);
        b.energy = (b.energy - Self::ENERGY_CONSUMPTION * gain).max(0.0);
        b.momentum.vertical = (b.momentum.vertical + 0.01 * effective).min(Self::CLIMB_MOMENTUM_CAP);
        effective
    }

    /// Flap thrust and lift; returns the direct height gain.
    fn flap(b: &mut BirdState, intensity: f32) -> f32 {
        let effective = intensity * (b.energy / Self::ENERGY_MAX);
        // squared: strong flaps pay off disproportionately
        let thrust = Self::FLAP_THRUST * effective * intensity;
        let lift = Self::FLAP_LIFT * effective;
        b.speed = (b.speed + thrust).min(Self::MAX_SPEED);
        b.momentum.vertical = b.momentum.vertical * 0.8 + 0.2 * lift;
        b.energy = (b.energy - Self::ENERGY_CONSUMPTION * intensity).max(0.0);
        lift
    }

    /// Turning and banking; returns the height lost to banking.
    fn turn(b: &mut BirdState, cmd: &MotionCommand, step: f32) -> f32 {
        let mut bank_loss = 0.0;
        match cmd.turn {
            Some(direction) => {
                let angle = cmd.turn_angle.unwrap_or(0.0).clamp(0.0, 60.0);
                let speed_factor = (b.speed / Self::EFFECTIVE_SPEED).min(Self::MAX_TURN_SPEED_FACTOR);
                let rate = (Self::TURN_RESPONSIVENESS * angle.powf(1.5) * 0.01 * direction.sign() * speed_factor)
                    .clamp(-Self::MAX_TURN_RATE, Self::MAX_TURN_RATE);
                b.momentum.rotation = b.momentum.rotation * 0.8 + 0.2 * rate;

                let banking = rate.abs() / Self::MAX_TURN_RATE;
                b.speed *= 1.0 - banking * Self::BANK_DRAG;
                bank_loss = banking * Self::BANK_HEIGHT_LOSS;
            }
            None => {
                b.momentum.rotation *= Self::ROTATION_DECAY;
                if b.momentum.rotation.abs() < Self::LEVEL_EPSILON {
                    b.momentum.rotation = 0.0;
                }
            }
        }
        b.rotation.yaw = wrap_degrees(b.rotation.yaw + b.momentum.rotation.to_degrees() * step);
        let target_roll = b.momentum.rotation / Self::MAX_TURN_RATE * Self::MAX_BANK_ROLL;
        b.rotation.roll = approach(b.rotation.roll, target_roll, 0.2);
        bank_loss
    }

    fn ground_contact(b: &mut BirdState, momentum_lift: f32) {
        if b.height() > 0.0 {
            b.on_ground = false;
            return;
        }
        b.position.set_y(0.0);
        b.on_ground = true;
        b.momentum.vertical = if momentum_lift < -Self::BOUNCE_THRESHOLD && b.speed > Self::BOUNCE_SPEED_FLOOR {
            momentum_lift.abs() * Self::BOUNCE_FACTOR
        } else {
            0.0
        };
        b.speed *= Self::GROUND_FRICTION;
    }

    /// Thermal updraft pickup.
    pub fn apply_thermal(&mut self, impulse: f32) {
        let m = &mut self.bird.momentum;
        m.vertical = (m.vertical + impulse.max(0.0)).min(Self::THERMAL_MOMENTUM_CAP);
    }

    /// Food pickup.
    pub fn restore_energy(&mut self, amount: f32) {
        self.bird.energy = (self.bird.energy + amount.max(0.0)).min(Self::ENERGY_MAX);
    }
}

impl Default for FlightPhysics {
    fn default() -> Self { Self::new() }
}
