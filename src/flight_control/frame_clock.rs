use chrono::{DateTime, TimeDelta, Utc};

/// Converts wall-clock frame arrival times into bounded simulation steps.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    nominal: TimeDelta,
    last_tick: Option<DateTime<Utc>>,
}

impl FrameClock {
    /// Longest step handed to the simulation, in nominal frames.
    pub const MAX_STEP_FRAMES: i32 = 3;

    pub fn new(target_fps: u32) -> Self {
        let micros = 1_000_000 / i64::from(target_fps.max(1));
        Self { nominal: TimeDelta::microseconds(micros), last_tick: None }
    }

    pub fn nominal(&self) -> TimeDelta { self.nominal }

    pub fn nominal_secs(&self) -> f32 { Self::to_secs(self.nominal) }

    /// Seconds since the previous tick. The first tick yields one nominal frame;
    /// stalls are capped at [`Self::MAX_STEP_FRAMES`] nominal frames and clock
    /// jumps backwards yield zero.
    pub fn tick(&mut self, now: DateTime<Utc>) -> f32 {
        let delta = match self.last_tick.replace(now) {
            None => self.nominal,
            Some(last) => (now - last).clamp(TimeDelta::zero(), self.nominal * Self::MAX_STEP_FRAMES),
        };
        Self::to_secs(delta)
    }

    #[allow(clippy::cast_precision_loss)]
    fn to_secs(delta: TimeDelta) -> f32 { delta.num_microseconds().unwrap_or(0) as f32 / 1e6 }
}
