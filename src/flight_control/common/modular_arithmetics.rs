/// Floored modulo for `f32`: the result always carries the sign of `b`.
pub fn fmod_f32(a: f32, b: f32) -> f32 { ((a % b) + b) % b }

/// Wraps an angle in degrees into `[0, 360)`.
pub fn wrap_degrees(angle: f32) -> f32 { fmod_f32(angle, 360.0) }

/// Moves `current` toward `target` by the fraction `rate` (`0.0..=1.0`).
pub fn approach(current: f32, target: f32, rate: f32) -> f32 { current + (target - current) * rate }
