pub(crate) mod modular_arithmetics;
pub(crate) mod vec3d;
#[cfg(test)]
mod tests;

pub use modular_arithmetics::{approach, fmod_f32, wrap_degrees};
pub use vec3d::Vec3D;
