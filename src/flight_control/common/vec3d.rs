use num::{Float, NumCast};
use serde::Serialize;
use std::ops::{Add, AddAssign, Mul, Sub};

/// A 3D vector generic over any floating point type.
///
/// Axis convention for the flight model:
/// * `x` - lateral offset
/// * `y` - height above ground
/// * `z` - forward depth
#[derive(Debug, PartialEq, Clone, Copy, Default, Serialize)]
pub struct Vec3D<T> {
    /// The x-component (lateral).
    x: T,
    /// The y-component (height).
    y: T,
    /// The z-component (depth).
    z: T,
}

impl<T: Copy> Vec3D<T> {
    /// Creates a new vector with the given components.
    pub const fn new(x: T, y: T, z: T) -> Self { Self { x, y, z } }

    pub const fn x(&self) -> T { self.x }
    pub const fn y(&self) -> T { self.y }
    pub const fn z(&self) -> T { self.z }

    pub fn set_x(&mut self, x: T) { self.x = x }
    pub fn set_y(&mut self, y: T) { self.y = y }
    pub fn set_z(&mut self, z: T) { self.z = z }
}

impl<T> Vec3D<T>
where
    T: Float + NumCast,
{
    /// Creates a zero vector (x = 0, y = 0, z = 0).
    pub fn zero() -> Self { Self::new(T::zero(), T::zero(), T::zero()) }

    /// Computes the magnitude (absolute value) of the vector.
    pub fn abs(&self) -> T { (self.x.powi(2) + self.y.powi(2) + self.z.powi(2)).sqrt() }

    /// Computes the Euclidean distance between `self` and `other` in all three axes.
    ///
    /// # Arguments
    /// * `other` - The other vector to compute the distance to.
    ///
    /// # Returns
    /// The Euclidean distance as a scalar of type `T`.
    pub fn euclid_distance(&self, other: &Self) -> T {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2) + (self.z - other.z).powi(2))
            .sqrt()
    }

    /// Computes the Euclidean distance projected onto the ground plane (x/z),
    /// ignoring height.
    ///
    /// # Arguments
    /// * `other` - The other vector to compute the distance to.
    ///
    /// # Returns
    /// The planar distance as a scalar of type `T`.
    pub fn planar_distance(&self, other: &Self) -> T {
        ((self.x - other.x).powi(2) + (self.z - other.z).powi(2)).sqrt()
    }

    /// Clamps the planar components (x/z) into `[-half_extent, half_extent]`.
    pub fn clamp_planar(self, half_extent: T) -> Self {
        Self::new(
            self.x.max(-half_extent).min(half_extent),
            self.y,
            self.z.max(-half_extent).min(half_extent),
        )
    }

    /// Wraps the planar components (x/z) into `[-half_extent, half_extent)`.
    pub fn wrap_planar(self, half_extent: T) -> Self {
        Self::new(
            Self::wrap_coordinate(self.x, half_extent),
            self.y,
            Self::wrap_coordinate(self.z, half_extent),
        )
    }

    /// Wraps a single coordinate into `[-half_extent, half_extent)`.
    pub fn wrap_coordinate(value: T, half_extent: T) -> T {
        let extent = half_extent + half_extent;
        let shifted = value + half_extent;
        ((shifted % extent) + extent) % extent - half_extent
    }
}

impl<T: Float> Add for Vec3D<T> {
    type Output = Vec3D<T>;

    fn add(self, rhs: Self) -> Self::Output {
        Self::Output { x: self.x + rhs.x, y: self.y + rhs.y, z: self.z + rhs.z }
    }
}

impl<T: Float> AddAssign for Vec3D<T> {
    fn add_assign(&mut self, rhs: Self) {
        self.x = self.x + rhs.x;
        self.y = self.y + rhs.y;
        self.z = self.z + rhs.z;
    }
}

impl<T: Float> Sub for Vec3D<T> {
    type Output = Vec3D<T>;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::Output { x: self.x - rhs.x, y: self.y - rhs.y, z: self.z - rhs.z }
    }
}

impl<T: Float> Mul<T> for Vec3D<T> {
    type Output = Vec3D<T>;

    /// Scales every component by `rhs`.
    fn mul(self, rhs: T) -> Self::Output {
        Self::Output { x: self.x * rhs, y: self.y * rhs, z: self.z * rhs }
    }
}

impl<T: Copy> From<(T, T, T)> for Vec3D<T> {
    fn from(tuple: (T, T, T)) -> Self { Vec3D::new(tuple.0, tuple.1, tuple.2) }
}

impl<T: std::fmt::Display> std::fmt::Display for Vec3D<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}, {}]", self.x, self.y, self.z)
    }
}
