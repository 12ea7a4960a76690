use std::ops::{Add, Mul, Neg, Sub};

/*
Requirements for Memory Compatibility with GPU buffers:
   1. Standard layout (like C structs).
   2. Alignment that matches shader-side expectations.
   3. Sized correctly for vertex/uniform uploads.
   4. Can be safely cast to [f32; N] or bytes.
*/

/// A 3-component vector in world space, laid out as a plain `[f32; 3]` so the
/// rendering shell can upload it to the GPU without conversion.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vec3([f32; 3]);

impl Vec3 {
    /// Creates a vector from its three components.
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Vec3([x, y, z])
    }

    /// The zero vector.
    pub fn zero() -> Self {
        Vec3([0.0, 0.0, 0.0])
    }

    /// Dot product with another vector.
    pub fn dot(&self, other: &Self) -> f32 {
        self.x() * other.x() + self.y() * other.y() + self.z() * other.z()
    }

    /// Cross product with another vector.
    pub fn cross(&self, other: &Self) -> Self {
        Vec3([
            self.y() * other.z() - self.z() * other.y(),
            self.z() * other.x() - self.x() * other.z(),
            self.x() * other.y() - self.y() * other.x(),
        ])
    }

    /// Euclidean length of the vector.
    pub fn length(&self) -> f32 {
        (self.x().powi(2) + self.y().powi(2) + self.z().powi(2)).sqrt()
    }

    /// Returns the unit-length vector pointing the same way, or the zero
    /// vector when the length is zero.
    pub fn normalize(&self) -> Self {
        let length = self.length();
        if length == 0.0 {
            return Self::zero();
        }

        Self([self.x() / length, self.y() / length, self.z() / length])
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Self) -> f32 {
        (*other - *self).length()
    }

    /// Distance to another point measured in the horizontal (xz) plane only.
    pub fn horizontal_distance_to(&self, other: &Self) -> f32 {
        let dx = other.x() - self.x();
        let dz = other.z() - self.z();
        (dx * dx + dz * dz).sqrt()
    }

    /// Copy of this vector with the y component zeroed.
    pub fn flattened(&self) -> Self {
        Vec3([self.x(), 0.0, self.z()])
    }

    /// Borrow the underlying `[f32; 3]`.
    pub fn as_array(&self) -> &[f32; 3] {
        &self.0
    }

    /// Component along the given axis index (0 = x, 1 = y, 2 = z).
    pub fn axis(&self, axis: usize) -> f32 {
        self.0[axis]
    }

    /// The x component.
    pub fn x(&self) -> f32 {
        self.0[0]
    }
    /// The y component.
    pub fn y(&self) -> f32 {
        self.0[1]
    }
    /// The z component.
    pub fn z(&self) -> f32 {
        self.0[2]
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from(values: [f32; 3]) -> Self {
        Vec3(values)
    }
}

impl From<Vec3> for [f32; 3] {
    fn from(vec: Vec3) -> Self {
        vec.0
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self([
            self.x() + other.x(),
            self.y() + other.y(),
            self.z() + other.z(),
        ])
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self([
            self.x() - other.x(),
            self.y() - other.y(),
            self.z() - other.z(),
        ])
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self([self.x() * scalar, self.y() * scalar, self.z() * scalar])
    }
}

impl Neg for Vec3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self([-self.x(), -self.y(), -self.z()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Cross products of the basis vectors follow the right-hand rule.
    #[test]
    fn test_cross_products_right_handed() {
        let x = Vec3::new(1.0, 0.0, 0.0);
        let y = Vec3::new(0.0, 1.0, 0.0);
        let z = Vec3::new(0.0, 0.0, 1.0);

        assert_eq!(x.cross(&y), z);
        assert_eq!(y.cross(&z), x);
        assert_eq!(z.cross(&x), y);
    }

    /// Normalizing the zero vector yields the zero vector instead of NaNs.
    #[test]
    fn test_normalize_zero_vector() {
        let v = Vec3::zero().normalize();
        assert_eq!(v, Vec3::zero());
        assert!(v.length() == 0.0);
    }

    /// Horizontal distance ignores any vertical separation.
    #[test]
    fn test_horizontal_distance_ignores_y() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(3.0, 100.0, 4.0);
        assert!((a.horizontal_distance_to(&b) - 5.0).abs() < 1e-6);
        assert!((a.distance_to(&b) - (9.0_f32 + 10000.0 + 16.0).sqrt()).abs() < 1e-3);
    }
}
