use std::fmt::Display;

use crate::*;

/// 3D ray, starting at an origin and extending infinitely along a normalized direction
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Ray<T: Real> {
    origin    : Vec3<T>,
    direction : Vec3<T>,
}

impl<T: Real> Ray<T> {
    /// Create a new ray, the direction will be normalized.
    ///
    /// The result is undefined for a zero-length direction.
    #[inline]
    #[must_use]
    pub fn new(origin: Vec3<T>, direction: Vec3<T>) -> Self {
        Self { origin, direction: direction.normalize() }
    }

    /// Create a ray starting at `from` and going through `to`
    #[inline]
    #[must_use]
    pub fn between(from: Vec3<T>, to: Vec3<T>) -> Self {
        Self::new(from, to - from)
    }

    #[inline(always)]
    #[must_use]
    pub fn origin(&self) -> Vec3<T> {
        self.origin
    }

    /// Get the normalized direction of the ray
    #[inline(always)]
    #[must_use]
    pub fn direction(&self) -> Vec3<T> {
        self.direction
    }

    #[inline]
    pub fn set_origin(&mut self, origin: Vec3<T>) {
        self.origin = origin;
    }

    /// Set the direction of the ray, the direction will be normalized
    #[inline]
    pub fn set_direction(&mut self, direction: Vec3<T>) {
        self.direction = direction.normalize();
    }

    /// Get the point at a given distance along the ray
    #[inline]
    #[must_use]
    pub fn point_at(self, dist: T) -> Vec3<T> {
        self.origin + self.direction * dist
    }

    /// Get the distance along the ray of the point on the ray that is closest to `point`
    #[inline]
    #[must_use]
    pub fn closest_dist(self, point: Vec3<T>) -> T {
        self.direction.dot(point - self.origin).max(T::zero())
    }

    /// Get the point on the ray that is closest to `point`
    #[inline]
    #[must_use]
    pub fn closest_point(self, point: Vec3<T>) -> Vec3<T> {
        self.point_at(self.closest_dist(point))
    }

    /// Calculate the distance from a point to the ray
    #[inline]
    #[must_use]
    pub fn distance_to_point(self, point: Vec3<T>) -> T {
        self.closest_point(point).dist(point)
    }

    /// Transform the ray by a 4x4 matrix, the transformed direction is re-normalized
    #[inline]
    #[must_use]
    pub fn transform(self, mat: &Mat4<T>) -> Self {
        Self::new(mat.transform_point(self.origin), mat.transform_vector(self.direction))
    }
}

impl<T: Real> ApproxEq for Ray<T> {
    type Epsilon = T;

    fn is_close_to(self, rhs: Self, epsilon: Self::Epsilon) -> bool {
        self.origin.is_close_to(rhs.origin, epsilon) &&
        self.direction.is_close_to(rhs.direction, epsilon)
    }
}

impl<T: Real + Display> Display for Ray<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{{ o: {}, d: {} }}", self.origin, self.direction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_is_normalized() {
        let mut ray = Ray::new(Vec3::new(1.0f32, 2.0, 3.0), Vec3::new(0.0, 3.0, 4.0));
        assert!(ray.direction().is_close_to(Vec3::new(0.0, 0.6, 0.8), 1e-6));

        ray.set_direction(Vec3::new(-2.0, 0.0, 0.0));
        assert!(ray.direction().is_close_to(Vec3::new(-1.0, 0.0, 0.0), 1e-6));

        let scaled = ray.transform(&Mat4::scaling(3.0, 1.0, 1.0));
        assert!(scaled.direction().is_close_to_normalized(1e-6));
        assert!(scaled.origin().is_close_to(Vec3::new(3.0, 2.0, 3.0), 1e-6));
    }

    #[test]
    fn transform() {
        let ray = Ray::between(Vec3::new(0.0f64, 0.0, 0.0), Vec3::new(0.0, 0.0, 5.0));
        let mat = Mat4::translation(1.0, 0.0, 0.0) * Mat4::rotation_y(Radians(core::f64::consts::FRAC_PI_2));
        let res = ray.transform(&mat);
        assert!(res.origin().is_close_to(Vec3::new(1.0, 0.0, 0.0), 1e-12));
        assert!(res.direction().is_close_to(Vec3::new(1.0, 0.0, 0.0), 1e-12));
    }

    #[test]
    fn closest_point() {
        let ray = Ray::new(Vec3::new(0.0f32, 1.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(ray.point_at(2.5), Vec3::new(2.5, 1.0, 0.0));

        assert_eq!(ray.closest_point(Vec3::new(3.0, 5.0, 0.0)), Vec3::new(3.0, 1.0, 0.0));
        assert_eq!(ray.distance_to_point(Vec3::new(3.0, 5.0, 0.0)), 4.0);

        // points behind the origin are closest to the origin
        assert_eq!(ray.closest_point(Vec3::new(-3.0, 5.0, 0.0)), ray.origin());
        assert_eq!(ray.distance_to_point(Vec3::new(-3.0, 5.0, 0.0)), 5.0);
    }
}
