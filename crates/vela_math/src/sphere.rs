use std::fmt::Display;

use crate::*;

/// 3D sphere
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Sphere<T: Real> {
    pub center : Vec3<T>,
    pub radius : T
}

impl<T: Real> Sphere<T> {
    /// Create a new sphere
    #[inline]
    #[must_use]
    pub fn new(center: Vec3<T>, radius: T) -> Self {
        debug_assert!(radius >= T::zero());
        Self { center, radius }
    }

    /// Create the sphere bounding an aabb
    #[inline]
    #[must_use]
    pub fn from_aabb(aabb: AABB<T>) -> Self {
        Self { center: aabb.center(), radius: aabb.half_extents().len() }
    }

    /// Get the volume of the sphere
    #[inline]
    #[must_use]
    pub fn volume(self) -> T {
        T::from_i32(4) * self.radius * self.radius * self.radius * T::PI / T::from_i32(3)
    }

    /// Check if the sphere fully contains another sphere
    #[inline]
    #[must_use]
    pub fn contains(self, other: Self) -> bool {
        let furthest_point = self.center.dist(other.center) + other.radius;
        furthest_point <= self.radius
    }

    /// Check if the sphere contains a point
    #[inline]
    #[must_use]
    pub fn contains_point(self, point: Vec3<T>) -> bool {
        self.center.dist_sq(point) <= self.radius * self.radius
    }

    /// Check if 2 spheres overlap, touching spheres overlap
    #[inline]
    #[must_use]
    pub fn overlaps(self, other: Self) -> bool {
        let max_dist = self.radius + other.radius;
        self.center.dist_sq(other.center) <= max_dist * max_dist
    }

    /// Calculate the distance between the sphere and a point
    #[inline]
    #[must_use]
    pub fn dist_to_point(self, point: Vec3<T>) -> T {
        let dist = self.center.dist(point);
        if dist > self.radius { dist - self.radius } else { T::zero() }
    }

    /// Get the smallest sphere fitting both spheres
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        let dist = self.center.dist(other.center);

        // early exit if 1 of the spheres fits into the other
        if dist + other.radius <= self.radius {
            return self;
        } else if dist + self.radius <= other.radius {
            return other;
        }

        let radius = (dist + self.radius + other.radius) / T::from_i32(2);
        let center = self.center + (other.center - self.center) * ((radius - self.radius) / dist);
        Self { center, radius }
    }

    /// Transform the sphere by an affine 4x4 matrix.
    ///
    /// The radius is scaled by the largest scale of the matrix's axes, so the result bounds the transformed sphere for non-uniform scales.
    #[must_use]
    pub fn transform(self, mat: &Mat4<T>) -> Self {
        let upper = mat.to_mat3();
        let max_scale_sq = upper.column(0).len_sq()
            .max(upper.column(1).len_sq())
            .max(upper.column(2).len_sq());
        Self { center: mat.transform_point(self.center), radius: self.radius * max_scale_sq.sqrt() }
    }
}

impl<T: Real> ApproxEq for Sphere<T> {
    type Epsilon = T;

    fn is_close_to(self, rhs: Self, epsilon: Self::Epsilon) -> bool {
        self.center.is_close_to(rhs.center, epsilon) &&
        self.radius.is_close_to(rhs.radius, epsilon)
    }
}

impl<T: Real + Display> Display for Sphere<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{{ c: {}, r: {} }}", self.center, self.radius))
    }
}
