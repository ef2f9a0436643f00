use std::fmt::Display;

use crate::*;

/// 3D axis aligned bounding box
///
/// An aabb is empty when any `min` component is larger than the corresponding `max` component.
/// The empty aabb returned by [`AABB::empty`] is the identity for [`AABB::extend`] and [`AABB::merge`].
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct AABB<T: Numeric> {
    pub min : Vec3<T>,
    pub max : Vec3<T>
}

impl<T: Numeric> AABB<T> {
    /// Create a new aabb from its bounds
    #[inline]
    #[must_use]
    pub fn new(min: Vec3<T>, max: Vec3<T>) -> Self {
        Self { min, max }
    }

    /// Create an empty aabb, with `min` set to the largest value and `max` to the smallest value
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self { min: Vec3::splat(T::MAX), max: Vec3::splat(T::MIN) }
    }

    /// Create the smallest aabb containing all points
    #[must_use]
    pub fn from_points(points: &[Vec3<T>]) -> Self {
        points.iter().fold(Self::empty(), |aabb, &point| aabb.extend(point))
    }

    /// Check if the aabb is empty
    #[inline]
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.min.x() > self.max.x() || self.min.y() > self.max.y() || self.min.z() > self.max.z()
    }

    /// Get the size of the aabb, an empty aabb has a size of 0
    #[inline]
    #[must_use]
    pub fn size(self) -> Vec3<T> {
        if self.is_empty() {
            Vec3::zero()
        } else {
            self.max - self.min
        }
    }

    /// Get half the size of the aabb
    #[inline]
    #[must_use]
    pub fn half_extents(self) -> Vec3<T> {
        self.size() / T::from_i32(2)
    }

    /// Get the center of the aabb
    #[inline]
    #[must_use]
    pub fn center(self) -> Vec3<T> {
        (self.min + self.max) / T::from_i32(2)
    }

    /// Calculate the volume of the aabb
    #[inline]
    #[must_use]
    pub fn volume(self) -> T {
        let size = self.size();
        size.x() * size.y() * size.z()
    }

    /// Grow the aabb so it contains `point`
    #[inline]
    #[must_use]
    pub fn extend(self, point: Vec3<T>) -> Self {
        Self { min: self.min.min(point), max: self.max.max(point) }
    }

    /// Create the smallest aabb fitting both aabbs
    #[inline]
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self { min: self.min.min(other.min), max: self.max.max(other.max) }
    }

    /// Expand the aabb on each side by `half_extend`
    #[inline]
    #[must_use]
    pub fn expand(self, half_extend: Vec3<T>) -> Self {
        Self { min: self.min - half_extend, max: self.max + half_extend }
    }

    /// Move the aabb by the given delta
    #[inline]
    #[must_use]
    pub fn move_by(self, delta: Vec3<T>) -> Self {
        Self { min: self.min + delta, max: self.max + delta }
    }

    /// Get the 8 corners of the aabb, the n-th bit of the index selects `max` for the n-th axis
    #[must_use]
    pub fn corners(self) -> [Vec3<T>; 8] {
        core::array::from_fn(|idx| Vec3::new(
            if idx & 0b001 == 0 { self.min.x() } else { self.max.x() },
            if idx & 0b010 == 0 { self.min.y() } else { self.max.y() },
            if idx & 0b100 == 0 { self.min.z() } else { self.max.z() },
        ))
    }

    /// Check if the aabb fully contains another aabb
    #[inline]
    #[must_use]
    pub fn contains(self, other: Self) -> bool {
        other.min.x() >= self.min.x() && other.max.x() <= self.max.x() &&
        other.min.y() >= self.min.y() && other.max.y() <= self.max.y() &&
        other.min.z() >= self.min.z() && other.max.z() <= self.max.z()
    }

    /// Check if the aabb contains a point, points on the boundary are contained
    #[inline]
    #[must_use]
    pub fn contains_point(self, point: Vec3<T>) -> bool {
        point.x() >= self.min.x() && point.x() <= self.max.x() &&
        point.y() >= self.min.y() && point.y() <= self.max.y() &&
        point.z() >= self.min.z() && point.z() <= self.max.z()
    }

    /// Check if 2 aabbs overlap, touching aabbs overlap
    #[inline]
    #[must_use]
    pub fn overlaps(self, other: Self) -> bool {
        self.min.x() <= other.max.x() && other.min.x() <= self.max.x() &&
        self.min.y() <= other.max.y() && other.min.y() <= self.max.y() &&
        self.min.z() <= other.max.z() && other.min.z() <= self.max.z()
    }

    /// Calculate the squared distance from the aabb to a point, 0 if the point is inside the aabb
    #[must_use]
    pub fn dist_to_point_sq(self, point: Vec3<T>) -> T {
        let closest = point.clamp(self.min, self.max);
        closest.dist_sq(point)
    }

    /// Transform the aabb by a 3x3 matrix, returning the aabb around the transformed box
    #[inline]
    #[must_use]
    pub fn transform3(self, mat: &Mat3<T>) -> Self {
        self.transform_interval(|row, col| mat[(row, col)], Vec3::zero())
    }

    /// Transform the aabb by an affine 4x4 matrix, returning the aabb around the transformed box.
    ///
    /// The projective row of the matrix is ignored.
    #[inline]
    #[must_use]
    pub fn transform(self, mat: &Mat4<T>) -> Self {
        let translation = Vec3::new(mat[(0, 3)], mat[(1, 3)], mat[(2, 3)]);
        self.transform_interval(|row, col| mat[(row, col)], translation)
    }

    // Each output axis is a sum of scaled input intervals, so the bounds are the sums of the smaller and larger ends of each term
    fn transform_interval<F: Fn(usize, usize) -> T>(self, elem: F, translation: Vec3<T>) -> Self {
        if self.is_empty() {
            return self;
        }

        let mut min = translation;
        let mut max = translation;
        for row in 0..3 {
            for col in 0..3 {
                let a = elem(row, col) * self.min[col];
                let b = elem(row, col) * self.max[col];
                min[row] += a.min(b);
                max[row] += a.max(b);
            }
        }
        Self { min, max }
    }
}

impl<T: Real> AABB<T> {
    /// Calculate the distance from the aabb to a point, 0 if the point is inside the aabb
    #[inline]
    #[must_use]
    pub fn dist_to_point(self, point: Vec3<T>) -> T {
        self.dist_to_point_sq(point).sqrt()
    }

    /// Find the distance along the ray to where it enters the aabb, using the slab method.
    ///
    /// Returns 0 when the origin of the ray is inside the aabb, and `None` when the ray misses the aabb.
    #[must_use]
    pub fn intersect_ray(self, ray: Ray<T>) -> Option<T> {
        let orig = ray.origin();
        let dir = ray.direction();

        let mut t_min = T::zero();
        let mut t_max = T::MAX;
        for axis in 0..3 {
            if dir[axis].is_zero() {
                // parallel to the slab, so the origin needs to be in between its planes
                if orig[axis] < self.min[axis] || orig[axis] > self.max[axis] {
                    return None;
                }
                continue;
            }

            let inv_dir = dir[axis].rcp();
            let t0 = (self.min[axis] - orig[axis]) * inv_dir;
            let t1 = (self.max[axis] - orig[axis]) * inv_dir;
            t_min = t_min.max(t0.min(t1));
            t_max = t_max.min(t0.max(t1));
            if t_min > t_max {
                return None;
            }
        }
        Some(t_min)
    }
}

impl<T: Numeric> Default for AABB<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Numeric> ApproxEq for AABB<T> {
    type Epsilon = T;

    fn is_close_to(self, rhs: Self, epsilon: Self::Epsilon) -> bool {
        self.min.is_close_to(rhs.min, epsilon) &&
        self.max.is_close_to(rhs.max, epsilon)
    }
}

impl<T: Numeric + Display> Display for AABB<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{{ min: {}, max: {} }}", self.min, self.max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aabb(min: [f32; 3], max: [f32; 3]) -> AABB<f32> {
        AABB::new(Vec3::from_array(min), Vec3::from_array(max))
    }

    #[test]
    fn extend_from_empty() {
        let p0 = Vec3::new(1.0f32, -2.0, 3.0);
        let p1 = Vec3::new(-4.0, 5.0, 0.5);

        let res = AABB::empty().extend(p0).extend(p1);
        assert_eq!(res.min, Vec3::new(-4.0, -2.0, 0.5));
        assert_eq!(res.max, Vec3::new(1.0, 5.0, 3.0));
        assert_eq!(AABB::from_points(&[p0, p1]), res);

        assert!(AABB::<f32>::empty().is_empty());
        assert!(!res.is_empty());
        assert_eq!(AABB::empty().extend(p0), AABB::new(p0, p0));
    }

    #[test]
    fn empty_has_no_size() {
        let empty = AABB::<i32>::empty();
        assert_eq!(empty.size(), Vec3::zero());
        assert_eq!(empty.half_extents(), Vec3::zero());
        assert_eq!(empty.volume(), 0);
        assert_eq!(AABB::<u8>::empty().volume(), 0);
        assert_eq!(AABB::<f32>::empty().volume(), 0.0);

        let unit = AABB::<i32>::empty().extend(Vec3::new(1, 2, 3)).extend(Vec3::new(3, 5, 4));
        assert_eq!(unit.size(), Vec3::new(2, 3, 1));
        assert_eq!(unit.volume(), 6);
    }

    #[test]
    fn merge() {
        let a = aabb([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
        let b = aabb([-1.0, 0.5, 2.0], [0.5, 0.75, 3.0]);
        assert_eq!(a.merge(b), aabb([-1.0, 0.0, 0.0], [1.0, 1.0, 3.0]));
        assert_eq!(a.merge(AABB::empty()), a);
        assert_eq!(AABB::empty().merge(a), a);
    }

    #[test]
    fn queries() {
        let a = aabb([-1.0, -2.0, -3.0], [1.0, 2.0, 3.0]);
        assert_eq!(a.center(), Vec3::zero());
        assert_eq!(a.half_extents(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(a.volume(), 48.0);

        assert!(a.contains_point(Vec3::new(1.0, 0.0, -3.0)));
        assert!(!a.contains_point(Vec3::new(0.0, 2.5, 0.0)));
        assert!(a.contains(aabb([0.0, 0.0, 0.0], [1.0, 1.0, 1.0])));
        assert!(!a.contains(aabb([0.0, 0.0, 0.0], [2.0, 1.0, 1.0])));

        assert!(a.overlaps(aabb([0.5, 1.5, 2.5], [4.0, 4.0, 4.0])));
        assert!(!a.overlaps(aabb([1.5, 0.0, 0.0], [4.0, 4.0, 4.0])));

        assert_eq!(a.dist_to_point(Vec3::new(4.0, 6.0, 0.0)), 5.0);
        assert_eq!(a.dist_to_point(Vec3::new(0.5, 0.5, 0.5)), 0.0);

        let corners = a.corners();
        assert_eq!(corners[0], a.min);
        assert_eq!(corners[7], a.max);
        assert_eq!(AABB::from_points(&corners), a);
    }

    #[test]
    fn transform() {
        let a = aabb([0.0, 0.0, 0.0], [2.0, 1.0, 1.0]);

        let translated = a.transform(&Mat4::translation(1.0, 2.0, 3.0));
        assert_eq!(translated, aabb([1.0, 2.0, 3.0], [3.0, 3.0, 4.0]));

        let rotated = a.transform(&Mat4::rotation_z(Radians(core::f32::consts::FRAC_PI_2)));
        assert!(rotated.is_close_to(aabb([-1.0, 0.0, 0.0], [0.0, 2.0, 1.0]), 1e-6));
        assert!(a.transform3(&Mat3::rotation_z(Radians(core::f32::consts::FRAC_PI_2))).is_close_to(rotated, 1e-6));

        // a rotated box is fully covered by the transformed aabb
        let mat = Mat4::translation(0.5, -1.0, 2.0) * Mat4::rotation(Radians(0.7), Vec3::new(1.0, 1.0, 1.0).normalize());
        let res = a.transform(&mat);
        for corner in a.corners() {
            let point = mat.transform_point(corner);
            assert!(res.expand(Vec3::splat(1e-5)).contains_point(point));
        }

        assert!(AABB::<f32>::empty().transform(&mat).is_empty());
    }

    #[test]
    fn ray_intersection() {
        let a = aabb([-1.0, -1.0, -1.0], [1.0, 1.0, 1.0]);

        let ray = Ray::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(a.intersect_ray(ray), Some(4.0));

        let inside = Ray::new(Vec3::zero(), Vec3::new(0.0, 1.0, 1.0));
        assert_eq!(a.intersect_ray(inside), Some(0.0));

        let behind = Ray::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0));
        assert_eq!(a.intersect_ray(behind), None);

        let parallel = Ray::new(Vec3::new(-5.0, 2.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(a.intersect_ray(parallel), None);

        let diagonal = Ray::new(Vec3::new(-3.0, -3.0, 0.0), Vec3::new(1.0, 1.0, 0.0));
        let dist = a.intersect_ray(diagonal).unwrap_or_default();
        assert!(diagonal.point_at(dist).is_close_to(Vec3::new(-1.0, -1.0, 0.0), 1e-5));
    }
}
