use std::fmt::Display;

use crate::*;

/// Plane, containing all points `p` for which `dot(normal, p) + distance == 0`.
///
/// With a unit length normal, `distance` is the negated signed distance of the origin along the normal.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Plane<T: Real> {
    pub normal   : Vec3<T>,
    pub distance : T
}

impl<T: Real> Plane<T> {
    /// Create a new plane from a normal and a distance
    #[inline]
    #[must_use]
    pub fn new(normal: Vec3<T>, distance: T) -> Self {
        Self { normal, distance }
    }

    /// Create a plane from its coefficients `a * x + b * y + c * z + d == 0`, the coefficients are not normalized
    #[inline]
    #[must_use]
    pub fn from_coefficients(a: T, b: T, c: T, d: T) -> Self {
        Self { normal: Vec3::new(a, b, c), distance: d }
    }

    /// Create a plane through a point with the given normal
    #[inline]
    #[must_use]
    pub fn from_point_normal(point: Vec3<T>, normal: Vec3<T>) -> Self {
        Self { normal, distance: -point.dot(normal) }
    }

    /// Create a plane through 3 points, the normal points to the side from which `a`, `b` and `c` are in counter-clockwise order.
    ///
    /// The result is undefined for collinear points.
    #[must_use]
    pub fn from_points(a: Vec3<T>, b: Vec3<T>, c: Vec3<T>) -> Self {
        let normal = (b - a).cross(c - a).normalize();
        Self { normal, distance: -a.dot(normal) }
    }

    /// Get the coefficients of the plane as a vector `(a, b, c, d)`
    #[inline]
    #[must_use]
    pub fn coefficients(self) -> Vec4<T> {
        self.normal.extend(self.distance)
    }

    /// Normalize the plane so the normal has a length of 1, the result is undefined for a zero normal
    #[inline]
    #[must_use]
    pub fn normalize(self) -> Self {
        let scale = self.normal.len_sq().rsqrt();
        Self { normal: self.normal * scale, distance: self.distance * scale }
    }

    /// Calculate the signed distance from the plane to a point, positive on the side the normal points to.
    ///
    /// The distance is only euclidean for a normalized plane.
    #[inline]
    #[must_use]
    pub fn signed_distance(self, point: Vec3<T>) -> T {
        self.normal.dot(point) + self.distance
    }

    /// Check if a point is on the side of the plane the normal points to
    #[inline]
    #[must_use]
    pub fn is_above(self, point: Vec3<T>) -> bool {
        self.signed_distance(point) > T::zero()
    }

    /// Project a point onto a normalized plane
    #[inline]
    #[must_use]
    pub fn project_point(self, point: Vec3<T>) -> Vec3<T> {
        point - self.normal * self.signed_distance(point)
    }

    /// Reflect a point over a normalized plane
    #[inline]
    #[must_use]
    pub fn reflect(self, point: Vec3<T>) -> Vec3<T> {
        point - self.normal * (T::from_i32(2) * self.signed_distance(point))
    }

    /// Reflect a direction over a normalized plane, the direction is reflected as if the plane went through the origin
    #[inline]
    #[must_use]
    pub fn reflect_direction(self, dir: Vec3<T>) -> Vec3<T> {
        dir - self.normal * (T::from_i32(2) * self.normal.dot(dir))
    }

    /// Find the point where a ray hits the plane.
    ///
    /// Returns `None` when the ray is parallel to the plane, i.e. when `|dot(normal, dir)|` is not larger than `threshold`, or when the plane is behind the ray.
    #[must_use]
    pub fn find_intersection(self, ray: Ray<T>, threshold: T) -> Option<Vec3<T>> {
        let denom = self.normal.dot(ray.direction());
        if denom.abs() <= threshold {
            return None;
        }

        let t = -self.signed_distance(ray.origin()) / denom;
        if t < T::zero() {
            None
        } else {
            Some(ray.point_at(t))
        }
    }

    /// Transform the plane by a 4x4 matrix, using the inverse-transpose of the matrix, the result is normalized.
    ///
    /// The result is undefined for a singular matrix.
    #[must_use]
    pub fn transform(self, mat: &Mat4<T>) -> Self {
        let coefs = mat.inverse().transpose() * self.coefficients();
        Self { normal: coefs.truncate(), distance: coefs.w() }.normalize()
    }
}

impl<T: Real> ApproxEq for Plane<T> {
    type Epsilon = T;

    fn is_close_to(self, rhs: Self, epsilon: Self::Epsilon) -> bool {
        self.normal.is_close_to(rhs.normal, epsilon) &&
        self.distance.is_close_to(rhs.distance, epsilon)
    }
}

impl<T: Real + Display> Display for Plane<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{{ n: {}, d: {} }}", self.normal, self.distance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS : f32 = 1e-5;

    #[test]
    fn from_points() {
        let plane = Plane::from_points(Vec3::new(0.0f32, 2.0, 0.0), Vec3::new(1.0, 2.0, 0.0), Vec3::new(0.0, 2.0, -1.0));
        assert!(plane.is_close_to(Plane::new(Vec3::new(0.0, 1.0, 0.0), -2.0), EPS));
        assert!(plane.signed_distance(Vec3::new(5.0, 3.0, 1.0)).is_close_to(1.0, EPS));
        assert!(plane.is_above(Vec3::new(0.0, 2.5, 0.0)));
        assert!(!plane.is_above(Vec3::new(0.0, 1.5, 0.0)));

        let coefs = Plane::from_coefficients(0.0f32, 2.0, 0.0, -4.0).normalize();
        assert!(coefs.is_close_to(plane, EPS));
        assert!(Plane::from_point_normal(Vec3::new(7.0, 2.0, 7.0), Vec3::unit_y()).is_close_to(plane, EPS));
    }

    #[test]
    fn reflect() {
        let plane = Plane::new(Vec3::new(0.0f32, 1.0, 0.0), -1.0);
        assert!(plane.reflect(Vec3::new(3.0, 4.0, 0.0)).is_close_to(Vec3::new(3.0, -2.0, 0.0), EPS));
        assert!(plane.reflect_direction(Vec3::new(1.0, -1.0, 0.0)).is_close_to(Vec3::new(1.0, 1.0, 0.0), EPS));
        assert!(plane.project_point(Vec3::new(3.0, 4.0, 2.0)).is_close_to(Vec3::new(3.0, 1.0, 2.0), EPS));
    }

    #[test]
    fn ray_intersection() {
        let a = Vec3::new(1.0f32, 0.0, 0.0);
        let b = Vec3::new(0.0, 1.0, 0.0);
        let c = Vec3::new(0.0, 0.0, 1.0);
        let plane = Plane::from_points(a, b, c);

        // a ray in the plane is parallel and misses
        assert_eq!(plane.find_intersection(Ray::new(a, b - a), 1e-6), None);

        let ray = Ray::new(Vec3::zero(), Vec3::new(1.0, 1.0, 1.0));
        let hit = plane.find_intersection(ray, 1e-6);
        assert!(hit.is_some_and(|point| point.is_close_to(Vec3::splat(1.0 / 3.0), EPS)));

        // the plane is behind the ray
        assert_eq!(plane.find_intersection(Ray::new(Vec3::zero(), Vec3::new(-1.0, -1.0, -1.0)), 1e-6), None);

        let from_above = Ray::new(Vec3::new(0.0, 0.0, 4.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = plane.find_intersection(from_above, 1e-6);
        assert!(hit.is_some_and(|point| point.is_close_to(c, EPS)));
    }

    #[test]
    fn ray_in_plane_is_parallel() {
        let plane = Plane::from_point_normal(Vec3::new(0.0f32, 2.0, 0.0), Vec3::unit_y());

        // every point of the ray lies on the plane, but there is no single intersection
        let in_plane = Ray::new(Vec3::new(-1.0, 2.0, 3.0), Vec3::new(1.0, 0.0, 1.0));
        assert!(plane.signed_distance(in_plane.origin()).is_close_to(0.0, EPS));
        assert!(plane.signed_distance(in_plane.point_at(10.0)).is_close_to(0.0, EPS));
        assert_eq!(plane.find_intersection(in_plane, 1e-6), None);

        // slightly above the plane and parallel misses as well
        let above = Ray::new(Vec3::new(0.0, 2.5, 0.0), Vec3::unit_x());
        assert_eq!(plane.find_intersection(above, 1e-6), None);

        // starting on the plane, but not parallel, hits at the origin of the ray
        let leaving = Ray::new(Vec3::new(4.0, 2.0, -1.0), Vec3::new(0.0, 1.0, 1.0));
        let hit = plane.find_intersection(leaving, 1e-6);
        assert!(hit.is_some_and(|point| point.is_close_to(Vec3::new(4.0, 2.0, -1.0), EPS)));
    }

    #[test]
    fn transform() {
        let plane = Plane::new(Vec3::new(0.0f32, 1.0, 0.0), 0.0);

        let res = plane.transform(&Mat4::translation(0.0, 5.0, 0.0));
        assert!(res.is_close_to(Plane::new(Vec3::new(0.0, 1.0, 0.0), -5.0), EPS));

        // a transformed point on the plane stays on the transformed plane
        let mat = Mat4::translation(1.0, -2.0, 3.0) * Mat4::rotation_x(Radians(0.6)) * Mat4::scaling(2.0, 0.5, 1.0);
        let res = plane.transform(&mat);
        let point = mat.transform_point(Vec3::new(3.0, 0.0, -1.0));
        assert!(res.signed_distance(point).is_close_to(0.0, 1e-4));
        assert!(res.normal.is_close_to_normalized(EPS));
    }
}
