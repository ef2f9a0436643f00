use core::ops::Index;
use std::fmt::Display;

use crate::*;

/// Plane of a frustum
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FrustumPlane {
    Left,
    Right,
    Bottom,
    Top,
    Near,
    Far,
}

impl FrustumPlane {
    /// All frustum planes, in the order they are stored in
    pub const ALL : [FrustumPlane; 6] = [
        FrustumPlane::Left,
        FrustumPlane::Right,
        FrustumPlane::Bottom,
        FrustumPlane::Top,
        FrustumPlane::Near,
        FrustumPlane::Far,
    ];
}

impl Display for FrustumPlane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrustumPlane::Left   => f.write_str("left"),
            FrustumPlane::Right  => f.write_str("right"),
            FrustumPlane::Bottom => f.write_str("bottom"),
            FrustumPlane::Top    => f.write_str("top"),
            FrustumPlane::Near   => f.write_str("near"),
            FrustumPlane::Far    => f.write_str("far"),
        }
    }
}

/// View frustum, bounded by 6 normalized planes with normals pointing into the frustum
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Frustum<T: Real> {
    planes : [Plane<T>; 6],
}

impl<T: Real> Frustum<T> {
    /// Create a frustum from its planes, in the order of [`FrustumPlane::ALL`]
    #[inline]
    #[must_use]
    pub fn new(planes: [Plane<T>; 6]) -> Self {
        Self { planes }
    }

    /// Extract the frustum from a clip matrix, i.e. `projection * view`.
    ///
    /// Clip space is expected to have a depth range of [0, 1], matching [`Mat4::perspective`]: the resulting frustum is in the space the matrix transforms from.
    #[must_use]
    pub fn from_matrix(clip: &Mat4<T>) -> Self {
        let r0 = clip.row(0);
        let r1 = clip.row(1);
        let r2 = clip.row(2);
        let r3 = clip.row(3);

        let plane = |coefs: RowVec4<T>| Plane::from_coefficients(coefs.x(), coefs.y(), coefs.z(), coefs.w()).normalize();
        Self { planes: [
            plane(r3 + r0),
            plane(r3 - r0),
            plane(r3 + r1),
            plane(r3 - r1),
            plane(r2),
            plane(r3 - r2),
        ] }
    }

    /// Get a plane of the frustum
    #[inline]
    #[must_use]
    pub fn plane(&self, plane: FrustumPlane) -> Plane<T> {
        self.planes[plane as usize]
    }

    /// Get all planes of the frustum, in the order of [`FrustumPlane::ALL`]
    #[inline]
    #[must_use]
    pub fn planes(&self) -> &[Plane<T>; 6] {
        &self.planes
    }

    /// Check if a point is inside of the frustum, points on a plane are inside
    #[must_use]
    pub fn contains_point(&self, point: Vec3<T>) -> bool {
        self.planes.iter().all(|plane| plane.signed_distance(point) >= T::zero())
    }

    /// Check if a sphere is at least partially inside of the frustum.
    ///
    /// This is conservative: spheres near a corner of the frustum can be reported as intersecting while being fully outside.
    #[must_use]
    pub fn intersects_sphere(&self, sphere: Sphere<T>) -> bool {
        self.planes.iter().all(|plane| plane.signed_distance(sphere.center) >= -sphere.radius)
    }

    /// Check if an aabb is at least partially inside of the frustum, using the corner that is furthest along each plane's normal.
    ///
    /// This is conservative in the same way as [`Frustum::intersects_sphere`].
    #[must_use]
    pub fn intersects_aabb(&self, aabb: AABB<T>) -> bool {
        self.planes.iter().all(|plane| {
            let positive = Vec3::from_fn(|row, _| if plane.normal[row] >= T::zero() { aabb.max[row] } else { aabb.min[row] });
            plane.signed_distance(positive) >= T::zero()
        })
    }
}

impl<T: Real> Index<FrustumPlane> for Frustum<T> {
    type Output = Plane<T>;

    fn index(&self, index: FrustumPlane) -> &Self::Output {
        &self.planes[index as usize]
    }
}

impl<T: Real> ApproxEq for Frustum<T> {
    type Epsilon = T;

    fn is_close_to(self, rhs: Self, epsilon: Self::Epsilon) -> bool {
        self.planes.iter().zip(rhs.planes.iter()).all(|(a, b)| a.is_close_to(*b, epsilon))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS : f32 = 1e-5;

    fn frustum() -> Frustum<f32> {
        Frustum::from_matrix(&Mat4::perspective(Radians(core::f32::consts::FRAC_PI_2), 1.0, 1.0, 10.0))
    }

    #[test]
    fn planes() {
        let frustum = frustum();
        let half_sqrt2 = core::f32::consts::FRAC_1_SQRT_2;

        assert!(frustum.plane(FrustumPlane::Left).is_close_to(Plane::new(Vec3::new(half_sqrt2, 0.0, half_sqrt2), 0.0), EPS));
        assert!(frustum.plane(FrustumPlane::Right).is_close_to(Plane::new(Vec3::new(-half_sqrt2, 0.0, half_sqrt2), 0.0), EPS));
        assert!(frustum[FrustumPlane::Bottom].is_close_to(Plane::new(Vec3::new(0.0, half_sqrt2, half_sqrt2), 0.0), EPS));
        assert!(frustum[FrustumPlane::Top].is_close_to(Plane::new(Vec3::new(0.0, -half_sqrt2, half_sqrt2), 0.0), EPS));
        assert!(frustum[FrustumPlane::Near].is_close_to(Plane::new(Vec3::new(0.0, 0.0, 1.0), -1.0), EPS));
        assert!(frustum[FrustumPlane::Far].is_close_to(Plane::new(Vec3::new(0.0, 0.0, -1.0), 10.0), EPS));

        for plane in FrustumPlane::ALL {
            assert_eq!(frustum.plane(plane), frustum[plane]);
            assert!(frustum[plane].normal.is_close_to_normalized(EPS));
        }
    }

    #[test]
    fn contains_point() {
        let frustum = frustum();
        assert!(frustum.contains_point(Vec3::new(0.0, 0.0, 5.0)));
        assert!(frustum.contains_point(Vec3::new(4.0, -4.0, 5.0)));
        assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, 0.5)));
        assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, 11.0)));
        assert!(!frustum.contains_point(Vec3::new(6.0, 0.0, 5.0)));
        assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, -5.0)));
    }

    #[test]
    fn culling() {
        let frustum = frustum();

        assert!(frustum.intersects_sphere(Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0)));
        assert!(frustum.intersects_sphere(Sphere::new(Vec3::new(6.0, 0.0, 5.0), 1.0)));
        assert!(!frustum.intersects_sphere(Sphere::new(Vec3::new(8.0, 0.0, 5.0), 1.0)));
        assert!(!frustum.intersects_sphere(Sphere::new(Vec3::new(0.0, 0.0, 12.0), 1.0)));

        let aabb = |min: [f32; 3], max: [f32; 3]| AABB::new(Vec3::from_array(min), Vec3::from_array(max));
        assert!(frustum.intersects_aabb(aabb([-1.0, -1.0, 4.0], [1.0, 1.0, 6.0])));
        assert!(frustum.intersects_aabb(aabb([5.5, -0.5, 4.0], [6.5, 0.5, 6.0])));
        assert!(frustum.intersects_aabb(aabb([-20.0, -20.0, 2.0], [20.0, 20.0, 30.0])));
        assert!(!frustum.intersects_aabb(aabb([7.0, -0.5, 4.0], [8.0, 0.5, 5.0])));
        assert!(!frustum.intersects_aabb(aabb([-1.0, -1.0, -4.0], [1.0, 1.0, -2.0])));
    }

    #[test]
    fn view_frustum() {
        let eye = Vec3::new(10.0f32, 0.0, 0.0);
        let view = Mat4::look_at(eye, Vec3::zero(), Vec3::unit_y());
        let proj = Mat4::perspective(Radians(core::f32::consts::FRAC_PI_3), 16.0 / 9.0, 0.1, 100.0);
        let frustum = Frustum::from_matrix(&(proj * view));

        assert!(frustum.contains_point(Vec3::zero()));
        assert!(!frustum.contains_point(Vec3::new(20.0, 0.0, 0.0)));
        assert!(frustum.intersects_sphere(Sphere::new(Vec3::new(0.0, 3.0, 0.0), 0.5)));
        assert!(!frustum.intersects_sphere(Sphere::new(Vec3::new(0.0, 0.0, 50.0), 1.0)));
    }
}
