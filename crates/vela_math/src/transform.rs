//! Transformation matrix factories.
//!
//! Matrices transform column vectors (`m * v`), so a translation is stored in the last column and `a * b` applies `b` first.
//! Projections map view space with +z pointing forward (into the screen).

use crate::*;

#[cfg(feature = "validation")]
use vela_logging::{log_warning, LogCategory};

#[cfg(feature = "validation")]
const LOG_CAT : LogCategory = LogCategory::new_with_sub("Math", "Transform");

#[cfg(feature = "validation")]
fn validate_axis<T: Real>(axis: Vec3<T>) {
    if !axis.is_close_to_normalized(T::from_f32(1e-4)) {
        log_warning!(LOG_CAT, "rotation axis {:?} is not normalized, the resulting matrix will not be a pure rotation", axis.to_array());
    }
}

impl<T: Real> Mat3<T> {
    /// Create a scale matrix
    #[inline]
    #[must_use]
    pub fn scaling(x: T, y: T, z: T) -> Self {
        Self::from_diagonal(Vec3::new(x, y, z))
    }

    /// Create a rotation matrix around the x-axis
    #[must_use]
    pub fn rotation_x(angle: Radians<T>) -> Self {
        let zero = T::zero();
        let one = T::one();
        let (sin, cos) = angle.sin_cos();

        Self::from_rows([[one , zero,  zero],
                         [zero, cos , -sin ],
                         [zero, sin ,  cos ]])
    }

    /// Create a rotation matrix around the y-axis
    #[must_use]
    pub fn rotation_y(angle: Radians<T>) -> Self {
        let zero = T::zero();
        let one = T::one();
        let (sin, cos) = angle.sin_cos();

        Self::from_rows([[ cos , zero, sin ],
                         [ zero, one , zero],
                         [-sin , zero, cos ]])
    }

    /// Create a rotation matrix around the z-axis
    #[must_use]
    pub fn rotation_z(angle: Radians<T>) -> Self {
        let zero = T::zero();
        let one = T::one();
        let (sin, cos) = angle.sin_cos();

        Self::from_rows([[cos , -sin , zero],
                         [sin ,  cos , zero],
                         [zero,  zero, one ]])
    }

    /// Create a rotation matrix around an arbitrary axis (Rodrigues' rotation formula).
    ///
    /// The axis is expected to be normalized.
    #[must_use]
    pub fn rotation(angle: Radians<T>, axis: Vec3<T>) -> Self {
        #[cfg(feature = "validation")]
        validate_axis(axis);

        let (sin, cos) = angle.sin_cos();
        let one_min_cos = T::one() - cos;
        let (x, y, z) = (axis.x(), axis.y(), axis.z());

        Self::from_rows([
            [cos + x * x * one_min_cos    , x * y * one_min_cos - z * sin, x * z * one_min_cos + y * sin],
            [y * x * one_min_cos + z * sin, cos + y * y * one_min_cos    , y * z * one_min_cos - x * sin],
            [z * x * one_min_cos - y * sin, z * y * one_min_cos + x * sin, cos + z * z * one_min_cos    ],
        ])
    }

    /// Check if the matrix is orthonormal, i.e. `m * m^T == I`, given an `epsilon`
    #[inline]
    #[must_use]
    pub fn is_orthonormal(&self, epsilon: T) -> bool {
        (*self * self.transpose()).is_close_to_identity(epsilon)
    }
}

impl<T: Real> Mat4<T> {
    /// Create a 4x4 matrix with `mat` in the upper-left corner
    #[must_use]
    pub fn from_mat3(mat: Mat3<T>) -> Self {
        let zero = T::zero();
        let one = T::one();
        Self::from_fn(|row, column| match (row, column) {
            (3, 3) => one,
            (3, _) | (_, 3) => zero,
            _ => mat[(row, column)],
        })
    }

    /// Get the upper-left 3x3 matrix
    #[inline]
    #[must_use]
    pub fn to_mat3(&self) -> Mat3<T> {
        Mat3::from_fn(|row, column| self[(row, column)])
    }

    /// Create a translation matrix
    #[must_use]
    pub fn translation(x: T, y: T, z: T) -> Self {
        let mut res = Self::identity();
        res.set_column(3, Vec4::new(x, y, z, T::one()));
        res
    }

    /// Create a scale matrix
    #[inline]
    #[must_use]
    pub fn scaling(x: T, y: T, z: T) -> Self {
        Self::from_diagonal(Vec4::new(x, y, z, T::one()))
    }

    /// Create a rotation matrix around the x-axis
    #[inline]
    #[must_use]
    pub fn rotation_x(angle: Radians<T>) -> Self {
        Self::from_mat3(Mat3::rotation_x(angle))
    }

    /// Create a rotation matrix around the y-axis
    #[inline]
    #[must_use]
    pub fn rotation_y(angle: Radians<T>) -> Self {
        Self::from_mat3(Mat3::rotation_y(angle))
    }

    /// Create a rotation matrix around the z-axis
    #[inline]
    #[must_use]
    pub fn rotation_z(angle: Radians<T>) -> Self {
        Self::from_mat3(Mat3::rotation_z(angle))
    }

    /// Create a rotation matrix around an arbitrary, normalized, axis
    #[inline]
    #[must_use]
    pub fn rotation(angle: Radians<T>, axis: Vec3<T>) -> Self {
        Self::from_mat3(Mat3::rotation(angle, axis))
    }

    /// Create an orthographic projection matrix, mapping `[left, right] x [bottom, top] x [near, far]` to `[-1, 1]^3`
    #[must_use]
    pub fn ortho(left: T, right: T, bottom: T, top: T, near: T, far: T) -> Self {
        let zero = T::zero();
        let one = T::one();
        let two = T::from_i32(2);

        let width = right - left;
        let height = top - bottom;
        let depth = far - near;

        Self::from_rows([[two / width, zero        , zero       , -(right + left) / width ],
                         [zero       , two / height, zero       , -(top + bottom) / height],
                         [zero       , zero        , two / depth, -(far + near) / depth   ],
                         [zero       , zero        , zero       , one                     ]])
    }

    /// Create a perspective projection matrix.
    ///
    /// Points at a view-space depth of `z_near` map to a normalized depth of 0, at `z_far` they map to 1.
    #[must_use]
    pub fn perspective(fov_y: Radians<T>, aspect: T, z_near: T, z_far: T) -> Self {
        let zero = T::zero();
        let one = T::one();

        let focal = (fov_y / T::from_i32(2)).tan().rcp();
        let depth = z_far - z_near;

        Self::from_rows([[focal / aspect, zero , zero          , zero                     ],
                         [zero          , focal, zero          , zero                     ],
                         [zero          , zero , z_far / depth , -z_near * z_far / depth  ],
                         [zero          , zero , one           , zero                     ]])
    }

    /// Create a view matrix for a camera at `eye`, looking in direction `dir`
    #[must_use]
    pub fn look_to(eye: Vec3<T>, dir: Vec3<T>, up: Vec3<T>) -> Self {
        let forward = dir.normalize();
        let right = up.cross(forward).normalize();
        let up = forward.cross(right);

        let zero = T::zero();
        let one = T::one();
        Self::from_rows([[right.x()  , right.y()  , right.z()  , -right.dot(eye)  ],
                         [up.x()     , up.y()     , up.z()     , -up.dot(eye)     ],
                         [forward.x(), forward.y(), forward.z(), -forward.dot(eye)],
                         [zero       , zero       , zero       , one              ]])
    }

    /// Create a view matrix for a camera at `eye`, looking at `target`
    #[inline]
    #[must_use]
    pub fn look_at(eye: Vec3<T>, target: Vec3<T>, up: Vec3<T>) -> Self {
        Self::look_to(eye, target - eye, up)
    }

    /// Get the translation stored in the matrix
    #[inline]
    #[must_use]
    pub fn get_translation(&self) -> Vec3<T> {
        self.column(3).truncate()
    }

    /// Transform a point, i.e. a vector with an implicit w of 1, without the perspective divide
    #[inline]
    #[must_use]
    pub fn transform_point(&self, point: Vec3<T>) -> Vec3<T> {
        (*self * point.extend(T::one())).truncate()
    }

    /// Transform a direction, i.e. a vector with an implicit w of 0, translation is ignored
    #[inline]
    #[must_use]
    pub fn transform_vector(&self, vector: Vec3<T>) -> Vec3<T> {
        (*self * vector.extend(T::zero())).truncate()
    }

    /// Transform a point and apply the perspective divide
    #[inline]
    #[must_use]
    pub fn project_point(&self, point: Vec3<T>) -> Vec3<T> {
        let res = *self * point.extend(T::one());
        res.truncate() / res.w()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS : f32 = 1e-5;

    #[test]
    fn translation_and_scaling() {
        let p = Vec3::new(1.0f32, 2.0, 3.0);
        let t = Mat4::translation(1.0, -1.0, 0.5);
        assert_eq!(t.transform_point(p), Vec3::new(2.0, 1.0, 3.5));
        assert_eq!(t.transform_vector(p), p);
        assert_eq!(t.get_translation(), Vec3::new(1.0, -1.0, 0.5));

        let s = Mat4::scaling(2.0, 3.0, 4.0);
        assert_eq!(s.transform_point(p), Vec3::new(2.0, 6.0, 12.0));
        assert_eq!((t * s).transform_point(p), Vec3::new(3.0, 5.0, 12.5));
    }

    #[test]
    fn axis_rotations() {
        let quarter = Radians(core::f32::consts::FRAC_PI_2);
        assert!((Mat3::rotation_x(quarter) * Vec3::unit_y()).is_close_to(Vec3::unit_z(), EPS));
        assert!((Mat3::rotation_y(quarter) * Vec3::unit_z()).is_close_to(Vec3::unit_x(), EPS));
        assert!((Mat3::rotation_z(quarter) * Vec3::unit_x()).is_close_to(Vec3::unit_y(), EPS));
        assert!(Mat4::rotation_z(quarter).transform_point(Vec3::unit_x()).is_close_to(Vec3::unit_y(), EPS));
    }

    #[test]
    fn rodrigues_matches_axis_rotations() {
        let angle = Radians(0.7f32);
        assert!(Mat3::rotation(angle, Vec3::unit_x()).is_close_to(Mat3::rotation_x(angle), EPS));
        assert!(Mat3::rotation(angle, Vec3::unit_y()).is_close_to(Mat3::rotation_y(angle), EPS));
        assert!(Mat3::rotation(angle, Vec3::unit_z()).is_close_to(Mat3::rotation_z(angle), EPS));

        let axis = Vec3::new(1.0f32, 2.0, -0.5).normalize();
        let rot = Mat3::rotation(Radians(1.3), axis);
        assert!(rot.is_orthonormal(EPS));
        assert!(rot.determinant().is_close_to(1.0, EPS));
        assert!((rot * axis).is_close_to(axis, EPS));
    }

    #[test]
    fn ortho_of_unit_cube_is_identity() {
        assert_eq!(Mat4::ortho(-1.0f32, 1.0, -1.0, 1.0, -1.0, 1.0), Mat4::identity());

        let ortho = Mat4::ortho(0.0f32, 800.0, 0.0, 600.0, 0.1, 100.0);
        assert!(ortho.transform_point(Vec3::new(0.0, 0.0, 0.1)).is_close_to(Vec3::new(-1.0, -1.0, -1.0), EPS));
        assert!(ortho.transform_point(Vec3::new(800.0, 600.0, 100.0)).is_close_to(Vec3::new(1.0, 1.0, 1.0), EPS));
    }

    #[test]
    fn perspective_depth_range() {
        let proj = Mat4::perspective(Radians(core::f32::consts::FRAC_PI_2), 1.0, 1.0, 10.0);
        assert!(proj.project_point(Vec3::new(0.0, 0.0, 1.0)).z().is_close_to(0.0, EPS));
        assert!(proj.project_point(Vec3::new(0.0, 0.0, 10.0)).z().is_close_to(1.0, EPS));

        // fov of 90 degrees: the frustum edge at depth 1 lands on the edge of NDC
        assert!(proj.project_point(Vec3::new(1.0, -1.0, 1.0)).is_close_to(Vec3::new(1.0, -1.0, 0.0), EPS));

        // points behind the camera end up outside of the depth range
        let behind = proj.project_point(Vec3::new(0.0, 0.0, -1.0)).z();
        assert!(!(0.0..=1.0).contains(&behind));
    }

    #[test]
    fn look_at() {
        let view = Mat4::look_at(Vec3::zero(), Vec3::new(0.0f32, 0.0, 5.0), Vec3::unit_y());
        assert!(view.is_close_to_identity(EPS));

        let eye = Vec3::new(3.0f32, 1.0, -2.0);
        let target = Vec3::new(-1.0f32, 0.5, 4.0);
        let view = Mat4::look_at(eye, target, Vec3::unit_y());
        assert!(view.transform_point(eye).is_close_to(Vec3::zero(), EPS));

        let in_view = view.transform_point(target);
        assert!(in_view.x().is_close_to(0.0, EPS));
        assert!(in_view.y().is_close_to(0.0, EPS));
        assert!(in_view.z().is_close_to(eye.dist(target), 1e-4));
    }
}
