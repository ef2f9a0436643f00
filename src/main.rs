use vela_common::prelude::*;
use vela_logging::{log_error, log_info, log_verbose, log_warning, LogCategory, LogLevel, LoggerConfig};
use vela_math::*;
use vela_simd::{has_intrin, BackendType, Mat4A, DEF_BACKEND_TYPE};

pub const LOG_CAT : LogCategory = LogCategory::new("Main");

const GRID_SIZE : i32 = 8;
const GRID_SPACING : f32 = 4.0;

struct Camera {
    eye    : f32v3,
    target : f32v3,
    fov_y  : Degrees<f32>,
    aspect : f32,
    z_near : f32,
    z_far  : f32,
}

impl Camera {
    fn view(&self) -> f32m4 {
        Mat4::look_at(self.eye, self.target, Vec3::unit_y())
    }

    fn projection(&self) -> f32m4 {
        Mat4::perspective(self.fov_y.to_radians(), self.aspect, self.z_near, self.z_far)
    }

    fn view_projection(&self) -> f32m4 {
        self.projection() * self.view()
    }

    fn center_ray(&self) -> Ray<f32> {
        Ray::between(self.eye, self.target)
    }
}

struct Object {
    model  : f32m4,
    bounds : AABB<f32>,
}

/// Grid of unit cubes on the xz-plane, each spun around its own vertical axis
fn build_scene() -> Vec<Object> {
    let local_bounds = AABB::new(Vec3::new(-0.5, -0.5, -0.5), Vec3::new(0.5, 0.5, 0.5));

    let mut objects = Vec::new();
    for x in -GRID_SIZE..GRID_SIZE {
        for z in -GRID_SIZE..GRID_SIZE {
            let spin = Quat::from_axis_angle(Vec3::unit_y(), Radians((x * z) as f32 * 0.1));
            let model = Mat4::translation(x as f32 * GRID_SPACING, 0.0, z as f32 * GRID_SPACING) * spin.to_matrix4();
            objects.push(Object { model, bounds: local_bounds.transform(&model) });
        }
    }
    objects
}

fn main() {
    let config = LoggerConfig { level: LogLevel::Info, ..LoggerConfig::default() };
    if let Err(err) = vela_logging::init(&config) {
        eprintln!("Failed to initialize the logger: {err}");
    }

    log_info!(LOG_CAT, "SIMD backend: {DEF_BACKEND_TYPE} (AVX available at runtime: {})", has_intrin(BackendType::AVX));

    let camera = Camera {
        eye: Vec3::new(0.0, 6.0, -20.0),
        target: Vec3::new(0.0, 0.0, 0.0),
        fov_y: Degrees(60.0),
        aspect: 16.0 / 9.0,
        z_near: 0.1,
        z_far: 60.0,
    };

    let view_proj = camera.view_projection();
    let frustum = Frustum::from_matrix(&view_proj);
    let objects = build_scene();

    let visible : Vec<&Object> = objects.iter()
        .filter(|obj| frustum.intersects_aabb(obj.bounds))
        .collect();
    let visible_spheres = objects.iter()
        .filter(|obj| frustum.intersects_sphere(Sphere::from_aabb(obj.bounds)))
        .count();
    log_info!(LOG_CAT, "{} of {} objects visible ({visible_spheres} using bounding spheres)", visible.len(), objects.len());

    // Upload buffer of model-view-projection matrices, calculated with the accelerated kernel
    let view_proj_a = Mat4A::from(view_proj);
    let mut mvps = AlignedArray::<Mat4A>::with_capacity(visible.len());
    mvps.extend(visible.iter().map(|obj| view_proj_a * Mat4A::from(obj.model)));

    let max_error = visible.iter().zip(mvps.iter())
        .flat_map(|(obj, mvp)| {
            let scalar = view_proj * obj.model;
            let simd = Mat4::from(*mvp);
            scalar.as_slice().iter().zip(simd.as_slice()).map(|(a, b)| (a - b).abs()).collect::<Vec<_>>()
        })
        .fold(0.0f32, f32::max);
    log_verbose!(LOG_CAT, "Largest difference between the scalar and SIMD kernels: {max_error}");
    if max_error > 1e-4 {
        log_warning!(LOG_CAT, "Scalar and SIMD kernels disagree by {max_error}");
    }

    match Mat4A::from(view_proj).try_inverse(1e-12) {
        Ok(inv_view_proj) => {
            let near_center = inv_view_proj * vela_simd::Vec4A::new(0.0, 0.0, 0.0, 1.0);
            let near_center = near_center * near_center.w().recip();
            log_info!(LOG_CAT, "Center of the near plane in world space: {near_center}");
        },
        Err(err) => log_error!(LOG_CAT, "Failed to invert the view-projection matrix: {err}"),
    }

    let ray = camera.center_ray();
    let hit = objects.iter()
        .enumerate()
        .filter_map(|(idx, obj)| obj.bounds.intersect_ray(ray).map(|dist| (idx, dist)))
        .min_by(|(_, a), (_, b)| a.total_cmp(b));
    match hit {
        Some((idx, dist)) => log_info!(LOG_CAT, "Camera ray hits object {idx} at {}", ray.point_at(dist)),
        None => log_info!(LOG_CAT, "Camera ray does not hit any object"),
    }

    let ground = Plane::from_point_normal(Vec3::zero(), Vec3::unit_y());
    if let Some(point) = ground.find_intersection(ray, 1e-6) {
        log_info!(LOG_CAT, "Camera ray hits the ground at {point}");
    }
}
