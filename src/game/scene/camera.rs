use glam::{Mat4, Vec3};

/// Arc-rotate camera: orbits a target point on a sphere parameterized
/// by alpha (longitude), beta (colatitude from +y) and radius.
pub struct OrbitCamera {
    pub alpha: f32,
    pub beta: f32,
    pub radius: f32,
    pub target: Vec3,
}

const MIN_BETA: f32 = 0.05;
const MIN_RADIUS: f32 = 20.0;

impl OrbitCamera {
    pub fn new() -> Self {
        Self {
            alpha: std::f32::consts::PI,
            beta: 2.0 * std::f32::consts::PI / 6.0,
            radius: 250.0,
            target: Vec3::new(160.0, -40.0, 160.0),
        }
    }

    pub fn eye(&self) -> Vec3 {
        let (sa, ca) = self.alpha.sin_cos();
        let (sb, cb) = self.beta.sin_cos();
        self.target + self.radius * Vec3::new(ca * sb, cb, sa * sb)
    }

    pub fn rotate(&mut self, delta_alpha: f32, delta_beta: f32) {
        self.alpha += delta_alpha;
        self.beta = (self.beta + delta_beta).clamp(MIN_BETA, std::f32::consts::PI - MIN_BETA);
    }

    pub fn zoom(&mut self, delta: f32) {
        self.radius = (self.radius + delta).max(MIN_RADIUS);
    }

    pub fn view_proj(&self, aspect: f32) -> [[f32; 4]; 4] {
        self.view_proj_mat(aspect).to_cols_array_2d()
    }

    pub fn view_proj_mat(&self, aspect: f32) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye(), self.target, Vec3::Y);
        let proj = Mat4::perspective_rh_gl(45.0_f32.to_radians(), aspect, 0.1, 2000.0);
        proj * view
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pose_matches_the_scene_setup() {
        let camera = OrbitCamera::new();
        assert_eq!(camera.alpha, std::f32::consts::PI);
        assert_eq!(camera.radius, 250.0);
        assert_eq!(camera.target, Vec3::new(160.0, -40.0, 160.0));

        // beta = pi/3 puts the eye 125 above the target
        let eye = camera.eye();
        assert!((eye.y - 85.0).abs() < 1e-3);
        assert!((eye.x - (160.0 - 250.0 * (std::f32::consts::PI / 3.0).sin())).abs() < 1e-2);
        assert!((eye.z - 160.0).abs() < 1e-2);
    }

    #[test]
    fn beta_clamps_away_from_poles() {
        let mut camera = OrbitCamera::new();
        camera.rotate(0.0, -100.0);
        assert_eq!(camera.beta, MIN_BETA);
        camera.rotate(0.0, 100.0);
        assert_eq!(camera.beta, std::f32::consts::PI - MIN_BETA);
    }

    #[test]
    fn zoom_clamps_to_minimum_radius() {
        let mut camera = OrbitCamera::new();
        camera.zoom(-1000.0);
        assert_eq!(camera.radius, MIN_RADIUS);
        camera.zoom(30.0);
        assert_eq!(camera.radius, 50.0);
    }

    #[test]
    fn view_proj_is_finite() {
        let camera = OrbitCamera::new();
        let m = camera.view_proj(16.0 / 9.0);
        for col in m {
            for v in col {
                assert!(v.is_finite());
            }
        }
    }
}
