pub mod app;
pub mod build;
pub mod camera;

pub use app::App;
pub use build::Scene;
pub use camera::OrbitCamera;
