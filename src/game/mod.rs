//! Game-specific logic: the map grid, the creeps, and the scene.

pub mod creep;
pub mod map;
pub mod scene;
pub mod state;

// Re-export commonly used types
pub use scene::{app::App, camera::OrbitCamera, Scene};
pub use map::TileMap;
