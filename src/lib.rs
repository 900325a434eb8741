//! Library entry point for the tower-defense scene viewer.

pub mod engine;
pub mod game;

// Re-export main types for convenience
pub use game::App;
