//! Engine module containing graphics and input handling.

pub mod graphics;
pub mod input;

// Re-export commonly used types
pub use graphics::{renderer::Renderer, texture::Texture, vertex::Vertex};
