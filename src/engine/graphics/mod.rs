pub mod mesh;
pub mod renderer;
pub mod texture;
pub mod vertex;

pub use mesh::Mesh;
pub use renderer::Renderer;
pub use texture::Texture;
pub use vertex::Vertex;
