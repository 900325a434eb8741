use wgpu;

/// Instance is drawn without the hemispheric lighting term (skybox).
pub const INSTANCE_UNLIT: u32 = 1;
/// Instance is blended at a fixed alpha (water plane).
pub const INSTANCE_TRANSLUCENT: u32 = 1 << 1;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coords: [f32; 2],
}

impl Vertex {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: &[wgpu::VertexAttribute] = &[
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            },
            wgpu::VertexAttribute {
                offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x3,
            },
            wgpu::VertexAttribute {
                offset: (std::mem::size_of::<[f32; 3]>() * 2) as wgpu::BufferAddress,
                shader_location: 2,
                format: wgpu::VertexFormat::Float32x2,
            },
        ];

        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: ATTRIBUTES,
        }
    }
}

/// Per-instance data: a model matrix, the texture array layer to
/// sample, and shading flags.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshInstance {
    pub model: [[f32; 4]; 4],
    pub texture_layer: u32,
    pub flags: u32,
}

impl MeshInstance {
    pub fn new(model: glam::Mat4, texture_layer: u32, flags: u32) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            texture_layer,
            flags,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        const VEC4: usize = std::mem::size_of::<[f32; 4]>();
        const ATTRIBUTES: &[wgpu::VertexAttribute] = &[
            // Model matrix columns
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 3,
                format: wgpu::VertexFormat::Float32x4,
            },
            wgpu::VertexAttribute {
                offset: VEC4 as wgpu::BufferAddress,
                shader_location: 4,
                format: wgpu::VertexFormat::Float32x4,
            },
            wgpu::VertexAttribute {
                offset: (VEC4 * 2) as wgpu::BufferAddress,
                shader_location: 5,
                format: wgpu::VertexFormat::Float32x4,
            },
            wgpu::VertexAttribute {
                offset: (VEC4 * 3) as wgpu::BufferAddress,
                shader_location: 6,
                format: wgpu::VertexFormat::Float32x4,
            },
            wgpu::VertexAttribute {
                offset: (VEC4 * 4) as wgpu::BufferAddress,
                shader_location: 7,
                format: wgpu::VertexFormat::Uint32,
            },
            wgpu::VertexAttribute {
                offset: (VEC4 * 4 + std::mem::size_of::<u32>()) as wgpu::BufferAddress,
                shader_location: 8,
                format: wgpu::VertexFormat::Uint32,
            },
        ];

        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: ATTRIBUTES,
        }
    }
}

/// Vertex for the track overlay line strips.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl LineVertex {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: &[wgpu::VertexAttribute] = &[
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            },
            wgpu::VertexAttribute {
                offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x3,
            },
        ];

        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: ATTRIBUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layouts_are_tightly_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 32);
        assert_eq!(std::mem::size_of::<MeshInstance>(), 72);
        assert_eq!(std::mem::size_of::<LineVertex>(), 24);
    }

    #[test]
    fn instance_carries_model_matrix() {
        let m = glam::Mat4::from_translation(glam::Vec3::new(20.0, 3.0, 40.0));
        let inst = MeshInstance::new(m, 2, 0);
        assert_eq!(inst.model[3][0], 20.0);
        assert_eq!(inst.model[3][1], 3.0);
        assert_eq!(inst.model[3][2], 40.0);
        assert_eq!(inst.texture_layer, 2);
    }
}
