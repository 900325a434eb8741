use wgpu::util::DeviceExt;

use crate::engine::graphics::vertex::Vertex;

/// CPU-side mesh data, uploaded once via [`Mesh::upload`].
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

/// GPU vertex/index buffer pair.
pub struct Mesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

impl Mesh {
    pub fn upload(device: &wgpu::Device, data: &MeshData, label: &str) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&data.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&data.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: data.indices.len() as u32,
        }
    }
}

// Each face: (normal, 4 corner positions in unit-cube space)
const BOX_FACES: [([f32; 3], [[f32; 3]; 4]); 6] = [
    // Front (+z)
    ([0.0, 0.0, 1.0], [
        [-0.5, -0.5, 0.5], [0.5, -0.5, 0.5], [0.5, 0.5, 0.5], [-0.5, 0.5, 0.5],
    ]),
    // Back (-z)
    ([0.0, 0.0, -1.0], [
        [0.5, -0.5, -0.5], [-0.5, -0.5, -0.5], [-0.5, 0.5, -0.5], [0.5, 0.5, -0.5],
    ]),
    // Left (-x)
    ([-1.0, 0.0, 0.0], [
        [-0.5, -0.5, -0.5], [-0.5, -0.5, 0.5], [-0.5, 0.5, 0.5], [-0.5, 0.5, -0.5],
    ]),
    // Right (+x)
    ([1.0, 0.0, 0.0], [
        [0.5, -0.5, 0.5], [0.5, -0.5, -0.5], [0.5, 0.5, -0.5], [0.5, 0.5, 0.5],
    ]),
    // Top (+y)
    ([0.0, 1.0, 0.0], [
        [-0.5, 0.5, 0.5], [0.5, 0.5, 0.5], [0.5, 0.5, -0.5], [-0.5, 0.5, -0.5],
    ]),
    // Bottom (-y)
    ([0.0, -1.0, 0.0], [
        [-0.5, -0.5, -0.5], [0.5, -0.5, -0.5], [0.5, -0.5, 0.5], [-0.5, -0.5, 0.5],
    ]),
];

const FACE_UVS: [[f32; 2]; 4] = [
    [0.0, 1.0], // bottom-left
    [1.0, 1.0], // bottom-right
    [1.0, 0.0], // top-right
    [0.0, 0.0], // top-left
];

/// Axis-aligned box centered at the origin, outward-facing.
pub fn box_mesh(width: f32, height: f32, depth: f32) -> MeshData {
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, corners) in BOX_FACES.iter() {
        let base = vertices.len() as u16;
        for (i, corner) in corners.iter().enumerate() {
            vertices.push(Vertex {
                position: [corner[0] * width, corner[1] * height, corner[2] * depth],
                normal: *normal,
                tex_coords: FACE_UVS[i],
            });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    MeshData { vertices, indices }
}

/// Box with faces turned inward, for the skybox.
pub fn inward_box(size: f32) -> MeshData {
    let mut data = box_mesh(size, size, size);
    for v in &mut data.vertices {
        v.normal = [-v.normal[0], -v.normal[1], -v.normal[2]];
    }
    // Reverse winding so the inside faces the camera
    for tri in data.indices.chunks_exact_mut(3) {
        tri.swap(1, 2);
    }
    data
}

/// Flat XZ plane centered at the origin with `uv_scale` texture repeats.
pub fn plane(size: f32, uv_scale: f32) -> MeshData {
    let h = size * 0.5;
    let vertices = vec![
        Vertex { position: [-h, 0.0, -h], normal: [0.0, 1.0, 0.0], tex_coords: [0.0, 0.0] },
        Vertex { position: [h, 0.0, -h], normal: [0.0, 1.0, 0.0], tex_coords: [uv_scale, 0.0] },
        Vertex { position: [h, 0.0, h], normal: [0.0, 1.0, 0.0], tex_coords: [uv_scale, uv_scale] },
        Vertex { position: [-h, 0.0, h], normal: [0.0, 1.0, 0.0], tex_coords: [0.0, uv_scale] },
    ];
    let indices = vec![0, 2, 1, 0, 3, 2];
    MeshData { vertices, indices }
}

/// UV sphere with `segments` stacks and slices.
pub fn uv_sphere(segments: u32, diameter: f32) -> MeshData {
    let radius = diameter * 0.5;
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for stack in 0..=segments {
        let phi = std::f32::consts::PI * stack as f32 / segments as f32;
        let (sp, cp) = phi.sin_cos();
        for slice in 0..=segments {
            let theta = std::f32::consts::TAU * slice as f32 / segments as f32;
            let (st, ct) = theta.sin_cos();
            let normal = [sp * ct, cp, sp * st];
            vertices.push(Vertex {
                position: [normal[0] * radius, normal[1] * radius, normal[2] * radius],
                normal,
                tex_coords: [
                    slice as f32 / segments as f32,
                    stack as f32 / segments as f32,
                ],
            });
        }
    }

    let stride = segments + 1;
    for stack in 0..segments {
        for slice in 0..segments {
            let a = (stack * stride + slice) as u16;
            let b = a + 1;
            let c = a + stride as u16;
            let d = c + 1;
            indices.extend_from_slice(&[a, c, b, b, c, d]);
        }
    }

    MeshData { vertices, indices }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_has_six_faces() {
        let data = box_mesh(20.0, 0.1, 20.0);
        assert_eq!(data.vertices.len(), 24);
        assert_eq!(data.indices.len(), 36);
        // Extents match the requested dimensions
        let max_x = data.vertices.iter().map(|v| v.position[0]).fold(f32::MIN, f32::max);
        let max_y = data.vertices.iter().map(|v| v.position[1]).fold(f32::MIN, f32::max);
        assert_eq!(max_x, 10.0);
        assert_eq!(max_y, 0.05);
    }

    #[test]
    fn inward_box_flips_normals() {
        let outward = box_mesh(1.0, 1.0, 1.0);
        let inward = inward_box(1.0);
        for (o, i) in outward.vertices.iter().zip(&inward.vertices) {
            assert_eq!(o.normal[1], -i.normal[1]);
        }
        assert_eq!(inward.indices.len(), 36);
    }

    #[test]
    fn plane_tiles_uvs() {
        let data = plane(512.0, 4.0);
        assert_eq!(data.vertices.len(), 4);
        assert_eq!(data.indices.len(), 6);
        assert!(data.vertices.iter().any(|v| v.tex_coords == [4.0, 4.0]));
        assert!(data.vertices.iter().all(|v| v.normal == [0.0, 1.0, 0.0]));
    }

    #[test]
    fn sphere_is_unit_normalized() {
        let segments = 20;
        let data = uv_sphere(segments, 10.0);
        assert_eq!(data.vertices.len(), ((segments + 1) * (segments + 1)) as usize);
        assert_eq!(data.indices.len(), (segments * segments * 6) as usize);
        for v in &data.vertices {
            let n = glam::Vec3::from_array(v.normal);
            assert!((n.length() - 1.0).abs() < 1e-4);
            let p = glam::Vec3::from_array(v.position);
            assert!((p.length() - 5.0).abs() < 1e-3);
        }
    }
}
