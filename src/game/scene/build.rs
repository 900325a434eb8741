//! One-time scene assembly: skybox, ground, water, the instanced tile
//! grid, the creep spheres, and the track overlays.

use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;

use crate::engine::graphics::mesh::{self, Mesh};
use crate::engine::graphics::vertex::{
    LineVertex, MeshInstance, INSTANCE_TRANSLUCENT, INSTANCE_UNLIT,
};
use crate::game::creep::{self, Creep, CREEP_DIAMETER, CREEP_SEGMENTS};
use crate::game::map::{TileKind, TileMap, TILE_PITCH, TILE_THICKNESS};

/// Texture array layer assignments, in asset-path order.
pub mod layer {
    pub const TILE_BASE: u32 = 0;
    pub const TILE_DARK: u32 = 1;
    pub const TILE_GRASS: u32 = 2;
    pub const TILE_TREE: u32 = 3;
    pub const SAND: u32 = 4;
    pub const WATER: u32 = 5;
    pub const SKY: u32 = 6;
    pub const WOOD: u32 = 7;
    pub const COUNT: usize = 8;
}

pub fn tile_layer(kind: TileKind) -> u32 {
    match kind {
        TileKind::Base => layer::TILE_BASE,
        TileKind::Dark => layer::TILE_DARK,
        TileKind::Grass => layer::TILE_GRASS,
        TileKind::Tree => layer::TILE_TREE,
    }
}

const GROUND_SIZE: f32 = 512.0;
const GROUND_UV_SCALE: f32 = 4.0;
const GROUND_Y: f32 = -1.0;
const WORLD_OFFSET: f32 = 192.0;
const SKYBOX_SIZE: f32 = 1000.0;
const TRACK_COLOR: [f32; 3] = [0.0, 0.0, 0.0];

/// A mesh plus the instances drawn with it.
pub struct DrawBatch {
    pub mesh: Mesh,
    pub instances: Vec<MeshInstance>,
}

/// An uploaded track overlay line strip.
pub struct Track {
    pub vertex_buffer: wgpu::Buffer,
    pub vertex_count: u32,
}

impl Track {
    fn upload(device: &wgpu::Device, points: &[Vec3], color: [f32; 3]) -> Self {
        let vertices: Vec<LineVertex> = points
            .iter()
            .map(|p| LineVertex { position: p.to_array(), color })
            .collect();
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Track Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        Self {
            vertex_buffer,
            vertex_count: vertices.len() as u32,
        }
    }
}

/// Everything the renderer draws each frame.
pub struct Scene {
    /// Opaque batches in draw order: skybox, ground, tiles.
    pub batches: Vec<DrawBatch>,
    /// Translucent water plane, drawn after everything opaque.
    pub water: DrawBatch,
    pub creep_mesh: Mesh,
    pub creeps: Vec<Creep>,
    pub tracks: Vec<Track>,
}

/// One instance per non-empty map cell on the tile lattice.
pub fn tile_instances(map: &TileMap) -> Vec<MeshInstance> {
    map.placements()
        .map(|p| {
            MeshInstance::new(
                Mat4::from_translation(p.position()),
                tile_layer(p.kind),
                0,
            )
        })
        .collect()
}

pub fn creep_instances(creeps: &[Creep]) -> Vec<MeshInstance> {
    creeps
        .iter()
        .map(|c| MeshInstance::new(Mat4::from_translation(c.position), layer::WOOD, 0))
        .collect()
}

impl Scene {
    pub fn build(device: &wgpu::Device, map: &TileMap) -> Self {
        let skybox = DrawBatch {
            mesh: Mesh::upload(device, &mesh::inward_box(SKYBOX_SIZE), "Skybox Mesh"),
            instances: vec![MeshInstance::new(Mat4::IDENTITY, layer::SKY, INSTANCE_UNLIT)],
        };

        let ground = DrawBatch {
            mesh: Mesh::upload(device, &mesh::plane(GROUND_SIZE, GROUND_UV_SCALE), "Ground Mesh"),
            instances: vec![MeshInstance::new(
                Mat4::from_translation(Vec3::new(WORLD_OFFSET, GROUND_Y, WORLD_OFFSET)),
                layer::SAND,
                0,
            )],
        };

        let tiles = DrawBatch {
            mesh: Mesh::upload(
                device,
                &mesh::box_mesh(TILE_PITCH, TILE_THICKNESS, TILE_PITCH),
                "Tile Mesh",
            ),
            instances: tile_instances(map),
        };

        let water = DrawBatch {
            mesh: Mesh::upload(device, &mesh::plane(GROUND_SIZE, 1.0), "Water Mesh"),
            instances: vec![MeshInstance::new(
                Mat4::from_translation(Vec3::new(WORLD_OFFSET, 0.0, WORLD_OFFSET)),
                layer::WATER,
                INSTANCE_TRANSLUCENT,
            )],
        };

        let creep_mesh = Mesh::upload(
            device,
            &mesh::uv_sphere(CREEP_SEGMENTS, CREEP_DIAMETER),
            "Creep Mesh",
        );

        let tracks = vec![
            Track::upload(device, &creep::straight_track(), TRACK_COLOR),
            Track::upload(device, &creep::maze_track(), TRACK_COLOR),
        ];

        Self {
            batches: vec![skybox, ground, tiles],
            water,
            creep_mesh,
            creeps: Creep::pair(),
            tracks,
        }
    }

    /// Applies `ticks` mover steps. Only creep 1 ever moves; the maze
    /// track never drove the second creep.
    pub fn advance_creeps(&mut self, ticks: u32) {
        if ticks == 0 {
            return;
        }
        if let Some(first) = self.creeps.first_mut() {
            first.advance(ticks);
        }
    }

    pub fn creep_instances(&self) -> Vec<MeshInstance> {
        creep_instances(&self.creeps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_instance_per_nonzero_cell() {
        let map = TileMap::builtin_maze();
        let instances = tile_instances(&map);
        assert_eq!(instances.len(), map.tile_count());
    }

    #[test]
    fn tile_instances_follow_the_lattice() {
        let map = TileMap::new(vec![vec![0, 2], vec![3, 0]]).unwrap();
        let instances = tile_instances(&map);
        assert_eq!(instances.len(), 2);
        // (row 1, col 2): dark tile at (40, 20)
        assert_eq!(instances[0].model[3][0], 40.0);
        assert_eq!(instances[0].model[3][2], 20.0);
        assert_eq!(instances[0].texture_layer, layer::TILE_DARK);
        // (row 2, col 1): grass tile at (20, 40)
        assert_eq!(instances[1].model[3][0], 20.0);
        assert_eq!(instances[1].model[3][2], 40.0);
        assert_eq!(instances[1].texture_layer, layer::TILE_GRASS);
    }

    #[test]
    fn kinds_map_to_distinct_layers() {
        let layers = [
            tile_layer(TileKind::Base),
            tile_layer(TileKind::Dark),
            tile_layer(TileKind::Grass),
            tile_layer(TileKind::Tree),
        ];
        for (i, a) in layers.iter().enumerate() {
            for b in &layers[i + 1..] {
                assert_ne!(a, b);
            }
            assert!((*a as usize) < layer::COUNT);
        }
    }

    #[test]
    fn creep_instances_carry_positions() {
        let creeps = Creep::pair();
        let instances = creep_instances(&creeps);
        assert_eq!(instances.len(), 2);
        assert_eq!(instances[0].model[3][0], 20.0);
        assert_eq!(instances[1].model[3][0], 300.0);
        assert!(instances.iter().all(|i| i.texture_layer == layer::WOOD));
    }
}
