//! The tile-code grid consumed by the scene ("puzzle maze").
//!
//! The grid itself is external input; this module only validates it
//! and maps it onto the fixed 20-unit tile lattice. Generation is out
//! of scope.

pub mod loader;

use glam::Vec3;
use thiserror::Error;

/// World-space spacing between adjacent tile centers.
pub const TILE_PITCH: f32 = 20.0;
/// Height of a tile slab.
pub const TILE_THICKNESS: f32 = 0.1;
/// Y coordinate of tile centers.
pub const TILE_Y: f32 = 3.0;

/// Terrain variant selected by a cell's tile code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileKind {
    /// Any non-zero code without a dedicated variant.
    Base,
    Dark,
    Grass,
    Tree,
}

impl TileKind {
    /// Code 0 is an empty cell and receives no tile at all.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => None,
            2 => Some(TileKind::Dark),
            3 => Some(TileKind::Grass),
            4 => Some(TileKind::Tree),
            _ => Some(TileKind::Base),
        }
    }
}

/// Errors from loading or validating a tile grid.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("map grid is empty")]
    Empty,
    #[error("map grid is not rectangular: row {row} has {got} columns, expected {expected}")]
    Ragged {
        row: usize,
        got: usize,
        expected: usize,
    },
}

/// A rectangular grid of tile-type codes.
#[derive(Debug, Clone)]
pub struct TileMap {
    rows: Vec<Vec<u8>>,
}

/// One non-empty cell mapped onto the tile lattice.
///
/// Row and column counters are 1-based, so the first cell sits at
/// (20, 20) in x/z, matching the track and creep coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TilePlacement {
    pub row: usize,
    pub col: usize,
    pub kind: TileKind,
}

impl TilePlacement {
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.col as f32 * TILE_PITCH, TILE_Y, self.row as f32 * TILE_PITCH)
    }
}

impl TileMap {
    pub fn new(rows: Vec<Vec<u8>>) -> Result<Self, MapError> {
        if rows.is_empty() || rows[0].is_empty() {
            return Err(MapError::Empty);
        }
        let expected = rows[0].len();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != expected {
                return Err(MapError::Ragged {
                    row: i,
                    got: row.len(),
                    expected,
                });
            }
        }
        Ok(Self { rows })
    }

    pub fn width(&self) -> usize {
        self.rows[0].len()
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Non-empty cells in row-major order.
    pub fn placements(&self) -> impl Iterator<Item = TilePlacement> + '_ {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.iter().enumerate().filter_map(move |(c, &code)| {
                TileKind::from_code(code).map(|kind| TilePlacement {
                    row: r + 1,
                    col: c + 1,
                    kind,
                })
            })
        })
    }

    /// Number of cells that receive a tile.
    pub fn tile_count(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|&&code| code != 0)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_map() -> TileMap {
        TileMap::new(vec![
            vec![0, 2, 3],
            vec![4, 0, 7],
        ])
        .unwrap()
    }

    #[test]
    fn rejects_empty_grid() {
        assert!(matches!(TileMap::new(vec![]), Err(MapError::Empty)));
        assert!(matches!(TileMap::new(vec![vec![]]), Err(MapError::Empty)));
    }

    #[test]
    fn rejects_ragged_grid() {
        let err = TileMap::new(vec![vec![1, 2], vec![1]]).unwrap_err();
        match err {
            MapError::Ragged { row, got, expected } => {
                assert_eq!(row, 1);
                assert_eq!(got, 1);
                assert_eq!(expected, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn placement_count_matches_nonzero_cells() {
        let map = small_map();
        assert_eq!(map.tile_count(), 4);
        assert_eq!(map.placements().count(), 4);
    }

    #[test]
    fn codes_select_tile_kinds() {
        let kinds: Vec<TileKind> = small_map().placements().map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            vec![TileKind::Dark, TileKind::Grass, TileKind::Tree, TileKind::Base]
        );
        assert_eq!(TileKind::from_code(0), None);
        assert_eq!(TileKind::from_code(1), Some(TileKind::Base));
        assert_eq!(TileKind::from_code(255), Some(TileKind::Base));
    }

    #[test]
    fn placements_land_on_the_tile_lattice() {
        let map = small_map();
        let first = map.placements().next().unwrap();
        // Cell (row 1, col 2) -> (2*20, 1*20) in x/z
        assert_eq!(first.row, 1);
        assert_eq!(first.col, 2);
        assert_eq!(first.position(), Vec3::new(40.0, TILE_Y, 20.0));

        for p in map.placements() {
            let pos = p.position();
            assert_eq!(pos.x, p.col as f32 * TILE_PITCH);
            assert_eq!(pos.z, p.row as f32 * TILE_PITCH);
        }
    }
}
