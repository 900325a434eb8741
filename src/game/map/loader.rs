//! Map loading: a JSON array-of-arrays of tile codes, with a
//! compiled-in default so the scene is viewable without assets.

use std::path::Path;

use log::info;

use super::{MapError, TileMap};

impl TileMap {
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let data = std::fs::read_to_string(path.as_ref())?;
        let map = Self::from_json_str(&data)?;
        info!(
            "[map] Loaded {}x{} grid from {}",
            map.width(),
            map.height(),
            path.as_ref().display()
        );
        Ok(map)
    }

    pub fn from_json_str(data: &str) -> Result<Self, MapError> {
        let rows: Vec<Vec<u8>> = serde_json::from_str(data)?;
        Self::new(rows)
    }

    /// Default 16x16 island maze. The dark corridor traces the maze
    /// track waypoints; the outer ring is open water.
    pub fn builtin_maze() -> Self {
        let rows: Vec<Vec<u8>> = vec![
            vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
            vec![0, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 0],
            vec![0, 3, 2, 2, 2, 2, 2, 3, 3, 3, 3, 4, 3, 3, 3, 0],
            vec![0, 3, 2, 3, 3, 4, 2, 2, 3, 3, 3, 3, 3, 3, 3, 0],
            vec![0, 3, 2, 3, 3, 3, 3, 2, 3, 3, 3, 3, 3, 4, 3, 0],
            vec![2, 2, 2, 3, 3, 3, 3, 2, 3, 3, 3, 3, 3, 3, 3, 0],
            vec![2, 3, 3, 3, 3, 3, 3, 2, 3, 3, 4, 3, 3, 3, 3, 0],
            vec![2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 0],
            vec![0, 3, 3, 3, 3, 3, 3, 2, 3, 3, 3, 3, 3, 3, 2, 0],
            vec![0, 3, 3, 4, 3, 3, 3, 2, 3, 3, 3, 3, 2, 2, 2, 0],
            vec![0, 3, 3, 3, 3, 3, 4, 2, 3, 3, 3, 3, 2, 3, 3, 0],
            vec![0, 3, 3, 3, 3, 3, 3, 2, 2, 3, 3, 3, 2, 3, 3, 0],
            vec![0, 3, 4, 3, 3, 3, 3, 3, 2, 2, 2, 2, 2, 3, 3, 0],
            vec![0, 3, 3, 3, 3, 3, 3, 4, 3, 3, 3, 3, 3, 3, 3, 0],
            vec![0, 3, 3, 3, 4, 3, 3, 3, 3, 3, 3, 4, 3, 3, 3, 0],
            vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        ];
        // The literal above is rectangular by construction
        Self::new(rows).expect("builtin maze grid is rectangular")
    }

    /// Loads the map file if present, otherwise falls back to the
    /// built-in maze.
    pub fn load_or_builtin(path: impl AsRef<Path>) -> Self {
        match Self::load_json(path.as_ref()) {
            Ok(map) => map,
            Err(e) => {
                log::warn!(
                    "Failed to load map from {}: {}, using builtin maze",
                    path.as_ref().display(),
                    e
                );
                Self::builtin_maze()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::map::TileKind;

    #[test]
    fn parses_json_grid() {
        let map = TileMap::from_json_str("[[0, 2, 3], [4, 1, 0]]").unwrap();
        assert_eq!(map.width(), 3);
        assert_eq!(map.height(), 2);
        assert_eq!(map.tile_count(), 4);
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            TileMap::from_json_str("[[0, 2], [1]]"),
            Err(MapError::Ragged { .. })
        ));
        assert!(matches!(
            TileMap::from_json_str("not json"),
            Err(MapError::Json(_))
        ));
    }

    #[test]
    fn builtin_maze_is_valid() {
        let map = TileMap::builtin_maze();
        assert_eq!(map.width(), 16);
        assert_eq!(map.height(), 16);
        assert_eq!(map.tile_count(), 199);
        // The straight track row is a dark corridor from col 1 to 15
        let row8: Vec<_> = map
            .placements()
            .filter(|p| p.row == 8 && p.kind == TileKind::Dark)
            .map(|p| p.col)
            .collect();
        assert_eq!(row8, (1..=15).collect::<Vec<_>>());
    }
}
