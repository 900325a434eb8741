//! Placeholder creep actors, their track overlays, and the wall-clock
//! mover that nudges creep 1 along the x axis.

use std::time::Duration;

use crossbeam_channel::{Receiver, unbounded};
use glam::Vec3;
use log::debug;

use crate::game::map::TILE_PITCH;

/// Sphere diameter of a creep mesh.
pub const CREEP_DIAMETER: f32 = 10.0;
/// Sphere tessellation.
pub const CREEP_SEGMENTS: u32 = 20;
/// Y level creeps and tracks sit at.
pub const TRACK_Y: f32 = 8.0;

/// Distance creep 1 moves per mover tick. No stop condition, no clamp.
pub const MOVE_STEP: f32 = 0.5;
/// Wall-clock interval between mover ticks.
pub const MOVE_INTERVAL: Duration = Duration::from_millis(30);

/// A decorative moving actor.
#[derive(Debug, Clone, Copy)]
pub struct Creep {
    pub position: Vec3,
}

impl Creep {
    /// Template spawn point: grid cell (col 1, row 8).
    pub fn spawn_point() -> Vec3 {
        grid_point(1.0, 8.0)
    }

    /// The two scene creeps: one at the spawn point, one parked at
    /// x = 15 tiles.
    pub fn pair() -> Vec<Creep> {
        let spawn = Self::spawn_point();
        vec![
            Creep { position: spawn },
            Creep { position: Vec3::new(15.0 * TILE_PITCH, spawn.y, spawn.z) },
        ]
    }

    /// Advances by `ticks` mover steps along +x. Monotonic, unbounded.
    pub fn advance(&mut self, ticks: u32) {
        self.position.x += MOVE_STEP * ticks as f32;
    }
}

fn grid_point(col: f32, row: f32) -> Vec3 {
    Vec3::new(col * TILE_PITCH, TRACK_Y, row * TILE_PITCH)
}

/// The straight 2-point track creep 1 travels along.
pub fn straight_track() -> Vec<Vec3> {
    vec![
        Vec3::new(20.0, TRACK_Y, 160.0),
        Vec3::new(300.0, TRACK_Y, 160.0),
    ]
}

/// The winding 14-point track through the maze. Rendered only; it was
/// never wired to a moving actor.
pub fn maze_track() -> Vec<Vec3> {
    vec![
        grid_point(1.0, 8.0),
        grid_point(1.0, 6.0),
        grid_point(3.0, 6.0),
        grid_point(3.0, 3.0),
        grid_point(7.0, 3.0),
        grid_point(7.0, 4.0),
        grid_point(8.0, 4.0),
        grid_point(8.0, 12.0),
        grid_point(9.0, 12.0),
        grid_point(9.0, 13.0),
        grid_point(13.0, 13.0),
        grid_point(13.0, 10.0),
        grid_point(15.0, 10.0),
        grid_point(15.0, 8.0),
    ]
}

/// Background thread ticking on a fixed wall-clock cadence,
/// independent of the frame loop. The frame loop drains pending ticks
/// once per redraw.
pub struct Mover {
    rx: Receiver<()>,
}

impl Mover {
    pub fn start() -> Self {
        let (tx, rx) = unbounded();
        std::thread::spawn(move || {
            loop {
                std::thread::sleep(MOVE_INTERVAL);
                // Receiver dropped means the app is gone
                if tx.send(()).is_err() {
                    break;
                }
            }
        });
        debug!("Mover thread started at {:?} cadence", MOVE_INTERVAL);
        Self { rx }
    }

    /// Number of ticks elapsed since the last drain.
    pub fn drain(&self) -> u32 {
        let mut ticks = 0;
        while self.rx.try_recv().is_ok() {
            ticks += 1;
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_is_half_unit_per_tick() {
        let mut creep = Creep { position: Creep::spawn_point() };
        let start = creep.position.x;
        creep.advance(1);
        assert_eq!(creep.position.x, start + 0.5);
        creep.advance(99);
        assert_eq!(creep.position.x, start + 50.0);
        // y/z untouched
        assert_eq!(creep.position.y, TRACK_Y);
        assert_eq!(creep.position.z, 160.0);
    }

    #[test]
    fn advance_has_no_clamp() {
        let mut creep = Creep { position: Creep::spawn_point() };
        for _ in 0..100 {
            creep.advance(1000);
        }
        // Far off the map and still growing
        assert_eq!(creep.position.x, 20.0 + 0.5 * 100_000.0);
    }

    #[test]
    fn creep_pair_spawns() {
        let creeps = Creep::pair();
        assert_eq!(creeps.len(), 2);
        assert_eq!(creeps[0].position, Vec3::new(20.0, 8.0, 160.0));
        assert_eq!(creeps[1].position, Vec3::new(300.0, 8.0, 160.0));
    }

    #[test]
    fn tracks_sit_on_the_grid() {
        let straight = straight_track();
        assert_eq!(straight.len(), 2);
        assert_eq!(straight[0], Vec3::new(20.0, 8.0, 160.0));
        assert_eq!(straight[1], Vec3::new(300.0, 8.0, 160.0));

        let maze = maze_track();
        assert_eq!(maze.len(), 14);
        for p in &maze {
            assert_eq!(p.y, TRACK_Y);
            assert_eq!(p.x % TILE_PITCH, 0.0);
            assert_eq!(p.z % TILE_PITCH, 0.0);
        }
        // Axis-aligned segments only
        for pair in maze.windows(2) {
            assert!(pair[0].x == pair[1].x || pair[0].z == pair[1].z);
        }
    }

    #[test]
    fn mover_delivers_ticks() {
        let mover = Mover::start();
        std::thread::sleep(Duration::from_millis(100));
        let ticks = mover.drain();
        assert!(ticks >= 1, "expected at least one tick, got {ticks}");
        // An immediate second drain finds at most one fresh tick
        assert!(mover.drain() <= 1);
    }
}
