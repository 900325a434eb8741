//! Frame statistics and window-mode state.

use std::time::Instant;

use log::info;

pub struct GameState {
    pub show_fps: bool,
    pub last_fps_print: Instant,
    pub frame_count: u32,
    pub last_fps: u32,
    pub fullscreen: bool,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            show_fps: false,
            last_fps_print: Instant::now(),
            frame_count: 0,
            last_fps: 0,
            fullscreen: false,
        }
    }

    pub fn update_frame_count(&mut self) {
        self.frame_count += 1;
    }

    /// Returns the frame rate once per second while the readout is on.
    pub fn update_fps_display(&mut self) -> Option<u32> {
        if !self.show_fps {
            return None;
        }

        let now = Instant::now();
        let elapsed = now.duration_since(self.last_fps_print);

        if elapsed.as_secs_f32() >= 1.0 {
            self.last_fps = self.frame_count;
            self.frame_count = 0;
            self.last_fps_print = now;
            Some(self.last_fps)
        } else {
            None
        }
    }

    pub fn toggle_fps_display(&mut self) {
        self.show_fps = !self.show_fps;
        info!("Show FPS: {}", self.show_fps);
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_readout_is_opt_in() {
        let mut state = GameState::new();
        state.update_frame_count();
        assert_eq!(state.update_fps_display(), None);

        state.toggle_fps_display();
        assert!(state.show_fps);
        // Under a second elapsed, still nothing to print
        assert_eq!(state.update_fps_display(), None);
    }

    #[test]
    fn fps_counts_frames_over_a_second() {
        let mut state = GameState::new();
        state.show_fps = true;
        for _ in 0..42 {
            state.update_frame_count();
        }
        state.last_fps_print = Instant::now() - std::time::Duration::from_secs(2);
        assert_eq!(state.update_fps_display(), Some(42));
        assert_eq!(state.frame_count, 0);
    }
}
