use std::collections::HashSet;
use winit::event::MouseButton;
use winit::keyboard::KeyCode;
use winit::window::{Window, Fullscreen};
use log::debug;

use crate::game::scene::camera::OrbitCamera;

pub struct InputHandler {
    pub rotate_sensitivity: f32,
    pub zoom_sensitivity: f32,
    pub key_rotate_speed: f32,
    pressed_keys: HashSet<KeyCode>,
    dragging: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self {
            rotate_sensitivity: 0.005,
            zoom_sensitivity: 10.0,
            key_rotate_speed: 0.02,
            pressed_keys: HashSet::new(),
            dragging: false,
        }
    }
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_keyboard_input_event(
        &mut self,
        keycode: KeyCode,
        pressed: bool,
    ) {
        if pressed {
            self.pressed_keys.insert(keycode);
        } else {
            self.pressed_keys.remove(&keycode);
        }
    }

    /// Arrow keys orbit the camera, the same way dragging does.
    pub fn apply_movement(&self, camera: &mut OrbitCamera) {
        use KeyCode::*;
        let mut d_alpha = 0.0;
        let mut d_beta = 0.0;

        if self.pressed_keys.contains(&ArrowLeft) {
            d_alpha -= self.key_rotate_speed;
        }
        if self.pressed_keys.contains(&ArrowRight) {
            d_alpha += self.key_rotate_speed;
        }
        if self.pressed_keys.contains(&ArrowUp) {
            d_beta -= self.key_rotate_speed;
        }
        if self.pressed_keys.contains(&ArrowDown) {
            d_beta += self.key_rotate_speed;
        }

        if d_alpha != 0.0 || d_beta != 0.0 {
            camera.rotate(d_alpha, d_beta);
            debug!("Camera orbit: alpha={} beta={}", camera.alpha, camera.beta);
        }
    }

    pub fn handle_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        if button == MouseButton::Left {
            self.dragging = pressed;
        }
    }

    /// Orbits the camera while the left button is held.
    pub fn handle_mouse_motion(&self, delta: (f64, f64), camera: &mut OrbitCamera) {
        if !self.dragging {
            return;
        }
        let (delta_x, delta_y) = delta;
        camera.rotate(
            delta_x as f32 * self.rotate_sensitivity,
            delta_y as f32 * self.rotate_sensitivity,
        );
    }

    pub fn handle_scroll(&self, scroll_lines: f32, camera: &mut OrbitCamera) {
        camera.zoom(-scroll_lines * self.zoom_sensitivity);
    }

    pub fn handle_window_focus(&mut self, focused: bool) {
        if !focused {
            // Drop any stuck drag or key state when the window goes away
            self.dragging = false;
            self.pressed_keys.clear();
            debug!("Window unfocused, input state cleared");
        }
    }

    pub fn handle_fullscreen_toggle(&mut self, fullscreen: &mut bool, window: Option<&Window>) {
        if let Some(window) = window {
            if *fullscreen {
                window.set_fullscreen(None);
                debug!("Exited fullscreen mode");
            } else {
                window.set_fullscreen(Some(Fullscreen::Borderless(None)));
                debug!("Entered fullscreen mode");
            }
            *fullscreen = !*fullscreen;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn motion_only_orbits_while_dragging() {
        let mut handler = InputHandler::new();
        let mut camera = OrbitCamera::new();
        let alpha = camera.alpha;

        handler.handle_mouse_motion((40.0, 0.0), &mut camera);
        assert_eq!(camera.alpha, alpha);

        handler.handle_mouse_button(MouseButton::Left, true);
        handler.handle_mouse_motion((40.0, 0.0), &mut camera);
        assert!(camera.alpha > alpha);
    }

    #[test]
    fn focus_loss_clears_state() {
        let mut handler = InputHandler::new();
        let mut camera = OrbitCamera::new();
        handler.handle_mouse_button(MouseButton::Left, true);
        handler.handle_keyboard_input_event(KeyCode::ArrowLeft, true);

        handler.handle_window_focus(false);

        let alpha = camera.alpha;
        handler.handle_mouse_motion((40.0, 0.0), &mut camera);
        handler.apply_movement(&mut camera);
        assert_eq!(camera.alpha, alpha);
    }
}
