use winit::application::ApplicationHandler;
use winit::event::{DeviceEvent, MouseScrollDelta, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::KeyCode;
use winit::window::{Window, WindowId};
use log::{error, info, warn};

use crate::engine::graphics::{renderer::Renderer, texture::Texture};
use crate::engine::input::InputHandler;
use crate::game::creep::Mover;
use crate::game::map::TileMap;
use crate::game::scene::build::{layer, Scene};
use crate::game::scene::camera::OrbitCamera;
use crate::game::state::GameState;

/// One image per texture array layer, in `layer` order.
const TEXTURE_PATHS: [&str; layer::COUNT] = [
    "assets/tile1.jpg",      // TILE_BASE
    "assets/dark_tile.jpg",  // TILE_DARK
    "assets/grass_tile.jpg", // TILE_GRASS
    "assets/tree_tile.jpg",  // TILE_TREE
    "assets/sand.jpg",       // SAND
    "assets/waterbump.png",  // WATER
    "assets/sky.jpg",        // SKY
    "assets/wood.jpg",       // WOOD
];

/// Solid stand-in colors when the texture files are missing.
const FALLBACK_COLORS: [[u8; 4]; layer::COUNT] = [
    [190, 170, 140, 255], // base tile
    [60, 55, 50, 255],    // dark tile
    [90, 160, 70, 255],   // grass tile
    [40, 100, 45, 255],   // tree tile
    [210, 190, 130, 255], // sand
    [60, 120, 200, 255],  // water
    [135, 190, 235, 255], // sky
    [140, 100, 60, 255],  // wood
];

const MAP_PATH: &str = "assets/maze.json";

pub struct App {
    window: Option<Window>,
    size: Option<winit::dpi::PhysicalSize<u32>>,
    instance: Option<wgpu::Instance>,
    renderer: Option<Renderer>,
    texture: Option<Texture>,
    scene: Option<Scene>,
    camera: OrbitCamera,
    input_handler: InputHandler,
    state: GameState,
    mover: Mover,
}

impl Default for App {
    fn default() -> Self {
        Self {
            window: None,
            size: None,
            instance: None,
            renderer: None,
            texture: None,
            scene: None,
            camera: OrbitCamera::new(),
            input_handler: InputHandler::new(),
            state: GameState::new(),
            mover: Mover::start(),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let window = event_loop.create_window(Window::default_attributes())
            .map_err(|e| {
                error!("Failed to create window: {:?}", e);
                e
            }).unwrap_or_else(|_| {
                error!("Failed to create window, exiting");
                std::process::exit(1);
            });
        let size = window.inner_size();
        self.size = Some(size);
        self.window = Some(window);
        // Initialize wgpu
        pollster::block_on(self.init_wgpu());
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            },
            WindowEvent::RedrawRequested => {
                // Wall-clock mover ticks accumulated since the last frame
                let ticks = self.mover.drain();
                if let Some(scene) = &mut self.scene {
                    scene.advance_creeps(ticks);
                }
                // Apply orbit movement from currently pressed keys
                self.input_handler.apply_movement(&mut self.camera);

                self.state.update_frame_count();
                if let Some(fps) = self.state.update_fps_display() {
                    info!("FPS: {}", fps);
                }

                if let (Some(renderer), Some(texture), Some(scene)) =
                    (&self.renderer, &self.texture, &self.scene)
                {
                    if let Some(window) = &self.window {
                        let instance = self.instance.as_ref().unwrap_or_else(|| {
                            error!("No wgpu instance available");
                            panic!("No wgpu instance available");
                        });
                        let surface = instance.create_surface(window).unwrap_or_else(|e| {
                            error!("Failed to create surface: {:?}", e);
                            panic!("Failed to create surface: {:?}", e);
                        });
                        surface.configure(&renderer.device, &renderer.config);
                        if let Err(e) = renderer.render(&surface, &self.camera, texture, scene) {
                            error!("Render error: {:?}", e);
                        }
                    }
                }
                self.window.as_ref().unwrap().request_redraw();
            }
            WindowEvent::Resized(physical_size) => {
                self.resize(physical_size);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let winit::keyboard::PhysicalKey::Code(keycode) = event.physical_key {
                    let pressed = event.state == winit::event::ElementState::Pressed;
                    self.input_handler.handle_keyboard_input_event(keycode, pressed);
                    if pressed && !event.repeat {
                        match keycode {
                            KeyCode::KeyF => self.state.toggle_fps_display(),
                            KeyCode::F11 => self.input_handler.handle_fullscreen_toggle(
                                &mut self.state.fullscreen,
                                self.window.as_ref(),
                            ),
                            _ => (),
                        }
                    }
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let pressed = state == winit::event::ElementState::Pressed;
                self.input_handler.handle_mouse_button(button, pressed);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 20.0,
                };
                self.input_handler.handle_scroll(lines, &mut self.camera);
            }
            WindowEvent::Focused(focused) => {
                self.input_handler.handle_window_focus(focused);
            }
            _ => (),
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: winit::event::DeviceId, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.input_handler.handle_mouse_motion(delta, &mut self.camera);
        }
    }
}

impl App {
    async fn init_wgpu(&mut self) {
        let window = self.window.as_ref().unwrap();
        let size = self.size.unwrap();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window).unwrap_or_else(|e| {
            error!("Failed to create surface: {:?}", e);
            std::process::exit(1);
        });
        let adapter = instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }).await.unwrap_or_else(|| {
            error!("Failed to request adapter");
            std::process::exit(1);
        });

        let (device, queue) = adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
            },
            None,
        ).await.unwrap_or_else(|e| {
            error!("Failed to request device: {:?}", e);
            std::process::exit(1);
        });

        // Configure surface
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps.formats.iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        // Scene materials, one array layer per texture
        let texture = Texture::load_array(&device, &queue, &TEXTURE_PATHS)
            .unwrap_or_else(|e| {
                warn!("Failed to load scene textures: {:?}, using solid colors", e);
                Texture::fallback_array(&device, &queue, &FALLBACK_COLORS)
            });

        let renderer = Renderer::new(device, queue, &surface, &adapter, size, &texture);

        let map = TileMap::load_or_builtin(MAP_PATH);
        info!(
            "[scene] {} tiles placed from a {}x{} grid",
            map.tile_count(),
            map.width(),
            map.height()
        );
        let scene = Scene::build(&renderer.device, &map);

        self.instance = Some(instance);
        self.renderer = Some(renderer);
        self.texture = Some(texture);
        self.scene = Some(scene);
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = Some(new_size);
            if let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) {
                let instance = self.instance.as_ref().unwrap_or_else(|| {
                    error!("No wgpu instance available for resize");
                    panic!("No wgpu instance available for resize");
                });
                let surface = instance.create_surface(window).unwrap_or_else(|e| {
                    error!("Failed to create surface for resize: {:?}", e);
                    panic!("Failed to create surface for resize: {:?}", e);
                });
                renderer.resize(new_size, &surface);
            }
        }
    }
}
