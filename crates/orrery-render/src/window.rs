//! Window management and input handling

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::config::RenderConfig;
use crate::input::{apply_held_keys, KeyAction};
use crate::renderer::Renderer;

pub struct App {
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    options: RenderConfig,

    // Input state
    keys_pressed: HashSet<KeyCode>,

    // Timing
    last_frame: Instant,

    /// First fatal error; returned from `run` after the loop exits
    error: Option<anyhow::Error>,
}

impl App {
    pub fn new(options: RenderConfig) -> Self {
        Self {
            window: None,
            renderer: None,
            options,
            keys_pressed: HashSet::new(),
            last_frame: Instant::now(),
            error: None,
        }
    }

    fn handle_input(&mut self, dt: f32) {
        if let Some(renderer) = &mut self.renderer {
            apply_held_keys(&mut renderer.camera, &self.keys_pressed, dt);
        }
    }

    fn handle_action(&mut self, action: KeyAction, event_loop: &ActiveEventLoop) {
        if action == KeyAction::Exit {
            event_loop.exit();
            return;
        }

        let Some(r) = &mut self.renderer else {
            return;
        };

        match action {
            KeyAction::ToggleOrbits => r.toggle_orbits(),
            KeyAction::ResetCamera => r.reset_camera(),
            KeyAction::TogglePause => {
                r.time_controller.toggle_pause();
                tracing::info!("Paused: {}", r.time_controller.is_paused());
            }
            KeyAction::SlowDown => {
                r.time_controller.halve_rate();
                tracing::info!("Time rate: {}x", r.time_controller.rate());
            }
            KeyAction::SpeedUp => {
                r.time_controller.double_rate();
                tracing::info!("Time rate: {}x", r.time_controller.rate());
            }
            KeyAction::Exit => {}
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        tracing::error!("{error:#}");
        self.error.get_or_insert(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title("Orrery")
            .with_inner_size(PhysicalSize::new(self.options.width, self.options.height));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => return self.fail(event_loop, e.into()),
        };

        let renderer = match pollster::block_on(Renderer::new(Arc::clone(&window), &self.options)) {
            Ok(renderer) => renderer,
            Err(e) => return self.fail(event_loop, e.context("Failed to create renderer")),
        };

        window.request_redraw();
        self.window = Some(window);
        self.renderer = Some(renderer);
        self.last_frame = Instant::now();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    match event.state {
                        ElementState::Pressed => {
                            self.keys_pressed.insert(key);

                            // Toggles fire once per press, not on auto-repeat
                            if !event.repeat {
                                if let Some(action) = KeyAction::from_key(key) {
                                    self.handle_action(action, event_loop);
                                }
                            }
                        }
                        ElementState::Released => {
                            self.keys_pressed.remove(&key);
                        }
                    }
                }
            }

            WindowEvent::Focused(false) => {
                self.keys_pressed.clear();
            }

            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = (now - self.last_frame).as_secs_f32();
                self.last_frame = now;

                self.handle_input(dt);

                if let Some(renderer) = &mut self.renderer {
                    renderer.update(dt);
                    if let Err(e) = renderer.render() {
                        return self.fail(event_loop, e);
                    }

                    if let Some(window) = &self.window {
                        window.set_title(&format!("Orrery | {}", renderer.get_info()));
                    }
                }

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

/// Open the window and run until it is closed
pub fn run(options: RenderConfig) -> anyhow::Result<()> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(options);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
