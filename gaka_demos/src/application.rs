//! Shared demo application loop
//!
//! Both demos build a fixed scene and then hand control to [`Application::run`],
//! which polls the window, applies the camera controls, lets the demo animate
//! and renders one frame per iteration.
//!
//! ## Controls
//!
//! - `q` quits; `Escape` releases the mouse or quits when it is free
//! - Arrow keys move forward/back and strafe, `PageUp`/`PageDown` move vertically
//! - Left click toggles mouse-look
//! - The wheel moves the camera or changes its field of view, per demo

use std::path::{Path, PathBuf};

use thiserror::Error;

use gaka_engine::animation::SkeletonError;
use gaka_engine::assets::ResourceManager;
use gaka_engine::core::{ApplicationConfig, Config, ConfigError};
use gaka_engine::foundation::logging;
use gaka_engine::render::backends::RecordingDevice;
use gaka_engine::render::primitives::FlyingCamera;
use gaka_engine::render::window::{Key, MouseButton, Window, WindowError, WindowEvent};
use gaka_engine::render::{RenderError, Renderer};

/// Camera travel per key press or wheel notch
pub const MOVE_STEP: f32 = 0.5;

/// Degrees of rotation per pixel of locked mouse motion
pub const MOUSE_SENSITIVITY: f32 = 0.15;

/// Directory holding the demos' `config/` and `resources/`
pub const DEMO_DIR: &str = env!("CARGO_MANIFEST_DIR");

/// Demo errors
#[derive(Error, Debug)]
pub enum DemoError {
    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Configuration loaded but holds unusable values
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Rendering failed
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Window creation failed
    #[error("Window error: {0}")]
    Window(#[from] WindowError),

    /// Animation referenced a missing bone
    #[error("Animation error: {0}")]
    Skeleton(#[from] SkeletonError),
}

/// What the mouse wheel does to the camera
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelAction {
    /// Move along the viewing direction
    Move,
    /// Change the field of view
    Zoom,
}

/// A demo scene driven by [`Application`]
pub trait Demo {
    /// Wheel behaviour for this demo
    fn wheel_action(&self) -> WheelAction;

    /// Populate the renderer's scene
    fn build(&mut self, renderer: &mut Renderer, resources: &ResourceManager) -> Result<(), DemoError>;

    /// Advance the animation by one frame
    fn animate(&mut self, _renderer: &mut Renderer) -> Result<(), DemoError> {
        Ok(())
    }
}

/// Window, renderer and input state of a running demo
pub struct Application<W: Window> {
    window: W,
    renderer: Renderer,
    recorder: Option<RecordingDevice>,
    running: bool,
}

impl<W: Window> Application<W> {
    /// Pair a window with a renderer
    pub const fn new(window: W, renderer: Renderer) -> Self {
        Self {
            window,
            renderer,
            recorder: None,
            running: true,
        }
    }

    /// Drain `recorder`'s command log after every frame
    #[must_use]
    pub fn with_recorder(mut self, recorder: RecordingDevice) -> Self {
        self.recorder = Some(recorder);
        self
    }

    /// The window
    pub const fn window(&self) -> &W {
        &self.window
    }

    /// The renderer
    pub const fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// The renderer, mutably
    pub fn renderer_mut(&mut self) -> &mut Renderer {
        &mut self.renderer
    }

    /// Whether the loop keeps going
    pub const fn is_running(&self) -> bool {
        self.running
    }

    fn camera(&mut self) -> Option<&mut FlyingCamera> {
        self.renderer.scene_mut().active_camera_mut()
    }

    /// React to one window event
    pub fn handle_event(&mut self, event: WindowEvent, wheel: WheelAction) {
        match event {
            WindowEvent::Quit | WindowEvent::KeyPressed(Key::Q) => self.running = false,
            WindowEvent::KeyPressed(Key::Escape) => {
                if self.window.state().mouse_locked {
                    self.window.toggle_mouse_lock();
                } else {
                    self.running = false;
                }
            }
            WindowEvent::KeyPressed(key) => self.move_camera(key),
            WindowEvent::MouseButtonPressed(MouseButton::Left) => self.window.toggle_mouse_lock(),
            WindowEvent::MouseButtonPressed(_) | WindowEvent::MouseMoved(..) => {}
            WindowEvent::Scrolled(amount) => {
                if let Some(camera) = self.camera() {
                    match wheel {
                        WheelAction::Move => camera.move_by(amount * MOVE_STEP),
                        WheelAction::Zoom => camera.set_fov(camera.fov() + amount),
                    }
                }
            }
            WindowEvent::Resized(width, height) => self.renderer.resize(width, height),
        }
    }

    fn move_camera(&mut self, key: Key) {
        let Some(camera) = self.camera() else {
            return;
        };
        match key {
            Key::Left => camera.strafe_by(-MOVE_STEP),
            Key::Right => camera.strafe_by(MOVE_STEP),
            Key::Up => camera.move_by(MOVE_STEP),
            Key::Down => camera.move_by(-MOVE_STEP),
            Key::PageUp => camera.move_up(MOVE_STEP),
            Key::PageDown => camera.move_up(-MOVE_STEP),
            Key::Q | Key::Escape | Key::Other => {}
        }
    }

    fn apply_mouse_look(&mut self) {
        let state = self.window.state();
        if !state.mouse_locked {
            return;
        }
        let delta = state.mouse_delta;
        if delta.x == 0.0 && delta.y == 0.0 {
            return;
        }
        if let Some(camera) = self.camera() {
            camera.yaw_motion(MOUSE_SENSITIVITY * delta.x);
            camera.pitch_motion(MOUSE_SENSITIVITY * delta.y);
        }
    }

    /// Run until the window or the user asks to quit
    ///
    /// Returns the number of frames rendered.
    pub fn run(&mut self, demo: &mut dyn Demo) -> Result<u64, DemoError> {
        let wheel = demo.wheel_action();
        let mut frames = 0;

        while self.running {
            for event in self.window.poll_events() {
                self.handle_event(event, wheel);
            }
            if !self.running {
                break;
            }
            self.apply_mouse_look();

            demo.animate(&mut self.renderer)?;
            let stats = self.renderer.render_scene()?;
            self.window.update();
            frames += 1;

            if let Some(recorder) = &self.recorder {
                let commands = recorder.take_commands();
                log::trace!(
                    "Frame {}: {} draw call(s), {} device command(s)",
                    frames,
                    stats.draw_calls,
                    commands.len()
                );
            }
        }

        Ok(frames)
    }
}

/// Load `path` if it exists, otherwise default settings titled `title`
pub fn load_config(path: impl AsRef<Path>, title: &str) -> Result<ApplicationConfig, DemoError> {
    let path = path.as_ref();
    let config = if path.exists() {
        ApplicationConfig::load_from_file(path)?
    } else {
        ApplicationConfig::new(title)
    };
    config.validate().map_err(DemoError::InvalidConfig)?;
    Ok(config)
}

/// Resolve `path` against [`DEMO_DIR`]; absolute paths are kept as they are
pub fn demo_path(path: impl AsRef<Path>) -> PathBuf {
    Path::new(DEMO_DIR).join(path)
}

/// Load the configuration, build the demo scene and run it to completion
///
/// Relative config and asset paths are resolved with [`demo_path`], so the
/// demos run the same from any working directory.
pub fn launch(demo: &mut dyn Demo, config_path: &str, title: &str) -> Result<(), DemoError> {
    let config = load_config(demo_path(config_path), title)?;
    logging::init_with_level(&config.engine.log_level);
    log::info!("Starting {}", config.window.title);

    let resources = ResourceManager::new(demo_path(&config.assets.assets_dir));
    let device = RecordingDevice::new();
    let renderer = Renderer::new(
        Box::new(device.clone()),
        config.renderer.clone(),
        config.window.width,
        config.window.height,
    );

    #[cfg(feature = "glfw-input")]
    let window = gaka_engine::render::window::GlfwWindow::new(&config.window)?;
    #[cfg(not(feature = "glfw-input"))]
    let window = gaka_engine::render::window::HeadlessWindow::new(&config.window);

    let mut app = Application::new(window, renderer).with_recorder(device);
    demo.build(app.renderer_mut(), &resources)?;
    log::info!("Scene ready with {} node(s)", app.renderer().scene().len());

    let frames = app.run(demo)?;
    log::info!("{} finished after {} frame(s)", config.window.title, frames);
    Ok(())
}
