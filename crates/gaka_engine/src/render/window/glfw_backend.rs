//! GLFW window used for input only
//!
//! The window is created without a client API, so it owns no graphics context
//! and nothing is presented to it. Drawing goes through whichever
//! [`GraphicsDevice`](crate::render::api::GraphicsDevice) the renderer owns.

use crate::core::WindowConfig;
use crate::foundation::math::Vec2;
use crate::render::window::{Key, MouseButton, Window, WindowError, WindowEvent, WindowState};

/// Native window backed by GLFW
pub struct GlfwWindow {
    glfw: glfw::Glfw,
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
    state: WindowState,
    title: String,
    last_cursor: Option<(f64, f64)>,
}

impl GlfwWindow {
    /// Create the window without a graphics context
    pub fn new(config: &WindowConfig) -> Result<Self, WindowError> {
        let mut glfw = glfw::init(glfw::fail_on_errors)
            .map_err(|e| WindowError::InitializationFailed(format!("{e:?}")))?;

        glfw.window_hint(glfw::WindowHint::ClientApi(glfw::ClientApiHint::NoApi));
        glfw.window_hint(glfw::WindowHint::Resizable(true));

        let (width, height, title) = (config.width, config.height, config.title.as_str());
        let created = if config.fullscreen {
            glfw.with_primary_monitor(|glfw, monitor| {
                let mode = monitor.map_or(glfw::WindowMode::Windowed, |m| {
                    glfw::WindowMode::FullScreen(m)
                });
                glfw.create_window(width, height, title, mode)
            })
        } else {
            glfw.create_window(width, height, title, glfw::WindowMode::Windowed)
        };
        let (mut window, events) = created.ok_or(WindowError::CreationFailed)?;

        window.set_key_polling(true);
        window.set_mouse_button_polling(true);
        window.set_scroll_polling(true);
        window.set_cursor_pos_polling(true);
        window.set_framebuffer_size_polling(true);
        window.set_close_polling(true);

        let (fb_width, fb_height) = window.get_framebuffer_size();
        log::info!("Created GLFW window '{}' ({}x{})", title, fb_width, fb_height);

        Ok(Self {
            glfw,
            window,
            events,
            state: WindowState::new(
                u32::try_from(fb_width).unwrap_or(width),
                u32::try_from(fb_height).unwrap_or(height),
                config.fullscreen,
                config.vsync,
            ),
            title: config.title.clone(),
            last_cursor: None,
        })
    }

    const fn map_key(key: glfw::Key) -> Key {
        match key {
            glfw::Key::Q => Key::Q,
            glfw::Key::Escape => Key::Escape,
            glfw::Key::Left => Key::Left,
            glfw::Key::Right => Key::Right,
            glfw::Key::Up => Key::Up,
            glfw::Key::Down => Key::Down,
            glfw::Key::PageUp => Key::PageUp,
            glfw::Key::PageDown => Key::PageDown,
            _ => Key::Other,
        }
    }

    const fn map_button(button: glfw::MouseButton) -> MouseButton {
        match button {
            glfw::MouseButton::Button2 => MouseButton::Right,
            glfw::MouseButton::Button3 => MouseButton::Middle,
            _ => MouseButton::Left,
        }
    }
}

impl Window for GlfwWindow {
    fn state(&self) -> &WindowState {
        &self.state
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn set_title(&mut self, title: &str) {
        self.window.set_title(title);
        self.title = title.to_string();
    }

    fn toggle_mouse_lock(&mut self) {
        self.state.mouse_locked = !self.state.mouse_locked;
        self.window.set_cursor_mode(if self.state.mouse_locked {
            glfw::CursorMode::Disabled
        } else {
            glfw::CursorMode::Normal
        });
        self.last_cursor = None;
        log::debug!("Mouse lock: {}", self.state.mouse_locked);
    }

    #[allow(clippy::cast_possible_truncation)]
    fn poll_events(&mut self) -> Vec<WindowEvent> {
        self.glfw.poll_events();
        self.state.mouse_delta = Vec2::zeros();

        let mut events = Vec::new();
        for (_, event) in glfw::flush_messages(&self.events) {
            match event {
                glfw::WindowEvent::Key(key, _, glfw::Action::Press | glfw::Action::Repeat, _) => {
                    events.push(WindowEvent::KeyPressed(Self::map_key(key)));
                }
                glfw::WindowEvent::MouseButton(button, glfw::Action::Press, _) => {
                    events.push(WindowEvent::MouseButtonPressed(Self::map_button(button)));
                }
                glfw::WindowEvent::Scroll(_, y) => {
                    events.push(WindowEvent::Scrolled(y as f32));
                }
                glfw::WindowEvent::FramebufferSize(width, height) => {
                    self.state.width = u32::try_from(width).unwrap_or(0);
                    self.state.height = u32::try_from(height).unwrap_or(0);
                    events.push(WindowEvent::Resized(self.state.width, self.state.height));
                }
                glfw::WindowEvent::CursorPos(x, y) => {
                    if let Some((last_x, last_y)) = self.last_cursor {
                        let delta = Vec2::new((x - last_x) as f32, (last_y - y) as f32);
                        self.state.mouse_delta += delta;
                        events.push(WindowEvent::MouseMoved(delta.x, delta.y));
                    }
                    self.last_cursor = Some((x, y));
                }
                glfw::WindowEvent::Close => events.push(WindowEvent::Quit),
                _ => {}
            }
        }

        if self.window.should_close() && !events.contains(&WindowEvent::Quit) {
            events.push(WindowEvent::Quit);
        }
        events
    }

    // No surface to present
    fn update(&mut self) {}
}
