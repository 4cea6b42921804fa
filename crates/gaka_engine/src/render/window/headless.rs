//! Scripted window without any native surface

use std::collections::VecDeque;

use crate::core::WindowConfig;
use crate::foundation::math::Vec2;
use crate::render::window::{Window, WindowEvent, WindowState};

/// Window that replays scripted events and quits after a frame limit
#[derive(Debug, Clone)]
pub struct HeadlessWindow {
    state: WindowState,
    title: String,
    frame: u32,
    frame_limit: u32,
    script: VecDeque<(u32, WindowEvent)>,
}

impl HeadlessWindow {
    /// Create a headless window sized and titled from the configuration
    pub fn new(config: &WindowConfig) -> Self {
        log::info!(
            "Headless window '{}' {}x{} for {} frames",
            config.title,
            config.width,
            config.height,
            config.headless_frames
        );
        Self {
            state: WindowState::new(config.width, config.height, config.fullscreen, config.vsync),
            title: config.title.clone(),
            frame: 0,
            frame_limit: config.headless_frames,
            script: VecDeque::new(),
        }
    }

    /// Deliver `event` on the first poll at or after `frame`
    ///
    /// Events must be scheduled in non-decreasing frame order.
    pub fn schedule(&mut self, frame: u32, event: WindowEvent) {
        self.script.push_back((frame, event));
    }

    /// Number of frames presented so far
    pub const fn frame(&self) -> u32 {
        self.frame
    }

    fn apply(&mut self, event: WindowEvent) {
        match event {
            WindowEvent::Resized(width, height) => {
                self.state.width = width;
                self.state.height = height;
            }
            WindowEvent::MouseMoved(dx, dy) => {
                self.state.mouse_delta += Vec2::new(dx, dy);
            }
            _ => {}
        }
    }
}

impl Window for HeadlessWindow {
    fn state(&self) -> &WindowState {
        &self.state
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn toggle_mouse_lock(&mut self) {
        self.state.mouse_locked = !self.state.mouse_locked;
    }

    fn poll_events(&mut self) -> Vec<WindowEvent> {
        self.state.mouse_delta = Vec2::zeros();

        let mut events = Vec::new();
        while let Some(&(frame, event)) = self.script.front() {
            if frame > self.frame {
                break;
            }
            self.script.pop_front();
            self.apply(event);
            events.push(event);
        }

        if self.frame >= self.frame_limit {
            events.push(WindowEvent::Quit);
        }
        events
    }

    fn update(&mut self) {
        self.frame += 1;
    }
}
