//! # Recording Backend
//!
//! A [`GraphicsDevice`] that talks to no GPU at all. Every state change and
//! draw is appended to a shared command log, and live resources are tracked in
//! slot maps so leaks and use-after-drop show up in tests.
//!
//! Cloning a [`RecordingDevice`] yields another handle onto the same log, so a
//! test can keep one handle while the renderer owns the other.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use slotmap::{new_key_type, SlotMap};

use crate::assets::ImageData;
use crate::render::api::{
    ClearFlags, DrawingMode, GpuMesh, GpuTexture, GraphicsDevice, MeshUpload, ShaderProgram,
    ShaderStage, UniformValue,
};
use crate::render::{RenderError, RenderResult};

new_key_type! {
    /// Identifies a recorded shader program
    pub struct ProgramKey;
    /// Identifies a recorded mesh
    pub struct MeshKey;
    /// Identifies a recorded texture
    pub struct TextureKey;
}

/// One call made against the recording device or one of its resources
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCommand {
    /// Framebuffer clear
    Clear {
        /// Clear color
        color: [f32; 4],
        /// Buffers cleared
        flags: ClearFlags,
    },
    /// Viewport change
    Viewport {
        /// Left edge
        x: i32,
        /// Bottom edge
        y: i32,
        /// Width in pixels
        width: u32,
        /// Height in pixels
        height: u32,
    },
    /// Successful shader stage compilation
    CompileShader {
        /// Program the stage was attached to
        program: ProgramKey,
        /// Compiled stage
        stage: ShaderStage,
    },
    /// Successful program link
    LinkProgram(ProgramKey),
    /// Program made current
    UseProgram(ProgramKey),
    /// Uniform assignment
    SetUniform {
        /// Target program
        program: ProgramKey,
        /// Uniform name
        name: String,
        /// Assigned value
        value: UniformValue,
    },
    /// Geometry upload (creation or update)
    UploadMesh {
        /// Target mesh
        mesh: MeshKey,
        /// Number of vertices uploaded
        vertex_count: usize,
        /// Number of indices uploaded
        index_count: usize,
    },
    /// Mesh bound for drawing
    BindMesh(MeshKey),
    /// Draw call
    DrawMesh {
        /// Drawn mesh
        mesh: MeshKey,
        /// Primitive topology
        mode: DrawingMode,
        /// Number of elements consumed
        count: usize,
    },
    /// Pixel upload (creation or update)
    UploadTexture {
        /// Target texture
        texture: TextureKey,
        /// Width in pixels
        width: u32,
        /// Height in pixels
        height: u32,
    },
    /// Texture bound for sampling
    BindTexture(TextureKey),
}

#[derive(Debug, Clone, Copy, Default)]
struct ProgramRecord {
    linked: bool,
}

#[derive(Debug, Clone, Copy)]
struct MeshRecord {
    element_count: usize,
}

#[derive(Debug, Clone, Copy)]
struct TextureRecord {
    width: u32,
    height: u32,
}

#[derive(Debug, Default)]
struct RecorderState {
    commands: Vec<DeviceCommand>,
    programs: SlotMap<ProgramKey, ProgramRecord>,
    meshes: SlotMap<MeshKey, MeshRecord>,
    textures: SlotMap<TextureKey, TextureRecord>,
}

type SharedState = Rc<RefCell<RecorderState>>;

fn record(state: &SharedState, command: DeviceCommand) {
    log::trace!("{:?}", command);
    state.borrow_mut().commands.push(command);
}

fn validate_upload(upload: &MeshUpload<'_>) -> RenderResult<()> {
    if upload.stride == 0 || upload.vertex_bytes.len() % upload.stride != 0 {
        return Err(RenderError::ResourceCreationFailed(format!(
            "vertex buffer of {} bytes is not a whole number of {}-byte vertices",
            upload.vertex_bytes.len(),
            upload.stride
        )));
    }
    let vertex_count = upload.vertex_count();
    if let Some(&index) = upload.indices.iter().find(|&&i| i as usize >= vertex_count) {
        return Err(RenderError::ResourceCreationFailed(format!(
            "index {index} out of range for {vertex_count} vertices"
        )));
    }
    Ok(())
}

fn validate_image(image: &ImageData) -> RenderResult<()> {
    let expected = image.width as usize * image.height as usize * 4;
    if image.data.len() == expected {
        Ok(())
    } else {
        Err(RenderError::ResourceCreationFailed(format!(
            "{}x{} RGBA image needs {expected} bytes, got {}",
            image.width,
            image.height,
            image.data.len()
        )))
    }
}

/// Headless graphics device that records all calls
#[derive(Debug, Clone, Default)]
pub struct RecordingDevice {
    state: SharedState,
}

impl RecordingDevice {
    /// Create a device with an empty command log
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the command log
    pub fn commands(&self) -> Ref<'_, [DeviceCommand]> {
        Ref::map(self.state.borrow(), |state| state.commands.as_slice())
    }

    /// Take the command log, leaving it empty
    pub fn take_commands(&self) -> Vec<DeviceCommand> {
        std::mem::take(&mut self.state.borrow_mut().commands)
    }

    /// Discard the command log
    pub fn clear_commands(&self) {
        self.state.borrow_mut().commands.clear();
    }

    /// Uniform assignments in the log, in call order
    pub fn uniform_log(&self) -> Vec<(String, UniformValue)> {
        self.commands()
            .iter()
            .filter_map(|command| match command {
                DeviceCommand::SetUniform { name, value, .. } => Some((name.clone(), *value)),
                _ => None,
            })
            .collect()
    }

    /// Number of draw calls in the log
    pub fn draw_count(&self) -> usize {
        self.commands()
            .iter()
            .filter(|command| matches!(command, DeviceCommand::DrawMesh { .. }))
            .count()
    }

    /// Number of programs not yet dropped
    pub fn live_programs(&self) -> usize {
        self.state.borrow().programs.len()
    }

    /// Number of meshes not yet dropped
    pub fn live_meshes(&self) -> usize {
        self.state.borrow().meshes.len()
    }

    /// Number of textures not yet dropped
    pub fn live_textures(&self) -> usize {
        self.state.borrow().textures.len()
    }
}

impl GraphicsDevice for RecordingDevice {
    fn create_program(&mut self) -> Box<dyn ShaderProgram> {
        let key = self.state.borrow_mut().programs.insert(ProgramRecord::default());
        log::debug!("Created program {:?}", key);
        Box::new(RecordedProgram {
            key,
            state: Rc::clone(&self.state),
            stages: Vec::new(),
            linked: false,
        })
    }

    fn create_mesh(&mut self, upload: &MeshUpload<'_>) -> RenderResult<Box<dyn GpuMesh>> {
        validate_upload(upload)?;
        let element_count = upload.element_count();
        let key = self.state.borrow_mut().meshes.insert(MeshRecord { element_count });
        record(
            &self.state,
            DeviceCommand::UploadMesh {
                mesh: key,
                vertex_count: upload.vertex_count(),
                index_count: upload.indices.len(),
            },
        );
        Ok(Box::new(RecordedMesh {
            key,
            state: Rc::clone(&self.state),
            mode: upload.mode,
        }))
    }

    fn create_texture(&mut self, image: &ImageData) -> RenderResult<Box<dyn GpuTexture>> {
        validate_image(image)?;
        let key = self.state.borrow_mut().textures.insert(TextureRecord {
            width: image.width,
            height: image.height,
        });
        record(
            &self.state,
            DeviceCommand::UploadTexture {
                texture: key,
                width: image.width,
                height: image.height,
            },
        );
        Ok(Box::new(RecordedTexture {
            key,
            state: Rc::clone(&self.state),
        }))
    }

    fn clear(&mut self, color: [f32; 4], flags: ClearFlags) {
        record(&self.state, DeviceCommand::Clear { color, flags });
    }

    fn set_viewport(&mut self, x: i32, y: i32, width: u32, height: u32) {
        record(&self.state, DeviceCommand::Viewport { x, y, width, height });
    }

    fn backend_name(&self) -> &'static str {
        "recording"
    }
}

struct RecordedProgram {
    key: ProgramKey,
    state: SharedState,
    stages: Vec<ShaderStage>,
    linked: bool,
}

impl ShaderProgram for RecordedProgram {
    fn compile_source(&mut self, source: &str, stage: ShaderStage) -> RenderResult<()> {
        if source.trim().is_empty() {
            return Err(RenderError::ShaderCompilation {
                stage,
                message: "empty shader source".to_string(),
            });
        }
        self.stages.push(stage);
        record(&self.state, DeviceCommand::CompileShader { program: self.key, stage });
        Ok(())
    }

    fn link(&mut self) -> RenderResult<()> {
        for required in [ShaderStage::Vertex, ShaderStage::Fragment] {
            if !self.stages.contains(&required) {
                return Err(RenderError::ProgramLink(format!("missing {required:?} stage")));
            }
        }
        self.linked = true;
        if let Some(entry) = self.state.borrow_mut().programs.get_mut(self.key) {
            entry.linked = true;
        }
        record(&self.state, DeviceCommand::LinkProgram(self.key));
        Ok(())
    }

    fn is_linked(&self) -> bool {
        self.linked
    }

    fn use_program(&self) -> RenderResult<()> {
        if !self.linked {
            return Err(RenderError::ProgramNotLinked);
        }
        record(&self.state, DeviceCommand::UseProgram(self.key));
        Ok(())
    }

    fn set_uniform(&self, name: &str, value: UniformValue) {
        record(
            &self.state,
            DeviceCommand::SetUniform {
                program: self.key,
                name: name.to_string(),
                value,
            },
        );
    }
}

impl Drop for RecordedProgram {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.try_borrow_mut() {
            state.programs.remove(self.key);
        }
    }
}

struct RecordedMesh {
    key: MeshKey,
    state: SharedState,
    mode: DrawingMode,
}

impl GpuMesh for RecordedMesh {
    fn bind(&self) {
        record(&self.state, DeviceCommand::BindMesh(self.key));
    }

    fn draw(&self) {
        let count = self
            .state
            .borrow()
            .meshes
            .get(self.key)
            .map_or(0, |mesh| mesh.element_count);
        record(
            &self.state,
            DeviceCommand::DrawMesh {
                mesh: self.key,
                mode: self.mode,
                count,
            },
        );
    }

    fn update(&mut self, upload: &MeshUpload<'_>) -> RenderResult<()> {
        validate_upload(upload)?;
        if let Some(mesh) = self.state.borrow_mut().meshes.get_mut(self.key) {
            mesh.element_count = upload.element_count();
        }
        record(
            &self.state,
            DeviceCommand::UploadMesh {
                mesh: self.key,
                vertex_count: upload.vertex_count(),
                index_count: upload.indices.len(),
            },
        );
        Ok(())
    }

    fn drawing_mode(&self) -> DrawingMode {
        self.mode
    }

    fn set_drawing_mode(&mut self, mode: DrawingMode) {
        self.mode = mode;
    }
}

impl Drop for RecordedMesh {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.try_borrow_mut() {
            state.meshes.remove(self.key);
        }
    }
}

struct RecordedTexture {
    key: TextureKey,
    state: SharedState,
}

impl GpuTexture for RecordedTexture {
    fn bind(&self) {
        record(&self.state, DeviceCommand::BindTexture(self.key));
    }

    fn update(&mut self, image: &ImageData) -> RenderResult<()> {
        validate_image(image)?;
        if let Some(texture) = self.state.borrow_mut().textures.get_mut(self.key) {
            texture.width = image.width;
            texture.height = image.height;
        }
        record(
            &self.state,
            DeviceCommand::UploadTexture {
                texture: self.key,
                width: image.width,
                height: image.height,
            },
        );
        Ok(())
    }

    fn size(&self) -> (u32, u32) {
        self.state
            .borrow()
            .textures
            .get(self.key)
            .map_or((0, 0), |texture| (texture.width, texture.height))
    }
}

impl Drop for RecordedTexture {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.try_borrow_mut() {
            state.textures.remove(self.key);
        }
    }
}
