//! Forwarding toolkit draw lists to the engine's graphics subsystem.

use glam::{Mat4, UVec2};
use shimmer_core::{Options, Result, ShimmerError};

use crate::draw::{buffer_capacity, projection, DrawData, DrawIdx, DrawVert, IntRect, TextureId};
use crate::toolkit::FontAtlas;

/// Vertex shader variants used for UI geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexShader {
    /// Untextured, colored by vertex color only.
    VertexColor,
    /// Textured and modulated by vertex color.
    DiffMap,
}

/// Pixel shader variants used for UI geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelShader {
    VertexColor,
    DiffMap,
    /// Samples coverage from a single-channel texture.
    AlphaMap,
}

/// Picks the shader pair for a command drawing with `texture`.
pub fn select_shaders(texture: Option<TextureId>, alpha_only: bool) -> (VertexShader, PixelShader) {
    match texture {
        None => (VertexShader::VertexColor, PixelShader::VertexColor),
        Some(_) if alpha_only => (VertexShader::DiffMap, PixelShader::AlphaMap),
        Some(_) => (VertexShader::DiffMap, PixelShader::DiffMap),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CullMode {
    None,
    Back,
    Front,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareMode {
    Always,
    Less,
    LessEqual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillMode {
    Solid,
    Wireframe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    Replace,
    Alpha,
    Add,
}

/// Fixed-function state applied before drawing UI geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiRenderState {
    pub cull: CullMode,
    pub depth_test: CompareMode,
    pub depth_write: bool,
    pub fill: FillMode,
    pub stencil_test: bool,
    pub blend: BlendMode,
}

impl UiRenderState {
    /// Alpha-blended overlay drawn on top of the scene.
    pub const OVERLAY: Self = Self {
        cull: CullMode::None,
        depth_test: CompareMode::Always,
        depth_write: false,
        fill: FillMode::Solid,
        stencil_test: false,
        blend: BlendMode::Alpha,
    };
}

/// An indexed draw call into the uploaded UI buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawRange {
    pub index_start: u32,
    pub index_count: u32,
    pub vertex_start: u32,
    pub vertex_count: u32,
}

/// The engine's graphics subsystem as seen by the UI host.
pub trait Graphics {
    /// Returns whether the device has been created.
    fn is_initialized(&self) -> bool;

    /// Returns whether the device is lost and must not be used.
    fn is_device_lost(&self) -> bool;

    /// Backbuffer size in pixels.
    fn size(&self) -> UVec2;

    /// Uploads a font atlas as an RGBA texture.
    fn create_texture(&mut self, atlas: &FontAtlas) -> Result<TextureId>;

    fn release_texture(&mut self, texture: TextureId);

    /// Returns whether `texture` only carries an alpha channel.
    fn is_alpha_texture(&self, texture: TextureId) -> bool;

    fn set_render_state(&mut self, state: &UiRenderState);

    /// Reallocates the dynamic UI buffers to hold the given element counts.
    fn resize_buffers(&mut self, vertices: usize, indices: usize);

    /// Writes vertex and index bytes to the start of the UI buffers.
    fn upload(&mut self, vertices: &[u8], indices: &[u8]);

    fn set_shaders(&mut self, vertex: VertexShader, pixel: PixelShader);

    fn set_view_proj(&mut self, view_proj: Mat4);

    fn set_scissor(&mut self, rect: IntRect);

    fn set_texture(&mut self, texture: Option<TextureId>);

    fn draw(&mut self, range: DrawRange);
}

/// Submits toolkit draw data through a [`Graphics`] sink.
///
/// Keeps the UI buffers' capacities so they are only reallocated when the
/// geometry outgrows them or shrinks well below them.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    vertex_capacity: usize,
    index_capacity: usize,
    vertex_headroom: usize,
    index_headroom: usize,
    vertices: Vec<DrawVert>,
    indices: Vec<DrawIdx>,
}

impl Renderer {
    pub fn new(options: &Options) -> Self {
        Self {
            vertex_headroom: options.vertex_headroom,
            index_headroom: options.index_headroom,
            ..Self::default()
        }
    }

    /// Current `(vertex, index)` buffer capacities.
    pub fn capacities(&self) -> (usize, usize) {
        (self.vertex_capacity, self.index_capacity)
    }

    /// Draws `data` through `graphics`.
    ///
    /// All lists are uploaded as one vertex and one index buffer. Each
    /// command then either runs its user callback or draws its index range
    /// with the vertices of its own list.
    pub fn render_draw_lists(
        &mut self,
        data: &DrawData,
        graphics: &mut dyn Graphics,
    ) -> Result<()> {
        if !graphics.is_initialized() || graphics.is_device_lost() {
            return Err(ShimmerError::DeviceUnavailable);
        }
        if data.is_empty() {
            return Ok(());
        }

        graphics.set_render_state(&UiRenderState::OVERLAY);
        self.reserve(data, graphics);

        self.vertices.clear();
        self.indices.clear();
        for list in &data.lists {
            self.vertices.extend_from_slice(&list.vertices);
            self.indices.extend_from_slice(&list.indices);
        }
        graphics.upload(
            bytemuck::cast_slice(&self.vertices),
            bytemuck::cast_slice(&self.indices),
        );

        let view_proj = projection(graphics.size());
        let mut index_offset = 0u32;
        let mut vertex_offset = 0u32;

        for list in &data.lists {
            let vertex_count = list.vertices.len() as u32;
            for cmd in &list.commands {
                if let Some(callback) = &cmd.callback {
                    callback(list, cmd);
                } else {
                    let alpha_only = cmd
                        .texture
                        .is_some_and(|texture| graphics.is_alpha_texture(texture));
                    let (vs, ps) = select_shaders(cmd.texture, alpha_only);
                    graphics.set_shaders(vs, ps);
                    graphics.set_view_proj(view_proj);
                    graphics.set_scissor(IntRect::from_clip_rect(cmd.clip_rect));
                    graphics.set_texture(cmd.texture);
                    graphics.draw(DrawRange {
                        index_start: index_offset,
                        index_count: cmd.elem_count,
                        vertex_start: vertex_offset,
                        vertex_count,
                    });
                }
                index_offset += cmd.elem_count;
            }
            vertex_offset += vertex_count;
        }

        log::trace!(
            "rendered {} draw lists ({} vertices, {} indices)",
            data.lists.len(),
            self.vertices.len(),
            self.indices.len()
        );
        Ok(())
    }

    fn reserve(&mut self, data: &DrawData, graphics: &mut dyn Graphics) {
        let vertex_resize =
            buffer_capacity(self.vertex_capacity, data.total_vtx_count(), self.vertex_headroom);
        let index_resize =
            buffer_capacity(self.index_capacity, data.total_idx_count(), self.index_headroom);

        if vertex_resize.is_none() && index_resize.is_none() {
            return;
        }
        self.vertex_capacity = vertex_resize.unwrap_or(self.vertex_capacity);
        self.index_capacity = index_resize.unwrap_or(self.index_capacity);
        log::debug!(
            "resizing ui buffers to {} vertices, {} indices",
            self.vertex_capacity,
            self.index_capacity
        );
        graphics.resize_buffers(self.vertex_capacity, self.index_capacity);
    }
}
