/// CommandList trait - the draw-submission collaborator
///
/// The binder translates a resolved pipeline state plus runtime data into calls
/// on this trait: one bind per used component at its precomputed slot, the
/// three non-pipeline draw-state values, then a single draw. Backends turn
/// these calls into device commands; serializing access to the device is the
/// backend's responsibility.

use std::sync::Arc;
use crate::error::Result;
use crate::graphics_device::{
    Buffer, IndexType, TextureView, Sampler, ResourceView,
    RenderTargetView, DepthStencilView,
};
use crate::pso::PipelineState;

/// Command list receiving bind and draw operations
pub trait CommandList {
    /// Bind the pipeline state object the following draw uses
    fn bind_pipeline(&mut self, pipeline: &PipelineState) -> Result<()>;

    /// Bind a vertex buffer
    ///
    /// # Arguments
    ///
    /// * `slot` - Vertex buffer binding index
    /// * `buffer` - Buffer to bind
    fn bind_vertex_buffer(&mut self, slot: u32, buffer: &Arc<dyn Buffer>) -> Result<()>;

    /// Bind a constant buffer
    fn bind_constant_buffer(&mut self, slot: u32, buffer: &Arc<dyn Buffer>) -> Result<()>;

    /// Bind a texture view and its sampler
    fn bind_texture_sampler(
        &mut self,
        slot: u32,
        view: &Arc<dyn TextureView>,
        sampler: &Arc<dyn Sampler>,
    ) -> Result<()>;

    /// Bind a read-only shader resource view
    fn bind_shader_resource(&mut self, slot: u32, view: &Arc<dyn ResourceView>) -> Result<()>;

    /// Bind a read/write unordered access view
    fn bind_unordered_access(&mut self, slot: u32, view: &Arc<dyn ResourceView>) -> Result<()>;

    /// Bind a color render target
    fn bind_render_target(&mut self, slot: u32, view: &Arc<dyn RenderTargetView>) -> Result<()>;

    /// Bind the depth/stencil target
    fn bind_depth_stencil(&mut self, view: &Arc<dyn DepthStencilView>) -> Result<()>;

    /// Set the scissor rectangle
    fn set_scissor(&mut self, scissor: Rect2D) -> Result<()>;

    /// Set the stencil reference value
    fn set_stencil_reference(&mut self, reference: u32) -> Result<()>;

    /// Set the blend constant color
    fn set_blend_constants(&mut self, constants: [f32; 4]) -> Result<()>;

    /// Draw vertices
    ///
    /// # Arguments
    ///
    /// * `vertex_count` - Number of vertices to draw
    /// * `first_vertex` - Index of first vertex
    /// * `instance_count` - Number of instances to draw
    /// * `first_instance` - Index of first instance
    fn draw(
        &mut self,
        vertex_count: u32,
        first_vertex: u32,
        instance_count: u32,
        first_instance: u32,
    ) -> Result<()>;

    /// Draw indexed vertices
    ///
    /// # Arguments
    ///
    /// * `index_buffer` - Index buffer to read from
    /// * `index_type` - Type of indices (U16 or U32)
    /// * `index_count` - Number of indices to draw
    /// * `first_index` - Index of first index
    /// * `vertex_offset` - Value added to vertex index before indexing into the vertex buffer
    /// * `instance_count` - Number of instances to draw
    /// * `first_instance` - Index of first instance
    #[allow(clippy::too_many_arguments)]
    fn draw_indexed(
        &mut self,
        index_buffer: &Arc<dyn Buffer>,
        index_type: IndexType,
        index_count: u32,
        first_index: u32,
        vertex_offset: i32,
        instance_count: u32,
        first_instance: u32,
    ) -> Result<()>;
}

/// 2D rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect2D {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}
