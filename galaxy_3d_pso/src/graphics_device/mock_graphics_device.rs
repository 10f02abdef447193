/// Mock graphics device for unit tests (no GPU required)
///
/// Mock handles expose fixed tags; MockCommandList records every call as a
/// string so tests can assert on the exact command sequence.

#[cfg(test)]
use std::sync::Arc;

#[cfg(test)]
use crate::graphics_device::{
    Buffer, BufferUsage, IndexType, TextureView, Sampler, ResourceView, RenderTargetView,
    DepthStencilView, CommandList, Rect2D, TextureFormat, DepthFormat, SamplerType,
    ViewFormat, ViewAccess,
};
#[cfg(test)]
use crate::pso::{PipelineState, StructuredTypeId};
#[cfg(test)]
use crate::error::{Error, Result};

// ============================================================================
// Mock Buffer
// ============================================================================

#[cfg(test)]
#[derive(Debug)]
pub struct MockBuffer {
    pub size: u64,
    pub usage: BufferUsage,
    pub layout: Option<StructuredTypeId>,
}

#[cfg(test)]
impl MockBuffer {
    pub fn new(size: u64, usage: BufferUsage, layout: Option<StructuredTypeId>) -> Self {
        Self { size, usage, layout }
    }
}

#[cfg(test)]
impl Buffer for MockBuffer {
    fn size(&self) -> u64 {
        self.size
    }

    fn usage(&self) -> BufferUsage {
        self.usage
    }

    fn element_layout(&self) -> Option<StructuredTypeId> {
        self.layout
    }
}

// ============================================================================
// Mock Views and Sampler
// ============================================================================

#[cfg(test)]
#[derive(Debug)]
pub struct MockTextureView {
    pub format: TextureFormat,
}

#[cfg(test)]
impl MockTextureView {
    pub fn new(format: TextureFormat) -> Self {
        Self { format }
    }
}

#[cfg(test)]
impl TextureView for MockTextureView {
    fn format(&self) -> TextureFormat {
        self.format
    }
}

#[cfg(test)]
#[derive(Debug)]
pub struct MockSampler {
    pub sampler_type: SamplerType,
}

#[cfg(test)]
impl MockSampler {
    pub fn new(sampler_type: SamplerType) -> Self {
        Self { sampler_type }
    }
}

#[cfg(test)]
impl Sampler for MockSampler {
    fn sampler_type(&self) -> SamplerType {
        self.sampler_type
    }
}

#[cfg(test)]
#[derive(Debug)]
pub struct MockResourceView {
    pub format: ViewFormat,
    pub access: ViewAccess,
}

#[cfg(test)]
impl MockResourceView {
    pub fn new(format: ViewFormat, access: ViewAccess) -> Self {
        Self { format, access }
    }
}

#[cfg(test)]
impl ResourceView for MockResourceView {
    fn view_format(&self) -> ViewFormat {
        self.format
    }

    fn access(&self) -> ViewAccess {
        self.access
    }
}

#[cfg(test)]
#[derive(Debug)]
pub struct MockRenderTargetView {
    pub format: TextureFormat,
}

#[cfg(test)]
impl MockRenderTargetView {
    pub fn new(format: TextureFormat) -> Self {
        Self { format }
    }
}

#[cfg(test)]
impl RenderTargetView for MockRenderTargetView {
    fn format(&self) -> TextureFormat {
        self.format
    }
}

#[cfg(test)]
#[derive(Debug)]
pub struct MockDepthStencilView {
    pub format: DepthFormat,
}

#[cfg(test)]
impl MockDepthStencilView {
    pub fn new(format: DepthFormat) -> Self {
        Self { format }
    }
}

#[cfg(test)]
impl DepthStencilView for MockDepthStencilView {
    fn format(&self) -> DepthFormat {
        self.format
    }
}

// ============================================================================
// Mock CommandList
// ============================================================================

#[cfg(test)]
#[derive(Debug, Default)]
pub struct MockCommandList {
    pub commands: Vec<String>,
    /// Command name that fails with a BackendError when recorded
    pub fail_on: Option<&'static str>,
}

#[cfg(test)]
impl MockCommandList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Command list that rejects one command
    pub fn failing_on(command: &'static str) -> Self {
        Self { commands: Vec::new(), fail_on: Some(command) }
    }

    fn record(&mut self, name: &str, command: String) -> Result<()> {
        if self.fail_on == Some(name) {
            return Err(Error::BackendError(format!("{} rejected", name)));
        }
        self.commands.push(command);
        Ok(())
    }
}

#[cfg(test)]
impl CommandList for MockCommandList {
    fn bind_pipeline(&mut self, pipeline: &PipelineState) -> Result<()> {
        self.record("bind_pipeline", format!("bind_pipeline({})", pipeline.schema().name()))
    }

    fn bind_vertex_buffer(&mut self, slot: u32, _buffer: &Arc<dyn Buffer>) -> Result<()> {
        self.record("bind_vertex_buffer", format!("bind_vertex_buffer({})", slot))
    }

    fn bind_constant_buffer(&mut self, slot: u32, _buffer: &Arc<dyn Buffer>) -> Result<()> {
        self.record("bind_constant_buffer", format!("bind_constant_buffer({})", slot))
    }

    fn bind_texture_sampler(
        &mut self,
        slot: u32,
        _view: &Arc<dyn TextureView>,
        _sampler: &Arc<dyn Sampler>,
    ) -> Result<()> {
        self.record("bind_texture_sampler", format!("bind_texture_sampler({})", slot))
    }

    fn bind_shader_resource(&mut self, slot: u32, _view: &Arc<dyn ResourceView>) -> Result<()> {
        self.record("bind_shader_resource", format!("bind_shader_resource({})", slot))
    }

    fn bind_unordered_access(&mut self, slot: u32, _view: &Arc<dyn ResourceView>) -> Result<()> {
        self.record("bind_unordered_access", format!("bind_unordered_access({})", slot))
    }

    fn bind_render_target(&mut self, slot: u32, _view: &Arc<dyn RenderTargetView>) -> Result<()> {
        self.record("bind_render_target", format!("bind_render_target({})", slot))
    }

    fn bind_depth_stencil(&mut self, _view: &Arc<dyn DepthStencilView>) -> Result<()> {
        self.record("bind_depth_stencil", "bind_depth_stencil".to_string())
    }

    fn set_scissor(&mut self, scissor: Rect2D) -> Result<()> {
        self.record("set_scissor", format!(
            "set_scissor({},{},{},{})",
            scissor.x, scissor.y, scissor.width, scissor.height
        ))
    }

    fn set_stencil_reference(&mut self, reference: u32) -> Result<()> {
        self.record("set_stencil_reference", format!("set_stencil_reference({})", reference))
    }

    fn set_blend_constants(&mut self, constants: [f32; 4]) -> Result<()> {
        self.record("set_blend_constants", format!("set_blend_constants({:?})", constants))
    }

    fn draw(
        &mut self,
        vertex_count: u32,
        first_vertex: u32,
        instance_count: u32,
        first_instance: u32,
    ) -> Result<()> {
        self.record("draw", format!(
            "draw({},{},{},{})",
            vertex_count, first_vertex, instance_count, first_instance
        ))
    }

    fn draw_indexed(
        &mut self,
        _index_buffer: &Arc<dyn Buffer>,
        index_type: IndexType,
        index_count: u32,
        first_index: u32,
        vertex_offset: i32,
        instance_count: u32,
        first_instance: u32,
    ) -> Result<()> {
        self.record("draw_indexed", format!(
            "draw_indexed({:?},{},{},{},{},{})",
            index_type, index_count, first_index, vertex_offset, instance_count, first_instance
        ))
    }
}

#[cfg(test)]
#[path = "mock_graphics_device_tests.rs"]
mod tests;
