#![allow(dead_code)]
//! Test utilities shared by the integration tests
//!
//! Backend stand-ins built on the public handle traits only: tagged handles
//! and a command list that records every call as a string.

use galaxy_3d_pso::galaxy3d::Result;
use galaxy_3d_pso::galaxy3d::pso::{PipelineState, StructuredTypeId};
use galaxy_3d_pso::galaxy3d::render::{
    Buffer, BufferUsage, CommandList, DepthFormat, DepthStencilView, IndexType, Rect2D,
    RenderTargetView, ResourceView, Sampler, SamplerType, TextureFormat, TextureView,
    ViewAccess, ViewFormat,
};
use std::sync::Arc;

// ============================================================================
// HANDLES
// ============================================================================

pub struct TestBuffer {
    pub size: u64,
    pub usage: BufferUsage,
    pub layout: Option<StructuredTypeId>,
}

impl Buffer for TestBuffer {
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

pub struct TestTexture(pub TextureFormat);

impl TextureView for TestTexture {
    fn format(&self) -> TextureFormat {
        self.0
    }
}

impl RenderTargetView for TestTexture {
    fn format(&self) -> TextureFormat {
        self.0
    }
}

pub struct TestSampler(pub SamplerType);

impl Sampler for TestSampler {
    fn sampler_type(&self) -> SamplerType {
        self.0
    }
}

pub struct TestView(pub ViewFormat, pub ViewAccess);

impl ResourceView for TestView {
    fn view_format(&self) -> ViewFormat {
        self.0
    }

    fn access(&self) -> ViewAccess {
        self.1
    }
}

pub struct TestDepth(pub DepthFormat);

impl DepthStencilView for TestDepth {
    fn format(&self) -> DepthFormat {
        self.0
    }
}

pub fn vertex_buffer(size: u64, layout: StructuredTypeId) -> Arc<dyn Buffer> {
    Arc::new(TestBuffer { size, usage: BufferUsage::VERTEX, layout: Some(layout) })
}

pub fn constant_buffer(size: u64, layout: StructuredTypeId) -> Arc<dyn Buffer> {
    Arc::new(TestBuffer { size, usage: BufferUsage::UNIFORM, layout: Some(layout) })
}

pub fn index_buffer(size: u64) -> Arc<dyn Buffer> {
    Arc::new(TestBuffer { size, usage: BufferUsage::INDEX, layout: None })
}

pub fn color_target(format: TextureFormat) -> Arc<dyn RenderTargetView> {
    Arc::new(TestTexture(format))
}

pub fn texture(format: TextureFormat) -> Arc<dyn TextureView> {
    Arc::new(TestTexture(format))
}

pub fn sampler(sampler_type: SamplerType) -> Arc<dyn Sampler> {
    Arc::new(TestSampler(sampler_type))
}

pub fn full_scissor() -> Rect2D {
    Rect2D { x: 0, y: 0, width: 800, height: 600 }
}

// ============================================================================
// RECORDING COMMAND LIST
// ============================================================================

/// Command list that records calls instead of submitting them
#[derive(Default)]
pub struct RecordingCommandList {
    pub commands: Vec<String>,
}

impl RecordingCommandList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded commands whose name starts with `prefix`
    pub fn count(&self, prefix: &str) -> usize {
        self.commands.iter().filter(|c| c.starts_with(prefix)).count()
    }
}

impl CommandList for RecordingCommandList {
    fn bind_pipeline(&mut self, pipeline: &PipelineState) -> Result<()> {
        self.commands.push(format!("bind_pipeline({})", pipeline.schema().name()));
        Ok(())
    }

    fn bind_vertex_buffer(&mut self, slot: u32, _buffer: &Arc<dyn Buffer>) -> Result<()> {
        self.commands.push(format!("bind_vertex_buffer({})", slot));
        Ok(())
    }

    fn bind_constant_buffer(&mut self, slot: u32, _buffer: &Arc<dyn Buffer>) -> Result<()> {
        self.commands.push(format!("bind_constant_buffer({})", slot));
        Ok(())
    }

    fn bind_texture_sampler(
        &mut self,
        slot: u32,
        _view: &Arc<dyn TextureView>,
        _sampler: &Arc<dyn Sampler>,
    ) -> Result<()> {
        self.commands.push(format!("bind_texture_sampler({})", slot));
        Ok(())
    }

    fn bind_shader_resource(&mut self, slot: u32, _view: &Arc<dyn ResourceView>) -> Result<()> {
        self.commands.push(format!("bind_shader_resource({})", slot));
        Ok(())
    }

    fn bind_unordered_access(&mut self, slot: u32, _view: &Arc<dyn ResourceView>) -> Result<()> {
        self.commands.push(format!("bind_unordered_access({})", slot));
        Ok(())
    }

    fn bind_render_target(&mut self, slot: u32, _view: &Arc<dyn RenderTargetView>) -> Result<()> {
        self.commands.push(format!("bind_render_target({})", slot));
        Ok(())
    }

    fn bind_depth_stencil(&mut self, _view: &Arc<dyn DepthStencilView>) -> Result<()> {
        self.commands.push("bind_depth_stencil".to_string());
        Ok(())
    }

    fn set_scissor(&mut self, scissor: Rect2D) -> Result<()> {
        self.commands.push(format!(
            "set_scissor({},{},{},{})",
            scissor.x, scissor.y, scissor.width, scissor.height
        ));
        Ok(())
    }

    fn set_stencil_reference(&mut self, reference: u32) -> Result<()> {
        self.commands.push(format!("set_stencil_reference({})", reference));
        Ok(())
    }

    fn set_blend_constants(&mut self, constants: [f32; 4]) -> Result<()> {
        self.commands.push(format!("set_blend_constants({:?})", constants));
        Ok(())
    }

    fn draw(
        &mut self,
        vertex_count: u32,
        first_vertex: u32,
        instance_count: u32,
        first_instance: u32,
    ) -> Result<()> {
        self.commands.push(format!(
            "draw({},{},{},{})",
            vertex_count, first_vertex, instance_count, first_instance
        ));
        Ok(())
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
        self.commands.push(format!(
            "draw_indexed({:?},{},{},{},{},{})",
            index_type, index_count, first_index, vertex_offset, instance_count, first_instance
        ));
        Ok(())
    }
}
