/// Binder - the per-draw path
///
/// Walks the resolved slots and the runtime data in lockstep by position.
/// A validation pass checks every entry against its resolved kind and format
/// and the draw range against the bound buffers; only then does the emission
/// pass issue binds and the draw on the command list. Nothing here allocates
/// or looks up a name unless an error is being reported.

use std::sync::Arc;
use crate::error::{Error, Result};
use crate::graphics_device::{Buffer, BufferUsage, CommandList, IndexType, Rect2D};
use crate::pso::{
    ComponentId, ComponentKind, PipelineState, ResolvedFormat, ResolvedSlot, RuntimeResource,
    Schema, SchemaId, StructuredTypeId, VertexInputRate,
};

const SOURCE: &str = "galaxy3d::pso::Binder";

// ===== RUNTIME VIEW =====

/// Runtime resources, one per component in schema order
///
/// Built by the host for each draw and never retained by the pipeline.
/// `clear` empties every entry while keeping the storage.
#[derive(Debug, Clone)]
pub struct RuntimeData {
    schema: Schema,
    entries: Vec<Option<RuntimeResource>>,
}

impl RuntimeData {
    /// Empty runtime data sized for a schema
    pub fn for_schema(schema: &Schema) -> Self {
        Self {
            schema: schema.clone(),
            entries: vec![None; schema.len()],
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn schema_id(&self) -> SchemaId {
        self.schema.id()
    }

    /// Supply the resource of a named component
    ///
    /// The resource kind is checked at draw time, not here.
    ///
    /// # Errors
    ///
    /// `UnknownComponent` if the schema has no such component.
    pub fn set(&mut self, name: &str, resource: RuntimeResource) -> Result<&mut Self> {
        let id = match self.schema.require(name) {
            Ok(id) => id,
            Err(e) => crate::engine_bail!(SOURCE, e),
        };
        self.entries[id.index()] = Some(resource);
        Ok(self)
    }

    /// Supply the resource of a component by id
    pub fn set_at(&mut self, id: ComponentId, resource: RuntimeResource) -> Result<&mut Self> {
        let id = match self.schema.check_id(id) {
            Ok(id) => id,
            Err(e) => crate::engine_bail!(SOURCE, e),
        };
        self.entries[id.index()] = Some(resource);
        Ok(self)
    }

    pub fn get(&self, id: ComponentId) -> Option<&RuntimeResource> {
        self.entries.get(id.index()).and_then(|e| e.as_ref())
    }

    /// Remove every resource, keeping the storage for the next draw
    pub fn clear(&mut self) {
        self.entries.iter_mut().for_each(|entry| *entry = None);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn entries(&self) -> &[Option<RuntimeResource>] {
        &self.entries
    }
}

// ===== DRAW DESCRIPTION =====

/// Vertices or indices consumed by one draw
#[derive(Clone)]
pub enum DrawRange {
    Vertices {
        first: u32,
        count: u32,
    },
    Indexed {
        buffer: Arc<dyn Buffer>,
        index_type: IndexType,
        first: u32,
        count: u32,
        /// Added to each index before reading the vertex buffers
        vertex_offset: i32,
    },
}

/// One draw call
#[derive(Clone)]
pub struct DrawDesc {
    pub range: DrawRange,
    pub first_instance: u32,
    pub instance_count: u32,
}

impl DrawDesc {
    /// Non-indexed draw of one instance
    pub fn vertices(first: u32, count: u32) -> Self {
        Self {
            range: DrawRange::Vertices { first, count },
            first_instance: 0,
            instance_count: 1,
        }
    }

    /// Indexed draw of one instance
    pub fn indexed(buffer: Arc<dyn Buffer>, index_type: IndexType, first: u32, count: u32) -> Self {
        Self {
            range: DrawRange::Indexed { buffer, index_type, first, count, vertex_offset: 0 },
            first_instance: 0,
            instance_count: 1,
        }
    }

    /// Set the vertex offset of an indexed draw
    pub fn with_vertex_offset(mut self, offset: i32) -> Self {
        if let DrawRange::Indexed { vertex_offset, .. } = &mut self.range {
            *vertex_offset = offset;
        }
        self
    }

    /// Draw several instances
    pub fn with_instances(mut self, first: u32, count: u32) -> Self {
        self.first_instance = first;
        self.instance_count = count;
        self
    }
}

/// Draw state that is not part of the pipeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NonPipelineState {
    pub scissor: Rect2D,
    pub stencil_reference: u32,
    pub blend_constants: [f32; 4],
}

impl NonPipelineState {
    /// State with the given scissor, stencil reference 0 and zero blend constants
    pub fn new(scissor: Rect2D) -> Self {
        Self { scissor, stencil_reference: 0, blend_constants: [0.0; 4] }
    }

    pub fn with_stencil_reference(mut self, reference: u32) -> Self {
        self.stencil_reference = reference;
        self
    }

    pub fn with_blend_constants(mut self, constants: [f32; 4]) -> Self {
        self.blend_constants = constants;
        self
    }
}

/// Work done by one draw call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DrawStats {
    /// Component records read during validation
    pub components_visited: usize,
    /// Per-component bind operations emitted (pipeline bind excluded)
    pub binds_emitted: usize,
}

/// Smallest element count among bound buffers of one input rate
#[derive(Clone, Copy)]
struct Capacity {
    index: usize,
    elements: u64,
}

// ===== DRAW =====

impl PipelineState {
    /// Bind runtime data and issue one draw
    ///
    /// Nothing is recorded on `cmd` unless validation of every component and
    /// of the draw range succeeds.
    ///
    /// # Errors
    ///
    /// - `SchemaMismatch` if `data` was built for another schema
    /// - `MissingRuntimeResource` if a component has no resource
    /// - `ResourceKindMismatch` if a resource has the wrong shape or usage
    /// - `ResourceFormatMismatch` if a resource has the wrong layout or format
    /// - `DrawRangeOutOfBounds` if the draw reads past a bound buffer
    /// - any error returned by the command list
    pub fn draw(
        &self,
        cmd: &mut dyn CommandList,
        data: &RuntimeData,
        draw: &DrawDesc,
        state: &NonPipelineState,
    ) -> Result<DrawStats> {
        let components_visited = self.validate_draw(data, draw)?;

        cmd.bind_pipeline(self)?;

        let mut binds_emitted = 0;
        for (slot, entry) in self.binding().slots().iter().zip(data.entries()) {
            let (Some(index), Some(resource)) = (slot.slot, entry) else {
                continue;
            };
            match resource {
                RuntimeResource::VertexBuffer(buffer) => cmd.bind_vertex_buffer(index, buffer)?,
                RuntimeResource::ConstantBuffer(buffer) => cmd.bind_constant_buffer(index, buffer)?,
                RuntimeResource::TextureSampler(view, sampler) => {
                    cmd.bind_texture_sampler(index, view, sampler)?
                }
                RuntimeResource::ShaderResource(view) => cmd.bind_shader_resource(index, view)?,
                RuntimeResource::UnorderedAccess(view) => cmd.bind_unordered_access(index, view)?,
                RuntimeResource::RenderTarget(view) => cmd.bind_render_target(index, view)?,
                RuntimeResource::DepthStencil(view) => cmd.bind_depth_stencil(view)?,
            }
            binds_emitted += 1;
        }

        cmd.set_scissor(state.scissor)?;
        cmd.set_stencil_reference(state.stencil_reference)?;
        cmd.set_blend_constants(state.blend_constants)?;

        match &draw.range {
            DrawRange::Vertices { first, count } => {
                cmd.draw(*count, *first, draw.instance_count, draw.first_instance)?
            }
            DrawRange::Indexed { buffer, index_type, first, count, vertex_offset } => {
                cmd.draw_indexed(
                    buffer,
                    *index_type,
                    *count,
                    *first,
                    *vertex_offset,
                    draw.instance_count,
                    draw.first_instance,
                )?
            }
        }

        crate::engine_trace!(SOURCE, "Draw on '{}': {} components, {} binds",
            self.schema().name(), components_visited, binds_emitted);

        Ok(DrawStats { components_visited, binds_emitted })
    }

    /// Check runtime data and draw range; returns the number of records visited
    fn validate_draw(&self, data: &RuntimeData, draw: &DrawDesc) -> Result<usize> {
        if data.schema_id() != self.schema().id() {
            crate::engine_bail!(SOURCE, Error::SchemaMismatch {
                expected: self.schema().name().to_string(),
                found: data.schema().name().to_string(),
            });
        }

        let mut visited = 0;
        let mut per_vertex: Option<Capacity> = None;
        let mut per_instance: Option<Capacity> = None;

        for (index, (slot, entry)) in self.binding().slots().iter().zip(data.entries()).enumerate() {
            visited += 1;

            let resource = match entry {
                Some(resource) => resource,
                None => crate::engine_bail!(SOURCE,
                    Error::MissingRuntimeResource(self.component_name(index))),
            };
            self.check_resource(index, slot, resource)?;

            if let (
                Some(_),
                ResolvedFormat::Vertex { stride, input_rate, .. },
                RuntimeResource::VertexBuffer(buffer),
            ) = (slot.slot, slot.format, resource)
            {
                let elements = buffer.size().checked_div(stride as u64).unwrap_or(0);
                let capacity = match input_rate {
                    VertexInputRate::Vertex => &mut per_vertex,
                    VertexInputRate::Instance => &mut per_instance,
                };
                if capacity.map_or(true, |c| elements < c.elements) {
                    *capacity = Some(Capacity { index, elements });
                }
            }
        }

        self.check_draw_range(draw, per_vertex, per_instance)?;

        Ok(visited)
    }

    fn check_resource(&self, index: usize, slot: &ResolvedSlot, resource: &RuntimeResource) -> Result<()> {
        if !slot.kind.accepts(resource) {
            return Err(self.kind_mismatch(index, slot.kind, resource.kind_name()));
        }

        match (slot.format, resource) {
            (ResolvedFormat::Vertex { layout, .. }, RuntimeResource::VertexBuffer(buffer)) => {
                self.check_buffer(index, slot.kind, buffer.as_ref(), layout, 0)
            }
            (ResolvedFormat::Constant { layout, size }, RuntimeResource::ConstantBuffer(buffer)) => {
                self.check_buffer(index, slot.kind, buffer.as_ref(), layout, size as u64)
            }
            (
                ResolvedFormat::Sampled { sample_type, comparison },
                RuntimeResource::TextureSampler(view, sampler),
            ) => {
                if view.format().sample_type() != sample_type {
                    return Err(self.format_mismatch(index, format!(
                        "texture {:?} samples as {:?}, shader reads {:?}",
                        view.format(), view.format().sample_type(), sample_type
                    )));
                }
                if sampler.sampler_type().is_comparison() != comparison {
                    return Err(self.format_mismatch(index, format!(
                        "sampler {:?} does not match the resolved comparison mode",
                        sampler.sampler_type()
                    )));
                }
                Ok(())
            }
            (
                ResolvedFormat::View(format),
                RuntimeResource::ShaderResource(view) | RuntimeResource::UnorderedAccess(view),
            ) => {
                if Some(view.access()) != resource.required_access() {
                    let found = match slot.kind {
                        ComponentKind::UnorderedAccess => "read-only view",
                        _ => "read/write view",
                    };
                    return Err(self.kind_mismatch(index, slot.kind, found));
                }
                if view.view_format() != format {
                    return Err(self.format_mismatch(index, format!(
                        "view is {:?}, shader expects {:?}", view.view_format(), format
                    )));
                }
                Ok(())
            }
            (ResolvedFormat::Color(format), RuntimeResource::RenderTarget(view)) => {
                if view.format() != format {
                    return Err(self.format_mismatch(index, format!(
                        "target is {:?}, pipeline expects {:?}", view.format(), format
                    )));
                }
                Ok(())
            }
            (ResolvedFormat::DepthStencil(format), RuntimeResource::DepthStencil(view)) => {
                if view.format() != format {
                    return Err(self.format_mismatch(index, format!(
                        "depth target is {:?}, pipeline expects {:?}", view.format(), format
                    )));
                }
                Ok(())
            }
            _ => Err(self.kind_mismatch(index, slot.kind, resource.kind_name())),
        }
    }

    /// Usage, element layout and minimum size of a vertex or constant buffer
    fn check_buffer(
        &self,
        index: usize,
        kind: ComponentKind,
        buffer: &dyn Buffer,
        layout: StructuredTypeId,
        min_size: u64,
    ) -> Result<()> {
        let (usage, found) = match kind {
            ComponentKind::ConstantBuffer => (BufferUsage::UNIFORM, "buffer without UNIFORM usage"),
            _ => (BufferUsage::VERTEX, "buffer without VERTEX usage"),
        };
        if !buffer.usage().contains(usage) {
            return Err(self.kind_mismatch(index, kind, found));
        }
        if buffer.element_layout() != Some(layout) {
            return Err(self.format_mismatch(index, format!(
                "buffer element layout {:?} differs from resolved layout {:?}",
                buffer.element_layout(), layout
            )));
        }
        if buffer.size() < min_size {
            return Err(self.format_mismatch(index, format!(
                "buffer holds {} bytes, record needs {}", buffer.size(), min_size
            )));
        }
        Ok(())
    }

    fn check_draw_range(
        &self,
        draw: &DrawDesc,
        per_vertex: Option<Capacity>,
        per_instance: Option<Capacity>,
    ) -> Result<()> {
        match &draw.range {
            DrawRange::Vertices { first, count } => {
                if let Some(capacity) = per_vertex {
                    self.check_range(capacity, *first, *count)?;
                }
            }
            DrawRange::Indexed { buffer, index_type, first, count, .. } => {
                if !buffer.usage().contains(BufferUsage::INDEX) {
                    crate::engine_bail!(SOURCE, Error::ResourceKindMismatch {
                        component: "index buffer".to_string(),
                        expected: "index buffer",
                        found: "buffer without INDEX usage",
                    });
                }
                let available = buffer.size() / index_type.size_bytes() as u64;
                let requested = *first as u64 + *count as u64;
                if requested > available {
                    crate::engine_bail!(SOURCE, Error::DrawRangeOutOfBounds {
                        component: "index buffer".to_string(),
                        requested,
                        available,
                    });
                }
            }
        }

        if let Some(capacity) = per_instance {
            self.check_range(capacity, draw.first_instance, draw.instance_count)?;
        }

        Ok(())
    }

    fn check_range(&self, capacity: Capacity, first: u32, count: u32) -> Result<()> {
        let requested = first as u64 + count as u64;
        if requested > capacity.elements {
            crate::engine_bail!(SOURCE, Error::DrawRangeOutOfBounds {
                component: self.component_name(capacity.index),
                requested,
                available: capacity.elements,
            });
        }
        Ok(())
    }

    // ===== ERROR HELPERS =====

    fn component_name(&self, index: usize) -> String {
        self.schema().components()[index].name().to_string()
    }

    fn kind_mismatch(&self, index: usize, expected: ComponentKind, found: &'static str) -> Error {
        crate::engine_err!(SOURCE, Error::ResourceKindMismatch {
            component: self.component_name(index),
            expected: expected.name(),
            found,
        })
    }

    fn format_mismatch(&self, index: usize, reason: String) -> Error {
        crate::engine_err!(SOURCE, Error::ResourceFormatMismatch {
            component: self.component_name(index),
            reason,
        })
    }
}

#[cfg(test)]
#[path = "binder_tests.rs"]
mod tests;
