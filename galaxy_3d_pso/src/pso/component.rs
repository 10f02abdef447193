/// Component kinds and the per-kind value shapes of the three schema views
///
/// Every component of a schema has one ComponentKind. The kind decides which
/// DeclValue variant configures it, which ResolvedFormat the resolver records
/// for it, and which RuntimeResource variant the binder accepts for it.

use std::fmt;
use std::sync::Arc;
use crate::graphics_device::{
    Buffer, TextureView, Sampler, ResourceView, RenderTargetView, DepthStencilView,
    TextureFormat, DepthFormat, SampleType, SamplerType, ViewFormat, ViewAccess,
};
use crate::pso::{StructuredTypeId, ColorWriteMask, ColorBlendState, DepthStencilState};

// ===== KIND =====

/// Closed set of component kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// Vertex buffer carrying structured per-vertex or per-instance records
    VertexBuffer,
    /// Constant buffer carrying one structured record
    ConstantBuffer,
    /// Sampled texture paired with its sampler
    TextureSampler,
    /// Read-only shader resource view
    ShaderResource,
    /// Read/write unordered access view
    UnorderedAccess,
    /// Color target without blending
    RenderTarget,
    /// Color target with a blend equation
    BlendRenderTarget,
    /// Depth/stencil target
    DepthStencilTarget,
}

impl ComponentKind {
    /// All kinds, in declaration order
    pub const ALL: [ComponentKind; 8] = [
        ComponentKind::VertexBuffer,
        ComponentKind::ConstantBuffer,
        ComponentKind::TextureSampler,
        ComponentKind::ShaderResource,
        ComponentKind::UnorderedAccess,
        ComponentKind::RenderTarget,
        ComponentKind::BlendRenderTarget,
        ComponentKind::DepthStencilTarget,
    ];

    /// Human-readable kind name
    pub fn name(&self) -> &'static str {
        match self {
            ComponentKind::VertexBuffer => "vertex buffer",
            ComponentKind::ConstantBuffer => "constant buffer",
            ComponentKind::TextureSampler => "texture sampler",
            ComponentKind::ShaderResource => "shader resource",
            ComponentKind::UnorderedAccess => "unordered access",
            ComponentKind::RenderTarget => "render target",
            ComponentKind::BlendRenderTarget => "blend render target",
            ComponentKind::DepthStencilTarget => "depth/stencil target",
        }
    }

    /// Whether the kind requires a structured layout
    pub fn is_structured(&self) -> bool {
        matches!(self, ComponentKind::VertexBuffer | ComponentKind::ConstantBuffer)
    }

    /// Whether the kind binds to a fragment color output
    pub fn is_color_target(&self) -> bool {
        matches!(self, ComponentKind::RenderTarget | ComponentKind::BlendRenderTarget)
    }

    /// Whether a runtime resource has the shape this kind binds
    ///
    /// Plain and blending render targets share one runtime shape.
    pub fn accepts(&self, resource: &RuntimeResource) -> bool {
        matches!(
            (self, resource),
            (ComponentKind::VertexBuffer, RuntimeResource::VertexBuffer(_))
                | (ComponentKind::ConstantBuffer, RuntimeResource::ConstantBuffer(_))
                | (ComponentKind::TextureSampler, RuntimeResource::TextureSampler(_, _))
                | (ComponentKind::ShaderResource, RuntimeResource::ShaderResource(_))
                | (ComponentKind::UnorderedAccess, RuntimeResource::UnorderedAccess(_))
                | (ComponentKind::RenderTarget, RuntimeResource::RenderTarget(_))
                | (ComponentKind::BlendRenderTarget, RuntimeResource::RenderTarget(_))
                | (ComponentKind::DepthStencilTarget, RuntimeResource::DepthStencil(_))
        )
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Vertex buffer stepping rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VertexInputRate {
    /// Data is per-vertex
    #[default]
    Vertex,
    /// Data is per-instance
    Instance,
}

// ===== DECLARATION VIEW =====

/// Value configuring one component when a pipeline state is built
#[derive(Debug, Clone, PartialEq)]
pub enum DeclValue {
    VertexBuffer {
        input_rate: VertexInputRate,
    },
    ConstantBuffer {
        /// Block name in the shader
        shader_name: String,
    },
    TextureSampler {
        /// Texture name in the shader
        shader_name: String,
        /// Sampler configuration the shader expects
        sampler: SamplerType,
    },
    ShaderResource {
        shader_name: String,
    },
    UnorderedAccess {
        shader_name: String,
    },
    RenderTarget {
        format: TextureFormat,
        write_mask: ColorWriteMask,
    },
    BlendRenderTarget {
        format: TextureFormat,
        write_mask: ColorWriteMask,
        blend: ColorBlendState,
    },
    DepthStencilTarget {
        format: DepthFormat,
        state: DepthStencilState,
    },
}

impl DeclValue {
    /// Per-vertex buffer
    pub fn vertex_buffer(input_rate: VertexInputRate) -> Self {
        DeclValue::VertexBuffer { input_rate }
    }

    pub fn constant_buffer(shader_name: impl Into<String>) -> Self {
        DeclValue::ConstantBuffer { shader_name: shader_name.into() }
    }

    pub fn texture_sampler(shader_name: impl Into<String>, sampler: SamplerType) -> Self {
        DeclValue::TextureSampler { shader_name: shader_name.into(), sampler }
    }

    pub fn shader_resource(shader_name: impl Into<String>) -> Self {
        DeclValue::ShaderResource { shader_name: shader_name.into() }
    }

    pub fn unordered_access(shader_name: impl Into<String>) -> Self {
        DeclValue::UnorderedAccess { shader_name: shader_name.into() }
    }

    /// Color target writing all channels
    pub fn render_target(format: TextureFormat) -> Self {
        DeclValue::RenderTarget { format, write_mask: ColorWriteMask::ALL }
    }

    /// Blending color target writing all channels
    pub fn blend_render_target(format: TextureFormat, blend: ColorBlendState) -> Self {
        DeclValue::BlendRenderTarget { format, write_mask: ColorWriteMask::ALL, blend }
    }

    pub fn depth_stencil(format: DepthFormat, state: DepthStencilState) -> Self {
        DeclValue::DepthStencilTarget { format, state }
    }

    /// Kind of component this value configures
    pub fn kind(&self) -> ComponentKind {
        match self {
            DeclValue::VertexBuffer { .. } => ComponentKind::VertexBuffer,
            DeclValue::ConstantBuffer { .. } => ComponentKind::ConstantBuffer,
            DeclValue::TextureSampler { .. } => ComponentKind::TextureSampler,
            DeclValue::ShaderResource { .. } => ComponentKind::ShaderResource,
            DeclValue::UnorderedAccess { .. } => ComponentKind::UnorderedAccess,
            DeclValue::RenderTarget { .. } => ComponentKind::RenderTarget,
            DeclValue::BlendRenderTarget { .. } => ComponentKind::BlendRenderTarget,
            DeclValue::DepthStencilTarget { .. } => ComponentKind::DepthStencilTarget,
        }
    }

    /// Shader-visible name, for kinds matched by name
    pub fn shader_name(&self) -> Option<&str> {
        match self {
            DeclValue::ConstantBuffer { shader_name }
            | DeclValue::TextureSampler { shader_name, .. }
            | DeclValue::ShaderResource { shader_name }
            | DeclValue::UnorderedAccess { shader_name } => Some(shader_name),
            _ => None,
        }
    }
}

// ===== RESOLVED VIEW =====

/// Format recorded for a component at resolution time
///
/// The binder compares the tag of each runtime resource with this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolvedFormat {
    Vertex {
        layout: StructuredTypeId,
        stride: u32,
        input_rate: VertexInputRate,
    },
    Constant {
        layout: StructuredTypeId,
        size: u32,
    },
    Sampled {
        sample_type: SampleType,
        /// The shader samples with a comparison sampler
        comparison: bool,
    },
    View(ViewFormat),
    Color(TextureFormat),
    DepthStencil(DepthFormat),
}

// ===== RUNTIME VIEW =====

/// Resource handle supplied for one component at draw time
#[derive(Clone)]
pub enum RuntimeResource {
    VertexBuffer(Arc<dyn Buffer>),
    ConstantBuffer(Arc<dyn Buffer>),
    TextureSampler(Arc<dyn TextureView>, Arc<dyn Sampler>),
    ShaderResource(Arc<dyn ResourceView>),
    UnorderedAccess(Arc<dyn ResourceView>),
    /// Used by both plain and blending render targets
    RenderTarget(Arc<dyn RenderTargetView>),
    DepthStencil(Arc<dyn DepthStencilView>),
}

impl RuntimeResource {
    pub fn vertex_buffer(buffer: Arc<dyn Buffer>) -> Self {
        RuntimeResource::VertexBuffer(buffer)
    }

    pub fn constant_buffer(buffer: Arc<dyn Buffer>) -> Self {
        RuntimeResource::ConstantBuffer(buffer)
    }

    pub fn texture_sampler(view: Arc<dyn TextureView>, sampler: Arc<dyn Sampler>) -> Self {
        RuntimeResource::TextureSampler(view, sampler)
    }

    pub fn shader_resource(view: Arc<dyn ResourceView>) -> Self {
        RuntimeResource::ShaderResource(view)
    }

    pub fn unordered_access(view: Arc<dyn ResourceView>) -> Self {
        RuntimeResource::UnorderedAccess(view)
    }

    pub fn render_target(view: Arc<dyn RenderTargetView>) -> Self {
        RuntimeResource::RenderTarget(view)
    }

    pub fn depth_stencil(view: Arc<dyn DepthStencilView>) -> Self {
        RuntimeResource::DepthStencil(view)
    }

    /// Short description of the handle, used in error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            RuntimeResource::VertexBuffer(_) => "vertex buffer",
            RuntimeResource::ConstantBuffer(_) => "constant buffer",
            RuntimeResource::TextureSampler(_, _) => "texture/sampler pair",
            RuntimeResource::ShaderResource(_) => "shader resource view",
            RuntimeResource::UnorderedAccess(_) => "unordered access view",
            RuntimeResource::RenderTarget(_) => "render target view",
            RuntimeResource::DepthStencil(_) => "depth/stencil view",
        }
    }

    /// Access a view must grant for this handle shape, if it wraps a view
    pub(crate) fn required_access(&self) -> Option<ViewAccess> {
        match self {
            RuntimeResource::ShaderResource(_) => Some(ViewAccess::ReadOnly),
            RuntimeResource::UnorderedAccess(_) => Some(ViewAccess::ReadWrite),
            _ => None,
        }
    }
}

impl fmt::Debug for RuntimeResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RuntimeResource({})", self.kind_name())
    }
}

#[cfg(test)]
#[path = "component_tests.rs"]
mod tests;
