/// PipelineState - a resolved binding frozen with its fixed-function state
///
/// Built once from a PipelineStateDesc; immutable afterwards and shareable
/// across draw threads through `Arc`. Draw-time binding lives in binder.rs.

use crate::error::Result;
use crate::pso::{
    resolve, ColorTargetState, Config, DeclValue, Declarations, DepthStencilState,
    PrimitiveTopology, RasterizationState, ResolvedBinding, Schema, ShaderReflection,
};

/// Descriptor for creating a pipeline state
#[derive(Debug, Clone)]
pub struct PipelineStateDesc {
    pub schema: Schema,
    /// Declaration values, built from `schema.declarations()`
    pub declarations: Declarations,
    /// Reflected interface of the compiled shader program
    pub reflection: ShaderReflection,
    pub topology: PrimitiveTopology,
    pub rasterization: RasterizationState,
    pub config: Config,
}

/// Immutable pipeline state object
#[derive(Debug)]
pub struct PipelineState {
    schema: Schema,
    binding: ResolvedBinding,
    topology: PrimitiveTopology,
    rasterization: RasterizationState,
    /// One entry per color target, ordered by output slot
    color_targets: Vec<ColorTargetState>,
    depth_stencil: Option<DepthStencilState>,
}

impl PipelineState {
    /// Resolve a descriptor and freeze the result
    ///
    /// # Errors
    ///
    /// Any resolution error from [`resolve`].
    pub fn from_desc(desc: PipelineStateDesc) -> Result<Self> {
        let binding = resolve(&desc.schema, &desc.declarations, &desc.reflection, &desc.config)?;

        let mut color_targets = Vec::new();
        let mut depth_stencil = None;
        for id in desc.schema.ids() {
            match desc.declarations.get(id) {
                Some(DeclValue::RenderTarget { write_mask, .. }) => {
                    color_targets.push(ColorTargetState { write_mask: *write_mask, blend: None });
                }
                Some(DeclValue::BlendRenderTarget { write_mask, blend, .. }) => {
                    color_targets.push(ColorTargetState {
                        write_mask: *write_mask,
                        blend: Some(*blend),
                    });
                }
                Some(DeclValue::DepthStencilTarget { state, .. }) => depth_stencil = Some(*state),
                _ => {}
            }
        }

        crate::engine_info!("galaxy3d::pso::PipelineState",
            "Created pipeline state for schema '{}' ({} components, {} color targets, depth {})",
            desc.schema.name(), binding.len(), color_targets.len(),
            if depth_stencil.is_some() { "on" } else { "off" });

        Ok(Self {
            schema: desc.schema,
            binding,
            topology: desc.topology,
            rasterization: desc.rasterization,
            color_targets,
            depth_stencil,
        })
    }

    /// Schema the pipeline was resolved for
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn binding(&self) -> &ResolvedBinding {
        &self.binding
    }

    pub fn topology(&self) -> PrimitiveTopology {
        self.topology
    }

    pub fn rasterization(&self) -> &RasterizationState {
        &self.rasterization
    }

    /// Color target states, ordered by output slot
    pub fn color_targets(&self) -> &[ColorTargetState] {
        &self.color_targets
    }

    /// Depth/stencil state, if the schema declares a depth target
    pub fn depth_stencil(&self) -> Option<&DepthStencilState> {
        self.depth_stencil.as_ref()
    }

    /// Whether a color target blends with the draw-time blend constant
    pub fn uses_blend_constants(&self) -> bool {
        self.color_targets.iter()
            .filter_map(|t| t.blend)
            .any(|blend| blend.uses_constant())
    }
}

#[cfg(test)]
#[path = "pipeline_state_tests.rs"]
mod tests;
