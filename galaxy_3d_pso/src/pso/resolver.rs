/// Resolver - matches declarations against shader reflection
///
/// Runs once per pipeline state. Walks the schema in order, finds what each
/// component binds to in the reflection, records the slot and format, then
/// checks that every reflected input and output was claimed. The result is a
/// dense ResolvedBinding the binder walks by position.

use rustc_hash::FxHashSet;
use crate::error::{Error, Result};
use crate::graphics_device::{DepthFormat, SamplerType, TextureFormat};
use crate::pso::{
    ComponentId, ComponentKind, Component, Config, DeclValue, Declarations, ElementFormat,
    ReflectedEntry, ResolvedFormat, Schema, ShaderReflection, StructuredLayout, VertexInputRate,
};

const SOURCE: &str = "galaxy3d::pso::Resolver";

// ===== RESOLVED VIEW =====

/// Slot and format resolved for one component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolvedSlot {
    pub kind: ComponentKind,
    /// Binding index; `None` for a vertex buffer the shader does not read
    pub slot: Option<u32>,
    pub format: ResolvedFormat,
}

impl ResolvedSlot {
    /// Whether the binder emits a bind for this component
    pub fn is_used(&self) -> bool {
        self.slot.is_some()
    }
}

/// Vertex attribute consumed from a vertex buffer component
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedAttribute {
    /// Vertex buffer component supplying the attribute
    pub component: ComponentId,
    pub name: String,
    /// Shader input location
    pub location: u32,
    /// Offset in the vertex record
    pub offset: u32,
    pub format: ElementFormat,
}

/// Resolved binding of a pipeline state, one slot per component in schema order
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedBinding {
    slots: Vec<ResolvedSlot>,
    attributes: Vec<ResolvedAttribute>,
}

impl ResolvedBinding {
    /// Slots in schema order
    pub fn slots(&self) -> &[ResolvedSlot] {
        &self.slots
    }

    /// Slot of one component
    ///
    /// # Panics
    ///
    /// Panics if `id` is not from the schema this binding was resolved for.
    pub fn slot(&self, id: ComponentId) -> &ResolvedSlot {
        &self.slots[id.index()]
    }

    /// Consumed vertex attributes, grouped by component in schema order
    pub fn attributes(&self) -> &[ResolvedAttribute] {
        &self.attributes
    }

    /// Attributes consumed from one vertex buffer component
    pub fn attributes_of(&self, id: ComponentId) -> impl Iterator<Item = &ResolvedAttribute> {
        self.attributes.iter().filter(move |a| a.component == id)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of components the binder binds
    pub fn used_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_used()).count()
    }
}

// ===== RESOLUTION =====

/// Resolve declarations against a shader's reflected interface
///
/// Pure: the schema and reflection are only read, and every call builds a
/// fresh binding. Identical inputs give equal bindings.
///
/// # Errors
///
/// - `SchemaMismatch` if the declarations belong to another schema
/// - `MissingDeclaration` if a component has no declaration value
/// - `UnsatisfiedShaderInput` if a component finds nothing in the reflection
/// - `UnmatchedDeclaredComponent` if a reflected input is left unclaimed
/// - `ConstantBufferFieldMismatch`, `StructuredLayoutMismatch` for structured
///   field disagreements
/// - `ShaderInterfaceMismatch` if a name belongs to another kind or format
/// - `SlotLimitExceeded` if a slot is beyond `config.limits`
pub fn resolve(
    schema: &Schema,
    declarations: &Declarations,
    reflection: &ShaderReflection,
    config: &Config,
) -> Result<ResolvedBinding> {
    if declarations.schema().id() != schema.id() {
        crate::engine_bail!(SOURCE, Error::SchemaMismatch {
            expected: schema.name().to_string(),
            found: declarations.schema().name().to_string(),
        });
    }

    let mut resolution = Resolution::new(reflection, config, schema.len());

    for id in schema.ids() {
        let component = schema.component(id);
        let decl = match declarations.get(id) {
            Some(decl) => decl,
            None => crate::engine_bail!(SOURCE,
                Error::MissingDeclaration(component.name().to_string())),
        };
        if decl.kind() != component.kind() {
            crate::engine_bail!(SOURCE, Error::DeclarationKindMismatch {
                component: component.name().to_string(),
                expected: component.kind(),
                found: decl.kind(),
            });
        }

        let slot = resolution.resolve_component(id, component, decl)?;
        resolution.slots.push(slot);
    }

    resolution.check_coverage()?;

    let binding = ResolvedBinding {
        slots: resolution.slots,
        attributes: resolution.attributes,
    };

    crate::engine_debug!(SOURCE,
        "Resolved schema '{}': {} components, {} bound, {} vertex attributes",
        schema.name(), binding.len(), binding.used_count(), binding.attributes().len());

    Ok(binding)
}

/// Working state of one resolve call
struct Resolution<'a> {
    reflection: &'a ShaderReflection,
    config: &'a Config,
    /// Reflected names already bound to a component
    claimed: FxHashSet<&'a str>,
    next_vertex_buffer: u32,
    next_color_output: usize,
    depth_bound: bool,
    slots: Vec<ResolvedSlot>,
    attributes: Vec<ResolvedAttribute>,
}

impl<'a> Resolution<'a> {
    fn new(reflection: &'a ShaderReflection, config: &'a Config, component_count: usize) -> Self {
        Self {
            reflection,
            config,
            claimed: FxHashSet::default(),
            next_vertex_buffer: 0,
            next_color_output: 0,
            depth_bound: false,
            slots: Vec::with_capacity(component_count),
            attributes: Vec::new(),
        }
    }

    fn resolve_component(
        &mut self,
        id: ComponentId,
        component: &Component,
        decl: &DeclValue,
    ) -> Result<ResolvedSlot> {
        match decl {
            DeclValue::VertexBuffer { input_rate } => {
                let layout = Self::layout_of(component)?;
                self.resolve_vertex_buffer(id, component, layout, *input_rate)
            }
            DeclValue::ConstantBuffer { shader_name } => {
                let layout = Self::layout_of(component)?;
                self.resolve_constant_buffer(component, layout, shader_name)
            }
            DeclValue::TextureSampler { shader_name, sampler } => {
                self.resolve_texture(component, shader_name, *sampler)
            }
            DeclValue::ShaderResource { shader_name } | DeclValue::UnorderedAccess { shader_name } => {
                self.resolve_view(component, shader_name)
            }
            DeclValue::RenderTarget { format, .. } | DeclValue::BlendRenderTarget { format, .. } => {
                self.resolve_color_target(component, *format)
            }
            DeclValue::DepthStencilTarget { format, .. } => {
                self.resolve_depth_target(component, *format)
            }
        }
    }

    fn layout_of(component: &Component) -> Result<&StructuredLayout> {
        match component.layout() {
            Some(layout) => Ok(&**layout),
            None => crate::engine_bail!(SOURCE, Error::InconsistentStructuredLayout {
                layout: component.name().to_string(),
                reason: format!("{} component has no structured layout", component.kind()),
            }),
        }
    }

    fn claim(&mut self, component: &Component, name: &'a str) -> Result<()> {
        if !self.claimed.insert(name) {
            crate::engine_bail!(SOURCE, Error::ShaderInterfaceMismatch {
                component: component.name().to_string(),
                reason: format!("'{}' is already bound by another component", name),
            });
        }
        Ok(())
    }

    fn check_limit(component: &Component, slot: u32, limit: u32) -> Result<()> {
        if slot >= limit {
            crate::engine_bail!(SOURCE, Error::SlotLimitExceeded {
                component: component.name().to_string(),
                slot,
                limit,
            });
        }
        Ok(())
    }

    fn wrong_kind(component: &Component, name: &str, entry: &ReflectedEntry<'_>) -> Error {
        crate::engine_err!(SOURCE, Error::ShaderInterfaceMismatch {
            component: component.name().to_string(),
            reason: format!(
                "'{}' is a {} in the shader, declared as {}",
                name, entry.kind_name(), component.kind()
            ),
        })
    }

    fn unsatisfied(component: &Component) -> Error {
        crate::engine_err!(SOURCE, Error::UnsatisfiedShaderInput(component.name().to_string()))
    }

    // ===== PER KIND =====

    fn resolve_vertex_buffer(
        &mut self,
        id: ComponentId,
        component: &Component,
        layout: &StructuredLayout,
        input_rate: VertexInputRate,
    ) -> Result<ResolvedSlot> {
        let reflection = self.reflection;
        let mut consumed = 0usize;

        for field in layout.fields() {
            match reflection.lookup(&field.name) {
                Some(ReflectedEntry::VertexAttribute(attribute)) => {
                    if attribute.format != field.format {
                        crate::engine_bail!(SOURCE, Error::StructuredLayoutMismatch {
                            component: component.name().to_string(),
                            field: field.name.clone(),
                            reason: format!(
                                "declared {:?}, shader reads {:?}",
                                field.format, attribute.format
                            ),
                        });
                    }
                    self.claim(component, &attribute.name)?;
                    self.attributes.push(ResolvedAttribute {
                        component: id,
                        name: field.name.clone(),
                        location: attribute.location,
                        offset: field.offset,
                        format: field.format,
                    });
                    consumed += 1;
                }
                Some(entry) => return Err(Self::wrong_kind(component, &field.name, &entry)),
                None if self.config.tolerate_unused_vertex_fields => {
                    crate::engine_trace!(SOURCE,
                        "Vertex field '{}' of '{}' is not read by the shader",
                        field.name, component.name());
                }
                None => return Err(Self::unsatisfied(component)),
            }
        }

        let format = ResolvedFormat::Vertex {
            layout: layout.id(),
            stride: layout.stride(),
            input_rate,
        };

        if consumed == 0 {
            crate::engine_debug!(SOURCE,
                "Vertex buffer '{}' is declared but unused by the shader", component.name());
            return Ok(ResolvedSlot { kind: component.kind(), slot: None, format });
        }

        let slot = self.next_vertex_buffer;
        Self::check_limit(component, slot, self.config.limits.max_vertex_buffers)?;
        self.next_vertex_buffer += 1;

        Ok(ResolvedSlot { kind: component.kind(), slot: Some(slot), format })
    }

    fn resolve_constant_buffer(
        &mut self,
        component: &Component,
        layout: &StructuredLayout,
        shader_name: &str,
    ) -> Result<ResolvedSlot> {
        let reflection = self.reflection;
        let block = match reflection.lookup(shader_name) {
            Some(ReflectedEntry::ConstantBuffer(block)) => block,
            Some(entry) => return Err(Self::wrong_kind(component, shader_name, &entry)),
            None => return Err(Self::unsatisfied(component)),
        };

        for field in layout.fields() {
            let member = match block.member(&field.name) {
                Some(member) => member,
                None => crate::engine_bail!(SOURCE, Error::ConstantBufferFieldMismatch {
                    component: component.name().to_string(),
                    field: field.name.clone(),
                    reason: format!("not a member of shader block '{}'", block.name),
                }),
            };
            if member.offset != field.offset || member.format != field.format {
                crate::engine_bail!(SOURCE, Error::StructuredLayoutMismatch {
                    component: component.name().to_string(),
                    field: field.name.clone(),
                    reason: format!(
                        "declared {:?} at offset {}, shader has {:?} at offset {}",
                        field.format, field.offset, member.format, member.offset
                    ),
                });
            }
        }

        if let Some(member) = block.members.iter().find(|m| layout.field(&m.name).is_none()) {
            crate::engine_bail!(SOURCE, Error::ConstantBufferFieldMismatch {
                component: component.name().to_string(),
                field: member.name.clone(),
                reason: format!("shader block member missing from layout '{}'", layout.name()),
            });
        }

        Self::check_limit(component, block.slot, self.config.limits.max_constant_buffers)?;
        self.claim(component, &block.name)?;

        Ok(ResolvedSlot {
            kind: component.kind(),
            slot: Some(block.slot),
            format: ResolvedFormat::Constant { layout: layout.id(), size: layout.stride() },
        })
    }

    fn resolve_texture(
        &mut self,
        component: &Component,
        shader_name: &str,
        sampler: SamplerType,
    ) -> Result<ResolvedSlot> {
        let reflection = self.reflection;
        let texture = match reflection.lookup(shader_name) {
            Some(ReflectedEntry::Texture(texture)) => texture,
            Some(entry) => return Err(Self::wrong_kind(component, shader_name, &entry)),
            None => return Err(Self::unsatisfied(component)),
        };

        if sampler.is_comparison() != texture.comparison {
            crate::engine_bail!(SOURCE, Error::ShaderInterfaceMismatch {
                component: component.name().to_string(),
                reason: format!(
                    "sampler {:?} does not match a shader {} sampler",
                    sampler,
                    if texture.comparison { "comparison" } else { "filtering" }
                ),
            });
        }

        let limit = self.config.limits.max_textures.min(self.config.limits.max_samplers);
        Self::check_limit(component, texture.slot, limit)?;
        self.claim(component, &texture.name)?;

        Ok(ResolvedSlot {
            kind: component.kind(),
            slot: Some(texture.slot),
            format: ResolvedFormat::Sampled {
                sample_type: texture.sample_type,
                comparison: texture.comparison,
            },
        })
    }

    fn resolve_view(&mut self, component: &Component, shader_name: &str) -> Result<ResolvedSlot> {
        let reflection = self.reflection;
        let (view, limit) = match (component.kind(), reflection.lookup(shader_name)) {
            (ComponentKind::ShaderResource, Some(ReflectedEntry::ShaderResource(view))) => {
                (view, self.config.limits.max_textures)
            }
            (ComponentKind::UnorderedAccess, Some(ReflectedEntry::UnorderedAccess(view))) => {
                (view, self.config.limits.max_unordered_access)
            }
            (_, Some(entry)) => return Err(Self::wrong_kind(component, shader_name, &entry)),
            (_, None) => return Err(Self::unsatisfied(component)),
        };

        Self::check_limit(component, view.slot, limit)?;
        self.claim(component, &view.name)?;

        Ok(ResolvedSlot {
            kind: component.kind(),
            slot: Some(view.slot),
            format: ResolvedFormat::View(view.format),
        })
    }

    fn resolve_color_target(&mut self, component: &Component, format: TextureFormat) -> Result<ResolvedSlot> {
        let output = match self.reflection.color_outputs().get(self.next_color_output) {
            Some(output) => *output,
            None => return Err(Self::unsatisfied(component)),
        };

        if format.sample_type() != output.sample_type {
            crate::engine_bail!(SOURCE, Error::ShaderInterfaceMismatch {
                component: component.name().to_string(),
                reason: format!(
                    "format {:?} is {:?}, color output {} writes {:?}",
                    format, format.sample_type(), output.slot, output.sample_type
                ),
            });
        }

        Self::check_limit(component, output.slot, self.config.limits.max_color_targets)?;
        self.next_color_output += 1;

        Ok(ResolvedSlot {
            kind: component.kind(),
            slot: Some(output.slot),
            format: ResolvedFormat::Color(format),
        })
    }

    fn resolve_depth_target(&mut self, component: &Component, format: DepthFormat) -> Result<ResolvedSlot> {
        if self.depth_bound {
            crate::engine_bail!(SOURCE,
                Error::UnmatchedDeclaredComponent(component.name().to_string()));
        }
        self.depth_bound = true;

        Ok(ResolvedSlot {
            kind: component.kind(),
            slot: Some(0),
            format: ResolvedFormat::DepthStencil(format),
        })
    }

    // ===== COVERAGE =====

    /// Every reflected input and output must have been claimed
    fn check_coverage(&self) -> Result<()> {
        let reflection = self.reflection;
        let unclaimed = reflection.vertex_attributes().iter().map(|a| a.name.as_str())
            .chain(reflection.constant_buffers().iter().map(|b| b.name.as_str()))
            .chain(reflection.textures().iter().map(|t| t.name.as_str()))
            .chain(reflection.shader_resources().iter().map(|v| v.name.as_str()))
            .chain(reflection.unordered_accesses().iter().map(|v| v.name.as_str()))
            .find(|name| !self.claimed.contains(name));

        if let Some(name) = unclaimed {
            crate::engine_bail!(SOURCE, Error::UnmatchedDeclaredComponent(name.to_string()));
        }

        if let Some(output) = reflection.color_outputs().get(self.next_color_output) {
            crate::engine_bail!(SOURCE,
                Error::UnmatchedDeclaredComponent(format!("color output {}", output.slot)));
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
