/// Shader reflection - the compiled shader's interface as seen by the resolver
///
/// Produced by the shader-compilation collaborator and treated as read-only.
/// Named entries (vertex attributes, constant buffers, textures, resource
/// views) share one name index; color outputs are identified by slot only.

use rustc_hash::FxHashMap;
use crate::error::{Error, Result};
use crate::graphics_device::{SampleType, ViewFormat};
use crate::pso::ElementFormat;

// ===== ENTRIES =====

/// Vertex shader input attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReflectedVertexAttribute {
    pub name: String,
    pub location: u32,
    pub format: ElementFormat,
}

/// Member of a reflected constant buffer block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReflectedMember {
    pub name: String,
    /// Offset in bytes from the start of the block
    pub offset: u32,
    pub format: ElementFormat,
}

impl ReflectedMember {
    pub fn new(name: impl Into<String>, offset: u32, format: ElementFormat) -> Self {
        Self { name: name.into(), offset, format }
    }
}

/// Constant buffer block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReflectedConstantBuffer {
    /// Block name
    pub name: String,
    pub slot: u32,
    pub members: Vec<ReflectedMember>,
}

impl ReflectedConstantBuffer {
    /// Find a member by name
    pub fn member(&self, name: &str) -> Option<&ReflectedMember> {
        self.members.iter().find(|m| m.name == name)
    }
}

/// Sampled texture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReflectedTexture {
    pub name: String,
    pub slot: u32,
    pub sample_type: SampleType,
    /// Sampled through a comparison sampler
    pub comparison: bool,
}

/// Shader resource or unordered access view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReflectedView {
    pub name: String,
    pub slot: u32,
    pub format: ViewFormat,
}

/// Fragment color output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReflectedColorOutput {
    pub slot: u32,
    pub sample_type: SampleType,
}

/// Entry found by name lookup
#[derive(Debug, Clone, Copy)]
pub enum ReflectedEntry<'a> {
    VertexAttribute(&'a ReflectedVertexAttribute),
    ConstantBuffer(&'a ReflectedConstantBuffer),
    Texture(&'a ReflectedTexture),
    ShaderResource(&'a ReflectedView),
    UnorderedAccess(&'a ReflectedView),
}

impl ReflectedEntry<'_> {
    /// What the shader declares under this name
    pub fn kind_name(&self) -> &'static str {
        match self {
            ReflectedEntry::VertexAttribute(_) => "vertex attribute",
            ReflectedEntry::ConstantBuffer(_) => "constant buffer",
            ReflectedEntry::Texture(_) => "sampled texture",
            ReflectedEntry::ShaderResource(_) => "shader resource view",
            ReflectedEntry::UnorderedAccess(_) => "unordered access view",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryRef {
    VertexAttribute(usize),
    ConstantBuffer(usize),
    Texture(usize),
    ShaderResource(usize),
    UnorderedAccess(usize),
}

// ===== REFLECTION =====

/// Reflected interface of one compiled shader program
#[derive(Debug, Clone, Default)]
pub struct ShaderReflection {
    vertex_attributes: Vec<ReflectedVertexAttribute>,
    constant_buffers: Vec<ReflectedConstantBuffer>,
    textures: Vec<ReflectedTexture>,
    shader_resources: Vec<ReflectedView>,
    unordered_accesses: Vec<ReflectedView>,
    /// Sorted by slot
    color_outputs: Vec<ReflectedColorOutput>,
    by_name: FxHashMap<String, EntryRef>,
}

impl ShaderReflection {
    /// Start building a reflection
    pub fn builder() -> ShaderReflectionBuilder {
        ShaderReflectionBuilder::default()
    }

    /// Look up a named entry
    pub fn lookup(&self, name: &str) -> Option<ReflectedEntry<'_>> {
        self.by_name.get(name).map(|entry| match *entry {
            EntryRef::VertexAttribute(i) => ReflectedEntry::VertexAttribute(&self.vertex_attributes[i]),
            EntryRef::ConstantBuffer(i) => ReflectedEntry::ConstantBuffer(&self.constant_buffers[i]),
            EntryRef::Texture(i) => ReflectedEntry::Texture(&self.textures[i]),
            EntryRef::ShaderResource(i) => ReflectedEntry::ShaderResource(&self.shader_resources[i]),
            EntryRef::UnorderedAccess(i) => ReflectedEntry::UnorderedAccess(&self.unordered_accesses[i]),
        })
    }

    pub fn vertex_attributes(&self) -> &[ReflectedVertexAttribute] {
        &self.vertex_attributes
    }

    pub fn constant_buffers(&self) -> &[ReflectedConstantBuffer] {
        &self.constant_buffers
    }

    pub fn textures(&self) -> &[ReflectedTexture] {
        &self.textures
    }

    pub fn shader_resources(&self) -> &[ReflectedView] {
        &self.shader_resources
    }

    pub fn unordered_accesses(&self) -> &[ReflectedView] {
        &self.unordered_accesses
    }

    /// Color outputs, ordered by slot
    pub fn color_outputs(&self) -> &[ReflectedColorOutput] {
        &self.color_outputs
    }

    /// Total number of entries, color outputs included
    pub fn entry_count(&self) -> usize {
        self.by_name.len() + self.color_outputs.len()
    }
}

// ===== BUILDER =====

/// Builder for ShaderReflection
///
/// # Example
///
/// ```
/// use galaxy_3d_pso::galaxy3d::pso::{ShaderReflection, ReflectedMember, ElementFormat};
/// use galaxy_3d_pso::galaxy3d::render::SampleType;
///
/// let reflection = ShaderReflection::builder()
///     .vertex_attribute("a_Pos", 0, ElementFormat::R32G32B32_SFLOAT)
///     .constant_buffer("Locals", 0, vec![
///         ReflectedMember::new("u_Transform", 0, ElementFormat::MAT4X4_SFLOAT),
///     ])
///     .color_output(0, SampleType::Float)
///     .build()
///     .unwrap();
///
/// assert!(reflection.lookup("Locals").is_some());
/// ```
#[derive(Debug, Default)]
pub struct ShaderReflectionBuilder {
    reflection: ShaderReflection,
    error: Option<Error>,
}

impl ShaderReflectionBuilder {
    fn index(&mut self, name: &str, entry: EntryRef) {
        if self.error.is_some() {
            return;
        }
        if self.reflection.by_name.contains_key(name) {
            self.error = Some(Error::ShaderInterfaceMismatch {
                component: name.to_string(),
                reason: "name is reflected more than once".to_string(),
            });
            return;
        }
        self.reflection.by_name.insert(name.to_string(), entry);
    }

    pub fn vertex_attribute(mut self, name: impl Into<String>, location: u32, format: ElementFormat) -> Self {
        let name = name.into();
        self.index(&name, EntryRef::VertexAttribute(self.reflection.vertex_attributes.len()));
        self.reflection.vertex_attributes.push(ReflectedVertexAttribute { name, location, format });
        self
    }

    pub fn constant_buffer(mut self, name: impl Into<String>, slot: u32, members: Vec<ReflectedMember>) -> Self {
        let name = name.into();
        self.index(&name, EntryRef::ConstantBuffer(self.reflection.constant_buffers.len()));
        self.reflection.constant_buffers.push(ReflectedConstantBuffer { name, slot, members });
        self
    }

    pub fn texture(mut self, name: impl Into<String>, slot: u32, sample_type: SampleType, comparison: bool) -> Self {
        let name = name.into();
        self.index(&name, EntryRef::Texture(self.reflection.textures.len()));
        self.reflection.textures.push(ReflectedTexture { name, slot, sample_type, comparison });
        self
    }

    pub fn shader_resource(mut self, name: impl Into<String>, slot: u32, format: ViewFormat) -> Self {
        let name = name.into();
        self.index(&name, EntryRef::ShaderResource(self.reflection.shader_resources.len()));
        self.reflection.shader_resources.push(ReflectedView { name, slot, format });
        self
    }

    pub fn unordered_access(mut self, name: impl Into<String>, slot: u32, format: ViewFormat) -> Self {
        let name = name.into();
        self.index(&name, EntryRef::UnorderedAccess(self.reflection.unordered_accesses.len()));
        self.reflection.unordered_accesses.push(ReflectedView { name, slot, format });
        self
    }

    pub fn color_output(mut self, slot: u32, sample_type: SampleType) -> Self {
        if self.error.is_none() && self.reflection.color_outputs.iter().any(|o| o.slot == slot) {
            self.error = Some(Error::ShaderInterfaceMismatch {
                component: format!("color output {}", slot),
                reason: "slot is reflected more than once".to_string(),
            });
        }
        self.reflection.color_outputs.push(ReflectedColorOutput { slot, sample_type });
        self
    }

    /// Finish the reflection
    ///
    /// # Errors
    ///
    /// `ShaderInterfaceMismatch` if a name or color output slot was added twice.
    pub fn build(mut self) -> Result<ShaderReflection> {
        if let Some(error) = self.error {
            crate::engine_bail!("galaxy3d::pso::Reflection", error);
        }
        self.reflection.color_outputs.sort_by_key(|o| o.slot);
        Ok(self.reflection)
    }
}

#[cfg(test)]
#[path = "reflection_tests.rs"]
mod tests;
