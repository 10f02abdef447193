/// Schema - ordered, named component list shared by the three views
///
/// A Schema is built once from a SchemaDesc and never changes. It is a cheap
/// handle: cloning it shares the same component list. The Declarations and
/// RuntimeData views keep a clone, so they always have the schema's length,
/// order and names.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use rustc_hash::FxHashMap;
use crate::error::{Error, Result};
use crate::pso::{ComponentKind, DeclValue, StructuredLayout};

const SOURCE: &str = "galaxy3d::pso::Schema";

/// Process-unique schema identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SchemaId(u64);

impl SchemaId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        SchemaId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Position of a component in its schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(usize);

impl ComponentId {
    /// Dense index into every view of the schema
    pub fn index(&self) -> usize {
        self.0
    }
}

// ===== DESCRIPTORS =====

/// Descriptor for one schema component
#[derive(Debug, Clone)]
pub struct ComponentDesc {
    /// Component name, unique within the schema
    pub name: String,
    pub kind: ComponentKind,
    /// Record layout (vertex and constant buffers only)
    pub layout: Option<Arc<StructuredLayout>>,
    /// Declaration used when the host does not supply one
    pub default: Option<DeclValue>,
}

impl ComponentDesc {
    pub fn new(name: impl Into<String>, kind: ComponentKind) -> Self {
        Self { name: name.into(), kind, layout: None, default: None }
    }

    pub fn vertex_buffer(name: impl Into<String>, layout: Arc<StructuredLayout>) -> Self {
        Self::new(name, ComponentKind::VertexBuffer).with_layout(layout)
    }

    pub fn constant_buffer(name: impl Into<String>, layout: Arc<StructuredLayout>) -> Self {
        Self::new(name, ComponentKind::ConstantBuffer).with_layout(layout)
    }

    pub fn texture_sampler(name: impl Into<String>) -> Self {
        Self::new(name, ComponentKind::TextureSampler)
    }

    pub fn shader_resource(name: impl Into<String>) -> Self {
        Self::new(name, ComponentKind::ShaderResource)
    }

    pub fn unordered_access(name: impl Into<String>) -> Self {
        Self::new(name, ComponentKind::UnorderedAccess)
    }

    pub fn render_target(name: impl Into<String>) -> Self {
        Self::new(name, ComponentKind::RenderTarget)
    }

    pub fn blend_render_target(name: impl Into<String>) -> Self {
        Self::new(name, ComponentKind::BlendRenderTarget)
    }

    pub fn depth_stencil_target(name: impl Into<String>) -> Self {
        Self::new(name, ComponentKind::DepthStencilTarget)
    }

    /// Attach a structured layout
    pub fn with_layout(mut self, layout: Arc<StructuredLayout>) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Set the default declaration value
    pub fn with_default(mut self, value: DeclValue) -> Self {
        self.default = Some(value);
        self
    }
}

/// Descriptor for creating a schema
#[derive(Debug, Clone)]
pub struct SchemaDesc {
    /// Schema name (diagnostics only)
    pub name: String,
    /// Components in binding order
    pub components: Vec<ComponentDesc>,
}

// ===== SCHEMA =====

/// One validated schema component
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    name: String,
    kind: ComponentKind,
    layout: Option<Arc<StructuredLayout>>,
    default: Option<DeclValue>,
}

impl Component {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    /// Record layout, present exactly for structured kinds
    pub fn layout(&self) -> Option<&Arc<StructuredLayout>> {
        self.layout.as_ref()
    }

    pub fn default_declaration(&self) -> Option<&DeclValue> {
        self.default.as_ref()
    }
}

#[derive(Debug)]
struct SchemaInner {
    id: SchemaId,
    name: String,
    components: Vec<Component>,
    by_name: FxHashMap<String, ComponentId>,
}

/// Ordered, name-unique component list
///
/// Equality compares the name and the ordered components, not the identity.
#[derive(Debug, Clone)]
pub struct Schema {
    inner: Arc<SchemaInner>,
}

impl Schema {
    /// Validate a descriptor and build a schema
    ///
    /// # Errors
    ///
    /// - `DuplicateComponentName` if two components share a name
    /// - `InconsistentStructuredLayout` if a structured kind lacks a layout or
    ///   another kind carries one
    /// - `DeclarationKindMismatch` if a default declaration is of another kind
    pub fn from_desc(desc: SchemaDesc) -> Result<Self> {
        let mut components = Vec::with_capacity(desc.components.len());
        let mut by_name = FxHashMap::default();

        for (index, component) in desc.components.into_iter().enumerate() {
            if by_name.contains_key(&component.name) {
                crate::engine_bail!(SOURCE,
                    Error::DuplicateComponentName(component.name));
            }

            Self::validate_component(&component)?;

            by_name.insert(component.name.clone(), ComponentId(index));
            components.push(Component {
                name: component.name,
                kind: component.kind,
                layout: component.layout,
                default: component.default,
            });
        }

        let schema = Self {
            inner: Arc::new(SchemaInner {
                id: SchemaId::next(),
                name: desc.name,
                components,
                by_name,
            }),
        };

        crate::engine_debug!(SOURCE,
            "Created schema '{}' with {} components", schema.name(), schema.len());

        Ok(schema)
    }

    fn validate_component(component: &ComponentDesc) -> Result<()> {
        match (&component.layout, component.kind.is_structured()) {
            (None, true) => crate::engine_bail!(SOURCE,
                Error::InconsistentStructuredLayout {
                    layout: component.name.clone(),
                    reason: format!("{} component requires a structured layout", component.kind),
                }),
            (Some(layout), false) => crate::engine_bail!(SOURCE,
                Error::InconsistentStructuredLayout {
                    layout: layout.name().to_string(),
                    reason: format!("{} component '{}' cannot carry a structured layout",
                        component.kind, component.name),
                }),
            // Registered layouts were checked for overlaps by the registry
            (Some(_), true) | (None, false) => {}
        }

        if let Some(default) = &component.default {
            if default.kind() != component.kind {
                crate::engine_bail!(SOURCE, Error::DeclarationKindMismatch {
                    component: component.name.clone(),
                    expected: component.kind,
                    found: default.kind(),
                });
            }
        }

        Ok(())
    }

    /// Process-unique identity
    pub fn id(&self) -> SchemaId {
        self.inner.id
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Number of components
    pub fn len(&self) -> usize {
        self.inner.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.components.is_empty()
    }

    /// Components in binding order
    pub fn components(&self) -> &[Component] {
        &self.inner.components
    }

    /// Component at a position
    ///
    /// # Panics
    ///
    /// Panics if `id` comes from another, longer schema.
    pub fn component(&self, id: ComponentId) -> &Component {
        &self.inner.components[id.0]
    }

    /// Look up a component by name
    pub fn component_id(&self, name: &str) -> Option<ComponentId> {
        self.inner.by_name.get(name).copied()
    }

    /// Component ids in binding order
    pub fn ids(&self) -> impl Iterator<Item = ComponentId> + '_ {
        (0..self.len()).map(ComponentId)
    }

    /// Look up a component id, failing with `UnknownComponent`
    pub(crate) fn require(&self, name: &str) -> Result<ComponentId> {
        match self.component_id(name) {
            Some(id) => Ok(id),
            None => Err(Error::UnknownComponent(name.to_string())),
        }
    }

    /// Check that an id belongs to this schema's range
    pub(crate) fn check_id(&self, id: ComponentId) -> Result<ComponentId> {
        if id.0 < self.len() {
            Ok(id)
        } else {
            Err(Error::UnknownComponent(format!("#{}", id.0)))
        }
    }

    /// Declaration view pre-filled with the component defaults
    pub fn declarations(&self) -> Declarations {
        Declarations {
            schema: self.clone(),
            values: self.inner.components.iter().map(|c| c.default.clone()).collect(),
        }
    }

    /// Empty runtime data view for this schema
    pub fn runtime_data(&self) -> crate::pso::RuntimeData {
        crate::pso::RuntimeData::for_schema(self)
    }
}

impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
            || (self.inner.name == other.inner.name
                && self.inner.components == other.inner.components)
    }
}

// ===== DECLARATION VIEW =====

/// Declaration values, one per component in schema order
#[derive(Debug, Clone)]
pub struct Declarations {
    schema: Schema,
    values: Vec<Option<DeclValue>>,
}

impl Declarations {
    /// Schema this view belongs to
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Set the declaration of a named component
    ///
    /// # Errors
    ///
    /// `UnknownComponent` or `DeclarationKindMismatch`.
    pub fn set(&mut self, name: &str, value: DeclValue) -> Result<&mut Self> {
        let id = match self.schema.require(name) {
            Ok(id) => id,
            Err(e) => crate::engine_bail!(SOURCE, e),
        };
        self.set_at(id, value)
    }

    /// Set the declaration of a component by id
    pub fn set_at(&mut self, id: ComponentId, value: DeclValue) -> Result<&mut Self> {
        let id = match self.schema.check_id(id) {
            Ok(id) => id,
            Err(e) => crate::engine_bail!(SOURCE, e),
        };

        let component = self.schema.component(id);
        if value.kind() != component.kind() {
            crate::engine_bail!(SOURCE, Error::DeclarationKindMismatch {
                component: component.name().to_string(),
                expected: component.kind(),
                found: value.kind(),
            });
        }

        self.values[id.0] = Some(value);
        Ok(self)
    }

    /// Effective declaration of a component (explicit or default)
    pub fn get(&self, id: ComponentId) -> Option<&DeclValue> {
        self.values.get(id.0).and_then(|v| v.as_ref())
    }

    /// Effective declaration of a named component
    pub fn get_by_name(&self, name: &str) -> Option<&DeclValue> {
        self.schema.component_id(name).and_then(|id| self.get(id))
    }

    /// Number of entries (always the schema length)
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
