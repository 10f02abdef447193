/// Structured-data descriptors for vertex and constant buffer records
///
/// A StructuredLayout is the ordered list of (shader field name, byte offset,
/// element format) describing one host record type. Layouts are registered
/// once in a StructuredTypeRegistry, validated there, and shared read-only
/// through `Arc` by every schema component that references them. The layout id
/// doubles as the element-type tag buffers carry, so draw-time checks are a
/// single id comparison.

use std::any::TypeId;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use crate::error::{Error, Result};

const SOURCE: &str = "galaxy3d::pso::Registry";

new_key_type! {
    /// Key of a layout inside its registry
    struct LayoutKey;
}

/// Process-unique identifier of a registered structured layout
///
/// Pairs the owning registry's identity with the layout's key in it, so
/// layouts from two registries never compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StructuredTypeId {
    registry: u64,
    key: LayoutKey,
}

// ===== ELEMENT FORMAT =====

/// Element format of a structured field
///
/// Defines the data type and component count of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum ElementFormat {
    // Float formats
    R32_SFLOAT,
    R32G32_SFLOAT,
    R32G32B32_SFLOAT,
    R32G32B32A32_SFLOAT,
    /// Column-major 4x4 float matrix (constant buffers)
    MAT4X4_SFLOAT,

    // Integer formats (signed)
    R32_SINT,
    R32G32_SINT,
    R32G32B32_SINT,
    R32G32B32A32_SINT,

    // Integer formats (unsigned)
    R32_UINT,
    R32G32_UINT,
    R32G32B32_UINT,
    R32G32B32A32_UINT,

    // Short formats
    R16_SINT,
    R16G16_SINT,
    R16G16B16A16_SINT,
    R16_UINT,
    R16G16_UINT,
    R16G16B16A16_UINT,

    // Byte formats
    R8_SINT,
    R8G8_SINT,
    R8G8B8A8_SINT,
    R8_UINT,
    R8G8_UINT,
    R8G8B8A8_UINT,
    R8G8B8A8_UNORM,
}

impl ElementFormat {
    /// Returns size in bytes for this format
    pub fn size_bytes(&self) -> u32 {
        match self {
            ElementFormat::R32_SFLOAT | ElementFormat::R32_SINT | ElementFormat::R32_UINT => 4,
            ElementFormat::R32G32_SFLOAT | ElementFormat::R32G32_SINT | ElementFormat::R32G32_UINT => 8,
            ElementFormat::R32G32B32_SFLOAT | ElementFormat::R32G32B32_SINT | ElementFormat::R32G32B32_UINT => 12,
            ElementFormat::R32G32B32A32_SFLOAT | ElementFormat::R32G32B32A32_SINT | ElementFormat::R32G32B32A32_UINT => 16,
            ElementFormat::MAT4X4_SFLOAT => 64,

            ElementFormat::R16_SINT | ElementFormat::R16_UINT => 2,
            ElementFormat::R16G16_SINT | ElementFormat::R16G16_UINT => 4,
            ElementFormat::R16G16B16A16_SINT | ElementFormat::R16G16B16A16_UINT => 8,

            ElementFormat::R8_SINT | ElementFormat::R8_UINT => 1,
            ElementFormat::R8G8_SINT | ElementFormat::R8G8_UINT => 2,
            ElementFormat::R8G8B8A8_SINT | ElementFormat::R8G8B8A8_UINT | ElementFormat::R8G8B8A8_UNORM => 4,
        }
    }
}

/// Maps a Rust field type to its element format
pub trait AsElementFormat {
    const FORMAT: ElementFormat;
}

macro_rules! impl_as_element_format {
    ($($ty:ty => $format:ident),* $(,)?) => {
        $(
            impl AsElementFormat for $ty {
                const FORMAT: ElementFormat = ElementFormat::$format;
            }
        )*
    };
}

impl_as_element_format! {
    f32 => R32_SFLOAT,
    [f32; 2] => R32G32_SFLOAT,
    [f32; 3] => R32G32B32_SFLOAT,
    [f32; 4] => R32G32B32A32_SFLOAT,
    [[f32; 4]; 4] => MAT4X4_SFLOAT,
    i32 => R32_SINT,
    [i32; 2] => R32G32_SINT,
    [i32; 3] => R32G32B32_SINT,
    [i32; 4] => R32G32B32A32_SINT,
    u32 => R32_UINT,
    [u32; 2] => R32G32_UINT,
    [u32; 3] => R32G32B32_UINT,
    [u32; 4] => R32G32B32A32_UINT,
    i16 => R16_SINT,
    [i16; 2] => R16G16_SINT,
    [i16; 4] => R16G16B16A16_SINT,
    u16 => R16_UINT,
    [u16; 2] => R16G16_UINT,
    [u16; 4] => R16G16B16A16_UINT,
    i8 => R8_SINT,
    [i8; 2] => R8G8_SINT,
    [i8; 4] => R8G8B8A8_SINT,
    u8 => R8_UINT,
    [u8; 2] => R8G8_UINT,
    [u8; 4] => R8G8B8A8_UINT,
    glam::Vec2 => R32G32_SFLOAT,
    glam::Vec3 => R32G32B32_SFLOAT,
    glam::Vec4 => R32G32B32A32_SFLOAT,
    glam::Mat4 => MAT4X4_SFLOAT,
    glam::IVec2 => R32G32_SINT,
    glam::IVec3 => R32G32B32_SINT,
    glam::IVec4 => R32G32B32A32_SINT,
    glam::UVec2 => R32G32_UINT,
    glam::UVec3 => R32G32B32_UINT,
    glam::UVec4 => R32G32B32A32_UINT,
}

// ===== FIELDS AND DESCRIPTORS =====

/// One field of a structured record
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StructuredField {
    /// Name the shader uses for this field
    pub name: String,
    /// Offset in bytes from the start of the record
    pub offset: u32,
    /// Element format
    pub format: ElementFormat,
}

impl StructuredField {
    /// Create a field with an explicit format
    pub fn new(name: impl Into<String>, offset: u32, format: ElementFormat) -> Self {
        Self { name: name.into(), offset, format }
    }

    /// Create a field whose format is derived from a Rust type
    ///
    /// Intended for use with `std::mem::offset_of!`.
    pub fn of<T: AsElementFormat>(name: impl Into<String>, offset: usize) -> Self {
        Self::new(name, offset as u32, T::FORMAT)
    }

    /// First byte past the end of the field
    pub fn end(&self) -> u64 {
        self.offset as u64 + self.format.size_bytes() as u64
    }
}

/// Descriptor for registering a structured type
#[derive(Debug, Clone)]
pub struct StructuredTypeDesc {
    /// Host type name (diagnostics only)
    pub name: String,
    /// Record size in bytes; `None` packs the record to its furthest field end
    pub stride: Option<u32>,
    /// Fields in declaration order
    pub fields: Vec<StructuredField>,
}

/// Host record type with a known field layout
///
/// # Example
///
/// ```
/// use galaxy_3d_pso::galaxy3d::pso::{StructuredType, StructuredField, StructuredTypeRegistry};
/// use std::mem::offset_of;
///
/// #[repr(C)]
/// #[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
/// struct Vertex {
///     pos: [f32; 3],
///     uv: [f32; 2],
/// }
///
/// impl StructuredType for Vertex {
///     fn fields() -> Vec<StructuredField> {
///         vec![
///             StructuredField::of::<[f32; 3]>("a_Pos", offset_of!(Vertex, pos)),
///             StructuredField::of::<[f32; 2]>("a_Uv", offset_of!(Vertex, uv)),
///         ]
///     }
/// }
///
/// let mut registry = StructuredTypeRegistry::new();
/// let layout = registry.register_type::<Vertex>().unwrap();
/// assert_eq!(layout.stride(), 20);
/// ```
pub trait StructuredType: bytemuck::Pod {
    /// Fields in declaration order
    fn fields() -> Vec<StructuredField>;

    /// Name recorded in the layout
    fn type_name() -> &'static str {
        std::any::type_name::<Self>()
    }
}

// ===== LAYOUT =====

/// Immutable, validated layout of a structured record
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct StructuredLayout {
    id: StructuredTypeId,
    name: String,
    stride: u32,
    fields: Vec<StructuredField>,
}

impl StructuredLayout {
    /// Layout id, also used as the element-type tag of buffers
    pub fn id(&self) -> StructuredTypeId {
        self.id
    }

    /// Host type name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Record size in bytes
    pub fn stride(&self) -> u32 {
        self.stride
    }

    /// Fields in declaration order
    pub fn fields(&self) -> &[StructuredField] {
        &self.fields
    }

    /// Find a field by shader name
    pub fn field(&self, name: &str) -> Option<&StructuredField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Validate a descriptor and compute its stride
    fn validate(desc: &StructuredTypeDesc) -> Result<u32> {
        let fail = |reason: String| Error::InconsistentStructuredLayout {
            layout: desc.name.clone(),
            reason,
        };

        if desc.fields.is_empty() {
            return Err(fail("layout has no fields".to_string()));
        }

        let mut seen = rustc_hash::FxHashSet::default();
        for field in &desc.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(fail(format!("field '{}' is declared twice", field.name)));
            }
        }

        // Sort by offset, then each field must end before the next one starts
        let mut by_offset: Vec<&StructuredField> = desc.fields.iter().collect();
        by_offset.sort_by_key(|f| f.offset);
        for pair in by_offset.windows(2) {
            if pair[0].end() > pair[1].offset as u64 {
                return Err(fail(format!(
                    "field '{}' [{}..{}) overlaps field '{}' at offset {}",
                    pair[0].name, pair[0].offset, pair[0].end(), pair[1].name, pair[1].offset
                )));
            }
        }

        let packed = by_offset.iter().map(|f| f.end()).max().unwrap_or(0);
        if packed > u32::MAX as u64 {
            return Err(fail(format!("record size {} does not fit in 32 bits", packed)));
        }

        match desc.stride {
            Some(stride) if (stride as u64) < packed => Err(fail(format!(
                "stride {} is shorter than the furthest field end {}",
                stride, packed
            ))),
            Some(stride) => Ok(stride),
            None => Ok(packed as u32),
        }
    }
}

// ===== REGISTRY =====

/// Registry of structured layouts
///
/// Owned by the host. Registration validates the layout; afterwards the layout
/// never changes and may be shared by any number of schemas.
pub struct StructuredTypeRegistry {
    id: u64,
    layouts: SlotMap<LayoutKey, Arc<StructuredLayout>>,
    by_type: FxHashMap<TypeId, LayoutKey>,
}

impl Default for StructuredTypeRegistry {
    fn default() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self {
            id: NEXT.fetch_add(1, Ordering::Relaxed),
            layouts: SlotMap::with_key(),
            by_type: FxHashMap::default(),
        }
    }
}

impl StructuredTypeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and register a layout
    ///
    /// # Errors
    ///
    /// `InconsistentStructuredLayout` if fields overlap, a field name repeats,
    /// the layout is empty, or the explicit stride is too short.
    pub fn register(&mut self, desc: StructuredTypeDesc) -> Result<Arc<StructuredLayout>> {
        let stride = match StructuredLayout::validate(&desc) {
            Ok(stride) => stride,
            Err(e) => crate::engine_bail!(SOURCE, e),
        };

        let StructuredTypeDesc { name, fields, .. } = desc;
        let registry = self.id;
        let key = self.layouts.insert_with_key(|key| {
            Arc::new(StructuredLayout { id: StructuredTypeId { registry, key }, name, stride, fields })
        });
        let layout = self.layouts[key].clone();

        crate::engine_debug!(SOURCE,
            "Registered structured type '{}' ({} fields, stride {})",
            layout.name(), layout.fields().len(), layout.stride());

        Ok(layout)
    }

    /// Register a host record type
    ///
    /// The stride is the Rust size of `T`. Registering the same type again
    /// returns the layout registered the first time.
    pub fn register_type<T: StructuredType>(&mut self) -> Result<Arc<StructuredLayout>> {
        if let Some(layout) = self.by_type.get(&TypeId::of::<T>()).and_then(|key| self.layouts.get(*key)) {
            return Ok(layout.clone());
        }

        let layout = self.register(StructuredTypeDesc {
            name: T::type_name().to_string(),
            stride: Some(std::mem::size_of::<T>() as u32),
            fields: T::fields(),
        })?;
        self.by_type.insert(TypeId::of::<T>(), layout.id().key);
        Ok(layout)
    }

    /// Get a registered layout
    ///
    /// Ids handed out by another registry are never found here.
    pub fn get(&self, id: StructuredTypeId) -> Option<&Arc<StructuredLayout>> {
        if id.registry != self.id {
            return None;
        }
        self.layouts.get(id.key)
    }

    /// Layout registered for a host type, if any
    pub fn layout_of<T: StructuredType>(&self) -> Option<&Arc<StructuredLayout>> {
        self.by_type.get(&TypeId::of::<T>()).and_then(|key| self.layouts.get(*key))
    }

    /// Number of registered layouts
    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    /// Whether no layout has been registered
    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }
}

#[cfg(test)]
#[path = "structured_tests.rs"]
mod tests;
