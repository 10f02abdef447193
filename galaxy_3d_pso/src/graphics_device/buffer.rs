/// Buffer handle trait and buffer usage flags
///
/// Buffers are created by the resource-management collaborator. The binding
/// layer only reads the properties below to check that a buffer fits the slot
/// it is bound to.

use bitflags::bitflags;
use crate::pso::StructuredTypeId;

bitflags! {
    /// Buffer usage flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BufferUsage: u32 {
        /// Vertex buffer
        const VERTEX = 1 << 0;
        /// Index buffer
        const INDEX = 1 << 1;
        /// Uniform/constant buffer
        const UNIFORM = 1 << 2;
        /// Storage buffer
        const STORAGE = 1 << 3;
    }
}

/// Index buffer element type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexType {
    /// 16-bit indices (max 65535 vertices)
    U16,
    /// 32-bit indices (max ~4 billion vertices)
    U32,
}

impl IndexType {
    /// Size in bytes of one index element
    pub fn size_bytes(&self) -> u32 {
        match self {
            IndexType::U16 => 2,
            IndexType::U32 => 4,
        }
    }
}

/// Buffer resource trait
///
/// Implemented by backend-specific buffer types. The buffer is owned by the
/// host; the binding layer holds it only for the duration of a draw call.
pub trait Buffer: Send + Sync {
    /// Size in bytes
    fn size(&self) -> u64;

    /// Usages the buffer was created with
    fn usage(&self) -> BufferUsage;

    /// Structured type of the elements, if the buffer was created for one
    ///
    /// Vertex and constant buffers must report the layout their slot was
    /// resolved against.
    fn element_layout(&self) -> Option<StructuredTypeId>;
}

#[cfg(test)]
#[path = "buffer_tests.rs"]
mod tests;
