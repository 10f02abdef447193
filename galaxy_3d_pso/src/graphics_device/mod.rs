/// Graphics device module - handle traits and the draw-submission trait
///
/// Everything here is implemented outside the binding layer: buffers, views and
/// samplers by the resource-management collaborator, CommandList by the
/// backend.

// Module declarations
pub mod buffer;
pub mod texture;
pub mod command_list;

// Re-export from modules
pub use buffer::*;
pub use texture::*;
pub use command_list::*;

// Mock graphics device for tests (no GPU required)
#[cfg(test)]
pub mod mock_graphics_device;
