/*!
# Galaxy 3D Pipeline State

Pipeline-state binding layer for the Galaxy 3D engine.

A host declares once, in a [`Schema`](galaxy3d::pso::Schema), the resources a
shader program consumes. The schema yields three synchronized views:

- **Declarations**: what the host specifies to build a pipeline state
- **ResolvedBinding**: slots and formats computed once against the shader
  reflection, stored inside the pipeline state
- **RuntimeData**: the resource handles supplied at every draw

## Architecture

- **StructuredTypeRegistry**: validated vertex/constant record layouts
- **Resolver**: declarations + shader reflection -> resolved binding
- **PipelineState**: immutable resolved binding plus fixed-function state
- **Binder**: runtime data -> binds and one draw on a CommandList, by index

Backends implement the handle traits and [`CommandList`](galaxy3d::render::CommandList).
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod graphics_device;
pub mod pso;

// Main galaxy3d namespace module
pub mod galaxy3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton
    pub use crate::engine::Engine;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
        // Note: engine_* macros are NOT re-exported here - they are internal only
    }

    // Handle traits and draw-submission trait
    pub mod render {
        pub use crate::graphics_device::*;
    }

    // Schema, resolver and binder
    pub mod pso {
        pub use crate::pso::*;
    }
}

// Re-export math library at crate root
pub use glam;
