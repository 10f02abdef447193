/// Pipeline-state binding module
///
/// Schema, structured layouts, shader reflection, the resolver that turns a
/// declaration into a resolved binding, and the binder that attaches runtime
/// resources at draw time.

// Module declarations
pub mod structured;
pub mod component;
pub mod state;
pub mod config;
pub mod schema;
pub mod reflection;
pub mod resolver;
pub mod pipeline_state;
pub mod binder;

// Re-export from modules
pub use structured::*;
pub use component::*;
pub use state::*;
pub use config::*;
pub use schema::*;
pub use reflection::*;
pub use resolver::*;
pub use pipeline_state::*;
pub use binder::*;
