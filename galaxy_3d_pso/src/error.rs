//! Error types for the Galaxy3D pipeline-state layer
//!
//! Errors are grouped by the moment they can occur:
//! - schema and structured-type construction
//! - pipeline-state resolution against shader reflection
//! - draw-time binding of runtime resources
//!
//! None of them is retried internally; the caller decides what to do.

use std::fmt;
use crate::pso::ComponentKind;

/// Result type for Galaxy3D pipeline-state operations
pub type Result<T> = std::result::Result<T, Error>;

/// Galaxy3D pipeline-state errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Failure reported by the draw-submission backend
    BackendError(String),

    // ===== CONSTRUCTION =====

    /// Two components of one schema share a name
    DuplicateComponentName(String),

    /// A structured layout is malformed (overlap, repeated field, bad stride)
    /// or attached to a component kind that cannot use it
    InconsistentStructuredLayout {
        layout: String,
        reason: String,
    },

    /// A declaration value does not belong to the component's kind
    DeclarationKindMismatch {
        component: String,
        expected: ComponentKind,
        found: ComponentKind,
    },

    /// A component name is not part of the schema
    UnknownComponent(String),

    // ===== RESOLUTION =====

    /// A component has neither an explicit nor a default declaration
    MissingDeclaration(String),

    /// A declared component found nothing to bind to in the shader
    UnsatisfiedShaderInput(String),

    /// A shader input or output is not covered by any component
    UnmatchedDeclaredComponent(String),

    /// Constant buffer members and structured layout fields disagree on names
    ConstantBufferFieldMismatch {
        component: String,
        field: String,
        reason: String,
    },

    /// A structured field disagrees with the shader on offset or format
    StructuredLayoutMismatch {
        component: String,
        field: String,
        reason: String,
    },

    /// The shader exposes the declared name with another kind or format
    ShaderInterfaceMismatch {
        component: String,
        reason: String,
    },

    /// The shader placed a resource beyond the configured slot limit
    SlotLimitExceeded {
        component: String,
        slot: u32,
        limit: u32,
    },

    // ===== DRAW =====

    /// Runtime data was built for another schema
    SchemaMismatch {
        expected: String,
        found: String,
    },

    /// No runtime resource was supplied for a component
    MissingRuntimeResource(String),

    /// The supplied resource is of the wrong kind or usage for its slot
    ResourceKindMismatch {
        component: String,
        expected: &'static str,
        found: &'static str,
    },

    /// The supplied resource has the right kind but the wrong format or layout
    ResourceFormatMismatch {
        component: String,
        reason: String,
    },

    /// The draw range does not fit the bound buffers
    DrawRangeOutOfBounds {
        component: String,
        requested: u64,
        available: u64,
    },
}

impl Error {
    /// Name of the component (or reflected entry) the error refers to, if any
    pub fn component(&self) -> Option<&str> {
        match self {
            Error::BackendError(_) | Error::SchemaMismatch { .. } => None,
            Error::InconsistentStructuredLayout { layout, .. } => Some(layout),
            Error::DuplicateComponentName(name)
            | Error::UnknownComponent(name)
            | Error::MissingDeclaration(name)
            | Error::UnsatisfiedShaderInput(name)
            | Error::UnmatchedDeclaredComponent(name)
            | Error::MissingRuntimeResource(name) => Some(name),
            Error::DeclarationKindMismatch { component, .. }
            | Error::ConstantBufferFieldMismatch { component, .. }
            | Error::StructuredLayoutMismatch { component, .. }
            | Error::ShaderInterfaceMismatch { component, .. }
            | Error::SlotLimitExceeded { component, .. }
            | Error::ResourceKindMismatch { component, .. }
            | Error::ResourceFormatMismatch { component, .. }
            | Error::DrawRangeOutOfBounds { component, .. } => Some(component),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::DuplicateComponentName(name) => {
                write!(f, "Duplicate component name '{}'", name)
            }
            Error::InconsistentStructuredLayout { layout, reason } => {
                write!(f, "Inconsistent structured layout '{}': {}", layout, reason)
            }
            Error::DeclarationKindMismatch { component, expected, found } => write!(
                f,
                "Declaration for '{}' is {:?}, component kind is {:?}",
                component, found, expected
            ),
            Error::UnknownComponent(name) => write!(f, "Unknown component '{}'", name),
            Error::MissingDeclaration(name) => {
                write!(f, "No declaration supplied for component '{}'", name)
            }
            Error::UnsatisfiedShaderInput(name) => {
                write!(f, "Unsatisfied shader input for component '{}'", name)
            }
            Error::UnmatchedDeclaredComponent(name) => {
                write!(f, "Shader interface '{}' is not declared by any component", name)
            }
            Error::ConstantBufferFieldMismatch { component, field, reason } => write!(
                f,
                "Constant buffer '{}' field '{}' mismatch: {}",
                component, field, reason
            ),
            Error::StructuredLayoutMismatch { component, field, reason } => write!(
                f,
                "Structured layout mismatch in '{}' field '{}': {}",
                component, field, reason
            ),
            Error::ShaderInterfaceMismatch { component, reason } => {
                write!(f, "Shader interface mismatch for '{}': {}", component, reason)
            }
            Error::SlotLimitExceeded { component, slot, limit } => write!(
                f,
                "Component '{}' resolved to slot {} (limit {})",
                component, slot, limit
            ),
            Error::SchemaMismatch { expected, found } => write!(
                f,
                "Runtime data built for schema '{}', pipeline expects '{}'",
                found, expected
            ),
            Error::MissingRuntimeResource(name) => {
                write!(f, "No runtime resource supplied for component '{}'", name)
            }
            Error::ResourceKindMismatch { component, expected, found } => write!(
                f,
                "Resource kind mismatch for '{}': expected {}, got {}",
                component, expected, found
            ),
            Error::ResourceFormatMismatch { component, reason } => {
                write!(f, "Resource format mismatch for '{}': {}", component, reason)
            }
            Error::DrawRangeOutOfBounds { component, requested, available } => write!(
                f,
                "Draw range out of bounds for '{}': {} elements requested, {} available",
                component, requested, available
            ),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
