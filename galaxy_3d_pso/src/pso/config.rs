//! Resolution settings
//!
//! Defaults match a D3D11-class device: 16 vertex buffers, 14 constant
//! buffers, 128 texture slots, 16 samplers, 8 unordered access views and 8
//! color targets.

/// Per-kind slot limits enforced at resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Limits {
    pub max_vertex_buffers: u32,
    pub max_constant_buffers: u32,
    /// Shader resource view slots (textures and buffer views)
    pub max_textures: u32,
    /// Sampler slots; a texture/sampler pair uses the same index for both
    pub max_samplers: u32,
    pub max_unordered_access: u32,
    pub max_color_targets: u32,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_vertex_buffers: 16,
            max_constant_buffers: 14,
            max_textures: 128,
            max_samplers: 16,
            max_unordered_access: 8,
            max_color_targets: 8,
        }
    }
}

/// Resolver configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Config {
    /// Accept vertex layout fields the shader does not consume
    ///
    /// When false, every vertex field must match a reflected attribute.
    pub tolerate_unused_vertex_fields: bool,
    pub limits: Limits,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tolerate_unused_vertex_fields: true,
            limits: Limits::default(),
        }
    }
}

impl Config {
    /// Configuration rejecting unused vertex fields
    pub fn strict() -> Self {
        Self {
            tolerate_unused_vertex_fields: false,
            ..Self::default()
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
