/// Texture, sampler and view handle traits with their format enums
///
/// Views are created by the resource-management collaborator. The binding
/// layer compares the tags they expose (format, sample type, access) with the
/// values recorded when the pipeline state was resolved.

/// Color texture format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum TextureFormat {
    R8_UNORM,
    R8G8B8A8_SRGB,
    R8G8B8A8_UNORM,
    B8G8R8A8_SRGB,
    B8G8R8A8_UNORM,
    R16G16B16A16_SFLOAT,
    R32_SFLOAT,
    R32G32B32A32_SFLOAT,
    R32_UINT,
    R32_SINT,
}

impl TextureFormat {
    /// How a shader reads or writes texels of this format
    pub fn sample_type(&self) -> SampleType {
        match self {
            TextureFormat::R32_UINT => SampleType::Uint,
            TextureFormat::R32_SINT => SampleType::Sint,
            _ => SampleType::Float,
        }
    }
}

/// Depth/stencil texture format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum DepthFormat {
    D16_UNORM,
    D32_FLOAT,
    D24_UNORM_S8_UINT,
}

impl DepthFormat {
    /// Whether the format carries a stencil aspect
    pub fn has_stencil(&self) -> bool {
        matches!(self, DepthFormat::D24_UNORM_S8_UINT)
    }
}

/// Scalar class a shader uses to read a texture or write a color output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleType {
    /// Normalized, sRGB or floating-point texels
    Float,
    /// Signed integer texels
    Sint,
    /// Unsigned integer texels
    Uint,
}

/// Predefined sampler configurations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SamplerType {
    /// Linear filtering, repeat addressing
    LinearRepeat,
    /// Linear filtering, clamp-to-edge addressing
    LinearClamp,
    /// Nearest filtering, repeat addressing
    NearestRepeat,
    /// Nearest filtering, clamp-to-edge addressing
    NearestClamp,
    /// Depth comparison sampler (shadow maps)
    Shadow,
}

impl SamplerType {
    /// Whether the sampler performs a depth comparison
    pub fn is_comparison(&self) -> bool {
        matches!(self, SamplerType::Shadow)
    }
}

/// Element format of a shader resource or unordered access view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewFormat {
    /// Texture view read/written with the given sample type
    Texture(SampleType),
    /// Structured buffer view with a fixed element stride in bytes
    StructuredBuffer { stride: u32 },
    /// Byte-address buffer view
    RawBuffer,
}

/// Access a view grants to shaders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewAccess {
    /// Shader resource view
    ReadOnly,
    /// Unordered access view
    ReadWrite,
}

// ===== HANDLE TRAITS =====

/// Sampled texture view
pub trait TextureView: Send + Sync {
    /// Texel format of the view
    fn format(&self) -> TextureFormat;
}

/// Sampler object
pub trait Sampler: Send + Sync {
    /// Configuration the sampler was created with
    fn sampler_type(&self) -> SamplerType;
}

/// Shader resource or unordered access view
pub trait ResourceView: Send + Sync {
    /// Element format of the view
    fn view_format(&self) -> ViewFormat;

    /// Access granted by the view
    fn access(&self) -> ViewAccess;
}

/// Color render target view
pub trait RenderTargetView: Send + Sync {
    /// Texel format of the target
    fn format(&self) -> TextureFormat;
}

/// Depth/stencil target view
pub trait DepthStencilView: Send + Sync {
    /// Depth format of the target
    fn format(&self) -> DepthFormat;
}

#[cfg(test)]
#[path = "texture_tests.rs"]
mod tests;
