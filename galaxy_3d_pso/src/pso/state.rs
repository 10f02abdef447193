/// Fixed-function pipeline state frozen into a PipelineState
///
/// Topology and rasterization come from the pipeline descriptor. Blend and
/// depth/stencil states come from the render target declarations. None of
/// these are re-validated at draw time.

use bitflags::bitflags;

/// Primitive topology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PrimitiveTopology {
    /// Triangle list
    #[default]
    TriangleList,
    /// Triangle strip
    TriangleStrip,
    /// Line list
    LineList,
    /// Point list
    PointList,
}

// ===== RASTERIZATION ENUMS =====

/// Face culling mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CullMode {
    /// No culling
    None,
    /// Cull front faces
    Front,
    /// Cull back faces
    Back,
}

/// Front face winding order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrontFace {
    /// Counter-clockwise vertices define front face
    CounterClockwise,
    /// Clockwise vertices define front face
    Clockwise,
}

/// Polygon rendering mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolygonMode {
    /// Fill polygons
    Fill,
    /// Draw edges only (wireframe)
    Line,
}

// ===== DEPTH/STENCIL ENUMS =====

/// Comparison operator for depth and stencil tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Never,
    Less,
    Equal,
    LessOrEqual,
    Greater,
    NotEqual,
    GreaterOrEqual,
    Always,
}

/// Stencil operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StencilOp {
    /// Keep current value
    Keep,
    /// Set to zero
    Zero,
    /// Replace with the stencil reference supplied at draw time
    Replace,
    IncrementAndClamp,
    DecrementAndClamp,
    Invert,
    IncrementAndWrap,
    DecrementAndWrap,
}

// ===== COLOR BLEND ENUMS =====

/// Blend factor for color blending equations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendFactor {
    Zero,
    One,
    SrcColor,
    OneMinusSrcColor,
    DstColor,
    OneMinusDstColor,
    SrcAlpha,
    OneMinusSrcAlpha,
    DstAlpha,
    OneMinusDstAlpha,
    /// Blend constant supplied at draw time
    ConstantColor,
    OneMinusConstantColor,
    SrcAlphaSaturate,
}

impl BlendFactor {
    /// Whether the factor reads the draw-time blend constant
    pub fn uses_constant(&self) -> bool {
        matches!(self, BlendFactor::ConstantColor | BlendFactor::OneMinusConstantColor)
    }
}

/// Blend operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendOp {
    /// result = src * srcFactor + dst * dstFactor
    Add,
    /// result = src * srcFactor - dst * dstFactor
    Subtract,
    /// result = dst * dstFactor - src * srcFactor
    ReverseSubtract,
    /// result = min(src, dst)
    Min,
    /// result = max(src, dst)
    Max,
}

// ===== RASTERIZATION STATE =====

/// Depth bias parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthBias {
    /// Constant depth offset
    pub constant_factor: f32,
    /// Slope-based depth offset
    pub slope_factor: f32,
    /// Maximum depth bias clamp
    pub clamp: f32,
}

/// Rasterization fixed-function state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterizationState {
    pub cull_mode: CullMode,
    pub front_face: FrontFace,
    pub polygon_mode: PolygonMode,
    /// Depth bias (None = disabled)
    pub depth_bias: Option<DepthBias>,
    /// Clip fragments against the scissor rectangle set at draw time
    pub scissor_enable: bool,
}

impl Default for RasterizationState {
    fn default() -> Self {
        Self {
            cull_mode: CullMode::Back,
            front_face: FrontFace::CounterClockwise,
            polygon_mode: PolygonMode::Fill,
            depth_bias: None,
            scissor_enable: true,
        }
    }
}

// ===== DEPTH/STENCIL STATE =====

/// Stencil operation state (per-face)
///
/// The reference value is not part of the pipeline; it is set per draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StencilOpState {
    /// Action on stencil test fail
    pub fail_op: StencilOp,
    /// Action on stencil pass + depth pass
    pub pass_op: StencilOp,
    /// Action on stencil pass + depth fail
    pub depth_fail_op: StencilOp,
    pub compare_op: CompareOp,
    /// Bits of stencil buffer read for compare
    pub compare_mask: u32,
    /// Bits of stencil buffer written
    pub write_mask: u32,
}

impl Default for StencilOpState {
    fn default() -> Self {
        Self {
            fail_op: StencilOp::Keep,
            pass_op: StencilOp::Keep,
            depth_fail_op: StencilOp::Keep,
            compare_op: CompareOp::Always,
            compare_mask: 0xFF,
            write_mask: 0xFF,
        }
    }
}

/// Depth and stencil testing state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DepthStencilState {
    pub depth_test_enable: bool,
    pub depth_write_enable: bool,
    pub depth_compare_op: CompareOp,
    pub stencil_test_enable: bool,
    /// Stencil operations for front faces
    pub front: StencilOpState,
    /// Stencil operations for back faces
    pub back: StencilOpState,
}

impl Default for DepthStencilState {
    fn default() -> Self {
        Self {
            depth_test_enable: true,
            depth_write_enable: true,
            depth_compare_op: CompareOp::Less,
            stencil_test_enable: false,
            front: StencilOpState::default(),
            back: StencilOpState::default(),
        }
    }
}

// ===== COLOR BLEND STATE =====

bitflags! {
    /// Color channels written to a render target
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ColorWriteMask: u8 {
        const R = 1 << 0;
        const G = 1 << 1;
        const B = 1 << 2;
        const A = 1 << 3;
        const RGB = Self::R.bits() | Self::G.bits() | Self::B.bits();
        const ALL = Self::RGB.bits() | Self::A.bits();
    }
}

impl Default for ColorWriteMask {
    fn default() -> Self {
        Self::ALL
    }
}

/// Blend equation of one color target
///
/// The write mask is declared separately on the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorBlendState {
    pub src_color_factor: BlendFactor,
    pub dst_color_factor: BlendFactor,
    pub color_blend_op: BlendOp,
    pub src_alpha_factor: BlendFactor,
    pub dst_alpha_factor: BlendFactor,
    pub alpha_blend_op: BlendOp,
}

impl ColorBlendState {
    /// Replace: src * 1 + dst * 0
    pub const REPLACE: Self = Self {
        src_color_factor: BlendFactor::One,
        dst_color_factor: BlendFactor::Zero,
        color_blend_op: BlendOp::Add,
        src_alpha_factor: BlendFactor::One,
        dst_alpha_factor: BlendFactor::Zero,
        alpha_blend_op: BlendOp::Add,
    };

    /// Standard alpha blending: src * a + dst * (1 - a)
    pub const ALPHA: Self = Self {
        src_color_factor: BlendFactor::SrcAlpha,
        dst_color_factor: BlendFactor::OneMinusSrcAlpha,
        color_blend_op: BlendOp::Add,
        src_alpha_factor: BlendFactor::One,
        dst_alpha_factor: BlendFactor::OneMinusSrcAlpha,
        alpha_blend_op: BlendOp::Add,
    };

    /// Additive blending: src + dst
    pub const ADDITIVE: Self = Self {
        src_color_factor: BlendFactor::One,
        dst_color_factor: BlendFactor::One,
        color_blend_op: BlendOp::Add,
        src_alpha_factor: BlendFactor::One,
        dst_alpha_factor: BlendFactor::One,
        alpha_blend_op: BlendOp::Add,
    };

    /// Whether any factor reads the draw-time blend constant
    pub fn uses_constant(&self) -> bool {
        [
            self.src_color_factor,
            self.dst_color_factor,
            self.src_alpha_factor,
            self.dst_alpha_factor,
        ]
        .iter()
        .any(|f| f.uses_constant())
    }
}

impl Default for ColorBlendState {
    fn default() -> Self {
        Self::ALPHA
    }
}

/// Output state of one color target as frozen into a pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorTargetState {
    pub write_mask: ColorWriteMask,
    /// `None` for plain render targets (blending disabled)
    pub blend: Option<ColorBlendState>,
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
