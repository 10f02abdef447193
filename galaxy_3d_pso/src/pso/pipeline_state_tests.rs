//! Unit tests for pipeline_state.rs
//!
//! Tests freezing of fixed-function state next to the resolved binding.

use std::sync::Arc;
use crate::error::Error;
use crate::graphics_device::{DepthFormat, SampleType, TextureFormat};
use crate::pso::{
    BlendFactor, ColorBlendState, ColorWriteMask, ComponentDesc, Config, CullMode, DeclValue,
    DepthStencilState, PipelineState, PipelineStateDesc, PrimitiveTopology, RasterizationState,
    Schema, SchemaDesc, ShaderReflection,
};

fn targets_schema() -> Schema {
    Schema::from_desc(SchemaDesc {
        name: "targets".to_string(),
        components: vec![
            ComponentDesc::render_target("albedo"),
            ComponentDesc::blend_render_target("glow"),
            ComponentDesc::depth_stencil_target("depth"),
        ],
    }).unwrap()
}

fn targets_reflection() -> ShaderReflection {
    ShaderReflection::builder()
        .color_output(0, SampleType::Float)
        .color_output(1, SampleType::Float)
        .build()
        .unwrap()
}

fn targets_desc(glow_blend: ColorBlendState) -> PipelineStateDesc {
    let schema = targets_schema();
    let mut declarations = schema.declarations();
    declarations
        .set("albedo", DeclValue::RenderTarget {
            format: TextureFormat::R8G8B8A8_SRGB,
            write_mask: ColorWriteMask::RGB,
        }).unwrap()
        .set("glow", DeclValue::blend_render_target(TextureFormat::R16G16B16A16_SFLOAT, glow_blend)).unwrap()
        .set("depth", DeclValue::depth_stencil(DepthFormat::D32_FLOAT, DepthStencilState {
            depth_write_enable: false,
            ..DepthStencilState::default()
        })).unwrap();

    PipelineStateDesc {
        schema,
        declarations,
        reflection: targets_reflection(),
        topology: PrimitiveTopology::TriangleStrip,
        rasterization: RasterizationState {
            cull_mode: CullMode::None,
            ..RasterizationState::default()
        },
        config: Config::default(),
    }
}

#[test]
fn test_pipeline_state_freezes_fixed_function_state() {
    let pso = PipelineState::from_desc(targets_desc(ColorBlendState::ADDITIVE)).unwrap();

    assert_eq!(pso.topology(), PrimitiveTopology::TriangleStrip);
    assert_eq!(pso.rasterization().cull_mode, CullMode::None);
    assert_eq!(pso.binding().len(), 3);

    let targets = pso.color_targets();
    assert_eq!(targets.len(), 2);
    assert_eq!(targets[0].write_mask, ColorWriteMask::RGB);
    assert_eq!(targets[0].blend, None);
    assert_eq!(targets[1].blend, Some(ColorBlendState::ADDITIVE));

    assert!(!pso.depth_stencil().unwrap().depth_write_enable);
    assert_eq!(pso.schema().name(), "targets");
}

#[test]
fn test_pipeline_state_blend_constant_usage() {
    let plain = PipelineState::from_desc(targets_desc(ColorBlendState::ALPHA)).unwrap();
    assert!(!plain.uses_blend_constants());

    let constant = PipelineState::from_desc(targets_desc(ColorBlendState {
        src_color_factor: BlendFactor::ConstantColor,
        ..ColorBlendState::ALPHA
    })).unwrap();
    assert!(constant.uses_blend_constants());
}

#[test]
fn test_pipeline_state_without_depth() {
    let schema = Schema::from_desc(SchemaDesc {
        name: "color only".to_string(),
        components: vec![
            ComponentDesc::render_target("color")
                .with_default(DeclValue::render_target(TextureFormat::B8G8R8A8_UNORM)),
        ],
    }).unwrap();

    let pso = PipelineState::from_desc(PipelineStateDesc {
        declarations: schema.declarations(),
        schema,
        reflection: ShaderReflection::builder().color_output(0, SampleType::Float).build().unwrap(),
        topology: PrimitiveTopology::default(),
        rasterization: RasterizationState::default(),
        config: Config::default(),
    }).unwrap();

    assert!(pso.depth_stencil().is_none());
    assert_eq!(pso.color_targets().len(), 1);
}

#[test]
fn test_pipeline_state_propagates_resolution_errors() {
    let mut desc = targets_desc(ColorBlendState::ALPHA);
    desc.reflection = ShaderReflection::builder()
        .color_output(0, SampleType::Float)
        .build()
        .unwrap();

    let result = PipelineState::from_desc(desc);
    assert_eq!(result.unwrap_err(), Error::UnsatisfiedShaderInput("glow".to_string()));
}

#[test]
fn test_pipeline_state_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<PipelineState>();

    let pso = Arc::new(PipelineState::from_desc(targets_desc(ColorBlendState::ALPHA)).unwrap());
    let clone = Arc::clone(&pso);
    let handle = std::thread::spawn(move || clone.binding().used_count());
    assert_eq!(handle.join().unwrap(), 3);
}
