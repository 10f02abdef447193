//! Unit tests for reflection.rs

use crate::error::Error;
use crate::graphics_device::{SampleType, ViewFormat};
use crate::pso::{ElementFormat, ReflectedEntry, ReflectedMember, ShaderReflection};

fn full_reflection() -> ShaderReflection {
    ShaderReflection::builder()
        .vertex_attribute("a_Pos", 0, ElementFormat::R32G32B32_SFLOAT)
        .vertex_attribute("a_Uv", 1, ElementFormat::R32G32_SFLOAT)
        .constant_buffer("Locals", 0, vec![
            ReflectedMember::new("u_Transform", 0, ElementFormat::MAT4X4_SFLOAT),
            ReflectedMember::new("u_Tint", 64, ElementFormat::R32G32B32A32_SFLOAT),
        ])
        .texture("t_Diffuse", 0, SampleType::Float, false)
        .shader_resource("b_Lights", 1, ViewFormat::StructuredBuffer { stride: 32 })
        .unordered_access("b_Output", 0, ViewFormat::RawBuffer)
        .color_output(1, SampleType::Uint)
        .color_output(0, SampleType::Float)
        .build()
        .unwrap()
}

#[test]
fn test_lookup_by_name() {
    let reflection = full_reflection();

    match reflection.lookup("Locals") {
        Some(ReflectedEntry::ConstantBuffer(cb)) => {
            assert_eq!(cb.slot, 0);
            assert_eq!(cb.member("u_Tint").unwrap().offset, 64);
            assert!(cb.member("u_Missing").is_none());
        }
        other => panic!("unexpected {:?}", other),
    }
    assert!(matches!(reflection.lookup("a_Uv"), Some(ReflectedEntry::VertexAttribute(a)) if a.location == 1));
    assert!(matches!(reflection.lookup("t_Diffuse"), Some(ReflectedEntry::Texture(_))));
    assert!(matches!(reflection.lookup("b_Lights"), Some(ReflectedEntry::ShaderResource(_))));
    assert!(matches!(reflection.lookup("b_Output"), Some(ReflectedEntry::UnorderedAccess(_))));
    assert!(reflection.lookup("locals").is_none());
}

#[test]
fn test_entry_kind_names() {
    let reflection = full_reflection();
    assert_eq!(reflection.lookup("t_Diffuse").unwrap().kind_name(), "sampled texture");
    assert_eq!(reflection.lookup("a_Pos").unwrap().kind_name(), "vertex attribute");
}

#[test]
fn test_color_outputs_sorted_by_slot() {
    let reflection = full_reflection();
    let slots: Vec<_> = reflection.color_outputs().iter().map(|o| o.slot).collect();
    assert_eq!(slots, vec![0, 1]);
    assert_eq!(reflection.color_outputs()[1].sample_type, SampleType::Uint);
}

#[test]
fn test_entry_count() {
    let reflection = full_reflection();
    assert_eq!(reflection.entry_count(), 8);
    assert_eq!(reflection.vertex_attributes().len(), 2);
    assert_eq!(reflection.constant_buffers().len(), 1);
    assert_eq!(reflection.textures().len(), 1);
    assert_eq!(reflection.shader_resources().len(), 1);
    assert_eq!(reflection.unordered_accesses().len(), 1);
}

#[test]
fn test_empty_reflection() {
    let reflection = ShaderReflection::builder().build().unwrap();
    assert_eq!(reflection.entry_count(), 0);
    assert!(reflection.lookup("anything").is_none());
}

#[test]
fn test_duplicate_name_across_kinds() {
    let result = ShaderReflection::builder()
        .texture("shared", 0, SampleType::Float, false)
        .constant_buffer("shared", 0, vec![])
        .build();
    assert!(matches!(
        result,
        Err(Error::ShaderInterfaceMismatch { component, .. }) if component == "shared"
    ));
}

#[test]
fn test_duplicate_color_output_slot() {
    let result = ShaderReflection::builder()
        .color_output(0, SampleType::Float)
        .color_output(0, SampleType::Float)
        .build();
    assert!(matches!(result, Err(Error::ShaderInterfaceMismatch { .. })));
}
