//! Validates the scene shader with naga, without a GPU.

use yulemorph::gpu::{InstanceRaw, SCENE_WGSL};

fn parse_and_validate(code: &str) -> Result<naga::Module, String> {
    let module = naga::front::wgsl::parse_str(code)
        .map_err(|e| format!("WGSL parse error: {:?}", e))?;

    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    );
    validator
        .validate(&module)
        .map_err(|e| format!("WGSL validation error: {:?}", e))?;

    Ok(module)
}

#[test]
fn test_scene_shader_validates() {
    if let Err(e) = parse_and_validate(SCENE_WGSL) {
        panic!("{e}");
    }
}

#[test]
fn test_scene_shader_entry_points() {
    let module = parse_and_validate(SCENE_WGSL).unwrap();
    let entry = |name: &str| module.entry_points.iter().find(|e| e.name == name);

    assert_eq!(
        entry("vs_billboard").map(|e| e.stage),
        Some(naga::ShaderStage::Vertex)
    );
    assert_eq!(
        entry("vs_panel").map(|e| e.stage),
        Some(naga::ShaderStage::Vertex)
    );
    assert_eq!(
        entry("fs_main").map(|e| e.stage),
        Some(naga::ShaderStage::Fragment)
    );
}

#[test]
fn test_instance_attributes_match_shader_locations() {
    let locations: Vec<u32> = InstanceRaw::ATTRIBUTES
        .iter()
        .map(|a| a.shader_location)
        .collect();
    assert_eq!(locations, vec![0, 1, 2, 3, 4, 5]);

    let stride = std::mem::size_of::<InstanceRaw>() as u64;
    let last = InstanceRaw::ATTRIBUTES[5];
    assert_eq!(last.offset + last.format.size(), stride);
}
