//! Prepare, render and teardown of a whole scene

use crate::assets::DecodedImage;
use crate::backend::{HeadlessContext, InMemoryCodec, UniformValue};
use crate::config::Config;
use crate::foundation::math::{TransformParams, Vec2, Vec3, Vec4};
use crate::render::uniforms::names;
use crate::render::{
    Appearance, Attenuation, DispatchError, LightRig, Material, MeshShape, PointLight,
    MAX_POINT_LIGHTS, MAX_TEXTURE_SLOTS,
};
use crate::scene::{
    FrameStats, PrepareStats, SceneComposer, SceneDescription, SceneError, SceneObject,
    TextureAsset,
};

fn object(name: &str, shape: MeshShape, appearance: Appearance, material: Option<&str>) -> SceneObject {
    SceneObject {
        name: name.to_string(),
        shape,
        parts: Default::default(),
        transform: TransformParams::default(),
        appearance,
        uv_scale: Vec2::new(1.0, 1.0),
        material: material.map(str::to_string),
    }
}

fn point_light(x: f32) -> PointLight {
    PointLight {
        position: Vec3::new(x, 8.0, 0.0),
        ambient: Vec3::new(0.05, 0.05, 0.05),
        diffuse: Vec3::new(0.3, 0.3, 0.3),
        specular: Vec3::new(0.1, 0.1, 0.1),
        attenuation: Attenuation::default(),
    }
}

fn kitchen_table() -> (InMemoryCodec, SceneDescription) {
    let codec = InMemoryCodec::new()
        .with_image("rusticwood.jpg", DecodedImage::solid_color(64, 64, &[140, 100, 60]))
        .with_image("cheddar.jpg", DecodedImage::solid_color(16, 16, &[240, 180, 40, 255]));

    let description = SceneDescription {
        textures: vec![
            TextureAsset {
                path: "rusticwood.jpg".into(),
                tag: "table".into(),
            },
            TextureAsset {
                path: "missing.jpg".into(),
                tag: "backdrop".into(),
            },
            TextureAsset {
                path: "cheddar.jpg".into(),
                tag: "cheddar".into(),
            },
        ],
        materials: vec![
            Material::new("wood", Vec3::new(0.2, 0.2, 0.3), Vec3::zeros(), 0.1),
            Material::new("cheese", Vec3::new(0.6, 0.5, 0.3), Vec3::zeros(), 0.1),
        ],
        lights: LightRig {
            point_lights: vec![point_light(-4.0), point_light(4.0)],
            ..LightRig::default()
        },
        objects: vec![
            object("table", MeshShape::Box, Appearance::Texture("table".into()), Some("wood")),
            object("backdrop", MeshShape::Plane, Appearance::Texture("backdrop".into()), None),
            object("cheese", MeshShape::Cylinder, Appearance::Texture("cheddar".into()), Some("cheese")),
            object("cheese top", MeshShape::Cylinder, Appearance::Texture("cheddar".into()), Some("brie")),
            object(
                "grape",
                MeshShape::Sphere,
                Appearance::Color(Vec4::new(0.2, 0.1, 0.4, 1.0)),
                None,
            ),
        ],
    };
    (codec, description)
}

fn composer() -> SceneComposer<HeadlessContext> {
    let (codec, description) = kitchen_table();
    SceneComposer::new(HeadlessContext::new(), Box::new(codec), description)
}

#[test]
fn prepare_reports_what_was_loaded() {
    let mut scene = composer();
    let stats = scene.prepare().unwrap();

    assert_eq!(
        stats,
        PrepareStats {
            textures_loaded: 2,
            texture_failures: 1,
            materials_registered: 2,
            meshes_loaded: 4,
        }
    );
    assert!(scene.is_prepared());

    // The failed texture does not take a unit
    assert_eq!(scene.textures().resolve_unit("table"), Some(0));
    assert_eq!(scene.textures().resolve_unit("cheddar"), Some(1));
    assert_eq!(scene.textures().resolve_unit("backdrop"), None);
    assert_eq!(scene.context().live_texture_count(), 2);
    scene.teardown();
}

#[test]
fn meshes_load_once_in_first_use_order() {
    let mut scene = composer();
    scene.prepare().unwrap();
    assert_eq!(
        scene.context().loaded_meshes(),
        &[MeshShape::Box, MeshShape::Plane, MeshShape::Cylinder, MeshShape::Sphere]
    );

    scene.render();
    scene.render();
    assert_eq!(scene.context().loaded_meshes().len(), 4);
    scene.teardown();
}

#[test]
fn lights_are_pushed_during_prepare() {
    let mut scene = composer();
    scene.prepare().unwrap();

    let ctx = scene.context();
    assert_eq!(ctx.bool_uniform(names::USE_LIGHTING), Some(true));
    assert_eq!(ctx.bool_uniform("pointLights[0].bActive"), Some(true));
    assert_eq!(ctx.bool_uniform("pointLights[1].bActive"), Some(true));
    assert_eq!(ctx.bool_uniform("pointLights[2].bActive"), Some(false));
    assert_eq!(ctx.vec3_uniform("pointLights[1].position"), Some(Vec3::new(4.0, 8.0, 0.0)));
    assert_eq!(ctx.float_uniform("pointLights[0].linear"), Some(0.09));
    assert_eq!(ctx.bool_uniform("directionalLight.bActive"), Some(false));
    assert_eq!(ctx.bool_uniform("spotLight.bActive"), Some(false));
    scene.teardown();
}

#[test]
fn render_draws_everything_and_counts_misses() {
    let mut scene = composer();
    scene.prepare().unwrap();

    let stats = scene.render();
    // "backdrop" never loaded and "brie" was never registered
    assert_eq!(
        stats,
        FrameStats {
            objects_drawn: 5,
            resolution_misses: 2,
        }
    );

    let draws = scene.context().draws();
    assert_eq!(draws.len(), 5);
    assert_eq!(draws[1].uniform(names::USE_TEXTURE), Some(&UniformValue::Bool(true)));
    assert_eq!(draws[1].uniform(names::OBJECT_TEXTURE), Some(&UniformValue::Sampler(-1)));
    assert_eq!(draws[2].uniform(names::OBJECT_TEXTURE), Some(&UniformValue::Sampler(1)));

    // The unknown material leaves the previous object's material in place
    assert_eq!(
        draws[3].uniform(names::MATERIAL_DIFFUSE),
        Some(&UniformValue::Vec3(Vec3::new(0.6, 0.5, 0.3)))
    );
    scene.teardown();
}

#[test]
fn object_missing_both_tags_counts_once() {
    let (codec, mut description) = kitchen_table();
    description.objects = vec![object(
        "knife",
        MeshShape::Prism,
        Appearance::Texture("stainless".into()),
        Some("metal"),
    )];
    let mut scene = SceneComposer::new(HeadlessContext::new(), Box::new(codec), description);
    scene.prepare().unwrap();

    assert_eq!(
        scene.render(),
        FrameStats {
            objects_drawn: 1,
            resolution_misses: 1,
        }
    );
    scene.teardown();
}

#[test]
fn dropping_a_prepared_scene_releases_its_textures() {
    let (codec, description) = kitchen_table();
    let mut ctx = HeadlessContext::new();
    {
        let mut scene = SceneComposer::new(&mut ctx, Box::new(codec), description);
        scene.prepare().unwrap();
        assert_eq!(scene.context().live_texture_count(), 2);
    }

    assert_eq!(ctx.live_texture_count(), 0);
    assert_eq!(ctx.deleted_textures().len(), 2);
    assert_eq!(ctx.bound_texture(0), None);
}

#[test]
fn second_prepare_is_rejected() {
    let mut scene = composer();
    scene.prepare().unwrap();
    assert!(matches!(scene.prepare(), Err(SceneError::AlreadyPrepared)));
    assert_eq!(scene.context().live_texture_count(), 2);
    scene.teardown();
}

#[test]
fn teardown_releases_textures_and_allows_prepare_again() {
    let mut scene = composer();
    scene.prepare().unwrap();
    scene.teardown();

    assert!(!scene.is_prepared());
    assert!(scene.textures().is_empty());
    assert!(scene.materials().is_empty());
    assert_eq!(scene.context().live_texture_count(), 0);
    assert_eq!(scene.context().deleted_textures().len(), 2);
    assert_eq!(scene.context().bound_texture(0), None);

    let stats = scene.prepare().unwrap();
    assert_eq!(stats.textures_loaded, 2);
    assert_eq!(scene.textures().resolve_unit("cheddar"), Some(1));
    scene.teardown();
}

#[test]
fn too_many_point_lights_fail_before_any_upload() {
    let (codec, mut description) = kitchen_table();
    description.lights.point_lights = (0..=MAX_POINT_LIGHTS).map(|i| point_light(i as f32)).collect();
    let mut scene = SceneComposer::new(HeadlessContext::new(), Box::new(codec), description);

    match scene.prepare() {
        Err(SceneError::Dispatch(DispatchError::TooManyPointLights { count, max })) => {
            assert_eq!(count, MAX_POINT_LIGHTS + 1);
            assert_eq!(max, MAX_POINT_LIGHTS);
        }
        other => panic!("expected too many point lights, got {:?}", other),
    }

    assert!(!scene.is_prepared());
    assert_eq!(scene.context().live_texture_count(), 0);
    assert!(scene.context().uniform_log().is_empty());
}

#[test]
fn full_texture_table_rejects_the_next_image() {
    let mut codec = InMemoryCodec::new();
    let mut description = SceneDescription::default();
    for i in 0..=MAX_TEXTURE_SLOTS {
        let path = format!("texture_{i}.png");
        codec.insert(path.clone(), DecodedImage::solid_color(2, 2, &[i as u8, 0, 0]));
        description.textures.push(TextureAsset {
            path,
            tag: format!("tag_{i}"),
        });
    }

    let mut scene = SceneComposer::new(HeadlessContext::new(), Box::new(codec), description);
    let stats = scene.prepare().unwrap();

    assert_eq!(stats.textures_loaded, MAX_TEXTURE_SLOTS);
    assert_eq!(stats.texture_failures, 1);
    assert_eq!(scene.context().live_texture_count(), MAX_TEXTURE_SLOTS);
    assert_eq!(scene.textures().resolve_unit("tag_15"), Some(15));
    assert_eq!(scene.textures().resolve_unit("tag_16"), None);
    scene.teardown();
}

#[test]
fn scene_file_round_trips_through_composer() {
    let (codec, description) = kitchen_table();
    let path = std::env::temp_dir().join(format!("scene_engine_lifecycle_{}.toml", std::process::id()));
    let path = path.to_string_lossy().to_string();
    description.save_to_file(&path).unwrap();

    let mut scene = SceneComposer::from_file(HeadlessContext::new(), Box::new(codec), &path).unwrap();
    let _ = std::fs::remove_file(&path);

    assert_eq!(scene.description(), &description);
    assert_eq!(scene.prepare().unwrap().textures_loaded, 2);
    scene.teardown();
}

#[test]
fn missing_scene_file_is_a_config_error() {
    let result = SceneComposer::from_file(
        HeadlessContext::new(),
        Box::new(InMemoryCodec::new()),
        "does/not/exist.toml",
    );
    assert!(matches!(result, Err(SceneError::Config(_))));
}
