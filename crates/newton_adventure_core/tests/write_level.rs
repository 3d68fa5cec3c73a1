//! End-to-end export: build a map, write it, decode both files.

use std::fs;

use image::{Rgba, RgbaImage};
use newton_adventure_core::prelude::*;
use newton_adventure_schema::level::entity_type::Payload;
use newton_adventure_schema::prelude::{PixelFormat, decode_level, decode_nanim};
use tempfile::TempDir;

// ============================================================================
// Test Utilities
// ============================================================================

/// A 2x1 tile image with a translucent second pixel.
fn write_tile_image(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("crate.png");
    let mut image = RgbaImage::new(2, 1);
    image.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
    image.put_pixel(1, 0, Rgba([0, 255, 0, 128]));
    image.save(&path).unwrap();
    path
}

fn sample_map(tile_image: std::path::PathBuf) -> MapDocument {
    let crate_tile = TileRef::new(42)
        .with_property("newton_adventure.platform.friction", "0.5")
        .with_image(TileImage::File {
            source: tile_image,
            transparent: None,
        });
    let square = ObjectShape::Rectangle {
        width: 2.0,
        height: 1.0,
    };

    MapDocument::new()
        .with_property("newton_adventure.rotate_gravity_possible", "true")
        .with_layer(Layer::tiles("background"))
        .with_layer(Layer::objects(
            "platforms",
            vec![
                MapObject::new("left")
                    .with_kind("platform")
                    .with_shape(square.clone())
                    .with_tile(crate_tile.clone())
                    .at(0.0, 100.0),
                MapObject::new("right")
                    .with_kind("platform")
                    .with_shape(square)
                    .with_tile(crate_tile)
                    .with_property("newton_adventure.platform.enabled", "false")
                    .at(64.0, 100.0),
            ],
        ))
        .with_layer(Layer::objects(
            "actors",
            vec![
                MapObject::new("hero")
                    .with_kind("hero")
                    .with_property("newton_adventure.animation.file", "hero.nanim")
                    .with_property("newton_adventure.animation.name", "idle")
                    .at(10.0, 90.0),
                MapObject::new("lift")
                    .with_kind("moving_platform")
                    .with_property("newton_adventure.moving_platform.path", "lift_path")
                    .at(30.0, 50.0),
                MapObject::new("lift_path").with_shape(ObjectShape::Polygon {
                    points: vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)],
                }),
            ],
        ))
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn test_write_produces_consistent_level_and_archive() {
    let dir = TempDir::new().unwrap();
    let map = sample_map(write_tile_image(&dir));
    let target = dir.path().join("world1.nal");

    let writer = LevelWriter::new(&map, &target);
    writer.write().unwrap();

    let level = decode_level(&fs::read(&target).unwrap()).unwrap();
    let nanim = decode_nanim(&fs::read(dir.path().join("world1.nanim")).unwrap()).unwrap();

    assert_eq!(level.entities.len(), 5);
    assert_eq!(level.entity_types.len(), 4);
    assert!(level.dangling_type_references().is_empty());
    assert_eq!(level.rotate_gravity_possible, Some(true));

    let zorders: Vec<i32> = level.entities.iter().map(|e| e.zorder).collect();
    assert_eq!(zorders, vec![0, 0, 1, 1, 1]);

    // Both crates share the first crate's type, including its enabled flag
    let platform_type = level.entity_type("tile_42").unwrap();
    let Some(Payload::Platform(platform)) = &platform_type.payload else {
        panic!("expected a platform");
    };
    assert_eq!(platform.enabled, Some(true));
    assert_eq!(platform.friction, Some(0.5));

    // Every embedded reference resolves inside the companion archive
    for entity_type in &level.entity_types {
        let Some(payload) = &entity_type.payload else {
            continue;
        };
        for reference in payload.animations() {
            if reference.file.as_deref() == Some("world1.nanim") {
                let name = reference.name.as_deref().unwrap();
                assert!(nanim.animation(name).is_some(), "missing animation {name}");
            }
        }
    }

    assert_eq!(nanim.animations.len(), 1);
    assert!(nanim.dangling_image_references().is_empty());
    let image = nanim.image("tile_42").unwrap();
    assert_eq!(image.pixel_format(), Some(PixelFormat::Rgba8888));
    assert_eq!(image.pixels, vec![255, 0, 0, 255, 0, 255, 0, 128]);
}

#[test]
fn test_moving_platform_path_and_external_animation_survive_encoding() {
    let dir = TempDir::new().unwrap();
    let map = sample_map(write_tile_image(&dir));
    let target = dir.path().join("world1.nal");

    LevelWriter::new(&map, &target).write().unwrap();
    let level = decode_level(&fs::read(&target).unwrap()).unwrap();

    let Some(Payload::MovingPlatform(lift)) = &level.entity_type("lift").unwrap().payload else {
        panic!("expected a moving platform");
    };
    let path: Vec<(f32, f32)> = lift
        .path
        .as_ref()
        .unwrap()
        .positions
        .iter()
        .map(|p| (p.x, p.y))
        .collect();
    assert_eq!(path, vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);

    let Some(Payload::Hero(hero)) = &level.entity_type("hero").unwrap().payload else {
        panic!("expected a hero");
    };
    let animation = hero.animation.as_ref().unwrap();
    assert_eq!(animation.file.as_deref(), Some("hero.nanim"));
    assert_eq!(animation.name.as_deref(), Some("idle"));

    // The path helper has no kind: shape only
    let helper = level.entity_type("lift_path").unwrap();
    assert!(helper.payload.is_none());
    assert!(helper.shape.as_ref().unwrap().kind.is_some());
}

#[test]
fn test_config_file_drives_export() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("export.json");
    fs::write(&config_path, r#"{ "animation_extension": "anim" }"#).unwrap();
    let config = ExportConfig::from_json_file(&config_path).unwrap();

    let map = sample_map(write_tile_image(&dir));
    let target = dir.path().join("world2.nal");
    LevelWriter::new(&map, &target)
        .with_config(config)
        .write()
        .unwrap();

    assert!(dir.path().join("world2.anim").exists());
    let level = decode_level(&fs::read(&target).unwrap()).unwrap();
    let Some(Payload::Platform(platform)) = &level.entity_type("tile_42").unwrap().payload else {
        panic!("expected a platform");
    };
    assert_eq!(
        platform.animation.as_ref().unwrap().file.as_deref(),
        Some("world2.anim")
    );
}
