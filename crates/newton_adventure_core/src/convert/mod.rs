//! Map to level conversion.
//!
//! A [`LevelConversion`] walks the object groups of a [`MapDocument`] in layer
//! order and emits one [`Entity`] per object. Entity types are built the first
//! time their type key is seen and shared afterwards; tile graphics they need
//! are embedded into the companion animation archive on the way.

pub mod animation;
pub mod entity_types;
pub mod shape;
pub mod variants;

use newton_adventure_schema::level::{Entity, EntityType, Level, Position};
use newton_adventure_schema::nanim::Nanim;
use tracing::debug;

use crate::config::ExportConfig;
use crate::document::{MapDocument, MapObject, ObjectGroup};
use crate::error::ExportError;

pub use animation::{AnimationArchive, AnimationResolver};
pub use entity_types::{EntityTypeId, EntityTypeRegistry, type_key};
pub use shape::object_to_shape;
pub use variants::{ConvertContext, EntityKind, convert_payload};

/// Output of one conversion run: the level and its companion archive.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertedLevel {
    pub level: Level,
    pub animations: Nanim,
}

/// State of one conversion run over a map.
pub struct LevelConversion<'a> {
    document: &'a MapDocument,
    config: &'a ExportConfig,
    entity_types: EntityTypeRegistry,
    entities: Vec<Entity>,
    animations: AnimationResolver,
}

impl<'a> LevelConversion<'a> {
    /// Start a conversion. `companion_file` is the file name written into
    /// references to embedded animations.
    pub fn new(
        document: &'a MapDocument,
        config: &'a ExportConfig,
        companion_file: impl Into<String>,
    ) -> Self {
        Self {
            document,
            config,
            entity_types: EntityTypeRegistry::new(),
            entities: Vec::new(),
            animations: AnimationResolver::new(
                companion_file,
                config.key("animation"),
                config.embedded_frame_duration,
            ),
        }
    }

    /// Convert every object group and finish the run.
    pub fn run(mut self) -> Result<ConvertedLevel, ExportError> {
        let document = self.document;
        for (zorder, group) in document.object_groups().enumerate() {
            self.convert_object_group(group, zorder as i32)?;
        }
        Ok(self.finish())
    }

    fn convert_object_group(&mut self, group: &ObjectGroup, zorder: i32) -> Result<(), ExportError> {
        for object in &group.objects {
            let id = self.resolve(object)?;
            self.entities.push(Entity {
                position: Position::new(object.x, object.y),
                zorder,
                r#type: self.entity_types.get(id).name.clone(),
            });
        }
        Ok(())
    }

    /// Entity type of `object`, converted on first sight of its type key.
    pub fn resolve(&mut self, object: &MapObject) -> Result<EntityTypeId, ExportError> {
        let mut ctx = ConvertContext {
            document: self.document,
            config: self.config,
            animations: &mut self.animations,
        };
        self.entity_types
            .resolve(object, |name| build_entity_type(name, object, &mut ctx))
    }

    fn finish(self) -> ConvertedLevel {
        let gravity_key = self.config.key("rotate_gravity_possible");
        let rotate_gravity_possible = self.document.properties.get(&gravity_key) == "true";

        debug!(
            "Converted {} entities of {} types, {} embedded animations",
            self.entities.len(),
            self.entity_types.len(),
            self.animations.archive().len()
        );

        ConvertedLevel {
            level: Level {
                entities: self.entities,
                entity_types: self.entity_types.into_vec(),
                rotate_gravity_possible: Some(rotate_gravity_possible),
            },
            animations: self.animations.into_archive().into_nanim(),
        }
    }
}

fn build_entity_type(
    name: &str,
    object: &MapObject,
    ctx: &mut ConvertContext,
) -> Result<EntityType, ExportError> {
    let mut entity_type = EntityType::new(name);
    entity_type.shape = Some(object_to_shape(&object.shape));

    match EntityKind::parse(&object.kind, ctx.config.legacy_names) {
        Some(kind) => {
            let properties = object.merged_properties();
            entity_type.payload = Some(convert_payload(kind, object, &properties, ctx)?);
            debug!("New entity type {:?} ({})", name, kind.as_str());
        }
        None => {
            debug!(
                "New entity type {:?} with unknown kind {:?}, shape only",
                name, object.kind
            );
        }
    }

    Ok(entity_type)
}

/// Convert a map with default settings.
pub fn convert_map(
    document: &MapDocument,
    companion_file: &str,
) -> Result<ConvertedLevel, ExportError> {
    LevelConversion::new(document, &ExportConfig::default(), companion_file).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::Bitmap;
    use crate::document::{Layer, ObjectShape, TileImage, TileRef};
    use newton_adventure_schema::level::entity_type::Payload;
    use newton_adventure_schema::level::shape::Kind;

    fn crate_tile() -> TileRef {
        let bitmap = Bitmap::from_rgba(1, 1, false, vec![9, 8, 7, 255]).unwrap();
        TileRef::new(42).with_image(TileImage::Bitmap(bitmap))
    }

    fn rect(name: &str, kind: &str) -> MapObject {
        MapObject::new(name).with_kind(kind).with_shape(ObjectShape::Rectangle {
            width: 16.0,
            height: 8.0,
        })
    }

    #[test]
    fn test_zorder_counts_object_groups_only() {
        let document = MapDocument::new()
            .with_layer(Layer::tiles("background"))
            .with_layer(Layer::objects("first", vec![rect("a", "coin")]))
            .with_layer(Layer::image("parallax"))
            .with_layer(Layer::tiles("decor"))
            .with_layer(Layer::objects("second", vec![rect("b", "coin"), rect("c", "bat")]));

        let converted = convert_map(&document, "level.nanim").unwrap();

        let zorders: Vec<(&str, i32)> = converted
            .level
            .entities
            .iter()
            .map(|e| (e.r#type.as_str(), e.zorder))
            .collect();
        assert_eq!(zorders, vec![("a", 0), ("b", 1), ("c", 1)]);
    }

    #[test]
    fn test_shared_tile_converts_once() {
        let document = MapDocument::new().with_layer(Layer::objects(
            "crates",
            vec![
                rect("left", "platform").with_tile(crate_tile()).at(0.0, 0.0),
                rect("right", "platform").with_tile(crate_tile()).at(32.0, 0.0),
            ],
        ));

        let converted = convert_map(&document, "level.nanim").unwrap();

        assert_eq!(converted.level.entities.len(), 2);
        assert_eq!(converted.level.entity_types.len(), 1);
        assert!(converted.level.entities.iter().all(|e| e.r#type == "tile_42"));
        assert_eq!(converted.animations.animations.len(), 1);
        assert_eq!(converted.animations.images.len(), 1);
        assert_eq!(converted.animations.images[0].pixels, vec![9, 8, 7]);
    }

    #[test]
    fn test_tile_animation_points_at_companion_file() {
        let document = MapDocument::new().with_layer(Layer::objects(
            "crates",
            vec![rect("box", "platform").with_tile(crate_tile())],
        ));

        let converted = convert_map(&document, "world1.nanim").unwrap();

        let Some(Payload::Platform(platform)) = &converted.level.entity_types[0].payload else {
            panic!("expected a platform");
        };
        let animation = platform.animation.as_ref().unwrap();
        assert_eq!(animation.file.as_deref(), Some("world1.nanim"));
        assert_eq!(animation.name.as_deref(), Some("tile_42"));
        assert!(converted.animations.animation("tile_42").is_some());
    }

    #[test]
    fn test_unknown_kind_keeps_shape_without_payload() {
        let document = MapDocument::new()
            .with_layer(Layer::objects("misc", vec![rect("marker", "spaceship")]));

        let converted = convert_map(&document, "level.nanim").unwrap();

        let entity_type = converted.level.entity_type("marker").unwrap();
        assert!(entity_type.payload.is_none());
        assert_eq!(
            entity_type.shape.as_ref().unwrap().kind,
            Some(Kind::Rectangle(newton_adventure_schema::level::Rectangle {
                width: 16.0,
                height: 8.0
            }))
        );
    }

    #[test]
    fn test_every_entity_references_a_type() {
        let document = MapDocument::new()
            .with_layer(Layer::objects(
                "front",
                vec![rect("hero", "hero"), rect("door", "door"), rect("hero", "hero")],
            ))
            .with_layer(Layer::objects("back", vec![rect("cloud", "cloud")]));

        let converted = convert_map(&document, "level.nanim").unwrap();

        assert_eq!(converted.level.entities.len(), 4);
        assert_eq!(converted.level.entity_types.len(), 3);
        assert!(converted.level.dangling_type_references().is_empty());
        assert!(converted.animations.dangling_image_references().is_empty());
    }

    #[test]
    fn test_rotate_gravity_flag() {
        let on = MapDocument::new().with_property("newton_adventure.rotate_gravity_possible", "true");
        let odd = MapDocument::new().with_property("newton_adventure.rotate_gravity_possible", "yes");

        assert_eq!(
            convert_map(&on, "l.nanim").unwrap().level.rotate_gravity_possible,
            Some(true)
        );
        assert_eq!(
            convert_map(&odd, "l.nanim").unwrap().level.rotate_gravity_possible,
            Some(false)
        );
        assert_eq!(
            convert_map(&MapDocument::new(), "l.nanim")
                .unwrap()
                .level
                .rotate_gravity_possible,
            Some(false)
        );
    }

    #[test]
    fn test_custom_namespace() {
        let config = ExportConfig {
            property_namespace: "na".to_string(),
            ..Default::default()
        };
        let document = MapDocument::new().with_layer(Layer::objects(
            "front",
            vec![rect("ice", "platform").with_property("na.platform.friction", "0.1")],
        ));

        let converted = LevelConversion::new(&document, &config, "l.nanim").run().unwrap();

        let Some(Payload::Platform(platform)) = &converted.level.entity_types[0].payload else {
            panic!("expected a platform");
        };
        assert_eq!(platform.friction, Some(0.1));
    }

    #[test]
    fn test_legacy_kind_names_can_be_disabled() {
        let document =
            MapDocument::new().with_layer(Layer::objects("front", vec![rect("old", "platfom")]));

        let legacy = convert_map(&document, "l.nanim").unwrap();
        let strict_config = ExportConfig {
            legacy_names: false,
            ..Default::default()
        };
        let strict = LevelConversion::new(&document, &strict_config, "l.nanim")
            .run()
            .unwrap();

        assert!(matches!(
            legacy.level.entity_types[0].payload,
            Some(Payload::Platform(_))
        ));
        assert!(strict.level.entity_types[0].payload.is_none());
    }

    #[test]
    fn test_image_decode_failure_propagates() {
        let tile = TileRef::new(1).with_image(TileImage::File {
            source: "missing/tiles.png".into(),
            transparent: None,
        });
        let document = MapDocument::new()
            .with_layer(Layer::objects("front", vec![rect("x", "coin").with_tile(tile)]));

        let err = convert_map(&document, "l.nanim").unwrap_err();

        assert!(matches!(err, ExportError::Image { .. }));
    }
}
