//! Per-kind conversion of objects into entity type payloads.

use newton_adventure_schema::level::entity_type::Payload;
use newton_adventure_schema::level::{
    Activator, AnimationReference, Apple, AxeAnchor, Bat, BouncePlatform, Cannon, Cloud, Coin,
    Compass, Door, DoorToBonusWorld, EgyptianBoss, HelpSign, Hero, Key, KeyLock, MemoryActivator,
    MobilePikeAnchor, MovingPlatform, Mummy, Path, Pikes, Platform, Position, Teleporter,
    WorldMap, cannon, pikes,
};
use tracing::warn;

use crate::config::ExportConfig;
use crate::convert::animation::AnimationResolver;
use crate::document::{MapDocument, MapObject, ObjectShape};
use crate::error::ExportError;
use crate::properties::Properties;

/// Entity kinds the game understands, parsed from an object's declared kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Pikes,
    Platform,
    BouncePlatform,
    Cannon,
    Mummy,
    Bat,
    Apple,
    Coin,
    Key,
    Door,
    DoorToBonusWorld,
    Cloud,
    WorldMap,
    Compass,
    MobilePikeAnchor,
    AxeAnchor,
    Activator,
    MemoryActivator,
    MovingPlatform,
    Teleporter,
    KeyLock,
    HelpSign,
    EgyptianBoss,
    Hero,
}

impl EntityKind {
    pub const ALL: [EntityKind; 24] = [
        EntityKind::Pikes,
        EntityKind::Platform,
        EntityKind::BouncePlatform,
        EntityKind::Cannon,
        EntityKind::Mummy,
        EntityKind::Bat,
        EntityKind::Apple,
        EntityKind::Coin,
        EntityKind::Key,
        EntityKind::Door,
        EntityKind::DoorToBonusWorld,
        EntityKind::Cloud,
        EntityKind::WorldMap,
        EntityKind::Compass,
        EntityKind::MobilePikeAnchor,
        EntityKind::AxeAnchor,
        EntityKind::Activator,
        EntityKind::MemoryActivator,
        EntityKind::MovingPlatform,
        EntityKind::Teleporter,
        EntityKind::KeyLock,
        EntityKind::HelpSign,
        EntityKind::EgyptianBoss,
        EntityKind::Hero,
    ];

    /// Kind string as typed in the map editor.
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Pikes => "pikes",
            EntityKind::Platform => "platform",
            EntityKind::BouncePlatform => "bounce_platform",
            EntityKind::Cannon => "cannon",
            EntityKind::Mummy => "mummy",
            EntityKind::Bat => "bat",
            EntityKind::Apple => "apple",
            EntityKind::Coin => "coin",
            EntityKind::Key => "key",
            EntityKind::Door => "door",
            EntityKind::DoorToBonusWorld => "door_to_bonus_world",
            EntityKind::Cloud => "cloud",
            EntityKind::WorldMap => "world_map",
            EntityKind::Compass => "compass",
            EntityKind::MobilePikeAnchor => "mobile_pike_anchor",
            EntityKind::AxeAnchor => "axe_anchor",
            EntityKind::Activator => "activator",
            EntityKind::MemoryActivator => "memory_activator",
            EntityKind::MovingPlatform => "moving_platform",
            EntityKind::Teleporter => "teleporter",
            EntityKind::KeyLock => "key_lock",
            EntityKind::HelpSign => "help_sign",
            EntityKind::EgyptianBoss => "egyptian_boss",
            EntityKind::Hero => "hero",
        }
    }

    /// Parse a kind string. With `legacy_names`, misspellings written by older
    /// exporters are accepted too.
    pub fn parse(kind: &str, legacy_names: bool) -> Option<Self> {
        if let Some(found) = Self::ALL.into_iter().find(|k| k.as_str() == kind) {
            return Some(found);
        }
        if !legacy_names {
            return None;
        }
        match kind {
            "platfom" => Some(EntityKind::Platform),
            "mumy" => Some(EntityKind::Mummy),
            "egyption_boss" => Some(EntityKind::EgyptianBoss),
            _ => None,
        }
    }
}

/// Read-only inputs and the animation resolver shared by every converter.
pub struct ConvertContext<'a> {
    pub document: &'a MapDocument,
    pub config: &'a ExportConfig,
    pub animations: &'a mut AnimationResolver,
}

impl ConvertContext<'_> {
    fn key(&self, suffix: &str) -> String {
        self.config.key(suffix)
    }

    /// Default animation role: external properties or the object's tile.
    fn animation(
        &mut self,
        object: &MapObject,
        properties: &Properties,
    ) -> Result<Option<AnimationReference>, ExportError> {
        let mut reference = AnimationReference::default();
        self.animations.resolve(&mut reference, object, properties)?;
        Ok(Some(reference))
    }

    /// Animation role that only comes from `<ns>.<suffix>.file` / `.name`.
    fn external_animation(&self, properties: &Properties, suffix: &str) -> Option<AnimationReference> {
        let mut reference = AnimationReference::default();
        self.animations
            .resolve_external(&mut reference, properties, &self.key(suffix));
        Some(reference)
    }
}

/// Build the payload for `kind` from an object and its merged properties.
pub fn convert_payload(
    kind: EntityKind,
    object: &MapObject,
    properties: &Properties,
    ctx: &mut ConvertContext,
) -> Result<Payload, ExportError> {
    let payload = match kind {
        EntityKind::Pikes => Payload::Pikes(convert_pikes(object, properties, ctx)?),
        EntityKind::Platform => Payload::Platform(convert_platform(object, properties, ctx)?),
        EntityKind::Cannon => Payload::Cannon(convert_cannon(object, properties, ctx)?),
        EntityKind::MobilePikeAnchor => Payload::MobilePikeAnchor(MobilePikeAnchor {
            animation: ctx.animation(object, properties)?,
            mobile_pikes_animation: ctx
                .external_animation(properties, "mobile_pike_anchor.mobile_pike_animation"),
        }),
        EntityKind::AxeAnchor => Payload::AxeAnchor(AxeAnchor {
            animation: ctx.animation(object, properties)?,
            axe_animation: ctx.external_animation(properties, "axe_anchor.axe_animation"),
        }),
        EntityKind::Activator => Payload::Activator(Activator {
            activable_id: Some(properties.parse_or_default(&ctx.key("activator.activate_id"))),
            on_animation: ctx.external_animation(properties, "activator.on_animation"),
            off_animation: ctx.external_animation(properties, "activator.off_animation"),
        }),
        EntityKind::MemoryActivator => {
            Payload::MemoryActivator(convert_memory_activator(properties, ctx))
        }
        EntityKind::MovingPlatform => {
            Payload::MovingPlatform(convert_moving_platform(object, properties, ctx)?)
        }
        EntityKind::Teleporter => Payload::Teleporter(convert_teleporter(object, properties, ctx)?),
        EntityKind::EgyptianBoss => Payload::EgyptianBoss(EgyptianBoss {
            body_animation: ctx.external_animation(properties, "egyptian_boss.body_animation"),
            hand_animation: ctx.external_animation(properties, "egyptian_boss.hand_animation"),
        }),
        EntityKind::BouncePlatform => Payload::BouncePlatform(BouncePlatform {
            animation: ctx.animation(object, properties)?,
        }),
        EntityKind::Mummy => Payload::Mummy(Mummy {
            animation: ctx.animation(object, properties)?,
        }),
        EntityKind::Bat => Payload::Bat(Bat {
            animation: ctx.animation(object, properties)?,
        }),
        EntityKind::Apple => Payload::Apple(Apple {
            animation: ctx.animation(object, properties)?,
        }),
        EntityKind::Coin => Payload::Coin(Coin {
            animation: ctx.animation(object, properties)?,
        }),
        EntityKind::Key => Payload::Key(Key {
            animation: ctx.animation(object, properties)?,
        }),
        EntityKind::Door => Payload::Door(Door {
            animation: ctx.animation(object, properties)?,
        }),
        EntityKind::DoorToBonusWorld => Payload::DoorToBonusWorld(DoorToBonusWorld {
            animation: ctx.animation(object, properties)?,
        }),
        EntityKind::Cloud => Payload::Cloud(Cloud {
            animation: ctx.animation(object, properties)?,
        }),
        EntityKind::WorldMap => Payload::WorldMap(WorldMap {
            animation: ctx.animation(object, properties)?,
        }),
        EntityKind::Compass => Payload::Compass(Compass {
            animation: ctx.animation(object, properties)?,
        }),
        EntityKind::KeyLock => Payload::KeyLock(KeyLock {
            animation: ctx.animation(object, properties)?,
        }),
        EntityKind::HelpSign => Payload::HelpSign(HelpSign {
            animation: ctx.animation(object, properties)?,
        }),
        EntityKind::Hero => Payload::Hero(Hero {
            animation: ctx.animation(object, properties)?,
        }),
    };
    Ok(payload)
}

/// Direction property shared by pikes and cannons, compared case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
    Left,
    Right,
}

fn parse_direction(value: &str) -> Option<Direction> {
    match value.to_ascii_lowercase().as_str() {
        "up" => Some(Direction::Up),
        "down" => Some(Direction::Down),
        "left" => Some(Direction::Left),
        "right" => Some(Direction::Right),
        _ => None,
    }
}

fn convert_pikes(
    object: &MapObject,
    properties: &Properties,
    ctx: &mut ConvertContext,
) -> Result<Pikes, ExportError> {
    let side = parse_direction(properties.get(&ctx.key("pikes.dangerous_side"))).map(|d| match d {
        Direction::Up => pikes::DangerousSide::Up,
        Direction::Down => pikes::DangerousSide::Down,
        Direction::Left => pikes::DangerousSide::Left,
        Direction::Right => pikes::DangerousSide::Right,
    });
    Ok(Pikes {
        dangerous_side: side.map(|side| side as i32),
        animation: ctx.animation(object, properties)?,
    })
}

fn convert_platform(
    object: &MapObject,
    properties: &Properties,
    ctx: &mut ConvertContext,
) -> Result<Platform, ExportError> {
    Ok(Platform {
        enabled: Some(properties.get(&ctx.key("platform.enabled")) != "false"),
        friction: properties.parse(&ctx.key("platform.friction")),
        animation: ctx.animation(object, properties)?,
    })
}

fn convert_cannon(
    object: &MapObject,
    properties: &Properties,
    ctx: &mut ConvertContext,
) -> Result<Cannon, ExportError> {
    let orientation =
        parse_direction(properties.get(&ctx.key("cannon.orientation"))).map(|d| match d {
            Direction::Up => cannon::Orientation::Up,
            Direction::Down => cannon::Orientation::Down,
            Direction::Left => cannon::Orientation::Left,
            Direction::Right => cannon::Orientation::Right,
        });
    Ok(Cannon {
        orientation: orientation.map(|orientation| orientation as i32),
        animation: ctx.animation(object, properties)?,
    })
}

fn convert_memory_activator(properties: &Properties, ctx: &ConvertContext) -> MemoryActivator {
    let activable_id = properties
        .parse(&ctx.key("memory_activator.activate_id"))
        .unwrap_or_else(|| properties.parse_or_default(&ctx.key("activator.activate_id")));
    MemoryActivator {
        activable_id: Some(activable_id),
        on_animation: ctx.external_animation(properties, "memory_activator.on_animation"),
        off_animation: ctx.external_animation(properties, "memory_activator.off_animation"),
        hide_animation: ctx.external_animation(properties, "memory_activator.hide_animation"),
    }
}

fn convert_moving_platform(
    object: &MapObject,
    properties: &Properties,
    ctx: &mut ConvertContext,
) -> Result<MovingPlatform, ExportError> {
    let animation = ctx.animation(object, properties)?;

    let helper_name = properties.get(&ctx.key("moving_platform.path"));
    // an unset helper name must not match unnamed objects
    let helper = Some(helper_name)
        .filter(|name| !name.is_empty())
        .and_then(|name| ctx.document.find_object_by_name(name));
    let positions = match helper {
        Some(helper) => match &helper.shape {
            ObjectShape::Polygon { points } | ObjectShape::Polyline { points } => points
                .iter()
                .map(|&(x, y)| Position::new(x, y))
                .collect(),
            _ => {
                warn!(
                    "Path helper {:?} of {:?} is not a polygon or polyline",
                    helper_name, object.name
                );
                Vec::new()
            }
        },
        None => {
            warn!(
                "Path helper {:?} of {:?} not found",
                helper_name, object.name
            );
            Vec::new()
        }
    };

    Ok(MovingPlatform {
        animation,
        path: Some(Path { positions }),
    })
}

fn convert_teleporter(
    object: &MapObject,
    properties: &Properties,
    ctx: &mut ConvertContext,
) -> Result<Teleporter, ExportError> {
    let mut color = properties.get(&ctx.key("teleporter.color"));
    if color.is_empty() && ctx.config.legacy_names {
        color = properties.get(&ctx.key("teleporer.color"));
    }
    Ok(Teleporter {
        animation: ctx.animation(object, properties)?,
        color: Some(color.to_string()),
    })
}
