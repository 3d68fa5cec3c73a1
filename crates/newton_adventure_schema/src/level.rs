//! Messages of the `im.bci.newtonadv.nal` level format.
//!
//! Mirrors `proto/newton_adventure_level.proto`. Optional proto2 fields stay
//! `Option`s so readers can tell "unset" apart from a default value.

/// A point in map coordinates.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Position {
    #[prost(float, required, tag = "1")]
    pub x: f32,
    #[prost(float, required, tag = "2")]
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A polygon vertex, relative to the owning object's position.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Vertex {
    #[prost(float, required, tag = "1")]
    pub x: f32,
    #[prost(float, required, tag = "2")]
    pub y: f32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Rectangle {
    #[prost(float, required, tag = "1")]
    pub width: f32,
    #[prost(float, required, tag = "2")]
    pub height: f32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ConvexPolygon {
    #[prost(message, repeated, tag = "1")]
    pub vertices: Vec<Vertex>,
}

/// Collision shape of an entity type. Left empty for unsupported shapes.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Shape {
    #[prost(oneof = "shape::Kind", tags = "1, 2")]
    pub kind: Option<shape::Kind>,
}

pub mod shape {
    #[derive(Clone, PartialEq, prost::Oneof)]
    pub enum Kind {
        #[prost(message, tag = "1")]
        Rectangle(super::Rectangle),
        #[prost(message, tag = "2")]
        Polygon(super::ConvexPolygon),
    }
}

/// Points at an animation, either in an external nanim archive or in the
/// level's own companion archive.
#[derive(Clone, PartialEq, prost::Message)]
pub struct AnimationReference {
    #[prost(string, optional, tag = "1")]
    pub file: Option<String>,
    #[prost(string, optional, tag = "2")]
    pub name: Option<String>,
}

impl AnimationReference {
    /// Returns `true` when neither the file nor the name was resolved.
    pub fn is_empty(&self) -> bool {
        self.file.is_none() && self.name.is_none()
    }
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Pikes {
    #[prost(enumeration = "pikes::DangerousSide", optional, tag = "1")]
    pub dangerous_side: Option<i32>,
    #[prost(message, optional, tag = "2")]
    pub animation: Option<AnimationReference>,
}

pub mod pikes {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
    #[repr(i32)]
    pub enum DangerousSide {
        Up = 1,
        Down = 2,
        Left = 3,
        Right = 4,
    }
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Platform {
    #[prost(bool, optional, tag = "1")]
    pub enabled: Option<bool>,
    #[prost(float, optional, tag = "2")]
    pub friction: Option<f32>,
    #[prost(message, optional, tag = "3")]
    pub animation: Option<AnimationReference>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Cannon {
    #[prost(enumeration = "cannon::Orientation", optional, tag = "1")]
    pub orientation: Option<i32>,
    #[prost(message, optional, tag = "2")]
    pub animation: Option<AnimationReference>,
}

pub mod cannon {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
    #[repr(i32)]
    pub enum Orientation {
        Up = 1,
        Down = 2,
        Left = 3,
        Right = 4,
    }
}

/// Declares payloads that carry nothing but their animation.
macro_rules! animation_only_payloads {
    ($($name:ident),* $(,)?) => {
        $(
            #[derive(Clone, PartialEq, prost::Message)]
            pub struct $name {
                #[prost(message, optional, tag = "1")]
                pub animation: Option<AnimationReference>,
            }
        )*
    };
}

animation_only_payloads!(
    BouncePlatform,
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
    KeyLock,
    HelpSign,
    Hero,
);

#[derive(Clone, PartialEq, prost::Message)]
pub struct MobilePikeAnchor {
    #[prost(message, optional, tag = "1")]
    pub animation: Option<AnimationReference>,
    #[prost(message, optional, tag = "2")]
    pub mobile_pikes_animation: Option<AnimationReference>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct AxeAnchor {
    #[prost(message, optional, tag = "1")]
    pub animation: Option<AnimationReference>,
    #[prost(message, optional, tag = "2")]
    pub axe_animation: Option<AnimationReference>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Activator {
    #[prost(int32, optional, tag = "1")]
    pub activable_id: Option<i32>,
    #[prost(message, optional, tag = "2")]
    pub on_animation: Option<AnimationReference>,
    #[prost(message, optional, tag = "3")]
    pub off_animation: Option<AnimationReference>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct MemoryActivator {
    #[prost(int32, optional, tag = "1")]
    pub activable_id: Option<i32>,
    #[prost(message, optional, tag = "2")]
    pub on_animation: Option<AnimationReference>,
    #[prost(message, optional, tag = "3")]
    pub off_animation: Option<AnimationReference>,
    #[prost(message, optional, tag = "4")]
    pub hide_animation: Option<AnimationReference>,
}

/// Waypoints followed by a moving platform.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Path {
    #[prost(message, repeated, tag = "1")]
    pub positions: Vec<Position>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct MovingPlatform {
    #[prost(message, optional, tag = "1")]
    pub animation: Option<AnimationReference>,
    #[prost(message, optional, tag = "2")]
    pub path: Option<Path>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Teleporter {
    #[prost(message, optional, tag = "1")]
    pub animation: Option<AnimationReference>,
    #[prost(string, optional, tag = "2")]
    pub color: Option<String>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct EgyptianBoss {
    #[prost(message, optional, tag = "1")]
    pub body_animation: Option<AnimationReference>,
    #[prost(message, optional, tag = "2")]
    pub hand_animation: Option<AnimationReference>,
}

/// Shared description of one kind of placed object.
///
/// `payload` is `None` for objects whose kind the game does not know; those
/// types still carry their shape.
#[derive(Clone, PartialEq, prost::Message)]
pub struct EntityType {
    #[prost(string, required, tag = "1")]
    pub name: String,
    #[prost(message, optional, tag = "2")]
    pub shape: Option<Shape>,
    #[prost(
        oneof = "entity_type::Payload",
        tags = "3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26"
    )]
    pub payload: Option<entity_type::Payload>,
}

impl EntityType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shape: None,
            payload: None,
        }
    }
}

pub mod entity_type {
    use super::AnimationReference;

    #[derive(Clone, PartialEq, prost::Oneof)]
    pub enum Payload {
        #[prost(message, tag = "3")]
        Pikes(super::Pikes),
        #[prost(message, tag = "4")]
        Platform(super::Platform),
        #[prost(message, tag = "5")]
        BouncePlatform(super::BouncePlatform),
        #[prost(message, tag = "6")]
        Cannon(super::Cannon),
        #[prost(message, tag = "7")]
        Mummy(super::Mummy),
        #[prost(message, tag = "8")]
        Bat(super::Bat),
        #[prost(message, tag = "9")]
        Apple(super::Apple),
        #[prost(message, tag = "10")]
        Coin(super::Coin),
        #[prost(message, tag = "11")]
        Key(super::Key),
        #[prost(message, tag = "12")]
        Door(super::Door),
        #[prost(message, tag = "13")]
        DoorToBonusWorld(super::DoorToBonusWorld),
        #[prost(message, tag = "14")]
        Cloud(super::Cloud),
        #[prost(message, tag = "15")]
        WorldMap(super::WorldMap),
        #[prost(message, tag = "16")]
        Compass(super::Compass),
        #[prost(message, tag = "17")]
        MobilePikeAnchor(super::MobilePikeAnchor),
        #[prost(message, tag = "18")]
        AxeAnchor(super::AxeAnchor),
        #[prost(message, tag = "19")]
        Activator(super::Activator),
        #[prost(message, tag = "20")]
        MemoryActivator(super::MemoryActivator),
        #[prost(message, tag = "21")]
        MovingPlatform(super::MovingPlatform),
        #[prost(message, tag = "22")]
        Teleporter(super::Teleporter),
        #[prost(message, tag = "23")]
        KeyLock(super::KeyLock),
        #[prost(message, tag = "24")]
        HelpSign(super::HelpSign),
        #[prost(message, tag = "25")]
        EgyptianBoss(super::EgyptianBoss),
        #[prost(message, tag = "26")]
        Hero(super::Hero),
    }

    impl Payload {
        /// Every animation reference carried by this payload, in field order.
        pub fn animations(&self) -> Vec<&AnimationReference> {
            let refs = match self {
                Payload::Pikes(p) => vec![&p.animation],
                Payload::Platform(p) => vec![&p.animation],
                Payload::BouncePlatform(p) => vec![&p.animation],
                Payload::Cannon(p) => vec![&p.animation],
                Payload::Mummy(p) => vec![&p.animation],
                Payload::Bat(p) => vec![&p.animation],
                Payload::Apple(p) => vec![&p.animation],
                Payload::Coin(p) => vec![&p.animation],
                Payload::Key(p) => vec![&p.animation],
                Payload::Door(p) => vec![&p.animation],
                Payload::DoorToBonusWorld(p) => vec![&p.animation],
                Payload::Cloud(p) => vec![&p.animation],
                Payload::WorldMap(p) => vec![&p.animation],
                Payload::Compass(p) => vec![&p.animation],
                Payload::MobilePikeAnchor(p) => vec![&p.animation, &p.mobile_pikes_animation],
                Payload::AxeAnchor(p) => vec![&p.animation, &p.axe_animation],
                Payload::Activator(p) => vec![&p.on_animation, &p.off_animation],
                Payload::MemoryActivator(p) => {
                    vec![&p.on_animation, &p.off_animation, &p.hide_animation]
                }
                Payload::MovingPlatform(p) => vec![&p.animation],
                Payload::Teleporter(p) => vec![&p.animation],
                Payload::KeyLock(p) => vec![&p.animation],
                Payload::HelpSign(p) => vec![&p.animation],
                Payload::EgyptianBoss(p) => vec![&p.body_animation, &p.hand_animation],
                Payload::Hero(p) => vec![&p.animation],
            };
            refs.into_iter().flatten().collect()
        }
    }
}

/// One placed instance of an entity type.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Entity {
    #[prost(message, required, tag = "1")]
    pub position: Position,
    #[prost(int32, required, tag = "2")]
    pub zorder: i32,
    /// Name of the [`EntityType`] this entity instantiates.
    #[prost(string, required, tag = "3")]
    pub r#type: String,
}

/// Root message of a level file.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Level {
    #[prost(message, repeated, tag = "1")]
    pub entities: Vec<Entity>,
    #[prost(message, repeated, tag = "2")]
    pub entity_types: Vec<EntityType>,
    #[prost(bool, optional, tag = "3")]
    pub rotate_gravity_possible: Option<bool>,
}

impl Level {
    /// Look up an entity type by name.
    pub fn entity_type(&self, name: &str) -> Option<&EntityType> {
        self.entity_types.iter().find(|t| t.name == name)
    }

    /// Names referenced by entities that have no matching entity type.
    pub fn dangling_type_references(&self) -> Vec<&str> {
        self.entities
            .iter()
            .map(|e| e.r#type.as_str())
            .filter(|name| self.entity_type(name).is_none())
            .collect()
    }
}
