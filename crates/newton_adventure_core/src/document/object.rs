//! Map objects.

use crate::document::tile::TileRef;
use crate::properties::Properties;

/// Object geometry, with points relative to the object position.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectShape {
    /// Point object (no dimensions)
    Point,

    Rectangle { width: f32, height: f32 },

    Ellipse { width: f32, height: f32 },

    Polygon { points: Vec<(f32, f32)> },

    Polyline { points: Vec<(f32, f32)> },

    Text,
}

/// One object of an object layer.
#[derive(Debug, Clone)]
pub struct MapObject {
    /// Tiled's object id (0 for hand-built objects)
    pub id: u32,
    pub name: String,
    /// Declared kind ("type" or "class" in the editor), e.g. `platform`
    pub kind: String,
    pub x: f32,
    pub y: f32,
    pub shape: ObjectShape,
    /// Tile drawn by this object, for tile objects
    pub tile: Option<TileRef>,
    pub properties: Properties,
}

impl MapObject {
    /// A named 0×0 rectangle at the origin with no kind.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            kind: String::new(),
            x: 0.0,
            y: 0.0,
            shape: ObjectShape::Rectangle {
                width: 0.0,
                height: 0.0,
            },
            tile: None,
            properties: Properties::new(),
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn with_shape(mut self, shape: ObjectShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_tile(mut self, tile: TileRef) -> Self {
        self.tile = Some(tile);
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key, value);
        self
    }

    /// Properties the converters see: tile properties first, then the object's own.
    pub fn merged_properties(&self) -> Properties {
        match &self.tile {
            Some(tile) => Properties::merged([&tile.properties, &self.properties]),
            None => self.properties.clone(),
        }
    }
}
