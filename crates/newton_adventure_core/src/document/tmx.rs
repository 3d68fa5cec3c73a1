//! Loading `.tmx` files into a [`MapDocument`].

use std::path::Path;

use tiled::{LayerType, TilesetLocation};
use tracing::{debug, warn};

use crate::document::map::{Layer, LayerKind, MapDocument, ObjectGroup};
use crate::document::object::{MapObject, ObjectShape};
use crate::document::tile::{TileImage, TileRef};
use crate::error::ExportError;
use crate::properties::from_tiled::from_tiled_properties;

/// Load a Tiled map from disk.
///
/// Tilesets and templates are resolved by the `tiled` crate relative to the
/// map file. Group layers are flattened depth-first, so object groups nested
/// inside groups keep their position in the map's layer order.
///
/// # Arguments
/// * `path` - Path of the `.tmx` file
///
/// # Returns
/// * `Ok(MapDocument)` - Owned snapshot of the map
/// * `Err(ExportError::TiledError)` - If the map or one of its tilesets fails to parse
pub fn load_tmx(path: impl AsRef<Path>) -> Result<MapDocument, ExportError> {
    let path = path.as_ref();
    let mut loader = tiled::Loader::new();
    let map = loader.load_tmx_map(path)?;

    let mut layers = Vec::new();
    collect_layers(&map, map.layers(), &mut layers);

    debug!(
        "Loaded {:?}: {} layers, {} tilesets",
        path,
        layers.len(),
        map.tilesets().len()
    );

    Ok(MapDocument {
        layers,
        properties: from_tiled_properties(&map.properties),
    })
}

fn collect_layers<'a>(
    map: &tiled::Map,
    source: impl Iterator<Item = tiled::Layer<'a>>,
    layers: &mut Vec<Layer>,
) {
    for layer in source {
        let kind = match layer.layer_type() {
            LayerType::Objects(object_layer) => LayerKind::Objects(ObjectGroup {
                objects: object_layer
                    .objects()
                    .map(|object| convert_object(map, &object))
                    .collect(),
            }),
            LayerType::Tiles(_) => LayerKind::Tiles,
            LayerType::Image(_) => LayerKind::Image,
            LayerType::Group(group) => {
                collect_layers(map, group.layers(), layers);
                continue;
            }
        };
        layers.push(Layer {
            name: layer.name.clone(),
            kind,
        });
    }
}

fn convert_object(map: &tiled::Map, object: &tiled::Object) -> MapObject {
    let shape = match &object.shape {
        tiled::ObjectShape::Rect { width, height } => ObjectShape::Rectangle {
            width: *width,
            height: *height,
        },

        tiled::ObjectShape::Ellipse { width, height } => ObjectShape::Ellipse {
            width: *width,
            height: *height,
        },

        tiled::ObjectShape::Polyline { points } => ObjectShape::Polyline {
            points: points.clone(),
        },

        tiled::ObjectShape::Polygon { points } => ObjectShape::Polygon {
            points: points.clone(),
        },

        tiled::ObjectShape::Point(_, _) => ObjectShape::Point,

        tiled::ObjectShape::Text { .. } => ObjectShape::Text,
    };

    let tile = object.tile_data().and_then(|tile_data| {
        let tileset = match tile_data.tileset_location() {
            TilesetLocation::Map(index) => map.tilesets().get(*index).map(|tileset| &**tileset),
            TilesetLocation::Template(tileset) => Some(&**tileset),
        };
        let Some(tileset) = tileset else {
            warn!(
                "Object {} ({:?}) references a missing tileset",
                object.id(),
                object.name
            );
            return None;
        };
        Some(convert_tile(tileset, tile_data.id()))
    });

    MapObject {
        id: object.id(),
        name: object.name.clone(),
        kind: object.user_type.clone(),
        x: object.x,
        y: object.y,
        shape,
        tile,
        properties: from_tiled_properties(&object.properties),
    }
}

fn convert_tile(tileset: &tiled::Tileset, id: u32) -> TileRef {
    let mut tile_ref = TileRef::new(id);

    if let Some(tile) = tileset.get_tile(id) {
        tile_ref.properties = from_tiled_properties(&tile.properties);
        if let Some(image) = &tile.image {
            tile_ref.image = Some(TileImage::File {
                source: image.source.clone(),
                transparent: image.transparent_colour.map(rgb),
            });
            return tile_ref;
        }
    }

    tile_ref.image = tileset.image.as_ref().and_then(|sheet| {
        let (x, y) = SheetGrid::of(tileset).origin(id)?;
        Some(TileImage::SheetRegion {
            source: sheet.source.clone(),
            transparent: sheet.transparent_colour.map(rgb),
            x,
            y,
            width: tileset.tile_width,
            height: tileset.tile_height,
        })
    });
    tile_ref
}

/// Tile layout of a tileset sheet.
#[derive(Debug, Clone, Copy)]
struct SheetGrid {
    columns: u32,
    margin: u32,
    spacing: u32,
    tile_width: u32,
    tile_height: u32,
}

impl SheetGrid {
    fn of(tileset: &tiled::Tileset) -> Self {
        Self {
            columns: tileset.columns,
            margin: tileset.margin,
            spacing: tileset.spacing,
            tile_width: tileset.tile_width,
            tile_height: tileset.tile_height,
        }
    }

    /// Top-left pixel of tile `id`, `None` when the sheet has no columns or
    /// the offset does not fit in a `u32`.
    fn origin(&self, id: u32) -> Option<(u32, u32)> {
        let column = id.checked_rem(self.columns)?;
        let row = id.checked_div(self.columns)?;
        let x = column
            .checked_mul(self.tile_width.checked_add(self.spacing)?)?
            .checked_add(self.margin)?;
        let y = row
            .checked_mul(self.tile_height.checked_add(self.spacing)?)?
            .checked_add(self.margin)?;
        Some((x, y))
    }
}

fn rgb(color: tiled::Color) -> [u8; 3] {
    [color.red, color.green, color.blue]
}
