//! Map and layer structure.

use crate::document::object::MapObject;
use crate::properties::Properties;

/// A whole map: its layers in drawing order plus map-level properties.
#[derive(Debug, Clone, Default)]
pub struct MapDocument {
    pub layers: Vec<Layer>,
    pub properties: Properties,
}

impl MapDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a layer on top of the existing ones.
    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layers.push(layer);
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key, value);
        self
    }

    /// Object groups in map layer order, skipping every other kind of layer.
    pub fn object_groups(&self) -> impl Iterator<Item = &ObjectGroup> {
        self.layers.iter().filter_map(Layer::as_object_group)
    }

    /// First object named `name`, searching groups in map order and objects in
    /// group order.
    pub fn find_object_by_name(&self, name: &str) -> Option<&MapObject> {
        self.object_groups()
            .flat_map(|group| group.objects.iter())
            .find(|object| object.name == name)
    }
}

/// One layer of the map.
#[derive(Debug, Clone)]
pub struct Layer {
    pub name: String,
    pub kind: LayerKind,
}

impl Layer {
    pub fn objects(name: impl Into<String>, objects: Vec<MapObject>) -> Self {
        Self {
            name: name.into(),
            kind: LayerKind::Objects(ObjectGroup { objects }),
        }
    }

    pub fn tiles(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: LayerKind::Tiles,
        }
    }

    pub fn image(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: LayerKind::Image,
        }
    }

    pub fn as_object_group(&self) -> Option<&ObjectGroup> {
        match &self.kind {
            LayerKind::Objects(group) => Some(group),
            LayerKind::Tiles | LayerKind::Image => None,
        }
    }
}

/// Layer content. Only object groups feed the level; the other kinds are kept
/// so the layer order stays visible.
#[derive(Debug, Clone)]
pub enum LayerKind {
    Objects(ObjectGroup),
    Tiles,
    Image,
}

/// Objects of one object layer, in layer order.
#[derive(Debug, Clone, Default)]
pub struct ObjectGroup {
    pub objects: Vec<MapObject>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::object::ObjectShape;

    fn helper(name: &str, x: f32) -> MapObject {
        MapObject::new(name).at(x, 0.0).with_shape(ObjectShape::Point)
    }

    #[test]
    fn test_object_groups_skip_other_layers() {
        let map = MapDocument::new()
            .with_layer(Layer::tiles("ground"))
            .with_layer(Layer::objects("front", vec![helper("a", 0.0)]))
            .with_layer(Layer::image("sky"))
            .with_layer(Layer::objects("back", vec![]));

        assert_eq!(map.object_groups().count(), 2);
    }

    #[test]
    fn test_find_object_by_name_takes_first_match_in_map_order() {
        let map = MapDocument::new()
            .with_layer(Layer::objects("first", vec![helper("other", 1.0)]))
            .with_layer(Layer::image("sky"))
            .with_layer(Layer::objects(
                "second",
                vec![helper("path", 2.0), helper("path", 3.0)],
            ))
            .with_layer(Layer::objects("third", vec![helper("path", 4.0)]));

        let found = map.find_object_by_name("path").unwrap();

        assert_eq!(found.x, 2.0);
        assert!(map.find_object_by_name("nowhere").is_none());
    }
}
