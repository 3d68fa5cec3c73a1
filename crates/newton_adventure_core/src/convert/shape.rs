//! Object geometry to level shapes.

use newton_adventure_schema::level::{ConvexPolygon, Rectangle, Shape, Vertex, shape::Kind};

use crate::document::ObjectShape;

/// Convert an object's geometry to the shape stored on its entity type.
///
/// # Supported Shapes
///
/// | Object Shape | Level Shape |
/// |--------------|-------------|
/// | Rectangle | `Rectangle { width, height }` |
/// | Polygon | `ConvexPolygon` with the points in order |
/// | Ellipse, Polyline, Point, Text | empty `Shape` |
///
/// Polygon points are copied as-is; convexity is up to the level designer.
pub fn object_to_shape(shape: &ObjectShape) -> Shape {
    let kind = match shape {
        ObjectShape::Rectangle { width, height } => Some(Kind::Rectangle(Rectangle {
            width: *width,
            height: *height,
        })),

        ObjectShape::Polygon { points } => Some(Kind::Polygon(ConvexPolygon {
            vertices: points.iter().map(|&(x, y)| Vertex { x, y }).collect(),
        })),

        ObjectShape::Ellipse { .. }
        | ObjectShape::Polyline { .. }
        | ObjectShape::Point
        | ObjectShape::Text => None,
    };
    Shape { kind }
}
