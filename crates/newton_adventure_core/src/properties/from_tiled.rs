//! Lowering typed Tiled properties to text properties.

use tiled::PropertyValue;

use super::Properties;

/// Convert a Tiled property map into dotted text properties.
///
/// Class-typed values are flattened: a class property `newton_adventure.animation`
/// with a member `file` becomes the key `newton_adventure.animation.file`.
pub fn from_tiled_properties(properties: &tiled::Properties) -> Properties {
    let mut converted = Properties::new();
    for (key, value) in properties.iter() {
        insert_value(&mut converted, key, value);
    }
    converted
}

fn insert_value(properties: &mut Properties, key: &str, value: &PropertyValue) {
    match value {
        PropertyValue::ClassValue {
            properties: members,
            ..
        } => {
            for (member, member_value) in members.iter() {
                insert_value(properties, &format!("{key}.{member}"), member_value);
            }
        }
        other => {
            if let Some(text) = property_value_to_string(other) {
                properties.insert(key, text);
            }
        }
    }
}

/// Text form of a scalar Tiled property value.
///
/// Returns `None` for class values, which have no single text form.
pub fn property_value_to_string(value: &PropertyValue) -> Option<String> {
    match value {
        PropertyValue::BoolValue(b) => Some(b.to_string()),
        PropertyValue::FloatValue(f) => Some(f.to_string()),
        PropertyValue::IntValue(i) => Some(i.to_string()),
        // Tiled's own #AARRGGBB notation
        PropertyValue::ColorValue(color) => Some(format!(
            "#{:02x}{:02x}{:02x}{:02x}",
            color.alpha, color.red, color.green, color.blue
        )),
        PropertyValue::StringValue(s) | PropertyValue::FileValue(s) => Some(s.clone()),
        PropertyValue::ObjectValue(id) => Some(id.to_string()),
        PropertyValue::ClassValue { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_values_become_text() {
        assert_eq!(
            property_value_to_string(&PropertyValue::BoolValue(false)),
            Some("false".to_string())
        );
        assert_eq!(
            property_value_to_string(&PropertyValue::IntValue(-12)),
            Some("-12".to_string())
        );
        assert_eq!(
            property_value_to_string(&PropertyValue::FloatValue(0.5)),
            Some("0.5".to_string())
        );
        assert_eq!(
            property_value_to_string(&PropertyValue::FileValue("gfx/hero.nanim".to_string())),
            Some("gfx/hero.nanim".to_string())
        );
        assert_eq!(
            property_value_to_string(&PropertyValue::ObjectValue(17)),
            Some("17".to_string())
        );
    }

    #[test]
    fn test_color_uses_argb_hex() {
        let color = tiled::Color {
            red: 255,
            green: 128,
            blue: 64,
            alpha: 255,
        };
        assert_eq!(
            property_value_to_string(&PropertyValue::ColorValue(color)),
            Some("#ffff8040".to_string())
        );
    }

    #[test]
    fn test_class_values_flatten_to_dotted_keys() {
        let mut animation = tiled::Properties::new();
        animation.insert(
            "file".to_string(),
            PropertyValue::FileValue("hero.nanim".to_string()),
        );
        animation.insert(
            "name".to_string(),
            PropertyValue::StringValue("walk".to_string()),
        );

        let mut raw = tiled::Properties::new();
        raw.insert(
            "newton_adventure.animation".to_string(),
            PropertyValue::ClassValue {
                property_type: "newton_adventure::Animation".to_string(),
                properties: animation,
            },
        );
        raw.insert(
            "newton_adventure.platform.enabled".to_string(),
            PropertyValue::BoolValue(true),
        );

        let properties = from_tiled_properties(&raw);

        assert_eq!(properties.get("newton_adventure.animation.file"), "hero.nanim");
        assert_eq!(properties.get("newton_adventure.animation.name"), "walk");
        assert_eq!(properties.get("newton_adventure.platform.enabled"), "true");
        assert!(!properties.contains_key("newton_adventure.animation"));
    }
}
