//! The persisted design-rule format.
//!
//! A rule record is a flat JSON object: the well-known container fields
//! (`width`, `height`, `backgroundColor`, `backgroundImage`) sit next to one
//! entry per layer, keyed by the layer name.
//!
//! ```json
//! {
//!   "width": 300, "height": 250, "backgroundColor": "#ffffff",
//!   "logo": { "x": 20, "y": 20, "gravity": "north_west", "width": 80, "height": 40 },
//!   "cta": { "defaultValue": "BUY NOW", "fontSize": 20, "gravity": "south_east", "x": 10, "y": 10 }
//! }
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::BuildError;
use crate::types::{is_valid_dimension, Gravity, Priority, Size};

/// Keys of a rule record that describe the container rather than a layer.
pub const CONTAINER_FIELDS: [&str; 4] = ["width", "height", "backgroundColor", "backgroundImage"];

/// Background image placed behind all layers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundImage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

/// One layer of a design-rule record.
///
/// Text layers carry `fontSize` or `defaultValue`; everything else is an image.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerRule {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub gravity: Gravity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,

    // Text layers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_wrap: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,

    // Image layers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_main_product: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_logo: Option<bool>,
}

impl LayerRule {
    /// Whether this layer is rendered as text.
    pub fn is_text(&self) -> bool {
        self.font_size.is_some() || self.default_value.is_some()
    }
}

/// A complete design-rule record: container fields plus ordered layers.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignRule {
    pub width: f64,
    pub height: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<BackgroundImage>,
    #[serde(flatten)]
    pub layers: IndexMap<String, LayerRule>,
}

impl DesignRule {
    /// Decode a raw rule record, separating container fields from layers.
    ///
    /// Layer order follows the record's key order.
    pub fn from_record(design_id: &str, record: &Value) -> Result<Self, BuildError> {
        let object = record.as_object().ok_or_else(|| BuildError::MalformedRecord {
            design_id: design_id.to_string(),
            reason: format!("expected an object, found {}", value_kind(record)),
        })?;

        let width = object.get("width").and_then(Value::as_f64);
        let height = object.get("height").and_then(Value::as_f64);
        let (width, height) = match (width, height) {
            (Some(w), Some(h)) if is_valid_dimension(w) && is_valid_dimension(h) => (w, h),
            _ => {
                return Err(BuildError::InvalidDimensions {
                    design_id: design_id.to_string(),
                    detail: format!(
                        "width={}, height={}",
                        describe(object.get("width")),
                        describe(object.get("height"))
                    ),
                })
            }
        };

        let background_color = object
            .get("backgroundColor")
            .and_then(Value::as_str)
            .map(str::to_owned);

        let background_image = match object.get("backgroundImage") {
            None | Some(Value::Null) => None,
            Some(value) => Some(BackgroundImage::deserialize(value).map_err(|e| {
                BuildError::ConversionFailure {
                    design_id: design_id.to_string(),
                    layer: "backgroundImage".to_string(),
                    reason: e.to_string(),
                }
            })?),
        };

        let mut layers = IndexMap::new();
        for (key, value) in object {
            if CONTAINER_FIELDS.contains(&key.as_str()) {
                continue;
            }
            let layer = LayerRule::deserialize(value).map_err(|e| BuildError::ConversionFailure {
                design_id: design_id.to_string(),
                layer: key.clone(),
                reason: e.to_string(),
            })?;
            layers.insert(key.clone(), layer);
        }

        Ok(Self {
            width,
            height,
            background_color,
            background_image,
            layers,
        })
    }

    /// Encode back into the flat record shape accepted by [`DesignRule::from_record`].
    pub fn to_record(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn describe(value: Option<&Value>) -> String {
    match value {
        None => "missing".to_string(),
        Some(v) => v.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_record_separates_container_fields() {
        let record = json!({
            "width": 300,
            "height": 250,
            "backgroundColor": "#fff",
            "backgroundImage": { "publicId": "bg/1", "width": 300, "height": 250 },
            "logo": { "x": 10, "y": 12, "width": 80, "height": 40 },
            "headline": { "defaultValue": "Hello", "fontSize": 24, "gravity": "center" }
        });

        let rule = DesignRule::from_record("d1", &record).unwrap();
        assert_eq!(rule.size(), Size::new(300.0, 250.0));
        assert_eq!(rule.background_color.as_deref(), Some("#fff"));
        assert_eq!(
            rule.background_image.as_ref().and_then(|b| b.public_id.as_deref()),
            Some("bg/1")
        );
        let keys: Vec<_> = rule.layers.keys().map(String::as_str).collect();
        assert_eq!(keys, ["logo", "headline"]);

        let logo = &rule.layers["logo"];
        assert_eq!(logo.gravity, Gravity::NorthWest);
        assert!(!logo.is_text());
        assert!(rule.layers["headline"].is_text());
    }

    #[test]
    fn test_missing_offsets_default_to_zero() {
        let record = json!({ "width": 100, "height": 100, "badge": { "width": 10, "height": 10 } });
        let rule = DesignRule::from_record("d", &record).unwrap();
        assert_eq!(rule.layers["badge"].x, 0.0);
        assert_eq!(rule.layers["badge"].y, 0.0);
    }

    #[test]
    fn test_non_numeric_width_is_invalid_dimensions() {
        let record = json!({ "width": "not-a-number", "height": 100 });
        let err = DesignRule::from_record("broken", &record).unwrap_err();
        assert!(matches!(err, BuildError::InvalidDimensions { .. }));
        assert!(err.to_string().contains("not-a-number"));
    }

    #[test]
    fn test_non_positive_height_is_invalid_dimensions() {
        let record = json!({ "width": 100, "height": 0 });
        assert!(matches!(
            DesignRule::from_record("d", &record),
            Err(BuildError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_bad_layer_is_conversion_failure() {
        let record = json!({ "width": 100, "height": 100, "logo": { "gravity": "up" } });
        match DesignRule::from_record("d", &record) {
            Err(BuildError::ConversionFailure { layer, .. }) => assert_eq!(layer, "logo"),
            other => panic!("expected conversion failure, got {:?}", other),
        }
    }

    #[test]
    fn test_non_object_record() {
        assert!(matches!(
            DesignRule::from_record("d", &json!([1, 2])),
            Err(BuildError::MalformedRecord { .. })
        ));
    }

    #[test]
    fn test_to_record_round_trip() {
        let record = json!({
            "width": 300.0,
            "height": 250.0,
            "price": { "x": 5.0, "y": 6.0, "gravity": "south", "defaultValue": "$9", "fontSize": 18.0 }
        });
        let rule = DesignRule::from_record("d", &record).unwrap();
        let encoded = rule.to_record().unwrap();
        assert_eq!(DesignRule::from_record("d", &encoded).unwrap(), rule);
    }
}
