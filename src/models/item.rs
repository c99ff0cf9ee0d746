//! Item geometry and placement values
//!
//! `ItemBox` is what gets measured off an element before a pass, and
//! `ItemPosition` is what the engine hands back to be written onto it.

use serde::{Deserialize, Serialize};

/// Geometry of one managed element, read once per layout pass
///
/// The natural offsets are informational: they record where the element sat
/// in flow and are passed through for `computeLayout` callers, but placement
/// only depends on the heights.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItemBox {
    /// Top offset before stacking
    #[serde(default)]
    pub natural_top: f64,

    /// Left offset before stacking
    #[serde(default)]
    pub natural_left: f64,

    /// Height including padding and border, excluding margin
    #[serde(default)]
    pub outer_height: f64,

    /// Bottom margin in pixels
    #[serde(default)]
    pub margin_bottom: f64,
}

impl ItemBox {
    /// Box with the given outer height and no margin
    pub fn with_height(outer_height: f64) -> Self {
        Self {
            outer_height,
            ..Self::default()
        }
    }

    /// Vertical space this item takes up in its column.
    ///
    /// Unreadable or negative values count as zero; the bottom margin is
    /// rounded up to whole pixels.
    pub fn stacked_height(&self) -> f64 {
        non_negative(self.outer_height) + non_negative(self.margin_bottom).ceil()
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Horizontal position of an item inside the container
///
/// Crosses the JS boundary as its CSS value, e.g. `"50%"`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(into = "String", from = "String")]
pub enum LeftOffset {
    /// Percentage of the container width
    Percent(f64),
    /// A stored CSS value that could not be read as a number, kept verbatim
    Raw(String),
}

impl LeftOffset {
    /// Interpret a stored CSS `left` value.
    ///
    /// Percentages are taken as-is. Pixel values are converted to a
    /// percentage of `container_width`. Anything else is kept verbatim.
    pub fn parse(raw: &str, container_width: f64) -> LeftOffset {
        let value = raw.trim();

        if let Some(percent) = value.strip_suffix('%') {
            return match percent.trim().parse::<f64>() {
                Ok(p) if p.is_finite() => LeftOffset::Percent(p),
                _ => LeftOffset::Raw(raw.to_string()),
            };
        }

        let pixels = value.strip_suffix("px").unwrap_or(value).trim();
        match pixels.parse::<f64>() {
            Ok(px) if px.is_finite() && container_width > 0.0 => {
                LeftOffset::Percent(px / container_width * 100.0)
            }
            _ => LeftOffset::Raw(raw.to_string()),
        }
    }

    /// Value for the CSS `left` property
    pub fn to_css(&self) -> String {
        match self {
            LeftOffset::Percent(p) => format!("{}%", p),
            LeftOffset::Raw(s) => s.clone(),
        }
    }
}

impl From<LeftOffset> for String {
    fn from(left: LeftOffset) -> String {
        left.to_css()
    }
}

impl From<String> for LeftOffset {
    /// Without a container width only percentages are numeric
    fn from(raw: String) -> LeftOffset {
        LeftOffset::parse(&raw, 0.0)
    }
}

/// Computed placement for one item
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItemPosition {
    pub column: usize,
    pub left: LeftOffset,
    pub top: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stacked_height_rounds_margin_up() {
        let item = ItemBox {
            outer_height: 100.0,
            margin_bottom: 10.2,
            ..ItemBox::default()
        };
        assert_eq!(item.stacked_height(), 111.0);
    }

    #[test]
    fn test_stacked_height_ignores_negative_and_nan() {
        let item = ItemBox {
            outer_height: f64::NAN,
            margin_bottom: -20.0,
            ..ItemBox::default()
        };
        assert_eq!(item.stacked_height(), 0.0);

        let hidden = ItemBox {
            outer_height: 0.0,
            margin_bottom: 8.0,
            ..ItemBox::default()
        };
        assert_eq!(hidden.stacked_height(), 8.0);
    }

    #[test]
    fn test_parse_percent() {
        assert_eq!(LeftOffset::parse("25%", 800.0), LeftOffset::Percent(25.0));
        assert_eq!(LeftOffset::parse(" 12.5% ", 0.0), LeftOffset::Percent(12.5));
    }

    #[test]
    fn test_parse_pixels_against_width() {
        assert_eq!(LeftOffset::parse("200px", 800.0), LeftOffset::Percent(25.0));
        assert_eq!(LeftOffset::parse("400", 800.0), LeftOffset::Percent(50.0));
    }

    #[test]
    fn test_parse_keeps_unreadable_value() {
        assert_eq!(LeftOffset::parse("auto", 800.0), LeftOffset::Raw("auto".to_string()));
        assert_eq!(
            LeftOffset::parse("calc(50% - 1px)", 800.0),
            LeftOffset::Raw("calc(50% - 1px)".to_string())
        );
        // No width to convert against
        assert_eq!(LeftOffset::parse("200px", 0.0), LeftOffset::Raw("200px".to_string()));
    }

    #[test]
    fn test_position_serializes_left_as_css() {
        let position = ItemPosition {
            column: 1,
            left: LeftOffset::Percent(50.0),
            top: 120.0,
        };
        let json = serde_json::to_value(&position).unwrap();
        assert_eq!(json, serde_json::json!({"column": 1, "left": "50%", "top": 120.0}));

        let back: ItemPosition = serde_json::from_value(json).unwrap();
        assert_eq!(back, position);

        let raw: LeftOffset = serde_json::from_str("\"auto\"").unwrap();
        assert_eq!(raw, LeftOffset::Raw("auto".to_string()));
    }

    #[test]
    fn test_to_css() {
        assert_eq!(LeftOffset::Percent(50.0).to_css(), "50%");
        assert_eq!(LeftOffset::Percent(0.0).to_css(), "0%");
        assert_eq!(LeftOffset::Raw("auto".to_string()).to_css(), "auto");
    }
}
