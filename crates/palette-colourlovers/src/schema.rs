//! Remote record and retained palette shapes

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// One page fetch: `page_size` records starting at `offset`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub offset: usize,
    pub page_size: usize,
}

/// Palette record as returned by the ColourLovers API.
///
/// Only structural access is checked; fields the pipeline does not keep
/// tolerate null or absence.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
    #[serde(default, deserialize_with = "null_to_default")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_to_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub colors: Vec<String>,
    #[serde(default, deserialize_with = "color_widths")]
    pub color_widths: Vec<f64>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub url: String,
}

/// Retained shape written to the dataset file.
///
/// `colors` and `color_widths` are parallel; widths are expected to sum to
/// 1.0 but that is the remote's promise, not checked here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub colors: Vec<String>,
    pub color_widths: Vec<f64>,
}

impl From<RawRecord> for Palette {
    fn from(record: RawRecord) -> Self {
        Self {
            colors: record.colors,
            color_widths: record.color_widths,
        }
    }
}

/// Deserialize null as the type's default (0, "", empty Vec)
fn null_to_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(|opt| opt.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Width {
    Number(f64),
    Text(String),
}

/// Widths arrive as JSON numbers or as numeric strings depending on endpoint
fn color_widths<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<Width>>::deserialize(deserializer)?
        .unwrap_or_default()
        .into_iter()
        .map(|w| match w {
            Width::Number(n) => Ok(n),
            Width::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| D::Error::custom(format!("invalid color width: {s:?}"))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "id": 92095,
        "title": "Giant Goldfish",
        "userName": "manekineko",
        "colors": ["69D2E7", "A7DBD8", "E0E4CC", "F38630", "FA6900"],
        "colorWidths": [0.2, 0.2, 0.2, 0.2, 0.2],
        "url": "http://www.colourlovers.com/palette/92095/Giant_Goldfish"
    }"#;

    #[test]
    fn parse_full_record() {
        let record: RawRecord = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(record.id, 92095);
        assert_eq!(record.title, "Giant Goldfish");
        assert_eq!(record.colors.len(), 5);
        assert_eq!(record.colors[3], "F38630");
        assert_eq!(record.color_widths, vec![0.2; 5]);
    }

    #[test]
    fn widths_as_strings() {
        let json = r#"{"colors": ["000000", "FFFFFF"], "colorWidths": ["0.25", " 0.75 "]}"#;
        let record: RawRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.color_widths, vec![0.25, 0.75]);
    }

    #[test]
    fn widths_mixed_numbers_and_strings() {
        let json = r#"{"colors": ["000000", "FFFFFF"], "colorWidths": [0.5, "0.5"]}"#;
        let record: RawRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.color_widths, vec![0.5, 0.5]);
    }

    #[test]
    fn non_numeric_width_is_error() {
        let json = r#"{"colors": ["000000"], "colorWidths": ["wide"]}"#;
        let err = serde_json::from_str::<RawRecord>(json).unwrap_err();
        assert!(err.to_string().contains("invalid color width"));
    }

    #[test]
    fn nulls_and_missing_fields_default() {
        let json = r#"{"title": null, "colors": null}"#;
        let record: RawRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, 0);
        assert!(record.title.is_empty());
        assert!(record.colors.is_empty());
        assert!(record.color_widths.is_empty());
        assert!(record.url.is_empty());
    }

    #[test]
    fn null_id_still_projects() {
        let json = r#"{"id": null, "colors": ["FF0000", "00FF00"], "colorWidths": [0.5, 0.5]}"#;
        let record: RawRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, 0);
        assert_eq!(Palette::from(record).colors.len(), 2);
    }

    #[test]
    fn colors_must_be_an_array() {
        let json = r#"{"colors": "69D2E7"}"#;
        assert!(serde_json::from_str::<RawRecord>(json).is_err());
    }

    #[test]
    fn projection_drops_extra_fields() {
        let record: RawRecord = serde_json::from_str(SAMPLE).unwrap();
        let palette = Palette::from(record.clone());
        assert_eq!(palette.colors, record.colors);
        assert_eq!(palette.color_widths, record.color_widths);

        let json = serde_json::to_value(&palette).unwrap();
        let mut keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["colorWidths", "colors"]);
    }

    #[test]
    fn projection_is_idempotent() {
        let record: RawRecord = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(Palette::from(record.clone()), Palette::from(record));
    }
}
