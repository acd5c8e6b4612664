pub mod assessment;
pub mod enums;
pub mod patient;
pub mod report;

pub use assessment::*;
pub use enums::*;
pub use patient::*;
pub use report::*;

use serde::{Deserialize, Deserializer};

/// Treats an explicit JSON `null` the same as a missing field.
///
/// AI backends routinely emit `null` for empty lists and sections; those
/// must render as empty, never fail deserialization.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts a 0-100 score as an integer, a float, or a numeric string
/// ("85", "85%"). Anything else, including null, becomes 0. Out-of-range
/// values are clamped.
pub(crate) fn deserialize_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let raw = match value {
        Some(serde_json::Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(serde_json::Value::String(s)) => s
            .trim()
            .trim_end_matches('%')
            .trim()
            .parse::<f64>()
            .unwrap_or(0.0),
        _ => 0.0,
    };
    Ok(clamp_score(raw))
}

pub(crate) fn clamp_score(raw: f64) -> u8 {
    if raw.is_nan() {
        return 0;
    }
    raw.round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "deserialize_score")]
        score: u8,
        #[serde(default, deserialize_with = "nullable")]
        items: Vec<String>,
    }

    #[test]
    fn score_accepts_int_float_and_string() {
        let p: Probe = serde_json::from_str(r#"{"score": 72}"#).unwrap();
        assert_eq!(p.score, 72);
        let p: Probe = serde_json::from_str(r#"{"score": 72.6}"#).unwrap();
        assert_eq!(p.score, 73);
        let p: Probe = serde_json::from_str(r#"{"score": "85%"}"#).unwrap();
        assert_eq!(p.score, 85);
    }

    #[test]
    fn score_clamps_and_defaults() {
        let p: Probe = serde_json::from_str(r#"{"score": 140}"#).unwrap();
        assert_eq!(p.score, 100);
        let p: Probe = serde_json::from_str(r#"{"score": -3}"#).unwrap();
        assert_eq!(p.score, 0);
        let p: Probe = serde_json::from_str(r#"{"score": null}"#).unwrap();
        assert_eq!(p.score, 0);
        let p: Probe = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(p.score, 0);
    }

    #[test]
    fn null_list_becomes_empty() {
        let p: Probe = serde_json::from_str(r#"{"items": null}"#).unwrap();
        assert!(p.items.is_empty());
    }
}
