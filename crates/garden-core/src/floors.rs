//! Sensor device to garden floor resolution.
//!
//! Resolution order for a device:
//! 1. an explicitly configured device id for the floor;
//! 2. a `floor_N` / `andar_N` token in the device tags, or the same token
//!    with a space instead of the underscore in its lowercased name;
//! 3. `Nº`, `andar N` or `floor N` in the lowercased name.
//!
//! Within a rule, lower floors are tried first. Devices matching nothing
//! are ignored.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::models::SensorReading;

/// Configured device id per floor. Blank ids are ignored.
pub type FloorDeviceIds = BTreeMap<i32, String>;

/// The parts of a vendor device record used for floor resolution.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeviceDescriptor {
    pub id: String,
    pub name: String,
    /// Free-form tag payload as returned by the vendor.
    pub tags: Value,
}

const TAG_PREFIXES: [&str; 2] = ["floor", "andar"];

/// Work out which floor a device belongs to.
pub fn resolve_floor(
    device: &DeviceDescriptor,
    configured: &FloorDeviceIds,
    floor_count: i32,
) -> Option<i32> {
    if let Some((floor, _)) = configured
        .iter()
        .find(|(_, id)| !id.trim().is_empty() && id.trim() == device.id)
    {
        return Some(*floor);
    }

    let name = device.name.to_lowercase();
    let tags = match &device.tags {
        Value::Null => String::new(),
        other => other.to_string(),
    };

    for prefix in TAG_PREFIXES {
        for n in 1..=floor_count {
            if tags.contains(&format!("{}_{}", prefix, n)) || name.contains(&format!("{} {}", prefix, n)) {
                return Some(n);
            }
        }
    }

    (1..=floor_count).find(|n| {
        name.contains(&format!("{}º", n))
            || name.contains(&format!("andar {}", n))
            || name.contains(&format!("floor {}", n))
    })
}

/// Read a telemetry value that may arrive as a JSON number or a numeric string.
pub fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn first_numeric(params: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    // later keys override earlier ones
    keys.iter()
        .filter_map(|k| params.get(*k).and_then(numeric))
        .last()
}

/// Map a device's status params onto a floor reading.
///
/// Soil keys (`humidity`, `temperature`) override the air keys
/// (`currentHumidity`, `currentTemperature`); `lux` overrides `brightness`.
/// Returns `None` when the device reports no humidity.
pub fn reading_from_params(
    floor: i32,
    device: &DeviceDescriptor,
    params: &Map<String, Value>,
) -> Option<SensorReading> {
    let humidity = first_numeric(params, &["currentHumidity", "humidity"])?;
    let temperature = first_numeric(params, &["currentTemperature", "temperature"]).unwrap_or(0.0);
    let light = first_numeric(params, &["brightness", "lux"]);

    Some(SensorReading {
        floor,
        humidity_pct: humidity,
        temperature_c: temperature,
        light_lux: light,
        device_id: Some(device.id.clone()),
        device_name: Some(device.name.clone()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn device(id: &str, name: &str, tags: Value) -> DeviceDescriptor {
        DeviceDescriptor {
            id: id.to_string(),
            name: name.to_string(),
            tags,
        }
    }

    #[test]
    fn test_configured_id_wins() {
        let configured = FloorDeviceIds::from([(2, "dev-a".to_string())]);
        let d = device("dev-a", "Sensor 1º andar", json!({"floor": "floor_3"}));
        assert_eq!(resolve_floor(&d, &configured, 3), Some(2));
    }

    #[test]
    fn test_blank_configured_id_is_ignored() {
        let configured = FloorDeviceIds::from([(1, "".to_string())]);
        let d = device("", "Sem nome", Value::Null);
        assert_eq!(resolve_floor(&d, &configured, 3), None);
    }

    #[test]
    fn test_tag_token() {
        let d = device("x", "TH Sensor", json!({"location": "andar_3"}));
        assert_eq!(resolve_floor(&d, &FloorDeviceIds::new(), 3), Some(3));
    }

    #[test]
    fn test_floor_prefix_checked_before_andar() {
        let d = device("x", "TH", json!(["andar_1", "floor_2"]));
        assert_eq!(resolve_floor(&d, &FloorDeviceIds::new(), 3), Some(2));
    }

    #[test]
    fn test_name_token_with_space() {
        let d = device("x", "Sensor Floor 2", Value::Null);
        assert_eq!(resolve_floor(&d, &FloorDeviceIds::new(), 3), Some(2));
    }

    #[test]
    fn test_ordinal_in_name() {
        let d = device("x", "Humidade 3º", json!({}));
        assert_eq!(resolve_floor(&d, &FloorDeviceIds::new(), 3), Some(3));
    }

    #[test]
    fn test_floor_outside_count_is_not_matched() {
        let d = device("x", "andar 4", Value::Null);
        assert_eq!(resolve_floor(&d, &FloorDeviceIds::new(), 3), None);
        assert_eq!(resolve_floor(&d, &FloorDeviceIds::new(), 4), Some(4));
    }

    #[test]
    fn test_unmatched_device() {
        let d = device("x", "Kitchen plug", json!({"room": "kitchen"}));
        assert_eq!(resolve_floor(&d, &FloorDeviceIds::new(), 3), None);
    }

    #[test]
    fn test_numeric_accepts_strings() {
        assert_eq!(numeric(&json!(23.5)), Some(23.5));
        assert_eq!(numeric(&json!("61")), Some(61.0));
        assert_eq!(numeric(&json!("unavailable")), None);
        assert_eq!(numeric(&json!(null)), None);
    }

    #[test]
    fn test_reading_prefers_soil_keys() {
        let d = device("dev", "Sensor", Value::Null);
        let params = json!({
            "currentHumidity": "48",
            "currentTemperature": "21.5",
            "humidity": 57,
            "brightness": 300,
            "lux": 820
        });
        let reading = reading_from_params(1, &d, params.as_object().unwrap()).unwrap();
        assert_eq!(reading.humidity_pct, 57.0);
        assert_eq!(reading.temperature_c, 21.5);
        assert_eq!(reading.light_lux, Some(820.0));
        assert_eq!(reading.device_id.as_deref(), Some("dev"));
    }

    #[test]
    fn test_reading_without_humidity() {
        let d = device("dev", "Plug", Value::Null);
        let params = json!({"switch": "on"});
        assert!(reading_from_params(1, &d, params.as_object().unwrap()).is_none());
    }
}
