//! Reshapes the per-station pollutant feed into a GeoJSON collection keyed by
//! station name.

use common::errors::AppError;
use common::models::{Measurement, StationFeature, StationFeatureCollection};
use serde::Deserialize;
use serde_json::Value;
use std::collections::btree_map::Entry;
use tracing::debug;

use crate::stations;

/// Upstream record. Unknown fields are dropped and missing ones default to absent.
#[derive(Debug, Deserialize)]
pub struct StationRecord {
    #[serde(rename = "StationNameEN")]
    pub station_name: Option<String>,
    #[serde(flatten)]
    pub measurement: Measurement,
}

/// Which measurements each station keeps after merging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Trim {
    #[default]
    All,
    /// Only the final entry
    Last,
    /// Only the first entry
    First,
}

impl Trim {
    /// `last` takes precedence when both flags are set.
    pub fn from_flags(last: bool, recent: bool) -> Self {
        if last {
            Trim::Last
        } else if recent {
            Trim::First
        } else {
            Trim::All
        }
    }

    fn apply(self, measurements: &mut Vec<Measurement>) {
        if measurements.is_empty() {
            return;
        }
        match self {
            Trim::All => {}
            Trim::Last => {
                measurements.drain(..measurements.len() - 1);
            }
            Trim::First => measurements.truncate(1),
        }
    }
}

/// Decode the raw extracted array. The feed is a list of groups, each a list
/// of station records.
pub fn decode_records(raw: Vec<Value>) -> Result<Vec<Vec<StationRecord>>, AppError> {
    raw.into_iter()
        .enumerate()
        .map(|(index, group)| match group {
            Value::Array(items) => items
                .into_iter()
                .map(|item| {
                    serde_json::from_value(item)
                        .map_err(|e| AppError::schema(format!("group {}: {}", index, e)))
                })
                .collect(),
            other => Err(AppError::schema(format!(
                "group {} is not an array: {}",
                index, other
            ))),
        })
        .collect()
}

pub fn build_feature_collection(
    groups: Vec<Vec<StationRecord>>,
    trim: Trim,
) -> StationFeatureCollection {
    let mut collection = StationFeatureCollection::default();

    for record in groups.into_iter().flatten() {
        let Some(name) = record.station_name else {
            continue;
        };
        let Some(coords) = stations::lookup(&name) else {
            debug!(station = %name, "Skipping unknown station");
            continue;
        };

        match collection.features.entry(name) {
            Entry::Occupied(mut entry) => {
                entry.get_mut().properties.feature.push(record.measurement);
            }
            Entry::Vacant(entry) => {
                let feature =
                    StationFeature::new(entry.key().clone(), coords.to_point(), record.measurement);
                entry.insert(feature);
            }
        }
    }

    for feature in collection.features.values_mut() {
        trim.apply(&mut feature.properties.feature);
    }

    collection
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(station: &str, time: &str, aqhi: i64) -> Value {
        json!({
            "StationNameEN": station,
            "StationNameTC": "ignored",
            "DateTime": time,
            "aqhi": aqhi,
            "NO2": 40,
            "O3": 12,
            "SO2": 3,
            "CO": 55,
            "PM10": 20,
            "PM25": 11
        })
    }

    fn feed() -> Vec<Value> {
        vec![
            json!([record("Central", "t0", 2), record("Mong Kok", "t0", 4)]),
            json!([record("Central", "t1", 3), record("Atlantis", "t1", 9)]),
            json!([record("Central", "t2", 5)]),
        ]
    }

    fn build(raw: Vec<Value>, trim: Trim) -> StationFeatureCollection {
        build_feature_collection(decode_records(raw).unwrap(), trim)
    }

    fn times(collection: &StationFeatureCollection, station: &str) -> Vec<Value> {
        collection.features[station]
            .properties
            .feature
            .iter()
            .map(|m| m.date_time.clone().unwrap())
            .collect()
    }

    #[test]
    fn unknown_stations_are_dropped() {
        let collection = build(feed(), Trim::All);

        assert!(!collection.features.contains_key("Atlantis"));
        for name in collection.features.keys() {
            assert!(stations::lookup(name).is_some());
        }
    }

    #[test]
    fn coordinates_come_from_station_table() {
        let collection = build(feed(), Trim::All);

        let central = &collection.features["Central"];
        assert_eq!(central.geometry.coordinates, [114.158127, 22.281815]);
        assert_eq!(central.geometry.kind, "Point");
        assert_eq!(central.properties.name, "Central");
        assert_eq!(central.kind, "Feature");
    }

    #[test]
    fn measurements_merge_in_arrival_order() {
        let collection = build(feed(), Trim::All);

        assert_eq!(times(&collection, "Central"), vec!["t0", "t1", "t2"]);
        assert_eq!(times(&collection, "Mong Kok"), vec!["t0"]);
    }

    #[test]
    fn trim_last_keeps_final_entry() {
        let collection = build(feed(), Trim::Last);
        assert_eq!(times(&collection, "Central"), vec!["t2"]);
    }

    #[test]
    fn trim_first_keeps_first_entry() {
        let collection = build(feed(), Trim::First);
        assert_eq!(times(&collection, "Central"), vec!["t0"]);
    }

    #[test]
    fn last_flag_wins_over_recent() {
        assert_eq!(Trim::from_flags(true, true), Trim::Last);
        assert_eq!(Trim::from_flags(true, false), Trim::Last);
        assert_eq!(Trim::from_flags(false, true), Trim::First);
        assert_eq!(Trim::from_flags(false, false), Trim::All);
    }

    #[test]
    fn trimming_an_empty_list_is_a_noop() {
        let mut empty = Vec::new();
        Trim::Last.apply(&mut empty);
        Trim::First.apply(&mut empty);
        assert!(empty.is_empty());
    }

    #[test]
    fn missing_fields_are_absent_and_extra_fields_dropped() {
        let raw = vec![json!([{ "StationNameEN": "Tai Po", "aqhi": 6, "Extra": true }])];
        let collection = build(raw, Trim::All);

        let m = &collection.features["Tai Po"].properties.feature[0];
        assert_eq!(m.aqhi, Some(json!(6)));
        assert_eq!(m.pm25, None);

        let value = serde_json::to_value(m).unwrap();
        assert!(value.get("Extra").is_none());
        assert!(value.get("StationNameEN").is_none());
    }

    #[test]
    fn records_without_a_station_name_are_skipped() {
        let raw = vec![json!([{ "aqhi": 1 }, { "StationNameEN": null, "aqhi": 2 }])];
        let collection = build(raw, Trim::All);
        assert!(collection.features.is_empty());
    }

    #[test]
    fn non_array_group_is_a_schema_error() {
        let err = decode_records(vec![json!({ "StationNameEN": "Central" })]).unwrap_err();
        assert!(matches!(err, AppError::SchemaError(_)));
    }

    #[test]
    fn non_string_station_name_is_a_schema_error() {
        let err = decode_records(vec![json!([{ "StationNameEN": 42 }])]).unwrap_err();
        assert!(matches!(err, AppError::SchemaError(_)));
    }

    #[test]
    fn serialized_shape_is_keyed_by_station() {
        let collection = build(vec![json!([record("Sha Tin", "t0", 1)])], Trim::All);
        let value = serde_json::to_value(&collection).unwrap();

        assert_eq!(value["type"], "FeatureCollection");
        assert_eq!(value["features"]["Sha Tin"]["type"], "Feature");
        assert_eq!(
            value["features"]["Sha Tin"]["geometry"]["coordinates"],
            json!([114.184532, 22.376281])
        );
        assert_eq!(value["features"]["Sha Tin"]["properties"]["feature"][0]["NO2"], 40);
    }
}
