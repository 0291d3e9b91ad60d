use crate::errors::ErrorResponse;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use utoipa::ToSchema;
use uuid::Uuid;

/// GeoJSON Point geometry, coordinates ordered `[longitude, latitude]`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct PointGeometry {
    #[serde(rename = "type")]
    pub kind: String,
    #[schema(value_type = Vec<f64>)]
    pub coordinates: [f64; 2],
}

impl PointGeometry {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            kind: "Point".to_string(),
            coordinates: [longitude, latitude],
        }
    }
}

/// One time-stamped pollutant reading. Values are passed through as the
/// upstream feed supplied them; absent fields serialize as `null`.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, ToSchema)]
pub struct Measurement {
    #[serde(rename = "DateTime")]
    pub date_time: Option<Value>,
    pub aqhi: Option<Value>,
    #[serde(rename = "NO2")]
    pub no2: Option<Value>,
    #[serde(rename = "O3")]
    pub o3: Option<Value>,
    #[serde(rename = "SO2")]
    pub so2: Option<Value>,
    #[serde(rename = "CO")]
    pub co: Option<Value>,
    #[serde(rename = "PM10")]
    pub pm10: Option<Value>,
    #[serde(rename = "PM25")]
    pub pm25: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct StationProperties {
    pub name: String,
    /// Measurements in upstream order
    pub feature: Vec<Measurement>,
}

/// GeoJSON Feature for a single monitoring station
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct StationFeature {
    #[serde(rename = "type")]
    pub kind: String,
    pub geometry: PointGeometry,
    pub properties: StationProperties,
}

impl StationFeature {
    pub fn new(name: impl Into<String>, geometry: PointGeometry, first: Measurement) -> Self {
        Self {
            kind: "Feature".to_string(),
            geometry,
            properties: StationProperties {
                name: name.into(),
                feature: vec![first],
            },
        }
    }
}

/// Station features keyed by station name (a mapping, not a GeoJSON array)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct StationFeatureCollection {
    #[serde(rename = "type")]
    pub kind: String,
    pub features: BTreeMap<String, StationFeature>,
}

impl Default for StationFeatureCollection {
    fn default() -> Self {
        Self {
            kind: "FeatureCollection".to_string(),
            features: BTreeMap::new(),
        }
    }
}

/// Either the extracted array or an error payload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ReportSection {
    Data(Vec<Value>),
    Error(ErrorResponse),
}

/// `data_type=repo` response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReportAndForecast {
    pub aqhi_report: ReportSection,
    pub aqhi_forecast: ReportSection,
}

/// Reading attached to a weather station feature
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, ToSchema)]
pub struct StationReading {
    #[serde(rename = "Automatic Weather Station", default)]
    pub station: String,
    #[serde(rename = "Air Temperature", default)]
    pub air_temperature: f64,
}

/// Stored weather station feature with a stable identifier
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct WeatherStationFeature {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: String,
    pub geometry: PointGeometry,
    pub properties: StationReading,
}

impl WeatherStationFeature {
    pub fn new(geometry: PointGeometry, properties: StationReading) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: "Feature".to_string(),
            geometry,
            properties,
        }
    }
}

/// GeoJSON FeatureCollection of weather station features
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: String,
    pub features: Vec<WeatherStationFeature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<WeatherStationFeature>) -> Self {
        Self {
            kind: "FeatureCollection".to_string(),
            features,
        }
    }
}

/// Create/update request body. Only `properties` is read; geometry is
/// assigned by the server.
#[derive(Debug, Serialize, Deserialize, Default, ToSchema)]
pub struct FeatureRequest {
    #[serde(default)]
    pub properties: StationReading,
}
