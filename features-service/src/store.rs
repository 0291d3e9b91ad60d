use common::models::{PointGeometry, StationReading, WeatherStationFeature};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Geometry given to every feature created through the API
pub const DEFAULT_POINT: (f64, f64) = (113.0, 22.0);

/// In-memory feature list. Insertion order is preserved and identifiers stay
/// stable across deletions.
pub struct FeatureStore {
    features: RwLock<Vec<WeatherStationFeature>>,
}

impl FeatureStore {
    pub fn new() -> Self {
        Self {
            features: RwLock::new(Vec::new()),
        }
    }

    /// Store holding the Chek Lap Kok reading
    pub fn seeded() -> Self {
        let seed = WeatherStationFeature::new(
            PointGeometry::new(113.9219444, 22.3094444),
            StationReading {
                station: "Chek Lap Kok".to_string(),
                air_temperature: 27.3,
            },
        );
        Self {
            features: RwLock::new(vec![seed]),
        }
    }

    pub async fn list(&self) -> Vec<WeatherStationFeature> {
        self.features.read().await.clone()
    }

    pub async fn get(&self, id: Uuid) -> Option<WeatherStationFeature> {
        let features = self.features.read().await;
        features.iter().find(|f| f.id == id).cloned()
    }

    pub async fn create(&self, properties: StationReading) -> WeatherStationFeature {
        let (longitude, latitude) = DEFAULT_POINT;
        let feature = WeatherStationFeature::new(PointGeometry::new(longitude, latitude), properties);
        self.features.write().await.push(feature.clone());
        feature
    }

    /// Replaces the properties of an existing feature; geometry and id are kept.
    pub async fn update(&self, id: Uuid, properties: StationReading) -> Option<WeatherStationFeature> {
        let mut features = self.features.write().await;
        let feature = features.iter_mut().find(|f| f.id == id)?;
        feature.properties = properties;
        Some(feature.clone())
    }

    pub async fn delete(&self, id: Uuid) -> bool {
        let mut features = self.features.write().await;
        let before = features.len();
        features.retain(|f| f.id != id);
        features.len() != before
    }
}

impl Default for FeatureStore {
    fn default() -> Self {
        Self::new()
    }
}
