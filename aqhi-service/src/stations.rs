//! Monitoring station locations. Names must match the upstream
//! `StationNameEN` exactly.

use common::models::PointGeometry;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub longitude: f64,
    pub latitude: f64,
}

impl Coordinates {
    const fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    pub fn to_point(self) -> PointGeometry {
        PointGeometry::new(self.longitude, self.latitude)
    }
}

pub const STATIONS: &[(&str, Coordinates)] = &[
    ("Southern", Coordinates::new(114.16014, 22.247461)),
    ("North", Coordinates::new(114.128244, 22.496697)),
    ("Kwun Tong", Coordinates::new(114.231174, 22.309625)),
    ("Tseung Kwan O", Coordinates::new(114.259561, 22.317642)),
    ("Tuen Mun", Coordinates::new(113.976728, 22.391143)),
    ("Tung Chung", Coordinates::new(113.943659, 22.288889)),
    ("Eastern Air", Coordinates::new(114.219372, 22.282886)),
    ("Tap Mun", Coordinates::new(114.360719, 22.471317)),
    ("Kwai Chung", Coordinates::new(114.129601, 22.357104)),
    ("Yuen Long", Coordinates::new(114.022649, 22.445155)),
    ("Sha Tin", Coordinates::new(114.184532, 22.376281)),
    ("Sham Shui Po", Coordinates::new(114.159109, 22.330226)),
    ("Tai Po", Coordinates::new(114.16457, 22.45096)),
    ("Mong Kok", Coordinates::new(114.168272, 22.322611)),
    ("Central/Western", Coordinates::new(114.144421, 22.284891)),
    ("Central", Coordinates::new(114.158127, 22.281815)),
    ("Causeway Bay", Coordinates::new(114.18509, 22.280133)),
    ("Tsuen Wan", Coordinates::new(114.114535, 22.371742)),
];

pub fn lookup(name: &str) -> Option<Coordinates> {
    STATIONS
        .iter()
        .find(|(station, _)| *station == name)
        .map(|(_, coords)| *coords)
}
