use serde::{Deserialize, Serialize};

/// Geographic point with the zoom level the map should use around it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default = "default_zoom")]
    pub zoom: u8,
}

fn default_zoom() -> u8 {
    13
}

impl Default for Location {
    fn default() -> Self {
        Self::new(0.0, 0.0, default_zoom())
    }
}

impl Location {
    pub fn new(latitude: f64, longitude: f64, zoom: u8) -> Self {
        Self {
            latitude,
            longitude,
            zoom,
        }
    }
}

/// A supported city. The list is static configuration, never fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    /// Backends omit the id inside offers; configured cities carry one.
    #[serde(default)]
    pub id: u32,
    pub name: String,
    pub location: Location,
}

impl City {
    pub fn new(id: u32, name: impl Into<String>, location: Location) -> Self {
        Self {
            id,
            name: name.into(),
            location,
        }
    }

    /// Look up a city by name in the configured list.
    pub fn find<'a>(cities: &'a [City], name: &str) -> Option<&'a City> {
        cities.iter().find(|city| city.name == name)
    }
}
