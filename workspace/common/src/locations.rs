/// A named city offered in the location picker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredefinedLocation {
    pub name: &'static str,
    pub country: &'static str,
    /// WGS84 latitude.
    pub latitude: f64,
    /// WGS84 longitude.
    pub longitude: f64,
}

impl PredefinedLocation {
    pub fn location(&self) -> crate::LocationQuery {
        crate::LocationQuery::new(self.latitude, self.longitude)
    }
}

const fn city(
    name: &'static str,
    country: &'static str,
    latitude: f64,
    longitude: f64,
) -> PredefinedLocation {
    PredefinedLocation { name, country, latitude, longitude }
}

/// The fixed picker list, in display order.
pub static PREDEFINED_LOCATIONS: [PredefinedLocation; 20] = [
    city("New York", "USA", 40.7128, -74.0060),
    city("London", "UK", 51.5074, -0.1278),
    city("Tokyo", "Japan", 35.6762, 139.6503),
    city("Sydney", "Australia", -33.8688, 151.2093),
    city("Berlin", "Germany", 52.5200, 13.4050),
    city("Paris", "France", 48.8566, 2.3522),
    city("Mumbai", "India", 19.0760, 72.8777),
    city("Dubai", "UAE", 25.2048, 55.2708),
    city("Singapore", "Singapore", 1.3521, 103.8198),
    city("Los Angeles", "USA", 34.0522, -118.2437),
    city("Toronto", "Canada", 43.6532, -79.3832),
    city("São Paulo", "Brazil", -23.5505, -46.6333),
    city("Moscow", "Russia", 55.7558, 37.6176),
    city("Cairo", "Egypt", 30.0444, 31.2357),
    city("Cape Town", "South Africa", -33.9249, 18.4241),
    city("Bangkok", "Thailand", 13.7563, 100.5018),
    city("Seoul", "South Korea", 37.5665, 126.9780),
    city("Mexico City", "Mexico", 19.4326, -99.1332),
    city("Buenos Aires", "Argentina", -34.6118, -58.3960),
    city("Istanbul", "Turkey", 41.0082, 28.9784),
];
