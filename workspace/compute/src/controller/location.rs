use common::{GeocodeResponse, LocationQuery, PREDEFINED_LOCATIONS, PredefinedLocation, WeatherResponse};
use tracing::{debug, info, warn};

use crate::api::SolarApi;
use crate::error::{ApiError, Result, WorkflowError};
use crate::validation::{complete_coordinates, validate_place_query};
use crate::view::{LocationView, WeatherRow, weather_rows};

const GEOCODING: &str = "geocoding location";

/// Rounds a device-reported coordinate to six decimals (about 0.1 m).
pub fn round_coordinate(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}

/// Case-insensitive substring match over city name and country.
pub fn filter_locations(term: &str) -> Vec<&'static PredefinedLocation> {
    let term = term.trim().to_lowercase();
    PREDEFINED_LOCATIONS
        .iter()
        .filter(|l| term.is_empty() || l.name.to_lowercase().contains(&term) || l.country.to_lowercase().contains(&term))
        .collect()
}

pub fn find_location(name: &str) -> Option<&'static PredefinedLocation> {
    let name = name.trim().to_lowercase();
    PREDEFINED_LOCATIONS.iter().find(|l| l.name.to_lowercase() == name)
}

/// Resolves the coordinate pair for the prediction form and keeps the
/// weather card in sync with it.
pub struct LocationHelper<V> {
    view: V,
    latitude_text: String,
    longitude_text: String,
    coordinates: Option<LocationQuery>,
    selected: Option<&'static PredefinedLocation>,
    filter: String,
    locating: bool,
}

impl<V: LocationView> LocationHelper<V> {
    pub fn new(view: V) -> Self {
        Self {
            view,
            latitude_text: String::new(),
            longitude_text: String::new(),
            coordinates: None,
            selected: None,
            filter: String::new(),
            locating: false,
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// The pair currently in the form, when both fields hold numbers.
    pub fn coordinates(&self) -> Option<LocationQuery> {
        self.coordinates
    }

    pub fn latitude_text(&self) -> &str {
        &self.latitude_text
    }

    pub fn longitude_text(&self) -> &str {
        &self.longitude_text
    }

    pub fn selected(&self) -> Option<&'static PredefinedLocation> {
        self.selected
    }

    pub fn is_locating(&self) -> bool {
        self.locating
    }

    // ---- geocoding ----

    /// Checks the place name. Blank input fails here without a request.
    pub fn begin_search(&mut self, text: &str) -> Result<String> {
        match validate_place_query(text) {
            Ok(query) => {
                debug!(query, "Geocoding place name");
                Ok(query.to_string())
            }
            Err(e) => Err(self.fail(e.into())),
        }
    }

    /// Applies a geocoding answer; the returned pair is due a weather refresh.
    pub fn complete_search(&mut self, outcome: std::result::Result<GeocodeResponse, ApiError>) -> Result<LocationQuery> {
        let response = outcome.map_err(|e| self.fail(WorkflowError::api(GEOCODING, e)))?;

        match (response.success, response.latitude, response.longitude) {
            (true, Some(latitude), Some(longitude)) => {
                let location = LocationQuery::new(latitude, longitude);
                info!(%location, address = response.address.as_deref().unwrap_or(""), "Location resolved");
                self.selected = None;
                self.apply(location);
                if let Some(address) = &response.address {
                    self.view.show_address(address);
                }
                Ok(location)
            }
            _ => {
                debug!(error = response.error.as_deref().unwrap_or(""), "Geocoder found nothing");
                Err(self.fail(WorkflowError::LocationNotFound))
            }
        }
    }

    pub async fn search<A: SolarApi + ?Sized>(&mut self, api: &A, text: &str) -> Result<LocationQuery> {
        let query = self.begin_search(text)?;
        let outcome = api.geocode(&query).await;
        let location = self.complete_search(outcome)?;
        self.refresh_weather(api, location).await;
        Ok(location)
    }

    // ---- predefined list ----

    /// Applies the filter term and re-renders the list.
    pub fn filter_predefined(&mut self, term: &str) -> Vec<&'static PredefinedLocation> {
        self.filter = term.to_string();
        let entries = filter_locations(term);
        self.view.show_predefined(&entries, self.selected.map(|l| l.name));
        entries
    }

    /// Uses a city from the table; coordinates are taken verbatim.
    pub fn select_predefined(&mut self, name: &str) -> Result<LocationQuery> {
        let Some(city) = find_location(name) else {
            return Err(self.fail(WorkflowError::UnknownLocation(name.trim().to_string())));
        };

        info!(city = city.name, "Predefined location selected");
        self.selected = Some(city);
        let location = city.location();
        self.apply(location);
        let entries = filter_locations(&self.filter);
        self.view.show_predefined(&entries, Some(city.name));
        Ok(location)
    }

    pub async fn choose_city<A: SolarApi + ?Sized>(&mut self, api: &A, name: &str) -> Result<LocationQuery> {
        let location = self.select_predefined(name)?;
        self.refresh_weather(api, location).await;
        Ok(location)
    }

    // ---- device geolocation ----

    pub fn begin_locate(&mut self) {
        self.locating = true;
        self.view.set_locating(true);
    }

    /// `None` means the platform could not provide a position. Existing
    /// coordinates survive a failure.
    pub fn complete_locate(&mut self, position: Option<LocationQuery>) -> Result<LocationQuery> {
        self.locating = false;
        self.view.set_locating(false);

        let Some(position) = position else {
            warn!("Device position unavailable");
            return Err(self.fail(WorkflowError::GeolocationUnavailable));
        };

        let location = LocationQuery::new(round_coordinate(position.latitude), round_coordinate(position.longitude));
        info!(%location, "Using device position");
        self.selected = None;
        self.apply(location);
        Ok(location)
    }

    pub async fn use_device_position<A: SolarApi + ?Sized>(
        &mut self,
        api: &A,
        position: Option<LocationQuery>,
    ) -> Result<LocationQuery> {
        self.begin_locate();
        let location = self.complete_locate(position)?;
        self.refresh_weather(api, location).await;
        Ok(location)
    }

    // ---- manual entry ----

    /// Returns the pair when the edit completed it, meaning weather is due.
    pub fn set_latitude_text(&mut self, text: &str) -> Option<LocationQuery> {
        self.latitude_text = text.to_string();
        self.manual_edit()
    }

    pub fn set_longitude_text(&mut self, text: &str) -> Option<LocationQuery> {
        self.longitude_text = text.to_string();
        self.manual_edit()
    }

    fn manual_edit(&mut self) -> Option<LocationQuery> {
        self.selected = None;
        self.coordinates = complete_coordinates(&self.latitude_text, &self.longitude_text);
        self.coordinates
    }

    // ---- weather ----

    /// Renders a weather answer. Failures are logged and swallowed, as are
    /// answers for a pair the form has since moved away from.
    pub fn complete_weather(
        &mut self,
        location: LocationQuery,
        outcome: std::result::Result<WeatherResponse, ApiError>,
    ) -> Option<[WeatherRow; 5]> {
        if self.coordinates != Some(location) {
            debug!(%location, "Dropping weather for superseded coordinates");
            return None;
        }

        let snapshot = match outcome {
            Ok(WeatherResponse { success: true, data: Some(data), .. }) => data,
            Ok(response) => {
                warn!(%location, error = response.error.as_deref().unwrap_or("no data"), "Weather lookup failed");
                return None;
            }
            Err(e) => {
                warn!(%location, error = %e, "Weather request failed");
                return None;
            }
        };

        let rows = weather_rows(&snapshot);
        self.view.show_weather(&rows);
        Some(rows)
    }

    pub async fn refresh_weather<A: SolarApi + ?Sized>(&mut self, api: &A, location: LocationQuery) -> Option<[WeatherRow; 5]> {
        let outcome = api.weather(location).await;
        self.complete_weather(location, outcome)
    }

    fn apply(&mut self, location: LocationQuery) {
        self.latitude_text = location.latitude.to_string();
        self.longitude_text = location.longitude.to_string();
        self.coordinates = Some(location);
        self.view.set_coordinates(location);
    }

    fn fail(&mut self, err: WorkflowError) -> WorkflowError {
        self.view.show_location_error(&err.to_string());
        err
    }
}
