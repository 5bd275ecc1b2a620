use std::fmt::Display;

use mercator_core::locations::LocationList;

pub const DISTANCE_MATRIX_API_URL: &str = "https://maps.googleapis.com/maps/api/distancematrix/json";

/// Separator the API expects between place names in `origins` and
/// `destinations`. Percent-encoded to `%7C` on the wire.
pub const LOCATION_SEPARATOR: &str = "|";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TravelMode {
    Driving,
    Walking,
    Bicycling,
    Transit,
}

impl Display for TravelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                TravelMode::Driving => "driving",
                TravelMode::Walking => "walking",
                TravelMode::Bicycling => "bicycling",
                TravelMode::Transit => "transit",
            }
        )
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Units {
    Metric,
    Imperial,
}

impl Display for Units {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Units::Metric => "metric",
                Units::Imperial => "imperial",
            }
        )
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TrafficModel {
    BestGuess,
    Pessimistic,
    Optimistic,
}

impl Display for TrafficModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                TrafficModel::BestGuess => "best_guess",
                TrafficModel::Pessimistic => "pessimistic",
                TrafficModel::Optimistic => "optimistic",
            }
        )
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TransitMode {
    Bus,
    Subway,
    Train,
    Tram,
    Rail,
}

impl Display for TransitMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                TransitMode::Bus => "bus",
                TransitMode::Subway => "subway",
                TransitMode::Train => "train",
                TransitMode::Tram => "tram",
                TransitMode::Rail => "rail",
            }
        )
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TransitRoutePreference {
    LessWalking,
    FewerTransfers,
}

impl Display for TransitRoutePreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                TransitRoutePreference::LessWalking => "less_walking",
                TransitRoutePreference::FewerTransfers => "fewer_transfers",
            }
        )
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Avoid {
    Tolls,
    Highways,
    Ferries,
    Indoor,
}

impl Display for Avoid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Avoid::Tolls => "tolls",
                Avoid::Highways => "highways",
                Avoid::Ferries => "ferries",
                Avoid::Indoor => "indoor",
            }
        )
    }
}

/// Query parameters for one Distance Matrix request.
///
/// `mode` and `sensor=false` are always sent. The remaining parameters are
/// added to the query string only when set, so the default request stays
/// minimal and the server applies its own defaults.
#[derive(Debug, Clone)]
pub struct QueryParams {
    pub mode: TravelMode,

    /// Language for the human-readable fields of the response.
    pub language: Option<String>,

    pub units: Option<Units>,

    /// Only meaningful for `mode=driving` with a departure time.
    pub traffic_model: Option<TrafficModel>,

    /// Only meaningful for `mode=transit`.
    pub transit_mode: Option<TransitMode>,

    /// Only meaningful for `mode=transit`.
    pub transit_route_preference: Option<TransitRoutePreference>,

    pub avoid: Option<Avoid>,
}

impl Default for QueryParams {
    fn default() -> Self {
        QueryParams {
            mode: TravelMode::Walking,
            language: None,
            units: None,
            traffic_model: None,
            transit_mode: None,
            transit_route_preference: None,
            avoid: None,
        }
    }
}

impl QueryParams {
    /// Key/value pairs for the request, in a stable order. Every place
    /// serves as both an origin and a destination, which is what makes the
    /// response square.
    pub fn query_pairs(&self, locations: &LocationList) -> Vec<(&'static str, String)> {
        let joined = locations.names().join(LOCATION_SEPARATOR);

        let mut pairs = vec![
            ("mode", self.mode.to_string()),
            ("sensor", "false".to_owned()),
        ];

        if let Some(language) = &self.language {
            pairs.push(("language", language.clone()));
        }
        if let Some(units) = self.units {
            pairs.push(("units", units.to_string()));
        }
        if let Some(traffic_model) = self.traffic_model {
            pairs.push(("traffic_model", traffic_model.to_string()));
        }
        if let Some(transit_mode) = self.transit_mode {
            pairs.push(("transit_mode", transit_mode.to_string()));
        }
        if let Some(preference) = self.transit_route_preference {
            pairs.push(("transit_route_preference", preference.to_string()));
        }
        if let Some(avoid) = self.avoid {
            pairs.push(("avoid", avoid.to_string()));
        }

        pairs.push(("origins", joined.clone()));
        pairs.push(("destinations", joined));

        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn travel_modes_use_api_words() {
        assert_eq!(TravelMode::Walking.to_string(), "walking");
        assert_eq!(TravelMode::Driving.to_string(), "driving");
        assert_eq!(TravelMode::Bicycling.to_string(), "bicycling");
        assert_eq!(TravelMode::Transit.to_string(), "transit");
    }

    #[test]
    fn multi_word_options_use_snake_case() {
        assert_eq!(TrafficModel::BestGuess.to_string(), "best_guess");
        assert_eq!(
            TransitRoutePreference::FewerTransfers.to_string(),
            "fewer_transfers"
        );
        assert_eq!(TransitRoutePreference::LessWalking.to_string(), "less_walking");
    }

    #[test]
    fn default_params_send_only_mode_and_sensor() {
        let locations = LocationList::from_names(["Dublin", "Cork"]);

        let pairs = QueryParams::default().query_pairs(&locations);

        assert_eq!(
            pairs,
            [
                ("mode", "walking".to_owned()),
                ("sensor", "false".to_owned()),
                ("origins", "Dublin|Cork".to_owned()),
                ("destinations", "Dublin|Cork".to_owned()),
            ]
        );
    }

    #[test]
    fn optional_params_are_sent_when_set() {
        let locations = LocationList::from_names(["Dublin"]);
        let params = QueryParams {
            mode: TravelMode::Transit,
            language: Some("en".to_owned()),
            units: Some(Units::Metric),
            traffic_model: Some(TrafficModel::BestGuess),
            transit_mode: Some(TransitMode::Bus),
            transit_route_preference: Some(TransitRoutePreference::FewerTransfers),
            avoid: Some(Avoid::Tolls),
        };

        let pairs = params.query_pairs(&locations);

        assert_eq!(
            pairs,
            [
                ("mode", "transit".to_owned()),
                ("sensor", "false".to_owned()),
                ("language", "en".to_owned()),
                ("units", "metric".to_owned()),
                ("traffic_model", "best_guess".to_owned()),
                ("transit_mode", "bus".to_owned()),
                ("transit_route_preference", "fewer_transfers".to_owned()),
                ("avoid", "tolls".to_owned()),
                ("origins", "Dublin".to_owned()),
                ("destinations", "Dublin".to_owned()),
            ]
        );
    }

    #[test]
    fn empty_list_joins_to_empty_strings() {
        let locations = LocationList::from_names(Vec::<String>::new());

        let pairs = QueryParams::default().query_pairs(&locations);

        assert_eq!(pairs[2], ("origins", String::new()));
        assert_eq!(pairs[3], ("destinations", String::new()));
    }
}
