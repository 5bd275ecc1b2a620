use mercator_google::query::{
    Avoid, TrafficModel, TransitMode, TransitRoutePreference, TravelMode, Units,
};

pub fn parse_mode(input: &str) -> Result<TravelMode, String> {
    match input.to_ascii_lowercase().as_str() {
        "driving" => Ok(TravelMode::Driving),
        "walking" => Ok(TravelMode::Walking),
        "bicycling" => Ok(TravelMode::Bicycling),
        "transit" => Ok(TravelMode::Transit),
        other => Err(format!("unknown travel mode {other:?}")),
    }
}

pub fn parse_units(input: &str) -> Result<Units, String> {
    match input.to_ascii_lowercase().as_str() {
        "metric" => Ok(Units::Metric),
        "imperial" => Ok(Units::Imperial),
        other => Err(format!("unknown unit system {other:?}")),
    }
}

pub fn parse_traffic_model(input: &str) -> Result<TrafficModel, String> {
    match input.to_ascii_lowercase().as_str() {
        "best_guess" => Ok(TrafficModel::BestGuess),
        "pessimistic" => Ok(TrafficModel::Pessimistic),
        "optimistic" => Ok(TrafficModel::Optimistic),
        other => Err(format!("unknown traffic model {other:?}")),
    }
}

pub fn parse_transit_mode(input: &str) -> Result<TransitMode, String> {
    match input.to_ascii_lowercase().as_str() {
        "bus" => Ok(TransitMode::Bus),
        "subway" => Ok(TransitMode::Subway),
        "train" => Ok(TransitMode::Train),
        "tram" => Ok(TransitMode::Tram),
        "rail" => Ok(TransitMode::Rail),
        other => Err(format!("unknown transit mode {other:?}")),
    }
}

pub fn parse_transit_route_preference(input: &str) -> Result<TransitRoutePreference, String> {
    match input.to_ascii_lowercase().as_str() {
        "less_walking" => Ok(TransitRoutePreference::LessWalking),
        "fewer_transfers" => Ok(TransitRoutePreference::FewerTransfers),
        other => Err(format!("unknown transit route preference {other:?}")),
    }
}

pub fn parse_avoid(input: &str) -> Result<Avoid, String> {
    match input.to_ascii_lowercase().as_str() {
        "tolls" => Ok(Avoid::Tolls),
        "highways" => Ok(Avoid::Highways),
        "ferries" => Ok(Avoid::Ferries),
        "indoor" => Ok(Avoid::Indoor),
        other => Err(format!("unknown avoid option {other:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_words_parse_case_insensitively() {
        assert_eq!(parse_mode("walking"), Ok(TravelMode::Walking));
        assert_eq!(parse_mode("Transit"), Ok(TravelMode::Transit));
        assert_eq!(parse_units("imperial"), Ok(Units::Imperial));
        assert_eq!(parse_traffic_model("best_guess"), Ok(TrafficModel::BestGuess));
        assert_eq!(parse_transit_mode("tram"), Ok(TransitMode::Tram));
        assert_eq!(
            parse_transit_route_preference("fewer_transfers"),
            Ok(TransitRoutePreference::FewerTransfers)
        );
        assert_eq!(parse_avoid("ferries"), Ok(Avoid::Ferries));
    }

    #[test]
    fn unknown_words_are_rejected() {
        assert!(parse_mode("teleport").is_err());
        assert!(parse_units("furlongs").is_err());
        assert!(parse_traffic_model("worst_case").is_err());
        assert!(parse_transit_mode("gondola").is_err());
        assert!(parse_transit_route_preference("scenic").is_err());
        assert!(parse_avoid("puddles").is_err());
    }
}
