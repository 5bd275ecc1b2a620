use std::path::PathBuf;

use clap::Args;
use mercator_core::locations::LocationList;
use mercator_google::distance_matrix::{self, DistanceMatrixClient, DistanceMatrixError};
use mercator_google::query::{
    Avoid, QueryParams, TrafficModel, TransitMode, TransitRoutePreference, TravelMode, Units,
};
use mercator_mat::artifact;
use tracing::{error, info};

use crate::parsers;

pub const DEFAULT_INPUT: &str = "Location_Names.txt";
pub const DEFAULT_OUTPUT: &str = "MATLAB_Info";

#[derive(Args)]
pub struct FetchArgs {
    /// File with one place name per line
    #[arg(short, long, default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Artifact path; `.mat` is appended when missing
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Travel mode: walking, driving, bicycling or transit
    #[arg(short, long, value_parser = parsers::parse_mode, default_value_t = TravelMode::Walking)]
    mode: TravelMode,

    /// Response language, e.g. "en"
    #[arg(long)]
    language: Option<String>,

    /// Unit system for the human-readable fields: metric or imperial
    #[arg(long, value_parser = parsers::parse_units)]
    units: Option<Units>,

    /// Traffic model for driving: best_guess, pessimistic or optimistic
    #[arg(long, value_parser = parsers::parse_traffic_model)]
    traffic_model: Option<TrafficModel>,

    /// Preferred transit vehicle: bus, subway, train, tram or rail
    #[arg(long, value_parser = parsers::parse_transit_mode)]
    transit_mode: Option<TransitMode>,

    /// Transit routing preference: less_walking or fewer_transfers
    #[arg(long, value_parser = parsers::parse_transit_route_preference)]
    transit_route_preference: Option<TransitRoutePreference>,

    /// Route features to avoid: tolls, highways, ferries or indoor
    #[arg(long, value_parser = parsers::parse_avoid)]
    avoid: Option<Avoid>,

    /// Pretty-print the raw response before decoding it
    #[arg(long)]
    dump_json: bool,
}

pub async fn run(args: FetchArgs) -> Result<(), anyhow::Error> {
    let locations = LocationList::from_file(&args.input)?;
    info!("loaded {} places from {:?}", locations.len(), args.input);

    let params = QueryParams {
        mode: args.mode,
        language: args.language,
        units: args.units,
        traffic_model: args.traffic_model,
        transit_mode: args.transit_mode,
        transit_route_preference: args.transit_route_preference,
        avoid: args.avoid,
    };

    let client = DistanceMatrixClient::new();
    let body = client.fetch(&params, &locations).await?;

    if args.dump_json {
        dump_pretty(&body);
    }

    let matrix = match distance_matrix::parse_matrix(&body) {
        Ok(matrix) => matrix,
        Err(err) => {
            if let DistanceMatrixError::Status { body, .. }
            | DistanceMatrixError::Decode { body, .. } = &err
            {
                error!("no usable matrix in the response, raw body follows");
                eprintln!("{body}");
            }
            return Err(err.into());
        }
    };

    let written = artifact::save_matrix(&args.output, &matrix)?;
    let n = matrix.num_places();
    info!("wrote a {} x {} matrix to {:?}", n, n, written);

    Ok(())
}

fn dump_pretty(body: &str) {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => println!("{value:#}"),
        Err(_) => println!("{body}"),
    }
}
