use mercator_core::locations::LocationList;
use mercator_core::matrix::DistanceMatrix;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::query::{DISTANCE_MATRIX_API_URL, QueryParams};

pub const STATUS_OK: &str = "OK";

#[derive(Debug, Error)]
pub enum DistanceMatrixError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("response is not valid JSON: {source}")]
    Decode {
        source: serde_json::Error,
        body: String,
    },

    #[error("service returned status {status}")]
    Status { status: String, body: String },

    #[error("row {row} has {found} elements, expected {expected}")]
    ElementCount {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("element ({row}, {col}) has no duration (element status {element_status:?})")]
    MissingDuration {
        row: usize,
        col: usize,
        element_status: Option<String>,
    },
}

#[derive(Debug, Deserialize)]
pub struct DistanceMatrixResponse {
    pub status: String,

    /// One row per origin, in request order. Missing when the service
    /// rejects the request outright.
    #[serde(default)]
    pub rows: Vec<ResponseRow>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseRow {
    #[serde(default)]
    pub elements: Vec<ResponseElement>,
}

/// One origin/destination cell. `duration` is absent when the service
/// could not route the pair, with the per-element `status` saying why.
#[derive(Debug, Deserialize)]
pub struct ResponseElement {
    pub duration: Option<ElementDuration>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ElementDuration {
    /// Travel time in whole seconds.
    pub value: u32,
    pub text: Option<String>,
}

/// Decodes a response body into a square travel-time matrix.
///
/// The matrix size is taken from the number of rows in the response, not
/// from the request, so the caller sees exactly what the service answered.
/// Every element must carry a duration; an element without one fails the
/// whole parse before any value is read from it.
pub fn parse_matrix(body: &str) -> Result<DistanceMatrix, DistanceMatrixError> {
    let response: DistanceMatrixResponse =
        serde_json::from_str(body).map_err(|source| DistanceMatrixError::Decode {
            source,
            body: body.to_owned(),
        })?;

    if response.status != STATUS_OK {
        return Err(DistanceMatrixError::Status {
            status: response.status,
            body: body.to_owned(),
        });
    }

    let num_places = response.rows.len();
    let mut matrix = DistanceMatrix::zeroed(num_places);

    for (row, row_data) in response.rows.iter().enumerate() {
        if row_data.elements.len() != num_places {
            return Err(DistanceMatrixError::ElementCount {
                row,
                expected: num_places,
                found: row_data.elements.len(),
            });
        }

        for (col, element) in row_data.elements.iter().enumerate() {
            let duration =
                element
                    .duration
                    .as_ref()
                    .ok_or_else(|| DistanceMatrixError::MissingDuration {
                        row,
                        col,
                        element_status: element.status.clone(),
                    })?;

            matrix.set(row, col, duration.value);
        }
    }

    Ok(matrix)
}

pub struct DistanceMatrixClient {
    client: reqwest::Client,
}

impl DistanceMatrixClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Builds the GET request without sending it.
    pub fn build_request(
        &self,
        params: &QueryParams,
        locations: &LocationList,
    ) -> Result<reqwest::Request, DistanceMatrixError> {
        let request = self
            .client
            .get(DISTANCE_MATRIX_API_URL)
            .query(&params.query_pairs(locations))
            .build()?;

        Ok(request)
    }

    /// Sends one request covering every origin/destination pair and returns
    /// the raw response body. Error pages come back as `Ok` here and fail
    /// later in [`parse_matrix`], which keeps the body available for
    /// diagnosis.
    pub async fn fetch(
        &self,
        params: &QueryParams,
        locations: &LocationList,
    ) -> Result<String, DistanceMatrixError> {
        let request = self.build_request(params, locations)?;

        info!("retrieving {}", request.url());
        let response = self.client.execute(request).await?;
        let body = response.text().await?;
        info!("retrieved {} characters", body.len());

        Ok(body)
    }
}

impl Default for DistanceMatrixClient {
    fn default() -> Self {
        Self::new()
    }
}
