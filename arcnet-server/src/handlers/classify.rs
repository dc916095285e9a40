//! Cutout classification handlers
//!
//! Handles GET and POST /arcnet/classify_cutout/ requests.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use arcnet_core::{classify_cutout, ClassificationResult};

use crate::error::ApiError;
use crate::handlers::AppState;
use crate::validation::{request_time, validate_coordinate, LATITUDE_BOUNDS, LONGITUDE_BOUNDS};

/// Cutout to classify.
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ClassificationRequest {
    /// Observation time (ISO 8601), between 2011-01-01 and now
    #[schema(example = "2022-11-12T13:14:15Z")]
    pub time: String,

    /// Cutout centre latitude in degrees, within [-180, 180]
    #[schema(example = 24.0)]
    pub hgs_latitude: f64,

    /// Cutout centre longitude in degrees, within [-90, 90]
    #[schema(example = 33.0)]
    pub hgs_longitude: f64,
}

/// Classification of a cutout.
///
/// `hgs_latitude` and `hgs_longitude` echo the request.
#[derive(Debug, Serialize, ToSchema)]
pub struct ClassificationResponse {
    pub time: DateTime<Utc>,
    #[schema(example = 24.0)]
    pub hgs_latitude: f64,
    #[schema(example = 33.0)]
    pub hgs_longitude: f64,
    /// Mount Wilson class, or "QS" for quiet Sun
    #[schema(example = "Beta")]
    pub hale_class: String,
    /// McIntosh class, or "QS" for quiet Sun
    #[schema(example = "Dso")]
    pub mcintosh_class: String,
}

impl From<ClassificationResult> for ClassificationResponse {
    fn from(result: ClassificationResult) -> Self {
        Self {
            time: result.time,
            hgs_latitude: result.hgs_latitude,
            hgs_longitude: result.hgs_longitude,
            hale_class: result.hale_class,
            mcintosh_class: result.mcintosh_class,
        }
    }
}

/// Classify an AR cutout (query parameters)
#[utoipa::path(
    get,
    path = "/arcnet/classify_cutout/",
    tag = "AR Cutout Classification",
    params(ClassificationRequest),
    responses(
        (status = 200, description = "Cutout classified", body = ClassificationResponse),
        (status = 400, description = "Invalid time or coordinates"),
        (status = 404, description = "No SRS report near the requested time"),
        (status = 502, description = "SRS report unreadable"),
        (status = 503, description = "SRS archive unavailable")
    )
)]
pub async fn classify_cutout_get(
    State(state): State<AppState>,
    query: Result<Query<ClassificationRequest>, QueryRejection>,
) -> Result<Json<ClassificationResponse>, ApiError> {
    let Query(request) = query.map_err(|e| ApiError::bad_request(e.body_text()))?;
    classify(&state, request).await
}

/// Classify an AR cutout (JSON body)
#[utoipa::path(
    post,
    path = "/arcnet/classify_cutout/",
    tag = "AR Cutout Classification",
    request_body = ClassificationRequest,
    responses(
        (status = 200, description = "Cutout classified", body = ClassificationResponse),
        (status = 400, description = "Invalid time or coordinates"),
        (status = 404, description = "No SRS report near the requested time"),
        (status = 502, description = "SRS report unreadable"),
        (status = 503, description = "SRS archive unavailable")
    )
)]
pub async fn classify_cutout_post(
    State(state): State<AppState>,
    body: Result<Json<ClassificationRequest>, JsonRejection>,
) -> Result<Json<ClassificationResponse>, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::bad_request(e.body_text()))?;
    classify(&state, request).await
}

async fn classify(
    state: &AppState,
    request: ClassificationRequest,
) -> Result<Json<ClassificationResponse>, ApiError> {
    let time = request_time(&request.time)?;
    validate_coordinate("hgs_latitude", request.hgs_latitude, LATITUDE_BOUNDS)?;
    validate_coordinate("hgs_longitude", request.hgs_longitude, LONGITUDE_BOUNDS)?;

    let result = classify_cutout(
        state.archive.as_ref(),
        time,
        request.hgs_latitude,
        request.hgs_longitude,
    )
    .await?;

    Ok(Json(result.into()))
}
