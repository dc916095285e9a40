//! Full-disk detection handlers
//!
//! Handles GET and POST /arcnet/full_disk_detection requests.

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

use arcnet_core::{detect_ars, BoundingBox, Detection, HgsCoordinate};

use crate::error::ApiError;
use crate::handlers::AppState;
use crate::validation::request_time;

/// Full-disk image to annotate.
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct DetectionRequest {
    /// Observation time (ISO 8601), between 2011-01-01 and now
    #[schema(example = "2022-11-12T13:14:15Z")]
    pub time: String,
}

/// Heliographic position in degrees.
#[derive(Debug, Serialize, ToSchema)]
pub struct CoordinateResponse {
    #[schema(example = 19.0)]
    pub latitude: f64,
    #[schema(example = 30.0)]
    pub longitude: f64,
}

impl From<HgsCoordinate> for CoordinateResponse {
    fn from(c: HgsCoordinate) -> Self {
        Self {
            latitude: c.latitude,
            longitude: c.longitude,
        }
    }
}

/// Box around a detected region. Corners may fall outside valid
/// heliographic ranges for regions near a pole or the limb.
#[derive(Debug, Serialize, ToSchema)]
pub struct BoundingBoxResponse {
    pub bottom_left: CoordinateResponse,
    pub top_right: CoordinateResponse,
}

impl From<BoundingBox> for BoundingBoxResponse {
    fn from(bbox: BoundingBox) -> Self {
        Self {
            bottom_left: bbox.bottom_left.into(),
            top_right: bbox.top_right.into(),
        }
    }
}

/// One detected active region.
#[derive(Debug, Serialize, ToSchema)]
pub struct DetectionResponse {
    pub time: DateTime<Utc>,
    pub bbox: BoundingBoxResponse,
    #[schema(example = "Beta")]
    pub hale_class: String,
    #[schema(example = "Dso")]
    pub mcintosh_class: String,
}

impl From<Detection> for DetectionResponse {
    fn from(detection: Detection) -> Self {
        Self {
            time: detection.time,
            bbox: detection.bbox.into(),
            hale_class: detection.hale_class,
            mcintosh_class: detection.mcintosh_class,
        }
    }
}

/// Detect all ARs on the full disk (query parameters)
///
/// Returns one entry per catalogued region, in report order. An empty
/// list means the report lists no sunspot regions.
#[utoipa::path(
    get,
    path = "/arcnet/full_disk_detection",
    tag = "Full disk AR Detection",
    params(DetectionRequest),
    responses(
        (status = 200, description = "Detected regions", body = [DetectionResponse]),
        (status = 400, description = "Invalid time"),
        (status = 404, description = "No SRS report near the requested time"),
        (status = 502, description = "SRS report unreadable"),
        (status = 503, description = "SRS archive unavailable")
    )
)]
pub async fn full_disk_detection_get(
    State(state): State<AppState>,
    query: Result<Query<DetectionRequest>, QueryRejection>,
) -> Result<Json<Vec<DetectionResponse>>, ApiError> {
    let Query(request) = query.map_err(|e| ApiError::bad_request(e.body_text()))?;
    detect(&state, request).await
}

/// Detect all ARs on the full disk (JSON body)
#[utoipa::path(
    post,
    path = "/arcnet/full_disk_detection",
    tag = "Full disk AR Detection",
    request_body = DetectionRequest,
    responses(
        (status = 200, description = "Detected regions", body = [DetectionResponse]),
        (status = 400, description = "Invalid time"),
        (status = 404, description = "No SRS report near the requested time"),
        (status = 502, description = "SRS report unreadable"),
        (status = 503, description = "SRS archive unavailable")
    )
)]
pub async fn full_disk_detection_post(
    State(state): State<AppState>,
    body: Result<Json<DetectionRequest>, JsonRejection>,
) -> Result<Json<Vec<DetectionResponse>>, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::bad_request(e.body_text()))?;
    detect(&state, request).await
}

async fn detect(
    state: &AppState,
    request: DetectionRequest,
) -> Result<Json<Vec<DetectionResponse>>, ApiError> {
    let time = request_time(&request.time)?;

    let detections = detect_ars(state.archive.as_ref(), time).await?;

    Ok(Json(detections.into_iter().map(Into::into).collect()))
}
