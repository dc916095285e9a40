//! HTTP request handlers
//!
//! This module contains all the request handlers for the API endpoints.

pub mod classify;
pub mod detect;
pub mod health;

pub use crate::state::AppState;
pub use classify::{
    classify_cutout_get, classify_cutout_post, ClassificationRequest, ClassificationResponse,
};
pub use detect::{
    full_disk_detection_get, full_disk_detection_post, BoundingBoxResponse, CoordinateResponse,
    DetectionRequest, DetectionResponse,
};
pub use health::{health, ready, HealthResponse, ReadyResponse};
