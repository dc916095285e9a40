//! OpenAPI documentation configuration
//!
//! Generates the OpenAPI 3.0 document served at `/openapi.json`.

use utoipa::OpenApi;

use crate::handlers::{
    BoundingBoxResponse, ClassificationRequest, ClassificationResponse, CoordinateResponse,
    DetectionRequest, DetectionResponse, HealthResponse, ReadyResponse,
};

/// ARCNET API - OpenAPI Documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "ARCNET API",
        version = "0.1.0",
        description = r#"
## Active Region Classification Network (ARCNET)

Part of the Active Region Classification and Flare Forecasting (ARCAFF) API.
ARCNET labels solar active regions (ARs) using the NOAA Solar Region
Summary (SRS) for the requested time as ground truth.

### How It Works

1. The SRS report nearest to `time` within ±12 hours is fetched
2. **Cutout classification** returns the Hale and McIntosh classes of the
   catalogued region nearest to the cutout centre, if within 10°, and
   `QS` (quiet Sun) otherwise
3. **Full-disk detection** returns a 10° × 10° bounding box and labels
   for every catalogued region

Times must lie between 2011-01-01 and now. No report within the window
yields `404 SRS_NOT_FOUND`.
"#,
        license(name = "MIT OR Apache-2.0"),
        contact(name = "ARCAFF", url = "http://www.arcaff.eu")
    ),
    servers(
        (url = "http://localhost:8000", description = "Local development server")
    ),
    tags(
        (name = "AR Cutout Classification", description = "Classify cutouts generated from a magnetogram at the given date and location"),
        (name = "Full disk AR Detection", description = "Detect and classify all ARs from a magnetogram for the given date"),
        (name = "Health", description = "Service health and readiness endpoints")
    ),
    paths(
        crate::handlers::health::health,
        crate::handlers::health::ready,
        crate::handlers::classify::classify_cutout_get,
        crate::handlers::classify::classify_cutout_post,
        crate::handlers::detect::full_disk_detection_get,
        crate::handlers::detect::full_disk_detection_post,
    ),
    components(
        schemas(
            HealthResponse,
            ReadyResponse,
            ClassificationRequest,
            ClassificationResponse,
            DetectionRequest,
            DetectionResponse,
            BoundingBoxResponse,
            CoordinateResponse,
        )
    )
)]
pub struct ApiDoc;
