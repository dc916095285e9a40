//! Application state module
//!
//! Defines shared state accessible across all request handlers.

use std::sync::Arc;

use arcnet_core::SrsArchive;

/// Application state containing shared resources.
#[derive(Clone)]
pub struct AppState {
    /// SRS archive every request fetches its report from
    pub archive: Arc<dyn SrsArchive>,
}

impl AppState {
    pub fn new(archive: Arc<dyn SrsArchive>) -> Self {
        Self { archive }
    }
}
