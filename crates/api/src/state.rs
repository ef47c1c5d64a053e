use std::sync::Arc;

use solar_roi_service::RoiServiceTrait;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
	pub roi_service: Arc<dyn RoiServiceTrait>,
}

impl AppState {
	pub fn new(roi_service: Arc<dyn RoiServiceTrait>) -> Self {
		Self { roi_service }
	}
}
