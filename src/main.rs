//! Solar ROI Server
//!
//! Main entry point for the solar ROI service

use solar_roi::RoiBuilder;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	RoiBuilder::new().start_server().await
}
