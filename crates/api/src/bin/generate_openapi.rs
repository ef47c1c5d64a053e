//! Writes the OpenAPI document of the solar ROI API to disk
//!
//! ```bash
//! # docs/api/openapi.json
//! cargo run -p solar-roi-api --bin generate_openapi --features openapi
//!
//! cargo run -p solar-roi-api --bin generate_openapi --features openapi -- out/openapi.json
//! ```
#[cfg(feature = "openapi")]
use std::env;
#[cfg(feature = "openapi")]
use std::fs;
#[cfg(feature = "openapi")]
use std::path::Path;

#[cfg(feature = "openapi")]
use solar_roi_api::openapi::ApiDoc;
#[cfg(feature = "openapi")]
use utoipa::OpenApi;

fn main() -> Result<(), Box<dyn std::error::Error>> {
	#[cfg(not(feature = "openapi"))]
	{
		eprintln!("The 'openapi' feature is required to generate the API document.");
		eprintln!("Run with: cargo run -p solar-roi-api --bin generate_openapi --features openapi");
		std::process::exit(1);
	}

	#[cfg(feature = "openapi")]
	{
		let output_path = env::args()
			.nth(1)
			.unwrap_or_else(|| "docs/api/openapi.json".to_string());

		if let Some(parent) = Path::new(&output_path).parent() {
			if !parent.as_os_str().is_empty() && !parent.exists() {
				fs::create_dir_all(parent)?;
			}
		}

		let json = serde_json::to_string_pretty(&ApiDoc::openapi())?;
		fs::write(&output_path, json)?;

		println!("OpenAPI document written to {}", output_path);
	}

	#[allow(unreachable_code)]
	Ok(())
}
