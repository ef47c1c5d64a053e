//! Solar ROI Adapters
//!
//! HTTP adapters for the external providers of the solar ROI service.

pub mod google_geocoder;
pub mod google_search;
pub mod http;
pub mod openai;
pub mod pvgis;

pub use google_geocoder::GoogleGeocoder;
pub use google_search::GoogleSearch;
pub use openai::OpenAiCompletion;
pub use pvgis::PvgisEstimator;
pub use solar_roi_types::{ProviderError, ProviderResult};
