//! Solar ROI Service
//!
//! Price extraction, ROI arithmetic and the estimation pipeline.

pub mod narrative;
pub mod orchestrator;
pub mod price;
pub mod roi;

pub use narrative::{narrative_prompt, NarrativeError, NarrativeService};
pub use orchestrator::{EstimationPolicy, RoiService, RoiServiceError, RoiServiceTrait};
pub use price::{extraction_prompt, parse_price, PriceError, PriceExtractor};
pub use roi::{compute_roi, RoiCalculationError};
