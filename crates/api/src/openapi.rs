use crate::handlers::common::ErrorResponse;
use crate::handlers::{browse, completion, geocoding, health, production, search};
use utoipa::OpenApi;

use solar_roi_types::{
	BrowseRequest, CompletionRequest, ContentResponse, CoordinatesRequest, CountryResponse,
	DescribeRequest, EnergyProductionData, GeoResult, ProductionResponse, RoiReport, SearchMode,
	SearchRequest, SearchResponse,
};

#[derive(OpenApi)]
#[openapi(
	paths(
		health::health,
		search::post_search_google,
		production::get_pvgis,
		completion::post_describe,
		completion::post_completion,
		geocoding::post_get_coordinates,
		geocoding::get_country,
		browse::post_browse,
	),
	components(schemas(
		ErrorResponse,
		SearchMode, SearchRequest, SearchResponse,
		EnergyProductionData, ProductionResponse,
		CompletionRequest, DescribeRequest, ContentResponse,
		CoordinatesRequest, GeoResult, CountryResponse,
		BrowseRequest, RoiReport
	)),
	tags(
		(name = "roi", description = "Return on investment estimation"),
		(name = "geocoding", description = "Address and country lookup"),
		(name = "production", description = "Photovoltaic production modeling"),
		(name = "pricing", description = "Price search"),
		(name = "completion", description = "Price extraction and narratives"),
		(name = "health", description = "Health endpoint")
	)
)]
pub struct ApiDoc;
