pub mod browse;
pub mod common;
pub mod completion;
pub mod geocoding;
pub mod health;
pub mod production;
pub mod search;

pub use browse::post_browse;
pub use completion::{post_completion, post_describe};
pub use geocoding::{get_country, post_get_coordinates};
pub use health::health;
pub use production::get_pvgis;
pub use search::post_search_google;
