//! Shared fixtures for integration tests
//!
//! Provider payloads served by wiremock, settings pointing at them and a
//! test server running the full router.

pub mod providers;
pub mod test_server;

#[allow(unused_imports)]
pub use providers::ProviderStubs;
#[allow(unused_imports)]
pub use test_server::TestServer;
