//! Server-side pieces of the users search: configuration, upstream access and the mock API.

pub mod api;
pub mod config;
pub mod mock_api;
