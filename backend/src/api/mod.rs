//! Upstream users API access and the HTTP routes that expose it.

pub mod routes;
pub mod users_client;
