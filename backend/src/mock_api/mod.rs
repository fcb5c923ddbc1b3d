//! Mock users API for local development and tests.

pub mod fixtures;
pub mod server;
pub mod users_filter;

pub use server::{MockServer, RecordedRequest, RequestObservers, Subscription, router, should_use_mock};
