//! Common library exports shared between frontend and backend.

extern crate serde;


pub mod query_state;
pub mod filter_schema;
pub mod filter_criteria;
pub mod filter_codec;
pub mod cache_key;
pub mod ttl_cache;
pub mod search_coordinator;
pub mod search_const;
pub mod users;
pub mod fetch_error;
