pub mod error_boundary;
pub mod navbar;
pub mod suspend_boundary;
pub mod users_search;
