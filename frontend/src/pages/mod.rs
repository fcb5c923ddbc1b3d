pub mod home_page;
pub mod users_search_page;
