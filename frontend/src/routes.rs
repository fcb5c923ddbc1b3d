use common::query_state::QueryState;
use dioxus::prelude::*;

use crate::components::navbar::Navbar;
use crate::pages::home_page::HomePage;
use crate::pages::users_search_page::UsersSearchPage;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Navbar)]


    #[route("/")]
    HomePage {},


    #[route("/users/search?:..query")]
    UsersSearchPage { query: QueryState },

}

impl Route {
    pub fn users_search(query: QueryState) -> Self {
        Self::UsersSearchPage { query }
    }
}
