//! Routing definitions for the Tabula UI.
use yew_router::prelude::*;

#[derive(Clone, Routable, PartialEq, Eq, Debug)]
pub(crate) enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/register")]
    Register,
    #[at("/dashboard")]
    Dashboard,
    #[at("/reports/:id")]
    Report { id: String },
    #[not_found]
    #[at("/404")]
    NotFound,
}
