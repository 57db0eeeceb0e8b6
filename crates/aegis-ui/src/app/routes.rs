//! Routing definitions for the Aegis console.
use yew_router::prelude::*;

#[derive(Clone, Routable, PartialEq, Eq, Debug)]
pub(crate) enum Route {
    #[at("/")]
    Root,
    #[at("/login")]
    Login,
    #[at("/forbidden")]
    Forbidden,
    #[at("/defense")]
    Defense,
    #[at("/scan")]
    Scan,
    #[at("/scan/:id")]
    ScanDetail { id: String },
    #[at("/ai")]
    Ai,
    #[at("/reports")]
    Reports,
    #[at("/system")]
    System,
    #[not_found]
    #[at("/404")]
    NotFound,
}
