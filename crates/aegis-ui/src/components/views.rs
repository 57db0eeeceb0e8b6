use crate::app::routes::Route;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct PlaceholderProps {
    pub title: AttrValue,
    #[prop_or_default]
    pub detail: Option<AttrValue>,
}

/// Landing card for a console section.
#[function_component(Placeholder)]
pub(crate) fn placeholder(props: &PlaceholderProps) -> Html {
    html! {
        <section class="card">
            <header>
                <h3>{props.title.clone()}</h3>
            </header>
            {if let Some(detail) = &props.detail {
                html! { <p class="muted">{detail.clone()}</p> }
            } else { html! {} }}
        </section>
    }
}

#[function_component(ForbiddenView)]
pub(crate) fn forbidden_view() -> Html {
    html! {
        <section class="card">
            <header>
                <h3>{"Access denied"}</h3>
            </header>
            <p class="muted">{"Your role does not allow access to this page."}</p>
            <Link<Route> to={Route::Defense} classes="solid">{"Back to defense"}</Link<Route>>
        </section>
    }
}
