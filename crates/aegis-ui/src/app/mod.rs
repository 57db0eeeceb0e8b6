use crate::components::guarded::Guarded;
use crate::components::login::LoginView;
use crate::components::shell::AppShell;
use crate::components::toast::{ToastAction, ToastHost, ToastList};
use crate::components::views::{ForbiddenView, Placeholder};
use crate::core::config::ClientConfig;
use crate::core::context::{Platform, SessionCtx};
use crate::core::routes::console_routes;
use crate::services::http::FetchBackend;
use crate::services::navigator::HashNavigator;
use crate::services::notify::ToastNotifier;
use crate::services::storage::BrowserStorage;
use crate::services::timers::TimeoutScheduler;
pub(crate) use routes::Route;
use std::rc::Rc;
use yew::prelude::*;
use yew_router::prelude::*;

pub(crate) mod routes;

#[function_component(AegisApp)]
pub(crate) fn aegis_app() -> Html {
    let toasts = use_reducer(ToastList::default);
    let session = {
        let dispatcher = toasts.dispatcher();
        use_memo(
            move |_| {
                let sink = Callback::from(move |message: String| {
                    dispatcher.dispatch(ToastAction::Push(message));
                });
                SessionCtx::new(
                    ClientConfig::default(),
                    console_routes(),
                    Platform {
                        storage: Rc::new(BrowserStorage),
                        backend: Rc::new(FetchBackend),
                        navigator: Rc::new(HashNavigator),
                        notifier: Rc::new(ToastNotifier::new(sink)),
                        scheduler: Rc::new(TimeoutScheduler),
                    },
                )
            },
            (),
        )
    };

    // Refresh the cached identity so role checks follow the server after a reload.
    {
        let session = (*session).clone();
        use_effect_with_deps(
            move |_| {
                if session.credentials.is_authenticated() {
                    yew::platform::spawn_local(async move {
                        if let Err(err) = session.auth.profile().await {
                            tracing::warn!(error = %err, "profile refresh failed");
                        }
                    });
                }
                || ()
            },
            (),
        );
    }

    let dismiss_toast = {
        let dispatcher = toasts.dispatcher();
        Callback::from(move |id: u64| dispatcher.dispatch(ToastAction::Dismiss(id)))
    };

    html! {
        <ContextProvider<SessionCtx> context={(*session).clone()}>
            <HashRouter>
                <Switch<Route> render={switch} />
            </HashRouter>
            <ToastHost toasts={toasts.items.clone()} on_dismiss={dismiss_toast} />
        </ContextProvider<SessionCtx>>
    }
}

fn switch(route: Route) -> Html {
    let page = match &route {
        Route::Login => return html! { <Guarded><LoginView /></Guarded> },
        Route::Forbidden => return html! { <Guarded><ForbiddenView /></Guarded> },
        Route::Root | Route::NotFound => html! {},
        Route::Defense => html! {
            <Placeholder title="Defense" detail="Live threat posture and active countermeasures." />
        },
        Route::Scan => html! {
            <Placeholder title="Scans" detail="Launch and review network scans." />
        },
        Route::ScanDetail { id } => html! {
            <Placeholder title={format!("Scan {id}")} />
        },
        Route::Ai => html! {
            <Placeholder title="AI analysis" detail="Model-assisted triage of recent findings." />
        },
        Route::Reports => html! {
            <Placeholder title="Reports" />
        },
        Route::System => html! {
            <Placeholder title="System" detail="Users, integrations, and platform settings." />
        },
    };
    html! {
        <Guarded>
            <AppShell active={route}>{page}</AppShell>
        </Guarded>
    }
}

/// Mount the console into `#root`, falling back to `<body>`.
pub fn run_app() {
    console_error_panic_hook::set_once();
    if let Some(root) = gloo::utils::document().get_element_by_id("root") {
        yew::Renderer::<AegisApp>::with_root(root).render();
    } else {
        yew::Renderer::<AegisApp>::new().render();
    }
}
