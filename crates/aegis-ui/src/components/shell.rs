use crate::app::routes::Route;
use crate::core::context::SessionCtx;
use crate::core::guard::GuardDecision;
use crate::core::session::Navigator;
use crate::services::navigator::HashNavigator;
use yew::prelude::*;
use yew_router::prelude::*;

/// Navigation entries in display order.
fn nav_entries() -> [(Route, &'static str, &'static str); 5] {
    [
        (Route::Defense, "Defense", "/defense"),
        (Route::Scan, "Scans", "/scan"),
        (Route::Ai, "AI analysis", "/ai"),
        (Route::Reports, "Reports", "/reports"),
        (Route::System, "System", "/system"),
    ]
}

#[derive(Properties, PartialEq)]
pub(crate) struct ShellProps {
    pub children: Children,
    pub active: Route,
}

#[function_component(AppShell)]
pub(crate) fn app_shell(props: &ShellProps) -> Html {
    let Some(ctx) = use_context::<SessionCtx>() else {
        return html! { <main>{for props.children.iter()}</main> };
    };
    let user = ctx.credentials.user_info();
    let on_logout = {
        let ctx = ctx.clone();
        Callback::from(move |_| {
            let ctx = ctx.clone();
            yew::platform::spawn_local(async move {
                if let Err(err) = ctx.auth.logout().await {
                    tracing::warn!(error = %err, "logout request failed");
                }
                HashNavigator.redirect_to(ctx.guard.login_path());
            });
        })
    };

    html! {
        <div class="app-shell">
            <aside class="sidebar">
                <div class="brand">
                    <strong>{"Aegis"}</strong>
                    <small>{"Security operations"}</small>
                </div>
                <nav>
                    {for nav_entries()
                        .into_iter()
                        .filter(|(_, _, path)| ctx.check_navigation(path) == GuardDecision::Allow)
                        .map(|(route, label, _)| nav_item(route, label, props.active.clone()))}
                </nav>
            </aside>
            <div class="main">
                <header class="topbar">
                    <div class="top-actions">
                        {if let Some(user) = user {
                            html! {
                                <span class="pill subtle">{format!("{} · {}", user.username, user.role)}</span>
                            }
                        } else { html! {} }}
                        <button class="ghost" onclick={on_logout}>{"Sign out"}</button>
                    </div>
                </header>
                <main>
                    {for props.children.iter()}
                </main>
            </div>
        </div>
    }
}

fn nav_item(route: Route, label: &str, active: Route) -> Html {
    let classes = classes!("nav-item", (active == route).then_some("active"));
    html! {
        <Link<Route> to={route} classes={classes}>{label}</Link<Route>>
    }
}
