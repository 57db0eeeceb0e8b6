use crate::core::context::SessionCtx;
use crate::core::session::Navigator;
use crate::services::navigator::HashNavigator;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(LoginView)]
pub(crate) fn login_view() -> Html {
    let ctx = use_context::<SessionCtx>();
    let query = use_location()
        .map(|location| location.query_str().to_string())
        .unwrap_or_default();
    let username = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| None as Option<String>);
    let busy = use_state(|| false);

    let on_submit = {
        let username = username.clone();
        let password = password.clone();
        let error = error.clone();
        let busy = busy.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let Some(ctx) = ctx.clone() else {
                return;
            };
            if *busy {
                return;
            }
            busy.set(true);
            error.set(None);
            let (user, pass) = ((*username).clone(), (*password).clone());
            let (error, busy, query) = (error.clone(), busy.clone(), query.clone());
            yew::platform::spawn_local(async move {
                match ctx.auth.login(&user, &pass).await {
                    Ok(_) => HashNavigator.redirect_to(&ctx.guard.post_login_target(&query)),
                    Err(err) => error.set(Some(err.display_message().to_string())),
                }
                busy.set(false);
            });
        })
    };

    let bind = |state: UseStateHandle<String>| {
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<web_sys::HtmlInputElement>() {
                state.set(input.value());
            }
        })
    };

    html! {
        <div class="auth-overlay" role="dialog" aria-modal="true">
            <form class="card" onsubmit={on_submit}>
                <header>
                    <h3>{"Sign in to Aegis"}</h3>
                </header>
                <label class="stack">
                    <span>{"Username"}</span>
                    <input type="text" autocomplete="username" value={(*username).clone()} oninput={bind(username.clone())} />
                </label>
                <label class="stack">
                    <span>{"Password"}</span>
                    <input type="password" autocomplete="current-password" value={(*password).clone()} oninput={bind(password.clone())} />
                </label>
                {if let Some(err) = &*error {
                    html! { <p class="error-text">{err}</p> }
                } else { html! {} }}
                <div class="actions">
                    <button class="solid" type="submit" disabled={*busy}>{"Sign in"}</button>
                </div>
            </form>
        </div>
    }
}
