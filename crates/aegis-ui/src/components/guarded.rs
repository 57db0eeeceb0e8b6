use crate::core::config::ClientConfig;
use crate::core::context::SessionCtx;
use crate::core::guard::GuardDecision;
use crate::core::session::Navigator;
use crate::services::navigator::HashNavigator;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct GuardedProps {
    pub children: Children,
}

/// Renders its children only when the navigation guard allows the current location.
#[function_component(Guarded)]
pub(crate) fn guarded(props: &GuardedProps) -> Html {
    let ctx = use_context::<SessionCtx>();
    let location = use_location();
    let target = location.map_or_else(
        || "/".to_string(),
        |location| format!("{}{}", location.path(), location.query_str()),
    );
    let decision = match &ctx {
        Some(ctx) => ctx.check_navigation(&target),
        None => GuardDecision::Redirect(ClientConfig::default().login_path),
    };

    use_effect_with_deps(
        |decision: &GuardDecision| {
            if let GuardDecision::Redirect(to) = decision {
                HashNavigator.redirect_to(to);
            }
            || ()
        },
        decision.clone(),
    );

    match decision {
        GuardDecision::Allow => html! { <>{ for props.children.iter() }</> },
        GuardDecision::Redirect(_) => html! {},
    }
}
