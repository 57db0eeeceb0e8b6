use gloo::timers::callback::Timeout;
use std::rc::Rc;
use yew::prelude::*;

/// Toasts auto-dismiss after this many milliseconds.
const TOAST_TTL_MS: u32 = 4000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Toast {
    pub id: u64,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ToastList {
    next_id: u64,
    pub items: Vec<Toast>,
}

pub(crate) enum ToastAction {
    Push(String),
    Dismiss(u64),
}

impl Reducible for ToastList {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            ToastAction::Push(message) => {
                next.next_id += 1;
                next.items.push(Toast {
                    id: next.next_id,
                    message,
                });
            }
            ToastAction::Dismiss(id) => next.items.retain(|toast| toast.id != id),
        }
        Rc::new(next)
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct ToastHostProps {
    pub toasts: Vec<Toast>,
    pub on_dismiss: Callback<u64>,
}

#[function_component(ToastHost)]
pub(crate) fn toast_host(props: &ToastHostProps) -> Html {
    {
        let on_dismiss = props.on_dismiss.clone();
        use_effect_with_deps(
            move |list: &Vec<Toast>| {
                let handles: Vec<Timeout> = list
                    .iter()
                    .map(|toast| {
                        let on_dismiss = on_dismiss.clone();
                        let id = toast.id;
                        Timeout::new(TOAST_TTL_MS, move || on_dismiss.emit(id))
                    })
                    .collect();
                move || drop(handles)
            },
            props.toasts.clone(),
        );
    }

    html! {
        <div class="toast-host" aria-live="polite" aria-atomic="true">
            {for props.toasts.iter().map(|toast| {
                let id = toast.id;
                let on_close = {
                    let on_dismiss = props.on_dismiss.clone();
                    Callback::from(move |_| on_dismiss.emit(id))
                };
                html! {
                    <div class="toast error" role="status">
                        <span>{toast.message.clone()}</span>
                        <button class="ghost" aria-label="Dismiss" onclick={on_close}>{"✕"}</button>
                    </div>
                }
            })}
        </div>
    }
}
