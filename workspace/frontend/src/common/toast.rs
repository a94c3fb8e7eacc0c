use std::rc::Rc;

use yew::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ToastKind {
    Success,
    Warning,
    Error,
}

impl ToastKind {
    fn alert_class(&self) -> &'static str {
        match self {
            ToastKind::Success => "alert-success",
            ToastKind::Warning => "alert-warning",
            ToastKind::Error => "alert-error",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            ToastKind::Success => "fas fa-check-circle",
            ToastKind::Warning => "fas fa-exclamation-triangle",
            ToastKind::Error => "fas fa-exclamation-circle",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: usize,
    pub message: String,
    pub kind: ToastKind,
}

enum ToastAction {
    Push(Toast),
    Dismiss(usize),
}

#[derive(Clone, Debug, Default, PartialEq)]
struct ToastQueue {
    toasts: Vec<Toast>,
}

impl Reducible for ToastQueue {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut queue = (*self).clone();
        match action {
            ToastAction::Push(toast) => queue.toasts.push(toast),
            ToastAction::Dismiss(id) => queue.toasts.retain(|t| t.id != id),
        }
        Rc::new(queue)
    }
}

/// Shared handle for raising toasts from any page.
#[derive(Clone, PartialEq)]
pub struct ToastContext {
    push: Callback<(String, ToastKind)>,
}

impl ToastContext {
    pub fn show_success(&self, message: String) {
        self.push.emit((message, ToastKind::Success));
    }

    pub fn show_warning(&self, message: String) {
        self.push.emit((message, ToastKind::Warning));
    }

    pub fn show_error(&self, message: String) {
        self.push.emit((message, ToastKind::Error));
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastProviderProps {
    pub children: Children,
}

#[function_component(ToastProvider)]
pub fn toast_provider(props: &ToastProviderProps) -> Html {
    let queue = use_reducer(ToastQueue::default);
    let next_id = use_mut_ref(|| 0usize);

    let push = {
        let dispatcher = queue.dispatcher();
        use_callback((), move |(message, kind): (String, ToastKind), _| {
            let id = {
                let mut next_id = next_id.borrow_mut();
                *next_id += 1;
                *next_id - 1
            };
            dispatcher.dispatch(ToastAction::Push(Toast { id, message, kind }));

            let dispatcher = dispatcher.clone();
            let duration = crate::settings::get_settings().toast_duration_ms;
            gloo_timers::callback::Timeout::new(duration, move || {
                dispatcher.dispatch(ToastAction::Dismiss(id));
            })
            .forget();
        })
    };

    html! {
        <ContextProvider<ToastContext> context={ToastContext { push }}>
            {props.children.clone()}
            <div class="toast toast-top toast-end z-50">
                {for queue.toasts.iter().map(|toast| {
                    let id = toast.id;
                    let on_close = {
                        let dispatcher = queue.dispatcher();
                        Callback::from(move |_| dispatcher.dispatch(ToastAction::Dismiss(id)))
                    };

                    html! {
                        <div key={id} class={classes!("alert", toast.kind.alert_class(), "shadow-lg")}>
                            <i class={toast.kind.icon()}></i>
                            <span>{&toast.message}</span>
                            <button class="btn btn-sm btn-ghost btn-circle" onclick={on_close}>
                                <i class="fas fa-times"></i>
                            </button>
                        </div>
                    }
                })}
            </div>
        </ContextProvider<ToastContext>>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toast(id: usize, message: &str) -> Toast {
        Toast { id, message: message.to_string(), kind: ToastKind::Success }
    }

    #[test]
    fn dismissal_removes_only_the_matching_toast() {
        let queue = Rc::new(ToastQueue::default())
            .reduce(ToastAction::Push(toast(0, "saved")))
            .reduce(ToastAction::Push(toast(1, "failed")))
            .reduce(ToastAction::Dismiss(0))
            .reduce(ToastAction::Push(toast(2, "again")));

        let ids: Vec<usize> = queue.toasts.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(queue.toasts[0].message, "failed");
    }
}
