use compute::controller::analytics::NOTIFICATION_TIMEOUT;
use compute::view::{Notification, NotificationLevel};
use yew::prelude::*;

fn alert_class(level: NotificationLevel) -> &'static str {
    match level {
        NotificationLevel::Info => "alert-info",
        NotificationLevel::Success => "alert-success",
        NotificationLevel::Error => "alert-error",
    }
}

fn icon(level: NotificationLevel) -> &'static str {
    match level {
        NotificationLevel::Info => "fas fa-info-circle",
        NotificationLevel::Success => "fas fa-check-circle",
        NotificationLevel::Error => "fas fa-exclamation-circle",
    }
}

#[derive(Clone, PartialEq)]
pub struct Toast {
    pub id: usize,
    pub notification: Notification,
}

#[derive(Clone, PartialEq)]
pub struct ToastContext {
    pub add_toast: Callback<Notification>,
    pub remove_toast: Callback<usize>,
}

impl ToastContext {
    pub fn notify(&self, notification: Notification) {
        self.add_toast.emit(notification);
    }

    pub fn show_success(&self, message: impl Into<String>) {
        self.notify(Notification::success(message));
    }

    pub fn show_error(&self, message: impl Into<String>) {
        self.notify(Notification::error(message));
    }
}

enum ToastAction {
    Add(usize, Notification),
    Remove(usize),
}

#[derive(Default, PartialEq)]
struct ToastList {
    toasts: Vec<Toast>,
}

impl Reducible for ToastList {
    type Action = ToastAction;

    fn reduce(self: std::rc::Rc<Self>, action: Self::Action) -> std::rc::Rc<Self> {
        let mut toasts = self.toasts.clone();
        match action {
            ToastAction::Add(id, notification) => toasts.push(Toast { id, notification }),
            ToastAction::Remove(id) => toasts.retain(|t| t.id != id),
        }
        ToastList { toasts }.into()
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastProviderProps {
    pub children: Children,
}

#[function_component(ToastProvider)]
pub fn toast_provider(props: &ToastProviderProps) -> Html {
    let list = use_reducer(ToastList::default);
    let next_id = use_mut_ref(|| 0usize);

    let add_toast = {
        let dispatcher = list.dispatcher();
        Callback::from(move |notification: Notification| {
            let id = {
                let mut next = next_id.borrow_mut();
                *next += 1;
                *next
            };
            log::debug!("Toast {}: {}", id, notification.message);
            dispatcher.dispatch(ToastAction::Add(id, notification));

            // Auto-dismiss
            let dispatcher = dispatcher.clone();
            let timeout_ms = NOTIFICATION_TIMEOUT.as_millis() as u32;
            gloo_timers::callback::Timeout::new(timeout_ms, move || {
                dispatcher.dispatch(ToastAction::Remove(id));
            })
            .forget();
        })
    };

    let remove_toast = {
        let dispatcher = list.dispatcher();
        Callback::from(move |id: usize| dispatcher.dispatch(ToastAction::Remove(id)))
    };

    let context = ToastContext {
        add_toast,
        remove_toast: remove_toast.clone(),
    };

    html! {
        <ContextProvider<ToastContext> context={context}>
            {props.children.clone()}
            <div class="toast toast-top toast-end z-50">
                {for list.toasts.iter().map(|toast| {
                    let id = toast.id;
                    let level = toast.notification.level;
                    let on_close = {
                        let remove_toast = remove_toast.clone();
                        Callback::from(move |_| remove_toast.emit(id))
                    };

                    html! {
                        <div key={id} class={classes!("alert", alert_class(level), "shadow-lg")}>
                            <i class={icon(level)}></i>
                            <span>{&toast.notification.message}</span>
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
