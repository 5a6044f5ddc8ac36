use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ErrorDisplayProps {
    pub message: String,
    #[prop_or_default]
    pub on_dismiss: Option<Callback<()>>,
}

#[function_component(ErrorDisplay)]
pub fn error_display(props: &ErrorDisplayProps) -> Html {
    log::warn!("Displaying error to user: {}", props.message);

    html! {
        <div class="alert alert-error my-4">
            <i class="fas fa-exclamation-circle text-2xl"></i>
            <span class="flex-1">{&props.message}</span>
            {if let Some(on_dismiss) = &props.on_dismiss {
                let on_dismiss = on_dismiss.clone();
                html! {
                    <button
                        class="btn btn-sm btn-ghost"
                        onclick={Callback::from(move |_| {
                            log::debug!("User dismissed error");
                            on_dismiss.emit(());
                        })}
                    >
                        <i class="fas fa-times"></i>
                    </button>
                }
            } else {
                html! {}
            }}
        </div>
    }
}
