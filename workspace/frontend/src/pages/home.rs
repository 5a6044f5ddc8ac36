use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::router::Route;
use crate::settings;
use crate::ui::toast::ToastContext;

#[function_component(Home)]
pub fn home() -> Html {
    let toasts = use_context::<ToastContext>();
    let api_base = use_state(|| settings::get_settings().api_base);

    let on_input = {
        let api_base = api_base.clone();
        Callback::from(move |e: InputEvent| {
            api_base.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };

    let on_save = {
        let api_base = api_base.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let base = api_base.trim().trim_end_matches('/').to_string();
            settings::update_settings(|s| s.api_base = base.clone());
            let saved = settings::get_settings().save_to_storage();
            if let Some(toasts) = &toasts {
                match saved {
                    Ok(()) => toasts.show_success("Settings saved"),
                    Err(e) => toasts.show_error(format!("Failed to save settings: {:?}", e)),
                }
            }
            log::info!("API base set to '{}'", base);
        })
    };

    html! {
        <div class="hero min-h-[70vh]">
            <div class="hero-content text-center">
                <div class="max-w-lg">
                    <h1 class="text-5xl font-bold">{"SolarCast"}</h1>
                    <p class="py-6">
                        {"Predict the output of your solar panels from live weather data, "}
                        {"find the optimal tilt and azimuth, and explore generation analytics."}
                    </p>
                    <div class="flex gap-4 justify-center">
                        <Link<Route> to={Route::Predict} classes="btn btn-primary">{"Make a Prediction"}</Link<Route>>
                        <Link<Route> to={Route::Analytics} classes="btn btn-outline">{"View Analytics"}</Link<Route>>
                    </div>

                    <form class="join mt-10 w-full" onsubmit={on_save}>
                        <input class="input input-bordered input-sm join-item flex-1" placeholder="Backend URL (blank = same origin)"
                            value={(*api_base).clone()} oninput={on_input} />
                        <button class="btn btn-sm join-item" type="submit">{"Save"}</button>
                    </form>
                </div>
            </div>
        </div>
    }
}
