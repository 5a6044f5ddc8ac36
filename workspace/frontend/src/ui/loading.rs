use std::time::Duration;

use compute::metrics::{active_loading_steps, LOADING_STEPS, LOADING_STEP_INTERVAL};
use gloo_timers::callback::Interval;
use yew::prelude::*;

/// Busy panel of the prediction page: the four steps light up one per second.
#[function_component(LoadingSteps)]
pub fn loading_steps() -> Html {
    let elapsed = use_state(|| Duration::ZERO);

    {
        let elapsed = elapsed.setter();
        use_effect_with((), move |_| {
            let ticks = std::cell::Cell::new(0u32);
            let interval = Interval::new(LOADING_STEP_INTERVAL.as_millis() as u32, move || {
                ticks.set(ticks.get() + 1);
                elapsed.set(LOADING_STEP_INTERVAL * ticks.get());
            });
            move || drop(interval)
        });
    }

    let active = active_loading_steps(*elapsed);

    html! {
        <div class="flex flex-col items-center py-12 gap-4">
            <span class="loading loading-spinner loading-lg"></span>
            <ul class="steps steps-vertical">
                {for LOADING_STEPS.iter().enumerate().map(|(i, step)| {
                    let class = if i < active { classes!("step", "step-primary") } else { classes!("step") };
                    html! { <li class={class}>{*step}</li> }
                })}
            </ul>
        </div>
    }
}

/// Centered loading spinner without text
#[function_component(LoadingSpinner)]
pub fn loading_spinner() -> Html {
    html! {
        <div class="flex justify-center items-center py-12">
            <span class="loading loading-spinner loading-lg"></span>
        </div>
    }
}
