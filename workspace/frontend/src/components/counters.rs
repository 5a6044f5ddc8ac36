use std::time::Duration;

use compute::metrics::CounterAnimation;
use gloo_timers::callback::Interval;
use yew::prelude::*;

const FRAME_MS: u32 = 16;

#[derive(Properties, PartialEq)]
pub struct CounterProps {
    pub counter: CounterAnimation,
}

/// A stat tile whose value eases up from zero.
#[function_component(AnimatedCounter)]
pub fn animated_counter(props: &CounterProps) -> Html {
    let elapsed = use_state(|| Duration::ZERO);

    {
        let elapsed = elapsed.setter();
        use_effect_with(props.counter.clone(), move |counter| {
            let started = js_sys::Date::now();
            let duration = counter.duration;
            elapsed.set(Duration::ZERO);
            let interval = Interval::new(FRAME_MS, move || {
                let now = Duration::from_secs_f64((js_sys::Date::now() - started).max(0.0) / 1000.0);
                elapsed.set(now.min(duration));
            });
            move || drop(interval)
        });
    }

    let counter = &props.counter;
    let text = if counter.is_finished(*elapsed) {
        counter.final_text()
    } else {
        counter.text_at(*elapsed)
    };

    html! {
        <div class="stat">
            <div class="stat-title">{counter.label}</div>
            <div class="stat-value text-primary">{text}</div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct CounterRowProps {
    pub counters: Vec<CounterAnimation>,
}

#[function_component(CounterRow)]
pub fn counter_row(props: &CounterRowProps) -> Html {
    html! {
        <div class="stats stats-vertical lg:stats-horizontal shadow bg-base-100 w-full">
            {for props.counters.iter().map(|counter| html! {
                <AnimatedCounter key={counter.label} counter={counter.clone()} />
            })}
        </div>
    }
}
