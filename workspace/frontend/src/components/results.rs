use std::rc::Rc;

use common::ReportFormat;
use compute::view::ResultsViewModel;
use yew::prelude::*;

use crate::components::chart::PlotlyChart;
use crate::components::counters::CounterRow;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub results: Rc<ResultsViewModel>,
    pub on_export: Callback<ReportFormat>,
    #[prop_or_default]
    pub export_error: Option<String>,
}

#[function_component(PredictionResults)]
pub fn prediction_results(props: &Props) -> Html {
    let results = &props.results;
    let counters = results.summary.counters().to_vec();
    let chart = Rc::new(results.chart.clone());

    let export_button = |format: ReportFormat, icon: &'static str, label: &'static str| {
        let onclick = props.on_export.reform(move |_: MouseEvent| format);
        html! {
            <button class="btn btn-outline btn-sm" {onclick}>
                <i class={icon}></i>{label}
            </button>
        }
    };

    html! {
        <div class="flex flex-col gap-4">
            <CounterRow {counters} />

            <div class="flex gap-4 text-sm opacity-80">
                {if let Some(hour) = results.peak_hour {
                    html! { <span><i class="fas fa-sun"></i>{format!(" Peak hour: {}:00", hour)}</span> }
                } else {
                    html! {}
                }}
                {if let Some(average) = results.average_daily {
                    html! { <span><i class="fas fa-calendar-day"></i>{format!(" Average daily: {:.1} Wh", average)}</span> }
                } else {
                    html! {}
                }}
            </div>

            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <PlotlyChart spec={chart} />
                </div>
            </div>

            {if let Some(recommendation) = &results.recommendation {
                html! {
                    <div class="card bg-base-100 shadow">
                        <div class="card-body">
                            <h3 class="card-title"><i class="fas fa-lightbulb text-warning"></i>{" Recommendations"}</h3>
                            {for recommendation.lines().into_iter().map(|(title, text)| html! {
                                <div class="py-1">
                                    <h4 class="font-semibold">{title}</h4>
                                    <p class="text-sm">{text}</p>
                                </div>
                            })}
                        </div>
                    </div>
                }
            } else {
                html! {}
            }}

            <div class="flex gap-2 items-center">
                {export_button(ReportFormat::Csv, "fas fa-file-csv", " Export CSV")}
                {export_button(ReportFormat::Pdf, "fas fa-file-pdf", " Export PDF")}
                {if let Some(error) = &props.export_error {
                    html! { <span class="text-error text-sm">{error}</span> }
                } else {
                    html! {}
                }}
            </div>
        </div>
    }
}
