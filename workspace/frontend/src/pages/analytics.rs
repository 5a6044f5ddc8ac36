use std::cell::RefCell;
use std::rc::Rc;

use chrono::Local;
use common::HistoricalRecord;
use compute::analytics::{ChartPeriod, HeadlineMetric};
use compute::charts::PlotSpec;
use compute::controller::analytics::REFRESH_DELAY;
use compute::metrics::CounterAnimation;
use compute::view::{AnalyticsView, Notification};
use compute::AnalyticsController;
use gloo_timers::callback::Timeout;
use rand::rngs::StdRng;
use rand::SeedableRng;
use yew::prelude::*;

use crate::browser;
use crate::components::chart::PlotlyChart;
use crate::components::counters::CounterRow;
use crate::components::layout::Layout;
use crate::ui::loading::LoadingSpinner;
use crate::ui::toast::ToastContext;

type Controller = Rc<RefCell<Option<AnalyticsController<DashboardView, StdRng>>>>;

const PERIODS: [(ChartPeriod, &str); 4] = [
    (ChartPeriod::Trailing, "30 Days"),
    (ChartPeriod::Daily, "Daily"),
    (ChartPeriod::Weekly, "Weekly"),
    (ChartPeriod::Monthly, "Monthly"),
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dashboard {
    pub period: ChartPeriod,
    pub trend: Option<Rc<PlotSpec>>,
    pub weather: Option<Rc<PlotSpec>>,
    pub comparison: Option<Rc<PlotSpec>>,
    pub table: Vec<HistoricalRecord>,
    pub headline: Vec<HeadlineMetric>,
    pub refreshing: bool,
    pub exporting: bool,
}

pub enum DashboardAction {
    Trend(ChartPeriod, PlotSpec),
    Weather(PlotSpec),
    Comparison(PlotSpec),
    Table(Vec<HistoricalRecord>),
    Headline(Vec<HeadlineMetric>),
    Refreshing(bool),
    Exporting(bool),
}

impl Reducible for Dashboard {
    type Action = DashboardAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            DashboardAction::Trend(period, chart) => {
                next.period = period;
                next.trend = Some(Rc::new(chart));
            }
            DashboardAction::Weather(chart) => next.weather = Some(Rc::new(chart)),
            DashboardAction::Comparison(chart) => next.comparison = Some(Rc::new(chart)),
            DashboardAction::Table(rows) => next.table = rows,
            DashboardAction::Headline(metrics) => next.headline = metrics,
            DashboardAction::Refreshing(busy) => next.refreshing = busy,
            DashboardAction::Exporting(busy) => next.exporting = busy,
        }
        next.into()
    }
}

/// `AnalyticsView` feeding the dashboard reducer and the toast stack.
pub struct DashboardView {
    dispatch: UseReducerDispatcher<Dashboard>,
    toasts: Option<ToastContext>,
}

impl AnalyticsView for DashboardView {
    fn render_trend(&mut self, period: ChartPeriod, chart: &PlotSpec) {
        self.dispatch.dispatch(DashboardAction::Trend(period, chart.clone()));
    }

    fn render_weather_distribution(&mut self, chart: &PlotSpec) {
        self.dispatch.dispatch(DashboardAction::Weather(chart.clone()));
    }

    fn render_comparison(&mut self, chart: &PlotSpec) {
        self.dispatch.dispatch(DashboardAction::Comparison(chart.clone()));
    }

    fn render_table(&mut self, rows: &[&HistoricalRecord]) {
        let rows = rows.iter().map(|r| (*r).clone()).collect();
        self.dispatch.dispatch(DashboardAction::Table(rows));
    }

    fn render_headline(&mut self, metrics: &[HeadlineMetric]) {
        self.dispatch.dispatch(DashboardAction::Headline(metrics.to_vec()));
    }

    fn set_refreshing(&mut self, busy: bool) {
        self.dispatch.dispatch(DashboardAction::Refreshing(busy));
    }

    fn set_exporting(&mut self, busy: bool) {
        self.dispatch.dispatch(DashboardAction::Exporting(busy));
    }

    fn notify(&mut self, notification: Notification) {
        match &self.toasts {
            Some(toasts) => toasts.notify(notification),
            None => log::warn!("No toast context for: {}", notification.message),
        }
    }

    fn offer_file(&mut self, filename: &str, mime: &str, contents: &str) -> Result<(), String> {
        browser::download_text(filename, mime, contents)
    }
}

#[function_component(AnalyticsPage)]
pub fn analytics_page() -> Html {
    let dashboard = use_reducer(Dashboard::default);
    let toasts = use_context::<ToastContext>();
    let controller: Controller = use_mut_ref(|| None);

    {
        let controller = controller.clone();
        let dispatch = dashboard.dispatcher();
        use_effect_with((), move |_| {
            log::debug!("Generating analytics data");
            let view = DashboardView { dispatch, toasts };
            let rng = StdRng::from_entropy();
            *controller.borrow_mut() = Some(AnalyticsController::new(view, rng, Local::now().date_naive()));
            || ()
        });
    }

    let on_period = {
        let controller = controller.clone();
        Callback::from(move |period: ChartPeriod| {
            if let Some(c) = controller.borrow_mut().as_mut() {
                c.set_period(period);
            }
        })
    };

    let on_refresh = {
        let controller = controller.clone();
        Callback::from(move |_: MouseEvent| {
            let started = controller.borrow_mut().as_mut().is_some_and(|c| c.begin_refresh());
            if !started {
                return;
            }
            let controller = controller.clone();
            Timeout::new(REFRESH_DELAY.as_millis() as u32, move || {
                if let Some(c) = controller.borrow_mut().as_mut() {
                    c.complete_refresh(Local::now().date_naive());
                }
            })
            .forget();
        })
    };

    let on_export = {
        let controller = controller.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(c) = controller.borrow_mut().as_mut() {
                if let Err(e) = c.export_all() {
                    log::debug!("Analytics export ended with error: {}", e);
                }
            }
        })
    };

    let counters: Vec<CounterAnimation> = dashboard
        .headline
        .iter()
        .map(|m| CounterAnimation::new(m.label, m.value, m.percentage))
        .collect();

    let chart_card = |title: &'static str, spec: &Option<Rc<PlotSpec>>| {
        html! {
            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <h3 class="card-title text-base">{title}</h3>
                    {match spec {
                        Some(spec) => html! { <PlotlyChart spec={spec.clone()} style="height:320px;" /> },
                        None => html! { <LoadingSpinner /> },
                    }}
                </div>
            </div>
        }
    };

    html! {
        <Layout title="Analytics">
            <div class="flex flex-col gap-6">
                <div class="flex flex-wrap gap-2 justify-between items-center">
                    <div class="join">
                        {for PERIODS.iter().map(|(period, label)| {
                            let period = *period;
                            let onclick = on_period.reform(move |_: MouseEvent| period);
                            let active = dashboard.period == period;
                            html! {
                                <button class={classes!("btn", "btn-sm", "join-item", active.then_some("btn-active"))} {onclick}>
                                    {*label}
                                </button>
                            }
                        })}
                    </div>
                    <div class="flex gap-2">
                        <button class="btn btn-sm btn-outline" disabled={dashboard.refreshing} onclick={on_refresh}>
                            {if dashboard.refreshing {
                                html! { <><span class="loading loading-spinner loading-xs"></span>{" Refreshing..."}</> }
                            } else {
                                html! { <><i class="fas fa-sync-alt"></i>{" Refresh"}</> }
                            }}
                        </button>
                        <button class="btn btn-sm btn-primary" disabled={dashboard.exporting} onclick={on_export}>
                            <i class="fas fa-download"></i>{" Export CSV"}
                        </button>
                    </div>
                </div>

                <CounterRow {counters} />

                {chart_card("Energy Generation", &dashboard.trend)}

                <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
                    {chart_card("Weather Distribution", &dashboard.weather)}
                    {chart_card("Current vs Optimal", &dashboard.comparison)}
                </div>

                <div class="card bg-base-100 shadow">
                    <div class="card-body">
                        <h3 class="card-title text-base">{"Recent Days"}</h3>
                        <table class="table table-sm">
                            <thead>
                                <tr>
                                    <th>{"Date"}</th>
                                    <th>{"Generation (kWh)"}</th>
                                    <th>{"Peak Power (kW)"}</th>
                                    <th>{"Efficiency (%)"}</th>
                                    <th>{"Weather"}</th>
                                </tr>
                            </thead>
                            <tbody>
                                {for dashboard.table.iter().map(|record| html! {
                                    <tr key={record.date.to_string()}>
                                        <td>{record.date.format("%Y-%m-%d").to_string()}</td>
                                        <td>{format!("{:.1}", record.generation_kwh)}</td>
                                        <td>{format!("{:.1}", record.peak_power_kw)}</td>
                                        <td>{format!("{:.1}", record.efficiency_pct)}</td>
                                        <td>
                                            <span class={classes!("badge", format!("badge-{}", record.weather.badge_class()))}>
                                                {record.weather.label()}
                                            </span>
                                        </td>
                                    </tr>
                                })}
                            </tbody>
                        </table>
                    </div>
                </div>
            </div>
        </Layout>
    }
}
