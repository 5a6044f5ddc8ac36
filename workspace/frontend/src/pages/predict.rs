use std::cell::RefCell;
use std::rc::Rc;

use common::{LocationQuery, PredictionType, ReportFormat};
use compute::validation::PredictionForm;
use compute::view::{PredictionView, ReportDownload, ResultsViewModel};
use compute::{LocationHelper, PredictionController, SolarApi};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::api_client::BrowserApi;
use crate::browser;
use crate::components::layout::Layout;
use crate::components::location_picker::{LocationAction, LocationPanel, LocationPicker, PickerView};
use crate::components::results::PredictionResults;
use crate::settings;
use crate::ui::error::ErrorDisplay;
use crate::ui::loading::LoadingSteps;

type Controller = Rc<RefCell<PredictionController<PageView>>>;
type Helper = Rc<RefCell<LocationHelper<PickerView>>>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredictPanel {
    pub loading: bool,
    pub results: Option<Rc<ResultsViewModel>>,
    pub error: Option<String>,
    pub export_error: Option<String>,
}

pub enum PredictAction {
    Loading,
    Results(Rc<ResultsViewModel>),
    Error(String),
    Clear,
    ExportError(Option<String>),
}

impl Reducible for PredictPanel {
    type Action = PredictAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let next = match action {
            PredictAction::Loading => PredictPanel { loading: true, ..Default::default() },
            PredictAction::Results(results) => PredictPanel { results: Some(results), ..Default::default() },
            PredictAction::Error(message) => PredictPanel { error: Some(message), ..Default::default() },
            PredictAction::Clear => PredictPanel::default(),
            PredictAction::ExportError(message) => PredictPanel { export_error: message, ..(*self).clone() },
        };
        next.into()
    }
}

/// `PredictionView` feeding the page reducer. Report downloads go straight
/// to the browser.
pub struct PageView {
    dispatch: UseReducerDispatcher<PredictPanel>,
}

impl PredictionView for PageView {
    fn show_loading(&mut self) {
        self.dispatch.dispatch(PredictAction::Loading);
    }

    fn show_results(&mut self, results: &ResultsViewModel) {
        self.dispatch.dispatch(PredictAction::Results(Rc::new(results.clone())));
    }

    fn show_error(&mut self, message: &str) {
        self.dispatch.dispatch(PredictAction::Error(message.to_string()));
    }

    fn clear(&mut self) {
        self.dispatch.dispatch(PredictAction::Clear);
    }

    fn show_export_error(&mut self, message: &str) {
        self.dispatch.dispatch(PredictAction::ExportError(Some(message.to_string())));
    }

    fn offer_report(&mut self, download: &ReportDownload) {
        let url = settings::get_settings().resolve(&download.url);
        match browser::download_url(&url, &download.filename) {
            Ok(()) => self.dispatch.dispatch(PredictAction::ExportError(None)),
            Err(e) => {
                log::error!("Report download failed: {}", e);
                self.dispatch.dispatch(PredictAction::ExportError(Some(e)));
            }
        }
    }
}

/// Fetches weather for `location` without holding the helper across the await.
fn refresh_weather(helper: Helper, location: LocationQuery) {
    spawn_local(async move {
        let outcome = BrowserApi::new().weather(location).await;
        helper.borrow_mut().complete_weather(location, outcome);
    });
}

fn input_value(e: &InputEvent) -> String {
    e.target_unchecked_into::<HtmlInputElement>().value()
}

#[function_component(PredictPage)]
pub fn predict_page() -> Html {
    let panel = use_reducer(PredictPanel::default);
    let location_panel = use_reducer(LocationPanel::default);
    let form = use_state(PredictionForm::with_defaults);

    let controller: Controller = {
        let dispatch = panel.dispatcher();
        use_mut_ref(move || PredictionController::new(PageView { dispatch }))
    };
    let helper: Helper = {
        let dispatch = location_panel.dispatcher();
        use_mut_ref(move || LocationHelper::new(PickerView::new(dispatch)))
    };

    {
        let helper = helper.clone();
        use_effect_with((), move |_| {
            helper.borrow_mut().filter_predefined("");
            || ()
        });
    }

    // ---- location panel ----

    let on_search = {
        let helper = helper.clone();
        Callback::from(move |text: String| {
            let Ok(query) = helper.borrow_mut().begin_search(&text) else {
                return;
            };
            let helper = helper.clone();
            spawn_local(async move {
                let outcome = BrowserApi::new().geocode(&query).await;
                let resolved = helper.borrow_mut().complete_search(outcome);
                if let Ok(location) = resolved {
                    refresh_weather(helper, location);
                }
            });
        })
    };

    let on_filter = {
        let helper = helper.clone();
        Callback::from(move |term: String| {
            helper.borrow_mut().filter_predefined(&term);
        })
    };

    let on_select = {
        let helper = helper.clone();
        Callback::from(move |name: &'static str| {
            let selected = helper.borrow_mut().select_predefined(name);
            if let Ok(location) = selected {
                refresh_weather(helper.clone(), location);
            }
        })
    };

    let on_locate = {
        let helper = helper.clone();
        Callback::from(move |_: ()| {
            helper.borrow_mut().begin_locate();
            let helper = helper.clone();
            spawn_local(async move {
                let position = browser::current_position().await;
                let located = helper.borrow_mut().complete_locate(position);
                if let Ok(location) = located {
                    refresh_weather(helper, location);
                }
            });
        })
    };

    let on_latitude = {
        let helper = helper.clone();
        let dispatch = location_panel.dispatcher();
        Callback::from(move |text: String| {
            let due = helper.borrow_mut().set_latitude_text(&text);
            dispatch.dispatch(LocationAction::Latitude(text));
            if let Some(location) = due {
                refresh_weather(helper.clone(), location);
            }
        })
    };

    let on_longitude = {
        let helper = helper.clone();
        let dispatch = location_panel.dispatcher();
        Callback::from(move |text: String| {
            let due = helper.borrow_mut().set_longitude_text(&text);
            dispatch.dispatch(LocationAction::Longitude(text));
            if let Some(location) = due {
                refresh_weather(helper.clone(), location);
            }
        })
    };

    // ---- prediction form ----

    let set_field = |update: fn(&mut PredictionForm, String)| {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let mut next = (*form).clone();
            update(&mut next, input_value(&e));
            form.set(next);
        })
    };
    let on_area = set_field(|f, v| f.panel_area = v);
    let on_tilt = set_field(|f, v| f.tilt = v);
    let on_azimuth = set_field(|f, v| f.azimuth = v);

    let on_type = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let mut next = (*form).clone();
            next.prediction_type = e.target_unchecked_into::<HtmlSelectElement>().value();
            form.set(next);
        })
    };

    let on_submit = {
        let controller = controller.clone();
        let helper = helper.clone();
        let form = form.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let mut submitted = (*form).clone();
            {
                let helper = helper.borrow();
                submitted.latitude = helper.latitude_text().to_string();
                submitted.longitude = helper.longitude_text().to_string();
            }

            let Ok(pending) = controller.borrow_mut().begin_submit(&submitted) else {
                return;
            };
            let controller = controller.clone();
            spawn_local(async move {
                let outcome = BrowserApi::new().predict(&pending.request).await;
                if let Err(e) = controller.borrow_mut().complete_submit(pending, outcome) {
                    log::debug!("Prediction ended with error: {}", e);
                }
            });
        })
    };

    let on_export = {
        let controller = controller.clone();
        Callback::from(move |format: ReportFormat| {
            let Ok(request) = controller.borrow_mut().begin_export(format) else {
                return;
            };
            let controller = controller.clone();
            spawn_local(async move {
                let outcome = BrowserApi::new().report(&request).await;
                if let Err(e) = controller.borrow_mut().complete_export(format, outcome) {
                    log::debug!("Export ended with error: {}", e);
                }
            });
        })
    };

    let on_dismiss = {
        let controller = controller.clone();
        Callback::from(move |_: ()| controller.borrow_mut().dismiss())
    };

    html! {
        <Layout title="Predict">
            <div class="grid grid-cols-1 lg:grid-cols-3 gap-6">
                <div class="flex flex-col gap-4">
                    <LocationPicker
                        panel={Rc::new((*location_panel).clone())}
                        {on_search} {on_filter} {on_select} {on_locate} {on_latitude} {on_longitude}
                    />

                    <form class="card bg-base-100 shadow" onsubmit={on_submit}>
                        <div class="card-body gap-2">
                            <h2 class="card-title"><i class="fas fa-solar-panel"></i>{" Panel"}</h2>
                            <label class="form-control">
                                <span class="label-text">{"Panel area (m²)"}</span>
                                <input class="input input-bordered input-sm" type="number" step="any"
                                    value={form.panel_area.clone()} oninput={on_area} />
                            </label>
                            <label class="form-control">
                                <span class="label-text">{"Tilt (°)"}</span>
                                <input class="input input-bordered input-sm" type="number" step="any"
                                    value={form.tilt.clone()} oninput={on_tilt} />
                            </label>
                            <label class="form-control">
                                <span class="label-text">{"Azimuth (°)"}</span>
                                <input class="input input-bordered input-sm" type="number" step="any"
                                    value={form.azimuth.clone()} oninput={on_azimuth} />
                            </label>
                            <label class="form-control">
                                <span class="label-text">{"Prediction type"}</span>
                                <select class="select select-bordered select-sm" onchange={on_type}>
                                    {for PredictionType::ALL.iter().map(|t| html! {
                                        <option value={t.as_str()} selected={form.prediction_type == t.as_str()}>
                                            {t.as_str()}
                                        </option>
                                    })}
                                </select>
                            </label>
                            <button class="btn btn-primary mt-2" type="submit" disabled={panel.loading}>
                                <i class="fas fa-bolt"></i>{" Predict"}
                            </button>
                        </div>
                    </form>
                </div>

                <div class="lg:col-span-2">
                    {if panel.loading {
                        html! { <LoadingSteps /> }
                    } else if let Some(error) = &panel.error {
                        html! { <ErrorDisplay message={error.clone()} on_dismiss={Some(on_dismiss)} /> }
                    } else if let Some(results) = &panel.results {
                        html! {
                            <PredictionResults
                                results={results.clone()}
                                {on_export}
                                export_error={panel.export_error.clone()}
                            />
                        }
                    } else {
                        html! {
                            <div class="text-center py-24 opacity-60">
                                <i class="fas fa-sun text-6xl mb-4"></i>
                                <p>{"Choose a location and panel setup, then run a prediction."}</p>
                            </div>
                        }
                    }}
                </div>
            </div>
        </Layout>
    }
}
