use std::rc::Rc;

use common::{LocationQuery, PredefinedLocation};
use compute::view::{LocationView, WeatherRow};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::weather_card::WeatherCard;

/// Everything the location panel renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationPanel {
    pub latitude: String,
    pub longitude: String,
    pub address: Option<String>,
    pub weather: Option<Vec<WeatherRow>>,
    pub error: Option<String>,
    pub locating: bool,
    pub entries: Vec<&'static PredefinedLocation>,
    pub selected: Option<&'static str>,
}

pub enum LocationAction {
    Coordinates(LocationQuery),
    Latitude(String),
    Longitude(String),
    Address(String),
    Weather(Vec<WeatherRow>),
    Error(String),
    Locating(bool),
    Predefined(Vec<&'static PredefinedLocation>, Option<&'static str>),
}

impl Reducible for LocationPanel {
    type Action = LocationAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();

        match action {
            LocationAction::Coordinates(location) => {
                next.latitude = location.latitude.to_string();
                next.longitude = location.longitude.to_string();
                next.address = None;
                next.error = None;
            }
            LocationAction::Latitude(text) => {
                next.latitude = text;
                next.selected = None;
                next.error = None;
            }
            LocationAction::Longitude(text) => {
                next.longitude = text;
                next.selected = None;
                next.error = None;
            }
            LocationAction::Address(address) => next.address = Some(address),
            LocationAction::Weather(rows) => next.weather = Some(rows),
            LocationAction::Error(message) => next.error = Some(message),
            LocationAction::Locating(busy) => next.locating = busy,
            LocationAction::Predefined(entries, selected) => {
                next.entries = entries;
                next.selected = selected;
            }
        }
        next.into()
    }
}

/// `LocationView` that feeds the panel's reducer.
pub struct PickerView {
    dispatch: UseReducerDispatcher<LocationPanel>,
}

impl PickerView {
    pub fn new(dispatch: UseReducerDispatcher<LocationPanel>) -> Self {
        Self { dispatch }
    }
}

impl LocationView for PickerView {
    fn set_coordinates(&mut self, location: LocationQuery) {
        self.dispatch.dispatch(LocationAction::Coordinates(location));
    }

    fn show_weather(&mut self, rows: &[WeatherRow]) {
        self.dispatch.dispatch(LocationAction::Weather(rows.to_vec()));
    }

    fn show_location_error(&mut self, message: &str) {
        self.dispatch.dispatch(LocationAction::Error(message.to_string()));
    }

    fn set_locating(&mut self, busy: bool) {
        self.dispatch.dispatch(LocationAction::Locating(busy));
    }

    fn show_predefined(&mut self, entries: &[&'static PredefinedLocation], selected: Option<&'static str>) {
        self.dispatch.dispatch(LocationAction::Predefined(entries.to_vec(), selected));
    }

    fn show_address(&mut self, address: &str) {
        self.dispatch.dispatch(LocationAction::Address(address.to_string()));
    }
}

fn input_value(e: &InputEvent) -> String {
    e.target_unchecked_into::<HtmlInputElement>().value()
}

#[derive(Properties, PartialEq)]
pub struct Props {
    pub panel: Rc<LocationPanel>,
    pub on_search: Callback<String>,
    pub on_filter: Callback<String>,
    pub on_select: Callback<&'static str>,
    pub on_locate: Callback<()>,
    pub on_latitude: Callback<String>,
    pub on_longitude: Callback<String>,
}

#[function_component(LocationPicker)]
pub fn location_picker(props: &Props) -> Html {
    let query = use_state(String::new);
    let panel = &props.panel;

    let on_query = {
        let query = query.clone();
        Callback::from(move |e: InputEvent| query.set(input_value(&e)))
    };

    let on_search = {
        let query = query.clone();
        let on_search = props.on_search.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_search.emit((*query).clone());
        })
    };

    let on_filter = props.on_filter.reform(|e: InputEvent| input_value(&e));
    let on_latitude = props.on_latitude.reform(|e: InputEvent| input_value(&e));
    let on_longitude = props.on_longitude.reform(|e: InputEvent| input_value(&e));
    let on_locate = props.on_locate.reform(|_: MouseEvent| ());

    html! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <h2 class="card-title"><i class="fas fa-map-marker-alt"></i>{" Location"}</h2>

                <form class="join w-full" onsubmit={on_search}>
                    <input class="input input-bordered join-item flex-1" placeholder="Search a place..."
                        value={(*query).clone()} oninput={on_query} />
                    <button class="btn btn-primary join-item" type="submit"><i class="fas fa-search"></i></button>
                </form>
                {if let Some(address) = &panel.address {
                    html! { <p class="text-sm opacity-70">{address}</p> }
                } else {
                    html! {}
                }}

                <div class="grid grid-cols-2 gap-2 mt-2">
                    <label class="form-control">
                        <span class="label-text">{"Latitude"}</span>
                        <input class="input input-bordered input-sm" id="latitude" value={panel.latitude.clone()} oninput={on_latitude} />
                    </label>
                    <label class="form-control">
                        <span class="label-text">{"Longitude"}</span>
                        <input class="input input-bordered input-sm" id="longitude" value={panel.longitude.clone()} oninput={on_longitude} />
                    </label>
                </div>

                <button class="btn btn-outline btn-sm mt-2" disabled={panel.locating} onclick={on_locate}>
                    {if panel.locating {
                        html! { <><span class="loading loading-spinner loading-xs"></span>{" Locating..."}</> }
                    } else {
                        html! { <><i class="fas fa-location-arrow"></i>{" Use my location"}</> }
                    }}
                </button>

                {if let Some(error) = &panel.error {
                    html! { <div class="alert alert-warning text-sm mt-2">{error}</div> }
                } else {
                    html! {}
                }}

                <div class="divider text-xs">{"Predefined locations"}</div>
                <input class="input input-bordered input-sm" placeholder="Filter cities..." oninput={on_filter} />
                <ul class="menu menu-sm bg-base-200 rounded-box max-h-60 overflow-y-auto mt-2 flex-nowrap">
                    {for panel.entries.iter().map(|entry| {
                        let name = entry.name;
                        let on_select = props.on_select.reform(move |_: MouseEvent| name);
                        let active = panel.selected == Some(name);
                        html! {
                            <li key={name}>
                                <a class={classes!(active.then_some("active"))} onclick={on_select}>
                                    <span class="flex-1">{name}</span>
                                    <span class="text-xs opacity-60">{entry.country}</span>
                                </a>
                            </li>
                        }
                    })}
                </ul>

                {if let Some(rows) = &panel.weather {
                    html! { <WeatherCard rows={rows.clone()} /> }
                } else {
                    html! {}
                }}
            </div>
        </div>
    }
}
