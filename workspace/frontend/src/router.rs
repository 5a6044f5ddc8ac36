use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::layout::Layout;
use crate::pages::analytics::AnalyticsPage;
use crate::pages::home::Home;
use crate::pages::predict::PredictPage;

#[derive(Debug, Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/predict")]
    Predict,
    #[at("/analytics")]
    Analytics,
    #[not_found]
    #[at("/404")]
    NotFound,
}

pub fn switch(routes: Route) -> Html {
    log::debug!("Routing to: {:?}", routes);
    match routes {
        Route::Home => {
            log::trace!("Rendering Home page");
            html! { <Layout title="Home"><Home /></Layout> }
        }
        Route::Predict => {
            log::trace!("Rendering Predict page");
            html! { <PredictPage /> }
        }
        Route::Analytics => {
            log::trace!("Rendering Analytics page");
            html! { <AnalyticsPage /> }
        }
        Route::NotFound => {
            log::warn!("404 - Route not found");
            html! { <Layout title="404"><h1>{"404 Not Found"}</h1></Layout> }
        }
    }
}
