use yew::prelude::*;
use yew_router::prelude::*;

use crate::router::Route;

#[derive(Properties, PartialEq)]
pub struct NavbarProps {
    pub title: AttrValue,
}

#[function_component(Navbar)]
pub fn navbar(props: &NavbarProps) -> Html {
    html! {
        <div class="navbar bg-base-100 shadow-sm z-40 sticky top-0">
            <div class="flex-1 px-4 gap-3">
                <Link<Route> to={Route::Home} classes="btn btn-ghost text-xl">
                    <i class="fas fa-solar-panel text-warning"></i>
                    {"SolarCast"}
                </Link<Route>>
                <span class="text-lg font-semibold opacity-70" id="page-title">{&props.title}</span>
            </div>
            <ul class="menu menu-horizontal px-1">
                <li><Link<Route> to={Route::Home}><i class="fas fa-home"></i>{" Home"}</Link<Route>></li>
                <li><Link<Route> to={Route::Predict}><i class="fas fa-bolt"></i>{" Predict"}</Link<Route>></li>
                <li><Link<Route> to={Route::Analytics}><i class="fas fa-chart-line"></i>{" Analytics"}</Link<Route>></li>
            </ul>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct Props {
    pub children: Children,
    pub title: AttrValue,
}

#[function_component(Layout)]
pub fn layout(props: &Props) -> Html {
    html! {
        <div class="flex flex-col min-h-screen bg-base-200">
            <Navbar title={props.title.clone()} />
            <main class="flex-1 p-6 max-w-7xl w-full mx-auto">
                { for props.children.iter() }
            </main>
        </div>
    }
}
