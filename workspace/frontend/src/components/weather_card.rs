use compute::view::WeatherRow;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub rows: Vec<WeatherRow>,
}

#[function_component(WeatherCard)]
pub fn weather_card(props: &Props) -> Html {
    html! {
        <div class="card bg-base-100 shadow mt-4">
            <div class="card-body p-4">
                <h3 class="card-title text-base"><i class="fas fa-cloud-sun text-warning"></i>{" Current Weather"}</h3>
                <table class="table table-sm">
                    <tbody>
                        {for props.rows.iter().map(|row| html! {
                            <tr key={row.label}>
                                <td class="font-medium">{row.label}</td>
                                <td class="text-right">{&row.value}</td>
                            </tr>
                        })}
                    </tbody>
                </table>
            </div>
        </div>
    }
}
