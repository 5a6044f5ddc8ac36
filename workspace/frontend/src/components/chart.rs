use std::rc::Rc;

use compute::charts::PlotSpec;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;
use yew::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Plotly, js_name = newPlot)]
    fn new_plot(element: &HtmlElement, data: JsValue, layout: JsValue, config: JsValue);
}

fn to_js(value: &serde_json::Value) -> Option<JsValue> {
    let json = serde_json::to_string(value).ok()?;
    js_sys::JSON::parse(&json).ok()
}

#[derive(Properties, PartialEq)]
pub struct Props {
    pub spec: Rc<PlotSpec>,
    #[prop_or(AttrValue::Static("height:400px;"))]
    pub style: AttrValue,
}

/// Renders a figure into its own container whenever the spec changes.
#[function_component(PlotlyChart)]
pub fn plotly_chart(props: &Props) -> Html {
    let container_ref = use_node_ref();

    use_effect_with((container_ref.clone(), props.spec.clone()), |(container_ref, spec)| {
        if let Some(element) = container_ref.cast::<HtmlElement>() {
            match (to_js(&spec.data), to_js(&spec.layout), to_js(&spec.config)) {
                (Some(data), Some(layout), Some(config)) => {
                    log::trace!("Plotting {:?}", spec.title());
                    new_plot(&element, data, layout, config);
                }
                _ => log::error!("Failed to convert chart spec {:?}", spec.title()),
            }
        }
        || ()
    });

    html! {
        <div ref={container_ref} style={props.style.clone()}></div>
    }
}
