//! Thin wrappers over the browser APIs the pages need: file downloads and
//! device geolocation.

use common::LocationQuery;
use js_sys::{Array, Function, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{window, Blob, BlobPropertyBag, HtmlAnchorElement, Url};

fn js_error(value: JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// Triggers a download of `url` through a temporary anchor element.
pub fn download_url(url: &str, filename: &str) -> Result<(), String> {
    let document = window()
        .and_then(|w| w.document())
        .ok_or_else(|| "No document available".to_string())?;
    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(js_error)?
        .dyn_into()
        .map_err(|_| "Failed to create download link".to_string())?;

    anchor.set_href(url);
    anchor.set_download(filename);
    anchor.click();
    log::info!("Download triggered: {} ({})", filename, url);
    Ok(())
}

/// Offers in-memory text as a file download.
pub fn download_text(filename: &str, mime: &str, contents: &str) -> Result<(), String> {
    let parts = Array::of1(&JsValue::from_str(contents));
    let options = BlobPropertyBag::new();
    options.set_type(mime);
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options).map_err(js_error)?;

    let url = Url::create_object_url_with_blob(&blob).map_err(js_error)?;
    let result = download_url(&url, filename);
    if let Err(e) = Url::revoke_object_url(&url) {
        log::warn!("Failed to revoke object URL: {}", js_error(e));
    }
    result
}

/// Asks the browser for the device position. `None` when geolocation is
/// unsupported, denied, or fails.
pub async fn current_position() -> Option<LocationQuery> {
    let navigator = window()?.navigator();
    let geolocation = Reflect::get(&navigator, &JsValue::from_str("geolocation")).ok()?;
    if geolocation.is_undefined() || geolocation.is_null() {
        log::warn!("Geolocation is not supported by this browser");
        return None;
    }

    let get_position: Function = Reflect::get(&geolocation, &JsValue::from_str("getCurrentPosition"))
        .ok()?
        .dyn_into()
        .ok()?;

    let promise = Promise::new(&mut |resolve, reject| {
        if let Err(e) = get_position.call2(&geolocation, &resolve, &reject) {
            let _ = reject.call1(&JsValue::NULL, &e);
        }
    });

    let position = match JsFuture::from(promise).await {
        Ok(position) => position,
        Err(e) => {
            log::warn!("Geolocation failed: {}", js_error(e));
            return None;
        }
    };

    let coords = Reflect::get(&position, &JsValue::from_str("coords")).ok()?;
    let latitude = Reflect::get(&coords, &JsValue::from_str("latitude")).ok()?.as_f64()?;
    let longitude = Reflect::get(&coords, &JsValue::from_str("longitude")).ok()?.as_f64()?;
    Some(LocationQuery::new(latitude, longitude))
}
