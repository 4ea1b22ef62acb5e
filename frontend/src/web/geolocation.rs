//! 浏览器定位封装
//!
//! 把回调式的 `getCurrentPosition` 包装成 Future。

use eventspark::config::GeolocationOptions;
use eventspark::listing::GeolocationError;
use eventspark_shared::LatLng;
use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::PositionOptions;

fn number_at(value: &JsValue, path: &[&str]) -> Option<f64> {
    let mut current = value.clone();
    for key in path {
        current = Reflect::get(&current, &JsValue::from_str(key)).ok()?;
    }
    current.as_f64()
}

/// 获取一次当前位置
pub async fn current_position(options: &GeolocationOptions) -> Result<LatLng, GeolocationError> {
    let geolocation = web_sys::window()
        .and_then(|w| w.navigator().geolocation().ok())
        .ok_or(GeolocationError::Unsupported)?;

    let opts = PositionOptions::new();
    opts.set_enable_high_accuracy(options.high_accuracy);
    opts.set_timeout(options.timeout.as_millis() as u32);
    opts.set_maximum_age(options.maximum_age.as_millis() as u32);

    let promise = Promise::new(&mut |resolve: Function, reject: Function| {
        let on_success = Closure::once_into_js(move |position: JsValue| {
            let _ = resolve.call1(&JsValue::NULL, &position);
        });
        let reject_error = reject.clone();
        let on_error = Closure::once_into_js(move |error: JsValue| {
            let _ = reject_error.call1(&JsValue::NULL, &error);
        });

        let started = geolocation.get_current_position_with_error_callback_and_options(
            on_success.unchecked_ref(),
            Some(on_error.unchecked_ref()),
            &opts,
        );
        if started.is_err() {
            let _ = reject.call0(&JsValue::NULL);
        }
    });

    let position = JsFuture::from(promise).await.map_err(|error| {
        number_at(&error, &["code"])
            .map(|code| GeolocationError::from_code(code as u16))
            .unwrap_or(GeolocationError::Unavailable)
    })?;

    match (
        number_at(&position, &["coords", "latitude"]),
        number_at(&position, &["coords", "longitude"]),
    ) {
        (Some(lat), Some(lng)) => Ok(LatLng { lat, lng }),
        _ => Err(GeolocationError::Unavailable),
    }
}
