//! 定时器封装模块
//!
//! 把 `setTimeout` 包装成 Future，供核心 crate 的防抖逻辑使用。

use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

/// 等待 `millis` 毫秒
///
/// 设置定时器失败时立即完成，此时防抖退化为直接请求。
pub async fn sleep(millis: u32) {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        let scheduled = web_sys::window().is_some_and(|window| {
            window
                .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis as i32)
                .is_ok()
        });
        if !scheduled {
            let _ = resolve.call0(&JsValue::NULL);
        }
    });
    let _ = JsFuture::from(promise).await;
}
