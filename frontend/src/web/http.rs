//! HTTP 请求封装模块
//!
//! 基于 `web_sys::fetch` 实现核心 crate 的 [`HttpClient`] 接缝。

use eventspark::error::{ApiError, ApiResult};
use eventspark::request::{HttpClient, HttpRequest, HttpResponse};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, AbortSignal, Headers, Request, RequestCredentials, RequestInit, Response};

/// JS 异常转为网络错误，尽量取出 `Error.message`
fn network_error(e: JsValue) -> ApiError {
    let message = e
        .dyn_ref::<js_sys::Error>()
        .map(|err| String::from(err.message()))
        .unwrap_or_else(|| format!("{:?}", e));
    ApiError::network(message)
}

async fn fetch(req: HttpRequest, signal: Option<&AbortSignal>) -> ApiResult<HttpResponse> {
    let headers = Headers::new().map_err(network_error)?;
    for (key, value) in &req.headers {
        headers.set(key, value).map_err(network_error)?;
    }

    let opts = RequestInit::new();
    opts.set_method(req.method.as_str());
    opts.set_headers(&headers.into());
    if req.credentials {
        opts.set_credentials(RequestCredentials::Include);
    }
    if let Some(body) = &req.body {
        opts.set_body(&JsValue::from_str(body));
    }
    if let Some(signal) = signal {
        opts.set_signal(Some(signal));
    }

    let request = Request::new_with_str_and_init(&req.url, &opts).map_err(network_error)?;
    let window = web_sys::window().ok_or_else(|| ApiError::network("无法获取 window 对象"))?;

    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(network_error)?
        .dyn_into()
        .map_err(network_error)?;

    let text = JsFuture::from(response.text().map_err(network_error)?)
        .await
        .map_err(network_error)?
        .as_string()
        .unwrap_or_default();

    Ok(HttpResponse {
        status: response.status(),
        status_text: response.status_text(),
        body: text,
    })
}

/// 浏览器 fetch 客户端
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchHttpClient;

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchHttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        fetch(req, None).await
    }
}

/// 同一时刻只保留一个请求：发起新请求前中止上一个
#[derive(Clone, Default)]
pub struct AbortableHttpClient {
    inflight: Rc<RefCell<Option<AbortController>>>,
}

impl AbortableHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn abort(&self) {
        if let Some(previous) = self.inflight.borrow_mut().take() {
            previous.abort();
        }
    }
}

#[async_trait::async_trait(?Send)]
impl HttpClient for AbortableHttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        self.abort();
        let controller = AbortController::new().map_err(network_error)?;
        let signal = controller.signal();
        *self.inflight.borrow_mut() = Some(controller);

        fetch(req, Some(&signal)).await
    }
}
