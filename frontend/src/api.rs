use eventspark::{ClientConfig, EventSparkApi};
use leptos::prelude::*;

use crate::web::FetchHttpClient;

/// 浏览器环境下的 API 客户端
pub type Api = EventSparkApi<FetchHttpClient>;

/// 创建 API 客户端并放入 Context
pub fn provide_api() -> Api {
    let api = EventSparkApi::new(FetchHttpClient, ClientConfig::from_build_env());
    provide_context(api.clone());
    api
}

/// 从 Context 获取 API 客户端
pub fn use_api() -> Api {
    use_context::<Api>().expect("Api should be provided")
}
