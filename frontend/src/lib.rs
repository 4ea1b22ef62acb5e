//! EventSpark 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎，含加载器）
//! - `auth`: 会话状态管理
//! - `components` / `pages`: UI 层
//!
//! 请求、表单动作、加载器等纯逻辑在 `eventspark` crate 中，可脱离浏览器测试。

mod api;
mod auth;
mod components {
    pub mod city_guide_panel;
    pub mod event_card;
    pub mod footer;
    pub mod guide_cta;
    pub mod header;
    pub mod location_input;
    pub mod spinner;
    pub mod toast;
}
pub(crate) mod pages {
    pub mod ai_guide;
    pub mod create_event;
    pub mod event_detail;
    pub mod events;
    pub mod home;
    pub mod my_events;
    pub mod not_found;
    pub mod sign_in;
    pub mod sign_up;
}

use std::sync::Arc;

use eventspark::loader::{event_detail_loader, my_events_loader};
use futures::FutureExt;
use leptos::prelude::*;

use crate::api::{Api, provide_api};
use crate::auth::{AuthContext, init_auth};
use crate::components::footer::Footer;
use crate::components::header::Header;
use crate::components::spinner::LoaderOverlay;
use crate::components::toast::{Toaster, provide_toasts};
use crate::pages::ai_guide::AiGuidePage;
use crate::pages::create_event::CreateEventPage;
use crate::pages::event_detail::EventDetailPage;
use crate::pages::events::EventsPage;
use crate::pages::home::HomePage;
use crate::pages::my_events::MyEventsPage;
use crate::pages::not_found::NotFoundPage;
use crate::pages::sign_in::SignInPage;
use crate::pages::sign_up::SignUpPage;

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate，
// 以减小 WASM 二进制体积。
pub(crate) mod web {
    mod broadcast;
    mod form;
    mod geolocation;
    mod http;
    pub mod route;
    pub mod router;
    mod storage;
    mod timer;

    pub use broadcast::{AuthChannel, subscribe as subscribe_auth_changes};
    pub use form::submitted_fields;
    pub use geolocation::current_position;
    pub use http::{AbortableHttpClient, FetchHttpClient};
    pub use storage::LocalAuthFlag;
    pub use timer::sleep;
}

use web::route::{AppRoute, RouteData, RouteLocation};
use web::router::{RouteLoader, Router, RouterOutlet, SessionExpiry};

/// 路由匹配函数
///
/// 根据当前地址与加载器数据返回对应的页面。
fn route_matcher(location: RouteLocation, data: RouteData) -> AnyView {
    let RouteLocation { route, query } = location;
    match (route, data) {
        (AppRoute::Home, _) => view! { <HomePage /> }.into_any(),
        (AppRoute::Events, _) => view! { <EventsPage /> }.into_any(),
        (AppRoute::MyEvents, RouteData::MyEvents(events)) => {
            view! { <MyEventsPage events=events /> }.into_any()
        }
        (AppRoute::EventDetail(_), RouteData::EventDetail(detail)) => {
            view! { <EventDetailPage detail=detail /> }.into_any()
        }
        (AppRoute::CreateEvent, _) => view! { <CreateEventPage /> }.into_any(),
        (AppRoute::SignIn, _) => view! { <SignInPage query=query /> }.into_any(),
        (AppRoute::SignUp, _) => view! { <SignUpPage /> }.into_any(),
        (AppRoute::AiGuide, _) => view! { <AiGuidePage query=query /> }.into_any(),
        (AppRoute::NotFound(_), _) => view! { <NotFoundPage /> }.into_any(),
        // 加载器数据与路由不匹配：新数据尚未到达
        _ => view! { <LoaderOverlay /> }.into_any(),
    }
}

/// 路由加载器：只有需要服务端数据才能渲染的页面才有
fn route_loader(api: Api) -> RouteLoader {
    Arc::new(move |route: &AppRoute| match route {
        AppRoute::MyEvents => {
            let api = api.clone();
            Some(
                async move { my_events_loader(&api).await.map(RouteData::MyEvents) }
                    .boxed_local(),
            )
        }
        AppRoute::EventDetail(id) => {
            let api = api.clone();
            let id = id.clone();
            Some(
                async move {
                    event_detail_loader(&api, &id)
                        .await
                        .map(RouteData::EventDetail)
                }
                .boxed_local(),
            )
        }
        _ => None,
    })
}

/// 页面骨架：页头、内容区、页脚
#[component]
fn RootLayout() -> impl IntoView {
    view! {
        <div class="min-h-screen flex flex-col bg-base-200 font-sans">
            <Header />
            <main class="flex-1 w-full max-w-6xl mx-auto px-4 py-6">
                <RouterOutlet matcher=route_matcher />
            </main>
            <Footer />
            <Toaster />
        </div>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. API 客户端与提示框
    let api = provide_api();
    provide_toasts();

    // 2. 创建认证上下文并探测一次会话
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);
    init_auth(&auth_ctx, &api);

    // 3. 获取认证状态信号，用于注入路由服务（解耦！）
    let auth_status = auth_ctx.status_signal();
    let on_expired: SessionExpiry = Arc::new(move || auth::expire(&auth_ctx));

    view! {
        // 4. 路由器组件：注入认证信号实现守卫，注入加载器实现预取
        <Router auth=auth_status loader=route_loader(api) on_expired=on_expired>
            <RootLayout />
        </Router>
    }
}
