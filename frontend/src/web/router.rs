//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 实现了"监听 -> 验证 -> 处理 -> 加载"的导航流程。

use std::sync::Arc;

use eventspark::latest::LatestWins;
use eventspark::loader::LoaderOutcome;
use eventspark::log_info;
use eventspark_shared::CityGuide;
use futures::future::LocalBoxFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::prelude::*;

use super::route::{AppRoute, RouteData, RouteLocation};
use crate::auth::AuthStatus;
use crate::components::spinner::LoaderOverlay;
use crate::pages::not_found::RouteErrorPage;

/// 获取当前浏览器地址（path + query）
fn current_url() -> String {
    web_sys::window()
        .map(|w| {
            let location = w.location();
            let path = location.pathname().unwrap_or_else(|_| "/".to_string());
            let search = location.search().unwrap_or_default();
            format!("{}{}", path, search)
        })
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(url));
        }
    }
}

/// 替换 History 状态（内部工具函数，用于重定向）
fn replace_history_state(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(url));
        }
    }
}

/// 路由加载器：为带加载器的路由返回取数 Future
pub type RouteLoader =
    Arc<dyn Fn(&AppRoute) -> Option<LocalBoxFuture<'static, LoaderOutcome<RouteData>>> + Send + Sync>;

/// 加载器报告会话失效时的回调，由认证系统注入
pub type SessionExpiry = Arc<dyn Fn() + Send + Sync>;

/// 页面的加载状态
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Loading,
    Ready(RouteData),
    Failed { message: String, status: Option<u16> },
}

/// 当前地址与其加载状态，作为一个整体更新，避免新路由配上旧数据
#[derive(Debug, Clone, PartialEq)]
pub struct RouteState {
    pub location: RouteLocation,
    pub view: ViewState,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum HistoryMode {
    Push,
    Replace,
    /// popstate：浏览器已经改好了地址
    Keep,
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 通过注入认证状态信号实现与认证系统的解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    state: RwSignal<RouteState>,
    /// 认证状态（注入的信号，实现解耦）
    auth: Signal<AuthStatus>,
    loader: StoredValue<RouteLoader>,
    on_expired: StoredValue<SessionExpiry>,
    /// 加载器的后发优先计数器，用户离开后旧结果直接丢弃
    loads: StoredValue<LatestWins>,
    /// 首页定位后交给导览页的结果（仅内存）
    handoff: StoredValue<Option<CityGuide>>,
}

impl RouterService {
    fn new(auth: Signal<AuthStatus>, loader: RouteLoader, on_expired: SessionExpiry) -> Self {
        let location = RouteLocation::parse(&current_url());
        Self {
            state: RwSignal::new(RouteState {
                location,
                view: ViewState::Loading,
            }),
            auth,
            loader: StoredValue::new(loader),
            on_expired: StoredValue::new(on_expired),
            loads: StoredValue::new(LatestWins::new()),
            handoff: StoredValue::new(None),
        }
    }

    /// 当前路由状态信号
    pub fn state(&self) -> RwSignal<RouteState> {
        self.state
    }

    /// 当前地址（响应式）
    pub fn location(&self) -> Memo<RouteLocation> {
        let state = self.state;
        Memo::new(move |_| state.with(|s| s.location.clone()))
    }

    /// **核心方法：导航与守卫**
    ///
    /// 流程：请求 -> 验证(Guard) -> 处理 -> 加载
    pub fn navigate(&self, url: &str) {
        self.go(RouteLocation::parse(url), HistoryMode::Push);
    }

    /// 重定向（替换当前历史记录）
    pub fn replace(&self, url: &str) {
        self.go(RouteLocation::parse(url), HistoryMode::Replace);
    }

    /// 携带已获取的导览跳转到导览页
    pub fn navigate_with_guide(&self, guide: CityGuide) {
        self.handoff.set_value(Some(guide));
        self.navigate(eventspark::paths::AI_GUIDE);
    }

    /// 取走交接的导览（只能取一次）
    pub fn take_guide(&self) -> Option<CityGuide> {
        self.handoff.try_update_value(Option::take).flatten()
    }

    /// 取走一次性的成功标记（如 `?created=1`）
    ///
    /// 标记存在时从地址栏和当前状态中去掉它并返回 `true`；只改写 History，不触发重新渲染。
    /// 之后的重新渲染或后退都不会再看到这个标记。
    pub fn take_flag(&self, name: &str) -> bool {
        let location = self.state.with_untracked(|s| s.location.clone());
        if !location.query.flag(name) {
            return false;
        }
        let cleaned = RouteLocation {
            query: location.query.without(name),
            route: location.route,
        };
        replace_history_state(&cleaned.to_url());
        self.state.update_untracked(|s| s.location = cleaned);
        true
    }

    /// 重新运行当前路由的加载器
    pub fn reload(&self) {
        let location = self.state.with_untracked(|s| s.location.clone());
        self.go(location, HistoryMode::Keep);
    }

    fn go(&self, target: RouteLocation, mode: HistoryMode) {
        let status = self.auth.get_untracked();
        let url = target.to_url();

        // --- Step 1: 验证目标路由 ---
        // 认证状态未知时放行，探测完成后由 setup_auth_redirect 兜底
        if target.route.requires_auth() && status == AuthStatus::SignedOut {
            log_info!("[Router] Access denied to {}. Redirecting to sign in.", url);
            let redirect = AppRoute::auth_failure_redirect(&url);
            return self.go(RouteLocation::parse(&redirect), mode.or_replace());
        }

        if target.route.should_redirect_when_authenticated() && status == AuthStatus::SignedIn {
            log_info!("[Router] Already authenticated. Redirecting home.");
            let redirect = RouteLocation::parse(AppRoute::auth_success_redirect());
            return self.go(redirect, mode.or_replace());
        }

        // --- Step 2: 更新 History ---
        match mode {
            HistoryMode::Push => push_history_state(&url),
            HistoryMode::Replace => replace_history_state(&url),
            HistoryMode::Keep => {}
        }

        // --- Step 3: 加载 ---
        let ticket = self.loads.with_value(LatestWins::issue);
        let pending = self.loader.with_value(|loader| (**loader)(&target.route));

        let Some(pending) = pending else {
            self.state.set(RouteState {
                location: target,
                view: ViewState::Ready(RouteData::None),
            });
            return;
        };

        self.state.set(RouteState {
            location: target,
            view: ViewState::Loading,
        });

        let router = *self;
        spawn_local(async move {
            let outcome = pending.await;
            if !ticket.is_current() {
                return;
            }
            match outcome {
                LoaderOutcome::Ready(data) => {
                    router.state.update(|s| s.view = ViewState::Ready(data));
                }
                LoaderOutcome::Unauthorized { redirect } => {
                    // 先降级，否则守卫仍视为已登录，会把登录页重定向回首页
                    router.on_expired.with_value(|expire| expire());
                    router.replace(&redirect);
                }
                LoaderOutcome::Failed { message, status } => {
                    router
                        .state
                        .update(|s| s.view = ViewState::Failed { message, status });
                }
            }
        });
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let router = *self;

        let closure = Closure::<dyn Fn()>::new(move || {
            // popstate 时也执行守卫逻辑
            router.go(RouteLocation::parse(&current_url()), HistoryMode::Keep);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 设置认证状态变化时的自动重定向
    fn setup_auth_redirect(&self) {
        let router = *self;

        // 使用 Effect 监听认证状态变化
        Effect::new(move |previous: Option<AuthStatus>| {
            let status = router.auth.get();
            let location = router.state.with_untracked(|s| s.location.clone());
            let changed = previous.is_some_and(|p| p != AuthStatus::Unknown && p != status);

            match status {
                AuthStatus::SignedIn if location.route.should_redirect_when_authenticated() => {
                    log_info!("[Router] Auth state changed: signed in, leaving auth page.");
                    router.replace(AppRoute::auth_success_redirect());
                }
                AuthStatus::SignedOut if location.route.requires_auth() => {
                    log_info!("[Router] Auth state changed: signed out, redirecting to sign in.");
                    router.replace(&AppRoute::auth_failure_redirect(&location.to_url()));
                }
                // 观看者身份变了，带加载器的页面需要重新取数
                _ if changed && location.route.has_loader() => router.reload(),
                _ => {}
            }
            status
        });
    }
}

impl HistoryMode {
    /// 守卫触发的重定向不应留下被拒绝的历史记录
    fn or_replace(self) -> Self {
        match self {
            Self::Keep => Self::Replace,
            other => other,
        }
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(
    auth: Signal<AuthStatus>,
    loader: RouteLoader,
    on_expired: SessionExpiry,
) -> RouterService {
    let router = RouterService::new(auth, loader, on_expired);
    provide_context(router);

    // 初始化监听器
    router.init_popstate_listener();
    router.setup_auth_redirect();

    // 首次加载当前地址
    router.reload();
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 认证状态信号
    auth: Signal<AuthStatus>,
    /// 路由加载器
    loader: RouteLoader,
    /// 加载器遇到 401 时降级认证状态
    on_expired: SessionExpiry,
    /// 子组件
    children: Children,
) -> impl IntoView {
    provide_router(auth, loader, on_expired);

    children()
}

/// 路由出口组件
///
/// 根据当前路由及其加载状态渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前地址和加载器数据，返回对应视图
    matcher: fn(RouteLocation, RouteData) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let RouteState { location, view } = router.state().get();
        match view {
            ViewState::Loading => view! { <LoaderOverlay /> }.into_any(),
            ViewState::Failed { message, status } => {
                view! { <RouteErrorPage message=message status=status /> }.into_any()
            }
            ViewState::Ready(data) => matcher(location, data),
        }
    }
}

/// 站内链接：拦截点击改为 History 导航，保留修饰键的默认行为
#[component]
pub fn Link(
    /// 目标地址
    #[prop(into)]
    to: String,
    #[prop(optional, into)] class: String,
    /// 子内容
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let target = to.clone();
    let on_click = move |ev: web_sys::MouseEvent| {
        if ev.ctrl_key() || ev.meta_key() || ev.shift_key() || ev.button() != 0 {
            return;
        }
        ev.prevent_default();
        router.navigate(&target);
    };

    view! {
        <a href=to class=class on:click=on_click>
            {children()}
        </a>
    }
}
