//! 认证模块
//!
//! 管理会话状态，与路由系统解耦。
//! 路由服务通过注入的认证状态信号来检查认证状态。
//!
//! 生命周期：启动时创建并探测一次，之后只在收到认证变化广播时重新探测；
//! 状态只通过 `refresh` / `confirm` / `expire` / `logout` 修改。

use eventspark::latest::LatestWins;
use eventspark::session::{self, AuthFlagStore, AuthSession};
use eventspark_shared::User;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::Api;
use crate::web::{AuthChannel, LocalAuthFlag, subscribe_auth_changes};

/// 认证状态
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    /// 是否已认证（首个探测完成前取本地标记的乐观值）
    pub is_authenticated: bool,
    /// 服务端确认过的当前用户
    pub current_user: Option<User>,
    /// 首个探测是否仍在进行
    pub is_loading: bool,
}

impl AuthState {
    fn apply(&mut self, session: AuthSession) {
        self.is_authenticated = session.is_authenticated;
        self.current_user = session.current_user;
        self.is_loading = false;
    }
}

/// 路由守卫使用的三态
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthStatus {
    Unknown,
    SignedIn,
    SignedOut,
}

/// 认证上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// 认证状态（只读）
    pub state: ReadSignal<AuthState>,
    /// 设置认证状态（写入）
    set_state: WriteSignal<AuthState>,
    /// 探测的后发优先计数器
    probes: StoredValue<LatestWins>,
}

impl AuthContext {
    /// 创建新的认证上下文
    pub fn new() -> Self {
        let (state, set_state) = signal(AuthState {
            is_authenticated: LocalAuthFlag.is_set(),
            current_user: None,
            is_loading: true,
        });
        Self {
            state,
            set_state,
            probes: StoredValue::new(LatestWins::new()),
        }
    }

    /// 获取认证状态信号（用于路由服务注入）
    pub fn status_signal(&self) -> Signal<AuthStatus> {
        let state = self.state;
        Signal::derive(move || {
            state.with(|s| match (s.is_loading, s.is_authenticated) {
                (true, _) => AuthStatus::Unknown,
                (false, true) => AuthStatus::SignedIn,
                (false, false) => AuthStatus::SignedOut,
            })
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.with(|s| s.is_authenticated)
    }

    pub fn current_user(&self) -> Option<User> {
        self.state.with(|s| s.current_user.clone())
    }

    pub fn user_id(&self) -> Option<String> {
        self.state
            .with(|s| s.current_user.as_ref().map(|u| u.id.clone()))
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 初始化认证状态：探测一次，并订阅跨标签页 / 应用内的变化
pub fn init_auth(ctx: &AuthContext, api: &Api) {
    refresh(ctx, api);

    let ctx = *ctx;
    let api = api.clone();
    subscribe_auth_changes(move || refresh(&ctx, &api));
}

/// 重新向服务端确认会话，旧的探测结果会被丢弃
pub fn refresh(ctx: &AuthContext, api: &Api) {
    let ticket = ctx.probes.with_value(LatestWins::issue);
    let set_state = ctx.set_state;
    let api = api.clone();

    spawn_local(async move {
        if let Some(session) = session::probe_latest(&api, &LocalAuthFlag, ticket).await {
            set_state.update(|state| state.apply(session));
        }
    });
}

/// 登录或注册成功后等待服务端确认会话
///
/// 跳转前必须拿到已登录状态，否则路由守卫会把 `next` 指向的受保护页面拦回登录页。
pub async fn confirm(ctx: &AuthContext, api: &Api) {
    let ticket = ctx.probes.with_value(LatestWins::issue);
    if let Some(session) = session::probe_latest(api, &LocalAuthFlag, ticket).await {
        ctx.set_state.update(|state| state.apply(session));
    }
}

/// 路由加载器收到 401：会话已失效，立即降级
pub fn expire(ctx: &AuthContext) {
    ctx.probes.with_value(LatestWins::invalidate);
    let session = session::expire(&LocalAuthFlag, &AuthChannel);
    ctx.set_state.update(|state| state.apply(session));
}

/// 注销：无论请求是否成功都清除本地状态
///
/// 导航由调用方处理；受保护页面会被路由服务的认证监听自动重定向。
pub async fn logout(ctx: &AuthContext, api: &Api) {
    // 进行中的探测可能返回旧会话
    ctx.probes.with_value(LatestWins::invalidate);
    let session = session::logout(api, &LocalAuthFlag, &AuthChannel).await;
    ctx.set_state.update(|state| state.apply(session));
}
