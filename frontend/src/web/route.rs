//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由、查询参数及其属性。

use eventspark::detail::EventDetailView;
use eventspark::paths;
use eventspark_shared::Event;
use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 首页 (默认路由)
    #[default]
    Home,
    /// 附近活动
    Events,
    /// 活动详情 (加载器：活动 + 当前用户)
    EventDetail(String),
    /// 我的活动 (加载器：401 时跳转登录)
    MyEvents,
    /// 新建活动 (需要认证)
    CreateEvent,
    SignIn,
    SignUp,
    /// AI 城市导览，`?city=` 可选
    AiGuide,
    /// 页面未找到，保留原始 path 以免地址栏被改写
    NotFound(String),
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        let trimmed = if path.len() > 1 {
            path.trim_end_matches('/')
        } else {
            path
        };

        match trimmed {
            "" | paths::HOME => Self::Home,
            paths::EVENTS => Self::Events,
            paths::MY_EVENTS => Self::MyEvents,
            paths::CREATE_EVENT => Self::CreateEvent,
            paths::SIGN_IN => Self::SignIn,
            paths::SIGN_UP => Self::SignUp,
            paths::AI_GUIDE => Self::AiGuide,
            other => match other.strip_prefix("/events/") {
                Some(id) if !id.is_empty() && !id.contains('/') => {
                    let id = urlencoding::decode(id)
                        .map(|s| s.into_owned())
                        .unwrap_or_else(|_| id.to_string());
                    Self::EventDetail(id)
                }
                _ => Self::NotFound(path.to_string()),
            },
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> String {
        match self {
            Self::Home => paths::HOME.to_string(),
            Self::Events => paths::EVENTS.to_string(),
            Self::EventDetail(id) => paths::event_detail(id),
            Self::MyEvents => paths::MY_EVENTS.to_string(),
            Self::CreateEvent => paths::CREATE_EVENT.to_string(),
            Self::SignIn => paths::SIGN_IN.to_string(),
            Self::SignUp => paths::SIGN_UP.to_string(),
            Self::AiGuide => paths::AI_GUIDE.to_string(),
            Self::NotFound(path) => path.clone(),
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    ///
    /// 带加载器的路由由服务端 401 决定，不在这里拦截。
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::CreateEvent)
    }

    /// 定义已认证用户是否应该离开此路由（如登录页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::SignIn | Self::SignUp)
    }

    /// 是否在渲染前运行加载器
    pub fn has_loader(&self) -> bool {
        matches!(self, Self::MyEvents | Self::EventDetail(_))
    }

    /// 获取认证失败时的重定向目标，并带上原本要去的地址
    pub fn auth_failure_redirect(intended: &str) -> String {
        paths::sign_in_with_next(intended)
    }

    /// 获取认证成功时的重定向目标（从登录页）
    pub fn auth_success_redirect() -> &'static str {
        paths::HOME
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

// =========================================================
// 查询参数
// =========================================================

/// 解析后的 query string，保持原有顺序
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|s| s.into_owned())
        .unwrap_or(spaced)
}

impl QueryParams {
    /// 接受带或不带前导 `?` 的字符串
    pub fn parse(search: &str) -> Self {
        let search = search.strip_prefix('?').unwrap_or(search);
        Self(
            search
                .split('&')
                .filter(|pair| !pair.is_empty())
                .map(|pair| match pair.split_once('=') {
                    Some((k, v)) => (decode_component(k), decode_component(v)),
                    None => (decode_component(pair), String::new()),
                })
                .collect(),
        )
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// `?created=1` 一类的成功标记
    pub fn flag(&self, name: &str) -> bool {
        self.get(name) == Some("1")
    }

    /// 去掉指定参数后的副本，其余参数保持顺序
    pub fn without(&self, name: &str) -> Self {
        Self(self.0.iter().filter(|(k, _)| k != name).cloned().collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 重新编码为 `?a=b&c=d`，为空时返回空字符串
    pub fn to_search(&self) -> String {
        if self.0.is_empty() {
            return String::new();
        }
        let pairs: Vec<String> = self
            .0
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect();
        format!("?{}", pairs.join("&"))
    }
}

/// 当前地址：路由 + 查询参数
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteLocation {
    pub route: AppRoute,
    pub query: QueryParams,
}

impl RouteLocation {
    /// 解析站内 URL，例如 `/signin?next=%2Fmyevents`
    pub fn parse(url: &str) -> Self {
        let url = url.split('#').next().unwrap_or_default();
        let (path, search) = url.split_once('?').unwrap_or((url, ""));
        Self {
            route: AppRoute::from_path(path),
            query: QueryParams::parse(search),
        }
    }

    pub fn to_url(&self) -> String {
        format!("{}{}", self.route.to_path(), self.query.to_search())
    }
}

// =========================================================
// 加载器产出
// =========================================================

/// 加载器在渲染前交给页面的数据
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RouteData {
    #[default]
    None,
    MyEvents(Vec<Event>),
    EventDetail(EventDetailView),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_round_trip_to_routes() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Home);
        assert_eq!(AppRoute::from_path("/events/"), AppRoute::Events);
        assert_eq!(
            AppRoute::from_path("/events/65f0c1"),
            AppRoute::EventDetail("65f0c1".into())
        );
        assert_eq!(
            AppRoute::from_path("/events/a/b"),
            AppRoute::NotFound("/events/a/b".into())
        );
        assert_eq!(
            AppRoute::from_path("/nowhere"),
            AppRoute::NotFound("/nowhere".into())
        );
        assert_eq!(AppRoute::EventDetail("a b".into()).to_path(), "/events/a%20b");
        assert_eq!(
            AppRoute::from_path("/events/a%20b"),
            AppRoute::EventDetail("a b".into())
        );
    }

    #[test]
    fn test_guards() {
        assert!(AppRoute::CreateEvent.requires_auth());
        assert!(!AppRoute::MyEvents.requires_auth());
        assert!(AppRoute::MyEvents.has_loader());
        assert!(AppRoute::SignUp.should_redirect_when_authenticated());
        assert_eq!(
            AppRoute::auth_failure_redirect("/create"),
            "/signin?next=%2Fcreate"
        );
    }

    #[test]
    fn test_location_keeps_query() {
        let loc = RouteLocation::parse("/signin?next=%2Fevents%2F42#top");
        assert_eq!(loc.route, AppRoute::SignIn);
        assert_eq!(loc.query.get("next"), Some("/events/42"));
        assert_eq!(loc.to_url(), "/signin?next=%2Fevents%2F42");

        let loc = RouteLocation::parse("/ai-guide?city=New+York");
        assert_eq!(loc.query.get("city"), Some("New York"));

        let loc = RouteLocation::parse("/events?created=1");
        assert!(loc.query.flag("created"));
        assert!(!loc.query.flag("signedup"));
    }

    #[test]
    fn test_unknown_url_is_not_rewritten() {
        let loc = RouteLocation::parse("/old/page?ref=mail");
        assert_eq!(loc.route, AppRoute::NotFound("/old/page".into()));
        assert_eq!(loc.to_url(), "/old/page?ref=mail");
        assert!(!loc.route.has_loader());
        assert!(!loc.route.requires_auth());
    }

    #[test]
    fn test_consumed_flag_is_dropped_from_url() {
        let loc = RouteLocation::parse("/?signedin=1&city=Paris");
        let cleaned = RouteLocation {
            route: loc.route.clone(),
            query: loc.query.without("signedin"),
        };
        assert_eq!(cleaned.to_url(), "/?city=Paris");
        assert!(!cleaned.query.flag("signedin"));

        let loc = RouteLocation::parse("/events?created=1");
        assert_eq!(loc.query.without("created").to_search(), "");
    }
}
