//! LocalStorage 封装模块
//!
//! 使用 `web_sys::Storage` 提供简洁的本地存储接口。

use eventspark::session::AuthFlagStore;
use eventspark_shared::{AUTH_FLAG_KEY, AUTH_FLAG_VALUE};

/// 本地存储操作封装
///
/// 提供静态方法访问浏览器 LocalStorage API。
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    /// 获取存储的字符串值，键不存在或出错时返回 `None`
    pub fn get(key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    /// 设置存储值，返回是否成功
    pub fn set(key: &str, value: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    /// 删除存储的键值对，返回是否成功
    pub fn delete(key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }
}

/// `localStorage["auth"]` 乐观认证标记
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalAuthFlag;

impl AuthFlagStore for LocalAuthFlag {
    fn is_set(&self) -> bool {
        LocalStorage::get(AUTH_FLAG_KEY).as_deref() == Some(AUTH_FLAG_VALUE)
    }

    fn set(&self) {
        LocalStorage::set(AUTH_FLAG_KEY, AUTH_FLAG_VALUE);
    }

    fn clear(&self) {
        LocalStorage::delete(AUTH_FLAG_KEY);
    }
}
