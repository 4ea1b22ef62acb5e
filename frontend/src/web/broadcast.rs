//! 认证变化广播
//!
//! 同一页面内通过自定义事件 `authchange` 通知；其他标签页依赖浏览器的
//! `storage` 事件（修改 localStorage 时只会在其他标签页触发）。

use eventspark::session::AuthBroadcast;
use eventspark_shared::{AUTH_CHANGE_EVENT, AUTH_FLAG_KEY};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, StorageEvent};

#[derive(Debug, Clone, Copy, Default)]
pub struct AuthChannel;

impl AuthBroadcast for AuthChannel {
    fn notify(&self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Ok(event) = Event::new(AUTH_CHANGE_EVENT) {
            let _ = window.dispatch_event(&event);
        }
    }
}

/// 订阅认证变化；整个应用只应调用一次
pub fn subscribe<F>(on_change: F)
where
    F: Fn() + 'static,
{
    let Some(window) = web_sys::window() else {
        return;
    };

    let closure = Closure::<dyn Fn(Event)>::new(move |event: Event| {
        // 其他键的变化与认证无关；key 为空表示整个 storage 被清空
        if let Some(storage) = event.dyn_ref::<StorageEvent>() {
            if storage.key().is_some_and(|key| key != AUTH_FLAG_KEY) {
                return;
            }
        }
        on_change();
    });

    for name in ["storage", AUTH_CHANGE_EVENT] {
        let _ = window.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
    }

    // 泄漏闭包以保持监听器存活
    closure.forget();
}
